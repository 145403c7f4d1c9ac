use std::sync::Arc;

use async_trait::async_trait;
use surrealdb::Surreal;
use surrealdb::engine::remote::ws::Client;

use crate::domain::models::account::{Account, CreateAccount};
use crate::domain::repositories::account::{AccountRepository, FindByCol};
use crate::domain::repositories::repository::{RepositoryError, RepositoryResult};
use crate::infrastructure::models::account::{SurrealAccount, SurrealAccountCreate, SurrealCount};

pub struct AccountRepositoryImpl {
    db: Arc<Surreal<Client>>,
}

impl AccountRepositoryImpl {
    pub fn new(db: Arc<Surreal<Client>>) -> Self {
        Self { db }
    }
}

const ACCOUNT: &str = "account";

#[async_trait]
impl AccountRepository for AccountRepositoryImpl {
    async fn signup(&self, new_account: CreateAccount) -> RepositoryResult<Account> {
        let account: Option<SurrealAccount> = self
            .db
            .create(ACCOUNT)
            .content(SurrealAccountCreate::from(new_account))
            .await?;

        account
            .map(Into::into)
            .ok_or_else(|| RepositoryError::Inconsistent("account was not created".into()))
    }

    async fn is_account(&self, email: &str) -> RepositoryResult<bool> {
        let mut res = self
            .db
            .query("(SELECT count() FROM type::table($table) WHERE email = type::string($email) GROUP ALL)[0] or { count: 0 }")
            .bind(("table", ACCOUNT))
            .bind(("email", email.to_owned()))
            .await?;

        let counter = res.take::<Option<SurrealCount>>(0)?;

        Ok(counter.is_some_and(|counter| counter.count > 0))
    }

    async fn find_one(&self, column: FindByCol) -> RepositoryResult<Option<Account>> {
        let account: Option<SurrealAccount> = match column {
            FindByCol::Id(id) => self.db.select((ACCOUNT, id)).await?,
            column => self
                .db
                .query(format!(
                    "SELECT * FROM type::table($table) WHERE {column} = type::string($value)"
                ))
                .bind(("table", ACCOUNT))
                .bind(("value", column.value()))
                .await?
                .take(0)?,
        };

        Ok(account.map(Into::into))
    }
}
