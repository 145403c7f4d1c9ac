use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::domain::models::account::{Account, CreateAccount};

#[derive(Debug, Deserialize)]
pub struct SurrealAccount {
    id: Thing,
    first_name: String,
    surname: String,
    email: String,
    password: String,
    #[serde(default)]
    is_admin: bool,
}

#[derive(Serialize)]
pub struct SurrealAccountCreate {
    first_name: String,
    surname: String,
    email: String,
    password: String,
    is_admin: bool,
}

impl From<CreateAccount> for SurrealAccountCreate {
    fn from(acc: CreateAccount) -> Self {
        SurrealAccountCreate {
            first_name: acc.first_name,
            surname: acc.surname,
            email: acc.email,
            password: acc.password,
            is_admin: false,
        }
    }
}

impl From<SurrealAccount> for Account {
    fn from(acc: SurrealAccount) -> Self {
        Account {
            id: acc.id.id.to_raw(),
            first_name: acc.first_name,
            surname: acc.surname,
            email: acc.email,
            password: acc.password,
            is_admin: acc.is_admin,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SurrealCount {
    pub count: i64,
}
