use std::sync::Arc;

use crate::domain::{
    error::{AppError, AppResult},
    models::account::{Account, CreateAccount, Credentials, normalize_email},
    repositories::account::{AccountRepository, FindByCol},
    services::account::AccountService,
};

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, Result, SaltString, rand_core::OsRng,
    },
};

use async_trait::async_trait;

pub struct AccountServiceImpl {
    repository: Arc<dyn AccountRepository>,
}

impl AccountServiceImpl {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    async fn is_account(&self, email: &str) -> AppResult<bool> {
        Ok(self.repository.is_account(email).await?)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        Ok(self
            .repository
            .find_one(FindByCol::Email(email.to_string()))
            .await?)
    }
}

#[async_trait]
impl AccountService for AccountServiceImpl {
    #[tracing::instrument(skip_all)]
    async fn signup(&self, mut new_account: CreateAccount) -> AppResult<Account> {
        new_account.email = normalize_email(&new_account.email);

        if self.is_account(&new_account.email).await? {
            return Err(AppError::Conflict("Account already exists"));
        }

        new_account.password = encrypt_password(&new_account.password)?;

        let account = self.repository.signup(new_account).await?;

        tracing::info!(account = %account.id, "account registered");

        Ok(account)
    }

    #[tracing::instrument(skip_all)]
    async fn signin(&self, credentials: Credentials) -> AppResult<Account> {
        let email = normalize_email(&credentials.email);

        let account = match self.find_by_email(&email).await? {
            Some(account) => account,
            None => return Err(AppError::Unauthorized()),
        };

        verify_password(&credentials.password, &account.password)?;

        Ok(account)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Account>> {
        Ok(self
            .repository
            .find_one(FindByCol::Id(id.to_string()))
            .await?)
    }
}

pub fn encrypt_password(password: &str) -> Result<String> {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<()> {
    let argon2 = Argon2::default();
    let hash = PasswordHash::new(hash);

    argon2.verify_password(password.as_bytes(), &hash?)
}
