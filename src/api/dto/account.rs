use crate::api::dto::validation::sanitize;
use crate::domain::models::account::{Account, CreateAccount, Credentials};
use serde::Deserialize;
use serde::Serialize;
use utoipa::ToSchema;

/// Account as exposed to views. Never carries the password hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountView {
    id: String,
    first_name: String,
    surname: String,
    email: String,
    is_admin: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SignUpDTO {
    #[schema(examples("Ada"))]
    pub first_name: String,

    #[schema(examples("Lovelace"))]
    pub surname: String,

    #[schema(examples("ada@lets-travel.com"))]
    pub email: String,

    #[schema(examples("ada@lets-travel.com"))]
    pub confirm_email: String,

    #[schema(examples("p4ssw0rd"))]
    pub password: String,

    #[schema(examples("p4ssw0rd"))]
    pub confirm_password: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CredentialsDTO {
    #[schema(examples("ada@lets-travel.com"))]
    pub email: String,

    #[schema(examples("p4ssw0rd"))]
    pub password: String,
}

impl From<&Account> for AccountView {
    fn from(val: &Account) -> Self {
        AccountView {
            id: val.id.to_owned(),
            first_name: val.first_name.to_owned(),
            surname: val.surname.to_owned(),
            email: val.email.to_owned(),
            is_admin: val.is_admin,
        }
    }
}

impl SignUpDTO {
    /// Escapes names and password. The email is only trimmed so that
    /// addresses like `o'brien@...` stay valid.
    pub fn sanitized(&self) -> CreateAccount {
        CreateAccount {
            first_name: sanitize(&self.first_name),
            surname: sanitize(&self.surname),
            email: self.email.trim().to_string(),
            password: sanitize(&self.password),
        }
    }
}

impl From<CredentialsDTO> for Credentials {
    fn from(credentials: CredentialsDTO) -> Self {
        Credentials {
            email: credentials.email.trim().to_string(),
            password: sanitize(&credentials.password),
        }
    }
}
