#[derive(Debug, Clone)]
pub struct Account {
    pub id: String,
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Emails are stored trimmed and lower-cased so they stay unique regardless
/// of how they were typed.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
