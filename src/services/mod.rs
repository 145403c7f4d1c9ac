pub mod account;
pub mod hotel;
pub mod jsonwebtoken;
