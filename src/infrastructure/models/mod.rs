pub mod account;
pub mod hotel;
