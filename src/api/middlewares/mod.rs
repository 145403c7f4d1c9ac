pub mod auth;
pub mod context;
pub mod flash;
pub mod flow;
pub mod upload;
pub mod validate;
