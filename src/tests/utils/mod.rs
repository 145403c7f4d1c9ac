pub mod crypto;
pub mod mock;
pub mod seed;
