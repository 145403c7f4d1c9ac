pub mod databases;
pub mod media;
pub mod models;
pub mod repositories;
