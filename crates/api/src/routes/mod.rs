pub mod collections;
pub mod health;
