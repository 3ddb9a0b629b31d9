pub mod health;
pub mod log;
