pub mod health;
pub mod proof;
