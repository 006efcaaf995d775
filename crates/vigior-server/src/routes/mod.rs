pub mod cohort;
pub mod evaluate;
pub mod health;
pub mod models;
pub mod records;
