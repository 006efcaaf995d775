pub mod baseline;
pub mod canonical;
