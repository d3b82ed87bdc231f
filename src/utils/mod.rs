pub mod database;
pub mod envelope;
pub mod validation;
