pub mod issue_database;
pub mod issue_store;
