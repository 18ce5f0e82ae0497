pub mod issue;
pub mod timestamp;
