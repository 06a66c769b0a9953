pub mod datetime;
pub mod error;
pub mod parser;
pub mod types;

pub use datetime::DateTimeFormat;
pub use parser::Parser;
pub use types::{Command, TaskDraft};
