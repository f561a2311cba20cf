pub mod catalog;
pub mod loader;
pub mod report;
pub mod shell;

pub use crate::domain::model::{Course, LineDiagnostic, LineIssue, LoadReport};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
