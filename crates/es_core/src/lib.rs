pub mod error;
pub mod models;
pub mod parser;
pub mod types;

pub use error::Error;
pub use models::{GenerationOptions, TextGenerator};
pub use parser::{parse, Label};
pub use types::SummaryRecord;

pub type Result<T> = std::result::Result<T, Error>;
