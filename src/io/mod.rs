pub mod csv;
pub mod json;

// Re-export commonly used functions
pub use csv::{read_csv, write_csv};
pub use json::{write_json, write_summaries_json};
