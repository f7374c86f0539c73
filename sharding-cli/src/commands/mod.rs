mod generate;

// Generate commands
pub use generate::{GenerateOptions, run_generate};
