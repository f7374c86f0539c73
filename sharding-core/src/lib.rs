pub mod assembler;
pub mod config;
pub mod constants;
pub mod datasource;
pub mod error;
pub mod generator;
pub mod input;
pub mod normalizer;
pub mod rules;

pub use error::{InputFormatError, Result, ShardingError};
pub use generator::{GenerationOutcome, RenderedConfig, ShardingGenerator, generate_from_str};
