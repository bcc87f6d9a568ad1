//! Parsers for identifier-list input files.

pub mod input;

pub use input::{parse_input_text, read_input_file, InputEntities, ParseError};
