//! Register header model and `#define` parser
//!
//! This module contains the C header parser and the model it produces.

pub mod model;
pub mod parser;

// Re-export key types for convenience
pub use model::{
    genmask, BitDefinition, HeaderModel, MaskDefinition, ModelStats, RegisterDefinition,
};
pub use parser::{parse_header_file, parse_header_str, parse_line, HeaderLine, HeaderModelBuilder};
