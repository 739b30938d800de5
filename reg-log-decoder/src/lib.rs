//! Register Log Decoder Library
//!
//! Annotates kernel/driver logs with register names taken from a C header.
//! A line such as
//!
//! ```text
//! smblib_read(addr = 0x100d, val = 0x78)
//! ```
//!
//! becomes
//!
//! ```text
//! smblib_read(addr = STATUS, val = DCP_BIT|RESULT_MASK=0x7)
//! ```
//!
//! # Architecture
//!
//! One linear pipeline, rebuilt on every run:
//! - [`header`] parses `#define NAME VALUE`, `BIT(n)` and `GENMASK(hi, lo)`
//!   macros into a [`HeaderModel`]
//! - [`ValueDecoder`] renders a raw value as named bits and fields
//! - [`LogRewriter`] substitutes names into `addr = ` / `val = ` literals
//!
//! Console output, configuration files and reports live in the application
//! layer (reg-log-cli).
//!
//! # Example Usage
//!
//! ```
//! use reg_log_decoder::Decoder;
//!
//! let mut decoder = Decoder::new();
//! decoder
//!     .load_header_str(
//!         "#define STATUS 0x100d\n\
//!          #define DCP_BIT BIT(3)\n\
//!          #define RESULT_MASK GENMASK(7, 4)\n",
//!     )
//!     .unwrap();
//!
//! let (output, stats) = decoder.rewrite_str("addr = 0x100d, val = 0x78");
//! assert_eq!(output, "addr = STATUS, val = DCP_BIT|RESULT_MASK=0x7");
//! assert_eq!(stats.rewritten_lines, 1);
//! ```

// Public modules
pub mod config;
pub mod decoder;
pub mod header;
pub mod rewriter;
pub mod types;
pub mod value_decoder;

// Re-export main types for convenience
pub use config::{DecoderConfig, OrphanPolicy};
pub use decoder::Decoder;
pub use header::{
    BitDefinition, HeaderModel, MaskDefinition, ModelStats, RegisterDefinition,
};
pub use rewriter::LogRewriter;
pub use types::{DecoderError, LineOutcome, Result, RewriteStats};
pub use value_decoder::ValueDecoder;

// Internal modules (not exposed in public API)
mod literal;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
