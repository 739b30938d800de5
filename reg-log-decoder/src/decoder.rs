//! Main decoder API
//!
//! This module provides the primary interface for the decoder library.
//! The Decoder struct owns the header model and drives rewriting of log
//! lines and files.

use crate::config::DecoderConfig;
use crate::header::{HeaderModel, ModelStats};
use crate::rewriter::LogRewriter;
use crate::types::{Result, RewriteStats};
use std::fs;
use std::path::Path;

/// The main decoder struct - entry point for all decoding operations
pub struct Decoder {
    /// Register definitions loaded from the header
    model: HeaderModel,
    config: DecoderConfig,
}

impl Decoder {
    /// Create a decoder with default configuration and an empty model
    pub fn new() -> Self {
        Self {
            model: HeaderModel::new(),
            config: DecoderConfig::default(),
        }
    }

    /// Create a decoder with a validated configuration
    pub fn with_config(config: DecoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            model: HeaderModel::new(),
            config,
        })
    }

    /// Load a header file, replacing any previously loaded model
    ///
    /// # Example
    /// ```no_run
    /// use reg_log_decoder::Decoder;
    /// use std::path::Path;
    ///
    /// let mut decoder = Decoder::new();
    /// decoder.load_header(Path::new("smb-reg.h")).unwrap();
    /// ```
    pub fn load_header(&mut self, path: &Path) -> Result<()> {
        self.model = crate::header::parse_header_file(path, &self.config)?;
        Ok(())
    }

    /// Load header text, replacing any previously loaded model
    pub fn load_header_str(&mut self, content: &str) -> Result<()> {
        self.model = crate::header::parse_header_str(content, &self.config)?;
        Ok(())
    }

    /// Rewrite log lines in memory
    pub fn rewrite_lines<S: AsRef<str>>(&self, lines: &[S]) -> (Vec<String>, RewriteStats) {
        LogRewriter::new(&self.model, &self.config).rewrite_lines(lines)
    }

    /// Rewrite log text; output lines are joined with `\n`, no trailing newline
    pub fn rewrite_str(&self, content: &str) -> (String, RewriteStats) {
        let lines = self.split_lines(content);
        let (output, stats) = self.rewrite_lines(&lines);
        (output.join("\n"), stats)
    }

    /// Read `input`, rewrite every line and write the result to `output`
    ///
    /// # Example
    /// ```no_run
    /// use reg_log_decoder::Decoder;
    /// use std::path::Path;
    ///
    /// let mut decoder = Decoder::new();
    /// decoder.load_header(Path::new("smb-reg.h")).unwrap();
    /// let stats = decoder
    ///     .rewrite_file(Path::new("dmesg.txt"), Path::new("dmesg.decoded.txt"))
    ///     .unwrap();
    /// println!("{}", stats);
    /// ```
    pub fn rewrite_file(&self, input: &Path, output: &Path) -> Result<RewriteStats> {
        log::info!("Rewriting log file: {:?}", input);

        let content = fs::read_to_string(input)?;
        let (rewritten, stats) = self.rewrite_str(&content);
        fs::write(output, rewritten)?;

        log::info!("Wrote {:?}: {}", output, stats);
        Ok(stats)
    }

    pub fn model(&self) -> &HeaderModel {
        &self.model
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Get statistics about the loaded header model
    pub fn model_stats(&self) -> ModelStats {
        self.model.stats()
    }

    fn split_lines<'c>(&self, content: &'c str) -> Vec<&'c str> {
        if self.config.trim_lines {
            content.lines().map(str::trim).collect()
        } else {
            content.lines().collect()
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}
