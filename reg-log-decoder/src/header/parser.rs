//! Header file parser
//!
//! Recognizes three `#define` forms, one per line:
//!
//! ```text
//! #define NAME 0x100d           register (hex or decimal)
//! #define NAME BIT(3)           flag bit of the preceding register
//! #define NAME GENMASK(7, 4)    bitfield of the preceding register
//! ```
//!
//! Everything else is skipped. Bits and masks belong to whichever register
//! was most recently defined above them.

use crate::config::{DecoderConfig, OrphanPolicy};
use crate::header::model::{BitDefinition, HeaderModel, MaskDefinition};
use crate::literal::parse_int_literal;
use crate::types::{DecoderError, Result};
use std::path::Path;

/// Bit positions must address a `u64` register value
const MAX_BIT: u64 = 63;

/// A recognized header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderLine<'a> {
    Register { name: &'a str, value: u64 },
    Bit { name: &'a str, bit: u32 },
    Mask { name: &'a str, high_bit: u32, low_bit: u32 },
}

/// Classify one header line. Returns `None` for lines of no interest.
pub fn parse_line(line: &str) -> Option<HeaderLine<'_>> {
    let (name, body) = split_define(line)?;

    // Plain literal takes priority over BIT()/GENMASK()
    if let Some(value) = body.split_whitespace().last().and_then(parse_int_literal) {
        return Some(HeaderLine::Register { name, value });
    }

    if let Some(args) = call_args(body, "BIT") {
        let bit = bit_number(args.trim())?;
        return Some(HeaderLine::Bit { name, bit });
    }

    if let Some(args) = call_args(body, "GENMASK") {
        let (hi, lo) = args.split_once(',')?;
        let high_bit = bit_number(hi.trim())?;
        let low_bit = bit_number(lo.trim())?;
        return Some(HeaderLine::Mask {
            name,
            high_bit,
            low_bit,
        });
    }

    None
}

/// Split `#define NAME rest` into `(NAME, rest)`. The name must be followed
/// by whitespace, which rules out function-like macros and empty defines.
fn split_define(line: &str) -> Option<(&str, &str)> {
    let start = line.find("#define")?;
    let rest = &line[start + "#define".len()..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let rest = rest.trim_start();
    let name_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    if name_len == 0 {
        return None;
    }

    let (name, after) = rest.split_at(name_len);
    if !after.starts_with(char::is_whitespace) {
        return None;
    }
    Some((name, after.trim()))
}

/// Arguments of the first `macro(...)` call in `body` that starts the body
/// or follows whitespace.
fn call_args<'a>(body: &'a str, macro_name: &str) -> Option<&'a str> {
    let opener = format!("{}(", macro_name);
    body.match_indices(&opener).find_map(|(pos, _)| {
        let standalone = body[..pos]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace);
        if !standalone {
            return None;
        }
        let args = &body[pos + opener.len()..];
        args.find(')').map(|end| &args[..end])
    })
}

fn bit_number(token: &str) -> Option<u32> {
    let bit = parse_int_literal(token)?;
    if bit > MAX_BIT {
        log::warn!("Bit position {} out of range, ignoring definition", bit);
        return None;
    }
    Some(bit as u32)
}

/// Incrementally builds a [`HeaderModel`] from header lines, tracking the
/// register that bits and masks attach to.
pub struct HeaderModelBuilder {
    model: HeaderModel,
    current_register: Option<usize>,
    orphan_policy: OrphanPolicy,
}

impl HeaderModelBuilder {
    pub fn new(orphan_policy: OrphanPolicy) -> Self {
        Self {
            model: HeaderModel::new(),
            current_register: None,
            orphan_policy,
        }
    }

    /// Feed one line; `line_number` is 1-based and used for diagnostics
    pub fn push_line(&mut self, line_number: usize, line: &str) -> Result<()> {
        let Some(parsed) = parse_line(line) else {
            log::trace!("Skipping header line {}: {:?}", line_number, line);
            return Ok(());
        };

        match parsed {
            HeaderLine::Register { name, value } => {
                log::debug!("Register {} = 0x{:x}", name, value);
                self.current_register = Some(self.model.insert_register(name, value));
            }
            HeaderLine::Bit { name, bit } => {
                if let Some(parent) = self.parent(line_number, "BIT()", name)? {
                    log::debug!("  bit {} = BIT({})", name, bit);
                    self.model.add_bit(parent, BitDefinition::new(name, bit));
                }
            }
            HeaderLine::Mask {
                name,
                high_bit,
                low_bit,
            } => {
                if let Some(parent) = self.parent(line_number, "GENMASK()", name)? {
                    log::debug!("  mask {} = GENMASK({}, {})", name, high_bit, low_bit);
                    self.model
                        .add_mask(parent, MaskDefinition::new(name, high_bit, low_bit));
                }
            }
        }
        Ok(())
    }

    pub fn finish(self) -> HeaderModel {
        self.model
    }

    fn parent(&self, line_number: usize, kind: &str, name: &str) -> Result<Option<usize>> {
        match (self.current_register, self.orphan_policy) {
            (Some(index), _) => Ok(Some(index)),
            (None, OrphanPolicy::Ignore) => {
                log::warn!(
                    "Line {}: {} macro '{}' has no preceding register, ignoring",
                    line_number,
                    kind,
                    name
                );
                Ok(None)
            }
            (None, OrphanPolicy::Error) => Err(DecoderError::HeaderFormatError {
                line: line_number,
                message: format!("{} macro '{}' has no preceding register", kind, name),
            }),
        }
    }
}

/// Parse header text into a model
pub fn parse_header_str(content: &str, config: &DecoderConfig) -> Result<HeaderModel> {
    let mut builder = HeaderModelBuilder::new(config.orphan_fields);
    for (index, line) in content.lines().enumerate() {
        builder.push_line(index + 1, line)?;
    }
    Ok(builder.finish())
}

/// Read and parse a header file
pub fn parse_header_file(path: &Path, config: &DecoderConfig) -> Result<HeaderModel> {
    log::info!("Parsing header file: {:?}", path);

    let content = std::fs::read_to_string(path)?;
    let model = parse_header_str(&content, config)?;

    let stats = model.stats();
    log::info!(
        "Parsed {} registers ({} bits, {} masks) from {:?}",
        stats.num_registers,
        stats.num_bits,
        stats.num_masks,
        path
    );
    Ok(model)
}
