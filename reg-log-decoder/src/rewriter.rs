//! Log line rewriting
//!
//! Finds `addr = 0xHEX` and `val = 0xHEX` in each log line, for example
//!
//! ```text
//! [ 7292.713722] qcom,qpnp-smb2: smblib_read(addr = 0x100d, val = 0x70)
//! ```
//!
//! and substitutes the register name for the address and the decoded bits
//! for the value. Lines without both literals, or with an unknown address,
//! pass through untouched.

use crate::config::DecoderConfig;
use crate::header::HeaderModel;
use crate::literal::scan_hex_literal;
use crate::types::{LineOutcome, RewriteStats};
use crate::value_decoder::ValueDecoder;
use std::ops::Range;

/// A `key = 0xHEX` occurrence within a line
#[derive(Debug, Clone, PartialEq, Eq)]
struct Assignment {
    /// Byte range of the hex literal
    literal: Range<usize>,
    value: u64,
}

/// Rewrites log lines against a header model
pub struct LogRewriter<'a> {
    model: &'a HeaderModel,
    address_key: &'a str,
    value_key: &'a str,
    whole_word_keys: bool,
}

impl<'a> LogRewriter<'a> {
    pub fn new(model: &'a HeaderModel, config: &'a DecoderConfig) -> Self {
        Self {
            model,
            address_key: &config.address_key,
            value_key: &config.value_key,
            whole_word_keys: config.whole_word_keys,
        }
    }

    /// Rewrite a single line
    pub fn rewrite_line(&self, line: &str) -> (String, LineOutcome) {
        let (Some(addr), Some(val)) = (
            find_assignment(line, self.address_key, self.whole_word_keys),
            find_assignment(line, self.value_key, self.whole_word_keys),
        ) else {
            return (line.to_string(), LineOutcome::NoMatch);
        };

        // First register in header order wins
        let Some(register) = self.model.lookup_address(addr.value) else {
            log::trace!("No register at address 0x{:x}", addr.value);
            return (line.to_string(), LineOutcome::UnknownAddress(addr.value));
        };

        let decoded = ValueDecoder::decode(val.value, register);
        let value_decoded = !decoded.is_empty();

        let mut replacements = vec![(addr.literal, register.name.as_str())];
        if value_decoded {
            replacements.push((val.literal, decoded.as_str()));
        }
        let rewritten = splice(line, replacements);

        log::debug!("{} -> {}", line, rewritten);
        (
            rewritten,
            LineOutcome::Rewritten {
                register: register.name.clone(),
                value_decoded,
            },
        )
    }

    /// Rewrite every line, preserving order
    pub fn rewrite_lines<S: AsRef<str>>(&self, lines: &[S]) -> (Vec<String>, RewriteStats) {
        let mut stats = RewriteStats::default();
        let output = lines
            .iter()
            .map(|line| {
                let (rewritten, outcome) = self.rewrite_line(line.as_ref());
                stats.record(&outcome);
                rewritten
            })
            .collect();
        (output, stats)
    }
}

/// Find the first `key = 0xHEX` in `line`. Exactly one whitespace character
/// must sit on each side of the `=`. With `whole_word` the key must not be
/// the tail of a longer identifier (`retval` is not `val`).
fn find_assignment(line: &str, key: &str, whole_word: bool) -> Option<Assignment> {
    line.match_indices(key).find_map(|(pos, _)| {
        if whole_word {
            let at_boundary = line[..pos]
                .chars()
                .next_back()
                .map_or(true, |c| !(c.is_alphanumeric() || c == '_'));
            if !at_boundary {
                return None;
            }
        }

        let rest = &line[pos + key.len()..];
        let rest = skip_one_whitespace(rest)?;
        let rest = rest.strip_prefix('=')?;
        let rest = skip_one_whitespace(rest)?;

        let start = line.len() - rest.len();
        let (value, len) = scan_hex_literal(rest)?;
        Some(Assignment {
            literal: start..start + len,
            value,
        })
    })
}

fn skip_one_whitespace(text: &str) -> Option<&str> {
    let c = text.chars().next().filter(|c| c.is_whitespace())?;
    Some(&text[c.len_utf8()..])
}

/// Replace byte ranges of `line`; a range overlapping an earlier one is dropped
fn splice(line: &str, mut replacements: Vec<(Range<usize>, &str)>) -> String {
    replacements.sort_by_key(|(range, _)| range.start);

    let mut out = String::with_capacity(line.len());
    let mut cursor = 0;
    for (range, text) in replacements {
        if range.start < cursor {
            continue;
        }
        out.push_str(&line[cursor..range.start]);
        out.push_str(text);
        cursor = range.end;
    }
    out.push_str(&line[cursor..]);
    out
}
