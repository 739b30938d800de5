//! Value Decoding Engine
//!
//! Renders a raw register value as the bit flags and bitfields named for
//! that register in the header, e.g. `0x78` -> `DCP_BIT|RESULT_MASK=0x7`.

use crate::header::RegisterDefinition;

/// Separator between decoded parts, as in C source (`A_BIT|B_BIT`)
const SEPARATOR: &str = "|";

/// Value decoder - turns register values into symbolic strings
pub struct ValueDecoder;

impl ValueDecoder {
    /// Decode `value` against a register's bits and masks.
    ///
    /// Set bits come first, then non-zero fields, each in header order.
    /// Returns an empty string when nothing matches.
    pub fn decode(value: u64, register: &RegisterDefinition) -> String {
        let mut parts: Vec<String> = Vec::new();

        for bit in &register.bits {
            if bit.is_set(value) {
                parts.push(bit.name.clone());
            }
        }

        for mask in &register.masks {
            if value & mask.mask() != 0 {
                parts.push(format!("{}=0x{:x}", mask.name, mask.extract(value)));
            }
        }

        parts.join(SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{BitDefinition, MaskDefinition};

    fn status_register() -> RegisterDefinition {
        let mut register = RegisterDefinition::new("STATUS", 0x100d);
        register.bits.push(BitDefinition::new("DCP_BIT", 3));
        register.masks.push(MaskDefinition::new("RESULT_MASK", 7, 4));
        register
    }

    #[test]
    fn test_decode_bits_and_masks() {
        assert_eq!(
            ValueDecoder::decode(0x78, &status_register()),
            "DCP_BIT|RESULT_MASK=0x7"
        );
    }

    #[test]
    fn test_decode_zero_is_empty() {
        assert_eq!(ValueDecoder::decode(0x00, &status_register()), "");
    }

    #[test]
    fn test_decode_mask_only() {
        assert_eq!(ValueDecoder::decode(0xa0, &status_register()), "RESULT_MASK=0xa");
    }

    #[test]
    fn test_decode_ignores_unnamed_bits() {
        assert_eq!(ValueDecoder::decode(0x08 | 0x100, &status_register()), "DCP_BIT");
    }

    #[test]
    fn test_decode_multiple_bits_in_header_order() {
        let mut register = RegisterDefinition::new("CTRL", 0x20);
        register.bits.push(BitDefinition::new("HIGH", 7));
        register.bits.push(BitDefinition::new("LOW", 0));
        register.masks.push(MaskDefinition::new("ALL", 0, 7));

        assert_eq!(ValueDecoder::decode(0x81, &register), "HIGH|LOW|ALL=0x81");
    }

    #[test]
    fn test_decode_is_repeatable() {
        let register = status_register();
        let first = ValueDecoder::decode(0x5c, &register);
        let second = ValueDecoder::decode(0x5c, &register);
        assert_eq!(first, second);
        assert_eq!(first, "DCP_BIT|RESULT_MASK=0x5");
    }
}
