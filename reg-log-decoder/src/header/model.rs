//! Register header model
//!
//! Holds the register macros parsed from a header file, in header order,
//! together with the bit flags and bitfield masks attached to each one.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A base register macro: `#define NAME VALUE`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterDefinition {
    /// Macro name
    pub name: String,
    /// Register address or value
    pub value: u64,
    /// `BIT(n)` macros following this register, in header order
    pub bits: Vec<BitDefinition>,
    /// `GENMASK(hi, lo)` macros following this register, in header order
    pub masks: Vec<MaskDefinition>,
}

/// A single flag bit: `#define NAME BIT(n)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BitDefinition {
    pub name: String,
    pub bit: u32,
}

/// A contiguous bitfield: `#define NAME GENMASK(hi, lo)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaskDefinition {
    pub name: String,
    pub high_bit: u32,
    pub low_bit: u32,
}

impl RegisterDefinition {
    /// Create a register with no bits or masks
    pub fn new(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
            bits: Vec::new(),
            masks: Vec::new(),
        }
    }
}

impl BitDefinition {
    pub fn new(name: impl Into<String>, bit: u32) -> Self {
        Self {
            name: name.into(),
            bit,
        }
    }

    /// True if this bit is set in `value`
    #[inline]
    pub fn is_set(&self, value: u64) -> bool {
        1u64.checked_shl(self.bit).map_or(false, |bit| value & bit != 0)
    }
}

impl MaskDefinition {
    /// Create a mask; the bounds may be given in either order
    pub fn new(name: impl Into<String>, high_bit: u32, low_bit: u32) -> Self {
        let (high_bit, low_bit) = if low_bit > high_bit {
            (low_bit, high_bit)
        } else {
            (high_bit, low_bit)
        };
        Self {
            name: name.into(),
            high_bit,
            low_bit,
        }
    }

    /// The mask covering bits `low_bit..=high_bit`
    #[inline]
    pub fn mask(&self) -> u64 {
        genmask(self.high_bit, self.low_bit)
    }

    /// Field contents of `value`, shifted down to bit 0
    #[inline]
    pub fn extract(&self, value: u64) -> u64 {
        (value & self.mask()).checked_shr(self.low_bit).unwrap_or(0)
    }
}

/// Contiguous bitmask over bits `lo..=hi`, bounds accepted in either order.
///
/// Bits at or above 64 fall outside the mask.
pub fn genmask(hi: u32, lo: u32) -> u64 {
    let (hi, lo) = if lo > hi { (lo, hi) } else { (hi, lo) };
    if lo >= 64 {
        return 0;
    }
    let width = hi.min(63) - lo + 1;
    let ones = if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    };
    ones << lo
}

impl fmt::Display for RegisterDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: value=0x{:x}, bits=[", self.name, self.value)?;
        for (i, bit) in self.bits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", bit.name, bit.bit)?;
        }
        write!(f, "], masks=[")?;
        for (i, mask) in self.masks.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}:{}", mask.name, mask.high_bit, mask.low_bit)?;
        }
        write!(f, "]")
    }
}

/// Statistics about a loaded header model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModelStats {
    pub num_registers: usize,
    pub num_bits: usize,
    pub num_masks: usize,
}

/// All register definitions from one header, in header order
#[derive(Debug, Clone, Default)]
pub struct HeaderModel {
    registers: Vec<RegisterDefinition>,

    /// Key: macro name, Value: index into `registers`
    by_name: HashMap<String, usize>,

    /// Key: register value, Value: index of the first register with it
    by_value: HashMap<u64, usize>,
}

impl HeaderModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a register and return its index.
    ///
    /// A name that is already present keeps its position but takes the new
    /// value and starts over with empty bit/mask lists.
    pub fn insert_register(&mut self, name: &str, value: u64) -> usize {
        if let Some(&index) = self.by_name.get(name) {
            log::warn!("Register '{}' redefined, replacing previous definition", name);
            self.registers[index] = RegisterDefinition::new(name, value);
            self.rebuild_value_index();
            return index;
        }

        let index = self.registers.len();
        self.registers.push(RegisterDefinition::new(name, value));
        self.by_name.insert(name.to_string(), index);
        self.by_value.entry(value).or_insert(index);
        index
    }

    /// Attach a bit to the register at `index`
    pub fn add_bit(&mut self, index: usize, bit: BitDefinition) {
        if let Some(register) = self.registers.get_mut(index) {
            register.bits.push(bit);
        }
    }

    /// Attach a mask to the register at `index`
    pub fn add_mask(&mut self, index: usize, mask: MaskDefinition) {
        if let Some(register) = self.registers.get_mut(index) {
            register.masks.push(mask);
        }
    }

    /// First register in header order whose value equals `address`
    pub fn lookup_address(&self, address: u64) -> Option<&RegisterDefinition> {
        self.by_value
            .get(&address)
            .and_then(|&index| self.registers.get(index))
    }

    /// Look up a register by macro name
    pub fn get(&self, name: &str) -> Option<&RegisterDefinition> {
        self.by_name
            .get(name)
            .and_then(|&index| self.registers.get(index))
    }

    /// All registers in header order
    pub fn registers(&self) -> &[RegisterDefinition] {
        &self.registers
    }

    pub fn len(&self) -> usize {
        self.registers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    pub fn stats(&self) -> ModelStats {
        ModelStats {
            num_registers: self.registers.len(),
            num_bits: self.registers.iter().map(|r| r.bits.len()).sum(),
            num_masks: self.registers.iter().map(|r| r.masks.len()).sum(),
        }
    }

    fn rebuild_value_index(&mut self) {
        self.by_value.clear();
        for (index, register) in self.registers.iter().enumerate() {
            self.by_value.entry(register.value).or_insert(index);
        }
    }
}
