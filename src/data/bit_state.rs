//! The 128-bit board value and its text renderings.
//!
//! The value is stored as two `u64` halves. Logical bit `i` (reading order,
//! top-left first) of a board with `width` cells lives at absolute bit
//! position `width - 1 - i`, so a full 128-cell board puts index 0 in the
//! MSB of `high` and every narrower board only ever touches `low`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest rendering: `0b` plus 128 binary digits, plus one spare byte
pub const FORMAT_CAPACITY: usize = 131;

/// Number of packed BCD bytes (two decimal digits each) for double-dabble
const BCD_PAIRS: usize = 20;

/// How the numeric readout presents the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Hex,
    Decimal,
    Binary,
}

impl DisplayMode {
    /// Hex → Decimal → Binary → Hex
    pub fn next(self) -> Self {
        match self {
            DisplayMode::Hex => DisplayMode::Decimal,
            DisplayMode::Decimal => DisplayMode::Binary,
            DisplayMode::Binary => DisplayMode::Hex,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DisplayMode::Hex => "hex",
            DisplayMode::Decimal => "decimal",
            DisplayMode::Binary => "binary",
        }
    }
}

impl FromStr for DisplayMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(DisplayMode::Hex),
            "decimal" | "dec" | "int" => Ok(DisplayMode::Decimal),
            "binary" | "bin" => Ok(DisplayMode::Binary),
            other => anyhow::bail!("Unknown display mode '{}' (expected hex, decimal or binary)", other),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reusable output buffer for [`BitState::format`]
///
/// The formatted text borrows the buffer, so it has to be consumed before the
/// buffer can be handed to the next `format` call.
pub struct FormatBuffer {
    bytes: [u8; FORMAT_CAPACITY],
    len: usize,
}

impl FormatBuffer {
    pub fn new() -> Self {
        Self {
            bytes: [0; FORMAT_CAPACITY],
            len: 0,
        }
    }

    fn reset(&mut self) {
        self.len = 0;
    }

    fn push(&mut self, byte: u8) {
        self.bytes[self.len] = byte;
        self.len += 1;
    }

    fn as_str(&self) -> &str {
        // Only ASCII digits and prefixes are ever written
        std::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }
}

impl Default for FormatBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// 128-bit board state backing a grid of `width` cells
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitState {
    pub high: u64,
    pub low: u64,
    width: u32,
}

impl BitState {
    /// Zeroed state for a board of `width` cells (1..=128)
    pub fn new(width: u32) -> Self {
        Self {
            high: 0,
            low: 0,
            width: width.clamp(1, 128),
        }
    }

    /// Build a full-width state from a raw value (used by the CLI formatter and tests)
    pub fn from_u128(value: u128) -> Self {
        Self {
            high: (value >> 64) as u64,
            low: value as u64,
            width: 128,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn value(&self) -> u128 {
        (u128::from(self.high) << 64) | u128::from(self.low)
    }

    #[cfg(test)]
    pub fn is_zero(&self) -> bool {
        self.high == 0 && self.low == 0
    }

    /// Flip logical bit `index` (0 = top-left cell)
    ///
    /// `index` must be below `width`.
    pub fn toggle_bit(&mut self, index: usize) {
        debug_assert!(
            index < self.width as usize,
            "bit index {} out of range for width {}",
            index,
            self.width
        );
        let position = self.width as usize - 1 - index;
        if position >= 64 {
            self.high ^= 1u64 << (position - 64);
        } else {
            self.low ^= 1u64 << position;
        }
    }

    pub fn clear(&mut self) {
        self.high = 0;
        self.low = 0;
    }

    /// Render the value into `buf` and return the text
    ///
    /// No leading zeros; zero renders as `0x0`, `0` or `0b0`.
    pub fn format<'a>(&self, mode: DisplayMode, buf: &'a mut FormatBuffer) -> &'a str {
        buf.reset();
        match mode {
            DisplayMode::Hex => self.write_hex(buf),
            DisplayMode::Decimal => self.write_decimal(buf),
            DisplayMode::Binary => self.write_binary(buf),
        }
        buf.as_str()
    }

    /// Owned rendering, for callers that need to keep the text around
    pub fn to_formatted_string(&self, mode: DisplayMode) -> String {
        let mut buf = FormatBuffer::new();
        self.format(mode, &mut buf).to_string()
    }

    fn write_hex(&self, buf: &mut FormatBuffer) {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";
        buf.push(b'0');
        buf.push(b'x');
        let value = self.value();
        let mut started = false;
        for nibble in (0..32).rev() {
            let digit = ((value >> (nibble * 4)) & 0xf) as usize;
            if digit != 0 || started || nibble == 0 {
                started = true;
                buf.push(DIGITS[digit]);
            }
        }
    }

    fn write_binary(&self, buf: &mut FormatBuffer) {
        buf.push(b'0');
        buf.push(b'b');
        let value = self.value();
        let mut started = false;
        for bit in (0..128).rev() {
            let set = (value >> bit) & 1 == 1;
            if set || started || bit == 0 {
                started = true;
                buf.push(if set { b'1' } else { b'0' });
            }
        }
    }

    /// Double-dabble: shift the value into a packed BCD register one bit at a
    /// time, adding 3 to every digit >= 5 before each shift.
    fn write_decimal(&self, buf: &mut FormatBuffer) {
        let mut bcd = [0u8; BCD_PAIRS];
        let (mut high, mut low) = (self.high, self.low);

        for _ in 0..128 {
            for pair in bcd.iter_mut() {
                if *pair & 0x0f >= 0x05 {
                    *pair += 0x03;
                }
                if *pair & 0xf0 >= 0x50 {
                    *pair += 0x30;
                }
            }

            let mut carry = (high >> 63) as u8;
            high = (high << 1) | (low >> 63);
            low <<= 1;

            for pair in bcd.iter_mut().rev() {
                let out = *pair >> 7;
                *pair = (*pair << 1) | carry;
                carry = out;
            }
        }

        let mut started = false;
        for pair in bcd {
            for digit in [pair >> 4, pair & 0x0f] {
                if digit != 0 || started {
                    started = true;
                    buf.push(b'0' + digit);
                }
            }
        }
        if !started {
            buf.push(b'0');
        }
    }
}
