// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Splits a raw instruction word into its addressing fields

use std::fmt::{Display, Formatter};

/// A single 16-bit Chip-8 instruction word.
///
/// All fields are derived from the word on request.
///
/// | field       | bits  | meaning                          |
/// |-------------|-------|----------------------------------|
/// | [word]      | 0..16 | raw value                        |
/// | [addr]      | 0..12 | jump/load target (`nnn`)         |
/// | [imm]       | 0..8  | literal operand (`nn`/`kk`)      |
/// | [u]         | 12..16| instruction family               |
/// | [x]         | 8..12 | first register index             |
/// | [y]         | 4..8  | second register index            |
/// | [n]         | 0..4  | sub-opcode / sprite height       |
///
/// [word]: Opcode::word
/// [addr]: Opcode::addr
/// [imm]: Opcode::imm
/// [u]: Opcode::u
/// [x]: Opcode::x
/// [y]: Opcode::y
/// [n]: Opcode::n
///
/// # Examples
/// ```rust
/// # use chip8_vm::prelude::*;
/// let op = Opcode::new(0xd12f);
/// assert_eq!(0xd, op.u());
/// assert_eq!(0x1, op.x());
/// assert_eq!(0x2, op.y());
/// assert_eq!(0xf, op.n());
/// assert_eq!(0x2f, op.imm());
/// assert_eq!(0x12f, op.addr());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Opcode(u16);

impl Opcode {
    /// Wraps a raw instruction word
    pub const fn new(word: u16) -> Self {
        Self(word)
    }

    /// Builds an opcode from two big-endian bytes
    pub const fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }

    /// The entire instruction word
    #[inline(always)]
    pub const fn word(self) -> u16 {
        self.0
    }

    /// Low 12 bits, the `nnn` address field
    #[inline(always)]
    pub const fn addr(self) -> u16 {
        self.0 & 0xfff
    }

    /// Low 8 bits, the `nn` immediate
    #[inline(always)]
    pub const fn imm(self) -> u8 {
        self.0 as u8
    }

    /// Upper nibble, selects the instruction family
    #[inline(always)]
    pub const fn u(self) -> u8 {
        (self.0 >> 12) as u8 & 0xf
    }

    /// Bits 8..12, the first register index
    #[inline(always)]
    pub const fn x(self) -> usize {
        (self.0 >> 8) as usize & 0xf
    }

    /// Bits 4..8, the second register index
    #[inline(always)]
    pub const fn y(self) -> usize {
        (self.0 >> 4) as usize & 0xf
    }

    /// Low nibble
    #[inline(always)]
    pub const fn n(self) -> u8 {
        self.0 as u8 & 0xf
    }
}

impl From<u16> for Opcode {
    fn from(word: u16) -> Self {
        Self(word)
    }
}

impl From<Opcode> for u16 {
    fn from(op: Opcode) -> Self {
        op.0
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04x}", self.0)
    }
}
