// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)
#![allow(clippy::bad_bit_mask)]
//! Mnemonic decoding of Chip-8 words, for disassembly.
//!
//! Execution never goes through [Insn]; the engine dispatches on
//! [Opcode](super::Opcode) fields directly. Mnemonics follow the
//! conventional `op dst, src` Chip-8 assembly syntax.

pub mod disassembler;

use imperative_rs::InstructionSet;
use std::fmt::{Display, Formatter, Result};

/// One decoded Chip-8 instruction.
///
/// Field names follow the pattern letters: `n` is an address (a sprite height
/// in `drw`), `k` an immediate byte, and `x`/`y` are register indices.
/// `0nnn` is left out, and is rendered by the [disassembler] instead.
#[allow(non_camel_case_types, non_snake_case, missing_docs)]
#[derive(Clone, Copy, Debug, InstructionSet, PartialEq, Eq)]
pub enum Insn {
    /// Blank the screen
    #[opcode = "0x00e0"]
    cls,
    /// Pop pc from the stack
    #[opcode = "0x00ee"]
    ret,
    #[opcode = "0x1nnn"]
    jp { n: u16 },
    /// Push pc, then jump
    #[opcode = "0x2nnn"]
    call { n: u16 },
    #[opcode = "0x3xkk"]
    sei { x: usize, k: u8 },
    #[opcode = "0x4xkk"]
    snei { x: usize, k: u8 },
    #[opcode = "0x5xy0"]
    se { x: usize, y: usize },
    #[opcode = "0x6xkk"]
    ldi { x: usize, k: u8 },
    /// Wrapping add, leaves vF alone
    #[opcode = "0x7xkk"]
    addi { x: usize, k: u8 },
    #[opcode = "0x8xy0"]
    ld { x: usize, y: usize },
    #[opcode = "0x8xy1"]
    or { x: usize, y: usize },
    #[opcode = "0x8xy2"]
    and { x: usize, y: usize },
    #[opcode = "0x8xy3"]
    xor { x: usize, y: usize },
    /// vF = carry
    #[opcode = "0x8xy4"]
    add { x: usize, y: usize },
    /// vX = vX - vY, vF = (vY > vX)
    #[opcode = "0x8xy5"]
    sub { x: usize, y: usize },
    #[opcode = "0x8xy6"]
    shr { x: usize, y: usize },
    /// vX = vY - vX, vF = (vY > vX)
    #[opcode = "0x8xy7"]
    subn { x: usize, y: usize },
    #[opcode = "0x8xye"]
    shl { x: usize, y: usize },
    #[opcode = "0x9xy0"]
    sne { x: usize, y: usize },
    #[opcode = "0xannn"]
    ldI { n: u16 },
    #[opcode = "0xbnnn"]
    jpv0 { n: u16 },
    #[opcode = "0xcxkk"]
    rnd { x: usize, k: u8 },
    #[opcode = "0xdxyn"]
    drw { x: usize, y: usize, n: u8 },
    #[opcode = "0xex9e"]
    skp { x: usize },
    #[opcode = "0xexa1"]
    sknp { x: usize },
    #[opcode = "0xfx07"]
    lddt { x: usize },
    /// Suspend until a key is held
    #[opcode = "0xfx0a"]
    ldk { x: usize },
    #[opcode = "0xfx15"]
    setdt { x: usize },
    #[opcode = "0xfx18"]
    setst { x: usize },
    #[opcode = "0xfx1e"]
    addI { x: usize },
    /// Point I at the glyph for digit vX
    #[opcode = "0xfx29"]
    ldf { x: usize },
    /// Store vX as three decimal digits at I
    #[opcode = "0xfx33"]
    ldb { x: usize },
    /// Copy v0..=vX to memory at I
    #[opcode = "0xfx55"]
    stm { x: usize },
    /// Copy memory at I to v0..=vX
    #[opcode = "0xfx65"]
    ldm { x: usize },
}

impl Display for Insn {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        use Insn::*;
        match *self {
            cls             => write!(f, "cls"),
            ret             => write!(f, "ret"),
            jp { n }        => write!(f, "jp     {n:03x}"),
            call { n }      => write!(f, "call   {n:03x}"),
            sei { x, k }    => write!(f, "se     v{x:X}, #{k:02x}"),
            snei { x, k }   => write!(f, "sne    v{x:X}, #{k:02x}"),
            se { x, y }     => write!(f, "se     v{x:X}, v{y:X}"),
            ldi { x, k }    => write!(f, "ld     v{x:X}, #{k:02x}"),
            addi { x, k }   => write!(f, "add    v{x:X}, #{k:02x}"),
            ld { x, y }     => write!(f, "ld     v{x:X}, v{y:X}"),
            or { x, y }     => write!(f, "or     v{x:X}, v{y:X}"),
            and { x, y }    => write!(f, "and    v{x:X}, v{y:X}"),
            xor { x, y }    => write!(f, "xor    v{x:X}, v{y:X}"),
            add { x, y }    => write!(f, "add    v{x:X}, v{y:X}"),
            sub { x, y }    => write!(f, "sub    v{x:X}, v{y:X}"),
            shr { x, .. }   => write!(f, "shr    v{x:X}"),
            subn { x, y }   => write!(f, "subn   v{x:X}, v{y:X}"),
            shl { x, .. }   => write!(f, "shl    v{x:X}"),
            sne { x, y }    => write!(f, "sne    v{x:X}, v{y:X}"),
            ldI { n }       => write!(f, "ld     I, {n:03x}"),
            jpv0 { n }      => write!(f, "jp     v0, {n:03x}"),
            rnd { x, k }    => write!(f, "rnd    v{x:X}, #{k:02x}"),
            drw { x, y, n } => write!(f, "drw    v{x:X}, v{y:X}, #{n:x}"),
            skp { x }       => write!(f, "skp    v{x:X}"),
            sknp { x }      => write!(f, "sknp   v{x:X}"),
            lddt { x }      => write!(f, "ld     v{x:X}, DT"),
            ldk { x }       => write!(f, "ld     v{x:X}, K"),
            setdt { x }     => write!(f, "ld     DT, v{x:X}"),
            setst { x }     => write!(f, "ld     ST, v{x:X}"),
            addI { x }      => write!(f, "add    I, v{x:X}"),
            ldf { x }       => write!(f, "ld     F, v{x:X}"),
            ldb { x }       => write!(f, "ld     B, v{x:X}"),
            stm { x }       => write!(f, "ld     [I], v{x:X}"),
            ldm { x }       => write!(f, "ld     v{x:X}, [I]"),
        }
    }
}
