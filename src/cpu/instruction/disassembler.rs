// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! A disassembler for Chip-8 opcodes
use super::Insn;
use imperative_rs::InstructionSet;
use owo_colors::{OwoColorize, Style};

/// Disassembles Chip-8 instructions
pub trait Disassembler {
    /// Disassemble a single instruction
    fn once(&self, insn: u16) -> String;
}

/// Disassembles Chip-8 instructions, printing them in the provided [owo_colors::Style]s
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dis {
    /// Styles invalid instructions
    pub invalid: Style,
    /// Styles valid instruction
    pub normal: Style,
}

impl Dis {
    /// A disassembler that emits no escape codes
    pub fn plain() -> Self {
        Self {
            invalid: Style::new(),
            normal: Style::new(),
        }
    }
}

impl Default for Dis {
    fn default() -> Self {
        Self {
            invalid: Style::new().bold().red(),
            normal: Style::new().green(),
        }
    }
}

impl Disassembler for Dis {
    /// Disassembles one word.
    ///
    /// `0nnn` machine-code calls decode as `sys`; anything else
    /// the [Insn] table rejects is shown as `inval`.
    fn once(&self, insn: u16) -> String {
        if let Ok((_, insn)) = Insn::decode(&insn.to_be_bytes()) {
            format!("{}", insn.style(self.normal))
        } else if insn & 0xf000 == 0 {
            let addr = insn & 0xfff;
            format!("{}", format_args!("sys    {addr:03x}").style(self.normal))
        } else {
            format!("{}", format_args!("inval  {insn:04x}").style(self.invalid))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mnemonics() {
        let dis = Dis::plain();
        assert_eq!("cls", dis.once(0x00e0));
        assert_eq!("jp     2a4", dis.once(0x12a4));
        assert_eq!("add    v0, v1", dis.once(0x8014));
        assert_eq!("drw    v1, v2, #5", dis.once(0xd125));
        assert_eq!("ld     B, v7", dis.once(0xf733));
        assert_eq!("ld     v3, [I]", dis.once(0xf365));
        assert_eq!("sys    123", dis.once(0x0123));
        assert_eq!("inval  f0ff", dis.once(0xf0ff));
    }
}
