// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions
//!
//! The [CPU] holds the engine's persistent bookkeeping, while an [Engine]
//! borrows the CPU together with [Mem], [State] and [Screen] for the
//! duration of a single tick.


pub mod behavior;
pub mod flags;
pub mod instruction;
pub mod mem;
pub mod opcode;
pub mod quirks;
pub mod state;

pub use self::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    mem::{Mem, Region},
    opcode::Opcode,
    quirks::Quirks,
    state::State,
};
use crate::{error::Result, screen::Screen};
use owo_colors::OwoColorize;

type Reg = usize;
type Adr = u16;

/// Represents the internal bookkeeping of the CPU interpreter
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CPU {
    /// Flags that control how the CPU behaves, but which aren't inherent to the
    /// chip-8. Includes [Quirks] and the key-wait state.
    pub flags: Flags,
    // The most recently executed instruction
    opcode: Opcode,
    // Execution data
    cycle: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    disassembler: Dis,
}

impl CPU {
    /// Constructs a new CPU with the provided [Flags]
    /// # Examples
    /// ```rust
    /// # use chip8_vm::prelude::*;
    /// let cpu = CPU::new(Flags {
    ///     quirks: Quirks::from(false),
    ///     ..Default::default()
    /// });
    /// assert!(!cpu.flags.quirks.dma_inc);
    /// ```
    pub fn new(flags: Flags) -> Self {
        CPU {
            flags,
            ..Default::default()
        }
    }

    /// Gets the number of instructions the CPU has executed
    /// # Examples
    /// ```rust
    /// # use chip8_vm::prelude::*;
    /// let cpu = CPU::default();
    /// assert_eq!(0, cpu.cycle());
    /// ```
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Gets the most recently executed [Opcode]
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Releases a pending key wait and clears the cycle count.
    ///
    /// Does not touch [Quirks] or debug mode.
    pub fn reset(&mut self) {
        self.flags.keypause = false;
        self.opcode = Opcode::default();
        self.cycle = 0;
    }

    /// Borrows the machine's components for one or more ticks
    pub fn engine<'a>(
        &'a mut self,
        mem: &'a mut Mem,
        state: &'a mut State,
        screen: &'a mut Screen,
    ) -> Engine<'a> {
        Engine::new(self, mem, state, screen)
    }
}

/// The fetch-decode-execute state machine.
///
/// An engine is either *running*, fetching and executing one instruction per
/// [step](Engine::step), or *waiting for a key*, in which case each step only
/// polls the key vector.
pub struct Engine<'a> {
    cpu: &'a mut CPU,
    mem: &'a mut Mem,
    state: &'a mut State,
    screen: &'a mut Screen,
}

impl<'a> Engine<'a> {
    /// Assembles an engine from its parts
    pub fn new(
        cpu: &'a mut CPU,
        mem: &'a mut Mem,
        state: &'a mut State,
        screen: &'a mut Screen,
    ) -> Self {
        Engine {
            cpu,
            mem,
            state,
            screen,
        }
    }

    /// Returns true while an `Fx0A` is waiting for a key
    pub fn waiting_for_key(&self) -> bool {
        self.cpu.flags.keypause
    }

    /// Reads the big-endian word at `pc` and advances `pc` by 2
    ///
    /// # Panics
    /// If `pc + 1` is outside of memory.
    pub fn fetch(&mut self) -> Opcode {
        let pc = self.state.pc as usize;
        let opcode = Opcode::from_be_bytes([self.mem[pc], self.mem[pc + 1]]);
        self.state.pc = self.state.pc.wrapping_add(2);
        opcode
    }

    /// Executes a single [Opcode]
    ///
    /// Returns [Error::UnknownOpcode](crate::error::Error::UnknownOpcode)
    /// if no instruction matches the opcode.
    pub fn execute(&mut self, opcode: Opcode) -> Result<()> {
        self.cpu.opcode = opcode;
        self.cpu.cycle += 1;
        Self::FAMILIES[opcode.u() as usize](self)
    }

    /// Advances the machine by one tick.
    ///
    /// While waiting for a key, this scans the key vector instead of executing.
    /// # Examples
    /// ```rust
    /// # use chip8_vm::prelude::*;
    /// let (mut cpu, mut mem, mut state, mut screen) = Default::default();
    /// let mut engine = Engine::new(&mut cpu, &mut mem, &mut state, &mut screen);
    /// // mem is all zeroes, and 0000 does nothing
    /// engine.step().expect("0000 should be a valid opcode");
    /// assert_eq!(2, state.pc);
    /// ```
    pub fn step(&mut self) -> Result<()> {
        if self.cpu.flags.keypause {
            self.check_for_keys();
            return Ok(());
        }
        let pc = self.state.pc;
        let opcode = self.fetch();
        if self.cpu.flags.debug {
            log::debug!(
                "{:3} {:03x}: {:<36}",
                self.cpu.cycle.bright_black(),
                pc,
                self.cpu.disassembler.once(opcode.word())
            );
        }
        self.execute(opcode)
    }

    /// Scans the key vector in ascending order. On finding a pressed key,
    /// stores its index in vX of the waiting `Fx0A` and resumes execution.
    ///
    /// Returns true if a key was found.
    pub fn check_for_keys(&mut self) -> bool {
        match self.state.keys.iter().position(|&key| key) {
            Some(key) => {
                self.state.v[self.cpu.opcode.x()] = key as u8;
                self.cpu.flags.keypause = false;
                log::trace!("key {key:X} released the key wait");
                true
            }
            None => false,
        }
    }
}
