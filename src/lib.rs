// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! A Chip-8 virtual machine core, modelled as if it were a real CPU architecture.
//!
//! The [Chip8] facade owns everything the machine needs: the [CPU](cpu::CPU)
//! bookkeeping, 4 KiB of [Mem](cpu::Mem), the register file ([State](cpu::State))
//! and the 64x32 [Screen](screen::Screen). Host shells feed it keys, call
//! [Chip8::tick] as often as they like, and [Chip8::tick_timers] at 60 Hz.

pub mod cpu;
pub mod error;
pub mod screen;

use cpu::{Engine, Mem, State, CPU};
use error::{Error, Result};
use owo_colors::OwoColorize;
use screen::{Screen, FONT};

/// Represents a complete Chip-8 machine
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chip8 {
    /// Engine bookkeeping and configuration
    pub cpu: CPU,
    /// Addressable memory
    pub mem: Mem,
    /// Registers, timers, stack and keys
    pub state: State,
    /// Framebuffer
    pub screen: Screen,
    loaded: bool,
}

impl Chip8 {
    /// Constructs a blank machine with default [Flags](cpu::Flags)
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrows the machine as an [Engine]
    pub fn engine(&mut self) -> Engine<'_> {
        self.cpu.engine(&mut self.mem, &mut self.state, &mut self.screen)
    }

    /// Loads a program, and prepares the machine to run it.
    ///
    /// Clears the program region, copies `program` to [Mem::PROGRAM],
    /// installs the built-in [FONT], and points `pc` at the first instruction.
    ///
    /// # Examples
    /// ```rust
    /// # use chip8_vm::prelude::*;
    /// # fn main() -> Result<()> {
    /// let mut ch8 = Chip8::new();
    /// ch8.load_program(&[0x00, 0xe0])?;
    /// assert!(ch8.is_loaded());
    /// assert_eq!(0x200, ch8.state().pc);
    /// assert_eq!(FONT[..], ch8.mem()[0..80]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        self.mem.load_program(program)?;
        self.mem[Mem::PROGRAM + program.len()..].fill(0);
        self.mem.load_font(&FONT)?;
        self.state.pc = Mem::PROGRAM as u16;
        self.loaded = true;
        Ok(())
    }

    /// Replaces the font at [Mem::FONT]
    pub fn load_font(&mut self, font: &[u8]) -> Result<()> {
        self.mem.load_font(font)?;
        Ok(())
    }

    /// Runs one tick of the [Engine]. See [Engine::step].
    pub fn tick(&mut self) -> Result<()> {
        self.engine().step()
    }

    /// Returns every component to its power-on state, and unloads the program
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.mem.reset();
        self.state.reset();
        self.screen.reset();
        self.loaded = false;
    }

    /// True once a program has been loaded with [Chip8::load_program]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Gets the framebuffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Gets the register file
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Gets the register file, mutably
    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// Gets the machine's memory
    pub fn mem(&self) -> &Mem {
        &self.mem
    }

    /// Gets the machine's memory, mutably
    pub fn mem_mut(&mut self) -> &mut Mem {
        &mut self.mem
    }

    /// Gets the key-press vector
    pub fn keys(&self) -> &[bool; State::NUM_KEYS] {
        &self.state.keys
    }

    /// Gets the key-press vector, mutably
    pub fn keys_mut(&mut self) -> &mut [bool; State::NUM_KEYS] {
        &mut self.state.keys
    }

    /// Presses a key, returning whether it was previously released
    /// # Examples
    /// ```rust
    /// # use chip8_vm::prelude::*;
    /// # fn main() -> Result<()> {
    /// let mut ch8 = Chip8::new();
    /// assert!(ch8.press(0x7)?);
    /// assert!(!ch8.press(0x7)?);
    /// assert!(ch8.press(0x10).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn press(&mut self, key: usize) -> Result<bool> {
        self.set_key(key, true)
    }

    /// Releases a key, returning whether it was previously pressed
    pub fn release(&mut self, key: usize) -> Result<bool> {
        self.set_key(key, false)
    }

    fn set_key(&mut self, key: usize, pressed: bool) -> Result<bool> {
        let slot = self
            .state
            .keys
            .get_mut(key)
            .ok_or(Error::InvalidKey { key })?;
        let changed = *slot != pressed;
        *slot = pressed;
        Ok(changed)
    }

    /// Sets a general purpose register
    pub fn set_v(&mut self, reg: usize, value: u8) -> Result<()> {
        *self
            .state
            .v
            .get_mut(reg)
            .ok_or(Error::InvalidRegister { reg })? = value;
        Ok(())
    }

    /// Decrements the delay and sound timers, stopping at zero.
    ///
    /// Expected to be called at 60 Hz, independently of [Chip8::tick].
    pub fn tick_timers(&mut self) {
        self.state.delay = self.state.delay.saturating_sub(1);
        self.state.sound = self.state.sound.saturating_sub(1);
    }

    /// True while the sound timer is running
    pub fn sound_active(&self) -> bool {
        self.state.sound > 0
    }

    /// Gets the number of instructions executed since the last reset
    pub fn cycle(&self) -> usize {
        self.cpu.cycle()
    }

    /// Prints the register file and the screen to stdout
    pub fn dump(&self) {
        let state = &self.state;
        let dumpstyle = owo_colors::Style::new().bright_black();
        let mut out = format!(
            "PC: {:04x}, SP: {:04x}, I: {:04x}\n",
            state.pc, state.sp, state.i
        );
        for (reg, value) in state.v.iter().enumerate() {
            out += &format!(
                "v{reg:X}: {value:02x}{}",
                if reg % 4 == 3 { "\n" } else { "  " }
            );
        }
        out += &format!(
            "DLY: {}, SND: {}, CYC: {:6}\n",
            state.delay,
            state.sound,
            self.cpu.cycle()
        );
        print!("{}", out.style(dumpstyle));
        print!("{}", self.screen);
    }
}

/// Common imports for chip8_vm
pub mod prelude {
    pub use super::Chip8;
    pub use crate::cpu::{
        Dis, Disassembler, Engine, Flags, Insn, Mem, Opcode, Quirks, Region, State, CPU,
    };
    pub use crate::error::{Error, Result};
    pub use crate::screen::{Screen, FONT};
}
