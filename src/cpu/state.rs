// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The register file of the machine: general purpose registers, I, timers,
//! program counter, call stack, and the key-press vector.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::fmt::{Debug, Formatter};

/// Registers, timers, program counter, stack, and keys.
///
/// Register `vF` is written as a flag by arithmetic and draw instructions.
///
/// The stack pointer indexes the next free stack slot:
/// a call stores `pc` at `stack[sp]` and increments `sp`,
/// a return decrements `sp` and reloads `pc` from `stack[sp]`.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    /// General purpose registers v0..=vF
    pub v: [u8; State::NUM_REGISTERS],
    /// Address register
    pub i: u16,
    /// Delay timer
    pub delay: u8,
    /// Sound timer
    pub sound: u8,
    /// Program counter
    pub pc: u16,
    /// Stack pointer
    pub sp: u16,
    /// Return address stack
    pub stack: [u16; State::STACK_SIZE],
    /// Key-press vector, written by the host
    pub keys: [bool; State::NUM_KEYS],
    #[cfg_attr(feature = "serde", serde(skip, default = "StdRng::from_entropy"))]
    rng: StdRng,
}

impl State {
    /// Number of general purpose registers
    pub const NUM_REGISTERS: usize = 16;
    /// Number of keys on the hex keypad
    pub const NUM_KEYS: usize = 16;
    /// Depth of the return address stack
    pub const STACK_SIZE: usize = 12;

    /// Constructs a zeroed register file with a freshly seeded random source
    pub fn new() -> Self {
        State {
            v: [0; Self::NUM_REGISTERS],
            i: 0,
            delay: 0,
            sound: 0,
            pc: 0,
            sp: 0,
            stack: [0; Self::STACK_SIZE],
            keys: [false; Self::NUM_KEYS],
            rng: StdRng::from_entropy(),
        }
    }

    /// Constructs a zeroed register file whose random source is seeded with `seed`
    /// # Examples
    /// ```rust
    /// # use chip8_vm::prelude::*;
    /// let (mut a, mut b) = (State::with_seed(8), State::with_seed(8));
    /// assert_eq!(a.random(), b.random());
    /// ```
    pub fn with_seed(seed: u64) -> Self {
        let mut state = Self::new();
        state.reseed(seed);
        state
    }

    /// Replaces the random source with one seeded from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Gets a uniformly distributed random byte
    pub fn random(&mut self) -> u8 {
        self.rng.gen()
    }

    /// Zeroes every register, timer, pointer, stack slot and key,
    /// and reseeds the random source
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// The random source does not take part in comparisons
impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.v == other.v
            && self.i == other.i
            && self.delay == other.delay
            && self.sound == other.sound
            && self.pc == other.pc
            && self.sp == other.sp
            && self.stack == other.stack
            && self.keys == other.keys
    }
}

impl Eq for State {}

impl Debug for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("v", &self.v)
            .field("i", &self.i)
            .field("delay", &self.delay)
            .field("sound", &self.sound)
            .field("pc", &self.pc)
            .field("sp", &self.sp)
            .field("stack", &self.stack)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_sizes() {
        let state = State::new();
        assert_eq!(State::NUM_REGISTERS, state.v.len());
        assert_eq!(State::NUM_KEYS, state.keys.len());
        assert_eq!(State::STACK_SIZE, state.stack.len());
    }

    #[test]
    fn reset() {
        let mut state = State::new();
        assert_eq!(State::new(), state);
        state.i = 40;
        state.delay = 30;
        state.sound = 13;
        state.pc = 5;
        state.sp = 3;
        state.v[5] = 4;
        state.stack[2] = 3;
        state.keys[3] = true;
        assert_ne!(State::new(), state);
        state.reset();
        assert_eq!(State::new(), state);
    }

    #[test]
    fn seeded_random() {
        let mut a = State::with_seed(0x5eed);
        let mut b = State::with_seed(0x5eed);
        let (a, b): (Vec<u8>, Vec<u8>) = (0..64).map(|_| (a.random(), b.random())).unzip();
        assert_eq!(a, b);
    }

    #[test]
    fn random_covers_range() {
        let mut state = State::with_seed(1);
        let mut seen = [false; 256];
        for _ in 0..0x4000 {
            seen[state.random() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
