// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The Mem represents the machine's 4 KiB of RAM
//!
//! Contains some handy utils for reading and writing

use crate::error::{Error, Result};
use owo_colors::{OwoColorize, Style};
use std::{
    fmt::{Debug, Display, Formatter},
    ops::{Index, IndexMut, Range},
    slice::SliceIndex,
};

/// Represents a named region in memory
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    /// Character ROM (but writable!)
    Charset,
    /// Program memory
    Program,
}

impl Region {
    /// The address range a region occupies
    pub const fn range(self) -> Range<usize> {
        match self {
            Region::Charset => Mem::FONT..Mem::PROGRAM,
            Region::Program => Mem::PROGRAM..Mem::SIZE,
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Region::Charset => "Charset",
                Region::Program => "Program",
            }
        )
    }
}

/// Flat, byte-addressable memory.
///
/// Indexing outside `0..Mem::SIZE` panics, as the hardware had no memory protection.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mem {
    memory: Vec<u8>,
}

impl Mem {
    /// Total size of memory, in bytes
    pub const SIZE: usize = 0x1000;
    /// Start of the font region
    pub const FONT: usize = 0x000;
    /// Start of the program region
    pub const PROGRAM: usize = 0x200;

    /// Constructs a zeroed memory
    /// # Examples
    /// ```rust
    ///# use chip8_vm::prelude::*;
    /// let mem = Mem::new();
    /// assert_eq!(Mem::SIZE, mem.len());
    /// assert!(mem.iter().all(|&byte| byte == 0));
    /// ```
    pub fn new() -> Self {
        Mem {
            memory: vec![0; Self::SIZE],
        }
    }

    /// Gets the length of the backing memory
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Returns true if the backing memory contains no elements
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Iterates over every byte of memory, from address 0
    pub fn iter(&self) -> std::slice::Iter<'_, u8> {
        self.memory.iter()
    }

    /// Gets a slice of memory, or [None] if the range is out of bounds
    pub fn get(&self, range: Range<usize>) -> Option<&[u8]> {
        self.memory.get(range)
    }

    /// Gets a mutable slice of memory, or [None] if the range is out of bounds
    pub fn get_mut(&mut self, range: Range<usize>) -> Option<&mut [u8]> {
        self.memory.get_mut(range)
    }

    /// Gets the slice of memory backing a named [Region]
    pub fn region(&self, name: Region) -> &[u8] {
        &self.memory[name.range()]
    }

    /// Fills a [Region] with zeroes
    pub fn clear_region(&mut self, name: Region) -> &mut Self {
        self.memory[name.range()].fill(0);
        self
    }

    /// Copies `data` to the start of a [Region].
    ///
    /// A payload must leave at least one byte of the region unused;
    /// anything longer is rejected with [Error::LoadOverflow] and memory is not touched.
    pub fn load_region(&mut self, name: Region, data: &[u8]) -> Result<&mut Self> {
        let range = name.range();
        if data.len() >= range.len() {
            return Err(Error::LoadOverflow {
                region: name,
                len: data.len(),
                capacity: range.len(),
            });
        }
        self.memory[range.start..range.start + data.len()].copy_from_slice(data);
        Ok(self)
    }

    /// Loads a program at [Mem::PROGRAM]
    /// # Examples
    /// ```rust
    ///# use chip8_vm::prelude::*;
    ///# fn main() -> Result<()> {
    /// let mut mem = Mem::new();
    /// mem.load_program(&[0x00, 0xe0])?;
    /// assert_eq!(0xe0, mem[0x201]);
    /// // A program exactly filling the region is rejected
    /// assert!(mem.load_program(&[0; Mem::SIZE - Mem::PROGRAM]).is_err());
    ///#    Ok(())
    ///# }
    /// ```
    pub fn load_program(&mut self, program: &[u8]) -> Result<&mut Self> {
        self.load_region(Region::Program, program)
    }

    /// Loads a font at [Mem::FONT]
    pub fn load_font(&mut self, font: &[u8]) -> Result<&mut Self> {
        self.load_region(Region::Charset, font)
    }

    /// Zeroes all of memory
    pub fn reset(&mut self) {
        self.memory.fill(0);
    }

    /// Creates a window into the Mem which implements Display
    pub fn window(&self, range: Range<usize>) -> MemWindow {
        MemWindow {
            base: range.start,
            mem: &self.memory[range],
        }
    }
}

impl Default for Mem {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: SliceIndex<[u8]>> Index<I> for Mem {
    type Output = I::Output;
    #[inline(always)]
    fn index(&self, index: I) -> &Self::Output {
        &self.memory[index]
    }
}

impl<I: SliceIndex<[u8]>> IndexMut<I> for Mem {
    #[inline(always)]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.memory[index]
    }
}

impl Debug for Mem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mem")
            .field("len", &self.memory.len())
            .finish_non_exhaustive()
    }
}

impl Display for Mem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.window(0..self.len()))
    }
}

/// A borrowed hex-dump view of a slice of [Mem]
pub struct MemWindow<'a> {
    base: usize,
    mem: &'a [u8],
}

impl<'a> Display for MemWindow<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Green phosphor style formatting, for taste
        let term: Style = Style::new().bold().green().on_black();
        for (index, byte) in self.mem.iter().enumerate() {
            if index % 16 == 0 {
                write!(f, "{:>03x}{} ", (self.base + index).style(term), ":".style(term))?
            }
            write!(f, "{byte:02x}")?;
            write!(
                f,
                "{}",
                match index % 16 {
                    0xf => "\n",
                    0x7 => "  ",
                    _ if index % 2 == 1 => " ",
                    _ => "",
                }
            )?
        }
        Ok(())
    }
}
