// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for the Chip-8 virtual machine

use crate::cpu::mem::Region;
use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the Chip-8 virtual machine.
#[derive(Debug, Error)]
pub enum Error {
    /// A payload did not fit in its reserved [Region]
    #[error("{region} payload of {len} bytes does not fit in {capacity} bytes")]
    LoadOverflow {
        /// The [Region] that was being loaded
        region: Region,
        /// Length of the rejected payload
        len: usize,
        /// Size of the region
        capacity: usize,
    },
    /// The fetched word has no handler
    #[error("opcode {word:04x} not recognized")]
    UnknownOpcode {
        /// The offending word
        word: u16,
    },
    /// Tried to press a key that doesn't exist
    #[error("tried to press key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Tried to get/set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
