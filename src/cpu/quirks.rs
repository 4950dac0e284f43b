// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Controls the [Quirks] behavior of the CPU on a granular level.

/// Selects between behaviors that differ across Chip-8 interpreter revisions.
///
/// `true` is the default for both forks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quirks {
    /// DMA instructions `Fx55`/`Fx65` leave I at I + x + 1 after the transfer.
    /// When unset, I is not modified.
    pub dma_inc: bool,
    /// Draw operations wrap from bottom to top and side to side.
    /// When unset, the raw linear pixel index is used, so columns past the
    /// right edge spill into the following row.
    pub screen_wrap: bool,
}

impl From<bool> for Quirks {
    fn from(value: bool) -> Self {
        Quirks {
            dma_inc: value,
            screen_wrap: value,
        }
    }
}

impl Default for Quirks {
    fn default() -> Self {
        Self::from(true)
    }
}
