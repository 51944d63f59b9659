// Constants for the tape machine

/// Canonical tape length in cells
pub const DEFAULT_TAPE_LEN: usize = 30_000;
