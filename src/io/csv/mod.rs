//! CSV format reading operations.

mod read;

pub use read::{read_mode_share, read_mode_share_str};
