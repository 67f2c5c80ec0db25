//! Binary recording format: byte-level reader, packet framing and record
//! codecs.

pub mod error;
pub mod packet;
pub mod physics;
pub mod reader;
pub mod records;

pub use error::{ReadError, Result};

/// Magic string opening every valid recording file.
pub const RECORDING_MAGIC: &str = "CARLA_RECORDER";
