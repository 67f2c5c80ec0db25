//! Query engine for driving-simulation recorder files.
//!
//! A recording is a linear, packet-framed binary log of simulation events:
//! actor life-cycle, per-frame kinematics, collisions, vehicle control,
//! lighting, physics parameters, skeletal poses and traffic-light state.
//! This crate parses such files in a single forward pass and produces three
//! textual reports:
//!
//! - [`query_info`]: frame-by-frame dump of every (or every summary) packet
//! - [`query_collisions`]: collision pairs filtered by actor category,
//!   de-duplicated so multi-frame contacts are reported once at onset
//! - [`query_blocked`]: actors that stayed within a radius for at least a
//!   minimum duration, sorted by duration descending

pub mod format;
pub mod query;
pub mod resolve;

pub use format::reader::TextEncoding;
pub use query::{query_blocked, query_collisions, query_info, QueryConfig};
