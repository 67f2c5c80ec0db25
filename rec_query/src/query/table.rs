//! Fixed-width report columns.
//!
//! Column widths and alignment are part of the report contract: time and
//! duration cells are fixed zero-decimal, ids right-aligned, actor labels
//! left-aligned in a 35-column field.

use crate::format::records::FrameStart;

pub(crate) fn collisions_header() -> String {
    format!(
        "{:>8} {:>6} {:>6} {:<35} {:>6} {:<35}\n",
        "Time", "Types", "Id", "Actor 1", "Id", "Actor 2"
    )
}

pub(crate) fn collision_row(
    elapsed: f64,
    type1: char,
    type2: char,
    id1: u32,
    label1: &str,
    id2: u32,
    label2: &str,
) -> String {
    format!(
        "{:>8.0}   {} {}  {:>6} {:<35} {:>6} {:<35}\n",
        elapsed, type1, type2, id1, label1, id2, label2
    )
}

pub(crate) fn blocked_header() -> String {
    format!(
        "{:>8} {:>6} {:<35} {:>10}\n",
        "Time", "Id", "Actor", "Duration"
    )
}

pub(crate) fn blocked_row(time: f64, id: u32, label: &str, duration: f64) -> String {
    format!(
        "{:>8.0} {:>6} {:<35} {:>10.0}\n",
        time, id, label, duration
    )
}

/// Trailer lines closing every successfully parsed report.
pub(crate) fn trailer(frame: &FrameStart) -> String {
    format!("\nFrames: {}\nDuration: {} seconds\n", frame.id, frame.elapsed)
}
