//! The three report queries over a recording file.
//!
//! Each query opens the file, validates the file header, then pulls packets
//! until end-of-stream, dispatching by packet id. All state (actor table,
//! collision pair sets, blocked tracker, report buffer) lives for one query
//! invocation. Errors are surfaced in-band: the returned report either
//! carries the requested data or a one-line diagnostic.

mod blocked;
mod collisions;
mod info;
mod table;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use chrono::TimeZone;

use crate::format::reader::{RecordReader, TextEncoding};
use crate::format::{Result, RECORDING_MAGIC};
use crate::resolve::resolve_recording_filename;

pub use blocked::query_blocked;
pub use collisions::query_collisions;
pub use info::query_info;

/// Per-call query configuration.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Directory recordings are resolved against.
    pub recordings_dir: PathBuf,
    /// Encoding of length-prefixed text in the file.
    pub encoding: TextEncoding,
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            recordings_dir: PathBuf::from("."),
            encoding: TextEncoding::default(),
        }
    }
}

/// Decoded file header.
#[derive(Debug, Clone)]
pub(crate) struct FileInfo {
    pub magic: String,
    pub version: u16,
    pub map: String,
    pub date: i64,
}

impl FileInfo {
    fn read<R: std::io::Read>(r: &mut RecordReader<R>) -> Result<FileInfo> {
        Ok(FileInfo {
            magic: r.read_string()?,
            version: r.read_u16()?,
            map: r.read_string()?,
            date: r.read_i64()?,
        })
    }
}

pub(crate) type RecordingReader = RecordReader<BufReader<File>>;

/// Outcome of opening a recording and validating its header.
pub(crate) enum Opened {
    /// Header checked out; the reader sits at the first packet and the
    /// report already carries the header block.
    Ready {
        reader: Box<RecordingReader>,
        report: String,
    },
    /// The file is missing or not a recording; the report is final.
    Rejected(String),
}

/// Open a recording by user-supplied name and emit the header block.
pub(crate) fn open_recording(cfg: &QueryConfig, name: &str) -> Opened {
    let path = resolve_recording_filename(name, &cfg.recordings_dir);
    tracing::debug!(path = %path.display(), "opening recording");

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(_) => {
            return Opened::Rejected(format!("File {} not found on server\n", path.display()));
        }
    };

    let mut reader = RecordReader::new(BufReader::new(file), cfg.encoding);
    let info = match FileInfo::read(&mut reader) {
        Ok(info) if info.magic == RECORDING_MAGIC => info,
        _ => return Opened::Rejected("File is not a CARLA recorder\n".to_string()),
    };

    let mut report = String::new();
    report.push_str(&format!("Version: {}\n", info.version));
    report.push_str(&format!("Map: {}\n", info.map));
    report.push_str(&format!("Date: {}\n\n", format_date(info.date)));

    Opened::Ready {
        reader: Box::new(reader),
        report,
    }
}

/// Recording date as localtime `%x %X`.
fn format_date(epoch_seconds: i64) -> String {
    match chrono::Local.timestamp_opt(epoch_seconds, 0).single() {
        Some(date) => date.format("%x %X").to_string(),
        None => epoch_seconds.to_string(),
    }
}
