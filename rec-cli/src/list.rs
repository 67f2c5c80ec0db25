//! Recording directory listing.
//!
//! Scans the recordings directory for `.log` files and renders name, size
//! and modification time as text or JSON.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;

/// Output format for the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for ListFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ListFormat::Text),
            "json" => Ok(ListFormat::Json),
            _ => Err(format!("Unknown format '{}'. Use 'text' or 'json'", s)),
        }
    }
}

#[derive(Debug, Serialize)]
struct RecordingEntry {
    filename: String,
    size: u64,
    modified: String,
}

fn scan(dir: &Path) -> Result<Vec<RecordingEntry>> {
    let mut entries = Vec::new();
    let listing = fs::read_dir(dir)
        .with_context(|| format!("failed to read recordings directory {}", dir.display()))?;

    for entry in listing.flatten() {
        let path = entry.path();
        if !path.is_file() || path.extension().map(|ext| ext != "log").unwrap_or(true) {
            continue;
        }
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(_) => continue,
        };
        let modified = metadata
            .modified()
            .map(|time| {
                DateTime::<Local>::from(time)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_default();
        entries.push(RecordingEntry {
            filename: entry.file_name().to_string_lossy().into_owned(),
            size: metadata.len(),
            modified,
        });
    }

    entries.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(entries)
}

/// Render the recording listing.
pub fn run(dir: &Path, format: ListFormat) -> Result<String> {
    let entries = scan(dir)?;
    Ok(match format {
        ListFormat::Text => format_text(&entries),
        ListFormat::Json => format_json(&entries),
    })
}

fn format_text(entries: &[RecordingEntry]) -> String {
    let mut output = String::new();
    output.push_str(&format!("Recordings ({}):\n\n", entries.len()));
    for entry in entries {
        output.push_str(&format!(
            "{:<35} {:>10} {}\n",
            entry.filename, entry.size, entry.modified
        ));
    }
    output
}

fn format_json(entries: &[RecordingEntry]) -> String {
    #[derive(Serialize)]
    struct JsonListing<'a> {
        count: usize,
        recordings: &'a [RecordingEntry],
    }

    let listing = JsonListing {
        count: entries.len(),
        recordings: entries,
    };

    serde_json::to_string_pretty(&listing).unwrap_or_else(|_| "{}".to_string())
}
