//! Blocked-actor report: actors whose position stayed within a radius for at
//! least a minimum duration, sorted by duration descending.

use std::collections::BTreeMap;

use crate::format::packet::{read_packet_header, PacketId};
use crate::format::reader::Vector3;
use crate::format::records::{EventAdd, EventDel, FrameStart, Position};
use crate::format::ReadError;

use super::table::{blocked_header, blocked_row, trailer};
use super::{open_recording, Opened, QueryConfig};

#[derive(Debug, Clone, Default)]
struct TrackedActor {
    label: String,
    last_position: Vector3,
    time: f64,
    duration: f64,
}

/// Actors that moved less than `min_distance` between consecutive position
/// samples for a total of at least `min_time` seconds.
///
/// An actor is reported when it starts moving again, and once more at end of
/// stream if it never did. Rows are ordered by duration, longest first.
pub fn query_blocked(cfg: &QueryConfig, name: &str, min_time: f64, min_distance: f64) -> String {
    let (mut reader, mut info) = match open_recording(cfg, name) {
        Opened::Ready { reader, report } => (reader, report),
        Opened::Rejected(report) => return report,
    };

    // BTreeMap keeps the end-of-stream flush deterministic by actor id
    let mut actors: BTreeMap<u32, TrackedActor> = BTreeMap::new();
    let mut results: Vec<(f64, String)> = Vec::new();
    let mut frame = FrameStart::default();

    info.push_str(&blocked_header());

    let outcome = (|| -> crate::format::Result<()> {
        while let Some(header) = read_packet_header(&mut reader)? {
            let payload_start = reader.position();
            match PacketId::from_u8(header.id) {
                Some(PacketId::FrameStart) => {
                    frame = FrameStart::read(&mut reader)?;
                }

                Some(PacketId::EventAdd) => {
                    let total = reader.read_u16()?;
                    for _ in 0..total {
                        let event = EventAdd::read(&mut reader)?;
                        actors.insert(
                            event.database_id,
                            TrackedActor {
                                label: event.description.id,
                                ..TrackedActor::default()
                            },
                        );
                    }
                }

                Some(PacketId::EventDel) => {
                    let total = reader.read_u16()?;
                    for _ in 0..total {
                        let event = EventDel::read(&mut reader)?;
                        actors.remove(&event.database_id);
                    }
                }

                Some(PacketId::Position) => {
                    let total = reader.read_u16()?;
                    for _ in 0..total {
                        let position = Position::read(&mut reader)?;
                        let actor = actors.entry(position.database_id).or_default();
                        if actor.last_position.distance(position.location) < min_distance {
                            if actor.duration == 0.0 {
                                actor.time = frame.elapsed;
                            }
                            actor.duration += frame.duration_this;
                        } else {
                            if actor.duration >= min_time {
                                results.push((
                                    actor.duration,
                                    blocked_row(
                                        actor.time,
                                        position.database_id,
                                        &actor.label,
                                        actor.duration,
                                    ),
                                ));
                            }
                            actor.duration = 0.0;
                            actor.last_position = position.location;
                        }
                    }
                }

                Some(PacketId::FrameEnd) => {}

                _ => reader.skip(u64::from(header.size))?,
            }

            let consumed = reader.position() - payload_start;
            if consumed != u64::from(header.size) {
                return Err(ReadError::SizeMismatch {
                    id: header.id,
                    consumed,
                    declared: header.size,
                });
            }
        }
        Ok(())
    })();

    if let Err(err) = outcome {
        if err.is_eof() {
            tracing::warn!(%err, "recording ends mid-packet, treating as end of stream");
        } else {
            tracing::error!(%err, "recording unreadable, truncating");
        }
    }

    // flush actors that never moved again
    for (&database_id, actor) in &actors {
        if actor.duration >= min_time {
            results.push((
                actor.duration,
                blocked_row(actor.time, database_id, &actor.label, actor.duration),
            ));
        }
    }

    // stable sort keeps equal durations in encounter order
    results.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    for (_, row) in &results {
        info.push_str(row);
    }

    info.push_str(&trailer(&frame));
    info
}
