//! Collision report: pairs filtered by actor category, de-duplicated so a
//! contact spanning several frames is reported once at onset.

use std::collections::{HashMap, HashSet};

use crate::format::packet::{read_packet_header, PacketId};
use crate::format::records::{Collision, EventAdd, EventDel, FrameStart, NON_ACTOR_ID};
use crate::format::ReadError;

use super::table::{collision_row, collisions_header, trailer};
use super::{open_recording, Opened, QueryConfig};

/// Category letters indexed by actor type: other, vehicle, walker,
/// trafficLight, hero, any.
const CATEGORIES: [char; 6] = ['o', 'v', 'w', 't', 'h', 'a'];

#[derive(Debug, Clone, Default)]
struct ActorSummary {
    actor_type: u8,
    label: String,
}

/// Both 32-bit ids packed into one hashable key.
fn pair_key(id1: u32, id2: u32) -> u64 {
    (u64::from(id1) << 32) | u64::from(id2)
}

fn category_letter(actors: &HashMap<u32, ActorSummary>, database_id: u32) -> char {
    if database_id == NON_ACTOR_ID {
        return 'o';
    }
    let actor_type = actors
        .get(&database_id)
        .map(|actor| actor.actor_type)
        .unwrap_or(0);
    CATEGORIES.get(actor_type as usize).copied().unwrap_or('o')
}

/// One side passes when the filter is `a`, matches the side's category
/// letter, or is `h` and the side's hero flag is set.
fn side_passes(filter: char, letter: char, is_hero: bool) -> bool {
    filter == 'a' || filter == letter || (filter == 'h' && is_hero)
}

/// Collision pairs filtered by two category letters.
///
/// Categories: `o` other, `v` vehicle, `w` walker, `t` trafficLight,
/// `h` hero, `a` any. A row is printed only at collision onset; a pair
/// colliding across consecutive frames is reported once.
pub fn query_collisions(cfg: &QueryConfig, name: &str, cat1: char, cat2: char) -> String {
    let (mut reader, mut info) = match open_recording(cfg, name) {
        Opened::Ready { reader, report } => (reader, report),
        Opened::Rejected(report) => return report,
    };

    let mut actors: HashMap<u32, ActorSummary> = HashMap::new();
    let mut old_collisions: HashSet<u64> = HashSet::new();
    let mut new_collisions: HashSet<u64> = HashSet::new();
    let mut frame = FrameStart::default();

    info.push_str(&collisions_header());

    let outcome = (|| -> crate::format::Result<()> {
        while let Some(header) = read_packet_header(&mut reader)? {
            let payload_start = reader.position();
            match PacketId::from_u8(header.id) {
                Some(PacketId::FrameStart) => {
                    frame = FrameStart::read(&mut reader)?;
                    // a pair absent from the previous frame is a new contact
                    old_collisions = std::mem::take(&mut new_collisions);
                }

                Some(PacketId::EventAdd) => {
                    let total = reader.read_u16()?;
                    for _ in 0..total {
                        let event = EventAdd::read(&mut reader)?;
                        actors.insert(
                            event.database_id,
                            ActorSummary {
                                actor_type: event.actor_type,
                                label: event.description.id,
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

                Some(PacketId::Collision) => {
                    let total = reader.read_u16()?;
                    for _ in 0..total {
                        let collision = Collision::read(&mut reader)?;
                        let type1 = category_letter(&actors, collision.database_id1);
                        let type2 = category_letter(&actors, collision.database_id2);

                        if side_passes(cat1, type1, collision.is_actor1_hero)
                            && side_passes(cat2, type2, collision.is_actor2_hero)
                        {
                            let key = pair_key(collision.database_id1, collision.database_id2);
                            if !old_collisions.contains(&key) {
                                let empty = String::new();
                                let label = |id: u32| {
                                    actors.get(&id).map(|actor| &actor.label).unwrap_or(&empty)
                                };
                                info.push_str(&collision_row(
                                    frame.elapsed,
                                    type1,
                                    type2,
                                    collision.database_id1,
                                    label(collision.database_id1),
                                    collision.database_id2,
                                    label(collision.database_id2),
                                ));
                            }
                            // pairs failing the filter are never tracked, so a
                            // later filter-matching repeat re-emits
                            new_collisions.insert(key);
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

    info.push_str(&trailer(&frame));
    info
}
