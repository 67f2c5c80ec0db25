//! Packet framing: a one-byte kind id followed by a four-byte payload size.
//!
//! The framer never consumes the payload; the dispatcher either runs the
//! matching record codec (which must consume exactly `size` bytes) or skips
//! the payload wholesale. Unknown ids are skipped by declared size.

use std::io::Read;

use super::error::Result;
use super::reader::RecordReader;

/// Enumerated packet kinds of the recording format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketId {
    FrameStart,
    FrameEnd,
    EventAdd,
    EventDel,
    EventParent,
    Collision,
    Position,
    State,
    AnimVehicle,
    AnimWalker,
    VehicleLight,
    SceneLight,
    Kinematics,
    BoundingBox,
    PlatformTime,
    PhysicsControl,
    TrafficLightTime,
    TriggerVolume,
    VehicleDoor,
    WalkerBones,
}

impl PacketId {
    pub fn from_u8(id: u8) -> Option<PacketId> {
        use PacketId::*;
        Some(match id {
            0 => FrameStart,
            1 => FrameEnd,
            2 => EventAdd,
            3 => EventDel,
            4 => EventParent,
            5 => Collision,
            6 => Position,
            7 => State,
            8 => AnimVehicle,
            9 => AnimWalker,
            10 => VehicleLight,
            11 => SceneLight,
            12 => Kinematics,
            13 => BoundingBox,
            14 => PlatformTime,
            15 => PhysicsControl,
            16 => TrafficLightTime,
            17 => TriggerVolume,
            18 => VehicleDoor,
            19 => WalkerBones,
            _ => return None,
        })
    }

    pub fn as_u8(self) -> u8 {
        use PacketId::*;
        match self {
            FrameStart => 0,
            FrameEnd => 1,
            EventAdd => 2,
            EventDel => 3,
            EventParent => 4,
            Collision => 5,
            Position => 6,
            State => 7,
            AnimVehicle => 8,
            AnimWalker => 9,
            VehicleLight => 10,
            SceneLight => 11,
            Kinematics => 12,
            BoundingBox => 13,
            PlatformTime => 14,
            PhysicsControl => 15,
            TrafficLightTime => 16,
            TriggerVolume => 17,
            VehicleDoor => 18,
            WalkerBones => 19,
        }
    }
}

/// Raw packet header as framed on the wire.
#[derive(Debug, Clone, Copy)]
pub struct PacketHeader {
    pub id: u8,
    pub size: u32,
}

/// Read the next packet header.
///
/// A clean end-of-stream on the id byte yields `Ok(None)`. Once the id byte
/// is consumed the size must be read in full; a partial read is corruption.
pub fn read_packet_header<R: Read>(reader: &mut RecordReader<R>) -> Result<Option<PacketHeader>> {
    let id = match reader.try_read_u8()? {
        Some(id) => id,
        None => return Ok(None),
    };
    let size = reader.read_u32()?;
    Ok(Some(PacketHeader { id, size }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::reader::TextEncoding;
    use std::io::Cursor;

    fn reader(bytes: Vec<u8>) -> RecordReader<Cursor<Vec<u8>>> {
        RecordReader::new(Cursor::new(bytes), TextEncoding::Utf8)
    }

    #[test]
    fn packet_id__known_ids__then_roundtrip() {
        for id in 0..=19u8 {
            let kind = PacketId::from_u8(id).unwrap();
            assert_eq!(kind.as_u8(), id);
        }
    }

    #[test]
    fn packet_id__unknown_id__then_none() {
        assert_eq!(PacketId::from_u8(200), None);
    }

    #[test]
    fn read_packet_header__valid__then_id_and_size() {
        let mut bytes = vec![5u8];
        bytes.extend_from_slice(&14u32.to_le_bytes());
        let mut r = reader(bytes);
        let header = read_packet_header(&mut r).unwrap().unwrap();
        assert_eq!(header.id, 5);
        assert_eq!(header.size, 14);
    }

    #[test]
    fn read_packet_header__clean_eof__then_none() {
        let mut r = reader(Vec::new());
        assert!(read_packet_header(&mut r).unwrap().is_none());
    }

    #[test]
    fn read_packet_header__truncated_size__then_error() {
        let mut r = reader(vec![5u8, 0x01, 0x00]);
        let err = read_packet_header(&mut r).unwrap_err();
        assert!(err.is_eof());
    }
}
