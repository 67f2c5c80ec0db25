//! Record codecs, one per packet kind.
//!
//! Each record knows its own wire layout; nothing is inferred from the
//! declared packet size. List-valued packets carry a u16 record count ahead
//! of the records themselves; the count is read by the query loop, the
//! codecs here decode a single record.

use std::io::Read;

use super::error::Result;
use super::reader::{Color, RecordReader, Vector3};

/// Sentinel database id for a collision partner that is not an actor.
pub const NON_ACTOR_ID: u32 = u32::MAX;

/// Frame boundary: everything until the next `FrameStart` belongs to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStart {
    pub id: u64,
    pub elapsed: f64,
    pub duration_this: f64,
}

impl FrameStart {
    pub fn read<R: Read>(r: &mut RecordReader<R>) -> Result<FrameStart> {
        Ok(FrameStart {
            id: r.read_u64()?,
            elapsed: r.read_f64()?,
            duration_this: r.read_f64()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ActorAttribute {
    pub kind: u8,
    pub id: String,
    pub value: String,
}

impl ActorAttribute {
    fn read<R: Read>(r: &mut RecordReader<R>) -> Result<ActorAttribute> {
        Ok(ActorAttribute {
            kind: r.read_u8()?,
            id: r.read_string()?,
            value: r.read_string()?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActorDescription {
    pub id: String,
    pub attributes: Vec<ActorAttribute>,
}

/// Actor creation. Types: 0=other, 1=vehicle, 2=walker, 3=trafficLight.
#[derive(Debug, Clone)]
pub struct EventAdd {
    pub database_id: u32,
    pub actor_type: u8,
    pub location: Vector3,
    pub rotation: Vector3,
    pub description: ActorDescription,
}

impl EventAdd {
    pub fn read<R: Read>(r: &mut RecordReader<R>) -> Result<EventAdd> {
        let database_id = r.read_u32()?;
        let actor_type = r.read_u8()?;
        let location = r.read_vector3()?;
        let rotation = r.read_vector3()?;
        let id = r.read_string()?;
        let total = r.read_u16()?;
        let mut attributes = Vec::with_capacity(total as usize);
        for _ in 0..total {
            attributes.push(ActorAttribute::read(r)?);
        }
        Ok(EventAdd {
            database_id,
            actor_type,
            location,
            rotation,
            description: ActorDescription { id, attributes },
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EventDel {
    pub database_id: u32,
}

impl EventDel {
    pub fn read<R: Read>(r: &mut RecordReader<R>) -> Result<EventDel> {
        Ok(EventDel {
            database_id: r.read_u32()?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EventParent {
    pub database_id: u32,
    pub parent_id: u32,
}

impl EventParent {
    pub fn read<R: Read>(r: &mut RecordReader<R>) -> Result<EventParent> {
        Ok(EventParent {
            database_id: r.read_u32()?,
            parent_id: r.read_u32()?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Collision {
    pub id: u32,
    pub is_actor1_hero: bool,
    pub is_actor2_hero: bool,
    pub database_id1: u32,
    pub database_id2: u32,
}

impl Collision {
    pub fn read<R: Read>(r: &mut RecordReader<R>) -> Result<Collision> {
        Ok(Collision {
            id: r.read_u32()?,
            is_actor1_hero: r.read_u8()? != 0,
            is_actor2_hero: r.read_u8()? != 0,
            database_id1: r.read_u32()?,
            database_id2: r.read_u32()?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Position {
    pub database_id: u32,
    pub location: Vector3,
    pub rotation: Vector3,
}

impl Position {
    pub fn read<R: Read>(r: &mut RecordReader<R>) -> Result<Position> {
        Ok(Position {
            database_id: r.read_u32()?,
            location: r.read_vector3()?,
            rotation: r.read_vector3()?,
        })
    }
}

/// Traffic-light state snapshot.
#[derive(Debug, Clone, Copy)]
pub struct TrafficLightState {
    pub database_id: u32,
    pub state: u8,
    pub is_frozen: u8,
    pub elapsed_time: f32,
}

impl TrafficLightState {
    pub fn read<R: Read>(r: &mut RecordReader<R>) -> Result<TrafficLightState> {
        Ok(TrafficLightState {
            database_id: r.read_u32()?,
            state: r.read_u8()?,
            is_frozen: r.read_u8()?,
            elapsed_time: r.read_f32()?,
        })
    }

    /// State rendered as a single digit character.
    pub fn state_char(&self) -> char {
        b'0'.wrapping_add(self.state) as char
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AnimVehicle {
    pub database_id: u32,
    pub steering: f32,
    pub throttle: f32,
    pub brake: f32,
    pub handbrake: u8,
    pub gear: i32,
}

impl AnimVehicle {
    pub fn read<R: Read>(r: &mut RecordReader<R>) -> Result<AnimVehicle> {
        Ok(AnimVehicle {
            database_id: r.read_u32()?,
            steering: r.read_f32()?,
            throttle: r.read_f32()?,
            brake: r.read_f32()?,
            handbrake: r.read_u8()?,
            gear: r.read_i32()?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AnimWalker {
    pub database_id: u32,
    pub speed: f32,
}

impl AnimWalker {
    pub fn read<R: Read>(r: &mut RecordReader<R>) -> Result<AnimWalker> {
        Ok(AnimWalker {
            database_id: r.read_u32()?,
            speed: r.read_f32()?,
        })
    }
}

pub const DOOR_FRONT_LEFT: u8 = 1;
pub const DOOR_FRONT_RIGHT: u8 = 2;
pub const DOOR_REAR_LEFT: u8 = 4;
pub const DOOR_REAR_RIGHT: u8 = 8;
pub const DOOR_HOOD: u8 = 16;
pub const DOOR_TRUNK: u8 = 32;
pub const DOOR_ALL: u8 = 0xFF;

#[derive(Debug, Clone, Copy)]
pub struct VehicleDoor {
    pub database_id: u32,
    pub doors: u8,
}

impl VehicleDoor {
    pub fn read<R: Read>(r: &mut RecordReader<R>) -> Result<VehicleDoor> {
        Ok(VehicleDoor {
            database_id: r.read_u32()?,
            doors: r.read_u8()?,
        })
    }

    /// Human name of the opened door.
    ///
    /// Matches on enum equality against the raw byte, not bitwise
    /// membership, so combined masks other than `All` name nothing. This
    /// reproduces the recorder's own report output.
    pub fn door_name(&self) -> Option<&'static str> {
        match self.doors {
            DOOR_FRONT_LEFT => Some("Front Left"),
            DOOR_FRONT_RIGHT => Some("Front Right"),
            DOOR_REAR_LEFT => Some("Rear Left"),
            DOOR_REAR_RIGHT => Some("Rear Right"),
            DOOR_HOOD => Some("Hood"),
            DOOR_TRUNK => Some("Trunk"),
            DOOR_ALL => Some("All"),
            _ => None,
        }
    }
}

/// Vehicle light flags, listed in report order.
const LIGHT_FLAGS: [(u32, &str); 11] = [
    (1 << 0, "Position"),
    (1 << 1, "LowBeam"),
    (1 << 2, "HighBeam"),
    (1 << 3, "Brake"),
    (1 << 4, "RightBlinker"),
    (1 << 5, "LeftBlinker"),
    (1 << 6, "Reverse"),
    (1 << 7, "Interior"),
    (1 << 8, "Fog"),
    (1 << 9, "Special1"),
    (1 << 10, "Special2"),
];

#[derive(Debug, Clone, Copy)]
pub struct VehicleLight {
    pub database_id: u32,
    pub state: u32,
}

impl VehicleLight {
    pub fn read<R: Read>(r: &mut RecordReader<R>) -> Result<VehicleLight> {
        Ok(VehicleLight {
            database_id: r.read_u32()?,
            state: r.read_u32()?,
        })
    }

    /// Space-separated names of the enabled lights, `None` when dark.
    pub fn enabled_lights(&self) -> String {
        let names: Vec<&str> = LIGHT_FLAGS
            .iter()
            .filter(|(bit, _)| self.state & bit != 0)
            .map(|&(_, name)| name)
            .collect();
        if names.is_empty() {
            "None".to_string()
        } else {
            names.join(" ")
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SceneLight {
    pub light_id: u32,
    pub on: u8,
    pub intensity: f32,
    pub color: Color,
}

impl SceneLight {
    pub fn read<R: Read>(r: &mut RecordReader<R>) -> Result<SceneLight> {
        Ok(SceneLight {
            light_id: r.read_u32()?,
            on: r.read_u8()?,
            intensity: r.read_f32()?,
            color: r.read_color()?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Kinematics {
    pub database_id: u32,
    pub linear_velocity: Vector3,
    pub angular_velocity: Vector3,
}

impl Kinematics {
    pub fn read<R: Read>(r: &mut RecordReader<R>) -> Result<Kinematics> {
        Ok(Kinematics {
            database_id: r.read_u32()?,
            linear_velocity: r.read_vector3()?,
            angular_velocity: r.read_vector3()?,
        })
    }
}

/// Axis-aligned box, used for both bounding boxes and trigger volumes.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub database_id: u32,
    pub origin: Vector3,
    pub extension: Vector3,
}

impl BoundingBox {
    pub fn read<R: Read>(r: &mut RecordReader<R>) -> Result<BoundingBox> {
        Ok(BoundingBox {
            database_id: r.read_u32()?,
            origin: r.read_vector3()?,
            extension: r.read_vector3()?,
        })
    }
}

/// Wall-clock time on the producer side. Singleton payload, no count.
#[derive(Debug, Clone, Copy)]
pub struct PlatformTime {
    pub time: f64,
}

impl PlatformTime {
    pub fn read<R: Read>(r: &mut RecordReader<R>) -> Result<PlatformTime> {
        Ok(PlatformTime {
            time: r.read_f64()?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TrafficLightTime {
    pub database_id: u32,
    pub green_time: f32,
    pub yellow_time: f32,
    pub red_time: f32,
}

impl TrafficLightTime {
    pub fn read<R: Read>(r: &mut RecordReader<R>) -> Result<TrafficLightTime> {
        Ok(TrafficLightTime {
            database_id: r.read_u32()?,
            green_time: r.read_f32()?,
            yellow_time: r.read_f32()?,
            red_time: r.read_f32()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct WalkerBone {
    pub name: String,
    pub location: Vector3,
    pub rotation: Vector3,
}

#[derive(Debug, Clone)]
pub struct WalkerBones {
    pub database_id: u32,
    pub bones: Vec<WalkerBone>,
}

impl WalkerBones {
    pub fn read<R: Read>(r: &mut RecordReader<R>) -> Result<WalkerBones> {
        let database_id = r.read_u32()?;
        let total = r.read_u16()?;
        let mut bones = Vec::with_capacity(total as usize);
        for _ in 0..total {
            bones.push(WalkerBone {
                name: r.read_string()?,
                location: r.read_vector3()?,
                rotation: r.read_vector3()?,
            });
        }
        Ok(WalkerBones { database_id, bones })
    }
}
