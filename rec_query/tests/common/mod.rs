//! Binary fixture writer for recording files.
//!
//! Builds well-formed (or deliberately malformed) recordings in memory and
//! writes them into a temp directory for the queries to consume.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const MAGIC: &str = "CARLA_RECORDER";

pub const FRAME_START: u8 = 0;
pub const FRAME_END: u8 = 1;
pub const EVENT_ADD: u8 = 2;
pub const EVENT_DEL: u8 = 3;
pub const EVENT_PARENT: u8 = 4;
pub const COLLISION: u8 = 5;
pub const POSITION: u8 = 6;
pub const STATE: u8 = 7;
pub const ANIM_VEHICLE: u8 = 8;
pub const ANIM_WALKER: u8 = 9;
pub const VEHICLE_LIGHT: u8 = 10;
pub const SCENE_LIGHT: u8 = 11;
pub const KINEMATICS: u8 = 12;
pub const BOUNDING_BOX: u8 = 13;
pub const PLATFORM_TIME: u8 = 14;
pub const PHYSICS_CONTROL: u8 = 15;
pub const TRAFFIC_LIGHT_TIME: u8 = 16;
pub const TRIGGER_VOLUME: u8 = 17;
pub const VEHICLE_DOOR: u8 = 18;
pub const WALKER_BONES: u8 = 19;

pub fn string_bytes(s: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(2 + s.len());
    buf.extend_from_slice(&(s.len() as u16).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
    buf
}

pub fn vec3_bytes(v: [f32; 3]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(12);
    for c in v {
        buf.extend_from_slice(&c.to_le_bytes());
    }
    buf
}

pub struct RecordingBuilder {
    buf: Vec<u8>,
}

impl RecordingBuilder {
    /// Standard fixture header: version 9, map Town03, date 0.
    pub fn new() -> Self {
        Self::with_header(MAGIC, 9, "Town03", 0)
    }

    pub fn with_header(magic: &str, version: u16, map: &str, date: i64) -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(&string_bytes(magic));
        buf.extend_from_slice(&version.to_le_bytes());
        buf.extend_from_slice(&string_bytes(map));
        buf.extend_from_slice(&date.to_le_bytes());
        RecordingBuilder { buf }
    }

    /// Frame a packet: id byte, payload size, payload.
    pub fn packet(&mut self, id: u8, payload: &[u8]) -> &mut Self {
        self.buf.push(id);
        self.buf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        self.buf.extend_from_slice(payload);
        self
    }

    /// Raw bytes appended unframed, for truncation fixtures.
    pub fn raw_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn frame_start(&mut self, id: u64, elapsed: f64, duration: f64) -> &mut Self {
        let mut payload = Vec::new();
        payload.extend_from_slice(&id.to_le_bytes());
        payload.extend_from_slice(&elapsed.to_le_bytes());
        payload.extend_from_slice(&duration.to_le_bytes());
        self.packet(FRAME_START, &payload)
    }

    pub fn frame_end(&mut self) -> &mut Self {
        self.packet(FRAME_END, &[])
    }

    pub fn event_add(
        &mut self,
        database_id: u32,
        actor_type: u8,
        location: [f32; 3],
        description: &str,
        attributes: &[(&str, &str)],
    ) -> &mut Self {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1u16.to_le_bytes());
        payload.extend_from_slice(&database_id.to_le_bytes());
        payload.push(actor_type);
        payload.extend_from_slice(&vec3_bytes(location));
        payload.extend_from_slice(&vec3_bytes([0.0, 0.0, 0.0]));
        payload.extend_from_slice(&string_bytes(description));
        payload.extend_from_slice(&(attributes.len() as u16).to_le_bytes());
        for (id, value) in attributes {
            payload.push(0);
            payload.extend_from_slice(&string_bytes(id));
            payload.extend_from_slice(&string_bytes(value));
        }
        self.packet(EVENT_ADD, &payload)
    }

    pub fn event_del(&mut self, database_id: u32) -> &mut Self {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1u16.to_le_bytes());
        payload.extend_from_slice(&database_id.to_le_bytes());
        self.packet(EVENT_DEL, &payload)
    }

    pub fn event_parent(&mut self, database_id: u32, parent_id: u32) -> &mut Self {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1u16.to_le_bytes());
        payload.extend_from_slice(&database_id.to_le_bytes());
        payload.extend_from_slice(&parent_id.to_le_bytes());
        self.packet(EVENT_PARENT, &payload)
    }

    pub fn collision(
        &mut self,
        id: u32,
        hero1: bool,
        hero2: bool,
        database_id1: u32,
        database_id2: u32,
    ) -> &mut Self {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1u16.to_le_bytes());
        payload.extend_from_slice(&id.to_le_bytes());
        payload.push(hero1 as u8);
        payload.push(hero2 as u8);
        payload.extend_from_slice(&database_id1.to_le_bytes());
        payload.extend_from_slice(&database_id2.to_le_bytes());
        self.packet(COLLISION, &payload)
    }

    pub fn positions(&mut self, entries: &[(u32, [f32; 3])]) -> &mut Self {
        let mut payload = Vec::new();
        payload.extend_from_slice(&(entries.len() as u16).to_le_bytes());
        for (database_id, location) in entries {
            payload.extend_from_slice(&database_id.to_le_bytes());
            payload.extend_from_slice(&vec3_bytes(*location));
            payload.extend_from_slice(&vec3_bytes([0.0, 0.0, 0.0]));
        }
        self.packet(POSITION, &payload)
    }

    pub fn traffic_light_state(
        &mut self,
        database_id: u32,
        state: u8,
        frozen: u8,
        elapsed: f32,
    ) -> &mut Self {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1u16.to_le_bytes());
        payload.extend_from_slice(&database_id.to_le_bytes());
        payload.push(state);
        payload.push(frozen);
        payload.extend_from_slice(&elapsed.to_le_bytes());
        self.packet(STATE, &payload)
    }

    pub fn anim_vehicle(
        &mut self,
        database_id: u32,
        steering: f32,
        throttle: f32,
        brake: f32,
        handbrake: u8,
        gear: i32,
    ) -> &mut Self {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1u16.to_le_bytes());
        payload.extend_from_slice(&database_id.to_le_bytes());
        payload.extend_from_slice(&steering.to_le_bytes());
        payload.extend_from_slice(&throttle.to_le_bytes());
        payload.extend_from_slice(&brake.to_le_bytes());
        payload.push(handbrake);
        payload.extend_from_slice(&gear.to_le_bytes());
        self.packet(ANIM_VEHICLE, &payload)
    }

    pub fn anim_walker(&mut self, database_id: u32, speed: f32) -> &mut Self {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1u16.to_le_bytes());
        payload.extend_from_slice(&database_id.to_le_bytes());
        payload.extend_from_slice(&speed.to_le_bytes());
        self.packet(ANIM_WALKER, &payload)
    }

    pub fn vehicle_door(&mut self, database_id: u32, doors: u8) -> &mut Self {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1u16.to_le_bytes());
        payload.extend_from_slice(&database_id.to_le_bytes());
        payload.push(doors);
        self.packet(VEHICLE_DOOR, &payload)
    }

    pub fn vehicle_light(&mut self, database_id: u32, state: u32) -> &mut Self {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1u16.to_le_bytes());
        payload.extend_from_slice(&database_id.to_le_bytes());
        payload.extend_from_slice(&state.to_le_bytes());
        self.packet(VEHICLE_LIGHT, &payload)
    }

    pub fn scene_light(
        &mut self,
        light_id: u32,
        on: u8,
        intensity: f32,
        color: [u8; 3],
    ) -> &mut Self {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1u16.to_le_bytes());
        payload.extend_from_slice(&light_id.to_le_bytes());
        payload.push(on);
        payload.extend_from_slice(&intensity.to_le_bytes());
        payload.extend_from_slice(&color);
        self.packet(SCENE_LIGHT, &payload)
    }

    pub fn kinematics(
        &mut self,
        database_id: u32,
        linear: [f32; 3],
        angular: [f32; 3],
    ) -> &mut Self {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1u16.to_le_bytes());
        payload.extend_from_slice(&database_id.to_le_bytes());
        payload.extend_from_slice(&vec3_bytes(linear));
        payload.extend_from_slice(&vec3_bytes(angular));
        self.packet(KINEMATICS, &payload)
    }

    pub fn actor_box(
        &mut self,
        packet_id: u8,
        database_id: u32,
        origin: [f32; 3],
        extension: [f32; 3],
    ) -> &mut Self {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1u16.to_le_bytes());
        payload.extend_from_slice(&database_id.to_le_bytes());
        payload.extend_from_slice(&vec3_bytes(origin));
        payload.extend_from_slice(&vec3_bytes(extension));
        self.packet(packet_id, &payload)
    }

    pub fn platform_time(&mut self, time: f64) -> &mut Self {
        self.packet(PLATFORM_TIME, &time.to_le_bytes())
    }

    pub fn traffic_light_time(
        &mut self,
        database_id: u32,
        green: f32,
        yellow: f32,
        red: f32,
    ) -> &mut Self {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1u16.to_le_bytes());
        payload.extend_from_slice(&database_id.to_le_bytes());
        payload.extend_from_slice(&green.to_le_bytes());
        payload.extend_from_slice(&yellow.to_le_bytes());
        payload.extend_from_slice(&red.to_le_bytes());
        self.packet(TRAFFIC_LIGHT_TIME, &payload)
    }

    pub fn walker_bones(&mut self, database_id: u32, bones: &[(&str, [f32; 3])]) -> &mut Self {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1u16.to_le_bytes());
        payload.extend_from_slice(&database_id.to_le_bytes());
        payload.extend_from_slice(&(bones.len() as u16).to_le_bytes());
        for (name, location) in bones {
            payload.extend_from_slice(&string_bytes(name));
            payload.extend_from_slice(&vec3_bytes(*location));
            payload.extend_from_slice(&vec3_bytes([0.0, 0.0, 0.0]));
        }
        self.packet(WALKER_BONES, &payload)
    }

    pub fn physics_control(&mut self, database_id: u32, wheel_count: u16) -> &mut Self {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1u16.to_le_bytes());
        payload.extend_from_slice(&physics_record_bytes(database_id, wheel_count));
        self.packet(PHYSICS_CONTROL, &payload)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, &self.buf).unwrap();
        path
    }
}

/// A physics control record with fixed engine parameters and identical
/// wheels, enough to exercise every field of the codec.
pub fn physics_record_bytes(database_id: u32, wheel_count: u16) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&database_id.to_le_bytes());
    for v in [300.0f32, 6000.0, 1.0, 600.0] {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    buf.push(0); // differential_type
    buf.extend_from_slice(&0.5f32.to_le_bytes());
    buf.push(1); // use_gear_auto_box
    for v in [0.5f32, 4.0, 4500.0, 2000.0, 0.9, 1500.0, 0.3] {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    buf.extend_from_slice(&vec3_bytes([0.0, 0.0, 0.0])); // center_of_mass
    buf.extend_from_slice(&2u16.to_le_bytes()); // torque_curve
    for (x, y) in [(0.0f32, 400.0f32), (5000.0, 400.0)] {
        buf.extend_from_slice(&x.to_le_bytes());
        buf.extend_from_slice(&y.to_le_bytes());
    }
    buf.extend_from_slice(&1u16.to_le_bytes()); // steering_curve
    buf.extend_from_slice(&0.0f32.to_le_bytes());
    buf.extend_from_slice(&1.0f32.to_le_bytes());
    buf.extend_from_slice(&2u16.to_le_bytes()); // forward gears
    buf.extend_from_slice(&4.0f32.to_le_bytes());
    buf.extend_from_slice(&2.5f32.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes()); // reverse gears
    buf.extend_from_slice(&4.0f32.to_le_bytes());
    buf.extend_from_slice(&wheel_count.to_le_bytes());
    for index in 0..wheel_count {
        wheel_bytes(&mut buf, u32::from(index));
    }
    buf
}

fn wheel_bytes(buf: &mut Vec<u8>, wheel_index: u32) {
    buf.push(0); // axle_type
    buf.extend_from_slice(&vec3_bytes([0.0, 0.0, 0.0])); // offset
    for v in [30.0f32, 20.0, 25.0, 1000.0, 3.5, 0.5, 0.1, 0.2, 70.0] {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    for flag in [1u8, 1, 0, 1, 1, 0] {
        buf.push(flag);
    }
    buf.extend_from_slice(&2000.0f32.to_le_bytes()); // max_wheelspin_rotation
    buf.push(0); // external_torque_combine_method
    buf.extend_from_slice(&1u16.to_le_bytes()); // lateral_slip_graph
    buf.extend_from_slice(&0.0f32.to_le_bytes());
    buf.extend_from_slice(&1.0f32.to_le_bytes());
    buf.extend_from_slice(&vec3_bytes([0.0, 0.0, 1.0])); // suspension_axis
    buf.extend_from_slice(&vec3_bytes([0.0, 0.0, 0.0])); // suspension_force_offset
    for v in [8.0f32, 10.0, 0.5, 0.5, 50.0, 0.0, 1.0, 0.15] {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    buf.push(0); // sweep_shape
    buf.push(0); // sweep_type
    buf.extend_from_slice(&1500.0f32.to_le_bytes());
    buf.extend_from_slice(&3000.0f32.to_le_bytes());
    buf.extend_from_slice(&wheel_index.to_le_bytes());
    buf.extend_from_slice(&vec3_bytes([0.0, 0.0, 0.0])); // location
    buf.extend_from_slice(&vec3_bytes([0.0, 0.0, 0.0])); // old_location
    buf.extend_from_slice(&vec3_bytes([0.0, 0.0, 0.0])); // velocity
}
