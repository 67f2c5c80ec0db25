//! Frame-by-frame dump of a recording.

use crate::format::packet::{read_packet_header, PacketId};
use crate::format::physics::PhysicsControl;
use crate::format::records::{
    AnimVehicle, AnimWalker, BoundingBox, Collision, EventAdd, EventDel, EventParent, FrameStart,
    Kinematics, PlatformTime, Position, SceneLight, TrafficLightState, TrafficLightTime,
    VehicleDoor, VehicleLight, WalkerBones,
};
use crate::format::{ReadError, Result};

use super::table::trailer;
use super::{open_recording, Opened, QueryConfig, RecordingReader};

/// Frame-by-frame report of a recording.
///
/// Actor life-cycle events, parenting and collisions are always shown; with
/// `show_all` every remaining packet kind is rendered too, otherwise those
/// payloads are skipped. The `Frame N at T seconds` line is emitted lazily,
/// only once a frame contributes a displayed packet.
pub fn query_info(cfg: &QueryConfig, name: &str, show_all: bool) -> String {
    let (mut reader, mut info) = match open_recording(cfg, name) {
        Opened::Ready { reader, report } => (reader, report),
        Opened::Rejected(report) => return report,
    };

    let mut frame = FrameStart::default();
    let mut frame_printed = false;

    loop {
        let header = match read_packet_header(&mut reader) {
            Ok(Some(header)) => header,
            Ok(None) => break,
            Err(err) if err.is_eof() => {
                note_stream_end(&err);
                break;
            }
            Err(err) => {
                tracing::error!(%err, "recording unreadable, truncating");
                break;
            }
        };

        let payload_start = reader.position();
        let outcome = dispatch_packet(
            &mut reader,
            header.id,
            header.size,
            show_all,
            &mut frame,
            &mut frame_printed,
            &mut info,
        );

        match outcome {
            Ok(()) => {
                let consumed = reader.position() - payload_start;
                if consumed != u64::from(header.size) {
                    let err = ReadError::SizeMismatch {
                        id: header.id,
                        consumed,
                        declared: header.size,
                    };
                    tracing::error!(%err, "packet codec violated declared size, truncating");
                    break;
                }
            }
            Err(err) if err.is_eof() => {
                note_stream_end(&err);
                break;
            }
            Err(err) => {
                tracing::error!(%err, "recording unreadable, truncating");
                break;
            }
        }
    }

    info.push_str(&trailer(&frame));
    info
}

fn note_stream_end(err: &ReadError) {
    tracing::warn!(%err, "recording ends mid-packet, treating as end of stream");
}

fn print_frame(out: &mut String, frame: &FrameStart) {
    out.push_str(&format!("Frame {} at {} seconds\n", frame.id, frame.elapsed));
}

/// Print the pending frame line once a frame contributes output.
fn print_frame_once(out: &mut String, frame: &FrameStart, frame_printed: &mut bool) {
    if !*frame_printed {
        print_frame(out, frame);
        *frame_printed = true;
    }
}

fn dispatch_packet(
    reader: &mut RecordingReader,
    id: u8,
    size: u32,
    show_all: bool,
    frame: &mut FrameStart,
    frame_printed: &mut bool,
    info: &mut String,
) -> Result<()> {
    let Some(kind) = PacketId::from_u8(id) else {
        tracing::debug!(id, size, "skipping unknown packet");
        return reader.skip(u64::from(size));
    };

    match kind {
        PacketId::FrameStart => {
            let next = FrameStart::read(reader)?;
            if next.id < frame.id || next.elapsed < frame.elapsed {
                tracing::warn!(
                    frame = next.id,
                    elapsed = next.elapsed,
                    "frame sequence went backwards"
                );
            }
            *frame = next;
            if show_all {
                print_frame(info, frame);
                *frame_printed = true;
            } else {
                *frame_printed = false;
            }
        }

        PacketId::FrameEnd => {}

        PacketId::EventAdd => {
            let total = reader.read_u16()?;
            if total > 0 {
                print_frame_once(info, frame, frame_printed);
            }
            for _ in 0..total {
                let event = EventAdd::read(reader)?;
                info.push_str(&format!(
                    " Create {}: {} ({}) at ({}, {}, {})\n",
                    event.database_id,
                    event.description.id,
                    event.actor_type,
                    event.location.x,
                    event.location.y,
                    event.location.z
                ));
                for attr in &event.description.attributes {
                    info.push_str(&format!("  {} = {}\n", attr.id, attr.value));
                }
            }
        }

        PacketId::EventDel => {
            let total = reader.read_u16()?;
            if total > 0 {
                print_frame_once(info, frame, frame_printed);
            }
            for _ in 0..total {
                let event = EventDel::read(reader)?;
                info.push_str(&format!(" Destroy {}\n", event.database_id));
            }
        }

        PacketId::EventParent => {
            let total = reader.read_u16()?;
            if total > 0 {
                print_frame_once(info, frame, frame_printed);
            }
            for _ in 0..total {
                let event = EventParent::read(reader)?;
                info.push_str(&format!(
                    " Parenting {} with {} (parent)\n",
                    event.database_id, event.parent_id
                ));
            }
        }

        PacketId::Collision => {
            let total = reader.read_u16()?;
            if total > 0 {
                print_frame_once(info, frame, frame_printed);
            }
            for _ in 0..total {
                let collision = Collision::read(reader)?;
                info.push_str(&format!(
                    " Collision id {} between {}",
                    collision.id, collision.database_id1
                ));
                if collision.is_actor1_hero {
                    info.push_str(" (hero) ");
                }
                info.push_str(&format!(" with {}", collision.database_id2));
                if collision.is_actor2_hero {
                    info.push_str(" (hero) ");
                }
                info.push('\n');
            }
        }

        PacketId::Position => {
            if !show_all {
                return reader.skip(u64::from(size));
            }
            let total = reader.read_u16()?;
            if total > 0 {
                print_frame_once(info, frame, frame_printed);
            }
            info.push_str(&format!(" Positions: {}\n", total));
            for _ in 0..total {
                let position = Position::read(reader)?;
                info.push_str(&format!(
                    "  Id: {} Location: {} Rotation: {}\n",
                    position.database_id, position.location, position.rotation
                ));
            }
        }

        PacketId::State => {
            if !show_all {
                return reader.skip(u64::from(size));
            }
            let total = reader.read_u16()?;
            if total > 0 {
                print_frame_once(info, frame, frame_printed);
            }
            info.push_str(&format!(" State traffic lights: {}\n", total));
            for _ in 0..total {
                let state = TrafficLightState::read(reader)?;
                info.push_str(&format!(
                    "  Id: {} state: {} frozen: {} elapsedTime: {}\n",
                    state.database_id,
                    state.state_char(),
                    state.is_frozen,
                    state.elapsed_time
                ));
            }
        }

        PacketId::AnimVehicle => {
            if !show_all {
                return reader.skip(u64::from(size));
            }
            let total = reader.read_u16()?;
            if total > 0 {
                print_frame_once(info, frame, frame_printed);
            }
            info.push_str(&format!(" Vehicle animations: {}\n", total));
            for _ in 0..total {
                let anim = AnimVehicle::read(reader)?;
                info.push_str(&format!(
                    "  Id: {} Steering: {} Throttle: {} Brake: {} Handbrake: {} Gear: {}\n",
                    anim.database_id,
                    anim.steering,
                    anim.throttle,
                    anim.brake,
                    anim.handbrake,
                    anim.gear
                ));
            }
        }

        PacketId::AnimWalker => {
            if !show_all {
                return reader.skip(u64::from(size));
            }
            let total = reader.read_u16()?;
            if total > 0 {
                print_frame_once(info, frame, frame_printed);
            }
            info.push_str(&format!(" Walker animations: {}\n", total));
            for _ in 0..total {
                let anim = AnimWalker::read(reader)?;
                info.push_str(&format!(
                    "  Id: {} speed: {}\n",
                    anim.database_id, anim.speed
                ));
            }
        }

        PacketId::VehicleDoor => {
            if !show_all {
                return reader.skip(u64::from(size));
            }
            let total = reader.read_u16()?;
            if total > 0 {
                print_frame_once(info, frame, frame_printed);
            }
            info.push_str(&format!(" Vehicle door animations: {}\n", total));
            for _ in 0..total {
                let door = VehicleDoor::read(reader)?;
                info.push_str(&format!("  Id: {}\n", door.database_id));
                info.push_str("  Doors opened: ");
                if let Some(name) = door.door_name() {
                    info.push_str(&format!(" {} \n", name));
                }
            }
        }

        PacketId::VehicleLight => {
            if !show_all {
                return reader.skip(u64::from(size));
            }
            let total = reader.read_u16()?;
            if total > 0 {
                print_frame_once(info, frame, frame_printed);
            }
            info.push_str(&format!(" Vehicle light animations: {}\n", total));
            for _ in 0..total {
                let light = VehicleLight::read(reader)?;
                info.push_str(&format!(
                    "  Id: {} {}\n",
                    light.database_id,
                    light.enabled_lights()
                ));
            }
        }

        PacketId::SceneLight => {
            if !show_all {
                return reader.skip(u64::from(size));
            }
            let total = reader.read_u16()?;
            if total > 0 {
                print_frame_once(info, frame, frame_printed);
            }
            info.push_str(&format!(" Scene light changes: {}\n", total));
            for _ in 0..total {
                let light = SceneLight::read(reader)?;
                info.push_str(&format!(
                    "  Id: {} enabled: {} intensity: {} RGB_color: {}\n",
                    light.light_id,
                    if light.on != 0 { "True" } else { "False" },
                    light.intensity,
                    light.color
                ));
            }
        }

        PacketId::Kinematics => {
            if !show_all {
                return reader.skip(u64::from(size));
            }
            let total = reader.read_u16()?;
            if total > 0 {
                print_frame_once(info, frame, frame_printed);
            }
            info.push_str(&format!(" Dynamic actors: {}\n", total));
            for _ in 0..total {
                let kinematics = Kinematics::read(reader)?;
                info.push_str(&format!(
                    "  Id: {} linear_velocity: {} angular_velocity: {}\n",
                    kinematics.database_id,
                    kinematics.linear_velocity,
                    kinematics.angular_velocity
                ));
            }
        }

        PacketId::BoundingBox => {
            if !show_all {
                return reader.skip(u64::from(size));
            }
            let total = reader.read_u16()?;
            if total > 0 {
                print_frame_once(info, frame, frame_printed);
            }
            info.push_str(&format!(" Actor bounding boxes: {}\n", total));
            append_boxes(reader, total, info)?;
        }

        PacketId::TriggerVolume => {
            if !show_all {
                return reader.skip(u64::from(size));
            }
            let total = reader.read_u16()?;
            if total > 0 {
                print_frame_once(info, frame, frame_printed);
            }
            info.push_str(&format!(" Actor trigger volumes: {}\n", total));
            append_boxes(reader, total, info)?;
        }

        PacketId::PlatformTime => {
            if !show_all {
                return reader.skip(u64::from(size));
            }
            print_frame_once(info, frame, frame_printed);
            let time = PlatformTime::read(reader)?;
            info.push_str(&format!(" Current platform time: {}\n", time.time));
        }

        PacketId::PhysicsControl => {
            if !show_all {
                return reader.skip(u64::from(size));
            }
            let total = reader.read_u16()?;
            if total > 0 {
                print_frame_once(info, frame, frame_printed);
            }
            info.push_str(&format!(" Physics Control events: {}\n", total));
            for _ in 0..total {
                let control = PhysicsControl::read(reader)?;
                info.push_str(&control.to_string());
            }
        }

        PacketId::TrafficLightTime => {
            if !show_all {
                return reader.skip(u64::from(size));
            }
            let total = reader.read_u16()?;
            if total > 0 {
                print_frame_once(info, frame, frame_printed);
            }
            info.push_str(&format!(" Traffic Light time events: {}\n", total));
            for _ in 0..total {
                let time = TrafficLightTime::read(reader)?;
                info.push_str(&format!(
                    "  Id: {} green_time: {} yellow_time: {} red_time: {}\n",
                    time.database_id, time.green_time, time.yellow_time, time.red_time
                ));
            }
        }

        PacketId::WalkerBones => {
            if !show_all {
                return reader.skip(u64::from(size));
            }
            let total = reader.read_u16()?;
            if total > 0 {
                print_frame_once(info, frame, frame_printed);
            }
            info.push_str(&format!(" Walkers Bones: {}\n", total));
            for _ in 0..total {
                let bones = WalkerBones::read(reader)?;
                info.push_str(&format!("  Id: {}\n", bones.database_id));
                for bone in &bones.bones {
                    info.push_str(&format!(
                        "     Bone: \"{}\" relative: Loc({}, {}, {}) Rot({}, {}, {})\n",
                        bone.name,
                        bone.location.x,
                        bone.location.y,
                        bone.location.z,
                        bone.rotation.x,
                        bone.rotation.y,
                        bone.rotation.z
                    ));
                }
            }
            info.push('\n');
        }
    }

    Ok(())
}

fn append_boxes(reader: &mut RecordingReader, total: u16, info: &mut String) -> Result<()> {
    for _ in 0..total {
        let bbox = BoundingBox::read(reader)?;
        info.push_str(&format!(
            "  Id: {} origin: {} extension: {}\n",
            bbox.database_id, bbox.origin, bbox.extension
        ));
    }
    Ok(())
}
