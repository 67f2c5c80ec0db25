//! Vehicle physics control codec.
//!
//! The largest record in the format: engine and transmission parameters,
//! response curves and a per-wheel parameter block. The `Display`
//! implementation renders the record in the report shape used by the info
//! query: every scalar on its own line, curves as `(x, y)` pairs, gear
//! ratios numbered from zero, one line per wheel.

use std::fmt;
use std::io::Read;

use super::error::Result;
use super::reader::{RecordReader, Vector3};

/// A sampled response curve of `(input, output)` points.
pub type Curve = Vec<(f32, f32)>;

fn read_curve<R: Read>(r: &mut RecordReader<R>) -> Result<Curve> {
    let total = r.read_u16()?;
    let mut points = Vec::with_capacity(total as usize);
    for _ in 0..total {
        points.push((r.read_f32()?, r.read_f32()?));
    }
    Ok(points)
}

fn read_ratios<R: Read>(r: &mut RecordReader<R>) -> Result<Vec<f32>> {
    let total = r.read_u16()?;
    let mut ratios = Vec::with_capacity(total as usize);
    for _ in 0..total {
        ratios.push(r.read_f32()?);
    }
    Ok(ratios)
}

#[derive(Debug, Clone)]
pub struct WheelPhysicsControl {
    pub axle_type: u8,
    pub offset: Vector3,
    pub wheel_radius: f32,
    pub wheel_width: f32,
    pub wheel_mass: f32,
    pub cornering_stiffness: f32,
    pub friction_force_multiplier: f32,
    pub side_slip_modifier: f32,
    pub slip_threshold: f32,
    pub skid_threshold: f32,
    pub max_steer_angle: f32,
    pub affected_by_steering: u8,
    pub affected_by_brake: u8,
    pub affected_by_handbrake: u8,
    pub affected_by_engine: u8,
    pub abs_enabled: u8,
    pub traction_control_enabled: u8,
    pub max_wheelspin_rotation: f32,
    pub external_torque_combine_method: u8,
    pub lateral_slip_graph: Curve,
    pub suspension_axis: Vector3,
    pub suspension_force_offset: Vector3,
    pub suspension_max_raise: f32,
    pub suspension_max_drop: f32,
    pub suspension_damping_ratio: f32,
    pub wheel_load_ratio: f32,
    pub spring_rate: f32,
    pub spring_preload: f32,
    pub suspension_smoothing: f32,
    pub rollbar_scaling: f32,
    pub sweep_shape: u8,
    pub sweep_type: u8,
    pub max_brake_torque: f32,
    pub max_hand_brake_torque: f32,
    pub wheel_index: u32,
    pub location: Vector3,
    pub old_location: Vector3,
    pub velocity: Vector3,
}

impl WheelPhysicsControl {
    fn read<R: Read>(r: &mut RecordReader<R>) -> Result<WheelPhysicsControl> {
        Ok(WheelPhysicsControl {
            axle_type: r.read_u8()?,
            offset: r.read_vector3()?,
            wheel_radius: r.read_f32()?,
            wheel_width: r.read_f32()?,
            wheel_mass: r.read_f32()?,
            cornering_stiffness: r.read_f32()?,
            friction_force_multiplier: r.read_f32()?,
            side_slip_modifier: r.read_f32()?,
            slip_threshold: r.read_f32()?,
            skid_threshold: r.read_f32()?,
            max_steer_angle: r.read_f32()?,
            affected_by_steering: r.read_u8()?,
            affected_by_brake: r.read_u8()?,
            affected_by_handbrake: r.read_u8()?,
            affected_by_engine: r.read_u8()?,
            abs_enabled: r.read_u8()?,
            traction_control_enabled: r.read_u8()?,
            max_wheelspin_rotation: r.read_f32()?,
            external_torque_combine_method: r.read_u8()?,
            lateral_slip_graph: read_curve(r)?,
            suspension_axis: r.read_vector3()?,
            suspension_force_offset: r.read_vector3()?,
            suspension_max_raise: r.read_f32()?,
            suspension_max_drop: r.read_f32()?,
            suspension_damping_ratio: r.read_f32()?,
            wheel_load_ratio: r.read_f32()?,
            spring_rate: r.read_f32()?,
            spring_preload: r.read_f32()?,
            suspension_smoothing: r.read_f32()?,
            rollbar_scaling: r.read_f32()?,
            sweep_shape: r.read_u8()?,
            sweep_type: r.read_u8()?,
            max_brake_torque: r.read_f32()?,
            max_hand_brake_torque: r.read_f32()?,
            wheel_index: r.read_u32()?,
            location: r.read_vector3()?,
            old_location: r.read_vector3()?,
            velocity: r.read_vector3()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PhysicsControl {
    pub database_id: u32,
    pub max_torque: f32,
    pub max_rpm: f32,
    pub moi: f32,
    pub rev_down_rate: f32,
    pub differential_type: u8,
    pub front_rear_split: f32,
    pub use_gear_auto_box: u8,
    pub gear_change_time: f32,
    pub final_ratio: f32,
    pub change_up_rpm: f32,
    pub change_down_rpm: f32,
    pub transmission_efficiency: f32,
    pub mass: f32,
    pub drag_coefficient: f32,
    pub center_of_mass: Vector3,
    pub torque_curve: Curve,
    pub steering_curve: Curve,
    pub forward_gear_ratios: Vec<f32>,
    pub reverse_gear_ratios: Vec<f32>,
    pub wheels: Vec<WheelPhysicsControl>,
}

impl PhysicsControl {
    pub fn read<R: Read>(r: &mut RecordReader<R>) -> Result<PhysicsControl> {
        let database_id = r.read_u32()?;
        let max_torque = r.read_f32()?;
        let max_rpm = r.read_f32()?;
        let moi = r.read_f32()?;
        let rev_down_rate = r.read_f32()?;
        let differential_type = r.read_u8()?;
        let front_rear_split = r.read_f32()?;
        let use_gear_auto_box = r.read_u8()?;
        let gear_change_time = r.read_f32()?;
        let final_ratio = r.read_f32()?;
        let change_up_rpm = r.read_f32()?;
        let change_down_rpm = r.read_f32()?;
        let transmission_efficiency = r.read_f32()?;
        let mass = r.read_f32()?;
        let drag_coefficient = r.read_f32()?;
        let center_of_mass = r.read_vector3()?;
        let torque_curve = read_curve(r)?;
        let steering_curve = read_curve(r)?;
        let forward_gear_ratios = read_ratios(r)?;
        let reverse_gear_ratios = read_ratios(r)?;
        let total_wheels = r.read_u16()?;
        let mut wheels = Vec::with_capacity(total_wheels as usize);
        for _ in 0..total_wheels {
            wheels.push(WheelPhysicsControl::read(r)?);
        }
        Ok(PhysicsControl {
            database_id,
            max_torque,
            max_rpm,
            moi,
            rev_down_rate,
            differential_type,
            front_rear_split,
            use_gear_auto_box,
            gear_change_time,
            final_ratio,
            change_up_rpm,
            change_down_rpm,
            transmission_efficiency,
            mass,
            drag_coefficient,
            center_of_mass,
            torque_curve,
            steering_curve,
            forward_gear_ratios,
            reverse_gear_ratios,
            wheels,
        })
    }
}

fn fmt_graph(curve: &Curve) -> String {
    let mut out = String::from("[");
    for (x, y) in curve {
        out.push_str(&format!("({}, {}),", x, y));
    }
    out.push(']');
    out
}

impl fmt::Display for PhysicsControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Id: {}", self.database_id)?;
        writeln!(f, "   max_torque = {}", self.max_torque)?;
        writeln!(f, "   max_rpm = {}", self.max_rpm)?;
        writeln!(f, "   MOI = {}", self.moi)?;
        writeln!(f, "   rev_down_rate = {}", self.rev_down_rate)?;
        writeln!(f, "   differential_type = {}", self.differential_type)?;
        writeln!(f, "   front_rear_split = {}", self.front_rear_split)?;
        writeln!(
            f,
            "   use_gear_auto_box = {}",
            if self.use_gear_auto_box != 0 { "true" } else { "false" }
        )?;
        writeln!(f, "   gear_change_time = {}", self.gear_change_time)?;
        writeln!(f, "   final_ratio = {}", self.final_ratio)?;
        writeln!(f, "   change_up_rpm = {}", self.change_up_rpm)?;
        writeln!(f, "   change_down_rpm = {}", self.change_down_rpm)?;
        writeln!(
            f,
            "   transmission_efficiency = {}",
            self.transmission_efficiency
        )?;
        writeln!(f, "   mass = {}", self.mass)?;
        writeln!(f, "   drag_coefficient = {}", self.drag_coefficient)?;
        writeln!(f, "   center_of_mass = {}", self.center_of_mass)?;
        write!(f, "   torque_curve =")?;
        for (x, y) in &self.torque_curve {
            write!(f, " ({}, {})", x, y)?;
        }
        writeln!(f)?;
        write!(f, "   steering_curve =")?;
        for (x, y) in &self.steering_curve {
            write!(f, " ({}, {})", x, y)?;
        }
        writeln!(f)?;
        writeln!(f, "   forward_gear_ratios:")?;
        for (gear, ratio) in self.forward_gear_ratios.iter().enumerate() {
            writeln!(f, "    gear {}: ratio {}", gear, ratio)?;
        }
        writeln!(f, "   reverse_gear_ratios:")?;
        for (gear, ratio) in self.reverse_gear_ratios.iter().enumerate() {
            writeln!(f, "    gear {}: ratio {}", gear, ratio)?;
        }
        write!(f, "   wheels:")?;
        for (index, wheel) in self.wheels.iter().enumerate() {
            write!(
                f,
                "\nwheel #{}:\n \
                 axle_type: {} \
                 offset: {} \
                 wheel_radius: {} \
                 wheel_width: {} \
                 wheel_mass: {} \
                 cornering_stiffness: {} \
                 friction_force_multiplier: {} \
                 side_slip_modifier: {} \
                 slip_threshold: {} \
                 skid_threshold: {} \
                 max_steer_angle: {} \
                 affected_by_steering: {} \
                 affected_by_brake: {} \
                 affected_by_handbrake: {} \
                 affected_by_engine: {} \
                 abs_enabled: {} \
                 traction_control_enabled: {} \
                 max_wheelspin_rotation: {} \
                 external_torque_combine_method: {} \
                 lateral_slip_graph: {} \
                 suspension_axis: {} \
                 suspension_force_offset: {} \
                 suspension_max_raise: {} \
                 suspension_max_drop: {} \
                 suspension_damping_ratio: {} \
                 wheel_load_ratio: {} \
                 spring_rate: {} \
                 spring_preload: {} \
                 suspension_smoothing: {} \
                 rollbar_scaling: {} \
                 sweep_shape: {} \
                 sweep_type: {} \
                 max_brake_torque: {} \
                 max_hand_brake_torque: {} \
                 wheel_index: {} \
                 location: {} \
                 old_location: {} \
                 velocity: {}",
                index,
                wheel.axle_type,
                wheel.offset,
                wheel.wheel_radius,
                wheel.wheel_width,
                wheel.wheel_mass,
                wheel.cornering_stiffness,
                wheel.friction_force_multiplier,
                wheel.side_slip_modifier,
                wheel.slip_threshold,
                wheel.skid_threshold,
                wheel.max_steer_angle,
                wheel.affected_by_steering,
                wheel.affected_by_brake,
                wheel.affected_by_handbrake,
                wheel.affected_by_engine,
                wheel.abs_enabled,
                wheel.traction_control_enabled,
                wheel.max_wheelspin_rotation,
                wheel.external_torque_combine_method,
                fmt_graph(&wheel.lateral_slip_graph),
                wheel.suspension_axis,
                wheel.suspension_force_offset,
                wheel.suspension_max_raise,
                wheel.suspension_max_drop,
                wheel.suspension_damping_ratio,
                wheel.wheel_load_ratio,
                wheel.spring_rate,
                wheel.spring_preload,
                wheel.suspension_smoothing,
                wheel.rollbar_scaling,
                wheel.sweep_shape,
                wheel.sweep_type,
                wheel.max_brake_torque,
                wheel.max_hand_brake_torque,
                wheel.wheel_index,
                wheel.location,
                wheel.old_location,
                wheel.velocity,
            )?;
        }
        writeln!(f)
    }
}
