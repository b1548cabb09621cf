//! Kinematic model of a differential drivetrain.

use crate::{Angle, Drivetrain, Gear};
use nalgebra::Vector2;
use num_traits::Float;

/// Simulated drivetrain that integrates each drive command over one tick.
#[derive(Clone, Debug)]
pub struct SimDrivetrain {
    /// Top speed in low gear (feet/second).
    pub low_gear_speed: f32,
    /// Top speed in high gear (feet/second).
    pub high_gear_speed: f32,
    /// Top turn rate (degrees/second).
    pub max_turn_rate: f32,
    /// Time-step in seconds.
    pub dt: f32,
    distance: f32,
    heading: Angle,
    position: Vector2<f32>,
    gear: Gear,
    last_command: (f32, f32),
    commands: usize,
}

impl Default for SimDrivetrain {
    fn default() -> Self {
        Self {
            low_gear_speed: 8.,
            high_gear_speed: 16.,
            max_turn_rate: 180.,
            dt: 0.02,
            distance: 0.,
            heading: Angle::zero(),
            position: Vector2::zeros(),
            gear: Gear::High,
            last_command: (0., 0.),
            commands: 0,
        }
    }
}

impl SimDrivetrain {
    /// Start from a distance and heading.
    pub fn at(distance: f32, heading: Angle) -> Self {
        Self {
            distance,
            heading,
            ..Self::default()
        }
    }

    /// Field position (in feet) relative to the start.
    pub fn position(&self) -> Vector2<f32> {
        self.position
    }

    /// The last `(speed, turn)` command, after limiting to [-1, 1].
    pub fn last_command(&self) -> (f32, f32) {
        self.last_command
    }

    /// Number of drive commands received.
    pub fn commands(&self) -> usize {
        self.commands
    }

    /// Move the robot without a drive command, as if pushed.
    pub fn displace(&mut self, distance: f32, turn: Angle) {
        self.advance(distance);
        self.heading = self.heading + turn;
    }

    fn advance(&mut self, distance: f32) {
        let heading = self.heading.to_radians();
        self.position += Vector2::new(Float::cos(heading), Float::sin(heading)) * distance;
        self.distance += distance;
    }
}

impl Drivetrain for SimDrivetrain {
    fn distance(&mut self) -> f32 {
        self.distance
    }

    fn gyro_angle(&mut self) -> Angle {
        self.heading
    }

    fn drive(&mut self, speed: f32, turn: f32) {
        let speed = speed.max(-1.).min(1.);
        let turn = turn.max(-1.).min(1.);
        self.last_command = (speed, turn);
        self.commands += 1;

        let top_speed = match self.gear {
            Gear::Low => self.low_gear_speed,
            Gear::High => self.high_gear_speed,
        };
        self.advance(speed * top_speed * self.dt);
        self.heading = self.heading + Angle::degrees(turn * self.max_turn_rate * self.dt);
    }

    fn gear(&mut self) -> Gear {
        self.gear
    }

    fn set_gear(&mut self, gear: Gear) {
        self.gear = gear;
    }
}
