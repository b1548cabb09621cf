use super::{Actuator, Sensors};
use crate::{Angle, Drivetrain, Gear};
use embedded_hal::digital::v2::OutputPin;
use log::warn;
use num_traits::Float;

/// Drivetrain built from odometry sensors, a motor group on each side, and a gear shifting solenoid.
///
/// The shifter pin is driven high in [`Gear::High`].
pub struct DifferentialDrive<S, L, R, G> {
    pub sensors: S,
    pub left: L,
    pub right: R,
    shifter: G,
    gear: Gear,
}

impl<S, L, R, G> DifferentialDrive<S, L, R, G>
where
    S: Sensors,
    L: Actuator,
    R: Actuator,
    G: OutputPin,
{
    /// Create a new drivetrain, shifting into low gear.
    pub fn new(sensors: S, left: L, right: R, shifter: G) -> Self {
        let mut drive = Self {
            sensors,
            left,
            right,
            shifter,
            gear: Gear::High,
        };
        drive.set_gear(Gear::Low);
        drive
    }

    /// Output to each side directly, in [-1, 1].
    pub fn tank(&mut self, left: f32, right: f32) {
        self.left.output(left.max(-1.).min(1.));
        self.right.output(right.max(-1.).min(1.));
    }
}

/// Mix a forward speed and turn rate into left and right outputs.
/// A positive turn drives the left side faster.
pub fn arcade(speed: f32, turn: f32) -> (f32, f32) {
    let speed = speed.max(-1.).min(1.);
    let turn = turn.max(-1.).min(1.);

    let max_input = Float::abs(speed).max(Float::abs(turn));
    let max_input = if speed >= 0. { max_input } else { -max_input };

    if speed >= 0. {
        if turn >= 0. {
            (max_input, speed - turn)
        } else {
            (speed + turn, max_input)
        }
    } else if turn >= 0. {
        (speed + turn, max_input)
    } else {
        (max_input, speed - turn)
    }
}

impl<S, L, R, G> Drivetrain for DifferentialDrive<S, L, R, G>
where
    S: Sensors,
    L: Actuator,
    R: Actuator,
    G: OutputPin,
{
    fn distance(&mut self) -> f32 {
        self.sensors.distance()
    }

    fn gyro_angle(&mut self) -> Angle {
        self.sensors.gyro_angle()
    }

    fn drive(&mut self, speed: f32, turn: f32) {
        let (left, right) = arcade(speed, turn);
        self.tank(left, right);
    }

    fn gear(&mut self) -> Gear {
        self.gear
    }

    fn set_gear(&mut self, gear: Gear) {
        let shifted = match gear {
            Gear::High => self.shifter.set_high(),
            Gear::Low => self.shifter.set_low(),
        };

        match shifted {
            Ok(()) => self.gear = gear,
            Err(_) => warn!("failed to shift into {:?}", gear),
        }
    }
}
