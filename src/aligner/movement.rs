use super::Aligner;
use crate::{Angle, Drivetrain};

/// Turns then drives a fixed amount, measured from the drivetrain's encoders and gyro.
///
/// Goals are captured on [`Aligner::init`] relative to where the robot is at that moment.
/// Turning and driving in one movement works, but each disturbs the other's measurement,
/// so routines usually split a movement into a turn followed by a drive.
#[derive(Clone, Copy, Debug)]
pub struct MoveAligner {
    angle: Angle,
    distance: f32,
    just_turning: bool,
    goal_angle: Angle,
    goal_distance: f32,
}

impl MoveAligner {
    /// Turn by `angle` then drive `distance` feet.
    pub fn new(angle: Angle, distance: f32) -> Self {
        Self {
            angle,
            distance,
            just_turning: false,
            goal_angle: angle,
            goal_distance: distance,
        }
    }

    /// Turn in place by `angle`, never correcting distance.
    pub fn turn(angle: Angle) -> Self {
        Self {
            just_turning: true,
            ..Self::new(angle, 0.)
        }
    }

    /// Drive straight `distance` feet.
    pub fn drive(distance: f32) -> Self {
        Self::new(Angle::zero(), distance)
    }

    pub fn goal_angle(&self) -> Angle {
        self.goal_angle
    }

    pub fn goal_distance(&self) -> f32 {
        self.goal_distance
    }

    pub fn is_just_turning(&self) -> bool {
        self.just_turning
    }
}

impl<D: Drivetrain> Aligner<D> for MoveAligner {
    fn init(&mut self, drivetrain: &mut D) {
        self.goal_angle = drivetrain.gyro_angle() + self.angle;
        self.goal_distance = drivetrain.distance() + self.distance;
    }

    fn speed_error(&mut self, drivetrain: &mut D) -> f32 {
        if self.just_turning {
            0.
        } else {
            self.goal_distance - drivetrain.distance()
        }
    }

    fn angle_error(&mut self, drivetrain: &mut D) -> Angle {
        self.goal_angle - drivetrain.gyro_angle()
    }
}
