use crate::Angle;

mod differential;
pub use differential::{arcade, DifferentialDrive};

pub mod motor;
pub use motor::PwmMotor;

pub trait Actuator {
    /// Output a percentage in [-1, 1].
    fn output(&mut self, output: f32);
}

impl<T: Actuator + ?Sized> Actuator for &mut T {
    fn output(&mut self, output: f32) {
        (**self).output(output)
    }
}

/// Odometry sensors of a drivetrain.
pub trait Sensors {
    /// Signed distance traveled since the last reset (in feet).
    fn distance(&mut self) -> f32;

    /// Current heading relative to the last reset.
    fn gyro_angle(&mut self) -> Angle;
}
