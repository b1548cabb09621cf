use crate::Angle;

/// Mechanical reduction of the drivetrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gear {
    Low,
    High,
}

/// A differential drivetrain with odometry.
///
/// Positive turn rates increase the gyro angle.
pub trait Drivetrain {
    /// Signed distance traveled since the last reset (in feet).
    fn distance(&mut self) -> f32;

    /// Current heading relative to the last reset.
    fn gyro_angle(&mut self) -> Angle;

    /// Drive for one tick with a forward speed and turn rate, both in [-1, 1].
    fn drive(&mut self, speed: f32, turn: f32);

    fn gear(&mut self) -> Gear;

    fn set_gear(&mut self, gear: Gear);

    fn stop(&mut self) {
        self.drive(0., 0.)
    }
}

impl<T: Drivetrain + ?Sized> Drivetrain for &mut T {
    fn distance(&mut self) -> f32 {
        (**self).distance()
    }

    fn gyro_angle(&mut self) -> Angle {
        (**self).gyro_angle()
    }

    fn drive(&mut self, speed: f32, turn: f32) {
        (**self).drive(speed, turn)
    }

    fn gear(&mut self) -> Gear {
        (**self).gear()
    }

    fn set_gear(&mut self, gear: Gear) {
        (**self).set_gear(gear)
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}
