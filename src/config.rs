//! Tunable parameters of the alignment controller.

use crate::Gains;
use num_traits::Float;

/// Settings for one axis (speed or angle) of the alignment controller.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisConfig {
    pub gains: Gains,
    /// Time constant (in seconds) of the low pass filter on the error.
    pub in_smooth: f32,
    /// Time constant (in seconds) of the low pass filter on the output.
    pub out_smooth: f32,
    /// Largest error accepted as aligned.
    pub max_error: f32,
    /// Largest rate of change of the error (per second) accepted as aligned.
    pub max_velocity: f32,
    /// Multiplier on `max_error` used in continuous mode.
    pub continuous_scale: f32,
}

impl AxisConfig {
    pub fn continuous_error(&self) -> f32 {
        self.max_error * self.continuous_scale
    }
}

/// Forward speed throttling as the robot turns away from its target heading.
///
/// The scale factor is `offset - |angle error| / angle.max_error`, limited to [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThrottleCurve {
    pub offset: f32,
}

impl ThrottleCurve {
    pub fn scale(&self, angle_error: f32, max_angle_error: f32) -> f32 {
        let factor = self.offset - Float::abs(angle_error) / max_angle_error;
        factor.max(0.).min(1.)
    }
}

impl Default for ThrottleCurve {
    fn default() -> Self {
        Self { offset: 1.5 }
    }
}

/// Parameters shared by every alignment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentConfig {
    /// Time-step of the control loop in seconds.
    pub period: f32,
    /// Distance axis, in feet.
    pub speed: AxisConfig,
    /// Heading axis, in degrees.
    pub angle: AxisConfig,
    pub throttle: ThrottleCurve,
    /// Seconds between target refreshes in interpolation mode.
    pub interpolation_period: f32,
    /// Seconds an alignment runs before it may finish in minimum time mode.
    pub min_alignment_time: f32,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            period: 0.02,
            speed: AxisConfig {
                gains: Gains::new(0.6, 0., 0.05),
                in_smooth: 0.04,
                out_smooth: 0.04,
                max_error: 0.1,
                max_velocity: 0.2,
                continuous_scale: 2.5,
            },
            angle: AxisConfig {
                gains: Gains::new(0.03, 0., 0.002),
                in_smooth: 0.02,
                out_smooth: 0.06,
                max_error: 3.,
                max_velocity: 5.,
                continuous_scale: 1.5,
            },
            throttle: ThrottleCurve::default(),
            interpolation_period: 0.5,
            min_alignment_time: 1.,
        }
    }
}

/// Behavior switches chosen before an alignment starts.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentFlags {
    /// Largest forward speed command, in [0, 1].
    pub max_speed: f32,
    /// Never finish; the alignment only ends when cancelled.
    pub never_finish: bool,
    /// Finish with relaxed tolerances and no velocity check.
    pub continuous: bool,
    /// Don't finish before [`AlignmentConfig::min_alignment_time`].
    pub min_time: bool,
    /// Track targets against the drivetrain's odometry, refreshing them from the aligner periodically.
    pub use_interpolation: bool,
}

impl Default for AlignmentFlags {
    fn default() -> Self {
        Self {
            max_speed: 1.,
            never_finish: false,
            continuous: false,
            min_time: false,
            use_interpolation: false,
        }
    }
}

/// Source of live-tuned gains, queried once per tick.
pub trait Tuning {
    fn speed_gains(&mut self) -> Option<Gains> {
        None
    }

    fn angle_gains(&mut self) -> Option<Gains> {
        None
    }
}

impl Tuning for () {}

impl<T: Tuning + ?Sized> Tuning for &mut T {
    fn speed_gains(&mut self) -> Option<Gains> {
        (**self).speed_gains()
    }

    fn angle_gains(&mut self) -> Option<Gains> {
        (**self).angle_gains()
    }
}
