use crate::filter::Filter;
use alloc::boxed::Box;
use num_traits::Float;

/// Proportional, integral, and derivative gains.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gains {
    pub p: f32,
    pub i: f32,
    pub d: f32,
}

impl Gains {
    pub const fn new(p: f32, i: f32, d: f32) -> Self {
        Self { p, i, d }
    }
}

/// A feedback controller driven by a scalar error.
pub trait Controller {
    /// Advance the controller by one tick and return its output.
    fn update(&mut self, error: f32) -> f32;

    /// The most recent (filtered) error.
    fn error(&self) -> f32;

    /// Rate of change of the error per second.
    fn velocity(&self) -> f32;

    /// The most recent (filtered) output.
    fn output(&self) -> f32;

    fn set_error_filter(&mut self, filter: Box<dyn Filter>);

    fn set_output_filter(&mut self, filter: Box<dyn Filter>);

    /// Clear the error history and any accumulated state.
    fn reset(&mut self) {}

    /// Replace the gains without resetting accumulated state.
    /// Controllers that can't be tuned ignore this.
    fn set_gains(&mut self, _gains: Gains) {}

    /// Returns `true` if the error is within `tolerance`.
    fn is_done(&self, tolerance: f32) -> bool {
        Float::abs(self.error()) <= tolerance
    }

    /// Returns `true` if the error is within `tolerance` and no longer changing faster than `velocity_tolerance`.
    fn is_done_with_velocity(&self, tolerance: f32, velocity_tolerance: f32) -> bool {
        self.is_done(tolerance) && Float::abs(self.velocity()) <= velocity_tolerance
    }
}

/// PID controller with optional error and output filters.
pub struct PidController {
    pub gains: Gains,
    /// Timestep in seconds
    pub dt: f32,
    error: f32,
    velocity: f32,
    integral: f32,
    output: f32,
    has_error: bool,
    error_filter: Option<Box<dyn Filter>>,
    output_filter: Option<Box<dyn Filter>>,
}

impl PidController {
    pub fn new(gains: Gains, dt: f32) -> Self {
        Self {
            gains,
            dt,
            error: 0.,
            velocity: 0.,
            integral: 0.,
            output: 0.,
            has_error: false,
            error_filter: None,
            output_filter: None,
        }
    }

    pub fn integral(&self) -> f32 {
        self.integral
    }
}

impl Controller for PidController {
    fn update(&mut self, error: f32) -> f32 {
        let error = match &mut self.error_filter {
            Some(filter) => filter.filter(error),
            None => error,
        };

        // The first error has no history to differentiate against
        self.velocity = if self.has_error && self.dt > 0. {
            (error - self.error) / self.dt
        } else {
            0.
        };
        self.error = error;
        self.has_error = true;

        self.integral += error * self.dt;

        let output = self.gains.p * error + self.gains.i * self.integral + self.gains.d * self.velocity;
        self.output = match &mut self.output_filter {
            Some(filter) => filter.filter(output),
            None => output,
        };
        self.output
    }

    fn error(&self) -> f32 {
        self.error
    }

    fn velocity(&self) -> f32 {
        self.velocity
    }

    fn output(&self) -> f32 {
        self.output
    }

    fn set_error_filter(&mut self, filter: Box<dyn Filter>) {
        self.error_filter = Some(filter);
    }

    fn set_output_filter(&mut self, filter: Box<dyn Filter>) {
        self.output_filter = Some(filter);
    }

    fn reset(&mut self) {
        self.error = 0.;
        self.velocity = 0.;
        self.integral = 0.;
        self.output = 0.;
        self.has_error = false;
    }

    fn set_gains(&mut self, gains: Gains) {
        self.gains = gains;
    }
}
