//! Stream filters applied to a scalar signal once per tick.

use alloc::{boxed::Box, vec::Vec};
use num_traits::Float;

/// A stateful transform of a scalar signal.
///
/// Filters keep history between calls, so they must be applied exactly once per tick.
pub trait Filter {
    fn filter(&mut self, sample: f32) -> f32;
}

impl<F> Filter for F
where
    F: FnMut(f32) -> f32,
{
    fn filter(&mut self, sample: f32) -> f32 {
        self(sample)
    }
}

/// First order low pass filter with a time constant (in seconds).
pub struct LowPassFilter {
    output: f32,
    alpha: f32,
    is_initialised: bool,
}

impl LowPassFilter {
    /// Create a filter with time constant `rc` running every `dt` seconds.
    /// A non-positive time constant passes samples through unchanged.
    pub fn new(rc: f32, dt: f32) -> Self {
        Self {
            output: 0.,
            alpha: alpha(dt, rc),
            is_initialised: false,
        }
    }

    pub fn output(&self) -> f32 {
        self.output
    }

    pub fn reset(&mut self, value: f32) {
        self.is_initialised = true;
        self.output = value;
    }
}

impl Filter for LowPassFilter {
    fn filter(&mut self, sample: f32) -> f32 {
        // The first sample seeds the output so the filter doesn't ramp up from zero
        self.output = if self.is_initialised {
            self.output + (sample - self.output) * self.alpha
        } else {
            self.is_initialised = true;
            sample
        };
        self.output
    }
}

/// Smoothing factor of a low pass filter with time constant `rc` sampled every `dt` seconds.
pub fn alpha(dt: f32, rc: f32) -> f32 {
    if rc <= 0. || dt <= 0. {
        return 1.;
    }

    (dt / (dt + rc)).min(1.).max(0.)
}

/// Limits the magnitude of a signal.
#[derive(Clone, Copy, Debug)]
pub struct Clamp {
    pub limit: f32,
}

impl Clamp {
    pub fn new(limit: f32) -> Self {
        Self {
            limit: Float::abs(limit),
        }
    }
}

impl Filter for Clamp {
    fn filter(&mut self, sample: f32) -> f32 {
        sample.max(-self.limit).min(self.limit)
    }
}

/// Filters applied in order, each one receiving the output of the last.
#[derive(Default)]
pub struct FilterGroup {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to append a filter and return `self`
    pub fn then<F: Filter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Filter for FilterGroup {
    fn filter(&mut self, sample: f32) -> f32 {
        self.filters
            .iter_mut()
            .fold(sample, |value, filter| filter.filter(value))
    }
}
