//! Elapsed time tracking on top of an [`embedded_time::Clock`].

use crate::Error;
use embedded_time::{duration::Microseconds, Clock, Instant};

/// Measures the time since it was last reset.
///
/// The stopwatch does not own a clock, so several stopwatches can share the controller's clock.
pub struct Stopwatch<C: Clock> {
    start: Option<Instant<C>>,
}

impl<C: Clock> Default for Stopwatch<C> {
    fn default() -> Self {
        Self { start: None }
    }
}

impl<C> Stopwatch<C>
where
    C: Clock<T = u32>,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart the stopwatch at the current time.
    pub fn reset(&mut self, clock: &C) -> Result<(), Error> {
        self.start = Some(clock.try_now()?);
        Ok(())
    }

    /// Time in seconds since the last reset.
    /// A stopwatch that was never reset reports zero.
    pub fn elapsed(&self, clock: &C) -> Result<f32, Error> {
        let start = match &self.start {
            Some(start) => start,
            None => return Ok(0.),
        };

        let now = clock.try_now()?;
        let duration = now
            .checked_duration_since(start)
            .ok_or(Error::NonMonotonic)?;
        let micros = Microseconds::<u32>::try_from(duration)?;

        Ok(micros.0 as f32 / 1_000_000.)
    }
}
