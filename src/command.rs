//! The tick contract between a periodic scheduler and the commands it runs.
//!
//! A scheduler calls [`Command::initialize`] once, then [`Command::execute`] followed by
//! [`Command::is_finished`] every tick until the command finishes or is interrupted.
//! [`Command::end`] runs exactly once in either case.

use crate::Drivetrain;
use core::convert::Infallible;

pub trait Command {
    type Error;

    fn initialize(&mut self) -> Result<(), Self::Error>;

    fn execute(&mut self) -> Result<(), Self::Error>;

    fn is_finished(&mut self) -> Result<bool, Self::Error>;

    /// Clean up after finishing or being interrupted.
    fn end(&mut self, interrupted: bool);
}

impl<T: Command + ?Sized> Command for &mut T {
    type Error = T::Error;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        (**self).initialize()
    }

    fn execute(&mut self) -> Result<(), Self::Error> {
        (**self).execute()
    }

    fn is_finished(&mut self) -> Result<bool, Self::Error> {
        (**self).is_finished()
    }

    fn end(&mut self, interrupted: bool) {
        (**self).end(interrupted)
    }
}

/// How a command stopped running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The command finished on its own after this many ticks.
    Finished { ticks: usize },
    /// The command was interrupted after running out of ticks.
    Interrupted { ticks: usize },
}

impl Outcome {
    pub fn is_finished(&self) -> bool {
        matches!(self, Outcome::Finished { .. })
    }

    pub fn ticks(&self) -> usize {
        match *self {
            Outcome::Finished { ticks } | Outcome::Interrupted { ticks } => ticks,
        }
    }
}

/// Run a command for at most `max_ticks` ticks, interrupting it if it hasn't finished by then.
///
/// `on_tick` is called after each `execute`, before checking if the command is finished.
/// [`Command::end`] is called on every exit path, including errors.
pub fn run<C, F>(command: &mut C, max_ticks: usize, mut on_tick: F) -> Result<Outcome, C::Error>
where
    C: Command + ?Sized,
    F: FnMut(&mut C),
{
    match run_ticks(command, max_ticks, &mut on_tick) {
        Ok(Some(ticks)) => {
            command.end(false);
            Ok(Outcome::Finished { ticks })
        }
        Ok(None) => {
            command.end(true);
            Ok(Outcome::Interrupted { ticks: max_ticks })
        }
        Err(error) => {
            command.end(true);
            Err(error)
        }
    }
}

fn run_ticks<C, F>(command: &mut C, max_ticks: usize, on_tick: &mut F) -> Result<Option<usize>, C::Error>
where
    C: Command + ?Sized,
    F: FnMut(&mut C),
{
    command.initialize()?;

    for tick in 1..=max_ticks {
        command.execute()?;
        on_tick(command);

        if command.is_finished()? {
            return Ok(Some(tick));
        }
    }

    Ok(None)
}

/// Stops the drivetrain and finishes immediately.
pub struct StopCommand<D> {
    pub drivetrain: D,
}

impl<D: Drivetrain> StopCommand<D> {
    pub fn new(drivetrain: D) -> Self {
        Self { drivetrain }
    }
}

impl<D: Drivetrain> Command for StopCommand<D> {
    type Error = Infallible;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn execute(&mut self) -> Result<(), Self::Error> {
        self.drivetrain.stop();
        Ok(())
    }

    fn is_finished(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn end(&mut self, _interrupted: bool) {}
}
