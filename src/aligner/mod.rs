//! Error sources for the [`AlignmentController`](crate::AlignmentController).
//!
//! An [`Aligner`] reports how far the robot still has to drive and turn.
//! Every method has a zero-error default, so an empty implementation holds the robot in place.

use crate::Angle;

mod goal;
pub use goal::{GoalAligner, LightMode, Targeting, TargetingLight};
#[cfg(test)]
pub(crate) use goal::tests::TestCamera;

mod movement;
pub use movement::MoveAligner;

pub trait Aligner<D> {
    /// Called once when the controller initializes.
    fn init(&mut self, _drivetrain: &mut D) {}

    /// Remaining distance to drive (in feet).
    fn speed_error(&mut self, _drivetrain: &mut D) -> f32 {
        0.
    }

    /// Remaining heading change.
    fn angle_error(&mut self, _drivetrain: &mut D) -> Angle {
        Angle::zero()
    }

    /// Called once when the controller ends, whether it converged or was interrupted.
    fn end(&mut self, _drivetrain: &mut D) {}
}

impl<D, A: Aligner<D> + ?Sized> Aligner<D> for &mut A {
    fn init(&mut self, drivetrain: &mut D) {
        (**self).init(drivetrain)
    }

    fn speed_error(&mut self, drivetrain: &mut D) -> f32 {
        (**self).speed_error(drivetrain)
    }

    fn angle_error(&mut self, drivetrain: &mut D) -> Angle {
        (**self).angle_error(drivetrain)
    }

    fn end(&mut self, drivetrain: &mut D) {
        (**self).end(drivetrain)
    }
}

/// Holds the robot where it is.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoldAligner;

impl<D> Aligner<D> for HoldAligner {}
