use super::Aligner;
use crate::Angle;

/// Illumination mode of a vision camera's targeting light.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightMode {
    /// Let the camera's pipeline decide.
    Pipeline,
    ForceOff,
    ForceBlink,
    ForceOn,
}

pub trait TargetingLight {
    fn set_light_mode(&mut self, mode: LightMode);
}

impl<T: TargetingLight + ?Sized> TargetingLight for &mut T {
    fn set_light_mode(&mut self, mode: LightMode) {
        (**self).set_light_mode(mode)
    }
}

/// A vision camera that tracks a goal.
pub trait Targeting: TargetingLight {
    /// Returns `true` if a goal is in view.
    fn has_target(&mut self) -> bool;

    /// Heading change that points the robot at the goal.
    fn horizontal_offset(&mut self) -> Angle;

    /// Distance from the robot to the goal (in feet).
    fn target_distance(&mut self) -> f32;
}

/// Aligns the robot at a fixed distance from a vision target.
///
/// With no target in view the robot holds still.
/// The camera's light is forced on while aligning and off once the alignment ends.
pub struct GoalAligner<T> {
    pub camera: T,
    /// Distance to stop away from the goal (in feet).
    pub goal_distance: f32,
}

impl<T: Targeting> GoalAligner<T> {
    pub fn new(camera: T, goal_distance: f32) -> Self {
        Self {
            camera,
            goal_distance,
        }
    }
}

impl<D, T: Targeting> Aligner<D> for GoalAligner<T> {
    fn init(&mut self, _drivetrain: &mut D) {
        self.camera.set_light_mode(LightMode::ForceOn);
    }

    fn speed_error(&mut self, _drivetrain: &mut D) -> f32 {
        if self.camera.has_target() {
            self.camera.target_distance() - self.goal_distance
        } else {
            0.
        }
    }

    fn angle_error(&mut self, _drivetrain: &mut D) -> Angle {
        if self.camera.has_target() {
            self.camera.horizontal_offset()
        } else {
            Angle::zero()
        }
    }

    fn end(&mut self, _drivetrain: &mut D) {
        self.camera.set_light_mode(LightMode::ForceOff);
    }
}
