//! Dual PID alignment of a drivetrain onto the targets reported by an [`Aligner`].

use crate::aligner::{LightMode, TargetingLight};
use crate::filter::{Clamp, FilterGroup, LowPassFilter};
use crate::{
    Aligner, AlignmentConfig, AlignmentFlags, Angle, Command, Controller, Drivetrain, Error, Gear,
    MoveAligner, PidController, Stopwatch, Tuning,
};
use alloc::boxed::Box;
use embedded_time::Clock;
use log::{debug, info, trace, warn};

/// Lifecycle of an [`AlignmentController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Idle,
    Initializing,
    Running,
    Converged,
    Cancelled,
}

/// Snapshot of the controller's last tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Info {
    pub target_distance: f32,
    pub target_angle: Angle,
    /// Remaining distance before filtering (in feet).
    pub speed_error: f32,
    /// Remaining heading change before filtering.
    pub angle_error: Angle,
    /// Forward speed multiplier from the throttle curve.
    pub speed_scale: f32,
    /// Commanded forward speed.
    pub speed: f32,
    /// Commanded turn rate.
    pub turn: f32,
}

/// Drives a drivetrain until the speed and angle errors of an [`Aligner`] converge.
///
/// Each tick the speed and angle errors run through a PID controller with smoothed inputs and outputs.
/// Forward speed is throttled by the angle error so the robot doesn't drive fast while facing the wrong way.
///
/// With [`AlignmentFlags::use_interpolation`] the aligner is only sampled every
/// [`AlignmentConfig::interpolation_period`] to set absolute targets,
/// and the errors in between are measured against the drivetrain's odometry.
pub struct AlignmentController<D, A, C: Clock, P = PidController> {
    drivetrain: D,
    aligner: A,
    clock: C,
    speed: P,
    angle: P,
    config: AlignmentConfig,
    flags: AlignmentFlags,
    tuning: Option<Box<dyn Tuning>>,
    light: Option<Box<dyn TargetingLight>>,
    target_distance: f32,
    target_angle: Angle,
    timer: Stopwatch<C>,
    polling_timer: Stopwatch<C>,
    state: State,
    info: Info,
    reported_invalid_error: bool,
}

impl<D, A, C> AlignmentController<D, A, C>
where
    D: Drivetrain,
    A: Aligner<D>,
    C: Clock<T = u32>,
{
    /// Create a controller with PID controllers built from `config`.
    pub fn new(
        drivetrain: D,
        aligner: A,
        clock: C,
        config: AlignmentConfig,
        flags: AlignmentFlags,
    ) -> Self {
        let speed = PidController::new(config.speed.gains, config.period);
        let angle = PidController::new(config.angle.gains, config.period);
        Self::with_controllers(drivetrain, aligner, clock, speed, angle, config, flags)
    }
}

impl<D, C> AlignmentController<D, MoveAligner, C>
where
    D: Drivetrain,
    C: Clock<T = u32>,
{
    /// Drive straight `distance` feet.
    pub fn drive(
        drivetrain: D,
        clock: C,
        config: AlignmentConfig,
        flags: AlignmentFlags,
        distance: f32,
    ) -> Self {
        Self::new(drivetrain, MoveAligner::drive(distance), clock, config, flags)
    }

    /// Turn in place by `angle`.
    pub fn turn(
        drivetrain: D,
        clock: C,
        config: AlignmentConfig,
        flags: AlignmentFlags,
        angle: Angle,
    ) -> Self {
        Self::new(drivetrain, MoveAligner::turn(angle), clock, config, flags)
    }

    /// Turn by `angle` and then drive `distance` feet.
    pub fn movement(
        drivetrain: D,
        clock: C,
        config: AlignmentConfig,
        flags: AlignmentFlags,
        angle: Angle,
        distance: f32,
    ) -> Self {
        Self::new(drivetrain, MoveAligner::new(angle, distance), clock, config, flags)
    }
}

impl<D, A, C, P> AlignmentController<D, A, C, P>
where
    D: Drivetrain,
    A: Aligner<D>,
    C: Clock<T = u32>,
    P: Controller,
{
    pub fn with_controllers(
        drivetrain: D,
        aligner: A,
        clock: C,
        speed: P,
        angle: P,
        config: AlignmentConfig,
        flags: AlignmentFlags,
    ) -> Self {
        Self {
            drivetrain,
            aligner,
            clock,
            speed,
            angle,
            config,
            flags,
            tuning: None,
            light: None,
            target_distance: 0.,
            target_angle: Angle::zero(),
            timer: Stopwatch::new(),
            polling_timer: Stopwatch::new(),
            state: State::Idle,
            info: Info::default(),
            reported_invalid_error: false,
        }
    }

    /// Builder method to push gains from `tuning` into both controllers every tick.
    pub fn with_tuning(mut self, tuning: impl Tuning + 'static) -> Self {
        self.tuning = Some(Box::new(tuning));
        self
    }

    /// Builder method to set a targeting light, not owned by the aligner, turned off when the alignment ends.
    pub fn with_light(mut self, light: impl TargetingLight + 'static) -> Self {
        self.light = Some(Box::new(light));
        self
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    pub fn config(&self) -> &AlignmentConfig {
        &self.config
    }

    pub fn flags(&self) -> &AlignmentFlags {
        &self.flags
    }

    /// Target distance and angle used in interpolation mode.
    pub fn targets(&self) -> (f32, Angle) {
        (self.target_distance, self.target_angle)
    }

    pub fn speed_controller(&self) -> &P {
        &self.speed
    }

    pub fn angle_controller(&self) -> &P {
        &self.angle
    }

    pub fn aligner(&self) -> &A {
        &self.aligner
    }

    pub fn drivetrain(&mut self) -> &mut D {
        &mut self.drivetrain
    }

    /// Forward speed multiplier for the angle controller's current error.
    pub fn speed_scale(&self) -> f32 {
        self.config
            .throttle
            .scale(self.angle.error(), self.config.angle.max_error)
    }

    /// Refresh the absolute targets from the aligner's errors and the drivetrain's odometry.
    pub fn update_targets(&mut self) {
        self.target_distance =
            self.drivetrain.distance() + self.aligner.speed_error(&mut self.drivetrain);
        self.target_angle =
            self.drivetrain.gyro_angle() + self.aligner.angle_error(&mut self.drivetrain);

        debug!(
            "alignment targets: {:.3} ft, {}",
            self.target_distance, self.target_angle
        );
    }

    /// Distance left to travel.
    pub fn speed_error(&mut self) -> f32 {
        if self.flags.use_interpolation {
            self.target_distance - self.drivetrain.distance()
        } else {
            self.aligner.speed_error(&mut self.drivetrain)
        }
    }

    /// Angle left to turn.
    pub fn angle_error(&mut self) -> Angle {
        if self.flags.use_interpolation {
            self.target_angle - self.drivetrain.gyro_angle()
        } else {
            self.aligner.angle_error(&mut self.drivetrain)
        }
    }

    fn shift_low(&mut self) {
        if self.drivetrain.gear() != Gear::Low {
            self.drivetrain.set_gear(Gear::Low);
        }
    }
}

impl<D, A, C, P> Command for AlignmentController<D, A, C, P>
where
    D: Drivetrain,
    A: Aligner<D>,
    C: Clock<T = u32>,
    P: Controller,
{
    type Error = Error;

    fn initialize(&mut self) -> Result<(), Error> {
        self.state = State::Initializing;
        self.reported_invalid_error = false;
        self.shift_low();

        self.aligner.init(&mut self.drivetrain);
        self.timer.reset(&self.clock)?;

        self.speed.reset();
        self.angle.reset();

        let period = self.config.period;
        let speed = &self.config.speed;
        self.speed
            .set_error_filter(Box::new(LowPassFilter::new(speed.in_smooth, period)));
        self.speed.set_output_filter(Box::new(
            FilterGroup::new()
                .then(Clamp::new(self.flags.max_speed))
                .then(LowPassFilter::new(speed.out_smooth, period)),
        ));

        let angle = &self.config.angle;
        self.angle
            .set_error_filter(Box::new(LowPassFilter::new(angle.in_smooth, period)));
        self.angle
            .set_output_filter(Box::new(LowPassFilter::new(angle.out_smooth, period)));

        if self.flags.use_interpolation {
            self.update_targets();
            self.polling_timer.reset(&self.clock)?;
        }

        let speed_error = self.speed_error();
        let angle_error = self.angle_error();
        info!(
            "alignment started: {:.3} ft, {} to go ({:?})",
            speed_error, angle_error, self.flags
        );
        self.state = State::Running;
        Ok(())
    }

    fn execute(&mut self) -> Result<(), Error> {
        if let Some(tuning) = &mut self.tuning {
            if let Some(gains) = tuning.speed_gains() {
                self.speed.set_gains(gains);
            }
            if let Some(gains) = tuning.angle_gains() {
                self.angle.set_gains(gains);
            }
        }

        if self.flags.use_interpolation
            && self.polling_timer.elapsed(&self.clock)? > self.config.interpolation_period
        {
            self.update_targets();
            self.polling_timer.reset(&self.clock)?;
        }

        let speed_error = self.speed_error();
        let angle_error = self.angle_error();

        if !self.reported_invalid_error
            && !(speed_error.is_finite() && angle_error.to_degrees().is_finite())
        {
            warn!(
                "aligner reported an invalid error: {} ft, {}",
                speed_error, angle_error
            );
            self.reported_invalid_error = true;
        }

        let turn = self.angle.update(angle_error.to_degrees());
        let speed_scale = self.speed_scale();
        let speed = self.speed.update(speed_error) * speed_scale;

        self.shift_low();
        self.drivetrain.drive(speed, turn);

        self.info = Info {
            target_distance: self.target_distance,
            target_angle: self.target_angle,
            speed_error,
            angle_error,
            speed_scale,
            speed,
            turn,
        };
        trace!("alignment tick: {:?}", self.info);

        Ok(())
    }

    fn is_finished(&mut self) -> Result<bool, Error> {
        if self.flags.never_finish {
            return Ok(false);
        }

        if self.flags.min_time && self.timer.elapsed(&self.clock)? < self.config.min_alignment_time
        {
            return Ok(false);
        }

        let speed = &self.config.speed;
        let angle = &self.config.angle;
        let is_finished = if self.flags.continuous {
            self.speed.is_done(speed.continuous_error())
                && self.angle.is_done(angle.continuous_error())
        } else {
            self.speed
                .is_done_with_velocity(speed.max_error, speed.max_velocity)
                && self
                    .angle
                    .is_done_with_velocity(angle.max_error, angle.max_velocity)
        };

        Ok(is_finished)
    }

    fn end(&mut self, interrupted: bool) {
        self.aligner.end(&mut self.drivetrain);
        if let Some(light) = &mut self.light {
            light.set_light_mode(LightMode::ForceOff);
        }

        self.state = if interrupted {
            State::Cancelled
        } else {
            State::Converged
        };

        info!(
            "alignment {}: {:.3} ft, {:.2}° remaining",
            if interrupted { "interrupted" } else { "converged" },
            self.speed.error(),
            self.angle.error()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{AlignmentController, State};
    use crate::aligner::{LightMode, TestCamera};
    use crate::command::{run, Outcome};
    use crate::sim::SimDrivetrain;
    use crate::timer::tests::TestClock;
    use crate::{
        Aligner, AlignmentConfig, AlignmentFlags, Angle, Command, Controller, Drivetrain, Gains,
        Gear, GoalAligner, HoldAligner, Tuning,
    };
    use approx::assert_abs_diff_eq;
    use core::cell::Cell;
    use std::rc::Rc;

    /// Reports the same error (feet, degrees) no matter where the robot is.
    #[derive(Clone)]
    struct FixedAligner(Rc<Cell<(f32, f32)>>);

    impl FixedAligner {
        fn new(distance: f32, degrees: f32) -> Self {
            Self(Rc::new(Cell::new((distance, degrees))))
        }

        fn set(&self, distance: f32, degrees: f32) {
            self.0.set((distance, degrees));
        }
    }

    impl<D> Aligner<D> for FixedAligner {
        fn speed_error(&mut self, _drivetrain: &mut D) -> f32 {
            self.0.get().0
        }

        fn angle_error(&mut self, _drivetrain: &mut D) -> Angle {
            Angle::degrees(self.0.get().1)
        }
    }

    fn stationary(distance: f32, heading: Angle) -> SimDrivetrain {
        let mut drivetrain = SimDrivetrain::at(distance, heading);
        drivetrain.low_gear_speed = 0.;
        drivetrain.high_gear_speed = 0.;
        drivetrain.max_turn_rate = 0.;
        drivetrain
    }

    #[test]
    fn it_finishes_immediately_without_error() {
        let mut drivetrain = SimDrivetrain::default();
        let mut align = AlignmentController::new(
            &mut drivetrain,
            HoldAligner,
            TestClock::default(),
            AlignmentConfig::default(),
            AlignmentFlags::default(),
        );
        assert_eq!(align.state(), State::Idle);

        let outcome = run(&mut align, 10, |_| {}).unwrap();
        assert_eq!(outcome, Outcome::Finished { ticks: 1 });
        assert_eq!(align.state(), State::Converged);
        assert_abs_diff_eq!(align.info().speed, 0.);
        assert_abs_diff_eq!(align.info().turn, 0.);

        assert_eq!(drivetrain.gear(), Gear::Low);
        assert_eq!(drivetrain.last_command(), (0., 0.));
    }

    #[test]
    fn it_drives_a_distance() {
        let config = AlignmentConfig::default();
        let clock = TestClock::default();
        let mut drivetrain = SimDrivetrain::default();
        let mut align = AlignmentController::drive(
            &mut drivetrain,
            clock.clone(),
            config,
            AlignmentFlags::default(),
            5.,
        );

        let outcome = run(&mut align, 500, |_| clock.advance(20)).unwrap();
        assert!(outcome.is_finished());
        assert_eq!(align.state(), State::Converged);

        let distance = align.drivetrain().distance();
        assert_abs_diff_eq!(distance, 5., epsilon = config.speed.max_error);
        assert_abs_diff_eq!(
            align.drivetrain().gyro_angle().to_degrees(),
            0.,
            epsilon = config.angle.max_error
        );
    }

    #[test]
    fn it_turns_in_place() {
        let config = AlignmentConfig::default();
        let mut drivetrain = SimDrivetrain::default();
        let mut align = AlignmentController::turn(
            &mut drivetrain,
            TestClock::default(),
            config,
            AlignmentFlags::default(),
            Angle::degrees(90.),
        );

        let outcome = run(&mut align, 500, |align| {
            assert_eq!(align.info().speed_error, 0.);
        })
        .unwrap();
        assert!(outcome.is_finished());

        let heading = align.drivetrain().gyro_angle();
        assert_abs_diff_eq!(heading.to_degrees(), 90., epsilon = config.angle.max_error);
    }

    #[test]
    fn it_turns_then_drives_with_interpolation() {
        let config = AlignmentConfig::default();
        let clock = TestClock::default();
        let mut drivetrain = SimDrivetrain::default();
        let flags = AlignmentFlags {
            use_interpolation: true,
            ..Default::default()
        };
        let mut align = AlignmentController::movement(
            &mut drivetrain,
            clock.clone(),
            config,
            flags,
            Angle::degrees(-45.),
            3.,
        );

        let outcome = run(&mut align, 1000, |_| clock.advance(20)).unwrap();
        assert!(outcome.is_finished());

        let (distance, angle) = align.targets();
        assert_abs_diff_eq!(distance, 3., epsilon = 1e-4);
        assert_abs_diff_eq!(angle.to_degrees(), -45., epsilon = 1e-2);
        assert_abs_diff_eq!(
            align.drivetrain().distance(),
            3.,
            epsilon = config.speed.max_error
        );
    }

    #[test]
    fn it_does_not_drive_while_misaligned() {
        let mut drivetrain = SimDrivetrain::default();
        let mut align = AlignmentController::new(
            &mut drivetrain,
            FixedAligner::new(5., 90.),
            TestClock::default(),
            AlignmentConfig::default(),
            AlignmentFlags::default(),
        );

        align.initialize().unwrap();
        align.execute().unwrap();

        assert_eq!(align.info().speed_scale, 0.);
        assert_eq!(align.info().speed, 0.);
        assert!(align.info().turn > 0.);
        assert_eq!(align.speed_scale(), 0.);
    }

    #[test]
    fn it_never_finishes_until_cancelled() {
        let mut drivetrain = SimDrivetrain::default();
        let flags = AlignmentFlags {
            never_finish: true,
            ..Default::default()
        };
        let mut align = AlignmentController::new(
            &mut drivetrain,
            HoldAligner,
            TestClock::default(),
            AlignmentConfig::default(),
            flags,
        );

        align.initialize().unwrap();
        for _ in 0..200 {
            align.execute().unwrap();
            assert!(!align.is_finished().unwrap());
        }

        align.end(true);
        assert_eq!(align.state(), State::Cancelled);
    }

    #[test]
    fn it_waits_for_the_minimum_time() {
        let clock = TestClock::default();
        let mut drivetrain = SimDrivetrain::default();
        let flags = AlignmentFlags {
            min_time: true,
            ..Default::default()
        };
        let mut align = AlignmentController::new(
            &mut drivetrain,
            HoldAligner,
            clock.clone(),
            AlignmentConfig::default(),
            flags,
        );

        // Errors are converged from the first tick, but a second has to pass at 20ms per tick
        let outcome = run(&mut align, 100, |_| clock.advance(20)).unwrap();
        assert_eq!(outcome, Outcome::Finished { ticks: 50 });
    }

    #[test]
    fn continuous_mode_relaxes_tolerance() {
        let config = AlignmentConfig::default();
        let error = (config.speed.max_error + config.speed.continuous_error()) / 2.;

        let mut drivetrain = SimDrivetrain::default();
        let mut strict = AlignmentController::new(
            &mut drivetrain,
            FixedAligner::new(error, 0.),
            TestClock::default(),
            config,
            AlignmentFlags::default(),
        );
        let outcome = run(&mut strict, 20, |_| {}).unwrap();
        assert_eq!(outcome, Outcome::Interrupted { ticks: 20 });

        let flags = AlignmentFlags {
            continuous: true,
            ..Default::default()
        };
        let mut drivetrain = SimDrivetrain::default();
        let mut continuous = AlignmentController::new(
            &mut drivetrain,
            FixedAligner::new(error, 0.),
            TestClock::default(),
            config,
            flags,
        );
        let outcome = run(&mut continuous, 20, |_| {}).unwrap();
        assert_eq!(outcome, Outcome::Finished { ticks: 1 });
    }

    #[test]
    fn strict_mode_waits_for_velocity() {
        let aligner = FixedAligner::new(0., 0.);
        let mut drivetrain = SimDrivetrain::default();
        let mut align = AlignmentController::new(
            &mut drivetrain,
            aligner.clone(),
            TestClock::default(),
            AlignmentConfig::default(),
            AlignmentFlags::default(),
        );

        align.initialize().unwrap();
        aligner.set(1., 0.);
        align.execute().unwrap();

        // The filtered error decays into tolerance while still moving quickly
        aligner.set(0., 0.);
        for _ in 0..6 {
            align.execute().unwrap();
        }
        let config = AlignmentConfig::default();
        assert!(align.speed_controller().error().abs() <= config.speed.max_error);
        assert!(align.speed_controller().velocity().abs() > config.speed.max_velocity);
        assert!(!align.is_finished().unwrap());
    }

    #[test]
    fn interpolation_refreshes_targets_periodically() {
        let config = AlignmentConfig::default();
        let clock = TestClock::default();
        let aligner = FixedAligner::new(2., 30.);
        let mut drivetrain = stationary(1., Angle::degrees(10.));
        let flags = AlignmentFlags {
            use_interpolation: true,
            ..Default::default()
        };
        let mut align =
            AlignmentController::new(&mut drivetrain, aligner.clone(), clock.clone(), config, flags);

        align.initialize().unwrap();
        let (distance, angle) = align.targets();
        assert_abs_diff_eq!(distance, 3.);
        assert_abs_diff_eq!(angle.to_degrees(), 40., epsilon = 1e-3);

        // Targets stay put until the interpolation period passes
        aligner.set(5., 0.);
        for _ in 0..25 {
            clock.advance(20);
            align.execute().unwrap();
        }
        assert_abs_diff_eq!(align.targets().0, 3.);
        assert_abs_diff_eq!(align.info().speed_error, 2.);
        assert_abs_diff_eq!(align.info().angle_error.to_degrees(), 30., epsilon = 1e-3);

        clock.advance(20);
        align.execute().unwrap();
        let (distance, angle) = align.targets();
        assert_abs_diff_eq!(distance, 6.);
        assert_abs_diff_eq!(angle.to_degrees(), 10., epsilon = 1e-3);
    }

    #[test]
    fn interpolation_targets_are_stable_without_motion() {
        let config = AlignmentConfig::default();
        let clock = TestClock::default();
        let mut drivetrain = stationary(1., Angle::degrees(10.));
        let flags = AlignmentFlags {
            use_interpolation: true,
            ..Default::default()
        };
        let mut align = AlignmentController::new(
            &mut drivetrain,
            FixedAligner::new(2., 30.),
            clock.clone(),
            config,
            flags,
        );

        align.initialize().unwrap();
        for _ in 0..200 {
            clock.advance(20);
            align.execute().unwrap();

            let (distance, angle) = align.targets();
            assert_abs_diff_eq!(distance, 3.);
            assert_abs_diff_eq!(angle.to_degrees(), 40., epsilon = 1e-3);
        }
    }

    #[test]
    fn it_pushes_tuned_gains_every_tick() {
        struct LiveGains(Rc<Cell<f32>>);

        impl Tuning for LiveGains {
            fn speed_gains(&mut self) -> Option<Gains> {
                Some(Gains::new(self.0.get(), 0., 0.))
            }

            fn angle_gains(&mut self) -> Option<Gains> {
                Some(Gains::new(0., 0., self.0.get()))
            }
        }

        let gain = Rc::new(Cell::new(1.));
        let mut drivetrain = SimDrivetrain::default();
        let mut align = AlignmentController::new(
            &mut drivetrain,
            HoldAligner,
            TestClock::default(),
            AlignmentConfig::default(),
            AlignmentFlags::default(),
        )
        .with_tuning(LiveGains(gain.clone()));

        align.initialize().unwrap();
        align.execute().unwrap();
        assert_eq!(align.speed_controller().gains, Gains::new(1., 0., 0.));

        gain.set(2.);
        align.execute().unwrap();
        assert_eq!(align.speed_controller().gains, Gains::new(2., 0., 0.));
        assert_eq!(align.angle_controller().gains, Gains::new(0., 0., 2.));
    }

    #[test]
    fn it_turns_the_light_off_on_every_exit() {
        let camera = TestCamera::new(Some((Angle::zero(), 10.)));
        let mut drivetrain = SimDrivetrain::default();
        let mut align = AlignmentController::new(
            &mut drivetrain,
            GoalAligner::new(camera.clone(), 10.),
            TestClock::default(),
            AlignmentConfig::default(),
            AlignmentFlags::default(),
        )
        .with_light(camera.clone());

        let outcome = run(&mut align, 10, |_| {
            assert_eq!(camera.light(), LightMode::ForceOn);
        })
        .unwrap();
        assert!(outcome.is_finished());
        assert_eq!(camera.light(), LightMode::ForceOff);

        let flags = AlignmentFlags {
            never_finish: true,
            ..Default::default()
        };
        let mut drivetrain = SimDrivetrain::default();
        let mut align = AlignmentController::new(
            &mut drivetrain,
            GoalAligner::new(camera.clone(), 10.),
            TestClock::default(),
            AlignmentConfig::default(),
            flags,
        )
        .with_light(camera.clone());

        let outcome = run(&mut align, 10, |_| {}).unwrap();
        assert!(!outcome.is_finished());
        assert_eq!(align.state(), State::Cancelled);
        assert_eq!(camera.light(), LightMode::ForceOff);
    }

    #[test]
    fn it_propagates_invalid_errors() {
        let mut drivetrain = SimDrivetrain::default();
        let mut align = AlignmentController::new(
            &mut drivetrain,
            FixedAligner::new(f32::NAN, 0.),
            TestClock::default(),
            AlignmentConfig::default(),
            AlignmentFlags::default(),
        );

        let outcome = run(&mut align, 5, |_| {}).unwrap();
        assert!(!outcome.is_finished());
        assert!(align.info().speed_error.is_nan());
        assert!(align.speed_controller().error().is_nan());
    }

    #[test]
    fn zero_movements_finish_immediately() {
        let config = AlignmentConfig::default();

        let mut drivetrain = SimDrivetrain::at(2., Angle::degrees(30.));
        let mut drive = AlignmentController::drive(
            &mut drivetrain,
            TestClock::default(),
            config,
            AlignmentFlags::default(),
            0.,
        );
        let outcome = run(&mut drive, 10, |_| {}).unwrap();
        assert!(outcome.is_finished());
        assert!(outcome.ticks() <= 2);

        let mut drivetrain = SimDrivetrain::at(2., Angle::degrees(30.));
        let mut turn = AlignmentController::turn(
            &mut drivetrain,
            TestClock::default(),
            config,
            AlignmentFlags::default(),
            Angle::zero(),
        );
        let outcome = run(&mut turn, 10, |_| {}).unwrap();
        assert!(outcome.is_finished());
        assert!(outcome.ticks() <= 2);
    }

    #[test]
    fn the_aligner_turns_its_light_off() {
        let camera = TestCamera::new(Some((Angle::zero(), 10.)));
        let mut drivetrain = SimDrivetrain::default();
        let mut align = AlignmentController::new(
            &mut drivetrain,
            GoalAligner::new(camera.clone(), 10.),
            TestClock::default(),
            AlignmentConfig::default(),
            AlignmentFlags::default(),
        );

        let outcome = run(&mut align, 10, |_| {
            assert_eq!(camera.light(), LightMode::ForceOn);
        })
        .unwrap();
        assert_eq!(outcome, Outcome::Finished { ticks: 1 });
        assert_eq!(camera.light(), LightMode::ForceOff);

        let flags = AlignmentFlags {
            never_finish: true,
            ..Default::default()
        };
        let mut drivetrain = SimDrivetrain::default();
        let mut align = AlignmentController::new(
            &mut drivetrain,
            GoalAligner::new(camera.clone(), 10.),
            TestClock::default(),
            AlignmentConfig::default(),
            flags,
        );

        run(&mut align, 10, |_| {}).unwrap();
        assert_eq!(align.state(), State::Cancelled);
        assert_eq!(camera.light(), LightMode::ForceOff);
    }

    #[test]
    fn reinitializing_starts_from_a_clean_slate() {
        let clock = TestClock::default();
        let mut drivetrain = SimDrivetrain::default();
        let mut align = AlignmentController::drive(
            &mut drivetrain,
            clock.clone(),
            AlignmentConfig::default(),
            AlignmentFlags::default(),
            5.,
        );

        let outcome = run(&mut align, 500, |_| clock.advance(20)).unwrap();
        assert!(outcome.is_finished());

        // A second run drives another 5 feet without derivative kick from the first
        align.initialize().unwrap();
        align.execute().unwrap();
        assert_eq!(align.speed_controller().velocity(), 0.);
        assert_eq!(align.angle_controller().velocity(), 0.);
        assert_abs_diff_eq!(align.speed_controller().error(), 5., epsilon = 0.1);

        let outcome = run(&mut align, 500, |_| clock.advance(20)).unwrap();
        assert!(outcome.is_finished());
        assert_abs_diff_eq!(align.drivetrain().distance(), 10., epsilon = 0.2);
    }
}
