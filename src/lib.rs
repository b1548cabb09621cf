//! # drive-align
//! A `#![no_std]` alignment controller for differential-drive robots.
//!
//! # Components
//! [`AlignmentController`] drives two PID loops (speed and angle) until the robot
//! reaches the distance and heading requested by an [`Aligner`].
//!
//! [`aligner`] contains the error sources
//! (see [`MoveAligner`] for turn-then-drive movements and [`GoalAligner`] for vision targets).
//!
//! [`pid`] and [`filter`] contain the PID controller and the signal filters it runs through.
//!
//! [`hal`] contains the hardware abstraction layer used to build a [`Drivetrain`].
//!
//! [`command`] contains the tick contract used by a scheduler to run the controller.
//!
//! # Examples
//! Drive a simulated robot forward 5 feet:
//! ```
//! use drive_align::{command, AlignmentConfig, AlignmentController, AlignmentFlags};
//! use drive_align::sim::SimDrivetrain;
//! # use core::cell::Cell;
//! # use embedded_time::{clock, rate::Fraction, Clock, Instant};
//! # struct TickClock(Cell<u32>);
//! # impl Clock for TickClock {
//! #     type T = u32;
//! #     const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000);
//! #     fn try_now(&self) -> Result<Instant<Self>, clock::Error> {
//! #         let now = self.0.get();
//! #         self.0.set(now + 20);
//! #         Ok(Instant::new(now))
//! #     }
//! # }
//!
//! let mut robot = SimDrivetrain::default();
//! let mut align = AlignmentController::drive(
//!     &mut robot,
//!     TickClock(Cell::new(0)),
//!     AlignmentConfig::default(),
//!     AlignmentFlags::default(),
//!     5.,
//! );
//!
//! let outcome = command::run(&mut align, 500, |_| {}).unwrap();
//! assert!(outcome.is_finished());
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod aligner;
pub use aligner::{Aligner, GoalAligner, HoldAligner, MoveAligner};

pub mod alignment;
pub use alignment::{AlignmentController, Info, State};

mod angle;
pub use angle::Angle;

pub mod command;
pub use command::Command;

pub mod config;
pub use config::{AlignmentConfig, AlignmentFlags, AxisConfig, ThrottleCurve, Tuning};

pub mod drivetrain;
pub use drivetrain::{Drivetrain, Gear};

mod error;
pub use error::Error;

pub mod filter;

pub mod hal;

pub mod pid;
pub use pid::{Controller, Gains, PidController};

pub mod sim;

pub mod timer;
pub use timer::Stopwatch;
