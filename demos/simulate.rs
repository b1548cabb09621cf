//! Turn then drive a simulated robot in real time, logging every tick.
//!
//! ```text
//! cargo run --example simulate
//! ```

use drive_align::{
    command::run, sim::SimDrivetrain, AlignmentConfig, AlignmentController, AlignmentFlags, Angle,
    Command, Drivetrain,
};
use embedded_time::{clock, rate::Fraction, Clock, Instant};
use log::{info, LevelFilter, Metadata, Record};
use std::time::Duration;

/// Microsecond clock backed by [`std::time::Instant`].
struct StdClock {
    start: std::time::Instant,
}

impl Default for StdClock {
    fn default() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

impl Clock for StdClock {
    type T = u32;

    const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000_000);

    fn try_now(&self) -> Result<Instant<Self>, clock::Error> {
        Ok(Instant::new(self.start.elapsed().as_micros() as u32))
    }
}

struct StdoutLogger;

impl log::Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{} {} - {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StdoutLogger = StdoutLogger;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), drive_align::Error> {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Debug);

    let config = AlignmentConfig::default();
    let flags = AlignmentFlags {
        use_interpolation: true,
        ..Default::default()
    };

    let mut robot = SimDrivetrain::default();
    let mut align = AlignmentController::movement(
        &mut robot,
        StdClock::default(),
        config,
        flags,
        Angle::degrees(60.),
        4.,
    );

    // Run in real time on the controller's period
    let mut interval = tokio::time::interval(Duration::from_secs_f32(config.period));
    align.initialize()?;
    loop {
        interval.tick().await;
        align.execute()?;

        let tick = align.info();
        info!(
            "speed {:+.2} turn {:+.2} | {:.2} ft left, {} left",
            tick.speed, tick.turn, tick.speed_error, tick.angle_error
        );

        if align.is_finished()? {
            align.end(false);
            break;
        }
    }

    let position = robot.position();
    info!(
        "finished at ({:.2}, {:.2}) facing {}",
        position.x,
        position.y,
        robot.gyro_angle()
    );

    // The same alignment again, without pacing
    let mut robot = SimDrivetrain::default();
    let mut align = AlignmentController::movement(
        &mut robot,
        StdClock::default(),
        config,
        AlignmentFlags::default(),
        Angle::degrees(60.),
        4.,
    );
    let outcome = run(&mut align, 1_000, |_| {})?;
    info!("unpaced run: {:?}", outcome);

    Ok(())
}
