use core::fmt;
use embedded_time::{clock, ConversionError};

/// A timing error caused by the controller's clock.
#[derive(Debug)]
pub enum Error {
    Clock(clock::Error),
    Time(ConversionError),
    /// The clock reported an instant earlier than a previous reading.
    NonMonotonic,
}

impl From<clock::Error> for Error {
    fn from(clock_error: clock::Error) -> Self {
        Error::Clock(clock_error)
    }
}

impl From<ConversionError> for Error {
    fn from(time_error: ConversionError) -> Self {
        Error::Time(time_error)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Clock(error) => write!(f, "clock error: {:?}", error),
            Error::Time(error) => write!(f, "time conversion error: {:?}", error),
            Error::NonMonotonic => f.write_str("clock went backwards"),
        }
    }
}
