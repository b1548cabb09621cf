mod builder;
pub use builder::Builder;

use super::Actuator;
use embedded_hal::PwmPin;
use num_traits::{Num, NumCast, ToPrimitive};

/// A motor controller driven by PWM duty, with neutral halfway between `min` and `max`.
pub struct PwmMotor<T: PwmPin> {
    min: T::Duty,
    max: T::Duty,
    inverted: bool,
    pin: T,
}

impl<T> PwmMotor<T>
where
    T: PwmPin,
    T::Duty: Num + Clone,
{
    pub fn new(min: T::Duty, max: T::Duty, inverted: bool, mut pin: T) -> Self {
        pin.enable();
        Self {
            min,
            max,
            inverted,
            pin,
        }
    }

    pub fn builder() -> Builder<T::Duty>
    where
        T::Duty: Default,
    {
        Builder::default()
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn into_inner(self) -> T {
        self.pin
    }
}

impl<T> Actuator for PwmMotor<T>
where
    T: PwmPin,
    T::Duty: Num + NumCast + ToPrimitive + Copy,
{
    fn output(&mut self, output: f32) {
        let (min, max) = match (self.min.to_f32(), self.max.to_f32()) {
            (Some(min), Some(max)) => (min, max),
            _ => return,
        };

        let output = output.max(-1.).min(1.);
        let output = if self.inverted { -output } else { output };

        let duty = (output + 1.) * (max - min) / 2. + min;
        if let Some(duty) = <T::Duty as NumCast>::from(duty) {
            self.pin.set_duty(duty);
        }
    }
}
