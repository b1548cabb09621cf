use super::PwmMotor;
use embedded_hal::PwmPin;
use num_traits::Num;

pub struct Builder<T> {
    min: T,
    max: Option<T>,
    inverted: bool,
}

impl<T: Default> Default for Builder<T> {
    fn default() -> Self {
        Self {
            min: T::default(),
            max: None,
            inverted: false,
        }
    }
}

impl<T> Builder<T> {
    pub fn min(mut self, min: T) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: T) -> Self {
        self.max = Some(max);
        self
    }

    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Build the motor, defaulting `max` to the pin's max duty.
    pub fn build<P>(self, pin: P) -> PwmMotor<P>
    where
        P: PwmPin<Duty = T>,
        T: Num + Clone,
    {
        let max = self.max.unwrap_or_else(|| pin.get_max_duty());
        PwmMotor::new(self.min, max, self.inverted, pin)
    }
}
