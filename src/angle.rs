use core::fmt;
use core::ops::{Add, Neg, Sub};
use nalgebra::UnitComplex;
use num_traits::Float;

/// A heading normalized to (-180°, 180°].
///
/// Arithmetic composes rotations, so sums and differences wrap around a full turn.
#[derive(Clone, Copy, PartialEq)]
pub struct Angle {
    rotation: UnitComplex<f32>,
}

impl Angle {
    pub fn zero() -> Self {
        Self {
            rotation: UnitComplex::identity(),
        }
    }

    pub fn radians(radians: f32) -> Self {
        Self {
            rotation: UnitComplex::new(radians),
        }
    }

    pub fn degrees(degrees: f32) -> Self {
        Self::radians(degrees.to_radians())
    }

    /// The signed angle in radians, in (-PI, PI].
    pub fn to_radians(self) -> f32 {
        self.rotation.angle()
    }

    /// The signed angle in degrees, in (-180, 180].
    pub fn to_degrees(self) -> f32 {
        self.to_radians().to_degrees()
    }

    /// Magnitude of the signed angle in degrees.
    pub fn abs_degrees(self) -> f32 {
        Float::abs(self.to_degrees())
    }
}

impl Default for Angle {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            rotation: self.rotation * rhs.rotation,
        }
    }
}

impl Sub for Angle {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            rotation: self.rotation * rhs.rotation.inverse(),
        }
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            rotation: self.rotation.inverse(),
        }
    }
}

impl fmt::Debug for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Angle({}°)", self.to_degrees())
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}°", self.to_degrees())
    }
}
