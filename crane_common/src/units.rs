//! Typed scalar units.
//!
//! `Unit<T>` wraps an `f64` and carries a zero-sized tag describing the
//! physical quantity. Values with different tags never mix, except through
//! the two physical relations defined here:
//!
//! ```text
//! Force = Mass × Accel      (F = m·a)
//! Accel = Force / Mass      (a = F/m)
//! ```
//!
//! # Usage
//!
//! ```rust
//! use crane_common::units::{kilograms, meters_per_sec_squared, newtons};
//!
//! let f = kilograms(2.0) * meters_per_sec_squared(3.0);
//! assert_eq!(f, newtons(6.0));
//! assert_eq!(f / kilograms(2.0), meters_per_sec_squared(3.0));
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ─── Tags ───────────────────────────────────────────────────────────

/// Tag for force quantities [N].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceTag {}

/// Tag for mass quantities [kg].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MassTag {}

/// Tag for acceleration quantities [m/s²].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccelTag {}

/// Unit suffix used by `Display`.
pub trait UnitTag {
    /// SI symbol of the quantity.
    const SYMBOL: &'static str;
}

impl UnitTag for ForceTag {
    const SYMBOL: &'static str = "N";
}

impl UnitTag for MassTag {
    const SYMBOL: &'static str = "kg";
}

impl UnitTag for AccelTag {
    const SYMBOL: &'static str = "m/s²";
}

/// Force in newtons.
pub type Force = Unit<ForceTag>;
/// Mass in kilograms.
pub type Mass = Unit<MassTag>;
/// Acceleration in meters per second squared.
pub type Accel = Unit<AccelTag>;

// ─── Unit ───────────────────────────────────────────────────────────

/// A scalar tagged with a physical quantity.
pub struct Unit<T> {
    value: f64,
    _tag: PhantomData<T>,
}

impl<T> Unit<T> {
    /// Zero of this quantity.
    pub const ZERO: Self = Self::new(0.0);

    /// Tag a raw value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            _tag: PhantomData,
        }
    }

    /// Raw value in SI units.
    #[inline]
    pub const fn value(self) -> f64 {
        self.value
    }

    /// Absolute value, same tag.
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.value.abs())
    }

    /// −1, 0 or +1 depending on the sign of the value.
    #[inline]
    pub fn sign(self) -> f64 {
        sign(self.value)
    }

    /// Clamp into `[min, max]`.
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(self.value.clamp(min.value, max.value))
    }

    /// Smaller of two values.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.value.min(other.value))
    }

    /// True when the value is neither infinite nor NaN.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.value.is_finite()
    }
}

/// −1, 0 or +1 depending on the sign of `x`. Unlike `f64::signum`, zero maps to zero.
#[inline]
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Force in newtons.
#[inline]
pub const fn newtons(value: f64) -> Force {
    Force::new(value)
}

/// Mass in kilograms.
#[inline]
pub const fn kilograms(value: f64) -> Mass {
    Mass::new(value)
}

/// Acceleration in meters per second squared.
#[inline]
pub const fn meters_per_sec_squared(value: f64) -> Accel {
    Accel::new(value)
}

// Manual impls: derives would bound `T` on traits the tags never implement.

impl<T> Clone for Unit<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Unit<T> {}

impl<T> Default for Unit<T> {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl<T> PartialEq for Unit<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> PartialOrd for Unit<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T: UnitTag> fmt::Debug for Unit<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.value, T::SYMBOL)
    }
}

impl<T: UnitTag> fmt::Display for Unit<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} {}", p, self.value, T::SYMBOL),
            None => write!(f, "{} {}", self.value, T::SYMBOL),
        }
    }
}

impl<T> Serialize for Unit<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Unit<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self::new)
    }
}

// ─── Same-tag arithmetic ────────────────────────────────────────────

impl<T> Add for Unit<T> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.value)
    }
}

impl<T> Sub for Unit<T> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value - rhs.value)
    }
}

impl<T> AddAssign for Unit<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.value += rhs.value;
    }
}

impl<T> SubAssign for Unit<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.value -= rhs.value;
    }
}

impl<T> Neg for Unit<T> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.value)
    }
}

/// Ratio of two same-tag quantities is dimensionless.
impl<T> Div for Unit<T> {
    type Output = f64;
    #[inline]
    fn div(self, rhs: Self) -> f64 {
        self.value / rhs.value
    }
}

// ─── Scalar arithmetic ──────────────────────────────────────────────

impl<T> Mul<f64> for Unit<T> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.value * rhs)
    }
}

impl<T> Mul<Unit<T>> for f64 {
    type Output = Unit<T>;
    #[inline]
    fn mul(self, rhs: Unit<T>) -> Unit<T> {
        Unit::new(self * rhs.value)
    }
}

impl<T> Div<f64> for Unit<T> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::new(self.value / rhs)
    }
}

/// A plain scalar is taken in the unit of the left operand.
impl<T> Add<f64> for Unit<T> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: f64) -> Self {
        Self::new(self.value + rhs)
    }
}

impl<T> Sub<f64> for Unit<T> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: f64) -> Self {
        Self::new(self.value - rhs)
    }
}

impl<T> PartialEq<f64> for Unit<T> {
    #[inline]
    fn eq(&self, other: &f64) -> bool {
        self.value == *other
    }
}

impl<T> PartialOrd<f64> for Unit<T> {
    #[inline]
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.value.partial_cmp(other)
    }
}

// ─── Physical relations ─────────────────────────────────────────────

/// F = m·a
impl Mul<Accel> for Mass {
    type Output = Force;
    #[inline]
    fn mul(self, rhs: Accel) -> Force {
        Force::new(self.value * rhs.value)
    }
}

/// F = a·m
impl Mul<Mass> for Accel {
    type Output = Force;
    #[inline]
    fn mul(self, rhs: Mass) -> Force {
        Force::new(self.value * rhs.value)
    }
}

/// a = F/m
impl Div<Mass> for Force {
    type Output = Accel;
    #[inline]
    fn div(self, rhs: Mass) -> Accel {
        Accel::new(self.value / rhs.value)
    }
}
