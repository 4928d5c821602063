//! The output volume scale.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// An output volume on the 0-100 scale.
///
/// Values outside the range cannot be represented; use [`VolumeLevel::clamped`]
/// to bring arbitrary arithmetic results into range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VolumeLevel(u8);

impl VolumeLevel {
    /// Silence.
    pub const MIN: Self = Self(0);
    /// Full volume.
    pub const MAX: Self = Self(100);

    /// Create a level, returning `None` when `value` exceeds 100.
    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX.0).then_some(Self(value))
    }

    /// Clamp an arbitrary value into `[0, 100]`.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0)) as u8)
    }

    /// Return this level shifted by `delta`, clamped into range.
    pub fn offset(self, delta: i64) -> Self {
        Self::clamped(i64::from(self.0).saturating_add(delta))
    }

    /// The raw level.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Display for VolumeLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}
