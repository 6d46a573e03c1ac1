use std::fmt;
use std::ops::Add;

/// A non-negative path cost, stored in exact tenths of a unit.
///
/// The reference move set costs 1.0 for orthogonal and 1.4 for diagonal
/// steps; keeping tenths as an integer makes sums exact and gives the search
/// a total order with no NaN cases.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Cost(u32);

impl Cost {
    pub const ZERO: Self = Self(0);

    /// Build a cost from a number of tenths (`14` is 1.4).
    #[inline]
    pub const fn from_tenths(tenths: u32) -> Self {
        Self(tenths)
    }

    #[inline]
    pub const fn tenths(self) -> u32 {
        self.0
    }

    /// The cost as a real number.
    #[inline]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl Add for Cost {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// Per-step costs of the eight-action move set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepCosts {
    /// Cost of Up, Down, Left and Right.
    pub orthogonal: Cost,
    /// Cost of the four diagonal moves. The reference map uses 1.4, not √2.
    pub diagonal: Cost,
}

impl StepCosts {
    /// 1.0 orthogonal, 1.4 diagonal.
    pub const REFERENCE: Self = Self {
        orthogonal: Cost::from_tenths(10),
        diagonal: Cost::from_tenths(14),
    };
}

impl Default for StepCosts {
    fn default() -> Self {
        Self::REFERENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_keeps_one_decimal() {
        assert_eq!(Cost::from_tenths(90).to_string(), "9.0");
        assert_eq!(Cost::from_tenths(126).to_string(), "12.6");
        assert_eq!(Cost::ZERO.to_string(), "0.0");
    }

    #[test]
    fn nine_diagonals_are_exact() {
        let step = StepCosts::REFERENCE.diagonal;
        let total = (0..9).fold(Cost::ZERO, |acc, _| acc + step);
        assert_eq!(total, Cost::from_tenths(126));
        assert_eq!(total.as_f64(), 12.6);
    }

    #[test]
    fn ordering_follows_tenths() {
        assert!(Cost::from_tenths(14) > Cost::from_tenths(10));
        assert!(Cost::from_tenths(20) < Cost::from_tenths(28));
    }
}
