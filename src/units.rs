use derive_more::{Add, AddAssign, Display, From, Into, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul};

/// A length in PDF points (1/72 of an inch). All page and label geometry is
/// expressed in points.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Pt(pub f32);

/// A length in millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Display)]
pub struct Mm(pub f32);

/// A length in inches
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Display)]
pub struct In(pub f32);

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Pt {
        Pt(mm.0 * 72.0 / 25.4)
    }
}

impl From<In> for Pt {
    fn from(inches: In) -> Pt {
        Pt(inches.0 * 72.0)
    }
}

impl From<Pt> for Mm {
    fn from(pt: Pt) -> Mm {
        Mm(pt.0 * 25.4 / 72.0)
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Mul<Pt> for f32 {
    type Output = Pt;

    fn mul(self, rhs: Pt) -> Pt {
        Pt(self * rhs.0)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

/// Dividing one length by another yields a plain ratio
impl Div<Pt> for Pt {
    type Output = f32;

    fn div(self, rhs: Pt) -> f32 {
        self.0 / rhs.0
    }
}

impl Pt {
    /// Whether this length is a usable, strictly positive distance
    pub fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millimetres_convert_to_points() {
        let pt: Pt = Mm(25.4).into();
        assert!((pt.0 - 72.0).abs() < 1e-4);
        let back: Mm = Pt(72.0).into();
        assert!((back.0 - 25.4).abs() < 1e-4);
    }

    #[test]
    fn inches_convert_to_points() {
        assert_eq!(Pt::from(In(0.5)), Pt(36.0));
    }

    #[test]
    fn arithmetic_stays_in_points() {
        assert_eq!(Pt(2.0) + Pt(3.0), Pt(5.0));
        assert_eq!(Pt(2.0) * 3.0, Pt(6.0));
        assert_eq!(3.0 * Pt(2.0), Pt(6.0));
        assert_eq!(Pt(9.0) / Pt(3.0), 3.0);
        let total: Pt = [Pt(1.0), Pt(2.5)].into_iter().sum();
        assert_eq!(total, Pt(3.5));
    }

    #[test]
    fn positivity_rejects_degenerate_lengths() {
        assert!(Pt(0.1).is_positive());
        assert!(!Pt(0.0).is_positive());
        assert!(!Pt(-1.0).is_positive());
        assert!(!Pt(f32::NAN).is_positive());
        assert!(!Pt(f32::INFINITY).is_positive());
    }
}
