//! Batch scale factor and the rounding rules that go with it.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors produced when constructing a [`Scale`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScaleError {
    #[error("Scale {value} is outside the supported range {min}..={max}")]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[error("Scale {value} is not a multiple of {increment}")]
    NotAnIncrement { value: f64, increment: f64 },
}

/// Multiplier applied to a recipe's base amounts.
///
/// Always within `[0.5, 3.0]` and a multiple of `0.5`; the constructor
/// refuses anything else instead of clamping.
///
/// # Example
///
/// ```rust
/// use pourover::recipe::Scale;
///
/// let scale = Scale::new(1.5).unwrap();
/// assert_eq!(scale.coffee(15.0), 22.5);
/// assert_eq!(scale.water(250.0), 375.0);
///
/// assert!(Scale::new(3.5).is_err());
/// assert!(Scale::new(1.25).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Scale(f64);

impl Scale {
    pub const MIN: f64 = 0.5;
    pub const MAX: f64 = 3.0;
    pub const INCREMENT: f64 = 0.5;

    pub const ONE: Scale = Scale(1.0);

    /// Every value a scale picker may offer.
    pub const PRESETS: [Scale; 6] = [
        Scale(0.5),
        Scale(1.0),
        Scale(1.5),
        Scale(2.0),
        Scale(2.5),
        Scale(3.0),
    ];

    /// Validate `value` against the range and increment.
    pub fn new(value: f64) -> Result<Self, ScaleError> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ScaleError::OutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }

        let steps = value / Self::INCREMENT;
        if (steps - steps.round()).abs() > 1e-9 {
            return Err(ScaleError::NotAnIncrement {
                value,
                increment: Self::INCREMENT,
            });
        }

        // Snap so 1.5000000001 and 1.5 compare equal.
        Ok(Self(steps.round() * Self::INCREMENT))
    }

    /// Raw multiplier.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Scaled coffee dose, rounded to one decimal place.
    pub fn coffee(&self, base_grams: f64) -> f64 {
        round_to_tenth(base_grams * self.0)
    }

    /// Scaled water volume, rounded to a whole millilitre.
    pub fn water(&self, base_ml: f64) -> f64 {
        (base_ml * self.0).round()
    }

    /// Scaled per-step pour or target weight, rounded to a whole unit.
    pub fn amount(&self, base: Option<f64>) -> Option<f64> {
        base.map(|b| (b * self.0).round())
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<f64> for Scale {
    type Error = ScaleError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Scale> for f64 {
    fn from(scale: Scale) -> Self {
        scale.0
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_preset() {
        for preset in Scale::PRESETS {
            assert_eq!(Scale::new(preset.value()), Ok(preset));
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            Scale::new(0.0),
            Err(ScaleError::OutOfRange { .. })
        ));
        assert!(matches!(
            Scale::new(3.5),
            Err(ScaleError::OutOfRange { .. })
        ));
        assert!(matches!(
            Scale::new(f64::NAN),
            Err(ScaleError::OutOfRange { .. })
        ));
        assert!(matches!(
            Scale::new(f64::INFINITY),
            Err(ScaleError::OutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_values_between_increments() {
        assert!(matches!(
            Scale::new(1.25),
            Err(ScaleError::NotAnIncrement { .. })
        ));
        assert!(matches!(
            Scale::new(2.1),
            Err(ScaleError::NotAnIncrement { .. })
        ));
    }

    #[test]
    fn coffee_rounds_to_one_decimal() {
        let scale = Scale::new(1.5).unwrap();
        assert_eq!(scale.coffee(15.0), 22.5);
        assert_eq!(scale.coffee(18.5), 27.8); // 27.75
        assert_eq!(Scale::new(0.5).unwrap().coffee(12.25), 6.1); // 6.125
    }

    #[test]
    fn water_rounds_to_integer() {
        let scale = Scale::new(1.5).unwrap();
        assert_eq!(scale.water(250.0), 375.0);
        assert_eq!(scale.water(255.0), 383.0); // 382.5
        assert_eq!(Scale::new(2.5).unwrap().water(33.0), 83.0); // 82.5
    }

    #[test]
    fn amount_passes_through_none() {
        assert_eq!(Scale::ONE.amount(None), None);
        assert_eq!(Scale::new(2.0).unwrap().amount(Some(50.0)), Some(100.0));
    }

    #[test]
    fn default_is_one() {
        assert_eq!(Scale::default(), Scale::ONE);
    }

    #[test]
    fn serde_validates_on_the_way_in() {
        let scale: Scale = serde_json::from_str("2.5").unwrap();
        assert_eq!(scale.value(), 2.5);
        assert!(serde_json::from_str::<Scale>("4.0").is_err());
        assert_eq!(serde_json::to_string(&scale).unwrap(), "2.5");
    }

    #[test]
    fn display_appends_multiplier() {
        assert_eq!(Scale::new(1.5).unwrap().to_string(), "1.5x");
    }
}
