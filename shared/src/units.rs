//! Volume unit handling for water tracking
//!
//! Water intake is stored canonically in milliliters and converted at
//! display boundaries. Each logged entry keeps the unit it was entered
//! with, so switching the display unit never rewrites history.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliliters per US fluid ounce.
pub const ML_PER_OZ: f64 = 29.5735;

/// Volume unit preference for water intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VolumeUnit {
    #[default]
    Ml,
    Oz,
}

impl VolumeUnit {
    /// Convert a value in this unit to milliliters
    pub fn to_ml(&self, value: f64) -> f64 {
        match self {
            VolumeUnit::Ml => value,
            VolumeUnit::Oz => value * ML_PER_OZ,
        }
    }

    /// Convert a value in milliliters to this unit
    pub fn from_ml(&self, ml: f64) -> f64 {
        match self {
            VolumeUnit::Ml => ml,
            VolumeUnit::Oz => ml / ML_PER_OZ,
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            VolumeUnit::Ml => "ml",
            VolumeUnit::Oz => "oz",
        }
    }

    /// The other unit, for the display-unit toggle
    pub fn toggled(&self) -> Self {
        match self {
            VolumeUnit::Ml => VolumeUnit::Oz,
            VolumeUnit::Oz => VolumeUnit::Ml,
        }
    }
}

impl fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for VolumeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ml" | "milliliter" | "milliliters" => Ok(VolumeUnit::Ml),
            "oz" | "fl oz" | "ounce" | "ounces" => Ok(VolumeUnit::Oz),
            _ => Err(format!("Unknown volume unit: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: volume conversion round-trip stays within 1e-6 relative error
        #[test]
        fn prop_volume_roundtrip_ml(ml in 0.1f64..10000.0) {
            let oz = VolumeUnit::Oz.from_ml(ml);
            let back_to_ml = VolumeUnit::Oz.to_ml(oz);
            prop_assert!((ml - back_to_ml).abs() / ml < 1e-6,
                "Round-trip failed: {} -> {} -> {}", ml, oz, back_to_ml);
        }

        #[test]
        fn prop_volume_roundtrip_oz(oz in 0.1f64..350.0) {
            let ml = VolumeUnit::Oz.to_ml(oz);
            let back_to_oz = VolumeUnit::Oz.from_ml(ml);
            prop_assert!((oz - back_to_oz).abs() / oz < 1e-6,
                "Round-trip failed: {} -> {} -> {}", oz, ml, back_to_oz);
        }

        /// Property: Ml identity conversion
        #[test]
        fn prop_ml_identity(ml in 0.0f64..10000.0) {
            prop_assert_eq!(VolumeUnit::Ml.to_ml(ml), ml);
            prop_assert_eq!(VolumeUnit::Ml.from_ml(ml), ml);
        }

        /// Property: toggling twice is the identity
        #[test]
        fn prop_toggle_involution(unit in prop::sample::select(vec![VolumeUnit::Ml, VolumeUnit::Oz])) {
            prop_assert_eq!(unit.toggled().toggled(), unit);
        }
    }

    #[test]
    fn test_known_volume_conversions() {
        // 1 oz = 29.5735 ml
        let ml = VolumeUnit::Oz.to_ml(1.0);
        assert!((ml - 29.5735).abs() < 1e-9);

        // 500 ml = 16.907 oz
        let oz = VolumeUnit::Oz.from_ml(500.0);
        assert!((oz - 16.907).abs() < 0.001);

        // 8.45 oz = 249.896 ml
        let ml = VolumeUnit::Oz.to_ml(8.45);
        assert!((ml - 249.896).abs() < 0.001);
    }

    #[test]
    fn test_volume_unit_parsing() {
        assert_eq!("ml".parse::<VolumeUnit>().unwrap(), VolumeUnit::Ml);
        assert_eq!("Oz".parse::<VolumeUnit>().unwrap(), VolumeUnit::Oz);
        assert_eq!("ounces".parse::<VolumeUnit>().unwrap(), VolumeUnit::Oz);
        assert!("liters".parse::<VolumeUnit>().is_err());
    }

    #[test]
    fn test_volume_unit_display() {
        assert_eq!(format!("{}", VolumeUnit::Ml), "ml");
        assert_eq!(format!("{}", VolumeUnit::Oz), "oz");
    }
}
