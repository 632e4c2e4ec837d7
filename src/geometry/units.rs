// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Length units
//!
//! Host models store lengths in decimal feet. Output coordinates may be
//! converted into any of the units below.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target length unit for exported coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Feet,
    Inches,
    Millimeters,
    Centimeters,
    Decimeters,
    Meters,
}

impl LengthUnit {
    /// How many of this unit make one internal foot
    pub fn per_foot(&self) -> f64 {
        match self {
            LengthUnit::Feet => 1.0,
            LengthUnit::Inches => 12.0,
            LengthUnit::Millimeters => 304.8,
            LengthUnit::Centimeters => 30.48,
            LengthUnit::Decimeters => 3.048,
            LengthUnit::Meters => 0.3048,
        }
    }

    /// Convert a value in internal units (feet) to this unit
    pub fn from_internal(&self, value: f64) -> f64 {
        value * self.per_foot()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LengthUnit::Feet => "feet",
            LengthUnit::Inches => "inches",
            LengthUnit::Millimeters => "millimeters",
            LengthUnit::Centimeters => "centimeters",
            LengthUnit::Decimeters => "decimeters",
            LengthUnit::Meters => "meters",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ft" | "foot" | "feet" => Ok(LengthUnit::Feet),
            "in" | "inch" | "inches" => Ok(LengthUnit::Inches),
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => {
                Ok(LengthUnit::Millimeters)
            }
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => {
                Ok(LengthUnit::Centimeters)
            }
            "dm" | "decimeter" | "decimeters" | "decimetre" | "decimetres" => {
                Ok(LengthUnit::Decimeters)
            }
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(LengthUnit::Meters),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_internal() {
        assert_relative_eq!(LengthUnit::Millimeters.from_internal(1.0), 304.8, epsilon = 1e-12);
        assert_relative_eq!(LengthUnit::Meters.from_internal(10.0), 3.048, epsilon = 1e-12);
        assert_relative_eq!(LengthUnit::Inches.from_internal(0.5), 6.0, epsilon = 1e-12);
        assert_relative_eq!(LengthUnit::Feet.from_internal(2.5), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_names_and_symbols() {
        assert_eq!("mm".parse::<LengthUnit>(), Ok(LengthUnit::Millimeters));
        assert_eq!("Meters".parse::<LengthUnit>(), Ok(LengthUnit::Meters));
        assert_eq!("meter".parse::<LengthUnit>(), Ok(LengthUnit::Meters));
        assert_eq!("metres".parse::<LengthUnit>(), Ok(LengthUnit::Meters));
        assert_eq!("in".parse::<LengthUnit>(), Ok(LengthUnit::Inches));
        assert_eq!(" Foot ".parse::<LengthUnit>(), Ok(LengthUnit::Feet));
        assert!("furlong".parse::<LengthUnit>().is_err());
    }
}
