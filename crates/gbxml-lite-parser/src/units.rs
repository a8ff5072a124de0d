// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit scale lookup for gbXML unit enumerations

/// Scale from a gbXML `lengthUnit` value to meters
///
/// Returns `None` for values outside the gbXML enumeration.
pub fn length_unit_scale(unit: &str) -> Option<f64> {
    let scale = match unit {
        "Kilometers" => scales::KILOMETRE,
        "Meters" => scales::METRE,
        "Centimeters" => scales::CENTIMETRE,
        "Millimeters" => scales::MILLIMETRE,
        "Miles" => scales::MILE,
        "Yards" => scales::YARD,
        "Feet" => scales::FOOT,
        "Inches" => scales::INCH,
        _ => return None,
    };
    Some(scale)
}

/// Scale from a gbXML `areaUnit` value to square meters
pub fn area_unit_scale(unit: &str) -> Option<f64> {
    let base = match unit {
        "SquareKilometers" => scales::KILOMETRE,
        "SquareMeters" => scales::METRE,
        "SquareCentimeters" => scales::CENTIMETRE,
        "SquareMillimeters" => scales::MILLIMETRE,
        "SquareMiles" => scales::MILE,
        "SquareYards" => scales::YARD,
        "SquareFeet" => scales::FOOT,
        "SquareInches" => scales::INCH,
        _ => return None,
    };
    Some(base * base)
}

/// Scale from a gbXML `volumeUnit` value to cubic meters
pub fn volume_unit_scale(unit: &str) -> Option<f64> {
    let base = match unit {
        "CubicKilometers" => scales::KILOMETRE,
        "CubicMeters" => scales::METRE,
        "CubicCentimeters" => scales::CENTIMETRE,
        "CubicMillimeters" => scales::MILLIMETRE,
        "CubicMiles" => scales::MILE,
        "CubicYards" => scales::YARD,
        "CubicFeet" => scales::FOOT,
        "CubicInches" => scales::INCH,
        _ => return None,
    };
    Some(base * base * base)
}

/// Common unit scales for reference
pub mod scales {
    /// Meters to meters (identity)
    pub const METRE: f64 = 1.0;
    /// Millimeters to meters
    pub const MILLIMETRE: f64 = 0.001;
    /// Centimeters to meters
    pub const CENTIMETRE: f64 = 0.01;
    /// Kilometers to meters
    pub const KILOMETRE: f64 = 1000.0;
    /// Inches to meters
    pub const INCH: f64 = 0.0254;
    /// Feet to meters
    pub const FOOT: f64 = 0.3048;
    /// Yards to meters
    pub const YARD: f64 = 0.9144;
    /// Miles to meters
    pub const MILE: f64 = 1609.344;
}
