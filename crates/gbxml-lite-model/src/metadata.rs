// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Document metadata taken from the gbXML root element

use serde::{Deserialize, Serialize};

/// Attributes of the `<gbXML>` root element
///
/// Unit fields keep the gbXML enumeration text (e.g. "Meters", "SquareFeet").
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// gbXML schema version (e.g. "0.37", "6.01")
    pub version: Option<String>,
    /// Length unit of coordinates
    pub length_unit: Option<String>,
    /// Unit of area values
    pub area_unit: Option<String>,
    /// Unit of volume values
    pub volume_unit: Option<String>,
    /// Temperature unit
    pub temperature_unit: Option<String>,
    /// Whether simulation results are reported in SI units
    pub use_si_units_for_results: Option<bool>,
}

impl DocumentMetadata {
    /// Length unit, falling back to "Meters" when the document does not say
    pub fn length_unit_or_default(&self) -> &str {
        self.length_unit.as_deref().unwrap_or("Meters")
    }
}
