// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! gbXML-Lite Parser - gbXML reader
//!
//! This crate reads gbXML (Green Building XML) documents into the data model
//! defined in `gbxml-lite-model` and implements its [`BemParser`] trait.
//!
//! # Features
//!
//! - **DOM parsing** with `roxmltree`, namespace-agnostic tag matching
//! - **Vertex welding** - equal points inside one surface share an index
//! - **Pluggable triangulation** through [`LoopTriangulator`]
//! - **Strict or lenient** handling of incomplete elements
//! - **Progress reporting** for large files
//!
//! # Example
//!
//! ```ignore
//! use gbxml_lite_parser::GbxmlParser;
//! use gbxml_lite_model::BemParser;
//!
//! let parser = GbxmlParser::new();
//! let document = parser.parse(gbxml_content)?;
//!
//! let roofs = document.structure.surfaces_of_type("Roof").count();
//! println!("Found {} roofs", roofs);
//! ```

mod buildings;
mod document;
mod polyloop;
mod surfaces;
mod units;
mod xml;

pub use polyloop::{AxisConvention, CoordinateTransform, MeshBuilder};
pub use units::{area_unit_scale, length_unit_scale, scales, volume_unit_scale};

use gbxml_lite_model::{
    BemDocument, BemParser, Building, FanTriangulator, LoopTriangulator, ParseError,
    ProgressCallback, Result, Structure,
};
use std::path::Path;
use std::sync::Arc;

/// Main gbXML parser implementing the `BemParser` trait
#[derive(Clone)]
pub struct GbxmlParser {
    /// Fail on incomplete elements instead of skipping them
    pub strict: bool,
    /// Output axis convention
    pub axis: AxisConvention,
    /// Convert coordinates, areas and volumes to meters
    pub scale_to_meters: bool,
    /// Whether to read surfaces
    pub extract_structure: bool,
    /// Whether to read buildings and spaces
    pub extract_buildings: bool,
    /// Polygon triangulation strategy
    pub triangulator: Arc<dyn LoopTriangulator>,
}

impl Default for GbxmlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl GbxmlParser {
    /// Create a new parser with default settings
    pub fn new() -> Self {
        Self {
            strict: true,
            axis: AxisConvention::YUp,
            scale_to_meters: false,
            extract_structure: true,
            extract_buildings: true,
            triangulator: Arc::new(FanTriangulator),
        }
    }

    /// Create a parser that only reads surfaces
    pub fn structure_only() -> Self {
        Self::new().with_buildings(false)
    }

    /// Set strict mode
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the output axis convention
    pub fn with_axis(mut self, axis: AxisConvention) -> Self {
        self.axis = axis;
        self
    }

    /// Set whether to convert values to meters
    pub fn scale_to_meters(mut self, enabled: bool) -> Self {
        self.scale_to_meters = enabled;
        self
    }

    /// Set whether to read surfaces
    pub fn with_structure(mut self, enabled: bool) -> Self {
        self.extract_structure = enabled;
        self
    }

    /// Set whether to read buildings
    pub fn with_buildings(mut self, enabled: bool) -> Self {
        self.extract_buildings = enabled;
        self
    }

    /// Set the triangulation strategy
    pub fn with_triangulator(mut self, triangulator: impl LoopTriangulator + 'static) -> Self {
        self.triangulator = Arc::new(triangulator);
        self
    }

    /// Parse a gbXML file from disk
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<BemDocument> {
        let content = std::fs::read_to_string(path)?;
        self.parse(&content)
    }

    /// Look up a unit scale; unknown units fail in strict mode and fall back
    /// to 1.0 otherwise
    pub(crate) fn unit_scale(
        &self,
        kind: &str,
        unit: &str,
        lookup: fn(&str) -> Option<f64>,
    ) -> Result<f64> {
        match lookup(unit) {
            Some(scale) => Ok(scale),
            None if self.strict => Err(ParseError::format(format!("unknown {kind} '{unit}'"))),
            None => {
                log::warn!("Unknown {} '{}', leaving values unscaled", kind, unit);
                Ok(1.0)
            }
        }
    }
}

impl BemParser for GbxmlParser {
    fn parse(&self, content: &str) -> Result<BemDocument> {
        document::read_document(self, content, None)
    }

    fn parse_with_progress(
        &self,
        content: &str,
        on_progress: ProgressCallback,
    ) -> Result<BemDocument> {
        document::read_document(self, content, Some(on_progress))
    }
}

/// Quick parse function for simple use cases
pub fn parse(content: &str) -> Result<BemDocument> {
    GbxmlParser::new().parse(content)
}

/// Parse with progress reporting
pub fn parse_with_progress(
    content: &str,
    on_progress: impl Fn(&str, f32) + Send + 'static,
) -> Result<BemDocument> {
    GbxmlParser::new().parse_with_progress(content, Box::new(on_progress))
}

/// Parse and keep only the surfaces
pub fn parse_structure(content: &str) -> Result<Structure> {
    GbxmlParser::structure_only().parse_structure(content)
}

/// Parse and keep only the buildings
pub fn parse_buildings(content: &str) -> Result<Vec<Building>> {
    GbxmlParser::new().with_structure(false).parse_buildings(content)
}
