// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core traits for gbXML parsing
//!
//! These traits define the seams between the data model, parser backends and
//! geometry processing.

use crate::{BemDocument, Building, Result, Structure};

/// Progress callback type for parsing operations
pub type ProgressCallback = Box<dyn Fn(&str, f32) + Send>;

/// Main parsing interface - entry point for parsing gbXML content
///
/// # Example
///
/// ```ignore
/// use gbxml_lite_model::BemParser;
///
/// let parser: Box<dyn BemParser> = get_parser();
/// let document = parser.parse(gbxml_content)?;
/// println!("{} surfaces", document.structure.len());
/// ```
pub trait BemParser: Send + Sync {
    /// Parse gbXML content into a document
    ///
    /// # Arguments
    /// * `content` - The gbXML file content as a string
    fn parse(&self, content: &str) -> Result<BemDocument>;

    /// Parse gbXML content with progress reporting
    ///
    /// # Arguments
    /// * `content` - The gbXML file content as a string
    /// * `on_progress` - Callback function receiving (phase_name, percent_complete)
    fn parse_with_progress(
        &self,
        content: &str,
        on_progress: ProgressCallback,
    ) -> Result<BemDocument>;

    /// Parse and keep only the surfaces
    fn parse_structure(&self, content: &str) -> Result<Structure> {
        self.parse(content).map(|doc| doc.structure)
    }

    /// Parse and keep only the buildings
    fn parse_buildings(&self, content: &str) -> Result<Vec<Building>> {
        self.parse(content).map(|doc| doc.buildings)
    }
}

/// Polygon triangulation strategy
///
/// Given the points of one planar loop, returns a triangle list of indices
/// into `points`. Implementations decide how concave loops are handled.
pub trait LoopTriangulator: Send + Sync {
    fn triangulate(&self, points: &[[f32; 3]]) -> Result<Vec<u32>>;
}

/// Fan triangulation from the first point: `(p0, p(i-1), p(i))` for `i >= 2`
///
/// Exact for convex loops. Loops with fewer than three points produce no
/// triangles.
#[derive(Clone, Copy, Debug, Default)]
pub struct FanTriangulator;

impl LoopTriangulator for FanTriangulator {
    fn triangulate(&self, points: &[[f32; 3]]) -> Result<Vec<u32>> {
        Ok(fan_indices(points.len()))
    }
}

/// Triangle-list indices of a fan over `n` points
pub fn fan_indices(n: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(n.saturating_sub(2) * 3);
    for i in 2..n {
        indices.push(0);
        indices.push((i - 1) as u32);
        indices.push(i as u32);
    }
    indices
}
