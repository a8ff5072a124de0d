// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PolyLoop decoding and indexed mesh assembly
//!
//! A `PolyLoop` is a list of `CartesianPoint`s, each holding three
//! `Coordinate` elements. Loops are welded into a shared vertex list (exactly
//! equal points get one index) and triangulated into a triangle list.

use crate::xml::{children, parse_f32};
use gbxml_lite_model::{Face, LoopTriangulator, Model, ParseError, Result, Vertex};
use roxmltree::Node;
use rustc_hash::FxHashMap;

/// Output axis convention
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AxisConvention {
    /// gbXML is Z-up; emit (X, Z, Y) so Y points up
    #[default]
    YUp,
    /// Keep file order (X, Y, Z)
    ZUp,
}

/// Axis mapping and unit scale applied to every coordinate read
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateTransform {
    pub axis: AxisConvention,
    pub scale: f64,
}

impl Default for CoordinateTransform {
    fn default() -> Self {
        Self {
            axis: AxisConvention::YUp,
            scale: 1.0,
        }
    }
}

impl CoordinateTransform {
    /// Map a point given in file order
    pub fn apply(&self, [x, y, z]: [f32; 3]) -> [f32; 3] {
        let p = match self.axis {
            AxisConvention::YUp => [x, z, y],
            AxisConvention::ZUp => [x, y, z],
        };
        if self.scale == 1.0 {
            p
        } else {
            p.map(|c| (c as f64 * self.scale) as f32)
        }
    }
}

/// Read the points of one `PolyLoop`
pub fn read_polyloop(
    node: Node<'_, '_>,
    transform: &CoordinateTransform,
) -> Result<Vec<[f32; 3]>> {
    children(node, "CartesianPoint")
        .map(|point| -> Result<[f32; 3]> {
            let coords = children(point, "Coordinate")
                .map(|c| parse_f32("Coordinate", c.text().unwrap_or("")))
                .collect::<Result<Vec<f32>>>()?;
            match coords.as_slice() {
                [x, y, z] => Ok(transform.apply([*x, *y, *z])),
                _ => Err(ParseError::geometry(
                    "CartesianPoint",
                    format!("expected 3 coordinates, found {}", coords.len()),
                )),
            }
        })
        .collect()
}

/// Welds loop points into one vertex list and collects triangle indices
pub struct MeshBuilder<'t> {
    triangulator: &'t dyn LoopTriangulator,
    vertices: Vec<[f32; 3]>,
    lookup: FxHashMap<[u32; 3], u32>,
    indices: Vec<u32>,
}

impl<'t> MeshBuilder<'t> {
    pub fn new(triangulator: &'t dyn LoopTriangulator) -> Self {
        Self {
            triangulator,
            vertices: Vec::new(),
            lookup: FxHashMap::default(),
            indices: Vec::new(),
        }
    }

    /// Index of `p`, adding it if no equal point exists yet
    fn weld(&mut self, p: [f32; 3]) -> u32 {
        // +0.0 == -0.0 as floats but not as bits
        let key = p.map(|c| if c == 0.0 { 0.0f32.to_bits() } else { c.to_bits() });
        let next = self.vertices.len() as u32;
        let index = *self.lookup.entry(key).or_insert(next);
        if index == next {
            self.vertices.push(p);
        }
        index
    }

    /// Weld and triangulate one loop
    pub fn add_loop(&mut self, points: &[[f32; 3]]) -> Result<()> {
        let welded: Vec<u32> = points.iter().map(|p| self.weld(*p)).collect();
        for local in self.triangulator.triangulate(points)? {
            let index = welded.get(local as usize).ok_or_else(|| {
                ParseError::triangulation(format!(
                    "index {} out of range for loop of {} points",
                    local,
                    points.len()
                ))
            })?;
            self.indices.push(*index);
        }
        Ok(())
    }

    pub fn into_model(self) -> Model {
        Model {
            vertices: self.vertices.into_iter().map(Vertex::from).collect(),
            faces: self.indices,
        }
    }

    pub fn into_face(self) -> Face {
        Face {
            vertices: self.vertices.into_iter().map(|p| p.to_vec()).collect(),
            index: self.indices,
        }
    }
}
