// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for gbXML geometry
//!
//! Plain data containers. Index buffers (`Model::faces`, `Face::index`) are
//! triangle lists: every three consecutive indices form one triangle.

use crate::DocumentMetadata;
use serde::{Deserialize, Serialize};

/// A point in 3D space
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Components as `[x, y, z]`
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vertex {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Vertex> for [f32; 3] {
    fn from(v: Vertex) -> Self {
        v.to_array()
    }
}

/// Indexed triangle mesh: a vertex list and a flat index buffer into it
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Model {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<u32>,
}

impl Model {
    /// Create a model from its vertex list and index buffer
    pub fn new(vertices: Vec<Vertex>, faces: Vec<u32>) -> Self {
        Self { vertices, faces }
    }

    /// Check if the model has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count (trailing partial triangles are not counted)
    pub fn triangle_count(&self) -> usize {
        self.faces.len() / 3
    }

    /// Iterate triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.faces.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}

/// A building surface (wall, roof, slab, ...) or an opening within one
///
/// Openings are themselves `Surface`s owned by their parent. `openings` is
/// `None` when the surface carries no openings list at all, which is distinct
/// from `Some(vec![])`.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Surface {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub surface_type: String,
    pub model: Model,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openings: Option<Vec<Surface>>,
}

impl Surface {
    /// Create a surface without name or openings
    pub fn new(id: impl Into<String>, surface_type: impl Into<String>, model: Model) -> Self {
        Self {
            id: id.into(),
            name: None,
            surface_type: surface_type.into(),
            model,
            openings: None,
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the openings list
    pub fn with_openings(mut self, openings: Vec<Surface>) -> Self {
        self.openings = Some(openings);
        self
    }

    /// Openings as a slice (empty when absent)
    pub fn openings(&self) -> &[Surface] {
        self.openings.as_deref().unwrap_or(&[])
    }
}

/// All surfaces of a document
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Structure {
    pub surfaces: Vec<Surface>,
}

impl Structure {
    /// Create a structure from its surfaces
    pub fn new(surfaces: Vec<Surface>) -> Self {
        Self { surfaces }
    }

    /// Check if there are no surfaces
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Number of top-level surfaces
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }
}

/// A building and its spaces
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub building_type: String,
    pub area: f32,
    pub spaces: Vec<Space>,
}

impl Building {
    /// Create a building without spaces
    pub fn new(id: impl Into<String>, building_type: impl Into<String>, area: f32) -> Self {
        Self {
            id: id.into(),
            building_type: building_type.into(),
            area,
            spaces: Vec::new(),
        }
    }

    /// Add a space
    pub fn add_space(&mut self, space: Space) {
        self.spaces.push(space);
    }
}

/// A room or area within a building
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Space {
    pub id: String,
    /// Reference to an external zone, not resolved here
    pub zone_id_ref: String,
    pub name: String,
    pub area: f32,
    pub volume: f32,
    pub shell_geometry: ShellGeometry,
    pub cad_object_id: i32,
}

/// Enclosure of a space
///
/// Both shells are optional and independent: a document may carry either,
/// both, or neither. See [`ShellGeometry::shell_kind`].
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct ShellGeometry {
    pub id: String,
    /// Free-form unit tag as written in the source (e.g. "Meters")
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_shell: Option<ClosedShell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytical_shell: Option<AnalyticalShell>,
}

impl ShellGeometry {
    /// Create shell geometry with no shells attached
    pub fn new(id: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            unit: unit.into(),
            closed_shell: None,
            analytical_shell: None,
        }
    }

    /// Attach a closed shell
    pub fn with_closed_shell(mut self, shell: ClosedShell) -> Self {
        self.closed_shell = Some(shell);
        self
    }

    /// Attach an analytical shell
    pub fn with_analytical_shell(mut self, shell: AnalyticalShell) -> Self {
        self.analytical_shell = Some(shell);
        self
    }
}

/// Closed mesh of faces
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct ClosedShell {
    pub faces: Vec<Face>,
}

/// Set of typed analytical surfaces
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyticalShell {
    pub shell_surfaces: Vec<ShellSurface>,
}

/// One typed surface of an analytical shell
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct ShellSurface {
    pub surface_type: String,
    pub faces: Vec<Face>,
}

/// A planar polygon given as explicit coordinates and a triangle index list
///
/// Coordinate tuples are not arity-checked; see [`crate::validate_face`].
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Face {
    pub vertices: Vec<Vec<f32>>,
    pub index: Vec<u32>,
}

impl Face {
    /// Create a face
    pub fn new(vertices: Vec<Vec<f32>>, index: Vec<u32>) -> Self {
        Self { vertices, index }
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.index.len() / 3
    }

    /// Coordinate tuple at `i` as a point, if it has at least three components
    pub fn point(&self, i: usize) -> Option<[f32; 3]> {
        match self.vertices.get(i)?.as_slice() {
            [x, y, z, ..] => Some([*x, *y, *z]),
            _ => None,
        }
    }
}

/// Everything read from one gbXML document
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct BemDocument {
    pub metadata: DocumentMetadata,
    pub structure: Structure,
    pub buildings: Vec<Building>,
}

/// GPU-ready mesh data
///
/// Contains flattened vertex data suitable for GPU rendering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions as flattened [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Vertex normals as flattened [nx, ny, nz, nx, ny, nz, ...]
    pub normals: Vec<f32>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create mesh with pre-allocated capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Merge another mesh into this one
    pub fn merge(&mut self, other: &MeshData) {
        let vertex_offset = self.vertex_count() as u32;

        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|i| i + vertex_offset));
    }
}
