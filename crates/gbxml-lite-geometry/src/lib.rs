// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # gbXML-Lite Geometry Processing
//!
//! Geometry utilities over the `gbxml-lite-model` data model.
//!
//! ## Overview
//!
//! - **Triangulation**: Ear clipping for concave PolyLoops via earcutr,
//!   exposed to the parser as [`EarcutTriangulator`]
//! - **Measurement**: Surface areas, closed shell volumes and bounding boxes
//! - **Mesh Assembly**: Flat-shaded [`MeshData`](gbxml_lite_model::MeshData)
//!   per surface, opening or space
//! - **Analysis**: Computed space metrics next to the declared values
//!
//! Batch operations over a structure or building run in parallel with rayon.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gbxml_lite_geometry::{structure_meshes, EarcutTriangulator};
//! use gbxml_lite_parser::GbxmlParser;
//! use gbxml_lite_model::BemParser;
//!
//! let parser = GbxmlParser::new().with_triangulator(EarcutTriangulator);
//! let document = parser.parse(gbxml_content)?;
//!
//! for surface in structure_meshes(&document.structure)? {
//!     println!("{}: {} triangles", surface.id, surface.mesh.triangle_count());
//! }
//! ```

pub mod analysis;
pub mod error;
pub mod measure;
pub mod mesh;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

// Re-export main types
pub use analysis::{building_metrics, space_metrics, SpaceMetrics};
pub use error::{Error, Result};
pub use measure::{
    closed_shell_volume, face_area, face_bounds, model_area, model_bounds, structure_bounds,
    BoundingBox,
};
pub use mesh::{face_to_mesh, model_to_mesh, space_mesh, structure_meshes, surface_mesh, SurfaceMesh};
pub use triangulation::{
    calculate_polygon_normal, project_to_2d, triangulate_loop, triangulate_polygon,
    EarcutTriangulator,
};
