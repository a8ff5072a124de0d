// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GPU-ready mesh assembly
//!
//! Indexed models are flattened into [`MeshData`] with one vertex per
//! triangle corner so every triangle carries its own flat normal.

use crate::measure::{face_triangles, model_triangles};
use crate::{Point3, Result, Vector3};
use gbxml_lite_model::{Face, MeshData, Model, Space, Structure, Surface, SurfaceCategory};
use rayon::prelude::*;

/// Mesh of one surface or opening, ready for rendering
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceMesh {
    pub id: String,
    pub category: SurfaceCategory,
    /// RGBA color
    pub color: [f32; 4],
    pub mesh: MeshData,
}

/// Unit normal of a triangle, zero when degenerate
#[inline]
fn triangle_normal([a, b, c]: &[Point3<f64>; 3]) -> Vector3<f64> {
    (b - a)
        .cross(&(c - a))
        .try_normalize(1e-12)
        .unwrap_or_else(Vector3::zeros)
}

fn flatten(triangles: &[[Point3<f64>; 3]]) -> MeshData {
    let mut mesh = MeshData::with_capacity(triangles.len() * 3, triangles.len() * 3);
    for triangle in triangles {
        let normal = triangle_normal(triangle);
        for p in triangle {
            let base = mesh.vertex_count() as u32;
            mesh.positions
                .extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
            mesh.normals
                .extend_from_slice(&[normal.x as f32, normal.y as f32, normal.z as f32]);
            mesh.indices.push(base);
        }
    }
    mesh
}

/// Flatten a surface model
pub fn model_to_mesh(model: &Model) -> Result<MeshData> {
    Ok(flatten(&model_triangles(model)?))
}

/// Flatten a shell face
pub fn face_to_mesh(face: &Face) -> Result<MeshData> {
    Ok(flatten(&face_triangles(face)?))
}

/// Mesh of a surface, optionally merged with all of its nested openings
pub fn surface_mesh(surface: &Surface, include_openings: bool) -> Result<MeshData> {
    if !include_openings {
        return model_to_mesh(&surface.model);
    }
    let mut mesh = MeshData::new();
    for s in surface.iter() {
        mesh.merge(&model_to_mesh(&s.model)?);
    }
    Ok(mesh)
}

/// One mesh per surface and opening, built in parallel
///
/// Surfaces without triangles are left out. Order follows
/// [`Structure::iter`].
pub fn structure_meshes(structure: &Structure) -> Result<Vec<SurfaceMesh>> {
    let surfaces: Vec<&Surface> = structure.iter().collect();
    let meshes: Vec<Option<SurfaceMesh>> = surfaces
        .par_iter()
        .map(|surface| -> Result<Option<SurfaceMesh>> {
            let mesh = model_to_mesh(&surface.model)?;
            if mesh.is_empty() {
                return Ok(None);
            }
            let category = surface.category();
            Ok(Some(SurfaceMesh {
                id: surface.id.clone(),
                category,
                color: category.default_color(),
                mesh,
            }))
        })
        .collect::<Result<_>>()?;
    Ok(meshes.into_iter().flatten().collect())
}

/// All shell faces of a space merged into one mesh
pub fn space_mesh(space: &Space) -> Result<MeshData> {
    let mut mesh = MeshData::new();
    for face in space.faces() {
        mesh.merge(&face_to_mesh(face)?);
    }
    Ok(mesh)
}
