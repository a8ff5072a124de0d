// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Areas, volumes and bounds of meshes
//!
//! All measurements are in the units of the coordinates and computed in f64.

use crate::{Error, Point3, Result};
use gbxml_lite_model::{ClosedShell, Face, Model, Structure};

/// Resolve a model's triangles to points, checking every index
pub fn model_triangles(model: &Model) -> Result<Vec<[Point3<f64>; 3]>> {
    let point = |i: u32| -> Result<Point3<f64>> {
        let v = model
            .vertices
            .get(i as usize)
            .ok_or_else(|| Error::index_out_of_range(i, model.vertices.len()))?;
        Ok(Point3::new(v.x as f64, v.y as f64, v.z as f64))
    };
    model
        .triangles()
        .map(|[a, b, c]| -> Result<[Point3<f64>; 3]> { Ok([point(a)?, point(b)?, point(c)?]) })
        .collect()
}

/// Resolve a face's triangles to points, checking every index and tuple
pub fn face_triangles(face: &Face) -> Result<Vec<[Point3<f64>; 3]>> {
    let point = |i: u32| -> Result<Point3<f64>> {
        if i as usize >= face.vertices.len() {
            return Err(Error::index_out_of_range(i, face.vertices.len()));
        }
        let [x, y, z] = face.point(i as usize).ok_or(Error::ShortVertex(i as usize))?;
        Ok(Point3::new(x as f64, y as f64, z as f64))
    };
    face.index
        .chunks_exact(3)
        .map(|t| -> Result<[Point3<f64>; 3]> { Ok([point(t[0])?, point(t[1])?, point(t[2])?]) })
        .collect()
}

/// Area of one triangle
#[inline]
pub fn triangle_area([a, b, c]: &[Point3<f64>; 3]) -> f64 {
    (b - a).cross(&(c - a)).norm() * 0.5
}

/// Signed volume of the tetrahedron formed with the origin
#[inline]
fn signed_volume([a, b, c]: &[Point3<f64>; 3]) -> f64 {
    a.coords.dot(&b.coords.cross(&c.coords)) / 6.0
}

/// Total triangle area of a model
pub fn model_area(model: &Model) -> Result<f64> {
    Ok(model_triangles(model)?.iter().map(triangle_area).sum())
}

/// Total triangle area of a face
pub fn face_area(face: &Face) -> Result<f64> {
    Ok(face_triangles(face)?.iter().map(triangle_area).sum())
}

/// Enclosed volume of a closed shell
///
/// Sums signed tetrahedra over all faces, so the result is exact for a
/// watertight shell with consistent winding in either orientation.
pub fn closed_shell_volume(shell: &ClosedShell) -> Result<f64> {
    let mut volume = 0.0;
    for face in &shell.faces {
        volume += face_triangles(face)?.iter().map(signed_volume).sum::<f64>();
    }
    Ok(volume.abs())
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    /// Bounds of a point set, `None` when empty
    pub fn from_points(points: impl IntoIterator<Item = Point3<f64>>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(
            Self {
                min: first,
                max: first,
            },
            |b, p| b.including(&p),
        ))
    }

    fn including(self, p: &Point3<f64>) -> Self {
        Self {
            min: self.min.inf(p),
            max: self.max.sup(p),
        }
    }

    /// Smallest box containing both
    pub fn union(&self, other: &BoundingBox) -> Self {
        self.including(&other.min).including(&other.max)
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn size(&self) -> crate::Vector3<f64> {
        self.max - self.min
    }
}

/// Bounds of a model's vertices
pub fn model_bounds(model: &Model) -> Option<BoundingBox> {
    BoundingBox::from_points(
        model
            .vertices
            .iter()
            .map(|v| Point3::new(v.x as f64, v.y as f64, v.z as f64)),
    )
}

/// Bounds of a face's coordinate tuples, ignoring short ones
pub fn face_bounds(face: &Face) -> Option<BoundingBox> {
    BoundingBox::from_points(
        (0..face.vertex_count())
            .filter_map(|i| face.point(i))
            .map(|[x, y, z]| Point3::new(x as f64, y as f64, z as f64)),
    )
}

/// Bounds of every surface and opening in a structure
pub fn structure_bounds(structure: &Structure) -> Option<BoundingBox> {
    structure
        .iter()
        .filter_map(|s| model_bounds(&s.model))
        .reduce(|a, b| a.union(&b))
}
