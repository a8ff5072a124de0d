// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opt-in consistency checks
//!
//! Nothing in the data model calls these; constructors accept any field
//! values. Use them before handing meshes to code that indexes blindly.
//!
//! - Index buffers hold whole triangles (length is a multiple of 3)
//! - Every index refers to an existing vertex
//! - Face coordinate tuples have exactly three components
//! - Surface IDs (including openings) are unique within a structure
//! - Space IDs are unique within a building

use crate::{Building, Face, Model, Structure};
use std::collections::HashSet;
use thiserror::Error;

/// Validation result type
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Consistency violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Index buffer length is not a multiple of three
    #[error("{owner}: index buffer length {len} is not a multiple of 3")]
    PartialTriangle { owner: String, len: usize },

    /// Index points past the vertex list
    #[error("{owner}: index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        owner: String,
        index: u32,
        vertex_count: usize,
    },

    /// Coordinate tuple with the wrong number of components
    #[error("{owner}: vertex {vertex} has {arity} components, expected 3")]
    BadArity {
        owner: String,
        vertex: usize,
        arity: usize,
    },

    /// Same ID used twice
    #[error("Duplicate {kind} ID '{id}'")]
    DuplicateId { kind: &'static str, id: String },
}

fn check_indices(owner: &str, indices: &[u32], vertex_count: usize) -> Result<()> {
    if indices.len() % 3 != 0 {
        return Err(ValidationError::PartialTriangle {
            owner: owner.to_string(),
            len: indices.len(),
        });
    }
    if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(ValidationError::IndexOutOfRange {
            owner: owner.to_string(),
            index,
            vertex_count,
        });
    }
    Ok(())
}

/// Validate a model's index buffer against its vertex list
pub fn validate_model(model: &Model) -> Result<()> {
    check_indices("model", &model.faces, model.vertices.len())
}

/// Validate a face's coordinate arity and index list
pub fn validate_face(face: &Face) -> Result<()> {
    if let Some((vertex, v)) = face.vertices.iter().enumerate().find(|(_, v)| v.len() != 3) {
        return Err(ValidationError::BadArity {
            owner: "face".to_string(),
            vertex,
            arity: v.len(),
        });
    }
    check_indices("face", &face.index, face.vertices.len())
}

/// Validate every surface and opening of a structure
pub fn validate_structure(structure: &Structure) -> Result<()> {
    let mut seen = HashSet::new();
    for surface in structure.iter() {
        if !seen.insert(surface.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                kind: "surface",
                id: surface.id.clone(),
            });
        }
        let owner = format!("surface '{}'", surface.id);
        check_indices(&owner, &surface.model.faces, surface.model.vertices.len())?;
    }
    Ok(())
}

/// Validate the spaces and shell faces of a building
pub fn validate_building(building: &Building) -> Result<()> {
    let mut seen = HashSet::new();
    for space in &building.spaces {
        if !seen.insert(space.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                kind: "space",
                id: space.id.clone(),
            });
        }
        for face in space.faces() {
            validate_face(face).map_err(|e| with_owner(e, &format!("space '{}'", space.id)))?;
        }
    }
    Ok(())
}

fn with_owner(err: ValidationError, owner: &str) -> ValidationError {
    match err {
        ValidationError::PartialTriangle { len, .. } => ValidationError::PartialTriangle {
            owner: owner.to_string(),
            len,
        },
        ValidationError::IndexOutOfRange {
            index,
            vertex_count,
            ..
        } => ValidationError::IndexOutOfRange {
            owner: owner.to_string(),
            index,
            vertex_count,
        },
        ValidationError::BadArity { vertex, arity, .. } => ValidationError::BadArity {
            owner: owner.to_string(),
            vertex,
            arity,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClosedShell, ShellGeometry, Space, Surface, Vertex};

    fn triangle() -> Model {
        Model::new(vec![Vertex::default(); 3], vec![0, 1, 2])
    }

    #[test]
    fn test_valid_model() {
        assert!(validate_model(&triangle()).is_ok());
        assert!(validate_model(&Model::default()).is_ok());
    }

    #[test]
    fn test_index_out_of_range() {
        let model = Model::new(vec![Vertex::default(); 3], vec![0, 1, 3]);
        assert_eq!(
            validate_model(&model),
            Err(ValidationError::IndexOutOfRange {
                owner: "model".to_string(),
                index: 3,
                vertex_count: 3,
            })
        );
    }

    #[test]
    fn test_partial_triangle() {
        let model = Model::new(vec![Vertex::default(); 3], vec![0, 1]);
        assert!(matches!(
            validate_model(&model),
            Err(ValidationError::PartialTriangle { len: 2, .. })
        ));
    }

    #[test]
    fn test_face_arity() {
        let face = Face::new(vec![vec![0.0; 3], vec![0.0; 2], vec![0.0; 3]], vec![0, 1, 2]);
        assert!(matches!(
            validate_face(&face),
            Err(ValidationError::BadArity { vertex: 1, arity: 2, .. })
        ));
    }

    #[test]
    fn test_duplicate_surface_ids_across_openings() {
        let structure = Structure::new(vec![
            Surface::new("s1", "ExteriorWall", triangle())
                .with_openings(vec![Surface::new("s1", "FixedWindow", triangle())]),
        ]);
        assert_eq!(
            validate_structure(&structure),
            Err(ValidationError::DuplicateId {
                kind: "surface",
                id: "s1".to_string(),
            })
        );
    }

    #[test]
    fn test_building_face_error_names_space() {
        let bad_face = Face::new(vec![vec![0.0; 3]], vec![0, 0, 7]);
        let mut building = Building::new("b1", "Office", 10.0);
        building.add_space(Space {
            id: "sp1".to_string(),
            shell_geometry: ShellGeometry::new("sg1", "Meters")
                .with_closed_shell(ClosedShell { faces: vec![bad_face] }),
            ..Default::default()
        });

        let err = validate_building(&building).unwrap_err();
        assert_eq!(
            err.to_string(),
            "space 'sp1': index 7 out of range for 1 vertices"
        );
    }
}
