// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for geometry processing

use thiserror::Error;

/// Geometry processing result type
pub type Result<T> = std::result::Result<T, Error>;

/// Geometry processing errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Geometry processing error
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// Index buffer refers past the vertex list
    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// Coordinate tuple with fewer than three components
    #[error("Vertex {0} has fewer than 3 coordinates")]
    ShortVertex(usize),

    /// Triangulation error
    #[error("Triangulation error: {0}")]
    Triangulation(String),
}

impl Error {
    /// Create a geometry error
    pub fn geometry(msg: impl Into<String>) -> Self {
        Error::Geometry(msg.into())
    }

    /// Create a triangulation error
    pub fn triangulation(msg: impl Into<String>) -> Self {
        Error::Triangulation(msg.into())
    }

    /// Create an index out of range error
    pub fn index_out_of_range(index: u32, vertex_count: usize) -> Self {
        Error::IndexOutOfRange {
            index,
            vertex_count,
        }
    }
}

impl From<Error> for gbxml_lite_model::ParseError {
    fn from(err: Error) -> Self {
        gbxml_lite_model::ParseError::triangulation(err.to_string())
    }
}
