// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! gbXML-Lite Model - Data model and trait definitions for gbXML geometry
//!
//! This crate provides the plain data shapes used to describe building
//! geometry read from gbXML (Green Building XML) documents, together with the
//! traits a parser backend implements.
//!
//! # Architecture
//!
//! - [`Structure`] / [`Surface`] / [`Model`] - exterior and interior surfaces
//!   with nested openings, each carrying an indexed triangle mesh
//! - [`Building`] / [`Space`] / [`ShellGeometry`] - spaces and the shells
//!   enclosing them
//! - [`BemParser`] - entry point implemented by parser backends
//! - [`LoopTriangulator`] - pluggable polygon triangulation
//!
//! The types are inert: constructors only assign fields. Checks such as index
//! bounds are available separately in [`validate`].
//!
//! # Example
//!
//! ```ignore
//! use gbxml_lite_model::BemParser;
//!
//! let parser: Box<dyn BemParser> = get_parser();
//! let document = parser.parse(gbxml_content)?;
//! for surface in document.structure.iter() {
//!     println!("{} ({})", surface.id, surface.surface_type);
//! }
//! ```

pub mod error;
pub mod metadata;
pub mod query;
pub mod traits;
pub mod types;
pub mod validate;

pub use error::*;
pub use metadata::*;
pub use query::*;
pub use traits::*;
pub use types::*;
pub use validate::{
    validate_building, validate_face, validate_model, validate_structure, ValidationError,
};
