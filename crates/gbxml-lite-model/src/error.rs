// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for gbXML parsing operations

use thiserror::Error;

/// Result type alias for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur during gbXML parsing
#[derive(Error, Debug)]
pub enum ParseError {
    /// Document is not well-formed XML
    #[error("Invalid XML: {0}")]
    InvalidXml(String),

    /// Document is XML but not usable gbXML
    #[error("Invalid gbXML format: {0}")]
    InvalidFormat(String),

    /// Required attribute missing from an element
    #[error("Missing attribute '{attribute}' on <{element}>")]
    MissingAttribute { element: String, attribute: String },

    /// Required child element missing (or empty)
    #[error("Missing child <{child}> in <{element}>")]
    MissingElement { element: String, child: String },

    /// Text that should hold a number could not be parsed
    #[error("Invalid number '{value}' in <{element}>")]
    InvalidNumber { element: String, value: String },

    /// Geometry that cannot be turned into a mesh
    #[error("Invalid geometry in {element}: {message}")]
    InvalidGeometry { element: String, message: String },

    /// Polygon triangulation failed
    #[error("Triangulation failed: {0}")]
    Triangulation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl ParseError {
    /// Create a new format error
    pub fn format(msg: impl Into<String>) -> Self {
        ParseError::InvalidFormat(msg.into())
    }

    /// Create a missing attribute error
    pub fn missing_attribute(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        ParseError::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Create a missing child element error
    pub fn missing_element(element: impl Into<String>, child: impl Into<String>) -> Self {
        ParseError::MissingElement {
            element: element.into(),
            child: child.into(),
        }
    }

    /// Create an invalid number error
    pub fn invalid_number(element: impl Into<String>, value: impl Into<String>) -> Self {
        ParseError::InvalidNumber {
            element: element.into(),
            value: value.into(),
        }
    }

    /// Create a geometry error
    pub fn geometry(element: impl Into<String>, msg: impl Into<String>) -> Self {
        ParseError::InvalidGeometry {
            element: element.into(),
            message: msg.into(),
        }
    }

    /// Create a triangulation error
    pub fn triangulation(msg: impl Into<String>) -> Self {
        ParseError::Triangulation(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        ParseError::Other(msg.into())
    }
}
