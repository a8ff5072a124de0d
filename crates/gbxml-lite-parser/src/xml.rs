// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Small helpers over `roxmltree` nodes
//!
//! Tag names are matched by local name, so documents with or without the
//! gbXML namespace are read the same way.

use gbxml_lite_model::{ParseError, Result};
use roxmltree::Node;

/// Element children with the given local name
pub fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == tag)
}

/// First element child with the given local name
pub fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == tag)
}

/// Local tag name of an element
pub fn tag<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Required attribute value
pub fn attribute<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name)
        .ok_or_else(|| ParseError::missing_attribute(tag(node), name))
}

/// Required child element text, trimmed
pub fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str> {
    child(node, name)
        .and_then(|c| c.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ParseError::missing_element(tag(node), name))
}

/// Parse a float exactly as written; non-finite values are rejected
pub fn parse_f32(element: &str, text: &str) -> Result<f32> {
    let trimmed = text.trim();
    match lexical_core::parse::<f32>(trimmed.as_bytes()) {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParseError::invalid_number(element, trimmed)),
    }
}

/// Parse a signed 32-bit integer
pub fn parse_i32(element: &str, text: &str) -> Result<i32> {
    let trimmed = text.trim();
    lexical_core::parse::<i32>(trimmed.as_bytes())
        .map_err(|_| ParseError::invalid_number(element, trimmed))
}

/// Required child element text parsed as a float
pub fn child_f32(node: Node<'_, '_>, name: &str) -> Result<f32> {
    parse_f32(name, child_text(node, name)?)
}

/// Required child element text parsed as an integer
pub fn child_i32(node: Node<'_, '_>, name: &str) -> Result<i32> {
    parse_i32(name, child_text(node, name)?)
}
