// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! gbXML-Lite WebAssembly bindings
//!
//! Exposes the parser to JavaScript. Entities cross the boundary as plain
//! JS objects produced by `serde-wasm-bindgen`; mesh buffers cross as typed
//! arrays. Failures are returned as JS strings.
//!
//! ```js
//! import init, { parse_bem, surface_meshes } from "gbxml-lite-wasm";
//!
//! await init();
//! const structure = parse_bem(text);
//! const meshes = surface_meshes(text, { earcut: true });
//! ```

mod console;

use gbxml_lite_geometry::{structure_meshes, EarcutTriangulator, SurfaceMesh};
use gbxml_lite_model::{BemDocument, BemParser, Building, Structure};
use gbxml_lite_parser::{AxisConvention, GbxmlParser};
use js_sys::{Array, Float32Array, Object, Reflect, Uint32Array};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use wasm_bindgen::prelude::*;

/// Parser options accepted from JavaScript
///
/// Every field is optional; an absent object gives the strict, Y-up,
/// unscaled, fan-triangulating defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Skip incomplete elements instead of failing
    pub lenient: bool,
    pub scale_to_meters: bool,
    /// Keep the file's Z-up axes
    pub z_up: bool,
    /// Ear-clip concave loops
    pub earcut: bool,
}

impl ParseOptions {
    /// Build the configured parser
    pub fn parser(&self) -> GbxmlParser {
        let axis = if self.z_up {
            AxisConvention::ZUp
        } else {
            AxisConvention::YUp
        };
        let parser = GbxmlParser::new()
            .strict(!self.lenient)
            .scale_to_meters(self.scale_to_meters)
            .with_axis(axis);
        if self.earcut {
            parser.with_triangulator(EarcutTriangulator)
        } else {
            parser
        }
    }
}

fn parse_failure(err: impl Display) -> String {
    format!("Failed to parse BEM: {}", err)
}

fn serialize_failure(err: impl Display) -> String {
    format!("Failed to serialize BEM: {}", err)
}

/// Read every surface of a document
pub fn read_structure(bem: &str, options: &ParseOptions) -> Result<Structure, String> {
    options
        .parser()
        .with_buildings(false)
        .parse_structure(bem)
        .map_err(parse_failure)
}

/// Read every building of a document
pub fn read_buildings(bem: &str, options: &ParseOptions) -> Result<Vec<Building>, String> {
    options
        .parser()
        .with_structure(false)
        .parse_buildings(bem)
        .map_err(parse_failure)
}

/// Read the whole document
pub fn read_document(bem: &str, options: &ParseOptions) -> Result<BemDocument, String> {
    options.parser().parse(bem).map_err(parse_failure)
}

/// Read surfaces and flatten them into render meshes
pub fn read_meshes(bem: &str, options: &ParseOptions) -> Result<Vec<SurfaceMesh>, String> {
    let structure = read_structure(bem, options)?;
    structure_meshes(&structure).map_err(parse_failure)
}

fn options_from_js(options: JsValue) -> Result<ParseOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(ParseOptions::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid parse options: {}", e)))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&serialize_failure(e)))
}

fn mesh_to_js(surface: &SurfaceMesh) -> Result<JsValue, JsValue> {
    let object = Object::new();
    let color: Array = surface
        .color
        .iter()
        .map(|&c| JsValue::from_f64(c as f64))
        .collect();
    Reflect::set(&object, &"id".into(), &surface.id.as_str().into())?;
    Reflect::set(
        &object,
        &"category".into(),
        &surface.category.display_name().into(),
    )?;
    Reflect::set(&object, &"color".into(), &color)?;
    Reflect::set(
        &object,
        &"positions".into(),
        &Float32Array::from(surface.mesh.positions.as_slice()),
    )?;
    Reflect::set(
        &object,
        &"normals".into(),
        &Float32Array::from(surface.mesh.normals.as_slice()),
    )?;
    Reflect::set(
        &object,
        &"indices".into(),
        &Uint32Array::from(surface.mesh.indices.as_slice()),
    )?;
    Ok(object.into())
}

/// Install the panic hook and console logger
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console::init();
}

/// Parse the surfaces of a gbXML document into a `Structure`
#[wasm_bindgen]
pub fn parse_bem(bem: &str) -> Result<JsValue, JsValue> {
    let structure = read_structure(bem, &ParseOptions::default()).map_err(JsValue::from)?;
    to_js(&structure)
}

/// Parse the buildings and spaces of a gbXML document
#[wasm_bindgen]
pub fn parse_buildings(bem: &str) -> Result<JsValue, JsValue> {
    let buildings = read_buildings(bem, &ParseOptions::default()).map_err(JsValue::from)?;
    to_js(&buildings)
}

/// Parse a whole gbXML document with optional [`ParseOptions`]
#[wasm_bindgen]
pub fn parse_document(bem: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let options = options_from_js(options)?;
    let document = read_document(bem, &options).map_err(JsValue::from)?;
    to_js(&document)
}

/// Parse surfaces into typed-array meshes, one per surface and opening
#[wasm_bindgen]
pub fn surface_meshes(bem: &str, options: JsValue) -> Result<Array, JsValue> {
    let options = options_from_js(options)?;
    let meshes = read_meshes(bem, &options).map_err(JsValue::from)?;
    meshes.iter().map(mesh_to_js).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gbXML xmlns="http://www.gbxml.org/schema" lengthUnit="Feet" areaUnit="SquareFeet" volumeUnit="CubicFeet">
  <Campus id="campus-1">
    <Building id="b1" buildingType="Office">
      <Area>100</Area>
    </Building>
    <Surface id="s1" surfaceType="ExteriorWall">
      <PlanarGeometry>
        <PolyLoop>
          <CartesianPoint><Coordinate>0</Coordinate><Coordinate>0</Coordinate><Coordinate>0</Coordinate></CartesianPoint>
          <CartesianPoint><Coordinate>10</Coordinate><Coordinate>0</Coordinate><Coordinate>0</Coordinate></CartesianPoint>
          <CartesianPoint><Coordinate>10</Coordinate><Coordinate>0</Coordinate><Coordinate>10</Coordinate></CartesianPoint>
          <CartesianPoint><Coordinate>0</Coordinate><Coordinate>0</Coordinate><Coordinate>10</Coordinate></CartesianPoint>
        </PolyLoop>
      </PlanarGeometry>
    </Surface>
  </Campus>
</gbXML>"#;

    #[test]
    fn test_options_from_json() {
        let options: ParseOptions =
            serde_json::from_str(r#"{"scaleToMeters": true, "earcut": true}"#).unwrap();
        assert_eq!(
            options,
            ParseOptions {
                scale_to_meters: true,
                earcut: true,
                ..Default::default()
            }
        );

        let parser = ParseOptions {
            lenient: true,
            z_up: true,
            ..Default::default()
        }
        .parser();
        assert!(!parser.strict);
        assert_eq!(parser.axis, AxisConvention::ZUp);
    }

    #[test]
    fn test_read_structure() {
        let structure = read_structure(WALL, &ParseOptions::default()).unwrap();
        assert_eq!(structure.len(), 1);
        assert_eq!(structure.surfaces[0].model.vertex_count(), 4);
    }

    #[test]
    fn test_read_buildings_and_document() {
        let buildings = read_buildings(WALL, &ParseOptions::default()).unwrap();
        assert_eq!(buildings.len(), 1);
        assert_eq!(buildings[0].area, 100.0);

        let document = read_document(WALL, &ParseOptions::default()).unwrap();
        assert_eq!(document.structure.len(), 1);
        assert_eq!(document.metadata.length_unit.as_deref(), Some("Feet"));
    }

    #[test]
    fn test_scaled_meshes() {
        let options = ParseOptions {
            scale_to_meters: true,
            ..Default::default()
        };
        let meshes = read_meshes(WALL, &options).unwrap();
        assert_eq!(meshes.len(), 1);
        let max = meshes[0]
            .mesh
            .positions
            .iter()
            .cloned()
            .fold(f32::MIN, f32::max);
        assert!((max - 3.048).abs() < 1e-5);
    }

    #[test]
    fn test_parse_failure_message() {
        let err = read_structure("<gbXML>", &ParseOptions::default()).unwrap_err();
        assert!(err.starts_with("Failed to parse BEM: "), "{err}");
        assert!(serialize_failure("boom").starts_with("Failed to serialize BEM: "));
    }
}
