// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end reading of a small office model

use gbxml_lite_geometry::{
    building_metrics, model_area, structure_bounds, structure_meshes, EarcutTriangulator,
};
use gbxml_lite_model::{
    validate_building, validate_structure, BemDocument, BemParser, ParseError, ShellKind,
    SurfaceCategory, Vertex,
};
use gbxml_lite_parser::{AxisConvention, GbxmlParser};

const OFFICE: &str = include_str!("fixtures/office.xml");

fn area(document: &BemDocument, id: &str) -> f64 {
    let surface = document.structure.find_surface(id).unwrap();
    model_area(&surface.model).unwrap()
}

#[test]
fn test_document_contents() {
    let document = gbxml_lite_parser::parse(OFFICE).unwrap();

    let metadata = &document.metadata;
    assert_eq!(metadata.version.as_deref(), Some("6.01"));
    assert_eq!(metadata.area_unit.as_deref(), Some("SquareMeters"));
    assert_eq!(metadata.temperature_unit.as_deref(), Some("C"));
    assert_eq!(metadata.use_si_units_for_results, Some(true));

    let structure = &document.structure;
    assert_eq!(structure.len(), 3);
    assert_eq!(structure.opening_count(), 2);
    let ids: Vec<&str> = structure.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["su-wall", "op-window", "op-door", "su-roof", "su-floor"]
    );
    assert_eq!(structure.by_category(SurfaceCategory::Floor).len(), 1);

    let wall = &structure.surfaces[0];
    assert_eq!(wall.openings()[0].name.as_deref(), Some("Window"));
    assert_eq!(wall.openings()[1].name, None);
    assert!(wall.openings().iter().all(|o| o.openings.is_none()));
    assert_eq!(structure.surfaces[2].openings, Some(vec![]));

    let building = &document.buildings[0];
    assert_eq!(building.spaces.len(), 2);
    assert_eq!(building.spaces[0].cad_object_id, 101);
    assert_eq!(building.spaces[1].zone_id_ref, "zone-2");

    validate_structure(structure).unwrap();
    validate_building(building).unwrap();
}

#[test]
fn test_closed_shell_keeps_every_polyloop() {
    let buildings = gbxml_lite_parser::parse_buildings(OFFICE).unwrap();
    let cube = &buildings[0].spaces[0].shell_geometry;
    assert_eq!(cube.shell_kind(), ShellKind::Closed);

    let faces = &cube.closed_shell.as_ref().unwrap().faces;
    assert_eq!(faces.len(), 6);
    for face in faces {
        assert_eq!(face.vertices.len(), 4);
        assert_eq!(face.index, vec![0, 1, 2, 0, 2, 3]);
    }

    let attic = &buildings[0].spaces[1].shell_geometry;
    assert_eq!(attic.shell_kind(), ShellKind::Analytical);
    let shell_surfaces = &attic.analytical_shell.as_ref().unwrap().shell_surfaces;
    assert_eq!(shell_surfaces[0].surface_type, "Roof");
}

#[test]
fn test_areas_and_volumes() {
    let document = GbxmlParser::new()
        .with_triangulator(EarcutTriangulator)
        .parse(OFFICE)
        .unwrap();

    assert!((area(&document, "su-wall") - 12.0).abs() < 1e-6);
    assert!((area(&document, "op-window") - 1.0).abs() < 1e-6);
    assert!((area(&document, "op-door") - 1.0).abs() < 1e-6);
    assert!((area(&document, "su-roof") - 3.0).abs() < 1e-6);
    assert!((area(&document, "su-floor") - 4.0).abs() < 1e-6);

    let metrics = building_metrics(&document.buildings[0]).unwrap();
    assert!((metrics[0].shell_volume.unwrap() - 1.0).abs() < 1e-6);
    assert!((metrics[0].shell_surface_area - 6.0).abs() < 1e-6);
    assert_eq!(metrics[1].shell_volume, None);
    assert!((metrics[1].shell_surface_area - 1.0).abs() < 1e-6);
}

#[test]
fn test_concave_roof_triangulation() {
    let structure = GbxmlParser::structure_only()
        .with_triangulator(EarcutTriangulator)
        .parse_structure(OFFICE)
        .unwrap();
    let roof = structure.find_surface("su-roof").unwrap();
    assert_eq!(roof.model.vertex_count(), 6);
    assert_eq!(roof.model.triangle_count(), 4);

    let meshes = structure_meshes(&structure).unwrap();
    assert_eq!(meshes.len(), 5);
    assert_eq!(meshes[1].category, SurfaceCategory::Window);
    assert_eq!(meshes[2].category, SurfaceCategory::Door);
}

#[test]
fn test_axis_conventions() {
    let y_up = gbxml_lite_parser::parse_structure(OFFICE).unwrap();
    let z_up = GbxmlParser::structure_only()
        .with_axis(AxisConvention::ZUp)
        .parse_structure(OFFICE)
        .unwrap();

    let roof_y = &y_up.find_surface("su-roof").unwrap().model;
    let roof_z = &z_up.find_surface("su-roof").unwrap().model;
    assert_eq!(roof_y.vertices[1], Vertex::new(2.0, 3.0, 0.0));
    assert_eq!(roof_z.vertices[1], Vertex::new(2.0, 0.0, 3.0));

    let bounds = structure_bounds(&y_up).unwrap();
    assert_eq!(bounds.max.y, 3.0);
}

#[test]
fn test_json_round_trip() {
    let document = gbxml_lite_parser::parse(OFFICE).unwrap();
    let json = serde_json::to_string(&document).unwrap();
    let back: BemDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(back, document);

    let value: serde_json::Value = serde_json::to_value(&document.structure).unwrap();
    let wall = &value["surfaces"][0];
    assert_eq!(wall["openings"].as_array().unwrap().len(), 2);
    assert!(wall["openings"][0].get("openings").is_none());
    assert!(value["surfaces"][2]["openings"].as_array().unwrap().is_empty());
}

#[test]
fn test_lenient_skips_broken_surface() {
    let broken = OFFICE.replace(r#"id="su-roof" surfaceType="Roof""#, r#"id="su-roof""#);

    let err = GbxmlParser::new().parse(&broken).unwrap_err();
    assert!(matches!(
        err,
        ParseError::MissingAttribute { ref attribute, .. } if attribute == "surfaceType"
    ));

    let document = GbxmlParser::new().strict(false).parse(&broken).unwrap();
    assert_eq!(document.structure.len(), 2);
    assert!(document.structure.find_surface("su-roof").is_none());
}
