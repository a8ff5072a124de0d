// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Document-level reading: root checks, metadata, and orchestration

use crate::polyloop::CoordinateTransform;
use crate::units::{area_unit_scale, length_unit_scale, volume_unit_scale};
use crate::xml::tag;
use crate::GbxmlParser;

use gbxml_lite_model::{
    BemDocument, Building, DocumentMetadata, ParseError, ProgressCallback, Result, Structure,
};
use roxmltree::{Document, Node};

/// Per-document reading state
pub(crate) struct DocumentReader<'p> {
    pub(crate) options: &'p GbxmlParser,
    pub(crate) metadata: DocumentMetadata,
    /// Coordinate transform for surfaces (document length unit)
    pub(crate) transform: CoordinateTransform,
    /// Scale applied to declared areas
    pub(crate) area_scale: f64,
    /// Scale applied to declared volumes
    pub(crate) volume_scale: f64,
}

impl<'p> DocumentReader<'p> {
    pub(crate) fn new(options: &'p GbxmlParser, root: Node<'_, '_>) -> Result<Self> {
        if tag(root) != "gbXML" {
            if options.strict {
                return Err(ParseError::format(format!(
                    "root element is <{}>, expected <gbXML>",
                    tag(root)
                )));
            }
            log::warn!("Root element is <{}>, reading it as gbXML", tag(root));
        }

        let metadata = read_metadata(root);
        let mut transform = CoordinateTransform {
            axis: options.axis,
            scale: 1.0,
        };
        let mut area_scale = 1.0;
        let mut volume_scale = 1.0;

        if options.scale_to_meters {
            transform.scale = options.unit_scale(
                "lengthUnit",
                metadata.length_unit_or_default(),
                length_unit_scale,
            )?;
            if let Some(unit) = &metadata.area_unit {
                area_scale = options.unit_scale("areaUnit", unit, area_unit_scale)?;
            }
            if let Some(unit) = &metadata.volume_unit {
                volume_scale = options.unit_scale("volumeUnit", unit, volume_unit_scale)?;
            }
        }

        Ok(Self {
            options,
            metadata,
            transform,
            area_scale,
            volume_scale,
        })
    }

    /// Keep an element's result, or skip it in lenient mode
    pub(crate) fn keep<T>(
        &self,
        kind: &str,
        id: Option<&str>,
        result: Result<T>,
    ) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if !self.options.strict => {
                log::warn!("Skipping {} {}: {}", kind, id.unwrap_or("<no id>"), err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub(crate) fn scale_area(&self, area: f32) -> f32 {
        if self.area_scale == 1.0 {
            area
        } else {
            (area as f64 * self.area_scale) as f32
        }
    }

    pub(crate) fn scale_volume(&self, volume: f32) -> f32 {
        if self.volume_scale == 1.0 {
            volume
        } else {
            (volume as f64 * self.volume_scale) as f32
        }
    }
}

/// Read the attributes of the `<gbXML>` root
pub(crate) fn read_metadata(root: Node<'_, '_>) -> DocumentMetadata {
    let attr = |name: &str| root.attribute(name).map(str::to_string);
    DocumentMetadata {
        version: attr("version"),
        length_unit: attr("lengthUnit"),
        area_unit: attr("areaUnit"),
        volume_unit: attr("volumeUnit"),
        temperature_unit: attr("temperatureUnit"),
        use_si_units_for_results: root
            .attribute("useSIUnitsForResults")
            .and_then(|v| match v.trim() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            }),
    }
}

/// Parse a whole document
pub(crate) fn read_document(
    options: &GbxmlParser,
    content: &str,
    on_progress: Option<ProgressCallback>,
) -> Result<BemDocument> {
    let progress = |phase: &str, percent: f32| {
        if let Some(cb) = &on_progress {
            cb(phase, percent);
        }
    };

    progress("Parsing XML", 0.0);
    let xml = Document::parse(content).map_err(|e| ParseError::InvalidXml(e.to_string()))?;
    let root = xml.root_element();

    progress("Reading metadata", 20.0);
    let reader = DocumentReader::new(options, root)?;

    let structure = if options.extract_structure {
        progress("Reading surfaces", 30.0);
        reader.read_structure(root)?
    } else {
        Structure::default()
    };

    let buildings: Vec<Building> = if options.extract_buildings {
        progress("Reading buildings", 70.0);
        reader.read_buildings(root)?
    } else {
        Vec::new()
    };

    log::debug!(
        "Read {} surfaces ({} openings) and {} buildings",
        structure.len(),
        structure.opening_count(),
        buildings.len()
    );
    progress("Complete", 100.0);

    Ok(BemDocument {
        metadata: reader.metadata,
        structure,
        buildings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_metadata() {
        let xml = Document::parse(
            r#"<gbXML version="0.37" lengthUnit="Feet" areaUnit="SquareFeet" volumeUnit="CubicFeet" temperatureUnit="F" useSIUnitsForResults="true"/>"#,
        )
        .unwrap();
        let metadata = read_metadata(xml.root_element());
        assert_eq!(metadata.version.as_deref(), Some("0.37"));
        assert_eq!(metadata.length_unit.as_deref(), Some("Feet"));
        assert_eq!(metadata.area_unit.as_deref(), Some("SquareFeet"));
        assert_eq!(metadata.volume_unit.as_deref(), Some("CubicFeet"));
        assert_eq!(metadata.temperature_unit.as_deref(), Some("F"));
        assert_eq!(metadata.use_si_units_for_results, Some(true));
    }

    #[test]
    fn test_metadata_absent() {
        let xml = Document::parse("<gbXML/>").unwrap();
        let metadata = read_metadata(xml.root_element());
        assert_eq!(metadata, DocumentMetadata::default());
        assert_eq!(metadata.length_unit_or_default(), "Meters");
    }

    #[test]
    fn test_wrong_root_strict_and_lenient() {
        let xml = Document::parse("<Campus/>").unwrap();
        let strict = GbxmlParser::new();
        assert!(matches!(
            DocumentReader::new(&strict, xml.root_element()),
            Err(ParseError::InvalidFormat(_))
        ));
        let lenient = GbxmlParser::new().strict(false);
        assert!(DocumentReader::new(&lenient, xml.root_element()).is_ok());
    }

    #[test]
    fn test_unit_scales_from_metadata() {
        let xml = Document::parse(
            r#"<gbXML lengthUnit="Feet" areaUnit="SquareFeet" volumeUnit="CubicFeet"/>"#,
        )
        .unwrap();
        let parser = GbxmlParser::new().scale_to_meters(true);
        let reader = DocumentReader::new(&parser, xml.root_element()).unwrap();
        assert!((reader.transform.scale - 0.3048).abs() < 1e-12);
        assert!((reader.scale_area(100.0) - 9.290304).abs() < 1e-4);
        assert!((reader.scale_volume(100.0) - 2.8316846).abs() < 1e-4);

        let unscaled = GbxmlParser::new();
        let reader = DocumentReader::new(&unscaled, xml.root_element()).unwrap();
        assert_eq!(reader.transform.scale, 1.0);
        assert_eq!(reader.scale_area(100.0), 100.0);
    }
}
