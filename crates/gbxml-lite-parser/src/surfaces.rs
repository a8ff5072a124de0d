// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surface and opening reading

use crate::document::DocumentReader;
use crate::polyloop::{read_polyloop, MeshBuilder};
use crate::xml::{attribute, child, children, tag};

use gbxml_lite_model::{Model, Result, Structure, Surface};
use roxmltree::Node;

impl DocumentReader<'_> {
    /// Read every `<Surface>` in the document, in document order
    pub(crate) fn read_structure(&self, root: Node<'_, '_>) -> Result<Structure> {
        let mut surfaces = Vec::new();
        for node in root
            .descendants()
            .filter(|n| n.is_element() && tag(*n) == "Surface")
        {
            let surface = self.read_surface(node);
            if let Some(surface) = self.keep("surface", node.attribute("id"), surface)? {
                surfaces.push(surface);
            }
        }
        Ok(Structure { surfaces })
    }

    /// Read a surface and its openings
    ///
    /// The openings list is always present on a surface (possibly empty).
    pub(crate) fn read_surface(&self, node: Node<'_, '_>) -> Result<Surface> {
        let id = attribute(node, "id")?;
        let surface_type = attribute(node, "surfaceType")?;

        let mut openings = Vec::new();
        for opening in children(node, "Opening") {
            let result = self.read_opening(opening);
            if let Some(opening) = self.keep("opening", opening.attribute("id"), result)? {
                openings.push(opening);
            }
        }

        Ok(Surface {
            id: id.to_string(),
            name: read_name(node),
            surface_type: surface_type.to_string(),
            model: self.read_planar_model(node)?,
            openings: Some(openings),
        })
    }

    /// Read an opening as a leaf surface typed by its `openingType`
    pub(crate) fn read_opening(&self, node: Node<'_, '_>) -> Result<Surface> {
        let id = attribute(node, "id")?;
        let opening_type = attribute(node, "openingType")?;

        Ok(Surface {
            id: id.to_string(),
            name: read_name(node),
            surface_type: opening_type.to_string(),
            model: self.read_planar_model(node)?,
            openings: None,
        })
    }

    /// Weld all `PlanarGeometry/PolyLoop`s of an element into one model
    fn read_planar_model(&self, node: Node<'_, '_>) -> Result<Model> {
        let mut builder = MeshBuilder::new(self.options.triangulator.as_ref());
        for geometry in children(node, "PlanarGeometry") {
            for polyloop in children(geometry, "PolyLoop") {
                builder.add_loop(&read_polyloop(polyloop, &self.transform)?)?;
            }
        }
        Ok(builder.into_model())
    }
}

/// Text of a `<Name>` child; an empty element gives an empty name
fn read_name(node: Node<'_, '_>) -> Option<String> {
    child(node, "Name").map(|n| n.text().unwrap_or("").trim().to_string())
}
