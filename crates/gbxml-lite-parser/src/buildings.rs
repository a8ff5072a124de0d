// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building, space and shell geometry reading

use crate::document::DocumentReader;
use crate::polyloop::{read_polyloop, CoordinateTransform, MeshBuilder};
use crate::units::length_unit_scale;
use crate::xml::{attribute, child, child_f32, child_i32, child_text, children, tag};

use gbxml_lite_model::{
    AnalyticalShell, Building, ClosedShell, Face, ParseError, Result, ShellGeometry, ShellSurface,
    Space,
};
use roxmltree::Node;

impl DocumentReader<'_> {
    /// Read every `<Building>` in the document, in document order
    pub(crate) fn read_buildings(&self, root: Node<'_, '_>) -> Result<Vec<Building>> {
        let mut buildings = Vec::new();
        for node in root
            .descendants()
            .filter(|n| n.is_element() && tag(*n) == "Building")
        {
            let building = self.read_building(node);
            if let Some(building) = self.keep("building", node.attribute("id"), building)? {
                buildings.push(building);
            }
        }
        Ok(buildings)
    }

    fn read_building(&self, node: Node<'_, '_>) -> Result<Building> {
        let id = attribute(node, "id")?;
        let building_type = attribute(node, "buildingType")?;
        let area = self.scale_area(child_f32(node, "Area")?);

        let mut spaces = Vec::new();
        for space in children(node, "Space") {
            let result = self.read_space(space);
            if let Some(space) = self.keep("space", space.attribute("id"), result)? {
                spaces.push(space);
            }
        }

        Ok(Building {
            id: id.to_string(),
            building_type: building_type.to_string(),
            area,
            spaces,
        })
    }

    fn read_space(&self, node: Node<'_, '_>) -> Result<Space> {
        let shell = child(node, "ShellGeometry")
            .ok_or_else(|| ParseError::missing_element("Space", "ShellGeometry"))?;

        Ok(Space {
            id: attribute(node, "id")?.to_string(),
            zone_id_ref: attribute(node, "zoneIdRef")?.to_string(),
            name: child_text(node, "Name")?.to_string(),
            area: self.scale_area(child_f32(node, "Area")?),
            volume: self.scale_volume(child_f32(node, "Volume")?),
            shell_geometry: self.read_shell_geometry(shell)?,
            cad_object_id: child_i32(node, "CADObjectId")?,
        })
    }

    /// Read a `<ShellGeometry>`; both shells are read when both are present
    fn read_shell_geometry(&self, node: Node<'_, '_>) -> Result<ShellGeometry> {
        let id = attribute(node, "id")?;
        let unit = attribute(node, "unit")?;
        let transform = self.shell_transform(unit)?;

        let closed_shell = child(node, "ClosedShell")
            .map(|shell| -> Result<ClosedShell> {
                Ok(ClosedShell {
                    faces: self.read_faces(shell, &transform)?,
                })
            })
            .transpose()?;

        let analytical_shell = child(node, "AnalyticalShell")
            .map(|shell| -> Result<AnalyticalShell> {
                let shell_surfaces = children(shell, "ShellSurface")
                    .map(|surface| -> Result<ShellSurface> {
                        Ok(ShellSurface {
                            surface_type: attribute(surface, "surfaceType")?.to_string(),
                            faces: self.read_faces(surface, &transform)?,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(AnalyticalShell { shell_surfaces })
            })
            .transpose()?;

        let unit = if transform.scale != 1.0 { "Meters" } else { unit };

        Ok(ShellGeometry {
            id: id.to_string(),
            unit: unit.to_string(),
            closed_shell,
            analytical_shell,
        })
    }

    /// Shell coordinates use the shell's own `unit` attribute
    fn shell_transform(&self, unit: &str) -> Result<CoordinateTransform> {
        let mut transform = self.transform;
        if self.options.scale_to_meters {
            transform.scale = self
                .options
                .unit_scale("ShellGeometry unit", unit, length_unit_scale)?;
        }
        Ok(transform)
    }

    /// One face per `PolyLoop` child
    fn read_faces(
        &self,
        node: Node<'_, '_>,
        transform: &CoordinateTransform,
    ) -> Result<Vec<Face>> {
        children(node, "PolyLoop")
            .map(|polyloop| -> Result<Face> {
                let mut builder = MeshBuilder::new(self.options.triangulator.as_ref());
                builder.add_loop(&read_polyloop(polyloop, transform)?)?;
                Ok(builder.into_face())
            })
            .collect()
    }
}
