// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only traversal and lookup over the data model

use crate::{Building, Face, ShellGeometry, Space, Structure, Surface};
use serde::{Deserialize, Serialize};

/// Broad classification of gbXML `surfaceType` / `openingType` tags
///
/// The tag string on [`Surface`] stays authoritative; this is a lookup aid
/// for display and colouring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceCategory {
    Wall,
    Roof,
    Floor,
    Ceiling,
    Shade,
    Air,
    Column,
    Window,
    Skylight,
    Door,
    /// Tag not in the gbXML vocabulary
    Other,
}

impl SurfaceCategory {
    /// Classify a surface or opening type tag
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "InteriorWall" | "ExteriorWall" | "UndergroundWall" => SurfaceCategory::Wall,
            "Roof" => SurfaceCategory::Roof,
            "InteriorFloor" | "RaisedFloor" | "SlabOnGrade" | "UndergroundSlab" => {
                SurfaceCategory::Floor
            }
            "Ceiling" | "UndergroundCeiling" => SurfaceCategory::Ceiling,
            "Shade" => SurfaceCategory::Shade,
            "Air" => SurfaceCategory::Air,
            "FreestandingColumn" | "EmbeddedColumn" => SurfaceCategory::Column,
            "FixedWindow" | "OperableWindow" => SurfaceCategory::Window,
            "FixedSkylight" | "OperableSkylight" => SurfaceCategory::Skylight,
            "SlidingDoor" | "NonSlidingDoor" => SurfaceCategory::Door,
            _ => SurfaceCategory::Other,
        }
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            SurfaceCategory::Wall => "Wall",
            SurfaceCategory::Roof => "Roof",
            SurfaceCategory::Floor => "Floor",
            SurfaceCategory::Ceiling => "Ceiling",
            SurfaceCategory::Shade => "Shade",
            SurfaceCategory::Air => "Air",
            SurfaceCategory::Column => "Column",
            SurfaceCategory::Window => "Window",
            SurfaceCategory::Skylight => "Skylight",
            SurfaceCategory::Door => "Door",
            SurfaceCategory::Other => "Other",
        }
    }

    /// Whether this category is normally found as an opening
    pub fn is_opening(&self) -> bool {
        matches!(
            self,
            SurfaceCategory::Window | SurfaceCategory::Skylight | SurfaceCategory::Door
        )
    }

    /// Default RGBA colour, values 0.0-1.0
    pub fn default_color(&self) -> [f32; 4] {
        match self {
            // Walls - light beige/tan
            SurfaceCategory::Wall => [0.85, 0.80, 0.70, 1.0],
            // Roofs - terracotta/clay
            SurfaceCategory::Roof => [0.72, 0.45, 0.35, 1.0],
            // Floors - light gray concrete
            SurfaceCategory::Floor => [0.75, 0.75, 0.75, 1.0],
            SurfaceCategory::Ceiling => [0.95, 0.95, 0.95, 1.0],
            SurfaceCategory::Shade => [0.45, 0.45, 0.45, 1.0],
            // Air boundaries - nearly invisible
            SurfaceCategory::Air => [0.8, 0.9, 1.0, 0.1],
            SurfaceCategory::Column => [0.60, 0.60, 0.60, 1.0],
            // Glazing - light blue glass
            SurfaceCategory::Window | SurfaceCategory::Skylight => [0.7, 0.85, 0.95, 0.5],
            // Doors - wood brown
            SurfaceCategory::Door => [0.55, 0.40, 0.25, 1.0],
            SurfaceCategory::Other => [0.7, 0.7, 0.7, 1.0],
        }
    }
}

impl Surface {
    /// Classification of this surface's type tag
    pub fn category(&self) -> SurfaceCategory {
        SurfaceCategory::from_tag(&self.surface_type)
    }

    /// Find this surface or a nested opening by ID
    pub fn find(&self, id: &str) -> Option<&Surface> {
        if self.id == id {
            return Some(self);
        }
        self.openings().iter().find_map(|o| o.find(id))
    }

    /// Iterate this surface and all nested openings (depth-first)
    pub fn iter(&self) -> SurfaceIter<'_> {
        SurfaceIter { stack: vec![self] }
    }
}

/// Iterator over surfaces and their openings (depth-first, document order)
pub struct SurfaceIter<'a> {
    stack: Vec<&'a Surface>,
}

impl<'a> Iterator for SurfaceIter<'a> {
    type Item = &'a Surface;

    fn next(&mut self) -> Option<Self::Item> {
        let surface = self.stack.pop()?;
        // Reverse so the first opening comes out first
        for opening in surface.openings().iter().rev() {
            self.stack.push(opening);
        }
        Some(surface)
    }
}

impl Structure {
    /// Iterate every surface and opening (depth-first, document order)
    pub fn iter(&self) -> SurfaceIter<'_> {
        SurfaceIter {
            stack: self.surfaces.iter().rev().collect(),
        }
    }

    /// Find a surface or opening by ID
    pub fn find_surface(&self, id: &str) -> Option<&Surface> {
        self.surfaces.iter().find_map(|s| s.find(id))
    }

    /// Top-level surfaces with the given type tag
    pub fn surfaces_of_type<'a>(&'a self, surface_type: &'a str) -> impl Iterator<Item = &'a Surface> {
        self.surfaces
            .iter()
            .filter(move |s| s.surface_type == surface_type)
    }

    /// Surfaces and openings in the given category
    pub fn by_category(&self, category: SurfaceCategory) -> Vec<&Surface> {
        self.iter().filter(|s| s.category() == category).collect()
    }

    /// Total number of openings across all surfaces
    pub fn opening_count(&self) -> usize {
        self.iter().count() - self.surfaces.len()
    }

    /// Total triangle count of all surfaces and openings
    pub fn triangle_count(&self) -> usize {
        self.iter().map(|s| s.model.triangle_count()).sum()
    }
}

impl Building {
    /// Find a space by ID
    pub fn find_space(&self, id: &str) -> Option<&Space> {
        self.spaces.iter().find(|s| s.id == id)
    }

    /// Spaces that reference the given zone
    pub fn spaces_in_zone<'a>(&'a self, zone_id: &'a str) -> impl Iterator<Item = &'a Space> {
        self.spaces.iter().filter(move |s| s.zone_id_ref == zone_id)
    }

    /// Sum of declared space areas
    pub fn total_space_area(&self) -> f32 {
        self.spaces.iter().map(|s| s.area).sum()
    }

    /// Sum of declared space volumes
    pub fn total_space_volume(&self) -> f32 {
        self.spaces.iter().map(|s| s.volume).sum()
    }
}

impl Space {
    /// All faces of this space's shells
    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        self.shell_geometry.faces()
    }
}

/// Which shells a [`ShellGeometry`] carries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShellKind {
    None,
    Closed,
    Analytical,
    Both,
}

impl ShellGeometry {
    /// Report which shells are present
    pub fn shell_kind(&self) -> ShellKind {
        match (&self.closed_shell, &self.analytical_shell) {
            (None, None) => ShellKind::None,
            (Some(_), None) => ShellKind::Closed,
            (None, Some(_)) => ShellKind::Analytical,
            (Some(_), Some(_)) => ShellKind::Both,
        }
    }

    /// Closed shell faces followed by analytical shell faces
    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        let closed = self.closed_shell.iter().flat_map(|s| s.faces.iter());
        let analytical = self
            .analytical_shell
            .iter()
            .flat_map(|s| s.shell_surfaces.iter())
            .flat_map(|s| s.faces.iter());
        closed.chain(analytical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnalyticalShell, ClosedShell, Model, ShellSurface};

    fn sample_structure() -> Structure {
        let window = Surface::new("w1", "FixedWindow", Model::default());
        let door = Surface::new("d1", "NonSlidingDoor", Model::default());
        Structure::new(vec![
            Surface::new("s1", "ExteriorWall", Model::default()).with_openings(vec![window, door]),
            Surface::new("s2", "Roof", Model::default()).with_openings(Vec::new()),
            Surface::new("s3", "ExteriorWall", Model::default()),
        ])
    }

    #[test]
    fn test_iter_depth_first() {
        let structure = sample_structure();
        let ids: Vec<&str> = structure.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "w1", "d1", "s2", "s3"]);
        assert_eq!(structure.opening_count(), 2);
    }

    #[test]
    fn test_find_surface() {
        let structure = sample_structure();
        assert_eq!(structure.find_surface("d1").unwrap().surface_type, "NonSlidingDoor");
        assert!(structure.find_surface("missing").is_none());
    }

    #[test]
    fn test_surfaces_of_type() {
        let structure = sample_structure();
        let walls: Vec<_> = structure.surfaces_of_type("ExteriorWall").collect();
        assert_eq!(walls.len(), 2);
        assert_eq!(structure.by_category(SurfaceCategory::Door).len(), 1);
    }

    #[test]
    fn test_category() {
        assert_eq!(SurfaceCategory::from_tag("SlabOnGrade"), SurfaceCategory::Floor);
        assert_eq!(SurfaceCategory::from_tag("OperableSkylight"), SurfaceCategory::Skylight);
        assert_eq!(SurfaceCategory::from_tag("Trampoline"), SurfaceCategory::Other);
        assert!(SurfaceCategory::Door.is_opening());
        assert!(!SurfaceCategory::Roof.is_opening());
    }

    #[test]
    fn test_building_queries() {
        let mut building = Building::new("b1", "Office", 200.0);
        for (id, zone, area) in [("sp1", "z1", 20.0), ("sp2", "z2", 30.0), ("sp3", "z1", 5.0)] {
            building.add_space(Space {
                id: id.to_string(),
                zone_id_ref: zone.to_string(),
                area,
                volume: area * 3.0,
                ..Default::default()
            });
        }

        assert_eq!(building.find_space("sp2").unwrap().area, 30.0);
        assert_eq!(building.spaces_in_zone("z1").count(), 2);
        assert_eq!(building.total_space_area(), 55.0);
        assert_eq!(building.total_space_volume(), 165.0);
    }

    #[test]
    fn test_shell_kind_and_faces() {
        let face = Face::new(vec![vec![0.0; 3]; 3], vec![0, 1, 2]);
        let mut shell = ShellGeometry::new("sg", "Meters");
        assert_eq!(shell.shell_kind(), ShellKind::None);
        assert_eq!(shell.faces().count(), 0);

        shell = shell.with_closed_shell(ClosedShell {
            faces: vec![face.clone(), face.clone()],
        });
        assert_eq!(shell.shell_kind(), ShellKind::Closed);

        shell = shell.with_analytical_shell(AnalyticalShell {
            shell_surfaces: vec![ShellSurface {
                surface_type: "Roof".to_string(),
                faces: vec![face],
            }],
        });
        assert_eq!(shell.shell_kind(), ShellKind::Both);
        assert_eq!(shell.faces().count(), 3);
    }
}
