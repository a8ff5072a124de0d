// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Computed space metrics

use crate::measure::{closed_shell_volume, face_area};
use crate::Result;
use gbxml_lite_model::{Building, Face, ShellGeometry, Space};
use rayon::prelude::*;

/// Declared values of a space next to values computed from its shell
#[derive(Clone, Debug, PartialEq)]
pub struct SpaceMetrics {
    pub space_id: String,
    pub declared_area: f32,
    pub declared_volume: f32,
    /// Total face area of the enclosing shell
    pub shell_surface_area: f64,
    /// Enclosed volume, only available with a closed shell
    pub shell_volume: Option<f64>,
}

impl SpaceMetrics {
    /// Relative difference between computed and declared volume
    pub fn volume_deviation(&self) -> Option<f64> {
        let declared = self.declared_volume as f64;
        if declared == 0.0 {
            return None;
        }
        self.shell_volume.map(|v| (v - declared).abs() / declared)
    }
}

/// Faces that enclose the space: the closed shell when present, else the
/// analytical shell
fn enclosure(shell: &ShellGeometry) -> Box<dyn Iterator<Item = &Face> + '_> {
    match (&shell.closed_shell, &shell.analytical_shell) {
        (Some(closed), _) => Box::new(closed.faces.iter()),
        (None, Some(analytical)) => Box::new(
            analytical
                .shell_surfaces
                .iter()
                .flat_map(|s| s.faces.iter()),
        ),
        (None, None) => Box::new(std::iter::empty()),
    }
}

/// Metrics for one space
pub fn space_metrics(space: &Space) -> Result<SpaceMetrics> {
    let mut shell_surface_area = 0.0;
    for face in enclosure(&space.shell_geometry) {
        shell_surface_area += face_area(face)?;
    }
    let shell_volume = match &space.shell_geometry.closed_shell {
        Some(closed) => Some(closed_shell_volume(closed)?),
        None => None,
    };
    Ok(SpaceMetrics {
        space_id: space.id.clone(),
        declared_area: space.area,
        declared_volume: space.volume,
        shell_surface_area,
        shell_volume,
    })
}

/// Metrics for every space of a building, computed in parallel
pub fn building_metrics(building: &Building) -> Result<Vec<SpaceMetrics>> {
    building.spaces.par_iter().map(space_metrics).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use gbxml_lite_model::{AnalyticalShell, ClosedShell, ShellSurface};

    /// Axis-aligned box faces, outward winding
    fn box_faces(dx: f32, dy: f32, dz: f32) -> Vec<Face> {
        let quads = [
            [[0., 0., 0.], [0., dy, 0.], [dx, dy, 0.], [dx, 0., 0.]],
            [[0., 0., dz], [dx, 0., dz], [dx, dy, dz], [0., dy, dz]],
            [[0., 0., 0.], [dx, 0., 0.], [dx, 0., dz], [0., 0., dz]],
            [[0., dy, 0.], [0., dy, dz], [dx, dy, dz], [dx, dy, 0.]],
            [[0., 0., 0.], [0., 0., dz], [0., dy, dz], [0., dy, 0.]],
            [[dx, 0., 0.], [dx, dy, 0.], [dx, dy, dz], [dx, 0., dz]],
        ];
        quads
            .iter()
            .map(|q| {
                Face::new(
                    q.iter().map(|p: &[f32; 3]| p.to_vec()).collect(),
                    vec![0, 1, 2, 0, 2, 3],
                )
            })
            .collect()
    }

    fn space(id: &str, shell: ShellGeometry, area: f32, volume: f32) -> Space {
        Space {
            id: id.into(),
            area,
            volume,
            shell_geometry: shell,
            ..Default::default()
        }
    }

    #[test]
    fn test_closed_shell_metrics() {
        let shell = ShellGeometry::new("sg1", "Meters").with_closed_shell(ClosedShell {
            faces: box_faces(4.0, 5.0, 3.0),
        });
        let metrics = space_metrics(&space("sp1", shell, 20.0, 50.0)).unwrap();
        assert_eq!(metrics.space_id, "sp1");
        assert_relative_eq!(metrics.shell_surface_area, 94.0, epsilon = 1e-6);
        assert_relative_eq!(metrics.shell_volume.unwrap(), 60.0, epsilon = 1e-6);
        assert_relative_eq!(metrics.volume_deviation().unwrap(), 0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_analytical_only_has_no_volume() {
        let shell = ShellGeometry::new("sg1", "Meters").with_analytical_shell(AnalyticalShell {
            shell_surfaces: vec![ShellSurface {
                surface_type: "Roof".into(),
                faces: box_faces(1.0, 1.0, 1.0)[..1].to_vec(),
            }],
        });
        let metrics = space_metrics(&space("sp1", shell, 1.0, 0.0)).unwrap();
        assert_relative_eq!(metrics.shell_surface_area, 1.0, epsilon = 1e-9);
        assert_eq!(metrics.shell_volume, None);
        assert_eq!(metrics.volume_deviation(), None);
    }

    #[test]
    fn test_closed_shell_preferred_over_analytical() {
        let shell = ShellGeometry::new("sg1", "Meters")
            .with_closed_shell(ClosedShell {
                faces: box_faces(1.0, 1.0, 1.0),
            })
            .with_analytical_shell(AnalyticalShell {
                shell_surfaces: vec![ShellSurface {
                    surface_type: "Roof".into(),
                    faces: box_faces(1.0, 1.0, 1.0),
                }],
            });
        let metrics = space_metrics(&space("sp1", shell, 1.0, 1.0)).unwrap();
        assert_relative_eq!(metrics.shell_surface_area, 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_building_metrics_keeps_order() {
        let mut building = Building::new("b1", "Office", 100.0);
        for i in 0..8 {
            let shell = ShellGeometry::new(format!("sg{i}"), "Meters").with_closed_shell(
                ClosedShell {
                    faces: box_faces(1.0, 1.0, (i + 1) as f32),
                },
            );
            building.add_space(space(&format!("sp{i}"), shell, 1.0, 1.0));
        }
        building.add_space(space("empty", ShellGeometry::default(), 0.0, 0.0));

        let metrics = building_metrics(&building).unwrap();
        assert_eq!(metrics.len(), 9);
        for (i, m) in metrics.iter().take(8).enumerate() {
            assert_eq!(m.space_id, format!("sp{i}"));
            assert_relative_eq!(m.shell_volume.unwrap(), (i + 1) as f64, epsilon = 1e-6);
        }
        assert_eq!(metrics[8].shell_surface_area, 0.0);
        assert_eq!(metrics[8].shell_volume, None);
    }
}
