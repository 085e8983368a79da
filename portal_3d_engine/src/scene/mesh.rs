/// Mesh - flat-colored indexed triangle mesh.
///
/// Positions are in local space; triangles are counter-clockwise when seen
/// from their front side. Meshes are immutable once built and shared
/// between scene objects through `Arc`.

use glam::{Mat4, Vec3};
use crate::error::{Error, Result};

/// RGBA color with channels in [0, 1]
pub type Color = [f32; 4];

/// Opaque color from 8-bit channels
pub fn rgb8(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

// ===== AABB =====

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Smallest box enclosing all points. `None` for an empty slice.
    pub fn from_points(points: &[Vec3]) -> Option<AABB> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(AABB { min, max })
    }

    /// Transform this local-space AABB by a matrix, returning a new AABB.
    ///
    /// Arvo's method: projects each matrix axis onto the extents for a tight
    /// result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

// ===== MESH =====

#[derive(Debug, Clone)]
pub struct Mesh {
    name: String,
    positions: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    color: Color,
    bounds: AABB,
}

impl Mesh {
    /// Build a mesh, validating that every index refers to a position.
    pub fn new(
        name: impl Into<String>,
        positions: Vec<Vec3>,
        triangles: Vec<[u32; 3]>,
        color: Color,
    ) -> Result<Self> {
        let name = name.into();
        let bounds = AABB::from_points(&positions).ok_or_else(|| {
            Error::InvalidResource(format!("Mesh '{}' has no positions", name))
        })?;

        let count = positions.len() as u32;
        if let Some(bad) = triangles.iter().flatten().find(|&&index| index >= count) {
            return Err(Error::InvalidResource(format!(
                "Mesh '{}': index {} out of range ({} positions)",
                name, bad, count
            )));
        }

        Ok(Self { name, positions, triangles, color, bounds })
    }

    /// Rectangle in the local XY plane, centered at the origin, facing +Z.
    pub fn quad(width: f32, height: f32, color: Color) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        let positions = vec![
            Vec3::new(-hw, -hh, 0.0),
            Vec3::new(hw, -hh, 0.0),
            Vec3::new(hw, hh, 0.0),
            Vec3::new(-hw, hh, 0.0),
        ];
        Self {
            name: "quad".to_string(),
            bounds: AABB { min: positions[0], max: positions[2] },
            positions,
            triangles: vec![[0, 1, 2], [0, 2, 3]],
            color,
        }
    }

    /// Box centered at the origin with outward-facing triangles.
    pub fn cuboid(size: Vec3, color: Color) -> Self {
        let half = size * 0.5;
        // (normal, u, v) with u x v = normal, so (-u-v, +u-v, +u+v, -u+v) is CCW from outside
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];

        let mut positions = Vec::with_capacity(24);
        let mut triangles = Vec::with_capacity(12);
        for (normal, u, v) in faces {
            let base = positions.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                positions.push((normal + u * su + v * sv) * half);
            }
            triangles.push([base, base + 1, base + 2]);
            triangles.push([base, base + 2, base + 3]);
        }

        Self {
            name: "cuboid".to_string(),
            bounds: AABB { min: -half, max: half },
            positions,
            triangles,
            color,
        }
    }

    /// Rename (builder style).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    // ===== GETTERS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Local-space bounds
    pub fn bounds(&self) -> &AABB {
        &self.bounds
    }

    /// The three local-space corners of triangle `index`.
    pub fn triangle(&self, index: usize) -> [Vec3; 3] {
        let [a, b, c] = self.triangles[index];
        [
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        ]
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
