//! Core data types shared across the engine.
//!
//! Datasets are immutable once produced: they travel through the network and
//! across the rendering-thread boundary as `Arc<Dataset>` snapshots, so a
//! consumer never observes a partially-updated dataset.

use std::sync::Arc;

/// The declared type of data a connector carries.
///
/// Compatibility between connectors is exact equality; a connection between
/// differing types is rejected, never coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// An indexed triangle mesh.
    TriangleMesh,
    /// An indexed line set.
    Lines,
}

impl DataType {
    /// Human-readable name, used in error messages and logging.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::TriangleMesh => "triangle mesh",
            DataType::Lines => "lines",
        }
    }
}

/// An axis-aligned bounding box.
///
/// The empty box is degenerate (`min > max` on every axis) and is the extent
/// reported by visualizations before any data has been produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    /// An empty (degenerate) bounding box.
    pub fn empty() -> Self {
        Self {
            min: [f32::INFINITY; 3],
            max: [f32::NEG_INFINITY; 3],
        }
    }

    /// A box spanning the two given corners.
    pub fn from_corners(min: [f32; 3], max: [f32; 3]) -> Self {
        let mut bb = Self::empty();
        bb.include(min);
        bb.include(max);
        bb
    }

    /// True if the box contains at least one point.
    pub fn is_valid(&self) -> bool {
        self.min[0] <= self.max[0] && self.min[1] <= self.max[1] && self.min[2] <= self.max[2]
    }

    /// Grow the box to contain `point`.
    pub fn include(&mut self, point: [f32; 3]) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(point[axis]);
            self.max[axis] = self.max[axis].max(point[axis]);
        }
    }

    /// Grow the box to contain `other`.
    pub fn merge(&mut self, other: &BoundingBox) {
        if other.is_valid() {
            self.include(other.min);
            self.include(other.max);
        }
    }

    /// Center of the box. Meaningless for an empty box.
    pub fn center(&self) -> [f32; 3] {
        [
            0.5 * (self.min[0] + self.max[0]),
            0.5 * (self.min[1] + self.max[1]),
            0.5 * (self.min[2] + self.max[2]),
        ]
    }

    /// Edge lengths of the box.
    pub fn size(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

/// An indexed triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<[f32; 3]>,
    /// Triangles as triples of vertex indices.
    pub triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
    pub fn new(vertices: Vec<[f32; 3]>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    /// Bounding box of all vertices.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bb = BoundingBox::empty();
        for v in &self.vertices {
            bb.include(*v);
        }
        bb
    }
}

/// An indexed line set.
#[derive(Debug, Clone, Default)]
pub struct LineSet {
    /// Vertex positions.
    pub vertices: Vec<[f32; 3]>,
    /// Line segments as pairs of vertex indices.
    pub lines: Vec<[u32; 2]>,
}

impl LineSet {
    pub fn new(vertices: Vec<[f32; 3]>, lines: Vec<[u32; 2]>) -> Self {
        Self { vertices, lines }
    }

    /// Bounding box of all vertices.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bb = BoundingBox::empty();
        for v in &self.vertices {
            bb.include(*v);
        }
        bb
    }
}

/// A typed dataset flowing through the network.
#[derive(Debug, Clone)]
pub enum Dataset {
    TriangleMesh(TriangleMesh),
    Lines(LineSet),
}

impl Dataset {
    /// The declared type tag of this dataset.
    pub fn data_type(&self) -> DataType {
        match self {
            Dataset::TriangleMesh(_) => DataType::TriangleMesh,
            Dataset::Lines(_) => DataType::Lines,
        }
    }

    /// Spatial extent of the dataset.
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Dataset::TriangleMesh(mesh) => mesh.bounding_box(),
            Dataset::Lines(lines) => lines.bounding_box(),
        }
    }

    /// The contained triangle mesh, if this dataset is one.
    pub fn as_triangle_mesh(&self) -> Option<&TriangleMesh> {
        match self {
            Dataset::TriangleMesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// The contained line set, if this dataset is one.
    pub fn as_lines(&self) -> Option<&LineSet> {
        match self {
            Dataset::Lines(lines) => Some(lines),
            _ => None,
        }
    }
}

/// Shared, immutable dataset snapshot.
pub type SharedDataset = Arc<Dataset>;
