//! Transform node that recenters a triangle mesh on the origin.

use crate::error::Result;
use crate::network::algorithm::Algorithm;
use crate::network::connector::Connector;
use crate::types::{DataType, Dataset, TriangleMesh};
use std::sync::Arc;

/// Translates a triangle mesh so its bounding-box center lands on the
/// origin. Produces a new dataset; the input snapshot is never mutated.
pub struct CenterMesh {
    inputs: Vec<Arc<Connector>>,
    outputs: Vec<Arc<Connector>>,
}

impl CenterMesh {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inputs: vec![Connector::input(
                "mesh",
                "the mesh to recenter",
                DataType::TriangleMesh,
            )],
            outputs: vec![Connector::output(
                "centered",
                "the recentered mesh",
                DataType::TriangleMesh,
            )],
        })
    }
}

impl Algorithm for CenterMesh {
    fn name(&self) -> &str {
        "Center Mesh"
    }

    fn description(&self) -> &str {
        "Translates a mesh so its bounding-box center is the origin"
    }

    fn inputs(&self) -> &[Arc<Connector>] {
        &self.inputs
    }

    fn outputs(&self) -> &[Arc<Connector>] {
        &self.outputs
    }

    fn process(&self) -> Result<()> {
        let Some(input) = self.inputs[0].value() else {
            // Unconnected or upstream produced nothing yet.
            self.outputs[0].clear();
            return Ok(());
        };
        let Some(mesh) = input.as_triangle_mesh() else {
            // Connector typing makes this unreachable.
            self.outputs[0].clear();
            return Ok(());
        };

        let bb = mesh.bounding_box();
        if !bb.is_valid() {
            self.outputs[0].clear();
            return Ok(());
        }

        let center = bb.center();
        let vertices = mesh
            .vertices
            .iter()
            .map(|v| [v[0] - center[0], v[1] - center[1], v[2] - center[2]])
            .collect();

        let centered = TriangleMesh::new(vertices, mesh.triangles.clone());
        self.outputs[0].publish(Arc::new(Dataset::TriangleMesh(centered)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centers_mesh() {
        let algo = CenterMesh::new();
        let mesh = TriangleMesh::new(
            vec![[1.0, 1.0, 1.0], [3.0, 1.0, 1.0], [1.0, 3.0, 1.0]],
            vec![[0, 1, 2]],
        );
        algo.inputs[0]
            .publish(Arc::new(Dataset::TriangleMesh(mesh)))
            .unwrap();

        algo.process().unwrap();

        let out = algo.outputs[0].value().unwrap();
        let bb = out.bounding_box();
        let center = bb.center();
        for axis in 0..3 {
            assert!(center[axis].abs() < 1e-6);
        }
    }

    #[test]
    fn test_empty_input_clears_output() {
        let algo = CenterMesh::new();
        algo.process().unwrap();
        assert!(algo.outputs[0].value().is_none());
    }
}
