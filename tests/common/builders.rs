//! Test builders for wiring standard pipelines

use flowvis::algorithms::{CenterMesh, DatasetSource, RenderMesh};
use flowvis::network::{NetworkNode, ProcessingNetwork};
use flowvis::types::{DataType, SharedDataset};
use std::sync::Arc;

/// The three nodes of the standard source -> center -> renderer pipeline.
pub struct MeshPipeline {
    pub source_algo: Arc<DatasetSource>,
    pub renderer_algo: Arc<RenderMesh>,
    pub source: NetworkNode,
    pub center: NetworkNode,
    pub renderer: NetworkNode,
}

/// Build and wire the standard mesh pipeline on a running network, then wait
/// for all graph mutations to be handled.
pub fn build_mesh_pipeline(
    network: &Arc<ProcessingNetwork>,
    dataset: SharedDataset,
) -> MeshPipeline {
    let source_algo = DatasetSource::new(DataType::TriangleMesh);
    source_algo.set_dataset(dataset).expect("dataset type");
    let renderer_algo = RenderMesh::new();

    let source = NetworkNode::new(source_algo.clone());
    let center = NetworkNode::new(CenterMesh::new());
    let renderer = NetworkNode::with_visualization(renderer_algo.clone());

    network.add_algorithm(source.clone(), None);
    network.add_algorithm(center.clone(), None);
    network.add_algorithm(renderer.clone(), None);
    network.connect(&source, "data", &center, "mesh", None);
    network
        .connect(&center, "centered", &renderer, "mesh", None)
        .wait();

    MeshPipeline {
        source_algo,
        renderer_algo,
        source,
        center,
        renderer,
    }
}
