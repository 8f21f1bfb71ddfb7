//! flowvis demo - Main Entry Point
//!
//! Loads a Wavefront OBJ mesh, pipes it through a centering transform into a
//! mesh renderer, runs the network once and reports the rendered bounds.

use flowvis::algorithms::{CenterMesh, DatasetSource, RenderMesh};
use flowvis::config::AppConfig;
use flowvis::network::{NetworkNode, ProcessingNetwork, Visualization};
use flowvis::render::RenderDriver;
use flowvis::types::DataType;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load_or_default("flowvis.toml");

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting flowvis demo");

    let path: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("mesh.obj"));

    let network = ProcessingNetwork::new();
    network.start();

    // Load the mesh up front so the source node can be seeded with it.
    let read = network.load_file(&path, None);
    read.wait();
    let dataset = read
        .result()
        .ok_or_else(|| anyhow::anyhow!("failed to load {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        bounds = ?dataset.bounding_box(),
        "loaded dataset"
    );

    // Source -> center -> renderer
    let source_algo = DatasetSource::new(DataType::TriangleMesh);
    source_algo
        .set_dataset(dataset)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let source = NetworkNode::new(source_algo);
    let center = NetworkNode::new(CenterMesh::new());
    let renderer_algo = RenderMesh::new();
    let renderer = NetworkNode::with_visualization(renderer_algo.clone());

    network.add_algorithm(source.clone(), None);
    network.add_algorithm(center.clone(), None);
    network.add_algorithm(renderer.clone(), None);
    network.connect(&source, "data", &center, "mesh", None);
    network.connect(&center, "centered", &renderer, "mesh", None);
    network.run_network(None).wait();

    // Let the render thread pick the snapshot up for a few frames.
    let mut driver = RenderDriver::spawn(network.handle(), config.render.clone());
    std::thread::sleep(Duration::from_millis(250));
    driver.stop();

    let bounds = renderer_algo.bounding_box();
    tracing::info!(?bounds, frames = renderer_algo.frames_rendered(), "done");
    println!(
        "rendered bounds: min {:?} max {:?} ({} frames)",
        bounds.min,
        bounds.max,
        renderer_algo.frames_rendered()
    );

    network.stop(true);
    Ok(())
}
