//! Frame loop driving the visualization lifecycle.
//!
//! Each frame: `update()` then `render()` for every visualization-capable
//! node, with `prepare()` on first sight and `finalize()` on shutdown. The
//! loop discovers nodes through a [`NetworkHandle`] snapshot, so it keeps
//! working while the worker thread mutates the graph and degrades to an idle
//! loop when the network is gone.
//!
//! Render failures are logged on this thread and never reach the worker.

use crate::config::RenderConfig;
use crate::network::handle::NetworkHandle;
use crate::network::visualization::Visualization;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Owns the rendering thread.
pub struct RenderDriver {
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl RenderDriver {
    /// Spawn the render loop on its own thread.
    pub fn spawn(handle: NetworkHandle, config: RenderConfig) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let worker = std::thread::Builder::new()
            .name("flowvis-render".to_string())
            .spawn(move || render_loop(handle, config, running_clone))
            .expect("failed to spawn render thread");

        Self {
            running,
            worker: Some(worker),
        }
    }

    /// Stop the render loop and block until the thread has exited. All
    /// prepared visualizations are finalized first.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("render thread panicked");
            }
        }
    }
}

impl Drop for RenderDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

fn render_loop(handle: NetworkHandle, config: RenderConfig, running: Arc<AtomicBool>) {
    tracing::info!(frame_rate_hz = config.frame_rate_hz, "render thread started");

    let frame_interval = if config.frame_rate_hz == 0 {
        Duration::from_millis(10)
    } else {
        Duration::from_nanos(1_000_000_000 / config.frame_rate_hz as u64)
    };

    let mut prepared: Vec<Arc<dyn Visualization>> = Vec::new();

    while running.load(Ordering::SeqCst) {
        let frame_start = Instant::now();

        let mut current: Vec<Arc<dyn Visualization>> = Vec::new();
        handle.visit_visualizations(|vis| current.push(vis.clone()));

        for vis in &current {
            if !prepared.iter().any(|p| Arc::ptr_eq(p, vis)) {
                match vis.prepare() {
                    Ok(()) => prepared.push(vis.clone()),
                    Err(e) => {
                        tracing::error!(%e, "visualization prepare failed");
                        continue;
                    }
                }
            }

            vis.update();
            if let Err(e) = vis.render() {
                tracing::error!(%e, "visualization render failed");
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_interval {
            std::thread::sleep(frame_interval - elapsed);
        }
    }

    for vis in &prepared {
        vis.finalize();
    }
    tracing::info!("render thread stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{DatasetSource, RenderMesh};
    use crate::network::algorithm::NetworkNode;
    use crate::network::network::ProcessingNetwork;
    use crate::types::{DataType, Dataset, TriangleMesh};

    #[test]
    fn test_driver_prepares_renders_and_finalizes() {
        let network = ProcessingNetwork::new();
        network.start();

        let source_algo = DatasetSource::new(DataType::TriangleMesh);
        source_algo
            .set_dataset(Arc::new(Dataset::TriangleMesh(TriangleMesh::new(
                vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                vec![[0, 1, 2]],
            ))))
            .unwrap();
        let renderer_algo = RenderMesh::new();

        let source = NetworkNode::new(source_algo);
        let renderer = NetworkNode::with_visualization(renderer_algo.clone());
        network.add_algorithm(source.clone(), None);
        network.add_algorithm(renderer.clone(), None);
        network.connect(&source, "data", &renderer, "mesh", None);
        network.run_network(None).wait();

        let mut driver = RenderDriver::spawn(network.handle(), RenderConfig { frame_rate_hz: 200 });

        // Give the loop a few frames.
        std::thread::sleep(Duration::from_millis(50));
        driver.stop();

        assert!(renderer_algo.frames_rendered() > 0);
        assert!(!renderer_algo.is_prepared());
        assert!(renderer_algo.bounding_box().is_valid());

        network.stop(true);
    }

    #[test]
    fn test_driver_idles_without_network() {
        let mut driver =
            RenderDriver::spawn(NetworkHandle::disconnected(), RenderConfig::default());
        std::thread::sleep(Duration::from_millis(20));
        driver.stop();
    }
}
