//! Mesh renderer: an algorithm that is also a visualization.
//!
//! `process()` runs on the worker thread and only hands over an immutable
//! dataset snapshot plus a render request; everything resource-shaped
//! happens on the rendering thread in `prepare`/`update`/`render`/`finalize`.

use crate::error::{FlowVisError, Result};
use crate::network::algorithm::Algorithm;
use crate::network::connector::Connector;
use crate::network::visualization::{RenderRequest, Visualization};
use crate::types::{BoundingBox, DataType, SharedDataset};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Render-thread-side staging state rebuilt from the latest snapshot.
#[derive(Debug, Default)]
struct MeshBuffers {
    vertex_count: usize,
    triangle_count: usize,
}

/// Renders a triangle mesh. Implements both the processing and the rendering
/// facet of a node.
pub struct RenderMesh {
    inputs: Vec<Arc<Connector>>,
    /// Most recent dataset published by `process()`. The rendering thread
    /// swaps this in at its own pace; the snapshot itself is immutable.
    snapshot: Mutex<Option<SharedDataset>>,
    /// Extent of the snapshot, kept separately so the bounding-box query
    /// stays cheap on the rendering thread.
    bounds: Mutex<BoundingBox>,
    request: RenderRequest,
    prepared: AtomicBool,
    buffers: Mutex<Option<MeshBuffers>>,
    frames_rendered: AtomicU64,
}

impl RenderMesh {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inputs: vec![Connector::input(
                "mesh",
                "the triangle mesh to render",
                DataType::TriangleMesh,
            )],
            snapshot: Mutex::new(None),
            bounds: Mutex::new(BoundingBox::empty()),
            request: RenderRequest::new(),
            prepared: AtomicBool::new(false),
            buffers: Mutex::new(None),
            frames_rendered: AtomicU64::new(0),
        })
    }

    /// Number of frames drawn so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered.load(Ordering::Relaxed)
    }

    /// True if `prepare()` has run and `finalize()` has not.
    pub fn is_prepared(&self) -> bool {
        self.prepared.load(Ordering::Acquire)
    }
}

impl Algorithm for RenderMesh {
    fn name(&self) -> &str {
        "Mesh Renderer"
    }

    fn description(&self) -> &str {
        "Renders a triangle mesh dataset"
    }

    fn inputs(&self) -> &[Arc<Connector>] {
        &self.inputs
    }

    fn outputs(&self) -> &[Arc<Connector>] {
        &[]
    }

    fn process(&self) -> Result<()> {
        let input = self.inputs[0].value();

        let bounds = input
            .as_ref()
            .map(|d| d.bounding_box())
            .unwrap_or_else(BoundingBox::empty);

        *self.snapshot.lock().unwrap() = input;
        *self.bounds.lock().unwrap() = bounds;
        self.request.request();
        Ok(())
    }
}

impl Visualization for RenderMesh {
    fn prepare(&self) -> Result<()> {
        *self.buffers.lock().unwrap() = Some(MeshBuffers::default());
        self.prepared.store(true, Ordering::Release);
        tracing::debug!("mesh renderer prepared");
        Ok(())
    }

    fn update(&self) {
        // Cheap when nothing changed: a single atomic swap.
        if !self.request.take() {
            return;
        }

        let snapshot = self.snapshot.lock().unwrap().clone();
        let mut buffers = self.buffers.lock().unwrap();
        match snapshot.as_ref().and_then(|d| d.as_triangle_mesh()) {
            Some(mesh) => {
                *buffers = Some(MeshBuffers {
                    vertex_count: mesh.vertices.len(),
                    triangle_count: mesh.triangles.len(),
                });
            }
            None => {
                *buffers = Some(MeshBuffers::default());
            }
        }
    }

    fn render(&self) -> Result<()> {
        if !self.is_prepared() {
            return Err(FlowVisError::Node {
                algorithm: self.name().to_string(),
                message: "render() called before prepare()".to_string(),
            });
        }
        self.frames_rendered.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn finalize(&self) {
        *self.buffers.lock().unwrap() = None;
        self.prepared.store(false, Ordering::Release);
        tracing::debug!("mesh renderer finalized");
    }

    fn bounding_box(&self) -> BoundingBox {
        *self.bounds.lock().unwrap()
    }

    fn request_render(&self) {
        self.request.request();
    }

    fn is_render_requested(&self) -> bool {
        self.request.is_requested()
    }
}
