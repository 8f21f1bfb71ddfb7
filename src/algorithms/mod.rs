//! Built-in algorithm nodes.
//!
//! Sources inject data, transforms rewrite it, and renderers consume it:
//!
//! ```text
//! [Data Source] ──► [Center Mesh] ──► [Mesh Renderer]
//! ```

pub mod center_mesh;
pub mod dataset_source;
pub mod render_mesh;

pub use center_mesh::CenterMesh;
pub use dataset_source::DatasetSource;
pub use render_mesh::RenderMesh;
