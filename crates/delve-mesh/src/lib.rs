//! Visible-face extraction and CPU vertex-buffer construction.
#![forbid(unsafe_code)]

mod extract;
mod mesh_build;

pub use extract::{extract_faces, rebuild_chunk};
pub use mesh_build::{MeshBuild, build_chunk_mesh};
