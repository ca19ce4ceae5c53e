//! Error types for the maquette viewer.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaquetteError {
    /// A mesh name coming from the UI or a config value did not match any
    /// known mesh kind. Draw-time dispatch uses the closed [`crate::gfx::mesh::MeshKind`]
    /// enum, so this can only happen at the parsing edge.
    #[error("unknown mesh name: {0:?}")]
    UnknownMesh(String),

    /// A mesh asset (bunny/cow OBJ) could not be loaded at startup.
    #[error("failed to load mesh asset {path:?}")]
    MeshAsset {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    /// An OBJ file loaded but contained no geometry.
    #[error("mesh asset {0:?} contains no models")]
    EmptyMeshAsset(String),

    /// A render pipeline could not be created. Uniform/layout mismatches
    /// surface here, at build time, never silently at draw time.
    #[error("pipeline error: {0}")]
    Pipeline(String),
}
