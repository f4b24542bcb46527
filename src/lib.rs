//! Build-time generator of typed operator dispatch for voxel containers.
//!
//! registry → lower (IR) → codegen (text) → generate (artifacts on disk).
//! Build scripts call [`generate_all`] + [`write_artifacts`]; the `voxelgen`
//! binary wraps the same calls.
pub mod audit;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod error;
pub mod generate;
pub mod ir;
pub mod lower;
pub mod promotion;
pub mod registry;

use std::sync::Once;

pub use config::GeneratorConfig;
pub use error::{GenError, RegistryError, Result};
pub use generate::{
    Artifact, Family, artifact, artifact_name, file_name, generate_all, generate_arithmetic_extensions,
    generate_logical_extensions, include_index, type_file_mapping, write_artifacts,
};
pub use registry::Registry;

static TRACING_INIT: Once = Once::new();

/// Install a `fmt` subscriber filtered by `RUST_LOG`, or by `default_level`
/// when `RUST_LOG` is unset. Later calls are no-ops.
pub fn init_tracing(default_level: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("voxelgen={default_level}")));
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
            .with(filter)
            .try_init();
    });
}
