use std::path::PathBuf;

use voxelgen::{Family, Registry};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../src");

    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    let registry = Registry::builtin()?;
    let artifacts = voxelgen::generate_all(&registry, &[], &Family::ALL, voxelgen::generate::DEFAULT_RUNTIME_PATH)?;
    voxelgen::write_artifacts(&out_dir, &artifacts, Some((voxelgen::generate::DEFAULT_INDEX_FILE, true)))?;
    Ok(())
}
