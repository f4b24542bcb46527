//! Artifacts: naming, rendering, and writing.
//!
//! Each artifact is a pure function of (registry, container, family, runtime
//! path). Container kinds share nothing but the read-only registry, so
//! [`generate_all`] renders them in parallel and then restores registry order.
use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};
use crate::lower::{self, Target};
use crate::registry::{ContainerKind, Registry};

/// Default path prefix the generated code uses for runtime items.
pub const DEFAULT_RUNTIME_PATH: &str = "crate";
/// Default include index file name.
pub const DEFAULT_INDEX_FILE: &str = "extensions.rs";

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Which operator group an artifact carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// comparisons + elementwise selection
    Logical,
    /// plus, minus, times, div
    Arithmetic,
}

impl Family {
    pub const ALL: [Family; 2] = [Family::Logical, Family::Arithmetic];

    /// Infix of the artifact name: `<Container><Identifier>Extensions`.
    pub fn identifier(self) -> &'static str {
        match self {
            Self::Logical => "Logical",
            Self::Arithmetic => "Arithmetic",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier().to_lowercase())
    }
}

/// One rendered output file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub container: String,      // short id
    pub family: Family,
    pub name: String,           // e.g. RandomAccessibleIntervalLogicalExtensions
    pub file_name: String,      // e.g. random_accessible_interval_logical_extensions.rs
    pub source: String,
}

// ————————————————————————————————————————————————————————————————————————————
// NAMING
// ————————————————————————————————————————————————————————————————————————————

/// `RandomAccessibleInterval` + `Logical` → `RandomAccessibleIntervalLogicalExtensions`
pub fn artifact_name(container: &ContainerKind, family: Family) -> String {
    format!("{}{}Extensions", container.name, family.identifier())
}

/// `RandomAccessibleIntervalLogicalExtensions` → `random_accessible_interval_logical_extensions.rs`
pub fn file_name(artifact_name: &str) -> String {
    let mut out = String::with_capacity(artifact_name.len() + 8);
    for (i, c) in artifact_name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out.push_str(".rs");
    out
}

/// short id → (artifact name, file name), for one family.
pub fn type_file_mapping(registry: &Registry, family: Family) -> IndexMap<String, (String, String)> {
    registry
        .containers()
        .map(|c| {
            let name = artifact_name(c, family);
            let file = file_name(&name);
            (c.short_id.clone(), (name, file))
        })
        .collect()
}

// ————————————————————————————————————————————————————————————————————————————
// GENERATION
// ————————————————————————————————————————————————————————————————————————————

/// Render the logical extensions for container `short_id` under `name`.
pub fn generate_logical_extensions(registry: &Registry, short_id: &str, name: &str, runtime: &str) -> Result<String> {
    generate_family(registry, short_id, Family::Logical, name, runtime)
}

/// Render the arithmetic extensions for container `short_id` under `name`.
pub fn generate_arithmetic_extensions(registry: &Registry, short_id: &str, name: &str, runtime: &str) -> Result<String> {
    generate_family(registry, short_id, Family::Arithmetic, name, runtime)
}

pub fn generate_family(registry: &Registry, short_id: &str, family: Family, name: &str, runtime: &str) -> Result<String> {
    let container = registry.container(short_id)?;
    let target = Target::new(registry, container, runtime);
    let module = match family {
        Family::Logical => lower::lower_logical(target, name),
        Family::Arithmetic => lower::lower_arithmetic(target, name),
    };
    Ok(crate::codegen::render(&module))
}

/// Artifact for one (container, family) under its default name.
pub fn artifact(registry: &Registry, short_id: &str, family: Family, runtime: &str) -> Result<Artifact> {
    let container = registry.container(short_id)?;
    let name = artifact_name(container, family);
    let source = generate_family(registry, short_id, family, &name, runtime)?;
    tracing::info!(artifact = %name, bytes = source.len(), "generated");
    Ok(Artifact {
        container: container.short_id.clone(),
        family,
        file_name: file_name(&name),
        name,
        source,
    })
}

/// Every requested (container × family), in registry order then family order.
///
/// An empty `containers` means all registered containers.
pub fn generate_all(registry: &Registry, containers: &[String], families: &[Family], runtime: &str) -> Result<Vec<Artifact>> {
    let ids: Vec<String> = if containers.is_empty() {
        registry.containers().map(|c| c.short_id.clone()).collect()
    } else {
        // validate up front so a typo fails before any work is done
        for id in containers {
            registry.container(id)?;
        }
        containers.to_vec()
    };
    let jobs: Vec<(&str, Family)> = ids
        .iter()
        .flat_map(|id| families.iter().map(move |f| (id.as_str(), *f)))
        .collect();
    tracing::debug!(jobs = jobs.len(), "generating artifacts");
    let mut artifacts = jobs
        .par_iter()
        .map(|(id, family)| artifact(registry, id, *family, runtime))
        .collect::<Result<Vec<_>>>()?;
    let order = |a: &Artifact| {
        let c = registry.containers().position(|c| c.short_id == a.container);
        let f = Family::ALL.iter().position(|f| *f == a.family);
        (c, f)
    };
    artifacts.sort_by_key(order);
    artifacts.dedup_by(|a, b| a.file_name == b.file_name);
    Ok(artifacts)
}

/// `include!` one line per artifact, resolved against `OUT_DIR` when
/// `out_dir_env` is set (build scripts), else relative to the index file.
pub fn include_index(artifacts: &[Artifact], out_dir_env: bool) -> String {
    let mut s = String::from("// @generated by voxelgen: include index\n");
    for a in artifacts {
        if out_dir_env {
            s.push_str(&format!("include!(concat!(env!(\"OUT_DIR\"), \"/{}\"));\n", a.file_name));
        } else {
            s.push_str(&format!("include!(\"{}\");\n", a.file_name));
        }
    }
    s
}

/// Write every artifact (and the index) into `dir`. Returns written paths.
pub fn write_artifacts(dir: &Path, artifacts: &[Artifact], index: Option<(&str, bool)>) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|source| GenError::Write { path: dir.to_path_buf(), source })?;
    let mut written = Vec::with_capacity(artifacts.len() + 1);
    for a in artifacts {
        written.push(write_if_changed(&dir.join(&a.file_name), &a.source)?);
    }
    if let Some((index_file, out_dir_env)) = index {
        let source = include_index(artifacts, out_dir_env);
        written.push(write_if_changed(&dir.join(index_file), &source)?);
    }
    Ok(written)
}

/// Skip the write when content is identical, so mtimes stay put and
/// downstream builds are not invalidated.
fn write_if_changed(path: &Path, source: &str) -> Result<PathBuf> {
    if std::fs::read_to_string(path).is_ok_and(|old| old == source) {
        tracing::debug!(path = %path.display(), "unchanged");
        return Ok(path.to_path_buf());
    }
    std::fs::write(path, source).map_err(|source| GenError::Write { path: path.to_path_buf(), source })?;
    tracing::debug!(path = %path.display(), "written");
    Ok(path.to_path_buf())
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reg() -> Registry {
        Registry::builtin().unwrap()
    }

    #[test]
    fn names_follow_container_and_family() {
        let reg = reg();
        let rai = reg.container("RAI").unwrap();
        let name = artifact_name(rai, Family::Logical);
        assert_eq!(name, "RandomAccessibleIntervalLogicalExtensions");
        assert_eq!(file_name(&name), "random_accessible_interval_logical_extensions.rs");

        let mapping = type_file_mapping(&reg, Family::Arithmetic);
        assert_eq!(mapping.keys().collect::<Vec<_>>(), ["RA", "RAI", "RRA", "RRARI"]);
        assert_eq!(mapping["RRARI"].0, "RealRandomAccessibleRealIntervalArithmeticExtensions");
    }

    #[test]
    fn generation_is_idempotent() {
        let reg = reg();
        let a = generate_logical_extensions(&reg, "RAI", "X", "crate").unwrap();
        let b = generate_logical_extensions(&reg, "RAI", "X", "crate").unwrap();
        assert_eq!(a, b);
        let all1 = generate_all(&reg, &[], &Family::ALL, "crate").unwrap();
        let all2 = generate_all(&reg, &[], &Family::ALL, "crate").unwrap();
        assert_eq!(all1, all2);
    }

    #[test]
    fn unknown_container_aborts_generation() {
        let reg = reg();
        let err = generate_logical_extensions(&reg, "XYZ", "X", "crate").unwrap_err();
        assert!(matches!(err, GenError::UnknownContainer { .. }));
        let err = generate_all(&reg, &["RA".into(), "RAX".into()], &Family::ALL, "crate").unwrap_err();
        assert!(err.to_string().contains("RAX"));
    }

    #[test]
    fn generate_all_orders_by_registry_then_family() {
        let reg = reg();
        let arts = generate_all(&reg, &["RRA".into(), "RA".into()], &[Family::Arithmetic, Family::Logical], "crate")
            .unwrap();
        let keys: Vec<_> = arts.iter().map(|a| (a.container.as_str(), a.family)).collect();
        assert_eq!(keys, [
            ("RA", Family::Logical),
            ("RA", Family::Arithmetic),
            ("RRA", Family::Logical),
            ("RRA", Family::Arithmetic),
        ]);
    }

    #[test]
    fn runtime_path_is_threaded_through() {
        let reg = reg();
        let src = generate_arithmetic_extensions(&reg, "RA", "X", "::voxels").unwrap();
        assert!(src.contains("impl<'a> ::voxels::Arithmetic<&'a ::voxels::AnyRandomAccessible> for ::voxels::AnyRandomAccessible {"));
        assert!(!src.contains("crate::"));
    }

    #[test]
    fn include_index_lists_every_artifact() {
        let reg = reg();
        let arts = generate_all(&reg, &["RA".into()], &Family::ALL, "crate").unwrap();
        assert_eq!(
            include_index(&arts, true),
            "// @generated by voxelgen: include index\n\
             include!(concat!(env!(\"OUT_DIR\"), \"/random_accessible_logical_extensions.rs\"));\n\
             include!(concat!(env!(\"OUT_DIR\"), \"/random_accessible_arithmetic_extensions.rs\"));\n"
        );
        assert!(include_index(&arts, false).contains("include!(\"random_accessible_logical_extensions.rs\");"));
    }

    #[test]
    fn writes_are_skipped_when_unchanged() {
        let reg = reg();
        let dir = std::env::temp_dir().join(format!("voxelgen-write-{}", std::process::id()));
        let arts = generate_all(&reg, &["RAI".into()], &[Family::Logical], "crate").unwrap();
        let paths = write_artifacts(&dir, &arts, Some((DEFAULT_INDEX_FILE, true))).unwrap();
        assert_eq!(paths.len(), 2);
        let before = std::fs::metadata(&paths[0]).unwrap().modified().unwrap();
        write_artifacts(&dir, &arts, Some((DEFAULT_INDEX_FILE, true))).unwrap();
        let after = std::fs::metadata(&paths[0]).unwrap().modified().unwrap();
        assert_eq!(before, after);
        assert_eq!(std::fs::read_to_string(&paths[0]).unwrap(), arts[0].source);
        std::fs::remove_dir_all(&dir).ok();
    }
}
