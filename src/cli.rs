//! Minimal CLI: registry → (one artifact | all artifacts | catalog dump | audit)
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::config::GeneratorConfig;
use crate::generate::{self, Family};
use crate::registry::Registry;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate typed operator dispatch (comparisons, arithmetic, selection) for voxel containers
#[derive(Parser, Debug)]
#[command(name = "voxelgen", version)]
pub struct CommandLineInterface {
    /// more log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// render one (container, family) artifact
    Generate(GenerateOut),
    /// render every requested artifact into a directory, plus an include index
    All(AllOut),
    /// print the validated catalog as JSON
    Registry(RegistryOut),
    /// audit generated files for dispatch exhaustiveness
    Check(CheckIn),
}

#[derive(Args, Debug, Clone)]
struct RuntimeSettings {
    /// path prefix of the runtime the generated code targets
    #[arg(long)]
    runtime_path: Option<String>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    /// container short id (RA, RAI, RRA, RRARI)
    #[arg(long, short)]
    container: String,

    #[arg(long, short, value_enum, default_value_t = Family::Logical)]
    family: Family,

    /// artifact name in the header (defaults to `<Container><Family>Extensions`)
    #[arg(long)]
    name: Option<String>,

    #[command(flatten)]
    runtime: RuntimeSettings,

    /// output .rs file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct AllOut {
    /// JSON generator config; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// output directory
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// restrict to these container short ids (repeatable)
    #[arg(long = "container", short)]
    containers: Vec<String>,

    /// restrict to these families (repeatable)
    #[arg(long = "family", short, value_enum)]
    families: Vec<Family>,

    #[command(flatten)]
    runtime: RuntimeSettings,

    /// include index file name
    #[arg(long)]
    index_file: Option<String>,

    /// skip the include index (also `no_index` in the config)
    #[arg(long, default_value_t = false)]
    no_index: bool,

    /// index resolves files via `env!("OUT_DIR")` instead of relative paths
    #[arg(long, default_value_t = false)]
    out_dir_env: bool,
}

#[derive(clap::Parser, Debug)]
struct RegistryOut {
    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct CheckIn {
    /// One or more generated files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl RuntimeSettings {
    fn resolve<'a>(&'a self, config: &'a GeneratorConfig) -> &'a str {
        self.runtime_path.as_deref().unwrap_or_else(|| config.runtime_path())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// `tracing` level implied by `-v`.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let registry = Registry::builtin().context("builtin registry is malformed")?;
        match &self.cmd {
            Command::Generate(target) => {
                let container = registry.container(&target.container)?;
                let name = target
                    .name
                    .clone()
                    .unwrap_or_else(|| generate::artifact_name(container, target.family));
                let runtime = target.runtime.resolve(&GeneratorConfig::default()).to_string();
                let source = generate::generate_family(&registry, &target.container, target.family, &name, &runtime)?;
                emit(target.out.as_deref(), &source)?;
            }
            Command::All(target) => {
                let config = match target.config.as_ref() {
                    Some(path) => GeneratorConfig::load(path)
                        .with_context(|| format!("failed to load config {}", path.display()))?,
                    None => GeneratorConfig::default(),
                };
                let Some(out_dir) = target.out_dir.clone().or_else(|| config.out_dir.clone()) else {
                    bail!("no output directory: pass --out-dir or set `out_dir` in the config");
                };
                let containers = if target.containers.is_empty() { &config.containers } else { &target.containers };
                let families = if target.families.is_empty() { config.families() } else { target.families.clone() };
                let runtime = target.runtime.resolve(&config);
                let index_file = target.index_file.as_deref().unwrap_or_else(|| config.index_file());

                let artifacts = generate::generate_all(&registry, containers, &families, runtime)?;
                let index = (!(target.no_index || config.no_index)).then_some((index_file, target.out_dir_env));
                let written = generate::write_artifacts(&out_dir, &artifacts, index)?;
                for path in &written {
                    eprintln!("{} {}", "wrote".green().bold(), path.display());
                }
            }
            Command::Registry(target) => {
                let source = serde_json::to_string_pretty(&registry)?;
                emit(target.out.as_deref(), &source)?;
            }
            Command::Check(target) => {
                let paths = resolve_file_path_patterns(&target.input)?;
                let mut failures = 0usize;
                for path in &paths {
                    let source = std::fs::read_to_string(path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    let findings = crate::audit::check(&source, &registry);
                    if findings.is_empty() {
                        eprintln!("{} {}", "ok".green().bold(), path.display());
                        continue;
                    }
                    failures += findings.len();
                    eprintln!("{} {}", "fail".red().bold(), path.display());
                    for finding in &findings {
                        eprintln!("  {finding}");
                    }
                }
                if failures > 0 {
                    bail!("{failures} finding(s) across {} file(s)", paths.len());
                }
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn emit(out: Option<&Path>, source: &str) -> anyhow::Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(out, source).with_context(|| format!("failed to write {}", out.display()))?;
        }
        None => println!("{source}"),
    }
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
