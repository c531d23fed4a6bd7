//! Generates Jsonipc and V8 stubs for a small widget model.
//!
//! Run with: `cargo run --example generate -- [model.xml] [output-dir]`
//!
//! Set `RUST_LOG=debug` to trace the generator phases.

use anyhow::Context;
use idlbind::prelude::*;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_MODEL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/examples/models/widgets.xml");

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let mut args = std::env::args().skip(1);
    let model = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_MODEL.to_string()));
    let out_dir = match args.next() {
        Some(dir) => PathBuf::from(dir),
        None => std::env::temp_dir().join("idlbind-demo"),
    };
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let xml = std::fs::read_to_string(&model)
        .with_context(|| format!("reading {}", model.display()))?;
    let graph = parse_unit(&xml).context("loading model")?;
    info!(types = graph.len(), model = %model.display(), "model loaded");

    let strip = model
        .parent()
        .map(|dir| format!("strip-path={}/", dir.display()))
        .unwrap_or_default();
    let registry = BackendRegistry::with_builtin();

    for name in registry.names() {
        let config = GeneratorConfig::new()
            .output(out_dir.join(format!("widgets_{name}.cc")).to_string_lossy())
            .file(&model)
            .backend_option(strip.clone());

        match registry.run(name, &graph, &config)? {
            RunOutcome::Generated { path, bytes } => {
                println!("{name:>8}: {} ({bytes} bytes)", path.display());
            }
            RunOutcome::IncludePath(path) => println!("{name:>8}: {}", path.display()),
        }

        let include = registry.run(
            name,
            &graph,
            &GeneratorConfig::new().backend_option("--print-include-path"),
        )?;
        if let RunOutcome::IncludePath(path) = include {
            println!("{:>8}  include: {}", "", path.display());
        }
    }

    Ok(())
}
