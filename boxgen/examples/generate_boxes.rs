//! Generates the Go stubs of the bundled box hierarchy.
//!
//! Run with: `cargo run --example generate_boxes`
//!
//! With an output path, the file is only rewritten when its content changes:
//! `cargo run --example generate_boxes -- stubs.go`

use boxgen::prelude::*;
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let schema = Path::new(env!("CARGO_MANIFEST_DIR")).join("schemas/boxes.xml");

    match std::env::args().nth(1).map(PathBuf::from) {
        Some(output) => {
            let written = write_generated(&schema, &output)?;
            if written {
                println!("Wrote {}", output.display());
            } else {
                println!("{} is up to date", output.display());
            }
        }
        None => {
            let registry = reference_registry()?;
            let model = ClassModel::from_registry(&registry)?;
            eprintln!(
                "{} classes, {} concrete, {} anonymous builders",
                model.classes.len(),
                model.concrete().count(),
                model.anonymous_builders().count()
            );
            print!("{}", Generator::new(&model).generate());
        }
    }

    Ok(())
}
