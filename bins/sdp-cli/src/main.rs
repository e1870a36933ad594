// SPDX-License-Identifier: Apache-2.0
//! SDP CLI
//!
//! Command-line driver for the SDP schema compiler: reads schema source
//! text and an output directory, writes one target's generated files, and
//! sets an exit code. No environment variables, no configuration files —
//! its only inputs are the arguments below.

use anyhow::{bail, Context, Result};
use clap::Parser;
use sdp::SdpError;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Validate a schema file without generating any output.
    Check {
        /// Path to the `.sdp` schema source file.
        schema: PathBuf,
    },
    /// Generate a target's source files from a schema file.
    Generate {
        /// Path to the `.sdp` schema source file.
        schema: PathBuf,
        /// Directory generated files are written into (created if missing).
        #[clap(long = "out-dir")]
        out_dir: PathBuf,
        /// Target language tag: `rust` or `go`.
        #[clap(long)]
        target: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => Ok(()),
        Err(err) => {
            error!("{err}");
            Err(err)
        }
    }
}

fn run(args: Args) -> Result<()> {
    match args.cmd {
        Command::Check { schema } => check(&schema),
        Command::Generate {
            schema,
            out_dir,
            target,
        } => generate(&schema, &out_dir, &target),
    }
}

fn check(schema_path: &PathBuf) -> Result<()> {
    let src = read_schema(schema_path)?;
    let started = Instant::now();
    match sdp::compile_schema(&src) {
        Ok(schema) => {
            info!(
                declarations = schema.len(),
                elapsed_ms = started.elapsed().as_millis(),
                "schema is valid"
            );
            Ok(())
        }
        Err(err) => report_and_bail(err),
    }
}

fn generate(schema_path: &PathBuf, out_dir: &PathBuf, target: &str) -> Result<()> {
    let src = read_schema(schema_path)?;
    let started = Instant::now();
    let package = match sdp::generate_from_source(&src, target) {
        Ok(package) => package,
        Err(err) => return report_and_bail(err),
    };
    info!(
        target_tag = package.target,
        files = package.files.len(),
        elapsed_ms = started.elapsed().as_millis(),
        "generated package"
    );

    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    for file in &package.files {
        let path = out_dir.join(&file.file_name);
        fs::write(&path, &file.contents)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(file = %path.display(), "wrote file");
    }
    Ok(())
}

fn read_schema(path: &PathBuf) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading schema file {}", path.display()))
}

fn report_and_bail(err: SdpError) -> Result<()> {
    if let SdpError::Validate(errors) = &err {
        for validation_error in errors {
            error!("{validation_error}");
        }
    }
    bail!(err)
}
