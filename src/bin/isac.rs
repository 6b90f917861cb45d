//!
//! Compile an instruction-set description into an encoder or decoder artifact, or list an encoded stream.
//!
//! Usage: `isac compile <target> <file>` or `isac disasm <file> <stream> [--chunk-size N]`

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, error};
use tracing_subscriber::{fmt, EnvFilter};

use isac::{build, compile, Config, Target};
use isac::wire::{split_chunks, Disassembler, DEFAULT_CHUNK_SIZE};

#[derive(Parser, Debug)]
#[command(name = "isac")]
#[command(about = "Instruction-set description compiler", version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Emit an artifact to stdout
    Compile {
        /// Artifact to generate
        #[arg(value_enum)]
        target: Target,
        /// Path to the description file
        file: PathBuf,
    },
    /// List an encoded instruction stream
    Disasm {
        /// Path to the description file the stream was encoded with
        file: PathBuf,
        /// Path to the encoded stream (chunks concatenated, all but the last padded to the chunk size)
        stream: PathBuf,
        /// Size of each chunk in bytes
        #[arg(long = "chunk-size", default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
    },
}

/// Logs to stderr. `RUST_LOG` overrides the default filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_source(path: &Path) -> (String, Config) {
    match fs::read_to_string(path) {
        Ok(source) => (source, Config::new(&path.display().to_string())),
        Err(err) => {
            error!("Failed to read {}: {}", path.display(), err);
            process::exit(1);
        }
    }
}

fn main() {
    init_logging();
    let args = Args::parse();

    match args.command {
        Command::Compile { target, file } => {
            let (source, config) = read_source(&file);
            debug!(?target, file = %file.display(), "compiling");
            match compile(&source, target, &config) {
                Ok(artifact) => print!("{}", artifact),
                Err(err) => {
                    error!("{}: {}", file.display(), err);
                    process::exit(1);
                }
            }
        }
        Command::Disasm { file, stream, chunk_size } => {
            let (source, config) = read_source(&file);
            let program = match build(&source, &config) {
                Ok(program) => program,
                Err(err) => {
                    error!("{}: {}", file.display(), err);
                    process::exit(1);
                }
            };
            let blob = match fs::read(&stream) {
                Ok(blob) => blob,
                Err(err) => {
                    error!("Failed to read {}: {}", stream.display(), err);
                    process::exit(1);
                }
            };
            let listing = Disassembler::new(&program, &config).and_then(|disassembler| disassembler.disassemble(&split_chunks(&blob, chunk_size)));
            match listing {
                Ok(listing) => print!("{}", listing),
                Err(err) => {
                    error!("{}: {}", stream.display(), err);
                    process::exit(1);
                }
            }
        }
    }
}
