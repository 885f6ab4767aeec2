// SPDX-License-Identifier: Apache-2.0

//! Decodes a data file against a schema file and prints the value tree.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{debug, error};
use microjson::{ExtractConfig, Extractor, UnknownTagPolicy};

#[derive(Parser, Debug)]
#[command(name = "ujdump", version, about = "Dump a data/schema pair as a value tree")]
struct Args {
    /// Binary data file
    data: PathBuf,
    /// Schema file, one tag byte per value
    #[arg(long)]
    schema: PathBuf,
    /// Treat unknown schema tags as null instead of failing
    #[arg(long)]
    lenient: bool,
    /// Maximum array/object nesting
    #[arg(long, default_value_t = ExtractConfig::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Fail if either file has bytes left after the root value
    #[arg(long)]
    exact: bool,
}

fn read_file(path: &Path) -> Vec<u8> {
    match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error: Unable to read file '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn hex_line(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    debug!("{:?}", args);

    let data = read_file(&args.data);
    let schema = read_file(&args.schema);
    println!("data:   {}", hex_line(&data));
    println!("schema: {}", String::from_utf8_lossy(&schema));

    let policy = if args.lenient {
        UnknownTagPolicy::Ignore
    } else {
        UnknownTagPolicy::Error
    };
    let config = ExtractConfig::new()
        .with_max_depth(args.max_depth)
        .with_unknown_tags(policy);
    let mut extractor = Extractor::with_config(&data, &schema, config);

    let value = match extractor.extract() {
        Ok(value) => value,
        Err(e) => {
            error!(
                "Failed at data offset {}, schema offset {}",
                extractor.data_position(),
                extractor.schema_position()
            );
            eprintln!("Error: extraction failed: {}", e);
            std::process::exit(1);
        }
    };
    println!("{:#?}", value);
    println!(
        "consumed {}/{} data bytes, {}/{} schema bytes",
        extractor.data_position(),
        data.len(),
        extractor.schema_position(),
        schema.len()
    );

    if args.exact {
        if let Err(e) = extractor.finish() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
