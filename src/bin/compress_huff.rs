use std::{fs::{self, File}, io::BufWriter, path::Path, time::Instant};

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use huffman_rust::{compress, ArchiveProperties, CodeTable};

#[derive(Parser, Debug)]
#[command(about = "Huffman-compress a file into <dest>.huf, <dest>.codes and <dest>.properties")]
struct Args {
    /// The file to compress
    source_name: String,
    /// The destination basename
    dest_name: String,
    /// Print a JSON summary of the compression to stdout
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    source: &'a str,
    original_bytes: usize,
    compressed_bytes: usize,
    padding_bits: u8,
    symbols: usize,
    max_code_length: usize,
    ratio: f64,
    codes: &'a CodeTable,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let input = fs::read(&args.source_name)
        .with_context(|| format!("Could not read {}", args.source_name))?;

    let comp_time = Instant::now();
    let (compressed, table) = compress(&input);
    let comp_time = comp_time.elapsed().as_nanos() as f64;
    log::info!("compressed {} bytes into {} in {}ns", input.len(), compressed.len(), comp_time);

    let codes_name = format!("{}.codes", args.dest_name);
    let codes_file_name = Path::new(&codes_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(&codes_name)
        .to_owned();

    fs::write(&codes_name, table.to_string())
        .with_context(|| format!("Failed storing the code table to {}", codes_name))?;

    let props = ArchiveProperties::new(input.len(), &compressed, &table, &codes_file_name);
    let props_name = format!("{}.properties", args.dest_name);
    let props_file = File::create(&props_name)
        .with_context(|| format!("Could not create {}", props_name))?;
    props.write(BufWriter::new(props_file))
        .with_context(|| format!("Failed storing the properties to {}", props_name))?;

    let huf_name = format!("{}.huf", args.dest_name);
    fs::write(&huf_name, compressed.bytes())
        .with_context(|| format!("Failed storing the payload to {}", huf_name))?;

    if args.json {
        let summary = Summary {
            source: &args.source_name,
            original_bytes: input.len(),
            compressed_bytes: compressed.len(),
            padding_bits: compressed.padding_bits(),
            symbols: table.len(),
            max_code_length: table.max_code_len(),
            ratio: if input.is_empty() { 0.0 } else { compressed.len() as f64 / input.len() as f64 },
            codes: &table,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("compressed {} in {}ns", args.source_name, comp_time);
    }

    Ok(())
}
