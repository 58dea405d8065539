use std::{fs::{self, File}, io::BufReader, path::{Path, PathBuf}, time::Instant};

use anyhow::{ensure, Context};
use clap::Parser;
use huffman_rust::{decompress, ArchiveProperties, CodeTable, Compressed};

#[derive(Parser, Debug)]
#[command(about = "Restore a file compressed by compress_huff")]
struct Args {
    /// The basename of the compressed file (<source>.huf and <source>.properties)
    source_name: String,
    /// The destination file
    dest_name: String,
    /// Code table to use instead of the one named in the properties
    #[arg(short, long)]
    codes: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let props_name = format!("{}.properties", args.source_name);
    let props_file = File::open(&props_name)
        .with_context(|| format!("Could not find {}", props_name))?;
    let props = ArchiveProperties::read(BufReader::new(props_file))
        .with_context(|| format!("Failed parsing {}", props_name))?;
    log::debug!("{:?}", props);

    let codes_path = args.codes.unwrap_or_else(|| {
        Path::new(&props_name)
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&props.codes)
    });
    let codes_text = fs::read_to_string(&codes_path)
        .with_context(|| format!("Could not read {}", codes_path.display()))?;
    let table: CodeTable = codes_text
        .parse()
        .with_context(|| format!("Malformed code table {}", codes_path.display()))?;

    let huf_name = format!("{}.huf", args.source_name);
    let payload = fs::read(&huf_name)
        .with_context(|| format!("Could not read {}", huf_name))?;
    ensure!(
        payload.len() == props.compressed_length,
        "{} holds {} bytes, the properties announce {}", huf_name, payload.len(), props.compressed_length
    );

    let compressed = Compressed::new(payload, props.padding_bits)
        .with_context(|| format!("Corrupt payload {}", huf_name))?;

    let decomp_time = Instant::now();
    let output = decompress(&compressed, &table)
        .with_context(|| format!("Failed decoding {}", huf_name))?;
    let decomp_time = decomp_time.elapsed().as_nanos() as f64;

    ensure!(
        output.len() == props.original_length,
        "decoded {} bytes, the properties announce {}", output.len(), props.original_length
    );

    fs::write(&args.dest_name, &output)
        .with_context(|| format!("Failed storing {}", args.dest_name))?;

    println!("decompressed {} in {}ns", args.source_name, decomp_time);
    Ok(())
}
