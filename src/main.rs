use std::{
    fs::{self, File},
    io::BufWriter,
};

use anyhow::{Context, Result};
use clap::{arg, command, ArgMatches, Command};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use huffman_text_codec::{
    compress_into, decompress_into, huffman::tree_codec, inspect::TreePrinter, CodeTable,
    CodecConfig, PayloadFormat,
};

const DEFAULT_PAYLOAD: &str = "encoded.bin";
const DEFAULT_TREE: &str = "tree.txt";
const DEFAULT_OUTPUT: &str = "result.txt";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let payload_arg = || {
        arg!(--payload <PATH> "Packed payload")
            .required(false)
            .default_value(DEFAULT_PAYLOAD)
    };
    let tree_arg = || {
        arg!(--tree <PATH> "Tree description")
            .required(false)
            .default_value(DEFAULT_TREE)
    };

    let matches = command!()
        .subcommand_required(true)
        .arg(
            arg!(--format <FORMAT> "Payload layout; `raw` matches the headerless legacy files")
                .required(false)
                .global(true)
                .default_value("framed")
                .value_parser(["framed", "raw"]),
        )
        .subcommand(
            Command::new("compress")
                .about("Compress a text file into a payload and a tree description")
                .arg(arg!(input: <INPUT> "Text file to compress"))
                .arg(payload_arg())
                .arg(tree_arg()),
        )
        .subcommand(
            Command::new("decompress")
                .about("Rebuild text from a payload and its tree description")
                .arg(payload_arg())
                .arg(tree_arg())
                .arg(
                    arg!(--output <PATH> "Decoded text")
                        .required(false)
                        .default_value(DEFAULT_OUTPUT),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print a tree description and the codes it assigns")
                .arg(tree_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("compress", matches)) => compress_file(
            value_of(matches, "input"),
            value_of(matches, "payload"),
            value_of(matches, "tree"),
            &config(matches)?,
        ),
        Some(("decompress", matches)) => decompress_file(
            value_of(matches, "payload"),
            value_of(matches, "tree"),
            value_of(matches, "output"),
            &config(matches)?,
        ),
        Some(("inspect", matches)) => inspect_tree(matches),
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn value_of<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    // Every argument read here is either required or defaulted.
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .unwrap_or_default()
}

fn config(matches: &ArgMatches) -> Result<CodecConfig> {
    let payload_format = value_of(matches, "format")
        .parse::<PayloadFormat>()
        .map_err(anyhow::Error::msg)?;
    Ok(CodecConfig { payload_format })
}

fn compress_file(
    input: &str,
    payload_path: &str,
    tree_path: &str,
    config: &CodecConfig,
) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("Couldn't read {input}"))?;
    let text = String::from_utf8_lossy(&bytes);
    info!("Read {} bytes from {input}", bytes.len());

    let mut payload = create(payload_path)?;
    let mut tree = match create(tree_path) {
        Ok(tree) => tree,
        Err(err) => {
            drop(payload);
            discard(&[payload_path]);
            return Err(err);
        }
    };

    let compressed = match compress_into(&text, &mut payload, &mut tree, config) {
        Ok(compressed) => compressed,
        Err(err) => {
            // The two artifacts only make sense as a pair.
            drop((payload, tree));
            discard(&[payload_path, tree_path]);
            return Err(err).with_context(|| format!("Couldn't compress {input}"));
        }
    };
    info!(
        "Encoded {} bits into {} payload bytes",
        compressed.bit_len,
        compressed.payload.len()
    );
    info!("Payload written to {payload_path}, tree description to {tree_path}");

    info!("Compression completed");
    Ok(())
}

fn decompress_file(
    payload_path: &str,
    tree_path: &str,
    output_path: &str,
    config: &CodecConfig,
) -> Result<()> {
    let tree_text =
        fs::read_to_string(tree_path).with_context(|| format!("Couldn't read {tree_path}"))?;
    let payload = fs::read(payload_path).with_context(|| format!("Couldn't read {payload_path}"))?;
    info!(
        "Read {} payload bytes from {payload_path} and the tree from {tree_path}",
        payload.len()
    );

    let mut output = create(output_path)?;
    let text = match decompress_into(&tree_text, &payload, &mut output, config) {
        Ok(text) => text,
        Err(err) => {
            drop(output);
            discard(&[output_path]);
            return Err(err)
                .with_context(|| format!("Couldn't decode {payload_path} with {tree_path}"));
        }
    };
    info!("Decoded {} characters into {output_path}", text.len());

    info!("Decompression completed");
    Ok(())
}

fn create(path: &str) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("Couldn't create {path}"))?;
    Ok(BufWriter::new(file))
}

fn discard(paths: &[&str]) {
    for path in paths {
        if let Err(err) = fs::remove_file(path) {
            warn!("Couldn't remove {path}: {err}");
        }
    }
}

fn inspect_tree(matches: &ArgMatches) -> Result<()> {
    let tree_path = value_of(matches, "tree");
    let tree_text =
        fs::read_to_string(tree_path).with_context(|| format!("Couldn't read {tree_path}"))?;
    let tree = tree_codec::deserialize(&tree_text)
        .with_context(|| format!("Couldn't parse {tree_path}"))?;

    let printer = TreePrinter::new(|msg: String| println!("{}", msg));
    printer.print_tree(&tree);
    printer.print_codes(&CodeTable::from_tree(&tree));
    Ok(())
}
