//! aptX command line tool
//!
//! Encodes raw little-endian PCM to an aptX / aptX-HD codeword stream and
//! decodes it back. aptX takes 16-bit stereo input, aptX-HD 24-bit.
//!
//! ```text
//! aptx_tool encode [--hd] [--big-endian] [--sync MODE] <input.pcm> <output.aptx>
//! aptx_tool decode [--hd] [--big-endian] [--sync MODE] <input.aptx> <output.pcm>
//! aptx_tool inspect [--hd] <input.aptx>
//! ```

use aptx_core::codecs::aptx::packer::unpack_codeword;
use aptx_core::codecs::aptx::codec::PCM_BLOCK_SAMPLES;
use aptx_core::codecs::aptx::AptxCodec;
use aptx_core::utils::pcm::{read_pcm_file, write_pcm_file};
use aptx_core::utils::validation::validate_pcm;
use aptx_core::utils::PcmFormat;
use aptx_core::{AptxConfig, AptxError, AudioCodec, Endianness, Result, SyncMode, Variant};
use std::path::{Path, PathBuf};

struct Options {
    command: String,
    config: AptxConfig,
    paths: Vec<PathBuf>,
}

fn usage(program: &str) {
    eprintln!("Usage: {} <encode|decode|inspect> [--hd] [--big-endian] [--sync MODE] <input> [output]", program);
    eprintln!("  MODE: stereo (default), dual-mono, no-sync");
    eprintln!("Example: {} encode music.s16le music.aptx", program);
}

fn parse_sync(value: &str) -> Result<SyncMode> {
    match value {
        "stereo" => Ok(SyncMode::STEREO),
        "dual-mono" => Ok(SyncMode::DUAL_MONO),
        "no-sync" => Ok(SyncMode::NO_SYNC),
        other => Err(AptxError::invalid_config(format!("Unknown sync mode: {}", other))),
    }
}

fn parse_args(args: &[String]) -> Result<Options> {
    let command = args
        .get(1)
        .cloned()
        .ok_or_else(|| AptxError::invalid_config("missing command"))?;

    let mut config = AptxConfig::aptx();
    let mut paths = Vec::new();
    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--hd" => config.variant = Variant::AptxHd,
            "--big-endian" => config.endianness = Endianness::Big,
            "--sync" => {
                let value = rest
                    .next()
                    .ok_or_else(|| AptxError::invalid_config("--sync needs a value"))?;
                config.sync_mode = parse_sync(value)?;
            }
            _ => paths.push(PathBuf::from(arg)),
        }
    }

    Ok(Options { command, config, paths })
}

fn encode(config: AptxConfig, input: &Path, output: &Path) -> Result<()> {
    let format = PcmFormat::for_variant(config.variant);
    let mut pcm = read_pcm_file(input, format)?;

    // Pad the tail to a whole block
    let block = PCM_BLOCK_SAMPLES;
    pcm.resize((pcm.len() + block - 1) / block * block, 0);
    validate_pcm(&pcm)?;

    let mut codec = AptxCodec::new(config)?;
    let mut stream = codec.encode(&pcm)?.to_vec();
    stream.extend_from_slice(&codec.flush());
    std::fs::write(output, &stream)?;

    println!("{} encode", config.variant);
    println!("  Input:  {} ({} samples per channel)", input.display(), pcm.len() / 2);
    println!("  Output: {} ({} bytes)", output.display(), stream.len());
    Ok(())
}

fn decode(config: AptxConfig, input: &Path, output: &Path) -> Result<()> {
    let data = std::fs::read(input)?;
    let mut codec = AptxCodec::new(config)?.with_latency_compensation(true);
    let pcm = codec.decode(&data)?;
    write_pcm_file(output, PcmFormat::for_variant(config.variant), &pcm)?;

    println!("{} decode", config.variant);
    println!("  Input:  {} ({} bytes)", input.display(), data.len());
    println!("  Output: {} ({} samples per channel)", output.display(), pcm.len() / 2);
    println!("  Sync errors: {}", codec.sync_errors());
    Ok(())
}

fn inspect(config: AptxConfig, input: &Path) -> Result<()> {
    let data = std::fs::read(input)?;
    let width = config.variant.codeword_bytes();
    let blocks = data.len() / (2 * width);

    println!("{} stream inspector", config.variant);
    println!("File: {}", input.display());
    println!("Size: {} bytes, {} blocks", data.len(), blocks);
    println!();

    for (index, block) in data.chunks_exact(2 * width).take(8).enumerate() {
        println!("Block {}:", index);
        for (channel, bytes) in ["L", "R"].iter().zip(block.chunks_exact(width)) {
            let word = bytes.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
            let word = if config.variant == Variant::Aptx && config.endianness == Endianness::Big {
                u32::from((word as u16).swap_bytes())
            } else {
                word
            };
            let codes = unpack_codeword(config.variant, word);
            println!(
                "  {}: 0x{:0w$X}  LL={:4} LH={:3} HL={:3} HH={:3}",
                channel,
                word,
                codes[0],
                codes[1],
                codes[2],
                codes[3],
                w = 2 * width
            );
        }
    }
    Ok(())
}

fn run(args: &[String]) -> Result<()> {
    let options = parse_args(args)?;
    options.config.validate()?;
    tracing::debug!(command = %options.command, variant = %options.config.variant, "running");

    match (options.command.as_str(), options.paths.as_slice()) {
        ("encode", [input, output]) => encode(options.config, input, output),
        ("decode", [input, output]) => decode(options.config, input, output),
        ("inspect", [input]) => inspect(options.config, input),
        (command, _) => Err(AptxError::invalid_config(format!(
            "bad arguments for command '{}'",
            command
        ))),
    }
}

fn main() {
    let _ = tracing_subscriber::fmt::try_init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("aptx_tool");
    if args.len() < 2 {
        usage(program);
        std::process::exit(1);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        usage(program);
        std::process::exit(1);
    }
}
