use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use hzip_rust::{
    codec,
    utils::{paths, report::CompressionReport, timer::Timer},
    CodecProperties, HzipError,
};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(about = "Compress and decompress single files with static Huffman coding")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// A .properties file with codec settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for the output file, instead of the input's directory
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    /// trace, debug, info, warn or error
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file into <name>.hzip
    Compress { path: PathBuf },
    /// Restore the original file from a .hzip file
    Decompress { path: PathBuf },
}

fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("a global tracing subscriber was already installed");
    }
}

fn run(args: &Args) -> Result<CompressionReport, HzipError> {
    let props = match &args.config {
        Some(config) => CodecProperties::from_file(config)?,
        None => CodecProperties::default(),
    }
    .set_output_dir(args.output_dir.clone());

    let timer = Timer::start();

    match &args.command {
        Command::Compress { path } => {
            let dest = codec::compress(path, &props)?;
            let elapsed = timer.elapsed().as_nanos();
            info!("compressed {} in {}ns", path.display(), elapsed);

            Ok(CompressionReport::new(dest.clone(), paths::file_size(path)?, paths::file_size(&dest)?, elapsed))
        }
        Command::Decompress { path } => {
            let dest = codec::decompress(path, &props)?;
            let elapsed = timer.elapsed().as_nanos();
            info!("decompressed {} in {}ns", path.display(), elapsed);

            Ok(CompressionReport::new(dest.clone(), paths::file_size(&dest)?, paths::file_size(path)?, elapsed))
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    match run(&args) {
        Ok(report) => {
            if args.json {
                match report.to_json() {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("failed serializing the report: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                println!("{}", report);
            }
            ExitCode::SUCCESS
        }
        Err(e) if e.is_corrupt_input() => {
            error!("not a valid compressed file: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
