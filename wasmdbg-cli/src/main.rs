use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::exit;
use wasmdbg::core::{Module, Section};

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The module to decode.
    pub input: PathBuf,

    /// Log decoding progress. Repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print the debug representation of the whole decoded module instead of a
    /// summary.
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(err) = SimpleLogger::new().with_level(level).init() {
        eprintln!("WARNING: could not install logger: {err}");
    }

    let module = run(&cli).unwrap_or_else(abort);
    if cli.debug {
        println!("{module:#?}");
    } else {
        print_summary(&module);
    }
}

fn run(cli: &Cli) -> Result<Module> {
    let path = &cli.input;
    let file =
        File::open(path).with_context(|| format!("failed to open file `{}`", path.display()))?;

    wasmdbg::decode_module(BufReader::new(file))
        .with_context(|| format!("failed to decode module `{}`", path.display()))
}

fn print_summary(module: &Module) {
    println!("version: {}", module.version);
    for (header, section) in module.sections_with_headers() {
        println!(
            "{:<10} offset {:#010x}  size {:>8}  items {:>6}",
            header.id.to_string(),
            header.offset,
            header.size,
            section.len()
        );

        if let Section::Export(exports) = section {
            for export in exports {
                println!("    {:?} -> {:?}", export.name, export.target);
            }
        }
    }
}

fn abort<T>(err: anyhow::Error) -> T {
    eprintln!("ERROR: {err}");

    let causes: Vec<_> = err.chain().skip(1).collect();
    if !causes.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in causes.iter().enumerate() {
            eprintln!("    {i}: {cause}");
        }
    }

    exit(1)
}
