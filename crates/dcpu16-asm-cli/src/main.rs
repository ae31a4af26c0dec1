use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dcpu16_asm::image::{hex_dump, write_image};
use dcpu16_asm::{AsmConfig, Assembler, Assembly, Diagnostic};

#[derive(Parser, Debug)]
#[command(author, version, about = "DCPU-16 assembler", long_about = None)]
struct Opts {
    /// Assembly source file
    #[arg(value_name = "IN")]
    input: PathBuf,
    /// Output binary (big-endian words); prints a hex dump when omitted
    #[arg(value_name = "OUT")]
    output: Option<PathBuf>,
    /// Reject labels as the offset part of `[label + R]`
    #[arg(long)]
    no_label_offsets: bool,
    /// Export labels to JSON (Vec<{ addr, name }>)
    #[arg(long, value_name = "FILE")]
    symbols: Option<PathBuf>,
    /// Print address, words and source text for each line
    #[arg(long)]
    listing: bool,
    /// Log at debug level regardless of RUST_LOG
    #[arg(long)]
    debug: bool,
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn print_listing(asm: &Assembly, source: &str) {
    let lines: Vec<&str> = source.lines().collect();
    for entry in asm.listing() {
        let words = &asm.words()[entry.addr..entry.addr + entry.len];
        let hex: Vec<String> = words.iter().map(|w| format!("{w:04x}")).collect();
        let text = lines.get(entry.line - 1).copied().unwrap_or("").trim();
        println!("{:04x}  {:<15} {}", entry.addr, hex.join(" "), text);
    }
}

fn run(opts: &Opts) -> Result<()> {
    let name = opts.input.display().to_string();
    let source = fs::read_to_string(&opts.input).with_context(|| format!("reading {name}"))?;

    let cfg = AsmConfig { label_offsets: !opts.no_label_offsets };
    let asm = Assembler::new(cfg).assemble(&source).map_err(|e| {
        error!("{}", Diagnostic::new(&name, &source, &e));
        anyhow!("no program produced")
    })?;

    if opts.listing {
        print_listing(&asm, &source);
    }

    if let Some(path) = &opts.symbols {
        let json = serde_json::to_string_pretty(&asm.symbols())?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!("{} labels written to {}", asm.symbols().len(), path.display());
    }

    match &opts.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut out = BufWriter::new(file);
            write_image(&mut out, asm.words())
                .and_then(|()| out.flush())
                .with_context(|| format!("writing {}", path.display()))?;
            info!("program written to {} ({} words)", path.display(), asm.words().len());
        }
        None => print!("{}", hex_dump(asm.words())),
    }
    Ok(())
}

fn main() -> ExitCode {
    let opts = Opts::parse();
    init_tracing(opts.debug);
    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
