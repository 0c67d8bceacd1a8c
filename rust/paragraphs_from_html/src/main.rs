use anyhow::{Context, Result};
use clap::Parser;
use paragraph_normalizer_wasm::{DecoderKind, Normalizer, Options};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input HTML file. Reads stdin when omitted.
    #[arg(long)]
    html_file: Option<PathBuf>,

    /// Output path. Writes stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Entity decoder: `html` (all entities) or `minimal` (&lt; &gt; &amp; only).
    #[arg(long, env = "PARAGRAPH_DECODER")]
    decoder: Option<DecoderKind>,

    /// Keep the first letter of each paragraph as written.
    #[arg(long)]
    no_capitalize: bool,
}

impl Args {
    fn decoder_kind(&self) -> DecoderKind {
        self.decoder.unwrap_or_else(DecoderKind::default_for_build)
    }

    fn options(&self) -> Options {
        Options {
            capitalize: !self.no_capitalize,
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => fs::read_to_string(p)
            .with_context(|| format!("failed to read {}", p.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

// Same bytes whether the destination is a file or stdout: no trailing newline.
fn emit(w: &mut impl Write, text: &str) -> io::Result<()> {
    w.write_all(text.as_bytes())?;
    w.flush()
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(p) => {
            let mut file = fs::File::create(p)
                .with_context(|| format!("failed to create {}", p.display()))?;
            emit(&mut file, text).with_context(|| format!("failed to write {}", p.display()))
        }
        None => emit(&mut io::stdout().lock(), text).context("failed to write stdout"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let kind = args.decoder_kind();
    let options = args.options();
    debug!(decoder = %kind, ?options, "starting");

    let input = read_input(args.html_file.as_deref())?;
    let normalizer = Normalizer::from_kind(kind);
    let output = normalizer.run(&input, &options);
    info!(
        input_bytes = input.len(),
        output_bytes = output.len(),
        decoder = %kind,
        "normalized"
    );

    write_output(args.out.as_deref(), &output)
}
