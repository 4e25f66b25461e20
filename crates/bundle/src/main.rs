//! docweave command line entry point.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use clap::Parser;

use docweave_bundle::{BuildConfig, build};

/// Bundle a markdown documentation tree into one offline HTML file.
#[derive(Debug, Parser)]
#[command(name = "docweave", version, about)]
struct Args {
    /// Documentation root directory
    #[arg(long, default_value = "docs")]
    docs: PathBuf,

    /// Output HTML file
    #[arg(long, short, default_value = "docs.html")]
    output: PathBuf,

    /// Localization variant to build (e.g. "ja"); defaults to the base language
    #[arg(long)]
    lang: Option<String>,

    /// Also write a plain-text corpus export to this path
    #[arg(long)]
    llms: Option<PathBuf>,

    /// Site title
    #[arg(long, default_value = "Documentation")]
    title: String,

    /// Logo image to embed in the header (png or jpeg)
    #[arg(long)]
    logo: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), docweave_bundle::BundleError> {
    let logo_data = args.logo.as_deref().map(encode_logo).unwrap_or_default();

    let artifacts = build(&BuildConfig {
        docs_root: &args.docs,
        title: &args.title,
        lang: args.lang.as_deref(),
        logo_data: &logo_data,
    })?;

    std::fs::write(&args.output, &artifacts.html)?;
    log::info!("wrote {}", args.output.display());

    if let Some(llms_path) = &args.llms {
        std::fs::write(llms_path, &artifacts.llms)?;
        log::info!("wrote {}", llms_path.display());
    }
    Ok(())
}

/// Reads a logo image and encodes it as a data URL. A missing or unreadable
/// logo is not fatal; the header just renders without one.
fn encode_logo(path: &Path) -> String {
    let mime = match path.extension().and_then(|e| e.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "image/png",
    };
    match std::fs::read(path) {
        Ok(bytes) => format!("data:{mime};base64,{}", BASE64.encode(bytes)),
        Err(err) => {
            log::warn!("could not read logo {}: {err}", path.display());
            String::new()
        }
    }
}
