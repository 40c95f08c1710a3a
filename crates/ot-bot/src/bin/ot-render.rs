//! Render an OT request form without going through LINE
//!
//! ```text
//! ot-render --font fonts/NotoSansThaiJP.ttf command "OT John Doe|Engineering|Project X|2024-05-01|09:00-12:00|3|Deadline"
//! ot-render --font fonts/NotoSansThaiJP.ttf -o form.pdf json request.json
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use ot_form::{parse_command, CommandError, FormRenderer, OvertimeRequest, USAGE_MESSAGE};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ot-render", version)]
/// Render a bilingual OT request form to PDF
struct Opts {
    /// TrueType font with Thai and Japanese glyphs
    #[arg(long, env = "FONT_TTF_PATH")]
    font: PathBuf,

    /// Where to write the PDF
    #[arg(short, long, default_value = "ot_form.pdf")]
    output: PathBuf,

    #[command(subcommand)]
    input: Input,
}

#[derive(Subcommand)]
enum Input {
    /// A chat command: "OT name|department|project|date|time|hours|reason"
    Command { text: String },
    /// A JSON file with the request fields
    Json { path: PathBuf },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let opts = Opts::parse();

    let request = match opts.input {
        Input::Command { text } => match parse_command(&text) {
            Ok(request) => request,
            Err(CommandError::NotACommand) => bail!("command must start with \"OT\""),
            Err(e @ CommandError::Format { .. }) => bail!("{e}\n{USAGE_MESSAGE}"),
        },
        Input::Json { path } => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let value: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            OvertimeRequest::from_json(&value)?
        }
    };

    let renderer = FormRenderer::from_font_path(&opts.font)?;
    let path = renderer.render(&request, &opts.output)?;
    println!("{}", path.display());

    Ok(())
}
