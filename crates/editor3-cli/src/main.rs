//! editor3-html - render a raw editor3 content state to HTML

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use editor3::{Editor3Service, EntityType, RenderOptions};
use log::warn;

/// Render a raw editor3 (draft-js) content state to HTML
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Raw content state JSON file, or `-` for stdin
    input: PathBuf,

    /// Write HTML here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// String placed between rendered blocks
    #[arg(long, default_value = "\n")]
    separator: String,

    /// Prefix of media ids in embed markers
    #[arg(long, default_value = "editor_")]
    media_id_prefix: String,

    /// Entity type whose atomic blocks are not rendered (repeatable)
    #[arg(long = "disable", value_name = "TYPE", value_parser = parse_entity_type, action = ArgAction::Append)]
    disabled: Vec<EntityType>,

    /// Exit with an error if rendering reported warnings
    #[arg(long, action = ArgAction::SetTrue)]
    strict: bool,
}

fn parse_entity_type(name: &str) -> std::result::Result<EntityType, String> {
    let normalized = name.trim().to_ascii_uppercase().replace('-', "_");
    EntityType::from_name(&normalized).ok_or_else(|| {
        let known: Vec<&str> = EntityType::ALL.iter().map(|t| t.name()).collect();
        format!("unknown entity type {name:?} (expected one of {})", known.join(", "))
    })
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut json = String::new();
        io::stdin()
            .read_to_string(&mut json)
            .context("failed to read stdin")?;
        return Ok(json);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let options = RenderOptions {
        block_separator: cli.separator,
        media_id_prefix: cli.media_id_prefix,
        disabled: cli.disabled.into_iter().collect(),
        ..Default::default()
    };
    let service = Editor3Service::with_options(options);

    let json = read_input(&cli.input)?;
    let rendered = service
        .render_raw(&json)
        .with_context(|| format!("failed to render {}", cli.input.display()))?;

    if cli.strict && !rendered.warnings.is_empty() {
        for warning in &rendered.warnings {
            warn!("{warning:?}");
        }
        bail!("rendering reported {} warning(s)", rendered.warnings.len());
    }

    match &cli.output {
        Some(path) => fs::write(path, &rendered.html)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.html.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
