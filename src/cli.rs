use crate::config::{Config, load_config};
use crate::document::{LayoutMode, MindMapDocument, parse_document};
use crate::export::{generate_markdown, generate_plain_text};
use crate::layout::{SystemFontMeasurer, apply_theme, compute_layout, connector_layouts};
use crate::layout_dump::LayoutDump;
#[cfg(feature = "png")]
use crate::render::write_output_png;
use crate::render::{render_svg, write_output_svg};
use crate::theme::Theme;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "mmlr", version, about = "Mind map layout engine and renderer")]
pub struct Args {
    /// Input document (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for text formats if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON5 file overriding layout/render defaults
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Theme id, overriding the document's themeId
    #[arg(long = "theme")]
    pub theme: Option<String>,

    /// Layout mode (tree | org-chart | list), overriding the document
    #[arg(long = "layout")]
    pub layout: Option<String>,

    /// Raster width for PNG output
    #[arg(short = 'w', long = "width", default_value_t = 1200.0)]
    pub width: f32,

    /// Raster height for PNG output
    #[arg(short = 'H', long = "height", default_value_t = 800.0)]
    pub height: f32,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    /// Layout dump as JSON
    Json,
    /// Markdown outline
    Md,
    /// Plain-text outline
    Txt,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    config.render.width = args.width;
    config.render.height = args.height;

    let input = read_input(args.input.as_deref())?;
    let doc = parse_document(&input)?;

    let mode = match args.layout.as_deref() {
        Some(token) => LayoutMode::from_token(token)
            .ok_or_else(|| anyhow::anyhow!("Unknown layout mode `{token}`"))?,
        None => doc.layout_mode,
    };
    let theme = resolve_theme(args.theme.as_deref(), &doc, &config)?;

    // Outline exports work off the raw document; no layout pass needed.
    match args.output_format {
        OutputFormat::Md => {
            return write_text(&generate_markdown(&doc), args.output.as_deref());
        }
        OutputFormat::Txt => {
            return write_text(&generate_plain_text(&doc), args.output.as_deref());
        }
        _ => {}
    }

    let measurer = SystemFontMeasurer::new(&config.layout.font_family);
    let themed = apply_theme(&doc.nodes, &theme);
    let nodes = compute_layout(&themed, mode, &config.layout, &measurer);
    let connectors = connector_layouts(&nodes, &doc.connections, mode, &config.layout);

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&nodes, &connectors, &theme, &config, &measurer);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            #[cfg(feature = "png")]
            {
                let svg = render_svg(&nodes, &connectors, &theme, &config, &measurer);
                let output = ensure_output(&args.output, "png")?;
                write_output_png(&svg, &output, &config)?;
            }
            #[cfg(not(feature = "png"))]
            {
                return Err(anyhow::anyhow!(
                    "PNG output requires the `png` feature"
                ));
            }
        }
        OutputFormat::Json => {
            let dump = LayoutDump::from_snapshot(&nodes, &connectors, mode);
            write_text(&dump.to_json()?, args.output.as_deref())?;
        }
        OutputFormat::Md | OutputFormat::Txt => unreachable!("handled above"),
    }

    Ok(())
}

fn resolve_theme(override_id: Option<&str>, doc: &MindMapDocument, config: &Config) -> Result<Theme> {
    if let Some(id) = override_id {
        return Theme::builtin(id).ok_or_else(|| anyhow::anyhow!("Unknown theme `{id}`"));
    }
    Ok(Theme::builtin(&doc.theme_id)
        .or_else(|| {
            config
                .fallback_theme_id
                .as_deref()
                .and_then(Theme::builtin)
        })
        .unwrap_or_else(Theme::meister))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

fn write_text(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, content)?,
        None => print!("{content}"),
    }
    Ok(())
}
