use crate::config::{Config, load_config};
use crate::ir::{CloudKind, ReportField};
use crate::layout_dump::write_layout_dump;
use crate::parser::{Dataset, parse_dataset};
use crate::render::{write_output_png, write_output_svg};
use crate::surface::Surface;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "moodcloud", version, about = "Word and bubble clouds for sentiment analytics")]
pub struct Args {
    /// Input dataset (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Cloud widget to draw
    #[arg(short = 'k', long = "kind", value_enum, default_value = "words")]
    pub kind: KindArg,

    /// Which analytics map feeds the cloud when the input is a report
    #[arg(long = "field", value_enum, default_value = "emotions")]
    pub field: FieldArg,

    /// Config JSON file (theme and layout parameters)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width
    #[arg(short = 'w', long = "width", default_value_t = 800.0)]
    pub width: f32,

    /// Canvas height
    #[arg(short = 'H', long = "height", default_value_t = 600.0)]
    pub height: f32,

    /// Simulated pointer position "X,Y"; draws the hover state and tooltip
    #[arg(long = "hover", value_parser = parse_point)]
    pub hover: Option<(f32, f32)>,

    /// Write the computed placements as JSON
    #[arg(long = "dump-layout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum KindArg {
    Words,
    Bubbles,
}

impl From<KindArg> for CloudKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Words => CloudKind::Words,
            KindArg::Bubbles => CloudKind::Bubbles,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum FieldArg {
    Sentiment,
    Emotions,
}

impl From<FieldArg> for ReportField {
    fn from(field: FieldArg) -> Self {
        match field {
            FieldArg::Sentiment => ReportField::Sentiment,
            FieldArg::Emotions => ReportField::Emotions,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    config.render.width = args.width;
    config.render.height = args.height;

    let input = read_input(args.input.as_deref())?;
    let dataset = parse_dataset(&input).context("failed to read dataset")?;
    if let Dataset::Report(report) = &dataset {
        if let Some((name, score)) = report.dominant_sentiment() {
            log::info!("dominant sentiment: {name} ({score}%)");
        }
        if let Some((name, score)) = report.dominant_emotion() {
            log::info!("dominant emotion: {name} ({score}%)");
        }
    }
    let items = dataset.into_items(args.field.into());
    log::info!(
        "drawing {} items as {} on {}x{}",
        items.len(),
        CloudKind::from(args.kind).as_str(),
        args.width,
        args.height
    );

    let svg = render_document(
        args.kind.into(),
        items,
        config.clone(),
        args.hover,
        args.dump_layout.as_deref(),
    )?;
    match args.output_format {
        OutputFormat::Svg => write_output_svg(&svg, args.output.as_deref())?,
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&svg, &output, &config.render, &config.theme)?;
        }
    }
    Ok(())
}

fn render_document(
    kind: CloudKind,
    items: Vec<crate::ir::Item>,
    config: Config,
    hover: Option<(f32, f32)>,
    dump_layout: Option<&Path>,
) -> Result<String> {
    let (width, height) = (config.render.width, config.render.height);
    let mut surface = Surface::new(kind, items, width, height, config);
    if let Some(path) = dump_layout {
        write_layout_dump(path, surface.layout())?;
    }
    if let Some((x, y)) = hover {
        surface.pointer_move(x, y);
        match surface.tooltip() {
            Some(tooltip) => log::info!("hovering '{}'", tooltip.title),
            None => log::info!("nothing under pointer at ({x}, {y})"),
        }
    }
    Ok(surface.to_svg())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
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

fn parse_point(raw: &str) -> Result<(f32, f32), String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{raw}'"))?;
    let x = x.trim().parse::<f32>().map_err(|err| err.to_string())?;
    let y = y.trim().parse::<f32>().map_err(|err| err.to_string())?;
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Item;

    #[test]
    fn parses_pointer_argument() {
        assert_eq!(parse_point("400,300"), Ok((400.0, 300.0)));
        assert_eq!(parse_point(" 1.5 , 2 "), Ok((1.5, 2.0)));
        assert!(parse_point("400").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn args_accept_widget_flags() {
        let args = Args::try_parse_from([
            "moodcloud", "-i", "data.json", "-k", "bubbles", "--hover", "10,20", "-w", "640",
        ])
        .unwrap();
        assert!(matches!(args.kind, KindArg::Bubbles));
        assert_eq!(args.hover, Some((10.0, 20.0)));
        assert_eq!(args.width, 640.0);
        assert_eq!(args.height, 600.0);
    }

    #[test]
    fn hovered_document_contains_tooltip() {
        let items = vec![Item::new("joy", 38.5).with_meta("source", "survey")];
        let svg = render_document(
            CloudKind::Bubbles,
            items,
            Config::default(),
            Some((400.0, 300.0)),
            None,
        )
        .unwrap();
        assert!(svg.contains(">joy</text>"));
        assert!(svg.contains("survey"));
    }

    #[test]
    fn png_requires_output_path() {
        assert!(ensure_output(&None, "png").is_err());
    }
}
