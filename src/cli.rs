use crate::config::{Config, load_config};
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_records;
use crate::render::{DEFAULT_TEMPLATE, render_svg, write_output_svg};
use crate::tree::WeightedTree;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "sunburst",
    version,
    about = "Render taxonomy frequency data as a sunburst chart"
)]
pub struct Args {
    /// Taxonomy file: `path;to;clade<TAB>count` per line, or '-' for stdin
    pub input: PathBuf,

    /// Output file (svg/png), or '-' to write SVG to stdout
    pub output: PathBuf,

    /// Output format. Defaults to the output file extension, then svg.
    #[arg(short = 'e', long = "outputFormat", value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Config JSON file (theme, themeVariables, layout, input)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Container template with %style% and %substance% placeholders
    #[arg(short = 't', long = "template")]
    pub template: Option<PathBuf>,

    /// Scale factor for ring depth, label spacing and font size
    #[arg(short = 's', long = "scale")]
    pub scale: Option<f64>,

    /// Write the computed layout as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    run_with_args(&args)
}

pub fn run_with_args(args: &Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(scale) = args.scale {
        config.layout.scale = scale;
        config.layout.validate()?;
    }

    let input = read_input(&args.input)?;
    let template = read_template(args.template.as_deref())?;
    let svg = render_document(&input, &template, &config, args.dump_layout.as_deref())?;

    match resolve_format(args.output_format, &args.output) {
        OutputFormat::Svg => {
            let output = (args.output != Path::new("-")).then_some(args.output.as_path());
            write_output_svg(&svg, output)?;
        }
        OutputFormat::Png => write_png(&svg, &args.output, &config)?,
    }
    tracing::info!(output = %args.output.display(), "chart written");
    Ok(())
}

fn render_document(
    input: &str,
    template: &str,
    config: &Config,
    dump_layout: Option<&Path>,
) -> Result<String> {
    let records = parse_records(input, &config.input)?;
    let tree = WeightedTree::from_records(&records)?;
    tracing::info!(
        records = tree.record_count(),
        labels = tree.vocabulary().len(),
        total_weight = tree.total_weight(),
        "built taxonomy tree"
    );

    let layout = compute_layout(&tree, &config.layout);
    tracing::info!(
        rings = layout.rings.len(),
        wedges = layout.wedge_count(),
        labels = layout.label_count(),
        "computed sunburst layout"
    );
    if let Some(path) = dump_layout {
        write_layout_dump(path, &layout)
            .with_context(|| format!("failed to write layout dump {}", path.display()))?;
    }

    Ok(render_svg(&layout, config, template)?)
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    if output == Path::new("-") {
        return Err(anyhow::anyhow!("Output path required for png output"));
    }
    crate::render::write_output_png(svg, output, config)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read taxonomy file {}", path.display()))
}

fn read_template(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read template {}", path.display())),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

fn resolve_format(explicit: Option<OutputFormat>, output: &Path) -> OutputFormat {
    if let Some(format) = explicit {
        return format;
    }
    let is_png = output
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false);
    if is_png {
        OutputFormat::Png
    } else {
        OutputFormat::Svg
    }
}
