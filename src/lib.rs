#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod theme;
pub mod tree;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, InputConfig, LayoutConfig, load_config};
pub use error::{Error, Result};
pub use layout::{SunburstLayout, compute_layout};
pub use parser::{Record, parse_records};
pub use render::{ChartDocument, DEFAULT_TEMPLATE, render_svg};
pub use theme::{Palette, Theme};
pub use tree::WeightedTree;

/// Parses taxonomy records and renders the chart into `template`.
pub fn render_taxonomy(input: &str, config: &Config, template: &str) -> Result<String> {
    config.layout.validate()?;
    let records = parse_records(input, &config.input)?;
    let tree = WeightedTree::from_records(&records)?;
    let layout = compute_layout(&tree, &config.layout);
    render_svg(&layout, config, template)
}
