use crate::config::Config;
use crate::error::{Error, Result};
use crate::layout::{PathCommand, SunburstLayout};
use crate::theme::Palette;
use std::fmt::Write as _;
use std::path::Path;

pub const STYLE_PLACEHOLDER: &str = "%style%";
pub const CONTENT_PLACEHOLDER: &str = "%substance%";
pub const WIDTH_PLACEHOLDER: &str = "%width%";
pub const HEIGHT_PLACEHOLDER: &str = "%height%";

pub const DEFAULT_TEMPLATE: &str = include_str!("../assets/template.svg");

/// Style rules and drawing primitives, kept in insertion order and spliced into
/// a container template once.
#[derive(Debug, Clone, Default)]
pub struct ChartDocument {
    width: f64,
    height: f64,
    styles: Vec<String>,
    content: Vec<String>,
}

impl ChartDocument {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            styles: Vec::new(),
            content: Vec::new(),
        }
    }

    pub fn add_style_rule(&mut self, selector: &str, declarations: &[(&str, &str)]) {
        let mut rule = String::new();
        rule.push_str(selector);
        rule.push('{');
        for (property, value) in declarations {
            let _ = write!(rule, "{property}:{value};");
        }
        rule.push('}');
        self.styles.push(rule);
    }

    pub fn add_wedge(&mut self, path_data: &str, style_class: &str) {
        self.content.push(format!(
            "<path d=\"{}\" class=\"{}\"/>",
            path_data,
            escape_xml(style_class)
        ));
    }

    pub fn add_label(&mut self, text: &str, x: f64, y: f64) {
        self.content.push(format!(
            "<text x=\"{x:.2}\" y=\"{y:.2}\">{}</text>",
            escape_xml(text)
        ));
    }

    pub fn style_rules(&self) -> &[String] {
        &self.styles
    }

    pub fn primitives(&self) -> &[String] {
        &self.content
    }

    pub fn serialize(&self, template: &str) -> Result<String> {
        let style_block = self.styles.concat();
        let content_block = self.content.concat();
        let width = format_length(self.width);
        let height = format_length(self.height);

        let mut document = template
            .replace(WIDTH_PLACEHOLDER, &width)
            .replace(HEIGHT_PLACEHOLDER, &height);
        // Placeholders are located before either substitution so that text
        // inside the blocks is never mistaken for a placeholder.
        let style_at = find_single(&document, STYLE_PLACEHOLDER)?;
        let content_at = find_single(&document, CONTENT_PLACEHOLDER)?;

        let mut splices = [
            (style_at, STYLE_PLACEHOLDER.len(), style_block),
            (content_at, CONTENT_PLACEHOLDER.len(), content_block),
        ];
        splices.sort_by_key(|(at, _, _)| std::cmp::Reverse(*at));
        for (at, len, block) in splices {
            document.replace_range(at..at + len, &block);
        }
        Ok(document)
    }
}

fn find_single(template: &str, placeholder: &'static str) -> Result<usize> {
    let count = template.matches(placeholder).count();
    match count {
        0 => Err(Error::MissingTemplatePlaceholder { placeholder }),
        1 => template
            .find(placeholder)
            .ok_or(Error::MissingTemplatePlaceholder { placeholder }),
        _ => Err(Error::DuplicateTemplatePlaceholder { placeholder, count }),
    }
}

fn format_length(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// CSS class for a label. Injective, so distinct labels never share a style.
pub fn style_class(label: &str) -> String {
    let mut class = String::with_capacity(label.len() + 1);
    if label.is_empty() || label.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
        class.push('_');
    }
    for ch in label.chars() {
        if ch.is_alphanumeric() || ch == '-' {
            class.push(ch);
        } else {
            let _ = write!(class, "_{:x}_", ch as u32);
        }
    }
    class
}

pub fn wedge_path_data(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for command in commands {
        if !d.is_empty() {
            d.push(' ');
        }
        match command {
            PathCommand::MoveTo((x, y)) => {
                let _ = write!(d, "M {x:.2} {y:.2}");
            }
            PathCommand::LineTo((x, y)) => {
                let _ = write!(d, "L {x:.2} {y:.2}");
            }
            PathCommand::Arc {
                radius,
                large_arc,
                clockwise,
                to: (x, y),
            } => {
                let _ = write!(
                    d,
                    "A {radius:.2} {radius:.2} 0 {} {} {x:.2} {y:.2}",
                    u8::from(*large_arc),
                    u8::from(*clockwise)
                );
            }
            PathCommand::Close => d.push('Z'),
        }
    }
    d
}

/// Fills a document with the chart's styles and primitives, innermost ring
/// first so outer rings and labels draw on top.
pub fn build_document(layout: &SunburstLayout, config: &Config) -> ChartDocument {
    let theme = &config.theme;
    let mut doc = ChartDocument::new(layout.width, layout.height);
    let palette = Palette::new(&layout.vocabulary, theme);

    for label in &layout.vocabulary {
        let Some(fill) = palette.color(label) else {
            continue;
        };
        doc.add_style_rule(
            &format!(".{}", style_class(label)),
            &[("fill", fill), ("stroke", theme.line_color.as_str())],
        );
    }
    let font_size = format!("{}px", format_length(config.scaled_font_size()));
    doc.add_style_rule(
        "text",
        &[
            ("fill", theme.font_color.as_str()),
            ("font-family", theme.font_family.as_str()),
            ("font-size", font_size.as_str()),
        ],
    );

    for ring in &layout.rings {
        for wedge in &ring.wedges {
            let d = wedge_path_data(&wedge.outline(layout.center));
            doc.add_wedge(&d, &style_class(&wedge.label));
        }
        for label in &ring.labels {
            doc.add_label(&label.text, label.x, label.y);
        }
    }

    tracing::debug!(
        styles = doc.style_rules().len(),
        primitives = doc.primitives().len(),
        "built chart document"
    );
    doc
}

pub fn render_svg(layout: &SunburstLayout, config: &Config, template: &str) -> Result<String> {
    build_document(layout, config).serialize(template)
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, config: &Config) -> anyhow::Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = config.theme.font_family.clone();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;
    use crate::tree::WeightedTree;

    const TEMPLATE: &str = "<svg w=\"%width%\" h=\"%height%\"><style>%style%</style><g>%substance%</g></svg>";

    #[test]
    fn serializes_in_insertion_order() {
        let mut doc = ChartDocument::new(200.0, 200.0);
        doc.add_style_rule(".a", &[("fill", "#ffffff"), ("stroke", "white")]);
        doc.add_style_rule("text", &[("fill", "#555555")]);
        doc.add_wedge("M 0 0 Z", "a");
        doc.add_label("A & B", 1.0, 2.5);

        let out = doc.serialize(TEMPLATE).unwrap();
        assert_eq!(
            out,
            "<svg w=\"200\" h=\"200\"><style>.a{fill:#ffffff;stroke:white;}text{fill:#555555;}</style>\
<g><path d=\"M 0 0 Z\" class=\"a\"/><text x=\"1.00\" y=\"2.50\">A &amp; B</text></g></svg>"
        );
    }

    #[test]
    fn placeholder_text_inside_content_is_left_alone() {
        let mut doc = ChartDocument::new(10.0, 10.0);
        doc.add_label("%style%", 0.0, 0.0);
        let out = doc.serialize("<g>%substance%</g><s>%style%</s>").unwrap();
        assert_eq!(out, "<g><text x=\"0.00\" y=\"0.00\">%style%</text></g><s></s>");
    }

    #[test]
    fn missing_placeholder_is_fatal() {
        let doc = ChartDocument::new(10.0, 10.0);
        let err = doc.serialize("<svg>%style%</svg>").unwrap_err();
        assert!(matches!(
            err,
            Error::MissingTemplatePlaceholder {
                placeholder: CONTENT_PLACEHOLDER
            }
        ));
        let err = doc.serialize("<svg>%substance%</svg>").unwrap_err();
        assert!(matches!(
            err,
            Error::MissingTemplatePlaceholder {
                placeholder: STYLE_PLACEHOLDER
            }
        ));
    }

    #[test]
    fn duplicate_placeholder_is_fatal() {
        let doc = ChartDocument::new(10.0, 10.0);
        let err = doc.serialize("%style%%style%%substance%").unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateTemplatePlaceholder { count: 2, .. }
        ));
    }

    #[test]
    fn style_classes_are_css_safe_and_distinct() {
        assert_eq!(style_class("Mammalia"), "Mammalia");
        assert_eq!(style_class("Homo sapiens"), "Homo_20_sapiens");
        assert_eq!(style_class("a_b"), "a_5f_b");
        assert_eq!(style_class("2nd"), "_2nd");
        assert_eq!(style_class(""), "_");
        assert_ne!(style_class("a b"), style_class("a_b"));
    }

    #[test]
    fn path_data_formatting() {
        let d = wedge_path_data(&[
            PathCommand::MoveTo((1.0, 2.0)),
            PathCommand::Arc {
                radius: 5.0,
                large_arc: true,
                clockwise: false,
                to: (3.0, 4.0),
            },
            PathCommand::LineTo((0.5, 0.25)),
            PathCommand::Close,
        ]);
        assert_eq!(
            d,
            "M 1.00 2.00 A 5.00 5.00 0 1 0 3.00 4.00 L 0.50 0.25 Z"
        );
    }

    #[test]
    fn empty_chart_keeps_only_text_style() {
        let config = Config::default();
        let layout = compute_layout(&WeightedTree::new(), &config.layout);
        let doc = build_document(&layout, &config);
        assert_eq!(
            doc.style_rules(),
            &["text{fill:#555555;font-family:Helvetica;font-size:10px;}".to_string()]
        );
        assert!(doc.primitives().is_empty());
        let svg = doc.serialize(DEFAULT_TEMPLATE).unwrap();
        assert!(svg.contains("width=\"4000\""));
        assert!(svg.contains("<g></g>"));
    }

    #[test]
    fn same_label_shares_a_class_across_rings() {
        let mut tree = WeightedTree::new();
        tree.add(&["Incertae", "Incertae"], 4).unwrap();
        tree.add(&["Known"], 4).unwrap();
        let config = Config::default();
        let layout = compute_layout(&tree, &config.layout);
        let svg = render_svg(&layout, &config, DEFAULT_TEMPLATE).unwrap();

        assert_eq!(svg.matches("class=\"Incertae\"").count(), 2);
        assert_eq!(svg.matches(".Incertae{").count(), 1);
        assert_eq!(svg.matches(".Known{").count(), 1);
        assert!(svg.contains(".Incertae{fill:#ffb2b2;stroke:white;}"));
    }
}
