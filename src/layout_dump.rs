use crate::layout::SunburstLayout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f64,
    pub height: f64,
    pub center: [f64; 2],
    pub ring_depth: f64,
    pub vocabulary: Vec<String>,
    pub rings: Vec<RingDump>,
}

#[derive(Debug, Serialize)]
pub struct RingDump {
    pub level: usize,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub wedges: Vec<WedgeDump>,
    pub labels: Vec<LabelDump>,
}

#[derive(Debug, Serialize)]
pub struct WedgeDump {
    pub label: String,
    pub weight: u64,
    /// Turn fractions, as partitioned.
    pub offset: f64,
    pub size: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

#[derive(Debug, Serialize)]
pub struct LabelDump {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

impl LayoutDump {
    pub fn from_layout(layout: &SunburstLayout) -> Self {
        let rings = layout
            .rings
            .iter()
            .map(|ring| RingDump {
                level: ring.level,
                inner_radius: layout.ring_depth * ring.level as f64,
                outer_radius: layout.ring_depth * (ring.level + 1) as f64,
                wedges: ring
                    .wedges
                    .iter()
                    .map(|wedge| WedgeDump {
                        label: wedge.label.clone(),
                        weight: wedge.weight,
                        offset: wedge.start_angle / std::f64::consts::TAU,
                        size: wedge.span() / std::f64::consts::TAU,
                        start_angle: wedge.start_angle,
                        end_angle: wedge.end_angle,
                    })
                    .collect(),
                labels: ring
                    .labels
                    .iter()
                    .map(|label| LabelDump {
                        text: label.text.clone(),
                        x: label.x,
                        y: label.y,
                    })
                    .collect(),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            center: [layout.center.0, layout.center.1],
            ring_depth: layout.ring_depth,
            vocabulary: layout.vocabulary.clone(),
            rings,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &SunburstLayout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::compute_layout;
    use crate::tree::WeightedTree;

    #[test]
    fn dump_reports_turn_fractions() {
        let mut tree = WeightedTree::new();
        tree.add(&["A", "B"], 1).unwrap();
        tree.add(&["A", "C"], 3).unwrap();
        let layout = compute_layout(&tree, &LayoutConfig::default());
        let dump = LayoutDump::from_layout(&layout);

        assert_eq!(dump.rings.len(), 2);
        let outer = &dump.rings[1];
        assert_eq!(outer.inner_radius, 200.0);
        let c = outer.wedges.iter().find(|w| w.label == "C").unwrap();
        assert!((c.offset - 0.25).abs() < 1e-9);
        assert!((c.size - 0.75).abs() < 1e-9);

        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["rings"][0]["wedges"][0]["label"], "A");
        assert_eq!(json["vocabulary"][2], "C");
    }
}
