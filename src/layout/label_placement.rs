// Greedy label placement for one ring: largest wedges claim their anchor
// first, later anchors too close to a claimed one are dropped.
// Pure geometry, no SVG dependency.

use std::cmp::Ordering;

use super::wedge::{WedgeLayout, polar_to_cartesian};

#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelCandidate {
    pub label: String,
    pub text: String,
    /// Angular size of the wedge the label belongs to.
    pub size: f64,
    pub offset: f64,
    pub x: f64,
    pub y: f64,
}

/// Anchor at the wedge's angular midpoint on its mid-radius, shifted left and
/// down by `nudge` so the text sits over the anchor.
pub fn label_candidate(
    wedge: &WedgeLayout,
    center: (f64, f64),
    nudge: f64,
    uppercase: bool,
) -> LabelCandidate {
    let (x, y) = polar_to_cartesian(center, wedge.mid_radius(), wedge.mid_angle());
    let text = if uppercase {
        wedge.label.to_uppercase()
    } else {
        wedge.label.clone()
    };
    LabelCandidate {
        label: wedge.label.clone(),
        text,
        size: wedge.span(),
        offset: wedge.start_angle,
        x: x - nudge,
        y: y + nudge,
    }
}

fn candidate_order(a: &LabelCandidate, b: &LabelCandidate) -> Ordering {
    b.size
        .total_cmp(&a.size)
        .then_with(|| a.label.cmp(&b.label))
        .then_with(|| a.offset.total_cmp(&b.offset))
}

/// First-fit placement. Zero-width wedges never get a label.
pub fn place_labels(mut candidates: Vec<LabelCandidate>, min_spacing: f64) -> Vec<LabelLayout> {
    candidates.retain(|candidate| candidate.size > 0.0);
    candidates.sort_by(candidate_order);

    let min_dist_sq = min_spacing * min_spacing;
    let mut occupied: Vec<(f64, f64)> = Vec::new();
    let mut placed = Vec::new();
    for candidate in candidates {
        let has_room = occupied.iter().all(|(ox, oy)| {
            let dx = ox - candidate.x;
            let dy = oy - candidate.y;
            dx * dx + dy * dy >= min_dist_sq
        });
        if !has_room {
            continue;
        }
        occupied.push((candidate.x, candidate.y));
        placed.push(LabelLayout {
            text: candidate.text,
            x: candidate.x,
            y: candidate.y,
        });
    }
    placed
}
