use std::f64::consts::{PI, TAU};

use super::partition::RingEntry;

/// Spans this close to a full turn are drawn as a closed ring.
const FULL_TURN_EPS: f64 = 1e-9;

/// Polar to canvas coordinates; angles run clockwise from twelve o'clock.
pub fn polar_to_cartesian(center: (f64, f64), radius: f64, angle: f64) -> (f64, f64) {
    (center.0 + radius * angle.sin(), center.1 - radius * angle.cos())
}

#[derive(Debug, Clone, PartialEq)]
pub struct WedgeLayout {
    pub label: String,
    pub weight: u64,
    pub level: usize,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Radians, clockwise from vertical-up.
    pub start_angle: f64,
    pub end_angle: f64,
}

impl WedgeLayout {
    pub fn from_entry(entry: &RingEntry, level: usize, ring_depth: f64) -> Self {
        Self {
            label: entry.label.clone(),
            weight: entry.weight,
            level,
            inner_radius: ring_depth * level as f64,
            outer_radius: ring_depth * (level + 1) as f64,
            start_angle: entry.offset * TAU,
            end_angle: entry.end() * TAU,
        }
    }

    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    pub fn mid_radius(&self) -> f64 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    pub fn is_full_turn(&self) -> bool {
        self.span() >= TAU - FULL_TURN_EPS
    }

    pub fn is_degenerate(&self) -> bool {
        self.span() <= 0.0
    }

    /// Outline of the annular sector: outer arc clockwise from the start angle,
    /// in to the inner radius, inner arc back, closed.
    pub fn outline(&self, center: (f64, f64)) -> Vec<PathCommand> {
        let r1 = self.inner_radius;
        let r2 = self.outer_radius;
        let at = |radius: f64, angle: f64| polar_to_cartesian(center, radius, angle);

        let mut commands = vec![PathCommand::MoveTo(at(r2, self.start_angle))];
        if self.is_full_turn() {
            // A single arc whose endpoints coincide draws nothing.
            let half = self.start_angle + PI;
            commands.push(PathCommand::arc(r2, false, true, at(r2, half)));
            commands.push(PathCommand::arc(r2, false, true, at(r2, self.end_angle)));
            commands.push(PathCommand::LineTo(at(r1, self.end_angle)));
            commands.push(PathCommand::arc(r1, false, false, at(r1, half)));
            commands.push(PathCommand::arc(r1, false, false, at(r1, self.start_angle)));
        } else {
            let large_arc = self.span() > PI;
            commands.push(PathCommand::arc(r2, large_arc, true, at(r2, self.end_angle)));
            commands.push(PathCommand::LineTo(at(r1, self.end_angle)));
            commands.push(PathCommand::arc(r1, large_arc, false, at(r1, self.start_angle)));
        }
        commands.push(PathCommand::Close);
        commands
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo((f64, f64)),
    LineTo((f64, f64)),
    Arc {
        radius: f64,
        large_arc: bool,
        clockwise: bool,
        to: (f64, f64),
    },
    Close,
}

impl PathCommand {
    fn arc(radius: f64, large_arc: bool, clockwise: bool, to: (f64, f64)) -> Self {
        PathCommand::Arc {
            radius,
            large_arc,
            clockwise,
            to,
        }
    }
}

/// Wedges for one ring. Ring `level` starts at `ring_depth * level`.
pub fn layout_wedges(level: usize, entries: &[RingEntry], ring_depth: f64) -> Vec<WedgeLayout> {
    entries
        .iter()
        .map(|entry| WedgeLayout::from_entry(entry, level, ring_depth))
        .collect()
}
