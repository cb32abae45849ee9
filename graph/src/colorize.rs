use std::collections::HashMap;

use tracing::{debug, warn};

use crate::attribute::BranchNames;
use crate::config::PaletteConfig;
use crate::core::{Color, Dag};

/// One color per branch, evenly spaced around the hue circle
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: HashMap<String, Color>,
    ordered: Vec<Color>,
    unassigned: Color,
}

impl Palette {
    /// Allocate colors for `names` in their given order
    pub fn hls(names: &BranchNames, config: &PaletteConfig) -> Self {
        let ordered = hls_colors(names.len(), config);
        let colors = names.iter().cloned().zip(ordered.iter().copied()).collect();

        Self {
            colors,
            ordered,
            unassigned: config.unassigned,
        }
    }

    /// Color for a branch, or the fallback when there is none or it is unknown
    pub fn color_for(&self, branch: Option<&str>) -> Color {
        branch
            .and_then(|name| self.colors.get(name))
            .copied()
            .unwrap_or(self.unassigned)
    }

    /// Colors in branch discovery order
    pub fn colors(&self) -> &[Color] {
        &self.ordered
    }

    pub fn unassigned(&self) -> Color {
        self.unassigned
    }
}

/// `n` colors with hues `offset + i / n`, wrapped into [0, 1)
pub fn hls_colors(n: usize, config: &PaletteConfig) -> Vec<Color> {
    (0..n)
        .map(|i| {
            let hue = (config.hue_offset + i as f64 / n as f64).rem_euclid(1.0);
            Color::from_hls(hue, config.lightness, config.saturation)
        })
        .collect()
}

/// Stamp branch colors onto every node and every edge leaving it
pub fn colorize(dag: &mut Dag, names: &BranchNames, config: &PaletteConfig) -> Palette {
    let palette = Palette::hls(names, config);
    let mut fallback = 0;

    for idx in 0..dag.node_count() {
        let node = dag.node(idx);
        if node
            .branch
            .as_deref()
            .map_or(true, |b| !names.contains(b))
        {
            fallback += 1;
        }
        let color = palette.color_for(node.branch.as_deref());

        dag.node_mut(idx).color = Some(color);
        dag.stamp_outgoing(idx, color);
    }

    if fallback > 0 {
        warn!(
            commits = fallback,
            color = %palette.unassigned(),
            "commits without a branch use the fallback color"
        );
    }
    debug!(branches = names.len(), "colorized commit graph");
    palette
}
