//! Token-split donut: one dashed SVG circle per entry laid end to end.

use std::f64::consts::PI;

pub const CENTER: f64 = 130.0;
pub const RADIUS: f64 = 100.0;
pub const STROKE_WIDTH: f64 = 40.0;
pub const HOLE_RADIUS: f64 = 60.0;
pub const HOLE_FILL: &str = "#fff";

#[derive(Clone, Debug, PartialEq)]
pub struct DonutEntry {
    pub label: &'static str,
    pub value: f64,
    pub color: &'static str,
}

pub const ENTRIES: &[DonutEntry] = &[
    DonutEntry { label: "Public", value: 75.0, color: "#77a6f7" },
    DonutEntry { label: "Vested", value: 12.0, color: "#caa24c" },
    DonutEntry { label: "Reserves", value: 8.0, color: "#c27a55" },
    DonutEntry { label: "Burned", value: 3.0, color: "#cfcfcf" },
    DonutEntry { label: "Dev", value: 2.0, color: "#000000" },
];

#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub color: &'static str,
    pub fraction: f64,
    /// Visible stroke length along the circumference.
    pub length: f64,
    /// Negative cumulative length of every earlier segment.
    pub dash_offset: f64,
}

impl Segment {
    pub fn dash_array(&self, circumference: f64) -> String {
        format!("{} {}", self.length, circumference - self.length)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    pub color: &'static str,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DonutLayout {
    pub circumference: f64,
    pub segments: Vec<Segment>,
    pub legend: Vec<LegendItem>,
}

pub fn circumference(radius: f64) -> f64 {
    2.0 * PI * radius
}

pub fn layout(entries: &[DonutEntry], radius: f64) -> DonutLayout {
    let circumference = circumference(radius);
    let total: f64 = entries.iter().map(|entry| entry.value).sum();
    let mut segments = Vec::with_capacity(entries.len());
    let mut legend = Vec::with_capacity(entries.len());
    let mut acc = 0.0;
    for entry in entries {
        let fraction = if total > 0.0 { entry.value / total } else { 0.0 };
        if total > 0.0 {
            segments.push(Segment {
                color: entry.color,
                fraction,
                length: fraction * circumference,
                dash_offset: 0.0 - acc * circumference,
            });
            acc += fraction;
        }
        legend.push(LegendItem {
            color: entry.color,
            text: format!("{} — {}%", entry.label, format_percent(fraction * 100.0)),
        });
    }
    DonutLayout {
        circumference,
        segments,
        legend,
    }
}

fn format_percent(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_are_normalized_and_offsets_accumulate() {
        let entries = [
            DonutEntry { label: "a", value: 3.0, color: "#1" },
            DonutEntry { label: "b", value: 1.0, color: "#2" },
            DonutEntry { label: "c", value: 4.0, color: "#3" },
        ];
        let layout = layout(&entries, RADIUS);
        let sum: f64 = layout.segments.iter().map(|segment| segment.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-12);

        let offsets: Vec<f64> = layout.segments.iter().map(|s| -s.dash_offset).collect();
        assert_eq!(offsets[0], 0.0);
        assert!(offsets.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!((offsets[2] - 0.5 * layout.circumference).abs() < 1e-9);
    }

    #[test]
    fn segments_keep_input_order() {
        let layout = layout(ENTRIES, RADIUS);
        let colors: Vec<&str> = layout.segments.iter().map(|s| s.color).collect();
        assert_eq!(colors, vec!["#77a6f7", "#caa24c", "#c27a55", "#cfcfcf", "#000000"]);
        assert_eq!(layout.legend[0].text, "Public — 75%");
        assert_eq!(layout.legend[4].text, "Dev — 2%");
    }

    #[test]
    fn legend_percent_uses_actual_total() {
        let entries = [
            DonutEntry { label: "x", value: 1.0, color: "#1" },
            DonutEntry { label: "y", value: 2.0, color: "#2" },
        ];
        let layout = layout(&entries, RADIUS);
        assert_eq!(layout.legend[0].text, "x — 33.3%");
        assert_eq!(layout.legend[1].text, "y — 66.7%");
    }

    #[test]
    fn dash_array_pairs_length_with_remainder() {
        let layout = layout(&ENTRIES[..1], 1.0);
        let segment = &layout.segments[0];
        assert_eq!(segment.length, layout.circumference);
        assert_eq!(segment.dash_array(layout.circumference), format!("{} 0", layout.circumference));
    }

    #[test]
    fn zero_total_draws_nothing_but_keeps_legend() {
        let entries = [DonutEntry { label: "none", value: 0.0, color: "#1" }];
        let layout = layout(&entries, RADIUS);
        assert!(layout.segments.is_empty());
        assert_eq!(layout.legend[0].text, "none — 0%");
    }
}
