//! Pie chart geometry
//!
//! Produces SVG path data for the completed/pending pie on each dashboard
//! card. Slices start at twelve o'clock and run clockwise.

use std::f64::consts::PI;

use super::stats::SubjectSummary;

pub const COMPLETED_FILL: &str = "#28a745";
pub const PENDING_FILL: &str = "#ffc107";

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: &'static str,
    pub value: usize,
    pub fill: &'static str,
    /// SVG `d` attribute
    pub path: String,
}

fn point(center: f64, radius: f64, angle: f64) -> (f64, f64) {
    (center + radius * angle.sin(), center - radius * angle.cos())
}

fn arc_path(center: f64, radius: f64, start: f64, sweep: f64) -> String {
    if sweep >= 2.0 * PI - f64::EPSILON {
        // A single arc cannot close on itself; draw two halves.
        return format!(
            "M {c:.3} {top:.3} A {r:.3} {r:.3} 0 1 1 {c:.3} {bottom:.3} A {r:.3} {r:.3} 0 1 1 {c:.3} {top:.3} Z",
            c = center,
            r = radius,
            top = center - radius,
            bottom = center + radius,
        );
    }
    let (x0, y0) = point(center, radius, start);
    let (x1, y1) = point(center, radius, start + sweep);
    let large = if sweep > PI { 1 } else { 0 };
    format!(
        "M {c:.3} {c:.3} L {x0:.3} {y0:.3} A {r:.3} {r:.3} 0 {large} 1 {x1:.3} {y1:.3} Z",
        c = center,
        r = radius,
    )
}

/// Slices for a chart of `2 * radius` square; empty values are skipped
pub fn pie_slices(summary: &SubjectSummary, radius: f64) -> Vec<PieSlice> {
    let total = summary.completed + summary.pending;
    if total == 0 {
        return Vec::new();
    }

    let parts = [
        ("Completed", summary.completed, COMPLETED_FILL),
        ("Pending", summary.pending, PENDING_FILL),
    ];
    let mut start = 0.0;
    let mut slices = Vec::with_capacity(parts.len());
    for (label, value, fill) in parts {
        if value == 0 {
            continue;
        }
        let sweep = 2.0 * PI * value as f64 / total as f64;
        slices.push(PieSlice {
            label,
            value,
            fill,
            path: arc_path(radius, radius, start, sweep),
        });
        start += sweep;
    }
    slices
}
