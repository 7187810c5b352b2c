//! Bar-chart artifact of the current fullness per resource.
//!
//! Rendered with fixed color bands: green below 60%, orange from 60% to
//! 80%, red above 80%. The y axis spans 0-100% with gridlines every 20%.

use image::{Rgb, RgbImage};
use std::path::Path;

use crate::core::monitor::report::Report;
use crate::error::{BinwatchError, Result};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 400;
const MARGIN_LEFT: u32 = 40;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 20;
const MARGIN_BOTTOM: u32 = 30;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([64, 64, 64]);
const GRID: Rgb<u8> = Rgb([210, 210, 210]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);
const ORANGE: Rgb<u8> = Rgb([255, 165, 0]);
const GREEN: Rgb<u8> = Rgb([0, 128, 0]);

/// Band color for a fullness value.
pub fn band_color(fullness: f64) -> Rgb<u8> {
    if fullness > 80.0 {
        RED
    } else if fullness > 60.0 {
        ORANGE
    } else {
        GREEN
    }
}

/// Render the report as a bar chart image.
pub fn render_chart(report: &Report) -> RgbImage {
    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, WHITE);

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = HEIGHT - MARGIN_BOTTOM;

    // Horizontal gridlines every 20%
    for step in 1..=5 {
        let y = baseline - plot_h * step / 5;
        for x in MARGIN_LEFT..(WIDTH - MARGIN_RIGHT) {
            img.put_pixel(x, y, GRID);
        }
    }

    // Axes
    for y in MARGIN_TOP..=baseline {
        img.put_pixel(MARGIN_LEFT, y, AXIS);
    }
    for x in MARGIN_LEFT..(WIDTH - MARGIN_RIGHT) {
        img.put_pixel(x, baseline, AXIS);
    }

    let count = report.statuses.len() as u32;
    if count == 0 {
        return img;
    }

    let slot = plot_w / count;
    let bar_w = (slot * 3 / 5).max(1);

    for (i, status) in report.statuses.iter().enumerate() {
        let fullness = status.fullness.clamp(0.0, 100.0);
        let bar_h = (fullness / 100.0 * plot_h as f64).round() as u32;
        if bar_h == 0 {
            continue;
        }
        let color = band_color(status.fullness);
        let x0 = MARGIN_LEFT + slot * i as u32 + (slot - bar_w) / 2;
        for x in x0..(x0 + bar_w) {
            for y in (baseline - bar_h)..baseline {
                img.put_pixel(x, y, color);
            }
        }
    }

    img
}

/// Render and save the chart artifact, replacing the previous cycle's.
pub fn save_chart(report: &Report, path: &Path) -> Result<()> {
    let img = render_chart(report);
    img.save(path)
        .map_err(|e| BinwatchError::chart(e.to_string()))?;
    Ok(())
}
