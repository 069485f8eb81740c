//! Chart rendering
//!
//! Bar charts for a macronutrient split and a simulated performance
//! snapshot, rendered with plotters into an RGB buffer and encoded as PNG.

use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use thiserror::Error;

use crate::models::{MacronutrientSplit, PerformanceSnapshot};

// ============================================================================
// Color Constants
// ============================================================================

const COLOR_CARBOHYDRATE: RGBColor = RGBColor(0xFD, 0xB4, 0x5C);
const COLOR_PROTEIN: RGBColor = RGBColor(0x46, 0xBF, 0xBD);
const COLOR_FAT: RGBColor = RGBColor(0xF7, 0x46, 0x4A);
const COLOR_PERFORMANCE: RGBColor = RGBColor(0x6C, 0x9C, 0x8F);

/// Default chart size in pixels
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 500;
/// Largest width or height accepted, in pixels
pub const MAX_DIMENSION: u32 = 4096;

/// Chart rendering errors
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Chart dimensions must be between 1 and {max} pixels, got {width}x{height}", max = MAX_DIMENSION)]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Cannot chart negative value {value} for {label}")]
    NegativeValue { label: &'static str, value: i64 },

    #[error("Drawing error: {0}")]
    Drawing(String),

    #[error("Failed to create image from buffer")]
    Buffer,

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] image::ImageError),

    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
}

struct BarChart<'a> {
    title: &'a str,
    y_desc: &'a str,
    bars: &'a [(&'static str, f64)],
    colors: &'a [RGBColor],
    y_max: f64,
}

fn drawing_error<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Drawing(e.to_string())
}

fn render_bar_chart(layout: &BarChart, width: u32, height: u32) -> Result<Vec<u8>, ChartError> {
    let invalid = ChartError::InvalidDimensions { width, height };
    if !(1..=MAX_DIMENSION).contains(&width) || !(1..=MAX_DIMENSION).contains(&height) {
        return Err(invalid);
    }
    let buffer_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or(invalid)?;

    let mut buffer = vec![0u8; buffer_len];
    let bar_count = layout.bars.len() as u32;

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(layout.title, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..bar_count).into_segmented(), 0f64..layout.y_max)
            .map_err(drawing_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bar_count as usize)
            .x_label_formatter(&|x| match x {
                SegmentValue::CenterOf(i) => layout
                    .bars
                    .get(*i as usize)
                    .map(|(label, _)| label.to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .y_desc(layout.y_desc)
            .draw()
            .map_err(drawing_error)?;

        chart
            .draw_series(layout.bars.iter().enumerate().map(|(i, (_, value))| {
                let i = i as u32;
                let color = layout.colors[i as usize % layout.colors.len()];
                let mut bar = Rectangle::new(
                    [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), *value)],
                    color.filled(),
                );
                bar.set_margin(0, 0, 15, 15);
                bar
            }))
            .map_err(drawing_error)?;

        root.present().map_err(drawing_error)?;
    }

    let img = RgbImage::from_raw(width, height, buffer).ok_or(ChartError::Buffer)?;

    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)?;

    Ok(png_bytes)
}

/// Generate the macronutrient bar chart as PNG bytes
pub fn generate_macro_chart(
    split: &MacronutrientSplit,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, ChartError> {
    let labelled = split.as_bars();
    if let Some((label, value)) = labelled.iter().find(|(_, v)| *v < 0) {
        return Err(ChartError::NegativeValue {
            label: *label,
            value: *value,
        });
    }

    let bars: Vec<(&'static str, f64)> = labelled.iter().map(|(l, v)| (*l, *v as f64)).collect();
    let tallest = bars.iter().map(|(_, v)| *v).fold(0.0, f64::max);

    render_bar_chart(
        &BarChart {
            title: "Daily macronutrient breakdown",
            y_desc: "Grams per day",
            bars: &bars,
            colors: &[COLOR_CARBOHYDRATE, COLOR_PROTEIN, COLOR_FAT],
            y_max: (tallest * 1.15).max(1.0),
        },
        width,
        height,
    )
}

/// Generate the simulated performance bar chart as PNG bytes
pub fn generate_performance_chart(
    snapshot: &PerformanceSnapshot,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, ChartError> {
    let bars: Vec<(&'static str, f64)> = snapshot
        .as_bars()
        .iter()
        .map(|(l, v)| (*l, *v as f64))
        .collect();

    render_bar_chart(
        &BarChart {
            title: "Simulated physical capacities",
            y_desc: "Score (%)",
            bars: &bars,
            colors: &[COLOR_PERFORMANCE],
            y_max: 100.0,
        },
        width,
        height,
    )
}

/// Write PNG bytes to disk, creating parent directories
pub fn save_png(png_bytes: &[u8], output_path: &Path) -> Result<(), ChartError> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, png_bytes)?;
    Ok(())
}
