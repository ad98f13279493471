//! Visualization: render a historical case series as a line chart to **SVG** or **PNG**.
//!
//! - Single black line with circle markers, x = date, y = cumulative cases
//! - Locale-aware tick labels (`30,000` vs `30.000`)
//! - Output format picked from the file extension (`.svg`, otherwise PNG)

pub mod util;

use crate::report::{format_count, map_locale};
use crate::series::SeriesPoint;
use anyhow::{Context, Result, anyhow, bail};
use log::debug;

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::LineSeries;
use plotters::style::FontFamily;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use util::{compute_left_label_area_px, day_label, padded_range, to_day_axis};

/// Where to look for a TrueType font when none is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Font currently registered as "sans-serif". Only successful registrations are kept.
static FONT: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Path of the font chart text is drawn with, if one has been registered.
pub fn registered_font() -> Option<PathBuf> {
    FONT.lock().ok().and_then(|f| f.clone())
}

fn register_font_file(path: &Path) -> bool {
    let Ok(bytes) = std::fs::read(path) else {
        return false;
    };
    // register_font wants 'static data; each distinct file is loaded at most once per switch.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font("sans-serif", plotters::style::FontStyle::Normal, bytes)
        .is_ok()
}

/// Register a "sans-serif" font for the `ab_glyph` text path, which doesn't discover OS fonts.
///
/// `preferred` is tried first. When it differs from the registered font it replaces it;
/// when it is unusable the current font is kept, or [`SYSTEM_FONTS`] are searched.
/// A failed search is not remembered, so a later call can still succeed.
pub fn ensure_font_registered(preferred: Option<&Path>) -> Result<PathBuf> {
    let mut current = FONT
        .lock()
        .map_err(|_| anyhow!("font registry lock poisoned"))?;
    match (preferred, current.as_deref()) {
        (None, Some(cur)) => return Ok(cur.to_path_buf()),
        (Some(p), Some(cur)) if p == cur => return Ok(cur.to_path_buf()),
        _ => {}
    }

    if let Some(p) = preferred {
        if register_font_file(p) {
            debug!("registered chart font {}", p.display());
            *current = Some(p.to_path_buf());
            return Ok(p.to_path_buf());
        }
        debug!("font {} is not usable", p.display());
    }
    if let Some(cur) = current.as_deref() {
        return Ok(cur.to_path_buf());
    }
    for path in SYSTEM_FONTS.iter().map(PathBuf::from) {
        if register_font_file(&path) {
            debug!("registered chart font {}", path.display());
            *current = Some(path.clone());
            return Ok(path);
        }
    }
    Err(anyhow!("no usable TrueType font found; pass one with --font"))
}

/// Open a written chart in the platform's default viewer without waiting for it.
pub fn open_in_viewer(path: &Path) -> Result<()> {
    let (program, args) = viewer_command();
    std::process::Command::new(program)
        .args(args)
        .arg(path)
        .spawn()
        .with_context(|| format!("launch {program} for {}", path.display()))?;
    Ok(())
}

/// Program (and leading arguments) that hands a file to the desktop's default viewer.
pub fn viewer_command() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}

/// Draw `points` (already in date order) as a line chart at `out_path`.
///
/// Uses the system font search; see [`plot_series_with_font`] to pick one.
pub fn plot_series<P: AsRef<Path>>(
    points: &[SeriesPoint],
    title: &str,
    out_path: P,
    width: u32,
    height: u32,
    locale_tag: &str,
) -> Result<()> {
    plot_series_with_font(points, title, out_path, width, height, locale_tag, None)
}

/// Fully-configurable entry point: size, locale for tick labels, and font file.
pub fn plot_series_with_font<P: AsRef<Path>>(
    points: &[SeriesPoint],
    title: &str,
    out_path: P,
    width: u32,
    height: u32,
    locale_tag: &str,
    font: Option<&Path>,
) -> Result<()> {
    if points.is_empty() {
        bail!("no data to plot");
    }
    if points.windows(2).any(|w| w[0].0 > w[1].0) {
        bail!("points must be in ascending date order");
    }
    ensure_font_registered(font)?;

    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, points, title, locale_tag)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, points, title, locale_tag)?;
    }
    debug!("chart with {} points written to {}", points.len(), out_path.display());
    Ok(())
}

/// Helper that draws to any Plotters backend.
fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    points: &[SeriesPoint],
    title: &str,
    locale_tag: &str,
) -> Result<()>
where
    DB: DrawingBackend,
{
    const MARGIN: u32 = 16;
    let locale = map_locale(locale_tag);

    let (first, xy) = to_day_axis(points).ok_or_else(|| anyhow!("no data to plot"))?;
    let last_x = xy.last().map(|(x, _)| *x).unwrap_or(0.0);
    let (x_min, x_max) = if last_x > 0.0 {
        (0.0, last_x)
    } else {
        (-1.0, 1.0)
    };

    let (lo, hi) = xy
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, y)| {
            (lo.min(*y), hi.max(*y))
        });
    let (y_min, y_max) = padded_range(lo, hi);

    let y_label_count = 10usize;
    let x_label_count = points.len().clamp(2, 8);
    let left_label_width_px = compute_left_label_area_px(y_min, y_max, y_label_count, 12, locale);

    let x_label_fmt = |x: &f64| day_label(first, *x);
    let y_label_fmt = |v: &f64| format_count(v.round(), locale);

    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(MARGIN)
        .caption(title, (FontFamily::SansSerif, 24))
        .set_label_area_size(LabelAreaPosition::Left, left_label_width_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 56)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Cumulative Cases")
        .x_labels(x_label_count)
        .y_labels(y_label_count)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 16))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    let line = ShapeStyle {
        color: BLACK.to_rgba(),
        filled: false,
        stroke_width: 2,
    };
    chart
        .draw_series(LineSeries::new(xy.iter().copied(), line))
        .map_err(|e| anyhow!("{:?}", e))?;
    chart
        .draw_series(xy.iter().map(|(x, y)| Circle::new((*x, *y), 4, BLACK.filled())))
        .map_err(|e| anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
