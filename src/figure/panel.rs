//! Rasterizing one panel: grid, lines, frame, ticks, labels and legend.

use log::debug;

use crate::color::Rgba;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::render::{
    draw_dashed_hline, draw_dashed_vline, draw_line, draw_polyline, draw_rect_outline, draw_text_aligned, Dash,
    HAlign, TextStyle, VAlign,
};
use crate::scale::{format_tick, nice_ticks, LinearScale, Scale};

use super::axes::Axes;
use super::legend::{best_location, LegendBox, LegendLocation};

/// Line width of data series, in points.
const LINE_WIDTH_PT: f32 = 1.5;
const SPINE_WIDTH_PT: f32 = 0.8;
const GRID_WIDTH_PT: f32 = 0.5;
const TICK_LENGTH_PT: f32 = 3.5;
const TICK_PAD_PT: f32 = 3.5;
const LABEL_PAD_PT: f32 = 4.0;

/// Where and how one panel is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PanelFrame {
    pub(crate) rect: Rect,
    pub(crate) x_domain: (f64, f64),
    pub(crate) y_domain: (f64, f64),
    pub(crate) x_tick_labels: bool,
    pub(crate) y_tick_labels: bool,
}

/// Points to pixels at `dpi`.
pub(crate) fn pt_to_px(points: f32, dpi: f32) -> f32 {
    points * dpi / 72.0
}

/// Tick positions inside `domain`: explicit ones when given, nice ones otherwise.
fn visible_ticks(explicit: Option<&[f64]>, domain: (f64, f64), max_ticks: usize) -> Vec<f64> {
    let (lo, hi) = domain;
    let ticks = explicit.map_or_else(|| nice_ticks(lo, hi, max_ticks), <[f64]>::to_vec);
    ticks.into_iter().filter(|t| *t >= lo && *t <= hi).collect()
}

/// Screen polylines of every line, split at non-finite values.
fn screen_polylines(axes: &Axes, xs: &LinearScale, ys: &LinearScale) -> Vec<(Vec<Point>, Rgba)> {
    let mut out = Vec::new();
    for line in axes.lines() {
        let mut run = Vec::new();
        for (&x, &y) in line.x.iter().zip(&line.y) {
            if x.is_finite() && y.is_finite() {
                run.push(Point::new(xs.scale(x), ys.scale(y)));
            } else if !run.is_empty() {
                out.push((std::mem::take(&mut run), line.color));
            }
        }
        if !run.is_empty() {
            out.push((run, line.color));
        }
    }
    out
}

/// Draw `axes` into `frame.rect`.
pub(crate) fn draw_panel(fb: &mut Framebuffer, axes: &Axes, frame: &PanelFrame, dpi: f32) -> Result<()> {
    let rect = frame.rect;
    let px = |pt: f32| pt_to_px(pt, dpi);

    let xs = LinearScale::new(frame.x_domain, (rect.x, rect.right()))?;
    let ys = LinearScale::new(frame.y_domain, (rect.bottom(), rect.y))?;

    let (x_tick_pt, y_tick_pt) = axes.tick_sizes();
    let y_max_ticks = ((rect.height / (3.0 * px(y_tick_pt))) as usize + 1).clamp(3, 10);
    let x_max_ticks = ((rect.width / (4.0 * px(x_tick_pt))) as usize + 1).clamp(3, 10);
    let x_ticks = visible_ticks(axes.x_ticks(), frame.x_domain, x_max_ticks);
    let y_ticks = visible_ticks(None, frame.y_domain, y_max_ticks);

    let left = rect.x.round() as u32;
    let top = rect.y.round() as u32;
    let right = rect.right().round() as u32;
    let bottom = rect.bottom().round() as u32;

    if axes.grid() {
        let dash = Dash::scaled(px(GRID_WIDTH_PT));
        for &t in &x_ticks {
            let x = xs.scale(t).round() as u32;
            draw_dashed_vline(fb, x, top, bottom, dash, Rgba::GRID);
        }
        for &t in &y_ticks {
            let y = ys.scale(t).round() as u32;
            draw_dashed_hline(fb, left, right, y, dash, Rgba::GRID);
        }
    }

    let polylines = screen_polylines(axes, &xs, &ys);
    let line_px = px(LINE_WIDTH_PT);
    for (points, color) in &polylines {
        draw_polyline(fb, points, line_px, *color);
    }

    let spine = px(SPINE_WIDTH_PT).round().max(1.0) as u32;
    draw_rect_outline(
        fb,
        left as i32,
        top as i32,
        right.saturating_sub(left) + 1,
        bottom.saturating_sub(top) + 1,
        Rgba::BLACK,
        spine,
    );

    // Ticks point outward from the bottom and left spines.
    let tick_len = px(TICK_LENGTH_PT);
    let tick_end = bottom as f32 + tick_len;
    let mut x_label_top = tick_end;
    let x_style = TextStyle::from_points(x_tick_pt, dpi);
    for &t in &x_ticks {
        let x = xs.scale(t).round() as i32;
        draw_line(fb, x, bottom as i32, x, tick_end.round() as i32, Rgba::BLACK);
        if frame.x_tick_labels {
            let at = Point::new(x as f32, tick_end + px(TICK_PAD_PT));
            let bbox = draw_text_aligned(fb, at, &format_tick(t), &x_style, HAlign::Center, VAlign::Top);
            x_label_top = x_label_top.max(bbox.bottom());
        }
    }

    let tick_start = left as f32 - tick_len;
    let mut y_label_right = tick_start;
    let y_style = TextStyle::from_points(y_tick_pt, dpi);
    for &t in &y_ticks {
        let y = ys.scale(t).round() as i32;
        draw_line(fb, tick_start.round() as i32, y, left as i32, y, Rgba::BLACK);
        if frame.y_tick_labels {
            let at = Point::new(tick_start - px(TICK_PAD_PT), y as f32);
            let bbox = draw_text_aligned(fb, at, &format_tick(t), &y_style, HAlign::Right, VAlign::Center);
            y_label_right = y_label_right.min(bbox.x);
        }
    }

    if let Some(label) = axes.x_label() {
        let style = TextStyle::from_points(label.size, dpi);
        let at = Point::new(rect.center().x, x_label_top + px(LABEL_PAD_PT));
        draw_text_aligned(fb, at, &label.text, &style, HAlign::Center, VAlign::Top);
    }
    if let Some(label) = axes.y_label() {
        let style = TextStyle::from_points(label.size, dpi).vertical();
        let at = Point::new(y_label_right - px(LABEL_PAD_PT), rect.center().y);
        draw_text_aligned(fb, at, &label.text, &style, HAlign::Right, VAlign::Center);
    }

    if let Some(options) = axes.legend_options() {
        let entries = axes.legend_entries();
        if entries.is_empty() {
            debug!("legend requested for a panel without labeled lines");
        } else {
            let legend = LegendBox::layout(entries, options, dpi);
            let location = match options.location {
                LegendLocation::Best => {
                    let paths: Vec<Vec<Point>> = polylines.into_iter().map(|(p, _)| p).collect();
                    best_location(&legend, rect, &paths)
                }
                fixed => fixed,
            };
            debug!("legend with {} entries at {location}", legend.entry_count());
            legend.draw(fb, legend.frame(location, rect), line_px);
        }
    }

    Ok(())
}
