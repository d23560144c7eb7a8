use std::f64::consts::PI;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};

use crate::layout::{
    HAlign, PolarAxes, VAlign, place_label, sector_angles, sector_width, upright_rotation,
    wedge_outline,
};
use crate::ranking::{RankedRecord, Ranking};
use crate::run_types::RunType;
use crate::theme::{Palette, Theme};

/// Scales every text size on the chart.
pub const TEXT_MULTIPLIER: f64 = 1.45;
pub const TITLE: &str = "Off-Ball Attacking Run Rankings";
pub const LENGTH_CAPTION: &str = "Length represents the percentile of run type per 90 minutes";
pub const TYPICAL_CAPTION: &str = "Run type typical for position selection";
/// A run type is "typical" for the selection when its median per-90 reaches this.
pub const HIGHLIGHT_MEDIAN: f64 = 1.0;

const BAR_COLOUR: RGBColor = RGBColor(0x80, 0xCB, 0xA2);
const BAR_ALPHA: f64 = 0.95;
const EDGE_WIDTH: f64 = 1.25;
const INNER_RADIUS: f64 = 10.0;
const GRID_RADII: [f64; 4] = [35.0, 60.0, 85.0, 110.0];
const THRESHOLD_ANGLE: f64 = 2.19911;
const CATEGORY_RADIUS: f64 = 116.0;
const VALUE_RADIUS: f64 = 105.0;
const WEDGE_STEPS: usize = 24;
// Chart limit as a fraction of the image side.
const RADIUS_FRACTION: f64 = 0.31;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub color: RGBColor,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarMark {
    pub theta: f64,
    pub width: f64,
    pub bottom: f64,
    pub height: f64,
    pub fill: Option<Fill>,
    pub edge: RGBColor,
    pub line_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingMark {
    pub r: f64,
    pub color: RGBColor,
    pub dashed: bool,
    pub line_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub fill: RGBColor,
    pub edge: Option<RGBColor>,
    pub line_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Halo {
    pub color: RGBColor,
    pub width: f64,
}

/// Text anchored in polar data coordinates. `size` is in points.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMark {
    pub theta: f64,
    pub r: f64,
    pub text: String,
    pub size: f64,
    pub color: RGBColor,
    pub bold: bool,
    pub rotation_deg: f64,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub bbox: Option<TextBox>,
    pub halo: Option<Halo>,
}

impl TextMark {
    pub fn new(theta: f64, r: f64, text: impl Into<String>, size: f64, color: RGBColor) -> Self {
        Self {
            theta,
            r,
            text: text.into(),
            size,
            color,
            bold: false,
            rotation_deg: 0.0,
            h_align: HAlign::Center,
            v_align: VAlign::Center,
            bbox: None,
            halo: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn rotated(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    pub fn aligned(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    pub fn boxed(mut self, bbox: TextBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn with_halo(mut self, halo: Halo) -> Self {
        self.halo = Some(halo);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Ring(RingMark),
    Bar(BarMark),
    Text(TextMark),
}

/// A rendered-on-demand radar: marks in draw order plus the polar axes they
/// live in.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarChart {
    theme: Theme,
    axes: PolarAxes,
    marks: Vec<Mark>,
}

/// Lay out the radar for `player` against the `population` it was ranked in.
pub fn radar_chart(player: &RankedRecord, population: &Ranking, theme: Theme) -> RadarChart {
    let Palette { primary, secondary } = theme.palette();
    let thetas = sector_angles(RunType::COUNT);
    let width = sector_width(RunType::COUNT);
    let mut marks = Vec::new();

    for r in GRID_RADII {
        marks.push(Mark::Ring(RingMark {
            r,
            color: secondary,
            dashed: true,
            line_width: 1.0,
        }));
    }

    let heights: Vec<f64> = RunType::ALL
        .iter()
        .map(|rt| player.metric(*rt).percentile.unwrap_or(0.0))
        .collect();

    // Soft fill first, then a crisp outline with identical geometry.
    for (theta, height) in thetas.iter().zip(&heights) {
        marks.push(Mark::Bar(BarMark {
            theta: *theta,
            width,
            bottom: INNER_RADIUS,
            height: *height,
            fill: Some(Fill {
                color: BAR_COLOUR,
                alpha: BAR_ALPHA,
            }),
            edge: secondary,
            line_width: EDGE_WIDTH,
        }));
    }
    for (theta, height) in thetas.iter().zip(&heights) {
        marks.push(Mark::Bar(BarMark {
            theta: *theta,
            width,
            bottom: INNER_RADIUS,
            height: *height,
            fill: None,
            edge: secondary,
            line_width: EDGE_WIDTH,
        }));
    }

    let threshold_box = TextBox {
        fill: primary,
        edge: Some(secondary),
        line_width: EDGE_WIDTH,
    };
    for (r, label) in GRID_RADII.iter().zip(["25", "50", "75"]) {
        marks.push(Mark::Text(
            TextMark::new(THRESHOLD_ANGLE, *r, label, 8.0 * TEXT_MULTIPLIER, secondary)
                .boxed(threshold_box),
        ));
    }
    marks.push(Mark::Text(
        TextMark::new(
            THRESHOLD_ANGLE,
            GRID_RADII[3],
            "100th\nPercentile",
            8.0 * TEXT_MULTIPLIER,
            secondary,
        )
        .aligned(HAlign::Left, VAlign::Center)
        .boxed(TextBox {
            fill: primary,
            edge: None,
            line_width: EDGE_WIDTH,
        }),
    ));

    for (run_type, theta) in RunType::ALL.iter().zip(&thetas) {
        let placed = place_label(*theta, CATEGORY_RADIUS, run_type.label());
        let typical = population
            .median_per_90(*run_type)
            .is_some_and(|m| m >= HIGHLIGHT_MEDIAN);
        let size = 10.0 * TEXT_MULTIPLIER;
        let mut label = TextMark::new(*theta, CATEGORY_RADIUS, placed.text, size, secondary)
            .bold()
            .rotated(placed.rotation_deg)
            .aligned(placed.h_align, placed.v_align);
        if typical {
            label.color = primary;
            label = label.boxed(TextBox {
                fill: secondary,
                edge: None,
                line_width: EDGE_WIDTH,
            });
        }
        marks.push(Mark::Text(label));
    }

    for (run_type, theta) in RunType::ALL.iter().zip(&thetas) {
        marks.push(Mark::Text(
            TextMark::new(
                *theta,
                VALUE_RADIUS,
                per_90_caption(player.metric(*run_type).per_90),
                8.0 * TEXT_MULTIPLIER,
                secondary,
            )
            .bold()
            .rotated(upright_rotation(*theta))
            .with_halo(Halo {
                color: primary,
                width: 3.0,
            }),
        ));
    }

    marks.push(Mark::Text(
        TextMark::new(0.0, 138.0, TITLE, 18.0 * TEXT_MULTIPLIER, secondary).bold(),
    ));
    let record = &player.record;
    marks.push(Mark::Text(TextMark::new(
        0.0,
        128.0,
        format!("{} | {} | {}", record.player_name, record.team_name, record.position),
        14.0 * TEXT_MULTIPLIER,
        secondary,
    )));
    marks.push(Mark::Text(TextMark::new(
        PI,
        128.0,
        LENGTH_CAPTION,
        8.0 * TEXT_MULTIPLIER,
        secondary,
    )));
    marks.push(Mark::Text(
        TextMark::new(PI, 137.0, TYPICAL_CAPTION, 8.0 * TEXT_MULTIPLIER, primary)
            .bold()
            .boxed(TextBox {
                fill: secondary,
                edge: None,
                line_width: EDGE_WIDTH,
            }),
    ));

    RadarChart {
        theme,
        axes: PolarAxes::default(),
        marks,
    }
}

pub fn per_90_caption(per_90: Option<f64>) -> String {
    match per_90 {
        Some(v) => format!("{v:.1} Runs P90"),
        None => "n/a Runs P90".to_string(),
    }
}

impl RadarChart {
    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn axes(&self) -> &PolarAxes {
        &self.axes
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn bars(&self) -> impl Iterator<Item = &BarMark> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Bar(bar) => Some(bar),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextMark> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn find_text(&self, text: &str) -> Option<&TextMark> {
        self.texts().find(|t| t.text == text)
    }

    /// Add a text mark drawn on top of everything else.
    pub fn annotate(&mut self, mark: TextMark) {
        self.marks.push(Mark::Text(mark));
    }

    pub fn save_png(&self, path: &Path, size: u32) -> Result<()> {
        let root = BitMapBackend::new(path, (size, size)).into_drawing_area();
        self.render(&root)?;
        root.present()
            .map_err(draw_err)
            .with_context(|| format!("write {}", path.display()))
    }

    pub fn save_svg(&self, path: &Path, size: u32) -> Result<()> {
        let root = SVGBackend::new(path, (size, size)).into_drawing_area();
        self.render(&root)?;
        root.present()
            .map_err(draw_err)
            .with_context(|| format!("write {}", path.display()))
    }

    /// Draw onto any plotters surface; the chart is centred and sized to fit.
    pub fn render<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let (w, h) = root.dim_in_pixel();
        let side = w.min(h) as f64;
        let frame = Frame {
            axes: self.axes,
            center: (w as f64 / 2.0, h as f64 / 2.0),
            radius_px: side * RADIUS_FRACTION,
            // Points to pixels, a 1000 px square matching 10in at 100 dpi.
            pt_px: side / 720.0,
        };

        root.fill(&self.theme.palette().primary).map_err(draw_err)?;
        for mark in &self.marks {
            match mark {
                Mark::Ring(ring) => draw_ring(root, &frame, ring)?,
                Mark::Bar(bar) => draw_bar(root, &frame, bar)?,
                Mark::Text(text) => draw_text_mark(root, &frame, text)?,
            }
        }
        Ok(())
    }
}

struct Frame {
    axes: PolarAxes,
    center: (f64, f64),
    radius_px: f64,
    pt_px: f64,
}

impl Frame {
    fn pixel(&self, theta: f64, r: f64) -> (f64, f64) {
        self.axes.to_pixel(theta, r, self.center, self.radius_px)
    }

    fn stroke(&self, line_width: f64) -> u32 {
        (line_width * self.pt_px).round().max(1.0) as u32
    }
}

fn draw_err<E: std::fmt::Display>(err: E) -> anyhow::Error {
    anyhow!("drawing failed: {err}")
}

fn to_coord((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

fn draw_ring<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &Frame,
    ring: &RingMark,
) -> Result<()> {
    const SEGMENTS: usize = 120;
    let style = ring.color.stroke_width(frame.stroke(ring.line_width));
    let points: Vec<(i32, i32)> = (0..=SEGMENTS)
        .map(|i| to_coord(frame.pixel(2.0 * PI * i as f64 / SEGMENTS as f64, ring.r)))
        .collect();
    if !ring.dashed {
        return root.draw(&PathElement::new(points, style)).map_err(draw_err);
    }
    for (i, pair) in points.windows(2).enumerate() {
        if i % 2 == 0 {
            root.draw(&PathElement::new(pair.to_vec(), style)).map_err(draw_err)?;
        }
    }
    Ok(())
}

fn draw_bar<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &Frame,
    bar: &BarMark,
) -> Result<()> {
    let outline: Vec<(i32, i32)> =
        wedge_outline(bar.theta, bar.width, bar.bottom, bar.height, WEDGE_STEPS)
            .into_iter()
            .map(|(theta, r)| to_coord(frame.pixel(theta, r)))
            .collect();
    if let Some(fill) = bar.fill {
        root.draw(&Polygon::new(outline.clone(), fill.color.mix(fill.alpha).filled()))
            .map_err(draw_err)?;
    }
    let mut closed = outline;
    if let Some(first) = closed.first().copied() {
        closed.push(first);
    }
    root.draw(&PathElement::new(closed, bar.edge.stroke_width(frame.stroke(bar.line_width))))
        .map_err(draw_err)
}

/// Glyphs are laid out one by one along the rotated baseline so any angle
/// works on every backend.
fn draw_text_mark<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &Frame,
    mark: &TextMark,
) -> Result<()> {
    let size_px = mark.size * frame.pt_px;
    let weight = if mark.bold { FontStyle::Bold } else { FontStyle::Normal };
    let font = FontDesc::new(FontFamily::SansSerif, size_px, weight);
    let anchor = frame.pixel(mark.theta, mark.r);

    let angle = mark.rotation_deg.to_radians();
    let along = (angle.cos(), -angle.sin());
    let down = (angle.sin(), angle.cos());
    let at = |x: f64, y: f64| {
        (
            anchor.0 + along.0 * x + down.0 * y,
            anchor.1 + along.1 * x + down.1 * y,
        )
    };

    let measure_style = font.color(&mark.color);
    let lines: Vec<Vec<(char, f64)>> = mark
        .text
        .lines()
        .map(|line| {
            line.chars()
                .map(|ch| {
                    let w = root
                        .estimate_text_size(&ch.to_string(), &measure_style)
                        .map(|(w, _)| w as f64)
                        .unwrap_or(size_px * 0.55);
                    (ch, w)
                })
                .collect()
        })
        .collect();
    let line_height = size_px * 1.2;
    let block_height = line_height * lines.len() as f64;
    let widths: Vec<f64> = lines.iter().map(|l| l.iter().map(|(_, w)| w).sum()).collect();
    let max_width = widths.iter().copied().fold(0.0, f64::max);

    let top = match mark.v_align {
        VAlign::Top => 0.0,
        VAlign::Center => -block_height / 2.0,
        VAlign::Bottom => -block_height,
    };
    let line_start = |w: f64| match mark.h_align {
        HAlign::Left => 0.0,
        HAlign::Center => -w / 2.0,
        HAlign::Right => -w,
    };

    if let Some(bbox) = mark.bbox {
        let pad = size_px * 0.35;
        let left = line_start(max_width) - pad;
        let right = line_start(max_width) + max_width + pad;
        let corners: Vec<(i32, i32)> = [
            (left, top - pad),
            (right, top - pad),
            (right, top + block_height + pad),
            (left, top + block_height + pad),
        ]
        .iter()
        .map(|(x, y)| to_coord(at(*x, *y)))
        .collect();
        root.draw(&Polygon::new(corners.clone(), bbox.fill.filled()))
            .map_err(draw_err)?;
        if let Some(edge) = bbox.edge {
            let mut closed = corners;
            closed.push(closed[0]);
            root.draw(&PathElement::new(closed, edge.stroke_width(frame.stroke(bbox.line_width))))
                .map_err(draw_err)?;
        }
    }

    let centre_pos = Pos::new(HPos::Center, VPos::Center);
    let mut offsets = vec![(0.0, 0.0, mark.color)];
    if let Some(halo) = mark.halo {
        let d = halo.width * frame.pt_px / 2.0;
        let ring = [(-d, 0.0), (d, 0.0), (0.0, -d), (0.0, d), (-d, -d), (d, d), (-d, d), (d, -d)];
        offsets = ring
            .iter()
            .map(|(dx, dy)| (*dx, *dy, halo.color))
            .chain(std::iter::once((0.0, 0.0, mark.color)))
            .collect();
    }

    for (dx, dy, color) in offsets {
        let style = font.color(&color).pos(centre_pos);
        for (line_idx, line) in lines.iter().enumerate() {
            let y = top + line_height * (line_idx as f64 + 0.5);
            let mut x = line_start(widths[line_idx]);
            for (ch, w) in line {
                let (px, py) = at(x + w / 2.0, y);
                if !ch.is_whitespace() {
                    let pos = to_coord((px + dx, py + dy));
                    root.draw(&Text::new(ch.to_string(), pos, style.clone()))
                        .map_err(draw_err)?;
                }
                x += w;
            }
        }
    }
    Ok(())
}
