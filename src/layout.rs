//! Polar coordinate helpers for the radar chart.
//!
//! Angles are radians measured clockwise from 12 o'clock; radii are in chart
//! units (0 at the centre, [`R_MAX`] at the outer limit). Nothing here touches a
//! drawing surface.

use std::f64::consts::{FRAC_PI_2, TAU};

pub const R_MAX: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// Coordinate system of a radar chart: zero angle at the top, clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarAxes {
    pub theta_offset: f64,
    pub clockwise: bool,
    pub r_min: f64,
    pub r_max: f64,
}

impl Default for PolarAxes {
    fn default() -> Self {
        Self {
            theta_offset: FRAC_PI_2,
            clockwise: true,
            r_min: 0.0,
            r_max: R_MAX,
        }
    }
}

impl PolarAxes {
    /// Data coordinates to cartesian chart units, y pointing up.
    pub fn to_cartesian(&self, theta: f64, r: f64) -> (f64, f64) {
        let phi = if self.clockwise {
            self.theta_offset - theta
        } else {
            self.theta_offset + theta
        };
        let r = r - self.r_min;
        (r * phi.cos(), r * phi.sin())
    }

    /// Data coordinates to pixels for a chart centred at `center` whose
    /// outer limit is `radius_px` pixels away.
    pub fn to_pixel(&self, theta: f64, r: f64, center: (f64, f64), radius_px: f64) -> (f64, f64) {
        let scale = radius_px / (self.r_max - self.r_min);
        let (x, y) = self.to_cartesian(theta, r);
        (center.0 + x * scale, center.1 - y * scale)
    }
}

/// `n` sector centres evenly spread over the circle, the first at zero.
pub fn sector_angles(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    (0..n).map(|i| TAU * i as f64 / n as f64).collect()
}

pub fn sector_width(n: usize) -> f64 {
    if n == 0 { TAU } else { TAU / n as f64 }
}

/// Text rotation in degrees (counter-clockwise) that keeps a label at `theta`
/// tangent to the circle and readable: the lower half is flipped by 180°.
pub fn upright_rotation(theta: f64) -> f64 {
    let deg = theta.rem_euclid(TAU).to_degrees();
    if (0.0..=90.0).contains(&deg) || (270.0..=360.0).contains(&deg) {
        -deg
    } else {
        180.0 - deg
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    pub text: String,
    /// Cartesian chart units, y up.
    pub anchor: (f64, f64),
    pub rotation_deg: f64,
    pub h_align: HAlign,
    pub v_align: VAlign,
}

/// Where and how to draw a sector label centred on `theta` at `radius`.
pub fn place_label(theta: f64, radius: f64, text: &str) -> LabelPlacement {
    LabelPlacement {
        text: text.to_string(),
        anchor: PolarAxes::default().to_cartesian(theta, radius),
        rotation_deg: upright_rotation(theta),
        h_align: HAlign::Center,
        v_align: VAlign::Center,
    }
}

/// Closed outline of a bar in data coordinates: outer arc clockwise, inner arc
/// back.
pub fn wedge_outline(
    theta: f64,
    width: f64,
    bottom: f64,
    height: f64,
    steps: usize,
) -> Vec<(f64, f64)> {
    let steps = steps.max(1);
    let start = theta - width / 2.0;
    let outer = bottom + height.max(0.0);
    let mut points = Vec::with_capacity(2 * (steps + 1));
    for i in 0..=steps {
        points.push((start + width * i as f64 / steps as f64, outer));
    }
    for i in (0..=steps).rev() {
        points.push((start + width * i as f64 / steps as f64, bottom));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn zero_angle_points_up_and_quarter_turn_points_right() {
        let axes = PolarAxes::default();
        let (x, y) = axes.to_cartesian(0.0, 10.0);
        assert!(close(x, 0.0) && close(y, 10.0));
        let (x, y) = axes.to_cartesian(FRAC_PI_2, 10.0);
        assert!(close(x, 10.0) && close(y, 0.0));
    }

    #[test]
    fn pixels_flip_the_y_axis() {
        let axes = PolarAxes::default();
        let (px, py) = axes.to_pixel(0.0, R_MAX, (500.0, 500.0), 300.0);
        assert!(close(px, 500.0) && close(py, 200.0));
        let (px, py) = axes.to_pixel(PI, 60.0, (500.0, 500.0), 300.0);
        assert!(close(px, 500.0) && close(py, 650.0));
    }

    #[test]
    fn upper_half_follows_the_angle() {
        assert!(close(upright_rotation(0.0), 0.0));
        assert!(close(upright_rotation(FRAC_PI_2), -90.0));
        assert!(close(upright_rotation(1.5 * PI), -270.0));
        assert!(close(upright_rotation(TAU * 0.9), -324.0));
    }

    #[test]
    fn lower_half_is_flipped() {
        assert!(close(upright_rotation(PI), 0.0));
        assert!(close(upright_rotation(TAU * 0.4), 36.0));
        assert!(close(upright_rotation(TAU * 0.6), -36.0));
    }

    #[test]
    fn place_label_is_centred_on_the_sector() {
        let placed = place_label(FRAC_PI_2, 116.0, "Support");
        assert_eq!(placed.text, "Support");
        assert!(close(placed.anchor.0, 116.0));
        assert!(close(placed.anchor.1, 0.0));
        assert!(close(placed.rotation_deg, -90.0));
        assert_eq!(placed.h_align, HAlign::Center);
        assert_eq!(placed.v_align, VAlign::Center);
    }

    #[test]
    fn sectors_cover_the_circle() {
        let angles = sector_angles(10);
        assert_eq!(angles.len(), 10);
        assert!(close(angles[0], 0.0));
        assert!(close(angles[5], PI));
        assert!(close(sector_width(10) * 10.0, TAU));
    }

    #[test]
    fn wedge_spans_bottom_to_top() {
        let pts = wedge_outline(0.0, 0.2, 10.0, 50.0, 4);
        assert_eq!(pts.len(), 10);
        assert!(close(pts[0].0, -0.1) && close(pts[0].1, 60.0));
        assert!(close(pts[4].0, 0.1) && close(pts[4].1, 60.0));
        assert!(close(pts[9].0, -0.1) && close(pts[9].1, 10.0));
    }
}
