// src/lane_zones.rs
//
// Perspective danger-zone construction for the rear camera view.
//
// Three stacked trapezoids approximate the lane receding behind the
// vehicle:
//
//   ┌─────────────────────────────────────┐
//   │                                     │
//   │          ┌───GREEN (far)───┐        │
//   │        ┌─┴─YELLOW (mid)────┴─┐      │
//   │       ┌┴───┬──RED (near)─┬───┴┐     │
//   └───────┴────┴─────────────┴────┴─────┘
//
// The yellow zone's sides are pushed outward relative to a naive linear
// taper so the lane converges less sharply; the green zone narrows twice
// as fast with distance. The red zone is an independent strip hugging the
// frame bottom and may overlap the yellow zone's base; classification
// resolves the overlap by priority, never geometry.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::{Point, Quad};

// Fractions of frame width/height defining the zones. Carried unchanged
// from the calibrated original overlay.
const BAND_TOP_RATIO: f32 = 0.6;
const YELLOW_HEIGHT_RATIO: f32 = 0.55;
const YELLOW_BASE_LEFT: f32 = 0.25;
const YELLOW_BASE_RIGHT: f32 = 0.75;
const YELLOW_TOP_LEFT: f32 = 0.40;
const YELLOW_TOP_RIGHT: f32 = 0.60;
const SLOPE_DECREASE_RATIO: f32 = 0.165;
const GREEN_HEIGHT_FACTOR: f32 = 0.5 * 1.4;
const GREEN_SLOPE_INCREASE: i32 = 2;
const RED_BASE_LEFT: f32 = 0.35;
const RED_BASE_RIGHT: f32 = 0.65;
const RED_HEIGHT_RATIO: f32 = 0.15 * 0.25 * 0.95 * 0.75;

/// Risk zone label. Priority for classification is fixed red > yellow >
/// green, independent of polygon shape or area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneLabel {
    Green,
    Yellow,
    Red,
}

impl ZoneLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }

    /// Higher value wins during classification.
    pub fn priority(&self) -> u8 {
        match self {
            Self::Red => 2,
            Self::Yellow => 1,
            Self::Green => 0,
        }
    }

    /// Overlay color in BGR, for the downstream renderer.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Green => (0, 255, 0),
            Self::Yellow => (0, 255, 255),
            Self::Red => (0, 0, 255),
        }
    }
}

/// Blend weights and stroke width the renderer is expected to use for the
/// translucent zone fill over the original frame.
pub mod style {
    pub const ZONE_FILL_WEIGHT: f64 = 0.3;
    pub const FRAME_WEIGHT: f64 = 0.7;
    pub const OUTLINE_THICKNESS: i32 = 2;
}

/// The zone set for one frame size. Recomputed deterministically from the
/// dimensions; carries no identity and is never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneZones {
    /// Coarse "is this detection anywhere in the lane" pre-filter. Equal to
    /// the green polygon, not the union of all three zones; good enough for
    /// discarding off-lane detections cheaply, not an accurate lane boundary.
    pub full_region: Quad,
    pub green: Quad,
    pub yellow: Quad,
    pub red: Quad,
}

impl LaneZones {
    /// Zones in classification priority order.
    pub fn by_priority(&self) -> [(ZoneLabel, &Quad); 3] {
        [
            (ZoneLabel::Red, &self.red),
            (ZoneLabel::Yellow, &self.yellow),
            (ZoneLabel::Green, &self.green),
        ]
    }
}

/// Build the zone set for a frame of the given dimensions. Pure and
/// deterministic; fails only for non-positive dimensions.
pub fn build_lane_zones(width: i32, height: i32) -> Result<LaneZones> {
    ensure!(
        width > 0 && height > 0,
        "invalid frame dimensions {}x{}",
        width,
        height
    );

    let w = width as f32;
    let h = height as f32;
    let frame_bottom = height - 1;

    // Yellow zone: wide base, top edge pushed outward relative to a naive
    // linear taper so the perspective converges less sharply.
    let band_top = (h * BAND_TOP_RATIO) as i32;
    let yellow_height = ((frame_bottom - band_top) as f32 * YELLOW_HEIGHT_RATIO) as i32;
    let yellow_top = frame_bottom - yellow_height;

    let base_left = (w * YELLOW_BASE_LEFT) as i32;
    let base_right = (w * YELLOW_BASE_RIGHT) as i32;
    let naive_top_left = (w * YELLOW_TOP_LEFT) as i32;
    let naive_top_right = (w * YELLOW_TOP_RIGHT) as i32;

    let base_width = base_right - base_left;
    let outward = (base_width as f32 * SLOPE_DECREASE_RATIO / 2.0) as i32;

    let yellow_top_left = (naive_top_left - outward).max(base_left);
    let yellow_top_right = (naive_top_right + outward).min(base_right);

    let yellow = Quad::new([
        Point::new(yellow_top_left, yellow_top),
        Point::new(yellow_top_right, yellow_top),
        Point::new(base_right, frame_bottom),
        Point::new(base_left, frame_bottom),
    ]);

    // Green zone: stacked directly on the yellow top edge, narrowing twice
    // as fast toward the horizon.
    let green_height = (yellow_height as f32 * GREEN_HEIGHT_FACTOR) as i32;
    let green_bottom = yellow_top;
    let green_top = green_bottom - green_height;
    let inward = outward * GREEN_SLOPE_INCREASE;

    let green = Quad::new([
        Point::new(yellow_top_left + inward, green_top),
        Point::new(yellow_top_right - inward, green_top),
        Point::new(yellow_top_right, green_bottom),
        Point::new(yellow_top_left, green_bottom),
    ]);

    // Red zone: independent narrow strip at the very bottom. Not nested in
    // the others; it may overlap the yellow base.
    let red_height = (h * RED_HEIGHT_RATIO) as i32;
    let red_top = frame_bottom - red_height;
    let red_left = (w * RED_BASE_LEFT) as i32;
    let red_right = (w * RED_BASE_RIGHT) as i32;

    let red = Quad::new([
        Point::new(red_left, red_top),
        Point::new(red_right, red_top),
        Point::new(red_right, frame_bottom),
        Point::new(red_left, frame_bottom),
    ]);

    debug!(
        "Lane zones for {}x{}: yellow y {}..{}, green y {}..{}, red y {}..{}",
        width, height, yellow_top, frame_bottom, green_top, green_bottom, red_top, frame_bottom
    );

    Ok(LaneZones {
        full_region: green,
        green,
        yellow,
        red,
    })
}
