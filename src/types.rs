use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub zones: ZoneConfig,
    pub speed: SpeedConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Minimum intersection-over-box-area ratio for a box to count as
    /// inside a zone. Valid range (0, 1].
    pub min_overlap_ratio: f64,
    /// Discard detections whose box fails the full-region inclusion test
    /// before zone classification.
    pub filter_inside: bool,
    /// Zone assigned when no zone reaches the overlap threshold. The
    /// original system hard-coded green here; kept as the default but made
    /// explicit. Pending product-owner confirmation that "assume far zone"
    /// is the intended behavior.
    pub fallback_zone: crate::lane_zones::ZoneLabel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedConfig {
    /// Pixels representing one meter of vertical distance at the image plane.
    pub pixels_per_meter: f64,
    /// Frames per second of the source video.
    pub fps: f64,
    /// Speed of the camera-bearing vehicle. The estimator measures relative
    /// closing speed from image displacement and offsets by this to get the
    /// observed vehicle's absolute speed.
    pub ego_speed_kmph: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            min_overlap_ratio: 0.05,
            filter_inside: true,
            fallback_zone: crate::lane_zones::ZoneLabel::Green,
        }
    }
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            pixels_per_meter: 8.0,
            fps: 30.0,
            ego_speed_kmph: 30.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zones: ZoneConfig::default(),
            speed: SpeedConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// One decoded video frame, as handed in by the host application.
#[derive(Debug, Clone)]
pub struct Frame {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub timestamp_ms: f64,
}

/// Axis-aligned box in pixel coordinates, `(x1, y1)` top-left,
/// `(x2, y2)` bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    pub fn area(&self) -> i64 {
        self.width().max(0) as i64 * self.height().max(0) as i64
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.x1 + self.x2) as f32 * 0.5,
            (self.y1 + self.y2) as f32 * 0.5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_area_and_center() {
        let b = BoundingBox::new(10, 20, 110, 70);
        assert_eq!(b.area(), 100 * 50);
        assert_eq!(b.center(), (60.0, 45.0));
    }

    #[test]
    fn test_inverted_bbox_has_zero_area() {
        let b = BoundingBox::new(100, 100, 50, 50);
        assert_eq!(b.area(), 0);
    }
}
