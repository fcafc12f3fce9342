// src/pipeline.rs
//
// Per-frame orchestration: zones -> inclusion filter -> zone
// classification -> tracking -> speed estimation.
//
// One `FrameAnalyzer` per playback session, driven by a single caller in
// strictly increasing frame order. Session reset is "build a new one":
// the frame counter and all track histories start empty, so identities
// reused by the tracker in a new video can never mix with stale samples.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info};

use crate::lane_zones::{build_lane_zones, LaneZones, ZoneLabel};
use crate::speed_estimation::SpeedEstimator;
use crate::types::{BoundingBox, Config, Frame};
use crate::vehicle_detection::{Detection, Detector, VehicleClass};
use crate::vehicle_tracking::Tracker;
use crate::zone_classifier::ZoneClassifier;

/// Everything a downstream renderer needs for one vehicle: the box, its
/// zone (colors via `ZoneLabel::color`), and the speed estimate once
/// enough history exists.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleAnnotation {
    pub track_id: u64,
    pub bbox: BoundingBox,
    pub class: Option<VehicleClass>,
    pub zone: ZoneLabel,
    pub speed_kmph: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub frame_index: u64,
    pub timestamp_ms: f64,
    pub zones: LaneZones,
    pub vehicles: Vec<VehicleAnnotation>,
}

pub struct FrameAnalyzer<D: Detector, T: Tracker> {
    detector: D,
    tracker: T,
    classifier: ZoneClassifier,
    speed: SpeedEstimator,
    filter_inside: bool,
    // Zones are pure in the frame dimensions; rebuilding every frame is
    // harmless but wasteful, so the last result is cached.
    zone_cache: Option<((i32, i32), LaneZones)>,
}

impl<D: Detector, T: Tracker> FrameAnalyzer<D, T> {
    pub fn new(config: &Config, detector: D, tracker: T) -> Result<Self> {
        config.validate()?;
        info!(
            "Frame analyzer ready: min_overlap={:.2}, filter_inside={}, fallback={}",
            config.zones.min_overlap_ratio,
            config.zones.filter_inside,
            config.zones.fallback_zone.as_str()
        );
        Ok(Self {
            detector,
            tracker,
            classifier: ZoneClassifier::new(&config.zones),
            speed: SpeedEstimator::new(&config.speed),
            filter_inside: config.zones.filter_inside,
            zone_cache: None,
        })
    }

    /// Process one frame. Fatal only for degenerate frame dimensions;
    /// per-vehicle edge cases (degenerate boxes, short histories) degrade
    /// to "no zone match" / "no estimate" and the pipeline keeps moving.
    pub fn process_frame(&mut self, frame: &Frame) -> Result<FrameReport> {
        let zones = self.zones_for(frame.width as i32, frame.height as i32)?;

        let detections = self.detector.infer(frame)?;
        let accepted: Vec<Detection> = if self.filter_inside {
            detections
                .into_iter()
                .filter(|d| self.classifier.is_in_lane(&d.bbox, &zones))
                .collect()
        } else {
            detections
        };

        let tracks = self.tracker.update(&accepted, frame)?;

        let mut vehicles = Vec::new();
        for track in tracks.iter().filter(|t| t.confirmed) {
            self.speed
                .update(track.id, track.bbox.y1 as f64, track.bbox.y2 as f64);
            let speed_kmph = self.speed.compute_speed(track.id);
            let zone = self.classifier.classify_or_default(&track.bbox, &zones);
            let class = accepted
                .iter()
                .find(|d| d.bbox == track.bbox)
                .map(|d| d.class);

            vehicles.push(VehicleAnnotation {
                track_id: track.id,
                bbox: track.bbox,
                class,
                zone,
                speed_kmph,
            });
        }

        let frame_index = self.speed.frame_index();
        self.speed.next_frame();

        debug!(
            "Frame {}: {} accepted detection(s), {} confirmed track(s)",
            frame_index,
            accepted.len(),
            vehicles.len()
        );

        Ok(FrameReport {
            frame_index,
            timestamp_ms: frame.timestamp_ms,
            zones,
            vehicles,
        })
    }

    fn zones_for(&mut self, width: i32, height: i32) -> Result<LaneZones> {
        if let Some(((w, h), zones)) = self.zone_cache {
            if w == width && h == height {
                return Ok(zones);
            }
        }
        let zones = build_lane_zones(width, height)?;
        self.zone_cache = Some(((width, height), zones));
        Ok(zones)
    }
}

/// Append one report as a JSON line, for offline review of a session.
pub fn write_report(report: &FrameReport, out: &mut impl Write) -> Result<()> {
    let json_line = serde_json::to_string(report)?;
    writeln!(out, "{}", json_line)?;
    Ok(())
}
