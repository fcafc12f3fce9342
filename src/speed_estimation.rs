// src/speed_estimation.rs
//
// Closing-speed estimation from vertical bbox displacement.
//
// For each track we remember where its vertical center first appeared and
// where it is now; displacement over elapsed frames gives a relative
// speed, offset by the ego vehicle's own speed to yield the observed
// vehicle's absolute speed. The estimate always spans the entire observed
// history of the track (first-ever sample to most recent), so early
// estimates are noisy and later ones increasingly smoothed and stale.
// That is intrinsic to the formula, not a bug; a sliding-window variant
// would replace `TrackHistory` with a ring buffer.
//
// All state is scoped to one playback session: construct a fresh estimator
// when a new video starts and the frame counter and histories begin empty.

use std::collections::HashMap;
use tracing::debug;

use crate::types::SpeedConfig;

const MPS_TO_KMPH: f64 = 3.6;

/// Endpoint history for one track: the formula only ever reads the oldest
/// and newest samples, so those are all that is stored.
#[derive(Debug, Clone, Copy)]
struct TrackHistory {
    first: (u64, f64),
    last: (u64, f64),
    samples: usize,
}

pub struct SpeedEstimator {
    pixels_per_meter: f64,
    fps: f64,
    ego_speed_kmph: f64,
    histories: HashMap<u64, TrackHistory>,
    frame_index: u64,
}

impl SpeedEstimator {
    pub fn new(config: &SpeedConfig) -> Self {
        Self {
            pixels_per_meter: config.pixels_per_meter,
            fps: config.fps,
            ego_speed_kmph: config.ego_speed_kmph,
            histories: HashMap::new(),
            frame_index: 0,
        }
    }

    /// Record the track's vertical bbox extent for the current frame.
    pub fn update(&mut self, track_id: u64, y1: f64, y2: f64) {
        let center_y = (y1 + y2) / 2.0;
        let sample = (self.frame_index, center_y);

        self.histories
            .entry(track_id)
            .and_modify(|h| {
                h.last = sample;
                h.samples += 1;
            })
            .or_insert(TrackHistory {
                first: sample,
                last: sample,
                samples: 1,
            });
    }

    /// Speed estimate in km/h for the track, or `None` while there is not
    /// enough history (fewer than two samples, or no frames elapsed
    /// between the endpoints). Absent estimates are the normal steady
    /// state for newly seen tracks.
    pub fn compute_speed(&self, track_id: u64) -> Option<f64> {
        let history = self.histories.get(&track_id)?;
        if history.samples < 2 {
            return None;
        }

        let (first_frame, first_y) = history.first;
        let (last_frame, last_y) = history.last;

        let elapsed = (last_frame as f64 - first_frame as f64) / self.fps;
        if elapsed <= 0.0 {
            return None;
        }

        let displacement_m = (last_y - first_y) / self.pixels_per_meter;
        let speed_kmph = displacement_m / elapsed * MPS_TO_KMPH + self.ego_speed_kmph;
        let rounded = (speed_kmph * 100.0).round() / 100.0;

        debug!(
            "Track {}: {:.1}px over {} frames -> {:.2} km/h",
            track_id,
            last_y - first_y,
            last_frame - first_frame,
            rounded
        );
        Some(rounded)
    }

    /// Advance the session frame counter. Call exactly once per processed
    /// frame, after all `update` calls for that frame.
    pub fn next_frame(&mut self) {
        self.frame_index += 1;
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn tracked_count(&self) -> usize {
        self.histories.len()
    }
}
