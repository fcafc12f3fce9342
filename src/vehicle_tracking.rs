// src/vehicle_tracking.rs
//
// Tracking-side capability interface. Identity association (IoU matching,
// DeepSORT, ...) is the host application's concern; the core consumes
// stable ids and the tracker's own confirmed lifecycle gate.

use anyhow::Result;

use crate::types::{BoundingBox, Frame};
use crate::vehicle_detection::Detection;

/// One tracked vehicle for the current frame. `id` is stable across frames
/// within a session and opaque to this crate. `confirmed` is the tracker's
/// lifecycle gate (tentative tracks have not yet earned trust); only
/// confirmed tracks feed speed estimation.
#[derive(Debug, Clone, Copy)]
pub struct TrackedVehicle {
    pub id: u64,
    pub bbox: BoundingBox,
    pub confirmed: bool,
}

/// Assigns persistent identities to per-frame detections.
pub trait Tracker {
    fn update(&mut self, detections: &[Detection], frame: &Frame) -> Result<Vec<TrackedVehicle>>;
}
