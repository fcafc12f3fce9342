// src/lib.rs
//
// Rear collision awareness core: perspective danger zones behind the ego
// vehicle, overlap-ratio risk classification for detected vehicles, and
// closing-speed estimation from tracked bbox displacement.
//
// Video capture, the detection model, and identity tracking are the host
// application's collaborators, consumed through the `Detector` and
// `Tracker` traits. Rendering is downstream: the core hands out polygons,
// labels, colors, and speed estimates.

pub mod config;
pub mod geometry;
pub mod lane_zones;
pub mod pipeline;
pub mod speed_estimation;
pub mod types;
pub mod vehicle_detection;
pub mod vehicle_tracking;
pub mod zone_classifier;

pub use geometry::{Point, Quad};
pub use lane_zones::{build_lane_zones, LaneZones, ZoneLabel};
pub use pipeline::{write_report, FrameAnalyzer, FrameReport, VehicleAnnotation};
pub use speed_estimation::SpeedEstimator;
pub use types::{BoundingBox, Config, Frame};
pub use vehicle_detection::{Detection, Detector, VehicleClass};
pub use vehicle_tracking::{TrackedVehicle, Tracker};
pub use zone_classifier::ZoneClassifier;
