// src/vehicle_detection.rs
//
// Detection-side capability interface. The actual model (YOLO, whatever)
// lives in the host application; the core only consumes class-labeled
// boxes through the `Detector` trait.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::types::{BoundingBox, Frame};

/// COCO class IDs accepted as vehicles: car, motorcycle, bus, truck.
pub const VEHICLE_CLASS_IDS: [usize; 4] = [2, 3, 5, 7];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    Car,
    Motorcycle,
    Bus,
    Truck,
}

impl VehicleClass {
    /// Map a COCO class id to a vehicle class; `None` for non-vehicles.
    pub fn from_coco_id(class_id: usize) -> Option<Self> {
        match class_id {
            2 => Some(Self::Car),
            3 => Some(Self::Motorcycle),
            5 => Some(Self::Bus),
            7 => Some(Self::Truck),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Motorcycle => "motorcycle",
            Self::Bus => "bus",
            Self::Truck => "truck",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub confidence: f32,
    pub class: VehicleClass,
}

/// Produces class-labeled vehicle boxes for a frame. Implementations wrap
/// whatever model the application runs; the pipeline never sees model
/// details.
pub trait Detector {
    fn infer(&mut self, frame: &Frame) -> Result<Vec<Detection>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coco_vehicle_mapping() {
        assert_eq!(VehicleClass::from_coco_id(2), Some(VehicleClass::Car));
        assert_eq!(VehicleClass::from_coco_id(3), Some(VehicleClass::Motorcycle));
        assert_eq!(VehicleClass::from_coco_id(5), Some(VehicleClass::Bus));
        assert_eq!(VehicleClass::from_coco_id(7), Some(VehicleClass::Truck));
    }

    #[test]
    fn test_non_vehicle_classes_rejected() {
        // 0=person, 1=bicycle, 9=traffic light
        assert_eq!(VehicleClass::from_coco_id(0), None);
        assert_eq!(VehicleClass::from_coco_id(1), None);
        assert_eq!(VehicleClass::from_coco_id(9), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(VehicleClass::Truck.label(), "truck");
        assert_eq!(VehicleClass::Car.label(), "car");
    }
}
