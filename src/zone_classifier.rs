// src/zone_classifier.rs
//
// Overlap-ratio zone membership with fixed priority resolution.
//
// A box belongs to the highest-priority zone covering at least
// `min_overlap_ratio` of the box's own area. Red and yellow overlap
// geometrically near the frame bottom; the priority order (red, yellow,
// green, first match wins) resolves that to a single label.

use tracing::debug;

use crate::geometry::{overlap_ratio, Quad};
use crate::lane_zones::{LaneZones, ZoneLabel};
use crate::types::{BoundingBox, ZoneConfig};

#[derive(Debug, Clone)]
pub struct ZoneClassifier {
    min_overlap_ratio: f64,
    fallback_zone: ZoneLabel,
}

impl ZoneClassifier {
    pub fn new(config: &ZoneConfig) -> Self {
        Self {
            min_overlap_ratio: config.min_overlap_ratio,
            fallback_zone: config.fallback_zone,
        }
    }

    /// Inclusion pre-filter: does the box overlap the coarse full-region
    /// polygon at all? Applied before zone classification to discard
    /// detections that are not relevant to the lane.
    pub fn is_in_lane(&self, bbox: &BoundingBox, zones: &LaneZones) -> bool {
        let poly = Quad::from_bbox(bbox);
        overlap_ratio(&poly, &zones.full_region) >= self.min_overlap_ratio
    }

    /// First zone, in red > yellow > green order, covering at least the
    /// threshold fraction of the box. `None` when no zone qualifies; a
    /// degenerate box never qualifies anywhere.
    pub fn classify(&self, bbox: &BoundingBox, zones: &LaneZones) -> Option<ZoneLabel> {
        let poly = Quad::from_bbox(bbox);

        for (label, zone) in zones.by_priority() {
            let ratio = overlap_ratio(&poly, zone);
            if ratio >= self.min_overlap_ratio {
                debug!(
                    "Box ({},{})-({},{}) -> {} (overlap {:.3})",
                    bbox.x1,
                    bbox.y1,
                    bbox.x2,
                    bbox.y2,
                    label.as_str(),
                    ratio
                );
                return Some(label);
            }
        }
        None
    }

    /// `classify`, falling back to the configured zone when nothing
    /// qualifies (the original system assumed green here).
    pub fn classify_or_default(&self, bbox: &BoundingBox, zones: &LaneZones) -> ZoneLabel {
        self.classify(bbox, zones).unwrap_or(self.fallback_zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lane_zones::build_lane_zones;
    use crate::types::ZoneConfig;

    fn classifier() -> ZoneClassifier {
        ZoneClassifier::new(&ZoneConfig::default())
    }

    // 760x480 reference zones: yellow top edge (273..487) at y=374, base
    // (190..570) at y=479; green y 301..374; red (266..494) y 467..479.
    fn zones() -> LaneZones {
        build_lane_zones(760, 480).unwrap()
    }

    #[test]
    fn test_box_in_red_and_yellow_classifies_red() {
        // Sits over the red strip, which itself lies inside the yellow base.
        let bbox = BoundingBox::new(300, 460, 450, 479);
        let c = classifier();
        let z = zones();
        let poly = Quad::from_bbox(&bbox);
        assert!(overlap_ratio(&poly, &z.red) >= 0.05);
        assert!(overlap_ratio(&poly, &z.yellow) >= 0.05);
        assert_eq!(c.classify(&bbox, &z), Some(ZoneLabel::Red));
    }

    #[test]
    fn test_box_in_yellow_only() {
        let bbox = BoundingBox::new(300, 380, 450, 440);
        assert_eq!(classifier().classify(&bbox, &zones()), Some(ZoneLabel::Yellow));
    }

    #[test]
    fn test_box_in_green_only() {
        let bbox = BoundingBox::new(340, 310, 420, 360);
        assert_eq!(classifier().classify(&bbox, &zones()), Some(ZoneLabel::Green));
    }

    #[test]
    fn test_box_outside_all_zones() {
        let bbox = BoundingBox::new(0, 0, 60, 60);
        let c = classifier();
        let z = zones();
        assert_eq!(c.classify(&bbox, &z), None);
        assert_eq!(c.classify_or_default(&bbox, &z), ZoneLabel::Green);
        assert!(!c.is_in_lane(&bbox, &z));
    }

    #[test]
    fn test_configurable_fallback() {
        let config = ZoneConfig {
            fallback_zone: ZoneLabel::Yellow,
            ..ZoneConfig::default()
        };
        let c = ZoneClassifier::new(&config);
        let bbox = BoundingBox::new(0, 0, 60, 60);
        assert_eq!(c.classify_or_default(&bbox, &zones()), ZoneLabel::Yellow);
    }

    #[test]
    fn test_degenerate_box_matches_nothing() {
        let bbox = BoundingBox::new(300, 400, 300, 479);
        let c = classifier();
        let z = zones();
        assert_eq!(c.classify(&bbox, &z), None);
        assert!(!c.is_in_lane(&bbox, &z));
    }

    #[test]
    fn test_inclusion_prefilter_uses_green_region() {
        // A box deep in the yellow base but clear of the green polygon
        // fails the coarse inclusion test even though it classifies yellow.
        let c = classifier();
        let z = zones();
        let bbox = BoundingBox::new(195, 460, 250, 479);
        assert_eq!(c.classify(&bbox, &z), Some(ZoneLabel::Yellow));
        assert!(!c.is_in_lane(&bbox, &z));
    }

    #[test]
    fn test_monotonic_overlap_under_enlargement() {
        let z = zones();
        let small = BoundingBox::new(350, 380, 400, 420);
        let large = BoundingBox::new(340, 376, 420, 440);
        let r_small = overlap_ratio(&Quad::from_bbox(&small), &z.yellow);
        let r_large_area = {
            let poly = Quad::from_bbox(&large);
            crate::geometry::intersection_area(&poly, &z.yellow)
        };
        let r_small_area = {
            let poly = Quad::from_bbox(&small);
            crate::geometry::intersection_area(&poly, &z.yellow)
        };
        // Enlarging a box strictly containing the previous one can only
        // grow the intersection area.
        assert!(r_large_area >= r_small_area);
        assert!(r_small > 0.0);
    }

    #[test]
    fn test_threshold_boundary_inclusive() {
        // A box with exactly the threshold ratio must match (>=, not >).
        let config = ZoneConfig {
            min_overlap_ratio: 0.5,
            ..ZoneConfig::default()
        };
        let c = ZoneClassifier::new(&config);
        let z = zones();
        // Half inside the red strip: red spans x 266..494, y 467..479.
        // Box y 455..479, height 24, exactly half (12 rows) inside.
        let bbox = BoundingBox::new(300, 455, 400, 479);
        let ratio = overlap_ratio(&Quad::from_bbox(&bbox), &z.red);
        assert!((ratio - 0.5).abs() < 1e-9, "ratio={ratio}");
        assert_eq!(c.classify(&bbox, &z), Some(ZoneLabel::Red));
    }
}
