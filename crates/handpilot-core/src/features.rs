//! Feature extraction from one hand's landmarks
//!
//! Pure functions of the landmark set and frame geometry; nothing here keeps state.

use crate::landmark::{HandFrame, HandLandmark};
use crate::layout::{KeyRect, KeyboardLayout, Zone, ZoneGrid};

/// Derived per-hand values for the current frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSnapshot {
    /// Index fingertip mapped into screen coordinates
    pub cursor: (f64, f64),
    /// Index fingertip in frame pixels
    pub fingertip: (f64, f64),
    /// Index finger extended upward (tip above its base joint)
    pub pointing: bool,
    /// Thumb tip to index tip, frame pixels
    pub thumb_index: f64,
    /// Thumb tip to middle tip, frame pixels
    pub thumb_middle: f64,
    /// Number of extended fingers (0-5)
    pub finger_count: u8,
    /// Typing zone under the index fingertip
    pub zone: Option<Zone>,
    /// Virtual key under the index fingertip
    pub hovered_key: Option<&'static str>,
}

/// Frame geometry plus the static partitions used for hit testing
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    screen: (u32, u32),
    zones: ZoneGrid,
}

impl FeatureExtractor {
    /// `screen` is the destination space for the cursor
    pub fn new(screen: (u32, u32)) -> Self {
        Self {
            screen,
            zones: ZoneGrid::thirds(),
        }
    }

    /// Derive the snapshot for one hand in a `frame` sized image
    pub fn extract(&self, hand: &HandFrame, frame: (u32, u32), keys: &[KeyRect]) -> FeatureSnapshot {
        let (frame_w, frame_h) = (frame.0 as f64, frame.1 as f64);
        let (screen_w, screen_h) = (self.screen.0 as f64, self.screen.1 as f64);

        let index_tip = hand.get(HandLandmark::IndexTip);
        let thumb_tip = hand.get(HandLandmark::ThumbTip);
        let middle_tip = hand.get(HandLandmark::MiddleTip);

        let cursor = (
            (index_tip.x as f64 * screen_w).trunc(),
            (index_tip.y as f64 * screen_h).trunc(),
        );
        let fingertip = (
            (index_tip.x as f64 * frame_w).trunc(),
            (index_tip.y as f64 * frame_h).trunc(),
        );

        FeatureSnapshot {
            cursor,
            fingertip,
            pointing: is_pointing(hand),
            thumb_index: thumb_tip.planar_distance(index_tip) * frame_w,
            thumb_middle: thumb_tip.planar_distance(middle_tip) * frame_w,
            finger_count: count_extended_fingers(hand),
            zone: self.zones.locate(index_tip.x, index_tip.y),
            hovered_key: KeyboardLayout::key_at(keys, fingertip.0, fingertip.1),
        }
    }
}

/// Index fingertip vertically above its knuckle
pub fn is_pointing(hand: &HandFrame) -> bool {
    hand.get(HandLandmark::IndexTip).y < hand.get(HandLandmark::IndexMcp).y
}

/// Thumb by horizontal tip/IP comparison, the other four by vertical tip/PIP comparison
pub fn count_extended_fingers(hand: &HandFrame) -> u8 {
    let thumb = hand.get(HandLandmark::ThumbTip).x > hand.get(HandLandmark::ThumbIp).x;
    let fingers = HandLandmark::finger_tip_pip_pairs()
        .iter()
        .filter(|(tip, pip)| hand.get(*tip).y < hand.get(*pip).y)
        .count() as u8;
    fingers + thumb as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fist at the given fingertip position: nothing extended
    fn fist(x: f32, y: f32) -> HandFrame {
        HandFrame::default()
            .with_point(HandLandmark::ThumbIp, x + 0.02, y)
            .with_point(HandLandmark::ThumbTip, x, y)
            .with_point(HandLandmark::IndexMcp, x, y - 0.05)
            .with_point(HandLandmark::IndexPip, x, y - 0.02)
            .with_point(HandLandmark::IndexTip, x, y)
            .with_point(HandLandmark::MiddlePip, x, y - 0.02)
            .with_point(HandLandmark::MiddleTip, x, y)
            .with_point(HandLandmark::RingPip, x, y - 0.02)
            .with_point(HandLandmark::RingTip, x, y)
            .with_point(HandLandmark::PinkyPip, x, y - 0.02)
            .with_point(HandLandmark::PinkyTip, x, y)
    }

    fn open_palm(x: f32, y: f32) -> HandFrame {
        HandFrame::default()
            .with_point(HandLandmark::ThumbIp, x - 0.04, y + 0.1)
            .with_point(HandLandmark::ThumbTip, x - 0.02, y + 0.1)
            .with_point(HandLandmark::IndexMcp, x, y + 0.15)
            .with_point(HandLandmark::IndexPip, x, y + 0.08)
            .with_point(HandLandmark::IndexTip, x, y)
            .with_point(HandLandmark::MiddlePip, x + 0.03, y + 0.08)
            .with_point(HandLandmark::MiddleTip, x + 0.03, y)
            .with_point(HandLandmark::RingPip, x + 0.06, y + 0.08)
            .with_point(HandLandmark::RingTip, x + 0.06, y)
            .with_point(HandLandmark::PinkyPip, x + 0.09, y + 0.08)
            .with_point(HandLandmark::PinkyTip, x + 0.09, y)
    }

    #[test]
    fn test_finger_count() {
        assert_eq!(count_extended_fingers(&fist(0.5, 0.5)), 0);
        assert_eq!(count_extended_fingers(&open_palm(0.5, 0.5)), 5);
    }

    #[test]
    fn test_pointing() {
        assert!(is_pointing(&open_palm(0.5, 0.5)));
        assert!(!is_pointing(&fist(0.5, 0.5)));
    }

    #[test]
    fn test_snapshot_geometry() {
        let extractor = FeatureExtractor::new((1920, 1080));
        let hand = HandFrame::default()
            .with_point(HandLandmark::IndexTip, 0.5, 0.25)
            .with_point(HandLandmark::IndexMcp, 0.5, 0.4)
            .with_point(HandLandmark::ThumbTip, 0.5, 0.3)
            .with_point(HandLandmark::MiddleTip, 0.6, 0.25);

        let snap = extractor.extract(&hand, (640, 480), &[]);
        assert_eq!(snap.cursor, (960.0, 270.0));
        assert_eq!(snap.fingertip, (320.0, 120.0));
        assert!(snap.pointing);
        assert!((snap.thumb_index - 0.05 * 640.0).abs() < 1e-3);
        assert_eq!(snap.zone.map(|z| z.name()), Some("top_center"));
        assert_eq!(snap.hovered_key, None);
    }

    #[test]
    fn test_hovered_key() {
        let extractor = FeatureExtractor::new((1920, 1080));
        let rects = KeyboardLayout::standard().key_rects(1280, 720);
        let space = rects.iter().find(|r| r.label == "Space").unwrap();
        let x = ((space.x1 + space.x2) as f32 / 2.0) / 1280.0;
        let y = ((space.y1 + space.y2) as f32 / 2.0) / 720.0;

        let snap = extractor.extract(&open_palm(x, y), (1280, 720), &rects);
        assert_eq!(snap.hovered_key, Some("Space"));
    }
}
