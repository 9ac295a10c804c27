//! Hand landmark types supplied by the external detector

use serde::{Deserialize, Serialize};

/// Named points of the hand skeleton, in detector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// Number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

impl HandLandmark {
    /// Array index (0-20).
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wrist => "WRIST",
            Self::ThumbCmc => "THUMB_CMC",
            Self::ThumbMcp => "THUMB_MCP",
            Self::ThumbIp => "THUMB_IP",
            Self::ThumbTip => "THUMB_TIP",
            Self::IndexMcp => "INDEX_MCP",
            Self::IndexPip => "INDEX_PIP",
            Self::IndexDip => "INDEX_DIP",
            Self::IndexTip => "INDEX_TIP",
            Self::MiddleMcp => "MIDDLE_MCP",
            Self::MiddlePip => "MIDDLE_PIP",
            Self::MiddleDip => "MIDDLE_DIP",
            Self::MiddleTip => "MIDDLE_TIP",
            Self::RingMcp => "RING_MCP",
            Self::RingPip => "RING_PIP",
            Self::RingDip => "RING_DIP",
            Self::RingTip => "RING_TIP",
            Self::PinkyMcp => "PINKY_MCP",
            Self::PinkyPip => "PINKY_PIP",
            Self::PinkyDip => "PINKY_DIP",
            Self::PinkyTip => "PINKY_TIP",
        }
    }

    /// Tip and PIP joint pairs of the four non-thumb fingers.
    pub fn finger_tip_pip_pairs() -> [(HandLandmark, HandLandmark); 4] {
        [
            (Self::IndexTip, Self::IndexPip),
            (Self::MiddleTip, Self::MiddlePip),
            (Self::RingTip, Self::RingPip),
            (Self::PinkyTip, Self::PinkyPip),
        ]
    }
}

/// A single landmark in normalized image coordinates (0.0 - 1.0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Euclidean distance in the image plane (z ignored).
    pub fn planar_distance(&self, other: &Landmark) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One tracked hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandFrame {
    pub landmarks: [Landmark; LANDMARK_COUNT],
    /// "Left" or "Right" as reported by the detector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handedness: Option<String>,
}

impl Default for HandFrame {
    fn default() -> Self {
        Self {
            landmarks: [Landmark::default(); LANDMARK_COUNT],
            handedness: None,
        }
    }
}

impl HandFrame {
    pub fn get(&self, landmark: HandLandmark) -> &Landmark {
        &self.landmarks[landmark.index()]
    }

    /// Set a single landmark position
    pub fn with_point(mut self, landmark: HandLandmark, x: f32, y: f32) -> Self {
        self.landmarks[landmark.index()] = Landmark::new(x, y);
        self
    }
}

/// All hands detected in one camera frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    /// Capture time in seconds, when the source records one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    #[serde(default)]
    pub hands: Vec<HandFrame>,
}

impl LandmarkFrame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            timestamp: None,
            width,
            height,
            hands: Vec::new(),
        }
    }

    pub fn with_hand(mut self, hand: HandFrame) -> Self {
        self.hands.push(hand);
        self
    }

    pub fn with_timestamp(mut self, seconds: f64) -> Self {
        self.timestamp = Some(seconds);
        self
    }

    /// The primary tracked hand (first detected).
    pub fn primary(&self) -> Option<&HandFrame> {
        self.hands.first()
    }
}
