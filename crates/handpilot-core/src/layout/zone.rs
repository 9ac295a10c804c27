//! Typing zones over normalized image space

/// One cell of the zone grid, numbered row-major from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Zone(u8);

const ZONE_NAMES: [&str; 9] = [
    "top_left",
    "top_center",
    "top_right",
    "mid_left",
    "mid_center",
    "mid_right",
    "bot_left",
    "bot_center",
    "bot_right",
];

impl Zone {
    pub fn new(index: u8) -> Option<Self> {
        ((index as usize) < ZONE_NAMES.len()).then_some(Self(index))
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Zones in the top row are reserved for the open-palm backspace
    pub fn is_top_row(&self) -> bool {
        self.0 < 3
    }

    pub fn name(&self) -> &'static str {
        ZONE_NAMES[self.index()]
    }
}

/// Rectangle in normalized coordinates, edges inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
struct ZoneBounds {
    x_min: f32,
    x_max: f32,
    y_min: f32,
    y_max: f32,
}

impl ZoneBounds {
    fn contains(&self, x: f32, y: f32) -> bool {
        self.x_min <= x && x <= self.x_max && self.y_min <= y && y <= self.y_max
    }
}

/// A 3x3 partition of the normalized image.
#[derive(Debug, Clone)]
pub struct ZoneGrid {
    cells: Vec<ZoneBounds>,
}

impl Default for ZoneGrid {
    fn default() -> Self {
        Self::thirds()
    }
}

impl ZoneGrid {
    /// Grid with boundaries at 0.33 and 0.66 on both axes
    pub fn thirds() -> Self {
        const EDGES: [f32; 4] = [0.0, 0.33, 0.66, 1.0];
        let mut cells = Vec::with_capacity(9);
        for row in 0..3 {
            for col in 0..3 {
                cells.push(ZoneBounds {
                    x_min: EDGES[col],
                    x_max: EDGES[col + 1],
                    y_min: EDGES[row],
                    y_max: EDGES[row + 1],
                });
            }
        }
        Self { cells }
    }

    /// First zone containing the point, if any
    pub fn locate(&self, x: f32, y: f32) -> Option<Zone> {
        self.cells
            .iter()
            .position(|cell| cell.contains(x, y))
            .and_then(|i| Zone::new(i as u8))
    }
}
