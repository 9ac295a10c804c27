//! Virtual keyboard layout and per-frame key rectangles

/// A key in the static layout with its width in key units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeySpec {
    pub label: &'static str,
    pub units: f32,
}

const fn key(label: &'static str, units: f32) -> KeySpec {
    KeySpec { label, units }
}

/// Screen rectangle of one key, recomputed every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRect {
    pub label: &'static str,
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl KeyRect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x1 as f64 <= x && x <= self.x2 as f64 && self.y1 as f64 <= y && y <= self.y2 as f64
    }
}

const MARGIN: f64 = 10.0;
const ROW_GAP: f64 = 6.0;
const COL_GAP: f64 = 6.0;
/// Keyboard starts at this fraction of the frame height
const TOP_FRACTION: f64 = 0.55;
/// Floor for the width of one key unit when a row has no room left
const MIN_UNIT_WIDTH: f64 = 1.0;
const MIN_ROW_HEIGHT: f64 = 1.0;

/// Ordered rows of keys
#[derive(Debug, Clone)]
pub struct KeyboardLayout {
    rows: Vec<Vec<KeySpec>>,
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        Self::standard()
    }
}

impl KeyboardLayout {
    pub fn new(rows: Vec<Vec<KeySpec>>) -> Self {
        Self { rows }
    }

    /// US-style five row layout
    pub fn standard() -> Self {
        Self::new(vec![
            vec![
                key("`", 1.0),
                key("1", 1.0),
                key("2", 1.0),
                key("3", 1.0),
                key("4", 1.0),
                key("5", 1.0),
                key("6", 1.0),
                key("7", 1.0),
                key("8", 1.0),
                key("9", 1.0),
                key("0", 1.0),
                key("-", 1.0),
                key("=", 1.0),
                key("Backspace", 2.0),
            ],
            vec![
                key("Tab", 1.5),
                key("Q", 1.0),
                key("W", 1.0),
                key("E", 1.0),
                key("R", 1.0),
                key("T", 1.0),
                key("Y", 1.0),
                key("U", 1.0),
                key("I", 1.0),
                key("O", 1.0),
                key("P", 1.0),
                key("[", 1.0),
                key("]", 1.0),
                key("\\", 1.5),
            ],
            vec![
                key("Caps", 1.75),
                key("A", 1.0),
                key("S", 1.0),
                key("D", 1.0),
                key("F", 1.0),
                key("G", 1.0),
                key("H", 1.0),
                key("J", 1.0),
                key("K", 1.0),
                key("L", 1.0),
                key(";", 1.0),
                key("'", 1.0),
                key("Enter", 2.0),
            ],
            vec![
                key("Shift", 2.25),
                key("Z", 1.0),
                key("X", 1.0),
                key("C", 1.0),
                key("V", 1.0),
                key("B", 1.0),
                key("N", 1.0),
                key("M", 1.0),
                key(",", 1.0),
                key(".", 1.0),
                key("/", 1.0),
                key("Shift", 2.25),
            ],
            vec![
                key("Ctrl", 1.25),
                key("Win", 1.25),
                key("Alt", 1.25),
                key("Space", 6.0),
                key("Alt", 1.25),
                key("Menu", 1.25),
                key("Ctrl", 1.25),
            ],
        ])
    }

    pub fn rows(&self) -> &[Vec<KeySpec>] {
        &self.rows
    }

    /// Lay the keyboard out over the lower part of a `width` x `height` frame.
    pub fn key_rects(&self, width: u32, height: u32) -> Vec<KeyRect> {
        if self.rows.is_empty() {
            return Vec::new();
        }

        let w = width as f64;
        let h = height as f64;
        let top = (h * TOP_FRACTION).trunc();
        let bottom = h - MARGIN;
        let row_count = self.rows.len() as f64;
        let available_h = (bottom - top) - ROW_GAP * (row_count + 1.0);
        let row_h = (available_h / row_count).trunc().max(MIN_ROW_HEIGHT);

        let mut rects = Vec::with_capacity(self.rows.iter().map(Vec::len).sum());
        let mut y = top + ROW_GAP;
        for row in &self.rows {
            let total_units: f64 = row.iter().map(|k| k.units as f64).sum();
            let available_w = w - 2.0 * MARGIN - COL_GAP * (row.len() as f64 + 1.0);
            let unit_w = if total_units > 0.0 {
                (available_w / total_units).max(MIN_UNIT_WIDTH)
            } else {
                MIN_UNIT_WIDTH
            };

            let mut x = MARGIN + COL_GAP;
            for key in row {
                let key_w = (key.units as f64 * unit_w).trunc();
                rects.push(KeyRect {
                    label: key.label,
                    x1: x as i32,
                    y1: y as i32,
                    x2: (x + key_w) as i32,
                    y2: (y + row_h) as i32,
                });
                x += key_w + COL_GAP;
            }
            y += row_h + ROW_GAP;
        }
        rects
    }

    /// Label of the first key whose rectangle contains the point
    pub fn key_at(rects: &[KeyRect], x: f64, y: f64) -> Option<&'static str> {
        rects.iter().find(|r| r.contains(x, y)).map(|r| r.label)
    }
}
