//! Bounded record of recently typed text

use std::collections::VecDeque;

/// Last N characters sent to the OS, oldest dropped first
#[derive(Debug, Clone)]
pub struct PreviewBuffer {
    chars: VecDeque<char>,
    capacity: usize,
}

impl Default for PreviewBuffer {
    fn default() -> Self {
        Self::new(60)
    }
}

impl PreviewBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            chars: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, c: char) {
        if self.capacity == 0 {
            return;
        }
        if self.chars.len() == self.capacity {
            self.chars.pop_front();
        }
        self.chars.push_back(c);
    }

    pub fn pop(&mut self) -> Option<char> {
        self.chars.pop_back()
    }

    pub fn clear(&mut self) {
        self.chars.clear();
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }
}
