//! Geometry primitives

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A pointer position in viewport pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Translation of the top card relative to its resting place
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation, `t` in `[0, 1]`
    pub fn lerp(self, to: Offset, t: f64) -> Offset {
        self + (to - self) * t
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Add for Offset {
    type Output = Offset;
    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Offset {
    type Output = Offset;
    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Offset {
    type Output = Offset;
    fn mul(self, rhs: f64) -> Offset {
        Offset::new(self.x * rhs, self.y * rhs)
    }
}

impl Sub for Point {
    type Output = Offset;
    fn sub(self, rhs: Point) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Viewport size, captured once when the deck is created
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
