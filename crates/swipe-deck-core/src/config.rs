//! Deck Configuration
//!
//! Tunables for thresholds, animation timing and stacking. Every field has a
//! default so partial JSON documents are accepted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a configuration document
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid deck config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Spring parameters for the reset animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Speed (px/s) under which the spring may come to rest
    pub rest_speed: f64,
    /// Distance (px) from target under which the spring may come to rest
    pub rest_displacement: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            rest_speed: 0.001,
            rest_displacement: 0.001,
        }
    }
}

/// Deck behaviour configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Fraction of viewport width a release must exceed to count as a swipe
    pub swipe_threshold_fraction: f64,
    /// Duration of the off-screen exit tween
    pub exit_duration_ms: f64,
    /// Horizontal offset (in viewport widths) at which rotation saturates
    pub rotation_range_fraction: f64,
    /// Rotation reached at the saturation offset
    pub max_rotation_deg: f64,
    /// Vertical step between stacked background cards
    pub stack_offset_px: f64,
    pub top_z_index: i32,
    pub background_z_index: i32,
    /// Request a layout transition whenever the top card changes
    pub layout_animation: bool,
    pub spring: SpringConfig,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_fraction: 0.25,
            exit_duration_ms: 250.0,
            rotation_range_fraction: 1.5,
            max_rotation_deg: 120.0,
            stack_offset_px: 10.0,
            top_z_index: 99,
            background_z_index: 5,
            layout_animation: true,
            spring: SpringConfig::default(),
        }
    }
}

impl DeckConfig {
    /// Parse a (possibly partial) JSON config document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
