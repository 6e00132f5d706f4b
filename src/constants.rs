//! Global constants for the keypoint editor

use crate::color::Rgba;

/// Keypoint circle radius in screen pixels
pub const KEYPOINT_RADIUS: f32 = 6.0;

/// Stroke width as a fraction of the keypoint radius
pub const KEYPOINT_STROKE_RATIO: f32 = 0.4;

/// Stroke width multiplier for hovered or selected keypoints
pub const ACTIVE_STROKE_MULTIPLIER: f32 = 2.0;

/// Size of the occluded keypoint marker in screen pixels
pub const OCCLUDED_ICON_SIZE: f32 = 18.0;

/// Fill of an active keypoint and stroke of an inactive one
pub const KEYPOINT_CONTRAST_COLOR: Rgba = [0x24, 0x25, 0x28, 0xff];

/// Label text drawn on dark keypoint colors
pub const LABEL_TEXT_LIGHT: Rgba = [0xff, 0xff, 0xff, 0xff];

/// Fraction of the container a readonly template preview occupies
pub const DEFAULT_READONLY_SCALE_FACTOR: f32 = 0.8;

/// Maximum number of snapshots kept for undo
pub const DEFAULT_MAX_UNDO_HISTORY: usize = 100;

/// Users may zoom out to the fit-to-frame zoom divided by this
pub const ZOOM_OUT_DIVISOR: f32 = 2.0;

/// At maximum zoom this many image pixels span the larger screen dimension
pub const ZOOM_IN_VISIBLE_PIXELS: f32 = 25.0;

/// Zoom step for zoom in/out shortcuts
pub const ZOOM_FACTOR: f32 = 1.2;
