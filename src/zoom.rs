//! Zoom and pan composition.
//!
//! This module maps between graph (image) coordinates and screen
//! coordinates, fits a target rectangle to the screen, and keeps
//! interactive zoom inside the allowed bounds.

use crate::constants::{ZOOM_FACTOR, ZOOM_IN_VISIBLE_PIXELS, ZOOM_OUT_DIVISOR};
use crate::geometry::{Point, RegionOfInterest};

/// Represents pan/zoom transform state.
///
/// `screen = graph * zoom + translation`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    pub zoom: f32,
    pub translation: Point,
}

impl ZoomState {
    /// Create a new transform with the given zoom and translation.
    pub fn new(zoom: f32, x: f32, y: f32) -> Self {
        Self {
            zoom,
            translation: Point::new(x, y),
        }
    }

    /// Create an identity transform (zoom=1, no translation).
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Convert a screen point to graph coordinates.
    pub fn screen_to_graph(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.translation.x) / self.zoom,
            (screen.y - self.translation.y) / self.zoom,
        )
    }

    /// Convert a graph point to screen coordinates.
    pub fn graph_to_screen(&self, graph: Point) -> Point {
        Point::new(
            graph.x * self.zoom + self.translation.x,
            graph.y * self.zoom + self.translation.y,
        )
    }

    /// Calculate zoom-to-cursor transformation.
    ///
    /// Keeps the graph point under the cursor fixed while zooming.
    pub fn zoom_to_cursor(&self, new_zoom: f32, cursor: Point) -> ZoomState {
        // Graph point under cursor (before zoom)
        let graph = self.screen_to_graph(cursor);

        // New translation keeps that point under the cursor
        ZoomState::new(
            new_zoom,
            cursor.x - graph.x * new_zoom,
            cursor.y - graph.y * new_zoom,
        )
    }

    /// Apply a pan delta to the transform.
    pub fn pan_by(&self, dx: f32, dy: f32) -> ZoomState {
        ZoomState::new(self.zoom, self.translation.x + dx, self.translation.y + dy)
    }
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::identity()
    }
}

/// Transform that makes `target` exactly fill `screen`, aspect preserved and
/// centered along the slack dimension.
pub fn fit_to_frame(screen: (f32, f32), target: &RegionOfInterest) -> ZoomState {
    let (width, height) = screen;
    if !target.is_valid() {
        return ZoomState::identity();
    }

    let scale = (width / target.width).min(height / target.height);
    ZoomState::new(
        scale,
        (width - target.width * scale) / 2.0 - target.x * scale,
        (height - target.height * scale) / 2.0 - target.y * scale,
    )
}

/// Zoom state of one annotation session.
#[derive(Debug, Clone, Default)]
pub struct ZoomController {
    screen_size: Option<(f32, f32)>,
    target: Option<RegionOfInterest>,
    initial: ZoomState,
    state: ZoomState,
}

impl ZoomController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current transform.
    pub fn state(&self) -> ZoomState {
        self.state
    }

    /// Fit-to-frame transform for the current target and screen.
    pub fn initial_state(&self) -> ZoomState {
        self.initial
    }

    pub fn target(&self) -> Option<&RegionOfInterest> {
        self.target.as_ref()
    }

    /// Update the available screen size, refitting the target.
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.screen_size = Some((width, height));
        self.refit();
    }

    /// Switch the rectangle to fit (e.g. another media item), refitting.
    pub fn set_target(&mut self, target: Option<RegionOfInterest>) {
        self.target = target;
        self.refit();
    }

    /// Allowed zoom range.
    ///
    /// Users may zoom out to half the fit-to-frame zoom (never above 1) and
    /// zoom in until 25 image pixels span the larger screen dimension.
    pub fn zoom_bounds(&self) -> (f32, f32) {
        let min = (self.initial.zoom / ZOOM_OUT_DIVISOR).min(1.0);
        let largest = self
            .screen_size
            .map(|(w, h)| w.max(h))
            .unwrap_or(1.0);
        let max = (largest / ZOOM_IN_VISIBLE_PIXELS).round();
        (min, max.max(min))
    }

    /// Zoom to `new_zoom` (clamped) around a screen-space cursor.
    pub fn zoom_at(&mut self, new_zoom: f32, cursor: Point) {
        let (min, max) = self.zoom_bounds();
        self.state = self.state.zoom_to_cursor(new_zoom.clamp(min, max), cursor);
    }

    /// Zoom in by the standard factor around the cursor.
    pub fn zoom_in(&mut self, cursor: Point) {
        self.zoom_at(self.state.zoom * ZOOM_FACTOR, cursor);
    }

    /// Zoom out by the standard factor around the cursor.
    pub fn zoom_out(&mut self, cursor: Point) {
        self.zoom_at(self.state.zoom / ZOOM_FACTOR, cursor);
    }

    /// Pan by a screen-space delta.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.state = self.state.pan_by(dx, dy);
    }

    /// Return to the fit-to-frame transform.
    pub fn reset(&mut self) {
        self.state = self.initial;
    }

    pub fn screen_to_graph(&self, screen: Point) -> Point {
        self.state.screen_to_graph(screen)
    }

    pub fn graph_to_screen(&self, graph: Point) -> Point {
        self.state.graph_to_screen(graph)
    }

    fn refit(&mut self) {
        self.initial = match (self.screen_size, &self.target) {
            (Some(screen), Some(target)) => fit_to_frame(screen, target),
            _ => ZoomState::identity(),
        };
        self.state = self.initial;
        log::debug!(
            "Zoom refit: zoom={:.3} translation=({:.1}, {:.1})",
            self.initial.zoom,
            self.initial.translation.x,
            self.initial.translation.y
        );
    }
}
