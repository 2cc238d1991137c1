//! Horizontal viewport over the movie time axis.
//!
//! Purely a UI concern for the scrubber widget: zooming and panning the
//! visible window never touches the logical current position.

/// Smallest visible span, as a fraction of the total duration.
const MIN_SPAN_FRACTION: f64 = 0.01;

/// A zoomable, pannable window onto `[0, total]` on the time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineViewport {
    total: f64,
    start: f64,
    end: f64,
}

impl TimelineViewport {
    /// Viewport showing the whole axis.
    #[must_use]
    pub fn new(total: f64) -> Self {
        let total = total.max(0.0);
        Self {
            total,
            start: 0.0,
            end: total,
        }
    }

    /// The currently visible `(start, end)` time range.
    #[must_use]
    pub fn visible_range(&self) -> (f64, f64) {
        (self.start, self.end)
    }

    /// Shrink the visible span by `factor`, keeping the center fixed.
    pub fn zoom_in(&mut self, factor: f64) {
        if factor > 1.0 {
            self.set_span(self.span() / factor);
        }
    }

    /// Grow the visible span by `factor`, keeping the center fixed.
    pub fn zoom_out(&mut self, factor: f64) {
        if factor > 1.0 {
            self.set_span(self.span() * factor);
        }
    }

    /// Reset to the full axis.
    pub fn fit_to_window(&mut self) {
        self.start = 0.0;
        self.end = self.total;
    }

    /// Center the viewport on time `tau`, preserving the span.
    pub fn move_to(&mut self, tau: f64) {
        let span = self.span();
        let half = span / 2.0;
        let center = tau.clamp(half, (self.total - half).max(half));
        self.start = center - half;
        self.end = center + half;
    }

    /// Whether time `tau` is currently visible.
    #[must_use]
    pub fn contains(&self, tau: f64) -> bool {
        tau >= self.start && tau <= self.end
    }

    fn span(&self) -> f64 {
        self.end - self.start
    }

    fn set_span(&mut self, span: f64) {
        let span = span.clamp(self.total * MIN_SPAN_FRACTION, self.total);
        let center = (self.start + self.end) / 2.0;
        let half = span / 2.0;
        let center = center.clamp(half, (self.total - half).max(half));
        self.start = center - half;
        self.end = center + half;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_fully_zoomed_out() {
        let viewport = TimelineViewport::new(10.0);
        assert_eq!(viewport.visible_range(), (0.0, 10.0));
    }

    #[test]
    fn zoom_in_keeps_center() {
        let mut viewport = TimelineViewport::new(10.0);
        viewport.zoom_in(2.0);
        let (start, end) = viewport.visible_range();
        assert!((start - 2.5).abs() < 1e-12);
        assert!((end - 7.5).abs() < 1e-12);
    }

    #[test]
    fn zoom_out_clamps_to_axis() {
        let mut viewport = TimelineViewport::new(10.0);
        viewport.zoom_in(2.0);
        viewport.zoom_out(100.0);
        assert_eq!(viewport.visible_range(), (0.0, 10.0));
    }

    #[test]
    fn move_to_clamps_at_edges() {
        let mut viewport = TimelineViewport::new(10.0);
        viewport.zoom_in(5.0);
        viewport.move_to(0.0);
        assert_eq!(viewport.visible_range().0, 0.0);
        viewport.move_to(10.0);
        let (_, end) = viewport.visible_range();
        assert!((end - 10.0).abs() < 1e-12);
    }

    #[test]
    fn fit_restores_full_range() {
        let mut viewport = TimelineViewport::new(10.0);
        viewport.zoom_in(4.0);
        viewport.move_to(9.0);
        viewport.fit_to_window();
        assert_eq!(viewport.visible_range(), (0.0, 10.0));
    }

    #[test]
    fn contains_respects_the_window() {
        let mut viewport = TimelineViewport::new(10.0);
        viewport.zoom_in(2.0);
        assert!(viewport.contains(5.0));
        assert!(!viewport.contains(0.5));
    }
}
