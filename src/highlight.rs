//! Intersection-style visibility tracking for headings.
//!
//! The tracker remembers, per observed heading id, whether the heading was
//! inside the detection band at the last evaluation. Each [`VisibilityTracker::update`]
//! reports the headings that have *entered* the band since then, in the
//! order they were observed (document order).

use crate::layout::{Bounds, Geometry, Viewport};

/// The slice of the viewport used to decide which heading is being read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionBand {
    /// Fraction of the viewport height trimmed from the top.
    pub top_margin: f64,
    /// Fraction of the viewport height trimmed from the bottom.
    pub bottom_margin: f64,
}

impl Default for DetectionBand {
    fn default() -> Self {
        Self {
            top_margin: 0.2,
            bottom_margin: 0.7,
        }
    }
}

impl DetectionBand {
    pub fn new(top_margin: f64, bottom_margin: f64) -> Self {
        Self {
            top_margin,
            bottom_margin,
        }
    }

    /// Band edges in document coordinates for the given viewport.
    pub fn edges(&self, viewport: &Viewport) -> (f64, f64) {
        let top = viewport.scroll_y + viewport.height * self.top_margin;
        let bottom = viewport.scroll_y + viewport.height - viewport.height * self.bottom_margin;
        (top, bottom)
    }

    pub fn intersects(&self, viewport: &Viewport, bounds: &Bounds) -> bool {
        let (top, bottom) = self.edges(viewport);
        if bounds.height <= 0.0 {
            // Zero-height targets count when they sit on or inside the edges.
            return bounds.top >= top && bounds.top <= bottom;
        }
        bounds.top < bottom && bounds.bottom() > top
    }
}

#[derive(Debug)]
struct Observed {
    id: String,
    intersecting: bool,
}

#[derive(Debug)]
pub struct VisibilityTracker {
    band: DetectionBand,
    observed: Vec<Observed>,
}

impl VisibilityTracker {
    pub fn new(band: DetectionBand) -> Self {
        Self {
            band,
            observed: Vec::new(),
        }
    }

    pub fn observe(&mut self, id: &str) {
        if !self.observed.iter().any(|o| o.id == id) {
            self.observed.push(Observed {
                id: id.to_string(),
                intersecting: false,
            });
        }
    }

    pub fn unobserve_all(&mut self) {
        self.observed.clear();
    }

    pub fn observed_ids(&self) -> Vec<&str> {
        self.observed.iter().map(|o| o.id.as_str()).collect()
    }

    /// Re-evaluate every observed heading and return the ids that entered the band.
    ///
    /// Headings without geometry are treated as outside the band.
    pub fn update<G: Geometry + ?Sized>(&mut self, viewport: &Viewport, geometry: &G) -> Vec<String> {
        let band = self.band;
        let mut entered = Vec::new();
        for observed in &mut self.observed {
            let now_intersecting = geometry
                .bounds(&observed.id)
                .is_some_and(|bounds| band.intersects(viewport, &bounds));
            if now_intersecting && !observed.intersecting {
                entered.push(observed.id.clone());
            }
            observed.intersecting = now_intersecting;
        }
        entered
    }
}
