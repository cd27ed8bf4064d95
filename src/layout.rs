use std::collections::HashMap;

/// Vertical extent of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_y: 0.0,
            width,
            height,
        }
    }

    /// Browsers never scroll above the top of the document.
    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Source of element positions, keyed by element id.
pub trait Geometry {
    fn bounds(&self, id: &str) -> Option<Bounds>;
}

/// Fixed positions, used for tests and for prerendering where no layout exists.
#[derive(Debug, Default, Clone)]
pub struct StaticGeometry {
    bounds: HashMap<String, Bounds>,
}

impl StaticGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: &str, top: f64, height: f64) -> Self {
        self.insert(id, Bounds::new(top, height));
        self
    }

    pub fn insert(&mut self, id: &str, bounds: Bounds) {
        self.bounds.insert(id.to_string(), bounds);
    }
}

impl Geometry for StaticGeometry {
    fn bounds(&self, id: &str) -> Option<Bounds> {
        self.bounds.get(id).copied()
    }
}
