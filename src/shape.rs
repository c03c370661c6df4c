use std::fmt::Debug;

/// Anything that can be drawn with a fill color.
pub trait Shape: Debug {
    /// Draw the shape, returning one line per leaf drawn.
    fn draw(&self, fill_color: &str) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Circle;

impl Shape for Circle {
    fn draw(&self, fill_color: &str) -> Vec<String> {
        vec![format!("Drawing Circle with color {}", fill_color)]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Triangle;

impl Shape for Triangle {
    fn draw(&self, fill_color: &str) -> Vec<String> {
        vec![format!("Drawing Triangle with color {}", fill_color)]
    }
}

/// A group of shapes drawn as one.
#[derive(Debug, Default)]
pub struct Drawing {
    shapes: Vec<Box<dyn Shape>>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, shape: impl Shape + 'static) {
        self.shapes.push(Box::new(shape));
    }

    /// Remove the shape at `index`, if there is one.
    pub fn remove(&mut self, index: usize) -> Option<Box<dyn Shape>> {
        (index < self.shapes.len()).then(|| self.shapes.remove(index))
    }

    pub fn clear(&mut self) {
        tracing::debug!(removed = self.shapes.len(), "clearing drawing");
        self.shapes.clear();
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Shape for Drawing {
    fn draw(&self, fill_color: &str) -> Vec<String> {
        self.shapes
            .iter()
            .flat_map(|shape| shape.draw(fill_color))
            .collect()
    }
}
