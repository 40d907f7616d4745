//! Geographic bounds accumulation for fit-to-markers

use geo::{coord, Rect};

use crate::models::LatLng;

/// Running bounding box over plotted positions
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundsAccumulator {
    rect: Option<Rect<f64>>,
    count: usize,
}

impl BoundsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, position: LatLng) {
        let point = position.to_coord();
        self.rect = Some(match self.rect {
            None => Rect::new(point, point),
            Some(rect) => Rect::new(
                coord! { x: rect.min().x.min(point.x), y: rect.min().y.min(point.y) },
                coord! { x: rect.max().x.max(point.x), y: rect.max().y.max(point.y) },
            ),
        });
        self.count += 1;
    }

    /// Number of positions folded in so far
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn rect(&self) -> Option<Rect<f64>> {
        self.rect
    }
}

impl FromIterator<LatLng> for BoundsAccumulator {
    fn from_iter<I: IntoIterator<Item = LatLng>>(iter: I) -> Self {
        let mut bounds = Self::new();
        for position in iter {
            bounds.extend(position);
        }
        bounds
    }
}
