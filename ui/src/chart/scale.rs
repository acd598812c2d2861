//! Data → pixel transforms resolved after layout.

use crate::core::profile::{PERCENTILE_MAX, PERCENTILE_MIN};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }
}

/// The only coordinate capability the post-layout passes rely on.
pub trait CoordinateTransform {
    /// Pixel X of a category position; fractional positions fall between slots.
    fn value_to_pixel_x(&self, category: f64) -> f64;
    /// Pixel Y of a percentile.
    fn value_to_pixel_y(&self, value: f64) -> f64;
    fn plot_area(&self) -> PlotArea;
}

/// Offset category axis on X, linear `[0, 100]` on Y.
///
/// Category `i` sits at the centre of slot `i`, so a boundary at `k - 0.5`
/// lands exactly between slots `k - 1` and `k`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryScale {
    area: PlotArea,
    categories: usize,
}

impl CategoryScale {
    pub fn new(area: PlotArea, categories: usize) -> Self {
        Self { area, categories }
    }

    pub fn categories(&self) -> usize {
        self.categories
    }

    pub fn slot_width(&self) -> f64 {
        if self.categories == 0 {
            self.area.width()
        } else {
            self.area.width() / self.categories as f64
        }
    }
}

impl CoordinateTransform for CategoryScale {
    fn value_to_pixel_x(&self, category: f64) -> f64 {
        if self.categories == 0 {
            return self.area.center_x();
        }
        self.area.left + (category + 0.5) * self.slot_width()
    }

    fn value_to_pixel_y(&self, value: f64) -> f64 {
        let ratio = (value - PERCENTILE_MIN) / (PERCENTILE_MAX - PERCENTILE_MIN);
        self.area.bottom - ratio * self.area.height()
    }

    fn plot_area(&self) -> PlotArea {
        self.area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> PlotArea {
        PlotArea {
            left: 100.0,
            top: 50.0,
            right: 400.0,
            bottom: 250.0,
        }
    }

    #[test]
    fn categories_sit_in_slot_centres() {
        let scale = CategoryScale::new(area(), 3);
        assert_eq!(scale.value_to_pixel_x(0.0), 150.0);
        assert_eq!(scale.value_to_pixel_x(2.0), 350.0);
        assert_eq!(scale.value_to_pixel_x(1.5), 300.0);
        assert_eq!(scale.value_to_pixel_x(-0.5), 100.0);
        assert_eq!(scale.value_to_pixel_x(2.5), 400.0);
    }

    #[test]
    fn percentiles_grow_upwards() {
        let scale = CategoryScale::new(area(), 3);
        assert_eq!(scale.value_to_pixel_y(0.0), 250.0);
        assert_eq!(scale.value_to_pixel_y(100.0), 50.0);
        assert_eq!(scale.value_to_pixel_y(50.0), 150.0);
        assert!(scale.value_to_pixel_y(120.0) < 50.0);
    }

    #[test]
    fn no_categories_maps_to_centre() {
        let scale = CategoryScale::new(area(), 0);
        assert_eq!(scale.value_to_pixel_x(3.0), 250.0);
    }
}
