use std::f64::consts::{PI, TAU};

use kurbo::Point;

use crate::foundation::error::{ChalkError, ChalkResult};

/// One angular slice of a circle, bounded by two radii and an arc.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sector {
    /// Position within the partition, `0..sector_count`.
    pub index: usize,
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle in radians; always `start_angle + 2*pi/N`.
    pub end_angle: f64,
}

/// Vertical orientation of a rearranged slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SliceOrientation {
    /// Tip pointing up; base on the lower edge of the row.
    Up,
    /// Tip pointing down; drawn vertically mirrored.
    Down,
}

/// One sector rearranged into the jagged half-circumference row.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RectangleSlice {
    /// Source sector index.
    pub index: usize,
    /// Slice width, `pi * r / N`.
    pub width: f64,
    /// Slice height, equal to the circle radius.
    pub height: f64,
    /// Center of the slice; the row is collectively centered at the origin.
    pub center: Point,
    /// Alternating orientation; `Down` slices are vertically mirrored.
    pub orientation: SliceOrientation,
}

/// Partition of a circle into an even number of sectors, plus the layout of
/// the rearranged rectangle approximation.
///
/// The union of all slices spans exactly `pi * r` in width (half the
/// circumference) and `r` in height for any even sector count; a larger
/// count only smooths the jagged edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectorLayout {
    radius: f64,
    sector_count: usize,
}

impl SectorLayout {
    /// Build a layout, rejecting an invalid radius or sector count.
    ///
    /// The sector count must be even (the alternating up/down placement
    /// tiles without gaps only then) and at least 2.
    pub fn new(radius: f64, sector_count: usize) -> ChalkResult<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ChalkError::invalid_geometry(
                "sector layout radius must be finite and > 0",
            ));
        }
        if sector_count < 2 {
            return Err(ChalkError::invalid_geometry(
                "sector count must be at least 2",
            ));
        }
        if sector_count % 2 != 0 {
            return Err(ChalkError::invalid_geometry(
                "sector count must be even for the alternating slice row",
            ));
        }
        Ok(Self {
            radius,
            sector_count,
        })
    }

    /// Circle radius.
    pub fn radius(self) -> f64 {
        self.radius
    }

    /// Number of sectors, always even.
    pub fn sector_count(self) -> usize {
        self.sector_count
    }

    /// Angular extent of one sector, `2*pi / N`.
    pub fn sector_angle(self) -> f64 {
        TAU / self.sector_count as f64
    }

    /// The N sectors in index order, contiguous and covering the circle.
    pub fn sectors(self) -> Vec<Sector> {
        let angle = self.sector_angle();
        (0..self.sector_count)
            .map(|index| Sector {
                index,
                start_angle: index as f64 * angle,
                end_angle: (index + 1) as f64 * angle,
            })
            .collect()
    }

    /// Width of one rearranged slice, `pi * r / N`.
    pub fn segment_width(self) -> f64 {
        PI * self.radius / self.sector_count as f64
    }

    /// Total width of the rearranged row, `pi * r` for any even N.
    pub fn row_width(self) -> f64 {
        PI * self.radius
    }

    /// Horizontal center of slice `index`; the row is centered on the origin.
    pub fn slice_center_x(self, index: usize) -> f64 {
        let w = self.segment_width();
        -self.row_width() / 2.0 + index as f64 * w + w / 2.0
    }

    /// Alternating orientation, starting `Up` at index 0.
    pub fn slice_orientation(self, index: usize) -> SliceOrientation {
        if index % 2 == 0 {
            SliceOrientation::Up
        } else {
            SliceOrientation::Down
        }
    }

    /// Vertical center of slice `index`.
    ///
    /// The alternation puts even slices low and odd slices high, forming the
    /// jagged top and bottom edges of the approximated rectangle.
    pub fn slice_y(self, index: usize) -> f64 {
        match self.slice_orientation(index) {
            SliceOrientation::Up => -self.radius / 2.0,
            SliceOrientation::Down => self.radius / 2.0,
        }
    }

    /// All N rearranged slices in index order.
    pub fn slices(self) -> Vec<RectangleSlice> {
        (0..self.sector_count)
            .map(|index| RectangleSlice {
                index,
                width: self.segment_width(),
                height: self.radius,
                center: Point::new(self.slice_center_x(index), self.slice_y(index)),
                orientation: self.slice_orientation(index),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/sectors.rs"]
mod tests;
