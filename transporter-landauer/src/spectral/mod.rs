//! # Spectral
//!
//! Discrete energy and voltage spaces, and the transmission spectrum evaluated over them.
//!
//! A `LinearGrid` holds `number_of_points >= 2` evenly spaced points spanning a closed
//! interval. Both end points are part of the grid and the last point is exactly the upper
//! bound of the interval.

mod spectrum;

pub use spectrum::{spectrum, SpectralPoint, Spectrum};

use crate::error::{ensure_finite, TransportError};
use std::ops::RangeInclusive;

#[derive(Clone, Debug, PartialEq)]
/// Evenly spaced points over a closed interval
pub struct LinearGrid {
    start: f64,
    end: f64,
    number_of_points: usize,
}

impl LinearGrid {
    /// The number of points in the grid
    pub fn number_of_points(&self) -> usize {
        self.number_of_points
    }

    /// The point at `index`, the first and final indices map exactly onto the ends of the range
    pub fn point(&self, index: usize) -> f64 {
        if index == 0 {
            return self.start;
        }
        if index + 1 == self.number_of_points {
            return self.end;
        }
        let step = (self.end - self.start) / (self.number_of_points - 1) as f64;
        self.start + index as f64 * step
    }

    /// Iterates over the points of the grid in ascending index order
    pub fn points(&self) -> impl ExactSizeIterator<Item = f64> + Clone + '_ {
        (0..self.number_of_points).map(move |index| self.point(index))
    }
}

/// Builder for a `LinearGrid`
pub struct LinearGridBuilder<RefRange> {
    number_of_points: usize,
    range: RefRange,
    name: &'static str,
}

impl LinearGridBuilder<()> {
    /// Initialise an empty builder. `name` labels the point count in error messages
    pub fn new(name: &'static str) -> Self {
        Self {
            number_of_points: 0,
            range: (),
            name,
        }
    }
}

impl<RefRange> LinearGridBuilder<RefRange> {
    /// Set the number of points in the grid
    pub fn with_number_of_points(self, number_of_points: usize) -> Self {
        Self {
            number_of_points,
            ..self
        }
    }

    /// Attach the closed interval spanned by the grid
    pub fn with_range(self, range: RangeInclusive<f64>) -> LinearGridBuilder<RangeInclusive<f64>> {
        LinearGridBuilder {
            number_of_points: self.number_of_points,
            range,
            name: self.name,
        }
    }
}

impl LinearGridBuilder<RangeInclusive<f64>> {
    /// Builds the grid, rejecting fewer than two points, non-finite bounds and spans too
    /// wide to be represented
    pub fn build(self) -> Result<LinearGrid, TransportError> {
        if self.number_of_points < 2 {
            return Err(TransportError::invalid_parameter(
                self.name,
                self.number_of_points,
                "at least two points are needed to span a range",
            ));
        }
        let (start, end) = self.range.into_inner();
        ensure_finite("range start", start)?;
        ensure_finite("range end", end)?;
        ensure_finite("range span", end - start)?;
        Ok(LinearGrid {
            start,
            end,
            number_of_points: self.number_of_points,
        })
    }
}

/// The evenly spaced bias points `minimum..=maximum` used for I-V curves
pub fn voltage_grid(
    minimum: f64,
    maximum: f64,
    number_of_points: usize,
) -> Result<LinearGrid, TransportError> {
    LinearGridBuilder::new("voltage_steps")
        .with_number_of_points(number_of_points)
        .with_range(minimum..=maximum)
        .build()
}
