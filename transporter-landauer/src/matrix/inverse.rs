//! Gauss-Jordan inversion with partial pivoting

use super::{element_count, ComplexMatrix};
use crate::error::{ensure_non_negative, TransportError};
use num_complex::Complex;
use num_traits::{One, Zero};

impl ComplexMatrix {
    /// Inverts the matrix, failing only when a pivot column is exactly zero
    pub fn invert(&self) -> Result<Self, TransportError> {
        self.invert_with_tolerance(0.)
    }

    /// Inverts the matrix by Gauss-Jordan elimination on the augmented system `[A | I]`.
    ///
    /// At each column the row holding the largest-modulus candidate is swapped into the
    /// pivot position. The matrix is reported singular when that modulus is not strictly
    /// greater than `tolerance`.
    #[tracing::instrument(name = "Gauss-Jordan", level = "trace", skip(self), fields(dimension = self.dimension))]
    pub fn invert_with_tolerance(&self, tolerance: f64) -> Result<Self, TransportError> {
        ensure_non_negative("pivot tolerance", tolerance)?;
        let n = self.dimension;
        let width = n.checked_mul(2).ok_or(TransportError::InvalidDimension {
            dimension: n,
            reason: "the augmented system is too large to be stored",
        })?;

        let mut augmented = vec![Complex::zero(); element_count(n, width)?];
        for (row, values) in self.values.chunks(n).enumerate() {
            augmented[row * width..row * width + n].copy_from_slice(values);
            augmented[row * width + n + row] = Complex::one();
        }

        for column in 0..n {
            let (pivot_row, pivot_magnitude) = (column..n)
                .map(|row| (row, augmented[row * width + column].norm()))
                .fold((column, f64::NEG_INFINITY), |best, candidate| {
                    if candidate.1 > best.1 {
                        candidate
                    } else {
                        best
                    }
                });
            if pivot_magnitude.is_nan() || pivot_magnitude <= tolerance {
                return Err(TransportError::SingularMatrix {
                    column,
                    dimension: n,
                    tolerance,
                });
            }

            if pivot_row != column {
                for idx in 0..width {
                    augmented.swap(column * width + idx, pivot_row * width + idx);
                }
            }

            let pivot = augmented[column * width + column];
            for element in augmented[column * width..(column + 1) * width].iter_mut() {
                *element /= pivot;
            }

            for row in (0..n).filter(|&row| row != column) {
                let factor = augmented[row * width + column];
                if factor.is_zero() {
                    continue;
                }
                for idx in 0..width {
                    let value = augmented[column * width + idx];
                    augmented[row * width + idx] -= factor * value;
                }
            }
        }

        let values = augmented
            .chunks(width)
            .flat_map(|row| row[n..].iter().copied())
            .collect();
        Ok(Self {
            dimension: n,
            values,
        })
    }
}
