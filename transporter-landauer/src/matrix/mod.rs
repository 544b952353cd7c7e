//! # Matrix
//!
//! A small dense square matrix of `Complex<f64>` with the handful of operations the
//! transport calculation needs. Devices considered here have tens to a few hundred sites,
//! so a row-major buffer and an `O(n^3)` Gauss-Jordan inverse are adequate.
//!
//! Every binary operation checks that both operands share a dimension and returns a
//! `TransportError::DimensionMismatch` otherwise. Operations never mutate their inputs.

mod inverse;

use crate::error::TransportError;
use num_complex::Complex;
use num_traits::{One, Zero};
use std::ops::{Index, IndexMut};

#[derive(Clone, Debug, PartialEq)]
/// A dense `dimension x dimension` complex matrix stored in row-major order
pub struct ComplexMatrix {
    dimension: usize,
    values: Vec<Complex<f64>>,
}

/// The number of elements in a `rows x columns` buffer of `Complex<f64>`.
///
/// Fails when the count or its size in bytes cannot be represented, so no allocation is
/// attempted for a dimension that can never fit in memory.
pub(crate) fn element_count(rows: usize, columns: usize) -> Result<usize, TransportError> {
    rows.checked_mul(columns)
        .filter(|count| {
            count
                .checked_mul(std::mem::size_of::<Complex<f64>>())
                .map_or(false, |bytes| bytes <= isize::MAX as usize)
        })
        .ok_or(TransportError::InvalidDimension {
            dimension: rows,
            reason: "the matrix is too large to be stored",
        })
}

impl ComplexMatrix {
    /// A `dimension x dimension` matrix of zeros
    pub fn zeros(dimension: usize) -> Result<Self, TransportError> {
        if dimension < 1 {
            return Err(TransportError::InvalidDimension {
                dimension,
                reason: "matrices must have at least one row",
            });
        }
        let count = element_count(dimension, dimension)?;
        Ok(Self {
            dimension,
            values: vec![Complex::zero(); count],
        })
    }

    /// The `dimension x dimension` identity
    pub fn identity(dimension: usize) -> Result<Self, TransportError> {
        Self::zeros(dimension).map(|matrix| matrix.scalar_add_diagonal(Complex::one()))
    }

    /// A diagonal matrix with the given diagonal
    pub fn from_diagonal(diagonal: &[Complex<f64>]) -> Result<Self, TransportError> {
        let mut matrix = Self::zeros(diagonal.len())?;
        for (idx, &value) in diagonal.iter().enumerate() {
            matrix[(idx, idx)] = value;
        }
        Ok(matrix)
    }

    /// Builds a matrix from a row-major buffer whose length is a non-zero perfect square
    pub fn from_row_major(values: Vec<Complex<f64>>) -> Result<Self, TransportError> {
        let dimension = (values.len() as f64).sqrt().round() as usize;
        if dimension == 0 || element_count(dimension, dimension)? != values.len() {
            return Err(TransportError::InvalidDimension {
                dimension: values.len(),
                reason: "a square matrix needs a non-zero perfect square number of elements",
            });
        }
        Ok(Self { dimension, values })
    }

    /// Number of rows, equal to the number of columns
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The element at `(row, column)`, or `None` when out of bounds
    pub fn get(&self, row: usize, column: usize) -> Option<Complex<f64>> {
        if row < self.dimension && column < self.dimension {
            Some(self.values[row * self.dimension + column])
        } else {
            None
        }
    }

    /// The row-major element buffer
    pub fn values(&self) -> &[Complex<f64>] {
        &self.values
    }

    /// Iterates over the rows as slices
    pub fn rows(&self) -> impl Iterator<Item = &[Complex<f64>]> + '_ {
        self.values.chunks(self.dimension)
    }

    /// Iterates over the diagonal elements
    pub fn diagonal(&self) -> impl Iterator<Item = Complex<f64>> + '_ {
        self.values.iter().step_by(self.dimension + 1).copied()
    }

    fn check_dimensions(
        &self,
        other: &ComplexMatrix,
        operation: &'static str,
    ) -> Result<(), TransportError> {
        if self.dimension != other.dimension {
            return Err(TransportError::DimensionMismatch {
                operation,
                left: self.dimension,
                right: other.dimension,
            });
        }
        Ok(())
    }

    fn zip_with(
        &self,
        other: &ComplexMatrix,
        operation: &'static str,
        f: impl Fn(Complex<f64>, Complex<f64>) -> Complex<f64>,
    ) -> Result<Self, TransportError> {
        self.check_dimensions(other, operation)?;
        Ok(Self {
            dimension: self.dimension,
            values: self
                .values
                .iter()
                .zip(other.values.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    fn map(&self, f: impl Fn(Complex<f64>) -> Complex<f64>) -> Self {
        Self {
            dimension: self.dimension,
            values: self.values.iter().map(|&value| f(value)).collect(),
        }
    }

    /// Element-wise sum
    pub fn add(&self, other: &ComplexMatrix) -> Result<Self, TransportError> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    /// Element-wise difference `self - other`
    pub fn subtract(&self, other: &ComplexMatrix) -> Result<Self, TransportError> {
        self.zip_with(other, "subtract", |a, b| a - b)
    }

    /// The matrix product `self * other`
    pub fn multiply(&self, other: &ComplexMatrix) -> Result<Self, TransportError> {
        self.check_dimensions(other, "multiply")?;
        let n = self.dimension;
        let mut values = vec![Complex::zero(); n * n];
        for (row, output) in values.chunks_mut(n).enumerate() {
            for inner in 0..n {
                let left = self.values[row * n + inner];
                // Self energies and broadenings are almost entirely zero
                if left.is_zero() {
                    continue;
                }
                for (element, &right) in output
                    .iter_mut()
                    .zip(other.values[inner * n..(inner + 1) * n].iter())
                {
                    *element += left * right;
                }
            }
        }
        Ok(Self {
            dimension: n,
            values,
        })
    }

    /// The Hermitian adjoint, `A[i][j] -> conj(A[j][i])`
    pub fn conjugate_transpose(&self) -> Self {
        let n = self.dimension;
        let values = (0..n)
            .flat_map(|row| (0..n).map(move |column| (row, column)))
            .map(|(row, column)| self.values[column * n + row].conj())
            .collect();
        Self {
            dimension: n,
            values,
        }
    }

    /// Sum of the diagonal
    pub fn trace(&self) -> Complex<f64> {
        self.diagonal().sum()
    }

    /// Adds `scalar` to each diagonal element, leaving the off-diagonal untouched
    pub fn scalar_add_diagonal(&self, scalar: Complex<f64>) -> Self {
        let mut output = self.clone();
        for idx in 0..self.dimension {
            output[(idx, idx)] += scalar;
        }
        output
    }

    /// Multiplies every element by `scalar`
    pub fn scalar_multiply(&self, scalar: Complex<f64>) -> Self {
        self.map(|value| value * scalar)
    }

    /// The largest element-wise modulus of `self - other`
    pub fn max_abs_difference(&self, other: &ComplexMatrix) -> Result<f64, TransportError> {
        self.check_dimensions(other, "compare")?;
        Ok(self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).norm())
            .fold(0_f64, f64::max))
    }
}

impl Index<(usize, usize)> for ComplexMatrix {
    type Output = Complex<f64>;

    fn index(&self, (row, column): (usize, usize)) -> &Self::Output {
        assert!(
            row < self.dimension && column < self.dimension,
            "index ({}, {}) out of bounds for a {}x{} matrix",
            row,
            column,
            self.dimension,
            self.dimension
        );
        &self.values[row * self.dimension + column]
    }
}

impl IndexMut<(usize, usize)> for ComplexMatrix {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut Self::Output {
        assert!(
            row < self.dimension && column < self.dimension,
            "index ({}, {}) out of bounds for a {}x{} matrix",
            row,
            column,
            self.dimension,
            self.dimension
        );
        &mut self.values[row * self.dimension + column]
    }
}
