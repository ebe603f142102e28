use rand::distributions::{Distribution, Uniform};
use rand::RngCore;
use serde::Serialize;
use std::fmt;

use crate::error::{ensure_len, Result};

/// Dense weight matrix. Rows index the inputs of a layer, columns its
/// outputs, so `data[i][j]` connects input `i` to neuron `j`.
///
/// The shape is fixed at construction; every mutator keeps it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Independent samples from the closed range [-1, 1], drawn row by row.
    /// The same seeded generator always yields the same matrix.
    pub fn random(rows: usize, cols: usize, rng: &mut dyn RngCore) -> Matrix {
        let range = Uniform::new_inclusive(-1.0, 1.0);
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = range.sample(rng);
            }
        }

        res
    }

    /// Builds a matrix from row vectors. All rows must have the length of
    /// the first one.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        for row in &data {
            ensure_len("matrix row", cols, row.len())?;
        }
        Ok(Matrix { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row]
    }

    pub fn to_vec(&self) -> Vec<Vec<f64>> {
        self.data.clone()
    }

    /// Row vector times matrix: `out[j] = Σ_i v[i] * data[i][j]`.
    /// `v` must have `rows` entries.
    pub fn left_mul(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.rows);
        let mut res = vec![0.0; self.cols];

        for (row, &x) in self.data.iter().zip(v) {
            for (out, &w) in res.iter_mut().zip(row) {
                *out += x * w;
            }
        }

        res
    }

    /// Matrix times column vector: `out[i] = Σ_j data[i][j] * v[j]`.
    /// `v` must have `cols` entries.
    pub fn right_mul(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.cols);
        self.data
            .iter()
            .map(|row| super::vector::dot(row, v))
            .collect()
    }

    /// In-place rank-one update `data[i][j] -= scale * left[i] * right[j]`.
    pub fn sub_outer(&mut self, scale: f64, left: &[f64], right: &[f64]) {
        debug_assert_eq!(left.len(), self.rows);
        debug_assert_eq!(right.len(), self.cols);

        for (row, &l) in self.data.iter_mut().zip(left) {
            for (w, &r) in row.iter_mut().zip(right) {
                *w -= scale * l * r;
            }
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.data {
            writeln!(f, "{}", super::vector::format_vec(row))?;
        }
        Ok(())
    }
}
