//! Gridded field representation.

use crate::error::{FrameError, FrameResult};
use serde::{Deserialize, Serialize};

/// A 2-D field of values with parallel coordinate arrays.
///
/// Values are stored in row-major order; `lats` and `lons` have the same
/// length as `values` (one coordinate pair per grid point). A grid is
/// immutable once produced; transformations return a new grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    /// Number of points in X (longitude) direction
    pub width: usize,
    /// Number of points in Y (latitude) direction
    pub height: usize,
    /// Field values, row-major
    pub values: Vec<f32>,
    /// Latitude of each grid point, row-major
    pub lats: Vec<f32>,
    /// Longitude of each grid point, row-major
    pub lons: Vec<f32>,
}

impl Grid {
    /// Create a new grid, validating that all arrays match the declared shape.
    pub fn new(
        width: usize,
        height: usize,
        values: Vec<f32>,
        lats: Vec<f32>,
        lons: Vec<f32>,
    ) -> FrameResult<Self> {
        let expected = width * height;
        for (name, len) in [("values", values.len()), ("lats", lats.len()), ("lons", lons.len())] {
            if len != expected {
                return Err(FrameError::invalid_grid(format!(
                    "{} has {} entries for a {}x{} grid",
                    name, len, width, height
                )));
            }
        }
        Ok(Self {
            width,
            height,
            values,
            lats,
            lons,
        })
    }

    /// A zero-valued grid sharing this grid's shape and coordinates.
    pub fn zeros_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            values: vec![0.0; self.values.len()],
            lats: self.lats.clone(),
            lons: self.lons.clone(),
        }
    }

    /// Total number of grid points.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Check if grid is empty.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Mean of all finite values. NaN entries (points outside the data
    /// domain) are excluded; returns NaN if nothing is finite.
    pub fn mean(&self) -> f32 {
        let mut sum = 0.0f64;
        let mut count = 0usize;
        for &v in &self.values {
            if v.is_finite() {
                sum += v as f64;
                count += 1;
            }
        }
        if count == 0 {
            f32::NAN
        } else {
            (sum / count as f64) as f32
        }
    }

    /// Apply a function to every value, keeping shape and coordinates.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            width: self.width,
            height: self.height,
            values: self.values.iter().map(|&v| f(v)).collect(),
            lats: self.lats.clone(),
            lons: self.lons.clone(),
        }
    }

    fn check_shape(&self, other: &Grid) -> FrameResult<()> {
        if self.width != other.width || self.height != other.height {
            return Err(FrameError::ShapeMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        Ok(())
    }

    /// Elementwise vector magnitude `sqrt(self² + other²)`.
    ///
    /// Coordinates are taken from `self`.
    pub fn hypot(&self, other: &Grid) -> FrameResult<Self> {
        self.check_shape(other)?;
        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(&u, &v)| (u * u + v * v).sqrt())
            .collect();
        Ok(Self {
            width: self.width,
            height: self.height,
            values,
            lats: self.lats.clone(),
            lons: self.lons.clone(),
        })
    }

    /// Elementwise maximum of two grids. NaN in one operand yields the
    /// other operand's value.
    pub fn max(&self, other: &Grid) -> FrameResult<Self> {
        self.check_shape(other)?;
        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(&a, &b)| if a.is_nan() { b } else { a.max(b) })
            .collect();
        Ok(Self {
            width: self.width,
            height: self.height,
            values,
            lats: self.lats.clone(),
            lons: self.lons.clone(),
        })
    }

    /// Elementwise `self - other`, with negative results clamped to zero.
    ///
    /// Used for cumulative-to-rate differencing, where a negative delta
    /// means a counter reset or decoder noise.
    pub fn sub_clamped(&self, other: &Grid) -> FrameResult<Self> {
        self.check_shape(other)?;
        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(&a, &b)| (a - b).max(0.0))
            .collect();
        Ok(Self {
            width: self.width,
            height: self.height,
            values,
            lats: self.lats.clone(),
            lons: self.lons.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(values: Vec<f32>) -> Grid {
        let n = values.len();
        Grid::new(n, 1, values, vec![35.0; n], vec![139.0; n]).unwrap()
    }

    #[test]
    fn test_new_rejects_shape_mismatch() {
        let result = Grid::new(2, 2, vec![1.0; 3], vec![0.0; 4], vec![0.0; 4]);
        assert!(result.is_err());
    }

    #[test]
    fn test_mean_skips_nan() {
        let g = grid(vec![1.0, f32::NAN, 3.0]);
        assert!((g.mean() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_mean_all_nan() {
        let g = grid(vec![f32::NAN, f32::NAN]);
        assert!(g.mean().is_nan());
    }

    #[test]
    fn test_hypot() {
        let u = grid(vec![3.0, 0.0]);
        let v = grid(vec![4.0, 5.0]);
        let speed = u.hypot(&v).unwrap();
        assert!((speed.values[0] - 5.0).abs() < 1e-6);
        assert!((speed.values[1] - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_max_handles_nan() {
        let a = grid(vec![f32::NAN, 20.0]);
        let b = grid(vec![50.0, 10.0]);
        let combined = a.max(&b).unwrap();
        assert_eq!(combined.values, vec![50.0, 20.0]);
    }

    #[test]
    fn test_sub_clamped() {
        let current = grid(vec![12.0, 4.0]);
        let previous = grid(vec![5.0, 10.0]);
        let delta = current.sub_clamped(&previous).unwrap();
        assert_eq!(delta.values, vec![7.0, 0.0]);
    }

    #[test]
    fn test_shape_mismatch_errors() {
        let a = grid(vec![1.0, 2.0]);
        let b = grid(vec![1.0, 2.0, 3.0]);
        assert!(a.hypot(&b).is_err());
        assert!(a.max(&b).is_err());
        assert!(a.sub_clamped(&b).is_err());
    }
}
