//! Nearest-neighbor regression.
//!
//! [`KNeighborsRegressor`] predicts the target of a sample from the targets
//! of its `k` closest training samples.

use crate::error::{BikecastError, Result};
use crate::primitives::{Matrix, Vector};
use crate::traits::Regressor;
use serde::{Deserialize, Serialize};

/// Default number of neighbors.
pub const DEFAULT_K: usize = 5;

/// Distances below this count as an exact match when weighting by distance.
const ZERO_DISTANCE: f64 = 1e-10;

/// Distance metric used to rank neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// Straight-line distance.
    Euclidean,
    /// Sum of absolute differences.
    Manhattan,
}

/// How neighbor targets are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weighting {
    /// Plain mean of the k targets.
    #[default]
    Uniform,
    /// Inverse-distance weighted mean.
    Distance,
}

/// K-Nearest Neighbors regressor.
///
/// Lazy learner: `fit` stores the training set, `predict` scans it.
///
/// # Example
///
/// ```
/// use bikecast::neighbors::KNeighborsRegressor;
/// use bikecast::primitives::{Matrix, Vector};
/// use bikecast::traits::Regressor;
///
/// let x = Matrix::from_vec(4, 1, vec![0.0, 1.0, 10.0, 11.0]).expect("4x1 matrix");
/// let y = Vector::from_slice(&[100.0, 200.0, 1000.0, 1200.0]);
///
/// let mut knn = KNeighborsRegressor::new(2);
/// knn.fit(&x, &y).expect("valid training data");
///
/// let pred = knn.predict(&Matrix::from_row(vec![10.4])).expect("fitted");
/// assert!((pred[0] - 1100.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KNeighborsRegressor {
    /// Number of neighbors to use
    k: usize,
    /// Distance metric
    metric: DistanceMetric,
    /// Neighbor weighting scheme
    weights: Weighting,
    /// Training feature matrix (stored during fit)
    x_train: Option<Matrix<f32>>,
    /// Training targets (stored during fit)
    y_train: Option<Vec<f32>>,
}

impl Default for KNeighborsRegressor {
    fn default() -> Self {
        Self::new(DEFAULT_K)
    }
}

impl KNeighborsRegressor {
    /// Creates a new regressor using `k` neighbors, Euclidean distance and
    /// uniform weights.
    #[must_use]
    pub fn new(k: usize) -> Self {
        Self {
            k,
            metric: DistanceMetric::Euclidean,
            weights: Weighting::Uniform,
            x_train: None,
            y_train: None,
        }
    }

    /// Sets the distance metric.
    #[must_use]
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Sets the weighting scheme.
    #[must_use]
    pub fn with_weights(mut self, weights: Weighting) -> Self {
        self.weights = weights;
        self
    }

    /// Number of neighbors.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Distance metric in use.
    #[must_use]
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Weighting scheme in use.
    #[must_use]
    pub fn weights(&self) -> Weighting {
        self.weights
    }

    /// Number of stored training samples; zero when unfitted.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.y_train.as_ref().map_or(0, Vec::len)
    }

    /// Returns true if the model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.x_train.is_some() && self.y_train.is_some()
    }

    /// Distance in f64, so squared differences of large finite inputs stay
    /// finite and ordered.
    fn distance(&self, a: &[f32], b: &[f32]) -> f64 {
        let diffs = a
            .iter()
            .zip(b)
            .map(|(&x, &y)| (f64::from(x) - f64::from(y)).abs());
        match self.metric {
            DistanceMetric::Euclidean => diffs.map(|d| d * d).sum::<f64>().sqrt(),
            DistanceMetric::Manhattan => diffs.sum(),
        }
    }

    /// Combines the k nearest `(distance, target)` pairs into one value.
    fn aggregate(&self, neighbors: &[(f64, f32)]) -> f32 {
        let value = match self.weights {
            Weighting::Uniform => mean(neighbors.iter().map(|&(_, y)| y)),
            Weighting::Distance => {
                // Exact matches take all the weight.
                let exact: Vec<f32> = neighbors
                    .iter()
                    .filter(|(d, _)| *d < ZERO_DISTANCE)
                    .map(|&(_, y)| y)
                    .collect();
                if !exact.is_empty() {
                    return mean(exact.into_iter()) as f32;
                }
                let (weighted, total) = neighbors
                    .iter()
                    .fold((0.0, 0.0), |(acc, w_sum), &(d, y)| {
                        let w = 1.0 / d;
                        (acc + w * f64::from(y), w_sum + w)
                    });
                weighted / total
            }
        };
        value as f32
    }
}

fn mean(values: impl ExactSizeIterator<Item = f32>) -> f64 {
    let n = values.len();
    values.map(f64::from).sum::<f64>() / n as f64
}

impl Regressor for KNeighborsRegressor {
    /// Stores the training data after validating shapes and `k`.
    fn fit(&mut self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<()> {
        let (n_samples, _n_features) = x.shape();

        if self.k == 0 {
            return Err(BikecastError::InvalidHyperparameter {
                param: "k".to_string(),
                value: "0".to_string(),
                constraint: ">= 1".to_string(),
            });
        }

        if n_samples == 0 {
            return Err("Cannot fit with zero samples".into());
        }

        if y.len() != n_samples {
            return Err(BikecastError::DimensionMismatch {
                expected: format!("{n_samples} targets"),
                actual: format!("{} targets", y.len()),
            });
        }

        if self.k > n_samples {
            return Err(BikecastError::InvalidHyperparameter {
                param: "k".to_string(),
                value: self.k.to_string(),
                constraint: format!("<= {n_samples} training samples"),
            });
        }

        if !x.is_finite() || y.as_slice().iter().any(|v| !v.is_finite()) {
            return Err("Training data contains NaN or infinite values".into());
        }

        self.x_train = Some(x.clone());
        self.y_train = Some(y.as_slice().to_vec());

        Ok(())
    }

    /// Averages the targets of the k nearest training samples.
    ///
    /// Ties in distance keep training order.
    fn predict(&self, x: &Matrix<f32>) -> Result<Vector<f32>> {
        let (x_train, y_train) = match (&self.x_train, &self.y_train) {
            (Some(x_train), Some(y_train)) => (x_train, y_train),
            _ => {
                return Err(BikecastError::NotFitted {
                    estimator: "KNeighborsRegressor",
                })
            }
        };

        let (n_samples, n_features) = x.shape();
        if n_features != x_train.n_cols() {
            return Err(BikecastError::DimensionMismatch {
                expected: format!("{} features", x_train.n_cols()),
                actual: format!("{n_features} features"),
            });
        }

        let mut predictions = Vec::with_capacity(n_samples);
        let mut distances: Vec<(f64, f32)> = Vec::with_capacity(y_train.len());

        for i in 0..n_samples {
            let query = x.row_slice(i);
            distances.clear();
            distances.extend(
                y_train
                    .iter()
                    .enumerate()
                    .map(|(j, &target)| (self.distance(query, x_train.row_slice(j)), target)),
            );

            distances.sort_by(|a, b| a.0.total_cmp(&b.0));
            predictions.push(self.aggregate(&distances[..self.k]));
        }

        Ok(Vector::from_vec(predictions))
    }

    fn n_features(&self) -> Option<usize> {
        self.x_train.as_ref().map(Matrix::n_cols)
    }
}
