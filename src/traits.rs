//! Core traits for estimators and transformers.
//!
//! These traits define the API contracts the inference pipeline relies on.

use crate::error::Result;
use crate::primitives::{Matrix, Vector};

/// Trait for supervised regressors.
///
/// # Examples
///
/// ```
/// use bikecast::prelude::*;
///
/// let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let y = Vector::from_slice(&[10.0, 20.0, 30.0, 40.0]);
///
/// let mut model = KNeighborsRegressor::new(2);
/// model.fit(&x, &y).unwrap();
///
/// let pred = model.predict(&Matrix::from_row(vec![1.4])).unwrap();
/// assert!((pred[0] - 15.0).abs() < 1e-6);
/// ```
pub trait Regressor {
    /// Fits the model to training data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (dimension mismatch, bad hyperparameters, etc.).
    fn fit(&mut self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<()>;

    /// Predicts target values for input data.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the feature width differs.
    fn predict(&self, x: &Matrix<f32>) -> Result<Vector<f32>>;

    /// Number of features seen during fit, if fitted.
    fn n_features(&self) -> Option<usize>;
}

/// Trait for data transformers (scalers, etc.).
pub trait Transformer {
    /// Fits the transformer to data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit(&mut self, x: &Matrix<f32>) -> Result<()>;

    /// Transforms data using fitted parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if transformer is not fitted.
    fn transform(&self, x: &Matrix<f32>) -> Result<Matrix<f32>>;

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit_transform(&mut self, x: &Matrix<f32>) -> Result<Matrix<f32>> {
        self.fit(x)?;
        self.transform(x)
    }
}
