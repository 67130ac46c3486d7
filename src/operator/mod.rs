//! Dense linear operators and their cached-product types.

use faer::Mat;

pub mod dense;
pub use dense::DenseOperator;

/// A cached matrix product, either a single right-hand side (`A·x` for a
/// vector `x`) or a batch of right-hand sides stacked as matrix columns.
///
/// Incremental update calls dispatch on this rank.
#[derive(Clone, Debug)]
pub enum Product<T> {
    /// Product against one vector.
    Vector(Vec<T>),
    /// Products against a batch of vectors, one per column.
    Matrix(Mat<T>),
}

/// A single-coordinate perturbation `x[idx] += delta`.
///
/// A `Scalar` step pairs with a [`Product::Vector`] cache; `PerColumn` steps
/// pair with a [`Product::Matrix`] cache, one delta per batch column, all
/// applied at the same coordinate.
#[derive(Clone, Debug, PartialEq)]
pub enum Step<T> {
    /// One delta for a single right-hand side.
    Scalar(T),
    /// One delta per batch column.
    PerColumn(Vec<T>),
}
