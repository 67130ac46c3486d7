//! Core traits for linform.

use faer::Mat;

use crate::error::LinformError;

/// Outer function g applied to a cached forward product A·x.
///
/// Implemented for any closure `Fn(&[T], &P) -> T`, so callers can pass plain
/// functions, closures, or small structs carrying precomputed state.
pub trait SubFunction<T, P> {
    /// Evaluate g(ax; params).
    fn evaluate(&self, ax: &[T], params: &P) -> T;
}

impl<T, P, F> SubFunction<T, P> for F
where
    F: Fn(&[T], &P) -> T,
{
    fn evaluate(&self, ax: &[T], params: &P) -> T {
        self(ax, params)
    }
}

/// Curvature bound of an outer function, either shared by all coordinates or
/// given per column.
#[derive(Clone, Debug, PartialEq)]
pub enum Curvature<T> {
    /// One bound broadcast over every column.
    Uniform(T),
    /// One bound per column of the operator.
    PerColumn(Vec<T>),
}

/// Curvature (Lipschitz-constant) estimate of an outer function.
///
/// Implemented for any closure `Fn(&P) -> Curvature<T>`.
pub trait LipschitzFun<T, P> {
    /// Evaluate the curvature bound for the given parameters.
    fn evaluate(&self, params: &P) -> Curvature<T>;
}

impl<T, P, F> LipschitzFun<T, P> for F
where
    F: Fn(&P) -> Curvature<T>,
{
    fn evaluate(&self, params: &P) -> Curvature<T> {
        self(params)
    }
}

/// Structural decomposition into an ordered list of numeric leaf arrays.
///
/// External differentiation and compilation systems traverse structured values
/// as flat leaf lists and rebuild them afterwards; any type participating in a
/// differentiated computation implements this pair. `recompose` must accept
/// exactly the list `decompose` produced.
pub trait LeafDecompose<T>: Sized {
    /// The ordered numeric leaves of this value.
    fn decompose(&self) -> Vec<Mat<T>>;
    /// Rebuild a value from its leaves.
    fn recompose(leaves: Vec<Mat<T>>) -> Result<Self, LinformError>;
}
