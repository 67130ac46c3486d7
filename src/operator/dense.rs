//! Faer-backed dense operator with forward/adjoint products, single-coordinate
//! product queries, and rank-1 incremental updates.
//!
//! Coordinate-descent solvers mutate one coordinate of `x` per inner step, so
//! recomputing a full O(mn) product per step would erase the method's cost
//! advantage over gradient descent. [`DenseOperator::update_matvec`] and
//! [`DenseOperator::update_rmatvec`] patch a previously computed product in
//! O(m) (resp. O(n)) instead.

use faer::Mat;
use log::debug;
use num_traits::Float;

use crate::core::traits::LeafDecompose;
use crate::error::LinformError;
use crate::operator::{Product, Step};

/// A dense matrix `A` of shape `(m, n)`, immutable after construction.
///
/// The operator owns its storage; every query returns a freshly computed
/// value and nothing mutates `A` in place.
#[derive(Debug)]
pub struct DenseOperator<T> {
    a: Mat<T>,
}

impl<T: Float + Send + Sync> DenseOperator<T> {
    /// Wrap a dense matrix, taking ownership of its storage.
    pub fn new(a: Mat<T>) -> Self {
        debug!("dense operator {}x{}", a.nrows(), a.ncols());
        Self { a }
    }

    /// Construct from raw column-major storage.
    pub fn from_raw(nrows: usize, ncols: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            nrows * ncols,
            "raw storage has incorrect length"
        );
        Self::new(Mat::from_fn(nrows, ncols, |i, j| data[j * nrows + i]))
    }

    /// Construct from a slice of equal-length rows.
    pub fn from_rows(rows: &[Vec<T>]) -> Self {
        let m = rows.len();
        let n = if m == 0 { 0 } else { rows[0].len() };
        for row in rows {
            assert_eq!(row.len(), n, "rows have unequal lengths");
        }
        Self::new(Mat::from_fn(m, n, |i, j| rows[i][j]))
    }

    /// Shape `(m, n)` of the wrapped matrix.
    pub fn shape(&self) -> (usize, usize) {
        (self.a.nrows(), self.a.ncols())
    }

    /// Number of rows `m`.
    pub fn nrows(&self) -> usize {
        self.a.nrows()
    }

    /// Number of columns `n`.
    pub fn ncols(&self) -> usize {
        self.a.ncols()
    }

    /// Borrow the wrapped matrix.
    pub fn matrix(&self) -> faer::MatRef<'_, T> {
        self.a.as_ref()
    }

    fn row_dot(&self, i: usize, x: &[T]) -> T {
        let mut acc = T::zero();
        for j in 0..self.a.ncols() {
            acc = acc + self.a[(i, j)] * x[j];
        }
        acc
    }

    fn col_dot(&self, j: usize, x: &[T]) -> T {
        let mut acc = T::zero();
        for i in 0..self.a.nrows() {
            acc = acc + self.a[(i, j)] * x[i];
        }
        acc
    }

    /// Compute `A·x`. `x.len()` must equal `n`.
    pub fn matvec(&self, x: &[T]) -> Vec<T> {
        assert_eq!(x.len(), self.a.ncols(), "input vector x has incorrect length");
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            (0..self.a.nrows())
                .into_par_iter()
                .map(|i| self.row_dot(i, x))
                .collect()
        }
        #[cfg(not(feature = "rayon"))]
        {
            (0..self.a.nrows()).map(|i| self.row_dot(i, x)).collect()
        }
    }

    /// Compute `(A·x)[idx]` without forming the full product.
    ///
    /// An out-of-range `idx` panics through the matrix indexing, the same as
    /// indexing the full product would.
    pub fn matvec_element(&self, x: &[T], idx: usize) -> T {
        assert_eq!(x.len(), self.a.ncols(), "input vector x has incorrect length");
        self.row_dot(idx, x)
    }

    /// Compute `Aᵗ·x`. `x.len()` must equal `m`.
    pub fn rmatvec(&self, x: &[T]) -> Vec<T> {
        assert_eq!(x.len(), self.a.nrows(), "input vector x has incorrect length");
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            (0..self.a.ncols())
                .into_par_iter()
                .map(|j| self.col_dot(j, x))
                .collect()
        }
        #[cfg(not(feature = "rayon"))]
        {
            (0..self.a.ncols()).map(|j| self.col_dot(j, x)).collect()
        }
    }

    /// Compute `(Aᵗ·x)[idx]`, the dot product of column `idx` with `x`.
    pub fn rmatvec_element(&self, x: &[T], idx: usize) -> T {
        assert_eq!(x.len(), self.a.nrows(), "input vector x has incorrect length");
        self.col_dot(idx, x)
    }

    /// Compute `A·X` for a batch of right-hand sides stacked as columns of `X`.
    pub fn matmat(&self, x: &Mat<T>) -> Mat<T> {
        assert_eq!(x.nrows(), self.a.ncols(), "input matrix X has incorrect row count");
        Mat::from_fn(self.a.nrows(), x.ncols(), |i, k| {
            let mut acc = T::zero();
            for j in 0..self.a.ncols() {
                acc = acc + self.a[(i, j)] * x[(j, k)];
            }
            acc
        })
    }

    /// Patch a cached forward product after the perturbation `x[idx] += delta`.
    ///
    /// A vector cache with a scalar step gets the rank-1 update
    /// `Ax + delta * A[:, idx]`; a matrix cache with per-column steps gets the
    /// outer-product update `Ax + outer(A[:, idx], delta)`. Any other pairing,
    /// or a cache/step whose length disagrees with the operator, is a
    /// [`LinformError::RankMismatch`].
    pub fn update_matvec(
        &self,
        ax: &Product<T>,
        delta: &Step<T>,
        idx: usize,
    ) -> Result<Product<T>, LinformError> {
        let m = self.a.nrows();
        match (ax, delta) {
            (Product::Vector(ax), Step::Scalar(d)) => {
                if ax.len() != m {
                    return Err(LinformError::RankMismatch(format!(
                        "cached product has length {}, operator has {} rows",
                        ax.len(),
                        m
                    )));
                }
                let out = (0..m).map(|i| ax[i] + *d * self.a[(i, idx)]).collect();
                Ok(Product::Vector(out))
            }
            (Product::Matrix(ax), Step::PerColumn(d)) => {
                if ax.nrows() != m || ax.ncols() != d.len() {
                    return Err(LinformError::RankMismatch(format!(
                        "cached product is {}x{}, expected {} rows and {} batch columns",
                        ax.nrows(),
                        ax.ncols(),
                        m,
                        d.len()
                    )));
                }
                let out =
                    Mat::from_fn(m, ax.ncols(), |i, k| ax[(i, k)] + self.a[(i, idx)] * d[k]);
                Ok(Product::Matrix(out))
            }
            _ => Err(LinformError::RankMismatch(
                "cached product should pair a vector with a scalar step or a matrix with \
                 per-column steps"
                    .into(),
            )),
        }
    }

    /// Patch a cached adjoint product after the perturbation `x[idx] += delta`:
    /// `ATx + delta * A[idx, :]`.
    ///
    /// Only vector caches are supported; a matrix cache fails with
    /// [`LinformError::Unsupported`]. The batched adjoint update has no caller
    /// and is left unimplemented rather than guessed at.
    pub fn update_rmatvec(
        &self,
        atx: &Product<T>,
        delta: T,
        idx: usize,
    ) -> Result<Vec<T>, LinformError> {
        let n = self.a.ncols();
        match atx {
            Product::Vector(atx) => {
                if atx.len() != n {
                    return Err(LinformError::RankMismatch(format!(
                        "cached adjoint product has length {}, operator has {} columns",
                        atx.len(),
                        n
                    )));
                }
                Ok((0..n).map(|j| atx[j] + delta * self.a[(idx, j)]).collect())
            }
            Product::Matrix(_) => Err(LinformError::Unsupported(
                "batched adjoint-product update",
            )),
        }
    }

    /// Per-column L2 norms of `A`, or squared norms when `squared` is set.
    ///
    /// Zero columns report a zero norm; callers dividing by these values guard
    /// against that themselves.
    pub fn column_l2_norms(&self, squared: bool) -> Vec<T> {
        let col_sq = |j: usize| {
            let mut acc = T::zero();
            for i in 0..self.a.nrows() {
                let v = self.a[(i, j)];
                acc = acc + v * v;
            }
            acc
        };
        #[cfg(feature = "rayon")]
        let sums: Vec<T> = {
            use rayon::prelude::*;
            (0..self.a.ncols()).into_par_iter().map(col_sq).collect()
        };
        #[cfg(not(feature = "rayon"))]
        let sums: Vec<T> = (0..self.a.ncols()).map(col_sq).collect();
        if squared {
            sums
        } else {
            sums.into_iter().map(|s| s.sqrt()).collect()
        }
    }
}

impl<T: Float + Send + Sync> LeafDecompose<T> for DenseOperator<T> {
    fn decompose(&self) -> Vec<Mat<T>> {
        vec![self.a.clone()]
    }

    fn recompose(mut leaves: Vec<Mat<T>>) -> Result<Self, LinformError> {
        let got = leaves.len();
        match (leaves.pop(), leaves.is_empty()) {
            (Some(a), true) => Ok(Self::new(a)),
            _ => Err(LinformError::LeafCount { expected: 1, got }),
        }
    }
}
