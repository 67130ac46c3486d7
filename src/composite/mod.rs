//! Composite objectives of the form `f(x; params) = g(A·x; params) + <x, b>`.

use log::debug;
use num_traits::Float;

use crate::core::traits::{Curvature, LipschitzFun, SubFunction};
use crate::operator::DenseOperator;

fn vdot<T: Float>(x: &[T], y: &[T]) -> T {
    assert_eq!(x.len(), y.len(), "vectors must have the same length");
    x.iter()
        .zip(y)
        .fold(T::zero(), |acc, (xi, yi)| acc + *xi * *yi)
}

/// An objective split into a linear part (via [`DenseOperator`]) and an
/// arbitrary outer function `g`:
///
/// ```text
/// f(x, params) = subfun(A·x, params) + vdot(x, b)
/// ```
///
/// The operator is shared by reference and must outlive the composite; `b`
/// and the curvature estimate are optional. Assembled once, then queried
/// repeatedly by a solver loop; nothing here carries mutable state.
pub struct CompositeLinearFunction<'a, T, P> {
    subfun: Box<dyn SubFunction<T, P> + 'a>,
    linop: &'a DenseOperator<T>,
    b: Option<Vec<T>>,
    lipschitz_fun: Option<Box<dyn LipschitzFun<T, P> + 'a>>,
}

impl<'a, T: Float + Send + Sync, P> CompositeLinearFunction<'a, T, P> {
    /// Compose an outer function with a linear operator.
    pub fn new(subfun: impl SubFunction<T, P> + 'a, linop: &'a DenseOperator<T>) -> Self {
        let (m, n) = linop.shape();
        debug!("composite over {}x{} operator", m, n);
        Self {
            subfun: Box::new(subfun),
            linop,
            b: None,
            lipschitz_fun: None,
        }
    }

    /// Add the linear offset `<x, b>`. `b.len()` must equal the operator's
    /// column count.
    pub fn with_offset(mut self, b: Vec<T>) -> Self {
        assert_eq!(b.len(), self.linop.ncols(), "offset b has incorrect length");
        self.b = Some(b);
        self
    }

    /// Supply a curvature estimate for the outer function, used to scale the
    /// per-column Lipschitz constants.
    pub fn with_lipschitz(mut self, f: impl LipschitzFun<T, P> + 'a) -> Self {
        self.lipschitz_fun = Some(Box::new(f));
        self
    }

    /// The underlying operator.
    pub fn operator(&self) -> &DenseOperator<T> {
        self.linop
    }

    /// Evaluate `f(x, params)`.
    ///
    /// Whatever the outer function raises propagates unchanged.
    pub fn evaluate(&self, x: &[T], params: &P) -> T {
        let ax = self.linop.matvec(x);
        let val = self.subfun.evaluate(&ax, params);
        match &self.b {
            Some(b) => val + vdot(x, b),
            None => val,
        }
    }

    /// Per-column Lipschitz constants: the operator's squared column norms,
    /// scaled by the outer curvature estimate when one was supplied.
    ///
    /// Without a curvature estimate this is exactly
    /// `column_l2_norms(squared = true)`, the curvature of `‖Ax‖²` along each
    /// coordinate. Zero columns yield zero constants; step-size computations
    /// dividing by these guard against that downstream.
    pub fn column_lipschitz_constants(&self, params: &P) -> Vec<T> {
        let mut ret = self.linop.column_l2_norms(true);
        if let Some(lf) = &self.lipschitz_fun {
            match lf.evaluate(params) {
                Curvature::Uniform(s) => {
                    for r in &mut ret {
                        *r = *r * s;
                    }
                }
                Curvature::PerColumn(v) => {
                    assert_eq!(
                        v.len(),
                        ret.len(),
                        "per-column curvature has incorrect length"
                    );
                    for (r, vi) in ret.iter_mut().zip(&v) {
                        *r = *r * *vi;
                    }
                }
            }
        }
        ret
    }
}
