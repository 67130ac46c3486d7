//! linform: dense linear operators and composite objectives for
//! coordinate-descent and proximal-gradient solvers.
//!
//! This crate provides [`DenseOperator`], a faer-backed dense matrix wrapper with
//! forward/adjoint products, single-coordinate product queries, and O(m) rank-1
//! maintenance of cached products under per-coordinate steps, and
//! [`CompositeLinearFunction`], an objective `f(x) = g(Ax) + <x, b>` with
//! per-column Lipschitz estimates for step-size selection.

pub mod composite;
pub mod core;
pub mod error;
pub mod operator;

// Re-exports for convenience
pub use crate::composite::*;
pub use crate::core::*;
pub use crate::error::*;
pub use crate::operator::*;
