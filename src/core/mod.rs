//! Core traits shared by the operator and composite layers.

pub mod traits;

pub use traits::{Curvature, LeafDecompose, LipschitzFun, SubFunction};
