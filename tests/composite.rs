//! Tests for composite objectives: evaluation against a hand-computed
//! least-squares loss and per-column Lipschitz constants.

use approx::assert_abs_diff_eq;
use linform::composite::CompositeLinearFunction;
use linform::core::traits::Curvature;
use linform::operator::DenseOperator;
use rand::Rng;

/// g(z; y) = 0.5 ‖z - y‖², the least-squares outer loss.
fn half_squared_residual(z: &[f64], y: &Vec<f64>) -> f64 {
    z.iter()
        .zip(y)
        .map(|(zi, yi)| 0.5 * (zi - yi) * (zi - yi))
        .sum()
}

#[test]
fn evaluates_least_squares_objective() {
    let op = DenseOperator::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]);
    let f = CompositeLinearFunction::new(half_squared_residual, &op);
    let y = vec![1.0, 1.0, 1.0];
    // Ax = [2,3,5], residual = [1,2,4]
    assert_abs_diff_eq!(
        f.evaluate(&[2.0, 3.0], &y),
        0.5 * (1.0 + 4.0 + 16.0),
        epsilon = 1e-12
    );
}

#[test]
fn missing_offset_equals_zero_offset() {
    let mut rng = rand::thread_rng();
    let (m, n) = (6, 4);
    let vals: Vec<f64> = (0..m * n).map(|_| rng.r#gen::<f64>() - 0.5).collect();
    let op = DenseOperator::from_raw(m, n, vals);
    let without = CompositeLinearFunction::new(half_squared_residual, &op);
    let with_zero =
        CompositeLinearFunction::new(half_squared_residual, &op).with_offset(vec![0.0; n]);
    let x: Vec<f64> = (0..n).map(|_| rng.r#gen()).collect();
    let y: Vec<f64> = (0..m).map(|_| rng.r#gen()).collect();
    assert_abs_diff_eq!(
        without.evaluate(&x, &y),
        with_zero.evaluate(&x, &y),
        epsilon = 0.0
    );
}

#[test]
fn offset_adds_the_inner_product() {
    let op = DenseOperator::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
    let b = vec![-1.0, 2.0];
    let f = CompositeLinearFunction::new(half_squared_residual, &op).with_offset(b.clone());
    let g = CompositeLinearFunction::new(half_squared_residual, &op);
    let x = [0.5, -1.5];
    let y = vec![0.0, 0.0];
    let inner = x[0] * b[0] + x[1] * b[1];
    assert_abs_diff_eq!(f.evaluate(&x, &y), g.evaluate(&x, &y) + inner, epsilon = 1e-12);
}

#[test]
fn lipschitz_constants_default_to_squared_column_norms() {
    let mut rng = rand::thread_rng();
    let (m, n) = (5, 3);
    let vals: Vec<f64> = (0..m * n).map(|_| rng.r#gen()).collect();
    let op = DenseOperator::from_raw(m, n, vals);
    let f = CompositeLinearFunction::new(half_squared_residual, &op);
    let y = vec![0.0; m];
    assert_eq!(f.column_lipschitz_constants(&y), op.column_l2_norms(true));
}

#[test]
fn uniform_curvature_broadcasts() {
    let op = DenseOperator::from_rows(&[vec![1.0, 0.0], vec![0.0, 2.0]]);
    // logistic-style outer bound: g'' <= 1/4
    let f = CompositeLinearFunction::new(half_squared_residual, &op)
        .with_lipschitz(|_: &Vec<f64>| Curvature::Uniform(0.25));
    let y = vec![0.0, 0.0];
    assert_eq!(f.column_lipschitz_constants(&y), vec![0.25, 1.0]);
}

#[test]
fn per_column_curvature_multiplies_elementwise() {
    let op = DenseOperator::from_rows(&[vec![1.0, 0.0], vec![0.0, 2.0]]);
    let f = CompositeLinearFunction::new(half_squared_residual, &op)
        .with_lipschitz(|_: &Vec<f64>| Curvature::PerColumn(vec![2.0, 0.5]));
    let y = vec![0.0, 0.0];
    assert_eq!(f.column_lipschitz_constants(&y), vec![2.0, 2.0]);
}
