use crate::autograd::grad_check::check_grad;
use crate::error::MinigradError;
use crate::ops::linalg::linear::linear_op;
use crate::tensor::{randn, Tensor};
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_linear_forward() {
    let x = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    let w = create_test_tensor(vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0], vec![3, 2]);
    let b = create_test_tensor(vec![0.5, -0.5], vec![2]);
    let y = linear_op(&x, &w, &b).unwrap();
    check_tensor_near(&y, &[2, 2], &[4.5, 4.5, 10.5, 10.5], 1e-12);
    assert!(!y.requires_grad());
}

#[test]
fn test_linear_backward_closed_form() {
    let x = create_test_tensor(vec![1.0, 2.0], vec![1, 2]);
    let w = create_test_tensor_with_grad(vec![0.1, 0.2, 0.3, 0.4], vec![2, 2]);
    let b = create_test_tensor_with_grad(vec![0.0, 0.0], vec![2]);
    let y = linear_op(&x, &w, &b).unwrap();
    y.mean().unwrap().backward().unwrap();

    // g = 0.5 everywhere: dW = xᵗ·g, db = column sums.
    check_tensor_near(&w.grad().unwrap(), &[2, 2], &[0.5, 0.5, 1.0, 1.0], 1e-12);
    check_tensor_near(&b.grad().unwrap(), &[2], &[0.5, 0.5], 1e-12);
    // x was never tracked.
    assert_eq!(x.try_grad().unwrap_err(), MinigradError::UntrackedGradientAccess);
}

#[test]
fn test_linear_grad_check_all_inputs() {
    let mut rng = StdRng::seed_from_u64(7);
    let x = randn(&[4, 3], &mut rng).unwrap();
    let w = randn(&[3, 2], &mut rng).unwrap();
    let b = randn(&[2], &mut rng).unwrap();
    for t in [&x, &w, &b] {
        t.requires_grad_(true).unwrap();
    }
    let func = |inputs: &[Tensor]| {
        linear_op(&inputs[0], &inputs[1], &inputs[2])?
            .sigmoid()?
            .mean()
    };
    let result = check_grad(func, &[x, w, b], 1e-6, 1e-6);
    assert!(result.is_ok(), "Linear grad check failed: {:?}", result.err());
}

#[test]
fn test_linear_same_tensor_twice() {
    // x·x + b with a square x feeds one storage to both operands.
    let a = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let b = create_test_tensor(vec![0.0, 0.0], vec![2]);
    let func = |inputs: &[Tensor]| linear_op(&inputs[0], &inputs[0], &b)?.mean();
    let result = check_grad(func, &[a], 1e-6, 1e-6);
    assert!(result.is_ok(), "Shared-input grad check failed: {:?}", result.err());
}

#[test]
fn test_linear_shape_errors() {
    let w = create_test_tensor(vec![0.0; 6], vec![3, 2]);
    let b = create_test_tensor(vec![0.0; 2], vec![2]);

    let bad_x = create_test_tensor(vec![0.0; 4], vec![2, 2]);
    assert!(matches!(
        linear_op(&bad_x, &w, &b),
        Err(MinigradError::ShapeMismatch { .. })
    ));

    let x = create_test_tensor(vec![0.0; 3], vec![1, 3]);
    let bad_b = create_test_tensor(vec![0.0; 3], vec![3]);
    assert!(matches!(
        linear_op(&x, &w, &bad_b),
        Err(MinigradError::ShapeMismatch { .. })
    ));

    let flat_w = create_test_tensor(vec![0.0; 6], vec![6]);
    assert!(matches!(
        linear_op(&x, &flat_w, &b),
        Err(MinigradError::InvalidShape { .. })
    ));
}
