use super::*;
use crate::utils::testing::{create_test_tensor, create_test_tensor_with_grad};

#[test]
fn test_check_grad_passes_for_square_mean() {
    let x = create_test_tensor_with_grad(vec![0.3, -1.2, 2.0, 0.0], vec![2, 2]);
    let func = |inputs: &[Tensor]| inputs[0].pow(2.0)?.mean();
    assert!(check_grad(func, &[x.clone()], 1e-6, 1e-6).is_ok());
    // The analytical gradient is left in the buffer.
    assert!(x.grad().is_some());
}

#[test]
fn test_check_grad_skips_untracked_inputs() {
    let x = create_test_tensor_with_grad(vec![1.0, 2.0], vec![1, 2]);
    let w = create_test_tensor(vec![0.5, -0.5, 1.0, 2.0], vec![2, 2]);
    let b = create_test_tensor(vec![0.1, 0.2], vec![2]);
    let func = |inputs: &[Tensor]| inputs[0].linear(&inputs[1], &inputs[2])?.sigmoid()?.mean();
    assert!(check_grad(func, &[x, w, b], 1e-6, 1e-6).is_ok());
}

#[test]
fn test_check_grad_detects_wrong_gradient() {
    // f(x) = x · detach(x): the perturbation reaches both factors, the graph only one.
    let x = create_test_tensor_with_grad(vec![3.0], vec![1, 1]);
    let bias = create_test_tensor(vec![0.0], vec![1]);
    let func = |inputs: &[Tensor]| {
        let frozen = inputs[0].detach();
        inputs[0].linear(&frozen, &bias)?.mean()
    };
    let result = check_grad(func, &[x], 1e-6, 1e-6);
    assert!(matches!(result, Err(GradCheckError::GradientMismatch { .. })));
}

#[test]
fn test_check_grad_rejects_non_scalar_output() {
    let x = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let func = |inputs: &[Tensor]| inputs[0].relu();
    assert!(matches!(
        check_grad(func, &[x], 1e-6, 1e-6),
        Err(GradCheckError::NonScalarOutput { .. })
    ));
}

#[test]
fn test_check_grad_rejects_non_leaf_input() {
    let x = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let y = x.relu().unwrap();
    let func = |inputs: &[Tensor]| inputs[0].mean();
    assert_eq!(
        check_grad(func, &[y], 1e-6, 1e-6).unwrap_err(),
        GradCheckError::InputNotLeaf { input_index: 0 }
    );
}
