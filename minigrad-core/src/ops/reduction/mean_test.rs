use crate::ops::reduction::mean::mean_op;
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad};
use approx::assert_relative_eq;

#[test]
fn test_mean_forward_is_scalar() {
    let input = create_test_tensor(vec![1.0, 2.0, 3.0, 6.0], vec![2, 2]);
    let out = mean_op(&input).unwrap();
    assert_eq!(out.shape(), Vec::<usize>::new());
    assert_relative_eq!(out.item().unwrap(), 3.0);
}

#[test]
fn test_mean_backward_spreads_evenly() {
    let input = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 6.0, 0.0], vec![5]);
    mean_op(&input).unwrap().backward().unwrap();
    check_tensor_near(&input.grad().unwrap(), &[5], &[0.2; 5], 1e-12);
}
