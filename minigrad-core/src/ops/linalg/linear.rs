use crate::autograd::{should_track, Operation};
use crate::error::MinigradError;
use crate::tensor::Tensor;

/// Checks `x: [N, in]`, `weight: [in, out]`, `bias: [out]` and returns `(N, in, out)`.
fn linear_dims(
    x_shape: &[usize],
    w_shape: &[usize],
    b_shape: &[usize],
) -> Result<(usize, usize, usize), MinigradError> {
    if w_shape.len() != 2 {
        return Err(MinigradError::InvalidShape {
            shape: w_shape.to_vec(),
            operation: "linear weight (expected [in, out])".to_string(),
        });
    }
    let (in_features, out_features) = (w_shape[0], w_shape[1]);
    if x_shape.len() != 2 || x_shape[1] != in_features {
        return Err(MinigradError::ShapeMismatch {
            expected: vec![x_shape.first().copied().unwrap_or(1), in_features],
            actual: x_shape.to_vec(),
            operation: "linear input".to_string(),
        });
    }
    if b_shape != [out_features] {
        return Err(MinigradError::ShapeMismatch {
            expected: vec![out_features],
            actual: b_shape.to_vec(),
            operation: "linear bias".to_string(),
        });
    }
    Ok((x_shape[0], in_features, out_features))
}

/// Naive row-major matmul `[m, k] · [k, n]`.
fn matmul(a: &[f64], b: &[f64], m: usize, k: usize, n: usize) -> Vec<f64> {
    let mut out = vec![0.0; m * n];
    for i in 0..m {
        for p in 0..k {
            let a_ip = a[i * k + p];
            let row = &b[p * n..(p + 1) * n];
            for (o, &b_pj) in out[i * n..(i + 1) * n].iter_mut().zip(row) {
                *o += a_ip * b_pj;
            }
        }
    }
    out
}

fn transpose(a: &[f64], rows: usize, cols: usize) -> Vec<f64> {
    let mut out = vec![0.0; a.len()];
    for r in 0..rows {
        for c in 0..cols {
            out[c * rows + r] = a[r * cols + c];
        }
    }
    out
}

/// Computes `y = x·W + b` with the bias broadcast over the batch rows.
///
/// # Arguments
/// * `x` - `[batch, in_features]`
/// * `weight` - `[in_features, out_features]`
/// * `bias` - `[out_features]`
///
/// # Errors
/// `InvalidShape` for a non-matrix weight, `ShapeMismatch` when `x` or `bias`
/// do not line up with it.
pub fn linear_op(x: &Tensor, weight: &Tensor, bias: &Tensor) -> Result<Tensor, MinigradError> {
    let (batch, in_features, out_features) = linear_dims(&x.shape(), &weight.shape(), &bias.shape())?;

    // Copies, as the same tensor may be passed twice.
    let x_data = x.to_vec();
    let w_data = weight.to_vec();
    let b_data = bias.to_vec();

    let mut out = matmul(&x_data, &w_data, batch, in_features, out_features);
    for row in out.chunks_mut(out_features) {
        for (o, b) in row.iter_mut().zip(b_data.iter()) {
            *o += *b;
        }
    }

    let output = Tensor::new(out, vec![batch, out_features])?;
    if should_track(&[x, weight, bias]) {
        output.attach_node(
            Operation::Linear {
                input: x_data,
                weight: w_data,
                in_features,
                out_features,
            },
            vec![x.clone(), weight.clone(), bias.clone()],
        );
    }
    Ok(output)
}

/// Gradients `[dx, dW, db]` of `y = x·W + b` from the forward-time `x` and `W`:
/// `dx = g·Wᵗ`, `dW = xᵗ·g`, `db = column-sum(g)`.
///
/// Entries whose `wanted` flag is false are `None`.
pub(crate) fn linear_backward(
    input: &[f64],
    weight: &[f64],
    in_features: usize,
    out_features: usize,
    grad_output: &[f64],
    wanted: &[bool],
) -> Result<Vec<Option<Vec<f64>>>, MinigradError> {
    let batch = input.len() / in_features.max(1);
    if weight.len() != in_features * out_features
        || input.len() != batch * in_features
        || grad_output.len() != batch * out_features
    {
        return Err(MinigradError::ShapeMismatch {
            expected: vec![batch, out_features],
            actual: vec![grad_output.len()],
            operation: "linear backward".to_string(),
        });
    }

    let want = |i: usize| wanted.get(i).copied().unwrap_or(false);

    let grad_x = want(0).then(|| {
        let w_t = transpose(weight, in_features, out_features);
        matmul(grad_output, &w_t, batch, out_features, in_features)
    });
    let grad_w = want(1).then(|| {
        let x_t = transpose(input, batch, in_features);
        matmul(&x_t, grad_output, in_features, batch, out_features)
    });
    let grad_b = want(2).then(|| {
        let mut sums = vec![0.0; out_features];
        for row in grad_output.chunks(out_features) {
            for (s, g) in sums.iter_mut().zip(row) {
                *s += *g;
            }
        }
        sums
    });

    Ok(vec![grad_x, grad_w, grad_b])
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
