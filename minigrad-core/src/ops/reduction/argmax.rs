use crate::error::MinigradError;
use crate::ops::axis_layout;
use crate::tensor::Tensor;

/// Index of the largest value along `axis`, one entry per lane in row-major
/// order of the remaining axes. Ties resolve to the first index.
///
/// Not differentiable; no graph node is recorded.
pub fn argmax_op(input: &Tensor, axis: usize) -> Result<Vec<usize>, MinigradError> {
    let guard = input.read_data();
    let (outer, dim, inner) = axis_layout(&guard.shape, axis)?;
    let values = &guard.data;

    let mut indices = Vec::with_capacity(outer * inner);
    for o in 0..outer {
        for i in 0..inner {
            let at = |c: usize| (o * dim + c) * inner + i;
            let mut best = 0;
            for c in 1..dim {
                if values[at(c)] > values[at(best)] {
                    best = c;
                }
            }
            indices.push(best);
        }
    }
    Ok(indices)
}

#[cfg(test)]
#[path = "argmax_test.rs"]
mod tests;
