//! Common Helper Functions
//!
//! Conversions between token rows and Burn `Int` tensors.

use burn::tensor::{backend::Backend, Int, Tensor, TensorData};

use crate::error::{EvalError, Result};

/// Creates a `[rows, cols]` tensor from equally long token rows
pub fn create_batch_tensor<B: Backend>(
    data: &[Vec<u32>],
    device: &B::Device,
) -> Result<Tensor<B, 2, Int>> {
    let batch_size = data.len();
    let seq_len = data.first().map(|row| row.len()).unwrap_or(0);

    if let Some(row) = data.iter().find(|row| row.len() != seq_len) {
        return Err(EvalError::ShapeMismatch {
            expected: format!("rows of length {}", seq_len),
            got: format!("row of length {}", row.len()),
        });
    }

    // Burn CUDA & WGPU backends typically use i32 for Int tensors
    let flat = data
        .iter()
        .flatten()
        .map(|&x| i32::try_from(x).map_err(|_| EvalError::TokenIdOutOfRange(i64::from(x))))
        .collect::<Result<Vec<i32>>>()?;

    let tensor_data = TensorData::new(flat, [batch_size * seq_len]);
    let tensor: Tensor<B, 1, Int> = Tensor::from_data(tensor_data, device);

    Ok(tensor.reshape([batch_size, seq_len]))
}

/// Reads a `[rows, cols]` tensor back into token rows
pub fn tensor_rows<B: Backend>(tensor: Tensor<B, 2, Int>) -> Result<Vec<Vec<u32>>> {
    let [_, cols] = tensor.dims();
    let values: Vec<i64> = tensor.into_data().iter::<i64>().collect();

    if cols == 0 {
        return Ok(Vec::new());
    }

    values
        .chunks(cols)
        .map(|row| {
            row.iter()
                .map(|&x| u32::try_from(x).map_err(|_| EvalError::TokenIdOutOfRange(x)))
                .collect()
        })
        .collect()
}
