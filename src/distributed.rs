//! Multi-process coordination seam
//!
//! The evaluator only asks two things of a coordinator: whether this process
//! is the primary one, and to gather a per-process tensor across workers.

use burn::tensor::{backend::Backend, Tensor};

use crate::error::Result;

pub trait Coordinator<B: Backend> {
    /// True on the single process that performs non-duplicated side effects.
    fn is_main_process(&self) -> bool;

    /// True on the primary process of the current machine.
    fn is_local_main_process(&self) -> bool {
        self.is_main_process()
    }

    /// Concatenates `tensor` from every worker along dimension 0.
    fn gather(&self, tensor: Tensor<B, 1>) -> Result<Tensor<B, 1>>;
}

/// Coordinator for a single process: always primary, gather is identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleProcess;

impl<B: Backend> Coordinator<B> for SingleProcess {
    fn is_main_process(&self) -> bool {
        true
    }

    fn gather(&self, tensor: Tensor<B, 1>) -> Result<Tensor<B, 1>> {
        Ok(tensor)
    }
}
