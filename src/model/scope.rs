use std::ops::{Deref, DerefMut};

use burn::tensor::backend::Backend;

use super::traits::Seq2SeqModel;

/// Disables gradient tracking on a model until dropped.
///
/// The previous tracking state is restored on drop, including when the
/// scope is left through `?`.
pub struct NoGradScope<'m, B: Backend, M: Seq2SeqModel<B>> {
    model: &'m mut M,
    previous: bool,
    _backend: std::marker::PhantomData<B>,
}

impl<'m, B: Backend, M: Seq2SeqModel<B>> NoGradScope<'m, B, M> {
    pub fn enter(model: &'m mut M) -> Self {
        let previous = model.set_grad_enabled(false);
        Self {
            model,
            previous,
            _backend: std::marker::PhantomData,
        }
    }
}

impl<B: Backend, M: Seq2SeqModel<B>> Deref for NoGradScope<'_, B, M> {
    type Target = M;

    fn deref(&self) -> &M {
        self.model
    }
}

impl<B: Backend, M: Seq2SeqModel<B>> DerefMut for NoGradScope<'_, B, M> {
    fn deref_mut(&mut self) -> &mut M {
        self.model
    }
}

impl<B: Backend, M: Seq2SeqModel<B>> Drop for NoGradScope<'_, B, M> {
    fn drop(&mut self) {
        self.model.set_grad_enabled(self.previous);
    }
}
