//! Backend Selector
//!
//! Selects the Burn backend used by the CLI based on feature flags.
//! Evaluation never needs autodiff, so only inference backends are exported.

// ============ CUDA BACKEND ============
#[cfg(all(feature = "cuda", not(feature = "gpu")))]
mod backend_impl {
    pub use burn::backend::cuda_jit::{Cuda, CudaDevice};
    pub type MyBackend = Cuda;

    pub fn get_device() -> CudaDevice {
        CudaDevice::new(0)
    }

    pub fn name() -> &'static str {
        "CUDA"
    }
}

// ============ WGPU BACKEND ============
#[cfg(all(feature = "gpu", not(feature = "cuda")))]
mod backend_impl {
    pub use burn::backend::wgpu::{Wgpu, WgpuDevice};
    pub type MyBackend = Wgpu<f32, i32>;

    pub fn get_device() -> WgpuDevice {
        WgpuDevice::BestAvailable
    }

    pub fn name() -> &'static str {
        "WGPU"
    }
}

// ============ CPU (NDARRAY) BACKEND / FALLBACK ============
#[cfg(not(any(
    all(feature = "cuda", not(feature = "gpu")),
    all(feature = "gpu", not(feature = "cuda"))
)))]
mod backend_impl {
    pub use burn::backend::ndarray::{NdArray, NdArrayDevice};
    pub type MyBackend = NdArray;

    pub fn get_device() -> NdArrayDevice {
        NdArrayDevice::Cpu
    }

    pub fn name() -> &'static str {
        "CPU (NdArray)"
    }
}

// ============ PUBLIC EXPORTS ============
pub use backend_impl::{get_device, name as backend_name, MyBackend};
