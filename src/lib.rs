// src/lib.rs
// ============================================================================
// TENSOR-EXPORT - Volcado de tensores a raw float32 column-major
// ============================================================================
//
// Uso:
//   let t = Tensor::new([2, 3], vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0])?;
//   tensor_export::export("weights.bin", &t)?;
//   // weights.bin = f32 [1, 4, 2, 5, 3, 6], 24 bytes, sin cabecera
//
// ============================================================================

pub mod error;
pub mod export;
pub mod layout;
pub mod raw;
pub mod tensor;

// Re-exports principales
pub use error::{ExportError, TensorError};
pub use export::{export, export_view};
pub use layout::{export_buffer, ReversedAxes};
pub use raw::{expected_file_size, RawWriter, ELEMENT_SIZE};
pub use tensor::{Element, Shape, Tensor, TensorView};
