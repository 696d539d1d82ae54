// src/raw/mod.rs
// ============================================================================
// RAW F32 - Formato de archivo sin cabecera
// ============================================================================
//
// Layout del archivo:
//   [0 .. 4*N]  N valores f32 IEEE-754, byte order nativo, sin separadores
//
// Sin magic, sin header, sin shape. El lector debe conocer el shape por
// otra vía (normalmente el shape invertido del tensor original).
//
// ============================================================================

pub mod writer;

pub use writer::RawWriter;

use crate::tensor::Shape;

/// Bytes por elemento (float32)
pub const ELEMENT_SIZE: usize = 4;

/// Tamaño exacto del archivo para un shape: 4 × producto de dims
pub fn expected_file_size(shape: &Shape) -> u64 {
    shape.numel() as u64 * ELEMENT_SIZE as u64
}
