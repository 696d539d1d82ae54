// src/error.rs
// ============================================================================
// ERRORES - Fallos de exportación y de construcción de tensores
// ============================================================================

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errores de `export`.
///
/// Solo hay dos tipos: el destino no se pudo abrir (`Path`) o la escritura
/// falló después de abrirlo (`Io`). En el segundo caso los bytes ya escritos
/// se quedan en disco, no hay rollback.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No se pudo crear/abrir el destino (directorio padre inexistente,
    /// permisos, ruta inválida)
    #[error("Cannot create {}: {source}", .path.display())]
    Path {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Fallo de escritura, flush o sync tras abrir el archivo
    #[error("Write to {} failed after {written} bytes: {source}", .path.display())]
    Io {
        path: PathBuf,
        written: u64,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    pub fn is_path_error(&self) -> bool {
        matches!(self, Self::Path { .. })
    }

    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Ruta de destino implicada en el error
    pub fn path(&self) -> &Path {
        match self {
            Self::Path { path, .. } | Self::Io { path, .. } => path,
        }
    }

    /// Bytes que quedaron en el destino antes del fallo
    pub fn bytes_written(&self) -> u64 {
        match self {
            Self::Path { .. } => 0,
            Self::Io { written, .. } => *written,
        }
    }
}

/// Precondiciones al construir un tensor o una vista
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TensorError {
    #[error("Shape {dims:?} needs {expected} elements, got {actual}")]
    ShapeMismatch {
        dims: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error("Tensor must have at least one dimension")]
    ZeroRank,

    #[error("Shape {0:?} overflows usize element count")]
    Overflow(Vec<usize>),
}
