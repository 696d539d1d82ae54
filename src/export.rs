// src/export.rs
// ============================================================================
// EXPORT - Tensor -> archivo raw float32 column-major
// ============================================================================
//
// Pasos:
//   1. invertir ejes (solo dims/strides)
//   2. recorrer la vista invertida en row-major -> export buffer
//   3. convertir cada valor a f32
//   4. crear/truncar el archivo, escribir, flush + fsync
//
// No hay write-then-rename: un lector concurrente puede ver el archivo a
// medio escribir. Dos exports al mismo path a la vez no se serializan.
//
// ============================================================================

use std::path::Path;

use crate::error::ExportError;
use crate::layout::export_buffer;
use crate::raw::{expected_file_size, RawWriter};
use crate::tensor::{Element, Tensor, TensorView};

/// Exporta `tensor` a `path`.
///
/// El archivo contiene `4 × numel` bytes: los valores en orden column-major
/// (el primer eje varía más rápido), como f32 en byte order nativo, sin
/// cabecera. Si `T` es más ancho que f32 la conversión pierde precisión
/// (ver [`Element`]); no es un error.
///
/// Errores:
/// - [`ExportError::Path`] si no se puede crear el archivo; no se crea nada.
/// - [`ExportError::Io`] si falla la escritura; lo escrito se queda en disco.
pub fn export<T: Element>(path: impl AsRef<Path>, tensor: &Tensor<T>) -> Result<(), ExportError> {
    export_view(path, tensor.view())
}

/// Igual que [`export`] pero sobre un buffer prestado
pub fn export_view<T: Element>(
    path: impl AsRef<Path>,
    view: TensorView<'_, T>,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let shape = view.shape();

    log::debug!("export {} {} ({}) -> {}", T::NAME, shape, shape.numel(), path.display());
    if T::NARROWING {
        log::debug!("{}: {} -> f32 is a narrowing conversion", path.display(), T::NAME);
    }

    let buffer = export_buffer(&view);

    let mut writer = RawWriter::create(path)?;
    writer.write_values(&buffer)?;
    let written = writer.sync_all()?;

    let expected = expected_file_size(shape);
    debug_assert_eq!(written, expected);
    log::debug!("{}: {} bytes written", path.display(), written);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TensorError;
    use byteorder::{ByteOrder, NativeEndian};
    use half::f16;
    use tempfile::TempDir;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn read_f32s(path: &Path) -> Vec<f32> {
        let bytes = std::fs::read(path).unwrap();
        assert_eq!(bytes.len() % 4, 0);
        let mut values = vec![0.0f32; bytes.len() / 4];
        NativeEndian::read_f32_into(&bytes, &mut values);
        values
    }

    #[test]
    fn test_export_2x3() -> anyhow::Result<()> {
        init_logger();
        let dir = TempDir::new()?;
        let path = dir.path().join("t.bin");

        let t = Tensor::new([2, 3], vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0])?;
        export(&path, &t)?;

        let mut expected = Vec::new();
        for v in [1.0f32, 4.0, 2.0, 5.0, 3.0, 6.0] {
            expected.extend_from_slice(&v.to_ne_bytes());
        }
        assert_eq!(std::fs::read(&path)?, expected);
        Ok(())
    }

    #[test]
    fn test_file_size_is_4x_numel() -> anyhow::Result<()> {
        init_logger();
        let dir = TempDir::new()?;
        for dims in [vec![1], vec![17], vec![3, 5], vec![2, 3, 4], vec![2, 1, 3, 1, 2]] {
            let t = Tensor::from_fn(dims.clone(), |i| i as f64)?;
            let path = dir.path().join("size.bin");
            export(&path, &t)?;
            let len = std::fs::metadata(&path)?.len();
            assert_eq!(len, 4 * dims.iter().product::<usize>() as u64, "dims {:?}", dims);
        }
        Ok(())
    }

    #[test]
    fn test_1d_keeps_order() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("v.bin");
        let t = Tensor::new([5], vec![3i16, -1, 4, -1, 5])?;
        export(&path, &t)?;
        assert_eq!(read_f32s(&path), vec![3.0, -1.0, 4.0, -1.0, 5.0]);
        Ok(())
    }

    #[test]
    fn test_2d_byte_offsets() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("m.bin");
        let (r, c) = (3, 4);
        let t = Tensor::from_fn([r, c], |i| (i * 10) as f32)?;
        export(&path, &t)?;

        let bytes = std::fs::read(&path)?;
        for i in 0..r {
            for j in 0..c {
                let off = 4 * (j * r + i);
                let v = NativeEndian::read_f32(&bytes[off..off + 4]);
                assert_eq!(v, t.get(&[i, j]).unwrap());
            }
        }
        Ok(())
    }

    #[test]
    fn test_round_trip_via_reversed_shape() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("rt.bin");
        let t = Tensor::from_fn([2, 3, 4], |i| 0.1 * i as f64)?;
        export(&path, &t)?;

        // El lector reinterpreta los bytes en row-major sobre el shape
        // invertido y luego deshace la inversión
        let values = read_f32s(&path);
        let reversed = t.shape().reversed();
        for a in 0..2 {
            for b in 0..3 {
                for c in 0..4 {
                    let pos = reversed.row_major_index(&[c, b, a]).unwrap();
                    assert_eq!(values[pos], t.get(&[a, b, c]).unwrap() as f32);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_zero_dimension_writes_empty_file() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("empty.bin");
        let t = Tensor::<f32>::new([3, 0, 2], Vec::new())?;
        export(&path, &t)?;
        assert!(path.exists());
        assert_eq!(std::fs::metadata(&path)?.len(), 0);
        Ok(())
    }

    #[test]
    fn test_truncates_existing_file() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("old.bin");
        std::fs::write(&path, vec![0xAB; 1000])?;

        let t = Tensor::new([2], vec![1.0f32, 2.0])?;
        export(&path, &t)?;
        assert_eq!(read_f32s(&path), vec![1.0, 2.0]);
        Ok(())
    }

    #[test]
    fn test_missing_parent_is_path_error() -> anyhow::Result<()> {
        init_logger();
        let dir = TempDir::new()?;
        let path = dir.path().join("no_such_dir").join("out.bin");
        let t = Tensor::new([2, 2], vec![0.0f32; 4])?;

        let err = export(&path, &t).unwrap_err();
        assert!(err.is_path_error(), "{}", err);
        assert_eq!(err.path(), path.as_path());
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn test_directory_as_path_is_path_error() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let t = Tensor::new([1], vec![1.0f32])?;
        let err = export(dir.path(), &t).unwrap_err();
        assert!(err.is_path_error());
        Ok(())
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_full_device_is_io_error() -> anyhow::Result<()> {
        init_logger();
        let path = Path::new("/dev/full");
        if !path.exists() {
            return Ok(());
        }
        let t = Tensor::from_fn([64, 64], |i| i as f32)?;

        let err = export(path, &t).unwrap_err();
        assert!(err.is_io_error(), "{}", err);
        assert_eq!(err.path(), path);
        assert_eq!(err.bytes_written(), 0);
        Ok(())
    }

    #[test]
    fn test_f64_narrowing_saturates() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("wide.bin");
        let t = Tensor::new([4], vec![1e300f64, -1e300, 0.1, f64::NAN])?;
        export(&path, &t)?;

        let values = read_f32s(&path);
        assert_eq!(values[0], f32::INFINITY);
        assert_eq!(values[1], f32::NEG_INFINITY);
        assert_eq!(values[2], 0.1f32);
        assert!(values[3].is_nan());
        Ok(())
    }

    #[test]
    fn test_half_input() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("half.bin");
        let data: Vec<f16> = [0.5f32, 1.0, 1.5, 2.0].iter().map(|&v| f16::from_f32(v)).collect();
        let t = Tensor::new([2, 2], data)?;
        export(&path, &t)?;
        assert_eq!(read_f32s(&path), vec![0.5, 1.5, 1.0, 2.0]);
        Ok(())
    }

    #[test]
    fn test_export_view_borrowed_buffer() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("view.bin");
        let buf = [1u8, 2, 3, 4, 5, 6];
        let view = TensorView::new([3, 2], &buf[..])?;
        export_view(&path, view)?;
        assert_eq!(read_f32s(&path), vec![1.0, 3.0, 5.0, 2.0, 4.0, 6.0]);
        Ok(())
    }

    #[test]
    fn test_large_tensor() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("large.bin");
        let (r, c) = (512, 300);
        let t = Tensor::from_fn([r, c], |i| i as f32)?;
        export(&path, &t)?;

        let values = read_f32s(&path);
        assert_eq!(values.len(), r * c);
        assert_eq!(values[r * 7 + 11], t.get(&[11, 7]).unwrap());
        Ok(())
    }

    #[test]
    fn test_shape_errors_before_export() {
        let err = TensorView::new([2, 2], &[1.0f32, 2.0][..]).unwrap_err();
        assert!(matches!(err, TensorError::ShapeMismatch { .. }));
    }
}
