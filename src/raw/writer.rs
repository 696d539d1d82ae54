// src/raw/writer.rs
// ============================================================================
// RAW WRITER - Escribe valores f32 en byte order nativo
// ============================================================================
//
// El writer es dueño del handle: cualquier salida (Ok, Err, panic) lo cierra
// al hacer drop. Si una escritura falla a mitad, los bytes que ya llegaron al
// destino se quedan ahí; no se borra ni se trunca nada.
//
// ============================================================================

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use byteorder::{ByteOrder, NativeEndian};

use super::ELEMENT_SIZE;
use crate::error::ExportError;

/// Elementos codificados por cada llamada a `write_all`
pub const WRITE_CHUNK_ELEMS: usize = 16 * 1024;

/// Cuenta los bytes que el destino ha aceptado realmente
struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Writer de archivos raw float32
pub struct RawWriter<W: Write> {
    // `None` tras un fallo: el buffer pendiente ya se descartó
    sink: Option<BufWriter<CountingWriter<W>>>,
    path: PathBuf,
    scratch: Vec<u8>,
    values_written: u64,
    flushed_at_failure: u64,
}

impl RawWriter<File> {
    /// Crea (o trunca) el archivo destino
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ExportError::Path {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_writer(file, path))
    }

    /// Flush + fsync. Devuelve el total de bytes en disco.
    pub fn sync_all(self) -> Result<u64, ExportError> {
        let path = self.path.clone();
        let (file, written) = self.finish_counted()?;
        file.sync_all().map_err(|source| ExportError::Io { path, written, source })?;
        Ok(written)
    }
}

impl<W: Write> RawWriter<W> {
    /// Envuelve un destino arbitrario. `path` solo se usa en los errores.
    pub fn from_writer(inner: W, path: impl Into<PathBuf>) -> Self {
        Self {
            sink: Some(BufWriter::new(CountingWriter { inner, count: 0 })),
            path: path.into(),
            scratch: Vec::with_capacity(WRITE_CHUNK_ELEMS * ELEMENT_SIZE),
            values_written: 0,
            flushed_at_failure: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Codifica y escribe `values` a continuación de lo ya escrito
    pub fn write_values(&mut self, values: &[f32]) -> Result<(), ExportError> {
        for chunk in values.chunks(WRITE_CHUNK_ELEMS) {
            self.scratch.resize(chunk.len() * ELEMENT_SIZE, 0);
            NativeEndian::write_f32_into(chunk, &mut self.scratch);

            let result = match self.sink.as_mut() {
                Some(sink) => sink.write_all(&self.scratch),
                None => Err(already_failed()),
            };
            if let Err(e) = result {
                return Err(self.fail(e));
            }
            self.values_written += chunk.len() as u64;

            log::trace!("{}: +{} values", self.path.display(), chunk.len());
        }
        Ok(())
    }

    /// Bytes aceptados por el writer (incluye los que siguen en buffer)
    pub fn bytes_queued(&self) -> u64 {
        self.values_written * ELEMENT_SIZE as u64
    }

    /// Bytes que ya llegaron al destino
    pub fn bytes_flushed(&self) -> u64 {
        match &self.sink {
            Some(sink) => sink.get_ref().count,
            None => self.flushed_at_failure,
        }
    }

    /// Vacía el buffer y devuelve el destino
    pub fn finish(self) -> Result<W, ExportError> {
        self.finish_counted().map(|(inner, _)| inner)
    }

    fn finish_counted(mut self) -> Result<(W, u64), ExportError> {
        let result = match self.sink.as_mut() {
            Some(sink) => sink.flush(),
            None => Err(already_failed()),
        };
        if let Err(e) = result {
            return Err(self.fail(e));
        }
        match self.sink.take() {
            Some(sink) => {
                // El flush ya vació el buffer
                let (counting, _) = sink.into_parts();
                Ok((counting.inner, counting.count))
            }
            None => Err(self.fail(already_failed())),
        }
    }

    /// Descarta el buffer pendiente (un solo intento de escritura, el drop
    /// no debe reintentar) y construye el error
    fn fail(&mut self, source: io::Error) -> ExportError {
        if let Some(sink) = self.sink.take() {
            let (counting, _pending) = sink.into_parts();
            self.flushed_at_failure = counting.count;
        }
        let written = self.flushed_at_failure;
        log::warn!(
            "{}: write failed, {} bytes left on disk: {}",
            self.path.display(),
            written,
            source
        );
        ExportError::Io { path: self.path.clone(), written, source }
    }
}

fn already_failed() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "writer already failed")
}
