use crate::error::HashError;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Streams a file as fixed-size chunks through one reusable buffer.
///
/// Every chunk but the last is exactly `chunk_size` bytes; an empty file
/// yields no chunks. Memory use is one buffer regardless of file size.
pub struct ChunkReader<R = File> {
    inner: R,
    path: PathBuf,
    buf: Vec<u8>,
    done: bool,
}

impl ChunkReader<File> {
    pub fn open(path: &Path, chunk_size: usize) -> Result<Self, HashError> {
        if path.as_os_str().is_empty() {
            return Err(HashError::NotFound { path: PathBuf::new() });
        }
        let file = File::open(path).map_err(|e| HashError::from_open(e, path))?;
        let meta = file.metadata().map_err(|e| HashError::from_open(e, path))?;
        if meta.is_dir() {
            return Err(HashError::NotFound { path: path.to_path_buf() });
        }
        Ok(Self::from_reader(file, path, chunk_size))
    }
}

impl<R: Read> ChunkReader<R> {
    pub fn from_reader(inner: R, path: &Path, chunk_size: usize) -> Self {
        ChunkReader {
            inner,
            path: path.to_path_buf(),
            buf: vec![0u8; chunk_size.max(1)],
            done: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn chunk_size(&self) -> usize {
        self.buf.len()
    }

    /// Next chunk in file order, or `None` once the file is exhausted.
    /// After an error or end of file the reader stays finished.
    pub fn next_chunk(&mut self) -> Result<Option<&[u8]>, HashError> {
        if self.done {
            return Ok(None);
        }
        let mut filled = 0;
        while filled < self.buf.len() {
            match self.inner.read(&mut self.buf[filled..]) {
                Ok(0) => {
                    self.done = true;
                    break;
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Err(HashError::from_read(e, &self.path));
                }
            }
        }
        if filled == 0 {
            return Ok(None);
        }
        Ok(Some(&self.buf[..filled]))
    }
}
