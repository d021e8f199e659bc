//! One read-and-update pass over a file.

use crate::error::HashError;
use crate::file_ops::ChunkReader;
use crate::hashers::AccumulatorSet;
use crate::models::{Digest, HashOptions};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Owns the reader and the accumulators for a single run; `run` consumes it.
pub struct HashPipeline<R = File> {
    reader: ChunkReader<R>,
    accumulators: AccumulatorSet,
    cancel: Option<CancellationToken>,
}

impl HashPipeline<File> {
    pub fn open(path: &Path, options: &HashOptions) -> Result<Self, HashError> {
        let reader = ChunkReader::open(path, options.chunk_size)?;
        Ok(Self::new(reader))
    }
}

impl<R: Read> HashPipeline<R> {
    pub fn new(reader: ChunkReader<R>) -> Self {
        HashPipeline {
            reader,
            accumulators: AccumulatorSet::new(),
            cancel: None,
        }
    }

    /// Checked between chunks; a cancelled run stops before reading further.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Digests in `Algorithm::ALL` order. Any error drops the partial state.
    pub fn run(self) -> Result<[Digest; 3], HashError> {
        let HashPipeline { mut reader, mut accumulators, cancel } = self;
        let started = Instant::now();
        debug!(path = %reader.path().display(), chunk_size = reader.chunk_size(), "hashing started");

        loop {
            if cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
                debug!(path = %reader.path().display(), bytes = accumulators.bytes_absorbed(), "hashing cancelled");
                return Err(HashError::Cancelled { path: reader.path().to_path_buf() });
            }
            match reader.next_chunk() {
                Ok(Some(chunk)) => accumulators.absorb(chunk),
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, bytes = accumulators.bytes_absorbed(), "hashing aborted");
                    return Err(e);
                }
            }
        }

        info!(
            path = %reader.path().display(),
            bytes = accumulators.bytes_absorbed(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "hashing finished"
        );
        Ok(accumulators.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::HashResult;
    use std::io::{self, Cursor, Write};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    fn run_bytes(data: &[u8], chunk_size: usize) -> HashResult {
        let reader = ChunkReader::from_reader(Cursor::new(data.to_vec()), Path::new("mem"), chunk_size);
        HashResult::from_digests(&HashPipeline::new(reader).run().unwrap())
    }

    #[test]
    fn chunk_size_does_not_affect_result() {
        let data: Vec<u8> = (0..200_000u32).map(|i| (i ^ (i >> 7)) as u8).collect();
        let reference = run_bytes(&data, data.len());
        for size in [1usize, 3, 64, 4096, 65_536, 65_537, 1 << 20] {
            assert_eq!(run_bytes(&data, size), reference, "chunk size {size}");
        }
    }

    #[test]
    fn exact_chunk_boundary_matches_single_buffer() {
        let data = vec![0xa5u8; 64 * 1024];
        assert_eq!(run_bytes(&data, 64 * 1024), run_bytes(&data, 1 << 20));
    }

    #[test]
    fn opens_real_files() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"abc").unwrap();
        tmp.flush().unwrap();
        let digests = HashPipeline::open(tmp.path(), &HashOptions::default()).unwrap().run().unwrap();
        assert_eq!(HashResult::from_digests(&digests).md5, "900150983cd24fb0d6963f7d28e17f72");
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "unplugged"))
        }
    }

    #[test]
    fn read_failure_propagates_unchanged() {
        let reader = ChunkReader::from_reader(Broken, Path::new("usb/file"), 8);
        let err = HashPipeline::new(reader).run().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
        assert_eq!(err.path(), Path::new("usb/file"));
    }

    #[test]
    fn cancelled_token_stops_before_reading() {
        let token = CancellationToken::new();
        token.cancel();
        let reader = ChunkReader::from_reader(Broken, Path::new("never-read"), 8);
        let err = HashPipeline::new(reader).with_cancellation(token).run().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }

    /// Records the largest read request and the total bytes handed out.
    struct Metered<R> {
        inner: R,
        largest_request: Arc<AtomicUsize>,
        delivered: Arc<AtomicUsize>,
    }

    impl<R: Read> Read for Metered<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.largest_request.fetch_max(buf.len(), Ordering::Relaxed);
            let n = self.inner.read(buf)?;
            self.delivered.fetch_add(n, Ordering::Relaxed);
            Ok(n)
        }
    }

    #[test]
    fn large_stream_never_reads_past_one_chunk() {
        let total = 16 << 20;
        let chunk_size = 64 * 1024;
        let largest_request = Arc::new(AtomicUsize::new(0));
        let delivered = Arc::new(AtomicUsize::new(0));
        let src = Metered {
            inner: io::repeat(0).take(total as u64),
            largest_request: largest_request.clone(),
            delivered: delivered.clone(),
        };
        let reader = ChunkReader::from_reader(src, Path::new("big"), chunk_size);
        assert_eq!(reader.chunk_size(), chunk_size);

        let digests = HashPipeline::new(reader).run().unwrap();
        assert_eq!(digests.len(), 3);
        assert!(largest_request.load(Ordering::Relaxed) <= chunk_size);
        assert_eq!(delivered.load(Ordering::Relaxed), total);
    }

    /// Fills every request in full and cancels the token after `chunks` reads.
    struct CancelAfter {
        chunks: usize,
        reads: Arc<AtomicUsize>,
        token: CancellationToken,
        dropped: Arc<AtomicBool>,
    }

    impl Read for CancelAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let done = self.reads.fetch_add(1, Ordering::SeqCst) + 1;
            if done >= self.chunks {
                self.token.cancel();
            }
            buf.fill(0x11);
            Ok(buf.len())
        }
    }

    impl Drop for CancelAfter {
        fn drop(&mut self) {
            self.dropped.store(true, Ordering::SeqCst);
        }
    }

    #[test]
    fn cancellation_mid_run_stops_and_releases_reader() {
        let token = CancellationToken::new();
        let reads = Arc::new(AtomicUsize::new(0));
        let dropped = Arc::new(AtomicBool::new(false));
        let src = CancelAfter {
            chunks: 5,
            reads: reads.clone(),
            token: token.clone(),
            dropped: dropped.clone(),
        };
        let reader = ChunkReader::from_reader(src, Path::new("endless"), 32);

        let err = HashPipeline::new(reader).with_cancellation(token).run().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
        assert_eq!(reads.load(Ordering::SeqCst), 5);
        assert!(dropped.load(Ordering::SeqCst));
    }
}
