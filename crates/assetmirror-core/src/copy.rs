//! Streamed copy with a reusable fixed-size buffer.
//!
//! One [`CopyBuffer`] lives for the duration of an extraction and is reused
//! for every leaf, so copying a tree of small assets does not allocate per
//! file.

use std::io::Read;
use std::io::Write;
use std::io::{self};

use crate::ExtractionError;

/// Size of the intermediate copy buffer (64KB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Fixed-size buffer for streamed copying.
///
/// # Examples
///
/// ```no_run
/// # use assetmirror_core::copy::{CopyBuffer, copy_with_buffer};
/// # use assetmirror_core::ExtractionError;
/// # fn example() -> Result<(), ExtractionError> {
/// let mut buffer = CopyBuffer::new();
/// let mut input = std::fs::File::open("input.bin")?;
/// let mut output = std::fs::File::create("output.bin")?;
///
/// let bytes_copied = copy_with_buffer(&mut input, &mut output, &mut buffer)?;
/// println!("Copied {bytes_copied} bytes");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a new zero-initialized copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies everything from `reader` to `writer` through `buffer`.
///
/// Interrupted reads are retried. The writer is flushed before returning.
///
/// # Errors
///
/// Returns `ExtractionError::Io` if reading, writing or flushing fails. Bytes
/// written before the failure stay written.
#[inline]
pub fn copy_with_buffer<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> Result<u64, ExtractionError> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ExtractionError::Io(e)),
        };

        writer
            .write_all(&buffer.buf[..bytes_read])
            .map_err(ExtractionError::Io)?;

        total = total.saturating_add(bytes_read as u64);
    }

    writer.flush().map_err(ExtractionError::Io)?;
    Ok(total)
}
