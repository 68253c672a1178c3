//! A reader that counts the bytes it consumes.
use crate::decode::FromMarkerByte;
use crate::error::{DecodeError, ErrorKind};
use std::io::{self, Read, Seek, SeekFrom};

/// A position in the input, taken with [`ByteCursor::mark`].
///
/// Marks are plain snapshots, so nested scopes (a code body inside the Code section
/// inside the module) each keep their own and never disturb one another's counts.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Mark(u64);

impl Mark {
    pub fn offset(self) -> u64 {
        self.0
    }
}

/// Reads a finite byte source front to back, keeping track of how many bytes have
/// been consumed.
///
/// All offsets are relative to where the source was positioned when the cursor was
/// created.
#[derive(Debug)]
pub struct ByteCursor<R> {
    source: R,
    position: u64,
    total_size: u64,

    // end of the region the current section may occupy
    bound: u64,
}

impl<R: Read + Seek> ByteCursor<R> {
    /// Wraps `source`, measuring its remaining length by seeking to the end and back.
    pub fn new(mut source: R) -> Result<Self, DecodeError> {
        let io_err = |e| DecodeError::new(ErrorKind::Io(e), 0);

        let start = source.stream_position().map_err(io_err)?;
        let end = source.seek(SeekFrom::End(0)).map_err(io_err)?;
        source.seek(SeekFrom::Start(start)).map_err(io_err)?;

        let total_size = end.saturating_sub(start);
        Ok(ByteCursor {
            source,
            position: 0,
            total_size,
            bound: total_size,
        })
    }
}

impl<'a> ByteCursor<io::Cursor<&'a [u8]>> {
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        let total_size = bytes.len() as u64;
        ByteCursor {
            source: io::Cursor::new(bytes),
            position: 0,
            total_size,
            bound: total_size,
        }
    }
}

impl<R: Read> ByteCursor<R> {
    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.total_size
    }

    pub fn remaining(&self) -> u64 {
        self.total_size.saturating_sub(self.position)
    }

    pub fn mark(&self) -> Mark {
        Mark(self.position)
    }

    pub fn consumed_since(&self, mark: Mark) -> u64 {
        self.position - mark.0
    }

    /// The offset where the enclosing section ends, or the total size outside of any
    /// section. Reads are not stopped at this point; decoders whose length is implied
    /// by a byte count use it to avoid running into the next section.
    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// Sets the bound and returns the previous one, to be restored afterwards.
    pub(crate) fn set_bound(&mut self, bound: u64) -> u64 {
        std::mem::replace(&mut self.bound, bound.min(self.total_size))
    }

    /// Builds an error located at the current position.
    pub fn error(&self, kind: ErrorKind) -> DecodeError {
        DecodeError::new(kind, self.position)
    }

    /// Reads exactly `n` bytes.
    pub fn read(&mut self, n: usize) -> Result<Vec<u8>, DecodeError> {
        // refuse up front so a hostile length never turns into a huge allocation
        if n as u64 > self.remaining() {
            return Err(self.error(ErrorKind::UnexpectedEof { wanted: n }));
        }

        let mut buf = vec![0u8; n];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut buf = [0u8; N];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    pub fn read_byte(&mut self) -> Result<u8, DecodeError> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    /// Reads one byte and maps it through the marker table of `T`.
    pub(crate) fn read_marker<T: FromMarkerByte>(&mut self) -> Result<T, DecodeError> {
        let offset = self.position;
        let b = self.read_byte()?;
        T::from_marker(b).map_err(|kind| DecodeError::new(kind, offset))
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        match self.source.read_exact(buf) {
            Ok(()) => {
                self.position += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Err(self.error(ErrorKind::UnexpectedEof { wanted: buf.len() }))
            }
            Err(e) => Err(self.error(ErrorKind::Io(e))),
        }
    }
}
