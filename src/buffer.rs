// buffer.rs

use std::io::{self, Read};

use bytes::{Bytes, BytesMut};

pub const INITIAL_BUFFER_SIZE: usize = 4096;

/// Reads `reader` to end-of-stream. The buffer starts at
/// `INITIAL_BUFFER_SIZE` and doubles its capacity whenever it fills up.
pub fn read_all<R: Read>(mut reader: R) -> io::Result<Bytes> {
    let mut buf = BytesMut::with_capacity(INITIAL_BUFFER_SIZE);
    let mut chunk = [0u8; INITIAL_BUFFER_SIZE];
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if buf.capacity() - buf.len() < n {
            let grow = buf.capacity().max(n);
            buf.reserve(grow);
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out at most `step` bytes per read.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(out.len()).min(self.data.len());
            out[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn empty_input_gives_empty_payload() {
        let payload = read_all(io::empty()).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn reads_past_several_doublings() {
        let data: Vec<u8> = (0..INITIAL_BUFFER_SIZE * 5 + 17).map(|i| (i % 251) as u8).collect();
        let payload = read_all(&data[..]).unwrap();
        assert_eq!(payload.len(), data.len());
        assert_eq!(&payload[..], &data[..]);
    }

    #[test]
    fn short_reads_are_stitched_together() {
        let data = b"line one\n\0line two\n".repeat(300);
        let payload = read_all(Trickle { data: &data, step: 7 }).unwrap();
        assert_eq!(&payload[..], &data[..]);
    }
}
