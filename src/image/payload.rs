use std::fmt;
use std::io::{self, Cursor, Read};

/// Sequential byte source that may be able to rewind to its start.
pub trait PayloadStream: Read + Send {
    fn supports_reset(&self) -> bool;

    fn reset(&mut self) -> io::Result<()>;
}

impl<T> PayloadStream for Cursor<T>
where
    T: AsRef<[u8]> + Send,
{
    fn supports_reset(&self) -> bool {
        true
    }

    fn reset(&mut self) -> io::Result<()> {
        self.set_position(0);
        Ok(())
    }
}

/// Wraps a reader that can only be consumed once.
pub struct ForwardOnly<R>(pub R);

impl<R: Read> Read for ForwardOnly<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl<R: Read + Send> PayloadStream for ForwardOnly<R> {
    fn supports_reset(&self) -> bool {
        false
    }

    fn reset(&mut self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "forward-only stream cannot be reset",
        ))
    }
}

/// The inline payload of a response part, in whichever representation the
/// provider delivered it.
pub enum ImagePayload {
    RawBytes(Vec<u8>),
    Base64Text(String),
    Stream(Box<dyn PayloadStream>),
    /// Any other representation, tagged with what was observed.
    Unsupported { tag: String },
}

impl ImagePayload {
    pub fn stream<S: PayloadStream + 'static>(source: S) -> Self {
        ImagePayload::Stream(Box::new(source))
    }

    pub fn unsupported(tag: impl Into<String>) -> Self {
        ImagePayload::Unsupported { tag: tag.into() }
    }

    pub fn tag(&self) -> &str {
        match self {
            ImagePayload::RawBytes(_) => "raw_bytes",
            ImagePayload::Base64Text(_) => "base64_text",
            ImagePayload::Stream(_) => "stream",
            ImagePayload::Unsupported { tag } => tag.as_str(),
        }
    }
}

impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImagePayload::RawBytes(bytes) => write!(f, "RawBytes({} bytes)", bytes.len()),
            ImagePayload::Base64Text(text) => write!(f, "Base64Text({} chars)", text.len()),
            ImagePayload::Stream(stream) => f
                .debug_struct("Stream")
                .field("supports_reset", &stream.supports_reset())
                .finish(),
            ImagePayload::Unsupported { tag } => {
                f.debug_struct("Unsupported").field("tag", tag).finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_reset_rewinds() {
        let mut cursor = Cursor::new(vec![1u8, 2, 3]);
        let mut first = [0u8; 2];
        cursor.read_exact(&mut first).unwrap();
        assert_eq!(cursor.position(), 2);

        assert!(PayloadStream::supports_reset(&cursor));
        PayloadStream::reset(&mut cursor).unwrap();
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_forward_only_refuses_reset() {
        let mut stream = ForwardOnly(&b"abc"[..]);
        assert!(!stream.supports_reset());
        assert!(stream.reset().is_err());
    }

    #[test]
    fn test_tags() {
        assert_eq!(ImagePayload::RawBytes(vec![]).tag(), "raw_bytes");
        assert_eq!(ImagePayload::Base64Text(String::new()).tag(), "base64_text");
        assert_eq!(ImagePayload::stream(Cursor::new(Vec::<u8>::new())).tag(), "stream");
        assert_eq!(ImagePayload::unsupported("object").tag(), "object");
    }

    #[test]
    fn test_debug_does_not_dump_bytes() {
        let debug = format!("{:?}", ImagePayload::RawBytes(vec![0xAB; 1024]));
        assert_eq!(debug, "RawBytes(1024 bytes)");
    }
}
