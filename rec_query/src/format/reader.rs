//! Stateful forward-only reader over a byte source.
//!
//! All multi-byte values are little-endian. Length-prefixed text is decoded
//! per the configured [`TextEncoding`]; historical recordings were written
//! with UTF-16LE payloads, newer ones with UTF-8.

use std::fmt;
use std::io::Read;

use super::error::{ReadError, Result};

/// Encoding of length-prefixed text in the recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
}

/// Three-component float vector (location, rotation, velocity, extent).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    /// Euclidean distance between two points.
    pub fn distance(self, other: Vector3) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        let dz = f64::from(self.z) - f64::from(other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

macro_rules! read_fixed {
    ($name:ident, $ty:ty, $what:literal) => {
        pub fn $name(&mut self) -> Result<$ty> {
            let mut buf = [0u8; std::mem::size_of::<$ty>()];
            self.fill(&mut buf, $what)?;
            Ok(<$ty>::from_le_bytes(buf))
        }
    };
}

/// Forward-only reader with primitive decoders for the recording format.
pub struct RecordReader<R> {
    source: R,
    encoding: TextEncoding,
    position: u64,
}

impl<R: Read> RecordReader<R> {
    pub fn new(source: R, encoding: TextEncoding) -> Self {
        RecordReader {
            source,
            encoding,
            position: 0,
        }
    }

    /// Bytes consumed since construction.
    pub fn position(&self) -> u64 {
        self.position
    }

    fn fill(&mut self, buf: &mut [u8], what: &'static str) -> Result<()> {
        self.source.read_exact(buf).map_err(|err| {
            if err.kind() == std::io::ErrorKind::UnexpectedEof {
                ReadError::UnexpectedEof(what)
            } else {
                ReadError::Io(err)
            }
        })?;
        self.position += buf.len() as u64;
        Ok(())
    }

    read_fixed!(read_u8, u8, "u8");
    read_fixed!(read_u16, u16, "u16");
    read_fixed!(read_u32, u32, "u32");
    read_fixed!(read_u64, u64, "u64");
    read_fixed!(read_i32, i32, "i32");
    read_fixed!(read_i64, i64, "i64");
    read_fixed!(read_f32, f32, "f32");
    read_fixed!(read_f64, f64, "f64");

    /// Attempt to read one byte, distinguishing a clean end-of-stream
    /// (`Ok(None)`) from data. Used for packet framing only.
    pub fn try_read_u8(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.source.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.position += 1;
                    return Ok(Some(buf[0]));
                }
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(ReadError::Io(err)),
            }
        }
    }

    /// Length-prefixed text: u16 byte length, then that many bytes decoded
    /// per the configured encoding. Malformed sequences decode lossily.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        let mut bytes = vec![0u8; len];
        self.fill(&mut bytes, "string payload")?;
        Ok(match self.encoding {
            TextEncoding::Utf8 => String::from_utf8_lossy(&bytes).into_owned(),
            TextEncoding::Utf16Le => {
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16_lossy(&units)
            }
        })
    }

    pub fn read_vector3(&mut self) -> Result<Vector3> {
        Ok(Vector3 {
            x: self.read_f32()?,
            y: self.read_f32()?,
            z: self.read_f32()?,
        })
    }

    pub fn read_color(&mut self) -> Result<Color> {
        Ok(Color {
            r: self.read_u8()?,
            g: self.read_u8()?,
            b: self.read_u8()?,
        })
    }

    /// Advance exactly `n` bytes.
    pub fn skip(&mut self, n: u64) -> Result<()> {
        let copied = std::io::copy(&mut self.source.by_ref().take(n), &mut std::io::sink())?;
        self.position += copied;
        if copied < n {
            return Err(ReadError::UnexpectedEof("skipped payload"));
        }
        Ok(())
    }
}
