use core::ffi::CStr;
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    BufferOverflow,
    InteriorNul,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BufferOverflow => write!(f, "buffer too small for value and NUL terminator"),
            Error::InteriorNul => write!(f, "value contains a NUL byte"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

// Writes `s` followed by a NUL terminator into `buffer` and returns it as a `CStr`.
// The value is copied as is, C APIs get exactly the configured bytes.
// Fails if the buffer cannot hold the value plus terminator, or if `s` has a NUL inside.
pub fn write_c_str<'buf>(s: &str, buffer: &'buf mut [u8]) -> Result<&'buf CStr, Error> {
    let bytes = s.as_bytes();
    let len = bytes.len();

    if len + 1 > buffer.len() {
        return Err(Error::BufferOverflow);
    }

    buffer[..len].copy_from_slice(bytes);
    buffer[len] = 0;

    CStr::from_bytes_with_nul(&buffer[..=len]).map_err(|_| Error::InteriorNul)
}
