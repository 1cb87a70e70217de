//! Byte source/sink boundary between a driver and the embedding system.
//!
//! The decoding core never opens devices itself; serial, TCP or UDP
//! plumbing lives with the caller, which hands the driver anything
//! implementing [`ByteTransport`].

use std::io;

/// Non-blocking byte stream a sensor driver reads frames from and writes
/// configuration commands to.
///
/// `read` must not block: a transport with nothing buffered returns
/// `Ok(0)` or an error of kind `WouldBlock`/`TimedOut`, both of which the
/// drivers treat as "no data right now". Any other error is a transport
/// failure surfaced to the caller.
pub trait ByteTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

/// Whether an I/O error means "try again later" rather than failure.
pub(crate) fn is_no_data(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
    )
}

/// Adapter for anything already implementing the std I/O traits, e.g. a
/// `TcpStream` in non-blocking mode.
pub struct IoTransport<T>(pub T);

impl<T: io::Read + io::Write> ByteTransport for IoTransport<T> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}
