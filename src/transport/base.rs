use crate::errors::ArubaError;

/// The default baud rate of an Aruba controller console port.
pub const DEFAULT_BAUD_RATE: u32 = 9_600;

/// The default transport read size -- 4,096 bytes.
pub const DEFAULT_READ_SIZE: u16 = 4_096;

/// Transport is the trait all arubars transports must implement in order to be consumed/used by
/// a channel and ultimately the session.
pub trait Transport {
    /// Open the underlying transport.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if any issues occur.
    fn open(&mut self) -> Result<(), ArubaError>;
    /// Close the underlying transport.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if any issues occur.
    fn close(&mut self) -> Result<(), ArubaError>;
    /// Indicates if the transport is "alive".
    fn alive(&mut self) -> bool;
    /// Read default read amount of bytes from the underlying transport. Like `read_n` the
    /// implementation must be non-blocking.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if any issues occur, `ArubaError::Eof` once the device has closed
    /// the stream.
    fn read(&mut self) -> Result<Vec<u8>, ArubaError>;
    /// Read up to `n` bytes from the underlying transport. Implementations *must be non
    /// blocking* -- if nothing is ready return an empty vec.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if any issues occur, `ArubaError::Eof` once the device has closed
    /// the stream.
    fn read_n(
        &mut self,
        n: u16,
    ) -> Result<Vec<u8>, ArubaError>;
    /// Write to the underlying transport.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if any issues occur.
    fn write(
        &mut self,
        b: &[u8],
    ) -> Result<(), ArubaError>;
    /// Returns the device (path) of the transport.
    fn device(&self) -> String;
}

/// A struct holding arguments that apply to serial transports.
pub struct TransportArgs {
    /// The path of the serial character device, ex: "/dev/ttyUSB0".
    pub device: String,
    /// The baud rate to configure the device with.
    pub baud_rate: u32,
    /// The read size for each read of the transport (can leave this to the default!).
    pub read_size: u16,
}

impl TransportArgs {
    /// Return a new instance of `TransportArgs` -- would be just a default impl but we require the
    /// device be set, so we just have this method.
    #[must_use]
    pub fn new(device: &str) -> Self {
        Self {
            device: device.to_owned(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_size: DEFAULT_READ_SIZE,
        }
    }
}
