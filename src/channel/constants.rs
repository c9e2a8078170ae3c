use std::time::Duration;

/// The default return character -- the Aruba console expects a carriage return to terminate
/// input.
pub const DEFAULT_RETURN_CHAR: &str = "\r";

/// The default delay between reads from the underlying transport object.
pub const DEFAULT_READ_DELAY: Duration = Duration::from_millis(10);

/// The ANSI escape byte.
pub const ANSI_ESCAPE_BYTE: u8 = 0x1b;

/// Default `timeout_ops` value, the time any single wait on the device may take.
pub const DEFAULT_TIMEOUT_OPS: Duration = Duration::from_secs(10);
