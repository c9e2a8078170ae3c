use super::constants::{
    DEFAULT_READ_DELAY,
    DEFAULT_RETURN_CHAR,
    DEFAULT_TIMEOUT_OPS,
};
use core::time::Duration;

/// A struct to hold args/settings for a `Channel` object.
#[allow(clippy::module_name_repetitions)]
pub struct Args {
    /// Return character used to... send returns.
    pub return_char: String,
    /// Delay between reads of the underlying transport when nothing was ready.
    pub read_delay: Duration,
    /// Duration for `timeout_ops` -- the default timeout for waiting on the device.
    pub timeout_ops: Duration,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            return_char: DEFAULT_RETURN_CHAR.to_owned(),
            read_delay: DEFAULT_READ_DELAY,
            timeout_ops: DEFAULT_TIMEOUT_OPS,
        }
    }
}
