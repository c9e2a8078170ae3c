use super::constants::ANSI_ESCAPE_BYTE;
use super::util::strip_ansi;
use super::Args;
use crate::errors::ArubaError;
use crate::transport::base::Transport;
use core::str;
use log::debug;

/// Upper bound on reads while draining stale input, a device that never stops talking should not
/// hang us here.
const MAX_DRAIN_READS: u16 = 256;

/// The arubars `Channel` object -- the channel "wraps" the transport object, handles sending to
/// it, and buffers what is read from it until a pattern is matched.
pub struct Channel {
    /// The arguments that the channel was created with.
    pub args: Args,
    pub(super) transport: Box<dyn Transport>,
    pub(super) buffer: Vec<u8>,
}

impl Channel {
    /// Returns a new instance of `Channel` wrapping the given transport.
    #[must_use]
    pub fn new(
        args: Args,
        t: impl Transport + 'static,
    ) -> Self {
        Self {
            args,
            transport: Box::new(t),
            buffer: vec![],
        }
    }

    /// Open the channel and underlying transport.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if the transport cannot be opened.
    pub fn open(&mut self) -> Result<(), ArubaError> {
        debug!("opening channel on device {}", self.transport.device());

        self.buffer.clear();
        self.transport.open()
    }

    /// Close the channel and underlying transport.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if the transport cannot be closed.
    pub fn close(&mut self) -> Result<(), ArubaError> {
        debug!("closing channel on device {}", self.transport.device());

        self.buffer.clear();
        self.transport.close()
    }

    /// Close and re-open the underlying transport, used after the device has dropped the stream
    /// (ex: a reboot).
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if the transport cannot be re-opened.
    pub fn reopen(&mut self) -> Result<(), ArubaError> {
        if let Err(err) = self.close() {
            debug!("ignoring error closing channel before reopen, error: {err}");
        }

        self.open()
    }

    /// Indicates if the underlying transport is alive.
    pub fn alive(&mut self) -> bool {
        self.transport.alive()
    }

    /// The device (path) the channel is talking to.
    #[must_use]
    pub fn device(&self) -> String {
        self.transport.device()
    }

    /// Reads whatever the transport has ready, with any ansi escapes stripped. Returns an empty
    /// vec if nothing was ready.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if the transport read fails, `ArubaError::Eof` if the device has
    /// closed the stream.
    pub fn read(&mut self) -> Result<Vec<u8>, ArubaError> {
        let mut b = self.transport.read()?;

        if b.is_empty() {
            return Ok(b);
        }

        if b.contains(&ANSI_ESCAPE_BYTE) {
            b = strip_ansi(&b);
        }

        debug!(
            "channel read\n{}",
            str::from_utf8(&b).unwrap_or("failed decoding bytes, cannot log")
        );

        Ok(b)
    }

    /// Discard anything buffered or waiting on the transport so the next wait only sees output
    /// produced after the next write. A closed stream is left for the next wait to report.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if a transport read fails.
    pub fn drain(&mut self) -> Result<Vec<u8>, ArubaError> {
        let mut discarded = core::mem::take(&mut self.buffer);

        for _ in 0..MAX_DRAIN_READS {
            match self.read() {
                Ok(b) if b.is_empty() => break,
                Ok(b) => discarded.extend(b),
                Err(ArubaError::Eof) => break,
                Err(err) => return Err(err),
            }
        }

        if !discarded.is_empty() {
            debug!(
                "discarded stale channel input\n{}",
                String::from_utf8_lossy(&discarded)
            );
        }

        Ok(discarded)
    }
}
