use super::Channel;
use crate::errors::ArubaError;

impl Channel {
    /// Write `b` bytes to the device -- typically you should use `write_and_return` instead.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if something that cannot be recovered from occurs.
    pub fn write(
        &mut self,
        b: &[u8],
    ) -> Result<(), ArubaError> {
        self.transport.write(b)
    }

    /// Writes a return -- the return character by default is "\r", but can be configured.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if something that cannot be recovered from occurs.
    pub fn write_return(&mut self) -> Result<(), ArubaError> {
        let return_char = self.args.return_char.clone();

        self.write(return_char.as_bytes())
    }

    /// Write `b` bytes to the device and send a return.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if something that cannot be recovered from occurs.
    pub fn write_and_return(
        &mut self,
        b: &[u8],
    ) -> Result<(), ArubaError> {
        self.write(b)?;
        self.write_return()
    }
}
