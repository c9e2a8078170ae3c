extern crate nix;
use crate::errors::ArubaError;
use crate::transport::base::{
    Transport,
    TransportArgs,
};
use log::debug;
use nix::libc;
use nix::poll::{
    poll,
    PollFd,
    PollFlags,
};
use nix::sys::termios::{
    cfmakeraw,
    cfsetspeed,
    tcflush,
    tcgetattr,
    tcsetattr,
    BaudRate,
    FlushArg,
    SetArg,
};
use std::fs::{
    File,
    OpenOptions,
};
use std::io::{
    ErrorKind,
    Read,
    Write,
};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::Path;

/// How long (in milliseconds) a single read polls the device before reporting "nothing ready".
const POLL_TIMEOUT_MILLISECONDS: i32 = 5;

fn baud_rate(b: u32) -> Option<BaudRate> {
    match b {
        1_200 => Some(BaudRate::B1200),
        2_400 => Some(BaudRate::B2400),
        4_800 => Some(BaudRate::B4800),
        9_600 => Some(BaudRate::B9600),
        19_200 => Some(BaudRate::B19200),
        38_400 => Some(BaudRate::B38400),
        57_600 => Some(BaudRate::B57600),
        115_200 => Some(BaudRate::B115200),
        230_400 => Some(BaudRate::B230400),
        _ => None,
    }
}

/// The serial (console port) transport object.
pub struct Serial {
    args: TransportArgs,
    file: Option<File>,
}

impl Serial {
    /// Returns a new `Serial` instance, the device is not touched until `open` is called.
    #[must_use]
    pub const fn new(args: TransportArgs) -> Self {
        Self { args, file: None }
    }

    fn configure(
        &self,
        file: &File,
    ) -> Result<(), ArubaError> {
        let fd = file.as_raw_fd();

        let Some(speed) = baud_rate(self.args.baud_rate) else {
            return Err(ArubaError::Setup(format!(
                "unsupported baud rate {} for device {}",
                self.args.baud_rate, self.args.device
            )));
        };

        let mut attrs = match tcgetattr(fd) {
            Ok(attrs) => attrs,
            Err(err) => {
                return Err(ArubaError::Setup(format!(
                    "failed reading terminal attributes of {}, error: {err}",
                    self.args.device
                )))
            }
        };

        cfmakeraw(&mut attrs);

        if let Err(err) = cfsetspeed(&mut attrs, speed) {
            return Err(ArubaError::Setup(format!(
                "failed setting baud rate on {}, error: {err}",
                self.args.device
            )));
        }

        if let Err(err) = tcsetattr(fd, SetArg::TCSANOW, &attrs) {
            return Err(ArubaError::Setup(format!(
                "failed applying terminal attributes to {}, error: {err}",
                self.args.device
            )));
        }

        // anything the device printed while nobody was listening is stale
        if let Err(err) = tcflush(fd, FlushArg::TCIOFLUSH) {
            return Err(ArubaError::Setup(format!(
                "failed flushing {}, error: {err}",
                self.args.device
            )));
        }

        Ok(())
    }
}

impl Transport for Serial {
    fn open(&mut self) -> Result<(), ArubaError> {
        if !Path::new(&self.args.device).exists() {
            return Err(ArubaError::Setup(format!(
                "serial device {} not detected, looks like it is not connected",
                self.args.device
            )));
        }

        debug!(
            "opening serial transport on device '{}' at {} baud",
            self.args.device, self.args.baud_rate
        );

        let file = match OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NOCTTY | libc::O_NONBLOCK)
            .open(&self.args.device)
        {
            Ok(file) => file,
            Err(err) => {
                return Err(ArubaError::Setup(format!(
                    "failed opening serial device {}, error: {err}",
                    self.args.device
                )))
            }
        };

        self.configure(&file)?;

        self.file = Some(file);

        Ok(())
    }

    fn close(&mut self) -> Result<(), ArubaError> {
        if self.file.take().is_none() {
            return Err(ArubaError::Transport(String::from(
                "trying to close transport that was never opened",
            )));
        }

        debug!("serial transport on device '{}' closed", self.args.device);

        Ok(())
    }

    fn alive(&mut self) -> bool {
        self.file.is_some() && Path::new(&self.args.device).exists()
    }

    fn read(&mut self) -> Result<Vec<u8>, ArubaError> {
        self.read_n(self.args.read_size)
    }

    #[allow(clippy::indexing_slicing)]
    fn read_n(
        &mut self,
        n: u16,
    ) -> Result<Vec<u8>, ArubaError> {
        let Some(file) = self.file.as_mut() else {
            return Err(ArubaError::Transport(String::from(
                "attempting to read from transport that is not open!",
            )));
        };

        let mut fds = [PollFd::new(file.as_raw_fd(), PollFlags::POLLIN)];

        match poll(&mut fds, POLL_TIMEOUT_MILLISECONDS) {
            Ok(0) => return Ok(vec![]),
            Ok(_) => {}
            Err(err) => {
                return Err(ArubaError::Transport(format!(
                    "error while polling fd, error: {err}"
                )))
            }
        }

        let revents = fds[0].revents().unwrap_or_else(PollFlags::empty);

        if revents.contains(PollFlags::POLLHUP) && !revents.contains(PollFlags::POLLIN) {
            return Err(ArubaError::Eof);
        }

        let mut b = vec![0_u8; n as usize];

        match file.read(b.as_mut_slice()) {
            Ok(0) => Err(ArubaError::Eof),
            Ok(read_n) => Ok(b[0..read_n].to_owned()),
            Err(err) if err.kind() == ErrorKind::WouldBlock => Ok(vec![]),
            Err(err) => Err(ArubaError::Transport(format!(
                "error when reading after polling fd, error: {err}"
            ))),
        }
    }

    fn write(
        &mut self,
        b: &[u8],
    ) -> Result<(), ArubaError> {
        let Some(file) = self.file.as_mut() else {
            return Err(ArubaError::Transport(String::from(
                "attempting to write to transport that is not open!",
            )));
        };

        if let Err(err) = file.write_all(b) {
            return Err(ArubaError::Transport(format!(
                "failed writing to transport, error: {err}"
            )));
        }

        match file.flush() {
            Ok(()) => Ok(()),
            Err(err) => Err(ArubaError::Transport(format!(
                "failed flushing transport, error: {err}"
            ))),
        }
    }

    fn device(&self) -> String {
        self.args.device.clone()
    }
}
