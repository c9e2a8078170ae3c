use super::driver::{
    Args,
    Session,
};
use crate::channel::{
    Args as ChannelArgs,
    Channel,
    Pattern,
};
use crate::transport::base::{
    Transport,
    TransportArgs,
};
use crate::transport::serial::Serial;
use core::time::Duration;

/// `Builder` is a struct that holds a bunch of settings/defaults that can be used to build a
/// `Session` object.
pub struct Builder {
    args: Args,
    channel_args: ChannelArgs,
    transport_args: TransportArgs,
}

#[allow(clippy::missing_const_for_fn)]
#[allow(clippy::return_self_not_must_use)]
#[allow(clippy::must_use_candidate)]
impl Builder {
    /// Return a new instance of `Builder` with sane defaults set.
    pub fn new(device: &str) -> Self {
        Self {
            args: Args::default(),
            channel_args: ChannelArgs::default(),
            transport_args: TransportArgs::new(device),
        }
    }

    /// Sets the name of the device, used to prefix log records.
    pub fn name(
        mut self,
        s: &str,
    ) -> Self {
        s.clone_into(&mut self.args.name);

        self
    }

    /// Sets the default `prompt` -- the pattern commands are expected to return to.
    pub fn prompt(
        mut self,
        p: Pattern,
    ) -> Self {
        self.args.prompt = p;

        self
    }

    /// Sets how long to wait for the controller to come up after booting it out of the
    /// bootloader.
    pub fn boot_settle_delay(
        mut self,
        d: Duration,
    ) -> Self {
        self.args.boot_settle_delay = d;

        self
    }

    /// Sets the baud rate of the serial device.
    pub fn baud_rate(
        mut self,
        i: u32,
    ) -> Self {
        self.transport_args.baud_rate = i;

        self
    }

    /// Sets the read size of the underlying transport.
    pub fn read_size(
        mut self,
        i: u16,
    ) -> Self {
        self.transport_args.read_size = i;

        self
    }

    /// Sets the `return_char` of the channel object.
    pub fn return_char(
        mut self,
        s: &str,
    ) -> Self {
        s.clone_into(&mut self.channel_args.return_char);

        self
    }

    /// Sets the `read_delay` of the underlying channel.
    pub fn read_delay(
        mut self,
        d: Duration,
    ) -> Self {
        self.channel_args.read_delay = d;

        self
    }

    /// Sets the `timeout_ops` of the underlying channel.
    pub fn timeout_ops(
        mut self,
        d: Duration,
    ) -> Self {
        self.channel_args.timeout_ops = d;

        self
    }

    /// Build "builds" and returns a Session talking to the serial device.
    #[must_use]
    pub fn build(self) -> Session {
        let serial = Serial::new(self.transport_args);

        Session::new(self.args, Channel::new(self.channel_args, serial))
    }

    /// Build a Session over some other transport -- the serial settings are ignored.
    #[must_use]
    pub fn build_with_transport(
        self,
        t: impl Transport + 'static,
    ) -> Session {
        Session::new(self.args, Channel::new(self.channel_args, t))
    }
}
