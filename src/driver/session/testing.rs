use super::builder::Builder;
use super::driver::Session;
use crate::transport::scripted::{
    written_text,
    Reply,
    Scripted,
};
use core::time::Duration;
use std::cell::RefCell;
use std::rc::Rc;

/// Handles onto a scripted device that outlive moving it into a session.
pub struct Device {
    written: Rc<RefCell<Vec<u8>>>,
    opens: Rc<RefCell<u32>>,
}

impl Device {
    pub fn opens(&self) -> u32 {
        *self.opens.borrow()
    }
}

pub fn written(device: &Device) -> String {
    written_text(&device.written)
}

/// An opened session over a scripted device with short timeouts and no boot settle delay.
pub fn session(replies: Vec<Reply>) -> (Session, Device) {
    let transport = Scripted::new(replies);
    let device = Device {
        written: transport.written_handle(),
        opens: transport.opens_handle(),
    };

    let mut s = Builder::new("scripted")
        .name("test")
        .read_delay(Duration::from_millis(1))
        .timeout_ops(Duration::from_millis(200))
        .boot_settle_delay(Duration::ZERO)
        .build_with_transport(transport);

    s.open().expect("scripted session should open");

    (s, device)
}
