use crate::errors::ArubaError;
use crate::transport::base::Transport;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// What the scripted device does in response to one line (anything ending in a carriage return)
/// being written to it.
pub enum Reply {
    /// Emit these bytes.
    Text(&'static str),
    /// Emit these bytes, then close the stream.
    Closing(&'static str),
    /// Emit nothing at all.
    Silent,
}

/// An in-memory stand in for a console port: every line written pops the next scripted reply.
/// Reopening the transport clears a closed stream, like a device coming back from a reboot.
pub struct Scripted {
    replies: VecDeque<Reply>,
    pending: Vec<u8>,
    closed: bool,
    open: bool,
    opens: Rc<RefCell<u32>>,
    written: Rc<RefCell<Vec<u8>>>,
}

impl Scripted {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: VecDeque::from(replies),
            pending: vec![],
            closed: false,
            open: false,
            opens: Rc::new(RefCell::new(0)),
            written: Rc::new(RefCell::new(vec![])),
        }
    }

    /// Handle to the written bytes that stays usable after the transport is moved into a session.
    pub fn written_handle(&self) -> Rc<RefCell<Vec<u8>>> {
        Rc::clone(&self.written)
    }

    /// Handle to the number of times `open` was called.
    pub fn opens_handle(&self) -> Rc<RefCell<u32>> {
        Rc::clone(&self.opens)
    }
}

/// Everything written so far, as text.
pub fn written_text(handle: &Rc<RefCell<Vec<u8>>>) -> String {
    String::from_utf8_lossy(&handle.borrow()).into_owned()
}

impl Transport for Scripted {
    fn open(&mut self) -> Result<(), ArubaError> {
        *self.opens.borrow_mut() += 1;
        self.open = true;
        self.closed = false;

        Ok(())
    }

    fn close(&mut self) -> Result<(), ArubaError> {
        self.open = false;

        Ok(())
    }

    fn alive(&mut self) -> bool {
        self.open
    }

    fn read(&mut self) -> Result<Vec<u8>, ArubaError> {
        self.read_n(u16::MAX)
    }

    fn read_n(
        &mut self,
        n: u16,
    ) -> Result<Vec<u8>, ArubaError> {
        if !self.pending.is_empty() {
            let take = self.pending.len().min(n as usize);

            return Ok(self.pending.drain(..take).collect());
        }

        if self.closed {
            return Err(ArubaError::Eof);
        }

        Ok(vec![])
    }

    fn write(
        &mut self,
        b: &[u8],
    ) -> Result<(), ArubaError> {
        self.written.borrow_mut().extend_from_slice(b);

        for _ in b.iter().filter(|c| **c == b'\r') {
            match self.replies.pop_front() {
                Some(Reply::Text(s)) => self.pending.extend_from_slice(s.as_bytes()),
                Some(Reply::Closing(s)) => {
                    self.pending.extend_from_slice(s.as_bytes());
                    self.closed = true;
                }
                Some(Reply::Silent) | None => {}
            }
        }

        Ok(())
    }

    fn device(&self) -> String {
        String::from("scripted")
    }
}
