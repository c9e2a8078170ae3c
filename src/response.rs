extern crate chrono;
use crate::util::strings::frame_output;
use chrono::offset::Utc;
use chrono::{
    Duration,
    NaiveDateTime,
};

/// `CommandResult` is the object returned from a successful `Session::run`. It is produced per
/// call and never changed afterwards.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// The command sent to the device.
    pub input: String,
    /// Everything captured ahead of the prompt, unprocessed (lossy utf-8).
    pub raw_before: String,
    /// The command output -- echoed command, prompt residue and blank lines removed, trimmed.
    pub before: String,
    /// The prompt text that ended the wait, trimmed.
    pub after: String,
    /// Starting time of the command.
    pub start_time: NaiveDateTime,
    /// Ending time of the command.
    pub end_time: NaiveDateTime,
    /// Total time the command took.
    pub elapsed_time: Duration,
}

impl CommandResult {
    /// Initializes a new `CommandResult` object, timing starts now.
    #[must_use]
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
            raw_before: String::new(),
            before: String::new(),
            after: String::new(),
            start_time: Utc::now().naive_utc(),
            end_time: Utc::now().naive_utc(),
            elapsed_time: Duration::zero(),
        }
    }

    /// Record the captured text of the command.
    pub(crate) fn record(
        mut self,
        before: &[u8],
        after: &[u8],
    ) -> Self {
        self.end_time = Utc::now().naive_utc();

        self.elapsed_time = self.end_time - self.start_time;

        self.raw_before = String::from_utf8_lossy(before).into_owned();
        self.before = frame_output(&self.raw_before, &self.input);
        self.after = String::from_utf8_lossy(after).trim().to_owned();

        self
    }
}
