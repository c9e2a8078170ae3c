use super::Channel;
use super::Pattern;
use crate::errors::ArubaError;
use chrono::{
    Duration as ChronoDuration,
    Utc,
};
use core::time::Duration;
use log::debug;
use std::thread;

/// The result of waiting on the channel for a set of patterns.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A pattern matched. `before` holds everything read ahead of the match, `after` is the
    /// matched text itself (empty when the matched pattern was `Pattern::Eof`).
    Matched {
        /// Index (into the given patterns) of the pattern that matched.
        index: usize,
        /// Everything preceding the match.
        before: Vec<u8>,
        /// The matched text.
        after: Vec<u8>,
    },
    /// Nothing matched before the timeout, `before` holds everything that was read.
    Timeout {
        /// Everything read while waiting.
        before: Vec<u8>,
    },
    /// The device closed the stream and `Pattern::Eof` was not among the patterns.
    Eof {
        /// Everything read before the stream closed.
        before: Vec<u8>,
    },
}

impl Channel {
    /// Checks the buffer against `patterns` in the order given, the first pattern that matches
    /// anywhere in the buffer wins. Input following the match stays buffered.
    fn search(
        &mut self,
        patterns: &[Pattern],
    ) -> Option<Outcome> {
        for (index, pattern) in patterns.iter().enumerate() {
            let Some((start, end)) = pattern.find(&self.buffer) else {
                continue;
            };

            let remainder = self.buffer.split_off(end);
            let after = self.buffer.split_off(start);
            let before = core::mem::replace(&mut self.buffer, remainder);

            return Some(Outcome::Matched {
                index,
                before,
                after,
            });
        }

        None
    }

    /// Wait up to `timeout` for any of `patterns` to show up in the device output. Patterns are
    /// checked in priority order (the order given), not by position in the output.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if reading from the transport fails. Timeouts and a closed stream
    /// are reported as an `Outcome`, not as errors.
    pub fn expect(
        &mut self,
        patterns: &[Pattern],
        timeout: Duration,
    ) -> Result<Outcome, ArubaError> {
        let timeout = match ChronoDuration::from_std(timeout) {
            Ok(timeout) => timeout,
            Err(err) => {
                return Err(ArubaError::Framework(format!(
                    "failed casting std Duration to chrono Duration, error: {err}"
                )))
            }
        };

        let Some(deadline) = Utc::now().checked_add_signed(timeout) else {
            return Err(ArubaError::Framework(format!(
                "timeout of {} seconds is out of range",
                timeout.num_seconds()
            )));
        };

        // the device always gets read at least once, even with a zero timeout
        let mut read_once = false;

        loop {
            if let Some(outcome) = self.search(patterns) {
                return Ok(outcome);
            }

            if read_once && deadline <= Utc::now() {
                debug!("timed out waiting for any of {} patterns", patterns.len());

                return Ok(Outcome::Timeout {
                    before: core::mem::take(&mut self.buffer),
                });
            }

            let read = self.read();
            read_once = true;

            match read {
                Ok(nb) if nb.is_empty() => thread::sleep(self.args.read_delay),
                Ok(nb) => self.buffer.extend(nb),
                Err(ArubaError::Eof) => {
                    let before = core::mem::take(&mut self.buffer);

                    return match patterns.iter().position(Pattern::is_eof) {
                        Some(index) => Ok(Outcome::Matched {
                            index,
                            before,
                            after: vec![],
                        }),
                        None => Ok(Outcome::Eof { before }),
                    };
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Args;
    use crate::transport::scripted::{
        Reply,
        Scripted,
    };

    fn channel(replies: Vec<Reply>) -> Channel {
        let args = Args {
            read_delay: Duration::from_millis(1),
            ..Args::default()
        };

        let mut c = Channel::new(args, Scripted::new(replies));
        c.open().unwrap();

        c
    }

    #[test]
    fn test_expect_partitions_before_and_after() {
        let mut c = channel(vec![Reply::Text("show clock\r\n12:00\r\n(host) #extra")]);

        c.write_and_return(b"show clock").unwrap();

        let outcome = c
            .expect(&[Pattern::literal("#")], Duration::from_secs(1))
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Matched {
                index: 0,
                before: b"show clock\r\n12:00\r\n(host) ".to_vec(),
                after: b"#".to_vec(),
            }
        );
        assert_eq!(c.buffer, b"extra".to_vec());
    }

    #[test]
    fn test_expect_priority_beats_position() {
        let mut c = channel(vec![Reply::Text("##### banner #####\r\nUser: ")]);

        c.write_return().unwrap();

        let outcome = c
            .expect(
                &[Pattern::literal("User: "), Pattern::literal("#")],
                Duration::from_secs(1),
            )
            .unwrap();

        assert!(matches!(outcome, Outcome::Matched { index: 0, .. }));
    }

    #[test]
    fn test_expect_timeout_keeps_buffered_text() {
        let mut c = channel(vec![Reply::Text("still booting")]);

        c.write_return().unwrap();

        let outcome = c
            .expect(&[Pattern::literal("#")], Duration::from_millis(30))
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Timeout {
                before: b"still booting".to_vec()
            }
        );
    }

    #[test]
    fn test_expect_eof() {
        let mut c = channel(vec![
            Reply::Closing("boot\r\nrebooting..."),
            Reply::Closing("gone"),
        ]);

        c.write_and_return(b"boot").unwrap();

        let outcome = c
            .expect(&[Pattern::literal("#"), Pattern::Eof], Duration::from_secs(1))
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Matched {
                index: 1,
                before: b"boot\r\nrebooting...".to_vec(),
                after: vec![],
            }
        );

        c.reopen().unwrap();
        c.write_return().unwrap();

        let outcome = c
            .expect(&[Pattern::literal("#")], Duration::from_secs(1))
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Eof {
                before: b"gone".to_vec()
            }
        );
    }

    #[test]
    fn test_expect_zero_timeout_reads_once() {
        let mut c = channel(vec![Reply::Text("\r\n(host) >")]);

        c.write_return().unwrap();

        let outcome = c
            .expect(&[Pattern::literal(">")], Duration::ZERO)
            .unwrap();

        assert!(matches!(outcome, Outcome::Matched { index: 0, .. }));
    }

    #[test]
    fn test_expect_out_of_range_timeout_is_framework_error() {
        let mut c = channel(vec![Reply::Text("\r\n(host) >")]);

        c.write_return().unwrap();

        let err = c
            .expect(
                &[Pattern::literal(">")],
                Duration::from_secs(10_000_000_000_000),
            )
            .unwrap_err();

        assert!(matches!(err, ArubaError::Framework(_)));
    }

    #[test]
    fn test_drain_discards_stale_input() {
        let mut c = channel(vec![Reply::Text("old output\r\n(host) #")]);

        c.write_return().unwrap();

        assert_eq!(c.drain().unwrap(), b"old output\r\n(host) #".to_vec());
        assert!(c.buffer.is_empty());
    }
}
