use super::driver::Session;
use crate::channel::{
    ExpectOutcome,
    Pattern,
};
use crate::errors::ArubaError;
use core::fmt;
use core::time::Duration;
use log::{
    debug,
    error,
};
use once_cell::sync::OnceCell;

/// The prompts an Aruba controller console can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// The bootloader is waiting, the controller has to be booted.
    BootloaderMode,
    /// The login prompt asking for a user name.
    LoginUser,
    /// A password prompt, either for login or for `enable`.
    Password,
    /// Logged in, unprivileged.
    UserMode,
    /// Logged in, privileged (enable or configure mode).
    AdminMode,
}

impl Prompt {
    /// Every prompt, in the priority order used when classifying output.
    pub const ALL: [Self; 5] = [
        Self::BootloaderMode,
        Self::LoginUser,
        Self::Password,
        Self::UserMode,
        Self::AdminMode,
    ];

    /// The literal text the device prints for this prompt.
    #[must_use]
    pub const fn literal(self) -> &'static str {
        match self {
            Self::BootloaderMode => "cpboot>",
            Self::LoginUser => "User: ",
            Self::Password => "Password:",
            Self::UserMode => ">",
            Self::AdminMode => "#",
        }
    }

    /// A pattern matching this prompt.
    #[must_use]
    pub fn pattern(self) -> Pattern {
        Pattern::literal(self.literal())
    }
}

impl fmt::Display for Prompt {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(f, "{:?} ({:?})", self, self.literal())
    }
}

/// Returns (once), the patterns of all prompts in priority order.
fn prompt_patterns() -> &'static [Pattern] {
    static PATTERNS: OnceCell<Vec<Pattern>> = OnceCell::new();

    PATTERNS.get_or_init(|| Prompt::ALL.iter().map(|p| p.pattern()).collect())
}

impl Session {
    /// Probe the device for the prompt it is currently presenting, waiting up to the default
    /// operation timeout.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError::Setup` if the connection is dead, or any transport error.
    pub fn classify(&mut self) -> Result<Option<Prompt>, ArubaError> {
        let timeout = self.channel.args.timeout_ops;

        self.classify_with_timeout(timeout)
    }

    /// Probe the device for the prompt it is currently presenting. Sends a single return and
    /// waits up to `timeout` for any known prompt. Not seeing one is not an error, `None` is
    /// returned and what was read is logged.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError::Setup` if the connection is dead, or any transport error.
    pub fn classify_with_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Prompt>, ArubaError> {
        self.ensure_alive()?;

        self.channel.drain()?;
        self.channel.write_return()?;

        let prompt = match self.channel.expect(prompt_patterns(), timeout)? {
            ExpectOutcome::Matched { index, .. } => Prompt::ALL.get(index).copied(),
            ExpectOutcome::Timeout { before } => {
                error!(
                    "{}: timeout occurred while probing for a prompt",
                    self.args.name
                );
                error!("{}: {}", self.args.name, String::from_utf8_lossy(&before));

                None
            }
            ExpectOutcome::Eof { .. } => {
                return Err(ArubaError::Setup(format!(
                    "{}: serial connection closed while probing for a prompt",
                    self.args.name
                )))
            }
        };

        debug!("{}: device prompt classified as {:?}", self.args.name, prompt);

        self.observe(prompt);

        Ok(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::session::testing::{
        session,
        written,
    };
    use crate::transport::scripted::Reply;

    #[test]
    fn test_classify_each_prompt() {
        let cases = [
            ("\r\ncpboot>", Prompt::BootloaderMode),
            ("\r\nUser: ", Prompt::LoginUser),
            ("\r\nPassword:", Prompt::Password),
            ("\r\n(aruba7010) >", Prompt::UserMode),
            ("\r\n(aruba7010) #", Prompt::AdminMode),
        ];

        for (stream, expected) in cases {
            let (mut s, _) = session(vec![Reply::Text(stream)]);

            assert_eq!(s.classify().unwrap(), Some(expected), "stream {stream:?}");
            assert_eq!(s.last_prompt(), Some(expected));
        }
    }

    #[test]
    fn test_classify_bootloader_wins_over_user_mode() {
        let (mut s, _) = session(vec![Reply::Text("cpboot>")]);

        assert_eq!(s.classify().unwrap(), Some(Prompt::BootloaderMode));
    }

    #[test]
    fn test_classify_timeout_is_none() {
        let (mut s, device) = session(vec![Reply::Text("garbage with no prompt")]);

        assert_eq!(
            s.classify_with_timeout(Duration::from_millis(30)).unwrap(),
            None
        );
        assert_eq!(s.last_prompt(), None);
        assert_eq!(written(&device), "\r");
    }

    #[test]
    fn test_classify_is_repeatable() {
        let (mut s, device) = session(vec![
            Reply::Text("\r\n(host) >"),
            Reply::Text("\r\n(host) >"),
        ]);

        assert_eq!(s.classify().unwrap(), Some(Prompt::UserMode));
        assert_eq!(s.classify().unwrap(), Some(Prompt::UserMode));
        assert_eq!(written(&device), "\r\r");
    }

    #[test]
    fn test_classify_closed_stream_is_setup_error() {
        let (mut s, _) = session(vec![Reply::Closing("")]);

        assert!(matches!(s.classify(), Err(ArubaError::Setup(_))));
    }
}
