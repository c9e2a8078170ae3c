use super::prompt::Prompt;
use crate::channel::{
    Channel,
    ExpectOutcome,
    Pattern,
};
use crate::errors::ArubaError;
use crate::response::CommandResult;
use crate::util::strings::contains_word;
use core::time::Duration;
use log::{
    debug,
    error,
    info,
    warn,
};

/// The name used to prefix log records when none was given.
pub const DEFAULT_NAME: &str = "device";

/// How long the controller is given to come up after being booted out of the bootloader.
pub const DEFAULT_BOOT_SETTLE_DELAY: Duration = Duration::from_secs(60);

/// The command sent (in admin mode) ahead of every command to keep listings from paginating.
pub const NO_PAGING_COMMAND: &str = "no paging";

const HIDDEN_INPUT: &str = "<hidden input>";

/// The unterminated last line of `output` (trimmed), what the device is sitting at when a wait
/// gives up.
fn prompting(output: &str) -> &str {
    output
        .rsplit('\n')
        .next()
        .unwrap_or_default()
        .trim()
}

/// `OperationOptions` holds arguments that apply to a single `Session::run`.
#[derive(Default, Clone)]
pub struct OperationOptions {
    /// The pattern that marks the end of the command output, defaults to the session prompt.
    pub prompt: Option<Pattern>,
    /// How long to wait for the prompt, defaults to the channel `timeout_ops`.
    pub timeout: Option<Duration>,
    /// If the input should be kept out of logs and errors (like when entering a password).
    pub hidden: bool,
}

impl OperationOptions {
    /// Options waiting for `prompt` rather than the session default.
    #[must_use]
    pub fn expecting(prompt: Pattern) -> Self {
        Self {
            prompt: Some(prompt),
            ..Self::default()
        }
    }

    /// Options for sending a secret, waiting for `prompt`.
    #[must_use]
    pub fn hidden_expecting(prompt: Pattern) -> Self {
        Self {
            prompt: Some(prompt),
            hidden: true,
            ..Self::default()
        }
    }
}

/// The session `Args`.
pub struct Args {
    /// Name of the device, prefixes every log record of the session.
    pub name: String,
    /// The default prompt commands are expected to return to.
    pub prompt: Pattern,
    /// How long to wait for the device after booting it out of the bootloader.
    pub boot_settle_delay: Duration,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            prompt: Prompt::AdminMode.pattern(),
            boot_settle_delay: DEFAULT_BOOT_SETTLE_DELAY,
        }
    }
}

/// Session is one open console connection to a controller along with what we know about its
/// authentication state. All interaction is strictly sequential, one command at a time.
pub struct Session {
    /// The session arguments.
    pub args: Args,
    /// The channel the session interacts with.
    pub channel: Channel,

    admin_enabled: bool,
    last_prompt: Option<Prompt>,
}

impl Session {
    /// Create a new Session instance, nothing is sent to the device until `open`.
    #[must_use]
    pub const fn new(
        args: Args,
        channel: Channel,
    ) -> Self {
        Self {
            args,
            channel,
            admin_enabled: false,
            last_prompt: None,
        }
    }

    /// Open the underlying channel and transport.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError::Setup` if the device is not present or the connection is not
    /// alive once opened.
    pub fn open(&mut self) -> Result<(), ArubaError> {
        debug!(
            "{}: initiating serial communication with device {}",
            self.args.name,
            self.channel.device()
        );

        self.channel.open()?;
        self.ensure_alive()?;

        info!("{}: serial connection opened successfully", self.args.name);

        Ok(())
    }

    /// Close the underlying channel and transport.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if closing the transport fails.
    pub fn close(&mut self) -> Result<(), ArubaError> {
        self.admin_enabled = false;
        self.last_prompt = None;

        self.channel.close()?;

        info!("{}: serial connection closed successfully", self.args.name);

        Ok(())
    }

    /// Indicates if the connection is alive.
    pub fn alive(&mut self) -> bool {
        self.channel.alive()
    }

    /// Indicates if admin mode has been enabled (and not been lost since).
    #[must_use]
    pub const fn admin_enabled(&self) -> bool {
        self.admin_enabled
    }

    /// The prompt seen by the last classification, `None` if it timed out or none happened yet.
    #[must_use]
    pub const fn last_prompt(&self) -> Option<Prompt> {
        self.last_prompt
    }

    pub(super) fn ensure_alive(&mut self) -> Result<(), ArubaError> {
        if self.channel.alive() {
            return Ok(());
        }

        error!(
            "{}: looks like serial device is not connected",
            self.args.name
        );

        Err(ArubaError::Setup(String::from(
            "unable to detect serial connection",
        )))
    }

    /// Record a classification, admin mode only survives seeing the admin prompt.
    pub(super) fn observe(
        &mut self,
        prompt: Option<Prompt>,
    ) {
        self.last_prompt = prompt;

        if prompt != Some(Prompt::AdminMode) {
            self.admin_enabled = false;
        }
    }

    pub(super) fn mark_admin_enabled(&mut self) {
        self.admin_enabled = self.last_prompt == Some(Prompt::AdminMode);
    }

    fn disable_paging(
        &mut self,
        timeout: Duration,
    ) -> Result<(), ArubaError> {
        self.channel.drain()?;
        self.channel.write_and_return(NO_PAGING_COMMAND.as_bytes())?;

        match self
            .channel
            .expect(&[Prompt::AdminMode.pattern()], timeout)?
        {
            ExpectOutcome::Matched { .. } => Ok(()),
            ExpectOutcome::Timeout { before } | ExpectOutcome::Eof { before } => {
                let before = String::from_utf8_lossy(&before).into_owned();

                Err(ArubaError::Command {
                    command: NO_PAGING_COMMAND.to_owned(),
                    after: prompting(&before).to_owned(),
                    before,
                })
            }
        }
    }

    /// Run a command on the device, waiting for the session prompt.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError::Command` if the prompt was not seen in time, or any transport
    /// error.
    pub fn run(
        &mut self,
        command: &str,
    ) -> Result<CommandResult, ArubaError> {
        self.run_with_options(command, &OperationOptions::default())
    }

    /// Run a command on the device with the given options.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError::Command` if the prompt was not seen in time, or any transport
    /// error.
    pub fn run_with_options(
        &mut self,
        command: &str,
        options: &OperationOptions,
    ) -> Result<CommandResult, ArubaError> {
        let prompt = options
            .prompt
            .clone()
            .unwrap_or_else(|| self.args.prompt.clone());
        let timeout = options.timeout.unwrap_or(self.channel.args.timeout_ops);
        let shown = if options.hidden { HIDDEN_INPUT } else { command };

        self.ensure_alive()?;

        if self.admin_enabled {
            // a previous command may have left a paginated listing behind
            if let Err(err) = self.disable_paging(timeout) {
                warn!(
                    "{}: unable to disable paging, error: {err}",
                    self.args.name
                );

                if let ArubaError::Command { before, .. } = &err {
                    warn!("{}: device output: {before:?}", self.args.name);
                }
            }
        }

        debug!(
            "{}: run requested, sending '{}' expecting {}",
            self.args.name, shown, prompt
        );

        self.channel.drain()?;

        let result = CommandResult::new(command);

        self.channel.write_and_return(command.as_bytes())?;

        let before = match self.channel.expect(core::slice::from_ref(&prompt), timeout)? {
            ExpectOutcome::Matched { before, after, .. } => {
                return Ok(result.record(&before, &after));
            }
            ExpectOutcome::Timeout { before } | ExpectOutcome::Eof { before } => before,
        };

        let before_text = String::from_utf8_lossy(&before).into_owned();

        debug!(
            "{}: prompt {} not matched, before {:?}",
            self.args.name, prompt, before_text
        );

        // known false negative: the prompt already arrived, but not where the matcher looks for
        // it. accepting it can hide a genuine failure.
        if let Some(token) = prompt.source() {
            if contains_word(&before_text, token) {
                warn!(
                    "{}: prompt {} not matched but present in output, accepting output",
                    self.args.name, prompt
                );

                return Ok(result.record(&before, token.trim().as_bytes()));
            }
        }

        error!(
            "{}: timeout occurred during command processing",
            self.args.name
        );
        let after = prompting(&before_text).to_owned();

        error!("{}: device output: {}", self.args.name, before_text);
        error!("{}: device is prompting: {:?}", self.args.name, after);

        Err(ArubaError::Command {
            command: shown.to_owned(),
            before: before_text,
            after,
        })
    }
}
