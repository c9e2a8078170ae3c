use super::show::ShowCommand;
use crate::config::Config;
use crate::driver::session::driver::{
    Session,
    NO_PAGING_COMMAND,
};
use crate::errors::ArubaError;
use log::{
    debug,
    info,
};
use std::path::Path;

/// The command entering configure mode once admin mode is enabled.
pub const CONFIGURE_COMMAND: &str = "configure terminal";

/// Returns the software version from `show version` output -- the token following "Version" on
/// the line starting with "ArubaOS".
#[must_use]
pub fn parse_version(output: &str) -> Option<String> {
    let line = output
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("ArubaOS"))?;

    let mut words = line.split_whitespace();

    words.find(|w| w.trim_end_matches(',') == "Version")?;

    words
        .next()
        .map(|w| w.trim_end_matches(',').to_owned())
}

/// Controller is an Aruba controller reached over its serial console, logged in and in admin
/// mode, ready for "show" commands.
pub struct Controller {
    /// The configuration the controller was created from.
    pub config: Config,
    /// The underlying console session.
    pub session: Session,

    software_version: Option<String>,
}

impl Controller {
    /// Create a new Controller from a configuration and a (not yet opened) session. Nothing is
    /// sent to the device until `connect`.
    #[must_use]
    pub const fn new(
        config: Config,
        session: Session,
    ) -> Self {
        Self {
            config,
            session,
            software_version: None,
        }
    }

    /// Create a Controller from the YAML configuration file at `path` and connect to it.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if the configuration cannot be loaded or connecting fails.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, ArubaError> {
        let config = Config::from_file(path)?;

        info!("{}: creating aruba controller", config.name);

        let session = config.session_builder()?.build();

        debug!("{}: created serial wrapper around aruba controller", config.name);

        let mut controller = Self::new(config, session);

        controller.connect()?;

        Ok(controller)
    }

    /// Open the console, log in, enable admin mode, enter configure mode with paging disabled,
    /// and read the software version.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError::Setup` if the controller is not healthy, or any error from the
    /// login/enable handshake and the commands sent along the way.
    pub fn connect(&mut self) -> Result<(), ArubaError> {
        self.session.open()?;

        if !self.test_health() {
            return Err(ArubaError::Setup(String::from("unhealthy controller")));
        }

        self.session
            .login(&self.config.username, &self.config.password)?;
        self.session.enable_admin(&self.config.admin_password)?;

        self.session.run(CONFIGURE_COMMAND)?;
        self.session.run(NO_PAGING_COMMAND)?;

        self.software_version = self.version()?;

        Ok(())
    }

    /// Close the console.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if closing the transport fails.
    pub fn close(&mut self) -> Result<(), ArubaError> {
        self.session.close()
    }

    /// Indicates if the controller console is usable.
    pub fn test_health(&mut self) -> bool {
        info!("{}: checking if controller is healthy", self.config.name);

        let healthy = self.session.alive();

        if healthy {
            info!("{}: controller is healthy", self.config.name);
        }

        healthy
    }

    /// Run a command, returning its output without the echoed command or the prompt.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if the command fails.
    pub fn run(
        &mut self,
        command: &str,
    ) -> Result<String, ArubaError> {
        Ok(self.session.run(command)?.before)
    }

    /// Fetch the software version from the controller.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if `show version` fails.
    pub fn version(&mut self) -> Result<Option<String>, ArubaError> {
        let output = self.run(&ShowCommand::Version.to_string())?;
        let version = parse_version(&output);

        info!(
            "{}: controller version: {}",
            self.config.name,
            version.as_deref().unwrap_or("unknown")
        );

        Ok(version)
    }

    /// The software version read while connecting.
    #[must_use]
    pub fn software_version(&self) -> Option<&str> {
        self.software_version.as_deref()
    }

    /// Run one of the catalogued "show" commands.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError` if the command fails.
    pub fn show(
        &mut self,
        command: &ShowCommand,
    ) -> Result<String, ArubaError> {
        info!("{}: getting {}", self.config.name, command.description());

        let output = self.run(&command.to_string())?;

        info!("{}: {}", self.config.name, output);

        Ok(output)
    }
}
