use super::driver::{
    OperationOptions,
    Session,
};
use super::prompt::Prompt;
use crate::channel::Pattern;
use crate::errors::ArubaError;
use log::{
    debug,
    info,
};
use std::thread;

/// The command that takes the controller out of the bootloader.
pub const BOOT_COMMAND: &str = "boot";

/// The states of the login handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    /// Nothing is known about the device yet, it has to be probed.
    Unknown,
    /// The device was booted out of the bootloader and is coming up.
    Booting,
    /// The device is asking for the login password.
    AwaitingPassword,
    /// Credentials (if any were needed) are in, the device must now be at user or admin mode.
    Verifying,
    /// The device is at user or admin mode.
    LoggedIn,
}

impl Session {
    /// Log into the controller. The device may be found anywhere in its login sequence: in the
    /// bootloader, at the user or password prompt, or already logged in (in which case no
    /// credentials are sent at all).
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError::Login` if the device does not end up in user or admin mode, or any
    /// error from the commands sent along the way. Nothing is retried.
    pub fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<(), ArubaError> {
        info!("{}: logging into controller", self.args.name);

        let mut state = LoginState::Unknown;
        let mut booted = false;

        loop {
            debug!("{}: login state {:?}", self.args.name, state);

            state = match state {
                LoginState::Unknown => match self.classify()? {
                    Some(Prompt::BootloaderMode) if booted => {
                        return Err(ArubaError::Login(String::from(
                            "controller still in bootloader after boot",
                        )));
                    }
                    Some(Prompt::BootloaderMode) => {
                        info!("{}: controller in bootloader, booting", self.args.name);

                        self.run_with_options(
                            BOOT_COMMAND,
                            &OperationOptions::expecting(Pattern::Eof),
                        )?;
                        booted = true;

                        LoginState::Booting
                    }
                    Some(Prompt::LoginUser) => {
                        debug!("{}: entering username", self.args.name);

                        self.run_with_options(
                            username,
                            &OperationOptions::expecting(Prompt::Password.pattern()),
                        )?;

                        LoginState::AwaitingPassword
                    }
                    Some(Prompt::Password) => LoginState::AwaitingPassword,
                    Some(Prompt::UserMode | Prompt::AdminMode) | None => LoginState::Verifying,
                },
                LoginState::Booting => {
                    info!(
                        "{}: waiting {:?} for controller to settle",
                        self.args.name, self.args.boot_settle_delay
                    );

                    thread::sleep(self.args.boot_settle_delay);
                    self.channel.reopen()?;

                    LoginState::Unknown
                }
                LoginState::AwaitingPassword => {
                    debug!("{}: entering user password", self.args.name);

                    self.run_with_options(
                        password,
                        &OperationOptions::hidden_expecting(Prompt::UserMode.pattern()),
                    )?;

                    LoginState::Verifying
                }
                LoginState::Verifying => match self.classify()? {
                    Some(Prompt::UserMode | Prompt::AdminMode) => LoginState::LoggedIn,
                    other => {
                        return Err(ArubaError::Login(format!(
                            "unable to login, controller prompt is {}",
                            other.map_or_else(|| String::from("unknown"), |p| p.to_string())
                        )));
                    }
                },
                LoginState::LoggedIn => {
                    debug!(
                        "{}: successfully logged into controller",
                        self.args.name
                    );

                    return Ok(());
                }
            };
        }
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
    fn test_login_already_authenticated_sends_no_credentials() {
        let (mut s, device) = session(vec![
            Reply::Text("\r\n(host) >"),
            Reply::Text("\r\n(host) >"),
        ]);

        s.login("admin", "secret").unwrap();

        assert_eq!(written(&device), "\r\r");
        assert_eq!(s.last_prompt(), Some(Prompt::UserMode));
    }

    #[test]
    fn test_login_from_user_prompt() {
        let (mut s, device) = session(vec![
            Reply::Text("\r\nUser: "),
            Reply::Text("admin\r\nPassword:"),
            Reply::Text("\r\n(host) >"),
            Reply::Text("\r\n(host) >"),
        ]);

        s.login("admin", "secret").unwrap();

        assert_eq!(written(&device), "\radmin\rsecret\r\r");
    }

    #[test]
    fn test_login_from_password_prompt() {
        let (mut s, device) = session(vec![
            Reply::Text("\r\nPassword:"),
            Reply::Text("\r\n(host) >"),
            Reply::Text("\r\n(host) #"),
        ]);

        s.login("admin", "secret").unwrap();

        assert_eq!(written(&device), "\rsecret\r\r");
        assert_eq!(s.last_prompt(), Some(Prompt::AdminMode));
    }

    #[test]
    fn test_login_boots_out_of_bootloader() {
        let (mut s, device) = session(vec![
            Reply::Text("\r\ncpboot>"),
            Reply::Closing("boot\r\nBooting OS image...\r\n"),
            Reply::Text("\r\nUser: "),
            Reply::Text("admin\r\nPassword:"),
            Reply::Text("\r\n(host) >"),
            Reply::Text("\r\n(host) >"),
        ]);

        s.login("admin", "secret").unwrap();

        assert_eq!(written(&device), "\rboot\r\radmin\rsecret\r\r");
        assert_eq!(device.opens(), 2);
    }

    #[test]
    fn test_login_bootloader_twice_is_login_error() {
        let (mut s, _) = session(vec![
            Reply::Text("\r\ncpboot>"),
            Reply::Closing("boot\r\n"),
            Reply::Text("\r\ncpboot>"),
        ]);

        assert!(matches!(
            s.login("admin", "secret"),
            Err(ArubaError::Login(_))
        ));
    }

    #[test]
    fn test_login_unrecognised_prompt_is_login_error() {
        let (mut s, _) = session(vec![Reply::Silent, Reply::Text("\r\nUser: ")]);

        let err = s.login("admin", "secret").unwrap_err();

        assert!(matches!(err, ArubaError::Login(_)));
        assert!(err.to_string().contains("LoginUser"));
    }

    #[test]
    fn test_login_rejected_password_is_command_error() {
        let (mut s, _) = session(vec![
            Reply::Text("\r\nUser: "),
            Reply::Text("admin\r\nPassword:"),
            Reply::Text("\r\nLogin incorrect\r\nUser: "),
        ]);

        assert!(matches!(
            s.login("admin", "wrong"),
            Err(ArubaError::Command { .. })
        ));
    }
}
