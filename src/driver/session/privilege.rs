use super::driver::{
    OperationOptions,
    Session,
};
use super::prompt::Prompt;
use crate::errors::ArubaError;
use log::{
    debug,
    info,
};

/// The command that escalates from user mode to admin mode.
pub const ENABLE_COMMAND: &str = "enable";

impl Session {
    /// Enable admin mode so privileged commands can be run. Does nothing (and sends no
    /// credentials) if the controller is already in admin mode.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError::Framework` if the controller is in neither user nor admin mode,
    /// or does not reach admin mode after the password was sent.
    pub fn enable_admin(
        &mut self,
        password: &str,
    ) -> Result<(), ArubaError> {
        info!("{}: enabling admin mode", self.args.name);

        match self.classify()? {
            Some(Prompt::AdminMode) => {
                info!("{}: admin mode already enabled", self.args.name);
            }
            Some(Prompt::UserMode) => {
                self.run_with_options(
                    ENABLE_COMMAND,
                    &OperationOptions::expecting(Prompt::Password.pattern()),
                )?;

                debug!("{}: entering admin password", self.args.name);

                self.run_with_options(
                    password,
                    &OperationOptions::hidden_expecting(Prompt::AdminMode.pattern()),
                )?;

                if self.classify()? != Some(Prompt::AdminMode) {
                    return Err(ArubaError::Framework(String::from(
                        "unable to enable admin mode",
                    )));
                }
            }
            other => {
                return Err(ArubaError::Framework(format!(
                    "user mode should be enabled, controller prompt is {}",
                    other.map_or_else(|| String::from("unknown"), |p| p.to_string())
                )));
            }
        }

        self.mark_admin_enabled();

        debug!("{}: controller is in admin mode", self.args.name);

        Ok(())
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
    fn test_enable_admin_is_idempotent() {
        let (mut s, device) = session(vec![
            Reply::Text("\r\n(host) #"),
            Reply::Text("\r\n(host) #"),
        ]);

        s.enable_admin("secret").unwrap();
        assert!(s.admin_enabled());

        s.enable_admin("secret").unwrap();
        assert!(s.admin_enabled());

        assert_eq!(written(&device), "\r\r");
    }

    #[test]
    fn test_enable_admin_from_user_mode() {
        let (mut s, device) = session(vec![
            Reply::Text("\r\n(host) >"),
            Reply::Text("enable\r\nPassword:"),
            Reply::Text("\r\n(host) #"),
            Reply::Text("\r\n(host) #"),
        ]);

        s.enable_admin("secret").unwrap();

        assert!(s.admin_enabled());
        assert_eq!(s.last_prompt(), Some(Prompt::AdminMode));
        assert_eq!(written(&device), "\renable\rsecret\r\r");
    }

    #[test]
    fn test_enable_admin_requires_user_mode() {
        let (mut s, device) = session(vec![Reply::Text("\r\nUser: ")]);

        assert!(matches!(
            s.enable_admin("secret"),
            Err(ArubaError::Framework(_))
        ));
        assert!(!s.admin_enabled());
        assert_eq!(written(&device), "\r");
    }

    #[test]
    fn test_enable_admin_not_reaching_admin_mode() {
        let (mut s, _) = session(vec![
            Reply::Text("\r\n(host) >"),
            Reply::Text("enable\r\nPassword:"),
            Reply::Text("\r\n(host) #"),
            Reply::Text("\r\n(host) >"),
        ]);

        assert!(matches!(
            s.enable_admin("secret"),
            Err(ArubaError::Framework(_))
        ));
        assert!(!s.admin_enabled());
    }

    #[test]
    fn test_losing_admin_prompt_clears_admin_enabled() {
        let (mut s, _) = session(vec![
            Reply::Text("\r\n(host) #"),
            Reply::Text("\r\n(host) >"),
        ]);

        s.enable_admin("secret").unwrap();
        assert!(s.admin_enabled());

        assert_eq!(s.classify().unwrap(), Some(Prompt::UserMode));
        assert!(!s.admin_enabled());
    }
}
