use crate::channel::{
    Pattern,
    DEFAULT_RETURN_CHAR,
};
use crate::driver::session::builder::Builder;
use crate::driver::session::driver::DEFAULT_NAME;
use crate::errors::ArubaError;
use crate::transport::base::DEFAULT_BAUD_RATE;
use core::fmt;
use core::time::Duration;
use log::{
    error,
    info,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::fs;
use std::path::Path;

const DEFAULT_PROMPT: &str = "#";
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_BOOT_SETTLE_SECONDS: u64 = 60;

const fn default_baudrate() -> u32 {
    DEFAULT_BAUD_RATE
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_owned()
}

fn default_name() -> String {
    DEFAULT_NAME.to_owned()
}

fn default_return_char() -> String {
    DEFAULT_RETURN_CHAR.to_owned()
}

const fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

const fn default_boot_settle_seconds() -> u64 {
    DEFAULT_BOOT_SETTLE_SECONDS
}

/// `Config` is the YAML description of one controller: where its console is, how to talk to it,
/// and the credentials to log in and enable admin mode with.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the serial device the console is attached to.
    #[serde(default)]
    pub device_id: String,
    /// Baud rate of the console port.
    #[serde(default = "default_baudrate")]
    pub baudrate: u32,
    /// The prompt (a regular expression) commands return to.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Login user name.
    #[serde(default)]
    pub username: String,
    /// Login password.
    #[serde(default)]
    pub password: String,
    /// Password for `enable`.
    #[serde(default)]
    pub admin_password: String,
    /// Name of the controller, prefixes log records.
    #[serde(default = "default_name")]
    pub name: String,
    /// The character(s) terminating each line sent.
    #[serde(default = "default_return_char")]
    pub return_char: String,
    /// Default time to wait for a prompt, in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Time to give the controller after booting it from the bootloader, in seconds.
    #[serde(default = "default_boot_settle_seconds")]
    pub boot_settle_seconds: u64,
}

impl fmt::Debug for Config {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Config")
            .field("device_id", &self.device_id)
            .field("baudrate", &self.baudrate)
            .field("prompt", &self.prompt)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("admin_password", &"<redacted>")
            .field("name", &self.name)
            .field("return_char", &self.return_char)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("boot_settle_seconds", &self.boot_settle_seconds)
            .finish()
    }
}

impl Config {
    /// Loads the YAML configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError::Framework` if the file does not exist or cannot be read, an
    /// `ArubaError::Config` if it is not valid YAML, or any error from `from_yaml`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArubaError> {
        let path = path.as_ref();

        info!("read configuration file {}", path.display());

        if !path.exists() {
            error!("configuration file {} not found", path.display());

            return Err(ArubaError::Framework(String::from(
                "configuration file doesn't exist",
            )));
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                return Err(ArubaError::Framework(format!(
                    "failed reading configuration file {}, error: {err}",
                    path.display()
                )))
            }
        };

        Self::from_yaml(&contents)
    }

    /// Parses a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError::Config` if the text is not a valid configuration, or an
    /// `ArubaError::Framework` if no device id is set.
    pub fn from_yaml(s: &str) -> Result<Self, ArubaError> {
        let config: Self = serde_yaml::from_str(s)?;

        if config.device_id.is_empty() {
            return Err(ArubaError::Framework(String::from("device id not found")));
        }

        Ok(config)
    }

    /// Returns a session `Builder` carrying the settings of this configuration.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError::Framework` if the configured prompt is not a valid expression.
    pub fn session_builder(&self) -> Result<Builder, ArubaError> {
        let prompt = Pattern::regex(&self.prompt)?;

        // zero means "not set"
        let timeout_seconds = if self.timeout_seconds == 0 {
            DEFAULT_TIMEOUT_SECONDS
        } else {
            self.timeout_seconds
        };

        Ok(Builder::new(&self.device_id)
            .name(&self.name)
            .baud_rate(self.baudrate)
            .prompt(prompt)
            .return_char(&self.return_char)
            .timeout_ops(Duration::from_secs(timeout_seconds))
            .boot_settle_delay(Duration::from_secs(self.boot_settle_seconds)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::session::driver::Session;
    use crate::driver::session::prompt::Prompt;
    use crate::transport::scripted::{
        Reply,
        Scripted,
    };
    use std::io::Write;

    fn scripted_session(
        yaml: &str,
        replies: Vec<Reply>,
    ) -> Session {
        let mut s = Config::from_yaml(yaml)
            .unwrap()
            .session_builder()
            .unwrap()
            .read_delay(Duration::from_millis(1))
            .build_with_transport(Scripted::new(replies));

        s.open().unwrap();

        s
    }

    const CONFIG: &str = r#"
device_id: /dev/ttyUSB0
baudrate: 115200
prompt: "\\(aruba7010\\) .*#"
username: admin
password: hunter2
admin_password: enable-me
"#;

    #[test]
    fn test_from_yaml() {
        let config = Config::from_yaml(CONFIG).unwrap();

        assert_eq!(config.device_id, "/dev/ttyUSB0");
        assert_eq!(config.baudrate, 115_200);
        assert_eq!(config.prompt, r"\(aruba7010\) .*#");
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "hunter2");
        assert_eq!(config.admin_password, "enable-me");
        assert_eq!(config.name, "device");
        assert_eq!(config.return_char, "\r");
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.boot_settle_seconds, 60);
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_yaml("device_id: /dev/ttyS0\n").unwrap();

        assert_eq!(config.baudrate, 9_600);
        assert_eq!(config.prompt, "#");
        assert!(config.session_builder().is_ok());
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let config = Config::from_yaml(CONFIG).unwrap();
        let debug = format!("{config:?}");

        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("enable-me"));
        assert!(debug.contains("/dev/ttyUSB0"));
    }

    #[test]
    fn test_missing_device_id() {
        assert!(matches!(
            Config::from_yaml("username: admin\n"),
            Err(ArubaError::Framework(_))
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            Config::from_yaml("device_id: [unterminated"),
            Err(ArubaError::Config(_))
        ));
        assert!(matches!(
            Config::from_yaml("device_id: /dev/ttyS0\nbaudrate: fast\n"),
            Err(ArubaError::Config(_))
        ));
    }

    #[test]
    fn test_zero_timeout_uses_default() {
        let yaml = "device_id: /dev/ttyS0\ntimeout_seconds: 0\n";

        let mut s = scripted_session(yaml, vec![Reply::Text("\r\n(host) >")]);

        assert_eq!(
            s.channel.args.timeout_ops,
            Duration::from_secs(DEFAULT_TIMEOUT_SECONDS)
        );
        assert_eq!(s.classify().unwrap(), Some(Prompt::UserMode));
    }

    #[test]
    fn test_out_of_range_timeout_is_framework_error() {
        let yaml = "device_id: /dev/ttyS0\ntimeout_seconds: 10000000000000\n";

        let mut s = scripted_session(yaml, vec![Reply::Text("\r\n(host) >")]);

        assert!(matches!(s.classify(), Err(ArubaError::Framework(_))));
    }

    #[test]
    fn test_invalid_prompt() {
        let config = Config::from_yaml("device_id: /dev/ttyS0\nprompt: \"(\"\n").unwrap();

        assert!(matches!(
            config.session_builder(),
            Err(ArubaError::Framework(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("arubars-config-{}.yaml", std::process::id()));

        let mut file = fs::File::create(&path).unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();
        drop(file);

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.username, "admin");

        fs::remove_file(&path).unwrap();

        assert!(matches!(
            Config::from_file(&path),
            Err(ArubaError::Framework(_))
        ));
    }
}
