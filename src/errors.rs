/// `ArubaError` is the error type returned by every fallible arubars operation. None of these are
/// retried internally, they are all surfaced to the caller as terminal errors.
#[derive(Debug, thiserror::Error)]
pub enum ArubaError {
    /// The device is not present, could not be opened/configured, or the connection is dead.
    #[error("setup error: {0}")]
    Setup(String),

    /// The login handshake did not end in user or admin mode.
    #[error("login error: {0}")]
    Login(String),

    /// The session was driven out of sequence, or was constructed from bad inputs.
    #[error("framework error: {0}")]
    Framework(String),

    /// The expected prompt was never observed for a command.
    #[error("failed to run command '{command}', expected prompt not seen")]
    Command {
        /// The command that was sent.
        command: String,
        /// Everything buffered before the wait gave up.
        before: String,
        /// Whatever was captured as the terminating text, usually empty.
        after: String,
    },

    /// Reading from or writing to the device failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The device closed the stream.
    #[error("end of stream reached on device")]
    Eof,

    /// A configuration file could not be parsed.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),
}
