mod args;
#[allow(clippy::module_inception)]
mod channel;
mod constants;
mod expect;
mod patterns;
mod util;
mod write;

pub use args::Args;
pub use channel::Channel;
pub use constants::DEFAULT_RETURN_CHAR;
pub use expect::Outcome as ExpectOutcome;
pub use patterns::Pattern;
