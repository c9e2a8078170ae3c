#![deny(clippy::all)]
#![deny(clippy::cargo)]
#![deny(clippy::complexity)]
#![deny(clippy::correctness)]
#![deny(clippy::nursery)]
#![deny(clippy::pedantic)]
#![deny(clippy::perf)]
#![deny(clippy::style)]
#![deny(clippy::suspicious)]
#![deny(missing_docs)]
#![warn(clippy::multiple_crate_versions)]
// restriction is wild, but some good things for consistency in there, rather would allow things
// explicitly so any new lints pop up and annoy if they get added and then can decide to keep or
// ditch them!
#![warn(clippy::restriction)]
#![allow(clippy::implicit_return)]
#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::question_mark_used)]
#![allow(clippy::separated_literal_suffix)]
#![allow(clippy::missing_inline_in_public_items)]
#![allow(clippy::exhaustive_enums)]
#![allow(clippy::exhaustive_structs)]
#![allow(clippy::self_named_module_files)]
#![allow(clippy::multiple_inherent_impl)]
#![allow(clippy::partial_pub_fields)]
#![allow(clippy::default_numeric_fallback)]
#![allow(clippy::blanket_clippy_restriction_lints)]
#![allow(clippy::std_instead_of_core)]
#![allow(clippy::multiple_unsafe_ops_per_block)]
#![allow(clippy::single_char_lifetime_names)]
#![allow(clippy::missing_trait_methods)]
#![allow(clippy::as_conversions)]
#![allow(clippy::shadow_unrelated)]
#![allow(clippy::unwrap_in_result)]
#![allow(clippy::pub_use)]
#![allow(clippy::arithmetic_side_effects)]

//! arubars drives Aruba wireless controllers over their serial console: it classifies the prompt
//! the console presents, walks the login sequence (booting out of the bootloader if need be),
//! enables admin mode, and runs "show" commands returning their cleaned up output.

/// Channel is the object that consumes from and writes to arubars transports. The channel should
/// generally only be interacted with by drivers.
pub mod channel;

/// Loading controller definitions from YAML files.
pub mod config;

/// Arubars "drivers" are the primary object users work with.
pub mod driver {
    /// The session driver is a single console connection that knows the controller prompts, how
    /// to log in and how to get into admin mode.
    pub mod session {
        /// The session builder package, for building session stuff.
        pub mod builder;

        /// The actual session package itself.
        pub mod driver;

        /// The login handshake.
        pub mod login;

        /// Privilege escalation (user mode to admin mode).
        pub mod privilege;

        /// The controller prompts and classifying them.
        pub mod prompt;

        #[cfg(test)]
        pub(crate) mod testing;
    }

    /// The session builder re-exported for convenience.
    pub use crate::driver::session::builder::Builder as SessionBuilder;

    /// The session re-exported for convenience.
    pub use crate::driver::session::driver::Session;

    /// The session operation options re-exported for convenience.
    pub use crate::driver::session::driver::OperationOptions;

    /// The prompts re-exported for convenience.
    pub use crate::driver::session::prompt::Prompt;

    /// Controller driver wraps a `Session` and its configuration, connecting all the way to
    /// admin mode and exposing the catalogue of "show" commands.
    pub mod controller {
        /// The actual controller package itself.
        pub mod driver;

        /// The "show" command catalogue.
        pub mod show;
    }

    /// The controller re-exported for convenience.
    pub use crate::driver::controller::driver::Controller;

    /// The show commands re-exported for convenience.
    pub use crate::driver::controller::show::ShowCommand;
}

/// Arubars errors.
pub mod errors;

/// Module containing the arubars "response" objects -- that is, objects that are returned from
/// successful driver operations.
pub mod response;

/// Transport module holds the base transport and any transport implementations.
pub mod transport {
    /// Base transport module providing trait that all transports must implement.
    pub mod base;

    /// The serial (console port) transport implementation.
    pub mod serial;

    #[cfg(test)]
    pub(crate) mod scripted;
}

/// Arubars utilities.
pub mod util {
    /// Some string helpers.
    pub(crate) mod strings;
}
