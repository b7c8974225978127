//! User-facing messages.
//!
//! All console text goes through the [`Message`] enum so wording lives in one
//! place ([`display`]) and the output macros in [`macros`].

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
