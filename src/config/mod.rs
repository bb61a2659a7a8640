//! Configuration management.
//!
//! XDG-compliant paths and the optional settings file that supplies CLI
//! defaults.

mod settings;

pub use settings::{AppSettings, Paths};
