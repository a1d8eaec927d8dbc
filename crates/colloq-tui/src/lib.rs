//! Terminal UI for Colloq
//!
//! A thin shell over [`colloq_app::Driver`] that provides terminal-specific
//! I/O and the HTTP transport. All orchestration logic lives in the generic
//! [`colloq_app::Runtime`]
//!
//! This crate only handles terminal rendering and request spawning.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod terminal;
pub mod ui;

pub use colloq_app::{App, AppAction, AppEvent, AuthContext, Driver, KeyInput, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
