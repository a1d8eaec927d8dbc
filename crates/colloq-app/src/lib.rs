//! Application layer for Colloq
//!
//! Pure state machine and generic runtime for the review-chat UI. The core
//! consumes [`AppEvent`] inputs (async completions, terminal events) and
//! keyboard input, and produces [`AppAction`] instructions for the runtime
//! to execute, keeping all I/O at the edges.
//!
//! # Components
//!
//! - [`App`]: UI state machine (directory, session, composer, routing)
//! - [`Directory`]: chat-room directory with explicit load states
//! - [`Session`]: message store for the active room, including optimistic
//!   sends tracked by local correlation ids
//! - [`Driver`]: trait for platform-specific I/O abstraction
//! - [`Runtime`]: generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod composer;
mod directory;
mod driver;
mod event;
mod input;
mod runtime;
mod session;

pub use action::AppAction;
pub use app::{App, AuthContext, Route};
pub use composer::Composer;
pub use directory::{Directory, Resolution};
pub use driver::Driver;
pub use event::AppEvent;
pub use input::KeyInput;
pub use runtime::Runtime;
pub use session::{HistoryState, LocalId, Session, ThreadMessage};
