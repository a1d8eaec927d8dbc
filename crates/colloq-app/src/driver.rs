//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use crate::{App, AppAction, AppEvent};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This keeps the
/// orchestration identical between the production TUI and scripted test
/// drivers.
///
/// API calls are fire-and-forget: [`Driver::submit`] starts the request and
/// returns; the completion surfaces later through [`Driver::poll_outcome`]
/// as an [`AppEvent`] echoing the tags the action carried. The App, not the
/// driver, decides whether a completion still applies.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next input event (keyboard, resize, tick).
    ///
    /// Translates platform input into App calls and returns the resulting
    /// actions; returns after a short timeout with tick actions so the
    /// runtime keeps draining outcomes.
    fn poll_event(
        &mut self,
        app: &mut App,
    ) -> impl Future<Output = Result<Vec<AppAction>, Self::Error>> + Send;

    /// Start an API call described by `action`.
    ///
    /// Only the I/O variants of [`AppAction`] are submitted; the runtime
    /// never passes `Render` or `Quit` here.
    fn submit(&mut self, action: AppAction) -> Result<(), Self::Error>;

    /// Next completed API call, or `None` if none is ready.
    ///
    /// Must not block waiting for a completion.
    fn poll_outcome(&mut self) -> impl Future<Output = Option<AppEvent>> + Send;

    /// Render the application state.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Stop I/O and clean up resources.
    fn stop(&mut self);
}
