//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod composer;
mod rooms;
mod status;
mod thread;

use colloq_app::{App, Route};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

const MAIN_AREA_MIN_HEIGHT: u16 = 3;
const COMPOSER_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;

/// Render the entire UI.
///
/// The directory view is a full-height room list; the thread view adds a
/// composer line above the status bar.
pub fn render(frame: &mut Frame, app: &App) {
    match app.route() {
        Route::Directory => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(MAIN_AREA_MIN_HEIGHT),
                    Constraint::Length(STATUS_HEIGHT),
                ])
                .split(frame.area());

            let [main_area, status_area] = chunks.as_ref() else {
                return;
            };

            rooms::render(frame, app, *main_area);
            status::render(frame, app, *status_area);
        },
        Route::Thread { .. } => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(MAIN_AREA_MIN_HEIGHT),
                    Constraint::Length(COMPOSER_HEIGHT),
                    Constraint::Length(STATUS_HEIGHT),
                ])
                .split(frame.area());

            let [main_area, composer_area, status_area] = chunks.as_ref() else {
                return;
            };

            thread::render(frame, app, *main_area);
            composer::render(frame, app, *composer_area);
            status::render(frame, app, *status_area);
        },
    }
}
