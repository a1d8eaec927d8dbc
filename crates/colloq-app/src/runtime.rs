//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Driver`]: Platform-specific I/O

use crate::{App, AppAction, AppEvent, AuthContext, Driver};

/// Generic runtime that orchestrates App and Driver.
pub struct Runtime<D: Driver> {
    driver: D,
    app: App,
}

impl<D: Driver> Runtime<D> {
    /// Create a new runtime with the given driver and auth context.
    pub fn new(driver: D, auth: AuthContext) -> Self {
        Self { driver, app: App::new(auth) }
    }

    /// Run the main event loop.
    ///
    /// This is the core orchestration loop that:
    /// 1. Issues the initial directory fetch
    /// 2. Polls for input events from the driver
    /// 3. Drains completed API calls back into the App
    /// 4. Executes the actions each step produces
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let actions = self.app.start();
        let mut quit = self.process_actions(actions)?;
        if !quit {
            self.driver.render(&self.app)?;
        }

        while !quit {
            let actions = self.driver.poll_event(&mut self.app).await?;
            if self.process_actions(actions)? {
                break;
            }

            while let Some(event) = self.driver.poll_outcome().await {
                let actions = self.app.handle(event);
                if self.process_actions(actions)? {
                    quit = true;
                    break;
                }
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Process actions produced by the App.
    ///
    /// Returns `true` if the application should quit.
    fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.app)?,
                AppAction::Quit => return Ok(true),
                call @ (AppAction::FetchRooms { .. }
                | AppAction::FetchHistory { .. }
                | AppAction::PostMessage { .. }) => self.driver.submit(call)?,
            }
        }
        Ok(false)
    }

    /// Feed a single event through the App and execute the actions.
    ///
    /// Exposed for drivers that receive out-of-band events (e.g. an auth
    /// listener reporting a role change).
    pub fn dispatch(&mut self, event: AppEvent) -> Result<bool, D::Error> {
        let actions = self.app.handle(event);
        self.process_actions(actions)
    }

    /// Get a reference to the App.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the App.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}
