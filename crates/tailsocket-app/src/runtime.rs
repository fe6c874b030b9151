//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: shell and connection state machines
//! - [`Driver`]: platform-specific I/O

use crate::{App, AppAction, Driver};

/// Generic runtime that orchestrates App and Driver.
///
/// All state mutation happens on the task running [`Runtime::run`], one event
/// at a time.
pub struct Runtime<D: Driver> {
    driver: D,
    app: App<D::Transport>,
}

impl<D: Driver> Runtime<D> {
    /// Create a new runtime around an app whose session is already opening.
    pub fn new(driver: D, app: App<D::Transport>) -> Self {
        Self { driver, app }
    }

    /// Run the main event loop until the app quits or the driver runs dry.
    ///
    /// The session is disposed and the driver stopped on every exit path,
    /// including errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let result = self.event_loop().await;

        self.app.dispose();
        self.driver.stop();

        if let Err(e) = &result {
            tracing::error!(error = %e, "runtime stopped on driver error");
        }
        result
    }

    async fn event_loop(&mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        while let Some(event) = self.driver.poll_event().await? {
            let actions = self.app.handle(event);
            if self.process_actions(actions)? {
                return Ok(());
            }
        }

        tracing::debug!("event sources exhausted");
        Ok(())
    }

    /// Execute actions returned by the App.
    ///
    /// Returns `true` if should quit.
    fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut rendered = false;
        for action in actions {
            match action {
                AppAction::Render if !rendered => {
                    self.driver.render(&self.app)?;
                    rendered = true;
                },
                AppAction::Render => {},
                AppAction::Quit => return Ok(true),
            }
        }
        Ok(false)
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App<D::Transport> {
        &self.app
    }
}
