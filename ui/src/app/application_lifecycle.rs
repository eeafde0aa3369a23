use crate::app::model::Model;
use crate::components::common::Msg;
use std::time::Duration;

/// How often the loop ticks and drains background results.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Why [`ApplicationLifecycle::run_until`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    ConditionMet,
    AuthenticationRequired,
    Quit,
    TimedOut,
}

pub struct ApplicationLifecycle;

impl ApplicationLifecycle {
    /// Runs the message loop until `done` holds, the session is rejected,
    /// the model asks to quit or `timeout` elapses.
    pub async fn run_until<F>(model: &mut Model, timeout: Duration, mut done: F) -> LoopExit
    where
        F: FnMut(&Model) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            model.process_pending();
            model.handle(Msg::Tick);

            if done(model) {
                return LoopExit::ConditionMet;
            }
            if model.auth_required().is_some() {
                return LoopExit::AuthenticationRequired;
            }
            if model.should_quit() {
                return LoopExit::Quit;
            }
            if tokio::time::Instant::now() >= deadline {
                log::warn!("Message loop timed out after {timeout:?}");
                return LoopExit::TimedOut;
            }

            tokio::time::sleep(TICK_INTERVAL).await;
        }
    }

    /// Processes the final messages and cancels outstanding work.
    pub fn shutdown_application(mut model: Model) {
        let handled = model.process_pending();
        log::debug!("Processed {handled} messages during shutdown");
        model.handle(Msg::AppClose);
    }
}
