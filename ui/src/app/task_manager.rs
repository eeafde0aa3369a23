use crate::components::common::{LoadingActivityMsg, Msg};
use crate::error::{AppError, ErrorReporter};
use mailroom_server::taskpool::TaskPool;
use std::fmt::Display;
use std::future::Future;
use std::sync::mpsc::Sender;
use std::time::Duration;

/// Default upper bound for one operation, on top of the HTTP client timeout.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs backend calls on the task pool with loading indicators and error reporting.
///
/// Operations post their own result messages; the manager only brackets them
/// with `LoadingActivityMsg::Start`/`Stop` and reports an `Err` through the
/// [`ErrorReporter`].
#[derive(Clone)]
pub struct TaskManager {
    taskpool: TaskPool,
    tx_to_main: Sender<Msg>,
    error_reporter: ErrorReporter,
    timeout: Duration,
}

impl TaskManager {
    pub fn new(taskpool: TaskPool, tx_to_main: Sender<Msg>, error_reporter: ErrorReporter) -> Self {
        Self {
            taskpool,
            tx_to_main,
            error_reporter,
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Upper bound applied by [`TaskManager::execute`].
    ///
    /// An operation cut off here posts no result of its own, so callers that
    /// must always answer bound their work below it.
    pub fn operation_timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute an async operation with loading indicator and timeout.
    pub fn execute<F, R>(&self, loading_message: impl Display, operation: F)
    where
        F: Future<Output = Result<R, AppError>> + Send + 'static,
        R: Send + 'static,
    {
        let timeout = self.timeout;

        Self::send_message_or_report_error(
            &self.tx_to_main,
            Msg::LoadingActivity(LoadingActivityMsg::Start(loading_message.to_string())),
            "loading start",
            &self.error_reporter,
        );

        let tx_to_main = self.tx_to_main.clone();
        let error_reporter = self.error_reporter.clone();

        self.taskpool.execute(async move {
            let final_result = match tokio::time::timeout(timeout, operation).await {
                Ok(operation_result) => operation_result,
                Err(_) => {
                    log::warn!("Operation timed out after {timeout:?}");
                    Err(AppError::Api(format!(
                        "Operation timed out after {} seconds",
                        timeout.as_secs()
                    )))
                }
            };

            Self::send_message_or_report_error(
                &tx_to_main,
                Msg::LoadingActivity(LoadingActivityMsg::Stop),
                "loading stop",
                &error_reporter,
            );

            if let Err(error) = final_result {
                error_reporter.report_simple(error, "TaskManager", "async_operation");
            }
        });
    }

    /// Execute without a loading indicator, e.g. search-as-you-type.
    pub fn execute_background<F, R>(&self, operation: F)
    where
        F: Future<Output = Result<R, AppError>> + Send + 'static,
        R: Send + 'static,
    {
        let error_reporter = self.error_reporter.clone();
        self.taskpool.execute(async move {
            if let Err(error) = operation.await {
                error_reporter.report_simple(error, "TaskManager", "async_operation_bg");
            }
        });
    }

    /// Helper method to send a message to the main thread or report error if it fails
    pub fn send_message_or_report_error(
        tx: &Sender<Msg>,
        msg: Msg,
        context: &str,
        error_reporter: &ErrorReporter,
    ) {
        if let Err(e) = tx.send(msg) {
            error_reporter.report_send_error(context, e);
        }
    }

    /// Cancels queued and running operations; used on shutdown.
    pub fn shutdown(&self) {
        log::info!("Cancelling outstanding operations");
        self.taskpool.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::common::PopupActivityMsg;
    use claims::*;
    use std::sync::mpsc;
    use tokio::time::sleep;

    fn create_test_setup() -> (TaskManager, mpsc::Receiver<Msg>) {
        let taskpool = TaskPool::new(4);
        let (tx, rx) = mpsc::channel();
        let error_reporter = ErrorReporter::new(tx.clone());
        (TaskManager::new(taskpool, tx, error_reporter), rx)
    }

    fn collect_messages(rx: &mpsc::Receiver<Msg>, expected_count: usize) -> Vec<Msg> {
        let mut messages = Vec::new();
        let start = std::time::Instant::now();
        while messages.len() < expected_count && start.elapsed() < Duration::from_secs(2) {
            if let Ok(msg) = rx.recv_timeout(Duration::from_millis(50)) {
                messages.push(msg);
            }
        }
        messages
    }

    #[tokio::test]
    async fn test_execute_brackets_with_start_and_stop() {
        let (task_manager, rx) = create_test_setup();

        task_manager.execute("Sending email...", async move {
            sleep(Duration::from_millis(10)).await;
            Ok::<(), AppError>(())
        });

        sleep(Duration::from_millis(100)).await;
        let messages = collect_messages(&rx, 2);
        assert_eq!(messages.len(), 2);
        assert_matches!(
            &messages[0],
            Msg::LoadingActivity(LoadingActivityMsg::Start(text)) if text == "Sending email..."
        );
        assert_matches!(&messages[1], Msg::LoadingActivity(LoadingActivityMsg::Stop));
    }

    #[tokio::test]
    async fn test_execute_reports_error_after_stop() {
        let (task_manager, rx) = create_test_setup();

        task_manager.execute("Loading templates...", async move {
            Err::<(), AppError>(AppError::Api("boom".to_string()))
        });

        sleep(Duration::from_millis(100)).await;
        let messages = collect_messages(&rx, 3);
        assert_eq!(messages.len(), 3);
        assert_matches!(&messages[1], Msg::LoadingActivity(LoadingActivityMsg::Stop));
        assert_matches!(
            &messages[2],
            Msg::PopupActivity(PopupActivityMsg::ShowError(AppError::Api(_)))
        );
    }

    #[tokio::test]
    async fn test_execute_times_out() {
        let (task_manager, rx) = create_test_setup();
        let task_manager = task_manager.with_timeout(Duration::from_millis(20));

        task_manager.execute("Slow", async move {
            sleep(Duration::from_secs(5)).await;
            Ok::<(), AppError>(())
        });

        sleep(Duration::from_millis(150)).await;
        let messages = collect_messages(&rx, 3);
        assert_eq!(messages.len(), 3);
        assert_matches!(&messages[1], Msg::LoadingActivity(LoadingActivityMsg::Stop));
    }

    #[tokio::test]
    async fn test_background_sends_no_loading_messages() {
        let (task_manager, rx) = create_test_setup();

        task_manager.execute_background(async move { Ok::<(), AppError>(()) });

        sleep(Duration::from_millis(50)).await;
        assert_err!(rx.try_recv());
    }

    #[test]
    fn test_send_message_or_report_error_failure() {
        let (tx, rx) = mpsc::channel();
        let error_reporter = ErrorReporter::new(tx.clone());
        drop(rx);

        TaskManager::send_message_or_report_error(
            &tx,
            Msg::LoadingActivity(LoadingActivityMsg::Stop),
            "test",
            &error_reporter,
        );
    }
}
