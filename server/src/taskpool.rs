use futures_util::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

/// Bounded pool for background API calls.
///
/// At most `n_tasks` futures run at once. Clones share the same permits and
/// cancellation token; when the last clone is dropped, queued and running
/// tasks are cancelled.
#[derive(Clone)]
pub struct TaskPool {
    shared: Arc<PoolShared>,
}

struct PoolShared {
    semaphore: Arc<Semaphore>,
    cancel_token: CancellationToken,
}

impl TaskPool {
    pub fn new(n_tasks: usize) -> TaskPool {
        TaskPool {
            shared: Arc::new(PoolShared {
                semaphore: Arc::new(Semaphore::new(n_tasks)),
                cancel_token: CancellationToken::new(),
            }),
        }
    }

    pub fn execute<F, T>(&self, func: F)
    where
        F: Future<Output = T> + Send + 'static,
        T: Send,
    {
        let semaphore = self.shared.semaphore.clone();
        let token = self.shared.cancel_token.clone();
        tokio::spawn(async move {
            let main = async {
                let Ok(_permit) = semaphore.acquire().await else {
                    return;
                };
                func.await;
            };

            tokio::select! {
                () = main => {},
                () = token.cancelled() => {}
            }
        });
    }

    pub fn available_permits(&self) -> usize {
        self.shared.semaphore.available_permits()
    }

    pub fn cancel_all(&self) {
        self.shared.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.cancel_token.is_cancelled()
    }
}

impl Drop for PoolShared {
    fn drop(&mut self) {
        self.semaphore.close();
        self.cancel_token.cancel();
    }
}
