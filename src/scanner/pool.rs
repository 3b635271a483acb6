//! Bounded worker pool: a shared task queue drained by a fixed number of
//! workers, results delivered over a channel in completion order.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

/// Fixed-size pool of asynchronous workers.
///
/// Workers are independent; nothing is shared across tasks except the
/// queue itself. Dropping the result receiver stops idle workers at
/// their next queue pop while in-flight handlers run to completion.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    /// A pool with at least one worker.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `handler` over every task and return a receiver yielding
    /// results as workers finish them. At most `workers` handlers are in
    /// flight at any moment. The channel closes once every task has
    /// resolved.
    pub fn dispatch<T, R, F, Fut>(&self, tasks: Vec<T>, handler: F) -> mpsc::Receiver<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Fut + Clone + Send + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let capacity = tasks.len().max(1);
        let queue = Arc::new(Mutex::new(VecDeque::from(tasks)));
        let (result_tx, result_rx) = mpsc::channel(capacity);

        for _ in 0..self.workers {
            let queue = Arc::clone(&queue);
            let result_tx = result_tx.clone();
            let handler = handler.clone();
            tokio::spawn(async move {
                loop {
                    let task = { queue.lock().await.pop_front() };
                    let Some(task) = task else { break };
                    let result = handler(task).await;
                    if result_tx.send(result).await.is_err() {
                        break;
                    }
                }
            });
        }

        result_rx
    }

    /// Convenience wrapper collecting every result before returning.
    pub async fn run<T, R, F, Fut>(&self, tasks: Vec<T>, handler: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Fut + Clone + Send + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let total = tasks.len();
        let mut receiver = self.dispatch(tasks, handler);
        let mut results = Vec::with_capacity(total);
        while let Some(result) = receiver.recv().await {
            results.push(result);
        }
        results
    }
}
