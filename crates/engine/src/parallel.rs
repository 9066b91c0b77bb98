//! Worker-pool parallel traversal.
//!
//! The splitter's page-aligned sub-ranges become tasks on a shared queue;
//! a fixed pool of worker threads drains them concurrently and sends items
//! to the consumer over a channel. Workers share nothing mutable beyond
//! the task queue itself — every sub-range addresses disjoint offsets of
//! one immutable query, so fetches need no coordination. Item order across
//! sub-ranges is unspecified; the guarantee is multiset equality with a
//! sequential traversal of the same query.
//!
//! There is no cancellation primitive: a consumer that stops pulling drops
//! the receiving end, sends start failing, and each worker winds down after
//! its in-flight fetch completes.

use crate::splitter::PageSplitter;
use parking_lot::Mutex;
use searchstream_core::{PageFetcher, Record, Result};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, error};

/// Receiving side of a worker-pool traversal.
///
/// Iterates `Result` items in whatever order the workers produce them.
/// Dropping it stops the traversal; worker threads are joined on drop.
pub struct ParallelStream<R> {
    receiver: Option<mpsc::Receiver<Result<R>>>,
    workers: Vec<JoinHandle<()>>,
}

impl<R> ParallelStream<R> {
    /// Split `splitter` fully and drain the sub-ranges on `workers` threads.
    pub fn spawn<F>(splitter: PageSplitter<R, F>, workers: usize) -> Self
    where
        R: Record + Send + 'static,
        F: PageFetcher<R> + Clone + Send + 'static,
    {
        let tasks = splitter.split_fully();
        let worker_count = workers.max(1).min(tasks.len().max(1));
        debug!(tasks = tasks.len(), workers = worker_count, "parallel traversal");

        let queue = Arc::new(Mutex::new(tasks));
        let (sender, receiver) = mpsc::channel::<Result<R>>();

        let handles = (0..worker_count)
            .map(|i| {
                let queue = Arc::clone(&queue);
                let sender = sender.clone();
                std::thread::Builder::new()
                    .name(format!("searchstream-fetch-{i}"))
                    .spawn(move || worker_loop(&queue, &sender))
                    .expect("failed to spawn fetch worker thread")
            })
            .collect();

        ParallelStream {
            receiver: Some(receiver),
            workers: handles,
        }
    }
}

fn worker_loop<R, F>(
    queue: &Mutex<Vec<PageSplitter<R, F>>>,
    sender: &mpsc::Sender<Result<R>>,
) where
    R: Record + Send,
    F: PageFetcher<R> + Clone,
{
    loop {
        let Some(task) = queue.lock().pop() else {
            return;
        };

        for item in task.drain() {
            if let Err(err) = &item {
                error!(error = %err, "fetch worker surfacing failure");
            }
            if sender.send(item).is_err() {
                // Consumer stopped pulling; no further requests
                return;
            }
        }
    }
}

impl<R> Iterator for ParallelStream<R> {
    type Item = Result<R>;

    fn next(&mut self) -> Option<Result<R>> {
        self.receiver.as_ref()?.recv().ok()
    }
}

impl<R> Drop for ParallelStream<R> {
    fn drop(&mut self) {
        // Closing the channel first lets in-flight workers bail on send
        self.receiver.take();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

impl<R> std::fmt::Debug for ParallelStream<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelStream")
            .field("workers", &self.workers.len())
            .finish_non_exhaustive()
    }
}
