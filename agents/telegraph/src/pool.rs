use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::actions::JobStatus;

/// A fixed-width pool of workers draining a shared job queue. Dequeueing
/// happens under one async mutex, so emptiness checks and pops are a
/// single atomic step: no job is processed twice and none is dropped
/// when several workers hit the tail of the queue together.
pub struct WorkerPool {
    width: usize,
}

impl WorkerPool {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Runs every queued job through `handler`, which must contain its
    /// own failures and return an outcome. Completes when the queue is
    /// empty and every worker has exited; returns the outcomes of all
    /// jobs, in no particular order.
    pub async fn run<H, Fut>(&self, jobs: Vec<String>, handler: H) -> Vec<JobStatus>
    where
        H: Fn(String) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = JobStatus> + Send,
    {
        let queue = Arc::new(Mutex::new(VecDeque::from(jobs)));

        let workers = (0..self.width).map(|worker| {
            let queue = queue.clone();
            let handler = handler.clone();
            tokio::spawn(async move {
                let mut outcomes = Vec::new();
                loop {
                    let job = queue.lock().await.pop_front();
                    let Some(job) = job else { break };
                    outcomes.push(handler(job).await);
                }
                debug!(worker, processed = outcomes.len(), "worker drained the queue");
                outcomes
            })
        });

        let mut all = Vec::new();
        for joined in join_all(workers).await {
            match joined {
                Ok(outcomes) => all.extend(outcomes),
                // A panicking handler would violate the job-isolation
                // contract; surface it loudly but keep the pool's result.
                Err(err) => error!(error = %err, "worker task aborted"),
            }
        }
        all
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    use super::*;

    async fn run_counting(width: usize, n: usize) -> (Vec<JobStatus>, Vec<String>) {
        let seen = Arc::new(StdMutex::new(Vec::new()));
        let jobs: Vec<String> = (0..n).map(|i| format!("job-{i}")).collect();
        let record = seen.clone();
        let outcomes = WorkerPool::new(width)
            .run(jobs, move |job| {
                let record = record.clone();
                async move {
                    record.lock().unwrap().push(job);
                    tokio::task::yield_now().await;
                    JobStatus::Succeeded
                }
            })
            .await;
        let mut seen = seen.lock().unwrap().clone();
        seen.sort();
        (outcomes, seen)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn every_job_is_processed_exactly_once() {
        for width in [1usize, 5, 50] {
            for n in [0usize, 1, 100] {
                let (outcomes, mut seen) = run_counting(width, n).await;
                assert_eq!(outcomes.len(), n, "width {width}, {n} jobs");
                seen.dedup();
                assert_eq!(seen.len(), n, "width {width}, {n} jobs");
            }
        }
    }

    #[tokio::test]
    async fn a_failing_job_does_not_stop_the_rest() {
        let processed = Arc::new(AtomicUsize::new(0));
        let counter = processed.clone();
        let jobs = vec!["ok".to_string(), "bad".to_string(), "ok".to_string()];
        let outcomes = WorkerPool::new(2)
            .run(jobs, move |job| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    if job == "bad" {
                        JobStatus::Failed
                    } else {
                        JobStatus::Succeeded
                    }
                }
            })
            .await;
        assert_eq!(processed.load(Ordering::SeqCst), 3);
        assert_eq!(
            outcomes.iter().filter(|s| **s == JobStatus::Failed).count(),
            1
        );
    }

    #[tokio::test]
    async fn wider_pool_than_queue_still_terminates() {
        let (outcomes, _) = run_counting(50, 1).await;
        assert_eq!(outcomes.len(), 1);
    }

    mod fleet {
        use super::*;
        use crate::actions::{process_account, JobContext, ReceiptPoll, RunMode};
        use telegraph_core::mocks::MockChainClient;

        fn context(client: Arc<MockChainClient>) -> Arc<JobContext> {
            Arc::new(JobContext {
                client,
                mode: RunMode::SendOnly,
                gas_buffer: 1.05,
                poll: ReceiptPoll::default(),
            })
        }

        fn account_line(i: u64) -> String {
            format!("{i:064x}:gm {i}:110")
        }

        #[tokio::test]
        async fn three_accounts_on_two_workers_all_succeed() {
            let client = Arc::new(MockChainClient::default());
            let ctx = context(client.clone());
            let jobs = (1..=3).map(account_line).collect();
            let outcomes = WorkerPool::new(2)
                .run(jobs, move |line| process_account(line, ctx.clone()))
                .await;
            assert_eq!(outcomes.len(), 3);
            assert!(outcomes.iter().all(|s| *s == JobStatus::Succeeded));
            assert_eq!(client.broadcast_count(), 3);
        }

        #[tokio::test]
        async fn malformed_line_only_fails_its_own_job() {
            let client = Arc::new(MockChainClient::default());
            let ctx = context(client.clone());
            let jobs = vec![account_line(1), "onlykey".to_string(), account_line(2)];
            let outcomes = WorkerPool::new(2)
                .run(jobs, move |line| process_account(line, ctx.clone()))
                .await;
            let failed = outcomes.iter().filter(|s| **s == JobStatus::Failed).count();
            assert_eq!(failed, 1);
            assert_eq!(outcomes.len(), 3);
            assert_eq!(client.broadcast_count(), 2);
        }

        #[tokio::test]
        async fn one_refused_broadcast_leaves_the_pool_running() {
            let client = Arc::new(MockChainClient::default());
            *client.fail_broadcast.lock().unwrap() = true;
            let ctx = context(client.clone());
            let jobs = (1..=4).map(account_line).collect();
            let outcomes = WorkerPool::new(2)
                .run(jobs, move |line| process_account(line, ctx.clone()))
                .await;
            // Every job still terminates with a logged failure.
            assert_eq!(outcomes.len(), 4);
            assert!(outcomes.iter().all(|s| *s == JobStatus::Failed));
        }
    }
}
