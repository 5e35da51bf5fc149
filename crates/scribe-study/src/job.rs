use scribe_llm::{AssistantsApi, Run, RunStatus, ThreadMessage};
use std::future::Future;
use std::time::Duration;

use crate::error::{Result, StudyError};
use crate::reply::latest_assistant_message;
use crate::store::AssistantHandle;

/// Default polling interval for run status checks (milliseconds).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default ceiling on how long a single run may be polled (seconds).
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            timeout: Duration::from_secs(DEFAULT_POLL_TIMEOUT_SECS),
        }
    }
}

impl PollConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A submitted run and the thread it belongs to
#[derive(Debug, Clone)]
pub struct Job {
    pub thread_id: String,
    pub run: Run,
}

#[derive(Debug, Clone)]
pub enum JobOutcome {
    Completed { run: Run, message: ThreadMessage },
    /// Run completed but the thread holds no assistant message
    NoReply { run: Run },
    /// Run ended failed, cancelled or expired; nothing was extracted
    Unsuccessful { run: Run },
}

/// Create a thread, post `prompt` as a user message and start a run
pub async fn submit_job(
    api: &dyn AssistantsApi,
    handle: &AssistantHandle,
    prompt: &str,
) -> Result<Job> {
    let thread = api.create_thread().await?;
    api.create_message(&thread.id, prompt).await?;
    let run = api.create_run(&thread.id, &handle.id).await?;
    tracing::debug!(thread_id = %thread.id, run_id = %run.id, "Submitted run");

    Ok(Job {
        thread_id: thread.id,
        run,
    })
}

/// Fetch the run status every `config.interval` until it is terminal.
///
/// Fails with `StudyError::PollTimeout` once `config.timeout` has elapsed.
pub async fn poll_until_terminal(
    api: &dyn AssistantsApi,
    job: &Job,
    config: &PollConfig,
) -> Result<Run> {
    match tokio::time::timeout(config.timeout, poll_loop(api, job, config.interval)).await {
        Ok(result) => result,
        Err(_) => Err(StudyError::PollTimeout {
            run_id: job.run.id.clone(),
            waited: config.timeout,
        }),
    }
}

async fn poll_loop(api: &dyn AssistantsApi, job: &Job, interval: Duration) -> Result<Run> {
    let mut polls = 0u32;
    loop {
        let run = api.retrieve_run(&job.thread_id, &job.run.id).await?;
        polls += 1;
        if run.status.is_terminal() {
            tracing::debug!(run_id = %run.id, status = %run.status, polls, "Run reached terminal status");
            return Ok(run);
        }
        tokio::time::sleep(interval).await;
    }
}

/// Submit `prompt`, wait for the run and pick the assistant's reply
pub async fn run_job(
    api: &dyn AssistantsApi,
    handle: &AssistantHandle,
    prompt: &str,
    config: &PollConfig,
) -> Result<JobOutcome> {
    let job = submit_job(api, handle, prompt).await?;
    let run = poll_until_terminal(api, &job, config).await?;

    if run.status != RunStatus::Completed {
        tracing::warn!(
            run_id = %run.id,
            status = %run.status,
            error = ?run.last_error,
            "Run did not complete"
        );
        return Ok(JobOutcome::Unsuccessful { run });
    }

    let messages = api.list_messages(&job.thread_id).await?;
    Ok(match latest_assistant_message(messages) {
        Some(message) => JobOutcome::Completed { run, message },
        None => JobOutcome::NoReply { run },
    })
}

/// Drive `fut` to completion unless Ctrl-C arrives first
pub async fn until_interrupted<F: Future>(fut: F) -> Option<F::Output> {
    tokio::select! {
        output = fut => Some(output),
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted");
            None
        }
    }
}
