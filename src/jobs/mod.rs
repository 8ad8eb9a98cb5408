//! Background image-generation jobs.
//!
//! Each job regenerates the image for one ingredient or one recipe. Jobs are
//! keyed by a stable work name and deduplicated while in flight: a trigger
//! for a name that is already running is dropped, not queued. Transient
//! failures (network, API) are retried with growing delays; invalid input
//! fails the job permanently. No failure escapes a job task - a missing
//! image simply stays missing.

mod ingredient;
mod recipe;

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, warn};
use sqlx::SqlitePool;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::config::RetryConfig;
use crate::images::ImageGenerator;

/// One unit of background work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageJob {
    Ingredient { ingredient_id: i64 },
    Recipe { recipe_id: i64 },
}

impl ImageJob {
    /// Stable dedup key: one outstanding job per entity at a time.
    pub fn work_name(&self) -> String {
        match self {
            ImageJob::Ingredient { ingredient_id } => {
                format!("ingredient_image_{}", ingredient_id)
            }
            ImageJob::Recipe { recipe_id } => format!("recipe_image_{}", recipe_id),
        }
    }
}

/// Terminal state of a single job attempt or of a whole job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// Image generated, stored, and recorded
    Success,
    /// Transient failure; worth another attempt
    Retry,
    /// Permanent failure; the job is abandoned
    Failure,
}

/// Spawns and deduplicates image jobs.
#[derive(Clone)]
pub struct JobScheduler {
    inner: Arc<SchedulerInner>,
}

struct SchedulerInner {
    pool: SqlitePool,
    generator: Option<Arc<dyn ImageGenerator>>,
    image_dir: PathBuf,
    retry: RetryConfig,
    in_flight: Mutex<HashSet<String>>,
}

impl JobScheduler {
    pub fn new(
        pool: SqlitePool,
        generator: Option<Arc<dyn ImageGenerator>>,
        image_dir: PathBuf,
        retry: RetryConfig,
    ) -> Self {
        JobScheduler {
            inner: Arc::new(SchedulerInner {
                pool,
                generator,
                image_dir,
                retry,
                in_flight: Mutex::new(HashSet::new()),
            }),
        }
    }

    /// Spawn a job unless one with the same work name is already in flight.
    ///
    /// Returns `None` when the trigger is dropped: either the name is taken
    /// (keep-existing policy) or no generator is configured because the API
    /// key is missing - a precondition skip, not an error.
    pub fn spawn(&self, job: ImageJob) -> Option<JoinHandle<JobOutcome>> {
        let name = job.work_name();

        let Some(generator) = self.inner.generator.clone() else {
            debug!("no API key configured; skipping {}", name);
            return None;
        };

        {
            let mut in_flight = self
                .inner
                .in_flight
                .lock()
                .expect("in-flight registry poisoned");
            if !in_flight.insert(name.clone()) {
                debug!("{} already in flight; keeping existing job", name);
                return None;
            }
        }

        let inner = Arc::clone(&self.inner);
        Some(tokio::spawn(async move {
            let outcome = run_with_retry(&inner, generator.as_ref(), job).await;
            inner
                .in_flight
                .lock()
                .expect("in-flight registry poisoned")
                .remove(&name);
            outcome
        }))
    }

    /// True when no job is currently in flight.
    pub fn is_idle(&self) -> bool {
        self.inner
            .in_flight
            .lock()
            .expect("in-flight registry poisoned")
            .is_empty()
    }

    /// Wait until every in-flight job has finished.
    pub async fn wait_idle(&self) {
        while !self.is_idle() {
            sleep(Duration::from_millis(25)).await;
        }
    }
}

async fn run_with_retry(
    inner: &SchedulerInner,
    generator: &dyn ImageGenerator,
    job: ImageJob,
) -> JobOutcome {
    let attempts = inner.retry.attempts.max(1);

    for attempt in 1..=attempts {
        let outcome = match job {
            ImageJob::Ingredient { ingredient_id } => {
                ingredient::run(&inner.pool, generator, &inner.image_dir, ingredient_id).await
            }
            ImageJob::Recipe { recipe_id } => {
                recipe::run(&inner.pool, generator, &inner.image_dir, recipe_id).await
            }
        };

        match outcome {
            JobOutcome::Retry if attempt < attempts => {
                // Delay grows with each attempt
                let delay = Duration::from_millis(inner.retry.delay_ms * attempt as u64);
                warn!(
                    "{} failed (attempt {}/{}), retrying in {:?}",
                    job.work_name(),
                    attempt,
                    attempts,
                    delay
                );
                sleep(delay).await;
            }
            JobOutcome::Retry => {
                warn!(
                    "{} failed after {} attempts, giving up",
                    job.work_name(),
                    attempts
                );
                return JobOutcome::Failure;
            }
            outcome => return outcome,
        }
    }

    JobOutcome::Failure
}
