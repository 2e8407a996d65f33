use std::sync::Arc;

use rayon::ThreadPool;

/// Environment variable overriding [`SearchConfig::min_parallel_rows`].
pub const MIN_PARALLEL_ROWS_ENV: &str = "TABSEEK_MIN_PARALLEL_ROWS";
/// Environment variable overriding [`SearchConfig::min_rows_per_task`].
pub const MIN_ROWS_PER_TASK_ENV: &str = "TABSEEK_MIN_ROWS_PER_TASK";

/// Run-time configuration for search dispatch (no hidden constants).
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Calls with fewer rows of work than this run serially on the caller's
    /// thread; fanning out tiny inputs costs more than it saves.
    pub min_parallel_rows: usize,
    /// Smallest number of rows a single rayon task processes.
    pub min_rows_per_task: usize,
    /// Dedicated worker pool. `None` runs on rayon's global pool.
    pub thread_pool: Option<Arc<ThreadPool>>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_parallel_rows: 4096,
            min_rows_per_task: 1024,
            thread_pool: None,
        }
    }
}

impl SearchConfig {
    /// Defaults overlaid with any parseable `TABSEEK_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(rows) = read_env_usize(MIN_PARALLEL_ROWS_ENV) {
            config.min_parallel_rows = rows;
        }
        if let Some(rows) = read_env_usize(MIN_ROWS_PER_TASK_ENV) {
            config = config.with_min_rows_per_task(rows);
        }
        config
    }

    pub fn with_min_parallel_rows(mut self, rows: usize) -> Self {
        self.min_parallel_rows = rows;
        self
    }

    pub fn with_min_rows_per_task(mut self, rows: usize) -> Self {
        self.min_rows_per_task = rows.max(1);
        self
    }

    pub fn with_thread_pool(mut self, pool: Arc<ThreadPool>) -> Self {
        self.thread_pool = Some(pool);
        self
    }

    /// Force every call onto the caller's thread.
    pub fn serial() -> Self {
        Self::default().with_min_parallel_rows(usize::MAX)
    }

    #[inline]
    pub fn should_parallelize(&self, rows: usize) -> bool {
        rows >= self.min_parallel_rows
    }

    /// Run `op` inside the configured pool, or directly when none is set.
    pub(crate) fn install<R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.thread_pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

fn read_env_usize(name: &str) -> Option<usize> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<usize>() {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(
                variable = name,
                value = %raw,
                error = %err,
                "ignoring unparseable setting"
            );
            None
        }
    }
}
