use crate::{
    config::Config,
    file_discovery::FileDiscovery,
    openapi::{extract_openapi_stats, Stats},
    processor::process_file,
    progress::Progress,
};
use anyhow::Result;
use crossbeam::channel;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::thread;
use std::time::Instant;
use tracing::info;

/// One qualifying document and what was extracted from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry<T = Stats> {
    pub path: PathBuf,
    pub stats: T,
}

pub struct Analyzer {
    config: Config,
    file_discovery: FileDiscovery,
}

impl Analyzer {
    pub fn new(config: Config) -> Self {
        let file_discovery = FileDiscovery::new(config.clone());
        Self {
            config,
            file_discovery,
        }
    }

    /// Locates every YAML document under the configured root and extracts
    /// OpenAPI 3.x statistics from each of them in parallel.
    pub fn analyze(&self, progress: &mut dyn Progress) -> Result<Vec<ResultEntry>> {
        let start_time = Instant::now();

        let files = self.file_discovery.discover_files()?;
        let discovered = files.len();
        info!(
            "Found {} YAML files under {}",
            discovered,
            self.config.root_directory.display()
        );

        let results = self.run_all(files, extract_openapi_stats, progress)?;

        info!(
            discovered,
            qualifying = results.len(),
            skipped = discovered - results.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Analysis complete"
        );
        Ok(results)
    }

    /// Runs `transform` over every path on a fixed-size worker pool.
    ///
    /// Results come back in completion order. Files whose processing yields
    /// `None` are dropped; each path is attempted exactly once.
    pub fn run_all<T, F>(
        &self,
        paths: Vec<PathBuf>,
        transform: F,
        progress: &mut dyn Progress,
    ) -> Result<Vec<ResultEntry<T>>>
    where
        T: Send,
        F: Fn(&str) -> Option<T> + Sync,
    {
        let total = paths.len();
        let workers = self.worker_count(total);
        info!("Processing {} files with {} workers", total, workers);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("openapi-worker-{}", i))
            .build()?;

        let (result_tx, result_rx) = channel::unbounded::<(PathBuf, Option<T>)>();
        let transform = &transform;
        let mut results = Vec::new();

        let dispatch = thread::scope(|s| {
            let dispatcher = s.spawn(move || {
                pool.install(|| {
                    paths.into_par_iter().for_each_with(result_tx, |tx, path| {
                        let outcome = process_file(&path, transform);
                        // Only fails if the collector is gone, in which case nobody wants the result.
                        tx.send((path, outcome)).ok();
                    });
                });
            });

            // The channel closes once every worker's sender is dropped.
            for (index, (path, outcome)) in result_rx.iter().enumerate() {
                progress.update(index + 1, total, &path);
                if let Some(stats) = outcome {
                    results.push(ResultEntry { path, stats });
                }
            }

            dispatcher.join()
        });
        progress.finish();

        dispatch.map_err(|_| anyhow::anyhow!("Worker pool panicked during parallel run"))?;
        Ok(results)
    }

    // Never more workers than files, never fewer than one.
    fn worker_count(&self, file_count: usize) -> usize {
        self.config.effective_workers().min(file_count.max(1))
    }
}
