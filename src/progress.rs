//! Progress reporting for the parallel run.
//!
//! The collector calls a [`Progress`] once per completed file. Implementations
//! only observe; nothing they do feeds back into the results.

use std::io::{self, Write};
use std::path::Path;

pub trait Progress {
    /// Called after each file finishes, with `completed` counting from 1.
    fn update(&mut self, completed: usize, total: usize, path: &Path);

    /// Called once after the last update.
    fn finish(&mut self) {}
}

/// Rewrites a single `Processed i/n: path` line in place.
pub struct ConsoleProgress<W: Write = io::Stderr> {
    out: W,
    started: bool,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> ConsoleProgress<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out, started: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Progress for ConsoleProgress<W> {
    fn update(&mut self, completed: usize, total: usize, path: &Path) {
        self.started = true;
        // Progress output is best-effort; a closed stderr must not stop the run.
        write!(self.out, "\rProcessed {}/{}: {}", completed, total, path.display()).ok();
        self.out.flush().ok();
    }

    fn finish(&mut self) {
        if self.started {
            writeln!(self.out).ok();
        }
    }
}

pub struct SilentProgress;

impl Progress for SilentProgress {
    fn update(&mut self, _completed: usize, _total: usize, _path: &Path) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_progress_rewrites_line() {
        let mut progress = ConsoleProgress::with_writer(Vec::new());
        progress.update(1, 2, Path::new("a.yaml"));
        progress.update(2, 2, Path::new("b.yaml"));
        progress.finish();

        let out = String::from_utf8(progress.into_inner()).unwrap();
        assert_eq!(out, "\rProcessed 1/2: a.yaml\rProcessed 2/2: b.yaml\n");
    }

    #[test]
    fn test_console_progress_silent_when_nothing_ran() {
        let mut progress = ConsoleProgress::with_writer(Vec::new());
        progress.finish();

        assert!(progress.into_inner().is_empty());
    }
}
