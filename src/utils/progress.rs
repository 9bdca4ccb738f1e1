// src/utils/progress.rs
use std::io::{self, Write};

/// Coarse percent ticker on stderr, updated in fixed increments so large
/// rasters do not flood the terminal.
pub struct Progress {
    total: usize,
    step: usize,
    last: Option<usize>,
}

impl Progress {
    pub fn new(total: usize) -> Self {
        Self::with_step(total, 2)
    }

    pub fn with_step(total: usize, step: usize) -> Self {
        Self {
            total,
            step: step.max(1),
            last: None,
        }
    }

    pub fn update(&mut self, done: usize) {
        if self.total == 0 {
            return;
        }
        let percent = done * 100 / self.total;
        let percent = percent - percent % self.step;
        if self.last != Some(percent) {
            eprint!("\r{:3}%", percent);
            io::stderr().flush().ok();
            self.last = Some(percent);
        }
    }

    pub fn finish(&mut self) {
        eprintln!("\r100%");
        self.last = Some(100);
    }
}
