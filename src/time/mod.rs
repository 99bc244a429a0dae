//! Snapshot time discovery and selection.
//!
//! A case directory contains one subdirectory per output time, named by the
//! numeric time value (`0`, `0.5`, `100`, ...). This module discovers those
//! directories and applies the command-line sub-range/stride selection to
//! them before the accumulation pass runs.

use std::path::Path;

use thiserror::Error;

/// Error type for time-directory discovery.
#[derive(Debug, Error)]
pub enum TimeError {
    /// File I/O error while scanning the case root
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One discrete output time of the simulation.
///
/// `name` is the on-disk directory spelling and `value` its numeric value.
/// The spelling is preserved so that fields written back to the same
/// instant land in the same directory (`0.10` stays `0.10`, not `0.1`).
#[derive(Clone, Debug, PartialEq)]
pub struct TimeInstant {
    /// Numeric time value in seconds
    pub value: f64,
    /// Directory name for this instant
    pub name: String,
}

impl TimeInstant {
    /// Create an instant from a numeric value; the name is the canonical
    /// spelling of the value.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            name: value.to_string(),
        }
    }

    /// Parse a directory name into an instant.
    ///
    /// Returns `None` for names that are not finite non-negative numbers
    /// (`constant`, `postProcessing`, hidden directories, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let value: f64 = name.parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        Some(Self {
            value,
            name: name.to_string(),
        })
    }
}

impl std::fmt::Display for TimeInstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Discover the output-time directories under a case root.
///
/// Scans immediate subdirectories, keeps those whose names parse as finite
/// non-negative numbers, and returns them sorted ascending by value.
/// Non-numeric directories are skipped silently.
pub fn discover_times(case_root: &Path) -> Result<Vec<TimeInstant>, TimeError> {
    let mut times = Vec::new();

    for entry in std::fs::read_dir(case_root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if let Some(instant) = TimeInstant::from_name(name) {
                times.push(instant);
            }
        }
    }

    times.sort_by(|a, b| a.value.total_cmp(&b.value));
    Ok(times)
}

/// Flag-based sub-range/stride selection over discovered instants.
///
/// Mirrors the command-line surface: an inclusive `[from, to]` window, a
/// stride over the surviving instants, and a latest-only switch. Applying
/// a selection never reorders instants; the result is always ascending.
#[derive(Clone, Debug)]
pub struct TimeSelection {
    /// Keep instants with `value >= from`
    pub from: Option<f64>,
    /// Keep instants with `value <= to`
    pub to: Option<f64>,
    /// Keep every n-th surviving instant (1 = all)
    pub every: usize,
    /// Keep only the last surviving instant
    pub latest: bool,
}

impl Default for TimeSelection {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            every: 1,
            latest: false,
        }
    }
}

impl TimeSelection {
    /// Select all instants.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to the inclusive window `[from, to]`.
    pub fn with_range(mut self, from: Option<f64>, to: Option<f64>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Keep every n-th instant of the windowed list.
    pub fn with_stride(mut self, every: usize) -> Self {
        self.every = every;
        self
    }

    /// Keep only the latest instant.
    pub fn latest_only(mut self) -> Self {
        self.latest = true;
        self
    }

    /// Apply the selection to an ascending list of instants.
    ///
    /// An empty result is a legal outcome here; the accumulator treats it
    /// as a defined error before any division can happen.
    pub fn apply(&self, times: &[TimeInstant]) -> Vec<TimeInstant> {
        let windowed = times
            .iter()
            .filter(|t| self.from.map_or(true, |lo| t.value >= lo))
            .filter(|t| self.to.map_or(true, |hi| t.value <= hi));

        let selected: Vec<TimeInstant> = windowed.step_by(self.every.max(1)).cloned().collect();

        if self.latest {
            selected.into_iter().next_back().into_iter().collect()
        } else {
            selected
        }
    }
}
