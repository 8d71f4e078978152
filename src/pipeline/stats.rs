//! Pipeline-wide statistics helpers.
//!
//! This module defines the `PipelineStats` structure used to track
//! execution metrics for analysis runs and the `StatsManager` helper that
//! coordinates thread-safe updates to these metrics.

use std::fmt;
use std::sync::Mutex;

/// Statistics for the analysis pipeline.
///
/// Tracks how many images were processed and how many produced usable
/// dimension sets and area calculations.
#[derive(Debug, Clone)]
pub struct PipelineStats {
    /// The total number of images processed.
    pub total_processed: usize,
    /// The number of images that produced a surface-area calculation.
    pub calculated: usize,
    /// The number of images that yielded at least one dimension.
    pub with_dimensions: usize,
    /// The number of images whose detection or analysis failed.
    pub failed: usize,
}

impl PipelineStats {
    /// Creates a new PipelineStats instance with zeroed values.
    pub fn new() -> Self {
        Self {
            total_processed: 0,
            calculated: 0,
            with_dimensions: 0,
            failed: 0,
        }
    }

    /// Returns the calculation rate as a percentage (0.0 to 100.0).
    pub fn calculation_rate(&self) -> f64 {
        if self.total_processed == 0 {
            0.0
        } else {
            (self.calculated as f64 / self.total_processed as f64) * 100.0
        }
    }

    /// Returns the failure rate as a percentage (0.0 to 100.0).
    pub fn failure_rate(&self) -> f64 {
        if self.total_processed == 0 {
            0.0
        } else {
            (self.failed as f64 / self.total_processed as f64) * 100.0
        }
    }
}

impl Default for PipelineStats {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline Statistics:")?;
        writeln!(f, "  Total processed: {}", self.total_processed)?;
        writeln!(f, "  With dimensions: {}", self.with_dimensions)?;
        writeln!(
            f,
            "  Calculated: {} ({:.1}%)",
            self.calculated,
            self.calculation_rate()
        )?;
        writeln!(f, "  Failed: {} ({:.1}%)", self.failed, self.failure_rate())?;
        Ok(())
    }
}

/// Thread-safe manager for updating pipeline statistics during execution.
#[derive(Debug, Default)]
pub struct StatsManager {
    /// Shared statistics state guarded by a mutex.
    stats: Mutex<PipelineStats>,
}

impl StatsManager {
    /// Creates a new `StatsManager` instance with zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current statistics snapshot.
    pub fn get_stats(&self) -> PipelineStats {
        self.stats
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Updates the tracked metrics using the results from a batch run.
    pub fn update_stats(
        &self,
        processed_count: usize,
        calculated_count: usize,
        with_dimensions_count: usize,
        failed_count: usize,
    ) {
        if let Ok(mut stats) = self.stats.lock() {
            stats.total_processed += processed_count;
            stats.calculated += calculated_count;
            stats.with_dimensions += with_dimensions_count;
            stats.failed += failed_count;
        }
    }
}
