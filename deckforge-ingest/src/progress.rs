//! Ingestion progress reporting.

/// Trait for receiving ingestion progress updates.
pub trait IngestProgress {
    /// Called when a category's ingestion starts.
    fn on_category(&self, category: &str, total_rows: usize);

    /// Called after each record is built and resolved.
    fn on_record(&self, current: usize, total: usize, name: &str);

    /// Called when the whole run is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl IngestProgress for SilentProgress {
    fn on_category(&self, _category: &str, _total_rows: usize) {}
    fn on_record(&self, _current: usize, _total: usize, _name: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl IngestProgress for LogProgress {
    fn on_category(&self, category: &str, total_rows: usize) {
        log::info!("Ingesting {category}: {total_rows} rows");
    }

    fn on_record(&self, current: usize, total: usize, name: &str) {
        if current.is_multiple_of(25) || current == total {
            log::info!("  [{}/{}] {}", current, total, name);
        }
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
