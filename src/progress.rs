// src/progress.rs
/// Lightweight progress reporting used by long-running operations (sheet updates).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One listing was fetched and parsed.
    fn item_done(&mut self, _listing_id: &str) {}

    /// One listing could not be refreshed; its row is left as it was.
    fn item_failed(&mut self, _listing_id: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
