use super::AppState;

/// Server path the decoded ISBN is posted to.
pub const SCAN_PATH: &str = "/scan";

/// Server path producing the CSV export.
pub const DOWNLOAD_PATH: &str = "/download";

/// The visible surface the controller drives.
pub trait Page {
    /// Shows a notification the user has to acknowledge.
    fn alert(&mut self, message: &str);

    /// Navigates the page to a server `path`, e.g. to download the export.
    fn navigate(&mut self, path: &str);

    /// Brings the visible page up to date with `state`.
    fn render(&mut self, state: &AppState);
}
