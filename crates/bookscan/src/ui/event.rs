/// Everything the user or the scanner can ask of the [`Controller`](super::Controller).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The start button was pressed.
    StartScan,
    /// The stop button was pressed.
    StopScan,
    /// The scanner decoded a code from the capture stream.
    Decoded(String),
    /// The download button was pressed.
    DownloadRequested,
}
