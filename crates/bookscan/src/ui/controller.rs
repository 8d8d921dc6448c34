use log::{debug, error, info, trace, warn};

use super::{AppState, Event, Lookup, Page, ScanSession, Scanner, ScannerConfig, DOWNLOAD_PATH};

/// Drives a [`Scanner`], a [`Lookup`] and a [`Page`] from UI [`Event`]s.
///
/// The controller is the only owner of [`AppState`]; the page is re-rendered from it after
/// every event.
#[derive(Debug)]
pub struct Controller<S, L, P> {
    scanner: S,
    lookup: L,
    page: P,
    config: ScannerConfig,
    state: AppState,
}

impl<S, L, P> Controller<S, L, P>
where
    S: Scanner,
    L: Lookup,
    P: Page,
{
    /// Creates a controller using the default [`ScannerConfig`].
    pub fn new(scanner: S, lookup: L, page: P) -> Self {
        Self {
            scanner,
            lookup,
            page,
            config: ScannerConfig::default(),
            state: AppState::default(),
        }
    }

    /// Replaces the configuration used when a scan session starts.
    #[must_use]
    pub fn with_config(mut self, config: ScannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Current state of the page.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The scanner, for front ends that feed it input.
    pub fn scanner_mut(&mut self) -> &mut S {
        &mut self.scanner
    }

    /// The page.
    pub fn page(&self) -> &P {
        &self.page
    }

    /// Handles one event, then renders the page.
    pub fn dispatch(&mut self, event: Event) {
        trace!("Dispatching {event:?}");
        match event {
            Event::StartScan => self.on_start_pressed(),
            Event::StopScan => self.on_stop_pressed(),
            Event::Decoded(code) => self.on_detected(code),
            Event::DownloadRequested => self.on_download_pressed(),
        }
        self.page.render(&self.state);
    }

    fn on_start_pressed(&mut self) {
        if self.state.is_scanning() {
            debug!("Scanner already running - ignoring start");
            return;
        }

        if let Err(err) = self.scanner.init(&self.config) {
            error!("Scanner initialization failed: {err}");
            self.page.alert("The scanner could not be started");
            return;
        }

        self.scanner.start();
        self.state.session = ScanSession::Active;
        info!("Scan session started");
    }

    fn on_detected(&mut self, code: String) {
        if !self.state.is_scanning() {
            // Late detections after the session ended belong to no session.
            debug!("Ignoring detection of '{code}' - no scan session running");
            return;
        }

        self.state.isbn_input.clone_from(&code);
        self.stop_session();

        match self.lookup.lookup(&code) {
            Ok(book) => {
                info!("Adding '{}' to results", book.title);
                self.state.results.append(book);
            }
            Err(err) => {
                warn!("Lookup of '{code}' failed: {err}");
                self.page.alert(err.alert_message());
            }
        }
    }

    fn on_stop_pressed(&mut self) {
        if self.state.is_scanning() {
            self.stop_session();
        } else {
            trace!("Scanner not running - nothing to stop");
        }
    }

    fn on_download_pressed(&mut self) {
        info!("Navigating to '{DOWNLOAD_PATH}'");
        self.page.navigate(DOWNLOAD_PATH);
    }

    fn stop_session(&mut self) {
        self.scanner.stop();
        self.state.session = ScanSession::Inactive;
        info!("Scan session stopped");
    }
}
