use std::{sync::mpsc, thread, time::Duration};

use bookscan::{
    server::{self, BookSource, ServerState},
    ui::{AppState, Controller, Event, HttpLookup, LineScanner, Lookup, LookupError, Page},
    BookRecord, Error, ErrorKind,
};

/// Knows "9784167158057", fails for "500", stalls for "slow", and knows nothing else.
struct FixtureSource;

impl BookSource for FixtureSource {
    fn fetch(&self, isbn: &str) -> Result<BookRecord, Error> {
        match isbn {
            "9784167158057" => Ok(BookRecord {
                isbn: isbn.to_owned(),
                title: "Sample".to_owned(),
                authors: "A. Author".to_owned(),
                publisher: "Pub".to_owned(),
                published_date: "2020-01-01".to_owned(),
            }),
            "500" => Err(Error::new(ErrorKind::Deserialize, "broken source")),
            "slow" => {
                thread::sleep(Duration::from_secs(2));
                Err(Error::new(ErrorKind::NoValue, "too late"))
            }
            _ => Err(Error::new(ErrorKind::NoValue, "No books found!")),
        }
    }
}

/// Starts the service on an ephemeral port and returns its base URL.
fn spawn_server() -> String {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("Cannot build runtime for test");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Cannot bind test listener");
            tx.send(listener.local_addr().unwrap()).unwrap();
            server::serve(listener, ServerState::new(FixtureSource))
                .await
                .unwrap();
        });
    });
    format!("http://{}", rx.recv().unwrap())
}

#[derive(Default)]
struct RecordingPage {
    alerts: Vec<String>,
    rendered_rows: usize,
    rendered_body: String,
}

impl Page for RecordingPage {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_owned());
    }

    fn navigate(&mut self, _: &str) {}

    fn render(&mut self, state: &AppState) {
        self.rendered_rows = state.results.len();
        self.rendered_body = state.results.to_html();
    }
}

fn controller(base: &str) -> Controller<LineScanner, HttpLookup, RecordingPage> {
    let lookup = HttpLookup::new(base, Duration::from_secs(5)).unwrap();
    Controller::new(LineScanner::default(), lookup, RecordingPage::default())
}

fn scan_line(ctl: &mut Controller<LineScanner, HttpLookup, RecordingPage>, line: &str) {
    ctl.dispatch(Event::StartScan);
    let code = ctl
        .scanner_mut()
        .feed(line)
        .expect("scanner is capturing so the line is a detection");
    ctl.dispatch(Event::Decoded(code));
}

#[test]
fn decoded_isbn_becomes_table_row() {
    let base = spawn_server();
    let mut ctl = controller(&base);

    scan_line(&mut ctl, "9784167158057");

    let state = ctl.state();
    assert_eq!(1, state.results.len());
    assert_eq!(
        ["9784167158057", "Sample", "A. Author", "Pub", "2020-01-01"],
        state.results.rows()[0].cells()
    );
    assert_eq!(1, ctl.page().rendered_rows);
    assert_eq!(
        "<tbody><tr><td>9784167158057</td><td>Sample</td><td>A. Author</td><td>Pub</td><td>2020-01-01</td></tr></tbody>",
        ctl.page().rendered_body
    );
    assert!(!ctl.scanner_mut().is_capturing());
    assert!(ctl.page().alerts.is_empty());
}

#[test]
fn server_error_alerts_without_row() {
    let base = spawn_server();
    let mut ctl = controller(&base);

    scan_line(&mut ctl, "500");

    assert!(ctl.state().results.is_empty());
    assert_eq!("500", ctl.state().isbn_input);
    assert_eq!(vec!["Failed to fetch book information"], ctl.page().alerts);
}

#[test]
fn unknown_isbn_is_reported_as_not_found() {
    let base = spawn_server();
    let lookup = HttpLookup::new(&base, Duration::from_secs(5)).unwrap();

    assert!(matches!(
        lookup.lookup("0000000000000"),
        Err(LookupError::NotFound)
    ));
}

#[test]
fn slow_server_times_out_as_unreachable() {
    let base = spawn_server();
    let lookup = HttpLookup::new(&base, Duration::from_millis(200)).unwrap();

    assert!(matches!(
        lookup.lookup("slow"),
        Err(LookupError::Unreachable(_))
    ));
}

#[test]
fn nothing_listening_is_unreachable() {
    // Bind then drop to find a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|l| l.local_addr())
        .unwrap();
    let lookup = HttpLookup::new(&format!("http://{addr}"), Duration::from_secs(1)).unwrap();

    let err = lookup.lookup("9784167158057").unwrap_err();
    assert_eq!("The server could not be reached", err.alert_message());
}

#[test]
fn download_reflects_server_recorded_books() {
    let base = spawn_server();
    let mut ctl = controller(&base);
    scan_line(&mut ctl, "9784167158057");
    scan_line(&mut ctl, "9784167158057");

    let csv = reqwest::blocking::get(format!("{base}/download"))
        .and_then(reqwest::blocking::Response::text)
        .unwrap();

    assert_eq!(3, csv.lines().count(), "{csv}");
    assert_eq!(2, ctl.state().results.len());
}
