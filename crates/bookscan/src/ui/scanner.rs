use std::ops::RangeInclusive;

use log::{debug, trace};

use crate::{Error, ErrorKind};

/// A barcode scanner: a capture stream plus a decoder.
///
/// Implementations hold the capture device between [`Scanner::start`] and [`Scanner::stop`].
/// `stop` must be a no-op when nothing is capturing.
pub trait Scanner {
    /// Prepares the capture stream and decoders.
    ///
    /// # Errors
    ///
    /// An [`Err`] is returned when the device cannot satisfy `config`.
    fn init(&mut self, config: &ScannerConfig) -> Result<(), Error>;

    /// Starts continuous capture.
    fn start(&mut self);

    /// Stops capture and releases the device.
    fn stop(&mut self);
}

/// Which camera the capture stream should prefer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FacingMode {
    /// Front camera.
    User,
    /// Rear camera.
    Environment,
}

/// Barcode symbologies a decoder can be asked to read.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reader {
    /// EAN-13, the symbology printed on ISBN-13 barcodes.
    Ean,
}

impl Reader {
    /// Decoder name as known to barcode reader libraries.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Reader::Ean => "ean_reader",
        }
    }
}

/// Capture constraints requested from the device.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraints {
    /// Minimum frame width in pixels.
    pub min_width: u32,
    /// Minimum frame height in pixels.
    pub min_height: u32,
    /// Accepted width / height ratios.
    pub aspect_ratio: RangeInclusive<f32>,
    /// Preferred camera.
    pub facing_mode: FacingMode,
}

/// Everything a [`Scanner`] is configured with when a session starts.
#[derive(Clone, Debug, PartialEq)]
pub struct ScannerConfig {
    /// Identifier of the element showing the camera preview.
    pub target: String,
    /// Capture constraints.
    pub constraints: Constraints,
    /// Symbologies to decode.
    pub readers: Vec<Reader>,
}

impl Default for ScannerConfig {
    /// Rear camera, at least 640x250, a wide aspect ratio, and a single EAN decoder.
    fn default() -> Self {
        Self {
            target: "quagga".to_owned(),
            constraints: Constraints {
                min_width: 640,
                min_height: 250,
                aspect_ratio: 1.5..=2.0,
                facing_mode: FacingMode::Environment,
            },
            readers: vec![Reader::Ean],
        }
    }
}

/// A [`Scanner`] fed with text lines, one decoded code per line.
///
/// Hand-held barcode scanners in keyboard mode type the decoded code followed by Enter, so a
/// line of input is a detection. Lines are only reported while capturing.
#[derive(Debug, Default)]
pub struct LineScanner {
    readers: Vec<Reader>,
    capturing: bool,
}

impl LineScanner {
    /// Whether [`Scanner::start`] was called without a matching [`Scanner::stop`].
    #[must_use]
    pub const fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Offers a line of input to the decoder, returning the decoded code if the scanner is
    /// capturing and the line is not blank.
    pub fn feed(&mut self, line: &str) -> Option<String> {
        let code = line.trim();
        if code.is_empty() {
            return None;
        }
        if self.capturing {
            debug!("Detected code '{code}'");
            Some(code.to_owned())
        } else {
            trace!("Ignoring '{code}' - scanner is not capturing");
            None
        }
    }
}

impl Scanner for LineScanner {
    fn init(&mut self, config: &ScannerConfig) -> Result<(), Error> {
        if config.readers.is_empty() {
            return Err(Error::new(
                ErrorKind::NoValue,
                "No decoder readers configured",
            ));
        }
        if config.constraints.aspect_ratio.is_empty() {
            return Err(Error::new(
                ErrorKind::Deserialize,
                "Aspect ratio constraint accepts no value",
            ));
        }
        self.readers = config.readers.clone();
        trace!(
            "Line scanner ready with readers {:?}",
            self.readers.iter().map(|r| r.name()).collect::<Vec<_>>()
        );
        Ok(())
    }

    fn start(&mut self) {
        self.capturing = true;
    }

    fn stop(&mut self) {
        self.capturing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{LineScanner, Reader, Scanner, ScannerConfig};
    use crate::ErrorKind;

    #[test]
    fn default_config_reads_ean_from_rear_camera() {
        let config = ScannerConfig::default();

        assert_eq!(vec![Reader::Ean], config.readers);
        assert_eq!("ean_reader", config.readers[0].name());
        assert_eq!(super::FacingMode::Environment, config.constraints.facing_mode);
        assert_eq!(640, config.constraints.min_width);
        assert_eq!(250, config.constraints.min_height);
        assert!(config.constraints.aspect_ratio.contains(&1.5));
        assert!(config.constraints.aspect_ratio.contains(&2.0));
    }

    #[test]
    fn lines_only_detected_while_capturing() {
        let mut scanner = LineScanner::default();
        scanner.init(&ScannerConfig::default()).unwrap();

        assert_eq!(None, scanner.feed("9784167158057"));

        scanner.start();
        assert_eq!(Some("9784167158057".to_owned()), scanner.feed(" 9784167158057\n"));
        assert_eq!(None, scanner.feed("   "));

        scanner.stop();
        assert!(!scanner.is_capturing());
        assert_eq!(None, scanner.feed("9784167158057"));
    }

    #[test]
    fn init_without_readers_fails() {
        let config = ScannerConfig {
            readers: vec![],
            ..ScannerConfig::default()
        };

        let err = LineScanner::default().init(&config).unwrap_err();
        assert_eq!(ErrorKind::NoValue, err.kind());
    }
}
