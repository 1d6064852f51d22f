//! Stream validation against an expected encoder configuration.
//!
//! After reconfiguring a camera it is common to check that the stream
//! actually carries the requested resolution and frame rate.
//! [`validate_stream`] compares a probed [`StreamDescriptor`] with an
//! [`ExpectedEncoding`] and returns a [`ValidationReport`].
//!
//! # Example
//!
//! ```
//! use rtsp_inspect::{ExpectedEncoding, FrameRate, MediaKind, StreamDescriptor, validate_stream};
//!
//! let stream = StreamDescriptor {
//!     index: 0,
//!     kind: MediaKind::Video,
//!     codec: "h264".to_string(),
//!     width: 1280,
//!     height: 720,
//!     frame_rate: FrameRate::new(25, 1),
//!     bit_rate: 1_024_000,
//! };
//! let report = validate_stream(&stream, &ExpectedEncoding::new(1280, 720, 25));
//! assert!(report.is_valid());
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::metadata::StreamDescriptor;

/// Encoder settings a stream is expected to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedEncoding {
    /// Expected frame width in pixels.
    pub width: u32,
    /// Expected frame height in pixels.
    pub height: u32,
    /// Expected whole frames per second.
    pub frames_per_second: u32,
}

impl ExpectedEncoding {
    /// Create an expectation.
    pub const fn new(width: u32, height: u32, frames_per_second: u32) -> Self {
        Self {
            width,
            height,
            frames_per_second,
        }
    }
}

/// Outcome of a validation run.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Informational notices (not problems).
    pub info: Vec<String>,
    /// Issues that do not make the stream mismatch.
    pub warnings: Vec<String>,
    /// Mismatches against the expectation.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Returns `true` if no errors were found. Warnings do not count.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of entries (info + warnings + errors).
    pub fn issue_count(&self) -> usize {
        self.info.len() + self.warnings.len() + self.errors.len()
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for item in &self.info {
            writeln!(f, "[INFO] {item}")?;
        }
        for item in &self.warnings {
            writeln!(f, "[WARN] {item}")?;
        }
        for item in &self.errors {
            writeln!(f, "[ERROR] {item}")?;
        }
        if self.issue_count() == 0 {
            writeln!(f, "No issues found.")?;
        }
        Ok(())
    }
}

/// Compare one stream with the expected encoding.
///
/// The frame rate is rounded to the nearest whole number before it is
/// compared, so `29.97` matches an expectation of `30`.
pub fn validate_stream(stream: &StreamDescriptor, expected: &ExpectedEncoding) -> ValidationReport {
    let mut report = ValidationReport::default();
    let frames_per_second = stream.frames_per_second();

    if !stream.is_video() {
        report
            .errors
            .push(format!("Stream {} is {}, not video", stream.index, stream.kind));
        return report;
    }

    report.info.push(format!(
        "Video: {} {} @ {:.2} fps",
        stream.codec,
        stream.resolution_label(),
        frames_per_second,
    ));

    if stream.width != expected.width || stream.height != expected.height {
        report.errors.push(format!(
            "resolution mismatch: got {}x{}, expected {}x{}",
            stream.width, stream.height, expected.width, expected.height,
        ));
    }

    if stream.frame_rate.is_degenerate() {
        report
            .warnings
            .push("Frame rate is unknown; comparing as 0 fps".to_string());
    }

    let rounded = (frames_per_second + 0.5).floor() as i64;
    if rounded != i64::from(expected.frames_per_second) {
        report.errors.push(format!(
            "FPS mismatch: got {:.2}, expected {}",
            frames_per_second, expected.frames_per_second,
        ));
    }

    if stream.bitrate_kbps().is_none() {
        report
            .warnings
            .push("Bitrate is not advertised by the source".to_string());
    }

    report
}

/// Validate the first video stream of a stream table.
///
/// A table without any video stream produces a report with a single
/// error.
pub fn validate_streams(
    streams: &[StreamDescriptor],
    expected: &ExpectedEncoding,
) -> ValidationReport {
    match streams.iter().find(|stream| stream.is_video()) {
        Some(stream) => validate_stream(stream, expected),
        None => {
            let mut report = ValidationReport::default();
            report.errors.push("No video stream found".to_string());
            report
        }
    }
}
