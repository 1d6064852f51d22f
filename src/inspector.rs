//! The stream inspection pipeline.
//!
//! [`StreamInspector::inspect`] runs the whole procedure against one URL:
//! acquire networking, announce the connection, open, probe, print the
//! report, release. The multimedia library sits behind [`MediaBackend`]
//! so the pipeline can be driven by something other than FFmpeg.
//!
//! # Example
//!
//! ```no_run
//! use rtsp_inspect::StreamInspector;
//!
//! let inspector = StreamInspector::new();
//! let mut stdout = std::io::stdout().lock();
//! inspector.inspect("rtsp://camera.local:554/stream1", &mut stdout)?;
//! # Ok::<(), rtsp_inspect::InspectError>(())
//! ```

use std::io::Write;

use crate::{
    config::SessionOptions,
    error::InspectError,
    ffmpeg::NetworkGuard,
    metadata::StreamDescriptor,
    report::write_report,
    session::Session,
};

/// An open session that can be probed for its stream table.
///
/// Dropping the value releases the session.
pub trait ProbeSession {
    /// Read stream metadata and return the stream table in order.
    fn probe(&mut self) -> Result<Vec<StreamDescriptor>, InspectError>;
}

/// The multimedia library as seen by the inspector.
pub trait MediaBackend {
    /// Process-wide state held for the duration of one inspection.
    type Guard;
    /// Session type produced by [`open`](Self::open).
    type Session: ProbeSession;

    /// Set up process-wide state (networking) before the first open.
    fn initialize(&self) -> Self::Guard;

    /// Open a session to `url`.
    fn open(&self, url: &str, options: &SessionOptions) -> Result<Self::Session, InspectError>;
}

/// [`MediaBackend`] backed by FFmpeg.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegBackend;

impl ProbeSession for Session {
    fn probe(&mut self) -> Result<Vec<StreamDescriptor>, InspectError> {
        Session::probe(self)
    }
}

impl MediaBackend for FfmpegBackend {
    type Guard = NetworkGuard;
    type Session = Session;

    fn initialize(&self) -> NetworkGuard {
        NetworkGuard::acquire()
    }

    fn open(&self, url: &str, options: &SessionOptions) -> Result<Session, InspectError> {
        // Safe to call more than once.
        ffmpeg_next::init().map_err(|error| InspectError::Open {
            url: url.to_string(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;
        Session::open(url, options)
    }
}

/// Connects to a source and prints its video stream report.
#[derive(Debug, Clone)]
pub struct StreamInspector<B = FfmpegBackend> {
    backend: B,
    options: SessionOptions,
}

impl StreamInspector<FfmpegBackend> {
    /// An inspector using FFmpeg and the default transport policy.
    pub fn new() -> Self {
        Self::with_backend(FfmpegBackend)
    }
}

impl Default for StreamInspector<FfmpegBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: MediaBackend> StreamInspector<B> {
    /// An inspector over a custom backend, with the default transport
    /// policy.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            options: SessionOptions::default(),
        }
    }

    /// Replace the transport options.
    #[must_use]
    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    /// Transport options applied on every open.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// The backend in use.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Inspect `url` and write the report to `out`.
    ///
    /// The `Connecting to:` line is written before the connection attempt.
    /// The report itself is only written once probing has fully
    /// succeeded, so a failure never leaves a partial report behind. The
    /// session is released before this returns, on every path that opened
    /// one, and networking is released after it.
    ///
    /// Returns the number of video streams reported.
    ///
    /// # Errors
    ///
    /// [`InspectError::Open`] if the session cannot be opened,
    /// [`InspectError::Probe`] if its metadata cannot be read, and
    /// [`InspectError::IoError`] if `out` rejects a write.
    pub fn inspect<W: Write>(&self, url: &str, out: &mut W) -> Result<usize, InspectError> {
        let _network = self.backend.initialize();

        writeln!(out, "Connecting to: {url}")?;
        out.flush()?;

        let mut session = self.backend.open(url, &self.options)?;
        let streams = session.probe()?;

        let written = write_report(out, &streams)?;
        out.flush()?;
        log::debug!(
            "Reported {written} video stream(s) out of {} from {url}",
            streams.len()
        );

        drop(session);
        Ok(written)
    }
}
