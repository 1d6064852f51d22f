//! One-call stream probing.
//!
//! [`StreamProbe`] opens a source, reads its stream table, and releases
//! everything before returning. It prints nothing, which makes it the
//! entry point for programs that want the metadata rather than the
//! report.
//!
//! For the printed report, use [`StreamInspector`](crate::StreamInspector).

use crate::{
    config::SessionOptions,
    error::InspectError,
    ffmpeg::NetworkGuard,
    inspector::{FfmpegBackend, MediaBackend},
    metadata::StreamDescriptor,
    validation::{ExpectedEncoding, ValidationReport, validate_streams},
};

/// Lightweight stream probe.
///
/// # Example
///
/// ```no_run
/// use rtsp_inspect::StreamProbe;
///
/// let video = StreamProbe::first_video("rtsp://camera.local:554/stream1")?;
/// println!("{} {} @ {:.2} fps", video.codec, video.resolution(), video.frames_per_second());
/// # Ok::<(), rtsp_inspect::InspectError>(())
/// ```
pub struct StreamProbe;

impl StreamProbe {
    /// Probe `url` with the default transport policy.
    ///
    /// # Errors
    ///
    /// [`InspectError::EmptyUrl`] for an empty URL, otherwise the open and
    /// probe errors of [`Session`](crate::Session).
    pub fn probe(url: &str) -> Result<Vec<StreamDescriptor>, InspectError> {
        Self::probe_with_options(url, &SessionOptions::default())
    }

    /// Probe `url` with custom transport options.
    pub fn probe_with_options(
        url: &str,
        options: &SessionOptions,
    ) -> Result<Vec<StreamDescriptor>, InspectError> {
        if url.trim().is_empty() {
            return Err(InspectError::EmptyUrl);
        }

        let backend = FfmpegBackend;
        let _network: NetworkGuard = backend.initialize();
        let mut session = backend.open(url, options)?;
        session.probe()
    }

    /// Probe `url` and return its first video stream.
    ///
    /// # Errors
    ///
    /// [`InspectError::NoVideoStream`] if the source carries no video, in
    /// addition to the errors of [`probe`](Self::probe).
    pub fn first_video(url: &str) -> Result<StreamDescriptor, InspectError> {
        Self::probe(url)?
            .into_iter()
            .find(StreamDescriptor::is_video)
            .ok_or(InspectError::NoVideoStream)
    }

    /// Probe `url` and check its first video stream against `expected`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rtsp_inspect::{ExpectedEncoding, StreamProbe};
    ///
    /// let report = StreamProbe::validate(
    ///     "rtsp://camera.local:554/stream1",
    ///     &ExpectedEncoding::new(1920, 1080, 30),
    /// )?;
    /// print!("{report}");
    /// # Ok::<(), rtsp_inspect::InspectError>(())
    /// ```
    pub fn validate(
        url: &str,
        expected: &ExpectedEncoding,
    ) -> Result<ValidationReport, InspectError> {
        let streams = Self::probe(url)?;
        Ok(validate_streams(&streams, expected))
    }
}
