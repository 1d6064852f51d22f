//! Error types for the `rtsp-inspect` crate.
//!
//! [`InspectError`] is returned by every fallible operation. The two
//! library failures that matter to the command-line tool, opening the
//! session and probing it, render exactly as the tool prints them, so the
//! binary can forward `Display` output to stderr unchanged.

use std::io::Error as IoError;

use ffmpeg_next::Error as FfmpegError;
use thiserror::Error;

/// The unified error type for all `rtsp-inspect` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InspectError {
    /// The session could not be opened (connection, DNS, protocol
    /// handshake, or an unusable URL).
    #[error("Could not open input: {reason}")]
    Open {
        /// URL that was passed to [`Session::open`](crate::Session::open).
        url: String,
        /// Diagnostic text produced by FFmpeg.
        reason: String,
    },

    /// The session opened but its stream metadata could not be read.
    #[error("Could not find stream info: {reason}")]
    Probe {
        /// URL of the opened session.
        url: String,
        /// Diagnostic text produced by FFmpeg.
        reason: String,
    },

    /// An empty URL was passed to the probe API.
    #[error("Stream URL cannot be empty")]
    EmptyUrl,

    /// The probed session does not carry a video stream.
    #[error("No video stream found in source")]
    NoVideoStream,

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// Any other error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),
}

impl InspectError {
    /// Build an [`InspectError::Open`] from a raw FFmpeg return code.
    pub(crate) fn open(url: &str, code: i32) -> Self {
        InspectError::Open {
            url: url.to_string(),
            reason: FfmpegError::from(code).to_string(),
        }
    }

    /// Build an [`InspectError::Probe`] from a raw FFmpeg return code.
    pub(crate) fn probe(url: &str, code: i32) -> Self {
        InspectError::Probe {
            url: url.to_string(),
            reason: FfmpegError::from(code).to_string(),
        }
    }
}

impl From<FfmpegError> for InspectError {
    fn from(error: FfmpegError) -> Self {
        InspectError::FfmpegError(error.to_string())
    }
}
