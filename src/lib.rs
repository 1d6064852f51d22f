//! # rtsp-inspect
//!
//! Connect to a network video stream and report what it carries: codec,
//! resolution, frame rate, and bitrate of every video stream.
//!
//! Session negotiation, demuxing, and codec identification are done by
//! FFmpeg through the [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next)
//! crate. This crate wraps the open/probe/close sequence in owned handles
//! and formats the result.
//!
//! ## Quick Start
//!
//! ### Print a report
//!
//! ```no_run
//! use rtsp_inspect::StreamInspector;
//!
//! let mut stdout = std::io::stdout().lock();
//! StreamInspector::new().inspect("rtsp://camera.local:554/stream1", &mut stdout)?;
//! # Ok::<(), rtsp_inspect::InspectError>(())
//! ```
//!
//! ### Read the stream table
//!
//! ```no_run
//! use rtsp_inspect::StreamProbe;
//!
//! for stream in StreamProbe::probe("rtsp://camera.local:554/stream1")? {
//!     println!("{}", stream.to_json());
//! }
//! # Ok::<(), rtsp_inspect::InspectError>(())
//! ```
//!
//! ## Transport
//!
//! Sessions are opened with interleaved TCP, a 500 ms demuxer delay cap,
//! and a 5 s connection timeout unless [`SessionOptions`] says otherwise.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod config;
pub mod error;
pub mod ffmpeg;
pub mod inspector;
pub mod metadata;
pub mod probe;
pub mod report;
pub mod session;
pub mod validation;

pub use config::{SessionOptions, TransportProtocol};
pub use error::InspectError;
pub use ffmpeg::{FfmpegLogLevel, NetworkGuard, get_ffmpeg_log_level, set_ffmpeg_log_level};
pub use inspector::{FfmpegBackend, MediaBackend, ProbeSession, StreamInspector};
pub use metadata::{FrameRate, MediaKind, StreamDescriptor};
pub use probe::StreamProbe;
pub use report::{BANNER, format_bitrate, format_frame_rate, write_report, write_video_block};
pub use session::Session;
pub use validation::{ExpectedEncoding, ValidationReport, validate_stream, validate_streams};
