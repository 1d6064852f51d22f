//! Process-wide FFmpeg state.
//!
//! Two pieces of FFmpeg state outlive any single session: the networking
//! subsystem and FFmpeg's own console logger.
//!
//! [`NetworkGuard`] pairs `avformat_network_init` with
//! `avformat_network_deinit` through `Drop`, so teardown happens exactly
//! when initialisation did, whichever way the caller leaves its scope.
//!
//! FFmpeg logging is independent of the Rust [`log`](https://crates.io/crates/log)
//! facade used by this crate. By default FFmpeg writes warnings to stderr,
//! which would interleave with the command-line tool's single diagnostic
//! line; [`set_ffmpeg_log_level`] tunes or silences it.
//!
//! # Example
//!
//! ```no_run
//! use rtsp_inspect::{FfmpegLogLevel, NetworkGuard};
//!
//! rtsp_inspect::set_ffmpeg_log_level(FfmpegLogLevel::Quiet);
//!
//! let network = NetworkGuard::acquire();
//! // ... open and probe sessions ...
//! drop(network);
//! ```

use ffmpeg_next::util::log::Level;
use ffmpeg_sys_next::{avformat_network_deinit, avformat_network_init};

/// Scoped ownership of FFmpeg's networking subsystem.
///
/// FFmpeg reference-counts network initialisation, so nested guards are
/// allowed; each one releases exactly the reference it took.
#[derive(Debug)]
#[must_use = "the network subsystem is released as soon as the guard is dropped"]
pub struct NetworkGuard {
    _private: (),
}

impl NetworkGuard {
    /// Initialise FFmpeg networking for the lifetime of the guard.
    pub fn acquire() -> Self {
        log::debug!("Initialising FFmpeg networking");
        unsafe {
            avformat_network_init();
        }
        Self { _private: () }
    }
}

impl Drop for NetworkGuard {
    fn drop(&mut self) {
        log::debug!("Releasing FFmpeg networking");
        unsafe {
            avformat_network_deinit();
        }
    }
}

/// FFmpeg console verbosity, most quiet first.
///
/// Each level suppresses every message less severe than itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FfmpegLogLevel {
    /// No output at all.
    Quiet,
    /// Only conditions that abort the process.
    Panic,
    /// Unrecoverable errors.
    Fatal,
    /// Recoverable errors.
    Error,
    /// Warnings. FFmpeg's default.
    Warning,
    /// Informational messages.
    Info,
    /// Verbose informational messages.
    Verbose,
    /// Debugging messages.
    Debug,
    /// Everything.
    Trace,
}

impl From<FfmpegLogLevel> for Level {
    fn from(level: FfmpegLogLevel) -> Self {
        match level {
            FfmpegLogLevel::Quiet => Level::Quiet,
            FfmpegLogLevel::Panic => Level::Panic,
            FfmpegLogLevel::Fatal => Level::Fatal,
            FfmpegLogLevel::Error => Level::Error,
            FfmpegLogLevel::Warning => Level::Warning,
            FfmpegLogLevel::Info => Level::Info,
            FfmpegLogLevel::Verbose => Level::Verbose,
            FfmpegLogLevel::Debug => Level::Debug,
            FfmpegLogLevel::Trace => Level::Trace,
        }
    }
}

impl From<Level> for FfmpegLogLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Quiet => FfmpegLogLevel::Quiet,
            Level::Panic => FfmpegLogLevel::Panic,
            Level::Fatal => FfmpegLogLevel::Fatal,
            Level::Error => FfmpegLogLevel::Error,
            Level::Warning => FfmpegLogLevel::Warning,
            Level::Info => FfmpegLogLevel::Info,
            Level::Verbose => FfmpegLogLevel::Verbose,
            Level::Debug => FfmpegLogLevel::Debug,
            Level::Trace => FfmpegLogLevel::Trace,
        }
    }
}

/// Set FFmpeg's console verbosity.
pub fn set_ffmpeg_log_level(level: FfmpegLogLevel) {
    ffmpeg_next::util::log::set_level(Level::from(level));
}

/// Current FFmpeg console verbosity, `None` if FFmpeg reports a value
/// outside the known levels.
pub fn get_ffmpeg_log_level() -> Option<FfmpegLogLevel> {
    ffmpeg_next::util::log::get_level()
        .ok()
        .map(FfmpegLogLevel::from)
}
