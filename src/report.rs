//! Report formatting.
//!
//! The report layout is fixed:
//!
//! ```text
//!
//! ===== RTSP Stream Analysis =====
//!
//!   Codec: h264
//!   Resolution: 1920x1080
//!   Frame rate: 29.97 fps
//!   Bitrate: 2000 kbps
//! ```
//!
//! One four-line block is written per video stream. Other streams are
//! skipped without any trace in the output.

use std::io::{Result as IoResult, Write};

use crate::metadata::{FrameRate, StreamDescriptor};

/// Banner line that opens every report.
pub const BANNER: &str = "===== RTSP Stream Analysis =====";

/// Frame rate with two decimals, e.g. `29.97 fps`.
///
/// A degenerate rate renders as `0.00 fps`.
pub fn format_frame_rate(frame_rate: FrameRate) -> String {
    format!("{:.2} fps", frame_rate.as_f64())
}

/// Bit rate in whole kilobits per second, or `Unknown` when the value is
/// zero or negative.
pub fn format_bitrate(bit_rate: i64) -> String {
    if bit_rate > 0 {
        format!("{} kbps", bit_rate / 1000)
    } else {
        "Unknown".to_string()
    }
}

/// Write the four-line block describing one video stream.
pub fn write_video_block<W: Write>(out: &mut W, stream: &StreamDescriptor) -> IoResult<()> {
    writeln!(out, "  Codec: {}", stream.codec)?;
    writeln!(out, "  Resolution: {}", stream.resolution())?;
    writeln!(out, "  Frame rate: {}", format_frame_rate(stream.frame_rate))?;
    writeln!(out, "  Bitrate: {}", format_bitrate(stream.bit_rate))
}

/// Write the banner followed by a block for every video stream, in the
/// order given.
///
/// Returns the number of blocks written.
pub fn write_report<W: Write>(out: &mut W, streams: &[StreamDescriptor]) -> IoResult<usize> {
    writeln!(out)?;
    writeln!(out, "{BANNER}")?;
    writeln!(out)?;

    let mut written = 0;
    for stream in streams.iter().filter(|stream| stream.is_video()) {
        write_video_block(out, stream)?;
        written += 1;
    }
    Ok(written)
}
