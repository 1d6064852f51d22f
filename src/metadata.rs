//! Stream metadata types.
//!
//! A probed [`Session`](crate::Session) yields one [`StreamDescriptor`] per
//! elementary stream, in the order the demuxer lists them. Descriptors are
//! owned values, independent of the session that produced them.

use std::fmt::{Display, Formatter, Result as FmtResult};

use ffmpeg_next::{Rational, format::stream::Stream, media::Type};
use serde_json::{Value, json};

/// Media type of an elementary stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// A video stream. The only kind that appears in reports.
    Video,
    /// An audio stream.
    Audio,
    /// Subtitles, data, attachments, or anything FFmpeg cannot classify.
    Other,
}

impl MediaKind {
    /// Short lowercase name (`"video"`, `"audio"`, `"other"`).
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Other => "other",
        }
    }
}

impl From<Type> for MediaKind {
    fn from(medium: Type) -> Self {
        match medium {
            Type::Video => MediaKind::Video,
            Type::Audio => MediaKind::Audio,
            _ => MediaKind::Other,
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Average frame rate as a rational `numerator / denominator`.
///
/// FFmpeg reports `0/0` (or `x/0`, `0/x`) when it could not establish a
/// rate. Such a rate is *degenerate* and converts to `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameRate {
    /// Frames.
    pub numerator: i32,
    /// Seconds.
    pub denominator: i32,
}

impl FrameRate {
    /// Create a frame rate from its two halves.
    pub const fn new(numerator: i32, denominator: i32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Returns `true` when either side of the ratio is zero.
    pub fn is_degenerate(&self) -> bool {
        self.numerator == 0 || self.denominator == 0
    }

    /// Frames per second, or `0.0` for a degenerate rate.
    pub fn as_f64(&self) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            self.numerator as f64 / self.denominator as f64
        }
    }
}

impl From<Rational> for FrameRate {
    fn from(rational: Rational) -> Self {
        Self::new(rational.numerator(), rational.denominator())
    }
}

/// Metadata for one elementary stream of a session.
///
/// Width, height, and frame rate are only meaningful for video streams;
/// FFmpeg reports zero for the other kinds.
///
/// # Example
///
/// ```
/// use rtsp_inspect::{FrameRate, MediaKind, StreamDescriptor};
///
/// let stream = StreamDescriptor {
///     index: 0,
///     kind: MediaKind::Video,
///     codec: "h264".to_string(),
///     width: 1920,
///     height: 1080,
///     frame_rate: FrameRate::new(30000, 1001),
///     bit_rate: 2_000_000,
/// };
/// assert_eq!(stream.resolution(), "1920x1080");
/// assert_eq!(stream.bitrate_kbps(), Some(2000));
/// assert!(stream.is_full_hd());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct StreamDescriptor {
    /// Position in the session's stream table.
    pub index: usize,
    /// Media type.
    pub kind: MediaKind,
    /// Codec name from FFmpeg's registry (e.g. `"h264"`, `"hevc"`).
    pub codec: String,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Average frame rate.
    pub frame_rate: FrameRate,
    /// Bit rate in bits per second. Zero when the source does not say.
    pub bit_rate: i64,
}

impl StreamDescriptor {
    /// Read the descriptor of a probed FFmpeg stream.
    pub(crate) fn from_stream(stream: &Stream<'_>) -> Self {
        let parameters = stream.parameters();
        // Dimensions and bit rate are not exposed by the safe wrapper.
        let raw = unsafe { *parameters.as_ptr() };

        Self {
            index: stream.index(),
            kind: MediaKind::from(parameters.medium()),
            codec: parameters.id().name().to_string(),
            width: raw.width.max(0) as u32,
            height: raw.height.max(0) as u32,
            frame_rate: FrameRate::from(stream.avg_frame_rate()),
            bit_rate: raw.bit_rate,
        }
    }

    /// Returns `true` for video streams.
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }

    /// Resolution as `WIDTHxHEIGHT`.
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// Like [`resolution`](Self::resolution), but `"Unknown"` when either
    /// dimension is zero.
    pub fn resolution_label(&self) -> String {
        if self.width == 0 || self.height == 0 {
            "Unknown".to_string()
        } else {
            self.resolution()
        }
    }

    /// Frames per second, `0.0` when unknown.
    pub fn frames_per_second(&self) -> f64 {
        self.frame_rate.as_f64()
    }

    /// Bit rate in whole kilobits per second, `None` when unknown.
    pub fn bitrate_kbps(&self) -> Option<i64> {
        (self.bit_rate > 0).then(|| self.bit_rate / 1000)
    }

    /// 720p or taller.
    pub fn is_high_definition(&self) -> bool {
        self.height >= 720
    }

    /// 1080p or taller.
    pub fn is_full_hd(&self) -> bool {
        self.height >= 1080
    }

    /// 2160p or taller.
    pub fn is_4k(&self) -> bool {
        self.height >= 2160
    }

    /// Machine-readable form of the descriptor.
    pub fn to_json(&self) -> Value {
        json!({
            "index": self.index,
            "kind": self.kind.as_str(),
            "codec": self.codec,
            "width": self.width,
            "height": self.height,
            "fps": self.frames_per_second(),
            "bit_rate": self.bit_rate,
        })
    }
}
