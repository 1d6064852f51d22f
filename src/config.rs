//! Transport configuration.
//!
//! [`SessionOptions`] collects the demuxer options passed to FFmpeg when a
//! session is opened. The default value is the low-latency, TCP-interleaved
//! policy the command-line tool always applies: interleaved TCP delivery,
//! at most 500 ms of demuxer delay, and a 5 s socket timeout.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use rtsp_inspect::{SessionOptions, TransportProtocol};
//!
//! let options = SessionOptions::new()
//!     .with_transport(TransportProtocol::Udp)
//!     .with_connect_timeout(Duration::from_secs(2));
//! assert_eq!(options.entries()[0], ("rtsp_transport", "udp".to_string()));
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::time::Duration;

use ffmpeg_next::Dictionary;

/// Lower-layer delivery mode requested from the RTSP demuxer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransportProtocol {
    /// RTP interleaved in the RTSP TCP connection. This is the default.
    #[default]
    Tcp,
    /// RTP over unicast UDP.
    Udp,
    /// RTP over multicast UDP.
    UdpMulticast,
    /// RTP tunnelled through HTTP.
    Http,
}

impl TransportProtocol {
    /// Value of FFmpeg's `rtsp_transport` option.
    pub fn as_option_value(self) -> &'static str {
        match self {
            TransportProtocol::Tcp => "tcp",
            TransportProtocol::Udp => "udp",
            TransportProtocol::UdpMulticast => "udp_multicast",
            TransportProtocol::Http => "http",
        }
    }
}

impl Display for TransportProtocol {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_option_value())
    }
}

/// Options applied when opening a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Delivery mode. Defaults to [`TransportProtocol::Tcp`].
    pub(crate) transport: TransportProtocol,
    /// Maximum demuxing delay. Defaults to 500 ms.
    pub(crate) max_delay: Duration,
    /// Socket I/O timeout used while establishing the session. Defaults
    /// to 5 s.
    pub(crate) connect_timeout: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            transport: TransportProtocol::Tcp,
            max_delay: Duration::from_millis(500),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl SessionOptions {
    /// Create options with the default low-latency policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delivery mode.
    #[must_use]
    pub fn with_transport(mut self, transport: TransportProtocol) -> Self {
        self.transport = transport;
        self
    }

    /// Set the maximum demuxing delay.
    #[must_use]
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// The configured delivery mode.
    pub fn transport(&self) -> TransportProtocol {
        self.transport
    }

    /// The configured maximum demuxing delay.
    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// The configured connection timeout.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// FFmpeg option key/value pairs, in the order they are applied.
    ///
    /// Durations are expressed in microseconds, which is what both
    /// `max_delay` and the RTSP demuxer's `timeout` expect.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("rtsp_transport", self.transport.as_option_value().to_string()),
            ("max_delay", self.max_delay.as_micros().to_string()),
            ("timeout", self.connect_timeout.as_micros().to_string()),
        ]
    }

    /// Build the FFmpeg option dictionary.
    pub(crate) fn to_dictionary(&self) -> Dictionary<'static> {
        let mut dictionary = Dictionary::new();
        for (key, value) in self.entries() {
            dictionary.set(key, &value);
        }
        dictionary
    }
}
