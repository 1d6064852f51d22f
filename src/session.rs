//! Owned FFmpeg input sessions.
//!
//! A [`Session`] is opened and probed in two separate steps so the two
//! failure modes stay distinguishable: [`Session::open`] negotiates the
//! connection, [`Session::probe`] reads enough of the stream to fill in
//! codec parameters. `ffmpeg_next::format::input` fuses both, so the two
//! calls are made through `ffmpeg-sys-next` and the resulting context is
//! handed to `ffmpeg_next`'s [`Input`] for ownership.

use std::{
    ffi::CString,
    fmt::{Debug, Formatter, Result as FmtResult},
    ptr,
};

use ffmpeg_next::{Dictionary, format::context::Input};
use ffmpeg_sys_next::{AVFormatContext, avformat_find_stream_info, avformat_open_input};

use crate::{config::SessionOptions, error::InspectError, metadata::StreamDescriptor};

/// An opened connection to a remote (or local) media source.
///
/// The underlying FFmpeg context is closed exactly once, when the session
/// is dropped.
///
/// # Example
///
/// ```no_run
/// use rtsp_inspect::{NetworkGuard, Session, SessionOptions};
///
/// let _network = NetworkGuard::acquire();
/// let mut session = Session::open("rtsp://camera.local:554/stream1", &SessionOptions::default())?;
/// for stream in session.probe()? {
///     println!("#{} {} {}", stream.index, stream.kind, stream.codec);
/// }
/// # Ok::<(), rtsp_inspect::InspectError>(())
/// ```
pub struct Session {
    input: Input,
    url: String,
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Session")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Open a session with the given transport options.
    ///
    /// No stream metadata is available until [`probe`](Self::probe) has
    /// succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Open`] carrying FFmpeg's diagnostic when
    /// the source cannot be reached or recognised.
    pub fn open(url: &str, options: &SessionOptions) -> Result<Self, InspectError> {
        log::debug!("Opening session: {url}");

        let c_url = CString::new(url).map_err(|_| InspectError::Open {
            url: url.to_string(),
            reason: "URL contains an interior NUL byte".to_string(),
        })?;

        let mut context: *mut AVFormatContext = ptr::null_mut();
        let code = unsafe {
            let mut raw_options = options.to_dictionary().disown();
            let code = avformat_open_input(
                &mut context,
                c_url.as_ptr(),
                ptr::null_mut(),
                &mut raw_options,
            );
            let returned = Dictionary::own(raw_options);
            for key in unused_options(code, &returned) {
                log::warn!("Option {key} was not used by the demuxer");
            }
            code
        };

        if code < 0 {
            // A failed open frees the context itself.
            let error = InspectError::open(url, code);
            log::debug!("{error}");
            return Err(error);
        }

        Ok(Self {
            input: unsafe { Input::wrap(context) },
            url: url.to_string(),
        })
    }

    /// Read stream metadata and return the stream table in demuxer order.
    ///
    /// This may read packets from the source.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Probe`] carrying FFmpeg's diagnostic. The
    /// session stays owned by the caller and is still released on drop.
    pub fn probe(&mut self) -> Result<Vec<StreamDescriptor>, InspectError> {
        log::debug!("Probing session: {}", self.url);

        let code = unsafe { avformat_find_stream_info(self.input.as_mut_ptr(), ptr::null_mut()) };
        if code < 0 {
            let error = InspectError::probe(&self.url, code);
            log::debug!("{error}");
            return Err(error);
        }

        let streams: Vec<StreamDescriptor> = self
            .input
            .streams()
            .map(|stream| StreamDescriptor::from_stream(&stream))
            .collect();
        log::debug!("Probed {} stream(s) from {}", streams.len(), self.url);
        Ok(streams)
    }

    /// URL the session was opened with.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Keys FFmpeg handed back unconsumed after `avformat_open_input`.
///
/// On failure FFmpeg leaves the caller's dictionary untouched, so nothing
/// can be concluded from it.
fn unused_options(code: i32, returned: &Dictionary<'_>) -> Vec<String> {
    if code < 0 {
        return Vec::new();
    }
    returned.iter().map(|(key, _)| key.to_string()).collect()
}

impl Drop for Session {
    fn drop(&mut self) {
        // `Input` closes the context right after this.
        log::debug!("Closing session: {}", self.url);
    }
}
