//! Pipeline integration tests.
//!
//! These drive [`StreamInspector`] through an in-memory backend so the
//! ordering, filtering, and release guarantees can be checked without a
//! network source.

use std::{cell::RefCell, rc::Rc};

use rtsp_inspect::{
    FrameRate, InspectError, MediaBackend, MediaKind, ProbeSession, SessionOptions,
    StreamDescriptor, StreamInspector,
};

/// What the fake source does when asked to open and probe.
#[derive(Clone)]
enum Behaviour {
    OpenFails(&'static str),
    ProbeFails(&'static str),
    Streams(Vec<StreamDescriptor>),
}

/// Ordered record of every lifecycle event.
type Events = Rc<RefCell<Vec<&'static str>>>;

struct FakeBackend {
    behaviour: Behaviour,
    events: Events,
    seen_options: RefCell<Option<SessionOptions>>,
}

impl FakeBackend {
    fn new(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            events: Rc::new(RefCell::new(Vec::new())),
            seen_options: RefCell::new(None),
        }
    }

    fn events(&self) -> Vec<&'static str> {
        self.events.borrow().clone()
    }

    fn count(&self, event: &str) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }
}

struct FakeGuard {
    events: Events,
}

impl Drop for FakeGuard {
    fn drop(&mut self) {
        self.events.borrow_mut().push("deinit");
    }
}

struct FakeSession {
    behaviour: Behaviour,
    events: Events,
}

impl ProbeSession for FakeSession {
    fn probe(&mut self) -> Result<Vec<StreamDescriptor>, InspectError> {
        self.events.borrow_mut().push("probe");
        match &self.behaviour {
            Behaviour::ProbeFails(reason) => Err(InspectError::Probe {
                url: "fake".to_string(),
                reason: reason.to_string(),
            }),
            Behaviour::Streams(streams) => Ok(streams.clone()),
            Behaviour::OpenFails(_) => unreachable!("session never opens"),
        }
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.events.borrow_mut().push("close");
    }
}

impl MediaBackend for FakeBackend {
    type Guard = FakeGuard;
    type Session = FakeSession;

    fn initialize(&self) -> FakeGuard {
        self.events.borrow_mut().push("init");
        FakeGuard {
            events: Rc::clone(&self.events),
        }
    }

    fn open(&self, url: &str, options: &SessionOptions) -> Result<FakeSession, InspectError> {
        self.events.borrow_mut().push("open");
        *self.seen_options.borrow_mut() = Some(options.clone());
        match &self.behaviour {
            Behaviour::OpenFails(reason) => Err(InspectError::Open {
                url: url.to_string(),
                reason: reason.to_string(),
            }),
            behaviour => Ok(FakeSession {
                behaviour: behaviour.clone(),
                events: Rc::clone(&self.events),
            }),
        }
    }
}

fn video(index: usize, width: u32, height: u32, rate: (i32, i32), bit_rate: i64) -> StreamDescriptor {
    StreamDescriptor {
        index,
        kind: MediaKind::Video,
        codec: "h264".to_string(),
        width,
        height,
        frame_rate: FrameRate::new(rate.0, rate.1),
        bit_rate,
    }
}

fn audio(index: usize) -> StreamDescriptor {
    StreamDescriptor {
        index,
        kind: MediaKind::Audio,
        codec: "aac".to_string(),
        width: 0,
        height: 0,
        frame_rate: FrameRate::new(0, 0),
        bit_rate: 128_000,
    }
}

fn run(backend: &FakeBackend, url: &str) -> (Result<usize, InspectError>, String) {
    let inspector = StreamInspector::with_backend(FakeBackendRef(backend));
    let mut out = Vec::new();
    let result = inspector.inspect(url, &mut out);
    (result, String::from_utf8(out).expect("report is UTF-8"))
}

/// Borrowing adapter so a test can inspect the backend after the run.
struct FakeBackendRef<'a>(&'a FakeBackend);

impl MediaBackend for FakeBackendRef<'_> {
    type Guard = FakeGuard;
    type Session = FakeSession;

    fn initialize(&self) -> FakeGuard {
        self.0.initialize()
    }

    fn open(&self, url: &str, options: &SessionOptions) -> Result<FakeSession, InspectError> {
        self.0.open(url, options)
    }
}

#[test]
fn single_video_stream_report() {
    let backend = FakeBackend::new(Behaviour::Streams(vec![video(
        0,
        1920,
        1080,
        (30000, 1001),
        2_000_000,
    )]));

    let (result, output) = run(&backend, "rtsp://10.0.0.5:554/live");
    assert_eq!(result.unwrap(), 1);

    let expected = "Connecting to: rtsp://10.0.0.5:554/live\n\
                    \n\
                    ===== RTSP Stream Analysis =====\n\
                    \n\
                    \x20 Codec: h264\n\
                    \x20 Resolution: 1920x1080\n\
                    \x20 Frame rate: 29.97 fps\n\
                    \x20 Bitrate: 2000 kbps\n";
    assert_eq!(output, expected);
}

#[test]
fn unknown_bitrate_is_reported_as_unknown() {
    let backend = FakeBackend::new(Behaviour::Streams(vec![video(0, 640, 480, (25, 1), 0)]));

    let (result, output) = run(&backend, "rtsp://cam/0");
    assert!(result.is_ok());
    assert!(output.contains("  Bitrate: Unknown\n"), "{output}");
    assert!(!output.contains("kbps"), "{output}");
}

#[test]
fn audio_streams_are_skipped() {
    let backend = FakeBackend::new(Behaviour::Streams(vec![
        audio(0),
        video(1, 1280, 720, (25, 1), 1_500_000),
    ]));

    let (result, output) = run(&backend, "rtsp://cam/1");
    assert_eq!(result.unwrap(), 1);
    assert_eq!(output.matches("Codec:").count(), 1);
    assert!(!output.contains("aac"), "{output}");
    assert!(output.contains("Resolution: 1280x720"));
}

#[test]
fn video_streams_keep_stream_order() {
    let mut second = video(2, 640, 360, (15, 1), 0);
    second.codec = "mjpeg".to_string();
    let backend = FakeBackend::new(Behaviour::Streams(vec![
        video(0, 1920, 1080, (30, 1), 4_000_000),
        audio(1),
        second,
    ]));

    let (result, output) = run(&backend, "rtsp://cam/2");
    assert_eq!(result.unwrap(), 2);

    let first_block = output.find("Resolution: 1920x1080").unwrap();
    let second_block = output.find("Resolution: 640x360").unwrap();
    assert!(first_block < second_block);
    assert_eq!(output.matches("===== RTSP Stream Analysis =====").count(), 1);
}

#[test]
fn no_streams_prints_only_the_banner() {
    let backend = FakeBackend::new(Behaviour::Streams(Vec::new()));

    let (result, output) = run(&backend, "rtsp://cam/3");
    assert_eq!(result.unwrap(), 0);
    assert!(output.ends_with("===== RTSP Stream Analysis =====\n\n"), "{output}");
}

#[test]
fn open_failure_writes_no_report() {
    let backend = FakeBackend::new(Behaviour::OpenFails("Connection refused"));

    let (result, output) = run(&backend, "rtsp://127.0.0.1:1/");
    let error = result.unwrap_err();
    assert_eq!(error.to_string(), "Could not open input: Connection refused");
    assert_eq!(output, "Connecting to: rtsp://127.0.0.1:1/\n");

    assert_eq!(backend.events(), vec!["init", "open", "deinit"]);
}

#[test]
fn probe_failure_releases_session_once() {
    let backend = FakeBackend::new(Behaviour::ProbeFails("Invalid data found when processing input"));

    let (result, output) = run(&backend, "rtsp://cam/4");
    let error = result.unwrap_err();
    assert!(matches!(error, InspectError::Probe { .. }));
    assert_eq!(
        error.to_string(),
        "Could not find stream info: Invalid data found when processing input"
    );
    assert!(!output.contains("====="), "{output}");

    assert_eq!(backend.count("close"), 1);
    assert_eq!(backend.events(), vec!["init", "open", "probe", "close", "deinit"]);
}

#[test]
fn success_releases_session_before_network() {
    let backend = FakeBackend::new(Behaviour::Streams(vec![video(0, 320, 240, (10, 1), 64_000)]));

    let (result, _) = run(&backend, "rtsp://cam/5");
    assert!(result.is_ok());

    assert_eq!(backend.count("init"), 1);
    assert_eq!(backend.count("deinit"), 1);
    assert_eq!(backend.count("close"), 1);
    assert_eq!(backend.events(), vec!["init", "open", "probe", "close", "deinit"]);
}

#[test]
fn default_transport_policy_is_applied() {
    let backend = FakeBackend::new(Behaviour::Streams(Vec::new()));

    let (result, _) = run(&backend, "rtsp://cam/6");
    assert!(result.is_ok());

    let options = backend.seen_options.borrow().clone().unwrap();
    assert_eq!(options, SessionOptions::default());
}

#[test]
fn repeated_runs_are_identical() {
    let streams = vec![audio(0), video(1, 1920, 1080, (30000, 1001), 2_000_000)];
    let first = FakeBackend::new(Behaviour::Streams(streams.clone()));
    let second = FakeBackend::new(Behaviour::Streams(streams));

    let (_, a) = run(&first, "rtsp://cam/7");
    let (_, b) = run(&second, "rtsp://cam/7");
    assert_eq!(a, b);
}
