use std::{
    ffi::OsString,
    io::{self, Write},
    process,
};

use clap::Parser;
use rtsp_inspect::{FfmpegLogLevel, StreamInspector};

#[derive(Debug, Parser)]
#[command(
    name = "rtsp-inspect",
    about = "Print codec, resolution, frame rate, and bitrate of a network video stream",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Source URL, e.g. rtsp://camera.local:554/stream1.
    url: OsString,
}

/// Accept exactly one argument after the program name, whatever it looks
/// like. `--` is inserted so clap never reads it as a flag.
fn parse_args(args: Vec<OsString>) -> Option<Cli> {
    let [program, url] = <[OsString; 2]>::try_from(args).ok()?;
    match Cli::try_parse_from([program, OsString::from("--"), url]) {
        Ok(cli) => Some(cli),
        Err(error) => {
            log::debug!("Rejected arguments: {error}");
            None
        }
    }
}

fn program_name() -> String {
    std::env::args_os()
        .next()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "rtsp-inspect".to_string())
}

fn usage_line(program: &str) -> String {
    format!("Usage: {program} <url>")
}

fn run(url: &str) -> Result<(), rtsp_inspect::InspectError> {
    // FFmpeg's own chatter would add lines next to our single diagnostic.
    rtsp_inspect::set_ffmpeg_log_level(FfmpegLogLevel::Quiet);

    let mut stdout = io::stdout().lock();
    StreamInspector::new().inspect(url, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

fn main() {
    let Some(cli) = parse_args(std::env::args_os().collect()) else {
        eprintln!("{}", usage_line(&program_name()));
        process::exit(1);
    };

    if let Err(error) = run(&cli.url.to_string_lossy()) {
        eprintln!("{error}");
        process::exit(1);
    }
}
