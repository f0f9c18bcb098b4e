//! `ssi.toml` driving rendering and checked constructors

use crate::common::ramp;
use ssi::{Error, SsiConfig, Stream, CONFIG_FILE_NAME};
use tempfile::TempDir;

#[test]
fn configured_format_drives_print() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        "[format]\nprecision = 2\ndelimiter = \";\"\nmax_rows = 2\n",
    )
    .unwrap();
    let config = SsiConfig::from_file(&path).unwrap();

    let stream = Stream::from_values(&[0.5f32, 1.25, 2.0, 3.0, 4.0, 5.0], 2, 10.0).unwrap();
    let mut out = Vec::new();
    stream.print(&mut out, &config.format).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "0.50;1.25\n2.00;3.00\n");
}

#[test]
fn configured_limits_reject_large_streams() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[limits]\nmax_stream_bytes = 64\n").unwrap();
    let config = SsiConfig::from_file(&path).unwrap();

    let kind = ssi::ScalarKind::Float32.into();
    assert!(Stream::try_new(&config.limits, 8, 2, 4, kind, 0.0, 0.0).is_ok());
    assert!(matches!(
        Stream::try_new(&config.limits, 9, 2, 4, kind, 0.0, 0.0),
        Err(Error::Limit(_))
    ));
}

#[test]
fn default_file_is_written_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    SsiConfig::write_default_if_missing(&path).unwrap();
    let config = SsiConfig::from_file(&path).unwrap();
    assert_eq!(config, SsiConfig::default());

    let mut out = Vec::new();
    ramp(1, 3, 0.0).print(&mut out, &config.format).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "0.000000 1.000000 2.000000\n");
}
