//! End-to-end tests for SVG decoding and encoding through the registry.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use embkit::svg::{ElementAdapter, PathReceiver};
use embkit::{
    CancelToken, EmbError, FormatRegistry, MovementKind, Reader, Result, StitchPattern, SvgFormat,
    Thread, Writer,
};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn decode(svg: &str) -> (Result<()>, StitchPattern) {
    let mut pattern = StitchPattern::new();
    let result = SvgFormat::default().read(&mut pattern, &mut svg.as_bytes());
    (result, pattern)
}

fn encode(pattern: &StitchPattern) -> String {
    let mut out = Vec::new();
    SvgFormat::default().write(pattern, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn kinds(pattern: &StitchPattern) -> Vec<(f32, f32, MovementKind)> {
    pattern.stitches().iter().map(|s| (s.x, s.y, s.kind)).collect()
}

#[test]
fn test_registry_dispatch() {
    let registry = FormatRegistry::builtin();
    assert!(registry.resolve_reader("pattern.SVG").is_some());
    assert!(registry.resolve_reader("pattern.svg").is_some());
    assert!(registry.resolve_reader("ab").is_none());
    assert!(registry.resolve_reader("file.xyz").is_none());
    assert!(registry.resolve_writer("file.dst").is_none());
}

#[test]
fn test_decode_absolute_moveto() {
    let (result, pattern) = decode(r#"<svg><path d="M10,20 30,40"/></svg>"#);
    assert!(result.is_ok());
    assert_eq!(
        kinds(&pattern),
        vec![
            (0.0, 0.0, MovementKind::Trim),
            (10.0, 20.0, MovementKind::Jump),
            (30.0, 40.0, MovementKind::Normal),
        ]
    );
}

#[test]
fn test_decode_relative_moveto_continues_from_position() {
    let (_, pattern) = decode(r#"<svg><path d="M5,5"/><path d="m1,1 2,2"/></svg>"#);
    assert_eq!(
        kinds(&pattern)[2..].to_vec(),
        vec![
            (5.0, 5.0, MovementKind::Trim),
            (6.0, 6.0, MovementKind::Jump),
            (8.0, 8.0, MovementKind::Normal),
        ]
    );
}

#[test]
fn test_decode_color_runs() {
    let (_, pattern) = decode(
        r##"<svg><path d="M0 0 1 1" stroke="#FF0000"/><path d="M2 2 3 3" stroke="#00FF00"/></svg>"##,
    );

    let colors: Vec<u32> = pattern.threads().iter().map(|t| t.color).collect();
    assert_eq!(colors, vec![0xFF0000, 0x00FF00]);
    assert_eq!(pattern.count_kind(MovementKind::Stop), 1);
    assert_eq!(pattern.stitches()[3].kind, MovementKind::Stop);
}

#[test]
fn test_decode_fixture() {
    let registry = FormatRegistry::builtin();
    let reader = registry.resolve_reader("rose.svg").unwrap();

    let mut pattern = StitchPattern::new();
    let mut file = fs::File::open(fixture("rose.svg")).unwrap();
    reader.read(&mut pattern, &mut file).unwrap();

    let names: Vec<&str> = pattern.threads().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["SVG Color #c0143c", "SVG Color #2e8b57"]);
    assert_eq!(pattern.len(), 17);
    assert_eq!(pattern.count_kind(MovementKind::Trim), 4);
    assert_eq!(pattern.count_kind(MovementKind::Jump), 4);
    assert_eq!(pattern.count_kind(MovementKind::Stop), 1);
    assert_eq!(pattern.count_kind(MovementKind::Normal), 8);

    let bounds = pattern.bounding_box();
    assert_eq!((bounds.left, bounds.top, bounds.width, bounds.height), (0.0, 0.0, 35.0, 35.0));
}

#[test]
fn test_encode_fixture_snapshot() {
    let mut pattern = StitchPattern::new();
    let mut file = fs::File::open(fixture("rose.svg")).unwrap();
    SvgFormat::default().read(&mut pattern, &mut file).unwrap();

    insta::assert_snapshot!(encode(&pattern), @r##"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><svg version="1.1" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" xmlns:ev="http://www.w3.org/2001/xml-events" width="35" height="35" viewBox="0 0 35 35"><path d="M 0,0 10,10 15,10 15,15 10,15 20,20 24,20 24,24 20,24" fill="none" stroke="#c0143c"/><path d="M 20,24 30,30 35,30 35,35 0,0" fill="none" stroke="#2e8b57"/></svg>"##);
}

#[test]
fn test_encode_suppresses_repeated_point() {
    let mut pattern = StitchPattern::new();
    pattern.add_thread(Thread::new(0x112233, "slate"));
    pattern.add_stitch_abs(0.0, 0.0, MovementKind::Normal);
    pattern.add_stitch_abs(0.0, 0.0, MovementKind::Normal);
    pattern.add_stitch_abs(5.0, 5.0, MovementKind::Normal);

    let svg = encode(&pattern);
    assert!(svg.contains(r#"d="M 0,0 5,5""#));
}

#[test]
fn test_round_trip_keeps_palette_order() {
    let (_, original) = decode(
        r##"<svg><path d="M0 0 L4 0" stroke="#0000ff"/><path d="M4 4 L0 4" stroke="#ffff00"/></svg>"##,
    );
    let (result, decoded) = decode(&encode(&original));

    assert!(result.is_ok());
    let colors: Vec<u32> = decoded.threads().iter().map(|t| t.color).collect();
    assert_eq!(colors, vec![0x0000FF, 0xFFFF00]);
    assert_eq!(decoded.bounding_box(), original.bounding_box());
}

#[test]
fn test_cancelled_before_first_element() {
    let cancel = CancelToken::new();
    cancel.cancel();

    let mut pattern = StitchPattern::new();
    let result = SvgFormat::default().read_with(
        &mut pattern,
        &mut r#"<svg><path d="M1 1 2 2"/></svg>"#.as_bytes(),
        &cancel,
    );

    assert!(matches!(result, Err(EmbError::Cancelled)));
    assert!(pattern.is_empty());
    assert!(pattern.threads().is_empty());
}

#[test]
fn test_malformed_keeps_partial_pattern() {
    let (result, pattern) = decode(r#"<svg><path d="M1 1 2 2"/><g></svg>"#);

    assert!(result.is_err());
    assert_eq!(pattern.len(), 3);
}

#[test]
fn test_truncated_document_is_error() {
    let (result, pattern) = decode("");
    assert!(matches!(result, Err(EmbError::Xml { .. })));
    assert!(pattern.is_empty());

    let (result, pattern) = decode("not xml");
    assert!(matches!(result, Err(EmbError::Xml { .. })));
    assert!(pattern.is_empty());

    let (result, pattern) = decode(r#"<svg><path d="M1 1 2 2"/>"#);
    assert!(matches!(result, Err(EmbError::Xml { .. })));
    assert_eq!(
        kinds(&pattern),
        vec![
            (0.0, 0.0, MovementKind::Trim),
            (1.0, 1.0, MovementKind::Jump),
            (2.0, 2.0, MovementKind::Normal),
        ]
    );
}

#[derive(Default)]
struct Callbacks {
    log: Vec<&'static str>,
    paths: Vec<(String, u32)>,
}

impl PathReceiver for Callbacks {
    fn on_start(&mut self) {
        self.log.push("start");
    }

    fn on_path(&mut self, data: &str, stroke: u32) -> Result<()> {
        self.log.push("path");
        self.paths.push((data.to_string(), stroke));
        Ok(())
    }

    fn on_finish(&mut self) {
        self.log.push("finish");
    }

    fn on_error(&mut self, _error: &EmbError) {
        self.log.push("error");
    }
}

#[test]
fn test_callback_sequence() {
    let cancel = CancelToken::new();
    let mut adapter = ElementAdapter::new(Callbacks::default(), &cancel);
    adapter
        .run(fs::read(fixture("rose.svg")).unwrap().as_slice())
        .unwrap();

    let callbacks = adapter.into_receiver();
    assert_eq!(callbacks.log, vec!["start", "path", "path", "path", "path", "finish"]);
    assert_eq!(callbacks.paths[2], ("M30,30 35,30 35,35".to_string(), 0x2E8B57));
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_failure_is_io_error() {
    let err = SvgFormat::default()
        .write(&StitchPattern::new(), &mut BrokenPipe)
        .unwrap_err();
    assert!(matches!(err, EmbError::IoError(_)));
}
