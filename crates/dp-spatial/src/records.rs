//! Street record parser.
//!
//! # Line format
//!
//! ```text
//! 10th Helena Drive
//! 1
//! 34.0547000 -118.4794734 34.0544590 -118.4801137
//! 12th Street
//! 2
//! 34.0286226 -118.4798635 34.0290483 -118.4793513
//! 34.0290483 -118.4793513 34.0297580 -118.4785670
//! ```
//!
//! | Line                                   | Meaning                          |
//! |----------------------------------------|----------------------------------|
//! | contains any alphabetic character      | street name for following lines  |
//! | exactly four numeric tokens            | `start_lat start_lon end_lat end_lon` |
//! | anything else (counts, blanks, junk)   | skipped                          |
//!
//! Name lines are normalised by collapsing runs of whitespace to one space.
//! Segment lines that precede any name line get an empty name.  Lines are
//! read as bytes; invalid UTF-8 (e.g. a Latin-1 street name) is decoded
//! lossily and classified like any other line.

use std::io::BufRead;

use tracing::debug;

use dp_core::{GeoCoord, StreetSegment};

use crate::SpatialResult;

/// Classification of a single input line.
#[derive(Debug, PartialEq)]
enum Line {
    Name(String),
    Segment(GeoCoord, GeoCoord),
    Skip,
}

/// Read every segment record from `reader`.
///
/// Segments are returned in file order, one per segment line, in the
/// direction written.  Callers that want both traversal directions (e.g.
/// [`StreetMap::load_reader`](crate::StreetMap::load_reader)) add the
/// reverse themselves.
///
/// # Errors
///
/// Only I/O failures are errors; malformed lines are skipped.
pub fn parse_records<R: BufRead>(mut reader: R) -> SpatialResult<Vec<StreetSegment>> {
    let mut segments = Vec::new();
    let mut street = String::new();
    let mut skipped = 0usize;
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = String::from_utf8_lossy(&buf);
        match classify(&line) {
            Line::Name(name) => street = name,
            Line::Segment(start, end) => {
                segments.push(StreetSegment::new(start, end, street.clone()));
            }
            Line::Skip => {
                if !line.trim().is_empty() {
                    skipped += 1;
                    debug!(line = line_no, content = %line.trim(), "skipping non-segment line");
                }
            }
        }
    }

    debug!(segments = segments.len(), skipped, "parsed street records");
    Ok(segments)
}

fn classify(line: &str) -> Line {
    if line.chars().any(char::is_alphabetic) {
        return Line::Name(line.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [start_lat, start_lon, end_lat, end_lon] = tokens.as_slice() else {
        return Line::Skip;
    };

    match (
        GeoCoord::parse(start_lat, start_lon),
        GeoCoord::parse(end_lat, end_lon),
    ) {
        (Ok(start), Ok(end)) => Line::Segment(start, end),
        _ => Line::Skip,
    }
}
