//! Conversion between CSV rows and coordinates.
//!
//! Decoding is lenient: a row whose first two fields are not both finite
//! numbers is skipped, so header lines and junk rows simply disappear.
//! Encoding produces the export text: a `latitude,longitude` header and
//! one line per coordinate with three decimals, rounded to the nearest
//! decimal of the exact binary value (the same digits as C `%.3f`).

use crate::csv_parser::parse_csv;
use geotrace_core::Coordinate;

/// First line of every exported file
pub const EXPORT_HEADER: &str = "latitude,longitude";

/// Decimal places written for each component on export
pub const EXPORT_PRECISION: usize = 3;

fn parse_component(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Decode a single row; field 0 is latitude, field 1 longitude.
///
/// Extra fields are ignored.
pub fn decode_row<S: AsRef<str>>(row: &[S]) -> Option<Coordinate> {
    let latitude = parse_component(row.first()?.as_ref())?;
    let longitude = parse_component(row.get(1)?.as_ref())?;
    Some(Coordinate::new(latitude, longitude))
}

/// Decode every row that holds a coordinate, preserving row order.
pub fn decode_rows(rows: &[Vec<String>]) -> Vec<Coordinate> {
    let coordinates: Vec<Coordinate> = rows
        .iter()
        .filter_map(|row| {
            let decoded = decode_row(row.as_slice());
            if decoded.is_none() {
                tracing::trace!("Skipping row without a coordinate");
            }
            decoded
        })
        .collect();

    let out_of_range = coordinates.iter().filter(|c| !c.is_in_range()).count();
    if out_of_range > 0 {
        tracing::warn!(
            "{} decoded coordinates lie outside the geographic range",
            out_of_range
        );
    }
    coordinates
}

/// Parse CSV text and decode its coordinates.
pub fn decode_text(text: &str) -> Vec<Coordinate> {
    decode_rows(&parse_csv(text))
}

/// Format one coordinate as an export line, e.g. `45.123,-122.543`
pub fn format_line(coordinate: &Coordinate) -> String {
    format!(
        "{:.prec$},{:.prec$}",
        coordinate.latitude,
        coordinate.longitude,
        prec = EXPORT_PRECISION
    )
}

/// Produce the export text for `coordinates`.
///
/// The header is always followed by `\n`; coordinate lines are joined with
/// `\n` and the last one has no line break. An empty path therefore
/// encodes to `"latitude,longitude\n"`.
pub fn encode(coordinates: &[Coordinate]) -> String {
    let body: Vec<String> = coordinates.iter().map(format_line).collect();
    format!("{}\n{}", EXPORT_HEADER, body.join("\n"))
}
