//! Coordinate pair parsing and fixed-precision formatting.
//!
//! Free-text location input may already contain a "lat, lon" pair; the
//! parser recognizes that case so the resolver never hits the network
//! for input that is already a coordinate.

use serde::{Deserialize, Serialize};

/// Number of decimal places in the stored/displayed representation.
pub const COORD_PRECISION: usize = 5;

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Creates a coordinate, rejecting values outside WGS84 bounds.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        if lat.is_finite() && lon.is_finite() && (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
        {
            Some(Self { lat, lon })
        } else {
            None
        }
    }

    /// Parses user input that may already be a coordinate pair.
    ///
    /// Accepts exactly two numeric tokens separated by `;` or `,`, with
    /// decimal comma or decimal point inside the tokens. Returns `None`
    /// for anything else — "not a pair" is expected input (a place name),
    /// not an error.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        // Semicolon separator first: it is unambiguous, so decimal
        // commas inside the tokens are allowed ("50,83; 12,48").
        let (left, right) = if let Some((l, r)) = text.split_once(';') {
            (l, r)
        } else {
            let parts: Vec<&str> = text.split(',').collect();
            match parts.as_slice() {
                [l, r] => (*l, *r),
                // "50,83, 12,48": four comma-separated fragments where
                // the outer split landed inside decimal commas.
                [a, b, c, d] => {
                    return Self::parse(&format!("{a}.{b}; {c}.{d}"));
                },
                _ => return None,
            }
        };

        let lat = parse_token(left)?;
        let lon = parse_token(right)?;
        Self::new(lat, lon)
    }

    /// Lenient re-parse of a stored `"lat, lon"` string.
    ///
    /// Stored values were written by [`Coordinate`]'s `Display`, but the
    /// table may carry older hand-entered rows; malformed ones yield
    /// `None` and are skipped by callers (marker building).
    pub fn parse_stored(text: &str) -> Option<Self> {
        let (lat, lon) = text.split_once(',')?;
        Self::new(lat.trim().parse().ok()?, lon.trim().parse().ok()?)
    }
}

fn parse_token(token: &str) -> Option<f64> {
    let token = token.trim().replace(',', ".");
    if token.is_empty() {
        return None;
    }
    token.parse().ok()
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.prec$}, {:.prec$}", self.lat, self.lon, prec = COORD_PRECISION)
    }
}
