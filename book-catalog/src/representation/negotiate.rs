//! `Accept` header negotiation
//!
//! Media ranges follow RFC 9110 §12.5.1: the most specific range matching a
//! format decides its quality, `q=0` excludes it, and wildcards (`*/*`,
//! `type/*`) match any subtype. The highest quality wins; ties go to the
//! range listed first, then to the endpoint's own format order.

use http::HeaderValue;
use thiserror::Error;

/// Output formats the catalog can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Xml,
    Csv,
    /// Raw image bytes; the concrete type depends on the image
    Image,
}

impl Format {
    /// `Content-Type` for a body in this format
    ///
    /// Images report `image/png` here; cover responses sniff the real type.
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml; charset=utf-8",
            Self::Csv => "text/csv; charset=utf-8",
            Self::Image => "image/png",
        }
    }

    /// Media types this format answers to, as `(type, subtype)`
    fn media_types(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Json => &[("application", "json")],
            Self::Xml => &[("application", "xml"), ("text", "xml")],
            Self::Csv => &[("text", "csv")],
            Self::Image => &[("image", "*")],
        }
    }
}

/// None of the acceptable media types is supported by the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("none of the requested media types is available: {requested}")]
pub struct NotAcceptable {
    pub requested: String,
}

impl NotAcceptable {
    fn new(requested: impl Into<String>) -> Self {
        Self {
            requested: requested.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MediaRange {
    kind: String,
    subtype: String,
    /// Quality in thousandths (0..=1000)
    quality: u16,
}

impl MediaRange {
    fn parse(raw: &str) -> Option<Self> {
        let mut params = raw.split(';');
        let (kind, subtype) = params.next()?.trim().split_once('/')?;
        let (kind, subtype) = (kind.trim(), subtype.trim());
        if kind.is_empty() || subtype.is_empty() || (kind == "*" && subtype != "*") {
            return None;
        }

        let mut quality = 1000;
        for param in params {
            if let Some((name, value)) = param.split_once('=') {
                if name.trim().eq_ignore_ascii_case("q") {
                    quality = parse_quality(value.trim())?;
                }
            }
        }

        Some(Self {
            kind: kind.to_ascii_lowercase(),
            subtype: subtype.to_ascii_lowercase(),
            quality,
        })
    }

    /// Specificity when this range matches `(kind, subtype)`, higher is more specific
    fn specificity(&self, kind: &str, subtype: &str) -> Option<u8> {
        match (self.kind.as_str(), self.subtype.as_str()) {
            ("*", "*") => Some(0),
            (k, "*") if k == kind => Some(1),
            (k, s) if k == kind && (s == subtype || subtype == "*") => Some(2),
            _ => None,
        }
    }
}

fn parse_quality(value: &str) -> Option<u16> {
    let q: f32 = value.parse().ok()?;
    if !(0.0..=1.0).contains(&q) {
        return None;
    }
    Some((q * 1000.0).round() as u16)
}

/// Most specific range matching `(kind, subtype)` as `(specificity, quality, position)`
fn best_range(ranges: &[MediaRange], kind: &str, subtype: &str) -> Option<(u8, u16, usize)> {
    let mut best: Option<(u8, u16, usize)> = None;
    for (position, range) in ranges.iter().enumerate() {
        let Some(specificity) = range.specificity(kind, subtype) else {
            continue;
        };
        let better = match best {
            None => true,
            Some((s, q, _)) => specificity > s || (specificity == s && range.quality > q),
        };
        if better {
            best = Some((specificity, range.quality, position));
        }
    }
    best
}

/// Quality and header position that decide a format's rank
fn rank(format: Format, ranges: &[MediaRange]) -> Option<(u16, usize)> {
    let mut best: Option<(u8, u16, usize)> = None;
    for (kind, subtype) in format.media_types() {
        let Some(candidate) = best_range(ranges, kind, subtype) else {
            continue;
        };
        let better = match best {
            None => true,
            Some((s, q, _)) => candidate.0 > s || (candidate.0 == s && candidate.1 > q),
        };
        if better {
            best = Some(candidate);
        }
    }
    best.and_then(|(_, quality, position)| (quality > 0).then_some((quality, position)))
}

/// Whether `accept` admits the concrete media type `content_type`
///
/// A missing or blank header admits everything. Parameters on
/// `content_type` are ignored.
pub fn accepts(accept: Option<&HeaderValue>, content_type: &str) -> bool {
    let header = match accept.map(HeaderValue::to_str) {
        None => return true,
        Some(Ok(value)) if value.trim().is_empty() => return true,
        Some(Ok(value)) => value,
        Some(Err(_)) => return false,
    };

    let essence = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    let Some((kind, subtype)) = essence.split_once('/') else {
        return false;
    };

    let ranges: Vec<MediaRange> = header.split(',').filter_map(MediaRange::parse).collect();
    best_range(&ranges, kind, subtype).is_some_and(|(_, quality, _)| quality > 0)
}

/// Pick the format to answer with
///
/// `supported` lists the endpoint's formats, preferred first. A missing or
/// blank `Accept` header selects `supported[0]`.
pub fn negotiate(accept: Option<&HeaderValue>, supported: &[Format]) -> Result<Format, NotAcceptable> {
    let Some(&default) = supported.first() else {
        return Err(NotAcceptable::new("no formats available"));
    };

    let header = match accept.map(HeaderValue::to_str) {
        None => return Ok(default),
        Some(Ok(value)) if value.trim().is_empty() => return Ok(default),
        Some(Ok(value)) => value,
        Some(Err(_)) => return Err(NotAcceptable::new("<invalid header>")),
    };

    let ranges: Vec<MediaRange> = header.split(',').filter_map(MediaRange::parse).collect();

    supported
        .iter()
        .enumerate()
        .filter_map(|(order, format)| rank(*format, &ranges).map(|(q, pos)| (q, pos, order, *format)))
        .min_by_key(|(quality, position, order, _)| (std::cmp::Reverse(*quality), *position, *order))
        .map(|(_, _, _, format)| format)
        .ok_or_else(|| NotAcceptable::new(header))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &[Format] = &[Format::Json, Format::Xml, Format::Csv];
    const ITEM: &[Format] = &[Format::Json, Format::Xml];
    const COVER: &[Format] = &[Format::Image];

    fn pick(accept: &str, supported: &[Format]) -> Result<Format, NotAcceptable> {
        negotiate(Some(&HeaderValue::from_str(accept).unwrap()), supported)
    }

    #[test]
    fn test_missing_or_blank_header_uses_default() {
        assert_eq!(negotiate(None, LIST), Ok(Format::Json));
        assert_eq!(pick("  ", LIST), Ok(Format::Json));
        assert_eq!(negotiate(None, COVER), Ok(Format::Image));
    }

    #[test]
    fn test_exact_types() {
        assert_eq!(pick("application/json", LIST), Ok(Format::Json));
        assert_eq!(pick("application/xml", LIST), Ok(Format::Xml));
        assert_eq!(pick("text/xml", LIST), Ok(Format::Xml));
        assert_eq!(pick("text/csv", LIST), Ok(Format::Csv));
        assert_eq!(pick("image/png", COVER), Ok(Format::Image));
    }

    #[test]
    fn test_wildcards() {
        assert_eq!(pick("*/*", LIST), Ok(Format::Json));
        assert_eq!(pick("text/*", LIST), Ok(Format::Xml));
        assert_eq!(pick("image/*", COVER), Ok(Format::Image));
        assert_eq!(pick("*/*", COVER), Ok(Format::Image));
    }

    #[test]
    fn test_quality_ordering() {
        assert_eq!(pick("application/json;q=0.5, text/csv", LIST), Ok(Format::Csv));
        assert_eq!(pick("text/csv;q=0.9, application/xml;q=0.9", LIST), Ok(Format::Csv));
        assert_eq!(pick("text/*;q=0.3, application/xml;q=0.8", LIST), Ok(Format::Xml));
    }

    #[test]
    fn test_specific_range_overrides_wildcard() {
        assert_eq!(pick("*/*, application/json;q=0", LIST), Ok(Format::Xml));
        assert_eq!(pick("text/*, text/csv;q=0", LIST), Ok(Format::Xml));
    }

    #[test]
    fn test_not_acceptable() {
        assert!(pick("text/html", LIST).is_err());
        assert!(pick("text/csv", ITEM).is_err());
        assert!(pick("application/json", COVER).is_err());
        assert!(pick("application/json;q=0", ITEM).is_err());

        let err = pick("text/html", LIST).unwrap_err();
        assert_eq!(err.requested, "text/html");
    }

    #[test]
    fn test_malformed_ranges_are_ignored() {
        assert_eq!(pick("garbage, application/xml", LIST), Ok(Format::Xml));
        assert_eq!(pick("text/csv;q=abc, application/json", LIST), Ok(Format::Json));
        assert!(pick("garbage", LIST).is_err());
    }

    #[test]
    fn test_accepts_concrete_type() {
        let accept = |value: &'static str| HeaderValue::from_static(value);

        assert!(accepts(None, "image/jpeg"));
        assert!(accepts(Some(&accept("image/*")), "image/jpeg"));
        assert!(accepts(Some(&accept("*/*")), "image/gif"));
        assert!(accepts(Some(&accept("image/png")), "image/png"));
        assert!(!accepts(Some(&accept("image/png")), "image/jpeg"));
        assert!(!accepts(Some(&accept("image/*, image/jpeg;q=0")), "image/jpeg"));
        assert!(accepts(Some(&accept("image/png, image/*;q=0.1")), "image/gif"));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(pick("Application/JSON", LIST), Ok(Format::Json));
        assert_eq!(pick("TEXT/CSV; Q=1", LIST), Ok(Format::Csv));
    }
}
