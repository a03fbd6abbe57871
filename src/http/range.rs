//! HTTP Range request parsing module
//!
//! Single-range `bytes=` header evaluation for resumable downloads and video
//! seeking, compliant with RFC 7233.

/// A satisfiable byte range, resolved against the actual file size.
///
/// Both positions are inclusive, so `start..=end` indexes the body slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered by the range (for test validation only)
    #[cfg(test)]
    pub const fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Outcome of evaluating a Range header against a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// Serve the slice with 206 Partial Content
    Satisfiable(ByteRange),
    /// Range lies entirely outside the file - respond 416
    NotSatisfiable,
    /// No Range header, malformed header, or multi-range: serve the full file
    Ignored,
}

/// Evaluate an HTTP Range header against the file size
///
/// Supported forms (single range, bytes unit only):
/// - `bytes=start-end`
/// - `bytes=start-` (open ended)
/// - `bytes=-suffix` (last `suffix` bytes)
///
/// Multi-range requests and anything unparseable are ignored rather than
/// rejected, so the client falls back to a full 200 response.
pub fn evaluate_range_header(header: Option<&str>, file_size: u64) -> RangeOutcome {
    let Some(header) = header else {
        return RangeOutcome::Ignored;
    };

    let Some(ranges) = header.strip_prefix("bytes=") else {
        return RangeOutcome::Ignored; // not a bytes unit
    };

    if ranges.contains(',') {
        return RangeOutcome::Ignored; // multi-range not supported
    }

    let Some((start_str, end_str)) = ranges.split_once('-') else {
        return RangeOutcome::Ignored;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if start_str.is_empty() {
        return evaluate_suffix(end_str, file_size);
    }

    evaluate_bounded(start_str, end_str, file_size)
}

/// Suffix form: `bytes=-500` means the last 500 bytes
fn evaluate_suffix(suffix_str: &str, file_size: u64) -> RangeOutcome {
    let Ok(suffix) = suffix_str.parse::<u64>() else {
        return RangeOutcome::Ignored;
    };

    if suffix == 0 || file_size == 0 {
        return RangeOutcome::NotSatisfiable;
    }

    // A suffix longer than the file covers the whole file
    RangeOutcome::Satisfiable(ByteRange {
        start: file_size.saturating_sub(suffix),
        end: file_size - 1,
    })
}

/// Bounded forms: `bytes=start-end` and `bytes=start-`
fn evaluate_bounded(start_str: &str, end_str: &str, file_size: u64) -> RangeOutcome {
    let Ok(start) = start_str.parse::<u64>() else {
        return RangeOutcome::Ignored;
    };

    if start >= file_size {
        return RangeOutcome::NotSatisfiable;
    }

    let end = if end_str.is_empty() {
        file_size - 1
    } else {
        let Ok(end) = end_str.parse::<u64>() else {
            return RangeOutcome::Ignored;
        };
        // Clamp to the last byte of the file
        end.min(file_size - 1)
    };

    if start > end {
        return RangeOutcome::NotSatisfiable;
    }

    RangeOutcome::Satisfiable(ByteRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_header() {
        assert_eq!(evaluate_range_header(None, 100), RangeOutcome::Ignored);
    }

    #[test]
    fn test_bounded_range() {
        assert_eq!(
            evaluate_range_header(Some("bytes=0-99"), 1000),
            RangeOutcome::Satisfiable(ByteRange { start: 0, end: 99 })
        );
        match evaluate_range_header(Some("bytes=0-99"), 1000) {
            RangeOutcome::Satisfiable(r) => assert_eq!(r.len(), 100),
            other => panic!("expected Satisfiable, got {other:?}"),
        }
    }

    #[test]
    fn test_open_ended_range() {
        assert_eq!(
            evaluate_range_header(Some("bytes=50-"), 100),
            RangeOutcome::Satisfiable(ByteRange { start: 50, end: 99 })
        );
    }

    #[test]
    fn test_suffix_range() {
        assert_eq!(
            evaluate_range_header(Some("bytes=-20"), 100),
            RangeOutcome::Satisfiable(ByteRange { start: 80, end: 99 })
        );
        // Suffix longer than the file covers the whole file
        assert_eq!(
            evaluate_range_header(Some("bytes=-500"), 100),
            RangeOutcome::Satisfiable(ByteRange { start: 0, end: 99 })
        );
    }

    #[test]
    fn test_end_clamped_to_file_size() {
        assert_eq!(
            evaluate_range_header(Some("bytes=90-200"), 100),
            RangeOutcome::Satisfiable(ByteRange { start: 90, end: 99 })
        );
    }

    #[test]
    fn test_not_satisfiable() {
        assert_eq!(
            evaluate_range_header(Some("bytes=200-"), 100),
            RangeOutcome::NotSatisfiable
        );
        assert_eq!(
            evaluate_range_header(Some("bytes=-0"), 100),
            RangeOutcome::NotSatisfiable
        );
        assert_eq!(
            evaluate_range_header(Some("bytes=9-5"), 100),
            RangeOutcome::NotSatisfiable
        );
    }

    #[test]
    fn test_malformed_ignored() {
        assert_eq!(
            evaluate_range_header(Some("bytes=a-b"), 100),
            RangeOutcome::Ignored
        );
        assert_eq!(
            evaluate_range_header(Some("chunks=0-9"), 100),
            RangeOutcome::Ignored
        );
        assert_eq!(
            evaluate_range_header(Some("bytes=0-9,20-29"), 100),
            RangeOutcome::Ignored
        );
    }
}
