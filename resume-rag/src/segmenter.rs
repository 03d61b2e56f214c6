//! Text segmentation strategies.
//!
//! This module provides the [`Segmenter`] trait and two implementations:
//!
//! - [`SectionSegmenter`] — splits resumes at section headers, falling back to
//!   fixed windows when no structure is found
//! - [`FixedWindowSegmenter`] — splits by character count with overlap,
//!   snapping window ends to sentence or paragraph boundaries
//!
//! All lengths are measured in characters (Unicode scalar values), never bytes.

use std::ops::Range;

use tracing::debug;

use crate::error::{RagError, Result};

/// Section names recognised as headers regardless of casing.
pub const DEFAULT_SECTION_NAMES: [&str; 8] = [
    "experience",
    "education",
    "skills",
    "summary",
    "objective",
    "projects",
    "certifications",
    "awards",
];

/// Upper-case lines at least this long are treated as body text.
const MAX_HEADER_CHARS: usize = 50;

/// A strategy for splitting raw text into independently embeddable segments.
///
/// Implementations return segments in source order. Every returned segment
/// is non-empty; empty input produces an empty `Vec`.
pub trait Segmenter: Send + Sync {
    /// Split `text` into ordered segments.
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Splits text into overlapping windows of at most `window_size` characters.
///
/// A window that does not reach the end of the text is shortened to end just
/// after the nearest preceding sentence terminator (`.`, `!` or `?` followed
/// by a space or newline) or blank line, so sentences are not cut in half.
/// Consecutive windows share `overlap` characters of source text. Windows are
/// trimmed and whitespace-only windows are dropped.
///
/// # Example
///
/// ```rust,ignore
/// use resume_rag::{FixedWindowSegmenter, Segmenter};
///
/// let segmenter = FixedWindowSegmenter::new(1000, 200)?;
/// let segments = segmenter.segment(&text);
/// ```
#[derive(Debug, Clone)]
pub struct FixedWindowSegmenter {
    window_size: usize,
    overlap: usize,
}

/// Find the end of the last sentence or paragraph delimiter in `window`.
///
/// Returns the index just past the delimiter. Only ends strictly greater
/// than `min_end` are accepted so the next window still moves forward.
fn last_delimiter_end(window: &[char], min_end: usize) -> Option<usize> {
    (1..window.len())
        .rev()
        .take_while(|&i| i + 1 > min_end)
        .find(|&i| match (window[i - 1], window[i]) {
            ('.' | '!' | '?', ' ' | '\n') => true,
            ('\n', '\n') => true,
            _ => false,
        })
        .map(|i| i + 1)
}

impl FixedWindowSegmenter {
    /// Create a new `FixedWindowSegmenter`.
    ///
    /// # Arguments
    ///
    /// * `window_size` — maximum number of characters per segment
    /// * `overlap` — number of characters shared by consecutive windows
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if `window_size` is zero or
    /// `overlap >= window_size`, since the cursor could never advance.
    pub fn new(window_size: usize, overlap: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(RagError::ConfigError("window_size must be greater than zero".to_string()));
        }
        if overlap >= window_size {
            return Err(RagError::ConfigError(format!(
                "overlap ({overlap}) must be less than window_size ({window_size})"
            )));
        }
        Ok(Self { window_size, overlap })
    }

    /// Maximum number of characters per segment.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of characters shared by consecutive windows.
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Character ranges of the untrimmed windows over `chars`.
    ///
    /// The first window starts at 0, the last ends at `chars.len()`, and each
    /// window starts `overlap` characters before the previous one ended.
    fn window_ranges(&self, chars: &[char]) -> Vec<Range<usize>> {
        let len = chars.len();
        let mut ranges = Vec::new();
        let mut start = 0;

        while start < len {
            let mut end = (start + self.window_size).min(len);

            if end < len {
                if let Some(snapped) = last_delimiter_end(&chars[start..end], self.overlap) {
                    end = start + snapped;
                }
            }

            ranges.push(start..end);
            if end >= len {
                break;
            }
            start = end - self.overlap;
        }

        ranges
    }

    /// Character ranges of the windows `text` is cut into, before trimming.
    pub fn windows(&self, text: &str) -> Vec<Range<usize>> {
        let chars: Vec<char> = text.chars().collect();
        self.window_ranges(&chars)
    }
}

impl Segmenter for FixedWindowSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let segments: Vec<String> = self
            .window_ranges(&chars)
            .into_iter()
            .filter_map(|range| {
                let window: String = chars[range].iter().collect();
                let trimmed = window.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect();

        debug!(segment_count = segments.len(), "split text into fixed windows");
        segments
    }
}

/// Splits resume text at section headers.
///
/// Lines are trimmed and blank lines dropped. A line starts a new section if
/// it is entirely upper-case and shorter than 50 characters, or if its
/// lower-cased form is one of the known section names (see
/// [`DEFAULT_SECTION_NAMES`]). Each section keeps its header as first line.
///
/// When the text yields at most one section, sectioning adds nothing and the
/// text is split by the fallback [`FixedWindowSegmenter`] instead.
///
/// # Example
///
/// ```rust,ignore
/// use resume_rag::{FixedWindowSegmenter, SectionSegmenter, Segmenter};
///
/// let segmenter = SectionSegmenter::new(FixedWindowSegmenter::new(1000, 200)?);
/// let segments = segmenter.segment("SUMMARY\nRust developer\nSKILLS\nTokio, Serde");
/// assert_eq!(segments, vec!["SUMMARY\nRust developer", "SKILLS\nTokio, Serde"]);
/// ```
#[derive(Debug, Clone)]
pub struct SectionSegmenter {
    section_names: Vec<String>,
    fallback: FixedWindowSegmenter,
}

impl SectionSegmenter {
    /// Create a section segmenter using the default section names.
    pub fn new(fallback: FixedWindowSegmenter) -> Self {
        Self {
            section_names: DEFAULT_SECTION_NAMES.iter().map(|s| s.to_string()).collect(),
            fallback,
        }
    }

    /// Replace the set of section names recognised as headers.
    ///
    /// Names are compared against lower-cased lines.
    pub fn with_section_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.section_names = names.into_iter().map(|n| n.into().to_lowercase()).collect();
        self
    }

    /// Whether a trimmed, non-empty line is a section header.
    pub fn is_header(&self, line: &str) -> bool {
        let shouting = is_upper(line) && line.chars().count() < MAX_HEADER_CHARS;
        shouting || {
            let lowered = line.to_lowercase();
            self.section_names.iter().any(|name| *name == lowered)
        }
    }

    /// Split text into header-delimited sections without any fallback.
    pub fn split_sections(&self, text: &str) -> Vec<String> {
        let mut sections = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if self.is_header(line) && !current.is_empty() {
                sections.push(current.join("\n"));
                current.clear();
            }
            current.push(line);
        }

        if !current.is_empty() {
            sections.push(current.join("\n"));
        }

        sections
    }
}

impl Segmenter for SectionSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let sections = self.split_sections(text);
        if sections.len() <= 1 {
            debug!("no section headers found, falling back to fixed windows");
            return self.fallback.segment(text);
        }
        debug!(segment_count = sections.len(), "split text into sections");
        sections
    }
}

/// At least one cased character and no lower-case characters.
fn is_upper(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> SectionSegmenter {
        SectionSegmenter::new(FixedWindowSegmenter::new(1000, 200).unwrap())
    }

    #[test]
    fn rejects_degenerate_window_config() {
        assert!(FixedWindowSegmenter::new(0, 0).unwrap_err().is_config_error());
        assert!(FixedWindowSegmenter::new(100, 100).unwrap_err().is_config_error());
        assert!(FixedWindowSegmenter::new(100, 150).is_err());
        assert!(FixedWindowSegmenter::new(100, 99).is_ok());
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(FixedWindowSegmenter::new(10, 2).unwrap().segment("").is_empty());
        assert!(sections().segment("").is_empty());
        assert!(sections().segment("\n\n   \n").is_empty());
    }

    #[test]
    fn short_text_is_one_segment() {
        let segmenter = FixedWindowSegmenter::new(100, 20).unwrap();
        assert_eq!(segmenter.segment("  Rust engineer.  "), vec!["Rust engineer."]);
    }

    #[test]
    fn windows_snap_to_sentence_end() {
        let segmenter = FixedWindowSegmenter::new(20, 2).unwrap();
        let segments = segmenter.segment("One two three. Four five six seven eight.");
        assert_eq!(segments[0], "One two three.");
        assert!(segments.iter().all(|s| s.chars().count() <= 20));
    }

    #[test]
    fn windows_snap_to_blank_line() {
        let segmenter = FixedWindowSegmenter::new(12, 0).unwrap();
        let segments = segmenter.segment("abc def\n\nghi jkl mno");
        assert_eq!(segments, vec!["abc def", "ghi jkl mno"]);
    }

    #[test]
    fn windows_without_delimiters_overlap() {
        let segmenter = FixedWindowSegmenter::new(4, 1).unwrap();
        assert_eq!(segmenter.segment("abcdefghij"), vec!["abcd", "defg", "ghij"]);
    }

    #[test]
    fn windows_count_characters_not_bytes() {
        let segmenter = FixedWindowSegmenter::new(3, 0).unwrap();
        assert_eq!(segmenter.segment("éééééé"), vec!["ééé", "ééé"]);
    }

    #[test]
    fn snap_that_would_stall_is_ignored() {
        // The only delimiter ends inside the overlap, so the full window is kept.
        let segmenter = FixedWindowSegmenter::new(10, 4).unwrap();
        let segments = segmenter.segment("a. bcdefghijklmnop");
        assert_eq!(segments[0], "a. bcdefgh");
    }

    #[test]
    fn detects_headers() {
        let s = sections();
        assert!(s.is_header("WORK HISTORY"));
        assert!(s.is_header("Experience"));
        assert!(s.is_header("skills"));
        assert!(!s.is_header("Built distributed systems"));
        assert!(!s.is_header("2019 - 2023"));
        assert!(!s.is_header(&"A".repeat(50)));
    }

    #[test]
    fn splits_resume_into_sections() {
        let text = "Jane Doe\njane@example.com\n\nSUMMARY\nBackend engineer.\n\n\
                    Experience\nAcme Corp - Rust services\n\nEducation\nBSc Computer Science\n";
        let segments = sections().segment(text);
        assert_eq!(
            segments,
            vec![
                "Jane Doe\njane@example.com",
                "SUMMARY\nBackend engineer.",
                "Experience\nAcme Corp - Rust services",
                "Education\nBSc Computer Science",
            ]
        );
    }

    #[test]
    fn falls_back_without_headers() {
        let fallback = FixedWindowSegmenter::new(16, 4).unwrap();
        let segmenter = SectionSegmenter::new(fallback.clone());
        let text = "plain text with no headers at all in it";
        assert_eq!(segmenter.segment(text), fallback.segment(text));
    }

    #[test]
    fn custom_section_names() {
        let segmenter = sections().with_section_names(["Publications", "Talks"]);
        let text = "intro line\npublications\npaper one\ntalks\ntalk one";
        assert_eq!(segmenter.segment(text).len(), 3);
        assert!(!segmenter.is_header("experience"));
    }
}
