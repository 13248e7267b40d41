//! Splitting of source text into literal and include-directive segments.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Matches an `include(...)` call with a single quoted argument, anchored at
/// the start of the remaining line content. The optional statement
/// terminator is consumed but not part of the directive's original text.
static DIRECTIVE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^include\(\s*(?:"([^"]*)"|'([^']*)')\s*\);?"#).unwrap());

/// Lines starting with this marker (after optional indentation) never
/// produce directives. Only this single line-comment style is recognized;
/// block comments and mid-line markers are deliberately not handled.
const COMMENT_MARKER: &str = "//";

/// A unit of source text produced by [`split`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Segment {
    /// Verbatim, non-directive source text.
    Literal(String),
    /// An `include(...)` directive to be replaced by file content.
    Include(Directive),
}

/// Parsed form of an include directive.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Directive {
    /// The quoted argument, quotes stripped and surrounding whitespace
    /// trimmed. May be a relative path or a glob pattern.
    pub target: String,
    /// The directive as it appeared in the source, without the terminator.
    pub original: String,
}

impl Directive {
    fn from_match(caps: &Captures) -> Self {
        let matched = caps.get(0).unwrap().as_str();
        let original = matched.strip_suffix(';').unwrap_or(matched).to_owned();
        let target = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|quoted| quoted.as_str().trim())
            .unwrap_or_default()
            .to_owned();

        Directive { target, original }
    }
}

/// Splits source text into an ordered sequence of segments.
///
/// Literal content is preserved verbatim, except that whitespace directly
/// surrounding a directive belongs to neither neighbor: everything between
/// the previous non-whitespace character and the directive is dropped, and
/// the directive consumes its terminator, trailing horizontal whitespace
/// and at most one line break.
pub fn split(source: &str) -> Vec<Segment> {
    let mut segments = vec![];
    let mut literal = String::new();
    let mut rest = source;

    while !rest.is_empty() {
        let line_end = rest.find('\n').map_or(rest.len(), |pos| pos + 1);
        let (line, tail) = rest.split_at(line_end);
        rest = tail;

        scan_line(line, &mut literal, &mut segments);
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    segments
}

fn scan_line(line: &str, literal: &mut String, segments: &mut Vec<Segment>) {
    let mut cursor = line;
    let mut after_directive = false;

    loop {
        let trimmed = cursor.trim_start_matches(|c| c == ' ' || c == '\t');

        // A directive counts only as the first non-whitespace content of a
        // line, or directly behind a previous directive on the same line.
        let directive = if !after_directive && trimmed.starts_with(COMMENT_MARKER) {
            None
        } else {
            DIRECTIVE_REGEX.captures(trimmed)
        };

        match directive {
            Some(caps) => {
                flush_trimmed(literal, segments);

                let matched_len = caps.get(0).unwrap().as_str().len();
                segments.push(Segment::Include(Directive::from_match(&caps)));

                let mut after = trimmed[matched_len..]
                    .trim_start_matches(|c| c == ' ' || c == '\t');
                if let Some(stripped) = after.strip_prefix("\r\n") {
                    after = stripped;
                } else if let Some(stripped) = after.strip_prefix('\n') {
                    after = stripped;
                }

                if after.is_empty() {
                    return;
                }
                cursor = after;
                after_directive = true;
            }
            None => {
                if after_directive {
                    // whitespace behind the directive's terminator is dropped
                    literal.push_str(trimmed);
                } else {
                    literal.push_str(cursor);
                }
                return;
            }
        }
    }
}

fn flush_trimmed(literal: &mut String, segments: &mut Vec<Segment>) {
    let text = literal.trim_end();
    if !text.is_empty() {
        segments.push(Segment::Literal(text.to_owned()));
    }
    literal.clear();
}
