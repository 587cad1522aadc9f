//! Line classification for the tab-delimited record format.
//!
//! Every physical line is exactly one of three kinds: a title row (`!` prefix),
//! a data row, or anything else (blank, comment-only). Comments start at `//`
//! but only when the marker sits at column 0 or directly after a space or tab,
//! so values such as `http://host/path` stay intact.

pub const COMMENT_MARKER: &str = "//";
pub const TITLE_MARKER: &str = "!";
pub const FIELD_DELIMITER: char = '\t';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Titles,
    Data,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub comment: String,
    pub kind: LineKind,
    pub fields: Vec<String>,
}

pub fn classify(raw_line: &str) -> ClassifiedLine {
    let (content, comment) = split_comment(raw_line);
    let Some(content) = content else {
        return ClassifiedLine {
            comment: comment.to_string(),
            kind: LineKind::Other,
            fields: Vec::new(),
        };
    };

    let mut kind = LineKind::Other;
    let mut line = content.trim_end();
    if let Some(rest) = line.strip_prefix(TITLE_MARKER) {
        kind = LineKind::Titles;
        line = rest;
    }

    let fields = if line.is_empty() {
        Vec::new()
    } else {
        line.split(FIELD_DELIMITER)
            .map(|field| field.trim().to_string())
            .collect::<Vec<_>>()
    };

    if kind != LineKind::Titles && !fields.is_empty() {
        kind = LineKind::Data;
    }

    ClassifiedLine {
        comment: comment.to_string(),
        kind,
        fields,
    }
}

/// Splits `line` at the first accepted comment marker.
///
/// Returns `None` for the content when the marker opens the line; the caller
/// treats such lines as pure comments without trimming or splitting.
fn split_comment(line: &str) -> (Option<&str>, &str) {
    let bytes = line.as_bytes();
    let mut from = 0usize;
    while let Some(offset) = line[from..].find(COMMENT_MARKER) {
        let position = from + offset;
        let comment = &line[position + COMMENT_MARKER.len()..];
        if position == 0 {
            return (None, comment);
        }
        if matches!(bytes[position - 1], b' ' | b'\t') {
            return (Some(&line[..position]), comment);
        }
        from = position + COMMENT_MARKER.len();
    }
    (Some(line), "")
}
