//! Brace-depth scanner that cuts flat CSS text into top-level spans.
//!
//! The scanner never looks inside strings or comments: comments are
//! stripped beforehand and braces inside strings are not supported.

use std::ops::Range;

use crate::error::SplitError;

/// One top-level construct found by [`scan`].
///
/// Ranges are byte offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// `header { body }`. `header` runs from the end of the previous span to
    /// the opening brace; `body` covers both braces.
    Block {
        header: Range<usize>,
        body: Range<usize>,
    },
    /// A brace-less construct terminated by `;`, semicolon included.
    Statement(Range<usize>),
}

impl Span {
    pub fn range(&self) -> Range<usize> {
        match self {
            Span::Block { header, body } => header.start..body.end,
            Span::Statement(range) => range.clone(),
        }
    }
}

/// Scan `text[range]` at depth zero and return its spans in order.
///
/// Offsets in returned spans and in errors are relative to `text`, so a
/// nested range can be scanned without re-basing.
pub fn scan(text: &str, range: Range<usize>) -> Result<Vec<Span>, SplitError> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut cursor = range.start;

    while cursor < range.end {
        let next = bytes[cursor..range.end]
            .iter()
            .position(|&b| matches!(b, b'{' | b'}' | b';'))
            .map(|i| cursor + i);

        match next {
            None => {
                let rest = &text[cursor..range.end];
                if let Some(offset) = rest.find(|c: char| !c.is_whitespace()) {
                    return Err(SplitError::malformed(
                        cursor + offset,
                        "header is not followed by a block",
                    ));
                }
                break;
            }
            Some(at) if bytes[at] == b'}' => {
                return Err(SplitError::malformed(at, "unexpected closing brace"));
            }
            Some(at) if bytes[at] == b';' => {
                spans.push(Span::Statement(cursor..at + 1));
                cursor = at + 1;
            }
            Some(open) => {
                let close = matching_brace(bytes, open, range.end)?;
                spans.push(Span::Block {
                    header: cursor..open,
                    body: open..close + 1,
                });
                cursor = close + 1;
            }
        }
    }
    Ok(spans)
}

/// Offset of the `}` closing the `{` at `open`.
fn matching_brace(bytes: &[u8], open: usize, end: usize) -> Result<usize, SplitError> {
    let mut depth = 0usize;
    for (i, &b) in bytes[open..end].iter().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(open + i);
                }
            }
            _ => {}
        }
    }
    Err(SplitError::malformed(open, "block is never closed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slices<'a>(text: &'a str, spans: &[Span]) -> Vec<(&'a str, &'a str)> {
        spans
            .iter()
            .map(|span| match span {
                Span::Block { header, body } => (&text[header.clone()], &text[body.clone()]),
                Span::Statement(range) => (&text[range.clone()], ""),
            })
            .collect()
    }

    #[test]
    fn splits_consecutive_blocks() {
        let css = ".a { color: red; }\n.b, .c { margin: 0 }  ";
        let spans = scan(css, 0..css.len()).unwrap();
        assert_eq!(
            slices(css, &spans),
            vec![
                (".a ", "{ color: red; }"),
                ("\n.b, .c ", "{ margin: 0 }"),
            ]
        );
    }

    #[test]
    fn nested_braces_stay_inside_one_block() {
        let css = "@media print { .a { x: y } .b { x: z } } .c{}";
        let spans = scan(css, 0..css.len()).unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(
            slices(css, &spans)[0],
            ("@media print ", "{ .a { x: y } .b { x: z } }")
        );
    }

    #[test]
    fn statements_are_reported_separately() {
        let css = "@charset \"UTF-8\";\n.a{}";
        let spans = scan(css, 0..css.len()).unwrap();
        assert_eq!(spans[0], Span::Statement(0..17));
        assert_eq!(spans[1].range(), 17..css.len());
    }

    #[test]
    fn scanning_a_subrange_keeps_absolute_offsets() {
        let css = "@media x { .a{} }";
        let spans = scan(css, 10..16).unwrap();
        assert_eq!(
            spans,
            vec![Span::Block {
                header: 10..13,
                body: 13..15
            }]
        );
    }

    #[test]
    fn trailing_header_without_block_is_malformed() {
        let css = ".a{} .b";
        let err = scan(css, 0..css.len()).unwrap_err();
        assert!(matches!(
            err,
            SplitError::MalformedStructure { offset: 5, .. }
        ));
    }

    #[test]
    fn unbalanced_braces_are_malformed() {
        let open = ".a { color: red;";
        assert!(matches!(
            scan(open, 0..open.len()),
            Err(SplitError::MalformedStructure { offset: 3, .. })
        ));

        let stray = ".a{} }";
        assert!(matches!(
            scan(stray, 0..stray.len()),
            Err(SplitError::MalformedStructure { offset: 5, .. })
        ));
    }
}
