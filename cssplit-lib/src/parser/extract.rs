//! Turns comment-free CSS into a [`Stylesheet`].

use log::debug;

use crate::error::SplitError;
use crate::parser::scanner::{scan, Span};
use crate::style::sheet::{MediaBlock, Rule, Stylesheet};

/// Extract media blocks, plain rules and top-level statements from `css`.
///
/// Any block whose header starts with the `@media` keyword becomes a
/// [`MediaBlock`]; every other block, at-rules like `@font-face` included,
/// is a plain [`Rule`] and is never split. `@namespace` statements are kept
/// apart from the other statements since each output file needs its own.
pub fn extract(css: &str) -> Result<Stylesheet, SplitError> {
    let mut sheet = Stylesheet::default();

    for span in scan(css, 0..css.len())? {
        match span {
            Span::Statement(range) => {
                let statement = css[range.clone()].trim();
                if !statement.starts_with('@') {
                    return Err(SplitError::malformed(
                        range.start,
                        "declaration outside of any block",
                    ));
                }
                match at_keyword(statement).to_ascii_lowercase().as_str() {
                    "charset" | "import" | "layer" => {
                        sheet.statements.push(statement.to_string())
                    }
                    "namespace" => sheet.namespaces.push(statement.to_string()),
                    _ => sheet.other_statements.push(statement.to_string()),
                }
            }
            Span::Block { header, body } => {
                let header_text = &css[header.clone()];
                let trimmed = header_text.trim_start();
                if is_media_header(trimmed) {
                    let media = extract_media(css, header.end - trimmed.len(), header.end, body)?;
                    sheet.media.push(media);
                } else {
                    sheet.rules.push(Rule::new(header_text, &css[body]));
                }
            }
        }
    }

    debug!(
        "Extracted {} rules, {} media blocks, {} statements, {} namespaces",
        sheet.rules.len(),
        sheet.media.len(),
        sheet.statements.len() + sheet.other_statements.len(),
        sheet.namespaces.len()
    );
    Ok(sheet)
}

/// True for `@media` followed by whitespace, `(` or nothing, in any case.
fn is_media_header(header: &str) -> bool {
    let bytes = header.as_bytes();
    bytes.len() >= 6
        && bytes[..6].eq_ignore_ascii_case(b"@media")
        && bytes
            .get(6)
            .map_or(true, |&b| b.is_ascii_whitespace() || b == b'(')
}

/// Name of the at-rule `statement` starts with, without the `@`.
fn at_keyword(statement: &str) -> &str {
    let name = &statement[1..];
    let end = name
        .find(|c: char| c.is_whitespace() || matches!(c, '(' | '"' | '\'' | ';'))
        .unwrap_or(name.len());
    &name[..end]
}

/// Build the media block whose header spans `start..open` and whose braces
/// cover `body`.
fn extract_media(
    css: &str,
    start: usize,
    open: usize,
    body: std::ops::Range<usize>,
) -> Result<MediaBlock, SplitError> {
    let inner = body.start + 1..body.end - 1;
    let rules = scan(css, inner)?
        .into_iter()
        .map(|span| match span {
            Span::Block { header, body } => Ok(Rule::new(&css[header], &css[body])),
            Span::Statement(range) => Err(SplitError::malformed(
                range.start,
                "statement inside a media block",
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MediaBlock::new(&css[start..open], &css[body], rules))
}
