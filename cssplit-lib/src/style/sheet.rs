// Owned views of the constructs the splitter moves between files.
use std::fmt;

/// Number of selectors in a rule header: its comma-separated entries.
///
/// Never less than 1; an at-rule header such as `@font-face ` counts once.
pub fn count_selectors(header: &str) -> usize {
    header.split(',').count()
}

/// Anything the packer can put into a chunk.
pub trait Weighted {
    /// Selectors this item contributes to a stylesheet.
    fn weight(&self) -> usize;
    /// Text written to the output file for this item.
    fn text(&self) -> &str;
}

/// A single rule block, e.g. `.a, .b { color: red; }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    entire_text: String,
    header_len: usize,
    selector_count: usize,
}

impl Rule {
    pub fn new(header: &str, body: &str) -> Self {
        Rule {
            entire_text: format!("{}{}", header, body),
            header_len: header.len(),
            selector_count: count_selectors(header),
        }
    }

    /// Selector list, including any whitespace before it in the source.
    pub fn header(&self) -> &str {
        &self.entire_text[..self.header_len]
    }

    /// Declaration block, braces included.
    pub fn body(&self) -> &str {
        &self.entire_text[self.header_len..]
    }

    pub fn entire_text(&self) -> &str {
        &self.entire_text
    }

    pub fn selector_count(&self) -> usize {
        self.selector_count
    }
}

impl Weighted for Rule {
    fn weight(&self) -> usize {
        self.selector_count
    }

    fn text(&self) -> &str {
        &self.entire_text
    }
}

/// An `@media` wrapper and the rules nested in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBlock {
    pub header: String,
    pub body: String,
    pub entire_text: String,
    pub rules: Vec<Rule>,
}

impl MediaBlock {
    /// Block exactly as it appeared in the source.
    pub fn new(header: &str, body: &str, rules: Vec<Rule>) -> Self {
        MediaBlock {
            header: header.to_string(),
            body: body.to_string(),
            entire_text: format!("{}{}", header, body),
            rules,
        }
    }

    /// Block rebuilt around a subset of another block's rules, rendered as
    /// `header { rules }`.
    pub fn rewrap(header: &str, rules: Vec<Rule>) -> Self {
        let header = header.trim_end();
        let inner: String = rules.iter().map(Rule::entire_text).collect();
        MediaBlock {
            header: header.to_string(),
            body: format!("{{ {} }}", inner),
            entire_text: format!("{} {{ {} }}", header, inner),
            rules,
        }
    }

    pub fn selector_count(&self) -> usize {
        self.rules.iter().map(Rule::selector_count).sum()
    }
}

impl Weighted for MediaBlock {
    fn weight(&self) -> usize {
        self.selector_count()
    }

    fn text(&self) -> &str {
        &self.entire_text
    }
}

/// Everything extracted from one compiled stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub media: Vec<MediaBlock>,
    pub rules: Vec<Rule>,
    /// `@charset`, `@import` and `@layer` statements, trimmed. They must
    /// precede every rule, so they belong in the manifest.
    pub statements: Vec<String>,
    /// `@namespace` statements, trimmed. A prefix is only in scope in the
    /// sheet declaring it, so every chunk repeats them.
    pub namespaces: Vec<String>,
    /// Any other brace-less at-rule, trimmed. Written after the manifest's
    /// imports so it cannot invalidate them.
    pub other_statements: Vec<String>,
}

impl Stylesheet {
    /// Selectors across plain rules and every media block.
    pub fn selector_count(&self) -> usize {
        let plain: usize = self.rules.iter().map(Rule::selector_count).sum();
        let media: usize = self.media.iter().map(MediaBlock::selector_count).sum();
        plain + media
    }

    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
            && self.rules.is_empty()
            && self.statements.is_empty()
            && self.namespaces.is_empty()
            && self.other_statements.is_empty()
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} rules, {} media blocks, {} statements, {} namespaces, {} selectors",
            self.rules.len(),
            self.media.len(),
            self.statements.len(),
            self.namespaces.len(),
            self.selector_count()
        )?;
        for media in &self.media {
            writeln!(
                f,
                "  {}: {} rules, {} selectors",
                media.header.trim(),
                media.rules.len(),
                media.selector_count()
            )?;
        }
        Ok(())
    }
}
