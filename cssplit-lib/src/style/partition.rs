//! Greedy packing of rules and media blocks into files under the selector limit.

use log::debug;

use crate::style::sheet::{MediaBlock, Stylesheet, Weighted};

/// An ordered group of items destined for the same output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<'a, T> {
    pub items: Vec<&'a T>,
    pub selector_count: usize,
}

impl<'a, T: Weighted> Chunk<'a, T> {
    fn empty() -> Self {
        Chunk {
            items: Vec::new(),
            selector_count: 0,
        }
    }

    fn push(&mut self, item: &'a T) {
        self.selector_count += item.weight();
        self.items.push(item);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Concatenated text of every item, in order.
    pub fn text(&self) -> String {
        self.items.iter().map(|item| item.text()).collect()
    }
}

/// Pack `items` in order into chunks of at most `limit` selectors.
///
/// The item that would push a chunk over the limit closes it and opens the
/// next one, even if the closed chunk is still empty. An item heavier than
/// the limit sits alone in its chunk. The last chunk is always returned, so
/// an empty input yields one empty chunk.
pub fn pack<T: Weighted>(items: &[T], limit: usize) -> Vec<Chunk<'_, T>> {
    let (mut chunks, last) = items.iter().fold(
        (Vec::new(), Chunk::empty()),
        |(mut chunks, mut current), item| {
            if current.selector_count + item.weight() > limit {
                chunks.push(std::mem::replace(&mut current, Chunk::empty()));
            }
            current.push(item);
            (chunks, current)
        },
    );
    chunks.push(last);
    chunks
}

/// Where an output chunk came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkOrigin {
    Rules,
    Media,
}

/// Rendered contents of one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputChunk {
    pub text: String,
    pub selector_count: usize,
    pub origin: ChunkOrigin,
}

impl OutputChunk {
    fn from_chunk<T: Weighted>(chunk: &Chunk<'_, T>, origin: ChunkOrigin) -> Self {
        OutputChunk {
            text: chunk.text(),
            selector_count: chunk.selector_count,
            origin,
        }
    }
}

/// Break a media block heavier than `limit` into blocks sharing its header.
///
/// Blocks within the limit come back unchanged.
pub fn resplit_media(media: &MediaBlock, limit: usize) -> Vec<MediaBlock> {
    if media.selector_count() <= limit {
        return vec![media.clone()];
    }

    let parts: Vec<MediaBlock> = pack(&media.rules, limit)
        .into_iter()
        .map(|chunk| {
            let rules = chunk.items.into_iter().cloned().collect();
            MediaBlock::rewrap(&media.header, rules)
        })
        .collect();

    debug!(
        "Re-split `{}` ({} selectors) into {} blocks",
        media.header.trim(),
        media.selector_count(),
        parts.len()
    );
    parts
}

/// Pack the plain rules, then the media blocks, of `sheet`.
///
/// Rule chunks always come first; at least one is produced. Media chunks
/// follow and are absent when the sheet has no media blocks.
pub fn partition(sheet: &Stylesheet, limit: usize) -> Vec<OutputChunk> {
    let mut output: Vec<OutputChunk> = pack(&sheet.rules, limit)
        .iter()
        .map(|chunk| OutputChunk::from_chunk(chunk, ChunkOrigin::Rules))
        .collect();
    let rule_chunks = output.len();

    if !sheet.media.is_empty() {
        let media: Vec<MediaBlock> = sheet
            .media
            .iter()
            .flat_map(|block| resplit_media(block, limit))
            .collect();
        output.extend(
            pack(&media, limit)
                .iter()
                .map(|chunk| OutputChunk::from_chunk(chunk, ChunkOrigin::Media)),
        );
    }

    debug!(
        "Partitioned into {} rule chunks and {} media chunks",
        rule_chunks,
        output.len() - rule_chunks
    );
    output
}
