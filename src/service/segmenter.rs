//! Sentence-aware chunking of extracted pages.

use regex::Regex;

use crate::model::{Chunk, Page};

/// Split pages into retrieval chunks of roughly `chunk_size` characters.
///
/// Page text is split on runs of sentence terminators (`.`, `!`, `?`) and
/// fragments are greedily packed into a buffer, re-joined with `". "`. The
/// buffer is flushed once adding the next fragment would reach `chunk_size`,
/// so a chunk may overshoot the target by one sentence. A fragment longer
/// than `chunk_size` is emitted whole rather than split mid-sentence.
///
/// Chunks never cross page boundaries and are never empty; blank pages
/// produce nothing.
pub fn segment_pages(pages: &[Page], chunk_size: usize) -> Vec<Chunk> {
    let terminators = Regex::new(r"[.!?]+").unwrap();
    let mut chunks = Vec::new();

    for page in pages {
        if page.content.trim().is_empty() {
            continue;
        }

        let mut buffer = String::new();
        let mut buffer_chars = 0usize;
        for fragment in terminators.split(&page.content) {
            let fragment = fragment.trim();
            if fragment.is_empty() {
                continue;
            }
            let fragment_chars = fragment.chars().count();
            if !buffer.is_empty() && buffer_chars + fragment_chars >= chunk_size {
                chunks.push(Chunk {
                    page: page.page_number,
                    content: buffer.trim_end().to_string(),
                    target_size: chunk_size,
                });
                buffer.clear();
                buffer_chars = 0;
            }
            buffer.push_str(fragment);
            buffer.push_str(". ");
            buffer_chars += fragment_chars + 2;
        }
        if !buffer.is_empty() {
            chunks.push(Chunk {
                page: page.page_number,
                content: buffer.trim_end().to_string(),
                target_size: chunk_size,
            });
        }
    }

    tracing::debug!(
        pages = pages.len(),
        chunks = chunks.len(),
        chunk_size,
        "segmented document"
    );
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: u32, content: &str) -> Page {
        Page {
            page_number: number,
            content: content.to_string(),
        }
    }

    #[test]
    fn packs_sentences_until_the_target_is_reached() {
        let pages = vec![page(1, "A short first sentence. A second one here. Third.")];

        let chunks = segment_pages(&pages, 20);

        let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(
            contents,
            vec!["A short first sentence.", "A second one here.", "Third."]
        );
    }

    #[test]
    fn small_sentences_share_a_chunk() {
        let pages = vec![page(1, "One. Two. Three.")];

        let chunks = segment_pages(&pages, 500);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "One. Two. Three.");
        assert_eq!(chunks[0].page, 1);
    }

    #[test]
    fn blank_pages_produce_no_chunks() {
        let pages = vec![page(1, "   \n\t  "), page(2, "")];

        assert!(segment_pages(&pages, 100).is_empty());
    }

    #[test]
    fn oversized_sentence_is_emitted_whole() {
        let long = "an unbroken run of words that never terminates early and easily \
                    exceeds the configured size";
        let pages = vec![page(1, &format!("{long}. Short."))];

        let chunks = segment_pages(&pages, 30);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, format!("{long}."));
        assert_eq!(chunks[1].content, "Short.");
        assert!(chunks.iter().all(|c| !c.content.is_empty()));
    }

    #[test]
    fn chunks_never_cross_page_boundaries() {
        let pages = vec![page(1, "First page text."), page(2, "Second page text.")];

        let chunks = segment_pages(&pages, 500);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].page, 1);
        assert_eq!(chunks[1].page, 2);
    }

    #[test]
    fn terminator_runs_collapse_to_a_single_period() {
        let pages = vec![page(1, "What?! Really!!")];

        let chunks = segment_pages(&pages, 500);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "What. Really.");
    }

    #[test]
    fn repeated_runs_are_identical_and_preserve_sentence_order() {
        let pages = vec![page(
            1,
            "Alpha leads. Bravo follows! Charlie next? Delta after that. Echo ends.",
        )];

        let first = segment_pages(&pages, 30);
        let second = segment_pages(&pages, 30);

        assert_eq!(first, second);
        let rejoined = first
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(
            rejoined,
            "Alpha leads. Bravo follows. Charlie next. Delta after that. Echo ends."
        );
    }

    #[test]
    fn chunks_record_the_requested_target_size() {
        let pages = vec![page(1, "One sentence. Another sentence.")];

        let chunks = segment_pages(&pages, 64);

        assert!(chunks.iter().all(|c| c.target_size == 64));
    }
}
