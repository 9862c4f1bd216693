//! The lexical half of annotation: re-scan rendered text and pair each
//! identifier token with the next queued intent.

use codemark_syntax::SyntaxKind;
use codemark_syntax::lexer::lex_with_spans;

use super::visitor::{Intent, Intents};
use crate::models::{Annotation, AnnotationKind};

/// Annotate `text` from a visitor's intents.
///
/// Comments become [`AnnotationKind::Comment`] directly. Each identifier
/// consumes one intent; if identifiers outnumber intents, correlation stops
/// at the first unmatched identifier and what was collected so far is
/// returned.
pub fn correlate(text: &str, intents: Intents) -> Vec<Annotation> {
    let Intents { mut queue, .. } = intents;
    let mut annotations = Vec::new();
    for (token, span) in lex_with_spans(text) {
        match token.kind {
            kind if kind.is_comment() => annotations.push(comment(span.start, span.end)),
            SyntaxKind::IDENT => match queue.pop_front() {
                Some(Intent::Ignore) => {}
                Some(Intent::Annotate { kind, path_index }) => annotations.push(Annotation {
                    pos: span.start,
                    end: span.end,
                    kind,
                    path_index,
                }),
                None => {
                    log::warn!(
                        "annotation queue exhausted at identifier {:?} (byte {}); keeping {} annotations",
                        token.text,
                        span.start,
                        annotations.len()
                    );
                    break;
                }
            },
            _ => {}
        }
    }
    if !queue.is_empty() {
        log::debug!("{} annotation intents left unmatched", queue.len());
    }
    annotations
}

/// Comment annotations only, for text with no syntactic pass.
pub fn comments(text: &str) -> Vec<Annotation> {
    lex_with_spans(text)
        .into_iter()
        .filter(|(token, _)| token.kind.is_comment())
        .map(|(_, span)| comment(span.start, span.end))
        .collect()
}

fn comment(pos: usize, end: usize) -> Annotation {
    Annotation {
        pos,
        end,
        kind: AnnotationKind::Comment,
        path_index: None,
    }
}
