use serde::Serialize;

/// Where a declaration came from.
///
/// `file` indexes the builder's source registry. `line_span` is the number
/// of lines the declaration covers beyond its first, and is only set when
/// the declaration starts and ends in the same registered file and the
/// count fits in a `u16`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Pos {
    pub file: Option<usize>,
    pub line: u32,
    pub line_span: Option<u16>,
}
