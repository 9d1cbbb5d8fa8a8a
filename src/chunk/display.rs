use std::fmt;

use unicode_width::UnicodeWidthStr;

use super::{Chunk, UNEDITED_TYPE};

/// Column-aligned rendering of a chunk sequence.
///
/// ```text
/// orig  : |   |This|   |sentences|   |contain |   |gramamtical|   |error|   | . |   |
/// gold  : |   |This|   |sentence |   |contains| a |grammatical|   |error|   | . |   |
/// weight: |1.0|1.0 |1.0|   1.0   |1.0|  1.0   |1.0|    1.0    |1.0| 1.0 |1.0|1.0|1.0|
/// cat   : |   |    |   | R:NOUN  |   |  ...
/// ```
pub struct ChunkDisplay<'a> {
    chunks: &'a [Chunk],
    tokens: &'a [&'a str],
}

impl<'a> ChunkDisplay<'a> {
    /// `tokens` are the source tokens the chunk spans index into.
    pub fn new(chunks: &'a [Chunk], tokens: &'a [&'a str]) -> Self {
        Self { chunks, tokens }
    }
}

/// Center `text` in a cell `width` columns wide, extra space going right.
fn center(text: &str, width: usize) -> String {
    let offset = width.saturating_sub(UnicodeWidthStr::width(text));
    let left = offset / 2;
    let mut cell = String::with_capacity(text.len() + offset);
    cell.extend(std::iter::repeat(' ').take(left));
    cell.push_str(text);
    cell.extend(std::iter::repeat(' ').take(offset - left));
    cell
}

fn format_weight(weight: f64) -> String {
    format!("{:?}", (weight * 100.0).round() / 100.0)
}

impl<'a> fmt::Display for ChunkDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut orig_row = vec!["orig  : ".to_string()];
        let mut gold_row = vec!["gold  : ".to_string()];
        let mut weight_row = vec!["weight: ".to_string()];
        let mut type_row = vec!["cat   : ".to_string()];

        for chunk in self.chunks {
            let orig = self
                .tokens
                .get(chunk.start..chunk.end)
                .map(|span| span.join(" "))
                .unwrap_or_default();
            let weight = format_weight(chunk.weight);
            let error_type = if chunk.error_type == UNEDITED_TYPE {
                ""
            } else {
                chunk.error_type.as_str()
            };

            let width = [orig.as_str(), chunk.correction.as_str(), weight.as_str(), error_type]
                .iter()
                .map(|cell| UnicodeWidthStr::width(*cell))
                .max()
                .unwrap_or(0);

            orig_row.push(center(&orig, width));
            gold_row.push(center(&chunk.correction, width));
            weight_row.push(center(&weight, width));
            type_row.push(center(error_type, width));
        }

        writeln!(f, "{}|", orig_row.join("|"))?;
        writeln!(f, "{}|", gold_row.join("|"))?;
        writeln!(f, "{}|", weight_row.join("|"))?;
        write!(f, "{}|", type_row.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::{generate_chunks, tokenize};
    use crate::edit::Edit;

    #[test]
    fn test_center() {
        assert_eq!(center("a", 3), " a ");
        assert_eq!(center("is", 3), "is ");
        assert_eq!(center("1.0", 8), "  1.0   ");
        assert_eq!(center("wide", 2), "wide");
    }

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(1.0), "1.0");
        assert_eq!(format_weight(0.3333), "0.33");
        assert_eq!(format_weight(2.5), "2.5");
    }

    #[test]
    fn test_display_end_insertion() {
        let tokens = tokenize("This is a");
        let chunks = generate_chunks(&[Edit::new(3, 3, "sentence", "M:NOUN")], &tokens);
        let display = ChunkDisplay::new(&chunks, &tokens).to_string();
        insta::assert_snapshot!(display, @r###"
        orig  : |   |This|   |is |   | a |        |
        gold  : |   |This|   |is |   | a |sentence|
        weight: |1.0|1.0 |1.0|1.0|1.0|1.0|  1.0   |
        cat   : |   |    |   |   |   |   | M:NOUN |
        "###);
    }

    #[test]
    fn test_display_weights_and_wide_text() {
        let tokens = tokenize("ok");
        let mut chunks = generate_chunks(&[Edit::new(0, 1, "ÖK", "R:ORTH")], &tokens);
        chunks[1].weight = 0.125;
        let display = ChunkDisplay::new(&chunks, &tokens).to_string();
        insta::assert_snapshot!(display, @r###"
        orig  : |   |  ok  |   |
        gold  : |   |  ÖK  |   |
        weight: |1.0| 0.13 |1.0|
        cat   : |   |R:ORTH|   |
        "###);
    }
}
