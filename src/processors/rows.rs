//! Token-to-row grouping by vertical proximity.

use crate::domain::{Row, Token};

/// Groups unordered page tokens into horizontal rows.
///
/// Tokens are sorted by vertical center; a new row starts whenever a token's
/// center differs from the last token placed in the current row by more than
/// `y_thresh` pixels. Each row's tokens are sorted left to right before being
/// emitted. The union of the output rows is exactly the input token set.
///
/// A single vertical outlier starts its own row; no merge-back pass is
/// performed.
pub fn group_tokens_into_rows(tokens: Vec<Token>, y_thresh: f32) -> Vec<Row> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut sorted = tokens;
    sorted.sort_by(|a, b| a.bbox.center_y().total_cmp(&b.bbox.center_y()));

    let mut rows = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    for token in sorted {
        let starts_new_row = current
            .last()
            .is_some_and(|last| (token.bbox.center_y() - last.bbox.center_y()).abs() > y_thresh);
        if starts_new_row {
            rows.push(close_row(std::mem::take(&mut current)));
        }
        current.push(token);
    }
    rows.push(close_row(current));
    rows
}

/// Sorts a finished row left to right by the tokens' left edges.
fn close_row(mut tokens: Vec<Token>) -> Row {
    tokens.sort_by(|a, b| a.bbox.x_min().total_cmp(&b.bbox.x_min()));
    Row { tokens }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BoundingBox;

    fn token(text: &str, x1: f32, y1: f32, x2: f32, y2: f32) -> Token {
        Token::new(text, BoundingBox::from_coords(x1, y1, x2, y2), 0.9)
    }

    #[test]
    fn test_empty_input_yields_no_rows() {
        assert!(group_tokens_into_rows(Vec::new(), 12.0).is_empty());
    }

    #[test]
    fn test_tokens_on_one_line_form_one_row() {
        let tokens = vec![
            token("B", 100.0, 10.0, 150.0, 20.0),
            token("A", 10.0, 12.0, 60.0, 22.0),
        ];
        let rows = group_tokens_into_rows(tokens, 12.0);
        assert_eq!(rows.len(), 1);
        // sorted left to right regardless of input order
        assert_eq!(rows[0].tokens[0].text.as_ref(), "A");
        assert_eq!(rows[0].tokens[1].text.as_ref(), "B");
    }

    #[test]
    fn test_vertical_gap_starts_a_new_row() {
        let tokens = vec![
            token("top", 10.0, 10.0, 60.0, 20.0),
            token("bottom", 10.0, 50.0, 60.0, 60.0),
        ];
        let rows = group_tokens_into_rows(tokens, 12.0);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].tokens[0].text.as_ref(), "top");
        assert_eq!(rows[1].tokens[0].text.as_ref(), "bottom");
    }

    #[test]
    fn test_grouping_partitions_the_input_exactly() {
        // Partition property: no token dropped or duplicated.
        let tokens: Vec<Token> = (0..20)
            .map(|i| {
                let y = (i % 5) as f32 * 40.0;
                let x = (i / 5) as f32 * 100.0;
                token(&format!("t{i}"), x, y, x + 50.0, y + 10.0)
            })
            .collect();
        let rows = group_tokens_into_rows(tokens.clone(), 12.0);

        let mut seen: Vec<String> = rows
            .iter()
            .flat_map(|r| r.tokens.iter().map(|t| t.text.to_string()))
            .collect();
        seen.sort();
        let mut expected: Vec<String> = tokens.iter().map(|t| t.text.to_string()).collect();
        expected.sort();
        assert_eq!(seen, expected);

        // Within each row, tokens are sorted by ascending left edge.
        for row in &rows {
            for pair in row.tokens.windows(2) {
                assert!(pair[0].bbox.x_min() <= pair[1].bbox.x_min());
            }
        }
    }

    #[test]
    fn test_chained_drift_stays_in_one_row() {
        // Grouping compares against the LAST token placed, not the row's
        // first, so a gentle vertical drift accumulates into one row.
        let tokens = vec![
            token("a", 0.0, 0.0, 10.0, 10.0),   // cy 5
            token("b", 20.0, 10.0, 30.0, 20.0), // cy 15
            token("c", 40.0, 20.0, 50.0, 30.0), // cy 25
        ];
        let rows = group_tokens_into_rows(tokens, 12.0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tokens.len(), 3);
    }

    #[test]
    fn test_outlier_token_becomes_spurious_row() {
        let tokens = vec![
            token("body", 10.0, 100.0, 60.0, 110.0),
            token("stray", 10.0, 400.0, 60.0, 410.0),
        ];
        let rows = group_tokens_into_rows(tokens, 15.0);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].tokens.len(), 1);
    }
}
