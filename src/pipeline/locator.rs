//! Picks the OCR token the cursor is pointing at.

use crate::geometry::Point;
use crate::ocr::Token;

/// Distance used for ranking: zero when the cursor is inside the token's box
/// (edges included), otherwise the Euclidean distance to the box center.
fn cursor_distance(token: &Token, cursor: Point) -> f64 {
    if token.contains(cursor) {
        return 0.0;
    }
    let (cx, cy) = token.center();
    (f64::from(cursor.x) - cx).hypot(f64::from(cursor.y) - cy)
}

/// The token nearest to `cursor`, or `None` for an empty list.
///
/// A token whose box encloses the cursor always wins over tokens whose
/// centers are closer. Ties keep the earliest token in `tokens`.
///
/// ```
/// use screen_translate::geometry::Point;
/// use screen_translate::ocr::Token;
/// use screen_translate::pipeline::locate;
///
/// let tokens = vec![
///     Token::new("far", 0, 0, 10, 10, 90.0),
///     Token::new("near", 40, 0, 10, 10, 90.0),
/// ];
/// assert_eq!(locate(&tokens, Point::new(38, 5)).unwrap().text, "near");
/// assert!(locate(&[], Point::new(0, 0)).is_none());
/// ```
pub fn locate(tokens: &[Token], cursor: Point) -> Option<&Token> {
    let mut best: Option<(&Token, f64)> = None;

    for token in tokens {
        let distance = cursor_distance(token, cursor);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((token, distance)),
        }
    }

    best.map(|(token, _)| token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(text: &str, x: i32, y: i32, w: i32, h: i32) -> Token {
        Token::new(text, x, y, w, h, 90.0)
    }

    #[test]
    fn empty_list_is_none() {
        assert!(locate(&[], Point::new(10, 10)).is_none());
    }

    #[test]
    fn single_token_is_always_selected() {
        let tokens = vec![tok("only", 500, 500, 20, 10)];
        assert_eq!(locate(&tokens, Point::new(0, 0)).unwrap().text, "only");
    }

    #[test]
    fn nearest_center_wins() {
        let tokens = vec![tok("left", 0, 0, 10, 10), tok("right", 100, 0, 10, 10)];
        assert_eq!(locate(&tokens, Point::new(80, 5)).unwrap().text, "right");
        assert_eq!(locate(&tokens, Point::new(20, 5)).unwrap().text, "left");
    }

    #[test]
    fn enclosing_token_beats_closer_center() {
        // A long word whose center is far from the cursor, and a tiny word
        // whose center is only a few pixels away but does not contain it.
        let tokens = vec![
            tok("tiny", 104, 12, 4, 4),
            tok("extraordinarily", 0, 0, 100, 20),
        ];
        let cursor = Point::new(99, 10);
        assert_eq!(locate(&tokens, cursor).unwrap().text, "extraordinarily");
    }

    #[test]
    fn box_edges_count_as_inside() {
        let tokens = vec![tok("near", 21, 0, 2, 2), tok("edge", 0, 0, 20, 10)];
        assert_eq!(locate(&tokens, Point::new(20, 10)).unwrap().text, "edge");
    }

    #[test]
    fn equidistant_tokens_keep_input_order() {
        let tokens = vec![tok("first", 0, 0, 10, 10), tok("second", 20, 0, 10, 10)];
        // Centers at (5,5) and (25,5); cursor at (15,5) is 10px from both.
        assert_eq!(locate(&tokens, Point::new(15, 5)).unwrap().text, "first");

        let reversed = vec![tokens[1].clone(), tokens[0].clone()];
        assert_eq!(locate(&reversed, Point::new(15, 5)).unwrap().text, "second");
    }

    #[test]
    fn overlapping_enclosing_tokens_keep_first() {
        let tokens = vec![tok("outer", 0, 0, 50, 50), tok("inner", 10, 10, 10, 10)];
        assert_eq!(locate(&tokens, Point::new(15, 15)).unwrap().text, "outer");
    }
}
