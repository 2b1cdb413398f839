use crate::{FontMetrics, FontSpec, Px, RasterError};

/// A wrapped line: words joined by single spaces, plus the width the
/// metrics provider measured for the joined text. Lines are immutable once
/// emitted by the wrapping pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub width: Px,
}

/// Greedily wrap `text` into lines no wider than `max_width`.
///
/// The text is split into words on single spaces (or on any run of
/// whitespace when `collapse_spaces` is set). For each word the prospective
/// line (the line in progress, a space, and the word) is measured; if it
/// fits the budget the word is appended, otherwise the line in progress is
/// emitted and the word starts the next line. A word starting a line is
/// never split or truncated, so a single word wider than `max_width` ends
/// up on a line of its own that overruns the budget.
///
/// Empty input yields no lines. Joining the emitted lines' words back
/// together with single spaces reproduces the input word sequence exactly.
pub fn wrap_words<M: FontMetrics>(
    metrics: &mut M,
    font: &FontSpec,
    max_width: Px,
    text: &str,
    collapse_spaces: bool,
) -> Result<Vec<Line>, RasterError> {
    let mut lines: Vec<Line> = Vec::new();
    if text.is_empty() {
        return Ok(lines);
    }

    let words: Vec<&str> = if collapse_spaces {
        text.split_whitespace().collect()
    } else {
        text.split(' ').collect()
    };

    let mut current = String::new();
    let mut first = true;
    for word in words {
        if first {
            current.push_str(word);
            first = false;
            continue;
        }

        let prospective = format!("{current} {word}");
        if metrics.measure(font, &prospective)?.width() <= max_width {
            current = prospective;
        } else {
            let width = metrics.measure(font, &current)?.width();
            lines.push(Line {
                text: std::mem::take(&mut current),
                width,
            });
            current.push_str(word);
        }
    }

    let width = metrics.measure(font, &current)?.width();
    lines.push(Line {
        text: current,
        width,
    });

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoundingBox;

    /// fixed-pitch fake: every character, spaces included, is 9px wide
    struct Grid;

    impl FontMetrics for Grid {
        fn measure(&mut self, _font: &FontSpec, text: &str) -> Result<BoundingBox, RasterError> {
            Ok(BoundingBox::from_extents(
                0.0,
                -12.0,
                text.chars().count() as f32 * 9.0,
                0.0,
            ))
        }
    }

    fn grid_font() -> FontSpec {
        FontSpec::new("grid.ttf", 9.0, 0)
    }

    fn wrap(max_width: f32, text: &str) -> Vec<Line> {
        wrap_words(&mut Grid, &grid_font(), Px(max_width), text, false).unwrap()
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(wrap(1000.0, "").is_empty());
    }

    #[test]
    fn single_short_word_is_one_line() {
        let lines = wrap(1000.0, "Hi");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Hi");
        assert_eq!(lines[0].width, Px(18.0));
    }

    #[test]
    fn wraps_when_the_prospective_line_overflows() {
        // "alpha" measures 45, "alpha beta" 90: over an 80px budget the
        // second word must start a new line
        let lines = wrap(80.0, "alpha beta gamma");
        assert_eq!(lines[0].text, "alpha");
        assert_eq!(lines[1].text, "beta");
        assert_eq!(lines[2].text, "gamma");
    }

    #[test]
    fn fills_lines_up_to_the_budget() {
        let lines = wrap(95.0, "alpha beta gamma");
        // "alpha beta" is 90 <= 95, adding " gamma" would reach 144
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "alpha beta");
        assert_eq!(lines[0].width, Px(90.0));
        assert_eq!(lines[1].text, "gamma");
    }

    #[test]
    fn emitted_lines_fit_the_budget_or_hold_one_word() {
        let lines = wrap(100.0, "a considerably extraordinarily long sentence of words");
        for line in &lines {
            assert!(
                line.width <= Px(100.0) || !line.text.contains(' '),
                "line {:?} exceeds the budget but holds several words",
                line.text
            );
        }
    }

    #[test]
    fn an_unbreakable_word_gets_its_own_line() {
        let lines = wrap(50.0, "extraordinarily");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "extraordinarily");
        assert!(lines[0].width > Px(50.0));
    }

    #[test]
    fn wrapping_is_order_preserving_and_lossless() {
        let text = "one two three four five six seven eight nine ten";
        for max in [30.0, 60.0, 90.0, 10_000.0] {
            let lines = wrap(max, text);
            let joined = lines
                .iter()
                .map(|line| line.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            assert_eq!(joined, text, "words lost at budget {max}");
        }
    }

    #[test]
    fn runs_of_spaces_survive_the_round_trip() {
        let text = "a  b";
        let lines = wrap(10_000.0, text);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "a  b");
    }

    #[test]
    fn collapsing_spaces_merges_whitespace_runs() {
        let lines = wrap_words(&mut Grid, &grid_font(), Px(10_000.0), "a \t b", true).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "a b");
    }

    #[test]
    fn measures_through_the_provided_font() {
        // the Grid fake ignores the font, but the call path must not;
        // a provider that errors should surface that error
        struct Failing;
        impl FontMetrics for Failing {
            fn measure(
                &mut self,
                _font: &FontSpec,
                _text: &str,
            ) -> Result<BoundingBox, RasterError> {
                Err(RasterError::Draw("boom".into()))
            }
        }
        assert!(wrap_words(&mut Failing, &grid_font(), Px(10.0), "a b", false).is_err());
    }
}
