// src/layout/wrap.rs
use super::font::StandardFont;
use super::shaping::TextShaper;

/// Greedy line fill. Each `\n` starts a new paragraph; a blank paragraph
/// becomes an empty line. A word wider than `max_width` sits alone on its line.
pub fn wrap_text(
    text: &str,
    shaper: &TextShaper,
    font: StandardFont,
    size: f64,
    max_width: f64,
) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }

            let candidate = format!("{} {}", current, word);
            if shaper.width(&candidate, font, size) > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            } else {
                current = candidate;
            }
        }

        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONT: StandardFont = StandardFont::Helvetica;

    fn wrap(text: &str, size: f64, max_width: f64) -> Vec<String> {
        wrap_text(text, &TextShaper::default(), FONT, size, max_width)
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(wrap("", 11.0, 495.0).is_empty());
    }

    #[test]
    fn test_short_text_is_one_line() {
        assert_eq!(
            wrap("Technical: Java, SQL", 11.0, 495.0),
            vec!["Technical: Java, SQL"]
        );
    }

    #[test]
    fn test_lines_fit_width() {
        let text = "Motivated developer with strong foundational skills seeking to contribute \
                    to innovative projects while continuously learning and growing in a \
                    dynamic environment.";
        let lines = wrap(text, 11.0, 200.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(FONT.text_width(line, 11.0) <= 200.0, "overflow: {line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_long_word_sits_alone() {
        let word = "x".repeat(200);
        let text = format!("a {} b", word);
        let lines = wrap(&text, 11.0, 100.0);
        assert_eq!(lines, vec!["a".to_string(), word, "b".to_string()]);
    }

    #[test]
    fn test_newlines_start_paragraphs() {
        let lines = wrap("Technical: Java\n\nSoft Skills: Teamwork", 11.0, 495.0);
        assert_eq!(lines, vec!["Technical: Java", "", "Soft Skills: Teamwork"]);
    }

    #[test]
    fn test_wrapping_is_idempotent() {
        let text = "Built a full stack application for tracking campus events with \
                    notifications, calendar sync and an admin dashboard for organisers.";
        let once = wrap(text, 11.0, 180.0);
        let twice = wrap(&once.join("\n"), 11.0, 180.0);
        assert_eq!(once, twice);
    }
}
