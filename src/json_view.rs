/// Styled rendering of decoded argument values for the terminal.
///
/// Pretty mode walks the value and emits one [`Line`] per printed line with
/// keys, strings, numbers and literals in separate muted colors. Compact mode
/// produces a single line for table cells.
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use serde_json::Value;

const KEY: Color = Color::Rgb(180, 220, 230);
const STRING: Color = Color::Rgb(210, 230, 180);
const NUMBER: Color = Color::Rgb(230, 220, 180);
const LITERAL: Color = Color::Rgb(220, 210, 240);
const PUNCT: Color = Color::Rgb(240, 240, 230);

const INDENT: &str = "  ";

struct Printer {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
}

impl Printer {
    fn push(&mut self, text: impl Into<String>, color: Color) {
        self.current.push(Span::styled(text.into(), Style::default().fg(color)));
    }

    fn newline(&mut self, depth: usize) {
        let spans = std::mem::take(&mut self.current);
        self.lines.push(Line::from(spans));
        if depth > 0 {
            self.current.push(Span::raw(INDENT.repeat(depth)));
        }
    }

    fn scalar(&mut self, v: &Value) {
        match v {
            Value::String(s) => self.push(format!("{s:?}"), STRING),
            Value::Number(n) => self.push(n.to_string(), NUMBER),
            Value::Bool(b) => self.push(b.to_string(), LITERAL),
            Value::Null => self.push("null", LITERAL),
            Value::Array(_) | Value::Object(_) => unreachable!("containers are printed by value()"),
        }
    }

    fn value(&mut self, v: &Value, depth: usize) {
        match v {
            Value::Array(items) if items.is_empty() => self.push("[]", PUNCT),
            Value::Object(map) if map.is_empty() => self.push("{}", PUNCT),
            Value::Array(items) => {
                self.push("[", PUNCT);
                for (i, item) in items.iter().enumerate() {
                    self.newline(depth + 1);
                    self.value(item, depth + 1);
                    if i + 1 < items.len() {
                        self.push(",", PUNCT);
                    }
                }
                self.newline(depth);
                self.push("]", PUNCT);
            }
            Value::Object(map) => {
                self.push("{", PUNCT);
                for (i, (k, item)) in map.iter().enumerate() {
                    self.newline(depth + 1);
                    self.push(format!("{k:?}"), KEY);
                    self.push(": ", PUNCT);
                    self.value(item, depth + 1);
                    if i + 1 < map.len() {
                        self.push(",", PUNCT);
                    }
                }
                self.newline(depth);
                self.push("}", PUNCT);
            }
            scalar => self.scalar(scalar),
        }
    }
}

/// Multi-line, colored rendering of `v`.
pub fn pretty_lines(v: &Value) -> Vec<Line<'static>> {
    let mut p = Printer {
        lines: Vec::new(),
        current: Vec::new(),
    };
    p.value(v, 0);
    if !p.current.is_empty() {
        p.newline(0);
    }
    p.lines
}

/// Single-line rendering of `v`, cut at `max_chars`.
pub fn compact_line(v: &Value, max_chars: usize) -> Line<'static> {
    let text = v.to_string();
    let shown: String = if text.chars().count() > max_chars {
        let mut s: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        s.push('…');
        s
    } else {
        text
    };
    Line::from(Span::styled(shown, Style::default().fg(STRING)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn scalars_are_one_line() {
        assert_eq!(plain(&pretty_lines(&json!(42))), vec!["42"]);
        assert_eq!(plain(&pretty_lines(&json!("hi"))), vec!["\"hi\""]);
    }

    #[test]
    fn objects_are_indented() {
        let lines = pretty_lines(&json!({"dest": "5Grw", "value": [1, 2]}));
        assert_eq!(
            plain(&lines),
            vec!["{", "  \"dest\": \"5Grw\",", "  \"value\": [", "    1,", "    2", "  ]", "}"]
        );
    }

    #[test]
    fn keys_and_values_are_colored_differently() {
        let lines = pretty_lines(&json!({"k": "v"}));
        let styles: Vec<_> = lines[1].spans.iter().map(|s| s.style.fg).collect();
        assert!(styles.contains(&Some(KEY)));
        assert!(styles.contains(&Some(STRING)));
    }

    #[test]
    fn compact_is_truncated() {
        let line = compact_line(&json!({"a": "bcdefghij"}), 8);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text.chars().count(), 8);
        assert!(text.ends_with('…'));
    }
}
