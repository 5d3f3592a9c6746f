//! Column-aligned, word-wrapped usage text.

/// Width used when the caller has no terminal to measure.
pub const DEFAULT_WIDTH: usize = 80;

/// Narrowest width the layout will honour.
pub const MIN_WIDTH: usize = 15;

/// Help column used when the aligned column leaves too little room.
const NARROW_COLUMN: usize = 5;

/// Minimum room for help text to the right of the syntax column.
const MIN_HELP_WIDTH: usize = 10;

/// Resolve a probed width, falling back to [`DEFAULT_WIDTH`].
pub fn usage_width(probed: Option<usize>) -> usize {
    probed.filter(|w| *w > 0).unwrap_or(DEFAULT_WIDTH)
}

/// Lay out `(syntax, help)` pairs in two columns.
pub(crate) fn format_entries(entries: &[(String, String)], width: usize) -> String {
    let width = width.max(MIN_WIDTH);
    let longest = entries
        .iter()
        .map(|(syntax, _)| syntax.chars().count())
        .max()
        .unwrap_or(0);

    let mut column = longest + 2;
    if width < column + MIN_HELP_WIDTH {
        column = NARROW_COLUMN;
    }

    let mut out = String::new();
    for (syntax, help) in entries {
        out.push_str(syntax);
        let mut current = syntax.chars().count();
        if current >= column {
            out.push('\n');
            current = 0;
        }
        out.extend(std::iter::repeat(' ').take(column - current));
        write_wrapped_text(&mut out, help, column, width - column);
    }
    out
}

/// Append `text` wrapped to `line_length` characters per line, indenting
/// continuation lines by `indent`. Always ends with a newline.
fn write_wrapped_text(out: &mut String, text: &str, indent: usize, line_length: usize) {
    let mut help: Vec<char> = text.trim_start_matches(' ').chars().collect();
    while help.len() > line_length {
        let break_at = match help[..=line_length].iter().rposition(|c| *c == ' ') {
            Some(pos) if pos > 0 => pos,
            // Single word longer than the line: keep it whole.
            _ => match help.iter().position(|c| *c == ' ') {
                Some(pos) => pos,
                None => break,
            },
        };
        out.extend(&help[..break_at]);
        out.push('\n');
        out.extend(std::iter::repeat(' ').take(indent));

        let rest = help[break_at..]
            .iter()
            .skip_while(|c| **c == ' ')
            .copied()
            .collect();
        help = rest;
    }
    out.extend(&help);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(syntax: &str, help: &str) -> (String, String) {
        (syntax.to_string(), help.to_string())
    }

    fn help_column(line: &str) -> usize {
        let syntax_end = line.find(' ').unwrap();
        syntax_end + line[syntax_end..].chars().take_while(|c| *c == ' ').count()
    }

    // ── Group 1: column choice ──────────────────────────────────

    #[test]
    fn help_column_is_longest_syntax_plus_two() {
        let entries = vec![
            entry("/abcdefghij:<string>", "Twenty chars of syntax."),
            entry("/x[+|-]", "Short."),
        ];
        let text = format_entries(&entries, 80);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(help_column(lines[0]), 22);
        assert_eq!(help_column(lines[1]), 22);
        assert_eq!(&lines[1][22..], "Short.");
    }

    #[test]
    fn narrow_width_falls_back_to_column_five() {
        let entries = vec![entry("/abcdefghij:<string>", "Word")];
        let text = format_entries(&entries, 20);
        assert_eq!(text, "/abcdefghij:<string>\n     Word\n");
    }

    #[test]
    fn width_is_floored() {
        let entries = vec![entry("/a", "one two three")];
        assert_eq!(format_entries(&entries, 3), format_entries(&entries, MIN_WIDTH));
    }

    #[test]
    fn usage_width_defaults_to_eighty() {
        assert_eq!(usage_width(None), 80);
        assert_eq!(usage_width(Some(0)), 80);
        assert_eq!(usage_width(Some(132)), 132);
    }

    // ── Group 2: wrapping ───────────────────────────────────────

    #[test]
    fn wraps_at_last_space_and_reindents() {
        let mut out = String::new();
        write_wrapped_text(&mut out, "aaa bbb ccc ddd", 4, 8);
        assert_eq!(out, "aaa bbb\n    ccc ddd\n");
    }

    #[test]
    fn overlong_word_is_kept_whole() {
        let mut out = String::new();
        write_wrapped_text(&mut out, "abcdefghijkl mn", 2, 5);
        assert_eq!(out, "abcdefghijkl\n  mn\n");
    }

    #[test]
    fn leading_spaces_do_not_push_help_down() {
        let entries = vec![entry("/a", " abcdefghijklmnopqrstuvwxyz")];
        let text = format_entries(&entries, 15);
        assert_eq!(text, "/a  abcdefghijklmnopqrstuvwxyz\n");
    }

    #[test]
    fn empty_help_still_ends_line() {
        let entries = vec![entry("<Files>", ""), entry("/b", "x")];
        let text = format_entries(&entries, 80);
        assert_eq!(text, "<Files>  \n/b       x\n");
    }

    #[test]
    fn every_line_fits_when_words_do() {
        let help = "Read response file for more options and then some more words to wrap";
        let entries = vec![entry("@<file>", help)];
        let text = format_entries(&entries, 30);
        for line in text.lines() {
            assert!(line.chars().count() <= 30, "line too long: {:?}", line);
        }
        let joined: Vec<&str> = text.split_whitespace().skip(1).collect();
        assert_eq!(joined.join(" "), help);
    }
}
