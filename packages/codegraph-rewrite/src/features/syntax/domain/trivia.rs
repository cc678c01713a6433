//! Trivia: whitespace and comments attached to tokens

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriviaKind {
    Whitespace,
    EndOfLine,
    LineComment,
    BlockComment,
    /// Source text between tokens that is neither whitespace nor a comment
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub text: String,
}

impl Trivia {
    pub fn new(kind: TriviaKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn whitespace(text: impl Into<String>) -> Self {
        Self::new(TriviaKind::Whitespace, text)
    }

    pub fn end_of_line(text: impl Into<String>) -> Self {
        Self::new(TriviaKind::EndOfLine, text)
    }

    pub fn comment(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = if text.starts_with("//") {
            TriviaKind::LineComment
        } else {
            TriviaKind::BlockComment
        };
        Self::new(kind, text)
    }

    pub fn is_end_of_line(&self) -> bool {
        self.kind == TriviaKind::EndOfLine
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TriviaKind::LineComment | TriviaKind::BlockComment)
    }
}

/// Split inter-token text into whitespace / end-of-line / skipped pieces
pub fn split_gap(text: &str) -> Vec<Trivia> {
    let mut pieces: Vec<Trivia> = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("\r\n") {
            pieces.push(Trivia::end_of_line("\r\n"));
            rest = after;
            continue;
        }
        if let Some(after) = rest.strip_prefix('\n') {
            pieces.push(Trivia::end_of_line("\n"));
            rest = after;
            continue;
        }
        let is_space = |c: char| c.is_whitespace() && c != '\n' && c != '\r';
        let run_len: usize = rest
            .chars()
            .take_while(|c| is_space(*c))
            .map(char::len_utf8)
            .sum();
        if run_len > 0 {
            pieces.push(Trivia::whitespace(&rest[..run_len]));
            rest = &rest[run_len..];
            continue;
        }
        let other_len: usize = rest
            .chars()
            .take_while(|c| !c.is_whitespace())
            .map(char::len_utf8)
            .sum();
        // A lone '\r' is neither a space nor a line break on its own
        let other_len = other_len.max(rest.chars().next().map_or(1, char::len_utf8));
        pieces.push(Trivia::new(TriviaKind::Skipped, &rest[..other_len]));
        rest = &rest[other_len..];
    }
    pieces
}

/// Distribute the trivia between two tokens: everything up to and including
/// the first end-of-line trails the left token, the rest leads the right one.
pub fn distribute(mut pending: Vec<Trivia>) -> (Vec<Trivia>, Vec<Trivia>) {
    match pending.iter().position(Trivia::is_end_of_line) {
        Some(idx) => {
            let leading = pending.split_off(idx + 1);
            (pending, leading)
        }
        None => (pending, Vec::new()),
    }
}

pub fn render_trivia(trivia: &[Trivia], out: &mut String) {
    for piece in trivia {
        out.push_str(&piece.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_gap_kinds() {
        let pieces = split_gap("  \r\n\t\n");
        let kinds: Vec<_> = pieces.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TriviaKind::Whitespace,
                TriviaKind::EndOfLine,
                TriviaKind::Whitespace,
                TriviaKind::EndOfLine
            ]
        );
        assert_eq!(pieces[1].text, "\r\n");
    }

    #[test]
    fn test_split_gap_is_lossless() {
        let gap = " \u{feff} junk\r \n";
        let joined: String = split_gap(gap).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, gap);
    }

    #[test]
    fn test_distribute_at_first_newline() {
        let pending = vec![
            Trivia::whitespace(" "),
            Trivia::comment("// tail"),
            Trivia::end_of_line("\n"),
            Trivia::whitespace("    "),
        ];
        let (trailing, leading) = distribute(pending);
        assert_eq!(trailing.len(), 3);
        assert_eq!(leading, vec![Trivia::whitespace("    ")]);
    }

    #[test]
    fn test_distribute_without_newline_all_trailing() {
        let (trailing, leading) = distribute(vec![Trivia::whitespace(" ")]);
        assert_eq!(trailing.len(), 1);
        assert!(leading.is_empty());
    }
}
