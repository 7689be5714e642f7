//! Glob pattern matching over property names and slash-delimited paths.
//!
//! Patterns are compiled once into a small token program and matched with
//! backtracking. Matching is case-insensitive, `/` and `\` both count as
//! segment separators, and:
//!
//! - `**` matches zero or more characters, separators included
//! - `*` matches zero or more characters within one segment
//! - `?` matches exactly one non-separator character
//!
//! A pattern that begins with a separator anchors at the start of the
//! candidate; any other pattern may match a suffix of the candidate aligned
//! to a segment boundary.

/// Returns `true` if the pattern contains any glob wildcard characters.
///
/// Patterns without wildcards are treated by the filters as plain
/// case-insensitive literals and never compiled.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?'])
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// One step of a compiled pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    /// A literal character (stored lowercased).
    Literal(char),
    /// `?`: exactly one non-separator character.
    AnyChar,
    /// `*`: zero or more non-separator characters.
    AnySegment,
    /// `**`: zero or more characters, separators included.
    AnySegments,
}

/// A compiled glob pattern.
#[derive(Clone, Debug)]
pub struct GlobMatcher {
    tokens: Vec<Token>,
    anchored: bool,
}

impl GlobMatcher {
    /// Compile a pattern, or return `None` for an empty pattern.
    ///
    /// An empty pattern is inert rather than an error: it contributes
    /// nothing to a filter.
    pub fn compile(pattern: &str) -> Option<Self> {
        if pattern.is_empty() {
            return None;
        }

        let anchored = pattern.chars().next().is_some_and(is_separator);
        let mut tokens = Vec::with_capacity(pattern.len());
        let mut chars = pattern.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '*' => {
                    if chars.peek() == Some(&'*') {
                        chars.next();
                        tokens.push(Token::AnySegments);
                    } else {
                        tokens.push(Token::AnySegment);
                    }
                }
                '?' => tokens.push(Token::AnyChar),
                _ => tokens.extend(c.to_lowercase().map(Token::Literal)),
            }
        }

        Some(Self { tokens, anchored })
    }

    /// Match a candidate name or path against this pattern.
    pub fn is_match(&self, candidate: &str) -> bool {
        let chars: Vec<char> = candidate.to_lowercase().chars().collect();
        if self.anchored {
            return match_from(&self.tokens, &chars);
        }

        // Unanchored patterns match a suffix starting at the beginning of
        // the candidate or immediately after any separator.
        (0..=chars.len()).any(|start| {
            (start == 0 || is_separator(chars[start - 1])) && match_from(&self.tokens, &chars[start..])
        })
    }
}

fn match_from(tokens: &[Token], chars: &[char]) -> bool {
    let Some((token, rest)) = tokens.split_first() else {
        return chars.is_empty();
    };
    match token {
        Token::Literal(expected) => {
            chars.first() == Some(expected) && match_from(rest, &chars[1..])
        }
        Token::AnyChar => match chars.first() {
            Some(c) if !is_separator(*c) => match_from(rest, &chars[1..]),
            _ => false,
        },
        Token::AnySegment => {
            match_from(rest, chars)
                || (matches!(chars.first(), Some(c) if !is_separator(*c))
                    && match_from(tokens, &chars[1..]))
        }
        Token::AnySegments => {
            match_from(rest, chars) || (!chars.is_empty() && match_from(tokens, &chars[1..]))
        }
    }
}
