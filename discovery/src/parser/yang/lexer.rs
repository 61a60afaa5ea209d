//! Tokenizer for YANG source.

use crate::parser::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Unquoted keyword or argument.
    Word(String),
    /// Single- or double-quoted string, escapes already decoded.
    Quoted(String),
    OpenBrace,
    CloseBrace,
    Semicolon,
    /// `+` between quoted strings.
    Plus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

pub struct YangLexer;

impl YangLexer {
    pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        let mut chars = source.chars().peekable();
        let mut line = 1;

        while let Some(&ch) = chars.peek() {
            match ch {
                '\n' => {
                    line += 1;
                    chars.next();
                }
                c if c.is_whitespace() => {
                    chars.next();
                }
                '{' | '}' | ';' => {
                    chars.next();
                    let kind = match ch {
                        '{' => TokenKind::OpenBrace,
                        '}' => TokenKind::CloseBrace,
                        _ => TokenKind::Semicolon,
                    };
                    tokens.push(Token { kind, line });
                }
                '"' | '\'' => {
                    chars.next();
                    let start = line;
                    let value = if ch == '"' {
                        read_double_quoted(&mut chars, &mut line)?
                    } else {
                        read_single_quoted(&mut chars, &mut line)?
                    };
                    tokens.push(Token {
                        kind: TokenKind::Quoted(value),
                        line: start,
                    });
                }
                '/' if starts_comment(&chars) => skip_comment(&mut chars, &mut line)?,
                _ => {
                    let word = read_word(&mut chars);
                    let kind = if word == "+" {
                        TokenKind::Plus
                    } else {
                        TokenKind::Word(word)
                    };
                    tokens.push(Token { kind, line });
                }
            }
        }

        Ok(tokens)
    }
}

type Chars<'a> = std::iter::Peekable<std::str::Chars<'a>>;

fn starts_comment(chars: &Chars<'_>) -> bool {
    let mut ahead = chars.clone();
    ahead.next();
    matches!(ahead.peek(), Some('/') | Some('*'))
}

fn skip_comment(chars: &mut Chars<'_>, line: &mut usize) -> Result<(), ParseError> {
    let start = *line;
    chars.next();
    match chars.next() {
        Some('/') => {
            for c in chars.by_ref() {
                if c == '\n' {
                    *line += 1;
                    break;
                }
            }
            Ok(())
        }
        _ => {
            let mut prev = '\0';
            for c in chars.by_ref() {
                if c == '\n' {
                    *line += 1;
                }
                if prev == '*' && c == '/' {
                    return Ok(());
                }
                prev = c;
            }
            Err(ParseError::Syntax {
                line: start,
                message: "unterminated block comment".to_string(),
            })
        }
    }
}

fn read_word(chars: &mut Chars<'_>) -> String {
    let mut word = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() || matches!(c, '{' | '}' | ';' | '"' | '\'') {
            break;
        }
        word.push(c);
        chars.next();
    }
    word
}

fn read_single_quoted(chars: &mut Chars<'_>, line: &mut usize) -> Result<String, ParseError> {
    let start = *line;
    let mut value = String::new();
    for c in chars.by_ref() {
        match c {
            '\'' => return Ok(value),
            '\n' => {
                *line += 1;
                value.push(c);
            }
            _ => value.push(c),
        }
    }
    Err(ParseError::Syntax {
        line: start,
        message: "unterminated string".to_string(),
    })
}

/// Reads a double-quoted string body.
///
/// Trailing whitespace before a line break and leading whitespace after it
/// are dropped.
fn read_double_quoted(chars: &mut Chars<'_>, line: &mut usize) -> Result<String, ParseError> {
    let start = *line;
    let mut value = String::new();

    while let Some(c) = chars.next() {
        match c {
            '"' => return Ok(value),
            '\\' => match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some('"') => value.push('"'),
                Some('\\') => value.push('\\'),
                Some(other) => {
                    value.push('\\');
                    value.push(other);
                }
                None => break,
            },
            '\n' => {
                *line += 1;
                let trimmed = value.trim_end_matches([' ', '\t']).len();
                value.truncate(trimmed);
                value.push('\n');
                while let Some(&next) = chars.peek() {
                    if next == ' ' || next == '\t' {
                        chars.next();
                    } else {
                        break;
                    }
                }
            }
            _ => value.push(c),
        }
    }

    Err(ParseError::Syntax {
        line: start,
        message: "unterminated string".to_string(),
    })
}
