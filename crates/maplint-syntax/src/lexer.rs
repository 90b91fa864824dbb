//! TypeScript lexer - tokenizes source text
//!
//! Keywords are lexed as identifiers; TypeScript has too many contextual
//! keywords for the lexer to decide. Template literals with substitutions
//! are split into head/middle/tail tokens so the parser sees the embedded
//! expressions as ordinary tokens.

use crate::error::ParseError;
use crate::span::Span;
use crate::token::{Token, TokenKind, EXPRESSION_KEYWORDS};

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    newline_before: bool,
    /// One entry per open `{`; `true` marks a template substitution
    brace_stack: Vec<bool>,
    last: Option<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            newline_before: false,
            brace_stack: Vec::new(),
            last: None,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.position..].chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start as u32, self.position as u32)
    }

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        // Hashbang line
        if self.position == 0 && self.input.starts_with("#!") {
            self.skip_line_comment();
        }

        while let Some(ch) = self.peek() {
            match ch {
                '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                    self.newline_before = true;
                    self.advance();
                }
                '/' if self.peek_nth(1) == Some('/') => self.skip_line_comment(),
                '/' if self.peek_nth(1) == Some('*') => self.skip_block_comment()?,
                c if c.is_whitespace() || c == '\u{feff}' => {
                    self.advance();
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), ParseError> {
        let start = self.position;
        self.advance();
        self.advance();

        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return Ok(());
                }
                Some('\n') | Some('\r') | Some('\u{2028}') | Some('\u{2029}') => {
                    self.newline_before = true;
                }
                Some(_) => {}
                None => {
                    return Err(ParseError::Unterminated {
                        what: "block comment",
                        span: self.span_from(start),
                    })
                }
            }
        }
    }

    fn regex_allowed(&self) -> bool {
        match self.last {
            None => true,
            Some(token) if token.kind == TokenKind::Identifier => {
                EXPRESSION_KEYWORDS.contains(&token.text(self.input))
            }
            Some(token) => !token.kind.ends_operand(),
        }
    }

    fn read_identifier_rest(&mut self) -> Result<(), ParseError> {
        while let Some(ch) = self.peek() {
            if is_identifier_part(ch) {
                self.advance();
            } else if ch == '\\' {
                let start = self.position;
                self.advance();
                self.read_unicode_escape(start)?;
            } else {
                break;
            }
        }
        Ok(())
    }

    /// `\uXXXX` or `\u{X…}` after the backslash at `start`
    fn read_unicode_escape(&mut self, start: usize) -> Result<(), ParseError> {
        let mut valid = self.eat('u');
        if valid && self.eat('{') {
            let mut digits = 0;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
                digits += 1;
            }
            valid = digits > 0 && self.eat('}');
        } else if valid {
            for _ in 0..4 {
                if !self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                    valid = false;
                    break;
                }
                self.advance();
            }
        }

        if valid {
            Ok(())
        } else {
            Err(ParseError::InvalidEscape {
                span: self.span_from(start),
            })
        }
    }

    fn read_string(&mut self, quote: char, start: usize) -> Result<TokenKind, ParseError> {
        // Opening quote was already consumed by next_token()
        loop {
            match self.advance() {
                Some(ch) if ch == quote => return Ok(TokenKind::String),
                Some('\\') => {
                    // Escaped character, including line continuations
                    if self.advance() == Some('\r') {
                        self.eat('\n');
                    }
                }
                Some('\n') | Some('\r') | None => {
                    return Err(ParseError::Unterminated {
                        what: "string literal",
                        span: self.span_from(start),
                    })
                }
                Some(_) => {}
            }
        }
    }

    /// Reads template characters up to the closing backtick or the next `${`
    fn read_template(&mut self, start: usize, is_head: bool) -> Result<TokenKind, ParseError> {
        loop {
            match self.advance() {
                Some('`') => {
                    return Ok(if is_head {
                        TokenKind::Template
                    } else {
                        TokenKind::TemplateTail
                    })
                }
                Some('\\') => {
                    self.advance();
                }
                Some('$') if self.peek() == Some('{') => {
                    self.advance();
                    self.brace_stack.push(true);
                    return Ok(if is_head {
                        TokenKind::TemplateHead
                    } else {
                        TokenKind::TemplateMiddle
                    });
                }
                Some(_) => {}
                None => {
                    return Err(ParseError::Unterminated {
                        what: "template literal",
                        span: self.span_from(start),
                    })
                }
            }
        }
    }

    fn read_regex(&mut self, start: usize) -> Result<TokenKind, ParseError> {
        let mut in_class = false;
        loop {
            match self.advance() {
                Some('\\') => {
                    self.advance();
                }
                Some('[') => in_class = true,
                Some(']') => in_class = false,
                Some('/') if !in_class => break,
                Some('\n') | Some('\r') | None => {
                    return Err(ParseError::Unterminated {
                        what: "regular expression",
                        span: self.span_from(start),
                    })
                }
                Some(_) => {}
            }
        }
        // Flags
        self.read_identifier_rest();
        Ok(TokenKind::Regex)
    }

    fn read_number(&mut self, first: char, start: usize) -> Result<TokenKind, ParseError> {
        if first == '0' {
            if let Some('x' | 'X' | 'o' | 'O' | 'b' | 'B') = self.peek() {
                self.advance();
                let mut digits = 0;
                while let Some(ch) = self.peek() {
                    if ch.is_ascii_hexdigit() || ch == '_' {
                        self.advance();
                        digits += 1;
                    } else {
                        break;
                    }
                }
                if digits == 0 {
                    return Err(ParseError::MalformedNumber {
                        what: "radix literal",
                        span: self.span_from(start),
                    });
                }
                return Ok(if self.eat('n') {
                    TokenKind::BigInt
                } else {
                    TokenKind::Number
                });
            }
        }

        let mut seen_dot = first == '.';
        let mut seen_exponent = false;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || ch == '_' {
                self.advance();
            } else if ch == '.' && !seen_dot && !seen_exponent {
                seen_dot = true;
                self.advance();
            } else if (ch == 'e' || ch == 'E') && !seen_exponent {
                seen_exponent = true;
                self.advance();
                if let Some('+' | '-') = self.peek() {
                    self.advance();
                }
                if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    return Err(ParseError::MalformedNumber {
                        what: "exponent",
                        span: self.span_from(start),
                    });
                }
            } else {
                break;
            }
        }

        Ok(if !seen_dot && !seen_exponent && self.eat('n') {
            TokenKind::BigInt
        } else {
            TokenKind::Number
        })
    }

    fn punctuation(&mut self, ch: char) -> Option<TokenKind> {
        let kind = match ch {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '~' => TokenKind::Tilde,
            '@' => TokenKind::At,
            '.' => {
                if self.peek() == Some('.') && self.peek_nth(1) == Some('.') {
                    self.advance();
                    self.advance();
                    TokenKind::DotDotDot
                } else {
                    TokenKind::Dot
                }
            }
            '?' => {
                if self.peek() == Some('.') && !self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                    TokenKind::QuestionDot
                } else if self.eat('?') {
                    if self.eat('=') {
                        TokenKind::QuestionQuestionEq
                    } else {
                        TokenKind::QuestionQuestion
                    }
                } else {
                    TokenKind::Question
                }
            }
            '=' => {
                if self.eat('=') {
                    if self.eat('=') {
                        TokenKind::EqEqEq
                    } else {
                        TokenKind::EqEq
                    }
                } else if self.eat('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Eq
                }
            }
            '!' => {
                if self.eat('=') {
                    if self.eat('=') {
                        TokenKind::NotEqEq
                    } else {
                        TokenKind::NotEq
                    }
                } else {
                    TokenKind::Bang
                }
            }
            '<' => {
                if self.eat('<') {
                    if self.eat('=') {
                        TokenKind::LtLtEq
                    } else {
                        TokenKind::LtLt
                    }
                } else if self.eat('=') {
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.peek() == Some('>') && self.peek_nth(1) == Some('>') && self.peek_nth(2) == Some('=') {
                    self.advance();
                    self.advance();
                    self.advance();
                    TokenKind::GtGtGtEq
                } else if self.peek() == Some('>') && self.peek_nth(1) == Some('=') {
                    self.advance();
                    self.advance();
                    TokenKind::GtGtEq
                } else if self.eat('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '+' => {
                if self.eat('+') {
                    TokenKind::PlusPlus
                } else if self.eat('=') {
                    TokenKind::PlusEq
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                if self.eat('-') {
                    TokenKind::MinusMinus
                } else if self.eat('=') {
                    TokenKind::MinusEq
                } else {
                    TokenKind::Minus
                }
            }
            '*' => {
                if self.eat('*') {
                    if self.eat('=') {
                        TokenKind::StarStarEq
                    } else {
                        TokenKind::StarStar
                    }
                } else if self.eat('=') {
                    TokenKind::StarEq
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                if self.eat('=') {
                    TokenKind::SlashEq
                } else {
                    TokenKind::Slash
                }
            }
            '%' => {
                if self.eat('=') {
                    TokenKind::PercentEq
                } else {
                    TokenKind::Percent
                }
            }
            '&' => {
                if self.eat('&') {
                    if self.eat('=') {
                        TokenKind::AmpAmpEq
                    } else {
                        TokenKind::AmpAmp
                    }
                } else if self.eat('=') {
                    TokenKind::AmpEq
                } else {
                    TokenKind::Amp
                }
            }
            '|' => {
                if self.eat('|') {
                    if self.eat('=') {
                        TokenKind::PipePipeEq
                    } else {
                        TokenKind::PipePipe
                    }
                } else if self.eat('=') {
                    TokenKind::PipeEq
                } else {
                    TokenKind::Pipe
                }
            }
            '^' => {
                if self.eat('=') {
                    TokenKind::CaretEq
                } else {
                    TokenKind::Caret
                }
            }
            _ => return None,
        };
        Some(kind)
    }

    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        self.newline_before = false;
        self.skip_trivia()?;

        let start = self.position;
        let newline_before = self.newline_before;

        let Some(ch) = self.advance() else {
            return Ok(Token::new(TokenKind::Eof, self.span_from(start), newline_before));
        };

        let kind = match ch {
            '{' => {
                self.brace_stack.push(false);
                TokenKind::LeftBrace
            }
            '}' => {
                if self.brace_stack.pop() == Some(true) {
                    self.read_template(start, false)?
                } else {
                    TokenKind::RightBrace
                }
            }
            '\'' | '"' => self.read_string(ch, start)?,
            '`' => self.read_template(start, true)?,
            '/' if self.regex_allowed() => self.read_regex(start)?,
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => self.read_number('.', start)?,
            '#' if self.peek().is_some_and(is_identifier_start) => {
                self.read_identifier_rest()?;
                TokenKind::PrivateName
            }
            _ if ch.is_ascii_digit() => self.read_number(ch, start)?,
            _ if is_identifier_start(ch) => {
                self.read_identifier_rest()?;
                TokenKind::Identifier
            }
            '\\' => {
                self.read_unicode_escape(start)?;
                self.read_identifier_rest()?;
                TokenKind::Identifier
            }
            _ => match self.punctuation(ch) {
                Some(kind) => kind,
                None => {
                    return Err(ParseError::InvalidCharacter {
                        ch,
                        span: self.span_from(start),
                    })
                }
            },
        };

        let token = Token::new(kind, self.span_from(start), newline_before);
        self.last = Some(token);
        Ok(token)
    }

    /// Tokenize the whole input. On a lexical error the tokens read so far
    /// are returned, terminated by `Eof`, together with the error.
    pub fn tokenize(&mut self) -> (Vec<Token>, Option<ParseError>) {
        let mut tokens = Vec::new();
        loop {
            match self.next_token() {
                Ok(token) => {
                    let is_eof = token.kind == TokenKind::Eof;
                    tokens.push(token);
                    if is_eof {
                        return (tokens, None);
                    }
                }
                Err(error) => {
                    let end = self.input.len() as u32;
                    tokens.push(Token::new(TokenKind::Eof, Span::new(end, end), true));
                    return (tokens, Some(error));
                }
            }
        }
    }
}

pub fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

pub fn is_identifier_part(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$' || ch == '\u{200c}' || ch == '\u{200d}'
}

/// Cook the body of a string literal (without quotes)
pub fn unescape(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('b') => result.push('\u{8}'),
            Some('f') => result.push('\u{c}'),
            Some('v') => result.push('\u{b}'),
            Some('0') => result.push('\0'),
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                if let Some(c) = u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    result.push(c);
                }
            }
            Some('u') => {
                let hex: String = if chars.peek() == Some(&'{') {
                    chars.next();
                    chars.by_ref().take_while(|c| *c != '}').collect()
                } else {
                    chars.by_ref().take(4).collect()
                };
                if let Some(c) = u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    result.push(c);
                }
            }
            // Line continuation
            Some('\r') => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            Some('\n') | Some('\u{2028}') | Some('\u{2029}') => {}
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let (tokens, error) = lexer.tokenize();
        assert!(error.is_none(), "unexpected error: {:?}", error);
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_tokens() {
        assert_eq!(
            kinds("m[\"foo\"] = 1;"),
            vec![
                TokenKind::Identifier,
                TokenKind::LeftBracket,
                TokenKind::String,
                TokenKind::RightBracket,
                TokenKind::Eq,
                TokenKind::Number,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_generic_closers_are_single() {
        assert_eq!(
            kinds("Map<string, Array<number>>"),
            vec![
                TokenKind::Identifier,
                TokenKind::Lt,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::Lt,
                TokenKind::Identifier,
                TokenKind::Gt,
                TokenKind::Gt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_optional_chain_vs_conditional_number() {
        assert_eq!(
            kinds("a?.b"),
            vec![TokenKind::Identifier, TokenKind::QuestionDot, TokenKind::Identifier, TokenKind::Eof]
        );
        assert_eq!(
            kinds("a?.5:1"),
            vec![
                TokenKind::Identifier,
                TokenKind::Question,
                TokenKind::Number,
                TokenKind::Colon,
                TokenKind::Number,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_template_with_substitution() {
        assert_eq!(
            kinds("`a${m[k]}b${x}c`"),
            vec![
                TokenKind::TemplateHead,
                TokenKind::Identifier,
                TokenKind::LeftBracket,
                TokenKind::Identifier,
                TokenKind::RightBracket,
                TokenKind::TemplateMiddle,
                TokenKind::Identifier,
                TokenKind::TemplateTail,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_template_with_object_inside_substitution() {
        assert_eq!(
            kinds("`${ {a: 1}.a }`"),
            vec![
                TokenKind::TemplateHead,
                TokenKind::LeftBrace,
                TokenKind::Identifier,
                TokenKind::Colon,
                TokenKind::Number,
                TokenKind::RightBrace,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::TemplateTail,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_regex_vs_division() {
        assert_eq!(
            kinds("a / b"),
            vec![TokenKind::Identifier, TokenKind::Slash, TokenKind::Identifier, TokenKind::Eof]
        );
        assert_eq!(
            kinds("x = /ab+c/gi"),
            vec![TokenKind::Identifier, TokenKind::Eq, TokenKind::Regex, TokenKind::Eof]
        );
        assert_eq!(
            kinds("return /[/]/"),
            vec![TokenKind::Identifier, TokenKind::Regex, TokenKind::Eof]
        );
    }

    #[test]
    fn test_comments_and_newlines() {
        let mut lexer = Lexer::new("a // line\n/* block\n */ b");
        let (tokens, error) = lexer.tokenize();
        assert!(error.is_none());
        assert_eq!(tokens.len(), 3);
        assert!(!tokens[0].newline_before);
        assert!(tokens[1].newline_before);
        assert_eq!(tokens[1].text("a // line\n/* block\n */ b"), "b");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("0x1F"), vec![TokenKind::Number, TokenKind::Eof]);
        assert_eq!(kinds("1_000.5e-3"), vec![TokenKind::Number, TokenKind::Eof]);
        assert_eq!(kinds("10n"), vec![TokenKind::BigInt, TokenKind::Eof]);
        assert_eq!(kinds(".5"), vec![TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn test_malformed_numbers() {
        for input in ["1e", "1e+", "2.5E-", "0x", "0b;"] {
            let mut lexer = Lexer::new(input);
            let (_, error) = lexer.tokenize();
            assert!(matches!(error, Some(ParseError::MalformedNumber { .. })), "{}", input);
        }
        assert_eq!(kinds("1e3"), vec![TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn test_identifier_escapes() {
        assert_eq!(
            kinds(r"\u0041bc a\u{62}c"),
            vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]
        );

        for input in [r"\u00", r"a\x41", r"\u{}", r"\"] {
            let mut lexer = Lexer::new(input);
            let (_, error) = lexer.tokenize();
            assert!(matches!(error, Some(ParseError::InvalidEscape { .. })), "{}", input);
        }
    }

    #[test]
    fn test_unterminated_string() {
        let mut lexer = Lexer::new("const a = 'abc\n");
        let (tokens, error) = lexer.tokenize();
        assert!(matches!(error, Some(ParseError::Unterminated { what: "string literal", .. })));
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_invalid_character() {
        let mut lexer = Lexer::new("a \u{0001} b");
        let (_, error) = lexer.tokenize();
        assert!(matches!(error, Some(ParseError::InvalidCharacter { .. })));
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"a\nb"), "a\nb");
        assert_eq!(unescape(r"\x41B\u{43}"), "ABC");
        assert_eq!(unescape(r"it\'s"), "it's");
    }
}
