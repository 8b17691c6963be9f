use std::{iter::FusedIterator, ops::Range, rc::Rc};

use tracing::{debug, trace, warn};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::tokens::{lookup_ident, Token, TokenKind};

/// Cursor over an immutable source buffer.
///
/// `ch` is the byte under examination; `None` is the end-of-input sentinel,
/// so an interior NUL byte is an ordinary (illegal) character.
#[derive(Clone)]
pub struct Lexer {
    source: Vec<u8>,
    pos: usize,
    read_pos: usize,
    ch: Option<u8>,
    token_start: usize,
    token_end: usize,
    finished: bool,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: impl Into<Vec<u8>>, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        let mut lexer = Lexer {
            source: source.into(),
            pos: 0,
            read_pos: 0,
            ch: None,
            token_start: 0,
            token_end: 0,
            finished: false,
            file: file_name,
        };
        lexer.read_char();
        lexer
    }

    /// Consumes one byte. Once the sentinel is reached this is a no-op.
    pub fn read_char(&mut self) {
        self.ch = self.source.get(self.read_pos).copied();
        self.pos = self.read_pos;
        if self.ch.is_some() {
            self.read_pos += 1;
        }
    }

    /// Looks at the byte after the current one without consuming it.
    pub fn peek_char(&self) -> Option<u8> {
        self.source.get(self.read_pos).copied()
    }

    pub fn at_eof(&self) -> bool {
        self.ch.is_none()
    }

    /// Byte offset where the most recently produced token starts.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Byte range of the most recently produced token.
    pub fn token_span(&self) -> Range<usize> {
        self.token_start..self.token_end
    }

    /// Exact source bytes of the most recently produced token.
    ///
    /// Same as the token's literal except for illegal bytes above ASCII,
    /// whose literal is `U+FFFD`.
    pub fn token_bytes(&self) -> &[u8] {
        &self.source[self.token_span()]
    }

    pub fn position(&self) -> Position {
        Position(self.token_start, Rc::clone(&self.file))
    }

    pub fn file(&self) -> &Rc<String> {
        &self.file
    }

    pub fn next_token(&mut self) -> Token {
        let token = self.scan_token();
        self.token_end = self.pos;
        trace!(kind = %token.kind, literal = %token.literal, offset = self.token_start, "token");
        token
    }

    fn scan_token(&mut self) -> Token {
        self.skip_whitespace();
        self.token_start = self.pos;

        let Some(ch) = self.ch else {
            return MK_TOKEN!(TokenKind::EOF, "");
        };

        // Identifier and number scans leave the cursor on the first byte
        // past the token, so neither takes the trailing advance below.
        if is_letter(ch) {
            let start = self.read_identifier();
            let literal = self.literal(start..self.pos);
            return MK_TOKEN!(lookup_ident(&literal), literal);
        }
        if is_digit(ch) {
            let start = self.read_number();
            return MK_TOKEN!(TokenKind::Number, self.literal(start..self.pos));
        }

        let token = match ch {
            b'=' => self.one_or_two(b'=', TokenKind::Equals, TokenKind::Assignment),
            b'!' => self.one_or_two(b'=', TokenKind::NotEquals, TokenKind::Not),
            b'<' => self.one_or_two(b'=', TokenKind::LessEquals, TokenKind::Less),
            b'>' => self.one_or_two(b'=', TokenKind::GreaterEquals, TokenKind::Greater),
            b';' => MK_TOKEN!(TokenKind::Semicolon, self.current()),
            b'(' => MK_TOKEN!(TokenKind::OpenParen, self.current()),
            b')' => MK_TOKEN!(TokenKind::CloseParen, self.current()),
            b',' => MK_TOKEN!(TokenKind::Comma, self.current()),
            b'+' => MK_TOKEN!(TokenKind::Plus, self.current()),
            b'{' => MK_TOKEN!(TokenKind::OpenCurly, self.current()),
            b'}' => MK_TOKEN!(TokenKind::CloseCurly, self.current()),
            b'/' => MK_TOKEN!(TokenKind::Slash, self.current()),
            b'*' => MK_TOKEN!(TokenKind::Star, self.current()),
            b'-' => MK_TOKEN!(TokenKind::Dash, self.current()),
            // one token per byte, even inside a multi-byte UTF-8 sequence
            _ => MK_TOKEN!(TokenKind::Illegal, self.current()),
        };

        self.read_char();
        token
    }

    /// Builds `double` when the next byte is `second`, consuming it, and
    /// `single` otherwise. The caller still owes the final advance.
    fn one_or_two(&mut self, second: u8, double: TokenKind, single: TokenKind) -> Token {
        if self.peek_char() == Some(second) {
            let start = self.pos;
            self.read_char();
            MK_TOKEN!(double, self.literal(start..self.pos + 1))
        } else {
            MK_TOKEN!(single, self.current())
        }
    }

    /// The byte under examination as a literal.
    fn current(&self) -> String {
        self.literal(self.pos..self.pos + 1)
    }

    /// Bytes that are not UTF-8 on their own come out as `U+FFFD`.
    fn literal(&self, range: Range<usize>) -> String {
        String::from_utf8_lossy(&self.source[range]).into_owned()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.read_char();
        }
    }

    // Digits are not allowed anywhere in an identifier: `ab1` is `ab`, `1`.
    fn read_identifier(&mut self) -> usize {
        let start = self.pos;
        while self.ch.is_some_and(is_letter) {
            self.read_char();
        }

        start
    }

    fn read_number(&mut self) -> usize {
        let start = self.pos;
        while self.ch.is_some_and(is_digit) {
            self.read_char();
        }

        start
    }
}

/// Yields every token up to and including the first end-of-input token.
impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if token.is_eof() {
            self.finished = true;
        }

        Some(token)
    }
}

impl FusedIterator for Lexer {}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

/// Tokenizes the whole source, failing at the first illegal character.
///
/// The returned tokens always end with a single `EOF` token.
pub fn tokenize(source: impl Into<Vec<u8>>, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();

        if token.kind == TokenKind::Illegal {
            warn!(literal = %token.literal, offset = lex.token_start(), file = %lex.file(), "illegal character");
            return Err(Error::new(
                ErrorImpl::IllegalCharacter {
                    token: token.literal,
                },
                lex.position(),
            ));
        }

        let done = token.is_eof();
        tokens.push(token);

        if done {
            break;
        }
    }

    debug!(count = tokens.len(), file = %lex.file(), "tokenized");
    Ok(tokens)
}

/// Tokenizes the whole source, keeping illegal tokens in the output.
pub fn tokenize_lossy(source: impl Into<Vec<u8>>) -> Vec<Token> {
    Lexer::new(source, None).collect()
}
