//! Whole-source tokenizer: a scannerless, hand-written state machine.
//!
//! Rather than a true incremental re-scanning lexer, the entire source is
//! tokenized upfront into a flat `Vec<Token>`; `peek`/`advance`/save-restore
//! become trivial cursor operations over that vector.

use text_size::{TextRange, TextSize};

use crate::error::LexErrorKind;
use crate::token::{Token, TokenFlags, TokenKind};

/// Scans `source` into a flat token stream, including trivia
/// (`LineComment`/`BlockComment`) tokens. The final token is always `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, (LexErrorKind, TextRange)> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    preceded_by_line_break: bool,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            preceded_by_line_break: true,
        }
    }

    fn run(mut self) -> Result<Vec<Token>, (LexErrorKind, TextRange)> {
        let mut tokens = Vec::new();
        loop {
            self.skip_inline_whitespace();
            if self.pos >= self.bytes.len() {
                tokens.push(Token::new(
                    TokenKind::Eof,
                    TextRange::new(self.offset(), self.offset()),
                    TokenFlags::EMPTY,
                ));
                return Ok(tokens);
            }
            let tok = self.scan_one()?;
            tokens.push(tok);
        }
    }

    #[inline]
    fn offset(&self) -> TextSize {
        TextSize::from(self.pos as u32)
    }

    #[inline]
    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn peek_byte_at(&self, k: usize) -> Option<u8> {
        self.bytes.get(self.pos + k).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let rest = &self.source[self.pos..];
        let ch = rest.chars().next()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consumes ASCII space/tab/newline runs between tokens, tracking
    /// whether a line break was crossed (feeds `TokenFlags::PRECEDED_BY_LINE_BREAK`).
    fn skip_inline_whitespace(&mut self) {
        while let Some(b) = self.peek_byte() {
            match b {
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'\n' => {
                    self.pos += 1;
                    self.preceded_by_line_break = true;
                }
                0x0c => self.pos += 1,
                _ => break,
            }
        }
    }

    fn scan_one(&mut self) -> Result<Token, (LexErrorKind, TextRange)> {
        let start = self.offset();
        let mut flags = TokenFlags::EMPTY;
        if self.preceded_by_line_break {
            flags.insert(TokenFlags::PRECEDED_BY_LINE_BREAK);
            self.preceded_by_line_break = false;
        }

        let c = self.peek_byte().expect("checked by caller");

        let kind = match c {
            b'/' if self.peek_byte_at(1) == Some(b'/') => self.scan_line_comment(),
            b'/' if self.peek_byte_at(1) == Some(b'*') => self.scan_block_comment(start)?,
            b'"' if self.peek_byte_at(1) == Some(b'"') && self.peek_byte_at(2) == Some(b'"') => {
                self.scan_text_block(start)?
            }
            b'"' => self.scan_string_literal(start)?,
            b'\'' => self.scan_char_literal(start)?,
            b'0'..=b'9' => self.scan_number(start)?,
            _ if is_identifier_start(c) || c >= 0x80 => {
                self.scan_identifier_or_keyword(&mut flags, start)?
            }
            b'\\' if self.peek_byte_at(1) == Some(b'u') => {
                self.scan_identifier_or_keyword(&mut flags, start)?
            }
            _ => self.scan_punctuator(start)?,
        };

        let end = self.offset();
        Ok(Token::new(kind, TextRange::new(start, end), flags))
    }

    fn scan_line_comment(&mut self) -> TokenKind {
        self.pos += 2;
        while let Some(b) = self.peek_byte() {
            if b == b'\n' {
                break;
            }
            self.pos += 1;
        }
        TokenKind::LineComment
    }

    fn scan_block_comment(&mut self, start: TextSize) -> Result<TokenKind, (LexErrorKind, TextRange)> {
        self.pos += 2;
        loop {
            match self.peek_byte() {
                None => {
                    return Err((
                        LexErrorKind::UnterminatedBlockComment,
                        TextRange::new(start, self.offset()),
                    ))
                }
                Some(b'*') if self.peek_byte_at(1) == Some(b'/') => {
                    self.pos += 2;
                    return Ok(TokenKind::BlockComment);
                }
                // Java explicitly does not nest block comments: a `/*`
                // encountered here is just two ordinary characters.
                _ => self.pos += 1,
            }
        }
    }

    /// Identifiers, reserved keywords, and `true`/`false`/`null`. Also
    /// handles the bounded `\uXXXX` case: an escape is recognized only when
    /// it appears where an identifier character is expected.
    fn scan_identifier_or_keyword(
        &mut self,
        flags: &mut TokenFlags,
        start: TextSize,
    ) -> Result<TokenKind, (LexErrorKind, TextRange)> {
        let mut text = String::new();
        let mut first = true;
        loop {
            if self.peek_byte() == Some(b'\\') && self.peek_byte_at(1) == Some(b'u') {
                if let Some(ch) = self.try_scan_unicode_escape() {
                    flags.insert(TokenFlags::HAS_UNICODE_ESCAPE);
                    let ok = if first {
                        is_java_letter(ch)
                    } else {
                        is_java_letter_or_digit(ch)
                    };
                    if !ok {
                        break;
                    }
                    text.push(ch);
                    first = false;
                    continue;
                }
                break;
            }
            let rest = &self.source[self.pos..];
            let Some(ch) = rest.chars().next() else {
                break;
            };
            let ok = if first {
                is_java_letter(ch)
            } else {
                is_java_letter_or_digit(ch)
            };
            if !ok {
                break;
            }
            text.push(ch);
            self.pos += ch.len_utf8();
            first = false;
        }

        if text.is_empty() {
            // Neither a valid identifier start nor a `\uXXXX` escape: an
            // otherwise-unrecognized byte/char that must still be consumed
            // so the scanner makes forward progress.
            self.bump();
            return Err((
                LexErrorKind::UnexpectedCharacter,
                TextRange::new(start, self.offset()),
            ));
        }

        Ok(keyword_or_identifier(&text))
    }

    /// Attempts to decode a `\uXXXX` escape at the current position without
    /// consuming it if the four hex digits aren't present; returns the
    /// decoded `char` and advances past it on success.
    fn try_scan_unicode_escape(&mut self) -> Option<char> {
        let save = self.pos;
        self.pos += 2; // `\u`
        while self.peek_byte() == Some(b'u') {
            self.pos += 1;
        }
        let hex_start = self.pos;
        for _ in 0..4 {
            match self.peek_byte() {
                Some(b) if b.is_ascii_hexdigit() => self.pos += 1,
                _ => {
                    self.pos = save;
                    return None;
                }
            }
        }
        let hex = &self.source[hex_start..self.pos];
        match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
            Some(ch) => Some(ch),
            None => {
                self.pos = save;
                None
            }
        }
    }

    fn scan_string_literal(&mut self, start: TextSize) -> Result<TokenKind, (LexErrorKind, TextRange)> {
        self.pos += 1;
        loop {
            match self.peek_byte() {
                None | Some(b'\n') => {
                    return Err((
                        LexErrorKind::UnterminatedString,
                        TextRange::new(start, self.offset()),
                    ))
                }
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(TokenKind::StringLiteral);
                }
                Some(b'\\') => self.scan_escape(start)?,
                _ => {
                    self.bump();
                }
            }
        }
    }

    fn scan_char_literal(&mut self, start: TextSize) -> Result<TokenKind, (LexErrorKind, TextRange)> {
        self.pos += 1;
        if self.peek_byte() == Some(b'\'') {
            return Err((
                LexErrorKind::EmptyCharLiteral,
                TextRange::new(start, self.offset() + TextSize::from(1)),
            ));
        }
        match self.peek_byte() {
            None | Some(b'\n') => {
                return Err((
                    LexErrorKind::UnterminatedChar,
                    TextRange::new(start, self.offset()),
                ))
            }
            Some(b'\\') => self.scan_escape(start)?,
            _ => {
                self.bump();
            }
        }
        match self.peek_byte() {
            Some(b'\'') => {
                self.pos += 1;
                Ok(TokenKind::CharLiteral)
            }
            _ => Err((
                LexErrorKind::UnterminatedChar,
                TextRange::new(start, self.offset()),
            )),
        }
    }

    /// Shared escape-sequence scanner for string and char literals
    /// (`\b \t \n \f \r \" \' \\ \0-\377 \uXXXX \s`).
    fn scan_escape(&mut self, start: TextSize) -> Result<(), (LexErrorKind, TextRange)> {
        debug_assert_eq!(self.peek_byte(), Some(b'\\'));
        if self.peek_byte_at(1) == Some(b'u') {
            let save = self.pos;
            self.pos += 1;
            if self.try_scan_unicode_escape().is_some() {
                return Ok(());
            }
            self.pos = save;
            return Err((
                LexErrorKind::InvalidUnicodeEscape,
                TextRange::new(start, self.offset()),
            ));
        }
        self.pos += 1;
        match self.peek_byte() {
            Some(b'b' | b't' | b'n' | b'f' | b'r' | b'"' | b'\'' | b'\\' | b's') => {
                self.pos += 1;
                Ok(())
            }
            Some(b'0'..=b'7') => {
                let mut digits = 0;
                while matches!(self.peek_byte(), Some(b'0'..=b'7')) && digits < 3 {
                    self.pos += 1;
                    digits += 1;
                }
                Ok(())
            }
            _ => Err((
                LexErrorKind::InvalidEscape,
                TextRange::new(start, self.offset()),
            )),
        }
    }

    fn scan_text_block(&mut self, start: TextSize) -> Result<TokenKind, (LexErrorKind, TextRange)> {
        self.pos += 3;
        // Only inline whitespace may follow the opening delimiter before the
        // mandatory newline.
        while matches!(self.peek_byte(), Some(b' ' | b'\t' | 0x0c)) {
            self.pos += 1;
        }
        match self.peek_byte() {
            Some(b'\n') => self.pos += 1,
            Some(b'\r') => {
                self.pos += 1;
                if self.peek_byte() == Some(b'\n') {
                    self.pos += 1;
                }
            }
            _ => {
                return Err((
                    LexErrorKind::TextBlockMissingNewline,
                    TextRange::new(start, self.offset()),
                ))
            }
        }
        loop {
            match self.peek_byte() {
                None => {
                    return Err((
                        LexErrorKind::UnterminatedTextBlock,
                        TextRange::new(start, self.offset()),
                    ))
                }
                Some(b'"')
                    if self.peek_byte_at(1) == Some(b'"') && self.peek_byte_at(2) == Some(b'"') =>
                {
                    self.pos += 3;
                    return Ok(TokenKind::TextBlock);
                }
                Some(b'\\') => self.scan_escape(start)?,
                _ => {
                    self.bump();
                }
            }
        }
    }

    fn scan_number(&mut self, start: TextSize) -> Result<TokenKind, (LexErrorKind, TextRange)> {
        let is_zero_prefixed = self.peek_byte() == Some(b'0');
        if is_zero_prefixed
            && matches!(self.peek_byte_at(1), Some(b'x' | b'X'))
        {
            self.pos += 2;
            return self.scan_radix_literal(start, 16, |b| b.is_ascii_hexdigit());
        }
        if is_zero_prefixed && matches!(self.peek_byte_at(1), Some(b'b' | b'B')) {
            self.pos += 2;
            return self.scan_radix_literal(start, 2, |b| matches!(b, b'0' | b'1'));
        }
        if is_zero_prefixed && matches!(self.peek_byte_at(1), Some(b'0'..=b'7' | b'_')) {
            // Octal: scan digits, but only commit to octal if no `.`/`e`/`f`/`d`
            // later reveals this was actually a decimal float.
            let save = self.pos;
            self.pos += 1;
            let run_start = self.pos;
            let mut saw_digit = false;
            while matches!(self.peek_byte(), Some(b'0'..=b'7' | b'_')) {
                if self.peek_byte() != Some(b'_') {
                    saw_digit = true;
                }
                self.pos += 1;
            }
            if matches!(self.peek_byte(), Some(b'.' | b'e' | b'E' | b'f' | b'F' | b'd' | b'D')) {
                self.pos = save;
            } else {
                if !saw_digit {
                    return Err((
                        LexErrorKind::MalformedNumericLiteral,
                        TextRange::new(start, self.offset()),
                    ));
                }
                self.check_digit_run(run_start, start)?;
                if matches!(self.peek_byte(), Some(b'L' | b'l')) {
                    self.pos += 1;
                    return Ok(TokenKind::LongLiteral);
                }
                return Ok(TokenKind::IntegerLiteral);
            }
        }

        // Decimal integer or floating-point.
        self.scan_decimal_digits(start)?;
        let mut is_float = false;
        if self.peek_byte() == Some(b'.') && matches!(self.peek_byte_at(1), Some(b'0'..=b'9')) {
            is_float = true;
            self.pos += 1;
            self.scan_decimal_digits(start)?;
        } else if self.peek_byte() == Some(b'.') && self.peek_byte_at(1) != Some(b'.') {
            // A trailing `.` with no digits after it (`1.`, `0.`) is still a
            // valid double literal; guard against swallowing the `.` that
            // starts a `...` varargs ellipsis.
            is_float = true;
            self.pos += 1;
        }
        if matches!(self.peek_byte(), Some(b'e' | b'E')) {
            let save = self.pos;
            self.pos += 1;
            if matches!(self.peek_byte(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if matches!(self.peek_byte(), Some(b'0'..=b'9')) {
                is_float = true;
                self.scan_decimal_digits(start)?;
            } else {
                self.pos = save;
            }
        }

        match self.peek_byte() {
            Some(b'f' | b'F') => {
                self.pos += 1;
                Ok(TokenKind::FloatLiteral)
            }
            Some(b'd' | b'D') => {
                self.pos += 1;
                Ok(TokenKind::DoubleLiteral)
            }
            Some(b'L' | b'l') if !is_float => {
                self.pos += 1;
                Ok(TokenKind::LongLiteral)
            }
            _ if is_float => Ok(TokenKind::DoubleLiteral),
            _ => Ok(TokenKind::IntegerLiteral),
        }
    }

    fn scan_decimal_digits(
        &mut self,
        start: TextSize,
    ) -> Result<(), (LexErrorKind, TextRange)> {
        let run_start = self.pos;
        while matches!(self.peek_byte(), Some(b'0'..=b'9' | b'_')) {
            self.pos += 1;
        }
        self.check_digit_run(run_start, start)
    }

    fn scan_radix_literal(
        &mut self,
        start: TextSize,
        _radix: u32,
        is_digit: impl Fn(u8) -> bool,
    ) -> Result<TokenKind, (LexErrorKind, TextRange)> {
        let run_start = self.pos;
        let mut saw_digit = false;
        while let Some(b) = self.peek_byte() {
            if is_digit(b) {
                saw_digit = true;
                self.pos += 1;
            } else if b == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if !saw_digit {
            return Err((
                LexErrorKind::MalformedNumericLiteral,
                TextRange::new(start, self.offset()),
            ));
        }
        self.check_digit_run(run_start, start)?;
        if matches!(self.peek_byte(), Some(b'L' | b'l')) {
            self.pos += 1;
            return Ok(TokenKind::LongLiteral);
        }
        Ok(TokenKind::IntegerLiteral)
    }

    /// `_` may only appear between two digits: not leading, not trailing,
    /// not adjacent to a radix prefix (`0x`/`0b`/octal `0`) or a literal
    /// suffix (`L`/`F`/`D`). Each of those forbidden positions falls at the
    /// very start or end of the digit run this scans, since the run is
    /// delimited exactly by the prefix on one side and the suffix (or a
    /// following `.`/`e`) on the other.
    fn check_digit_run(
        &self,
        run_start: usize,
        literal_start: TextSize,
    ) -> Result<(), (LexErrorKind, TextRange)> {
        let run = self.source[run_start..self.pos].as_bytes();
        if run.first() == Some(&b'_') || run.last() == Some(&b'_') {
            return Err((
                LexErrorKind::MalformedNumericLiteral,
                TextRange::new(literal_start, self.offset()),
            ));
        }
        Ok(())
    }

    /// Maximal-munch scan of punctuators: `>>>=` before `>>>` before `>>=`
    /// before `>>` before `>=` before `>`.
    fn scan_punctuator(&mut self, start: TextSize) -> Result<TokenKind, (LexErrorKind, TextRange)> {
        macro_rules! lit {
            ($s:literal) => {
                self.source[self.pos..].as_bytes().starts_with($s)
            };
        }

        let kind = if lit!(b">>>=") {
            self.pos += 4;
            TokenKind::UShrEq
        } else if lit!(b">>>") {
            self.pos += 3;
            TokenKind::UShr
        } else if lit!(b">>=") {
            self.pos += 3;
            TokenKind::ShrEq
        } else if lit!(b"<<=") {
            self.pos += 3;
            TokenKind::ShlEq
        } else if lit!(b"...") {
            self.pos += 3;
            TokenKind::DotDotDot
        } else if lit!(b">>") {
            self.pos += 2;
            TokenKind::Shr
        } else if lit!(b"<<") {
            self.pos += 2;
            TokenKind::Shl
        } else if lit!(b"->") {
            self.pos += 2;
            TokenKind::Arrow
        } else if lit!(b"::") {
            self.pos += 2;
            TokenKind::ColonColon
        } else if lit!(b"==") {
            self.pos += 2;
            TokenKind::EqEq
        } else if lit!(b"!=") {
            self.pos += 2;
            TokenKind::Ne
        } else if lit!(b"<=") {
            self.pos += 2;
            TokenKind::Le
        } else if lit!(b">=") {
            self.pos += 2;
            TokenKind::Ge
        } else if lit!(b"&&") {
            self.pos += 2;
            TokenKind::AmpAmp
        } else if lit!(b"||") {
            self.pos += 2;
            TokenKind::PipePipe
        } else if lit!(b"++") {
            self.pos += 2;
            TokenKind::PlusPlus
        } else if lit!(b"--") {
            self.pos += 2;
            TokenKind::MinusMinus
        } else if lit!(b"+=") {
            self.pos += 2;
            TokenKind::PlusEq
        } else if lit!(b"-=") {
            self.pos += 2;
            TokenKind::MinusEq
        } else if lit!(b"*=") {
            self.pos += 2;
            TokenKind::StarEq
        } else if lit!(b"/=") {
            self.pos += 2;
            TokenKind::SlashEq
        } else if lit!(b"%=") {
            self.pos += 2;
            TokenKind::PercentEq
        } else if lit!(b"&=") {
            self.pos += 2;
            TokenKind::AmpEq
        } else if lit!(b"|=") {
            self.pos += 2;
            TokenKind::PipeEq
        } else if lit!(b"^=") {
            self.pos += 2;
            TokenKind::CaretEq
        } else {
            let b = self.peek_byte().unwrap();
            self.pos += 1;
            match b {
                b'{' => TokenKind::LBrace,
                b'}' => TokenKind::RBrace,
                b'(' => TokenKind::LParen,
                b')' => TokenKind::RParen,
                b'[' => TokenKind::LBracket,
                b']' => TokenKind::RBracket,
                b';' => TokenKind::Semi,
                b',' => TokenKind::Comma,
                b'.' => TokenKind::Dot,
                b'=' => TokenKind::Eq,
                b'<' => TokenKind::Lt,
                b'>' => TokenKind::Gt,
                b'+' => TokenKind::Plus,
                b'-' => TokenKind::Minus,
                b'*' => TokenKind::Star,
                b'/' => TokenKind::Slash,
                b'%' => TokenKind::Percent,
                b'&' => TokenKind::Amp,
                b'|' => TokenKind::Pipe,
                b'^' => TokenKind::Caret,
                b'~' => TokenKind::Tilde,
                b'!' => TokenKind::Bang,
                b'?' => TokenKind::Question,
                b':' => TokenKind::Colon,
                b'@' => TokenKind::At,
                _ => {
                    return Err((
                        LexErrorKind::UnexpectedCharacter,
                        TextRange::new(start, self.offset()),
                    ))
                }
            }
        };
        Ok(kind)
    }
}

/// `JavaLetter`: `unicode_ident`'s `XID_Start` plus `$` and `_`.
pub fn is_java_letter(c: char) -> bool {
    c == '$' || c == '_' || unicode_ident::is_xid_start(c)
}

/// `JavaLetterOrDigit`: `unicode_ident`'s `XID_Continue` plus `$`.
pub fn is_java_letter_or_digit(c: char) -> bool {
    c == '$' || unicode_ident::is_xid_continue(c)
}

#[inline]
fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn keyword_or_identifier(text: &str) -> TokenKind {
    match text {
        "abstract" => TokenKind::AbstractKw,
        "assert" => TokenKind::AssertKw,
        "boolean" => TokenKind::BooleanKw,
        "break" => TokenKind::BreakKw,
        "byte" => TokenKind::ByteKw,
        "case" => TokenKind::CaseKw,
        "catch" => TokenKind::CatchKw,
        "char" => TokenKind::CharKw,
        "class" => TokenKind::ClassKw,
        "const" => TokenKind::ConstKw,
        "continue" => TokenKind::ContinueKw,
        "default" => TokenKind::DefaultKw,
        "do" => TokenKind::DoKw,
        "double" => TokenKind::DoubleKw,
        "else" => TokenKind::ElseKw,
        "enum" => TokenKind::EnumKw,
        "extends" => TokenKind::ExtendsKw,
        "final" => TokenKind::FinalKw,
        "finally" => TokenKind::FinallyKw,
        "float" => TokenKind::FloatKw,
        "for" => TokenKind::ForKw,
        "goto" => TokenKind::GotoKw,
        "if" => TokenKind::IfKw,
        "implements" => TokenKind::ImplementsKw,
        "import" => TokenKind::ImportKw,
        "instanceof" => TokenKind::InstanceofKw,
        "int" => TokenKind::IntKw,
        "interface" => TokenKind::InterfaceKw,
        "long" => TokenKind::LongKw,
        "native" => TokenKind::NativeKw,
        "new" => TokenKind::NewKw,
        "package" => TokenKind::PackageKw,
        "private" => TokenKind::PrivateKw,
        "protected" => TokenKind::ProtectedKw,
        "public" => TokenKind::PublicKw,
        "return" => TokenKind::ReturnKw,
        "short" => TokenKind::ShortKw,
        "static" => TokenKind::StaticKw,
        "strictfp" => TokenKind::StrictfpKw,
        "super" => TokenKind::SuperKw,
        "switch" => TokenKind::SwitchKw,
        "synchronized" => TokenKind::SynchronizedKw,
        "this" => TokenKind::ThisKw,
        "throw" => TokenKind::ThrowKw,
        "throws" => TokenKind::ThrowsKw,
        "transient" => TokenKind::TransientKw,
        "try" => TokenKind::TryKw,
        "void" => TokenKind::VoidKw,
        "volatile" => TokenKind::VolatileKw,
        "while" => TokenKind::WhileKw,
        "true" => TokenKind::TrueKw,
        "false" => TokenKind::FalseKw,
        "null" => TokenKind::NullKw,
        _ => TokenKind::Identifier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn keywords_vs_identifiers() {
        assert_eq!(kinds("class"), vec![TokenKind::ClassKw, TokenKind::Eof]);
        assert_eq!(kinds("var"), vec![TokenKind::Identifier, TokenKind::Eof]);
        assert_eq!(
            kinds("record"),
            vec![TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn maximal_munch_shift_operators() {
        assert_eq!(
            kinds(">>>="),
            vec![TokenKind::UShrEq, TokenKind::Eof]
        );
        assert_eq!(kinds(">>>"), vec![TokenKind::UShr, TokenKind::Eof]);
        assert_eq!(kinds(">>"), vec![TokenKind::Shr, TokenKind::Eof]);
        assert_eq!(kinds(">"), vec![TokenKind::Gt, TokenKind::Eof]);
    }

    #[test]
    fn nested_generics_tokenize_as_single_shr() {
        assert_eq!(
            kinds("List<List<String>>"),
            vec![
                TokenKind::Identifier,
                TokenKind::Lt,
                TokenKind::Identifier,
                TokenKind::Lt,
                TokenKind::Identifier,
                TokenKind::Shr,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn integer_literal_suffixes() {
        assert_eq!(
            kinds("42"),
            vec![TokenKind::IntegerLiteral, TokenKind::Eof]
        );
        assert_eq!(kinds("42L"), vec![TokenKind::LongLiteral, TokenKind::Eof]);
        assert_eq!(
            kinds("0x1F"),
            vec![TokenKind::IntegerLiteral, TokenKind::Eof]
        );
        assert_eq!(
            kinds("0b1010"),
            vec![TokenKind::IntegerLiteral, TokenKind::Eof]
        );
        assert_eq!(
            kinds("1_000_000"),
            vec![TokenKind::IntegerLiteral, TokenKind::Eof]
        );
    }

    #[test]
    fn underscore_separators_must_sit_between_digits() {
        // Valid: underscores strictly between digits, including runs of them.
        assert!(tokenize("1_0").is_ok());
        assert!(tokenize("1__0").is_ok());
        assert!(tokenize("0x1_F").is_ok());
        assert!(tokenize("0b1_0").is_ok());
        assert!(tokenize("01_7").is_ok());

        // Invalid: leading, trailing, or adjacent to a prefix/suffix.
        for src in [
            "1_",     // trailing
            "0x_1",   // adjacent to the `0x` prefix
            "0b_1",   // adjacent to the `0b` prefix
            "0_1",    // adjacent to the octal `0` prefix
            "1_F",    // adjacent to the `F` suffix
            "1_L",    // adjacent to the `L` suffix
            "1.5_",   // trailing in the fraction
            "1e1_",   // trailing in the exponent
        ] {
            match tokenize(src) {
                Err((LexErrorKind::MalformedNumericLiteral, _)) => {}
                other => panic!("{src:?}: expected MalformedNumericLiteral, got {other:?}"),
            }
        }
    }

    #[test]
    fn floating_point_forms() {
        assert_eq!(
            kinds("3.14"),
            vec![TokenKind::DoubleLiteral, TokenKind::Eof]
        );
        assert_eq!(kinds("3.14f"), vec![TokenKind::FloatLiteral, TokenKind::Eof]);
        assert_eq!(kinds("1e10"), vec![TokenKind::DoubleLiteral, TokenKind::Eof]);
    }

    #[test]
    fn line_and_block_comments() {
        assert_eq!(
            kinds("// hi\nclass"),
            vec![TokenKind::LineComment, TokenKind::ClassKw, TokenKind::Eof]
        );
        assert_eq!(
            kinds("/* a /* b */ class"),
            vec![TokenKind::BlockComment, TokenKind::ClassKw, TokenKind::Eof]
        );
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        assert!(tokenize("/* never closed").is_err());
    }

    #[test]
    fn text_block_basic() {
        assert_eq!(
            kinds("\"\"\"\n    hello\n    \"\"\""),
            vec![TokenKind::TextBlock, TokenKind::Eof]
        );
    }

    #[test]
    fn unicode_escape_in_identifier() {
        // `A` decodes to `A`.
        assert_eq!(
            kinds("\\u0041bc"),
            vec![TokenKind::Identifier, TokenKind::Eof]
        );
    }
}
