//! Recursive-descent parser. Holds `(tokens, arena, depth_tracker,
//! context)` and exposes the three public entry points (`parse`,
//! `parse_java`, `parse_module_info`) re-exported from the crate root.

mod decl;
mod expr;
mod module;
mod stmt;
mod types;

use text_size::{TextRange, TextSize};

use crate::arena::{Arena, NodeId, Watermark};
use crate::counters;
use crate::depth::{DepthTracker, ParserConfig};
use crate::error::{ParseFailure, ParseFailureKind};
use crate::kind::NodeKind;
use crate::lexer;
use crate::token::{Token, TokenKind};
use crate::version::{Feature, JavaVersion};

/// A save point for speculative parsing: the lexer cursor, any pending
/// split tokens, and the arena's allocation watermark. Lets a tentative
/// sub-parse (lambda vs. cast vs. parenthesized, say) back out cleanly
/// without raising or catching an exception.
#[derive(Debug, Clone)]
struct SpeculationMark {
    token_pos: usize,
    pending: Vec<Token>,
    watermark: Watermark,
}

pub(crate) struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    /// Synthetic tokens produced by [`Parser::split_gt`], consumed before
    /// `tokens[pos]`.
    pending: Vec<Token>,
    arena: Arena,
    depth: DepthTracker,
    version: JavaVersion,
    in_module_info: bool,
}

impl<'src> Parser<'src> {
    fn new(
        source: &'src str,
        tokens: Vec<Token>,
        version: JavaVersion,
        config: &ParserConfig,
        in_module_info: bool,
    ) -> Self {
        let mut parser = Self {
            source,
            tokens,
            pos: 0,
            pending: Vec::new(),
            arena: Arena::new(),
            depth: DepthTracker::new(config),
            version,
            in_module_info,
        };
        parser.skip_trivia();
        parser
    }

    /// Flushes any run of comment tokens sitting at the cursor into the
    /// arena as `LineComment`/`BlockComment` nodes and advances past them,
    /// maintaining the invariant that `self.pos` always indexes a
    /// non-trivia token (or `Eof`). Recording them here, as they are
    /// encountered in source order, is what gives `Arena::trivia()` nodes
    /// correct post-order placement relative to the real syntax they sit
    /// inside, without a separate attachment pass.
    fn skip_trivia(&mut self) {
        while self.pending.is_empty() {
            let tok = self.tokens[self.pos.min(self.tokens.len() - 1)];
            let kind = match tok.kind {
                TokenKind::LineComment => NodeKind::LineComment,
                TokenKind::BlockComment => NodeKind::BlockComment,
                _ => break,
            };
            self.arena
                .allocate(kind, tok.range.start().into(), tok.range.end().into());
            if self.pos < self.tokens.len() - 1 {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    // -- token cursor -----------------------------------------------------

    fn peek(&self) -> Token {
        if let Some(tok) = self.pending.last() {
            return *tok;
        }
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Lookahead `k` non-pending tokens ahead of the current position.
    /// `k == 0` is the current token.
    fn peek_kind_at(&self, k: usize) -> TokenKind {
        if k == 0 {
            return self.peek_kind();
        }
        // Pending tokens only ever hold one synthetic remainder; beyond
        // that we read straight from the main stream.
        let extra = if self.pending.is_empty() { 0 } else { 1 };
        let idx = self.pos + k - extra;
        self.tokens
            .get(idx)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn advance(&mut self) -> Token {
        if let Some(tok) = self.pending.pop() {
            if self.pending.is_empty() {
                self.skip_trivia();
            }
            return tok;
        }
        let tok = self.tokens[self.pos.min(self.tokens.len() - 1)];
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        self.skip_trivia();
        tok
    }

    fn current_range(&self) -> TextRange {
        self.peek().range
    }

    fn token_text(&self, tok: Token) -> &'src str {
        tok.text(self.source)
    }

    /// When the parser expects a `>` but the lexer produced a wider shift
    /// operator (because it was scanned without knowledge of the enclosing
    /// generic argument list), peel off exactly one `>` and push the
    /// remainder back as a pending token.
    fn split_gt(&mut self) -> Token {
        let cur = self.peek();
        let start = cur.range.start();
        let one = TextSize::from(1);

        let (remainder_kind, remainder_len): (Option<TokenKind>, u32) = match cur.kind {
            TokenKind::Gt => return self.advance(),
            TokenKind::Shr => (Some(TokenKind::Gt), 1),
            TokenKind::UShr => (Some(TokenKind::Shr), 2),
            TokenKind::ShrEq => (Some(TokenKind::Ge), 2),
            TokenKind::UShrEq => (Some(TokenKind::ShrEq), 3),
            _ => return self.advance(),
        };

        // Consume the synthetic token from the pending stack or the main
        // stream, then push the remainder.
        if self.pending.pop().is_none() {
            self.pos += if self.pos < self.tokens.len() - 1 { 1 } else { 0 };
        }
        if let Some(kind) = remainder_kind {
            let remainder_start = start + one;
            let remainder_end = remainder_start + TextSize::from(remainder_len);
            self.pending.push(Token::new(
                kind,
                TextRange::new(remainder_start, remainder_end),
                cur.flags,
            ));
        }
        Token::new(TokenKind::Gt, TextRange::new(start, start + one), cur.flags)
    }

    // -- speculation --------------------------------------------------------

    fn mark(&self) -> SpeculationMark {
        SpeculationMark {
            token_pos: self.pos,
            pending: self.pending.clone(),
            watermark: self.arena.watermark(),
        }
    }

    fn begin_speculation(&mut self) -> SpeculationMark {
        counters::record_speculative_attempt();
        self.mark()
    }

    fn restore(&mut self, mark: SpeculationMark) {
        self.pos = mark.token_pos;
        self.pending = mark.pending;
        self.arena.truncate_to(mark.watermark);
    }

    fn backtrack(&mut self, mark: SpeculationMark) {
        counters::record_backtrack();
        tracing::debug!(target = "java_syntax.parser", pos = mark.token_pos, "backtrack");
        self.restore(mark);
    }

    /// Runs `f` speculatively: on `Ok`, keeps its effects; on `Err`, rolls
    /// back the lexer cursor and arena to before `f` ran.
    fn try_speculative<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseFailure>,
    ) -> Result<T, ParseFailure> {
        let mark = self.begin_speculation();
        match f(self) {
            Ok(v) => Ok(v),
            Err(e) => {
                self.backtrack(mark);
                Err(e)
            }
        }
    }

    // -- depth guard ----------------------------------------------------

    fn enter_depth(&self, range: TextRange) -> Result<crate::depth::DepthGuard<'_>, ParseFailure> {
        self.depth.enter(range)
    }

    // -- feature gating ---------------------------------------------------

    fn require_feature(&self, feature: Feature, range: TextRange) -> Result<(), ParseFailure> {
        let minimum = feature.minimum_version();
        if self.version.supports(minimum) {
            Ok(())
        } else {
            Err(ParseFailure::new(
                ParseFailureKind::FeatureNotAvailable {
                    feature: feature.name(),
                    minimum,
                    requested: self.version,
                },
                range,
            ))
        }
    }

    /// Spelling of the token `k` positions ahead, ignoring the trivia
    /// already skipped by the cursor (`k == 0` is the current token). Only
    /// meant for short, fixed lookaheads at grammar positions that never
    /// straddle a pending split token beyond the first.
    fn peek_text_at(&self, k: usize) -> &'src str {
        if k == 0 {
            return self.token_text(self.peek());
        }
        let extra = if self.pending.is_empty() { 0 } else { 1 };
        let idx = self.pos + k - extra;
        let tok = self.tokens[idx.min(self.tokens.len() - 1)];
        self.token_text(tok)
    }

    // -- contextual keyword helpers ---------------------------------------

    /// Detects the three-token `non` `-` `sealed` sequence with no
    /// intervening trivia, the only way `non-sealed` is ever spelled
    /// (`-` is ordinary punctuation in Java; see [`crate::keyword`]).
    fn at_non_sealed(&self) -> bool {
        self.peek_kind() == TokenKind::Identifier
            && self.token_text(self.peek()) == "non"
            && self.peek_kind_at(1) == TokenKind::Minus
            && self.peek_kind_at(2) == TokenKind::Identifier
            && self.token_text(self.tokens[(self.pos + 2).min(self.tokens.len() - 1)]) == "sealed"
    }

    // -- generic helpers ----------------------------------------------------

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, ParseFailure> {
        if self.peek_kind() == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek_kind() == kind {
            Some(self.advance())
        } else {
            None
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseFailure {
        ParseFailure::new(
            ParseFailureKind::UnexpectedToken {
                expected,
                found: token_kind_label(self.peek_kind()),
            },
            self.current_range(),
        )
    }

    fn identifier_text(&mut self, expected: &'static str) -> Result<Box<str>, ParseFailure> {
        if self.peek_kind() != TokenKind::Identifier {
            return Err(self.unexpected(expected));
        }
        let tok = self.advance();
        Ok(self.token_text(tok).into())
    }

    fn node_start(&self) -> TextSize {
        self.current_range().start()
    }

    fn prev_end(&self) -> TextSize {
        if self.pos == 0 {
            TextSize::from(0)
        } else {
            self.tokens[self.pos - 1].range.end()
        }
    }
}

fn token_kind_label(kind: TokenKind) -> &'static str {
    use TokenKind::*;
    match kind {
        Eof => "end of input",
        Identifier => "identifier",
        LBrace => "'{'",
        RBrace => "'}'",
        LParen => "'('",
        RParen => "')'",
        LBracket => "'['",
        RBracket => "']'",
        Semi => "';'",
        Comma => "','",
        Dot => "'.'",
        Eq => "'='",
        Gt => "'>'",
        Lt => "'<'",
        Arrow => "'->'",
        ColonColon => "'::'",
        _ => "token",
    }
}

/// Parses a full compilation unit. `in_module_info` fixes whether the
/// top-level declaration must be a `module` directive.
fn parse_compilation_unit(
    source: &str,
    version: JavaVersion,
    config: &ParserConfig,
    in_module_info: bool,
) -> Result<Arena, ParseFailure> {
    let _span = tracing::debug_span!(
        "java_syntax.parse",
        len = source.len(),
        version = %version,
        in_module_info
    )
    .entered();

    let tokens = lexer::tokenize(source).map_err(|(kind, range)| {
        ParseFailure::new(ParseFailureKind::Lex(kind), range)
    })?;

    let mut parser = Parser::new(source, tokens, version, config, in_module_info);
    let root = parser.parse_compilation_unit_inner()?;
    if root != parser.arena.root() {
        debug_assert!(false, "compilation_unit was not the last node allocated");
        return Err(ParseFailure::new(
            ParseFailureKind::InternalInvariantViolation(
                "compilation_unit was not the last node allocated",
            ),
            TextRange::new(0.into(), 0.into()),
        ));
    }
    Ok(parser.arena)
}

impl<'src> Parser<'src> {
    fn parse_compilation_unit_inner(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();

        if self.peek_kind() == TokenKind::PackageKw {
            self.parse_package_declaration()?;
        } else if self.peek_kind() == TokenKind::At {
            // A leading `@` could start a package declaration's annotations
            // (`@Foo package bar;`) or a type declaration's annotations
            // (`@Deprecated class X {}`). Try the package reading first and
            // fall back to ordinary type-declaration parsing on failure.
            let mark = self.mark();
            if self.parse_package_declaration().is_err() {
                self.restore(mark);
            }
        }

        while self.peek_kind() == TokenKind::ImportKw {
            self.parse_import_declaration()?;
        }

        if self.in_module_info {
            self.parse_module_declaration()?;
        } else {
            while self.peek_kind() != TokenKind::Eof {
                if self.eat(TokenKind::Semi).is_some() {
                    continue;
                }
                self.parse_type_declaration()?;
            }
        }

        if self.peek_kind() != TokenKind::Eof {
            return Err(self.unexpected("end of input"));
        }

        let end = self.prev_end();
        let end = if end < self.node_start() { self.node_start() } else { end };
        Ok(self
            .arena
            .allocate(NodeKind::CompilationUnit, start.into(), end.into()))
    }
}

/// The generic entry point: infers module-info from the leading token when
/// not told otherwise. An explicit call to [`parse_module_info`] or
/// [`parse_java`] always takes precedence over this inference (see
/// `DESIGN.md`'s resolved Open Question on module-info inference).
pub fn parse(source: &str, version: JavaVersion) -> Result<Arena, ParseFailure> {
    parse_with_config(source, version, &ParserConfig::default())
}

pub fn parse_with_config(
    source: &str,
    version: JavaVersion,
    config: &ParserConfig,
) -> Result<Arena, ParseFailure> {
    let is_module_info = looks_like_module_info(source);
    parse_compilation_unit(source, version, config, is_module_info)
}

/// Always parses `source` as an ordinary compilation unit; never infers
/// module-info.
pub fn parse_java(source: &str, version: JavaVersion) -> Result<Arena, ParseFailure> {
    parse_compilation_unit(source, version, &ParserConfig::default(), false)
}

/// Always parses `source` as a `module-info.java` compilation unit.
pub fn parse_module_info(source: &str, version: JavaVersion) -> Result<Arena, ParseFailure> {
    parse_compilation_unit(source, version, &ParserConfig::default(), true)
}

/// Cheap lookahead used by [`parse`]: skip `package`/`import` and trivia,
/// then check whether the next keyword-position token is `module`.
fn looks_like_module_info(source: &str) -> bool {
    let Ok(tokens) = lexer::tokenize(source) else {
        return false;
    };
    let mut i = 0;
    // Skip a leading package declaration and any imports; neither is legal
    // before `module` but skipping them tolerates malformed input gracefully
    // (a genuine parse failure will surface later, from the real parser).
    while i < tokens.len() {
        match tokens[i].kind {
            TokenKind::LineComment | TokenKind::BlockComment => i += 1,
            TokenKind::At | TokenKind::PackageKw | TokenKind::ImportKw => {
                while i < tokens.len() && tokens[i].kind != TokenKind::Semi {
                    i += 1;
                }
                i += 1;
            }
            TokenKind::Identifier => {
                return tokens[i].text(source) == "module";
            }
            _ => return false,
        }
    }
    false
}
