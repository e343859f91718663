//! Expressions: Pratt-style precedence climbing, postfix chains, the
//! `(`-disambiguation triad (lambda / cast / parenthesized), `instanceof`
//! patterns, and method references.

use text_size::TextSize;

use crate::arena::NodeId;
use crate::attrib::{Attribute, AssignOp, BinaryOp, MethodRefMember, UnaryOp};
use crate::error::ParseFailure;
use crate::kind::NodeKind;
use crate::token::TokenKind;
use crate::version::Feature;

use super::Parser;

/// Binding power of a binary operator token; higher binds tighter.
/// Follows the JLS precedence table exactly.
fn binary_precedence(kind: TokenKind) -> Option<(u8, BinaryOp)> {
    use TokenKind::*;
    Some(match kind {
        PipePipe => (1, BinaryOp::LogicalOr),
        AmpAmp => (2, BinaryOp::LogicalAnd),
        Pipe => (3, BinaryOp::BitOr),
        Caret => (4, BinaryOp::BitXor),
        Amp => (5, BinaryOp::BitAnd),
        EqEq => (6, BinaryOp::Eq),
        Ne => (6, BinaryOp::Ne),
        Lt => (7, BinaryOp::Lt),
        Le => (7, BinaryOp::Le),
        Gt => (7, BinaryOp::Gt),
        Ge => (7, BinaryOp::Ge),
        Shl => (8, BinaryOp::Shl),
        Shr => (8, BinaryOp::Shr),
        UShr => (8, BinaryOp::UShr),
        Plus => (9, BinaryOp::Add),
        Minus => (9, BinaryOp::Sub),
        Star => (10, BinaryOp::Mul),
        Slash => (10, BinaryOp::Div),
        Percent => (10, BinaryOp::Rem),
        _ => return None,
    })
}

const INSTANCEOF_PRECEDENCE: u8 = 7;

fn assign_op(kind: TokenKind) -> Option<AssignOp> {
    use TokenKind::*;
    Some(match kind {
        Eq => AssignOp::Assign,
        PlusEq => AssignOp::AddAssign,
        MinusEq => AssignOp::SubAssign,
        StarEq => AssignOp::MulAssign,
        SlashEq => AssignOp::DivAssign,
        PercentEq => AssignOp::RemAssign,
        AmpEq => AssignOp::AndAssign,
        PipeEq => AssignOp::OrAssign,
        CaretEq => AssignOp::XorAssign,
        ShlEq => AssignOp::ShlAssign,
        ShrEq => AssignOp::ShrAssign,
        UShrEq => AssignOp::UShrAssign,
        _ => return None,
    })
}

impl<'src> Parser<'src> {
    pub(super) fn parse_expression(&mut self) -> Result<NodeId, ParseFailure> {
        self.parse_assignment_expression()
    }

    /// Assignment is right-associative and lowest precedence; a lambda can
    /// also appear here since it shares prefixes with a parenthesized
    /// expression and must be tried before arithmetic operators are
    /// considered.
    fn parse_assignment_expression(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        let lhs = self.parse_conditional_expression()?;

        if let Some(op) = assign_op(self.peek_kind()) {
            self.advance();
            self.parse_assignment_expression()?;
            let end = self.prev_end();
            return Ok(self.arena.allocate_with_attribute(
                NodeKind::AssignmentExpression,
                start.into(),
                end.into(),
                Attribute::AssignmentExpression { op },
            ));
        }

        Ok(lhs)
    }

    /// Ternary `? :`, right-associative.
    fn parse_conditional_expression(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        let cond = self.parse_binary_expression(0)?;
        if self.eat(TokenKind::Question).is_some() {
            self.parse_expression()?;
            self.expect(TokenKind::Colon, "':'")?;
            self.parse_conditional_expression()?;
            let end = self.prev_end();
            return Ok(self
                .arena
                .allocate(NodeKind::ConditionalExpression, start.into(), end.into()));
        }
        Ok(cond)
    }

    /// Precedence-climbing loop over binary operators and `instanceof`.
    fn parse_binary_expression(&mut self, min_prec: u8) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        let mut lhs = self.parse_unary_expression()?;

        loop {
            if self.peek_kind() == TokenKind::InstanceofKw && INSTANCEOF_PRECEDENCE >= min_prec {
                self.advance();
                self.parse_instanceof_pattern()?;
                let end = self.prev_end();
                lhs = self
                    .arena
                    .allocate(NodeKind::InstanceofExpression, start.into(), end.into());
                continue;
            }

            let Some((prec, op)) = binary_precedence(self.peek_kind()) else {
                break;
            };
            if prec < min_prec {
                break;
            }

            // `>>`/`>>>` must be reinterpreted as a closing `>` when we're
            // inside a generic argument list; that's handled by the type
            // parser splitting before we ever see a bare `>` here, so at
            // this point a `>>`/`>>>` token really is a shift operator.
            self.advance();
            // All binary operators here are left-associative: climb with
            // `prec + 1` as the next minimum.
            self.parse_binary_expression(prec + 1)?;
            let end = self.prev_end();
            lhs = self.arena.allocate_with_attribute(
                NodeKind::BinaryExpression,
                start.into(),
                end.into(),
                Attribute::BinaryExpression { op },
            );
        }

        Ok(lhs)
    }

    /// A type, optionally followed by a binding identifier (type pattern)
    /// or a parenthesized record-deconstruction pattern.
    fn parse_instanceof_pattern(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        let range = self.current_range();
        self.parse_type()?;

        if self.peek_kind() == TokenKind::LParen {
            self.require_feature(Feature::RecordPatterns, range)?;
            return self.parse_record_pattern(start);
        }

        if self.peek_kind() == TokenKind::Identifier {
            self.require_feature(Feature::PatternMatchingInstanceof, range)?;
            let name = self.identifier_text("binding name")?;
            let end = self.prev_end();
            return Ok(self.arena.allocate_with_attribute(
                NodeKind::TypePattern,
                start.into(),
                end.into(),
                Attribute::TypePattern { binding_name: name },
            ));
        }

        // A bare type with no binding: `x instanceof String`.
        let end = self.prev_end();
        Ok(self.arena.allocate(NodeKind::TypePattern, start.into(), end.into()))
    }

    fn parse_record_pattern(&mut self, start: TextSize) -> Result<NodeId, ParseFailure> {
        self.advance(); // `(`
        let list_start = self.node_start();
        if self.peek_kind() != TokenKind::RParen {
            self.parse_pattern_component()?;
            while self.eat(TokenKind::Comma).is_some() {
                self.parse_pattern_component()?;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        let list_end = self.prev_end();
        self.arena.allocate(
            NodeKind::RecordPatternComponentList,
            list_start.into(),
            list_end.into(),
        );
        let end = self.prev_end();
        Ok(self
            .arena
            .allocate(NodeKind::RecordPattern, start.into(), end.into()))
    }

    fn parse_pattern_component(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        if self.peek_kind() == TokenKind::Identifier
            && self.token_text(self.peek()) == "var"
            && self.peek_kind_at(1) == TokenKind::Identifier
        {
            self.advance();
        } else {
            self.parse_type()?;
        }
        if self.peek_kind() == TokenKind::LParen {
            return self.parse_record_pattern(start);
        }
        let name = self.identifier_text("pattern binding name")?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::TypePattern,
            start.into(),
            end.into(),
            Attribute::TypePattern { binding_name: name },
        ))
    }

    /// Unary prefix operators, casts, and the postfix chain.
    fn parse_unary_expression(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        let range = self.current_range();
        let _guard = self.enter_depth(range)?;

        let op = match self.peek_kind() {
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Minus => Some(UnaryOp::Minus),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            TokenKind::Bang => Some(UnaryOp::LogicalNot),
            TokenKind::PlusPlus => Some(UnaryOp::Inc),
            TokenKind::MinusMinus => Some(UnaryOp::Dec),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            self.parse_unary_expression()?;
            let end = self.prev_end();
            return Ok(self.arena.allocate_with_attribute(
                NodeKind::UnaryExpression,
                start.into(),
                end.into(),
                Attribute::UnaryExpression { op },
            ));
        }

        if self.peek_kind() == TokenKind::LParen {
            if let Some(cast) = self.try_parse_cast(start)? {
                return Ok(cast);
            }
        }

        self.parse_postfix_expression()
    }

    /// `(` triggers a three-way disambiguation: lambda, cast, or
    /// parenthesized expression. Lambda and cast are tried
    /// speculatively in order; if both fail, the caller falls through to
    /// treating `(` as the start of a parenthesized expression or argument
    /// list via `parse_postfix_expression` → `parse_primary_expression`.
    fn try_parse_cast(&mut self, start: TextSize) -> Result<Option<NodeId>, ParseFailure> {
        let result = self.try_speculative(|p| {
            p.advance(); // `(`
            p.try_parse_type()?;
            while p.peek_kind() == TokenKind::Amp {
                p.advance();
                p.try_parse_type()?;
            }
            p.expect(TokenKind::RParen, "')'")?;
            if !p.can_start_unary_expression() {
                return Err(p.unexpected("unary expression"));
            }
            p.parse_unary_expression()
        });

        match result {
            Ok(_) => {
                let end = self.prev_end();
                Ok(Some(self.arena.allocate(
                    NodeKind::CastExpression,
                    start.into(),
                    end.into(),
                )))
            }
            Err(_) => Ok(None),
        }
    }

    fn can_start_unary_expression(&self) -> bool {
        !matches!(
            self.peek_kind(),
            TokenKind::Eof
                | TokenKind::Semi
                | TokenKind::RParen
                | TokenKind::RBrace
                | TokenKind::RBracket
                | TokenKind::Comma
        )
    }

    /// `(` also starts a lambda parameter list. Tried before falling back
    /// to a parenthesized/primary expression inside `parse_primary_expression`.
    fn try_parse_lambda(&mut self, start: TextSize) -> Result<Option<NodeId>, ParseFailure> {
        let result = self.try_speculative(|p| {
            let params_start = p.node_start();
            p.advance(); // `(`
            if p.peek_kind() != TokenKind::RParen {
                p.parse_lambda_parameter()?;
                while p.eat(TokenKind::Comma).is_some() {
                    p.parse_lambda_parameter()?;
                }
            }
            p.expect(TokenKind::RParen, "')'")?;
            let params_end = p.prev_end();
            p.arena.allocate(
                NodeKind::LambdaParameterList,
                params_start.into(),
                params_end.into(),
            );
            p.expect(TokenKind::Arrow, "'->'")?;
            p.parse_lambda_body()
        });

        match result {
            Ok(_) => {
                let end = self.prev_end();
                Ok(Some(self.arena.allocate(
                    NodeKind::LambdaExpression,
                    start.into(),
                    end.into(),
                )))
            }
            Err(_) => Ok(None),
        }
    }

    fn parse_lambda_parameter(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        // Either a bare name (`x`) or a typed parameter (`int x`, `var x`,
        // `final Foo x`).
        let is_typed = self.peek_kind() != TokenKind::Identifier
            || matches!(self.peek_kind_at(1), TokenKind::Identifier);
        if self.peek_kind() == TokenKind::FinalKw {
            self.advance();
        }
        if is_typed {
            self.try_parse_type()?;
        }
        let name = self.identifier_text("lambda parameter name")?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::ParameterDeclaration,
            start.into(),
            end.into(),
            Attribute::Parameter {
                name,
                is_varargs: false,
                is_final: false,
                is_receiver: false,
            },
        ))
    }

    fn parse_lambda_body(&mut self) -> Result<NodeId, ParseFailure> {
        if self.peek_kind() == TokenKind::LBrace {
            self.parse_block()
        } else {
            self.parse_expression()
        }
    }

    /// Postfix chain: method calls, field access, array indexing, `++`/`--`.
    fn parse_postfix_expression(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        let mut node = self.parse_primary_expression()?;

        loop {
            match self.peek_kind() {
                TokenKind::Dot => {
                    self.advance();
                    if self.peek_kind() == TokenKind::Lt {
                        self.parse_type_argument_list()?;
                    }
                    if self.peek_kind() == TokenKind::NewKw {
                        node = self.parse_object_creation(start)?;
                        continue;
                    }
                    if self.peek_kind() == TokenKind::ThisKw {
                        self.advance();
                        let end = self.prev_end();
                        node = self
                            .arena
                            .allocate(NodeKind::ThisExpression, start.into(), end.into());
                        continue;
                    }
                    if self.peek_kind() == TokenKind::ClassKw {
                        self.advance();
                        let end = self.prev_end();
                        node = self
                            .arena
                            .allocate(NodeKind::ClassLiteral, start.into(), end.into());
                        continue;
                    }
                    let name = self.identifier_text("member name")?;
                    if self.peek_kind() == TokenKind::LParen {
                        self.parse_argument_list()?;
                        let end = self.prev_end();
                        node = self.arena.allocate_with_attribute(
                            NodeKind::MethodInvocation,
                            start.into(),
                            end.into(),
                            Attribute::MethodInvocation { name },
                        );
                    } else {
                        let end = self.prev_end();
                        node = self.arena.allocate_with_attribute(
                            NodeKind::FieldAccess,
                            start.into(),
                            end.into(),
                            Attribute::FieldAccess { name },
                        );
                    }
                }
                TokenKind::ColonColon => {
                    self.advance();
                    let member = if self.eat(TokenKind::NewKw).is_some() {
                        MethodRefMember::New
                    } else {
                        if self.peek_kind() == TokenKind::Lt {
                            self.parse_type_argument_list()?;
                        }
                        MethodRefMember::Named(self.identifier_text("method reference member")?)
                    };
                    let end = self.prev_end();
                    node = self.arena.allocate_with_attribute(
                        NodeKind::MethodReference,
                        start.into(),
                        end.into(),
                        Attribute::MethodReference { member },
                    );
                }
                TokenKind::LBracket if self.peek_kind_at(1) != TokenKind::RBracket => {
                    self.advance();
                    self.parse_expression()?;
                    self.expect(TokenKind::RBracket, "']'")?;
                    let end = self.prev_end();
                    node = self
                        .arena
                        .allocate(NodeKind::ArrayAccess, start.into(), end.into());
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let op = if self.peek_kind() == TokenKind::PlusPlus {
                        UnaryOp::Inc
                    } else {
                        UnaryOp::Dec
                    };
                    self.advance();
                    let end = self.prev_end();
                    node = self.arena.allocate_with_attribute(
                        NodeKind::PostfixExpression,
                        start.into(),
                        end.into(),
                        Attribute::UnaryExpression { op },
                    );
                }
                _ => break,
            }
        }

        Ok(node)
    }

    pub(super) fn parse_argument_list(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        self.advance(); // `(`
        if self.peek_kind() != TokenKind::RParen {
            self.parse_expression()?;
            while self.eat(TokenKind::Comma).is_some() {
                self.parse_expression()?;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        let end = self.prev_end();
        Ok(self
            .arena
            .allocate(NodeKind::ArgumentList, start.into(), end.into()))
    }

    fn parse_object_creation(&mut self, start: TextSize) -> Result<NodeId, ParseFailure> {
        self.advance(); // `new`
        if self.peek_kind() == TokenKind::Lt {
            self.parse_type_argument_list()?;
        }
        let is_diamond;
        self.try_parse_type()?;

        if self.peek_kind() == TokenKind::LBracket {
            while self.eat(TokenKind::LBracket).is_some() {
                if self.peek_kind() != TokenKind::RBracket {
                    self.parse_expression()?;
                }
                self.expect(TokenKind::RBracket, "']'")?;
            }
            if self.peek_kind() == TokenKind::LBrace {
                self.parse_array_initializer()?;
            }
            let end = self.prev_end();
            return Ok(self.arena.allocate_with_attribute(
                NodeKind::ArrayCreation,
                start.into(),
                end.into(),
                Attribute::ObjectCreation { is_diamond: false },
            ));
        }

        if self.peek_kind() == TokenKind::Lt && self.peek_kind_at(1) == TokenKind::Gt {
            self.advance();
            self.advance();
            is_diamond = true;
        } else {
            is_diamond = false;
        }

        self.parse_argument_list()?;

        if self.peek_kind() == TokenKind::LBrace {
            self.parse_class_body()?;
        }

        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::ObjectCreation,
            start.into(),
            end.into(),
            Attribute::ObjectCreation { is_diamond },
        ))
    }

    fn parse_array_initializer(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        let range = self.current_range();
        let _guard = self.enter_depth(range)?;
        self.advance(); // `{`
        if self.peek_kind() != TokenKind::RBrace {
            self.parse_array_initializer_element()?;
            while self.eat(TokenKind::Comma).is_some() {
                if self.peek_kind() == TokenKind::RBrace {
                    break;
                }
                self.parse_array_initializer_element()?;
            }
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        let end = self.prev_end();
        Ok(self
            .arena
            .allocate(NodeKind::ArrayInitializer, start.into(), end.into()))
    }

    fn parse_array_initializer_element(&mut self) -> Result<NodeId, ParseFailure> {
        if self.peek_kind() == TokenKind::LBrace {
            self.parse_array_initializer()
        } else {
            self.parse_expression()
        }
    }

    fn parse_primary_expression(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        let range = self.current_range();

        match self.peek_kind() {
            TokenKind::IntegerLiteral => {
                let tok = self.advance();
                let raw: Box<str> = self.token_text(tok).into();
                let value = parse_int_literal(&raw);
                Ok(self.arena.allocate_with_attribute(
                    NodeKind::IntegerLiteral,
                    start.into(),
                    self.prev_end().into(),
                    Attribute::IntegerLiteral { raw, value },
                ))
            }
            TokenKind::LongLiteral => {
                let tok = self.advance();
                let raw: Box<str> = self.token_text(tok).into();
                let value = parse_long_literal(&raw);
                Ok(self.arena.allocate_with_attribute(
                    NodeKind::LongLiteral,
                    start.into(),
                    self.prev_end().into(),
                    Attribute::LongLiteral { raw, value },
                ))
            }
            TokenKind::FloatLiteral => {
                let tok = self.advance();
                let raw: Box<str> = self.token_text(tok).into();
                let value: f32 = raw.trim_end_matches(['f', 'F']).replace('_', "").parse().unwrap_or(0.0);
                Ok(self.arena.allocate_with_attribute(
                    NodeKind::FloatLiteral,
                    start.into(),
                    self.prev_end().into(),
                    Attribute::FloatLiteral { raw, value },
                ))
            }
            TokenKind::DoubleLiteral => {
                let tok = self.advance();
                let raw: Box<str> = self.token_text(tok).into();
                let value: f64 = raw
                    .trim_end_matches(['d', 'D'])
                    .replace('_', "")
                    .parse()
                    .unwrap_or(0.0);
                Ok(self.arena.allocate_with_attribute(
                    NodeKind::DoubleLiteral,
                    start.into(),
                    self.prev_end().into(),
                    Attribute::DoubleLiteral { raw, value },
                ))
            }
            TokenKind::StringLiteral => {
                let tok = self.advance();
                let value = decode_string_literal(self.token_text(tok));
                Ok(self.arena.allocate_with_attribute(
                    NodeKind::StringLiteral,
                    start.into(),
                    self.prev_end().into(),
                    Attribute::StringLiteral { value },
                ))
            }
            TokenKind::TextBlock => {
                self.require_feature(Feature::TextBlocks, range)?;
                let tok = self.advance();
                let raw: Box<str> = self.token_text(tok).into();
                Ok(self.arena.allocate_with_attribute(
                    NodeKind::TextBlockLiteral,
                    start.into(),
                    self.prev_end().into(),
                    Attribute::TextBlock { raw },
                ))
            }
            TokenKind::CharLiteral => {
                let tok = self.advance();
                let value = decode_char_literal(self.token_text(tok));
                Ok(self.arena.allocate_with_attribute(
                    NodeKind::CharLiteral,
                    start.into(),
                    self.prev_end().into(),
                    Attribute::CharLiteral { value },
                ))
            }
            TokenKind::TrueKw => {
                self.advance();
                Ok(self.arena.allocate_with_attribute(
                    NodeKind::BooleanLiteral,
                    start.into(),
                    self.prev_end().into(),
                    Attribute::BooleanLiteral { value: true },
                ))
            }
            TokenKind::FalseKw => {
                self.advance();
                Ok(self.arena.allocate_with_attribute(
                    NodeKind::BooleanLiteral,
                    start.into(),
                    self.prev_end().into(),
                    Attribute::BooleanLiteral { value: false },
                ))
            }
            TokenKind::NullKw => {
                self.advance();
                Ok(self
                    .arena
                    .allocate(NodeKind::NullLiteral, start.into(), self.prev_end().into()))
            }
            TokenKind::ThisKw => {
                self.advance();
                // Always allocate the `this` node first, whether it turns
                // out to be a bare `this` reference or the callee of an
                // explicit constructor invocation `this(...)` — the latter
                // needs `this_expression` to remain a recoverable child of
                // the `method_invocation` that wraps it, the same
                // containment convention `a.foo()` already relies on for
                // its target.
                let this_node = self
                    .arena
                    .allocate(NodeKind::ThisExpression, start.into(), self.prev_end().into());
                if self.peek_kind() == TokenKind::LParen {
                    self.parse_argument_list()?;
                    return Ok(self.arena.allocate_with_attribute(
                        NodeKind::MethodInvocation,
                        start.into(),
                        self.prev_end().into(),
                        Attribute::MethodInvocation { name: "this".into() },
                    ));
                }
                Ok(this_node)
            }
            TokenKind::SuperKw => {
                self.advance();
                let super_node = self
                    .arena
                    .allocate(NodeKind::SuperExpression, start.into(), self.prev_end().into());
                if self.peek_kind() == TokenKind::LParen {
                    self.parse_argument_list()?;
                    return Ok(self.arena.allocate_with_attribute(
                        NodeKind::MethodInvocation,
                        start.into(),
                        self.prev_end().into(),
                        Attribute::MethodInvocation { name: "super".into() },
                    ));
                }
                Ok(super_node)
            }
            TokenKind::NewKw => self.parse_object_creation(start),
            TokenKind::LParen => {
                if let Some(lambda) = self.try_parse_lambda(start)? {
                    return Ok(lambda);
                }
                self.advance();
                self.parse_expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(self.arena.allocate(
                    NodeKind::ParenthesizedExpression,
                    start.into(),
                    self.prev_end().into(),
                ))
            }
            TokenKind::BooleanKw
            | TokenKind::ByteKw
            | TokenKind::ShortKw
            | TokenKind::IntKw
            | TokenKind::LongKw
            | TokenKind::CharKw
            | TokenKind::FloatKw
            | TokenKind::DoubleKw
            | TokenKind::VoidKw => {
                self.try_parse_type()?;
                while self.peek_kind() == TokenKind::LBracket && self.peek_kind_at(1) == TokenKind::RBracket {
                    self.advance();
                    self.advance();
                }
                if self.eat(TokenKind::Dot).is_some() {
                    self.expect(TokenKind::ClassKw, "'class'")?;
                }
                Ok(self.arena.allocate(
                    NodeKind::ClassLiteral,
                    start.into(),
                    self.prev_end().into(),
                ))
            }
            TokenKind::Identifier if self.peek_kind_at(1) == TokenKind::Arrow => {
                // Single untyped lambda parameter: `x -> x + 1`.
                let param_start = self.node_start();
                let name = self.identifier_text("lambda parameter name")?;
                let param_end = self.prev_end();
                self.arena.allocate_with_attribute(
                    NodeKind::ParameterDeclaration,
                    param_start.into(),
                    param_end.into(),
                    Attribute::Parameter {
                        name,
                        is_varargs: false,
                        is_final: false,
                        is_receiver: false,
                    },
                );
                self.advance(); // `->`
                self.parse_lambda_body()?;
                Ok(self.arena.allocate(
                    NodeKind::LambdaExpression,
                    start.into(),
                    self.prev_end().into(),
                ))
            }
            TokenKind::Identifier if self.peek_kind_at(1) == TokenKind::LParen => {
                let name = self.identifier_text("method name")?;
                self.parse_argument_list()?;
                Ok(self.arena.allocate_with_attribute(
                    NodeKind::MethodInvocation,
                    start.into(),
                    self.prev_end().into(),
                    Attribute::MethodInvocation { name },
                ))
            }
            TokenKind::Identifier => {
                // `var`/`record`/`yield`/etc. used as an ordinary simple
                // name (`var = 5;`, `module.forEach(...)`) are plain
                // identifiers in expression position regardless of
                // spelling; only grammar positions that call into
                // `crate::keyword::classify` treat them as keywords.
                let name = self.identifier_text("identifier")?;
                Ok(self.arena.allocate_with_attribute(
                    NodeKind::Identifier,
                    start.into(),
                    self.prev_end().into(),
                    Attribute::Identifier { text: name },
                ))
            }
            _ => Err(self.unexpected("expression")),
        }
    }
}

fn parse_int_literal(raw: &str) -> i32 {
    parse_integral(raw, false).map(|v| v as i32).unwrap_or(0)
}

fn parse_long_literal(raw: &str) -> i64 {
    let trimmed = raw.trim_end_matches(['l', 'L']);
    parse_integral(trimmed, true).unwrap_or(0)
}

/// Decodes Java's integer lexical forms into a value; out-of-range or
/// malformed input (which the lexer should already have rejected) yields
/// `None` rather than panicking.
fn parse_integral(raw: &str, _is_long: bool) -> Option<i64> {
    let raw = raw.trim_end_matches(['l', 'L']);
    let cleaned: String = raw.chars().filter(|c| *c != '_').collect();
    if let Some(hex) = cleaned.strip_prefix("0x").or_else(|| cleaned.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok();
    }
    if let Some(bin) = cleaned.strip_prefix("0b").or_else(|| cleaned.strip_prefix("0B")) {
        return i64::from_str_radix(bin, 2).ok();
    }
    if cleaned.len() > 1 && cleaned.starts_with('0') {
        return i64::from_str_radix(&cleaned[1..], 8).ok();
    }
    cleaned.parse().ok()
}

/// Decodes a string literal's escape sequences into its runtime value.
/// Malformed escapes (already rejected by the lexer) fall back to
/// best-effort passthrough rather than panicking.
fn decode_string_literal(raw: &str) -> Box<str> {
    let inner = &raw[1..raw.len().saturating_sub(1)];
    decode_escapes(inner).into()
}

fn decode_char_literal(raw: &str) -> char {
    let inner = &raw[1..raw.len().saturating_sub(1)];
    decode_escapes(inner).chars().next().unwrap_or('\0')
}

fn decode_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('b') => out.push('\u{8}'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('f') => out.push('\u{c}'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            Some('s') => out.push(' '),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                if let Some(ch) = u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    out.push(ch);
                }
            }
            Some(d @ '0'..='7') => {
                let mut digits = String::new();
                digits.push(d);
                for _ in 0..2 {
                    if matches!(chars.peek(), Some('0'..='7')) {
                        digits.push(chars.next().unwrap());
                    } else {
                        break;
                    }
                }
                if let Ok(v) = u32::from_str_radix(&digits, 8) {
                    if let Some(ch) = char::from_u32(v) {
                        out.push(ch);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
