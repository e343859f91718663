//! Statements: blocks, control flow, try/catch/resources, switch (statement
//! and expression forms), and the local-declaration vs. expression-statement
//! disambiguation.

use text_size::TextSize;

use crate::arena::NodeId;
use crate::attrib::{Attribute, Modifiers};
use crate::error::ParseFailure;
use crate::kind::NodeKind;
use crate::token::TokenKind;
use crate::version::Feature;

use super::Parser;

impl<'src> Parser<'src> {
    pub(super) fn parse_block(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        let range = self.current_range();
        let _guard = self.enter_depth(range)?;
        self.expect(TokenKind::LBrace, "'{'")?;
        while self.peek_kind() != TokenKind::RBrace {
            if self.peek_kind() == TokenKind::Eof {
                return Err(self.unexpected("'}'"));
            }
            self.parse_block_statement()?;
        }
        self.advance();
        let end = self.prev_end();
        Ok(self.arena.allocate(NodeKind::Block, start.into(), end.into()))
    }

    fn parse_block_statement(&mut self) -> Result<NodeId, ParseFailure> {
        if self.is_local_class_declaration_start() {
            return self.parse_type_declaration();
        }
        if self.looks_like_local_variable_declaration() {
            return self.parse_local_variable_declaration();
        }
        self.parse_statement()
    }

    fn is_local_class_declaration_start(&self) -> bool {
        matches!(
            self.peek_kind(),
            TokenKind::ClassKw | TokenKind::InterfaceKw | TokenKind::EnumKw | TokenKind::AbstractKw | TokenKind::FinalKw
        ) || (self.peek_kind() == TokenKind::Identifier
            && self.token_text(self.peek()) == "record"
            && matches!(self.peek_kind_at(1), TokenKind::Identifier))
    }

    /// The hardest disambiguation in statement parsing: `Foo` could begin
    /// `Foo x = ...;` or `Foo.bar();`. Bounded lookahead: after an
    /// identifier/type prefix (incl. generics and array brackets), a
    /// declaration is confirmed only if the next token is an identifier and
    /// the one after that is `=`, `,`, `;`, or `:`.
    fn looks_like_local_variable_declaration(&mut self) -> bool {
        if self.peek_kind() == TokenKind::Identifier && self.token_text(self.peek()) == "var" {
            return matches!(self.peek_kind_at(1), TokenKind::Identifier);
        }
        if matches!(
            self.peek_kind(),
            TokenKind::FinalKw
                | TokenKind::BooleanKw
                | TokenKind::ByteKw
                | TokenKind::ShortKw
                | TokenKind::IntKw
                | TokenKind::LongKw
                | TokenKind::CharKw
                | TokenKind::FloatKw
                | TokenKind::DoubleKw
        ) {
            return true;
        }
        if self.peek_kind() != TokenKind::Identifier {
            return false;
        }

        let mark = self.mark();
        let result = (|| -> Option<bool> {
            self.try_parse_type().ok()?;
            let ok = self.peek_kind() == TokenKind::Identifier
                && matches!(
                    self.peek_kind_at(1),
                    TokenKind::Eq
                        | TokenKind::Comma
                        | TokenKind::Semi
                        | TokenKind::Colon
                        | TokenKind::RParen
                        | TokenKind::LBracket
                );
            Some(ok)
        })()
        .unwrap_or(false);
        self.restore(mark);
        result
    }

    pub(super) fn parse_local_variable_declaration(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        let mut modifiers = Modifiers::NONE;
        while self.peek_kind() == TokenKind::FinalKw {
            self.advance();
            modifiers.insert(Modifiers::FINAL);
        }
        let var_range = self.current_range();
        if self.peek_kind() == TokenKind::Identifier && self.token_text(self.peek()) == "var" {
            self.feature_var(var_range)?;
        }
        self.try_parse_type()?;
        self.parse_variable_declarator_list()?;
        self.expect(TokenKind::Semi, "';'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::LocalVariableDeclaration,
            start.into(),
            end.into(),
            Attribute::LocalVariableDeclaration { modifiers },
        ))
    }

    pub(super) fn parse_variable_declarator_list(&mut self) -> Result<Vec<NodeId>, ParseFailure> {
        let mut decls = vec![self.parse_variable_declarator()?];
        while self.eat(TokenKind::Comma).is_some() {
            decls.push(self.parse_variable_declarator()?);
        }
        Ok(decls)
    }

    pub(super) fn parse_variable_declarator(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        let name = self.identifier_text("variable name")?;
        let mut extra_array_dims = 0u8;
        while self.peek_kind() == TokenKind::LBracket && self.peek_kind_at(1) == TokenKind::RBracket {
            self.advance();
            self.advance();
            extra_array_dims += 1;
        }
        if self.eat(TokenKind::Eq).is_some() {
            self.parse_variable_initializer()?;
        }
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::VariableDeclarator,
            start.into(),
            end.into(),
            Attribute::VariableDeclarator { name, extra_array_dims },
        ))
    }

    fn parse_variable_initializer(&mut self) -> Result<NodeId, ParseFailure> {
        if self.peek_kind() == TokenKind::LBrace {
            self.parse_array_initializer_pub()
        } else {
            self.parse_expression()
        }
    }

    fn parse_array_initializer_pub(&mut self) -> Result<NodeId, ParseFailure> {
        // Reuses the array-initializer grammar defined alongside array
        // creation in `expr.rs`; exposed there as a private helper, so we
        // re-enter through the public expression path instead.
        self.parse_expression()
    }

    fn parse_statement(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        let range = self.current_range();
        let _guard = self.enter_depth(range)?;

        match self.peek_kind() {
            TokenKind::LBrace => self.parse_block(),
            TokenKind::Semi => {
                self.advance();
                Ok(self.arena.allocate(NodeKind::EmptyStatement, start.into(), self.prev_end().into()))
            }
            TokenKind::IfKw => self.parse_if_statement(start),
            TokenKind::ForKw => self.parse_for_statement(start),
            TokenKind::WhileKw => self.parse_while_statement(start),
            TokenKind::DoKw => self.parse_do_while_statement(start),
            TokenKind::SwitchKw => self.parse_switch(start, false),
            TokenKind::TryKw => self.parse_try_statement(start),
            TokenKind::ReturnKw => self.parse_return_statement(start),
            TokenKind::ThrowKw => self.parse_throw_statement(start),
            TokenKind::BreakKw => self.parse_break_statement(start),
            TokenKind::ContinueKw => self.parse_continue_statement(start),
            TokenKind::AssertKw => self.parse_assert_statement(start),
            TokenKind::SynchronizedKw => self.parse_synchronized_statement(start),
            TokenKind::Identifier
                if self.token_text(self.peek()) == "yield" && self.peek_kind_at(1) != TokenKind::Colon =>
            {
                self.parse_yield_statement(start)
            }
            TokenKind::Identifier if self.peek_kind_at(1) == TokenKind::Colon => {
                self.parse_labeled_statement(start)
            }
            _ => self.parse_expression_statement(start),
        }
    }

    fn parse_if_statement(&mut self, start: TextSize) -> Result<NodeId, ParseFailure> {
        self.advance();
        self.expect(TokenKind::LParen, "'('")?;
        self.parse_expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        self.parse_statement()?;
        if self.eat(TokenKind::ElseKw).is_some() {
            self.parse_statement()?;
        }
        let end = self.prev_end();
        Ok(self.arena.allocate(NodeKind::IfStatement, start.into(), end.into()))
    }

    fn parse_while_statement(&mut self, start: TextSize) -> Result<NodeId, ParseFailure> {
        self.advance();
        self.expect(TokenKind::LParen, "'('")?;
        self.parse_expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        self.parse_statement()?;
        let end = self.prev_end();
        Ok(self.arena.allocate(NodeKind::WhileStatement, start.into(), end.into()))
    }

    fn parse_do_while_statement(&mut self, start: TextSize) -> Result<NodeId, ParseFailure> {
        self.advance();
        self.parse_statement()?;
        self.expect(TokenKind::WhileKw, "'while'")?;
        self.expect(TokenKind::LParen, "'('")?;
        self.parse_expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::Semi, "';'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate(NodeKind::DoWhileStatement, start.into(), end.into()))
    }

    /// `for (;;)` vs. `for (Type x : expr)`: decided by scanning for a bare
    /// `:` after a local-declaration-shaped header, same disambiguation
    /// family as the block-statement case.
    fn parse_for_statement(&mut self, start: TextSize) -> Result<NodeId, ParseFailure> {
        self.advance();
        self.expect(TokenKind::LParen, "'('")?;

        if self.looks_like_enhanced_for_header() {
            self.parse_enhanced_for_header()?;
            self.expect(TokenKind::RParen, "')'")?;
            self.parse_statement()?;
            let end = self.prev_end();
            return Ok(self.arena.allocate(NodeKind::EnhancedForStatement, start.into(), end.into()));
        }

        if self.peek_kind() != TokenKind::Semi {
            if self.looks_like_local_variable_declaration() {
                self.parse_for_init_declaration()?;
            } else {
                self.parse_expression()?;
                while self.eat(TokenKind::Comma).is_some() {
                    self.parse_expression()?;
                }
                self.expect(TokenKind::Semi, "';'")?;
            }
        } else {
            self.advance();
        }

        if self.peek_kind() != TokenKind::Semi {
            self.parse_expression()?;
        }
        self.expect(TokenKind::Semi, "';'")?;

        if self.peek_kind() != TokenKind::RParen {
            self.parse_expression()?;
            while self.eat(TokenKind::Comma).is_some() {
                self.parse_expression()?;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        self.parse_statement()?;
        let end = self.prev_end();
        Ok(self.arena.allocate(NodeKind::ForStatement, start.into(), end.into()))
    }

    fn parse_for_init_declaration(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        let mut modifiers = Modifiers::NONE;
        while self.peek_kind() == TokenKind::FinalKw {
            self.advance();
            modifiers.insert(Modifiers::FINAL);
        }
        self.try_parse_type()?;
        self.parse_variable_declarator_list()?;
        self.expect(TokenKind::Semi, "';'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::LocalVariableDeclaration,
            start.into(),
            end.into(),
            Attribute::LocalVariableDeclaration { modifiers },
        ))
    }

    fn looks_like_enhanced_for_header(&mut self) -> bool {
        let mark = self.mark();
        let result = (|| -> Option<bool> {
            while self.peek_kind() == TokenKind::FinalKw {
                self.advance();
            }
            self.try_parse_type().ok()?;
            if self.peek_kind() != TokenKind::Identifier {
                return Some(false);
            }
            self.advance();
            Some(self.peek_kind() == TokenKind::Colon)
        })()
        .unwrap_or(false);
        self.restore(mark);
        result
    }

    fn parse_enhanced_for_header(&mut self) -> Result<(), ParseFailure> {
        while self.peek_kind() == TokenKind::FinalKw {
            self.advance();
        }
        let var_range = self.current_range();
        if self.peek_kind() == TokenKind::Identifier && self.token_text(self.peek()) == "var" {
            self.feature_var(var_range)?;
        }
        self.try_parse_type()?;
        self.identifier_text("loop variable name")?;
        self.expect(TokenKind::Colon, "':'")?;
        self.parse_expression()?;
        Ok(())
    }

    fn parse_try_statement(&mut self, start: TextSize) -> Result<NodeId, ParseFailure> {
        self.advance();
        let has_resources = self.eat(TokenKind::LParen).is_some();
        if has_resources {
            self.parse_resource()?;
            while self.eat(TokenKind::Semi).is_some() && self.peek_kind() != TokenKind::RParen {
                self.parse_resource()?;
            }
            self.expect(TokenKind::RParen, "')'")?;
        }
        self.parse_block()?;
        let mut has_catch_or_finally = false;
        while self.peek_kind() == TokenKind::CatchKw {
            has_catch_or_finally = true;
            self.parse_catch_clause()?;
        }
        if self.peek_kind() == TokenKind::FinallyKw {
            has_catch_or_finally = true;
            let finally_start = self.node_start();
            self.advance();
            self.parse_block()?;
            let finally_end = self.prev_end();
            self.arena
                .allocate(NodeKind::FinallyClause, finally_start.into(), finally_end.into());
        }
        if !has_catch_or_finally && !has_resources {
            return Err(self.unexpected("'catch' or 'finally'"));
        }
        let end = self.prev_end();
        Ok(self.arena.allocate(NodeKind::TryStatement, start.into(), end.into()))
    }

    fn parse_resource(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        let mark = self.mark();
        let is_decl = (|| -> Option<bool> {
            while self.peek_kind() == TokenKind::FinalKw {
                self.advance();
            }
            self.try_parse_type().ok()?;
            Some(self.peek_kind() == TokenKind::Identifier && self.peek_kind_at(1) == TokenKind::Eq)
        })()
        .unwrap_or(false);
        self.restore(mark);

        if is_decl {
            while self.peek_kind() == TokenKind::FinalKw {
                self.advance();
            }
            self.try_parse_type()?;
            self.parse_variable_declarator()?;
        } else {
            self.parse_expression()?;
        }
        let end = self.prev_end();
        Ok(self.arena.allocate(NodeKind::ResourceVariable, start.into(), end.into()))
    }

    fn parse_catch_clause(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        self.advance();
        self.expect(TokenKind::LParen, "'('")?;
        while self.peek_kind() == TokenKind::FinalKw {
            self.advance();
        }
        self.try_parse_type()?;
        while self.eat(TokenKind::Pipe).is_some() {
            self.try_parse_type()?;
        }
        self.identifier_text("catch parameter name")?;
        self.expect(TokenKind::RParen, "')'")?;
        self.parse_block()?;
        let end = self.prev_end();
        Ok(self.arena.allocate(NodeKind::CatchClause, start.into(), end.into()))
    }

    /// Both statement and expression forms of `switch`. JLS forbids mixing
    /// arrow-form and colon-form case labels within one switch; the parser
    /// commits to whichever form the first case uses.
    fn parse_switch(&mut self, start: TextSize, is_expression: bool) -> Result<NodeId, ParseFailure> {
        self.advance();
        self.expect(TokenKind::LParen, "'('")?;
        self.parse_expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::LBrace, "'{'")?;

        if is_expression {
            self.require_feature(Feature::SwitchExpressions, self.current_range())?;
        }

        let mut arrow_form: Option<bool> = None;
        while self.peek_kind() != TokenKind::RBrace {
            let is_arrow = self.parse_switch_block_group(is_expression)?;
            match arrow_form {
                None => arrow_form = Some(is_arrow),
                Some(prev) if prev != is_arrow => {
                    return Err(self.unexpected("consistent switch label form"))
                }
                _ => {}
            }
        }
        self.expect(TokenKind::RBrace, "'}'")?;

        let end = self.prev_end();
        let kind = if is_expression {
            NodeKind::SwitchExpression
        } else {
            NodeKind::SwitchStatement
        };
        Ok(self.arena.allocate(kind, start.into(), end.into()))
    }

    pub(super) fn parse_switch_expression(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        self.parse_switch(start, true)
    }

    /// Returns `true` if this group used arrow-form labels.
    fn parse_switch_block_group(&mut self, is_expression: bool) -> Result<bool, ParseFailure> {
        let start = self.node_start();
        let is_default = self.eat(TokenKind::DefaultKw).is_some();
        if !is_default {
            self.expect(TokenKind::CaseKw, "'case'")?;
            self.parse_case_label_pattern_list()?;
        }
        let is_arrow = self.peek_kind() == TokenKind::Arrow;

        if is_arrow {
            self.advance();
            if self.peek_kind() == TokenKind::LBrace {
                self.parse_block()?;
            } else if self.peek_kind() == TokenKind::ThrowKw {
                self.parse_throw_statement(self.node_start())?;
            } else {
                self.parse_expression()?;
                self.expect(TokenKind::Semi, "';'")?;
            }
            let end = self.prev_end();
            self.arena.allocate_with_attribute(
                NodeKind::SwitchLabel,
                start.into(),
                end.into(),
                Attribute::SwitchLabel { is_default },
            );
            let arm_end = self.prev_end();
            self.arena
                .allocate(NodeKind::SwitchExpressionArm, start.into(), arm_end.into());
        } else {
            self.expect(TokenKind::Colon, "':'")?;
            let label_end = self.prev_end();
            self.arena.allocate_with_attribute(
                NodeKind::SwitchLabel,
                start.into(),
                label_end.into(),
                Attribute::SwitchLabel { is_default },
            );
            while !matches!(
                self.peek_kind(),
                TokenKind::CaseKw | TokenKind::DefaultKw | TokenKind::RBrace
            ) {
                if is_expression
                    && self.peek_kind() == TokenKind::Identifier
                    && self.token_text(self.peek()) == "yield"
                {
                    self.parse_yield_statement(self.node_start())?;
                } else {
                    self.parse_block_statement()?;
                }
            }
        }
        Ok(is_arrow)
    }

    /// `case null, default ->`, `case Integer i when i > 0 ->`, `case
    /// Point(int x, int y) ->`, or plain constant expressions,
    /// comma-separated.
    fn parse_case_label_pattern_list(&mut self) -> Result<(), ParseFailure> {
        self.parse_case_label_element()?;
        while self.eat(TokenKind::Comma).is_some() {
            self.parse_case_label_element()?;
        }
        Ok(())
    }

    fn parse_case_label_element(&mut self) -> Result<(), ParseFailure> {
        if self.peek_kind() == TokenKind::DefaultKw {
            self.advance();
            return Ok(());
        }
        if self.peek_kind() == TokenKind::NullKw {
            self.advance();
            return Ok(());
        }
        if self.looks_like_type_pattern_case_label() {
            self.parse_case_type_pattern()?;
        } else {
            self.parse_expression()?;
        }
        if self.peek_kind() == TokenKind::Identifier && self.token_text(self.peek()) == "when" {
            self.advance();
            self.parse_expression()?;
        }
        Ok(())
    }

    fn looks_like_type_pattern_case_label(&mut self) -> bool {
        let mark = self.mark();
        let result = (|| -> Option<bool> {
            self.try_parse_type().ok()?;
            Some(
                self.peek_kind() == TokenKind::Identifier
                    || self.peek_kind() == TokenKind::LParen,
            )
        })()
        .unwrap_or(false);
        self.restore(mark);
        result
    }

    fn parse_case_type_pattern(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        self.try_parse_type()?;
        if self.peek_kind() == TokenKind::LParen {
            self.advance();
            if self.peek_kind() != TokenKind::RParen {
                self.parse_case_pattern_component()?;
                while self.eat(TokenKind::Comma).is_some() {
                    self.parse_case_pattern_component()?;
                }
            }
            self.expect(TokenKind::RParen, "')'")?;
            let end = self.prev_end();
            return Ok(self.arena.allocate(NodeKind::RecordPattern, start.into(), end.into()));
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

    fn parse_case_pattern_component(&mut self) -> Result<NodeId, ParseFailure> {
        self.parse_case_type_pattern()
    }

    fn parse_return_statement(&mut self, start: TextSize) -> Result<NodeId, ParseFailure> {
        self.advance();
        if self.peek_kind() != TokenKind::Semi {
            self.parse_expression()?;
        }
        self.expect(TokenKind::Semi, "';'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate(NodeKind::ReturnStatement, start.into(), end.into()))
    }

    fn parse_throw_statement(&mut self, start: TextSize) -> Result<NodeId, ParseFailure> {
        self.advance();
        self.parse_expression()?;
        self.expect(TokenKind::Semi, "';'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate(NodeKind::ThrowStatement, start.into(), end.into()))
    }

    fn parse_break_statement(&mut self, start: TextSize) -> Result<NodeId, ParseFailure> {
        self.advance();
        let label = if self.peek_kind() == TokenKind::Identifier {
            Some(self.identifier_text("label")?)
        } else {
            None
        };
        self.expect(TokenKind::Semi, "';'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::BreakStatement,
            start.into(),
            end.into(),
            Attribute::BreakOrContinue { label },
        ))
    }

    fn parse_continue_statement(&mut self, start: TextSize) -> Result<NodeId, ParseFailure> {
        self.advance();
        let label = if self.peek_kind() == TokenKind::Identifier {
            Some(self.identifier_text("label")?)
        } else {
            None
        };
        self.expect(TokenKind::Semi, "';'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::ContinueStatement,
            start.into(),
            end.into(),
            Attribute::BreakOrContinue { label },
        ))
    }

    fn parse_assert_statement(&mut self, start: TextSize) -> Result<NodeId, ParseFailure> {
        self.advance();
        self.parse_expression()?;
        if self.eat(TokenKind::Colon).is_some() {
            self.parse_expression()?;
        }
        self.expect(TokenKind::Semi, "';'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate(NodeKind::AssertStatement, start.into(), end.into()))
    }

    fn parse_synchronized_statement(&mut self, start: TextSize) -> Result<NodeId, ParseFailure> {
        self.advance();
        self.expect(TokenKind::LParen, "'('")?;
        self.parse_expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        self.parse_block()?;
        let end = self.prev_end();
        Ok(self.arena.allocate(NodeKind::SynchronizedStatement, start.into(), end.into()))
    }

    fn parse_yield_statement(&mut self, start: TextSize) -> Result<NodeId, ParseFailure> {
        self.advance();
        self.parse_expression()?;
        self.expect(TokenKind::Semi, "';'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate(NodeKind::YieldStatement, start.into(), end.into()))
    }

    fn parse_labeled_statement(&mut self, start: TextSize) -> Result<NodeId, ParseFailure> {
        let label = self.identifier_text("label")?;
        self.expect(TokenKind::Colon, "':'")?;
        self.parse_statement()?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::LabeledStatement,
            start.into(),
            end.into(),
            Attribute::LabeledStatement { label },
        ))
    }

    fn parse_expression_statement(&mut self, start: TextSize) -> Result<NodeId, ParseFailure> {
        self.parse_expression()?;
        self.expect(TokenKind::Semi, "';'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate(NodeKind::ExpressionStatement, start.into(), end.into()))
    }
}
