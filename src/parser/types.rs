//! Type references: simple/qualified names, generics, wildcards, annotated
//! types, arrays, and the `var` placeholder.

use text_size::TextSize;

use crate::attrib::{Attribute, PrimitiveKind, WildcardBound};
use crate::arena::NodeId;
use crate::error::ParseFailure;
use crate::kind::NodeKind;
use crate::token::TokenKind;
use crate::version::Feature;

use super::Parser;

impl<'src> Parser<'src> {
    /// Parses a type reference, including trailing `[]` array dimensions
    /// and JSR 308 annotations on any type-use position.
    pub(super) fn parse_type(&mut self) -> Result<NodeId, ParseFailure> {
        let range = self.current_range();
        let _guard = self.enter_depth(range)?;

        let start = self.node_start();
        self.parse_annotations_prefix()?;

        let mut node = if let Some(prim) = self.try_primitive_type()? {
            prim
        } else if self.peek_kind() == TokenKind::Identifier
            && self.token_text(self.peek()) == "var"
        {
            let tok = self.advance();
            self.arena.allocate(
                NodeKind::VarType,
                tok.range.start().into(),
                tok.range.end().into(),
            )
        } else {
            self.parse_class_or_interface_type()?
        };

        while self.peek_kind() == TokenKind::LBracket {
            self.parse_annotations_prefix_peek_only()?;
            self.advance();
            self.expect(TokenKind::RBracket, "']'")?;
            let end = self.prev_end();
            node = self
                .arena
                .allocate(NodeKind::ArrayType, start.into(), end.into());
        }

        Ok(node)
    }

    /// Annotations immediately preceding a type reference or array
    /// dimension (`@NonNull String`, `String @NonNull []`). Consumed and
    /// discarded here; the `annotation` nodes themselves, not this helper,
    /// are the carrier of any payload that matters downstream.
    fn parse_annotations_prefix(&mut self) -> Result<(), ParseFailure> {
        while self.peek_kind() == TokenKind::At {
            self.parse_annotation()?;
        }
        Ok(())
    }

    fn parse_annotations_prefix_peek_only(&mut self) -> Result<(), ParseFailure> {
        self.parse_annotations_prefix()
    }

    fn try_primitive_type(&mut self) -> Result<Option<NodeId>, ParseFailure> {
        let kind = match self.peek_kind() {
            TokenKind::BooleanKw => PrimitiveKind::Boolean,
            TokenKind::ByteKw => PrimitiveKind::Byte,
            TokenKind::ShortKw => PrimitiveKind::Short,
            TokenKind::IntKw => PrimitiveKind::Int,
            TokenKind::LongKw => PrimitiveKind::Long,
            TokenKind::CharKw => PrimitiveKind::Char,
            TokenKind::FloatKw => PrimitiveKind::Float,
            TokenKind::DoubleKw => PrimitiveKind::Double,
            TokenKind::VoidKw => PrimitiveKind::Void,
            _ => return Ok(None),
        };
        let tok = self.advance();
        let id = self.arena.allocate_with_attribute(
            NodeKind::PrimitiveType,
            tok.range.start().into(),
            tok.range.end().into(),
            Attribute::PrimitiveType { kind },
        );
        Ok(Some(id))
    }

    /// `Identifier (. Identifier)*`, each segment optionally followed by a
    /// type argument list, producing nested `ParameterizedType`/
    /// `QualifiedName` nodes as needed.
    fn parse_class_or_interface_type(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        let mut node = self.parse_simple_type_segment(start)?;

        while self.peek_kind() == TokenKind::Dot
            && matches!(self.peek_kind_at(1), TokenKind::Identifier)
        {
            self.advance();
            node = self.parse_simple_type_segment(start)?;
        }

        Ok(node)
    }

    /// One dotted segment of a (possibly qualified, possibly generic) type
    /// name; `start` is the span start of the whole name, not this segment,
    /// so a later segment's node naturally contains earlier ones as
    /// children in the post-order arena.
    fn parse_simple_type_segment(&mut self, start: TextSize) -> Result<NodeId, ParseFailure> {
        let name = self.identifier_text("type name")?;
        if self.peek_kind() == TokenKind::Lt {
            self.parse_type_argument_list()?;
            let end = self.prev_end();
            return Ok(self.arena.allocate_with_attribute(
                NodeKind::ParameterizedType,
                start.into(),
                end.into(),
                Attribute::QualifiedName { text: name },
            ));
        }
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::QualifiedName,
            start.into(),
            end.into(),
            Attribute::QualifiedName { text: name },
        ))
    }

    /// `< TypeArgument (, TypeArgument)* >`, where `>` may need splitting
    /// out of a wider shift-operator token.
    pub(super) fn parse_type_argument_list(&mut self) -> Result<NodeId, ParseFailure> {
        let range = self.current_range();
        let _guard = self.enter_depth(range)?;
        let start = self.node_start();
        self.expect(TokenKind::Lt, "'<'")?;

        if matches!(self.peek_kind(), TokenKind::Gt | TokenKind::Shr | TokenKind::UShr) {
            // Diamond operator handled by caller; an empty list here is
            // still valid (`Foo<>`).
        } else {
            self.parse_type_argument()?;
            while self.eat(TokenKind::Comma).is_some() {
                self.parse_type_argument()?;
            }
        }
        self.split_gt();
        let end = self.prev_end();
        Ok(self
            .arena
            .allocate(NodeKind::TypeArgumentList, start.into(), end.into()))
    }

    fn parse_type_argument(&mut self) -> Result<NodeId, ParseFailure> {
        if self.peek_kind() == TokenKind::Question {
            return self.parse_wildcard_type();
        }
        self.parse_type()
    }

    fn parse_wildcard_type(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        self.advance();
        let bound = if self.peek_kind() == TokenKind::ExtendsKw {
            self.advance();
            self.parse_type()?;
            WildcardBound::Extends
        } else if self.at_contextual_super() {
            self.advance();
            self.parse_type()?;
            WildcardBound::Super
        } else {
            WildcardBound::Unbounded
        };
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::WildcardType,
            start.into(),
            end.into(),
            Attribute::WildcardType { bound },
        ))
    }

    fn at_contextual_super(&self) -> bool {
        self.peek_kind() == TokenKind::SuperKw
    }

    /// Parses a single type parameter (`T`, `T extends Foo & Bar`) as part
    /// of a declaration's `<...>` type-parameter list.
    pub(super) fn parse_type_parameter(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        self.parse_annotations_prefix()?;
        let name = self.identifier_text("type parameter name")?;
        if self.eat(TokenKind::ExtendsKw).is_some() {
            self.parse_type()?;
            while self.eat(TokenKind::Amp).is_some() {
                self.parse_type()?;
            }
        }
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::TypeParameter,
            start.into(),
            end.into(),
            Attribute::TypeParameter { name },
        ))
    }

    /// `< TypeParameter (, TypeParameter)* >`, used by generic methods,
    /// constructors, and type declarations.
    pub(super) fn parse_type_parameter_list(&mut self) -> Result<Vec<NodeId>, ParseFailure> {
        self.expect(TokenKind::Lt, "'<'")?;
        let mut params = vec![self.parse_type_parameter()?];
        while self.eat(TokenKind::Comma).is_some() {
            params.push(self.parse_type_parameter()?);
        }
        self.split_gt();
        Ok(params)
    }

    /// Tries to parse a type, falling back cleanly when the current
    /// position cannot start one (used by disambiguation in `expr.rs`).
    pub(super) fn try_parse_type(&mut self) -> Result<NodeId, ParseFailure> {
        match self.peek_kind() {
            TokenKind::Identifier
            | TokenKind::BooleanKw
            | TokenKind::ByteKw
            | TokenKind::ShortKw
            | TokenKind::IntKw
            | TokenKind::LongKw
            | TokenKind::CharKw
            | TokenKind::FloatKw
            | TokenKind::DoubleKw
            | TokenKind::VoidKw
            | TokenKind::At => self.parse_type(),
            _ => Err(self.unexpected("type")),
        }
    }

    pub(super) fn feature_var(&self, range: text_size::TextRange) -> Result<(), ParseFailure> {
        self.require_feature(Feature::VarLocalInference, range)
    }
}
