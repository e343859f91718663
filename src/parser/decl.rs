//! Declarations: package/import headers, type declarations
//! (class/interface/enum/record/`@interface`) and their members, annotations,
//! and the class-body/member grammar shared by top-level, nested, local, and
//! anonymous classes.

use text_size::TextSize;

use crate::arena::NodeId;
use crate::attrib::{Attribute, Modifiers};
use crate::error::ParseFailure;
use crate::kind::NodeKind;
use crate::token::TokenKind;
use crate::version::Feature;

use super::Parser;

impl<'src> Parser<'src> {
    pub(super) fn parse_package_declaration(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        while self.peek_kind() == TokenKind::At {
            self.parse_annotation()?;
        }
        self.expect(TokenKind::PackageKw, "'package'")?;
        let name = self.parse_dotted_name("package name")?;
        self.expect(TokenKind::Semi, "';'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::PackageDeclaration,
            start.into(),
            end.into(),
            Attribute::Package { name },
        ))
    }

    pub(super) fn parse_import_declaration(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        self.expect(TokenKind::ImportKw, "'import'")?;
        let is_static = self.eat(TokenKind::StaticKw).is_some();
        let mut text = String::new();
        text.push_str(&self.identifier_text("import name")?);
        let mut is_on_demand = false;
        loop {
            if self.peek_kind() == TokenKind::Dot && self.peek_kind_at(1) == TokenKind::Star {
                self.advance();
                self.advance();
                is_on_demand = true;
                break;
            }
            if self.peek_kind() == TokenKind::Dot && self.peek_kind_at(1) == TokenKind::Identifier {
                self.advance();
                text.push('.');
                text.push_str(&self.identifier_text("import name")?);
                continue;
            }
            break;
        }
        self.expect(TokenKind::Semi, "';'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::ImportDeclaration,
            start.into(),
            end.into(),
            Attribute::Import {
                qualified_name: text.into(),
                is_static,
                is_on_demand,
            },
        ))
    }

    /// `Identifier (. Identifier)*`, shared by package/import names, module
    /// and directive names, and annotation type names — none of which carry
    /// type arguments, unlike `types::parse_class_or_interface_type`.
    pub(super) fn parse_dotted_name(&mut self, what: &'static str) -> Result<Box<str>, ParseFailure> {
        let mut text = String::new();
        text.push_str(&self.identifier_text(what)?);
        while self.peek_kind() == TokenKind::Dot && self.peek_kind_at(1) == TokenKind::Identifier {
            self.advance();
            text.push('.');
            text.push_str(&self.identifier_text(what)?);
        }
        Ok(text.into())
    }

    /// Entry point for a top-level or local type declaration. Nested
    /// declarations inside a class body go through
    /// [`Parser::parse_nested_type_declaration`] directly since their
    /// modifiers are already parsed by [`Parser::parse_class_member`].
    pub(super) fn parse_type_declaration(&mut self) -> Result<NodeId, ParseFailure> {
        let range = self.current_range();
        let _guard = self.enter_depth(range)?;
        let start = self.node_start();
        let modifiers = self.parse_modifiers_and_annotations()?;
        if !self.is_nested_type_declaration_start() {
            return Err(self.unexpected("type declaration"));
        }
        self.parse_nested_type_declaration(start, modifiers)
    }

    fn is_nested_type_declaration_start(&self) -> bool {
        matches!(
            self.peek_kind(),
            TokenKind::ClassKw | TokenKind::InterfaceKw | TokenKind::EnumKw
        ) || (self.peek_kind() == TokenKind::At && self.peek_kind_at(1) == TokenKind::InterfaceKw)
            || (self.peek_kind() == TokenKind::Identifier
                && self.peek_text_at(0) == "record"
                && matches!(self.peek_kind_at(1), TokenKind::Identifier))
    }

    fn parse_nested_type_declaration(
        &mut self,
        start: TextSize,
        modifiers: Modifiers,
    ) -> Result<NodeId, ParseFailure> {
        match self.peek_kind() {
            TokenKind::ClassKw => self.parse_class_declaration(start, modifiers),
            TokenKind::InterfaceKw => self.parse_interface_declaration(start, modifiers),
            TokenKind::EnumKw => self.parse_enum_declaration(start, modifiers),
            TokenKind::At => self.parse_annotation_type_declaration(start, modifiers),
            _ => self.parse_record_declaration(start, modifiers),
        }
    }

    /// Modifiers and annotations common to type declarations and members.
    /// `sealed`/`non-sealed` are only reachable here, at a declaration-header
    /// position, matching
    /// the contextual-keyword gating already used by `stmt.rs`'s `yield`/
    /// `when` handling rather than routing through `crate::keyword`.
    fn parse_modifiers_and_annotations(&mut self) -> Result<Modifiers, ParseFailure> {
        let mut modifiers = Modifiers::NONE;
        loop {
            match self.peek_kind() {
                TokenKind::PublicKw => {
                    self.advance();
                    modifiers.insert(Modifiers::PUBLIC);
                }
                TokenKind::PrivateKw => {
                    self.advance();
                    modifiers.insert(Modifiers::PRIVATE);
                }
                TokenKind::ProtectedKw => {
                    self.advance();
                    modifiers.insert(Modifiers::PROTECTED);
                }
                TokenKind::StaticKw => {
                    self.advance();
                    modifiers.insert(Modifiers::STATIC);
                }
                TokenKind::FinalKw => {
                    self.advance();
                    modifiers.insert(Modifiers::FINAL);
                }
                TokenKind::AbstractKw => {
                    self.advance();
                    modifiers.insert(Modifiers::ABSTRACT);
                }
                TokenKind::NativeKw => {
                    self.advance();
                    modifiers.insert(Modifiers::NATIVE);
                }
                TokenKind::SynchronizedKw => {
                    self.advance();
                    modifiers.insert(Modifiers::SYNCHRONIZED);
                }
                TokenKind::TransientKw => {
                    self.advance();
                    modifiers.insert(Modifiers::TRANSIENT);
                }
                TokenKind::VolatileKw => {
                    self.advance();
                    modifiers.insert(Modifiers::VOLATILE);
                }
                TokenKind::StrictfpKw => {
                    self.advance();
                    modifiers.insert(Modifiers::STRICTFP);
                }
                TokenKind::DefaultKw => {
                    self.advance();
                    modifiers.insert(Modifiers::DEFAULT);
                }
                TokenKind::At if self.peek_kind_at(1) != TokenKind::InterfaceKw => {
                    self.parse_annotation()?;
                }
                TokenKind::Identifier if self.peek_text_at(0) == "sealed" => {
                    let range = self.current_range();
                    self.require_feature(Feature::SealedClasses, range)?;
                    self.advance();
                    modifiers.insert(Modifiers::SEALED);
                }
                TokenKind::Identifier if self.at_non_sealed() => {
                    let range = self.current_range();
                    self.require_feature(Feature::SealedClasses, range)?;
                    self.advance();
                    self.advance();
                    self.advance();
                    modifiers.insert(Modifiers::NON_SEALED);
                }
                _ => break,
            }
        }
        Ok(modifiers)
    }

    fn parse_permits_clause(&mut self) -> Result<(), ParseFailure> {
        if self.peek_kind() == TokenKind::Identifier && self.peek_text_at(0) == "permits" {
            let range = self.current_range();
            self.require_feature(Feature::SealedClasses, range)?;
            self.advance();
            self.parse_type()?;
            while self.eat(TokenKind::Comma).is_some() {
                self.parse_type()?;
            }
        }
        Ok(())
    }

    fn parse_class_declaration(
        &mut self,
        start: TextSize,
        modifiers: Modifiers,
    ) -> Result<NodeId, ParseFailure> {
        self.advance(); // 'class'
        let name = self.identifier_text("class name")?;
        if self.peek_kind() == TokenKind::Lt {
            self.parse_type_parameter_list()?;
        }
        if self.eat(TokenKind::ExtendsKw).is_some() {
            self.parse_type()?;
        }
        if self.eat(TokenKind::ImplementsKw).is_some() {
            self.parse_type()?;
            while self.eat(TokenKind::Comma).is_some() {
                self.parse_type()?;
            }
        }
        self.parse_permits_clause()?;
        self.parse_class_body()?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::ClassDeclaration,
            start.into(),
            end.into(),
            Attribute::TypeDeclaration { name, modifiers },
        ))
    }

    fn parse_interface_declaration(
        &mut self,
        start: TextSize,
        modifiers: Modifiers,
    ) -> Result<NodeId, ParseFailure> {
        self.advance(); // 'interface'
        let name = self.identifier_text("interface name")?;
        if self.peek_kind() == TokenKind::Lt {
            self.parse_type_parameter_list()?;
        }
        if self.eat(TokenKind::ExtendsKw).is_some() {
            self.parse_type()?;
            while self.eat(TokenKind::Comma).is_some() {
                self.parse_type()?;
            }
        }
        self.parse_permits_clause()?;
        self.parse_class_body()?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::InterfaceDeclaration,
            start.into(),
            end.into(),
            Attribute::TypeDeclaration { name, modifiers },
        ))
    }

    fn parse_enum_declaration(
        &mut self,
        start: TextSize,
        modifiers: Modifiers,
    ) -> Result<NodeId, ParseFailure> {
        self.advance(); // 'enum'
        let name = self.identifier_text("enum name")?;
        if self.eat(TokenKind::ImplementsKw).is_some() {
            self.parse_type()?;
            while self.eat(TokenKind::Comma).is_some() {
                self.parse_type()?;
            }
        }
        self.expect(TokenKind::LBrace, "'{'")?;
        if !matches!(self.peek_kind(), TokenKind::Semi | TokenKind::RBrace) {
            self.parse_enum_constant()?;
            while self.eat(TokenKind::Comma).is_some() {
                if matches!(self.peek_kind(), TokenKind::Semi | TokenKind::RBrace) {
                    break;
                }
                self.parse_enum_constant()?;
            }
        }
        if self.eat(TokenKind::Semi).is_some() {
            while self.peek_kind() != TokenKind::RBrace {
                if self.eat(TokenKind::Semi).is_some() {
                    continue;
                }
                self.parse_class_member()?;
            }
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::EnumDeclaration,
            start.into(),
            end.into(),
            Attribute::TypeDeclaration { name, modifiers },
        ))
    }

    fn parse_enum_constant(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        while self.peek_kind() == TokenKind::At {
            self.parse_annotation()?;
        }
        let name = self.identifier_text("enum constant name")?;
        if self.peek_kind() == TokenKind::LParen {
            self.parse_argument_list()?;
        }
        if self.peek_kind() == TokenKind::LBrace {
            self.parse_class_body()?;
        }
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::EnumConstant,
            start.into(),
            end.into(),
            Attribute::EnumConstant { name },
        ))
    }

    fn parse_record_declaration(
        &mut self,
        start: TextSize,
        modifiers: Modifiers,
    ) -> Result<NodeId, ParseFailure> {
        let kw_range = self.current_range();
        self.require_feature(Feature::RecordDeclarations, kw_range)?;
        self.advance(); // 'record'
        let name = self.identifier_text("record name")?;
        if self.peek_kind() == TokenKind::Lt {
            self.parse_type_parameter_list()?;
        }
        self.expect(TokenKind::LParen, "'('")?;
        if self.peek_kind() != TokenKind::RParen {
            self.parse_record_component()?;
            while self.eat(TokenKind::Comma).is_some() {
                self.parse_record_component()?;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        if self.eat(TokenKind::ImplementsKw).is_some() {
            self.parse_type()?;
            while self.eat(TokenKind::Comma).is_some() {
                self.parse_type()?;
            }
        }
        self.parse_class_body()?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::RecordDeclaration,
            start.into(),
            end.into(),
            Attribute::TypeDeclaration { name, modifiers },
        ))
    }

    fn parse_record_component(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        while self.peek_kind() == TokenKind::At {
            self.parse_annotation()?;
        }
        self.parse_type()?;
        let is_varargs = self.eat(TokenKind::DotDotDot).is_some();
        let name = self.identifier_text("record component name")?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::ParameterDeclaration,
            start.into(),
            end.into(),
            Attribute::Parameter {
                name,
                is_varargs,
                is_final: false,
                is_receiver: false,
            },
        ))
    }

    fn parse_annotation_type_declaration(
        &mut self,
        start: TextSize,
        modifiers: Modifiers,
    ) -> Result<NodeId, ParseFailure> {
        self.advance(); // '@'
        self.advance(); // 'interface'
        let name = self.identifier_text("annotation type name")?;
        self.expect(TokenKind::LBrace, "'{'")?;
        while self.peek_kind() != TokenKind::RBrace {
            if self.eat(TokenKind::Semi).is_some() {
                continue;
            }
            self.parse_annotation_element()?;
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::AnnotationTypeDeclaration,
            start.into(),
            end.into(),
            Attribute::TypeDeclaration { name, modifiers },
        ))
    }

    /// An `@interface` body member: either a declared element
    /// (`Type name() [default Value];`), a constant field, or a nested type.
    fn parse_annotation_element(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        let modifiers = self.parse_modifiers_and_annotations()?;
        if self.is_nested_type_declaration_start() {
            return self.parse_nested_type_declaration(start, modifiers);
        }
        self.parse_type()?;

        if self.peek_kind() == TokenKind::Identifier && self.peek_kind_at(1) == TokenKind::LParen {
            let name = self.identifier_text("annotation element name")?;
            self.advance(); // '('
            self.expect(TokenKind::RParen, "')'")?;
            while self.peek_kind() == TokenKind::LBracket {
                self.advance();
                self.expect(TokenKind::RBracket, "']'")?;
            }
            if self.eat(TokenKind::DefaultKw).is_some() {
                self.parse_annotation_value()?;
            }
            self.expect(TokenKind::Semi, "';'")?;
            let end = self.prev_end();
            return Ok(self.arena.allocate_with_attribute(
                NodeKind::AnnotationElementDeclaration,
                start.into(),
                end.into(),
                Attribute::AnnotationElement { name },
            ));
        }

        self.parse_variable_declarator_list()?;
        self.expect(TokenKind::Semi, "';'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::FieldDeclaration,
            start.into(),
            end.into(),
            Attribute::FieldDeclaration { modifiers },
        ))
    }

    /// `{ member* }`, shared by every flavor of type declaration and by
    /// anonymous class bodies (`expr.rs`'s `parse_object_creation`). No
    /// dedicated node wraps the body: members are allocated directly and
    /// become children of the enclosing declaration by span containment.
    pub(super) fn parse_class_body(&mut self) -> Result<(), ParseFailure> {
        let range = self.current_range();
        let _guard = self.enter_depth(range)?;
        self.expect(TokenKind::LBrace, "'{'")?;
        while self.peek_kind() != TokenKind::RBrace {
            if self.peek_kind() == TokenKind::Eof {
                return Err(self.unexpected("'}'"));
            }
            if self.eat(TokenKind::Semi).is_some() {
                continue;
            }
            self.parse_class_member()?;
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(())
    }

    fn parse_class_member(&mut self) -> Result<NodeId, ParseFailure> {
        let range = self.current_range();
        let _guard = self.enter_depth(range)?;
        let start = self.node_start();
        let modifiers = self.parse_modifiers_and_annotations()?;

        if self.peek_kind() == TokenKind::LBrace {
            return self.parse_initializer_block(start, modifiers);
        }

        if self.is_nested_type_declaration_start() {
            return self.parse_nested_type_declaration(start, modifiers);
        }

        if self.peek_kind() == TokenKind::Identifier && self.peek_kind_at(1) == TokenKind::LParen {
            return self.parse_constructor_declaration(start, modifiers);
        }

        if self.peek_kind() == TokenKind::Identifier && self.peek_kind_at(1) == TokenKind::LBrace {
            return self.parse_compact_constructor_declaration(start, modifiers);
        }

        if self.peek_kind() == TokenKind::Lt {
            self.parse_type_parameter_list()?;
        }

        self.parse_type()?;

        if self.peek_kind() == TokenKind::Identifier && self.peek_kind_at(1) == TokenKind::LParen {
            let name = self.identifier_text("method name")?;
            self.advance(); // '('
            return self.parse_method_declaration_rest(start, modifiers, name);
        }

        self.parse_field_declaration_rest(start, modifiers)
    }

    fn parse_initializer_block(
        &mut self,
        start: TextSize,
        modifiers: Modifiers,
    ) -> Result<NodeId, ParseFailure> {
        self.parse_block()?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::InitializerBlock,
            start.into(),
            end.into(),
            Attribute::InitializerBlock {
                is_static: modifiers.contains(Modifiers::STATIC),
            },
        ))
    }

    fn parse_constructor_declaration(
        &mut self,
        start: TextSize,
        modifiers: Modifiers,
    ) -> Result<NodeId, ParseFailure> {
        let name = self.identifier_text("constructor name")?;
        self.expect(TokenKind::LParen, "'('")?;
        self.parse_formal_parameter_list_rest()?;
        if self.eat(TokenKind::ThrowsKw).is_some() {
            self.parse_type()?;
            while self.eat(TokenKind::Comma).is_some() {
                self.parse_type()?;
            }
        }
        let block = self.parse_block()?;
        self.check_flexible_constructor_prologue(block)?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::ConstructorDeclaration,
            start.into(),
            end.into(),
            Attribute::ConstructorDeclaration { name, modifiers },
        ))
    }

    /// JEP 513 lets statements precede the explicit `super(...)`/`this(...)`
    /// call; before that, the call (if present) had to be the constructor
    /// body's first statement. Find the explicit invocation, if any, among
    /// `block`'s direct statements and require the feature only when
    /// something else precedes it.
    fn check_flexible_constructor_prologue(&mut self, block: NodeId) -> Result<(), ParseFailure> {
        for (i, stmt) in self.arena.children(block).into_iter().enumerate() {
            if self.arena.get(stmt).kind != NodeKind::ExpressionStatement {
                continue;
            }
            let Some(invocation) = self.arena.children(stmt).into_iter().next() else {
                continue;
            };
            let is_explicit_invocation = matches!(
                self.arena.attribute(invocation),
                Some(Attribute::MethodInvocation { name })
                    if &**name == "this" || &**name == "super"
            );
            if is_explicit_invocation {
                if i > 0 {
                    let range = self.arena.view(stmt).range();
                    self.require_feature(Feature::FlexibleConstructorBodies, range)?;
                }
                return Ok(());
            }
        }
        Ok(())
    }

    /// Record compact constructor (JEP 395): `Name { ... }`, no parameter
    /// list — its parameters are the record's own components.
    fn parse_compact_constructor_declaration(
        &mut self,
        start: TextSize,
        modifiers: Modifiers,
    ) -> Result<NodeId, ParseFailure> {
        let name = self.identifier_text("compact constructor name")?;
        self.parse_block()?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::CompactConstructorDeclaration,
            start.into(),
            end.into(),
            Attribute::ConstructorDeclaration { name, modifiers },
        ))
    }

    fn parse_method_declaration_rest(
        &mut self,
        start: TextSize,
        modifiers: Modifiers,
        name: Box<str>,
    ) -> Result<NodeId, ParseFailure> {
        self.parse_formal_parameter_list_rest()?;
        // Legacy C-style array return type suffix: `int foo()[] { ... }`.
        while self.peek_kind() == TokenKind::LBracket {
            self.advance();
            self.expect(TokenKind::RBracket, "']'")?;
        }
        if self.eat(TokenKind::ThrowsKw).is_some() {
            self.parse_type()?;
            while self.eat(TokenKind::Comma).is_some() {
                self.parse_type()?;
            }
        }
        if self.peek_kind() == TokenKind::LBrace {
            self.parse_block()?;
        } else {
            self.expect(TokenKind::Semi, "';'")?;
        }
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::MethodDeclaration,
            start.into(),
            end.into(),
            Attribute::MethodDeclaration { name, modifiers },
        ))
    }

    fn parse_field_declaration_rest(
        &mut self,
        start: TextSize,
        modifiers: Modifiers,
    ) -> Result<NodeId, ParseFailure> {
        self.parse_variable_declarator_list()?;
        self.expect(TokenKind::Semi, "';'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::FieldDeclaration,
            start.into(),
            end.into(),
            Attribute::FieldDeclaration { modifiers },
        ))
    }

    /// Parses `Parameter (, Parameter)* ')'`; the opening `(` is already
    /// consumed by the caller.
    fn parse_formal_parameter_list_rest(&mut self) -> Result<Vec<NodeId>, ParseFailure> {
        let mut params = Vec::new();
        if self.peek_kind() != TokenKind::RParen {
            params.push(self.parse_formal_parameter()?);
            while self.eat(TokenKind::Comma).is_some() {
                params.push(self.parse_formal_parameter()?);
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(params)
    }

    /// A regular, varargs, or receiver parameter. A receiver parameter is
    /// `Type [Identifier .] this` and carries no name of its own.
    fn parse_formal_parameter(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        while self.peek_kind() == TokenKind::At {
            self.parse_annotation()?;
        }
        let is_final = self.eat(TokenKind::FinalKw).is_some();
        self.parse_type()?;

        if self.peek_kind() == TokenKind::ThisKw {
            self.advance();
            let end = self.prev_end();
            return Ok(self.arena.allocate_with_attribute(
                NodeKind::ReceiverParameter,
                start.into(),
                end.into(),
                Attribute::ReceiverParameter { qualifier: None },
            ));
        }
        if self.peek_kind() == TokenKind::Identifier
            && self.peek_kind_at(1) == TokenKind::Dot
            && self.peek_kind_at(2) == TokenKind::ThisKw
        {
            let qualifier = self.identifier_text("receiver qualifier")?;
            self.advance(); // '.'
            self.advance(); // 'this'
            let end = self.prev_end();
            return Ok(self.arena.allocate_with_attribute(
                NodeKind::ReceiverParameter,
                start.into(),
                end.into(),
                Attribute::ReceiverParameter {
                    qualifier: Some(qualifier),
                },
            ));
        }

        let is_varargs = self.eat(TokenKind::DotDotDot).is_some();
        let name = self.identifier_text("parameter name")?;
        // Legacy C-style array suffix on the parameter name: `int x[]`.
        while self.peek_kind() == TokenKind::LBracket && self.peek_kind_at(1) == TokenKind::RBracket {
            self.advance();
            self.advance();
        }
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::ParameterDeclaration,
            start.into(),
            end.into(),
            Attribute::Parameter {
                name,
                is_varargs,
                is_final,
                is_receiver: false,
            },
        ))
    }

    // -- annotations --------------------------------------------------------

    pub(super) fn parse_annotation(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        self.expect(TokenKind::At, "'@'")?;
        let name = self.parse_dotted_name("annotation name")?;
        if self.eat(TokenKind::LParen).is_some() {
            if self.peek_kind() != TokenKind::RParen {
                self.parse_annotation_argument_list()?;
            }
            self.expect(TokenKind::RParen, "')'")?;
        }
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::Annotation,
            start.into(),
            end.into(),
            Attribute::Annotation { name },
        ))
    }

    fn parse_annotation_argument_list(&mut self) -> Result<(), ParseFailure> {
        self.parse_annotation_argument()?;
        while self.eat(TokenKind::Comma).is_some() {
            self.parse_annotation_argument()?;
        }
        Ok(())
    }

    fn parse_annotation_argument(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        let name = if self.peek_kind() == TokenKind::Identifier && self.peek_kind_at(1) == TokenKind::Eq {
            let n = self.identifier_text("annotation element name")?;
            self.expect(TokenKind::Eq, "'='")?;
            Some(n)
        } else {
            None
        };
        self.parse_annotation_value()?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::AnnotationArgument,
            start.into(),
            end.into(),
            Attribute::AnnotationArgument { name },
        ))
    }

    fn parse_annotation_value(&mut self) -> Result<NodeId, ParseFailure> {
        if self.peek_kind() == TokenKind::At {
            self.parse_annotation()
        } else if self.peek_kind() == TokenKind::LBrace {
            self.parse_annotation_array_initializer()
        } else {
            self.parse_expression()
        }
    }

    fn parse_annotation_array_initializer(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        self.advance(); // '{'
        if self.peek_kind() != TokenKind::RBrace {
            self.parse_annotation_value()?;
            while self.eat(TokenKind::Comma).is_some() {
                if self.peek_kind() == TokenKind::RBrace {
                    break;
                }
                self.parse_annotation_value()?;
            }
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        let end = self.prev_end();
        Ok(self
            .arena
            .allocate(NodeKind::ArrayInitializer, start.into(), end.into()))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_java;
    use crate::version::JavaVersion;

    fn kinds(src: &str) -> Vec<crate::kind::NodeKind> {
        let arena = parse_java(src, JavaVersion::LATEST).unwrap();
        let root = arena.root();
        arena
            .children(root)
            .into_iter()
            .map(|id| arena.get(id).kind)
            .collect()
    }

    #[test]
    fn package_and_imports() {
        use crate::kind::NodeKind::*;
        let src = "package com.example;\nimport java.util.List;\nimport java.util.*;\nclass A {}";
        assert_eq!(
            kinds(src),
            vec![PackageDeclaration, ImportDeclaration, ImportDeclaration, ClassDeclaration]
        );
    }

    #[test]
    fn enum_with_constants_and_bodies() {
        let arena = parse_java(
            "enum Op { PLUS { int apply(int a, int b) { return a + b; } }, MINUS; }",
            JavaVersion::LATEST,
        )
        .unwrap();
        assert_eq!(arena.get(arena.root()).kind, crate::kind::NodeKind::CompilationUnit);
    }

    #[test]
    fn record_declaration_requires_version_16() {
        assert!(parse_java("record Point(int x, int y) {}", JavaVersion::V11).is_err());
        assert!(parse_java("record Point(int x, int y) {}", JavaVersion::V16).is_ok());
    }

    #[test]
    fn compact_constructor_has_no_parameter_list() {
        let src = "record Point(int x, int y) { Point { if (x < 0) throw new IllegalArgumentException(); } }";
        assert!(parse_java(src, JavaVersion::V17).is_ok());
    }

    #[test]
    fn sealed_class_with_permits_requires_version_17() {
        let src = "sealed class Shape permits Circle, Square {}";
        assert!(parse_java(src, JavaVersion::V16).is_err());
        assert!(parse_java(src, JavaVersion::V17).is_ok());
    }

    #[test]
    fn annotation_with_single_element_and_named_arguments() {
        assert!(parse_java("@Deprecated class A {}", JavaVersion::LATEST).is_ok());
        assert!(parse_java("@SuppressWarnings(\"unchecked\") class A {}", JavaVersion::LATEST).is_ok());
        assert!(parse_java(
            "@Retention(value = RUNTIME, policy = STRICT) class A {}",
            JavaVersion::LATEST
        )
        .is_ok());
    }

    #[test]
    fn annotation_type_declaration_with_default_value() {
        let src = "@interface Config { String name() default \"x\"; int retries(); }";
        assert!(parse_java(src, JavaVersion::LATEST).is_ok());
    }

    #[test]
    fn receiver_parameter_is_not_an_ordinary_parameter() {
        let src = "class Inner { void m(Outer Outer.this, int x) {} }";
        assert!(parse_java(src, JavaVersion::LATEST).is_ok());
    }

    #[test]
    fn initializer_blocks_static_and_instance() {
        let src = "class A { static { } { } }";
        assert!(parse_java(src, JavaVersion::LATEST).is_ok());
    }
}
