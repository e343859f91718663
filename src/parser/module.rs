//! `module-info.java` declarations: the module header and its five
//! directive kinds.

use crate::arena::NodeId;
use crate::attrib::Attribute;
use crate::error::ParseFailure;
use crate::kind::NodeKind;
use crate::token::TokenKind;

use super::Parser;

impl<'src> Parser<'src> {
    pub(super) fn parse_module_declaration(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        while self.peek_kind() == TokenKind::At {
            self.parse_annotation()?;
        }
        let is_open = self.peek_text_at(0) == "open"
            && self.peek_kind_at(1) == TokenKind::Identifier
            && self.peek_text_at(1) == "module";
        if is_open {
            self.advance();
        }
        if self.peek_kind() != TokenKind::Identifier || self.peek_text_at(0) != "module" {
            return Err(self.unexpected("'module'"));
        }
        self.advance();
        let name = self.parse_dotted_name("module name")?;
        self.expect(TokenKind::LBrace, "'{'")?;
        while self.peek_kind() != TokenKind::RBrace {
            self.parse_module_directive()?;
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::ModuleDeclaration,
            start.into(),
            end.into(),
            Attribute::Module { name, is_open },
        ))
    }

    fn parse_module_directive(&mut self) -> Result<NodeId, ParseFailure> {
        if self.peek_kind() != TokenKind::Identifier {
            return Err(self.unexpected("module directive"));
        }
        match self.peek_text_at(0) {
            "requires" => self.parse_requires_directive(),
            "exports" => self.parse_exports_directive(),
            "opens" => self.parse_opens_directive(),
            "uses" => self.parse_uses_directive(),
            "provides" => self.parse_provides_directive(),
            _ => Err(self.unexpected("module directive")),
        }
    }

    fn parse_requires_directive(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        self.advance(); // 'requires'
        let mut is_transitive = false;
        let mut is_static = false;
        loop {
            if self.peek_kind() == TokenKind::StaticKw {
                self.advance();
                is_static = true;
                continue;
            }
            if self.peek_kind() == TokenKind::Identifier
                && self.peek_text_at(0) == "transitive"
                && self.peek_kind_at(1) == TokenKind::Identifier
            {
                self.advance();
                is_transitive = true;
                continue;
            }
            break;
        }
        let module_name = self.parse_dotted_name("module name")?;
        self.expect(TokenKind::Semi, "';'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::RequiresDirective,
            start.into(),
            end.into(),
            Attribute::RequiresDirective {
                module_name,
                is_transitive,
                is_static,
            },
        ))
    }

    fn parse_exports_directive(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        self.advance(); // 'exports'
        let package = self.parse_dotted_name("package name")?;
        let to_modules = self.parse_optional_to_clause()?;
        self.expect(TokenKind::Semi, "';'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::ExportsDirective,
            start.into(),
            end.into(),
            Attribute::ExportsDirective { package, to_modules },
        ))
    }

    fn parse_opens_directive(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        self.advance(); // 'opens'
        let package = self.parse_dotted_name("package name")?;
        let to_modules = self.parse_optional_to_clause()?;
        self.expect(TokenKind::Semi, "';'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::OpensDirective,
            start.into(),
            end.into(),
            Attribute::OpensDirective { package, to_modules },
        ))
    }

    fn parse_optional_to_clause(&mut self) -> Result<Vec<Box<str>>, ParseFailure> {
        let mut to_modules = Vec::new();
        if self.peek_kind() == TokenKind::Identifier && self.peek_text_at(0) == "to" {
            self.advance();
            to_modules.push(self.parse_dotted_name("module name")?);
            while self.eat(TokenKind::Comma).is_some() {
                to_modules.push(self.parse_dotted_name("module name")?);
            }
        }
        Ok(to_modules)
    }

    fn parse_uses_directive(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        self.advance(); // 'uses'
        let type_name = self.parse_dotted_name("type name")?;
        self.expect(TokenKind::Semi, "';'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::UsesDirective,
            start.into(),
            end.into(),
            Attribute::UsesDirective { type_name },
        ))
    }

    fn parse_provides_directive(&mut self) -> Result<NodeId, ParseFailure> {
        let start = self.node_start();
        self.advance(); // 'provides'
        let type_name = self.parse_dotted_name("type name")?;
        if !(self.peek_kind() == TokenKind::Identifier && self.peek_text_at(0) == "with") {
            return Err(self.unexpected("'with'"));
        }
        self.advance();
        let mut with_types = vec![self.parse_dotted_name("type name")?];
        while self.eat(TokenKind::Comma).is_some() {
            with_types.push(self.parse_dotted_name("type name")?);
        }
        self.expect(TokenKind::Semi, "';'")?;
        let end = self.prev_end();
        Ok(self.arena.allocate_with_attribute(
            NodeKind::ProvidesDirective,
            start.into(),
            end.into(),
            Attribute::ProvidesDirective {
                type_name,
                with_types,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::attrib::Attribute;
    use crate::kind::NodeKind;
    use crate::parser::parse_module_info;
    use crate::version::JavaVersion;

    fn module_directives(src: &str) -> Vec<NodeKind> {
        let arena = parse_module_info(src, JavaVersion::LATEST).unwrap();
        let module_id = arena.children(arena.root())[0];
        arena
            .children(module_id)
            .into_iter()
            .map(|id| arena.get(id).kind)
            .collect()
    }

    #[test]
    fn every_directive_kind() {
        use NodeKind::*;
        let src = "module com.example {\n\
            requires transitive java.base;\n\
            requires static com.lib;\n\
            exports com.example.api to com.consumer;\n\
            opens com.example.internal;\n\
            uses com.example.Service;\n\
            provides com.example.Service with com.example.impl.ServiceImpl;\n\
        }";
        assert_eq!(
            module_directives(src),
            vec![
                RequiresDirective,
                RequiresDirective,
                ExportsDirective,
                OpensDirective,
                UsesDirective,
                ProvidesDirective,
            ]
        );
    }

    #[test]
    fn open_module_is_distinguished_from_a_module_literally_named_open() {
        let arena = parse_module_info("open module com.example { }", JavaVersion::LATEST).unwrap();
        let module_id = arena.children(arena.root())[0];
        match arena.attribute(module_id) {
            Some(Attribute::Module { is_open, name }) => {
                assert!(*is_open);
                assert_eq!(&**name, "com.example");
            }
            other => panic!("expected Module attribute, got {other:?}"),
        }
    }

    #[test]
    fn provides_without_with_clause_is_rejected() {
        let src = "module com.example { provides com.example.Service; }";
        assert!(parse_module_info(src, JavaVersion::LATEST).is_err());
    }

    #[test]
    fn module_declaration_rejected_outside_module_info() {
        use crate::parser::parse_java;
        assert!(parse_java("module com.example { }", JavaVersion::LATEST).is_err());
    }
}
