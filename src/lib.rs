//! A position-preserving lexer, recursive-descent parser, and arena-backed
//! AST store for Java 8 through 21 (plus the parts of 22's flexible
//! constructor bodies already finalized when this crate was written).
//!
//! The parser never type-checks or resolves names: it accepts any input
//! that is syntactically valid Java and rejects everything else, recording
//! source spans precisely enough for a caller to build diagnostics, an IDE
//! outline, or a downstream semantic pass on top.
//!
//! ```
//! use java_syntax::{parse_java, JavaVersion};
//!
//! let arena = parse_java("class Hello { void greet() {} }", JavaVersion::V17).unwrap();
//! let root = arena.root();
//! assert!(!arena.children(root).is_empty());
//! ```

mod arena;
mod attrib;
mod counters;
mod depth;
mod error;
mod keyword;
mod kind;
mod lexer;
mod parser;
mod source_map;
mod token;
mod version;

pub use arena::{Arena, NodeId, NodeRecord, NodeView, Watermark};
pub use attrib::{
    Attribute, AssignOp, BinaryOp, MethodRefMember, Modifiers, PrimitiveKind, UnaryOp,
    WildcardBound,
};
pub use depth::ParserConfig;
pub use error::{LexErrorKind, ParseFailureKind};
pub use kind::NodeKind;
pub use parser::{parse, parse_java, parse_module_info, parse_with_config};
pub use source_map::LineIndex;
pub use token::{Token, TokenFlags, TokenKind};
pub use version::{Feature, JavaVersion};

pub use error::ParseFailure;

#[cfg(feature = "test-parse-counter")]
pub use counters::{backtracks, reset as reset_parse_counters, speculative_attempts};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_class() {
        let arena = parse_java("class Hello {}", JavaVersion::V17).unwrap();
        let root = arena.view(arena.root());
        assert_eq!(root.kind(), NodeKind::CompilationUnit);
    }

    #[test]
    fn infers_module_info_from_leading_module_keyword() {
        let arena = parse("module com.example { requires java.base; }", JavaVersion::V17).unwrap();
        let root = arena.view(arena.root());
        let children = root.children();
        assert_eq!(children.len(), 1);
        assert_eq!(arena.get(children[0]).kind, NodeKind::ModuleDeclaration);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_java("class {", JavaVersion::V17).is_err());
    }

    #[test]
    fn gates_records_by_version() {
        assert!(parse_java("record Point(int x, int y) {}", JavaVersion::V11).is_err());
        assert!(parse_java("record Point(int x, int y) {}", JavaVersion::V16).is_ok());
    }
}
