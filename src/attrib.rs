//! Per-kind attribute payloads ("attribute side tables").
//!
//! Rather than one `Vec<T>` per payload flavor, this implementation stores a
//! single `Vec<Attribute>` of a tagged union in [`crate::arena::Arena`] and
//! lets [`crate::arena::NodeRecord::attribute_index`] index into it. Value
//! equality over the whole enum gives arena equality without hand-writing
//! per-flavor `PartialEq` impls; see `DESIGN.md` for why this was chosen
//! over one table per flavor.

/// Modifier bitmask shared by type, method, constructor, field, and local
/// variable declarations. Only the modifiers legal in at least one of those
/// positions are represented; illegal combinations for a given declaration
/// are a later pass's concern — no semantic analysis happens here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u32);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const PUBLIC: Modifiers = Modifiers(1 << 0);
    pub const PRIVATE: Modifiers = Modifiers(1 << 1);
    pub const PROTECTED: Modifiers = Modifiers(1 << 2);
    pub const STATIC: Modifiers = Modifiers(1 << 3);
    pub const FINAL: Modifiers = Modifiers(1 << 4);
    pub const ABSTRACT: Modifiers = Modifiers(1 << 5);
    pub const NATIVE: Modifiers = Modifiers(1 << 6);
    pub const SYNCHRONIZED: Modifiers = Modifiers(1 << 7);
    pub const TRANSIENT: Modifiers = Modifiers(1 << 8);
    pub const VOLATILE: Modifiers = Modifiers(1 << 9);
    pub const STRICTFP: Modifiers = Modifiers(1 << 10);
    pub const DEFAULT: Modifiers = Modifiers(1 << 11);
    pub const SEALED: Modifiers = Modifiers(1 << 12);
    pub const NON_SEALED: Modifiers = Modifiers(1 << 13);

    #[inline]
    pub fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: Modifiers) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;
    #[inline]
    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
    Void,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    UShr,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    BitAnd,
    BitOr,
    BitXor,
    LogicalAnd,
    LogicalOr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Minus,
    BitNot,
    LogicalNot,
    Inc,
    Dec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    UShrAssign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    Unbounded,
    Extends,
    Super,
}

/// `Type::identifier` vs. `Type::new` method reference targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MethodRefMember {
    Named(Box<str>),
    New,
}

/// The tagged union of every per-node payload this crate stores.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Attribute {
    Package {
        name: Box<str>,
    },
    Import {
        qualified_name: Box<str>,
        is_static: bool,
        is_on_demand: bool,
    },
    TypeDeclaration {
        name: Box<str>,
        modifiers: Modifiers,
    },
    Module {
        name: Box<str>,
        is_open: bool,
    },
    RequiresDirective {
        module_name: Box<str>,
        is_transitive: bool,
        is_static: bool,
    },
    ExportsDirective {
        package: Box<str>,
        to_modules: Vec<Box<str>>,
    },
    OpensDirective {
        package: Box<str>,
        to_modules: Vec<Box<str>>,
    },
    UsesDirective {
        type_name: Box<str>,
    },
    ProvidesDirective {
        type_name: Box<str>,
        with_types: Vec<Box<str>>,
    },
    MethodDeclaration {
        name: Box<str>,
        modifiers: Modifiers,
    },
    ConstructorDeclaration {
        name: Box<str>,
        modifiers: Modifiers,
    },
    FieldDeclaration {
        modifiers: Modifiers,
    },
    LocalVariableDeclaration {
        modifiers: Modifiers,
    },
    VariableDeclarator {
        name: Box<str>,
        extra_array_dims: u8,
    },
    Parameter {
        name: Box<str>,
        is_varargs: bool,
        is_final: bool,
        is_receiver: bool,
    },
    ReceiverParameter {
        qualifier: Option<Box<str>>,
    },
    TypeParameter {
        name: Box<str>,
    },
    EnumConstant {
        name: Box<str>,
    },
    AnnotationElement {
        name: Box<str>,
    },
    Annotation {
        name: Box<str>,
    },
    AnnotationArgument {
        /// `None` for the single-element shorthand (`@Foo(1)`), `Some` for
        /// `@Foo(name = 1)`.
        name: Option<Box<str>>,
    },
    InitializerBlock {
        is_static: bool,
    },
    SwitchLabel {
        is_default: bool,
    },
    LabeledStatement {
        label: Box<str>,
    },
    BreakOrContinue {
        label: Option<Box<str>>,
    },
    BinaryExpression {
        op: BinaryOp,
    },
    UnaryExpression {
        op: UnaryOp,
    },
    AssignmentExpression {
        op: AssignOp,
    },
    FieldAccess {
        name: Box<str>,
    },
    MethodInvocation {
        name: Box<str>,
    },
    ObjectCreation {
        is_diamond: bool,
    },
    MethodReference {
        member: MethodRefMember,
    },
    TypePattern {
        binding_name: Box<str>,
    },
    Identifier {
        text: Box<str>,
    },
    QualifiedName {
        text: Box<str>,
    },
    PrimitiveType {
        kind: PrimitiveKind,
    },
    WildcardType {
        bound: WildcardBound,
    },
    IntegerLiteral {
        raw: Box<str>,
        value: i32,
    },
    LongLiteral {
        raw: Box<str>,
        value: i64,
    },
    FloatLiteral {
        raw: Box<str>,
        value: f32,
    },
    DoubleLiteral {
        raw: Box<str>,
        value: f64,
    },
    StringLiteral {
        value: Box<str>,
    },
    CharLiteral {
        value: char,
    },
    TextBlock {
        raw: Box<str>,
    },
    BooleanLiteral {
        value: bool,
    },
    Comment {
        text: Box<str>,
    },
}
