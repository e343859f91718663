//! Java language levels and the per-feature minimum-version table used to
//! gate which grammar productions a given parse accepts.

use std::fmt;

/// A Java language level this crate knows how to gate features against.
/// Ordered; `JavaVersion::V21 > JavaVersion::V8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum JavaVersion {
    V8,
    V9,
    V10,
    V11,
    V12,
    V13,
    V14,
    V15,
    V16,
    V17,
    V18,
    V19,
    V20,
    V21,
    /// Beyond the 8-21 range proper: needed only so
    /// `Feature::FlexibleConstructorBodies`, whose JEP finalized after 21,
    /// has a reachable minimum version rather than an unsatisfiable one.
    V22Plus,
}

impl JavaVersion {
    pub const LATEST: JavaVersion = JavaVersion::V22Plus;

    /// True if `self` is at least `minimum`.
    #[inline]
    pub fn supports(self, minimum: JavaVersion) -> bool {
        self >= minimum
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = match self {
            JavaVersion::V8 => 8,
            JavaVersion::V9 => 9,
            JavaVersion::V10 => 10,
            JavaVersion::V11 => 11,
            JavaVersion::V12 => 12,
            JavaVersion::V13 => 13,
            JavaVersion::V14 => 14,
            JavaVersion::V15 => 15,
            JavaVersion::V16 => 16,
            JavaVersion::V17 => 17,
            JavaVersion::V18 => 18,
            JavaVersion::V19 => 19,
            JavaVersion::V20 => 20,
            JavaVersion::V21 => 21,
            JavaVersion::V22Plus => 22,
        };
        write!(f, "{n}")
    }
}

/// Names a syntax feature whose availability is version-gated. Kept
/// separate from `NodeKind`/`TokenKind` because several features (e.g.
/// `SWITCH_EXPRESSIONS`) cut across more than one node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Feature {
    VarLocalInference,
    SwitchExpressions,
    TextBlocks,
    RecordDeclarations,
    SealedClasses,
    PatternMatchingInstanceof,
    RecordPatterns,
    PatternMatchingSwitch,
    FlexibleConstructorBodies,
}

impl Feature {
    /// The earliest Java release this feature is accepted in (all as
    /// final, non-preview features).
    pub fn minimum_version(self) -> JavaVersion {
        match self {
            Feature::VarLocalInference => JavaVersion::V10,
            Feature::SwitchExpressions => JavaVersion::V14,
            Feature::TextBlocks => JavaVersion::V15,
            Feature::RecordDeclarations => JavaVersion::V16,
            Feature::PatternMatchingInstanceof => JavaVersion::V16,
            Feature::SealedClasses => JavaVersion::V17,
            Feature::RecordPatterns => JavaVersion::V21,
            Feature::PatternMatchingSwitch => JavaVersion::V21,
            Feature::FlexibleConstructorBodies => JavaVersion::V22Plus,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Feature::VarLocalInference => "local variable type inference (`var`)",
            Feature::SwitchExpressions => "switch expressions",
            Feature::TextBlocks => "text blocks",
            Feature::RecordDeclarations => "record declarations",
            Feature::SealedClasses => "sealed classes",
            Feature::PatternMatchingInstanceof => "pattern matching for instanceof",
            Feature::RecordPatterns => "record patterns",
            Feature::PatternMatchingSwitch => "pattern matching for switch",
            Feature::FlexibleConstructorBodies => "flexible constructor bodies",
        }
    }
}
