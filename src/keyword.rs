//! Contextual keyword resolution.
//!
//! A pure function over `(identifier_text, parser_context)`. Never consulted
//! unless the parser has already decided it is at a grammar position where a
//! contextual keyword could matter — it is not a general-purpose classifier
//! run on every identifier.

/// What a spelling resolves to at a given grammar position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contextual {
    Var,
    Yield,
    Record,
    Sealed,
    NonSealed,
    Permits,
    Module,
    Open,
    Requires,
    Exports,
    Opens,
    Uses,
    Provides,
    Transitive,
    With,
    To,
    When,
}

/// Parser-state flags that gate which contextual keywords are even
/// reachable at the current position: `in_module_info`,
/// `in_switch_expression_body`, `after_requires_keyword`,
/// `expecting_type_pattern`, `in_record_header`, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserContext {
    pub in_module_info: bool,
    pub in_switch_expression_body: bool,
    pub at_statement_start: bool,
    pub at_type_declaration_start: bool,
    pub in_switch_case_guard: bool,
}

/// `non-sealed` never lexes as one token (`-` is ordinary punctuation in
/// Java); the parser reconstructs it by checking for the adjacent
/// `Identifier("non") Minus Identifier("sealed")` triple with no
/// intervening trivia before calling this function with the joined text.
///
/// Attempts to classify `text` as a contextual keyword given `ctx`. Returns
/// `None` when `text` should be treated as a plain identifier — the caller
/// (not this function) decides whether that is acceptable at the current
/// position.
pub fn classify(text: &str, ctx: ParserContext) -> Option<Contextual> {
    match text {
        "var" => Some(Contextual::Var),
        "yield" if ctx.in_switch_expression_body && ctx.at_statement_start => {
            Some(Contextual::Yield)
        }
        "record" if ctx.at_type_declaration_start => Some(Contextual::Record),
        "sealed" if ctx.at_type_declaration_start => Some(Contextual::Sealed),
        "non-sealed" if ctx.at_type_declaration_start => Some(Contextual::NonSealed),
        "permits" if ctx.at_type_declaration_start => Some(Contextual::Permits),
        "module" if ctx.in_module_info => Some(Contextual::Module),
        "open" if ctx.in_module_info => Some(Contextual::Open),
        "requires" if ctx.in_module_info => Some(Contextual::Requires),
        "exports" if ctx.in_module_info => Some(Contextual::Exports),
        "opens" if ctx.in_module_info => Some(Contextual::Opens),
        "uses" if ctx.in_module_info => Some(Contextual::Uses),
        "provides" if ctx.in_module_info => Some(Contextual::Provides),
        "transitive" if ctx.in_module_info => Some(Contextual::Transitive),
        "with" if ctx.in_module_info => Some(Contextual::With),
        "to" if ctx.in_module_info => Some(Contextual::To),
        "when" if ctx.in_switch_case_guard => Some(Contextual::When),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_identifier_use_never_classifies() {
        // `with(x)` as an ordinary method call: no module-info context, so
        // `with` stays a plain identifier regardless of spelling.
        let ctx = ParserContext::default();
        assert_eq!(classify("with", ctx), None);
        assert_eq!(classify("module", ctx), None);
        assert_eq!(classify("record", ctx), None);
    }

    #[test]
    fn var_is_always_contextual() {
        assert_eq!(
            classify("var", ParserContext::default()),
            Some(Contextual::Var)
        );
    }

    #[test]
    fn yield_requires_switch_expression_statement_position() {
        let ctx = ParserContext {
            in_switch_expression_body: true,
            at_statement_start: true,
            ..Default::default()
        };
        assert_eq!(classify("yield", ctx), Some(Contextual::Yield));
        assert_eq!(classify("yield", ParserContext::default()), None);
    }

    #[test]
    fn module_directives_require_module_info_context() {
        let ctx = ParserContext {
            in_module_info: true,
            ..Default::default()
        };
        assert_eq!(classify("requires", ctx), Some(Contextual::Requires));
        assert_eq!(classify("requires", ParserContext::default()), None);
    }
}
