//! Pass names reported by the compiler profiler.
//!
//! Raw names are path-like: `file=foo.ml/` is the whole-unit summary row and
//! `file=foo.ml//generate/assemble` is one phase inside that unit. We parse
//! them into `PassName` first and only then decide whether the pass is one we
//! report on (`PassKey`).

/// Structured form of a raw profiler pass name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassName {
    /// `<unit>/`: the whole compilation unit.
    TopLevel,
    /// `<unit>//<phase>`: a named phase within the unit.
    Phase(String),
}

impl PassName {
    /// Parse a raw pass name. Returns `None` when neither shape matches.
    pub fn parse(raw: &str) -> Option<PassName> {
        if let Some((_, phase)) = raw.split_once("//") {
            return Some(PassName::Phase(phase.to_string()));
        }
        if raw.ends_with('/') {
            return Some(PassName::TopLevel);
        }
        None
    }
}

/// Passes tracked in the output, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PassKey {
    All,
    Parsing,
    Typing,
    Flambda2,
    Cfg,
    Assemble,
}

impl PassKey {
    /// Allow-list in declared order. The sentinel comes first.
    pub const ALL: [PassKey; 6] = [
        PassKey::All,
        PassKey::Parsing,
        PassKey::Typing,
        PassKey::Flambda2,
        PassKey::Cfg,
        PassKey::Assemble,
    ];

    /// Canonical name as written in the `name` column.
    pub fn as_str(self) -> &'static str {
        match self {
            PassKey::All => "<all>",
            PassKey::Parsing => "parsing",
            PassKey::Typing => "typing",
            PassKey::Flambda2 => "generate/flambda2",
            PassKey::Cfg => "generate/compile_phrases/cfg",
            PassKey::Assemble => "generate/assemble",
        }
    }

    /// Map a parsed pass name onto the allow-list.
    pub fn from_pass_name(name: &PassName) -> Option<PassKey> {
        match name {
            PassName::TopLevel => Some(PassKey::All),
            PassName::Phase(phase) => PassKey::ALL
                .into_iter()
                .find(|k| *k != PassKey::All && k.as_str() == phase.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_phase_takes_text_after_first_separator() {
        assert_eq!(
            PassName::parse("file=x.ml//typing"),
            Some(PassName::Phase("typing".to_string()))
        );
        assert_eq!(
            PassName::parse("file=x.ml//generate/compile_phrases/cfg"),
            Some(PassName::Phase("generate/compile_phrases/cfg".to_string()))
        );
    }

    #[test]
    fn trailing_separator_is_top_level() {
        assert_eq!(PassName::parse("file=x.ml/"), Some(PassName::TopLevel));
    }

    #[test]
    fn bare_unit_does_not_resolve() {
        assert_eq!(PassName::parse("file=x.ml"), None);
        assert_eq!(PassName::parse(""), None);
    }

    #[test]
    fn only_allow_listed_phases_map_to_keys() {
        assert_eq!(
            PassKey::from_pass_name(&PassName::TopLevel),
            Some(PassKey::All)
        );
        assert_eq!(
            PassKey::from_pass_name(&PassName::Phase("generate/assemble".into())),
            Some(PassKey::Assemble)
        );
        assert_eq!(
            PassKey::from_pass_name(&PassName::Phase("generate".into())),
            None
        );
        // The sentinel text is not a phase name.
        assert_eq!(
            PassKey::from_pass_name(&PassName::Phase("<all>".into())),
            None
        );
    }
}
