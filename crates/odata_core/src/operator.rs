//! The fixed operator and function set recognized by the builder.

use odata_error::IllegalOperatorCombination;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Comparison operators and grammar-declared predicate functions.
///
/// One immutable set; which members render as function calls is declared by
/// the grammar through [`Grammar::functions`](crate::Grammar::functions).
/// `Display` shows the source spelling that `FromStr` accepts, not the wire
/// token; wire tokens belong to the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Operator {
    /// Equality (`=`).
    #[strum(serialize = "=")]
    Eq,
    /// Inequality (`!=` / `<>`).
    #[strum(serialize = "!=")]
    Ne,
    /// Less than (`<`).
    #[strum(serialize = "<")]
    Lt,
    /// Less than or equal (`<=`).
    #[strum(serialize = "<=")]
    Le,
    /// Greater than (`>`).
    #[strum(serialize = ">")]
    Gt,
    /// Greater than or equal (`>=`).
    #[strum(serialize = ">=")]
    Ge,
    /// Substring predicate function.
    #[strum(serialize = "contains")]
    Contains,
    /// Prefix predicate function.
    #[strum(serialize = "startswith")]
    StartsWith,
    /// Suffix predicate function.
    #[strum(serialize = "endswith")]
    EndsWith,
}

impl Operator {
    /// Whether this operator may compare against null. Only equality and
    /// inequality have defined null semantics.
    pub const fn accepts_null(self) -> bool {
        matches!(self, Self::Eq | Self::Ne)
    }
}

impl FromStr for Operator {
    type Err = IllegalOperatorCombination;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.to_ascii_lowercase().as_str() {
            "=" | "eq" => Ok(Self::Eq),
            "!=" | "<>" | "ne" => Ok(Self::Ne),
            "<" | "lt" => Ok(Self::Lt),
            "<=" | "le" => Ok(Self::Le),
            ">" | "gt" => Ok(Self::Gt),
            ">=" | "ge" => Ok(Self::Ge),
            "contains" => Ok(Self::Contains),
            "startswith" => Ok(Self::StartsWith),
            "endswith" => Ok(Self::EndsWith),
            _ => Err(IllegalOperatorCombination::new(token)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comparison_spellings() {
        assert_eq!("=".parse::<Operator>().unwrap(), Operator::Eq);
        assert_eq!("eq".parse::<Operator>().unwrap(), Operator::Eq);
        assert_eq!("!=".parse::<Operator>().unwrap(), Operator::Ne);
        assert_eq!("<>".parse::<Operator>().unwrap(), Operator::Ne);
        assert_eq!("<".parse::<Operator>().unwrap(), Operator::Lt);
        assert_eq!("<=".parse::<Operator>().unwrap(), Operator::Le);
        assert_eq!(">".parse::<Operator>().unwrap(), Operator::Gt);
        assert_eq!(">=".parse::<Operator>().unwrap(), Operator::Ge);
    }

    #[test]
    fn parses_function_names_case_insensitively() {
        assert_eq!("contains".parse::<Operator>().unwrap(), Operator::Contains);
        assert_eq!(
            "StartsWith".parse::<Operator>().unwrap(),
            Operator::StartsWith
        );
        assert_eq!("ENDSWITH".parse::<Operator>().unwrap(), Operator::EndsWith);
    }

    #[test]
    fn rejects_unknown_tokens() {
        assert!("like".parse::<Operator>().is_err());
        assert!("".parse::<Operator>().is_err());
        assert!("=>".parse::<Operator>().is_err());
    }

    #[test]
    fn null_is_accepted_by_equality_only() {
        assert!(Operator::Eq.accepts_null());
        assert!(Operator::Ne.accepts_null());
        assert!(!Operator::Lt.accepts_null());
        assert!(!Operator::Contains.accepts_null());
    }
}
