//! Finds the version constant among top-level declarations

use thiserror::Error;

use super::tree::{Declaration, Expr, LiteralRef, SourceTree};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocateError {
    #[error("No version constant found")]
    DeclarationNotFound,

    #[error("{name} constant is not a string, was {found}")]
    WrongLiteralKind { name: String, found: String },
}

/// Returns the string literal assigned to the first top-level constant whose
/// name upper-cases to `VERSION`.
///
/// Upper-casing is full Unicode, so `verſion` and `versıon` match as well.
///
/// Only the first spec of each `const` declaration and the first name and
/// value of that spec are looked at. The scan stops at the first name match,
/// even when its value is not a string literal.
pub fn find_version_literal(tree: &SourceTree) -> Result<LiteralRef, LocateError> {
    for declaration in tree.declarations() {
        let Declaration::Const(group) = declaration else {
            continue;
        };
        let Some(spec) = group.specs.first() else {
            continue;
        };
        let Some(name) = spec.names.first() else {
            continue;
        };
        if name.name.to_uppercase() != "VERSION" {
            continue;
        }

        return match spec.values.first() {
            Some(Expr::StringLit(literal)) => Ok(*literal),
            Some(Expr::Other(span)) => Err(LocateError::WrongLiteralKind {
                name: name.name.clone(),
                found: tree.span_text(*span).to_string(),
            }),
            None => Err(LocateError::WrongLiteralKind {
                name: name.name.clone(),
                found: "no value".to_string(),
            }),
        };
    }

    Err(LocateError::DeclarationNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::go::GoSyntax;
    use crate::syntax::SourceSyntax;

    fn locate(source: &str) -> Result<String, LocateError> {
        let tree = GoSyntax.parse(source).unwrap();
        find_version_literal(&tree).map(|literal| tree.literal(literal).unwrap().text.clone())
    }

    #[test]
    fn finds_any_case() {
        for name in ["VERSION", "Version", "version", "vErSiOn"] {
            let source = format!("package main\n\nconst {} = \"1.0\"\n", name);
            assert_eq!(locate(&source).unwrap(), "\"1.0\"");
        }
    }

    #[test]
    fn matches_unicode_case_folds() {
        for name in ["verſion", "versıon"] {
            let source = format!("package main\n\nconst {} = \"2.0\"\n", name);
            assert_eq!(locate(&source).unwrap(), "\"2.0\"");
        }
        let source = "package main\n\nconst versión = \"2.0\"\n";
        assert_eq!(locate(source), Err(LocateError::DeclarationNotFound));
    }

    #[test]
    fn finds_first_match_in_file_order() {
        let source = "package main\n\nconst Other = \"x\"\nconst VERSION = \"1.0\"\nconst version = \"2.0\"\n";
        assert_eq!(locate(source).unwrap(), "\"1.0\"");
    }

    #[test]
    fn finds_first_spec_of_group() {
        let source = "package main\n\nconst (\n\tVersion = \"3.1\"\n\tName = \"tool\"\n)\n";
        assert_eq!(locate(source).unwrap(), "\"3.1\"");
    }

    #[test]
    fn ignores_later_specs_of_group() {
        let source = "package main\n\nconst (\n\tName = \"tool\"\n\tVersion = \"3.1\"\n)\n";
        assert_eq!(locate(source), Err(LocateError::DeclarationNotFound));
    }

    #[test]
    fn ignores_vars_and_functions() {
        let source = "package main\n\nvar Version = \"1.0\"\n\nfunc main() {\n\tconst Version = \"2.0\"\n}\n";
        assert_eq!(locate(source), Err(LocateError::DeclarationNotFound));
    }

    #[test]
    fn only_first_name_counts() {
        let source = "package main\n\nconst Name, Version = \"tool\", \"1.0\"\n";
        assert_eq!(locate(source), Err(LocateError::DeclarationNotFound));
    }

    #[test]
    fn only_first_value_counts() {
        let source = "package main\n\nconst Version, Name = \"1.0\", \"tool\"\n";
        assert_eq!(locate(source).unwrap(), "\"1.0\"");
    }

    #[test]
    fn rejects_non_string_value() {
        let source = "package main\n\nconst Version = 3\nconst version = \"1.0\"\n";
        assert_eq!(
            locate(source),
            Err(LocateError::WrongLiteralKind {
                name: "Version".to_string(),
                found: "3".to_string()
            })
        );
    }

    #[test]
    fn rejects_expressions() {
        let source = "package main\n\nconst VERSION = \"1.\" + \"0\"\n";
        assert_eq!(
            locate(source),
            Err(LocateError::WrongLiteralKind {
                name: "VERSION".to_string(),
                found: "\"1.\" + \"0\"".to_string()
            })
        );

        let source = "package main\n\nconst VERSION = (\"1.0\")\n";
        assert!(matches!(locate(source), Err(LocateError::WrongLiteralKind { .. })));
    }

    #[test]
    fn accepts_typed_and_raw_strings() {
        let source = "package main\n\nconst Version string = `1.0`\n";
        assert_eq!(locate(source).unwrap(), "`1.0`");
    }

    #[test]
    fn empty_file_has_no_version() {
        assert_eq!(locate("package main\n"), Err(LocateError::DeclarationNotFound));
    }
}
