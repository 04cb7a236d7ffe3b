//! Top-level declaration outline for Go, read off a tree-sitter parse
//!
//! The concrete syntax tree comes from `tree-sitter-go`. Only the file's
//! outline is lifted into [`Declaration`]s: the package clause, then `import`,
//! `const`, `var`, `type` and `func` declarations. `const` and `var` specs are
//! broken into names and value expressions; everything else is kept as a byte
//! span.

use tree_sitter::{Node, Parser};

use crate::syntax::{
    Declaration, Expr, Ident, LiteralKind, Position, SourceTree, Span, SyntaxError, ValueGroup,
    ValueSpec,
};

/// Longest stretch of source quoted in a syntax error
const SNIPPET_LEN: usize = 24;

pub fn parse(source: &str) -> Result<SourceTree, SyntaxError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| SyntaxError::Grammar(e.to_string()))?;
    let syntax = parser.parse(source, None).ok_or(SyntaxError::NoTree)?;

    let root = syntax.root_node();
    if let Some(error) = first_error(root, source) {
        return Err(error);
    }

    let mut tree = SourceTree::new(source);
    let mut declarations = Vec::new();
    let mut cursor = root.walk();
    for node in root.named_children(&mut cursor) {
        let declaration = match node.kind() {
            "comment" => continue,
            "package_clause" => Declaration::Package(package_name(node, source)?),
            "import_declaration" => Declaration::Import(node.byte_range().into()),
            "const_declaration" => Declaration::Const(value_group(node, "const_spec", &mut tree)),
            "var_declaration" => Declaration::Var(value_group(node, "var_spec", &mut tree)),
            "type_declaration" => Declaration::Type(node.byte_range().into()),
            "function_declaration" | "method_declaration" => {
                Declaration::Func(node.byte_range().into())
            }
            other => {
                return Err(SyntaxError::Unexpected {
                    position: position(node),
                    found: other.replace('_', " "),
                })
            }
        };

        let is_package = matches!(declaration, Declaration::Package(_));
        if declarations.is_empty() && !is_package {
            return Err(SyntaxError::MissingPackageClause);
        }
        if !declarations.is_empty() && is_package {
            return Err(SyntaxError::Unexpected {
                position: position(node),
                found: "package clause".to_string(),
            });
        }
        declarations.push(declaration);
    }

    if declarations.is_empty() {
        return Err(SyntaxError::MissingPackageClause);
    }
    tree.set_declarations(declarations);
    Ok(tree)
}

fn position(node: Node<'_>) -> Position {
    let point = node.start_position();
    Position {
        line: point.row + 1,
        column: point.column + 1,
    }
}

fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or_default()
}

/// The first error or missing node, in source order
fn first_error(node: Node<'_>, source: &str) -> Option<SyntaxError> {
    if node.is_missing() {
        return Some(SyntaxError::Missing {
            position: position(node),
            expected: node.kind().to_string(),
        });
    }
    if node.is_error() {
        let found = text(node, source).lines().next().unwrap_or_default();
        return Some(SyntaxError::Invalid {
            position: position(node),
            found: found.chars().take(SNIPPET_LEN).collect(),
        });
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(|child| first_error(child, source))
}

fn package_name(node: Node<'_>, source: &str) -> Result<Ident, SyntaxError> {
    let mut cursor = node.walk();
    let name = node
        .named_children(&mut cursor)
        .find(|child| child.kind() == "package_identifier")
        .ok_or_else(|| SyntaxError::Missing {
            position: position(node),
            expected: "package name".to_string(),
        })?;

    Ok(Ident {
        name: text(name, source).to_string(),
        span: name.byte_range().into(),
    })
}

fn value_group(node: Node<'_>, spec_kind: &str, tree: &mut SourceTree) -> ValueGroup {
    let mut grouped = false;
    let mut specs = Vec::new();
    collect_specs(node, spec_kind, &mut grouped, &mut specs);

    ValueGroup {
        grouped,
        specs: specs
            .into_iter()
            .map(|spec| value_spec(spec, tree))
            .collect(),
    }
}

/// Gathers the specs of a declaration, looking through `*_spec_list` wrappers
fn collect_specs<'t>(
    node: Node<'t>,
    spec_kind: &str,
    grouped: &mut bool,
    specs: &mut Vec<Node<'t>>,
) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "(" => *grouped = true,
            kind if kind == spec_kind => specs.push(child),
            kind if kind.ends_with("_spec_list") => collect_specs(child, spec_kind, grouped, specs),
            _ => {}
        }
    }
}

fn value_spec(spec: Node<'_>, tree: &mut SourceTree) -> ValueSpec {
    let mut cursor = spec.walk();
    let names = spec
        .children_by_field_name("name", &mut cursor)
        .map(|name| Ident {
            name: tree.span_text(name.byte_range().into()).to_string(),
            span: name.byte_range().into(),
        })
        .collect();

    let mut values = Vec::new();
    if let Some(list) = spec.child_by_field_name("value") {
        let mut cursor = list.walk();
        for value in list.named_children(&mut cursor) {
            if value.kind() != "comment" {
                values.push(expr(value, tree));
            }
        }
    }

    ValueSpec { names, values }
}

fn expr(node: Node<'_>, tree: &mut SourceTree) -> Expr {
    let span: Span = node.byte_range().into();
    let kind = match node.kind() {
        "interpreted_string_literal" => LiteralKind::Interpreted,
        "raw_string_literal" => LiteralKind::Raw,
        _ => return Expr::Other(span),
    };
    Expr::StringLit(tree.add_literal(kind, span, position(node)))
}
