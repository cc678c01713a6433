//! Property-based tests for the lossless syntax tree
//!
//! Whatever the builder parses must render back byte-for-byte, and a
//! conversion must never touch anything outside the rewritten type slots.

use std::path::PathBuf;
use std::sync::Arc;

use codegraph_rewrite::features::declaration_scan::scan;
use codegraph_rewrite::features::semantic::JavaAnalyzer;
use codegraph_rewrite::features::syntax::{CompilationUnit, LanguageId, LineEnding, TreeSitterBuilder};
use codegraph_rewrite::features::type_resolution::TypeResolver;
use codegraph_rewrite::features::rewrite::{RewritePlan, TreeRewriter};
use proptest::prelude::*;

// Strategy for generating Java identifiers
fn java_identifier() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_]{0,8}".prop_filter("not a keyword", |s| {
        !matches!(
            s.as_str(),
            "var" | "int" | "long" | "new" | "class" | "void" | "for" | "if" | "do" | "try" | "char" | "byte"
                | "case" | "else" | "enum" | "goto" | "this" | "null" | "true" | "false" | "final" | "float"
                | "short" | "super" | "while" | "break" | "catch" | "const" | "throw" | "double" | "import"
                | "native" | "public" | "record" | "return" | "static" | "switch" | "throws" | "assert"
                | "boolean" | "default" | "extends" | "finally" | "package" | "private" | "abstract"
                | "continue" | "strictfp" | "volatile" | "interface" | "protected" | "transient"
                | "implements" | "instanceof" | "synchronized" | "module" | "open" | "to" | "with"
                | "yield" | "sealed" | "permits" | "exports" | "opens" | "requires" | "uses" | "provides"
                | "transitive"
        )
    })
}

fn gap() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(" ".to_string()),
        Just("  ".to_string()),
        Just("\t".to_string()),
        Just(" /* c */ ".to_string()),
    ]
}

fn initializer() -> impl Strategy<Value = String> {
    prop_oneof![
        (0..1000i32).prop_map(|n| n.to_string()),
        (0..1000i64).prop_map(|n| format!("{n}L")),
        "[a-z ]{0,6}".prop_map(|s| format!("\"{s}\"")),
        Just("true".to_string()),
        Just("1.5".to_string()),
        Just("null".to_string()),
    ]
}

// One local declaration, implicit or explicit
fn statement() -> impl Strategy<Value = String> {
    (any::<bool>(), java_identifier(), gap(), initializer(), prop::option::of("// [a-z ]{0,8}"))
        .prop_map(|(implicit, name, gap, init, comment)| {
            let ty = if implicit { "var" } else { "Object" };
            let comment = comment.map(|c| format!(" {c}")).unwrap_or_default();
            format!("{ty}{gap}{name} = {init};{comment}")
        })
}

fn java_source() -> impl Strategy<Value = (String, bool)> {
    (prop::collection::vec(statement(), 0..8), any::<bool>()).prop_map(|(statements, crlf)| {
        let eol = if crlf { "\r\n" } else { "\n" };
        let body: String = statements
            .iter()
            .enumerate()
            .map(|(i, s)| format!("        {}{eol}", s.replacen(" = ", &format!("{i} = "), 1)))
            .collect();
        (
            format!("class P {{{eol}    void run() {{{eol}{body}    }}{eol}}}{eol}"),
            crlf,
        )
    })
}

// Token soup; usually not valid Java
fn token_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("class"),
            Just("var"),
            Just("{"),
            Just("}"),
            Just("("),
            Just(")"),
            Just(";"),
            Just("="),
            Just("x"),
            Just("1"),
            Just("\"s\""),
            Just(" "),
            Just("\n"),
            Just("\r\n"),
            Just("// c\n"),
            Just("/* c */"),
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn generated_programs_round_trip((source, _) in java_source()) {
        let built = TreeSitterBuilder::java().build(&source).unwrap();
        prop_assert!(!built.has_errors());
        prop_assert_eq!(built.root.full_text(), source);
    }

    #[test]
    fn broken_input_still_round_trips(source in token_soup()) {
        let built = TreeSitterBuilder::java().build(&source).unwrap();
        prop_assert_eq!(built.root.full_text(), source);
    }

    #[test]
    fn conversion_only_touches_type_slots((source, crlf) in java_source()) {
        let built = TreeSitterBuilder::java().build(&source).unwrap();
        let model = JavaAnalyzer::new(Vec::<String>::new()).analyze(&built.root);
        let line_ending = if crlf { LineEnding::CrLf } else { LineEnding::Lf };
        let unit = CompilationUnit::new(
            PathBuf::from("P.java"),
            LanguageId::Java,
            Arc::new(built.root),
            line_ending,
            built.next_node_id,
        );

        let resolution = TypeResolver::for_unit(&unit).resolve(&unit, &model, scan(&unit));
        let plan = RewritePlan::from_resolution(&resolution).unwrap();
        let rewritten = TreeRewriter::new().apply(&unit, &plan).unwrap();
        let output = rewritten.render();

        let spellings: Vec<&str> = resolution
            .candidates
            .iter()
            .map(|c| c.symbol.fully_qualified.as_str())
            .collect();

        // Statements sit on their own lines; a changed line only differs in its type slot
        let mut changed = 0;
        for (before, after) in source.split('\n').zip(output.split('\n')) {
            if before == after {
                continue;
            }
            changed += 1;
            prop_assert!(before.trim_start().starts_with("var"));
            prop_assert!(spellings.iter().any(|s| before.replacen("var", s, 1) == after));
        }
        prop_assert_eq!(changed, plan.len());
        prop_assert_eq!(output.split('\n').count(), source.split('\n').count());
    }
}
