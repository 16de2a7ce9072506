use rstest::*;

use crate::ast::{Expr, Stmt};
use crate::codegen::generate;
use crate::error::CompileError;
use crate::lexer::{tokenize, TokenKind};
use crate::parser::parse;
use crate::sema::analyze;

const FULL_PROGRAM: &str = "\
int x;
int y;
x = 1;
if (x > 0) {
  y = x + 2;
} else {
  y = 0;
}
while (y != 0) {
  print(y);
  y = y - 1;
}
";

// === Tokenizer ===

#[test]
fn tokenize_is_idempotent() {
  let src = "int x; x = 5; // trailing comment\nprint(x);";
  assert_eq!(tokenize(src), tokenize(src));
}

#[rstest]
#[case("intval", TokenKind::Identifier)]
#[case("ifx", TokenKind::Identifier)]
#[case("elsewhere", TokenKind::Identifier)]
#[case("whiled", TokenKind::Identifier)]
#[case("printer", TokenKind::Identifier)]
#[case("int", TokenKind::Int)]
#[case("if", TokenKind::If)]
#[case("else", TokenKind::Else)]
#[case("while", TokenKind::While)]
#[case("print", TokenKind::Print)]
fn keyword_identifier_disambiguation(#[case] word: &str, #[case] expected: TokenKind) {
  let tokens = tokenize(word);
  assert_eq!(tokens.len(), 1);
  assert_eq!(tokens[0].kind, expected);
  assert_eq!(tokens[0].literal, word);
}

#[test]
fn keyword_prefixed_name_lexes_as_one_identifier() {
  let tokens = tokenize("intval = 5;");
  let kinds: Vec<TokenKind> = tokens.iter().map(|tok| tok.kind).collect();
  assert_eq!(
    kinds,
    vec![
      TokenKind::Identifier,
      TokenKind::Assign,
      TokenKind::Number,
      TokenKind::Semicolon,
    ]
  );
  assert_eq!(tokens[0].literal, "intval");
}

#[test]
fn unknown_characters_are_skipped_silently() {
  let tokens = tokenize("int @ x;$");
  let kinds: Vec<TokenKind> = tokens.iter().map(|tok| tok.kind).collect();
  assert_eq!(kinds, vec![TokenKind::Int, TokenKind::Identifier, TokenKind::Semicolon]);
}

#[test]
fn two_char_comparisons_win_over_single_char_rules() {
  let tokens = tokenize("a == b != c");
  let kinds: Vec<TokenKind> = tokens.iter().map(|tok| tok.kind).collect();
  assert_eq!(
    kinds,
    vec![
      TokenKind::Identifier,
      TokenKind::Equal,
      TokenKind::Identifier,
      TokenKind::NotEqual,
      TokenKind::Identifier,
    ]
  );
}

#[test]
fn comments_and_whitespace_produce_no_tokens() {
  assert!(tokenize("  // just a comment\n\t\n").is_empty());
}

#[test]
fn comment_rule_wins_over_division() {
  let tokens = tokenize("x = a / b; // x = c / d;");
  let kinds: Vec<TokenKind> = tokens.iter().map(|tok| tok.kind).collect();
  assert_eq!(
    kinds,
    vec![
      TokenKind::Identifier,
      TokenKind::Assign,
      TokenKind::Identifier,
      TokenKind::Div,
      TokenKind::Identifier,
      TokenKind::Semicolon,
    ]
  );
}

#[test]
fn token_positions_track_rows_and_columns() {
  let tokens = tokenize("int x;\nx = 1;");
  assert_eq!((tokens[0].row, tokens[0].col), (1, 1));
  assert_eq!((tokens[3].row, tokens[3].col), (2, 1));
}

#[test]
fn tokens_render_in_bracketed_form() {
  let tokens = tokenize("int x;");
  assert_eq!(format!("{}", tokens[0]), "[INT : int]");
  assert_eq!(format!("{}", tokens[1]), "[IDENTIFIER : x]");
}

// === Parser ===

#[test]
fn full_program_parses() {
  assert!(parse(tokenize(FULL_PROGRAM)).is_ok());
}

#[rstest]
#[case("int x")]
#[case("x = 5")]
#[case("print(x)")]
#[case("if x > 0) {}")]
#[case("if (x > 0 {}")]
#[case("if (x > 0) { print(x); ")]
#[case("while (x > 0) print(x);")]
#[case("{ int x; ")]
#[case("= 5;")]
fn missing_punctuation_is_a_syntax_error(#[case] src: &str) {
  let err = parse(tokenize(src)).unwrap_err();
  assert!(matches!(err, CompileError::Syntax { .. }));
}

#[test]
fn syntax_errors_name_the_offending_token() {
  let err = parse(tokenize("int 5;")).unwrap_err();
  let msg = err.to_string();
  assert!(msg.contains("Syntax Error"));
  assert!(msg.contains("'5'"));
  assert!(msg.contains("NUMBER"));
}

#[test]
fn syntax_errors_mark_end_of_input() {
  let err = parse(tokenize("int x")).unwrap_err();
  assert!(err.to_string().contains("end of input"));
}

#[test]
fn comparisons_do_not_chain() {
  let err = parse(tokenize("if (a > b > c) {}")).unwrap_err();
  match err {
    CompileError::Syntax { location, .. } => assert!(location.contains("'>'")),
    other => panic!("expected syntax error, got {}", other),
  }
}

#[test]
fn precedence_shapes_the_tree() {
  let block = parse(tokenize("x = a + b * c;")).unwrap();
  let assign = match &block.stmts[0] {
    Stmt::Assign(assign) => assign,
    _ => panic!("expected assignment"),
  };
  let add = match &assign.value {
    Expr::BinaryOp(op) => op,
    _ => panic!("expected binary expression"),
  };
  assert_eq!(add.op.literal, "+");
  let mul = match &add.rhs {
    Expr::BinaryOp(op) => op,
    _ => panic!("expected nested binary expression"),
  };
  assert_eq!(mul.op.literal, "*");
}

#[test]
fn parenthesized_expressions_override_precedence() {
  let block = parse(tokenize("x = (a + b) * c;")).unwrap();
  let assign = match &block.stmts[0] {
    Stmt::Assign(assign) => assign,
    _ => panic!("expected assignment"),
  };
  let mul = match &assign.value {
    Expr::BinaryOp(op) => op,
    _ => panic!("expected binary expression"),
  };
  assert_eq!(mul.op.literal, "*");
  assert!(matches!(&mul.lhs, Expr::BinaryOp(add) if add.op.literal == "+"));
}

#[test]
fn else_block_is_optional() {
  let block = parse(tokenize("if (x > 0) { print(x); }")).unwrap();
  match &block.stmts[0] {
    Stmt::If(branch) => assert!(branch.else_blk.is_none()),
    _ => panic!("expected if statement"),
  }
  let block = parse(tokenize("if (x > 0) { print(x); } else { print(y); }")).unwrap();
  match &block.stmts[0] {
    Stmt::If(branch) => assert!(branch.else_blk.is_some()),
    _ => panic!("expected if statement"),
  }
}

#[test]
fn standalone_block_is_a_statement() {
  let block = parse(tokenize("{ int x; x = 1; }")).unwrap();
  assert_eq!(block.stmts.len(), 1);
  assert!(matches!(&block.stmts[0], Stmt::Block(inner) if inner.stmts.len() == 2));
}

#[test]
fn ast_printer_renders_a_tree() {
  let block = parse(tokenize("int x; x = 1 + 2;")).unwrap();
  let rendered = format!("{}", block);
  assert!(rendered.contains("Declaration=x"));
  assert!(rendered.contains("BinaryOp=+"));
  assert!(rendered.contains("Number=1"));
}

// === Semantic checker ===

#[test]
fn declare_then_use_passes() {
  analyze(&tokenize("int x; x = 5;")).unwrap();
}

#[test]
fn redeclaration_is_rejected() {
  let err = analyze(&tokenize("int x; int x;")).unwrap_err();
  match err {
    CompileError::Semantic { message, .. } => {
      assert!(message.contains("'x' already declared"));
    }
    other => panic!("expected semantic error, got {}", other),
  }
}

#[test]
fn use_before_declaration_is_rejected() {
  let err = analyze(&tokenize("y = 1;")).unwrap_err();
  match err {
    CompileError::Semantic { message, .. } => {
      assert!(message.contains("'y' used before declaration"));
    }
    other => panic!("expected semantic error, got {}", other),
  }
}

#[test]
fn undeclared_rhs_variable_is_rejected() {
  let err = analyze(&tokenize("int x; x = y;")).unwrap_err();
  match err {
    CompileError::Semantic { message, .. } => {
      assert!(message.contains("'y' used before declaration"));
    }
    other => panic!("expected semantic error, got {}", other),
  }
}

#[test]
fn assignment_between_declared_variables_passes() {
  analyze(&tokenize("int x; int y; x = 1; y = x;")).unwrap();
}

#[test]
fn non_value_rhs_is_a_type_error() {
  let err = analyze(&tokenize("int x; x = (1 + 2);")).unwrap_err();
  match err {
    CompileError::Semantic { message, .. } => {
      assert!(message.contains("Unsupported assignment value type"));
    }
    other => panic!("expected semantic error, got {}", other),
  }
}

#[test]
fn dangling_int_keyword_is_rejected() {
  let err = analyze(&tokenize("int")).unwrap_err();
  assert!(matches!(err, CompileError::Semantic { .. }));
}

#[test]
fn full_program_passes_semantic_check() {
  analyze(&tokenize(FULL_PROGRAM)).unwrap();
}

// === Code generator ===

#[test]
fn simple_assignment_round_trip() {
  let lines = generate(&tokenize("int x; x = 5;")).unwrap();
  assert_eq!(lines, vec!["x = 5"]);
}

#[test]
fn single_operator_introduces_one_temp() {
  let lines = generate(&tokenize("int a; int b; int c; a = b + c;")).unwrap();
  assert_eq!(lines, vec!["t1 = b + c", "a = t1"]);
}

#[test]
fn chains_lower_left_to_right_without_precedence() {
  let lines = generate(&tokenize("x = a + b * c;")).unwrap();
  assert_eq!(lines, vec!["t1 = a + b", "t2 = t1 * c", "x = t2"]);
}

#[test]
fn temp_counter_resets_per_run() {
  let src = "x = a + b;";
  let first = generate(&tokenize(src)).unwrap();
  let second = generate(&tokenize(src)).unwrap();
  assert_eq!(first, second);
  assert_eq!(first[0], "t1 = a + b");
}

#[test]
fn temp_counter_is_monotonic_within_a_run() {
  let lines = generate(&tokenize("x = a + b; y = c / d;")).unwrap();
  assert_eq!(lines, vec!["t1 = a + b", "x = t1", "t2 = c / d", "y = t2"]);
}

#[rstest]
#[case("x = ;")]
#[case("x =")]
#[case("x = 5 + ;")]
#[case("x = 5 +")]
#[case("x = 5 + 1")]
#[case("x = (a + b);")]
fn malformed_assignments_abort_generation(#[case] src: &str) {
  let err = generate(&tokenize(src)).unwrap_err();
  assert!(matches!(err, CompileError::CodeGen { .. }));
}

#[test]
fn missing_expression_diagnostic_names_the_destination() {
  let err = generate(&tokenize("x = ;")).unwrap_err();
  match err {
    CompileError::CodeGen { message, .. } => {
      assert!(message.contains("Missing expression after '='"));
      assert!(message.contains("'x'"));
    }
    other => panic!("expected codegen error, got {}", other),
  }
}

#[test]
fn missing_operand_diagnostic_names_the_operator() {
  let err = generate(&tokenize("x = 5 +")).unwrap_err();
  match err {
    CompileError::CodeGen { message, .. } => {
      assert!(message.contains("Missing operand after '+'"));
    }
    other => panic!("expected codegen error, got {}", other),
  }
}

#[test]
fn missing_semicolon_diagnostic_after_complete_chain() {
  let err = generate(&tokenize("x = 5 + 1")).unwrap_err();
  match err {
    CompileError::CodeGen { message, location } => {
      assert!(message.contains("Expected ';' after assignment."));
      assert!(location.contains("end of input"));
    }
    other => panic!("expected codegen error, got {}", other),
  }
}

#[test]
fn control_flow_is_not_lowered() {
  let lines = generate(&tokenize("while (x > 0) { x = x - 1; }")).unwrap();
  assert_eq!(lines, vec!["t1 = x - 1", "x = t1"]);
}

#[test]
fn full_program_generates_in_program_order() {
  let lines = generate(&tokenize(FULL_PROGRAM)).unwrap();
  assert_eq!(
    lines,
    vec![
      "x = 1",
      "t1 = x + 2",
      "y = t1",
      "y = 0",
      "t2 = y - 1",
      "y = t2",
    ]
  );
}

// === Pipeline ===

#[test]
fn pipeline_stops_at_first_failing_stage() {
  // Syntactically fine, semantically invalid; the generator never runs.
  let err = crate::compiler::invoke("redecl.minilang", "int x; int x;", false).unwrap_err();
  assert!(matches!(err, CompileError::Semantic { .. }));
}
