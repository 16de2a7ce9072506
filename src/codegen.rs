//! Three-address code generation for flat assignment statements.
//!
//! Scans the token sequence for `IDENTIFIER = <operand> (op <operand>)* ;`
//! and lowers each match to TAC lines, one fresh `t<N>` temporary per
//! operator. The chain is applied strictly left to right with no operator
//! precedence. Control constructs (`if`/`while`/`print` and their bodies)
//! are deliberately not lowered; this stage's guarantee covers flat
//! assignments only.

use crate::error::{CompileError, CompileResult};
use crate::lexer::{Token, TokenKind};

fn is_operator(kind: TokenKind) -> bool {
  matches!(
    kind,
    TokenKind::Plus | TokenKind::Minus | TokenKind::Mult | TokenKind::Div
  )
}

fn is_operand(kind: TokenKind) -> bool {
  matches!(kind, TokenKind::Identifier | TokenKind::Number)
}

/// Emit TAC lines in program order. The temp counter starts at 1 and is
/// fresh for every call.
pub fn generate(tokens: &[Token]) -> CompileResult<Vec<String>> {
  let mut lines = Vec::new();
  let mut temp_count: usize = 0;
  let mut i = 0;
  while i < tokens.len() {
    let starts_assignment = tokens[i].kind == TokenKind::Identifier
      && matches!(tokens.get(i + 1), Some(next) if next.kind == TokenKind::Assign);
    if !starts_assignment {
      i += 1;
      continue;
    }
    let dest = tokens[i].literal.clone();
    i += 2;

    let mut value = match tokens.get(i) {
      Some(tok) if is_operand(tok.kind) => tok.literal.clone(),
      Some(tok) if tok.kind == TokenKind::Semicolon => {
        return Err(CompileError::codegen(
          format!("Missing expression after '=' in assignment to '{}'.", dest),
          Some(tok),
        ));
      }
      Some(tok) => {
        return Err(CompileError::codegen(
          "Unexpected token where an operand was expected.",
          Some(tok),
        ));
      }
      None => {
        return Err(CompileError::codegen(
          format!("Missing expression after '=' in assignment to '{}'.", dest),
          None,
        ));
      }
    };
    i += 1;

    // Each operator folds the running left value with the next operand,
    // threading the previous temporary as the new left operand.
    while matches!(tokens.get(i), Some(tok) if is_operator(tok.kind)) {
      let op = &tokens[i];
      let operand = match tokens.get(i + 1) {
        Some(tok) if is_operand(tok.kind) => tok.literal.clone(),
        Some(tok) => {
          return Err(CompileError::codegen(
            "Unexpected token where an operand was expected.",
            Some(tok),
          ));
        }
        None => {
          return Err(CompileError::codegen(
            format!("Missing operand after '{}'.", op.literal),
            None,
          ));
        }
      };
      temp_count += 1;
      let temp = format!("t{}", temp_count);
      lines.push(format!("{} = {} {} {}", temp, value, op.literal, operand));
      value = temp;
      i += 2;
    }

    match tokens.get(i) {
      Some(tok) if tok.kind == TokenKind::Semicolon => {
        i += 1;
      }
      other => {
        return Err(CompileError::codegen("Expected ';' after assignment.", other));
      }
    }
    lines.push(format!("{} = {}", dest, value));
  }
  Ok(lines)
}
