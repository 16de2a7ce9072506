//! Semantic analysis: declare-before-use, redeclaration, and assignment
//! type checking over the flat token sequence.
//!
//! The scan does not exploit block structure, so the namespace is a single
//! flat table spanning the whole program regardless of `{ }` nesting.

use std::collections::HashMap;
use std::fmt;

use crate::error::{CompileError, CompileResult};
use crate::lexer::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
  Int,
}

impl fmt::Display for VarType {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      VarType::Int => write!(f, "int"),
    }
  }
}

/// Name-to-type mapping built fresh for each `analyze` call. A name, once
/// inserted, is never removed or retyped within a run.
pub struct SymbolTable {
  symbols: HashMap<String, VarType>,
}

impl SymbolTable {
  pub fn new() -> SymbolTable {
    SymbolTable {
      symbols: HashMap::new(),
    }
  }

  pub fn insert(&mut self, id: String, ty: VarType) {
    self.symbols.insert(id, ty);
  }

  pub fn get(&self, id: &str) -> Option<VarType> {
    self.symbols.get(id).copied()
  }
}

/// Single left-to-right pass over the tokens. The first violated rule
/// aborts the whole run.
pub fn analyze(tokens: &[Token]) -> CompileResult<()> {
  let mut symbols = SymbolTable::new();
  let mut i = 0;
  while i < tokens.len() {
    let token = &tokens[i];
    match token.kind {
      TokenKind::Int => {
        let next = match tokens.get(i + 1) {
          Some(next) if next.kind == TokenKind::Identifier => next,
          Some(other) => {
            return Err(CompileError::semantic("Expected variable name after 'int'.", other));
          }
          None => {
            return Err(CompileError::semantic("Expected variable name after 'int'.", token));
          }
        };
        let name = &next.literal;
        if symbols.get(name).is_some() {
          return Err(CompileError::semantic(
            format!("Variable '{}' already declared.", name),
            next,
          ));
        }
        symbols.insert(name.clone(), VarType::Int);
        i += 2; // Skip the declared identifier
      }
      TokenKind::Identifier => {
        let name = &token.literal;
        let expected = match symbols.get(name) {
          Some(ty) => ty,
          None => {
            return Err(CompileError::semantic(
              format!("Variable '{}' used before declaration.", name),
              token,
            ));
          }
        };
        let assigned = matches!(tokens.get(i + 1), Some(next) if next.kind == TokenKind::Assign);
        if !assigned {
          i += 1;
          continue;
        }
        let value = match tokens.get(i + 2) {
          Some(value) => value,
          None => {
            return Err(CompileError::semantic(
              format!("Expected value after '=' in assignment to '{}'.", name),
              &tokens[i + 1],
            ));
          }
        };
        match value.kind {
          TokenKind::Number => {
            if expected != VarType::Int {
              return Err(CompileError::semantic(
                format!("Cannot assign 'int' to variable '{}' of type '{}'.", name, expected),
                value,
              ));
            }
          }
          TokenKind::Identifier => {
            let rhs = &value.literal;
            let rhs_ty = match symbols.get(rhs) {
              Some(ty) => ty,
              None => {
                return Err(CompileError::semantic(
                  format!("Variable '{}' used before declaration.", rhs),
                  value,
                ));
              }
            };
            if rhs_ty != expected {
              return Err(CompileError::semantic(
                format!(
                  "Type mismatch: Cannot assign '{}' to '{}' in '{} = {}'.",
                  rhs_ty, expected, name, rhs
                ),
                value,
              ));
            }
          }
          other => {
            return Err(CompileError::semantic(
              format!("Unsupported assignment value type: {}", other),
              value,
            ));
          }
        }
        i += 3; // Skip '=' and the assigned value
      }
      _ => {
        i += 1;
      }
    }
  }
  Ok(())
}
