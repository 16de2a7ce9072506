//! Shared error types for the compilation pipeline.
//!
//! Every stage returns `CompileResult`; the first error aborts the whole
//! run and no later stage is invoked. Unrecognized characters during
//! lexical analysis are skipped silently and have no error variant here.

use snafu::Snafu;

use crate::lexer::Token;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Snafu)]
pub enum CompileError {
  #[snafu(display("Syntax Error: {message} at {location}"))]
  Syntax { message: String, location: String },

  #[snafu(display("Semantic Error: {message}\n   -> offending token: {token}"))]
  Semantic { message: String, token: String },

  #[snafu(display("Code Generation Error: {message} at {location}"))]
  CodeGen { message: String, location: String },
}

impl CompileError {
  fn locate(token: Option<&Token>) -> String {
    match token {
      Some(tok) => format!("token: {}", tok.describe()),
      None => "end of input".to_string(),
    }
  }

  pub fn syntax(message: impl Into<String>, token: Option<&Token>) -> Self {
    CompileError::Syntax {
      message: message.into(),
      location: Self::locate(token),
    }
  }

  pub fn semantic(message: impl Into<String>, token: &Token) -> Self {
    CompileError::Semantic {
      message: message.into(),
      token: token.describe(),
    }
  }

  pub fn codegen(message: impl Into<String>, token: Option<&Token>) -> Self {
    CompileError::CodeGen {
      message: message.into(),
      location: Self::locate(token),
    }
  }
}
