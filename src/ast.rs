use std::boxed::Box;

use crate::lexer::Token;

/// A brace-delimited sequence of statements; also the whole program.
#[derive(Clone, Debug)]
pub struct Block {
  pub stmts: Vec<Stmt>,
}

#[derive(Clone, Debug)]
pub enum Stmt {
  VarDecl(Box<VarDecl>),
  Assign(Box<Assignment>),
  If(Box<IfStmt>),
  While(Box<WhileStmt>),
  Print(Box<PrintStmt>),
  Block(Box<Block>),
}

/// `int <name> ;` — MiniLang's only declared type is the integer.
#[derive(Clone, Debug)]
pub struct VarDecl {
  pub id: Token,
}

#[derive(Clone, Debug)]
pub struct Assignment {
  pub id: Token,
  pub value: Expr,
}

#[derive(Clone, Debug)]
pub struct IfStmt {
  pub cond: Expr,
  pub then_blk: Block,
  /// Absent else is a valid state, not an error.
  pub else_blk: Option<Block>,
}

#[derive(Clone, Debug)]
pub struct WhileStmt {
  pub cond: Expr,
  pub body: Block,
}

#[derive(Clone, Debug)]
pub struct PrintStmt {
  pub value: Expr,
}

#[derive(Clone, Debug)]
pub enum Expr {
  IntImm(Box<IntImm>),
  Variable(Box<Variable>),
  BinaryOp(Box<BinaryOp>),
}

#[derive(Clone, Debug)]
pub struct IntImm {
  pub token: Token, // The token this value derived
  pub value: i64,
}

#[derive(Clone, Debug)]
pub struct Variable {
  pub id: Token,
}

impl Variable {
  pub fn id(&self) -> &String {
    &self.id.literal
  }
}

#[derive(Clone, Debug)]
pub struct BinaryOp {
  pub lhs: Expr,
  pub rhs: Expr,
  pub op: Token,
}
