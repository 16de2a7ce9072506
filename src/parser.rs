use std::boxed::Box;

use crate::ast::{Assignment, BinaryOp, Block, Expr, IfStmt, IntImm, PrintStmt, Stmt, VarDecl, Variable, WhileStmt};
use crate::error::{CompileError, CompileResult};
use crate::lexer::{Token, TokenKind};

const COMPARISONS: [TokenKind; 4] = [
  TokenKind::Greater,
  TokenKind::Less,
  TokenKind::Equal,
  TokenKind::NotEqual,
];

/// One-token-lookahead cursor over the token sequence.
pub struct Parser {
  tokens: Vec<Token>,
  head: usize,
}

impl Parser {
  pub fn new(tokens: Vec<Token>) -> Self {
    Parser { tokens, head: 0 }
  }

  fn at_end(&self) -> bool {
    self.head >= self.tokens.len()
  }

  fn peek(&self) -> Option<&Token> {
    self.tokens.get(self.head)
  }

  fn check(&self, kind: TokenKind) -> bool {
    matches!(self.peek(), Some(tok) if tok.kind == kind)
  }

  /// Advance past the current token if it has the given kind.
  fn take(&mut self, kind: TokenKind) -> bool {
    if self.check(kind) {
      self.head += 1;
      return true;
    }
    false
  }

  fn take_one_of(&mut self, kinds: &[TokenKind]) -> Option<Token> {
    match self.peek() {
      Some(tok) if kinds.contains(&tok.kind) => {
        let tok = tok.clone();
        self.head += 1;
        Some(tok)
      }
      _ => None,
    }
  }

  fn consume(&mut self, kind: TokenKind, what: &str) -> CompileResult<Token> {
    match self.peek() {
      Some(tok) if tok.kind == kind => {
        let tok = tok.clone();
        self.head += 1;
        Ok(tok)
      }
      _ => Err(self.mismatch(what)),
    }
  }

  fn mismatch(&self, what: &str) -> CompileError {
    CompileError::syntax(what, self.peek())
  }
}

/// Parse the whole token sequence into a program `Block`. The first
/// structural mismatch aborts the parse; there is no error recovery.
pub fn parse(tokens: Vec<Token>) -> CompileResult<Block> {
  let mut parser = Parser::new(tokens);
  let mut stmts = Vec::new();
  while !parser.at_end() {
    stmts.push(parse_statement(&mut parser)?);
  }
  Ok(Block { stmts })
}

fn parse_statement(parser: &mut Parser) -> CompileResult<Stmt> {
  if parser.take(TokenKind::Int) {
    return parse_declaration(parser);
  }
  if parser.check(TokenKind::Identifier) {
    return parse_assignment(parser);
  }
  if parser.take(TokenKind::If) {
    return parse_if(parser);
  }
  if parser.take(TokenKind::While) {
    return parse_while(parser);
  }
  if parser.take(TokenKind::Print) {
    return parse_print(parser);
  }
  if parser.check(TokenKind::LBrace) {
    let block = parse_block(parser)?;
    return Ok(Stmt::Block(Box::new(block)));
  }
  Err(parser.mismatch("Expected a valid statement."))
}

fn parse_declaration(parser: &mut Parser) -> CompileResult<Stmt> {
  let id = parser.consume(TokenKind::Identifier, "Expected variable name after 'int'.")?;
  parser.consume(TokenKind::Semicolon, "Expected ';' after declaration.")?;
  Ok(Stmt::VarDecl(Box::new(VarDecl { id })))
}

fn parse_assignment(parser: &mut Parser) -> CompileResult<Stmt> {
  let id = parser.consume(TokenKind::Identifier, "Expected variable name.")?;
  parser.consume(TokenKind::Assign, "Expected '=' in assignment.")?;
  let value = parse_expression(parser)?;
  parser.consume(TokenKind::Semicolon, "Expected ';' after assignment.")?;
  Ok(Stmt::Assign(Box::new(Assignment { id, value })))
}

fn parse_if(parser: &mut Parser) -> CompileResult<Stmt> {
  parser.consume(TokenKind::LParen, "Expected '(' after 'if'.")?;
  let cond = parse_expression(parser)?;
  parser.consume(TokenKind::RParen, "Expected ')' after condition.")?;
  let then_blk = parse_block(parser)?;
  let else_blk = if parser.take(TokenKind::Else) {
    Some(parse_block(parser)?)
  } else {
    None
  };
  Ok(Stmt::If(Box::new(IfStmt { cond, then_blk, else_blk })))
}

fn parse_while(parser: &mut Parser) -> CompileResult<Stmt> {
  parser.consume(TokenKind::LParen, "Expected '(' after 'while'.")?;
  let cond = parse_expression(parser)?;
  parser.consume(TokenKind::RParen, "Expected ')' after condition.")?;
  let body = parse_block(parser)?;
  Ok(Stmt::While(Box::new(WhileStmt { cond, body })))
}

fn parse_print(parser: &mut Parser) -> CompileResult<Stmt> {
  parser.consume(TokenKind::LParen, "Expected '(' after 'print'.")?;
  let value = parse_expression(parser)?;
  parser.consume(TokenKind::RParen, "Expected ')' after expression.")?;
  parser.consume(TokenKind::Semicolon, "Expected ';' after print statement.")?;
  Ok(Stmt::Print(Box::new(PrintStmt { value })))
}

fn parse_block(parser: &mut Parser) -> CompileResult<Block> {
  parser.consume(TokenKind::LBrace, "Expected '{' to start block.")?;
  let mut stmts = Vec::new();
  while !parser.check(TokenKind::RBrace) && !parser.at_end() {
    stmts.push(parse_statement(parser)?);
  }
  parser.consume(TokenKind::RBrace, "Expected '}' to close block.")?;
  Ok(Block { stmts })
}

/// Comparison level. At most one of `> < == !=` may appear; comparisons
/// do not chain.
fn parse_expression(parser: &mut Parser) -> CompileResult<Expr> {
  let lhs = parse_arithmetic(parser)?;
  if let Some(op) = parser.take_one_of(&COMPARISONS) {
    let rhs = parse_arithmetic(parser)?;
    return Ok(Expr::BinaryOp(Box::new(BinaryOp { lhs, rhs, op })));
  }
  Ok(lhs)
}

fn parse_arithmetic(parser: &mut Parser) -> CompileResult<Expr> {
  let mut expr = parse_term(parser)?;
  while let Some(op) = parser.take_one_of(&[TokenKind::Plus, TokenKind::Minus]) {
    let rhs = parse_term(parser)?;
    expr = Expr::BinaryOp(Box::new(BinaryOp { lhs: expr, rhs, op }));
  }
  Ok(expr)
}

fn parse_term(parser: &mut Parser) -> CompileResult<Expr> {
  let mut expr = parse_factor(parser)?;
  while let Some(op) = parser.take_one_of(&[TokenKind::Mult, TokenKind::Div]) {
    let rhs = parse_factor(parser)?;
    expr = Expr::BinaryOp(Box::new(BinaryOp { lhs: expr, rhs, op }));
  }
  Ok(expr)
}

fn parse_factor(parser: &mut Parser) -> CompileResult<Expr> {
  if parser.check(TokenKind::Number) {
    let token = parser.consume(TokenKind::Number, "Expected a number.")?;
    let value: i64 = match token.literal.parse() {
      Ok(value) => value,
      Err(_) => {
        return Err(CompileError::syntax("Number literal out of range.", Some(&token)));
      }
    };
    return Ok(Expr::IntImm(Box::new(IntImm { token, value })));
  }
  if parser.check(TokenKind::Identifier) {
    let id = parser.consume(TokenKind::Identifier, "Expected variable name.")?;
    return Ok(Expr::Variable(Box::new(Variable { id })));
  }
  if parser.take(TokenKind::LParen) {
    let expr = parse_expression(parser)?;
    parser.consume(TokenKind::RParen, "Expected ')' after expression.")?;
    return Ok(expr);
  }
  Err(parser.mismatch("Expected number, variable, or '(' expression ')'."))
}
