use std::fmt;

use either::Either::{self, Left, Right};
use regex::Regex;

/// Kinds of tokens recognized by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  // Keywords
  Int,
  If,
  Else,
  While,
  Print,
  // Identifiers and literals
  Identifier,
  Number,
  // Operators and punctuation
  Assign,
  Semicolon,
  Plus,
  Minus,
  Mult,
  Div,
  Greater,
  Less,
  Equal,
  NotEqual,
  LParen,
  RParen,
  LBrace,
  RBrace,
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let name = match self {
      TokenKind::Int => "INT",
      TokenKind::If => "IF",
      TokenKind::Else => "ELSE",
      TokenKind::While => "WHILE",
      TokenKind::Print => "PRINT",
      TokenKind::Identifier => "IDENTIFIER",
      TokenKind::Number => "NUMBER",
      TokenKind::Assign => "ASSIGN",
      TokenKind::Semicolon => "SEMICOLON",
      TokenKind::Plus => "PLUS",
      TokenKind::Minus => "MINUS",
      TokenKind::Mult => "MULT",
      TokenKind::Div => "DIV",
      TokenKind::Greater => "GREATER",
      TokenKind::Less => "LESS",
      TokenKind::Equal => "EQUAL",
      TokenKind::NotEqual => "NOTEQUAL",
      TokenKind::LParen => "LPAREN",
      TokenKind::RParen => "RPAREN",
      TokenKind::LBrace => "LBRACE",
      TokenKind::RBrace => "RBRACE",
    };
    write!(f, "{}", name)
  }
}

/// Matched but never materialized as a token.
#[derive(Debug, Clone, Copy)]
enum Trivia {
  Whitespace,
  Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub literal: String,
  pub row: usize,
  pub col: usize,
}

impl Token {
  /// Diagnostic rendering of this token, e.g. `'x' (type=IDENTIFIER)`.
  pub fn describe(&self) -> String {
    format!("'{}' (type={})", self.literal, self.kind)
  }
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "[{} : {}]", self.kind, self.literal)
  }
}

pub struct Lexer {
  src: String,
  head: usize,
  row: usize,
  col: usize,
  token_rules: Vec<(Regex, Either<TokenKind, Trivia>)>,
}

impl Lexer {
  pub fn new(src: &str) -> Self {
    Lexer {
      src: src.to_string(),
      head: 0,
      row: 1,
      col: 1,
      // Tried in order at each position; the first rule that matches wins.
      // Keywords are `\b`-anchored so `intx` falls through to the
      // identifier rule, and `==`/`!=` are listed before `=`.
      token_rules: vec![
        (Regex::new(r"^\s+").unwrap(), Right(Trivia::Whitespace)),
        (Regex::new(r"^//[^\n]*").unwrap(), Right(Trivia::Comment)),
        (Regex::new(r"^int\b").unwrap(), Left(TokenKind::Int)),
        (Regex::new(r"^if\b").unwrap(), Left(TokenKind::If)),
        (Regex::new(r"^else\b").unwrap(), Left(TokenKind::Else)),
        (Regex::new(r"^while\b").unwrap(), Left(TokenKind::While)),
        (Regex::new(r"^print\b").unwrap(), Left(TokenKind::Print)),
        (Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), Left(TokenKind::Identifier)),
        (Regex::new(r"^\d+").unwrap(), Left(TokenKind::Number)),
        (Regex::new(r"^==").unwrap(), Left(TokenKind::Equal)),
        (Regex::new(r"^!=").unwrap(), Left(TokenKind::NotEqual)),
        (Regex::new(r"^=").unwrap(), Left(TokenKind::Assign)),
        (Regex::new(r"^;").unwrap(), Left(TokenKind::Semicolon)),
        (Regex::new(r"^\+").unwrap(), Left(TokenKind::Plus)),
        (Regex::new(r"^-").unwrap(), Left(TokenKind::Minus)),
        (Regex::new(r"^\*").unwrap(), Left(TokenKind::Mult)),
        (Regex::new(r"^/").unwrap(), Left(TokenKind::Div)),
        (Regex::new(r"^>").unwrap(), Left(TokenKind::Greater)),
        (Regex::new(r"^<").unwrap(), Left(TokenKind::Less)),
        (Regex::new(r"^\(").unwrap(), Left(TokenKind::LParen)),
        (Regex::new(r"^\)").unwrap(), Left(TokenKind::RParen)),
        (Regex::new(r"^\{").unwrap(), Left(TokenKind::LBrace)),
        (Regex::new(r"^\}").unwrap(), Left(TokenKind::RBrace)),
      ],
    }
  }

  fn advance(&mut self, literal: &str) {
    for ch in literal.chars() {
      if ch == '\n' {
        self.row += 1;
        self.col = 1;
      } else {
        self.col += 1;
      }
    }
    self.head += literal.len();
  }

  /// Scan the whole source eagerly. Characters no rule matches are skipped
  /// without a diagnostic; the scan continues at the next position.
  pub fn tokenize(mut self) -> Vec<Token> {
    let mut tokens = Vec::new();
    while self.head < self.src.len() {
      let rest = &self.src[self.head..];
      let mut matched = None;
      for (rule, action) in &self.token_rules {
        if let Some(found) = rule.find(rest) {
          matched = Some((found.end(), *action));
          break;
        }
      }
      match matched {
        Some((len, Either::Left(kind))) => {
          let literal = rest[..len].to_string();
          tokens.push(Token {
            kind,
            literal: literal.clone(),
            row: self.row,
            col: self.col,
          });
          self.advance(&literal);
        }
        Some((len, Either::Right(_))) => {
          let literal = rest[..len].to_string();
          self.advance(&literal);
        }
        None => match rest.chars().next() {
          Some(skipped) => {
            let literal = skipped.to_string();
            self.advance(&literal);
          }
          None => break,
        },
      }
    }
    tokens
  }
}

pub fn tokenize(src: &str) -> Vec<Token> {
  Lexer::new(src).tokenize()
}
