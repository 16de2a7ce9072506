use std::fmt;

use crate::ast::{Assignment, Block, Expr, IfStmt, Stmt, WhileStmt};

fn print_block(block: &Block, f: &mut fmt::Formatter, indent: &str) -> fmt::Result {
  write!(f, "Block")?;
  let count = block.stmts.len();
  for (i, stmt) in block.stmts.iter().enumerate() {
    if i + 1 == count {
      write!(f, "\n{}`->", indent)?;
      print_stmt(stmt, f, &format!("{}   ", indent))?;
    } else {
      write!(f, "\n{}|->", indent)?;
      print_stmt(stmt, f, &format!("{}|  ", indent))?;
    }
  }
  Ok(())
}

impl fmt::Display for Block {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    print_block(self, f, "")
  }
}

fn print_stmt(stmt: &Stmt, f: &mut fmt::Formatter, indent: &str) -> fmt::Result {
  match stmt {
    Stmt::VarDecl(decl) => write!(f, "Declaration={}", decl.id.literal),
    Stmt::Assign(assign) => print_assignment(assign, f, indent),
    Stmt::If(branch) => print_if(branch, f, indent),
    Stmt::While(while_stmt) => print_while(while_stmt, f, indent),
    Stmt::Print(print) => {
      write!(f, "Print\n{}`->Value=", indent)?;
      print_expr(&print.value, f, &format!("{}   ", indent))
    }
    Stmt::Block(block) => print_block(block, f, indent),
  }
}

impl fmt::Display for Stmt {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    print_stmt(self, f, "")
  }
}

fn print_assignment(assign: &Assignment, f: &mut fmt::Formatter, indent: &str) -> fmt::Result {
  write!(f, "Assignment\n{}|->Name={}\n{}`->Value=", indent, assign.id.literal, indent)?;
  print_expr(&assign.value, f, &format!("{}   ", indent))
}

fn print_if(branch: &IfStmt, f: &mut fmt::Formatter, indent: &str) -> fmt::Result {
  write!(f, "IfStatement\n{}|->Cond=", indent)?;
  print_expr(&branch.cond, f, &format!("{}|  ", indent))?;
  match &branch.else_blk {
    Some(else_blk) => {
      write!(f, "\n{}|->Then=", indent)?;
      print_block(&branch.then_blk, f, &format!("{}|  ", indent))?;
      write!(f, "\n{}`->Else=", indent)?;
      print_block(else_blk, f, &format!("{}   ", indent))
    }
    None => {
      write!(f, "\n{}`->Then=", indent)?;
      print_block(&branch.then_blk, f, &format!("{}   ", indent))
    }
  }
}

fn print_while(while_stmt: &WhileStmt, f: &mut fmt::Formatter, indent: &str) -> fmt::Result {
  write!(f, "WhileStatement\n{}|->Cond=", indent)?;
  print_expr(&while_stmt.cond, f, &format!("{}|  ", indent))?;
  write!(f, "\n{}`->Body=", indent)?;
  print_block(&while_stmt.body, f, &format!("{}   ", indent))
}

fn print_expr(expr: &Expr, f: &mut fmt::Formatter, indent: &str) -> fmt::Result {
  match expr {
    Expr::IntImm(imm) => write!(f, "Number={}", imm.value),
    Expr::Variable(var) => write!(f, "Variable={}", var.id()),
    Expr::BinaryOp(op) => {
      write!(f, "BinaryOp={}\n{}|->Lhs=", op.op.literal, indent)?;
      print_expr(&op.lhs, f, &format!("{}|  ", indent))?;
      write!(f, "\n{}`->Rhs=", indent)?;
      print_expr(&op.rhs, f, &format!("{}   ", indent))
    }
  }
}

impl fmt::Display for Expr {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    print_expr(self, f, "")
  }
}
