use crate::codegen;
use crate::error::CompileResult;
use crate::lexer;
use crate::parser;
use crate::sema;

/// Run the four front-end stages over one source buffer. The first stage
/// that fails aborts the pipeline; no later stage runs.
pub fn invoke(fname: &str, src: &str, print_ast: bool) -> CompileResult<()> {
  println!("==================== MiniLang Compiler ====================");
  println!(" Input: {}", fname);
  println!(" Stages: Lexical -> Syntax -> Semantic -> Intermediate Code");
  println!("===========================================================");

  println!("\nLexical Analysis:");
  let tokens = lexer::tokenize(src);
  for token in &tokens {
    println!("{}", token);
  }

  println!("\nSyntax Analysis:");
  let ast = parser::parse(tokens.clone())?;
  println!("Syntax Analysis: Passed.");
  if print_ast {
    println!("{}", ast);
  }

  println!("\nSemantic Analysis:");
  sema::analyze(&tokens)?;
  println!("Semantic Analysis with Type Checking: Passed.");

  println!("\nIntermediate Code Generation:");
  for line in codegen::generate(&tokens)? {
    println!("{}", line);
  }

  println!("\nCompilation completed successfully!");
  Ok(())
}

#[test]
fn test_demo_program() {
  let src = include_str!("../tests/programs/demo.minilang");
  invoke("demo.minilang", src, true).unwrap();
}
