use std::env;
use std::fs::File;
use std::io::Read;

mod ast;
mod codegen;
mod compiler;
mod error;
mod lexer;
mod parser;
mod printer;
mod sema;
#[cfg(test)]
mod tests;

fn main() -> Result<(), String> {
  let args: Vec<String> = env::args().collect();
  if args.len() < 2 {
    println!("Usage: ./minilangc [file-name] [--print-ast]");
    return Err("missing input file".to_string());
  }
  let mut print_ast = false;
  for arg in &args[2..] {
    match arg.as_str() {
      "--print-ast" => {
        print_ast = true;
      }
      _ => (),
    }
  }

  let file = File::open(&args[1]);
  match file {
    Ok(mut f) => {
      let mut src = String::new();
      if let Err(msg) = f.read_to_string(&mut src) {
        eprintln!("Failed to read file: {}", msg);
        return Err(msg.to_string());
      }
      match compiler::invoke(&args[1], &src, print_ast) {
        Ok(()) => Ok(()),
        Err(err) => {
          eprintln!("{}", err);
          Err(err.to_string())
        }
      }
    }
    Err(msg) => {
      eprintln!("Failed to open file: {}", msg);
      Err(msg.to_string())
    }
  }
}
