/// AST (Abstract Syntax Tree) module
/// Contains the expression tree produced by the parser
///
/// Submodules:
/// - ast: The tagged expression tree and its canonical string form
pub mod ast;

#[cfg(test)]
mod tests;
