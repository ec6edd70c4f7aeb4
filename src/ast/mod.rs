/// AST (Abstract Syntax Tree) module
/// Contains the node model the parser builds and ways to print it
///
/// Submodules:
/// - ast: `Node`, `NodeList`, `NodeType` and the operator descriptor
/// - dump: indented tree and s-expression renderings
pub mod ast;
pub mod dump;

#[cfg(test)]
mod tests;
