//! Neuro Syntax
//!
//! 把 neuro 源文件切成顶层结构（函数桩、固定函数、类型、联合类型、导出），
//! 并在需要时把上一次生成的函数体合并回模型。

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod pinning;
pub mod scanner;
pub mod signature;

pub use ast::{
    Argument, Construct, ExportList, FunctionStub, PinnedFunction, Program, TypeDefinition,
    UnionType,
};
pub use error::{BlockKind, ParseFailure, SourceLine, SyntaxError};
pub use parser::parse_program;
