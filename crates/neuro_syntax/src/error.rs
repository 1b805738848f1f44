//! Syntax Errors
//!
//! 解析阶段的错误。函数头错误可以逐个收集；
//! 未闭合的块会立即终止整个解析。

use crate::lexer::Line;
use neuro_diagnostics::{Diagnostic, Span};
use std::fmt;
use thiserror::Error;

/// 出错的行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 行号 (从 1 开始)
    pub number: usize,
    pub text: String,
    pub span: Span,
}

impl From<&Line<'_>> for SourceLine {
    fn from(line: &Line<'_>) -> Self {
        Self {
            number: line.number,
            text: line.text.to_string(),
            span: line.span.clone(),
        }
    }
}

/// 需要扫描结束行的结构种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Function,
    TypeDefinition,
    UnionType,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Function => write!(f, "function"),
            BlockKind::TypeDefinition => write!(f, "type definition"),
            BlockKind::UnionType => write!(f, "union type"),
        }
    }
}

/// 单个结构的解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Failed to find function name in {}", .line.text)]
    MissingFunctionName { line: SourceLine },

    #[error("Failed to find function arguments in {}", .line.text)]
    MissingArguments { line: SourceLine },

    #[error("Failed to find union type name in {}", .line.text)]
    MissingUnionName { line: SourceLine },

    #[error("{}", unterminated_message(.construct, .line))]
    UnterminatedBlock { construct: BlockKind, line: SourceLine },

    /// 读取上一次输出时出错；`line` 是源码里的函数头，`cause` 的位置属于上一次输出
    #[error("Failed to pin function `{name}`: {cause}")]
    Pinning {
        name: String,
        line: SourceLine,
        cause: Box<SyntaxError>,
    },
}

fn unterminated_message(construct: &BlockKind, line: &SourceLine) -> String {
    match construct {
        BlockKind::UnionType => format!(
            "Failed to find terminating semicolon for union type {}",
            line.text
        ),
        other => format!("Failed to find closing bracket for {} {}", other, line.text),
    }
}

impl SyntaxError {
    /// 出错的源码行
    pub fn line(&self) -> &SourceLine {
        match self {
            SyntaxError::MissingFunctionName { line }
            | SyntaxError::MissingArguments { line }
            | SyntaxError::MissingUnionName { line }
            | SyntaxError::UnterminatedBlock { line, .. }
            | SyntaxError::Pinning { line, .. } => line,
        }
    }

    /// 未闭合的块无法继续扫描
    pub fn is_fatal(&self) -> bool {
        matches!(self, SyntaxError::UnterminatedBlock { .. })
    }

    /// 转换为诊断信息
    pub fn to_diagnostic(&self) -> Diagnostic {
        let line = self.line();
        let diag = Diagnostic::error(self.to_string()).span(line.span.clone());

        match self {
            SyntaxError::MissingFunctionName { .. } => diag
                .label("no name between `function ` and `(`")
                .suggest("write the header as `function name(arg: Type): ReturnType {`"),
            SyntaxError::MissingArguments { .. } => diag
                .label("argument list is not closed on this line")
                .suggest("open and close `(...)` on the header line"),
            SyntaxError::MissingUnionName { .. } => diag
                .label("expected `union type Name = A | B;`")
                .suggest("name the union before `=`"),
            SyntaxError::UnterminatedBlock {
                construct: BlockKind::UnionType,
                ..
            } => diag
                .label("declaration starts here")
                .with_note("a union type ends at the first line ending in `;`"),
            SyntaxError::UnterminatedBlock { .. } => diag
                .label("block starts here")
                .with_note("a block ends at the first line that is exactly `}`"),
            SyntaxError::Pinning { cause, .. } => diag
                .label("pinned here")
                .with_note(format!(
                    "previous output line {}: {}",
                    cause.line().number,
                    cause
                )),
        }
    }
}

/// 解析失败：一个或多个错误，消息之间以换行分隔
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_messages(.errors))]
pub struct ParseFailure {
    pub errors: Vec<SyntaxError>,
}

fn join_messages(errors: &[SyntaxError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

impl ParseFailure {
    pub fn new(errors: Vec<SyntaxError>) -> Self {
        Self { errors }
    }

    /// 仅含一个致命错误
    pub fn fatal(error: SyntaxError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(SyntaxError::to_diagnostic).collect()
    }
}
