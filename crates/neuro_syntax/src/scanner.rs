//! Block Scanner
//!
//! 找出一个结构在行序列中的结束行。
//!
//! 语法规则：块在第一个满足定界条件的行结束，没有嵌套。
//! 块内部如果有一行恰好是 `}`，块就在那里结束。

use crate::lexer::{Line, LineKind};

/// 定界模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// 去掉空白后恰好是 `}` 的行（函数、类型定义）
    Brace,
    /// 以 `;` 结尾的行（联合类型，可以跨行）
    Terminator,
}

impl Delimiter {
    pub fn closes(self, line: &Line<'_>) -> bool {
        match self {
            Delimiter::Brace => line.kind == LineKind::Close,
            Delimiter::Terminator => line.is_terminator(),
        }
    }
}

/// 返回结束行相对 `lines[0]` 的偏移；起始行本身也参与判断。
pub fn find_block_end(lines: &[Line<'_>], delimiter: Delimiter) -> Option<usize> {
    lines.iter().position(|line| delimiter.closes(line))
}
