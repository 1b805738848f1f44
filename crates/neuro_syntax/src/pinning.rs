//! Pinning Resolver
//!
//! 在上一次生成的文件里按名字查找函数。找到时，把原文冻结为
//! [`PinnedFunction`]，不再重新生成；找不到时保持为普通函数桩。

use crate::ast::{Construct, FunctionStub, PinnedFunction};
use crate::error::{BlockKind, SourceLine, SyntaxError};
use crate::lexer::{tokenize, Line};
use crate::scanner::{find_block_end, Delimiter};
use crate::signature::function_name;
use tracing::debug;

/// 上一次生成的输出（可以为空）
pub struct PreviousOutput<'src> {
    lines: Vec<Line<'src>>,
}

impl<'src> PreviousOutput<'src> {
    pub fn new(text: &'src str) -> Self {
        Self {
            lines: tokenize(text),
        }
    }

    /// 查找名为 `name` 的函数，返回从函数头到 `}` 的原文
    pub fn find_function(&self, name: &str) -> Result<Option<String>, SyntaxError> {
        let mut pos = 0;

        while let Some(line) = self.lines.get(pos) {
            // 只认顶格的函数头，类型块里缩进的字段不算
            if !(line.kind.starts_function() && line.is_unindented()) {
                pos += 1;
                continue;
            }

            let rest = &self.lines[pos..];
            let end = find_block_end(rest, Delimiter::Brace).ok_or_else(|| {
                SyntaxError::UnterminatedBlock {
                    construct: BlockKind::Function,
                    line: SourceLine::from(line),
                }
            })?;
            let found = function_name(line.text).ok_or_else(|| SyntaxError::MissingFunctionName {
                line: SourceLine::from(line),
            })?;

            if found == name {
                let body = rest[..=end]
                    .iter()
                    .map(|line| line.text)
                    .collect::<Vec<_>>()
                    .join("\n");
                return Ok(Some(body));
            }
            pos += end + 1;
        }

        Ok(None)
    }

    /// 固定函数桩：找到上一次的函数体则冻结，否则照常生成
    pub fn resolve(&self, stub: FunctionStub, header: &Line<'_>) -> Result<Construct, SyntaxError> {
        match self.find_function(&stub.name) {
            Ok(Some(body)) => {
                debug!(function = %stub.name, "pinned to previous output");
                Ok(Construct::Pinned(PinnedFunction { stub, body }))
            }
            Ok(None) => {
                debug!(function = %stub.name, "no previous body, will generate");
                Ok(Construct::Function(stub))
            }
            Err(cause) => Err(SyntaxError::Pinning {
                name: stub.name,
                line: SourceLine::from(header),
                cause: Box::new(cause),
            }),
        }
    }
}
