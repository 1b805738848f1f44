//! Construct Parser
//!
//! 对行 token 做一遍递归下降：按行首关键字分派到各结构的解析函数，
//! 用 Block Scanner 确定结构的范围，然后跳过已消费的行。
//!
//! 错误策略：
//! - 函数头等单个结构的错误被收集起来，扫描继续，最后一起报告；
//! - 找不到结束行时无法确定结构范围，立即失败。

use crate::ast::{Construct, ExportList, Program, TypeDefinition, UnionType};
use crate::error::{BlockKind, ParseFailure, SourceLine, SyntaxError};
use crate::lexer::{tokenize, Line, LineKind};
use crate::pinning::PreviousOutput;
use crate::scanner::{find_block_end, Delimiter};
use crate::signature::parse_function;
use tracing::debug;

/// 解析源码。`previous` 是上一次生成的输出，没有时传空串。
pub fn parse_program(source: &str, previous: &str) -> Result<Program, ParseFailure> {
    let lines = tokenize(source);
    let previous = PreviousOutput::new(previous);
    Parser::new(&lines, &previous).parse()
}

struct Parser<'a, 'src> {
    lines: &'a [Line<'src>],
    pos: usize,
    previous: &'a PreviousOutput<'a>,
}

impl<'a, 'src> Parser<'a, 'src> {
    fn new(lines: &'a [Line<'src>], previous: &'a PreviousOutput<'a>) -> Self {
        Self {
            lines,
            pos: 0,
            previous,
        }
    }

    fn peek(&self) -> Option<&'a Line<'src>> {
        self.lines.get(self.pos)
    }

    fn parse(mut self) -> Result<Program, ParseFailure> {
        let mut constructs = Vec::new();
        let mut errors = Vec::new();

        while let Some(line) = self.peek() {
            let entry = match line.kind {
                LineKind::PinnedFunction => self.function(true),
                LineKind::Function => self.function(false),
                LineKind::UnionType => self.union_type(),
                LineKind::Type => self.type_definition(),
                LineKind::Export => {
                    self.pos += 1;
                    Ok(export(line))
                }
                // 空行和不认识的行直接跳过
                _ => {
                    self.pos += 1;
                    continue;
                }
            };

            match entry {
                Ok(construct) => {
                    debug!(line = line.number, kind = construct.kind_name(), "parsed construct");
                    constructs.push(construct);
                }
                Err(error) if error.is_fatal() => return Err(ParseFailure::fatal(error)),
                Err(error) => errors.push(error),
            }
        }

        if errors.is_empty() {
            Ok(Program::new(constructs))
        } else {
            Err(ParseFailure::new(errors))
        }
    }

    /// 从当前行开始取出一个块，并把位置移到块之后
    fn take_block(
        &mut self,
        delimiter: Delimiter,
        construct: BlockKind,
    ) -> Result<&'a [Line<'src>], SyntaxError> {
        let lines = self.lines;
        let rest = &lines[self.pos..];
        let end = find_block_end(rest, delimiter).ok_or_else(|| SyntaxError::UnterminatedBlock {
            construct,
            line: SourceLine::from(&rest[0]),
        })?;
        self.pos += end + 1;
        Ok(&rest[..=end])
    }

    fn function(&mut self, pinned: bool) -> Result<Construct, SyntaxError> {
        let block = self.take_block(Delimiter::Brace, BlockKind::Function)?;
        let header = &block[0];
        let stub = parse_function(header, &block[1..block.len() - 1])?;

        if pinned {
            self.previous.resolve(stub, header)
        } else {
            Ok(Construct::Function(stub))
        }
    }

    fn type_definition(&mut self) -> Result<Construct, SyntaxError> {
        let block = self.take_block(Delimiter::Brace, BlockKind::TypeDefinition)?;
        let body = block
            .iter()
            .map(|line| line.text)
            .collect::<Vec<_>>()
            .join("\n");
        Ok(Construct::Type(TypeDefinition { body }))
    }

    fn union_type(&mut self) -> Result<Construct, SyntaxError> {
        let block = self.take_block(Delimiter::Terminator, BlockKind::UnionType)?;
        union_declaration(block)
    }
}

/// `union type Name = A | B | C;`，可以跨多行
fn union_declaration(block: &[Line<'_>]) -> Result<Construct, SyntaxError> {
    let text = block
        .iter()
        .map(|line| line.text.trim())
        .collect::<Vec<_>>()
        .join(" ");
    let declaration = text.strip_prefix("union type").unwrap_or(&text);

    let missing_name = || SyntaxError::MissingUnionName {
        line: SourceLine::from(&block[0]),
    };
    let (name, tags) = declaration.split_once('=').ok_or_else(missing_name)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(missing_name());
    }

    let tags = tags
        .split('|')
        .map(|tag| tag.trim().trim_end_matches(';').trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();

    Ok(Construct::Union(UnionType {
        name: name.to_string(),
        tags,
    }))
}

/// `export A, B, C`
fn export(line: &Line<'_>) -> Construct {
    let trimmed = line.text.trim();
    let list = trimmed.strip_prefix("export").unwrap_or(trimmed);
    let names = list
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    Construct::Export(ExportList { names })
}
