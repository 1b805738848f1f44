//! Signature Extractor
//!
//! 从函数头 `function name(a: A, b: B): R {` 中取出名字、参数和返回类型，
//! 并从函数体里收集注释行。

use crate::ast::{Argument, FunctionStub};
use crate::error::{SourceLine, SyntaxError};
use crate::lexer::Line;

const FUNCTION_KEYWORD: &str = "function ";
const DEFAULT_RETURN_TYPE: &str = "void";

/// 函数名：`function ` 与其后第一个 `(` 之间的文本
pub fn function_name(header: &str) -> Option<&str> {
    let start = header.find(FUNCTION_KEYWORD)? + FUNCTION_KEYWORD.len();
    let rest = &header[start..];
    let name = rest[..rest.find('(')?].trim();
    (!name.is_empty()).then_some(name)
}

/// 参数列表：第一个 `(` 与配对的 `)` 之间的文本，以及 `)` 的位置
fn argument_list(header: &str) -> Option<(&str, usize)> {
    let start = header.find(FUNCTION_KEYWORD)?;
    let open = start + header[start..].find('(')?;

    let mut depth = 0usize;
    for (offset, c) in header[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let close = open + offset;
                    return Some((&header[open + 1..close], close));
                }
            }
            _ => {}
        }
    }
    None
}

/// 按逗号切分参数，再按第一个冒号切分名字和类型；名字为空的项丢弃
pub fn parse_arguments(list: &str) -> Vec<Argument> {
    list.split(',')
        .filter_map(|raw| {
            let (name, ty) = raw.split_once(':').unwrap_or((raw, ""));
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(Argument {
                name: name.to_string(),
                ty: ty.trim().to_string(),
            })
        })
        .collect()
}

/// `): R {` 中的 R；格式不符时为 `void`
fn return_type(after_args: &str) -> &str {
    after_args
        .strip_prefix("): ")
        .and_then(|rest| rest.rfind(" {").map(|end| rest[..end].trim()))
        .filter(|ty| !ty.is_empty())
        .unwrap_or(DEFAULT_RETURN_TYPE)
}

/// 去掉空白后以 `//` 开头的行，保留原文，用 `\n` 连接
pub fn collect_comment(body: &[Line<'_>]) -> String {
    body.iter()
        .filter(|line| line.text.trim().starts_with("//"))
        .map(|line| line.text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// 解析函数；`body` 是函数头与结束行之间的行
pub fn parse_function(header: &Line<'_>, body: &[Line<'_>]) -> Result<FunctionStub, SyntaxError> {
    let name = function_name(header.text).ok_or_else(|| SyntaxError::MissingFunctionName {
        line: SourceLine::from(header),
    })?;
    let (list, close) = argument_list(header.text).ok_or_else(|| SyntaxError::MissingArguments {
        line: SourceLine::from(header),
    })?;

    Ok(FunctionStub {
        name: name.to_string(),
        args: parse_arguments(list),
        return_type: return_type(&header.text[close..]).to_string(),
        comment: collect_comment(body),
    })
}
