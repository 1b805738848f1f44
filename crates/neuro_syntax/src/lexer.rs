//! Line Lexer
//!
//! 行级词法分析：源码按 `\n` 切行，每行根据行首关键字分类。
//! 后续阶段只看 [`LineKind`]，不再做零散的字符串前缀判断。

use logos::Logos;
use neuro_diagnostics::Span;

/// 行首关键字。只取每行的第一个 token，所以这是前缀匹配。
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    #[token("pinned function")]
    PinnedFunction,
    #[token("function")]
    Function,
    #[token("union type")]
    UnionType,
    #[token("type")]
    Type,
    #[token("export")]
    Export,
}

/// 行的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    PinnedFunction,
    Function,
    UnionType,
    Type,
    Export,
    /// 去掉空白后恰好是 `}`
    Close,
    Blank,
    Text,
}

impl LineKind {
    /// 是否开启一个函数块（包括固定函数）
    pub fn starts_function(self) -> bool {
        matches!(self, Self::Function | Self::PinnedFunction)
    }
}

/// 一行源码
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'src> {
    /// 行号 (从 1 开始)
    pub number: usize,
    /// 原始文本，不含换行符
    pub text: &'src str,
    /// 在源码中的字节范围
    pub span: Span,
    pub kind: LineKind,
}

impl Line<'_> {
    /// 终止符模式：去掉空白后以 `;` 结尾
    pub fn is_terminator(&self) -> bool {
        self.text.trim().ends_with(';')
    }

    /// 行首没有缩进
    pub fn is_unindented(&self) -> bool {
        !self.text.starts_with(char::is_whitespace)
    }
}

/// 对整个源码做行级词法分析
pub fn tokenize(source: &str) -> Vec<Line<'_>> {
    let mut offset = 0;
    source
        .split('\n')
        .enumerate()
        .map(|(index, text)| {
            let start = offset;
            offset += text.len() + 1;
            Line {
                number: index + 1,
                text,
                span: start..start + text.len(),
                kind: classify(text),
            }
        })
        .collect()
}

fn classify(text: &str) -> LineKind {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed == "}" {
        return LineKind::Close;
    }

    match Keyword::lexer(trimmed).next() {
        Some(Ok(Keyword::PinnedFunction)) => LineKind::PinnedFunction,
        Some(Ok(Keyword::Function)) => LineKind::Function,
        Some(Ok(Keyword::UnionType)) => LineKind::UnionType,
        Some(Ok(Keyword::Type)) => LineKind::Type,
        Some(Ok(Keyword::Export)) => LineKind::Export,
        _ => LineKind::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<LineKind> {
        tokenize(source).into_iter().map(|line| line.kind).collect()
    }

    #[test]
    fn test_classify_construct_starts() {
        assert_eq!(
            kinds("pinned function a() {\nfunction b() {\nunion type C = X;\ntype D = {\nexport a, b"),
            vec![
                LineKind::PinnedFunction,
                LineKind::Function,
                LineKind::UnionType,
                LineKind::Type,
                LineKind::Export,
            ]
        );
    }

    #[test]
    fn test_classify_close_blank_text() {
        assert_eq!(
            kinds("  }  \n   \n    // comment\n};"),
            vec![LineKind::Close, LineKind::Blank, LineKind::Text, LineKind::Text]
        );
    }

    #[test]
    fn test_keywords_are_prefix_matches() {
        // 与行首前缀判断一致：`typeof` 也算 `type` 开头
        assert_eq!(kinds("typeof x"), vec![LineKind::Type]);
        assert_eq!(kinds("functional()"), vec![LineKind::Function]);
        assert_eq!(kinds("pinned thing"), vec![LineKind::Text]);
        assert_eq!(kinds("union of sets"), vec![LineKind::Text]);
    }

    #[test]
    fn test_leading_whitespace_is_ignored() {
        assert_eq!(kinds("   function f() {"), vec![LineKind::Function]);
    }

    #[test]
    fn test_line_numbers_and_spans() {
        let source = "type A = {\n}\n\nexport A";
        let lines = tokenize(source);

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3].number, 4);
        assert_eq!(&source[lines[3].span.clone()], "export A");
        assert_eq!(&source[lines[1].span.clone()], "}");
    }

    #[test]
    fn test_unindented() {
        let lines = tokenize("function f() {\n    functionName: string;\n\tfunction g() {\n");
        assert!(lines[0].is_unindented());
        assert!(!lines[1].is_unindented());
        assert!(!lines[2].is_unindented());
        // 分类仍然忽略缩进
        assert_eq!(lines[1].kind, LineKind::Function);
    }

    #[test]
    fn test_terminator() {
        let lines = tokenize("union type A = X |\n  Y;  \n");
        assert!(!lines[0].is_terminator());
        assert!(lines[1].is_terminator());
    }
}
