//! Diagnostic - 诊断信息
//!
//! 表示一条解析或生成诊断。位置是整行的字节范围，
//! 因为 neuro 的语法是按行组织的。

use crate::level::DiagnosticLevel;
use crate::Span;

/// 诊断信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 诊断级别
    pub level: DiagnosticLevel,
    /// 主要消息
    pub message: String,
    /// 源文件路径（可选）
    pub file: Option<String>,
    /// 源码位置（可选）
    pub span: Option<Span>,
    /// 位置上的标签文字
    pub label: Option<String>,
    /// 补充注释
    pub notes: Vec<String>,
    /// 修复建议
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            file: None,
            span: None,
            label: None,
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// 创建错误诊断
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, message)
    }

    /// 创建警告诊断
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, message)
    }

    /// 创建注释诊断
    pub fn note(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Note, message)
    }

    /// 设置位置信息
    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// 设置位置标签
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// 设置源文件
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// 添加注释
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// 添加修复建议
    pub fn suggest(mut self, message: impl Into<String>) -> Self {
        self.suggestions.push(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_creation() {
        let diag = Diagnostic::error("Failed to find function arguments in function f {")
            .span(0..16)
            .label("header")
            .with_note("argument lists must open and close on the header line")
            .suggest("add `()` after the name");

        assert_eq!(diag.level, DiagnosticLevel::Error);
        assert_eq!(diag.span, Some(0..16));
        assert_eq!(diag.label.as_deref(), Some("header"));
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.suggestions, vec!["add `()` after the name".to_string()]);
        assert!(diag.file.is_none());
    }

    #[test]
    fn test_with_file() {
        let diag = Diagnostic::warning("empty completion").with_file("src/app.neuro");
        assert_eq!(diag.level, DiagnosticLevel::Warning);
        assert_eq!(diag.file.as_deref(), Some("src/app.neuro"));
    }
}
