//! DiagnosticSink - 诊断收集器
//!
//! 收集一次编译过程中的所有诊断信息

use crate::diagnostic::Diagnostic;
use crate::level::DiagnosticLevel;

/// 诊断收集器
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加诊断
    pub fn add(&mut self, diagnostic: Diagnostic) {
        if diagnostic.level.is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// 获取所有诊断
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// 获取错误数量
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level.is_error())
            .count()
    }

    /// 获取警告数量
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.level, DiagnosticLevel::Warning))
            .count()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_creation() {
        let sink = DiagnosticSink::new();
        assert!(!sink.has_errors());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_counts() {
        let mut sink = DiagnosticSink::new();

        sink.add(Diagnostic::error("Failed to find function name in function (): void {"));
        sink.add(Diagnostic::error("Failed to find function arguments in function f: void {"));
        sink.add(Diagnostic::warning("completion for `f` returned no content"));
        sink.add(Diagnostic::note("pinned body reused for `g`"));

        assert!(sink.has_errors());
        assert_eq!(sink.error_count(), 2);
        assert_eq!(sink.warning_count(), 1);
        assert_eq!(sink.len(), 4);
    }

    #[test]
    fn test_warnings_do_not_flag_errors() {
        let mut sink = DiagnosticSink::new();
        sink.add(Diagnostic::warning("completion for `main` returned no content"));
        assert!(!sink.has_errors());
        assert_eq!(sink.warning_count(), 1);
    }
}
