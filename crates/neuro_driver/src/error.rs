//! Compilation Errors
//!
//! 编译器驱动层的错误类型，集成统一诊断系统

use neuro_codegen::{GenerateError, ProviderError};
use neuro_diagnostics::{Diagnostic, DiagnosticSink, Emitter};
use neuro_syntax::ParseFailure;
use std::path::PathBuf;
use thiserror::Error;

/// 编译错误
#[derive(Debug, Error)]
pub enum CompileError {
    /// 解析错误（可能有多个）
    #[error("Failed to parse program:\n{0}")]
    Parse(#[from] ParseFailure),

    /// 生成错误
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// 补全服务无法创建（例如缺少 API key）
    #[error("Failed to set up completion provider: {0}")]
    Provider(#[from] ProviderError),

    /// IO 错误
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CompileError {
    /// 转换为诊断列表并收集到 DiagnosticSink
    pub fn collect_to_sink(&self, sink: &mut DiagnosticSink, file_path: Option<&str>) {
        let mut add_diag = |diag: Diagnostic| {
            if let Some(path) = file_path {
                sink.add(diag.with_file(path));
            } else {
                sink.add(diag);
            }
        };

        match self {
            CompileError::Parse(failure) => {
                for diag in failure.diagnostics() {
                    add_diag(diag);
                }
            }
            CompileError::Generate(err) => {
                add_diag(Diagnostic::error(err.to_string()));
            }
            CompileError::Provider(err) => {
                let diag = Diagnostic::error(err.to_string());
                if matches!(err, ProviderError::MissingApiKey) {
                    add_diag(diag.suggest("set OPENAI_API_KEY in the environment or in a .env file"));
                } else {
                    add_diag(diag);
                }
            }
            CompileError::Io { .. } => {
                add_diag(Diagnostic::error(self.to_string()));
            }
        }
    }

    /// 使用统一诊断系统输出错误
    pub fn emit(&self, file_path: Option<&str>, source: Option<&str>) {
        let mut sink = DiagnosticSink::new();
        self.collect_to_sink(&mut sink, file_path);
        Emitter::new().emit_all(sink.diagnostics(), source);
    }
}

/// 编译结果类型
pub type CompileResult<T> = Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;
    use neuro_syntax::parse_program;

    #[test]
    fn test_parse_errors_become_one_diagnostic_each() {
        let failure = parse_program("function (): void {\n}\nfunction g: void {\n}\n", "").unwrap_err();
        let err = CompileError::from(failure);

        let mut sink = DiagnosticSink::new();
        err.collect_to_sink(&mut sink, Some("app.neuro"));

        assert_eq!(sink.error_count(), 2);
        assert!(sink
            .diagnostics()
            .iter()
            .all(|d| d.file.as_deref() == Some("app.neuro") && d.span.is_some()));
    }

    #[test]
    fn test_missing_key_has_suggestion() {
        let err = CompileError::from(ProviderError::MissingApiKey);

        let mut sink = DiagnosticSink::new();
        err.collect_to_sink(&mut sink, None);

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.diagnostics()[0].suggestions.len(), 1);
    }

    #[test]
    fn test_parse_error_display_lists_messages() {
        let failure = parse_program("function f() {\n", "").unwrap_err();
        assert_eq!(
            CompileError::from(failure).to_string(),
            "Failed to parse program:\nFailed to find closing bracket for function function f() {"
        );
    }
}
