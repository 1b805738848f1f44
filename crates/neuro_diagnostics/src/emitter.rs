//! Emitter - 诊断输出器
//!
//! 负责将诊断信息格式化输出。有源码时使用 ariadne 画出出错行，
//! 没有源码时退回到简单的单行格式。

use crate::diagnostic::Diagnostic;
use crate::level::DiagnosticLevel;
use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use colored::*;
use std::fmt::Write as _;

/// 诊断输出器
pub struct Emitter {
    /// 是否使用颜色
    use_colors: bool,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// 创建无颜色的输出器
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// 输出单个诊断到 stderr
    pub fn emit(&self, diagnostic: &Diagnostic) {
        eprint!("{}", self.render(diagnostic));
    }

    /// 输出单个诊断，附带源码片段
    pub fn emit_with_source(&self, diagnostic: &Diagnostic, source: &str) {
        eprint!("{}", self.render_with_source(diagnostic, source));
    }

    /// 输出所有诊断
    pub fn emit_all(&self, diagnostics: &[Diagnostic], source: Option<&str>) {
        for diagnostic in diagnostics {
            match source {
                Some(src) => self.emit_with_source(diagnostic, src),
                None => self.emit(diagnostic),
            }
            eprintln!(); // 诊断之间空行
        }
    }

    /// 渲染为文本（不含源码）
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();

        if self.use_colors {
            let _ = writeln!(
                out,
                "{}: {}",
                diagnostic.level.colored_name(),
                diagnostic.message.bold()
            );
        } else {
            let _ = writeln!(out, "{}: {}", diagnostic.level, diagnostic.message);
        }

        if let Some(location) = self.location(diagnostic) {
            let arrow = if self.use_colors {
                "-->".blue().bold().to_string()
            } else {
                "-->".to_string()
            };
            let _ = writeln!(out, "  {} {}", arrow, location);
        }

        for note in &diagnostic.notes {
            let line = format!("note: {}", note);
            if self.use_colors {
                let _ = writeln!(out, "  {} {}", "=".blue().bold(), line.bright_black());
            } else {
                let _ = writeln!(out, "  = {}", line);
            }
        }

        for suggestion in &diagnostic.suggestions {
            let line = format!("help: {}", suggestion);
            if self.use_colors {
                let _ = writeln!(out, "  {} {}", "=".green().bold(), line.green());
            } else {
                let _ = writeln!(out, "  = {}", line);
            }
        }

        out
    }

    /// 渲染为带源码片段的报告；没有位置信息时等同于 [`Emitter::render`]
    pub fn render_with_source(&self, diagnostic: &Diagnostic, source: &str) -> String {
        let span = match &diagnostic.span {
            Some(span) if span.end <= source.len() => span.clone(),
            _ => return self.render(diagnostic),
        };

        let (kind, color) = match diagnostic.level {
            DiagnosticLevel::Error => (ReportKind::Error, Color::Red),
            DiagnosticLevel::Warning => (ReportKind::Warning, Color::Yellow),
            DiagnosticLevel::Note => (ReportKind::Advice, Color::Cyan),
        };

        let mut label = Label::new(span.clone()).with_color(color);
        if let Some(text) = &diagnostic.label {
            label = label.with_message(text);
        }

        let mut report = Report::build(kind, (), span.start)
            .with_config(
                Config::default()
                    .with_color(self.use_colors)
                    .with_index_type(IndexType::Byte),
            )
            .with_message(&diagnostic.message)
            .with_label(label);
        for note in &diagnostic.notes {
            report = report.with_note(note);
        }
        for suggestion in &diagnostic.suggestions {
            report = report.with_help(suggestion);
        }

        let mut buf = Vec::new();
        match report.finish().write(Source::from(source), &mut buf) {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.render(diagnostic),
        }
    }

    fn location(&self, diagnostic: &Diagnostic) -> Option<String> {
        match (&diagnostic.file, &diagnostic.span) {
            (Some(file), Some(span)) => Some(format!("{}:{:?}", file, span)),
            (Some(file), None) => Some(file.clone()),
            (None, Some(span)) => Some(format!("{:?}", span)),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emitter_creation() {
        assert!(Emitter::new().use_colors);
        assert!(!Emitter::without_colors().use_colors);
    }

    #[test]
    fn test_render_plain() {
        let emitter = Emitter::without_colors();
        let diag = Diagnostic::error("Failed to find closing bracket for function function f() {")
            .with_file("app.neuro")
            .span(0..16)
            .with_note("blocks end at the first line that is exactly `}`")
            .suggest("add a closing `}` line");

        let text = emitter.render(&diag);
        assert!(text.starts_with("error: Failed to find closing bracket"));
        assert!(text.contains("--> app.neuro:0..16"));
        assert!(text.contains("= note: blocks end at the first line"));
        assert!(text.contains("= help: add a closing `}` line"));
    }

    #[test]
    fn test_render_with_source_points_at_line() {
        let source = "type A = {\n}\nfunction (): void {\n}\n";
        let emitter = Emitter::without_colors();
        let diag = Diagnostic::error("Failed to find function name in function (): void {")
            .span(13..32)
            .label("function header");

        let text = emitter.render_with_source(&diag, source);
        assert!(text.contains("Failed to find function name"));
        assert!(text.contains("function header"));
        assert!(text.contains("function (): void {"));
    }

    #[test]
    fn test_render_with_source_without_span_falls_back() {
        let emitter = Emitter::without_colors();
        let diag = Diagnostic::warning("completion for `f` returned no content");
        assert_eq!(
            emitter.render_with_source(&diag, "function f() {\n}"),
            "warning: completion for `f` returned no content\n"
        );
    }
}
