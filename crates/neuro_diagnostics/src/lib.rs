//! Neuro Diagnostics
//!
//! 统一的诊断系统，为 neuro 解析和生成阶段提供清晰的错误报告。
//!
//! # 核心类型
//!
//! - [`Diagnostic`] - 诊断信息主体
//! - [`DiagnosticLevel`] - 诊断级别（Error/Warning/Note）
//! - [`DiagnosticSink`] - 诊断收集器
//! - [`Emitter`] - 诊断输出器
//! - [`Span`] - 源码位置信息
//!
//! # 示例
//!
//! ```rust
//! use neuro_diagnostics::{Diagnostic, DiagnosticSink, Emitter};
//!
//! let source = "function (): string {\n}\n";
//! let mut sink = DiagnosticSink::new();
//!
//! sink.add(
//!     Diagnostic::error("Failed to find function name in function (): string {")
//!         .span(0..21)
//!         .label("function header")
//!         .suggest("write the function name before `(`")
//! );
//!
//! if sink.has_errors() {
//!     let emitter = Emitter::without_colors();
//!     let rendered = emitter.render_with_source(&sink.diagnostics()[0], source);
//!     assert!(rendered.contains("Failed to find function name"));
//! }
//! ```

pub mod diagnostic;
pub mod emitter;
pub mod level;
pub mod sink;

// 重新导出核心类型
pub use diagnostic::Diagnostic;
pub use emitter::Emitter;
pub use level::DiagnosticLevel;
pub use sink::DiagnosticSink;

/// 源码位置范围 (字节偏移)
pub type Span = std::ops::Range<usize>;
