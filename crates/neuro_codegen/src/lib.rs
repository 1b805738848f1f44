//! Neuro Code Generation
//!
//! 把解析好的 [`Program`](neuro_syntax::Program) 变成最终源码：
//! 类型、联合类型、导出和固定函数直接还原，函数桩逐个交给补全服务生成。

pub mod assemble;
pub mod emit;
pub mod error;
pub mod generator;
pub mod openai;
pub mod provider;

pub use assemble::assemble;
pub use error::{GenerateError, GenerateResult, ProviderError};
pub use generator::{Generated, GenerationReport, Generator};
pub use openai::{OpenAiConfig, OpenAiProvider};
pub use provider::{CompletionProvider, CompletionRequest, Message, Role};
