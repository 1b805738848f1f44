//! Generation Orchestrator
//!
//! 按程序顺序逐个处理结构，是一个从左到右的折叠：
//! 第 i 个函数桩的请求上下文恰好是第 0..i-1 个结构已输出的文本。
//! 函数只能看到在它之前定义的名字。请求严格串行，不并发、不预取。

use neuro_syntax::{Construct, FunctionStub, Program};
use tracing::{debug, info, warn};

use crate::emit::{
    render_export, render_stub, render_union, strip_fence, system_instruction, ENTRY_POINT,
    ENTRY_POINT_CALL,
};
use crate::error::{GenerateError, GenerateResult};
use crate::provider::{CompletionProvider, CompletionRequest, Message};

/// 生成统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// 发出的补全请求数
    pub requested: usize,
    /// 直接沿用的固定函数数
    pub pinned: usize,
    /// 类型、联合类型和导出的数量
    pub structural: usize,
    /// 补全服务没有返回内容的函数
    pub empty_responses: Vec<String>,
    /// 是否追加了入口调用
    pub has_entry_point: bool,
}

/// 生成结果：每个结构一块，按程序顺序；有入口函数时末尾多一块入口调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub blocks: Vec<String>,
    pub report: GenerationReport,
}

/// 生成编排器
pub struct Generator<'p, P: ?Sized> {
    provider: &'p P,
}

impl<'p, P> Generator<'p, P>
where
    P: CompletionProvider + ?Sized,
{
    pub fn new(provider: &'p P) -> Self {
        Self { provider }
    }

    /// 生成整个程序。补全服务出错时整次生成失败
    pub async fn generate(&self, program: &Program) -> GenerateResult<Generated> {
        let mut blocks: Vec<String> = Vec::with_capacity(program.len() + 1);
        let mut report = GenerationReport::default();

        for construct in program {
            let emitted = match construct {
                Construct::Function(stub) => {
                    report.requested += 1;
                    let text = self.generate_function(stub, &blocks).await?;
                    if text.is_empty() {
                        report.empty_responses.push(stub.name.clone());
                    }
                    text
                }
                Construct::Pinned(pinned) => {
                    debug!(function = %pinned.stub.name, "reusing pinned body");
                    report.pinned += 1;
                    pinned.body.clone()
                }
                Construct::Type(definition) => {
                    report.structural += 1;
                    definition.body.clone()
                }
                Construct::Union(union) => {
                    report.structural += 1;
                    render_union(union)
                }
                Construct::Export(exports) => {
                    report.structural += 1;
                    render_export(exports)
                }
            };

            if construct.function_name() == Some(ENTRY_POINT) {
                report.has_entry_point = true;
            }
            blocks.push(emitted);
        }

        if report.has_entry_point {
            blocks.push(ENTRY_POINT_CALL.to_string());
        }

        Ok(Generated { blocks, report })
    }

    async fn generate_function(&self, stub: &FunctionStub, prior: &[String]) -> GenerateResult<String> {
        let request = request_for(stub, prior);
        info!(
            function = %stub.name,
            context = request.context.len(),
            "requesting completion"
        );

        let response = self
            .provider
            .complete(&request)
            .await
            .map_err(|source| GenerateError::Provider {
                function: stub.name.clone(),
                source,
            })?;

        // 只有围栏的回复去掉围栏后也是空的
        let body = response.map(|text| strip_fence(&text)).unwrap_or_default();
        if body.trim().is_empty() {
            warn!(function = %stub.name, "completion returned no content, emitting empty body");
            return Ok(String::new());
        }
        Ok(body)
    }
}

/// 为函数桩构造请求；`prior` 是之前所有结构已输出的文本
pub fn request_for(stub: &FunctionStub, prior: &[String]) -> CompletionRequest {
    CompletionRequest {
        function: stub.name.clone(),
        system: system_instruction(&stub.name),
        context: prior.iter().map(|text| Message::user(text.clone())).collect(),
        prompt: render_stub(stub),
    }
}
