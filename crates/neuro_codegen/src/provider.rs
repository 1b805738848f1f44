//! Completion Provider
//!
//! 补全服务的能力接口。编排器只依赖这个 trait，
//! 测试里可以换成确定性的桩实现。

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ProviderError;

/// 消息角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// 一条对话消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// 一次补全请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// 要生成的函数名
    pub function: String,
    /// 系统指令
    pub system: String,
    /// 之前已输出的块，按程序顺序
    pub context: Vec<Message>,
    /// 函数桩
    pub prompt: String,
}

impl CompletionRequest {
    /// `[system, ..context, user(prompt)]`
    pub fn messages(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.context.len() + 2);
        messages.push(Message::system(self.system.clone()));
        messages.extend(self.context.iter().cloned());
        messages.push(Message::user(self.prompt.clone()));
        messages
    }
}

/// 补全服务
///
/// 返回 `Ok(None)` 表示服务没有给出内容。
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, ProviderError>;
}
