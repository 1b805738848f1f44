//! Generation Error Types

use thiserror::Error;

/// 补全服务错误
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode completion response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// 生成错误。补全服务失败会终止整次生成，不做重试
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to generate function `{function}`: {source}")]
    Provider {
        function: String,
        #[source]
        source: ProviderError,
    },
}

/// 生成结果类型
pub type GenerateResult<T> = Result<T, GenerateError>;
