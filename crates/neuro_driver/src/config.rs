//! Configuration
//!
//! 补全服务配置来自环境变量，启动时会先读取工作目录下的 `.env`。

use neuro_codegen::{OpenAiConfig, OpenAiProvider, ProviderError};
use tracing::warn;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const MODEL_VAR: &str = "OPENAI_GPT_MODEL";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
pub const TEMPERATURE_VAR: &str = "OPENAI_TEMPERATURE";

/// 环境配置
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
}

impl Settings {
    /// 读取 `.env`（若存在）后再读环境变量
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置，空值视为未设置
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let temperature = get(TEMPERATURE_VAR).and_then(|raw| match raw.trim().parse::<f32>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(value = %raw, "ignoring invalid {}", TEMPERATURE_VAR);
                None
            }
        });

        Self {
            api_key: get(API_KEY_VAR),
            model: get(MODEL_VAR),
            base_url: get(BASE_URL_VAR),
            temperature,
        }
    }

    /// 补全服务配置；没有 API key 时报错
    pub fn openai_config(&self) -> Result<OpenAiConfig, ProviderError> {
        let api_key = self.api_key.clone().ok_or(ProviderError::MissingApiKey)?;

        let mut config = OpenAiConfig::new(api_key);
        if let Some(model) = &self.model {
            config = config.with_model(model.clone());
        }
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(temperature) = self.temperature {
            config = config.with_temperature(temperature);
        }
        Ok(config)
    }

    pub fn provider(&self) -> Result<OpenAiProvider, ProviderError> {
        OpenAiProvider::new(self.openai_config()?)
    }
}
