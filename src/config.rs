use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub vision_model: String,
    pub chat_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsdaConfig {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub llm: LlmConfig,
    pub usda: UsdaConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let llm = LlmConfig {
            api_key: std::env::var("OPENAI_API_KEY")?,
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
            vision_model: std::env::var("OPENAI_VISION_MODEL")
                .unwrap_or_else(|_| "gpt-4o".into()),
            chat_model: std::env::var("OPENAI_CHAT_MODEL").unwrap_or_else(|_| "gpt-4".into()),
        };
        let usda = UsdaConfig {
            api_key: std::env::var("USDA_API_KEY")?,
            base_url: std::env::var("USDA_BASE_URL")
                .unwrap_or_else(|_| "https://api.nal.usda.gov/fdc/v1".into()),
        };
        Ok(Self {
            database_url,
            llm,
            usda,
        })
    }
}
