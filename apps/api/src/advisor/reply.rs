//! Wraps the LLM call so the advisory flows never fail because of it.

use serde::Serialize;
use tracing::warn;

use crate::llm_client::TextGenerator;

/// Shown when no API key is configured.
pub const AI_DISABLED_NOTICE: &str = "⚠️ (AI 模式未啟動) 請設定 GOOGLE_API_KEY。";
/// Shown when the LLM call fails.
pub const AI_UNAVAILABLE_NOTICE: &str = "⚠️ AI 連線異常，請稍後再試。以下仍提供知識庫比對結果。";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiReply {
    pub text: String,
    pub available: bool,
}

/// Calls the generator, substituting a fixed notice when it is absent or fails.
pub async fn generate_or_notice(
    generator: Option<&dyn TextGenerator>,
    prompt: &str,
    system: &str,
) -> AiReply {
    let Some(generator) = generator else {
        return AiReply {
            text: AI_DISABLED_NOTICE.to_string(),
            available: false,
        };
    };

    match generator.generate(prompt, system).await {
        Ok(text) => AiReply {
            text,
            available: true,
        },
        Err(e) => {
            warn!("LLM generation failed, returning notice: {e}");
            AiReply {
                text: AI_UNAVAILABLE_NOTICE.to_string(),
                available: false,
            }
        }
    }
}
