//! 润色服务 - 业务能力层
//!
//! 只负责"修正空格"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型（兼容 OpenAI API 的服务）
//!
//! 润色永远不会让一次抽取失败：网络错误、返回格式不对、记录种类被改掉，
//! 都只记一条警告并原样返回输入。

use anyhow::{Context, Result};
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{QuestionRecord, QuestionShape};

const SYSTEM_PROMPT: &str = "You will receive JSON describing a GMAT question. \
    Fix spacing only: insert missing spaces between words and after punctuation. \
    Do not change any wording, keys, labels or answers. Return the same JSON and nothing else.";

/// 润色服务
///
/// 职责：
/// - 把一条抽取记录发给 LLM 修正空格
/// - 校验返回的 JSON 仍是同一种记录
pub struct PolishService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl PolishService {
    /// 创建新的润色服务
    pub fn new(api_key: &str, api_base: &str, model_name: &str) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);

        Self {
            client: Client::with_config(openai_config),
            model_name: model_name.to_string(),
        }
    }

    /// 按配置创建；没有 API key 时返回 `None`
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.openai_api_key.as_deref()?.trim();
        if api_key.is_empty() {
            return None;
        }
        Some(Self::new(
            api_key,
            &config.polish_api_base_url,
            &config.polish_model_name,
        ))
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 润色一条记录，任何失败都返回原记录
    pub async fn polish(&self, record: QuestionRecord, shape: QuestionShape) -> QuestionRecord {
        match self.try_polish(&record, shape).await {
            Ok(polished) => {
                debug!("润色完成: {}", shape);
                polished
            }
            Err(e) => {
                warn!("⚠️ 润色失败，保留原始记录: {:#}", e);
                record
            }
        }
    }

    /// 润色一条记录
    ///
    /// # 参数
    /// - `record`: 抽取结果
    /// - `shape`: 题型，随记录一起发送
    ///
    /// # 返回
    /// 模型返回并通过校验的记录
    pub async fn try_polish(&self, record: &QuestionRecord, shape: QuestionShape) -> Result<QuestionRecord> {
        let payload = serde_json::json!({ "type": shape.id(), "data": record });
        let user_message = serde_json::to_string(&payload).context("序列化记录失败")?;

        debug!("调用润色 API，模型: {}, 长度: {} 字符", self.model_name, user_message.len());

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(SYSTEM_PROMPT)
            .build()?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_msg),
                ChatCompletionRequestMessage::User(user_msg),
            ])
            .temperature(0.0)
            .build()?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| anyhow::anyhow!("润色 API 调用失败: {}", e))?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("润色 API 返回内容为空"))?;

        parse_polished(&content, record)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PolishedReply {
    Wrapped { data: QuestionRecord },
    Bare(QuestionRecord),
}

/// 去掉 Markdown 代码围栏
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // 跳过语言标记所在的那一行
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// 解析模型回复：允许外层包一层 `data`，记录种类必须不变
pub fn parse_polished(reply: &str, original: &QuestionRecord) -> Result<QuestionRecord> {
    let body = strip_code_fence(reply);
    let polished = match serde_json::from_str::<PolishedReply>(body).context("润色结果不是合法的记录 JSON")? {
        PolishedReply::Wrapped { data } => data,
        PolishedReply::Bare(record) => record,
    };

    if polished.kind() != original.kind() {
        anyhow::bail!(
            "润色结果的记录种类改变: {} -> {}",
            original.kind(),
            polished.kind()
        );
    }
    Ok(polished)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Answer, OptionLabel, SingleChoiceQuestion, TwoPartAnalysis};

    fn sample() -> QuestionRecord {
        QuestionRecord::SingleChoice(SingleChoiceQuestion {
            stem: "Ifx is positive".into(),
            options: [(OptionLabel::A, "1".to_string())].into_iter().collect(),
            official_answer: Answer::Resolved(OptionLabel::A),
            difficulty: "600".into(),
            explanation: String::new(),
        })
    }

    #[test]
    fn test_parse_polished_wrapped_in_fence() {
        let original = sample();
        let mut fixed = serde_json::to_value(&original).unwrap();
        fixed["stem"] = "If x is positive".into();
        let reply = format!(
            "```json\n{}\n```",
            serde_json::json!({ "type": "ps", "data": fixed })
        );

        let polished = parse_polished(&reply, &original).unwrap();
        let QuestionRecord::SingleChoice(q) = polished else {
            panic!("expected single choice");
        };
        assert_eq!(q.stem, "If x is positive");
        assert_eq!(q.official_answer, Answer::Resolved(OptionLabel::A));
    }

    #[test]
    fn test_parse_polished_bare_record() {
        let original = sample();
        let reply = serde_json::to_string(&original).unwrap();
        assert_eq!(parse_polished(&reply, &original).unwrap(), original);
    }

    #[test]
    fn test_parse_polished_rejects_kind_change() {
        let original = sample();
        let other = QuestionRecord::TwoPartAnalysis(TwoPartAnalysis::default());
        let reply = serde_json::to_string(&other).unwrap();
        assert!(parse_polished(&reply, &original).is_err());
    }

    #[test]
    fn test_parse_polished_rejects_garbage() {
        assert!(parse_polished("I fixed the spacing for you!", &sample()).is_err());
    }

    #[test]
    fn test_from_config_without_key() {
        let config = Config {
            openai_api_key: None,
            ..Config::default()
        };
        assert!(PolishService::from_config(&config).is_none());

        let config = Config {
            openai_api_key: Some("sk-test".into()),
            ..Config::default()
        };
        let service = PolishService::from_config(&config).unwrap();
        assert_eq!(service.model_name(), "gpt-4o-mini");
    }

    /// 真实 API 调用，需要 OPENAI_API_KEY
    ///
    /// 运行方式：
    /// ```bash
    /// cargo test test_polish_live -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_polish_live() {
        let _ = tracing_subscriber::fmt::try_init();

        let Some(service) = PolishService::from_config(&Config::from_env()) else {
            println!("未设置 OPENAI_API_KEY，跳过");
            return;
        };
        let original = sample();
        let polished = service.polish(original.clone(), QuestionShape::Ps).await;
        println!("{}", serde_json::to_string_pretty(&polished).unwrap());
        assert_eq!(polished.kind(), original.kind());
    }
}
