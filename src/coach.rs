use crate::config::Config;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

pub const REPORTS_DISABLED: &str =
    "⚠️ 리포트 기능이 꺼져 있어요. REPORTS_ENABLED=true로 설정하고 다시 시작하세요.";
pub const MISSING_KEY: &str = "⚠️ OpenAI API Key를 설정해 주세요. (환경변수 OPENAI_API_KEY)";
pub const INVALID_KEY: &str = "❌ OpenAI API Key가 올바르지 않아요. 키를 다시 확인해 주세요.";
pub const EMPTY_REPORT: &str = "⚠️ 리포트 텍스트를 가져오지 못했어요.";
pub const EMPTY_REPLY: &str = "⚠️ 코치 답장을 가져오지 못했어요.";

const FORMAT_RULES: &str = "출력 형식(반드시 준수):
1) 컨디션 등급: S/A/B/C/D 중 하나
2) 습관 분석: 4~6줄
3) 날씨 코멘트: 2~3줄
4) 내일 미션: 3개 (번호 목록)
5) 오늘의 한마디: 한 줄
";

const CHAT_RULES: &str = "아래 오늘의 체크인 데이터를 참고해 사용자의 메시지에 답한다.
답장은 3~5줄, 구체적인 다음 행동 하나를 포함한다.
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    #[serde(alias = "스파르타 코치")]
    Sparta,
    #[default]
    #[serde(alias = "따뜻한 멘토")]
    Mentor,
    #[serde(alias = "게임 마스터")]
    GameMaster,
}

impl Persona {
    pub const ALL: [Persona; 3] = [Persona::Sparta, Persona::Mentor, Persona::GameMaster];

    pub fn label(self) -> &'static str {
        match self {
            Persona::Sparta => "스파르타 코치",
            Persona::Mentor => "따뜻한 멘토",
            Persona::GameMaster => "게임 마스터",
        }
    }

    pub fn system_prompt(self) -> &'static str {
        match self {
            Persona::Sparta => {
                "너는 엄격하지만 공정한 '스파르타 코치'다. \
                 핑계는 차단하고, 행동 중심으로 짧고 날카롭게 피드백한다."
            }
            Persona::Mentor => {
                "너는 따뜻하고 현실적인 '멘토'다. \
                 자책을 줄이고, 작은 성공을 강화하며, 다음 행동을 부드럽게 안내한다."
            }
            Persona::GameMaster => {
                "너는 RPG 세계관의 '게임 마스터'다. \
                 사용자를 플레이어로 부르고, 퀘스트/보상/레벨업 언어를 쓴다."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPayload {
    pub date: String,
    pub mood: u8,
    pub habits_checked: Vec<String>,
    pub habits_unchecked: Vec<String>,
    pub weather_summary: String,
    pub dog_summary: String,
    pub note: String,
}

pub fn build_prompt(payload: &ReportPayload) -> Result<String, serde_json::Error> {
    let data = serde_json::to_string_pretty(payload)?;
    Ok(format!("{FORMAT_RULES}\n\n데이터:\n{data}"))
}

pub fn build_chat_prompt(payload: &ReportPayload, message: &str) -> Result<String, serde_json::Error> {
    let data = serde_json::to_string_pretty(payload)?;
    Ok(format!("{CHAT_RULES}\n데이터:\n{data}\n\n메시지:\n{}", message.trim()))
}

#[derive(Debug, Error)]
enum ReportError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("{status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    #[error(transparent)]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl ResponsesReply {
    fn text(self) -> Option<String> {
        if let Some(text) = self.output_text.filter(|text| !text.trim().is_empty()) {
            return Some(text);
        }
        let joined: String = self
            .output
            .into_iter()
            .flat_map(|item| item.content)
            .filter(|content| content.kind == "output_text")
            .filter_map(|content| content.text)
            .collect();
        (!joined.trim().is_empty()).then_some(joined)
    }
}

pub async fn generate_report(
    client: &Client,
    config: &Config,
    persona: Persona,
    payload: &ReportPayload,
) -> String {
    if !config.reports_enabled {
        return REPORTS_DISABLED.to_string();
    }
    let Some(api_key) = config.openai_api_key.as_deref() else {
        return MISSING_KEY.to_string();
    };

    let result = match build_prompt(payload) {
        Ok(prompt) => respond(client, config, api_key, persona, &prompt).await,
        Err(err) => Err(err.into()),
    };
    match result {
        Ok(Some(text)) => {
            info!(persona = persona.label(), "coach report generated");
            text
        }
        Ok(None) => EMPTY_REPORT.to_string(),
        Err(ReportError::Unauthorized) => {
            warn!("report request rejected: invalid api key");
            INVALID_KEY.to_string()
        }
        Err(err) => {
            warn!("report request failed: {err}");
            format!("❌ 리포트 생성 실패: {err}")
        }
    }
}

pub async fn chat_reply(
    client: &Client,
    config: &Config,
    persona: Persona,
    payload: &ReportPayload,
    message: &str,
) -> String {
    if !config.reports_enabled {
        return REPORTS_DISABLED.to_string();
    }
    let Some(api_key) = config.openai_api_key.as_deref() else {
        return MISSING_KEY.to_string();
    };

    let result = match build_chat_prompt(payload, message) {
        Ok(prompt) => respond(client, config, api_key, persona, &prompt).await,
        Err(err) => Err(err.into()),
    };
    match result {
        Ok(Some(text)) => {
            info!(persona = persona.label(), "coach reply generated");
            text
        }
        Ok(None) => EMPTY_REPLY.to_string(),
        Err(ReportError::Unauthorized) => {
            warn!("chat request rejected: invalid api key");
            INVALID_KEY.to_string()
        }
        Err(err) => {
            warn!("chat request failed: {err}");
            format!("❌ 답장 생성 실패: {err}")
        }
    }
}

async fn respond(
    client: &Client,
    config: &Config,
    api_key: &str,
    persona: Persona,
    prompt: &str,
) -> Result<Option<String>, ReportError> {
    let body = serde_json::json!({
        "model": config.openai_model,
        "input": [
            { "role": "system", "content": persona.system_prompt() },
            { "role": "user", "content": prompt },
        ],
    });

    let url = format!("{}/v1/responses", config.openai_base_url.trim_end_matches('/'));
    let response = client
        .post(url)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ReportError::Unauthorized);
    }
    if !status.is_success() {
        let raw = response.text().await.unwrap_or_default();
        return Err(ReportError::Status {
            status,
            message: error_message(&raw),
        });
    }

    let reply: ResponsesReply = response.json().await?;
    Ok(reply.text())
}

fn error_message(raw: &str) -> String {
    serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(|message| message.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| raw.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> ReportPayload {
        ReportPayload {
            date: "2026-01-05".into(),
            mood: 7,
            habits_checked: vec!["💧 물 마시기".into()],
            habits_unchecked: vec!["😴 수면".into()],
            weather_summary: "날씨 정보 없음".into(),
            dog_summary: "강아지 정보 없음".into(),
            note: String::new(),
        }
    }

    #[test]
    fn prompt_keeps_rules_and_unescaped_payload() {
        let prompt = build_prompt(&payload()).expect("prompt");
        assert!(prompt.starts_with("출력 형식(반드시 준수):"));
        assert!(prompt.contains("데이터:\n{"));
        assert!(prompt.contains("\"habits_checked\": [\n    \"💧 물 마시기\"\n  ]"));
    }

    #[test]
    fn chat_prompt_carries_record_and_message() {
        let prompt = build_chat_prompt(&payload(), "  내일은 뭐부터 할까요?\n").expect("prompt");
        assert!(prompt.starts_with("아래 오늘의 체크인 데이터를"));
        assert!(prompt.contains("\"weather_summary\": \"날씨 정보 없음\""));
        assert!(prompt.ends_with("메시지:\n내일은 뭐부터 할까요?"));
    }

    #[test]
    fn persona_accepts_display_names() {
        let persona: Persona = serde_json::from_str("\"게임 마스터\"").expect("persona");
        assert_eq!(persona, Persona::GameMaster);
        let persona: Persona = serde_json::from_str("\"sparta\"").expect("persona");
        assert_eq!(persona, Persona::Sparta);
        assert_eq!(Persona::default(), Persona::Mentor);
    }

    #[test]
    fn reply_text_prefers_output_text_then_content() {
        let reply: ResponsesReply = serde_json::from_value(serde_json::json!({
            "output": [
                { "type": "reasoning", "content": [] },
                { "type": "message", "content": [
                    { "type": "output_text", "text": "등급: A" },
                    { "type": "output_text", "text": "\n잘했어요" }
                ]}
            ]
        }))
        .expect("reply");
        assert_eq!(reply.text().as_deref(), Some("등급: A\n잘했어요"));

        let reply: ResponsesReply =
            serde_json::from_value(serde_json::json!({ "output_text": "바로 텍스트" })).expect("reply");
        assert_eq!(reply.text().as_deref(), Some("바로 텍스트"));

        let reply: ResponsesReply = serde_json::from_value(serde_json::json!({})).expect("reply");
        assert_eq!(reply.text(), None);
    }

    #[test]
    fn error_message_reads_api_error_body() {
        let raw = r#"{"error":{"message":"model overloaded","type":"server_error"}}"#;
        assert_eq!(error_message(raw), "model overloaded");
        assert_eq!(error_message(" gateway timeout "), "gateway timeout");
    }
}
