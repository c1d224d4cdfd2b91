use indoc::{formatdoc, indoc};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use super::{DecomposedTask, PlanningAssistant, ScheduledTask};
use crate::error::AssistantError;
use crate::insights::PlanItem;
use crate::model::TaskId;
use crate::storage::AssistantConfig;

const DECOMPOSE_SYSTEM: &str = indoc! {"
    You are an expert project manager. Break the user's goal into small,
    concrete sub-tasks. Give each sub-task an effort score from 1 (trivial)
    to 10 (very demanding). Respond only with the JSON array.
"};

const PLAN_SYSTEM: &str = indoc! {"
    You are a productivity coach. Build a realistic schedule for today
    starting at 9:00 AM. Batch tasks that share a project DNA to reduce
    context switching, put a 15 minute break between batches and size
    each block from its effort score. Respond only with the JSON array.
"};

const DRAFT_SYSTEM: &str = indoc! {"
    You are a helpful writing assistant. Produce a concise starter draft
    in Markdown for the task the user describes.
"};

/// Raw shapes as the model emits them; numbers may come back as floats.
#[derive(Debug, Deserialize)]
struct RawSubtask {
    subtask: String,
    effort_score: f64,
}

#[derive(Debug, Deserialize)]
struct RawSlot {
    task_id: String,
    start_time: String,
    duration_minutes: f64,
}

/// Google Gemini `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiAssistant {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl GeminiAssistant {
    pub fn new(base_url: &str, model: &str, api_key: impl Into<String>) -> Result<Self, AssistantError> {
        let endpoint =
            Url::parse(base_url)?.join(&format!("v1beta/models/{model}:generateContent"))?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: api_key.into(),
        })
    }

    /// Reads the key from the environment variable named in the config.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AssistantError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AssistantError::MissingApiKey {
                env: config.api_key_env.clone(),
            })?;
        Self::new(&config.base_url, &config.model, api_key)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn generate(
        &self,
        system: &str,
        prompt: String,
        schema: Option<Value>,
    ) -> Result<String, AssistantError> {
        let mut body = json!({
            "systemInstruction": { "parts": [{ "text": system }] },
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        });
        if let Some(schema) = schema {
            body["generationConfig"] = json!({
                "responseMimeType": "application/json",
                "responseSchema": schema,
            });
        }

        debug!(endpoint = %self.endpoint, "calling gemini");
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = response.json().await?;
        extract_text(&data)
    }
}

fn extract_text(data: &Value) -> Result<String, AssistantError> {
    data["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            AssistantError::MalformedResponse("missing candidates[0].content.parts[0].text".into())
        })
}

/// Model-proposed effort, rounded and pulled into 1..=10.
fn effort_from_model(raw: f64) -> u32 {
    if raw.is_finite() {
        raw.round().clamp(1.0, 10.0) as u32
    } else {
        1
    }
}

fn decompose_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "subtask": { "type": "STRING" },
                "effort_score": { "type": "NUMBER" },
            },
            "required": ["subtask", "effort_score"],
        },
    })
}

fn plan_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "task_id": { "type": "STRING" },
                "start_time": { "type": "STRING" },
                "duration_minutes": { "type": "NUMBER" },
            },
            "required": ["task_id", "start_time", "duration_minutes"],
        },
    })
}

impl PlanningAssistant for GeminiAssistant {
    async fn decompose_goal(&self, goal: &str) -> Result<Vec<DecomposedTask>, AssistantError> {
        let prompt = format!("Goal: {goal}");
        let text = self
            .generate(DECOMPOSE_SYSTEM, prompt, Some(decompose_schema()))
            .await?;
        let raw: Vec<RawSubtask> = serde_json::from_str(text.trim())?;
        Ok(raw
            .into_iter()
            .filter(|r| !r.subtask.trim().is_empty())
            .map(|r| DecomposedTask::new(r.subtask.trim(), effort_from_model(r.effort_score)))
            .collect())
    }

    async fn plan_day(&self, items: &[PlanItem]) -> Result<Vec<ScheduledTask>, AssistantError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let tasks = serde_json::to_string_pretty(items)?;
        let prompt = formatdoc! {"
            Here are today's tasks, most important first:
            {tasks}
        "};
        let text = self
            .generate(PLAN_SYSTEM, prompt, Some(plan_schema()))
            .await?;
        let raw: Vec<RawSlot> = serde_json::from_str(text.trim())?;
        Ok(raw
            .into_iter()
            .map(|r| ScheduledTask {
                task_id: TaskId::from(r.task_id),
                start_time: r.start_time,
                duration_minutes: r.duration_minutes.max(0.0).round() as u32,
            })
            .collect())
    }

    async fn draft_for(&self, task_description: &str) -> Result<String, AssistantError> {
        let prompt = format!("Task: {task_description}");
        self.generate(DRAFT_SYSTEM, prompt, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_built_from_base_and_model() {
        let g = GeminiAssistant::new("https://generativelanguage.googleapis.com", "gemini-2.5-flash", "k")
            .unwrap();
        assert_eq!(
            g.endpoint().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn bad_base_url_is_rejected() {
        assert!(matches!(
            GeminiAssistant::new("not a url", "m", "k"),
            Err(AssistantError::Url(_))
        ));
    }

    #[test]
    fn text_extraction() {
        let ok = json!({ "candidates": [{ "content": { "parts": [{ "text": "hi" }] } }] });
        assert_eq!(extract_text(&ok).unwrap(), "hi");
        assert!(matches!(
            extract_text(&json!({ "candidates": [] })),
            Err(AssistantError::MalformedResponse(_))
        ));
    }

    #[test]
    fn model_effort_is_normalized() {
        assert_eq!(effort_from_model(6.6), 7);
        assert_eq!(effort_from_model(0.0), 1);
        assert_eq!(effort_from_model(42.0), 10);
        assert_eq!(effort_from_model(f64::NAN), 1);
    }
}
