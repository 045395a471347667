//! Gemini による念頭分類アダプタ
//!
//! 固定の指示プロンプトに入力をそのまま埋め込み、responseSchema を宣言して
//! JSON を要求する。スキーマは宣言であって保証ではないので、応答テキストの
//! 解析はパイプライン側の責務（このアダプタは text part を取り出すだけ）。

use crate::error::Error;
use crate::ports::outbound::ThoughtClassifier;
use serde_json::{json, Value};
use std::env;

const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// 未設定と同義に扱うプレースホルダ値
const PLACEHOLDER_KEYS: &[&str] = &["PLACEHOLDER_API_KEY", "your_api_key_here"];

/// Gemini の generateContent を呼ぶ ThoughtClassifier 実装
///
/// 資格情報は呼び出しごとに環境変数から解決する。欠落・プレースホルダは
/// ネットワークに触れる前に Config エラーで返す（パイプラインが
/// フォールバック規則へ切り替える合図）。
pub struct GeminiClassifier {
    model: String,
}

impl GeminiClassifier {
    pub fn new(model: Option<String>) -> Self {
        Self {
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    /// API_KEY → GEMINI_API_KEY の順に環境変数を探す
    fn api_key_from_env() -> Result<String, Error> {
        let key = env::var("API_KEY")
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| env::var("GEMINI_API_KEY").ok().filter(|s| !s.is_empty()));
        validate_key(key)
    }

    /// 指示プロンプト（入力テキストをそのまま埋め込む）
    fn build_prompt(text: &str) -> String {
        format!(
            r#"作为一名温暖且具有洞察力的心理与效率教练，请分析以下这段在专注时跳出的念头：

内容: "{}"

请将其归入以下四类之一：
1. TRAUMA: 涉及过去的负面回忆、情绪创伤、自我怀疑或遗憾。
2. TODO: 明确的行动任务、未来计划或需要解决的问题。
3. CREATIVE: 深刻的洞察、创意火花、抽象的哲学感悟或有趣的想法。
4. OTHER: 生活琐碎、白日梦、随笔记录、或难以被定义的小事。

回复规则：
- TRAUMA: 提供疗愈性金句、温柔建议(advice)，并推荐1-2本有助于内心成长的书。
- TODO: 优化该任务的表达(refinedTask)，使其更具行动导向。
- CREATIVE: 提炼3个相关的核心关键词作为标签(tags)，并在 advice 字段提供一段关于这个灵感的深度解析或它可能带来的启发(AI分析)。
- OTHER: 分析文字背后的情绪底色（如：宁静、凌乱、幽默、怀旧）放入 sentiment 字段。

请以 JSON 格式返回。"#,
            text
        )
    }

    /// 宣言する応答スキーマ（category のみ必須）
    fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "category": { "type": "STRING" },
                "advice": { "type": "STRING", "description": "疗愈建议或灵感解析" },
                "books": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "title": { "type": "STRING" },
                            "author": { "type": "STRING" },
                            "reason": { "type": "STRING" }
                        }
                    }
                },
                "tags": { "type": "ARRAY", "items": { "type": "STRING" } },
                "sentiment": { "type": "STRING" },
                "refinedTask": { "type": "STRING" }
            },
            "required": ["category"]
        })
    }

    fn make_request_payload(&self, text: &str) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": Self::build_prompt(text) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": Self::response_schema()
            }
        })
    }

    /// 応答 JSON から最初の text part を取り出す
    fn parse_response_text(response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(error) = v.get("error") {
            let error_msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        let text = v["candidates"][0]["content"]["parts"]
            .as_array()
            .and_then(|parts| parts.iter().find_map(|part| part["text"].as_str()))
            .map(|s| s.to_string());

        Ok(text)
    }
}

/// 資格情報の検査（欠落・プレースホルダは Config エラー）
fn validate_key(key: Option<String>) -> Result<String, Error> {
    match key {
        None => Err(Error::config(
            "API key not configured. Set GEMINI_API_KEY (or API_KEY).",
        )),
        Some(k) if PLACEHOLDER_KEYS.contains(&k.as_str()) => Err(Error::config(
            "API key is a placeholder value. Set GEMINI_API_KEY (or API_KEY).",
        )),
        Some(k) => Ok(k),
    }
}

impl ThoughtClassifier for GeminiClassifier {
    fn classify(&self, text: &str) -> Result<Option<String>, Error> {
        let api_key = Self::api_key_from_env()?;
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, api_key
        );
        let payload = self.make_request_payload(text);

        let client = reqwest::blocking::Client::new();
        let response = client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            // エラーレスポンスを解析してメッセージを抽出
            let error_msg = if let Ok(v) = serde_json::from_str::<Value>(&response_text) {
                v["error"]["message"]
                    .as_str()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("HTTP {}: {}", status, response_text))
            } else {
                format!("HTTP {}: {}", status, response_text)
            };
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        Self::parse_response_text(&response_text)
    }
}
