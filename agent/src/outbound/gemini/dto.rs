//! DTOs for the Gemini `generateContent` endpoint.
//!
//! Parts are modelled as one struct with optional members rather than an
//! untagged enum so that fields the adapter does not interpret, such as
//! thought signatures on function calls, survive being echoed back to the
//! model on the next step.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::domain::ToolDefinition;

pub(super) const USER_ROLE: &str = "user";
pub(super) const MODEL_ROLE: &str = "model";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateContentRequestDto<'a> {
    pub(super) contents: &'a [ContentDto],
    pub(super) system_instruction: &'a ContentDto,
    pub(super) tools: &'a [ToolDto],
    pub(super) generation_config: GenerationConfigDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct ContentDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) role: Option<String>,
    #[serde(default)]
    pub(super) parts: Vec<PartDto>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PartDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) thought: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) function_call: Option<FunctionCallDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) function_response: Option<FunctionResponseDto>,
    #[serde(flatten)]
    pub(super) extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct FunctionCallDto {
    pub(super) name: String,
    #[serde(default)]
    pub(super) args: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct FunctionResponseDto {
    pub(super) name: String,
    pub(super) response: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ToolDto {
    pub(super) function_declarations: Vec<FunctionDeclarationDto>,
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct FunctionDeclarationDto {
    pub(super) name: String,
    pub(super) description: String,
    pub(super) parameters: Value,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub(super) struct GenerationConfigDto {
    pub(super) temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateContentResponseDto {
    #[serde(default)]
    pub(super) candidates: Vec<CandidateDto>,
    #[serde(default)]
    pub(super) prompt_feedback: Option<PromptFeedbackDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CandidateDto {
    #[serde(default)]
    pub(super) content: Option<ContentDto>,
    #[serde(default)]
    pub(super) finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PromptFeedbackDto {
    #[serde(default)]
    pub(super) block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelopeDto {
    pub(super) error: ErrorBodyDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    pub(super) status: Option<String>,
    pub(super) message: String,
}

impl ContentDto {
    pub(super) fn text(role: &str, text: &str) -> Self {
        Self {
            role: Some(role.to_owned()),
            parts: vec![PartDto {
                text: Some(text.to_owned()),
                ..PartDto::default()
            }],
        }
    }

    pub(super) fn system(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![PartDto {
                text: Some(text.to_owned()),
                ..PartDto::default()
            }],
        }
    }

    pub(super) fn function_responses(responses: Vec<FunctionResponseDto>) -> Self {
        Self {
            role: Some(USER_ROLE.to_owned()),
            parts: responses
                .into_iter()
                .map(|response| PartDto {
                    function_response: Some(response),
                    ..PartDto::default()
                })
                .collect(),
        }
    }

    pub(super) fn function_calls(&self) -> Vec<&FunctionCallDto> {
        self.parts
            .iter()
            .filter_map(|part| part.function_call.as_ref())
            .collect()
    }

    /// Concatenated answer text, skipping thought summaries.
    pub(super) fn answer_text(&self) -> String {
        self.parts
            .iter()
            .filter(|part| part.thought != Some(true))
            .filter_map(|part| part.text.as_deref())
            .collect()
    }
}

impl FunctionResponseDto {
    /// Gemini requires the response payload to be an object.
    pub(super) fn wrapping(name: &str, value: Value) -> Self {
        let response = if value.is_object() {
            value
        } else {
            json!({ "result": value })
        };
        Self {
            name: name.to_owned(),
            response,
        }
    }
}

impl From<ToolDefinition> for FunctionDeclarationDto {
    fn from(definition: ToolDefinition) -> Self {
        Self {
            name: definition.name.to_owned(),
            description: definition.description.to_owned(),
            parameters: definition.parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_part_fields_survive_a_round_trip() {
        let raw = json!({
            "functionCall": {"name": "read_json", "args": {"filepath": "a.json"}},
            "thoughtSignature": "c2lnbmF0dXJl"
        });

        let part: PartDto = serde_json::from_value(raw.clone()).expect("decode part");

        assert_eq!(serde_json::to_value(&part).expect("encode part"), raw);
    }

    #[test]
    fn answer_text_skips_thoughts() {
        let content: ContentDto = serde_json::from_value(json!({
            "role": "model",
            "parts": [
                {"text": "planning", "thought": true},
                {"text": "Here are "},
                {"text": "your users."}
            ]
        }))
        .expect("decode content");

        assert_eq!(content.answer_text(), "Here are your users.");
    }

    #[test]
    fn non_object_tool_results_are_wrapped() {
        let wrapped = FunctionResponseDto::wrapping("read_json", json!("{}"));
        assert_eq!(wrapped.response, json!({"result": "{}"}));

        let object = FunctionResponseDto::wrapping("generate_sample_users", json!({"count": 0}));
        assert_eq!(object.response, json!({"count": 0}));
    }

    #[test]
    fn system_instruction_has_no_role() {
        let value = serde_json::to_value(ContentDto::system("be brief")).expect("encode");
        assert_eq!(value, json!({"parts": [{"text": "be brief"}]}));
    }
}
