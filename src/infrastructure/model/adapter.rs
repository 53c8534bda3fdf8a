//! Message adapters - convert between different API formats

use super::types::ToolDeclaration;
use crate::types::Message;
use serde_json::{Value, json};

/// Adapter for converting messages to different API formats
pub struct MessageAdapter;

impl MessageAdapter {
    /// Convert messages to OpenAI-style chat format, including tool calls
    /// and `tool` role results keyed by `tool_call_id`.
    pub fn to_openai_format(messages: &[Message]) -> Vec<Value> {
        messages
            .iter()
            .map(|message| match message {
                Message::System { content } => json!({ "role": "system", "content": content }),
                Message::User { content } => json!({ "role": "user", "content": content }),
                Message::Assistant {
                    content,
                    tool_calls,
                } => {
                    let text = if content.is_empty() {
                        Value::Null
                    } else {
                        Value::String(content.clone())
                    };
                    let mut value = json!({ "role": "assistant", "content": text });
                    if !tool_calls.is_empty() {
                        value["tool_calls"] = tool_calls
                            .iter()
                            .map(|call| {
                                json!({
                                    "id": call.id,
                                    "type": "function",
                                    "function": {
                                        "name": call.name,
                                        "arguments": call.arguments.to_string(),
                                    }
                                })
                            })
                            .collect();
                    }
                    value
                }
                Message::Tool {
                    call_id, content, ..
                } => json!({
                    "role": "tool",
                    "tool_call_id": call_id,
                    "content": content,
                }),
            })
            .collect()
    }

    /// Convert messages to Gemini format
    /// Returns: (system_instruction_text, contents)
    ///
    /// Consecutive tool results are grouped into a single `user` turn of
    /// `functionResponse` parts, matching the `functionCall` parts of the
    /// preceding `model` turn in order.
    pub fn to_gemini_format(messages: &[Message]) -> (Option<String>, Vec<Value>) {
        let mut system_parts = Vec::new();
        let mut contents: Vec<Value> = Vec::new();
        let mut pending_responses: Vec<Value> = Vec::new();

        for message in messages {
            if !matches!(message, Message::Tool { .. }) && !pending_responses.is_empty() {
                contents.push(json!({
                    "role": "user",
                    "parts": std::mem::take(&mut pending_responses),
                }));
            }

            match message {
                Message::System { content } => system_parts.push(content.clone()),
                Message::User { content } => contents.push(json!({
                    "role": "user",
                    "parts": [{ "text": content }]
                })),
                Message::Assistant {
                    content,
                    tool_calls,
                } => {
                    let mut parts = Vec::new();
                    if !content.is_empty() {
                        parts.push(json!({ "text": content }));
                    }
                    for call in tool_calls {
                        parts.push(json!({
                            "functionCall": { "name": call.name, "args": call.arguments }
                        }));
                    }
                    if !parts.is_empty() {
                        contents.push(json!({ "role": "model", "parts": parts }));
                    }
                }
                Message::Tool { name, content, .. } => {
                    let result = serde_json::from_str::<Value>(content)
                        .unwrap_or_else(|_| Value::String(content.clone()));
                    pending_responses.push(json!({
                        "functionResponse": {
                            "name": name,
                            "response": { "result": result }
                        }
                    }));
                }
            }
        }

        if !pending_responses.is_empty() {
            contents.push(json!({ "role": "user", "parts": pending_responses }));
        }

        let system_instruction = if system_parts.is_empty() {
            None
        } else {
            Some(system_parts.join("\n\n"))
        };

        (system_instruction, contents)
    }

    pub fn to_openai_tools(tools: &[ToolDeclaration]) -> Vec<Value> {
        tools
            .iter()
            .map(|tool| {
                json!({
                    "type": "function",
                    "function": {
                        "name": tool.name,
                        "description": tool.description,
                        "parameters": tool.parameters,
                    }
                })
            })
            .collect()
    }

    pub fn to_gemini_tools(tools: &[ToolDeclaration]) -> Value {
        let declarations: Vec<Value> = tools
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": tool.parameters,
                })
            })
            .collect();
        json!([{ "functionDeclarations": declarations }])
    }
}
