use std::sync::Arc;

use axum::{
    response::{Html, IntoResponse},
    Extension, Json,
};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::relaydtos::{ChatMessage, EnginePayload, EngineReply, SendMessageDto},
    error::HttpError,
    AppState,
};

pub const FALLBACK_REPLY: &str =
    "I didn't get a clear response from my AI brain. Can you rephrase?";

/// Relay failures, each with its own user-visible payload. The underlying
/// reqwest detail is logged, not echoed.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Could not connect to the conversational engine. Is it running?")]
    Connect(#[source] reqwest::Error),
    #[error("Error communicating with the conversational engine.")]
    Request(#[source] reqwest::Error),
    #[error("The conversational engine returned an error status: {0}")]
    Status(reqwest::StatusCode),
    #[error("Failed to decode the conversational engine response.")]
    Decode(#[source] reqwest::Error),
}

impl From<RelayError> for HttpError {
    fn from(error: RelayError) -> Self {
        HttpError::bad_gateway(error.to_string())
    }
}

/// Forwards one browser message to the engine's REST endpoint and returns
/// the engine's reply fragments as displayable chat lines.
pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SendMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let sender = body
        .sender
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    tracing::debug!(sender = %sender, "relaying user message to the engine");

    let payload = EnginePayload {
        sender,
        message: body.message.clone(),
    };

    let replies = forward_to_engine(&app_state, &payload).await?;
    Ok(Json(replies_to_messages(replies)))
}

async fn forward_to_engine(
    app_state: &AppState,
    payload: &EnginePayload,
) -> Result<Vec<EngineReply>, RelayError> {
    let response = app_state
        .http_client
        .post(&app_state.env.engine_url)
        .json(payload)
        .send()
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "engine request failed");
            if err.is_connect() {
                RelayError::Connect(err)
            } else {
                RelayError::Request(err)
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        tracing::error!(status = %status, "engine answered with an error status");
        return Err(RelayError::Status(status));
    }

    response.json::<Vec<EngineReply>>().await.map_err(|err| {
        tracing::error!(error = %err, "engine response was not decodable");
        RelayError::Decode(err)
    })
}

/// Keeps the text fragments in order; an empty reply list becomes one canned
/// fallback line so the user is never left without an answer.
pub fn replies_to_messages(replies: Vec<EngineReply>) -> Vec<ChatMessage> {
    let messages: Vec<ChatMessage> = replies
        .into_iter()
        .filter_map(|reply| reply.text)
        .map(ChatMessage::bot)
        .collect();

    if messages.is_empty() {
        vec![ChatMessage::bot(FALLBACK_REPLY)]
    } else {
        messages
    }
}

/// Minimal standalone chat page so the relay is usable without a separate
/// front-end build.
pub async fn chat_page() -> Html<&'static str> {
    Html(CHAT_PAGE)
}

const CHAT_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Property Assistant</title>
  <style>
    body { font-family: sans-serif; max-width: 640px; margin: 2rem auto; }
    #chat { border: 1px solid #ccc; padding: 1rem; height: 360px; overflow-y: auto; }
    .user { color: #1d4ed8; margin: 0.25rem 0; }
    .bot { color: #166534; margin: 0.25rem 0; white-space: pre-wrap; }
    form { display: flex; gap: 0.5rem; margin-top: 0.5rem; }
    input { flex: 1; padding: 0.5rem; }
  </style>
</head>
<body>
  <h1>Property Assistant</h1>
  <div id="chat"></div>
  <form id="form">
    <input id="message" autocomplete="off" placeholder="e.g. 3 BHK in Koramangala under 1.5 crore">
    <button>Send</button>
  </form>
  <script>
    const chat = document.getElementById('chat');
    const form = document.getElementById('form');
    const input = document.getElementById('message');
    const sender = crypto.randomUUID();

    function addLine(cls, text) {
      const line = document.createElement('div');
      line.className = cls;
      line.textContent = text;
      chat.appendChild(line);
      chat.scrollTop = chat.scrollHeight;
    }

    form.addEventListener('submit', async (e) => {
      e.preventDefault();
      const message = input.value.trim();
      if (!message) return;
      addLine('user', message);
      input.value = '';
      try {
        const res = await fetch('/api/send_message', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ message, sender }),
        });
        const data = await res.json();
        if (!res.ok) {
          addLine('bot', data.message || 'Something went wrong.');
          return;
        }
        for (const reply of data) addLine('bot', reply.text);
      } catch (err) {
        addLine('bot', 'Could not reach the server.');
      }
    });
  </script>
</body>
</html>
"#;
