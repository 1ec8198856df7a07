//! Handlers for the `/chat` resource (text and voice exchanges).
//!
//! Both flows share the same core: load the recent history window, ask
//! the chat model for a reply, persist the user and assistant turns, bump
//! the conversation's `updated_at`. The voice flow adds transcription,
//! best-effort emotion detection, and synthesized reply audio.

use axum::extract::{Multipart, State};
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use dearai_core::error::CoreError;
use dearai_core::types::DbId;
use dearai_db::models::conversation::Conversation;
use dearai_db::models::message::{CreateMessage, Message};
use dearai_db::repositories::conversation_repo::ConversationRepo;
use dearai_db::repositories::message_repo::MessageRepo;
use dearai_providers::emotion::EmotionResult;
use dearai_providers::llm::ChatMessage;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

/// How many prior messages are replayed to the chat model per exchange.
const HISTORY_LIMIT: i64 = 20;

/// Base system prompt for the companion persona.
const SYSTEM_PROMPT: &str = "You are a compassionate mental health companion. Your role is to:
- Listen actively and empathetically
- Provide emotional support without judgment
- Help users explore their feelings
- Encourage healthy coping strategies
- Suggest professional help when appropriate

Important guidelines:
- Never provide medical diagnoses or prescribe medication
- Always take crisis situations seriously
- Respect user boundaries and confidentiality
- Use warm, understanding language

Remember: You are a supportive companion, not a replacement for professional mental health care.";

/// Request body for `POST /chat/text`.
#[derive(Debug, Deserialize)]
pub struct TextChatRequest {
    pub conversation_id: DbId,
    pub content: String,
}

/// Response for `POST /chat/text`.
#[derive(Debug, Serialize)]
pub struct TextChatResponse {
    pub message_id: DbId,
    pub content: String,
}

/// Response for `POST /chat/voice`.
#[derive(Debug, Serialize)]
pub struct VoiceChatResponse {
    pub message_id: DbId,
    /// Transcript of what the user said.
    pub transcript: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<EmotionResult>,
    /// Synthesized reply audio, base64-encoded.
    pub audio: String,
}

/// POST /api/v1/chat/text
pub async fn text_chat(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<TextChatRequest>,
) -> AppResult<Json<TextChatResponse>> {
    if input.content.trim().is_empty() {
        return Err(CoreError::Validation("Message content must not be empty".into()).into());
    }

    let conversation = owned_conversation(&state, auth_user.user_id, input.conversation_id).await?;

    let history = load_history(&state, conversation.id, &input.content).await?;
    let reply = state
        .providers
        .chat
        .chat(&history, Some(SYSTEM_PROMPT))
        .await?;

    persist_message(&state, conversation.id, "user", &input.content, "text", None).await?;
    let assistant =
        persist_message(&state, conversation.id, "assistant", &reply, "text", None).await?;
    ConversationRepo::touch(&state.pool, conversation.id).await?;

    Ok(Json(TextChatResponse {
        message_id: assistant.id,
        content: reply,
    }))
}

/// POST /api/v1/chat/voice (multipart: `conversation_id`, `audio`)
pub async fn voice_chat(
    State(state): State<AppState>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<VoiceChatResponse>> {
    let mut conversation_id: Option<DbId> = None;
    let mut audio: Option<Vec<u8>> = None;
    let mut language = "en".to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("conversation_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid conversation_id: {e}")))?;
                let id = text
                    .parse()
                    .map_err(|_| AppError::BadRequest("conversation_id must be a UUID".into()))?;
                conversation_id = Some(id);
            }
            Some("audio") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid audio field: {e}")))?;
                audio = Some(bytes.to_vec());
            }
            Some("language") => {
                language = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid language field: {e}")))?;
            }
            _ => {}
        }
    }

    let conversation_id =
        conversation_id.ok_or_else(|| AppError::BadRequest("Missing conversation_id".into()))?;
    let audio = audio.ok_or_else(|| AppError::BadRequest("Missing audio".into()))?;
    if audio.is_empty() {
        return Err(AppError::BadRequest("Audio must not be empty".into()));
    }

    let conversation = owned_conversation(&state, auth_user.user_id, conversation_id).await?;

    let transcript = state.providers.stt.transcribe(&audio, &language).await?;

    // Best-effort: a missing key or a Hume failure never blocks the chat.
    let emotion = match &state.providers.emotion {
        Some(client) => client.detect_from_audio(&audio).await,
        None => None,
    };

    let mut system_prompt = SYSTEM_PROMPT.to_string();
    if let Some(emotion) = &emotion {
        system_prompt.push_str(&format!(
            "\n\nUser's detected emotional state: {} (confidence: {:.2})",
            emotion.dominant_emotion, emotion.confidence
        ));
    }

    let history = load_history(&state, conversation.id, &transcript).await?;
    let reply = state
        .providers
        .chat
        .chat(&history, Some(&system_prompt))
        .await?;

    let reply_audio = state
        .providers
        .tts
        .synthesize(&reply, &language, "alloy")
        .await?;

    let user_metadata = emotion.as_ref().map(|e| json!({ "emotion": e }));
    persist_message(
        &state,
        conversation.id,
        "user",
        &transcript,
        "voice",
        user_metadata,
    )
    .await?;
    let assistant =
        persist_message(&state, conversation.id, "assistant", &reply, "voice", None).await?;
    ConversationRepo::touch(&state.pool, conversation.id).await?;

    Ok(Json(VoiceChatResponse {
        message_id: assistant.id,
        transcript,
        content: reply,
        emotion,
        audio: BASE64.encode(reply_audio),
    }))
}

/// Resolve a conversation the caller owns, or 404.
async fn owned_conversation(
    state: &AppState,
    user_id: DbId,
    conversation_id: DbId,
) -> AppResult<Conversation> {
    let conversation = ConversationRepo::find_for_user(&state.pool, conversation_id, user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Conversation", conversation_id))?;
    Ok(conversation)
}

/// Load the recent history window and append the user's new turn.
async fn load_history(
    state: &AppState,
    conversation_id: DbId,
    new_content: &str,
) -> AppResult<Vec<ChatMessage>> {
    let recent =
        MessageRepo::recent_for_conversation(&state.pool, conversation_id, HISTORY_LIMIT).await?;

    let mut history: Vec<ChatMessage> = recent
        .into_iter()
        .map(|m| ChatMessage::new(m.role, m.content))
        .collect();
    history.push(ChatMessage::new("user", new_content));
    Ok(history)
}

/// Persist one message turn.
async fn persist_message(
    state: &AppState,
    conversation_id: DbId,
    role: &str,
    content: &str,
    kind: &str,
    metadata: Option<serde_json::Value>,
) -> AppResult<Message> {
    let message = MessageRepo::create(
        &state.pool,
        &CreateMessage {
            conversation_id,
            role: role.to_string(),
            content: content.to_string(),
            kind: kind.to_string(),
            audio_url: None,
            metadata,
        },
    )
    .await?;
    Ok(message)
}
