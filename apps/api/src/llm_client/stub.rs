//! Recording `ModelClient` for tests. Never touches the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{LlmError, ModelClient};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

pub struct StubModel {
    reply: Result<String, (u16, String)>,
    calls: AtomicUsize,
    last: Mutex<Option<RecordedCall>>,
}

impl StubModel {
    pub fn replying(text: &str) -> Self {
        Self::with_reply(Ok(text.to_string()))
    }

    /// Fails every call with `LlmError::Api { status, message }`.
    pub fn failing(status: u16, message: &str) -> Self {
        Self::with_reply(Err((status, message.to_string())))
    }

    fn with_reply(reply: Result<String, (u16, String)>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for StubModel {
    async fn send(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(RecordedCall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            max_tokens,
            temperature,
        });
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err((status, message)) => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
