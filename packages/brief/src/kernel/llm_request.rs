// BaseAI implementation on top of the openai-client crate
//
// The attempt decides both the model and the endpoint; prompts come from
// domains/brief/prompts.rs.

use anyhow::{Context, Result};
use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient, ResponsesRequest};
use tracing::debug;

use super::{BaseAI, CallShape, SynthesisAttempt};

#[async_trait]
impl BaseAI for OpenAIClient {
    async fn complete_json(
        &self,
        attempt: &SynthesisAttempt,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String> {
        let text = match attempt.shape {
            CallShape::Responses => {
                let request = ResponsesRequest::new(&attempt.model)
                    .message(Message::system(system_prompt))
                    .message(Message::user(user_prompt))
                    .json_object();
                self.responses(request).await
            }
            CallShape::ChatCompletions => {
                let request = ChatRequest::new(&attempt.model)
                    .message(Message::system(system_prompt))
                    .message(Message::user(user_prompt))
                    .json_object();
                self.chat_completion(request).await.map(|r| r.content)
            }
        };

        text.inspect_err(|e| {
            debug!(
                model = %attempt.model,
                shape = %attempt.shape,
                transient = e.is_transient(),
                "Provider call failed"
            );
        })
        .with_context(|| format!("{} via {} failed", attempt.model, attempt.shape))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_client_is_base_ai() {
        fn _assert_base_ai<T: BaseAI>() {}

        _assert_base_ai::<OpenAIClient>();
    }
}
