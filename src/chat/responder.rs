use crate::error::ProviderError;
use crate::llm::LlmClient;

/// Any of these, anywhere in the lowercased message, short-circuits to the
/// crisis resources without touching the model.
const CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "harm",
    "death",
    "self-harm",
    "hopeless",
    "worthless",
    "ending it",
    "i want to die",
];

const PERSONA_PROMPT: &str = "You are a compassionate and professional mental health \
support assistant. Listen with empathy, validate the user's emotions, and suggest \
gentle coping strategies. Never provide medical diagnoses. Maintain a supportive, \
non-judgmental tone, and encourage professional help for serious concerns.";

const CRISIS_RESOURCES: &str = "I'm really sorry that you're feeling this way. Your safety \
and well-being are so important, and I strongly encourage you to talk to someone who can \
provide more specialized support. Please reach out to a counselor, therapist, or someone \
you trust. If you're in immediate danger, please contact emergency services.\n\
Here are some resources you can reach out to:\n\
- National Suicide Prevention Lifeline: 1-800-273-8255 (USA)\n\
- Text HOME to 741741 to connect with a Crisis Text Line counselor (USA)\n\
- If you're outside of the USA, please reach out to a local crisis helpline.\n\
You are not alone, and there is support available for you.";

const SAD_SUFFIX: &str = "It's okay to feel sad sometimes, and it's important to \
acknowledge your feelings. Try not to be too hard on yourself. If it helps, journaling \
your emotions or speaking with a close friend might provide some relief.";

const STRESSED_SUFFIX: &str = "Stress can be really challenging, and it's helpful to \
recognize when you need a break. Try to focus on activities that help you relax, like \
deep breathing, or talking to someone you trust.";

const OVERWHELMED_SUFFIX: &str = "It's completely okay to feel overwhelmed at times. \
Take things one step at a time, and remember that you're doing the best you can.";

/// First matching keyword wins; at most one suffix is appended.
const MOOD_SUFFIXES: &[(&str, &str)] = &[
    ("sad", SAD_SUFFIX),
    ("stressed", STRESSED_SUFFIX),
    ("overwhelmed", OVERWHELMED_SUFFIX),
];

pub async fn respond(model: &dyn LlmClient, message: &str) -> Result<String, ProviderError> {
    let lowered = message.to_lowercase();

    if CRISIS_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
    {
        return Ok(CRISIS_RESOURCES.to_string());
    }

    let mut reply = model.generate_with_text(PERSONA_PROMPT, message).await?;

    if let Some((_, suffix)) = MOOD_SUFFIXES
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
    {
        reply.push_str("\n\n");
        reply.push_str(suffix);
    }

    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingModel {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LlmClient for CountingModel {
        async fn generate_with_image(
            &self,
            _prompt: &str,
            _image: Bytes,
            _mime_type: &str,
        ) -> Result<String, ProviderError> {
            Ok(String::new())
        }

        async fn generate_with_text(
            &self,
            _system_prompt: &str,
            _user_message: &str,
        ) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("model reply".to_string())
        }
    }

    #[tokio::test]
    async fn crisis_keyword_returns_resources_and_never_calls_model() {
        let model = CountingModel::default();

        let reply = respond(&model, "lately I have been thinking about SUICIDE a lot")
            .await
            .unwrap();

        assert_eq!(reply, CRISIS_RESOURCES);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn plain_message_passes_through_the_model() {
        let model = CountingModel::default();

        let reply = respond(&model, "tell me about mindful breathing").await.unwrap();

        assert_eq!(reply, "model reply");
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn sad_wins_over_stressed_when_both_present() {
        let model = CountingModel::default();

        let reply = respond(&model, "I feel sad and stressed today").await.unwrap();

        assert!(reply.starts_with("model reply"));
        assert!(reply.ends_with(SAD_SUFFIX));
        assert!(!reply.contains(STRESSED_SUFFIX));
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn overwhelmed_suffix_applies_when_alone() {
        let model = CountingModel::default();

        let reply = respond(&model, "everything feels overwhelmed right now")
            .await
            .unwrap();

        assert!(reply.ends_with(OVERWHELMED_SUFFIX));
    }
}
