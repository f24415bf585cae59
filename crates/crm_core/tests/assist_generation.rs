use async_trait::async_trait;
use crm_core::store::seed::demo_store;
use crm_core::{
    describe_task, task_description_prompt, ApplyOutcome, GeminiGenerator, GenerationError,
    TaskDraft, TaskForm, TextGenerator, GENERATION_FAILED_MESSAGE,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Scripted generator that records every prompt it receives.
struct ScriptedGenerator {
    reply: Result<String, GenerationError>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn failing(err: GenerationError) -> Self {
        Self {
            reply: Err(err),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

fn titled_draft(title: &str) -> TaskDraft {
    let store = demo_store().unwrap();
    let mut form = TaskForm::blank(&store);
    form.title = title.to_string();
    form.description = "typed by hand".to_string();
    TaskDraft::open(form)
}

#[tokio::test]
async fn blank_title_never_reaches_the_generator() {
    let generator = ScriptedGenerator::replying("unused");

    let err = describe_task(&generator, "   ").await.unwrap_err();
    assert_eq!(err, GenerationError::EmptyTitle);
    assert_eq!(generator.calls(), 0);

    let mut draft = titled_draft("");
    assert_eq!(
        draft.begin_generation().unwrap_err(),
        GenerationError::EmptyTitle
    );
    assert!(!draft.is_generating());
    assert_eq!(draft.form().description, "typed by hand");
}

#[tokio::test]
async fn describe_task_sends_the_title_prompt_and_trims_output() {
    let generator = ScriptedGenerator::replying("\n  Call Charlie about pricing.  \n");

    let text = describe_task(&generator, "  Call Charlie ").await.unwrap();
    assert_eq!(text, "Call Charlie about pricing.");
    assert_eq!(
        generator.prompts.lock().unwrap().as_slice(),
        [task_description_prompt("Call Charlie")]
    );
}

#[tokio::test]
async fn whitespace_only_output_is_an_empty_response() {
    let generator = ScriptedGenerator::replying("  \n ");
    let err = describe_task(&generator, "Call Charlie").await.unwrap_err();
    assert_eq!(err, GenerationError::EmptyResponse);
}

#[tokio::test]
async fn generated_text_replaces_the_description() {
    let generator = ScriptedGenerator::replying("Agree next steps with Acme.");
    let mut draft = titled_draft("Follow up with Acme");

    let ticket = draft.begin_generation().unwrap();
    assert!(draft.is_generating());
    assert_eq!(ticket.title(), "Follow up with Acme");

    let result = ticket.run(&generator).await;
    assert_eq!(draft.apply_generated(&ticket, result), ApplyOutcome::Applied);
    assert_eq!(draft.form().description, "Agree next steps with Acme.");
    assert!(!draft.is_generating());
    assert_eq!(draft.message(), None);
}

#[tokio::test]
async fn result_arriving_after_close_is_discarded() {
    let generator = ScriptedGenerator::replying("late text");
    let mut draft = titled_draft("Follow up with Acme");

    let ticket = draft.begin_generation().unwrap();
    draft.close();
    let result = ticket.run(&generator).await;

    assert_eq!(draft.apply_generated(&ticket, result), ApplyOutcome::Discarded);
    assert_eq!(draft.form().description, "typed by hand");
}

#[tokio::test]
async fn result_for_another_draft_is_discarded() {
    let generator = ScriptedGenerator::replying("meant for the first form");
    let mut first = titled_draft("First");
    let mut second = titled_draft("Second");

    let ticket = first.begin_generation().unwrap();
    let result = ticket.run(&generator).await;

    assert_eq!(
        second.apply_generated(&ticket, result),
        ApplyOutcome::Discarded
    );
    assert_eq!(second.form().description, "typed by hand");
}

#[tokio::test]
async fn only_the_latest_request_lands() {
    let generator = ScriptedGenerator::replying("generated");
    let mut draft = titled_draft("Old title");

    let stale = draft.begin_generation().unwrap();
    draft.form_mut().title = "New title".to_string();
    let fresh = draft.begin_generation().unwrap();
    assert_eq!(fresh.title(), "New title");

    let stale_result = stale.run(&generator).await;
    assert_eq!(
        draft.apply_generated(&stale, stale_result),
        ApplyOutcome::Discarded
    );
    assert!(draft.is_generating());

    let fresh_result = Ok("for the new title".to_string());
    assert_eq!(draft.apply_generated(&fresh, fresh_result), ApplyOutcome::Applied);
    assert_eq!(draft.form().description, "for the new title");
}

#[tokio::test]
async fn failure_keeps_description_and_sets_message() {
    let generator = ScriptedGenerator::failing(GenerationError::RateLimited);
    let mut draft = titled_draft("Follow up with Acme");

    let ticket = draft.begin_generation().unwrap();
    let result = ticket.run(&generator).await;

    assert_eq!(
        draft.apply_generated(&ticket, result),
        ApplyOutcome::Failed(GENERATION_FAILED_MESSAGE.to_string())
    );
    assert_eq!(draft.form().description, "typed by hand");
    assert_eq!(draft.message(), Some(GENERATION_FAILED_MESSAGE));
    assert!(!draft.is_generating());

    // A new attempt clears the inline message.
    draft.begin_generation().unwrap();
    assert_eq!(draft.message(), None);
}

fn gemini(server: &MockServer, api_key: Option<&str>) -> GeminiGenerator {
    GeminiGenerator::new(
        server.uri(),
        "test-model",
        api_key.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap()
}

const GENERATE_PATH: &str = "/models/test-model:generateContent";

#[tokio::test]
async fn gemini_joins_candidate_parts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{ "text": task_description_prompt("Renew contract") }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Review terms. " }, { "text": "Send renewal." }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let generator = gemini(&server, Some("test-key"));
    let text = describe_task(&generator, "Renew contract").await.unwrap();
    assert_eq!(text, "Review terms. Send renewal.");
}

#[tokio::test]
async fn gemini_maps_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = gemini(&server, Some("k"))
        .generate("prompt")
        .await
        .unwrap_err();
    assert_eq!(err, GenerationError::RateLimited);
}

#[tokio::test]
async fn gemini_reports_status_and_body_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let err = gemini(&server, Some("k"))
        .generate("prompt")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GenerationError::RequestFailed {
            status: 500,
            body: "backend exploded".to_string(),
        }
    );
    assert_eq!(err.code(), "request_failed");
}

#[tokio::test]
async fn gemini_flattens_and_caps_error_bodies() {
    let server = MockServer::start().await;
    let body = format!("line1\nevent=forged status=ok\r\n{}", "x".repeat(5000));
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string(body))
        .mount(&server)
        .await;

    let err = gemini(&server, Some("k"))
        .generate("prompt")
        .await
        .unwrap_err();
    let GenerationError::RequestFailed { status, body } = err else {
        panic!("expected RequestFailed, got {err:?}");
    };
    assert_eq!(status, 502);
    assert!(!body.contains('\n'));
    assert!(!body.contains('\r'));
    assert!(body.starts_with("line1 event=forged status=ok"));
    assert!(body.ends_with("..."));
    assert!(body.chars().count() <= 203);
}

#[tokio::test]
async fn gemini_rejects_unexpected_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let generator = gemini(&server, Some("k"));
    assert!(matches!(
        generator.generate("prompt").await,
        Err(GenerationError::MalformedResponse(_))
    ));
    assert!(matches!(
        generator.generate("prompt").await,
        Err(GenerationError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn gemini_without_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = gemini(&server, None).generate("prompt").await.unwrap_err();
    assert_eq!(err, GenerationError::MissingApiKey);
}
