//! End-to-end tests for the ask pipeline with an in-process LLM.

use crate::corpus::CorpusStore;
use crate::interactions::InteractionLog;
use crate::pipeline::{FaqService, QUESTION_REQUIRED};
use crate::rag::AnswerOrchestrator;
use crate::types::Interaction;
use faqbot_core::{AppConfig, AppError, CorpusReload, LlmSettings};
use faqbot_llm::MockLlmClient;
use faqbot_prompt::default_answer_prompt;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

const CORPUS: &str = r#"{
    "faqs": [
        {"id": "h1", "question": "What are your business hours?", "answer": "Monday to Friday, 9am to 5pm.", "tags": ["hours", "office"], "category": "general"},
        {"id": "c1", "question": "Do you offer free consultations?", "answer": "Yes, the first one is free.", "tags": ["consultation"], "category": "billing"},
        {"id": "l1", "question": "Where is your office located?", "answer": "123 Main Street.", "tags": ["location", "office"], "category": "general"}
    ]
}"#;

struct Fixture {
    dir: TempDir,
    corpus_path: PathBuf,
    log_path: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let corpus_path = dir.path().join("data/faqs.json");
        std::fs::create_dir_all(corpus_path.parent().unwrap()).unwrap();
        std::fs::write(&corpus_path, CORPUS).unwrap();
        let log_path = dir.path().join("data/logs/interactions.jsonl");
        Self {
            dir,
            corpus_path,
            log_path,
        }
    }

    fn service(&self, client: Arc<MockLlmClient>) -> FaqService {
        self.service_with_log(client, &self.log_path)
    }

    fn service_with_log(&self, client: Arc<MockLlmClient>, log_path: &Path) -> FaqService {
        FaqService::new(
            CorpusStore::new(&self.corpus_path, CorpusReload::Always),
            AnswerOrchestrator::new(client, default_answer_prompt(), &LlmSettings::default()),
            InteractionLog::new(log_path),
            2,
        )
    }

    fn logged(&self) -> Vec<Interaction> {
        match std::fs::read_to_string(&self.log_path) {
            Ok(contents) => contents
                .lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

fn question(text: &str) -> Value {
    json!(text)
}

#[tokio::test]
async fn test_office_hours_end_to_end() {
    let fixture = Fixture::new();
    let client = Arc::new(MockLlmClient::replying("We are open 9 to 5 on weekdays."));
    let service = fixture.service(client.clone());

    let q = question("  What are your office hours?  ");
    let response = service.ask(Some(&q)).await.unwrap();

    assert_eq!(response.answer, "We are open 9 to 5 on weekdays.");
    let ids: Vec<&str> = response.retrieved_faqs.iter().map(|f| f.id()).collect();
    assert_eq!(ids, vec!["h1", "l1"]);
    assert!(response.retrieved_faqs[0].score > response.retrieved_faqs[1].score);

    // the trimmed question reaches the model
    let prompt = client.last_request().unwrap().prompt;
    assert!(prompt.contains("User Question: What are your office hours?\n"));
    assert!(prompt.contains("1. Q: What are your business hours?"));

    let logged = fixture.logged();
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].question, "What are your office hours?");
    assert_eq!(logged[0].retrieved_faq_ids, vec!["h1", "l1"]);
    assert_eq!(logged[0].answer, response.answer);
    assert_eq!(logged[0].timestamp, response.timestamp);
}

#[tokio::test]
async fn test_unmatched_question_still_answers() {
    let fixture = Fixture::new();
    let client = Arc::new(MockLlmClient::replying("I'm not sure, please call us."));
    let service = fixture.service(client.clone());

    let q = question("Can I bring my dog?");
    let response = service.ask(Some(&q)).await.unwrap();

    assert!(response.retrieved_faqs.is_empty());
    assert!(client
        .last_request()
        .unwrap()
        .prompt
        .starts_with("No relevant FAQs found."));
    assert!(fixture.logged()[0].retrieved_faq_ids.is_empty());
}

#[tokio::test]
async fn test_blank_question_short_circuits() {
    let fixture = Fixture::new();
    let client = Arc::new(MockLlmClient::replying("unused"));
    let service = fixture.service(client.clone());

    for body in [Some(question("   ")), Some(json!(7)), None] {
        match service.ask(body.as_ref()).await {
            Err(AppError::InvalidInput(msg)) => assert_eq!(msg, QUESTION_REQUIRED),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    assert_eq!(client.call_count(), 0);
    assert!(fixture.logged().is_empty());
}

#[tokio::test]
async fn test_missing_corpus_fails_without_logging() {
    let fixture = Fixture::new();
    std::fs::remove_file(&fixture.corpus_path).unwrap();
    let client = Arc::new(MockLlmClient::replying("unused"));
    let service = fixture.service(client.clone());

    let q = question("What are your office hours?");
    let err = service.ask(Some(&q)).await.unwrap_err();

    assert_eq!(err.kind(), "corpus_unavailable");
    assert!(!err.to_string().contains(fixture.corpus_path.to_str().unwrap()));
    assert_eq!(client.call_count(), 0);
    assert!(fixture.logged().is_empty());
}

#[tokio::test]
async fn test_missing_credential_makes_no_call() {
    let fixture = Fixture::new();
    let service = FaqService::new(
        CorpusStore::new(&fixture.corpus_path, CorpusReload::Always),
        AnswerOrchestrator::unavailable(
            "OPENAI_API_KEY not configured",
            default_answer_prompt(),
            &LlmSettings::default(),
        ),
        InteractionLog::new(&fixture.log_path),
        2,
    );
    assert!(!service.answer_available());

    let q = question("What are your office hours?");
    let err = service.ask(Some(&q)).await.unwrap_err();

    assert!(matches!(err, AppError::AnswerGenerationUnavailable(_)));
    assert!(fixture.logged().is_empty());
}

#[tokio::test]
async fn test_generation_failure_is_not_logged() {
    let fixture = Fixture::new();
    let client = Arc::new(MockLlmClient::failing("upstream 503"));
    let service = fixture.service(client.clone());

    let q = question("What are your office hours?");
    let err = service.ask(Some(&q)).await.unwrap_err();

    assert_eq!(err.kind(), "answer_generation_failed");
    assert!(err.to_string().contains("upstream 503"));
    assert_eq!(client.call_count(), 1);
    assert!(fixture.logged().is_empty());
}

#[tokio::test]
async fn test_logging_fault_does_not_change_response() {
    let fixture = Fixture::new();
    let q = question("What are your office hours?");

    let healthy = fixture
        .service(Arc::new(MockLlmClient::replying("Open 9 to 5.")))
        .ask(Some(&q))
        .await
        .unwrap();

    // a regular file where the log directory should be
    let blocker = fixture.corpus_path.with_file_name("blocked");
    std::fs::write(&blocker, "not a directory").unwrap();
    let broken = fixture
        .service_with_log(
            Arc::new(MockLlmClient::replying("Open 9 to 5.")),
            &blocker.join("interactions.jsonl"),
        )
        .ask(Some(&q))
        .await
        .unwrap();

    assert_eq!(broken.answer, healthy.answer);
    assert_eq!(broken.retrieved_faqs, healthy.retrieved_faqs);
}

#[tokio::test]
async fn test_each_success_appends_one_line() {
    let fixture = Fixture::new();
    let service = fixture.service(Arc::new(MockLlmClient::replying("ok")));

    for text in ["office hours?", "free consultation?", "where is the office?"] {
        let q = question(text);
        service.ask(Some(&q)).await.unwrap();
    }

    let logged = fixture.logged();
    let questions: Vec<&str> = logged.iter().map(|i| i.question.as_str()).collect();
    assert_eq!(
        questions,
        vec!["office hours?", "free consultation?", "where is the office?"]
    );
}

fn workspace_config(fixture: &Fixture, provider: &str) -> AppConfig {
    let mut config = AppConfig {
        workspace: fixture.dir.path().to_path_buf(),
        ..AppConfig::default()
    };
    config.llm.provider = provider.to_string();
    config.llm.api_key_env = "FAQBOT_TEST_KEY_NEVER_SET".to_string();
    config
}

#[tokio::test]
async fn test_service_from_config_without_credential() {
    let fixture = Fixture::new();
    let service = FaqService::from_config(&workspace_config(&fixture, "openai")).unwrap();
    assert!(!service.answer_available());

    let q = question("What are your office hours?");
    let err = service.ask(Some(&q)).await.unwrap_err();

    assert_eq!(err.kind(), "answer_generation_unavailable");
    assert!(fixture.logged().is_empty());
}

#[tokio::test]
async fn test_service_from_config_with_mock_provider() {
    let fixture = Fixture::new();
    let service = FaqService::from_config(&workspace_config(&fixture, "mock")).unwrap();
    assert!(service.answer_available());

    let q = question("What are your office hours?");
    let response = service.ask(Some(&q)).await.unwrap();

    assert_eq!(
        response.answer,
        "[mock] 2 FAQ entries available for: What are your office hours?"
    );
    // default paths resolve inside the workspace
    let logged = fixture.logged();
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].retrieved_faq_ids, vec!["h1", "l1"]);
}
