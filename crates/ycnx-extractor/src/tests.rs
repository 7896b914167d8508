//! End-to-end tests for the extractor against a mock LLM

use crate::{Extractor, ExtractorConfig, ExtractorError, SYSTEM_INSTRUCTION};
use std::time::Duration;
use ycnx_domain::traits::{LlmProvider, RecordExtractor};
use ycnx_llm::{LlmError, MockProvider};

const URL: &str = "https://example.invalid/YCCQPCH0000001";

fn extractor_with(response: &str) -> Extractor<MockProvider> {
    Extractor::new(MockProvider::new(response), ExtractorConfig::default())
}

#[tokio::test]
async fn test_quota_exhausted_record() {
    let extractor = extractor_with(
        r#"{"batch_no": "YCCQPCH0000001", "draw_date": "2024-01-23",
            "total_applied": "500人", "quota_total": "100",
            "total_won": "1", "total_lost": "499"}"#,
    );

    let record = extractor.extract_record("page text", 1, URL).await.unwrap();

    assert_eq!(record.period_id, 1);
    assert_eq!(record.batch_no, "YCCQPCH0000001");
    assert_eq!(record.period_name, "第1期");
    assert_eq!(record.draw_date.as_deref(), Some("2024-01-23"));
    assert_eq!(record.total_applied, 500);
    assert_eq!(record.quota_total, 100);
    assert_eq!(record.total_won, 100);
    assert_eq!(record.total_lost, 400);
    assert_eq!(record.win_rate, "20.00%");
    assert_eq!(record.pdf_url, URL);
    assert!(record.is_balanced());
}

#[tokio::test]
async fn test_full_subscription_record() {
    let extractor = extractor_with(
        r#"{"batch_no": "YCCQPCH0000002", "draw_date": "2024-02-23",
            "total_applied": "1,234", "quota_total": "2000",
            "total_won": "1", "total_lost": "1233"}"#,
    );

    let record = extractor.extract_record("page text", 2, URL).await.unwrap();

    assert_eq!(record.total_won, 1234);
    assert_eq!(record.total_lost, 0);
    assert_eq!(record.win_rate, "100%");
}

#[tokio::test]
async fn test_batch_no_fallback() {
    let extractor = extractor_with(r#"{"total_applied": 200, "quota_total": 37, "total_won": 37}"#);

    let record = extractor.extract_record("page text", 7, URL).await.unwrap();

    assert_eq!(record.batch_no, "YCCQPCH0000007");
    assert_eq!(record.period_name, "第7期");
    assert!(record.draw_date.is_none());
    assert_eq!(record.total_lost, 163);
    assert_eq!(record.win_rate, "18.50%");
}

#[tokio::test]
async fn test_batch_prefix_from_config() {
    let config = ExtractorConfig {
        batch_prefix: "TEST".to_string(),
        ..ExtractorConfig::default()
    };
    let extractor = Extractor::new(MockProvider::new("{}"), config);

    let record = extractor.extract_record("page text", 3, URL).await.unwrap();

    assert_eq!(record.batch_no, "TEST0000003");
    assert_eq!(record.total_applied, 0);
    assert_eq!(record.win_rate, "0%");
}

#[tokio::test]
async fn test_non_json_response_fails() {
    let extractor = extractor_with("Sorry, I cannot read this document.");

    let result = extractor.extract_record("page text", 1, URL).await;

    assert!(matches!(result, Err(ExtractorError::JsonParse(_))));
}

#[tokio::test]
async fn test_llm_failure_fails() {
    let mut llm = MockProvider::default();
    llm.add_error("broken page");
    let extractor = Extractor::new(llm, ExtractorConfig::default());

    let result = extractor.extract_record("broken page", 1, URL).await;

    assert!(matches!(result, Err(ExtractorError::Llm(_))));
}

#[tokio::test]
async fn test_text_too_long() {
    let config = ExtractorConfig {
        max_text_length: 10,
        ..ExtractorConfig::default()
    };
    let llm = MockProvider::new("{}");
    let extractor = Extractor::new(llm.clone(), config);

    let result = extractor.extract_record(&"字".repeat(11), 1, URL).await;

    assert!(matches!(result, Err(ExtractorError::TextTooLong(11, 10))));
    assert_eq!(llm.call_count(), 0, "oversized text must not reach the LLM");
}

#[tokio::test]
async fn test_prompt_carries_page_text() {
    let llm = MockProvider::new("{}");
    let extractor = Extractor::new(llm.clone(), ExtractorConfig::default());

    extractor
        .extract("抽签名额总数 100", 1, URL)
        .await
        .unwrap();

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("抽签名额总数 100"));
}

/// Provider that never answers in time
struct SlowProvider;

impl LlmProvider for SlowProvider {
    type Error = LlmError;

    async fn generate_json(&self, system: &str, _prompt: &str) -> Result<String, Self::Error> {
        assert_eq!(system, SYSTEM_INSTRUCTION);
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok("{}".to_string())
    }
}

#[tokio::test]
async fn test_configured_timeout() {
    let config = ExtractorConfig {
        extraction_timeout_secs: Some(1),
        ..ExtractorConfig::default()
    };
    let extractor = Extractor::new(SlowProvider, config);

    let result = extractor.extract_record("page text", 1, URL).await;

    assert!(matches!(result, Err(ExtractorError::Timeout)));
}
