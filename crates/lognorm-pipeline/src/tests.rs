//! Integration tests for the Normalizer

#[cfg(test)]
mod tests {
    use crate::{
        FewShotExample, LogFormat, NormalizeRequest, Normalizer, NormalizerConfig,
        NormalizerError,
    };
    use lognorm_domain::RoutingDecision;
    use lognorm_llm::{LlmError, MockProvider};
    use lognorm_parser::FailureKind;
    use serde_json::json;
    use std::time::Duration;

    const SSH_LOG: &str = "Oct 11 22:14:15 bastion sshd[4721]: Accepted publickey for alice from 10.0.0.8";

    const AUTH_RECORD: &str = r#"{
        "class_uid": 3002,
        "class_name": "Authentication",
        "activity_id": 1,
        "type_uid": 300201,
        "severity_id": 1,
        "metadata": {"product": {"name": "OpenSSH"}, "version": "1.1.0"},
        "user": {"name": "alice"},
        "src_endpoint": {"ip": "10.0.0.8"}
    }"#;

    fn ssh_request() -> NormalizeRequest {
        NormalizeRequest::new(SSH_LOG, "openssh").with_format(LogFormat::Syslog)
    }

    #[tokio::test]
    async fn test_full_normalization_flow() {
        let llm = MockProvider::new(AUTH_RECORD).with_model("tiny-normalizer");
        let normalizer = Normalizer::new(llm.clone(), NormalizerConfig::default()).unwrap();

        let response = normalizer.normalize(ssh_request()).await.unwrap();

        assert!(response.is_success());
        assert_eq!(response.ocsf["class_uid"], 3002);
        assert!((response.confidence - 1.0).abs() < 1e-9);
        assert_eq!(response.routing, RoutingDecision::Accept);
        assert_eq!(response.model, "tiny-normalizer");
        assert_eq!(response.examples_used, 0);
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_chatty_output_is_recovered() {
        let output = format!("Here is the normalized event:\n```json\n{}\n```\nLet me know!", AUTH_RECORD);
        let normalizer = Normalizer::new(MockProvider::new(output), NormalizerConfig::default()).unwrap();

        let response = normalizer.normalize(ssh_request()).await.unwrap();
        assert_eq!(response.routing, RoutingDecision::Accept);
    }

    #[tokio::test]
    async fn test_unparsable_output_is_not_an_error() {
        let llm = MockProvider::new("I'm sorry, I cannot normalize this log.");
        let normalizer = Normalizer::new(llm, NormalizerConfig::default()).unwrap();

        let response = normalizer.normalize(ssh_request()).await.unwrap();

        assert!(!response.is_success());
        assert!(response.ocsf.is_empty());
        assert_eq!(response.confidence, 0.0);
        assert_eq!(response.routing, RoutingDecision::ManualReview);
        assert_eq!(response.failure, Some(FailureKind::Malformed));
        assert!(response.error.unwrap().starts_with("JSON extraction failed"));
    }

    #[tokio::test]
    async fn test_truncated_output_is_diagnosed() {
        let truncated = &AUTH_RECORD[..AUTH_RECORD.len() / 2];
        let normalizer =
            Normalizer::new(MockProvider::new(truncated), NormalizerConfig::default()).unwrap();

        let response = normalizer.normalize(ssh_request()).await.unwrap();
        assert_eq!(response.failure, Some(FailureKind::Truncated));
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_provider() {
        let llm = MockProvider::new(AUTH_RECORD);
        let normalizer = Normalizer::new(llm.clone(), NormalizerConfig::default()).unwrap();

        let result = normalizer
            .normalize(NormalizeRequest::new("   ", "openssh"))
            .await;
        assert!(matches!(result, Err(NormalizerError::InvalidRequest(_))));

        let result = normalizer
            .normalize(NormalizeRequest::new(SSH_LOG, "open ssh"))
            .await;
        assert!(matches!(result, Err(NormalizerError::InvalidRequest(_))));

        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_oversized_log_rejected() {
        let config = NormalizerConfig {
            max_raw_log_chars: 32,
            ..NormalizerConfig::default()
        };
        let normalizer = Normalizer::new(MockProvider::new(AUTH_RECORD), config).unwrap();

        let result = normalizer.normalize(ssh_request()).await;
        assert!(matches!(result, Err(NormalizerError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let llm = MockProvider::new(AUTH_RECORD);
        llm.add_error(SSH_LOG, LlmError::Communication("connection reset".to_string()));
        let normalizer = Normalizer::new(llm, NormalizerConfig::default()).unwrap();

        let result = normalizer.normalize(ssh_request()).await;
        match result {
            Err(NormalizerError::Llm(message)) => assert!(message.contains("connection reset")),
            other => panic!("expected LLM error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generation_timeout() {
        let llm = MockProvider::new(AUTH_RECORD).with_latency(Duration::from_millis(1500));
        let config = NormalizerConfig {
            generation_timeout_secs: 1,
            ..NormalizerConfig::default()
        };
        let normalizer = Normalizer::new(llm, config).unwrap();

        let result = normalizer.normalize(ssh_request()).await;
        assert!(matches!(result, Err(NormalizerError::Timeout(1))));
    }

    #[tokio::test]
    async fn test_threshold_controls_routing() {
        let partial = r#"{"class_uid": 3002, "class_name": "Authentication", "metadata": {}}"#;

        let strict = Normalizer::new(MockProvider::new(partial), NormalizerConfig::default()).unwrap();
        let relaxed = Normalizer::new(
            MockProvider::new(partial),
            NormalizerConfig {
                confidence_threshold: 0.5,
                ..NormalizerConfig::default()
            },
        )
        .unwrap();

        let strict_response = strict.normalize(ssh_request()).await.unwrap();
        let relaxed_response = relaxed.normalize(ssh_request()).await.unwrap();

        // 0.40 base + 0.10 partial identifier + 0.15 types; no user field
        assert!((strict_response.confidence - 0.65).abs() < 1e-9);
        assert_eq!(strict_response.routing, RoutingDecision::ManualReview);
        assert_eq!(relaxed_response.routing, RoutingDecision::Accept);
    }

    #[tokio::test]
    async fn test_few_shot_examples_counted() {
        let example = FewShotExample {
            raw_log: "Failed password for root from 203.0.113.9".to_string(),
            source: "openssh".to_string(),
            format: LogFormat::Syslog,
            ocsf: json!({"class_uid": 3002, "activity_id": 1, "status_id": 2}),
        };
        let config = NormalizerConfig {
            examples: vec![example.clone(), example.clone(), example],
            max_examples: 2,
            ..NormalizerConfig::default()
        };
        let normalizer = Normalizer::new(MockProvider::new(AUTH_RECORD), config).unwrap();

        let response = normalizer.normalize(ssh_request()).await.unwrap();
        assert_eq!(response.examples_used, 2);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let config = NormalizerConfig {
            max_raw_log_chars: 0,
            ..NormalizerConfig::default()
        };
        let result = Normalizer::new(MockProvider::default(), config);
        assert!(matches!(result, Err(NormalizerError::Config(_))));
    }

    #[tokio::test]
    async fn test_out_of_range_threshold_is_clamped() {
        let config = NormalizerConfig {
            confidence_threshold: 3.0,
            ..NormalizerConfig::default()
        };
        let normalizer = Normalizer::new(MockProvider::new(AUTH_RECORD), config).unwrap();
        assert_eq!(normalizer.config().confidence_threshold, 1.0);

        let response = normalizer.normalize(ssh_request()).await.unwrap();
        assert_eq!(response.routing, RoutingDecision::Accept);
    }

    #[tokio::test]
    async fn test_concurrent_normalization() {
        let llm = MockProvider::new(AUTH_RECORD);
        let normalizer =
            std::sync::Arc::new(Normalizer::new(llm.clone(), NormalizerConfig::default()).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let normalizer = std::sync::Arc::clone(&normalizer);
                tokio::spawn(async move {
                    let request = NormalizeRequest::new(format!("{} #{}", SSH_LOG, i), "openssh");
                    normalizer.normalize(request).await
                })
            })
            .collect();

        for handle in handles {
            let response = handle.await.unwrap().unwrap();
            assert_eq!(response.routing, RoutingDecision::Accept);
        }
        assert_eq!(llm.call_count(), 8);
    }
}
