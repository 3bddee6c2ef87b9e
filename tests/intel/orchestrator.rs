#[path = "../common/mod.rs"]
mod common;

use common::RecordingModel;
use pbmintel::intel::prompt::{summary_directive, DETAILED_DIRECTIVE, DRILL_DOWN_DIRECTIVE};
use pbmintel::intel::request::{IntelRequest, RequestKind};
use pbmintel::intel::view::{Depth, ViewConfiguration};
use pbmintel::intel::{IntelError, Orchestrator};
use pbmintel::llm::{classify_failure, FailureKind, ModelError};

fn rumor() -> IntelRequest {
    IntelRequest::new(
        RequestKind::RumorAnalysis,
        "Competitor X rumored to offer $0 spread",
    )
}

#[tokio::test]
async fn missing_credential_never_reaches_model() {
    let orchestrator = Orchestrator::new(RecordingModel::replying("unused"));

    for credential in ["", "   "] {
        for depth in [Depth::Summary, Depth::Detailed] {
            let config = ViewConfiguration::new(depth, credential);
            let result = orchestrator.analyze(&rumor(), &config).await;
            assert_eq!(result, Err(IntelError::MissingCredential));
        }
    }

    assert_eq!(orchestrator.model().call_count(), 0);
}

#[tokio::test]
async fn missing_credential_is_checked_before_kind() {
    let orchestrator = Orchestrator::new(RecordingModel::replying("unused"));

    let result = orchestrator
        .analyze_tag("weather", "payload", None, &ViewConfiguration::default())
        .await;

    assert_eq!(result, Err(IntelError::MissingCredential));
    assert_eq!(orchestrator.model().call_count(), 0);
}

#[tokio::test]
async fn unknown_kind_never_reaches_model() {
    let orchestrator = Orchestrator::new(RecordingModel::replying("unused"));
    let config = ViewConfiguration::new(Depth::Detailed, "sk-test");

    let result = orchestrator
        .analyze_tag("weather", "payload", None, &config)
        .await;

    assert_eq!(
        result,
        Err(IntelError::UnknownRequestKind("weather".to_string()))
    );
    assert_eq!(orchestrator.model().call_count(), 0);
}

#[tokio::test]
async fn known_tag_dispatches_with_extra_instructions() {
    let orchestrator = Orchestrator::new(RecordingModel::replying("ok"));
    let config = ViewConfiguration::new(Depth::Detailed, "sk-test");

    let result = orchestrator
        .analyze_tag(
            "technical",
            "NCPDP D.0 claim reversal changes",
            Some("Mention Texas ERS.".to_string()),
            &config,
        )
        .await;

    assert_eq!(result, Ok("ok".to_string()));
    let prompt = orchestrator.model().last_prompt();
    assert_eq!(
        prompt.user_message,
        "TECHNICAL DEEP-DIVE: NCPDP D.0 claim reversal changes"
    );
    assert!(prompt.system_prompt.ends_with("Mention Texas ERS."));
}

#[tokio::test]
async fn success_returns_text_verbatim_and_passes_credential() {
    let text = "  **HIGH** risk\n\n- item one\n- item two\n";
    let orchestrator = Orchestrator::new(RecordingModel::replying(text));
    let config = ViewConfiguration::new(Depth::Summary, "sk-live");

    let result = orchestrator.analyze(&rumor(), &config).await;

    assert_eq!(result, Ok(text.to_string()));
    let calls = orchestrator.model().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "sk-live");
    assert_eq!(
        calls[0].1.user_message,
        "RUMOR ANALYSIS: Competitor X rumored to offer $0 spread"
    );
    assert_eq!(calls[0].1.max_output_tokens, None);
}

#[tokio::test]
async fn depth_selects_tone_directive_in_dispatched_prompt() {
    let orchestrator = Orchestrator::new(RecordingModel::replying("ok"));

    orchestrator
        .analyze(&rumor(), &ViewConfiguration::new(Depth::Summary, "sk-test"))
        .await
        .expect("Summary analysis failed");
    let summary = orchestrator.model().last_prompt();
    assert!(summary.system_prompt.contains(&summary_directive(2)));
    assert!(!summary.system_prompt.contains(DETAILED_DIRECTIVE));

    orchestrator
        .analyze(&rumor(), &ViewConfiguration::new(Depth::Detailed, "sk-test"))
        .await
        .expect("Detailed analysis failed");
    let detailed = orchestrator.model().last_prompt();
    assert!(detailed.system_prompt.contains(DETAILED_DIRECTIVE));
    assert!(!detailed.system_prompt.contains(&summary_directive(2)));
}

#[tokio::test]
async fn drill_down_prompt_ignores_depth() {
    let orchestrator = Orchestrator::new(RecordingModel::replying("ok"));
    let request = IntelRequest::new(RequestKind::LearnMore, "Title: HR 2884\nSummary: PBM reform");

    for depth in [Depth::Summary, Depth::Detailed] {
        orchestrator
            .analyze(&request, &ViewConfiguration::new(depth, "sk-test"))
            .await
            .expect("Drill-down failed");
    }

    let calls = orchestrator.model().calls();
    assert_eq!(calls.len(), 2);
    for (_, prompt) in &calls {
        assert!(prompt.system_prompt.contains(DRILL_DOWN_DIRECTIVE));
        assert!(!prompt.system_prompt.contains(DETAILED_DIRECTIVE));
        assert!(!prompt.system_prompt.contains(&summary_directive(2)));
    }
    assert_eq!(calls[0].1, calls[1].1);
}

#[tokio::test]
async fn identical_inputs_build_identical_prompts() {
    let orchestrator = Orchestrator::new(RecordingModel::replying("same"));
    let config = ViewConfiguration::new(Depth::Detailed, "sk-test");
    let request = rumor().with_extra_instructions(Some("Account: Texas ERS".to_string()));

    let first = orchestrator.analyze(&request, &config).await;
    let second = orchestrator.analyze(&request, &config).await;

    assert_eq!(first, second);
    let calls = orchestrator.model().calls();
    assert_eq!(calls[0], calls[1]);
    assert_eq!(orchestrator.build_prompt(&request, &config), calls[0].1);
}

#[tokio::test]
async fn authentication_and_quota_failures_are_distinguishable() {
    let config = ViewConfiguration::new(Depth::Detailed, "sk-test");

    let auth = Orchestrator::new(RecordingModel::failing(classify_failure(
        "HttpError: 401 Unauthorized: Incorrect API key provided",
    )));
    let quota = Orchestrator::new(RecordingModel::failing(classify_failure(
        "ProviderError: 429 You exceeded your current quota (insufficient_quota)",
    )));
    let generic = Orchestrator::new(RecordingModel::failing(ModelError::Other(
        "connection reset by peer".to_string(),
    )));

    let auth_err = auth.analyze(&rumor(), &config).await.expect_err("auth");
    let quota_err = quota.analyze(&rumor(), &config).await.expect_err("quota");
    let generic_err = generic.analyze(&rumor(), &config).await.expect_err("generic");

    assert_eq!(auth_err.failure_kind(), Some(FailureKind::Authentication));
    assert_eq!(quota_err.failure_kind(), Some(FailureKind::Quota));
    assert_eq!(generic_err.failure_kind(), Some(FailureKind::Generic));
    match &quota_err {
        IntelError::Collaborator(ModelError::QuotaExhausted(message)) => {
            assert!(message.contains("insufficient_quota"))
        }
        other => panic!("Unexpected error: {other:?}"),
    }
    assert!(quota_err.to_string().contains("quota exhausted"));
    assert!(!auth_err.to_string().contains("quota"));
    assert_eq!(IntelError::MissingCredential.failure_kind(), None);
}
