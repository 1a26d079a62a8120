//! Tests for risk analysis prompt building and degradation

use std::sync::Arc;

use ruralaudit::core::models::{AnalysisResult, RiskLevel, Status};
use ruralaudit::core::ports::AnalysisError;
use ruralaudit::core::services::RiskAnalyzer;
use ruralaudit::core::services::risk::build_prompt;

use crate::common::fixtures::full_state;
use crate::common::mocks::MockCompletion;

#[test]
fn test_prompt_lists_properties_parties_and_items() {
    let mut state = full_state();
    state.properties[0].items[0].status = Status::Issue;
    state.properties[0].items[0].notes = "Penhora trabalhista".to_string();
    state.general_notes = "Pagamento em 3 parcelas".to_string();

    let prompt = build_prompt(&state);

    assert!(prompt.contains("IMÓVEL: Fazenda Boa Vista (Matrícula: 12.345, Área: 250ha, Município: Sorriso/MT)"));
    assert!(prompt.contains("  - Certidão de Ônus Reais: issue (Penhora trabalhista)"));
    assert!(prompt.contains("  - CCIR: ok (Sem observações)"));
    assert!(prompt.contains("Parte: João da Silva (seller - PF)"));
    assert!(prompt.contains("OBSERVAÇÕES GERAIS DO USUÁRIO:\nPagamento em 3 parcelas"));
    assert!(prompt.contains("cite especificamente qual imóvel"));
}

#[tokio::test]
async fn test_analyze_returns_service_verdict() {
    let completion = Arc::new(MockCompletion::answering(
        r#"{"riskLevel":"Alto","summary":"CAR pendente","recommendations":["Retificar o CAR"]}"#,
    ));
    let analyzer = RiskAnalyzer::new(completion.clone());

    let outcome = analyzer.analyze(&full_state()).await;

    assert!(!outcome.degraded);
    assert_eq!(outcome.result.risk_level, RiskLevel::Alto);
    assert_eq!(outcome.result.recommendations, vec!["Retificar o CAR"]);
    assert!(completion.prompts()[0].contains("Sítio Esperança"));
}

#[tokio::test]
async fn test_missing_service_degrades() {
    let analyzer = RiskAnalyzer::unavailable();
    assert!(!analyzer.is_configured());

    assert_eq!(analyzer.try_analyze(&full_state()).await, Err(AnalysisError::MissingApiKey));

    let outcome = analyzer.analyze(&full_state()).await;
    assert!(outcome.degraded);
    assert_eq!(outcome.result, AnalysisResult::fallback());
}

#[tokio::test]
async fn test_malformed_answer_degrades() {
    let analyzer = RiskAnalyzer::new(Arc::new(MockCompletion::answering("Risco baixo, tudo certo.")));

    let outcome = analyzer.analyze(&full_state()).await;

    assert!(outcome.degraded);
    assert_eq!(outcome.result, AnalysisResult::fallback());
}

#[tokio::test]
async fn test_empty_answer_degrades() {
    let analyzer = RiskAnalyzer::new(Arc::new(MockCompletion::failing(AnalysisError::EmptyResponse)));

    assert_eq!(
        analyzer.try_analyze(&full_state()).await,
        Err(AnalysisError::EmptyResponse)
    );
    assert!(analyzer.analyze(&full_state()).await.degraded);
}
