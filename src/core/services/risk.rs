//! Risk analysis
//!
//! Serializes the audit tree into a prompt for a structured-completion service
//! and parses the verdict it returns. Analysis never fails from the caller's
//! point of view: any problem yields [`AnalysisResult::fallback`].

use std::fmt::Write as _;
use std::sync::Arc;

use serde_json::{Value, json};

use crate::core::models::{AnalysisResult, AuditState, ChecklistItem};
use crate::core::ports::{AnalysisError, CompletionService};

const NO_NOTES: &str = "Sem observações";

const PREAMBLE: &str = "Atue como um advogado sênior especialista em direito agrário e \
imobiliário brasileiro (Due Diligence Rural).\nAnalise os dados desta auditoria de compra e venda \
de imóvel rural (pode haver múltiplas matrículas/imóveis envolvidos).";

const INSTRUCTIONS: &str = "INSTRUÇÕES:
1. Identifique riscos jurídicos (ex: certidões positivas, falta de georreferenciamento, problemas ambientais).
2. Status 'pending' gera alerta de atraso. 'issue' é risco alto. 'expired' exige renovação.
3. Analise a cadeia dominial e riscos ambientais (IBAMA, CAR) se mencionados.
4. Se houver múltiplos imóveis, cite especificamente qual imóvel possui o problema.";

/// Verdict plus whether it came from the fallback path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutcome {
    /// The verdict to show
    pub result: AnalysisResult,
    /// True when the service could not produce a verdict
    pub degraded: bool,
}

/// Produces risk verdicts from audit snapshots
#[derive(Clone, Default)]
pub struct RiskAnalyzer {
    service: Option<Arc<dyn CompletionService>>,
}

impl std::fmt::Debug for RiskAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskAnalyzer")
            .field("configured", &self.service.is_some())
            .finish()
    }
}

impl RiskAnalyzer {
    /// Analyzer backed by a completion service
    #[must_use]
    pub fn new(service: Arc<dyn CompletionService>) -> Self {
        Self {
            service: Some(service),
        }
    }

    /// Analyzer with no service; every analysis degrades
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { service: None }
    }

    /// Whether a completion service is wired in
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.service.is_some()
    }

    /// Ask the service for a verdict, surfacing failures
    pub async fn try_analyze(&self, state: &AuditState) -> Result<AnalysisResult, AnalysisError> {
        let service = self.service.as_ref().ok_or(AnalysisError::MissingApiKey)?;
        let prompt = build_prompt(state);
        let text = service.complete_structured(&prompt, &response_schema()).await?;
        parse_verdict(&text)
    }

    /// Ask the service for a verdict, degrading to the fallback verdict
    pub async fn analyze(&self, state: &AuditState) -> AnalysisOutcome {
        match self.try_analyze(state).await {
            Ok(result) => AnalysisOutcome {
                result,
                degraded: false,
            },
            Err(e) => {
                log::error!("Risk analysis failed: {e}");
                AnalysisOutcome {
                    result: AnalysisResult::fallback(),
                    degraded: true,
                }
            },
        }
    }
}

/// Render the audit tree as the analysis prompt
#[must_use]
pub fn build_prompt(state: &AuditState) -> String {
    let properties = state
        .properties
        .iter()
        .map(|p| {
            format!(
                "IMÓVEL: {} (Matrícula: {}, Área: {}ha, Município: {})\nChecklist do Imóvel:\n{}",
                p.name,
                p.matricula,
                p.area,
                p.municipio,
                item_lines(&p.items)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let parties = state
        .parties
        .iter()
        .map(|p| format!("Parte: {} ({} - {})\n{}", p.name, p.role, p.kind, item_lines(&p.items)))
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut prompt = String::new();
    let _ = writeln!(prompt, "{PREAMBLE}\n");
    let _ = writeln!(prompt, "DADOS DOS IMÓVEIS:\n{properties}\n");
    let _ = writeln!(prompt, "DADOS DAS PARTES:\n{parties}\n");
    let _ = writeln!(prompt, "OBSERVAÇÕES GERAIS DO USUÁRIO:\n{}\n", state.general_notes);
    prompt.push_str(INSTRUCTIONS);
    prompt
}

fn item_lines(items: &[ChecklistItem]) -> String {
    items
        .iter()
        .map(|i| {
            let notes = if i.notes.trim().is_empty() {
                NO_NOTES
            } else {
                i.notes.as_str()
            };
            format!("  - {}: {} ({})", i.name, i.status, notes)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// JSON schema the service must answer with
#[must_use]
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "riskLevel": {
                "type": "STRING",
                "enum": ["Baixo", "Médio", "Alto"],
                "description": "O nível geral de risco jurídico desta transação."
            },
            "summary": {
                "type": "STRING",
                "description": "Um resumo executivo da situação da auditoria focado em pontos críticos."
            },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Lista de ações práticas recomendadas para mitigar os riscos identificados."
            }
        },
        "required": ["riskLevel", "summary", "recommendations"]
    })
}

/// Parse the service's JSON text into a verdict
pub fn parse_verdict(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }
    serde_json::from_str(trimmed).map_err(|e| AnalysisError::InvalidVerdict(e.to_string()))
}
