//! Risk analysis verdict

use serde::{Deserialize, Serialize};

/// Overall legal risk of the transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Low
    Baixo,
    /// Medium
    #[serde(rename = "Médio")]
    Medio,
    /// High
    Alto,
}

impl RiskLevel {
    /// Wire and display form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Baixo => "Baixo",
            Self::Medio => "Médio",
            Self::Alto => "Alto",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured verdict returned by the analysis service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Overall risk
    pub risk_level: RiskLevel,
    /// Executive summary focused on critical points
    pub summary: String,
    /// Practical mitigation steps
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    /// Degraded verdict used when the service cannot be reached
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            risk_level: RiskLevel::Medio,
            summary: "Não foi possível realizar a análise automática no momento. Verifique se a \
                      chave de API está configurada corretamente ou tente novamente."
                .to_string(),
            recommendations: vec![
                "Realizar análise manual".to_string(),
                "Verificar conexão com a API".to_string(),
            ],
        }
    }
}
