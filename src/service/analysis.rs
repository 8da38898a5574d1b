//! Risk-analysis forwarding to the LLM completion endpoint

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

use crate::adapters::CompletionProvider;
use crate::service::normalizer::simplify_results;

/// System instruction sent with every analysis request. The output contract
/// (executive summary with a final APROVADO / APROVADO COM RESTRIÇÕES /
/// REPROVADO decision, detailed analysis, recommendations) is defined here.
pub const RISK_PROMPT: &str = "Você é um analista de risco especializado em AML/KYP/PLD. Sua função é analisar empresas e tomar decisões assertivas sobre o nível de risco, sem rodeios.

Analise os dados fornecidos e forneça um parecer estruturado da seguinte forma:

1. RESUMO EXECUTIVO (2-3 linhas)
- Principais pontos de atenção
- Decisão final (APROVADO, APROVADO COM RESTRIÇÕES, ou REPROVADO)

2. ANÁLISE DETALHADA
- Perfil da empresa
- Atividades e operações
- Indicadores de risco
- Histórico e processos

3. RECOMENDAÇÕES
- Medidas mitigadoras (se necessário)
- Condicionantes (se aplicável)
- Próximos passos

IMPORTANTE:
- Seja direto e objetivo
- Tome uma posição clara
- Justifique sua decisão com base nos dados
- Formate o texto com quebras de linha para melhor legibilidade
- Use marcadores para listas
- Destaque pontos críticos em NEGRITO

Por favor, analise os seguintes dados:";

/// User-facing analysis failures, classified from the upstream error text.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Os dados são muito extensos para análise. Por favor, reduza a quantidade de CNPJs consultados.")]
    InputTooLarge,
    #[error("Limite de requisições excedido. Por favor, aguarde um momento e tente novamente.")]
    RateLimited,
    #[error("Erro ao realizar a análise: {0}")]
    Completion(String),
}

impl AnalysisError {
    /// Classify an upstream error message by the provider's error codes.
    pub fn classify(message: String) -> Self {
        if message.contains("context_length_exceeded") {
            AnalysisError::InputTooLarge
        } else if message.contains("rate_limit_exceeded") {
            AnalysisError::RateLimited
        } else {
            AnalysisError::Completion(message)
        }
    }
}

/// Service that simplifies aggregated results and forwards them for a risk
/// narrative.
#[derive(Debug)]
pub struct AnalysisService {
    completions: Arc<dyn CompletionProvider>,
}

impl AnalysisService {
    pub fn new(completions: Arc<dyn CompletionProvider>) -> Self {
        Self { completions }
    }

    /// Build the size-bounded projection of `results` and request a risk
    /// narrative for it. Returns the generated text verbatim.
    pub async fn analyze(&self, results: &[Value], api_key: &str) -> Result<String, AnalysisError> {
        let simplified = simplify_results(results);
        info!(
            "Requesting risk analysis for {} simplified records",
            simplified.len()
        );

        let user_content = serde_json::to_string(&simplified)
            .map_err(|e| AnalysisError::Completion(e.to_string()))?;

        match self
            .completions
            .complete(RISK_PROMPT, &user_content, api_key)
            .await
        {
            Ok(text) => Ok(text),
            Err(e) => {
                // The analysis path is the only one that logs raw upstream
                // error detail.
                error!("Risk analysis failed: {}", e);
                Err(AnalysisError::classify(e.to_string()))
            }
        }
    }
}
