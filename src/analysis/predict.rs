//! Outcome prediction for proposed entry-function calls.
//!
//! The model predicts success/failure, state changes, and warnings from the
//! module ABI alone. This is a textual prediction, never an execution: no
//! ledger state is read beyond the ABI and nothing is mutated.

use serde::{Deserialize, Serialize};

use crate::analysis::verdict::RawPrediction;
use crate::analysis::{prompt, verdict, AnalysisMode};
use crate::ledger::client::LedgerApi;
use crate::ledger::types::MoveModule;
use crate::model::client::Completion;

/// A proposed entry-function call to predict.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub sender: String,
    /// `address::module::function` triple.
    pub function_id: String,
    #[serde(default)]
    pub type_args: Vec<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Predicted outcome of a proposed call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// "Success", "Failure", or "Unknown".
    pub outcome: String,
    /// Free-text description of the predicted result.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<u64>,
    #[serde(default)]
    pub changes: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    pub mode: AnalysisMode,
}

/// Parsed `address::module::function` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionId {
    pub address: String,
    pub module: String,
    pub function: String,
}

impl FunctionId {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let mut parts = raw.split("::");
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(address), Some(module), Some(function), None)
                if !address.is_empty() && !module.is_empty() && !function.is_empty() =>
            {
                Ok(Self {
                    address: address.to_string(),
                    module: module.to_string(),
                    function: function.to_string(),
                })
            }
            _ => Err(format!(
                "malformed function id '{raw}': expected address::module::function"
            )),
        }
    }
}

/// Predict the outcome of a proposed call.
///
/// Unlike audit resolution there is no kind fallback here: the module fetch
/// is attempted exactly once, and any failure is a user-visible "Unknown"
/// prediction rather than an error.
pub async fn predict<L, M>(ledger: &L, model: &M, request: &SimulationRequest) -> PredictionResult
where
    L: LedgerApi + ?Sized,
    M: Completion + ?Sized,
{
    let function_id = match FunctionId::parse(&request.function_id) {
        Ok(id) => id,
        Err(message) => return unknown_prediction(message, Vec::new()),
    };

    let modules = match ledger.fetch_modules(&function_id.address).await {
        Ok(modules) => modules,
        Err(e) => {
            tracing::debug!(address = %function_id.address, error = %e, "Module fetch failed");
            return unknown_prediction(e.to_string(), Vec::new());
        }
    };

    let mut warnings = Vec::new();
    let module_abi = find_module_abi(&modules, &function_id.module);
    if module_abi.is_none() {
        warnings.push(format!(
            "module '{}' not found at {}",
            function_id.module, function_id.address
        ));
    }

    let function = module_abi.and_then(|abi| find_function(abi, &function_id.function));
    if module_abi.is_some() && function.is_none() {
        warnings.push(format!(
            "function '{}' not present in module ABI",
            function_id.function
        ));
    }

    if !model.is_configured() {
        return demo_prediction();
    }

    let module_context = module_abi.map(|abi| abi.to_string()).unwrap_or_default();
    let function_context = function.map(|f| f.to_string()).unwrap_or_default();
    let prompt = prompt::predict_prompt(
        prompt::truncate_context(&module_context),
        &function_context,
        &request.sender,
        &request.type_args,
        &request.args,
    );

    let reply = match model.generate(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(error = %e, "Completion call failed, degrading to Unknown");
            return unknown_prediction(e.to_string(), warnings);
        }
    };

    match verdict::parse_reply::<RawPrediction>(&reply) {
        Some(prediction) => {
            let mut merged = warnings;
            merged.extend(prediction.warnings);
            PredictionResult {
                outcome: prediction.outcome,
                status: prediction.status,
                gas_used: None,
                changes: prediction.changes,
                warnings: merged,
                mode: AnalysisMode::Live,
            }
        }
        None => unknown_prediction(reply, warnings),
    }
}

fn unknown_prediction(status: String, warnings: Vec<String>) -> PredictionResult {
    PredictionResult {
        outcome: "Unknown".to_string(),
        status,
        gas_used: None,
        changes: Vec::new(),
        warnings,
        mode: AnalysisMode::Live,
    }
}

/// Fixed placeholder returned when no completion credential is configured.
fn demo_prediction() -> PredictionResult {
    PredictionResult {
        outcome: "Success".to_string(),
        status: "Executed successfully (demo mode, not a real prediction)".to_string(),
        gas_used: Some(1500),
        changes: vec![
            "CoinStore modified".to_string(),
            "Vault updated".to_string(),
        ],
        warnings: Vec::new(),
        mode: AnalysisMode::Demo,
    }
}

/// ABI of the named module, if any module at the address exposes one.
fn find_module_abi<'a>(
    modules: &'a [MoveModule],
    name: &str,
) -> Option<&'a serde_json::Value> {
    modules
        .iter()
        .filter_map(|module| module.abi.as_ref())
        .find(|abi| abi.get("name").and_then(|n| n.as_str()) == Some(name))
}

/// First function in the ABI with a matching name. The lookup is
/// deliberately non-unique: first match wins, duplicates are ignored.
fn find_function<'a>(abi: &'a serde_json::Value, name: &str) -> Option<&'a serde_json::Value> {
    abi.get("exposed_functions")?
        .as_array()?
        .iter()
        .find(|function| function.get("name").and_then(|n| n.as_str()) == Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::{LedgerError, LedgerResult};
    use crate::model::types::{ModelError, ModelResult};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct ScriptedLedger {
        modules: Result<Vec<MoveModule>, String>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LedgerApi for ScriptedLedger {
        async fn fetch_modules(&self, _address: &str) -> LedgerResult<Vec<MoveModule>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.modules {
                Ok(modules) => Ok(modules.clone()),
                Err(message) => Err(LedgerError::Api {
                    status: 404,
                    message: message.clone(),
                }),
            }
        }

        async fn fetch_transaction(&self, _hash: &str) -> LedgerResult<serde_json::Value> {
            panic!("prediction must never fetch transactions");
        }
    }

    struct ScriptedModel {
        configured: bool,
        reply: String,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    #[async_trait]
    impl Completion for ScriptedModel {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn generate(&self, prompt: &str) -> ModelResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            if self.configured {
                Ok(self.reply.clone())
            } else {
                Err(ModelError::NotConfigured)
            }
        }
    }

    fn ledger_with(modules: Vec<MoveModule>) -> ScriptedLedger {
        ScriptedLedger {
            modules: Ok(modules),
            calls: AtomicUsize::new(0),
        }
    }

    fn model_with(reply: &str) -> ScriptedModel {
        ScriptedModel {
            configured: true,
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    fn coin_module() -> MoveModule {
        MoveModule {
            bytecode: None,
            abi: Some(json!({
                "name": "coin",
                "exposed_functions": [
                    {"name": "transfer", "params": ["&signer", "address", "u64"]},
                    {"name": "transfer", "params": ["&signer", "address"]},
                    {"name": "mint", "params": ["&signer", "u64"]}
                ]
            })),
        }
    }

    fn request(function_id: &str) -> SimulationRequest {
        SimulationRequest {
            sender: "0xsender".to_string(),
            function_id: function_id.to_string(),
            type_args: vec!["0x1::aptos_coin::AptosCoin".to_string()],
            args: vec!["0x123".to_string(), "100".to_string()],
        }
    }

    #[test]
    fn test_function_id_parsing() {
        let id = FunctionId::parse("0x1::coin::transfer").unwrap();
        assert_eq!(id.address, "0x1");
        assert_eq!(id.module, "coin");
        assert_eq!(id.function, "transfer");

        assert!(FunctionId::parse("coin::transfer").is_err());
        assert!(FunctionId::parse("0x1::coin::transfer::extra").is_err());
        assert!(FunctionId::parse("::coin::transfer").is_err());
        assert!(FunctionId::parse("").is_err());
    }

    #[tokio::test]
    async fn test_malformed_function_id_makes_no_network_calls() {
        let ledger = ledger_with(vec![coin_module()]);
        let model = model_with("unused");

        let result = predict(&ledger, &model, &request("coin::transfer")).await;

        assert_eq!(result.outcome, "Unknown");
        assert!(result.status.contains("malformed function id"));
        assert_eq!(ledger.calls.load(Ordering::SeqCst), 0);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_single_fetch_no_fallback_on_failure() {
        let ledger = ScriptedLedger {
            modules: Err("Account not found".to_string()),
            calls: AtomicUsize::new(0),
        };
        let model = model_with("unused");

        let result = predict(&ledger, &model, &request("0x1::coin::transfer")).await;

        assert_eq!(result.outcome, "Unknown");
        assert!(result.status.contains("Account not found"));
        assert_eq!(ledger.calls.load(Ordering::SeqCst), 1);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_demo_placeholder_without_credential() {
        let ledger = ledger_with(vec![coin_module()]);
        let model = ScriptedModel {
            configured: false,
            reply: String::new(),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        };

        let result = predict(&ledger, &model, &request("0x1::coin::transfer")).await;

        assert_eq!(result.outcome, "Success");
        assert_eq!(result.gas_used, Some(1500));
        assert_eq!(result.mode, AnalysisMode::Demo);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_well_formed_reply_is_parsed() {
        let ledger = ledger_with(vec![coin_module()]);
        let model = model_with(
            r#"{"outcome": "Failure", "status": "insufficient balance", "changes": [], "warnings": ["sender holds 0 coins"]}"#,
        );

        let result = predict(&ledger, &model, &request("0x1::coin::transfer")).await;

        assert_eq!(result.outcome, "Failure");
        assert_eq!(result.status, "insufficient balance");
        assert_eq!(result.warnings, vec!["sender holds 0 coins"]);
        assert_eq!(result.mode, AnalysisMode::Live);
    }

    #[tokio::test]
    async fn test_prose_reply_degrades_to_unknown() {
        let ledger = ledger_with(vec![coin_module()]);
        let model = model_with("It will probably go through.");

        let result = predict(&ledger, &model, &request("0x1::coin::transfer")).await;

        assert_eq!(result.outcome, "Unknown");
        assert_eq!(result.status, "It will probably go through.");
        assert_eq!(result.mode, AnalysisMode::Live);
    }

    #[tokio::test]
    async fn test_first_matching_function_wins() {
        let ledger = ledger_with(vec![coin_module()]);
        let model = model_with(r#"{"outcome": "Success", "status": "ok"}"#);

        predict(&ledger, &model, &request("0x1::coin::transfer")).await;

        let prompt = model.last_prompt.lock().unwrap().clone().unwrap();
        let target_section = prompt
            .split("Target function:")
            .nth(1)
            .and_then(|rest| rest.split("Sender:").next())
            .unwrap();
        // The three-parameter declaration comes first in the ABI
        assert!(target_section.contains("u64"));
    }

    #[tokio::test]
    async fn test_missing_function_still_predicts_with_warning() {
        let ledger = ledger_with(vec![coin_module()]);
        let model = model_with(r#"{"outcome": "Failure", "status": "no such function"}"#);

        let result = predict(&ledger, &model, &request("0x1::coin::burn")).await;

        assert_eq!(result.outcome, "Failure");
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("not present in module ABI")));
    }
}
