//! Instruction templates sent to the completion service.

/// Hard cap on context characters embedded in a prompt. Bounds outbound
/// payload size and cost, not a semantic judgment.
pub const MAX_CONTEXT_CHARS: usize = 10_000;

/// Truncate context to [`MAX_CONTEXT_CHARS`] characters.
pub fn truncate_context(text: &str) -> &str {
    match text.char_indices().nth(MAX_CONTEXT_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Auditor instruction wrapped around resolved on-chain context.
pub fn audit_prompt(context: &str) -> String {
    format!(
        "You are a smart contract auditor for the Aptos blockchain.\n\
         Analyze the following Move language context (ABI/transaction) for security risks.\n\
         Look specifically for:\n\
         1. Rug-pull mechanisms (unauthorized withdrawals).\n\
         2. Infinite mint loops.\n\
         3. Suspicious logic.\n\
         \n\
         Context:\n\
         {context}\n\
         \n\
         Response format (JSON only):\n\
         {{\n\
         \x20 \"status\": \"Safe\" | \"Risky\",\n\
         \x20 \"risk_score\": 0-100,\n\
         \x20 \"reason\": \"Brief explanation...\"\n\
         }}\n"
    )
}

/// Prediction instruction for a proposed entry-function call.
///
/// The model is asked for a textual prediction only; nothing is executed.
pub fn predict_prompt(
    module_context: &str,
    function_context: &str,
    sender: &str,
    type_args: &[String],
    args: &[String],
) -> String {
    format!(
        "You are a transaction analyst for the Aptos blockchain.\n\
         Predict the outcome of the following proposed entry function call.\n\
         Do not execute anything; reason from the ABI alone.\n\
         \n\
         Module ABI:\n\
         {module_context}\n\
         \n\
         Target function:\n\
         {function_context}\n\
         \n\
         Sender: {sender}\n\
         Type arguments: {type_args:?}\n\
         Arguments: {args:?}\n\
         \n\
         Response format (JSON only):\n\
         {{\n\
         \x20 \"outcome\": \"Success\" | \"Failure\",\n\
         \x20 \"status\": \"Brief description of the predicted result\",\n\
         \x20 \"changes\": [\"predicted state change\", ...],\n\
         \x20 \"warnings\": [\"anything the sender should know\", ...]\n\
         }}\n"
    )
}
