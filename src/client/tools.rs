//! Automatic function-calling loop.
//!
//! Each round sends the conversation with the registered declarations,
//! dispatches the model's response and, when calls were executed, appends the
//! model turn plus the function responses before asking again. The loop ends
//! on text, pending calls, a protocol violation or after `max_remote_calls`
//! requests.

use tracing::{info, warn};

use crate::client::core::ContentGenerator;
use crate::drivers::GenerateRequest;
use crate::tools::{CallPolicy, DispatchOutcome, ToolConfig};
use crate::types::{Content, FunctionCallingMode, ModelResponse};
use crate::Result;

/// Result of a function-calling run.
#[derive(Debug, Clone)]
pub struct ToolRun {
    /// Outcome of the last round.
    pub outcome: DispatchOutcome,
    /// Last model response.
    pub response: ModelResponse,
    /// Full conversation including the final model turn.
    pub history: Vec<Content>,
    /// Requests sent to the model.
    pub rounds: usize,
}

impl ToolRun {
    pub fn text(&self) -> Option<&str> {
        self.outcome.text()
    }
}

pub async fn run_tool_loop<G>(
    generator: &G,
    contents: Vec<Content>,
    config: &ToolConfig,
    system_instruction: Option<String>,
) -> Result<ToolRun>
where
    G: ContentGenerator + ?Sized,
{
    let dispatcher = config.dispatcher();
    let declarations = config.declarations();
    let mut history = contents;
    let mut round = 0;

    loop {
        round += 1;
        // Forcing a call applies to the opening request; afterwards the model
        // must be free to answer with the tool results.
        let (policy, mode) = if round > 1 && config.policy == CallPolicy::Forced {
            (CallPolicy::Automatic, FunctionCallingMode::Auto)
        } else {
            (config.policy, config.calling_mode())
        };

        let request = GenerateRequest {
            contents: history.clone(),
            system_instruction: system_instruction.clone(),
            generation_config: None,
            tools: declarations.clone(),
            calling_mode: Some(mode),
        };
        let response = generator.generate(&request).await?;
        let outcome = dispatcher.handle_response(&response, policy).await;
        history.push(response.model_turn());

        let responses = match outcome.response_content() {
            Some(content) => content,
            None => {
                info!(rounds = round, policy = %policy, "tool loop finished");
                return Ok(ToolRun {
                    outcome,
                    response,
                    history,
                    rounds: round,
                });
            }
        };
        history.push(responses);

        if round >= config.max_remote_calls {
            warn!(
                max_remote_calls = config.max_remote_calls,
                "tool loop stopped at max_remote_calls"
            );
            return Ok(ToolRun {
                outcome,
                response,
                history,
                rounds: round,
            });
        }
    }
}
