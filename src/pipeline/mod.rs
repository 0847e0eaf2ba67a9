// Summary pipeline
// Wires fetch -> prompt -> generate into one sequential request


use tracing::{debug, info};

use crate::config::Config;
use crate::database::postgres::MachineHistory;
use crate::generation::OllamaClient;
use crate::history;
use crate::{ReportError, Result};

pub const DEFAULT_QUESTION: &str = "Describe the given data";

/// Render the fixed analysis prompt around one machine history.
///
/// The machine context is embedded as pretty-printed JSON so the model sees
/// the same field names the tree serializes with.
#[inline]
pub fn render_prompt(machine: &MachineHistory, question: &str) -> Result<String> {
    let context = serde_json::to_string_pretty(machine).map_err(|e| {
        ReportError::Generation(format!("Failed to render machine context: {}", e))
    })?;

    Ok(format!(
        "Given the following machine description, perform an analysis of the maintenance\n\
         tickets and spare parts used.\n\
         \n\
         Summarize the information using markdown tables.\n\
         \n\
         Context:\n\
         {}\n\
         \n\
         Question: {}\n",
        context, question
    ))
}

/// One pipeline run: fetch the history, render the prompt, ask the model.
///
/// Steps run in sequence exactly once; any failure fails the whole run and
/// nothing is retried. `None` propagates a machine that does not exist.
pub struct SummaryPipeline<'a> {
    config: &'a Config,
}

impl<'a> SummaryPipeline<'a> {
    #[inline]
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    #[inline]
    pub async fn run(&self, machine_id: i64) -> Result<Option<String>> {
        info!("Describing machine with id {}", machine_id);

        let Some(machine) =
            history::fetch_machine_history(&self.config.database, machine_id).await?
        else {
            return Ok(None);
        };

        let prompt = render_prompt(&machine, DEFAULT_QUESTION)?;
        debug!("Rendered prompt ({} characters)", prompt.len());

        let client = OllamaClient::new(&self.config.ollama)?;
        let reply = client.generate(&prompt)?;

        Ok(Some(reply))
    }
}
