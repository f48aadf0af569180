use super::models::Event;
use super::parser::parse_plan;
use super::prompt::{build_prompt, PlanRequest};
use crate::error::{generation_error, PlannerResult};
use crate::utils::time::now_in;
use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;
use rig::completion::{Chat, Message};
use rig::providers::gemini::Client as GeminiClient;
use tracing::{error, info};

/// Default Gemini model used for planning
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// A service that turns one prompt into one text completion
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> PlannerResult<String>;
}

/// Text generation through Google Gemini
pub struct GeminiGenerator {
    client: GeminiClient,
    model: String,
}

impl GeminiGenerator {
    pub fn new(api_key: &str, model: impl Into<String>) -> Self {
        Self {
            client: GeminiClient::new(api_key),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn complete(&self, prompt: &str) -> PlannerResult<String> {
        info!("Requesting schedule from Gemini model {}", self.model);

        let agent = self.client.agent(&self.model).build();

        let response = agent
            .chat(prompt.to_string(), Vec::<Message>::new())
            .await
            .map_err(|e| generation_error(&format!("Gemini request failed: {}", e)))?;

        info!("Received response from Gemini");
        Ok(response.trim().to_string())
    }
}

/// Generate a plan for the week starting now.
///
/// Never fails: a failed request or an unusable response is logged and
/// yields an empty plan.
pub async fn generate_schedule<G>(generator: &G, request: &PlanRequest, zone: Tz) -> Vec<Event>
where
    G: TextGenerator + ?Sized,
{
    generate_schedule_at(generator, request, &now_in(zone)).await
}

/// Generate a plan for the week starting at `now`
pub async fn generate_schedule_at<G>(
    generator: &G,
    request: &PlanRequest,
    now: &DateTime<Tz>,
) -> Vec<Event>
where
    G: TextGenerator + ?Sized,
{
    match try_generate(generator, request, now).await {
        Ok(events) => {
            info!("Generated plan with {} events", events.len());
            events
        }
        Err(e) => {
            error!("Schedule generation failed: {}", e);
            Vec::new()
        }
    }
}

async fn try_generate<G>(
    generator: &G,
    request: &PlanRequest,
    now: &DateTime<Tz>,
) -> PlannerResult<Vec<Event>>
where
    G: TextGenerator + ?Sized,
{
    let prompt = build_prompt(request, now)?;
    let response = generator.complete(&prompt).await?;
    parse_plan(&response, now.timezone())
}
