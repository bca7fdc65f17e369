//! Hub generation pipeline
//!
//! Drives Architect -> Assembler/Persona review -> per-section drafting ->
//! assembly -> validation, applying the interaction channel and the
//! caller-supplied attempt budget at every suspension point. The pipeline
//! itself performs no file or console I/O: the provider, the channel, and
//! the registry store are all injected.

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use hubloom_agents::{Assembler, Persona};
use hubloom_core::{
    ContentFrontmatter, HubArtifact, HubBlueprint, HubRequest, HubloomConfig, HubloomError,
    Result, SectionDraft, SectionFailure,
};
use hubloom_provider::{CompletionOptions, CompletionProvider};
use hubloom_registry::{ArtifactStore, Registry};
use hubloom_validation::{check_artifact, ValidationReport};

use crate::channel::{expect_retry, expect_review, Ask, InteractionChannel, Review};
use crate::prompt::{build_architect_prompt, build_section_prompt};
use crate::state::{transition, Event, State};

/// Parameters for one pipeline run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Model passed to every provider call
    pub model: String,
    /// API key passed to every provider call
    pub api_key: String,
    /// Maximum tokens per completion
    pub max_tokens: usize,
    /// Attempt budget for every feedback and retry loop
    pub max_attempts: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4".to_string(),
            api_key: String::new(),
            max_tokens: 8000,
            max_attempts: 5,
        }
    }
}

impl RunConfig {
    /// Build run parameters from workspace configuration plus the key
    /// resolved by the caller
    pub fn from_config(config: &HubloomConfig, api_key: impl Into<String>) -> Self {
        Self {
            model: config.models.default.clone(),
            api_key: api_key.into(),
            max_tokens: config.models.max_tokens,
            max_attempts: config.pipeline.max_attempts,
        }
    }
}

/// Outcome of a completed run
///
/// A completed run always carries the assembled artifact; validation
/// issues and per-section drafting failures ride along rather than
/// failing the run.
#[derive(Debug, Clone)]
pub struct HubRunResult {
    /// The assembled hub
    pub artifact: HubArtifact,
    /// Integrity report for the assembled artifact
    pub report: ValidationReport,
    /// Sections abandoned after a declined retry, in blueprint order
    pub failed_sections: Vec<SectionFailure>,
}

impl HubRunResult {
    /// True when every planned section was drafted
    pub fn is_complete(&self) -> bool {
        self.failed_sections.is_empty()
    }
}

/// An approved plan: blueprint plus its resolved strategies
struct ApprovedPlan {
    blueprint: HubBlueprint,
    assembler: Assembler,
    persona: Persona,
}

/// The hub generation pipeline
pub struct Pipeline<'a, S, P, C>
where
    S: ArtifactStore,
    P: CompletionProvider,
    C: InteractionChannel,
{
    registry: &'a Registry<S>,
    provider: &'a P,
    channel: &'a C,
    config: RunConfig,
    state: State,
}

impl<'a, S, P, C> Pipeline<'a, S, P, C>
where
    S: ArtifactStore,
    P: CompletionProvider,
    C: InteractionChannel,
{
    pub fn new(registry: &'a Registry<S>, provider: &'a P, channel: &'a C, config: RunConfig) -> Self {
        Self {
            registry,
            provider,
            channel,
            config,
            state: State::Planning,
        }
    }

    /// Current pipeline state
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Run the full pipeline for one hub request
    pub async fn run(&mut self, request: &HubRequest) -> Result<HubRunResult> {
        let run_id = format!("run-{}", &Uuid::new_v4().to_string()[..8]);
        info!("[{}] Generating hub {} on {:?}", run_id, request.hub_id, request.topic);
        self.state = State::Planning;

        let plan = self.plan(request).await?;
        self.advance(Event::BlueprintApproved {
            sections: plan.blueprint.sections.len(),
        })?;

        let (drafts, failed_sections) = self.draft(request, &plan).await?;

        let artifact = self.assemble(request, &plan, drafts);
        self.advance(Event::Assembled)?;

        let report = check_artifact(
            &artifact.to_markdown(),
            &plan.persona.id,
            &request.language,
        );
        if !report.is_valid {
            warn!(
                "[{}] Artifact has {} validation issue(s)",
                run_id,
                report.issues.len()
            );
        }
        self.advance(Event::Validated)?;

        info!(
            "[{}] Done: {} section(s) drafted, {} failed",
            run_id,
            artifact.sections.len(),
            failed_sections.len()
        );
        Ok(HubRunResult {
            artifact,
            report,
            failed_sections,
        })
    }

    /// Planning loop: provider call, architect review, eligibility check
    ///
    /// Each rejected proposal (human feedback or structural defect)
    /// consumes one attempt from the budget.
    async fn plan(&mut self, request: &HubRequest) -> Result<ApprovedPlan> {
        let manifest = self.registry.manifest();
        let mut feedback: Vec<String> = Vec::new();

        for attempt in 1..=self.config.max_attempts {
            debug!("Planning attempt {} of {}", attempt, self.config.max_attempts);
            let prompt = build_architect_prompt(request, &manifest, &feedback);
            let output = self.complete(&prompt).await?;

            let blueprint = match HubBlueprint::from_architect_output(&output) {
                Ok(blueprint) => blueprint,
                Err(HubloomError::StructuralDefect(defect)) => {
                    warn!("Architect output rejected: {}", defect);
                    feedback.push(format!("The previous proposal was rejected: {}", defect));
                    continue;
                }
                Err(e) => return Err(e),
            };

            match self.review(Ask::Architect {
                blueprint: blueprint.clone(),
                defect: None,
            })
            .await?
            {
                Review::Feedback(text) => {
                    feedback.push(text);
                    continue;
                }
                Review::Proceed => {}
            }

            // Resolve the architect's selections; an unknown id is the
            // architect's structural defect, not a fatal lookup failure
            let (assembler, persona) =
                match self.resolve_selections(&blueprint) {
                    Ok(pair) => pair,
                    Err(defect) => {
                        self.reject_blueprint(&blueprint, defect, &mut feedback).await?;
                        continue;
                    }
                };

            let ineligible: Vec<&str> = blueprint
                .sections
                .iter()
                .filter(|s| !assembler.is_eligible(&s.writer_id))
                .map(|s| s.writer_id.as_str())
                .collect();
            if !ineligible.is_empty() {
                let defect = format!(
                    "Writers not eligible under assembler {}: {}",
                    assembler.id,
                    ineligible.join(", ")
                );
                self.reject_blueprint(&blueprint, defect, &mut feedback).await?;
                continue;
            }

            match self.review(Ask::Assembler {
                id: assembler.id.clone(),
                description: assembler.description.clone(),
            })
            .await?
            {
                Review::Feedback(text) => {
                    feedback.push(text);
                    continue;
                }
                Review::Proceed => {}
            }

            match self.review(Ask::Persona {
                id: persona.id.clone(),
                description: persona.description.clone(),
            })
            .await?
            {
                Review::Feedback(text) => {
                    feedback.push(text);
                    continue;
                }
                Review::Proceed => {}
            }

            info!(
                "Blueprint approved: \"{}\" with {} section(s)",
                blueprint.title,
                blueprint.sections.len()
            );
            return Ok(ApprovedPlan {
                blueprint,
                assembler,
                persona,
            });
        }

        Err(HubloomError::RetryBudgetExceeded(format!(
            "planning did not converge within {} attempt(s)",
            self.config.max_attempts
        )))
    }

    /// Resolve the blueprint's assembler and persona, mapping unknown ids
    /// to a defect description
    fn resolve_selections(
        &self,
        blueprint: &HubBlueprint,
    ) -> std::result::Result<(Assembler, Persona), String> {
        let assembler = self
            .registry
            .resolve_assembler(&blueprint.assembler_id)
            .map_err(|e| format!("Unknown assembler {}: {}", blueprint.assembler_id, e))?;
        let persona = self
            .registry
            .resolve_persona(&blueprint.persona_id)
            .map_err(|e| format!("Unknown persona {}: {}", blueprint.persona_id, e))?;
        Ok((assembler, persona))
    }

    /// Send a defective blueprint back through the architect ask
    async fn reject_blueprint(
        &self,
        blueprint: &HubBlueprint,
        defect: String,
        feedback: &mut Vec<String>,
    ) -> Result<()> {
        warn!("Structural defect: {}", defect);
        let review = self
            .review(Ask::Architect {
                blueprint: blueprint.clone(),
                defect: Some(defect.clone()),
            })
            .await?;
        if let Review::Feedback(text) = review {
            feedback.push(text);
        }
        feedback.push(format!("The previous proposal was rejected: {}", defect));
        Ok(())
    }

    /// Draft every section in blueprint order
    ///
    /// A provider failure becomes a retry ask; declining abandons only
    /// that section. No section is assembled before every prior section
    /// has completed or been explicitly marked failed.
    async fn draft(
        &mut self,
        request: &HubRequest,
        plan: &ApprovedPlan,
    ) -> Result<(Vec<SectionDraft>, Vec<SectionFailure>)> {
        let mut drafts = Vec::new();
        let mut failures = Vec::new();

        for section in &plan.blueprint.sections {
            let writer = self.registry.resolve_writer(&section.writer_id)?;
            let prompt =
                build_section_prompt(request, &plan.blueprint.title, section, &writer, &plan.persona);

            match self.complete(&prompt).await {
                Ok(body) => {
                    debug!("Drafted section \"{}\" ({} chars)", section.heading, body.len());
                    drafts.push(SectionDraft {
                        heading: section.heading.clone(),
                        writer_id: section.writer_id.clone(),
                        body,
                    });
                }
                Err(HubloomError::Provider(cause)) => {
                    warn!("Section \"{}\" abandoned: {}", section.heading, cause);
                    failures.push(SectionFailure {
                        heading: section.heading.clone(),
                        reason: cause,
                    });
                }
                Err(e) => return Err(e),
            }
            self.advance(Event::SectionClosed)?;
        }

        Ok((drafts, failures))
    }

    /// Concatenate drafts under frontmatter built from the approved plan
    fn assemble(
        &self,
        request: &HubRequest,
        plan: &ApprovedPlan,
        drafts: Vec<SectionDraft>,
    ) -> HubArtifact {
        // Writers actually used, deduplicated in first-use order
        let mut writer_ids: Vec<String> = Vec::new();
        for draft in &drafts {
            if !writer_ids.contains(&draft.writer_id) {
                writer_ids.push(draft.writer_id.clone());
            }
        }

        HubArtifact {
            frontmatter: ContentFrontmatter {
                id: request.hub_id.clone(),
                persona_id: plan.persona.id.clone(),
                language: request.language.clone(),
                writer_ids,
                model: self.config.model.clone(),
                description: request.goal.clone(),
            },
            title: plan.blueprint.title.clone(),
            sections: drafts,
            assembled_at: Utc::now(),
        }
    }

    /// Execute one provider call with the retry-ask loop
    ///
    /// Every failure is offered to the human; accepting retries the call,
    /// declining surfaces the provider error to the calling stage, and an
    /// exhausted budget fails the run.
    async fn complete(&self, prompt: &str) -> Result<String> {
        let options = CompletionOptions {
            api_key: self.config.api_key.clone(),
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
        };

        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.provider.execute(prompt, &options).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    warn!("Provider call failed (attempt {}): {}", attempts, e.cause);
                    if attempts >= self.config.max_attempts {
                        return Err(HubloomError::RetryBudgetExceeded(format!(
                            "provider failed {} time(s): {}",
                            attempts, e.cause
                        )));
                    }
                    let reply = self
                        .channel
                        .ask(Ask::Retry {
                            failure: e.cause.clone(),
                        })
                        .await?;
                    if !expect_retry(reply)? {
                        return Err(HubloomError::Provider(e.cause));
                    }
                }
            }
        }
    }

    /// Put a review ask to the channel and validate the reply shape
    async fn review(&self, ask: Ask) -> Result<Review> {
        let kind = ask.kind();
        debug!("Asking channel: {}", kind);
        let reply = self.channel.ask(ask).await?;
        expect_review(reply)
    }

    /// Advance the pipeline state machine, failing on an illegal move
    fn advance(&mut self, event: Event) -> Result<()> {
        let next = transition(self.state.clone(), event);
        if let State::Failed { error } = &next {
            return Err(HubloomError::Other(error.clone()));
        }
        debug!("Pipeline state: {:?}", next);
        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{Reply, ScriptedChannel};
    use hubloom_provider::ScriptedProvider;
    use hubloom_registry::MemoryStore;

    const BLUEPRINT: &str = r#"{
        "title": "Sourdough at Home",
        "assemblerId": "pillar",
        "personaId": "mentor",
        "sections": [
            {"heading": "Starters", "goal": "Explain starters", "writerId": "narrative"},
            {"heading": "Baking", "goal": "Walk through a bake", "writerId": "howto"}
        ]
    }"#;

    const INELIGIBLE_BLUEPRINT: &str = r#"{
        "title": "Sourdough at Home",
        "assemblerId": "faq",
        "personaId": "mentor",
        "sections": [
            {"heading": "Starters", "goal": "Explain starters", "writerId": "narrative"}
        ]
    }"#;

    fn registry() -> Registry<MemoryStore> {
        Registry::new(MemoryStore::new())
    }

    fn request() -> HubRequest {
        HubRequest::new("sourdough", "Sourdough baking")
            .with_goal("Teach home bakers")
            .with_audience("beginners")
    }

    fn proceed_all() -> ScriptedChannel {
        ScriptedChannel::new()
            .reply(Reply::Proceed)
            .reply(Reply::Proceed)
            .reply(Reply::Proceed)
    }

    #[tokio::test]
    async fn test_end_to_end_happy_path() {
        let registry = registry();
        let provider = ScriptedProvider::new()
            .respond(BLUEPRINT)
            .respond("Starters draft.")
            .respond("Baking draft.");
        let channel = proceed_all();
        let mut pipeline = Pipeline::new(&registry, &provider, &channel, RunConfig::default());

        let result = pipeline.run(&request()).await.unwrap();

        assert_eq!(*pipeline.state(), State::Done);
        assert!(result.is_complete());
        assert_eq!(result.artifact.sections.len(), 2);
        assert_eq!(result.artifact.sections[0].heading, "Starters");
        assert_eq!(result.artifact.sections[1].heading, "Baking");
        assert!(result.report.is_valid);
        assert!(!result
            .report
            .issues
            .iter()
            .any(|i| i.contains("Pending work marker")));
        // Exactly one ask per review stage, no retries
        assert_eq!(channel.asked(), vec!["architect", "assembler", "persona"]);
        assert_eq!(provider.remaining(), 0);
    }

    #[tokio::test]
    async fn test_artifact_frontmatter_reflects_plan() {
        let registry = registry();
        let provider = ScriptedProvider::new()
            .respond(BLUEPRINT)
            .respond("Starters draft.")
            .respond("Baking draft.");
        let channel = proceed_all();
        let mut pipeline = Pipeline::new(&registry, &provider, &channel, RunConfig::default());

        let result = pipeline.run(&request()).await.unwrap();
        let fm = &result.artifact.frontmatter;
        assert_eq!(fm.id, "sourdough");
        assert_eq!(fm.persona_id, "mentor");
        assert_eq!(fm.language, "English");
        assert_eq!(fm.writer_ids, vec!["narrative", "howto"]);
    }

    #[tokio::test]
    async fn test_architect_feedback_loops_planning() {
        let registry = registry();
        let provider = ScriptedProvider::new()
            .respond(BLUEPRINT)
            .respond(BLUEPRINT)
            .respond("Starters draft.")
            .respond("Baking draft.");
        let channel = ScriptedChannel::new()
            .reply(Reply::Feedback("use fewer sections".to_string()))
            .reply(Reply::Proceed)
            .reply(Reply::Proceed)
            .reply(Reply::Proceed);
        let mut pipeline = Pipeline::new(&registry, &provider, &channel, RunConfig::default());

        let result = pipeline.run(&request()).await.unwrap();
        assert!(result.is_complete());
        // Second planning prompt carries the feedback
        let prompts = provider.prompts();
        assert!(prompts[1].contains("use fewer sections"));
        assert_eq!(
            channel.asked(),
            vec!["architect", "architect", "assembler", "persona"]
        );
    }

    #[tokio::test]
    async fn test_ineligible_writer_reasks_architect_and_never_drafts() {
        let registry = registry();
        let provider = ScriptedProvider::new().respond(INELIGIBLE_BLUEPRINT);
        let channel = ScriptedChannel::new()
            .reply(Reply::Proceed)
            .reply(Reply::Feedback("pick an eligible writer".to_string()));
        let config = RunConfig {
            max_attempts: 1,
            ..RunConfig::default()
        };
        let mut pipeline = Pipeline::new(&registry, &provider, &channel, config);

        let result = pipeline.run(&request()).await;
        assert!(matches!(
            result,
            Err(HubloomError::RetryBudgetExceeded(_))
        ));
        // Re-asked architect with the defect; never reached drafting
        assert_eq!(channel.asked(), vec!["architect", "architect"]);
        assert_eq!(provider.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_blueprint_consumes_attempt_and_reprompts() {
        let registry = registry();
        let provider = ScriptedProvider::new()
            .respond("this is not json")
            .respond(BLUEPRINT)
            .respond("Starters draft.")
            .respond("Baking draft.");
        let channel = proceed_all();
        let mut pipeline = Pipeline::new(&registry, &provider, &channel, RunConfig::default());

        let result = pipeline.run(&request()).await.unwrap();
        assert!(result.is_complete());
        let prompts = provider.prompts();
        assert!(prompts[1].contains("rejected"));
    }

    #[tokio::test]
    async fn test_declined_retry_fails_only_that_section() {
        let registry = registry();
        let provider = ScriptedProvider::new()
            .respond(BLUEPRINT)
            .fail("rate limited")
            .respond("Baking draft.");
        let channel = ScriptedChannel::new()
            .reply(Reply::Proceed)
            .reply(Reply::Proceed)
            .reply(Reply::Proceed)
            .reply(Reply::Retry(false));
        let mut pipeline = Pipeline::new(&registry, &provider, &channel, RunConfig::default());

        let result = pipeline.run(&request()).await.unwrap();

        assert!(!result.is_complete());
        assert_eq!(result.failed_sections.len(), 1);
        assert_eq!(result.failed_sections[0].heading, "Starters");
        assert!(result.failed_sections[0].reason.contains("rate limited"));
        // The surviving draft keeps its original position
        assert_eq!(result.artifact.sections.len(), 1);
        assert_eq!(result.artifact.sections[0].heading, "Baking");
        assert_eq!(*pipeline.state(), State::Done);
    }

    #[tokio::test]
    async fn test_accepted_retry_recovers_the_section() {
        let registry = registry();
        let provider = ScriptedProvider::new()
            .respond(BLUEPRINT)
            .fail("transient")
            .respond("Starters draft.")
            .respond("Baking draft.");
        let channel = ScriptedChannel::new()
            .reply(Reply::Proceed)
            .reply(Reply::Proceed)
            .reply(Reply::Proceed)
            .reply(Reply::Retry(true));
        let mut pipeline = Pipeline::new(&registry, &provider, &channel, RunConfig::default());

        let result = pipeline.run(&request()).await.unwrap();
        assert!(result.is_complete());
        assert_eq!(result.artifact.sections.len(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_retry_budget_fails_the_run() {
        let registry = registry();
        let provider = ScriptedProvider::new()
            .respond(BLUEPRINT)
            .fail("down")
            .fail("still down");
        let channel = ScriptedChannel::new()
            .reply(Reply::Proceed)
            .reply(Reply::Proceed)
            .reply(Reply::Proceed)
            .reply(Reply::Retry(true));
        let config = RunConfig {
            max_attempts: 2,
            ..RunConfig::default()
        };
        let mut pipeline = Pipeline::new(&registry, &provider, &channel, config);

        let result = pipeline.run(&request()).await;
        assert!(matches!(
            result,
            Err(HubloomError::RetryBudgetExceeded(_))
        ));
    }

    #[tokio::test]
    async fn test_validation_issues_attach_without_failing() {
        let registry = registry();
        let provider = ScriptedProvider::new()
            .respond(BLUEPRINT)
            .respond("Starters draft with a TODO left in.")
            .respond("Baking draft.");
        let channel = proceed_all();
        let mut pipeline = Pipeline::new(&registry, &provider, &channel, RunConfig::default());

        let result = pipeline.run(&request()).await.unwrap();
        assert!(!result.report.is_valid);
        assert_eq!(result.report.issues.len(), 1);
        assert!(result.report.issues[0].contains("Pending work marker"));
        assert_eq!(*pipeline.state(), State::Done);
    }

    #[tokio::test]
    async fn test_planning_budget_exhaustion_on_repeated_feedback() {
        let registry = registry();
        let provider = ScriptedProvider::new().respond(BLUEPRINT).respond(BLUEPRINT);
        let channel = ScriptedChannel::new()
            .reply(Reply::Feedback("no".to_string()))
            .reply(Reply::Feedback("still no".to_string()));
        let config = RunConfig {
            max_attempts: 2,
            ..RunConfig::default()
        };
        let mut pipeline = Pipeline::new(&registry, &provider, &channel, config);

        let result = pipeline.run(&request()).await;
        assert!(matches!(
            result,
            Err(HubloomError::RetryBudgetExceeded(_))
        ));
    }
}
