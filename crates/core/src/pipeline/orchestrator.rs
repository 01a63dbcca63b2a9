//! # Orchestrator
//!
//! Coordinates the four pipeline phases over one generator, aggregates
//! token usage, streams progress events, and runs the bounded
//! quality-gated regeneration loop. Transport failures abort the run with
//! `success: false`; contract failures were already absorbed by the skills
//! and never reach this layer.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::catalog::Catalog;
use crate::content::LandingPage;
use crate::generator::{GeneratorError, HttpGenerator, TextGenerator, TokenUsage};
use crate::models::ModelConfig;
use crate::quality::{assess_quality, QualityReport};
use crate::skills::blueprint_skill::PageBlueprint;
use crate::skills::intent_skill::PageIntent;
use crate::skills::section_skill::GenerationContext;
use crate::skills::{BlueprintSkill, IntentSkill, SectionSkill};

use super::events::{PipelineEvent, PipelineEventKind};
use super::phase::{Pipeline, PipelinePhase};
use super::OrchestrationInput;

/// Configuration for the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Generator model configuration
    pub model: ModelConfig,
    /// Maximum regeneration rounds per run
    pub max_refinement_iterations: u32,
    /// Maximum sections regenerated per round
    pub max_sections_per_iteration: usize,
    /// Quality score at which refinement stops even with open warnings.
    /// Shipping at 70 is intentional: the floor bounds latency and cost,
    /// not correctness.
    pub quality_floor: u8,
    /// Whether the regeneration loop runs at all (callers can override per
    /// request via `Preferences::enable_refinement`)
    pub enable_refinement: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            max_refinement_iterations: 2,
            max_sections_per_iteration: 2,
            quality_floor: 70,
            enable_refinement: true,
        }
    }
}

/// Metadata echoed back with a successful run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub intent: PageIntent,
    pub blueprint: PageBlueprint,
    pub tokens_used: TokenUsage,
    pub generation_time_ms: u64,
    pub quality_score: u8,
}

/// Final pipeline output, returned once per top-level invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationResult {
    pub success: bool,
    pub page: Option<LandingPage>,
    pub metadata: Option<RunMetadata>,
    pub error: Option<String>,
    /// Full event log of the run
    pub events: Vec<PipelineEvent>,
}

/// The pipeline coordinator
pub struct Orchestrator {
    config: OrchestratorConfig,
    pipeline: Pipeline,
    catalog: &'static Catalog,
    generator: Arc<dyn TextGenerator>,
    events: Vec<PipelineEvent>,
    event_tx: Option<mpsc::Sender<PipelineEvent>>,
}

impl Orchestrator {
    /// Create an orchestrator backed by the HTTP generator for the
    /// configured model.
    pub fn new(config: OrchestratorConfig) -> Self {
        let generator = Arc::new(HttpGenerator::new(config.model.clone()));
        Self::with_generator(config, generator)
    }

    /// Create an orchestrator over any generator implementation.
    pub fn with_generator(config: OrchestratorConfig, generator: Arc<dyn TextGenerator>) -> Self {
        let max_rounds = config.max_refinement_iterations;
        Self {
            config,
            pipeline: Pipeline {
                max_rounds,
                ..Pipeline::default()
            },
            catalog: Catalog::builtin(),
            generator,
            events: Vec::new(),
            event_tx: None,
        }
    }

    /// Set event channel for streaming progress
    pub fn with_event_channel(mut self, tx: mpsc::Sender<PipelineEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Emit an event
    async fn emit(&mut self, event: PipelineEvent) {
        self.events.push(event.clone());
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event).await;
        }
    }

    /// Run the pipeline on one request.
    #[tracing::instrument(
        skip(self, input),
        fields(description_preview = %input.description.chars().take(50).collect::<String>())
    )]
    pub async fn run(&mut self, input: OrchestrationInput) -> OrchestrationResult {
        let started = Instant::now();
        match self.run_pipeline(&input, started).await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!("pipeline aborted: {}", err);
                self.pipeline.fail();
                self.emit(PipelineEvent::new(
                    PipelineEventKind::PipelineFailed,
                    PipelinePhase::Failed,
                    100,
                    format!("Generation failed: {}", err),
                ))
                .await;
                OrchestrationResult {
                    success: false,
                    page: None,
                    metadata: None,
                    error: Some(err.to_string()),
                    events: self.events.clone(),
                }
            }
        }
    }

    async fn run_pipeline(
        &mut self,
        input: &OrchestrationInput,
        started: Instant,
    ) -> Result<OrchestrationResult, GeneratorError> {
        let mut tokens = TokenUsage::default();

        self.emit(PipelineEvent::new(
            PipelineEventKind::PipelineStarted,
            PipelinePhase::Understanding,
            0,
            "Starting page generation",
        ))
        .await;

        // Phase 1: understanding
        self.emit(PipelineEvent::new(
            PipelineEventKind::PhaseStarted,
            PipelinePhase::Understanding,
            5,
            "Analyzing product description",
        ))
        .await;

        let (intent, usage) = IntentSkill::run(
            &input.description,
            input.wizard.as_ref(),
            self.generator.as_ref(),
        )
        .await?;
        tokens += usage;
        self.pipeline.advance();

        self.emit(PipelineEvent::new(
            PipelineEventKind::PhaseCompleted,
            PipelinePhase::Understanding,
            15,
            format!(
                "Understood: {} for {}",
                intent.product_type.as_str(),
                intent.target_audience
            ),
        ))
        .await;

        // Phase 2: planning
        self.emit(PipelineEvent::new(
            PipelineEventKind::PhaseStarted,
            PipelinePhase::Planning,
            20,
            "Planning page structure",
        ))
        .await;

        let (blueprint, usage) =
            BlueprintSkill::run(&intent, input, self.catalog, self.generator.as_ref()).await?;
        tokens += usage;
        self.pipeline.advance();

        self.emit(PipelineEvent::new(
            PipelineEventKind::PhaseCompleted,
            PipelinePhase::Planning,
            30,
            format!(
                "Planned {} sections with {}",
                blueprint.section_sequence.len(),
                blueprint.copy_framework.as_str()
            ),
        ))
        .await;

        // Phase 3: generating, one section at a time, threading the
        // previous-section summary through the generated prefix.
        let total = blueprint.section_sequence.len();
        let mut sections = Vec::with_capacity(total);
        for (index, plan) in blueprint.section_sequence.iter().enumerate() {
            let (section, usage) = {
                let ctx = GenerationContext::new(&blueprint, &intent, &sections, index);
                SectionSkill::generate(plan, &ctx, self.generator.as_ref()).await?
            };
            tokens += usage;
            sections.push(section);

            let progress = (30 + (index + 1) * 50 / total.max(1)) as u8;
            self.emit(
                PipelineEvent::new(
                    PipelineEventKind::SectionCompleted,
                    PipelinePhase::Generating,
                    progress,
                    format!("Generated {} ({} of {})", plan.kind.as_str(), index + 1, total),
                )
                .with_section(index + 1, total),
            )
            .await;
        }
        self.pipeline.advance();

        // Phase 4: validating, with the bounded regeneration loop inside.
        self.emit(PipelineEvent::new(
            PipelineEventKind::PhaseStarted,
            PipelinePhase::Validating,
            85,
            "Running quality checks",
        ))
        .await;

        let mut page = assemble_page(input, &intent, &blueprint, sections);
        let refine = input
            .preferences
            .as_ref()
            .and_then(|p| p.enable_refinement)
            .unwrap_or(self.config.enable_refinement);
        let report = self
            .refine_page(&mut page, &intent, &blueprint, &mut tokens, refine)
            .await;
        self.pipeline.advance();

        self.emit(PipelineEvent::new(
            PipelineEventKind::PhaseCompleted,
            PipelinePhase::Validating,
            95,
            format!("Quality score: {}", report.score),
        ))
        .await;

        self.emit(PipelineEvent::new(
            PipelineEventKind::PipelineCompleted,
            PipelinePhase::Complete,
            100,
            "Page ready",
        ))
        .await;

        Ok(OrchestrationResult {
            success: true,
            page: Some(page),
            metadata: Some(RunMetadata {
                intent,
                blueprint,
                tokens_used: tokens,
                generation_time_ms: started.elapsed().as_millis() as u64,
                quality_score: report.score,
            }),
            error: None,
            events: self.events.clone(),
        })
    }

    /// The regeneration loop. Each round re-validates, collects the first
    /// few error-bearing sections, and regenerates them in place with the
    /// original plan and a context rebuilt from the sections before them.
    /// Regeneration failures keep the previous content; they never abort
    /// the run.
    async fn refine_page(
        &mut self,
        page: &mut LandingPage,
        intent: &PageIntent,
        blueprint: &PageBlueprint,
        tokens: &mut TokenUsage,
        refine: bool,
    ) -> QualityReport {
        let mut report = assess_quality(page, blueprint);
        if !refine {
            return report;
        }

        loop {
            if report.passes_validation || report.score >= self.config.quality_floor {
                break;
            }
            let candidates: Vec<String> = report
                .sections_with_errors()
                .into_iter()
                .take(self.config.max_sections_per_iteration)
                .collect();
            if candidates.is_empty() {
                break;
            }
            if !self.pipeline.begin_regeneration() {
                break;
            }

            self.emit(PipelineEvent::new(
                PipelineEventKind::RegenerationStarted,
                PipelinePhase::Regenerating,
                90,
                format!(
                    "Regenerating {} section(s), round {}",
                    candidates.len(),
                    self.pipeline.regeneration_rounds
                ),
            ))
            .await;

            for id in candidates {
                let Some(index) = page.sections.iter().position(|s| s.id == id) else {
                    continue;
                };
                let Some(plan) = blueprint.section_sequence.get(index) else {
                    continue;
                };

                let result = {
                    let ctx =
                        GenerationContext::new(blueprint, intent, &page.sections[..index], index);
                    SectionSkill::regenerate(&id, plan, &ctx, self.generator.as_ref()).await
                };
                match result {
                    Ok((section, usage)) => {
                        *tokens += usage;
                        page.sections[index] = section;
                        self.emit(
                            PipelineEvent::new(
                                PipelineEventKind::SectionRegenerated,
                                PipelinePhase::Regenerating,
                                92,
                                format!("Regenerated {} section", plan.kind.as_str()),
                            )
                            .with_section(index + 1, page.sections.len()),
                        )
                        .await;
                    }
                    Err(err) => {
                        tracing::warn!(
                            section_id = %id,
                            "regeneration failed, keeping previous content: {}",
                            err
                        );
                    }
                }
            }

            self.pipeline.advance();
            report = assess_quality(page, blueprint);
        }

        report
    }
}

/// Fold the generated sections into the persisted page shape.
fn assemble_page(
    input: &OrchestrationInput,
    intent: &PageIntent,
    blueprint: &PageBlueprint,
    sections: Vec<crate::content::PageSection>,
) -> LandingPage {
    let title = input
        .wizard
        .as_ref()
        .and_then(|w| w.business_name.clone())
        .unwrap_or_else(|| intent.primary_value_prop.clone());

    let animation_preset = {
        use crate::catalog::variants::Tier;
        let tiers: Vec<Tier> = blueprint.section_sequence.iter().map(|p| p.tier).collect();
        if tiers.contains(&Tier::Advanced) {
            "dynamic"
        } else if tiers.contains(&Tier::Premium) {
            "elevated"
        } else {
            "subtle"
        }
    };

    LandingPage {
        title,
        description: intent.primary_value_prop.clone(),
        sections,
        color_scheme: blueprint.color_strategy.clone(),
        typography: blueprint.typography.clone(),
        smooth_scroll: true,
        animation_preset: animation_preset.to_string(),
        content_width: "contained".to_string(),
    }
}
