use std::time::Instant;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use architext_core::{
    BoilerplateRequest, BoilerplateResult, CostRequest, CostResult, DeploymentRequest,
    DeploymentResult, DesignRequest, DesignResult, TradeoffRequest, TradeoffResult, Validate,
};

use crate::engine::{ModelInvoker, OutputSchema};
use crate::error::{GenerateError, Result};
use crate::{parse, prompt};

/// One request/response operation against the model: a request type, a result
/// type whose JSON schema is sent along, and the template that renders the prompt.
pub trait GenerationTask {
    type Request: Validate + Send + Sync;
    type Result: DeserializeOwned + JsonSchema + Validate + Send;

    /// Schema name; also used in logs and errors.
    const NAME: &'static str;

    fn render(request: &Self::Request) -> String;

    fn output_schema() -> OutputSchema {
        OutputSchema::of::<Self::Result>(Self::NAME)
    }
}

pub struct DesignGeneration;
pub struct TradeoffAnalysis;
pub struct CostEstimation;
pub struct DeploymentGuide;
pub struct BoilerplateGeneration;

impl GenerationTask for DesignGeneration {
    type Request = DesignRequest;
    type Result = DesignResult;
    const NAME: &'static str = "architecture_design";

    fn render(request: &DesignRequest) -> String {
        prompt::render_design(request)
    }
}

impl GenerationTask for TradeoffAnalysis {
    type Request = TradeoffRequest;
    type Result = TradeoffResult;
    const NAME: &'static str = "tradeoff_analysis";

    fn render(request: &TradeoffRequest) -> String {
        prompt::render_tradeoffs(request)
    }
}

impl GenerationTask for CostEstimation {
    type Request = CostRequest;
    type Result = CostResult;
    const NAME: &'static str = "cost_estimation";

    fn render(request: &CostRequest) -> String {
        prompt::render_cost(request)
    }
}

impl GenerationTask for DeploymentGuide {
    type Request = DeploymentRequest;
    type Result = DeploymentResult;
    const NAME: &'static str = "deployment_guide";

    fn render(request: &DeploymentRequest) -> String {
        prompt::render_deployment(request)
    }
}

impl GenerationTask for BoilerplateGeneration {
    type Request = BoilerplateRequest;
    type Result = BoilerplateResult;
    const NAME: &'static str = "boilerplate_code";

    fn render(request: &BoilerplateRequest) -> String {
        prompt::render_boilerplate(request)
    }
}

/// Runs generation tasks against a model. Holds no state besides the model
/// handle, so concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct Generator<M> {
    model: M,
}

impl<M: ModelInvoker> Generator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Validate, render, invoke once, and validate the result.
    pub async fn execute<T: GenerationTask>(&self, request: &T::Request) -> Result<T::Result> {
        if let Err(source) = request.validate() {
            tracing::warn!(task = T::NAME, error = %source, "rejected request");
            return Err(GenerateError::InvalidInput {
                task: T::NAME,
                source,
            });
        }

        let schema = T::output_schema();
        let system = prompt::system_prompt(&schema);
        let user_msg = T::render(request);

        tracing::info!(
            task = T::NAME,
            model = %self.model.describe(),
            prompt_len = user_msg.len(),
            "sending generation request"
        );
        let started = Instant::now();

        let decoded = match self.model.invoke(&schema, &system, &user_msg).await {
            Ok(raw) => {
                tracing::debug!(task = T::NAME, "raw LLM output:\n{}", raw);
                parse::decode::<T::Result>(&raw, &schema.schema)
            }
            Err(e) => Err(e),
        };

        match decoded {
            Ok(result) => {
                tracing::info!(
                    task = T::NAME,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "generation complete"
                );
                Ok(result)
            }
            Err(source) => {
                tracing::warn!(task = T::NAME, error = %source, "generation failed");
                Err(GenerateError::ModelInvocation {
                    task: T::NAME,
                    source,
                })
            }
        }
    }

    pub async fn generate_design(&self, request: &DesignRequest) -> Result<DesignResult> {
        self.execute::<DesignGeneration>(request).await
    }

    pub async fn analyze_tradeoffs(&self, request: &TradeoffRequest) -> Result<TradeoffResult> {
        self.execute::<TradeoffAnalysis>(request).await
    }

    pub async fn estimate_cost(&self, request: &CostRequest) -> Result<CostResult> {
        self.execute::<CostEstimation>(request).await
    }

    pub async fn deployment_guide(&self, request: &DeploymentRequest) -> Result<DeploymentResult> {
        self.execute::<DeploymentGuide>(request).await
    }

    pub async fn generate_boilerplate(
        &self,
        request: &BoilerplateRequest,
    ) -> Result<BoilerplateResult> {
        self.execute::<BoilerplateGeneration>(request).await
    }
}
