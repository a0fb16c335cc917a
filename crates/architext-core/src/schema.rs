//! Request and result contracts for the five generation tasks.
//!
//! Field doc comments end up in the generated JSON schema and are read by the
//! model as instructions, so they describe what to produce rather than how
//! the code uses the field.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Checker, Component, Specifications, Validate};

// --- Architecture design ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DesignRequest {
    /// Natural language system requirements and design constraints.
    pub requirements: String,
}

impl Validate for DesignRequest {
    fn check(&self, c: &mut Checker) {
        c.text("requirements", &self.requirements);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DesignResult {
    /// A Mermaid flowchart definition of the proposed architecture (starting with
    /// `graph TD` or `flowchart TD`), without surrounding code fences.
    pub diagram_description: String,
    /// A list of selected architectural components with their details.
    pub components: Vec<Component>,
    /// An explanation of the design choices and why this architecture was proposed.
    pub rationale: String,
}

impl Validate for DesignResult {
    fn check(&self, c: &mut Checker) {
        c.text("diagramDescription", &self.diagram_description);
        c.non_empty("components", &self.components);
        c.each("components", &self.components);
        c.text("rationale", &self.rationale);
    }
}

// --- Trade-off analysis ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TradeoffRequest {
    /// A detailed description of the proposed system architecture.
    pub architecture_description: String,
    /// A list of key architectural choices within the proposed architecture to analyze.
    pub architectural_choices: Vec<String>,
}

impl Validate for TradeoffRequest {
    fn check(&self, c: &mut Checker) {
        c.text("architectureDescription", &self.architecture_description);
        c.texts("architecturalChoices", &self.architectural_choices);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TradeoffAnalysis {
    /// The architectural choice being analyzed.
    pub choice: String,
    /// A list of benefits for this architectural choice.
    pub benefits: Vec<String>,
    /// A list of drawbacks or disadvantages for this architectural choice.
    pub drawbacks: Vec<String>,
}

impl Validate for TradeoffAnalysis {
    fn check(&self, c: &mut Checker) {
        c.text("choice", &self.choice);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TradeoffResult {
    /// A comprehensive list of trade-off analyses, one per architectural choice.
    pub analysis_results: Vec<TradeoffAnalysis>,
}

impl Validate for TradeoffResult {
    fn check(&self, c: &mut Checker) {
        c.non_empty("analysisResults", &self.analysis_results);
        c.each("analysisResults", &self.analysis_results);
    }
}

// --- Cost estimation ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CostComponent {
    /// The name of the architectural component (e.g., "Web App", "Database").
    pub name: String,
    /// The cloud service type (e.g., "Azure App Service", "Azure SQL Database", "Azure Functions").
    pub service_type: String,
    /// The region where the component is deployed (e.g., "East US 2", "West Europe").
    pub region: String,
    /// Detailed specifications and projected usage for the component, e.g.
    /// { "sku": "P1v2", "instanceCount": 2, "estimatedRequestsPerMonth": 100000 }.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Specifications>,
}

impl Validate for CostComponent {
    fn check(&self, c: &mut Checker) {
        c.text("name", &self.name);
        c.text("serviceType", &self.service_type);
        c.text("region", &self.region);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CostRequest {
    /// A high-level description of the system architecture.
    pub architecture_description: String,
    /// Architectural components with their service types, regions, and specifications/usage.
    pub components: Vec<CostComponent>,
}

impl Validate for CostRequest {
    fn check(&self, c: &mut Checker) {
        c.text("architectureDescription", &self.architecture_description);
        c.non_empty("components", &self.components);
        c.each("components", &self.components);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CostLine {
    /// The name of the architectural component.
    pub component_name: String,
    /// The cloud service type of the component.
    pub service_type: String,
    /// The estimated monthly cost in USD for this specific component.
    #[serde(rename = "estimatedMonthlyCostUSD")]
    pub estimated_monthly_cost_usd: f64,
    /// How the cost was estimated for this component, including key factors and assumptions.
    pub details: String,
}

impl Validate for CostLine {
    fn check(&self, c: &mut Checker) {
        c.text("componentName", &self.component_name);
        c.amount("estimatedMonthlyCostUSD", self.estimated_monthly_cost_usd);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CostResult {
    /// The estimated total monthly cost in USD for the entire architecture.
    #[serde(rename = "totalMonthlyCostUSD")]
    pub total_monthly_cost_usd: f64,
    /// A breakdown of the estimated monthly cost for each architectural component.
    pub cost_breakdown: Vec<CostLine>,
    /// General assumptions made during the estimation (e.g., no premium support, standard egress rates).
    pub assumptions: String,
}

impl Validate for CostResult {
    fn check(&self, c: &mut Checker) {
        c.amount("totalMonthlyCostUSD", self.total_monthly_cost_usd);
        c.each("costBreakdown", &self.cost_breakdown);
    }
}

// --- Deployment guide ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentComponent {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub technology: String,
}

impl Validate for DeploymentComponent {
    fn check(&self, c: &mut Checker) {
        c.text("name", &self.name);
        c.text("type", &self.kind);
        c.text("technology", &self.technology);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRequest {
    /// The description of the system architecture.
    pub architecture_description: String,
    /// List of architectural components.
    pub components: Vec<DeploymentComponent>,
}

impl Validate for DeploymentRequest {
    fn check(&self, c: &mut Checker) {
        c.text("architectureDescription", &self.architecture_description);
        c.non_empty("components", &self.components);
        c.each("components", &self.components);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStep {
    /// The title of the deployment step.
    pub title: String,
    /// A detailed explanation of the actions to take.
    pub description: String,
    /// An optional CLI command to execute for this step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl Validate for DeploymentStep {
    fn check(&self, c: &mut Checker) {
        c.text("title", &self.title);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResult {
    /// A high-level summary of the deployment strategy.
    pub summary: String,
    /// Step-by-step deployment instructions, in the order they must be performed.
    pub steps: Vec<DeploymentStep>,
}

impl Validate for DeploymentResult {
    fn check(&self, c: &mut Checker) {
        c.text("summary", &self.summary);
        c.non_empty("steps", &self.steps);
        c.each("steps", &self.steps);
    }
}

// --- Boilerplate code ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoilerplateRequest {
    /// A detailed description of the system architecture: core services, their
    /// functionality, languages or frameworks per service, and notable
    /// dependencies or interactions between them.
    pub architecture_description: String,
}

impl Validate for BoilerplateRequest {
    fn check(&self, c: &mut Checker) {
        c.text("architectureDescription", &self.architecture_description);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoilerplateResult {
    /// The complete Dockerized boilerplate as markdown: one fenced code block per
    /// file, each preceded by a header line naming the file path
    /// (e.g. `gateway/Dockerfile`), plus a docker-compose.yml.
    pub dockerized_boilerplate_code: String,
}

impl Validate for BoilerplateResult {
    fn check(&self, c: &mut Checker) {
        c.text("dockerizedBoilerplateCode", &self.dockerized_boilerplate_code);
    }
}
