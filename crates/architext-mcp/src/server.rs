use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, OnceCell};

use architext_core::rules::DIAGRAM_RULES;
use architext_core::{ArchitectureStore, BoilerplateResult, DesignRequest, SavedArchitecture};
use architext_generate::derive::{self, DEFAULT_REGION};
use architext_generate::{split_files, GenerateError, GeneratedFile, Generator, ModelInvoker};

// --- Request types ---

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[schemars(crate = "rmcp::schemars")]
struct GenerateDesignRequest {
    /// Natural language system requirements and design constraints: scale, user types, core features.
    requirements: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[schemars(crate = "rmcp::schemars")]
struct DesignIdRequest {
    /// ID of a saved design (see list_designs)
    id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[schemars(crate = "rmcp::schemars")]
struct EstimateCostRequest {
    /// ID of a saved design (see list_designs)
    id: String,
    /// Cloud region to price in. Default: "East US".
    region: Option<String>,
}

/// Follow-up analyses for a design, keyed per tool and variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct AnalysisKey {
    design_id: String,
    tool: &'static str,
    variant: String,
}

impl AnalysisKey {
    fn new(design_id: &str, tool: &'static str) -> Self {
        Self {
            design_id: design_id.to_string(),
            tool,
            variant: String::new(),
        }
    }

    fn with_variant(mut self, variant: &str) -> Self {
        self.variant = variant.to_string();
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BoilerplateView {
    #[serde(flatten)]
    result: BoilerplateResult,
    files: Vec<GeneratedFile>,
}

#[derive(Clone)]
pub struct ArchitextServer {
    generator: Generator<Arc<dyn ModelInvoker>>,
    store: Arc<dyn ArchitectureStore>,
    analyses: Arc<Mutex<HashMap<AnalysisKey, Arc<OnceCell<String>>>>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ArchitextServer {
    pub fn new(model: Arc<dyn ModelInvoker>, store: Arc<dyn ArchitectureStore>) -> Self {
        Self {
            generator: Generator::new(model),
            store,
            analyses: Arc::new(Mutex::new(HashMap::new())),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Generate a new system architecture from natural language requirements. Returns the saved design as JSON: {id, requirements, createdAt, diagramDescription (Mermaid), components: [{name, type, purpose, technology}], rationale}. The design is saved to history; use its id with the analysis tools."
    )]
    async fn generate_design(
        &self,
        Parameters(req): Parameters<GenerateDesignRequest>,
    ) -> Result<CallToolResult, McpError> {
        let request = DesignRequest {
            requirements: req.requirements,
        };
        let design = match self.generator.generate_design(&request).await {
            Ok(design) => design,
            Err(e) => return tool_error(e.to_string()),
        };

        let saved = SavedArchitecture::new(request.requirements, design);
        if let Err(e) = self.store.save(&saved) {
            tracing::warn!(id = %saved.id, error = %e, "failed to save design");
            return tool_error(format!("Design generated but could not be saved: {}", e));
        }
        tracing::info!(id = %saved.id, components = saved.design.components.len(), "saved design");
        ok_json(&saved)
    }

    #[tool(description = "List saved designs, most recent first: one line per design with id, creation time and the first line of its requirements")]
    fn list_designs(&self) -> Result<CallToolResult, McpError> {
        let designs = self.store.list_all();
        let text = if designs.is_empty() {
            "No saved designs. Use generate_design to create one.".to_string()
        } else {
            designs
                .iter()
                .map(|d| {
                    format!(
                        "{}  {}  {}",
                        d.id,
                        d.created_at.format("%Y-%m-%d %H:%M"),
                        d.title()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Get the full JSON content of a saved design")]
    fn get_design(
        &self,
        Parameters(req): Parameters<DesignIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self.store.get_by_id(&req.id) {
            Some(design) => ok_json(&design),
            None => not_found(&req.id),
        }
    }

    #[tool(
        description = "Trade-off analysis of a saved design: benefits and drawbacks for each of its components, in component order. Results are cached per design."
    )]
    async fn analyze_tradeoffs(
        &self,
        Parameters(req): Parameters<DesignIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        let Some(saved) = self.store.get_by_id(&req.id) else {
            return not_found(&req.id);
        };
        let request = derive::tradeoff_request(&saved.design);
        self.cached(
            AnalysisKey::new(&saved.id, "tradeoffs"),
            self.generator.analyze_tradeoffs(&request),
        )
        .await
    }

    #[tool(
        description = "Estimate the monthly cloud cost of a saved design in USD, per component and in total. Results are cached per design and region."
    )]
    async fn estimate_cost(
        &self,
        Parameters(req): Parameters<EstimateCostRequest>,
    ) -> Result<CallToolResult, McpError> {
        let Some(saved) = self.store.get_by_id(&req.id) else {
            return not_found(&req.id);
        };
        let region = req
            .region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_REGION);
        let request = derive::cost_request(&saved.design, region);
        self.cached(
            AnalysisKey::new(&saved.id, "cost").with_variant(region),
            self.generator.estimate_cost(&request),
        )
        .await
    }

    #[tool(
        description = "Step-by-step deployment guide for a saved design, with sample CLI commands where possible. Results are cached per design."
    )]
    async fn deployment_guide(
        &self,
        Parameters(req): Parameters<DesignIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        let Some(saved) = self.store.get_by_id(&req.id) else {
            return not_found(&req.id);
        };
        let request = derive::deployment_request(&saved.design);
        self.cached(
            AnalysisKey::new(&saved.id, "deployment"),
            self.generator.deployment_guide(&request),
        )
        .await
    }

    #[tool(
        description = "Generate Dockerized boilerplate for a saved design. Returns {dockerizedBoilerplateCode (markdown, one fenced block per file), files: [{path, language, contents}]}. Results are cached per design."
    )]
    async fn generate_boilerplate(
        &self,
        Parameters(req): Parameters<DesignIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        let Some(saved) = self.store.get_by_id(&req.id) else {
            return not_found(&req.id);
        };
        let request = derive::boilerplate_request(&saved.design);
        let run = async {
            let result = self.generator.generate_boilerplate(&request).await?;
            Ok(BoilerplateView {
                files: split_files(&result.dockerized_boilerplate_code),
                result,
            })
        };
        self.cached(AnalysisKey::new(&saved.id, "boilerplate"), run)
            .await
    }

    #[tool(description = "Get the Mermaid rules generated architecture diagrams follow")]
    fn get_diagram_rules(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(DIAGRAM_RULES)]))
    }
}

impl ArchitextServer {
    /// Return the cached analysis for `key`, or run it and cache the JSON.
    /// Concurrent calls for one key share a single run. Failures are not
    /// cached, so a later call retries.
    async fn cached<T: Serialize>(
        &self,
        key: AnalysisKey,
        run: impl Future<Output = Result<T, GenerateError>>,
    ) -> Result<CallToolResult, McpError> {
        let cell = self.analyses.lock().await.entry(key.clone()).or_default().clone();
        if let Some(json) = cell.get() {
            tracing::debug!(design = %key.design_id, tool = key.tool, "analysis cache hit");
            return Ok(CallToolResult::success(vec![Content::text(json.clone())]));
        }

        let outcome = cell
            .get_or_try_init(move || async move {
                let result = run.await.map_err(|e| e.to_string())?;
                serde_json::to_string_pretty(&result)
                    .map_err(|e| format!("Serialization error: {}", e))
            })
            .await;
        match outcome {
            Ok(json) => Ok(CallToolResult::success(vec![Content::text(json.clone())])),
            Err(message) => tool_error(message),
        }
    }
}

#[tool_handler]
impl ServerHandler for ArchitextServer {
    fn get_info(&self) -> ServerInfo {
        let instructions = format!("{}\n\n## Diagram Rules\n{}", INSTRUCTIONS, DIAGRAM_RULES);
        ServerInfo {
            instructions: Some(instructions.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// --- Helpers ---

fn ok_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    match serde_json::to_string_pretty(value) {
        Ok(json) => Ok(CallToolResult::success(vec![Content::text(json)])),
        Err(e) => tool_error(format!("Serialization error: {}", e)),
    }
}

fn tool_error(message: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(message.into())]))
}

fn not_found(id: &str) -> Result<CallToolResult, McpError> {
    tool_error(format!(
        "No saved design with id '{}'. Use list_designs to see available ids.",
        id
    ))
}

const INSTRUCTIONS: &str = r#"ArchiText turns natural-language system requirements into architecture artifacts.

## Workflow
1. `generate_design` with the user's requirements. Be specific about scale, user types and core features. The design is saved and gets a short id.
2. Use the id with the follow-up tools, in any order or in parallel:
   - `analyze_tradeoffs`: benefits and drawbacks per component
   - `estimate_cost`: monthly cost per component and in total (optional `region`)
   - `deployment_guide`: ordered deployment steps with sample CLI commands
   - `generate_boilerplate`: Dockerized starter code, one file per fenced block
3. `list_designs` and `get_design` browse earlier designs.

## Notes
- `diagramDescription` is Mermaid flowchart source. Render it as-is; do not rewrite it.
- Every tool makes at most one model call. On failure, call it again to retry.
- Follow-up results are cached per design, so repeated calls are cheap.
- Cost figures are estimates based on list pricing, not quotes."#;
