use architext_core::rules::DIAGRAM_RULES;
use architext_core::{
    BoilerplateRequest, CostRequest, DeploymentRequest, DesignRequest, TradeoffRequest,
};

use crate::engine::OutputSchema;

/// Output contract shared by every task: one JSON object matching `schema`.
pub fn system_prompt(schema: &OutputSchema) -> String {
    let pretty = serde_json::to_string_pretty(&schema.schema).unwrap_or_default();
    format!(
        "You are ArchiText, a Generative AI agent that produces software architecture artifacts.\n\n\
Respond with ONLY a single JSON object named \"{}\" that conforms to the JSON schema below. \
Do not wrap it in code fences and do not add commentary before or after it. \
Every required field must be present. Numbers must be plain JSON numbers without currency \
symbols or thousands separators.\n\n\
## Output schema\n{}",
        schema.name, pretty
    )
}

pub fn render_design(req: &DesignRequest) -> String {
    let mut out = String::with_capacity(2048 + req.requirements.len());
    out.push_str(
        "You are an expert system architect and a Generative AI agent called ArchiText. \
Your task is to analyze user requirements and propose a production-ready system architecture.\n\n\
Based on the system requirements below, produce:\n\
1. `diagramDescription`: a Mermaid flowchart of the architecture that follows the diagram rules.\n\
2. `components`: the core components, each with its type, purpose, and suggested technology. \
Every component must appear as a node in the diagram, in the same order.\n\
3. `rationale`: a clear explanation of your design choices and the trade-offs you accepted.\n\n",
    );
    out.push_str("## Diagram rules\n");
    out.push_str(DIAGRAM_RULES);
    out.push_str("\n\nSystem Requirements:\n");
    out.push_str(&req.requirements);
    out.push_str(
        "\n\nThink step-by-step to cover all aspects of a production-ready system: \
authentication, data storage, asynchronous work, observability, and scaling.",
    );
    out
}

pub fn render_tradeoffs(req: &TradeoffRequest) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(
        "You are an expert system architect and analyst. Your task is to provide a comprehensive \
trade-off analysis for specific architectural choices within a given system architecture.\n\n\
1. Produce exactly one entry in `analysisResults` per architectural choice, in the order listed.\n\
2. Copy each choice verbatim into `choice`.\n\
3. List its concrete `benefits` and `drawbacks` in the context of this architecture.\n\n",
    );
    out.push_str("Proposed System Architecture Description:\n");
    out.push_str(&req.architecture_description);
    out.push_str("\n\nArchitectural Choices to Analyze:\n");
    for choice in &req.architectural_choices {
        out.push_str("- ");
        out.push_str(choice);
        out.push('\n');
    }
    out
}

pub fn render_cost(req: &CostRequest) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(
        "You are an expert in cloud architecture and cost estimation. Your task is to estimate \
the monthly cloud costs for a given system architecture based on its components and projected \
resource usage.\n\n\
1. Provide one `costBreakdown` entry per component, in the order listed, using the component \
name verbatim as `componentName`.\n\
2. Set `totalMonthlyCostUSD` to the sum of the component estimates.\n\
3. Assume standard list pricing for the specified regions. These are estimates and actual costs \
may vary.\n\
4. If a specification is missing or unclear, make a reasonable default assumption and state it \
in that component's `details`.\n\
5. Put general assumptions (support plans, egress, reservations) in `assumptions`.\n\n",
    );
    out.push_str("Architecture Description:\n");
    out.push_str(&req.architecture_description);
    out.push_str("\n\nArchitectural Components:\n");
    for c in &req.components {
        let specs = c
            .specifications
            .as_ref()
            .map(|s| s.to_compact_json())
            .unwrap_or_else(|| "{}".to_string());
        out.push_str(&format!(
            "- Name: {}\n  Service Type: {}\n  Region: {}\n  Specifications: {}\n",
            c.name, c.service_type, c.region, specs
        ));
    }
    out
}

pub fn render_deployment(req: &DeploymentRequest) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(
        "You are an expert Cloud Architect. Your task is to provide a comprehensive, step-by-step \
guide for deploying a specific system architecture to the cloud.\n\n\
1. Summarize the deployment strategy in `summary`.\n\
2. List `steps` in the order they must be performed, starting with resource groups and identity, \
then each of the services identified.\n\
3. Where possible, give a sample CLI command for a step in `command`; omit it otherwise.\n\n",
    );
    out.push_str("Architecture:\n");
    out.push_str(&req.architecture_description);
    out.push_str("\n\nComponents:\n");
    for c in &req.components {
        out.push_str(&format!("- {} ({}) using {}\n", c.name, c.kind, c.technology));
    }
    out
}

pub fn render_boilerplate(req: &BoilerplateRequest) -> String {
    let mut out = String::with_capacity(2048);
    out.push_str(
        "You are an expert software architect and developer specializing in Dockerized \
boilerplate code for new system architectures. Provide well-structured, clean, \
ready-to-develop code for the architecture below.\n\n\
Generate, in `dockerizedBoilerplateCode`:\n\
1. Boilerplate code for each core service: basic file structure and placeholder code in the \
languages and frameworks the architecture names.\n\
2. A Dockerfile for each service.\n\
3. A docker-compose.yml at the project root that runs all services together, including any \
databases or message queues.\n\n\
Formatting rules:\n\
- Every file goes in its own fenced markdown code block tagged with its language \
(e.g. ```python, ```dockerfile, ```yaml).\n\
- Put the full file path on its own line directly before each block, in backticks \
(e.g. `gateway/app.py`, `gateway/Dockerfile`, `docker-compose.yml`).\n\
- Never combine two files in one block and never leave a block without a path.\n\
- Use consistent service names across code, Dockerfiles and docker-compose.yml.\n\n",
    );
    out.push_str("Architecture Description:\n");
    out.push_str(&req.architecture_description);
    out
}
