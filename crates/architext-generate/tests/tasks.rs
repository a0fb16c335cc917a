use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use architext_core::{
    BoilerplateRequest, CostComponent, CostRequest, DeploymentComponent, DeploymentRequest,
    DesignRequest, Specifications, TradeoffRequest,
};
use architext_generate::{
    prompt, split_files, GenerateError, GenerationTask, Generator, InvokeError, ModelInvoker,
    OutputSchema, TradeoffAnalysis,
};

#[derive(Debug, Clone)]
struct Call {
    schema: &'static str,
    system: String,
    prompt: String,
}

/// Replays canned replies in order and records every invocation.
#[derive(Default)]
struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, InvokeError>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedModel {
    fn replying(replies: Vec<Result<String, InvokeError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelInvoker for ScriptedModel {
    async fn invoke(
        &self,
        schema: &OutputSchema,
        system: &str,
        prompt: &str,
    ) -> Result<String, InvokeError> {
        self.calls.lock().unwrap().push(Call {
            schema: schema.name,
            system: system.to_string(),
            prompt: prompt.to_string(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(InvokeError::EmptyResponse))
    }
}

const CHAT_DESIGN: &str = r#"{
  "diagramDescription": "graph TD\n  user((User)) --> web[Web Client]\n  web -- WebSocket --> gw[Chat Gateway]\n  gw --> db[(PostgreSQL)]",
  "components": [
    {"name": "Web Client", "type": "Frontend", "purpose": "Chat UI", "technology": "React"},
    {"name": "Chat Gateway", "type": "Backend Service", "purpose": "Fans out messages", "technology": "Node.js"},
    {"name": "Message Store", "type": "Database", "purpose": "Persists history", "technology": "PostgreSQL"}
  ],
  "rationale": "1000 concurrent users fit comfortably on a single gateway with a relational store."
}"#;

#[tokio::test]
async fn test_chat_app_design_scenario() {
    let model = ScriptedModel::replying(vec![Ok(CHAT_DESIGN.to_string())]);
    let generator = Generator::new(model.clone());

    let design = generator
        .generate_design(&DesignRequest {
            requirements: "A real-time chat app for 1000 users".to_string(),
        })
        .await
        .unwrap();

    assert!(!design.diagram_description.is_empty());
    assert!(!design.components.is_empty());
    assert!(!design.rationale.is_empty());
    assert_eq!(design.components[1].name, "Chat Gateway");

    let calls = model.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].schema, "architecture_design");
    assert!(calls[0].prompt.contains("A real-time chat app for 1000 users"));
    assert!(calls[0].system.contains("diagramDescription"));
}

#[tokio::test]
async fn test_cost_estimation_scenario() {
    let reply = r#"Sure! ```json
{"totalMonthlyCostUSD": 73.0,
 "costBreakdown": [{"componentName": "API", "serviceType": "Compute Service",
   "estimatedMonthlyCostUSD": 73.0, "details": "One Standard instance, 730 hours"}],
 "assumptions": "Pay-as-you-go pricing"}
```"#;
    let model = ScriptedModel::replying(vec![Ok(reply.to_string())]);
    let generator = Generator::new(model.clone());

    let cost = generator
        .estimate_cost(&CostRequest {
            architecture_description: "Single API".to_string(),
            components: vec![CostComponent {
                name: "API".to_string(),
                service_type: "Compute Service".to_string(),
                region: "East US".to_string(),
                specifications: Some(Specifications::new().with("tier", "Standard")),
            }],
        })
        .await
        .unwrap();

    assert!(cost.total_monthly_cost_usd >= 0.0);
    assert_eq!(cost.cost_breakdown.len(), 1);
    assert_eq!(cost.cost_breakdown[0].component_name, "API");
    assert!(model.calls()[0]
        .prompt
        .contains("Specifications: {\"tier\":\"Standard\"}"));
}

#[tokio::test]
async fn test_blank_input_never_reaches_the_model() {
    let model = ScriptedModel::replying(vec![Ok(CHAT_DESIGN.to_string())]);
    let generator = Generator::new(model.clone());

    let err = generator
        .generate_design(&DesignRequest {
            requirements: "  ".to_string(),
        })
        .await
        .unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(err.task(), "architecture_design");

    let err = generator
        .deployment_guide(&DeploymentRequest {
            architecture_description: "desc".to_string(),
            components: vec![],
        })
        .await
        .unwrap_err();
    match err {
        GenerateError::InvalidInput { source, .. } => assert!(source.touches("components")),
        other => panic!("expected invalid input, got {other:?}"),
    }

    assert!(model.calls().is_empty());
}

#[tokio::test]
async fn test_nonconforming_output_is_a_model_error() {
    let model = ScriptedModel::replying(vec![
        // components missing entirely
        Ok(r#"{"diagramDescription": "graph TD", "rationale": "x"}"#.to_string()),
        // present but empty
        Ok(r#"{"diagramDescription": "graph TD", "components": [], "rationale": "x"}"#.to_string()),
        Ok("I'm sorry, I can't do that.".to_string()),
        Err(InvokeError::Transport("connection reset".to_string())),
    ]);
    let generator = Generator::new(model.clone());
    let request = DesignRequest {
        requirements: "An inventory system".to_string(),
    };

    for expected in ["Schema", "Nonconforming", "NoJson", "Transport"] {
        let err = generator.generate_design(&request).await.unwrap_err();
        match &err {
            GenerateError::ModelInvocation { source, .. } => {
                assert!(format!("{source:?}").starts_with(expected), "{source:?}")
            }
            other => panic!("expected model invocation error, got {other:?}"),
        }
    }
    // one attempt per call, no retries
    assert_eq!(model.calls().len(), 4);
}

#[test]
fn test_prompt_rendering_is_deterministic() {
    let request = CostRequest {
        architecture_description: "desc".to_string(),
        components: vec![CostComponent {
            name: "DB".to_string(),
            service_type: "SQL Database".to_string(),
            region: "West Europe".to_string(),
            specifications: Some(
                Specifications::new()
                    .with("vCores", 4)
                    .with("tier", "General Purpose")
                    .with("backupRetentionDays", 7),
            ),
        }],
    };
    assert_eq!(prompt::render_cost(&request), prompt::render_cost(&request));

    let schema = TradeoffAnalysis::output_schema();
    assert_eq!(prompt::system_prompt(&schema), prompt::system_prompt(&schema));
}

#[test]
fn test_tradeoff_prompt_preserves_choice_order() {
    let request = TradeoffRequest {
        architecture_description: "desc".to_string(),
        architectural_choices: vec![
            "Choice B".to_string(),
            "Choice A".to_string(),
            "Choice B".to_string(),
        ],
    };
    let rendered = TradeoffAnalysis::render(&request);
    let b = rendered.find("- Choice B\n").unwrap();
    let a = rendered.find("- Choice A\n").unwrap();
    assert!(b < a);
    // no deduplication
    assert_eq!(rendered.matches("- Choice B\n").count(), 2);
}

#[tokio::test]
async fn test_concurrent_tasks_are_independent() {
    let tradeoffs = r#"{"analysisResults": [{"choice": "Kafka", "benefits": ["durable"], "drawbacks": ["ops"]}]}"#;
    let guide = r#"{"summary": "Containers on a managed cluster",
        "steps": [{"title": "Create resource group", "description": "...", "command": "az group create -n app -l eastus"},
                  {"title": "Deploy", "description": "Apply manifests"}]}"#;

    let tradeoff_model = ScriptedModel::replying(vec![Ok(tradeoffs.to_string())]);
    let guide_model = ScriptedModel::replying(vec![Ok(guide.to_string())]);
    let a = Generator::new(tradeoff_model.clone());
    let b = Generator::new(guide_model.clone());

    let tradeoff_req = TradeoffRequest {
        architecture_description: "desc".to_string(),
        architectural_choices: vec!["Kafka".to_string()],
    };
    let guide_req = DeploymentRequest {
        architecture_description: "desc".to_string(),
        components: vec![DeploymentComponent {
            name: "API".to_string(),
            kind: "Backend Service".to_string(),
            technology: "Go".to_string(),
        }],
    };

    let (t, g) = tokio::join!(a.analyze_tradeoffs(&tradeoff_req), b.deployment_guide(&guide_req));
    let t = t.unwrap();
    let g = g.unwrap();
    assert_eq!(t.analysis_results[0].choice, "Kafka");
    assert_eq!(g.steps.len(), 2);
    assert!(g.steps[0].command.is_some());
    assert!(g.steps[1].command.is_none());
    assert_eq!(tradeoff_model.calls()[0].schema, "tradeoff_analysis");
    assert_eq!(guide_model.calls()[0].schema, "deployment_guide");
}

#[tokio::test]
async fn test_boilerplate_output_splits_into_files() {
    let markdown = "`api/main.py`\n```python\nprint('hi')\n```\n`api/Dockerfile`\n```dockerfile\nFROM python:3.12\n```\n";
    let reply = serde_json::json!({ "dockerizedBoilerplateCode": markdown }).to_string();
    let model = ScriptedModel::replying(vec![Ok(reply)]);
    let generator = Generator::new(model);

    let result = generator
        .generate_boilerplate(&BoilerplateRequest {
            architecture_description: "A Python API".to_string(),
        })
        .await
        .unwrap();
    let files = split_files(&result.dockerized_boilerplate_code);
    let paths: Vec<_> = files.iter().filter_map(|f| f.path.as_deref()).collect();
    assert_eq!(paths, vec!["api/main.py", "api/Dockerfile"]);
}
