//! Follow-up requests built from a generated design.

use architext_core::{
    BoilerplateRequest, CostComponent, CostRequest, DeploymentComponent, DeploymentRequest,
    DesignResult, Specifications, TradeoffRequest,
};

pub const DEFAULT_REGION: &str = "East US";

/// Analyze each component as one architectural choice, in component order.
pub fn tradeoff_request(design: &DesignResult) -> TradeoffRequest {
    TradeoffRequest {
        architecture_description: design.diagram_description.clone(),
        architectural_choices: design.components.iter().map(|c| c.name.clone()).collect(),
    }
}

/// Price every component as a standard-tier service of its type in `region`.
pub fn cost_request(design: &DesignResult, region: &str) -> CostRequest {
    CostRequest {
        architecture_description: design.diagram_description.clone(),
        components: design
            .components
            .iter()
            .map(|c| CostComponent {
                name: c.name.clone(),
                service_type: c.kind.clone(),
                region: region.to_string(),
                specifications: Some(
                    Specifications::new()
                        .with("tier", "Standard")
                        .with("purpose", c.purpose.as_str()),
                ),
            })
            .collect(),
    }
}

pub fn deployment_request(design: &DesignResult) -> DeploymentRequest {
    DeploymentRequest {
        architecture_description: design.diagram_description.clone(),
        components: design
            .components
            .iter()
            .map(|c| DeploymentComponent {
                name: c.name.clone(),
                kind: c.kind.clone(),
                technology: c.technology.clone(),
            })
            .collect(),
    }
}

pub fn boilerplate_request(design: &DesignResult) -> BoilerplateRequest {
    let components = serde_json::to_string(&design.components).unwrap_or_default();
    BoilerplateRequest {
        architecture_description: format!(
            "Components: {}. Rationale: {}",
            components, design.rationale
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use architext_core::{Component, SpecValue};

    fn design() -> DesignResult {
        DesignResult {
            diagram_description: "graph TD\n  web --> api --> db".to_string(),
            components: vec![
                Component {
                    name: "Web".to_string(),
                    kind: "Frontend".to_string(),
                    purpose: "UI".to_string(),
                    technology: "Next.js".to_string(),
                },
                Component {
                    name: "API".to_string(),
                    kind: "Backend Service".to_string(),
                    purpose: "Business logic".to_string(),
                    technology: "Axum".to_string(),
                },
            ],
            rationale: "Two tiers keep it simple".to_string(),
        }
    }

    #[test]
    fn tradeoff_choices_follow_component_order() {
        let req = tradeoff_request(&design());
        assert_eq!(req.architectural_choices, vec!["Web", "API"]);
        assert_eq!(req.architecture_description, design().diagram_description);
    }

    #[test]
    fn cost_components_carry_region_and_purpose() {
        let req = cost_request(&design(), DEFAULT_REGION);
        assert_eq!(req.components.len(), 2);
        let api = &req.components[1];
        assert_eq!(api.service_type, "Backend Service");
        assert_eq!(api.region, "East US");
        let specs = api.specifications.as_ref().unwrap();
        assert_eq!(specs.get("tier"), Some(&SpecValue::from("Standard")));
        assert_eq!(specs.get("purpose"), Some(&SpecValue::from("Business logic")));
    }

    #[test]
    fn boilerplate_description_embeds_components_json() {
        let req = boilerplate_request(&design());
        assert!(req
            .architecture_description
            .starts_with("Components: [{\"name\":\"Web\",\"type\":\"Frontend\""));
        assert!(req
            .architecture_description
            .ends_with(". Rationale: Two tiers keep it simple"));
    }

    #[test]
    fn deployment_components_keep_technology() {
        let req = deployment_request(&design());
        assert_eq!(req.components[0].technology, "Next.js");
    }
}
