/// Mermaid diagram rules — shared by the design prompt and the MCP instructions.
pub const DIAGRAM_RULES: &str = "\
1. Output a single Mermaid flowchart. Start with `graph TD` (or `flowchart TD` for wide systems). \
Do NOT wrap it in ``` fences and do NOT add prose before or after it.\n\
2. One node per component in the component list. Node IDs are short alphanumeric identifiers \
without spaces (e.g. `api`, `userDb`); the display label goes in brackets: `api[API Gateway]`.\n\
3. Quote labels that contain punctuation, parentheses or slashes: `web[\"Web App (Next.js)\"]`.\n\
4. Use shapes to signal roles: `[(Database)]` for data stores, `([Queue])` for queues and topics, \
`((User))` for people and external actors, `[Service]` for everything else.\n\
5. Arrows point from the caller to the dependency: `web --> api --> db`. Put the protocol or \
interaction on the edge label when it matters: `api -- gRPC --> orders`.\n\
6. One edge per relationship. Do not add return or response edges.\n\
7. Group components that deploy together with `subgraph Name ... end`. Subgraph names must not \
collide with node IDs.\n\
8. Message queues, caches and external services are explicit nodes, not edge labels.\n\
9. Avoid reserved words as node IDs (`end`, `graph`, `subgraph`, `style`, `class`).\n\
10. Keep it renderable: no HTML, no `click` directives, no custom styling.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_are_numbered_lines() {
        let lines: Vec<&str> = DIAGRAM_RULES.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().enumerate().all(|(i, l)| l.starts_with(&format!("{}.", i + 1))));
    }
}
