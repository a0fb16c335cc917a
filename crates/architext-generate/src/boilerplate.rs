use serde::Serialize;

/// One fenced code block of generated boilerplate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    /// Path from the header line before the block, or a path comment on its first line.
    pub path: Option<String>,
    pub language: Option<String>,
    pub contents: String,
}

/// Split markdown boilerplate into its fenced code blocks, in order.
pub fn split_files(markdown: &str) -> Vec<GeneratedFile> {
    let mut files = Vec::new();
    let mut header: Option<String> = None;
    let mut open: Option<(Option<String>, Option<String>, Vec<&str>)> = None;

    for line in markdown.lines() {
        let trimmed = line.trim();
        if open.is_some() {
            if trimmed == "```" {
                if let Some((path, language, body)) = open.take() {
                    files.push(finish(path, language, &body));
                }
            } else if let Some((_, _, body)) = open.as_mut() {
                body.push(line);
            }
            continue;
        }

        if let Some(tag) = trimmed.strip_prefix("```") {
            let language = tag.split_whitespace().next().map(str::to_lowercase);
            open = Some((header.take(), language, Vec::new()));
        } else if !trimmed.is_empty() {
            header = header_path(trimmed);
        }
    }

    // Unterminated final block
    if let Some((path, language, body)) = open {
        files.push(finish(path, language, &body));
    }
    files
}

fn finish(path: Option<String>, language: Option<String>, body: &[&str]) -> GeneratedFile {
    let path = path.or_else(|| body.first().and_then(|l| comment_path(l.trim())));
    let mut contents = body.join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }
    GeneratedFile {
        path,
        language,
        contents,
    }
}

/// `### \`gateway/app.py\``, `**docker-compose.yml**`, `File: api/main.go`, `2. \`web/Dockerfile\``
fn header_path(line: &str) -> Option<String> {
    let mut s = line.trim_start_matches('#').trim();
    s = s.trim_start_matches(|c: char| c.is_ascii_digit());
    s = s.strip_prefix('.').unwrap_or(s).trim();
    s = s.strip_prefix("- ").unwrap_or(s).trim();
    for prefix in ["File:", "file:", "Path:", "path:"] {
        if let Some(rest) = s.strip_prefix(prefix) {
            s = rest.trim();
        }
    }
    let s = s.trim_matches(|c: char| c == '*' || c == '`' || c == ':' || c.is_whitespace());
    looks_like_path(s).then(|| s.to_string())
}

/// `# gateway/app.py`, `// api/main.go`, `-- db/init.sql`
fn comment_path(line: &str) -> Option<String> {
    let rest = ["# ", "// ", "-- "]
        .iter()
        .find_map(|p| line.strip_prefix(p))?
        .trim();
    let rest = rest
        .strip_prefix("File:")
        .or_else(|| rest.strip_prefix("file:"))
        .unwrap_or(rest)
        .trim();
    looks_like_path(rest).then(|| rest.to_string())
}

fn looks_like_path(s: &str) -> bool {
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        return false;
    }
    let name = s.rsplit('/').next().unwrap_or(s);
    if matches!(name, "Dockerfile" | "Makefile" | "Procfile") {
        return true;
    }
    // `.env`, `app.py`; not `Done.` or `e.g.`
    match name.rsplit_once('.') {
        Some((_, ext)) => !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()),
        None => false,
    }
}
