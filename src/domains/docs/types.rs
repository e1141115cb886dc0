use serde::{Deserialize, Serialize};

/// Marker appended to file previews cut at the preview budget.
pub const TRUNCATION_MARKER: &str = "\n... (content truncated)";

/// A documentation file read from a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocFile {
    pub path: String,
    pub content: String,
}

/// Documentation files collected from one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocsResult {
    pub repo_url: String,
    pub owner: String,
    pub repo: String,
    pub files: Vec<DocFile>,
    pub count: usize,
}

impl DocsResult {
    pub fn new(repo_url: impl Into<String>, files: Vec<DocFile>) -> Self {
        let repo_url = repo_url.into();
        let (owner, repo) = parse_owner_repo(&repo_url);
        Self {
            repo_url,
            owner,
            repo,
            count: files.len(),
            files,
        }
    }

    /// Render the files as Markdown, one fenced section per file.
    ///
    /// File contents longer than `preview_chars` characters are cut and
    /// followed by [`TRUNCATION_MARKER`].
    pub fn to_markdown(&self, preview_chars: usize) -> String {
        let mut md = format!(
            "# {}/{}\n\n{} documentation files\n\n",
            self.owner, self.repo, self.count
        );

        for file in &self.files {
            md.push_str(&format!("## {}\n\n```\n", file.path));
            match file.content.char_indices().nth(preview_chars) {
                Some((cut, _)) => {
                    md.push_str(&file.content[..cut]);
                    md.push_str(TRUNCATION_MARKER);
                }
                None => md.push_str(&file.content),
            }
            md.push_str("\n```\n\n");
        }

        md
    }
}

/// Owner and repository name from a `github.com/{owner}/{repo}[.git]` URL.
///
/// Returns empty strings for URLs that don't point at GitHub.
pub fn parse_owner_repo(repo_url: &str) -> (String, String) {
    let Some((_, rest)) = repo_url.split_once("github.com/") else {
        return (String::new(), String::new());
    };
    let rest = rest.strip_suffix(".git").unwrap_or(rest);
    let mut parts = rest.split('/');
    match (parts.next(), parts.next()) {
        (Some(owner), Some(repo)) => (owner.to_string(), repo.to_string()),
        _ => (String::new(), String::new()),
    }
}
