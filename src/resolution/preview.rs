//! Social preview images derived from repository URLs

use url::Url;

const CODE_HOST: &str = "github.com";
const PAGES_SUFFIX: &str = ".github.io";
const PREVIEW_BASE: &str = "https://opengraph.githubassets.com/1";

/// Owner/repo pair extracted from a repository or pages URL.
///
/// Recognizes `https://github.com/{owner}/{repo}[.git]` and
/// `https://{owner}.github.io/{repo}/`. Anything else is `None`.
pub fn repo_coordinates(repo_url: &str) -> Option<(String, String)> {
    let url = Url::parse(repo_url).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();
    let mut segments = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect::<Vec<_>>())
        .unwrap_or_default()
        .into_iter();

    if host == CODE_HOST {
        let owner = segments.next()?;
        let repo = strip_git_suffix(segments.next()?);
        return (!repo.is_empty()).then(|| (owner.to_string(), repo.to_string()));
    }

    if let Some(owner) = host.strip_suffix(PAGES_SUFFIX) {
        if owner.is_empty() || owner.contains('.') {
            return None;
        }
        let repo = segments.next()?;
        return Some((owner.to_string(), repo.to_string()));
    }

    None
}

/// Preview image URL for a repository, or `""` when none can be derived
pub fn preview_image_url(repo_url: &str) -> String {
    match repo_coordinates(repo_url) {
        Some((owner, repo)) => format!("{}/{}/{}", PREVIEW_BASE, owner, repo),
        None => String::new(),
    }
}

fn strip_git_suffix(repo: &str) -> &str {
    let cut = repo.len().saturating_sub(4);
    match repo.get(cut..) {
        Some(tail) if tail.eq_ignore_ascii_case(".git") => &repo[..cut],
        _ => repo,
    }
}
