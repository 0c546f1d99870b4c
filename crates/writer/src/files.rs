use activity_pattern::ActivityPlan;
use std::path::{Path, PathBuf};

use crate::error::{Result, WriterError};

pub const PATTERN_DOC_FILE: &str = "ACTIVITY-PATTERN.md";
pub const README_FILE: &str = "README.md";
pub const GITIGNORE_FILE: &str = ".gitignore";

const DEFAULT_GITIGNORE: &str = "\
# Editor and OS files
.DS_Store
Thumbs.db
*.swp
.idea/
.vscode/

# Build output
target/
node_modules/
";

/// Markdown summary of the plan, regenerated on every run.
pub fn render_pattern_doc(plan: &ActivityPlan) -> String {
    let window = plan.window();
    let placement = plan.placement();

    let mut md = String::new();
    md.push_str("# Activity pattern\n\n");
    md.push_str(&format!("- Message: `{}`\n", plan.message()));
    md.push_str(&format!("- Width: {} weeks\n", plan.width()));
    md.push_str(&format!(
        "- Intensity: {} ({} commits per active day)\n",
        plan.options().intensity,
        plan.commits_per_day()
    ));
    md.push_str(&format!(
        "- Placement: {:?}, starting {} (week {} of the window)\n",
        placement.kind,
        placement.start_date,
        placement.offset_weeks + 1
    ));
    md.push_str(&format!(
        "- Window: {} to {}\n",
        window.start, window.end
    ));
    md.push_str(&format!(
        "- Commits: {} over {} days\n",
        plan.total_commits(),
        plan.active_days()
    ));
    md.push_str(&format!("- Generated: {}\n\n", plan.today()));

    md.push_str("## Preview\n\n```text\n");
    for line in plan.preview().lines('#', '.') {
        md.push_str(&line);
        md.push('\n');
    }
    md.push_str("```\n");

    if !plan.refresh_dates().is_empty() {
        md.push_str("\n## Refresh schedule\n\n");
        md.push_str("Regenerate with `activity refresh` on or after each date to keep the message in view.\n\n");
        for date in plan.refresh_dates() {
            md.push_str(&format!("- {date}\n"));
        }
    }

    md
}

fn render_readme(plan: &ActivityPlan) -> String {
    format!(
        "# {}\n\nThis repository draws `{}` on the contribution graph.\n\nSee [{PATTERN_DOC_FILE}]({PATTERN_DOC_FILE}) for the current pattern.\n",
        plan.message(),
        plan.message()
    )
}

async fn write(path: &Path, body: &str) -> Result<()> {
    tokio::fs::write(path, body)
        .await
        .map_err(|err| WriterError::io(path, err))
}

fn render_gitignore(local_files: &[&str]) -> String {
    let mut body = DEFAULT_GITIGNORE.to_string();
    if !local_files.is_empty() {
        body.push_str("\n# Local pattern state\n");
        for name in local_files {
            body.push_str(name);
            body.push('\n');
        }
    }
    body
}

/// Write the auxiliary files. The pattern document is always rewritten;
/// README and `.gitignore` are only created when missing. `local_files` are
/// listed in a new `.gitignore`. Returns the paths that were written.
pub async fn write_support_files(
    repo: &Path,
    plan: &ActivityPlan,
    local_files: &[&str],
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    let doc = repo.join(PATTERN_DOC_FILE);
    write(&doc, &render_pattern_doc(plan)).await?;
    written.push(doc);

    for (name, body) in [
        (README_FILE, render_readme(plan)),
        (GITIGNORE_FILE, render_gitignore(local_files)),
    ] {
        let path = repo.join(name);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            log::debug!("Keeping existing {name}");
            continue;
        }
        write(&path, &body).await?;
        written.push(path);
    }

    Ok(written)
}
