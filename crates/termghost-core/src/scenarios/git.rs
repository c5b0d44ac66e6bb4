use rand::{Rng, RngCore};

use super::{LineDraft, Variant, decimal, pick, plural, short_id};
use crate::engine::line::Category;

const BRANCHES: &[&str] = &[
    "main",
    "develop",
    "feature/auth",
    "feature/api",
    "bugfix/login",
    "release/v2.0",
    "hotfix/security",
];

const FILES: &[&str] = &[
    "src/index.ts",
    "src/App.tsx",
    "package.json",
    "README.md",
    "src/utils/api.ts",
    "src/components/Header.tsx",
    "src/hooks/useAuth.ts",
    ".env",
    "docker-compose.yml",
    "src/styles/main.css",
    "tests/unit/app.test.ts",
    "src/services/user.service.ts",
];

const COMMIT_MESSAGES: &[&str] = &[
    "feat: add user authentication",
    "fix: resolve memory leak in worker",
    "docs: update API documentation",
    "refactor: simplify data processing logic",
    "chore: update dependencies",
    "style: format code with prettier",
    "test: add unit tests for auth module",
    "perf: optimize database queries",
    "ci: update GitHub Actions workflow",
    "feat: implement dark mode toggle",
];

// `status` must stay first: a pinned all-low RNG selects it.
pub(super) const VARIANTS: &[Variant] = &[status, log, pull, commit, push, diff, branch];

fn hash(rng: &mut dyn RngCore) -> String {
    short_id(rng, 7)
}

fn diffstat(rng: &mut dyn RngCore, max_files: u32, max_ins: u32, max_del: u32) -> String {
    let files = rng.gen_range(1..=max_files);
    let insertions = rng.gen_range(10..max_ins + 10);
    let deletions = rng.gen_range(0..max_del);
    format!(
        " {} changed, {}(+), {}(-)",
        plural(files, "file"),
        plural(insertions, "insertion"),
        plural(deletions, "deletion")
    )
}

fn status(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let branch = pick(rng, BRANCHES);
    let mut lines = vec![
        LineDraft::command("$ git status"),
        LineDraft::new(format!("On branch {branch}"), Category::Default),
    ];
    if rng.gen_bool(0.5) {
        lines.push(LineDraft::new(
            format!(
                "Your branch is ahead of 'origin/{branch}' by {} commit(s).",
                rng.gen_range(1..6)
            ),
            Category::Info,
        ));
    }

    let modified = rng.gen_range(0..4);
    let untracked = rng.gen_range(0..3);
    if modified > 0 {
        lines.push(LineDraft::new("Changes not staged for commit:", Category::Warning));
        for _ in 0..modified {
            lines.push(LineDraft::new(
                format!("        modified:   {}", pick(rng, FILES)),
                Category::Error,
            ));
        }
    }
    if untracked > 0 {
        lines.push(LineDraft::new("Untracked files:", Category::Warning));
        for _ in 0..untracked {
            lines.push(LineDraft::new(
                format!("        {}", pick(rng, FILES)),
                Category::Error,
            ));
        }
    }
    if modified == 0 && untracked == 0 {
        lines.push(LineDraft::new(
            "nothing to commit, working tree clean",
            Category::Success,
        ));
    }
    lines
}

fn log(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let mut lines = vec![LineDraft::command("$ git log --oneline -5")];
    for i in 0..5 {
        let category = if i == 0 {
            Category::Accent
        } else {
            Category::Default
        };
        lines.push(LineDraft::new(
            format!("{} {}", hash(rng), pick(rng, COMMIT_MESSAGES)),
            category,
        ));
    }
    lines
}

fn pull(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let branch = pick(rng, BRANCHES);
    vec![
        LineDraft::command(format!("$ git pull origin {branch}")),
        LineDraft::new(
            format!("remote: Enumerating objects: {}, done.", rng.gen_range(10..60)),
            Category::Dim,
        ),
        LineDraft::new(
            format!(
                "remote: Counting objects: 100% ({n}/{n}), done.",
                n = rng.gen_range(5..35)
            ),
            Category::Dim,
        ),
        LineDraft::new(
            format!(
                "remote: Compressing objects: 100% ({n}/{n}), done.",
                n = rng.gen_range(3..23)
            ),
            Category::Dim,
        ),
        LineDraft::new("From github.com:user/repo", Category::Default),
        LineDraft::new(
            format!(" * branch            {branch} -> FETCH_HEAD"),
            Category::Default,
        ),
        LineDraft::new(
            format!("Updating {}..{}", hash(rng), hash(rng)),
            Category::Default,
        ),
        LineDraft::new("Fast-forward", Category::Success),
        LineDraft::new(diffstat(rng, 10, 200, 50), Category::Success),
    ]
}

fn commit(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let msg = pick(rng, COMMIT_MESSAGES);
    vec![
        LineDraft::command(format!("$ git commit -m \"{msg}\"")),
        LineDraft::new(
            format!("[{} {}] {msg}", pick(rng, BRANCHES), hash(rng)),
            Category::Success,
        ),
        LineDraft::new(diffstat(rng, 5, 100, 30), Category::Default),
    ]
}

fn push(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let branch = pick(rng, BRANCHES);
    vec![
        LineDraft::command(format!("$ git push origin {branch}")),
        LineDraft::new(
            format!("Enumerating objects: {}, done.", rng.gen_range(5..25)),
            Category::Dim,
        ),
        LineDraft::new(
            format!("Counting objects: 100% ({n}/{n}), done.", n = rng.gen_range(3..18)),
            Category::Dim,
        ),
        LineDraft::new("Delta compression using up to 8 threads", Category::Dim),
        LineDraft::new(
            format!(
                "Compressing objects: 100% ({n}/{n}), done.",
                n = rng.gen_range(2..12)
            ),
            Category::Dim,
        ),
        LineDraft::new(
            format!(
                "Writing objects: 100% ({n}/{n}), {} KiB | {} MiB/s, done.",
                decimal(rng, 1.0, 11.0, 2),
                decimal(rng, 1.0, 6.0, 2),
                n = rng.gen_range(2..10),
            ),
            Category::Dim,
        ),
        LineDraft::new("To github.com:user/repo.git", Category::Default),
        LineDraft::new(
            format!("   {}..{}  {branch} -> {branch}", hash(rng), hash(rng)),
            Category::Success,
        ),
    ]
}

fn diff(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let file = pick(rng, FILES);
    vec![
        LineDraft::command(format!("$ git diff {file}")),
        LineDraft::new(format!("diff --git a/{file} b/{file}"), Category::Info),
        LineDraft::new(
            format!("index {}..{} 100644", hash(rng), hash(rng)),
            Category::Dim,
        ),
        LineDraft::new(format!("--- a/{file}"), Category::Error),
        LineDraft::new(format!("+++ b/{file}"), Category::Success),
        LineDraft::new(
            format!(
                "@@ -{},{} +{},{} @@",
                rng.gen_range(1..21),
                rng.gen_range(3..13),
                rng.gen_range(1..21),
                rng.gen_range(3..13)
            ),
            Category::Info,
        ),
        LineDraft::new("-  const oldValue = \"deprecated\";", Category::Error),
        LineDraft::new("+  const newValue = \"updated\";", Category::Success),
    ]
}

fn branch(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let mut lines = vec![LineDraft::command("$ git branch -a")];
    let current = pick(rng, BRANCHES);
    let shown = rng.gen_range(3..7usize).min(BRANCHES.len());
    for name in &BRANCHES[..shown] {
        if *name == current {
            lines.push(LineDraft::new(format!("* {name}"), Category::Success));
        } else {
            lines.push(LineDraft::new(format!("  {name}"), Category::Default));
        }
    }
    lines.push(LineDraft::new("  remotes/origin/main", Category::Dim));
    lines.push(LineDraft::new(
        format!("  remotes/origin/{current}"),
        Category::Dim,
    ));
    lines
}
