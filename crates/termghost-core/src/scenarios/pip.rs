use rand::{Rng, RngCore};

use super::{LineDraft, Variant, pick};
use crate::engine::line::Category;

const PACKAGES: &[&str] = &[
    "numpy", "pandas", "scipy", "matplotlib", "tensorflow", "pytorch", "keras", "scikit-learn",
    "requests", "flask", "django", "fastapi", "uvicorn", "gunicorn", "pytest", "black", "flake8",
    "mypy", "pylint", "isort", "poetry", "pipenv", "beautifulsoup4", "selenium", "scrapy",
    "celery", "redis", "sqlalchemy", "alembic", "pydantic", "httpx", "aiohttp", "boto3",
    "pillow", "opencv-python", "transformers", "torch", "torchvision", "huggingface-hub",
    "openai", "langchain", "streamlit", "gradio", "jupyter", "notebook", "ipython", "rich",
    "typer",
];

const VERSIONS: &[&str] = &["1.0.0", "2.3.1", "3.9.0", "4.1.2", "0.12.0", "23.1.0", "2024.1"];

const SITE_PACKAGES: &str = "./venv/lib/python3.11/site-packages";

pub(super) const VARIANTS: &[Variant] = &[
    install,
    install_requirements,
    upgrade,
    list,
    freeze,
    install_with_warnings,
];

fn install(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let pkg = pick(rng, PACKAGES);
    let version = pick(rng, VERSIONS);
    let mut lines = vec![
        LineDraft::command(format!("$ pip install {pkg}")),
        LineDraft::new(format!("Collecting {pkg}"), Category::Default),
        LineDraft::new(
            format!(
                "  Downloading {pkg}-{version}-py3-none-any.whl ({} kB)",
                rng.gen_range(50..550)
            ),
            Category::Dim,
        ),
    ];
    let deps = rng.gen_range(0..5);
    for _ in 0..deps {
        let dep = pick(rng, PACKAGES);
        lines.push(LineDraft::new(format!("Collecting {dep}"), Category::Default));
        lines.push(LineDraft::new(
            format!("  Using cached {dep}-{}-py3-none-any.whl", pick(rng, VERSIONS)),
            Category::Dim,
        ));
    }
    let more = if deps > 0 { ", ..." } else { "" };
    lines.push(LineDraft::new(
        format!("Installing collected packages: {pkg}{more}"),
        Category::Default,
    ));
    lines.push(LineDraft::new(
        format!("Successfully installed {pkg}-{version}"),
        Category::Success,
    ));
    lines
}

fn install_requirements(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let mut lines = vec![LineDraft::command("$ pip install -r requirements.txt")];
    let count = rng.gen_range(5..15);
    for _ in 0..count {
        let pkg = pick(rng, PACKAGES);
        if rng.gen_bool(0.3) {
            lines.push(LineDraft::new(
                format!("Requirement already satisfied: {pkg} in {SITE_PACKAGES}"),
                Category::Dim,
            ));
        } else {
            lines.push(LineDraft::new(format!("Collecting {pkg}"), Category::Default));
            lines.push(LineDraft::progress(
                format!("  Downloading {pkg}..."),
                Category::Dim,
                f64::from(rng.gen_range(0u8..100)),
            ));
        }
    }
    lines.push(LineDraft::new(
        format!("Successfully installed {count} packages"),
        Category::Success,
    ));
    lines
}

fn upgrade(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let pkg = pick(rng, PACKAGES);
    vec![
        LineDraft::command(format!("$ pip install --upgrade {pkg}")),
        LineDraft::new(
            format!(
                "Requirement already satisfied: {pkg} in {SITE_PACKAGES} ({})",
                pick(rng, VERSIONS)
            ),
            Category::Dim,
        ),
        LineDraft::new(format!("Collecting {pkg}"), Category::Default),
        LineDraft::new(
            format!("  Downloading {pkg}-{}-py3-none-any.whl", pick(rng, VERSIONS)),
            Category::Dim,
        ),
        LineDraft::new(
            format!("Successfully installed {pkg}-{}", pick(rng, VERSIONS)),
            Category::Success,
        ),
    ]
}

fn list(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let mut lines = vec![
        LineDraft::command("$ pip list"),
        LineDraft::new("Package           Version", Category::Accent),
        LineDraft::new("----------------- --------", Category::Dim),
    ];
    for _ in 0..rng.gen_range(5..15) {
        let pkg = pick(rng, PACKAGES);
        lines.push(LineDraft::new(
            format!("{pkg:<18}{}", pick(rng, VERSIONS)),
            Category::Default,
        ));
    }
    lines
}

fn freeze(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    vec![
        LineDraft::command("$ pip freeze > requirements.txt"),
        LineDraft::new(
            format!("Wrote {} packages to requirements.txt", rng.gen_range(5..20)),
            Category::Success,
        ),
    ]
}

fn install_with_warnings(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let pkg = pick(rng, PACKAGES);
    let mut lines = vec![
        LineDraft::command(format!("$ pip install {pkg}")),
        LineDraft::new("DEPRECATION: Python 3.7 reached end-of-life", Category::Warning),
        LineDraft::new(format!("Collecting {pkg}"), Category::Default),
    ];
    if rng.gen_bool(0.5) {
        lines.push(LineDraft::new(
            format!(
                "WARNING: {} {} does not provide the extra 'dev'",
                pick(rng, PACKAGES),
                pick(rng, VERSIONS)
            ),
            Category::Warning,
        ));
    }
    lines.push(LineDraft::new(
        format!("Successfully installed {pkg}"),
        Category::Success,
    ));
    lines
}
