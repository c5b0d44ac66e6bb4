use rand::{Rng, RngCore};

use super::{LineDraft, Variant, decimal, pick, short_id};
use crate::engine::line::Category;

const PACKAGES: &[&str] = &[
    "react", "react-dom", "typescript", "webpack", "babel", "eslint", "prettier", "lodash",
    "axios", "express", "next", "vite", "rollup", "jest", "mocha", "chai", "moment", "dayjs",
    "uuid", "chalk", "commander", "inquirer", "@types/node", "@types/react", "tailwindcss",
    "postcss", "autoprefixer", "framer-motion", "zustand", "redux", "mobx", "graphql",
    "apollo-client", "socket.io", "mongoose", "prisma", "@prisma/client", "zod", "yup",
    "react-query", "swr", "react-hook-form", "formik", "styled-components", "@emotion/react",
    "sass", "less", "esbuild", "turbo", "nx", "lerna",
];

const VERSIONS: &[&str] = &[
    "1.0.0", "2.1.3", "3.0.0-beta.1", "4.2.1", "5.0.0", "18.2.0", "0.23.1", "7.3.2",
];

pub(super) const VARIANTS: &[Variant] = &[install, audit, build, install_with_progress, ls, ci];

fn install(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let pkg = pick(rng, PACKAGES);
    let version = pick(rng, VERSIONS);
    let mut lines = vec![
        LineDraft::command(format!("$ npm install {pkg}@{version}")),
        LineDraft::new(
            format!("npm http fetch GET 200 https://registry.npmjs.org/{pkg}/-/{pkg}-{version}.tgz"),
            Category::Dim,
        ),
        LineDraft::new(
            format!(
                "added {} packages in {}s",
                rng.gen_range(10..60),
                decimal(rng, 0.5, 3.5, 1)
            ),
            Category::Success,
        ),
    ];
    if rng.gen_bool(0.3) {
        lines.push(LineDraft::new(
            format!("{} packages are looking for funding", rng.gen_range(1..6)),
            Category::Dim,
        ));
        lines.push(LineDraft::new("  run `npm fund` for details", Category::Dim));
    }
    lines
}

fn audit(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let mut lines = vec![LineDraft::command("$ npm audit")];
    let total: u32 = rng.gen_range(0..10);
    if total == 0 {
        lines.push(LineDraft::new("found 0 vulnerabilities", Category::Success));
    } else {
        let high = rng.gen_range(0..total);
        let moderate = total - high;
        let category = if total > 5 {
            Category::Error
        } else {
            Category::Warning
        };
        lines.push(LineDraft::new(
            format!("found {total} vulnerabilities ({moderate} moderate, {high} high)"),
            category,
        ));
        lines.push(LineDraft::new("  run `npm audit fix` to fix them", Category::Dim));
    }
    lines
}

fn build(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let mut lines = vec![
        LineDraft::command("$ npm run build"),
        LineDraft::new("> project@1.0.0 build", Category::Dim),
        LineDraft::new("> vite build", Category::Dim),
        LineDraft::new("", Category::Default),
        LineDraft::new("vite v5.0.0 building for production...", Category::Info),
        LineDraft::new("transforming...", Category::Dim),
    ];
    let chunks: u32 = rng.gen_range(5..25);
    for _ in 0..chunks.min(5) {
        let size: f64 = rng.gen_range(10.0..110.0);
        lines.push(LineDraft::new(
            format!(
                "dist/assets/index-{}.js  {size:.2} kB │ gzip: {:.2} kB",
                short_id(rng, 8),
                size * 0.3
            ),
            Category::Dim,
        ));
    }
    lines.push(LineDraft::new(
        format!("✓ {chunks} modules transformed."),
        Category::Success,
    ));
    lines.push(LineDraft::new(
        format!("✓ built in {}s", decimal(rng, 1.0, 6.0, 2)),
        Category::Success,
    ));
    lines
}

fn install_with_progress(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let pkg = pick(rng, PACKAGES);
    let deprecated = pick(rng, PACKAGES);
    let version = pick(rng, VERSIONS);
    vec![
        LineDraft::command(format!("$ npm install {pkg}")),
        LineDraft::new(
            format!("npm WARN deprecated {deprecated}@{version}: This package is deprecated"),
            Category::Warning,
        ),
        LineDraft::progress(
            format!("Downloading {pkg}..."),
            Category::Info,
            f64::from(rng.gen_range(60u8..100)),
        ),
    ]
}

fn ls(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let mut lines = vec![
        LineDraft::command("$ npm ls --depth=0"),
        LineDraft::new("project@1.0.0 /Users/dev/project", Category::Default),
    ];
    let count = rng.gen_range(3..11);
    for i in 0..count {
        let branch = if i + 1 == count { "└──" } else { "├──" };
        lines.push(LineDraft::new(
            format!("{branch} {}@{}", pick(rng, PACKAGES), pick(rng, VERSIONS)),
            Category::Dim,
        ));
    }
    lines
}

fn ci(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let deprecated = pick(rng, PACKAGES);
    let version = pick(rng, VERSIONS);
    vec![
        LineDraft::command("$ npm ci"),
        LineDraft::new(
            format!("npm WARN deprecated {deprecated}@{version}: Please upgrade"),
            Category::Warning,
        ),
        LineDraft::new(
            format!(
                "added {} packages in {}s",
                rng.gen_range(200..700),
                decimal(rng, 5.0, 35.0, 1)
            ),
            Category::Success,
        ),
    ]
}
