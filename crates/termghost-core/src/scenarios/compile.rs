use rand::{Rng, RngCore};

use super::{LineDraft, Variant, decimal, pick, short_id};
use crate::engine::line::Category;

pub(super) const VARIANTS: &[Variant] = &[cargo, go, webpack, tsc, make, maven, gradle];

fn cargo(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    const CRATES: &[&str] = &[
        "serde", "tokio", "reqwest", "clap", "anyhow", "thiserror", "axum", "sqlx",
    ];
    let mut lines = vec![LineDraft::command("$ cargo build --release")];
    for _ in 0..rng.gen_range(3..8) {
        let name = pick(rng, CRATES);
        lines.push(LineDraft::new(
            format!(
                "   Compiling {name} v{}.{}.{}",
                rng.gen_range(0..2),
                rng.gen_range(0..30),
                rng.gen_range(0..10)
            ),
            Category::Default,
        ));
    }
    if rng.gen_bool(0.2) {
        lines.push(LineDraft::new("warning: unused variable: `temp`", Category::Warning));
        lines.push(LineDraft::new("  --> src/main.rs:42:9", Category::Dim));
    }
    lines.push(LineDraft::new(
        "   Compiling myproject v0.1.0 (/home/user/project)",
        Category::Default,
    ));
    lines.push(LineDraft::new(
        format!(
            "    Finished release [optimized] target(s) in {}s",
            decimal(rng, 5.0, 35.0, 2)
        ),
        Category::Success,
    ));
    lines
}

fn go(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    const MODULES: &[&str] = &[
        "github.com/gin-gonic/gin",
        "github.com/gorilla/mux",
        "go.uber.org/zap",
        "github.com/spf13/cobra",
    ];
    let mut lines = vec![LineDraft::command("$ go build -o app ./cmd/server")];
    if rng.gen_bool(0.4) {
        lines.push(LineDraft::new(
            format!("go: downloading {}", pick(rng, MODULES)),
            Category::Dim,
        ));
    }
    lines.push(LineDraft::new("", Category::Default));
    lines
}

fn webpack(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    vec![
        LineDraft::command("$ webpack --mode production"),
        LineDraft::new(
            format!(
                "asset main.{}.js {} KiB [emitted] [minimized] (name: main)",
                short_id(rng, 8),
                decimal(rng, 100.0, 600.0, 2)
            ),
            Category::Default,
        ),
        LineDraft::new(
            format!(
                "asset vendors.{}.js {} KiB [emitted] [minimized] (name: vendors)",
                short_id(rng, 8),
                decimal(rng, 50.0, 350.0, 2)
            ),
            Category::Default,
        ),
        LineDraft::new("asset index.html 1.2 KiB [emitted]", Category::Dim),
        LineDraft::new(
            format!(
                "webpack {}.{}.0 compiled successfully in {} ms",
                rng.gen_range(5..8),
                rng.gen_range(0..90),
                rng.gen_range(2000..12_000)
            ),
            Category::Success,
        ),
        LineDraft::new(
            format!("{} modules", rng.gen_range(50..250)),
            Category::Dim,
        ),
    ]
}

fn tsc(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let mut lines = vec![LineDraft::command("$ tsc --build")];
    if rng.gen_bool(0.3) {
        let dir = pick(rng, &["utils", "components", "services"]);
        lines.push(LineDraft::new(
            format!(
                "src/{dir}/index.ts:{}:{} - error TS2345: Argument of type 'string' is not assignable to parameter of type 'number'.",
                rng.gen_range(1..101),
                rng.gen_range(1..31)
            ),
            Category::Error,
        ));
        lines.push(LineDraft::new("Found 1 error.", Category::Error));
    } else {
        lines.push(LineDraft::new(
            format!("Successfully compiled {} files.", rng.gen_range(10..60)),
            Category::Success,
        ));
    }
    lines
}

fn make(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    const SOURCES: &[&str] = &["main", "utils", "parser", "network"];
    let mut lines = vec![LineDraft::command("$ make all")];
    for stem in &SOURCES[..rng.gen_range(2..5usize)] {
        lines.push(LineDraft::new(
            format!("g++ -O3 -Wall -c {stem}.cpp -o {stem}.o"),
            Category::Dim,
        ));
    }
    if rng.gen_bool(0.2) {
        lines.push(LineDraft::new(
            "main.cpp:42:15: warning: comparison of integer expressions of different signedness",
            Category::Warning,
        ));
    }
    lines.push(LineDraft::new(
        "g++ -o app main.o utils.o -lpthread",
        Category::Default,
    ));
    lines.push(LineDraft::new("Build complete.", Category::Success));
    lines
}

fn maven(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    vec![
        LineDraft::command("$ mvn clean package"),
        LineDraft::new("[INFO] Scanning for projects...", Category::Dim),
        LineDraft::new("[INFO] ", Category::Default),
        LineDraft::new(
            "[INFO] --- maven-clean-plugin:3.2.0:clean (default-clean) @ myapp ---",
            Category::Default,
        ),
        LineDraft::new("[INFO] Deleting /home/user/project/target", Category::Dim),
        LineDraft::new("[INFO] ", Category::Default),
        LineDraft::new(
            "[INFO] --- maven-compiler-plugin:3.11.0:compile (default-compile) @ myapp ---",
            Category::Default,
        ),
        LineDraft::new(
            format!(
                "[INFO] Compiling {} source files to /home/user/project/target/classes",
                rng.gen_range(20..70)
            ),
            Category::Default,
        ),
        LineDraft::new("[INFO] ", Category::Default),
        LineDraft::new("[INFO] BUILD SUCCESS", Category::Success).glow(),
        LineDraft::new(
            format!("[INFO] Total time:  {} s", decimal(rng, 5.0, 35.0, 3)),
            Category::Dim,
        ),
    ]
}

fn gradle(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    const TASKS: &[&str] = &[
        "compileJava",
        "processResources",
        "classes",
        "jar",
        "assemble",
        "compileTestJava",
        "test",
        "check",
        "build",
    ];
    let mut lines = vec![LineDraft::command("$ ./gradlew build")];
    lines.extend(
        TASKS
            .iter()
            .map(|task| LineDraft::new(format!("> Task :{task}"), Category::Default)),
    );
    lines.push(LineDraft::new("", Category::Default));
    lines.push(
        LineDraft::new(
            format!("BUILD SUCCESSFUL in {}s", rng.gen_range(5..25)),
            Category::Success,
        )
        .glow(),
    );
    let tasks = rng.gen_range(5..15);
    lines.push(LineDraft::new(
        format!("{tasks} actionable tasks: {tasks} executed"),
        Category::Dim,
    ));
    lines
}
