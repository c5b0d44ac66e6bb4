use rand::{Rng, RngCore};

use super::{LineDraft, Variant, decimal, pick, short_id};
use crate::engine::line::{Category, wall_clock_stamp};

const IMAGES: &[&str] = &[
    "node:18-alpine",
    "python:3.11-slim",
    "nginx:latest",
    "redis:7",
    "postgres:15",
    "mongo:6",
    "mysql:8",
    "ubuntu:22.04",
    "alpine:3.18",
    "golang:1.21",
    "rust:1.73",
    "ruby:3.2",
    "php:8.2-fpm",
    "openjdk:17-slim",
    "gradle:8-jdk17",
];

const CONTAINERS: &[&str] = &[
    "web-app",
    "api-server",
    "cache",
    "db-primary",
    "worker-1",
    "proxy",
    "metrics",
    "logs-collector",
    "auth-service",
    "gateway",
    "scheduler",
];

const BUILD_STEPS: &[&str] = &[
    "WORKDIR /app",
    "COPY package*.json ./",
    "RUN npm install",
    "COPY . .",
    "RUN npm run build",
    "EXPOSE 3000",
    "CMD [\"node\", \"dist/index.js\"]",
];

pub(super) const VARIANTS: &[Variant] = &[build, pull, ps, compose_up, logs, images];

fn image_name(image: &str) -> &str {
    image.split_once(':').map_or(image, |(name, _)| name)
}

fn image_tag(image: &str) -> &str {
    image.split_once(':').map_or("latest", |(_, tag)| tag)
}

fn build(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let steps: usize = rng.gen_range(5..15);
    let mut lines = vec![
        LineDraft::command("$ docker build -t myapp:latest ."),
        LineDraft::new(
            format!(
                "[+] Building {}s ({steps}/{steps})",
                decimal(rng, 5.0, 35.0, 1)
            ),
            Category::Info,
        ),
    ];
    for i in 1..=steps.min(6) {
        let instruction = if i == 1 {
            format!("FROM {}", pick(rng, IMAGES))
        } else {
            BUILD_STEPS[(i - 2).min(BUILD_STEPS.len() - 1)].to_string()
        };
        let cached = rng.gen_bool(0.5);
        let (suffix, category) = if cached {
            (" CACHED", Category::Dim)
        } else {
            ("", Category::Default)
        };
        lines.push(LineDraft::new(
            format!("=> [{i}/{steps}] {instruction}{suffix}"),
            category,
        ));
    }
    lines.push(LineDraft::new("=> exporting to image", Category::Default));
    lines.push(LineDraft::new(
        "=> => naming to docker.io/library/myapp:latest",
        Category::Success,
    ));
    lines
}

fn pull(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let image = pick(rng, IMAGES);
    let mut lines = vec![
        LineDraft::command(format!("$ docker pull {image}")),
        LineDraft::new("Using default tag: latest", Category::Dim),
        LineDraft::new(
            format!("latest: Pulling from library/{}", image_name(image)),
            Category::Default,
        ),
    ];
    for _ in 0..rng.gen_range(3..8) {
        let layer = short_id(rng, 12);
        if rng.gen_bool(0.7) {
            lines.push(LineDraft::new(format!("{layer}: Pull complete"), Category::Default));
        } else {
            lines.push(LineDraft::new(format!("{layer}: Already exists"), Category::Dim));
        }
    }
    lines.push(LineDraft::new(
        format!("Digest: sha256:{}", short_id(rng, 24)),
        Category::Dim,
    ));
    lines.push(LineDraft::new(
        format!("Status: Downloaded newer image for {image}"),
        Category::Success,
    ));
    lines
}

fn ps(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let mut lines = vec![
        LineDraft::command("$ docker ps"),
        LineDraft::new(
            "CONTAINER ID   IMAGE                 STATUS          PORTS                    NAMES",
            Category::Accent,
        ),
    ];
    for _ in 0..rng.gen_range(2..7) {
        let id = short_id(rng, 12);
        let image = pick(rng, IMAGES);
        let mins = rng.gen_range(0..60);
        let port = rng.gen_range(3000..8000);
        let name = pick(rng, CONTAINERS);
        lines.push(LineDraft::new(
            format!("{id}   {image:<20}   Up {mins} min     0.0.0.0:{port}->{port}/tcp   {name}"),
            Category::Default,
        ));
    }
    lines
}

fn compose_up(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    const SERVICES: &[&str] = &["web", "api", "db", "redis", "nginx"];
    let active = &SERVICES[..rng.gen_range(2..5usize)];
    let mut lines = vec![LineDraft::command("$ docker-compose up -d")];
    for service in active {
        lines.push(LineDraft::new(
            format!("[+] Running {n}/{n}", n = active.len()),
            Category::Info,
        ));
        lines.push(LineDraft::new(
            format!(" ⠿ Container {service}  Started"),
            Category::Success,
        ));
    }
    lines
}

fn logs(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let container = pick(rng, CONTAINERS);
    let mut lines = vec![LineDraft::command(format!(
        "$ docker logs {container} --tail 5"
    ))];
    for _ in 0..5 {
        let message = match rng.gen_range(0..7) {
            0 => "Server listening on port 3000".to_string(),
            1 => "Connected to database".to_string(),
            2 => "Cache initialized".to_string(),
            3 => format!("Worker started with PID {}", rng.gen_range(0..10_000)),
            4 => "Health check passed".to_string(),
            5 => "Received SIGTERM, graceful shutdown".to_string(),
            _ => format!("Processing request from 192.168.1.{}", rng.gen_range(0..255)),
        };
        lines.push(LineDraft::new(
            format!("{} {message}", wall_clock_stamp()),
            Category::Dim,
        ));
    }
    lines
}

fn images(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let mut lines = vec![
        LineDraft::command("$ docker images"),
        LineDraft::new(
            "REPOSITORY          TAG       IMAGE ID       CREATED        SIZE",
            Category::Accent,
        ),
    ];
    for _ in 0..rng.gen_range(3..9) {
        let repo = image_name(pick(rng, IMAGES));
        let tag = if rng.gen_bool(0.5) {
            "latest"
        } else {
            image_tag(pick(rng, IMAGES))
        };
        let id = short_id(rng, 12);
        let days = rng.gen_range(1..31);
        let size = rng.gen_range(50..550);
        lines.push(LineDraft::new(
            format!("{repo:<18} {tag:<9} {id}   {days} days ago    {size}MB"),
            Category::Default,
        ));
    }
    lines
}
