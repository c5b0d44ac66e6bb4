use rand::{Rng, RngCore};

use super::{LineDraft, Variant, pick, short_id};
use crate::engine::line::{Category, wall_clock_stamp};

const ENDPOINTS: &[&str] = &[
    "/api/users",
    "/api/auth/login",
    "/api/products",
    "/api/orders",
    "/api/health",
    "/api/v2/data",
    "/api/search",
    "/api/webhook",
    "/graphql",
    "/api/upload",
    "/api/payments",
    "/api/notifications",
    "/api/analytics",
    "/api/settings",
];

const METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE", "PATCH"];

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0",
    "PostmanRuntime/7.32",
    "axios/1.4.0",
    "curl/8.1.2",
];

pub(super) const VARIANTS: &[Variant] = &[
    access_log,
    express,
    startup,
    websocket,
    graphql,
    rate_limit,
    health,
    jobs,
];

/// 70% 2xx, 20% 4xx, 10% 5xx.
fn http_status(rng: &mut dyn RngCore) -> u16 {
    let roll: f64 = rng.r#gen();
    let family: &[u16] = if roll < 0.7 {
        &[200, 201, 204]
    } else if roll < 0.9 {
        &[400, 401, 404]
    } else {
        &[500, 502, 503]
    };
    family[rng.gen_range(0..family.len())]
}

fn status_category(status: u16) -> Category {
    match status {
        200..=299 => Category::Success,
        400..=499 => Category::Warning,
        500.. => Category::Error,
        _ => Category::Default,
    }
}

fn ip(rng: &mut dyn RngCore) -> String {
    format!(
        "{}.{}.{}.{}",
        rng.gen_range(0..255),
        rng.gen_range(0..255),
        rng.gen_range(0..255),
        rng.gen_range(0..255)
    )
}

fn access_log(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    (0..rng.gen_range(2..7))
        .map(|_| {
            let ip = ip(rng);
            let method = pick(rng, METHODS);
            let endpoint = pick(rng, ENDPOINTS);
            let status = http_status(rng);
            let bytes = rng.gen_range(100..50_100);
            let agent = pick(rng, USER_AGENTS);
            let time = rng.gen_range(10..510);
            LineDraft::new(
                format!(
                    "{ip} - - [{}] \"{method} {endpoint} HTTP/1.1\" {status} {bytes} \"-\" \"{agent}\" {time}ms",
                    wall_clock_stamp()
                ),
                status_category(status),
            )
        })
        .collect()
}

fn express(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    (0..rng.gen_range(2..6))
        .map(|_| {
            let method = pick(rng, METHODS);
            let endpoint = pick(rng, ENDPOINTS);
            let status = http_status(rng);
            let time = rng.gen_range(5..205);
            let category = match status_category(status) {
                Category::Default => Category::Success,
                other => other,
            };
            let mut draft = LineDraft::new(format!("{method} {endpoint} {status} {time}ms"), category);
            draft.options = draft.options.prefix(format!("[{}]", wall_clock_stamp()));
            draft
        })
        .collect()
}

fn startup(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let port = [3000, 8080, 5000, 4000][rng.gen_range(0..4)];
    let stamped = |text: &str| format!("[{}] {text}", wall_clock_stamp());
    vec![
        LineDraft::new(stamped("Starting server..."), Category::Info),
        LineDraft::new(stamped("Loading configuration from .env"), Category::Dim),
        LineDraft::new(stamped("Database connection established"), Category::Success),
        LineDraft::new(stamped("Redis cache connected"), Category::Success),
        LineDraft::new(stamped("Registering routes..."), Category::Dim),
        LineDraft::new(
            stamped(&format!("✓ Server listening on http://localhost:{port}")),
            Category::Success,
        )
        .glow(),
    ]
}

fn websocket(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    const ACTIONS: &[&str] = &[
        "connected",
        "disconnected",
        "message received",
        "broadcast sent",
        "room joined",
    ];
    let user = short_id(rng, 6);
    let mut lines = vec![LineDraft::new(
        format!("[WS] Client user_{user} {}", pick(rng, ACTIONS)),
        Category::Info,
    )];
    if rng.gen_bool(0.5) {
        lines.push(LineDraft::new(
            format!("[WS] Active connections: {}", rng.gen_range(10..110)),
            Category::Dim,
        ));
    }
    lines
}

fn graphql(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    const OPERATIONS: &[&str] = &[
        "Query.getUser",
        "Mutation.createPost",
        "Query.listProducts",
        "Subscription.onMessage",
    ];
    let operation = pick(rng, OPERATIONS);
    let mut lines = vec![LineDraft::new(
        format!(
            "[GraphQL] {operation} completed in {}ms",
            rng.gen_range(5..105)
        ),
        Category::Info,
    )];
    if rng.gen_bool(0.2) {
        lines.push(LineDraft::new(
            format!("[GraphQL] Cache HIT for {operation}"),
            Category::Dim,
        ));
    }
    lines
}

fn rate_limit(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let ip = ip(rng);
    if rng.gen_bool(0.5) {
        vec![LineDraft::new(
            format!(
                "[RateLimit] Request allowed for {ip} ({}/100 remaining)",
                rng.gen_range(50..100)
            ),
            Category::Dim,
        )]
    } else {
        vec![
            LineDraft::new(
                format!("[RateLimit] Rate limit exceeded for {ip}"),
                Category::Warning,
            ),
            LineDraft::new("[RateLimit] Retry after 60 seconds", Category::Warning),
        ]
    }
}

fn health(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    const SERVICES: &[&str] = &["database", "cache", "queue", "storage", "auth-service"];
    let mut lines = vec![LineDraft::new(
        "[Health] Running health checks...",
        Category::Info,
    )];
    for service in &SERVICES[..rng.gen_range(2..5usize)] {
        if rng.gen_bool(0.9) {
            lines.push(LineDraft::new(
                format!(
                    "[Health] ✓ {service}: healthy ({}ms)",
                    rng.gen_range(5..55)
                ),
                Category::Success,
            ));
        } else {
            lines.push(LineDraft::new(
                format!("[Health] ✗ {service}: unhealthy (timeout)"),
                Category::Error,
            ));
        }
    }
    lines
}

fn jobs(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    const JOBS: &[&str] = &[
        "SendEmailJob",
        "ProcessPaymentJob",
        "GenerateReportJob",
        "SyncDataJob",
        "CleanupJob",
    ];
    let job = pick(rng, JOBS);
    let id = short_id(rng, 8);
    let mut lines = vec![
        LineDraft::new(format!("[Worker] Processing job {job}#{id}"), Category::Info),
        LineDraft::new(
            format!(
                "[Worker] Job {job}#{id} completed in {}ms",
                rng.gen_range(100..5100)
            ),
            Category::Success,
        ),
    ];
    if rng.gen_bool(0.3) {
        lines.push(LineDraft::new(
            format!("[Worker] Queue depth: {} jobs pending", rng.gen_range(0..50)),
            Category::Dim,
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_category() {
        assert_eq!(status_category(204), Category::Success);
        assert_eq!(status_category(404), Category::Warning);
        assert_eq!(status_category(503), Category::Error);
        assert_eq!(status_category(302), Category::Default);
    }
}
