use rand::{Rng, RngCore};

use super::{LineDraft, Variant, decimal, pick};
use crate::engine::line::Category;

const TABLES: &[&str] = &[
    "users",
    "orders",
    "products",
    "sessions",
    "logs",
    "payments",
    "notifications",
    "analytics",
];

pub(super) const VARIANTS: &[Variant] = &[
    sql,
    migration,
    pool,
    orm,
    redis,
    mongo,
    backup,
    slow_query,
];

fn epoch_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn sql(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let table = pick(rng, TABLES);
    let query = match rng.gen_range(0..6) {
        0 => format!("SELECT * FROM {table} WHERE status = 'active' LIMIT 100"),
        1 => format!("INSERT INTO {table} (name, email, created_at) VALUES (?, ?, NOW())"),
        2 => format!("UPDATE {table} SET updated_at = NOW() WHERE id = ?"),
        3 => format!(
            "DELETE FROM {table} WHERE created_at < DATE_SUB(NOW(), INTERVAL 30 DAY)"
        ),
        4 => format!("SELECT COUNT(*) FROM {table} GROUP BY status"),
        _ => format!(
            "SELECT t1.*, t2.name FROM {table} t1 JOIN {} t2 ON t1.id = t2.ref_id",
            pick(rng, TABLES)
        ),
    };
    vec![
        LineDraft::new(format!("[SQL] {query}"), Category::Info),
        LineDraft::new(
            format!(
                "[SQL] Query OK, {} rows affected ({}ms)",
                rng.gen_range(1..1001),
                decimal(rng, 1.0, 101.0, 2)
            ),
            Category::Success,
        ),
    ]
}

fn migration(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let action = pick(rng, &["create", "add", "modify", "drop"]);
    let id = format!("{}_{action}_{}", epoch_millis(), pick(rng, TABLES));
    vec![
        LineDraft::new(format!("[Migration] Running: {id}"), Category::Info),
        LineDraft::new(
            format!("[Migration] Creating table {}...", pick(rng, TABLES)),
            Category::Dim,
        ),
        LineDraft::new(
            "[Migration] Adding index on (user_id, created_at)...",
            Category::Dim,
        ),
        LineDraft::new(format!("[Migration] ✓ {id} completed"), Category::Success),
    ]
}

fn pool(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let active = rng.gen_range(5..25);
    let idle = rng.gen_range(10..40);
    let waiting = rng.gen_range(0..5);
    let mut lines = vec![
        LineDraft::new("[Pool] Connection pool status:", Category::Info),
        LineDraft::new(
            format!("[Pool]   Active: {active}, Idle: {idle}, Waiting: {waiting}"),
            Category::Dim,
        ),
    ];
    if waiting > 3 {
        lines.push(LineDraft::new(
            "[Pool] Warning: High connection wait time",
            Category::Warning,
        ));
    }
    lines
}

fn orm(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let t = pick(rng, TABLES);
    let (op, is_query) = match rng.gen_range(0..5) {
        0 => (
            format!("prisma:query SELECT `{t}`.`id`, `{t}`.`name` FROM `{t}` WHERE `{t}`.`id` = ?"),
            true,
        ),
        1 => (
            format!("prisma:query INSERT INTO `{t}` (`id`, `name`) VALUES (?, ?)"),
            true,
        ),
        2 => (
            format!("prisma:query UPDATE `{t}` SET `updated_at` = ? WHERE `id` = ?"),
            true,
        ),
        3 => ("prisma:info Starting transaction...".to_string(), false),
        _ => ("prisma:info Transaction committed".to_string(), false),
    };
    let mut lines = vec![LineDraft::new(op, Category::Dim)];
    if is_query {
        lines.push(LineDraft::new(
            format!("prisma:query {}ms", rng.gen_range(1..51)),
            Category::Dim,
        ));
    }
    lines
}

fn redis(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    const KEYS: &[&str] = &[
        "session:abc123",
        "cache:products",
        "rate:192.168.1.1",
        "queue:emails",
        "lock:payment",
    ];
    let key = pick(rng, KEYS);
    let (cmd, result) = match rng.gen_range(0..6) {
        0 => (format!("GET {key}"), "OK".to_string()),
        1 => (format!("SET {key} \"value\" EX 3600"), "OK".to_string()),
        2 => (format!("DEL {key}"), "(integer) 1".to_string()),
        3 => (
            format!("INCR {}", key.replacen(':', ":counter:", 1)),
            format!("(integer) {}", rng.gen_range(0..1000)),
        ),
        4 => (format!("EXPIRE {key} 3600"), "(integer) 1".to_string()),
        _ => (
            format!("TTL {key}"),
            format!("(integer) {}", rng.gen_range(0..3600)),
        ),
    };
    vec![
        LineDraft::new(format!("[Redis] > {cmd}"), Category::Info),
        LineDraft::new(format!("[Redis] {result}"), Category::Success),
    ]
}

fn mongo(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let c = pick(rng, &["users", "orders", "products", "logs"]);
    let op = match rng.gen_range(0..5) {
        0 => format!("db.{c}.find({{ status: \"active\" }}).limit(10)"),
        1 => format!("db.{c}.insertOne({{ name: \"item\", createdAt: new Date() }})"),
        2 => format!(
            "db.{c}.updateMany({{ active: true }}, {{ $set: {{ updatedAt: new Date() }} }})"
        ),
        3 => format!(
            "db.{c}.aggregate([{{ $match: {{}} }}, {{ $group: {{ _id: \"$type\", count: {{ $sum: 1 }} }} }}])"
        ),
        _ => format!("db.{c}.createIndex({{ \"userId\": 1, \"createdAt\": -1 }})"),
    };
    vec![
        LineDraft::new(format!("[MongoDB] {op}"), Category::Info),
        LineDraft::new(
            format!(
                "[MongoDB] {} document(s) ({}ms)",
                rng.gen_range(1..101),
                rng.gen_range(1..51)
            ),
            Category::Success,
        ),
    ]
}

fn backup(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let db = "production_db";
    vec![
        LineDraft::new(format!("[Backup] Starting backup for {db}..."), Category::Info),
        LineDraft::new(
            format!("[Backup] Dumping tables: {}...", TABLES[..4].join(", ")),
            Category::Dim,
        ),
        LineDraft::new("[Backup] Compressing backup file...", Category::Dim),
        LineDraft::new(
            format!(
                "[Backup] ✓ Backup complete: {db}_{}.sql.gz ({} MB)",
                epoch_millis(),
                decimal(rng, 50.0, 550.0, 2)
            ),
            Category::Success,
        ),
    ]
}

fn slow_query(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let table = pick(rng, TABLES);
    vec![
        LineDraft::new(
            format!(
                "[SlowQuery] Query exceeded threshold ({}ms > 1000ms):",
                rng.gen_range(1000..6000)
            ),
            Category::Warning,
        ),
        LineDraft::new(
            format!(
                "[SlowQuery] SELECT * FROM {table} WHERE status IN (?, ?, ?) ORDER BY created_at DESC"
            ),
            Category::Warning,
        ),
        LineDraft::new(
            "[SlowQuery] Consider adding index on (status, created_at)",
            Category::Dim,
        ),
    ]
}
