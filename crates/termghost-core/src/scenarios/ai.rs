use rand::{Rng, RngCore};

use super::{LineDraft, Variant, decimal, pick};
use crate::engine::line::Category;

const MODELS: &[&str] = &[
    "gpt-4",
    "gpt-3.5-turbo",
    "llama-2-70b",
    "claude-3-opus",
    "mistral-7b",
    "gemini-pro",
];

const DATASETS: &[&str] = &[
    "ImageNet",
    "COCO",
    "WikiText-103",
    "CommonCrawl",
    "custom_dataset_v2",
];

pub(super) const VARIANTS: &[Variant] = &[
    epoch,
    batch,
    load_model,
    inference,
    dataset,
    gpu_status,
    evaluation,
    fine_tune,
    embeddings,
    rag,
];

/// Thousands separators: `1234567` -> `1,234,567`.
fn grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn epoch(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let epoch: u32 = rng.gen_range(1..101);
    let total = epoch + rng.gen_range(0..50);
    let accuracy: f64 = rng.gen_range(70.0..100.0);
    let lr: f64 = rng.gen_range(0.0..0.001);
    let mut lines = vec![
        LineDraft::new(format!("Epoch {epoch}/{total}"), Category::Info),
        LineDraft::new(
            format!(
                "  loss: {} - accuracy: {accuracy:.2}% - lr: {lr:.2e}",
                decimal(rng, 0.1, 2.1, 4)
            ),
            Category::Default,
        ),
        LineDraft::progress(
            "Training progress",
            Category::Dim,
            (f64::from(epoch) / f64::from(total) * 100.0).floor(),
        ),
    ];
    if rng.gen_bool(0.3) {
        lines.push(LineDraft::new(
            format!(
                "  ✓ New best model saved (val_accuracy: {:.2}%)",
                accuracy + rng.gen_range(0.0..2.0)
            ),
            Category::Success,
        ));
    }
    lines
}

fn batch(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let step: u32 = rng.gen_range(1..1001);
    let mut lines = vec![LineDraft::new(
        format!(
            "[Batch {step}/1000] loss: {} | {} samples/sec",
            decimal(rng, 0.1, 1.1, 4),
            rng.gen_range(50..150)
        ),
        Category::Default,
    )];
    if step % 100 == 0 {
        lines.push(LineDraft::new(
            format!("[Checkpoint] Model saved at step {step}"),
            Category::Success,
        ));
    }
    lines
}

fn load_model(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let model = pick(rng, MODELS);
    vec![
        LineDraft::new(format!("Loading model: {model}"), Category::Info),
        LineDraft::new(
            format!("  Parameters: {}B", decimal(rng, 1.0, 101.0, 1)),
            Category::Dim,
        ),
        LineDraft::progress("  Loading weights...", Category::Dim, rng.gen_range(0.0..100.0)),
        LineDraft::new(
            format!("  ✓ Model loaded ({}GB VRAM)", decimal(rng, 2.0, 22.0, 1)),
            Category::Success,
        ),
    ]
}

fn inference(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let model = pick(rng, MODELS);
    let tokens: u32 = rng.gen_range(50..550);
    let latency_ms: u32 = rng.gen_range(100..2100);
    let rate = f64::from(tokens) / (f64::from(latency_ms) / 1000.0);
    let mut lines = vec![
        LineDraft::new(format!("[Inference] Model: {model}"), Category::Info),
        LineDraft::new(
            format!("[Inference] Tokens: {tokens} | Latency: {latency_ms}ms | {rate:.1} tok/s"),
            Category::Default,
        ),
    ];
    if rng.gen_bool(0.2) {
        lines.push(LineDraft::new(
            format!("[Inference] Cache hit rate: {}%", decimal(rng, 70.0, 100.0, 1)),
            Category::Dim,
        ));
    }
    lines
}

fn dataset(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let name = pick(rng, DATASETS);
    let samples: u64 = rng.gen_range(10_000..1_010_000);
    vec![
        LineDraft::new(format!("Processing dataset: {name}"), Category::Info),
        LineDraft::new(
            format!("  Total samples: {}", grouped(samples)),
            Category::Dim,
        ),
        LineDraft::new("  Tokenizing...", Category::Dim),
        LineDraft::new("  Shuffling and batching...", Category::Dim),
        LineDraft::new(
            format!("  ✓ Dataset ready ({} batches)", samples / 32),
            Category::Success,
        ),
    ]
}

fn gpu_status(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let mut lines = vec![LineDraft::new("[Hardware] GPU Status:", Category::Info)];
    for gpu in 0..rng.gen_range(1..5) {
        let util = rng.gen_range(70..100);
        let mem = rng.gen_range(60..80);
        let temp = rng.gen_range(60..80);
        let category = if util > 90 {
            Category::Warning
        } else {
            Category::Default
        };
        lines.push(LineDraft::new(
            format!("  GPU {gpu}: {util}% util | {mem}% mem | {temp}°C"),
            category,
        ));
    }
    lines
}

fn evaluation(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    vec![
        LineDraft::new("[Evaluation] Running on validation set...", Category::Info),
        LineDraft::new(
            format!("  Accuracy:  {}%", decimal(rng, 88.0, 98.0, 2)),
            Category::Default,
        ),
        LineDraft::new(
            format!("  Precision: {}%", decimal(rng, 85.0, 95.0, 2)),
            Category::Default,
        ),
        LineDraft::new(
            format!("  Recall:    {}%", decimal(rng, 83.0, 93.0, 2)),
            Category::Default,
        ),
        LineDraft::new(
            format!("  F1 Score:  {}%", decimal(rng, 84.0, 94.0, 2)),
            Category::Default,
        ),
        LineDraft::new("  ✓ Metrics logged to wandb", Category::Success),
    ]
}

fn fine_tune(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let model = pick(rng, MODELS);
    vec![
        LineDraft::new(
            format!("[FineTune] Starting fine-tuning: {model}"),
            Category::Info,
        ),
        LineDraft::new("[FineTune] LoRA rank: 16, alpha: 32", Category::Dim),
        LineDraft::new(
            format!(
                "[FineTune] Trainable parameters: {}M ({}%)",
                decimal(rng, 10.0, 60.0, 1),
                decimal(rng, 1.0, 6.0, 2)
            ),
            Category::Dim,
        ),
        LineDraft::new("[FineTune] Gradient accumulation: 4 steps", Category::Dim),
    ]
}

fn embeddings(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    let docs: u64 = rng.gen_range(1000..11_000);
    let dim: u64 = [384, 768, 1536][rng.gen_range(0..3)];
    let megabytes = (docs * dim * 4) as f64 / 1024.0 / 1024.0;
    vec![
        LineDraft::new("[Embeddings] Generating embeddings...", Category::Info),
        LineDraft::new(
            format!(
                "[Embeddings] Documents: {} | Dimension: {dim}",
                grouped(docs)
            ),
            Category::Dim,
        ),
        LineDraft::new(
            format!("[Embeddings] ✓ Indexed in vector store ({megabytes:.2} MB)"),
            Category::Success,
        ),
    ]
}

fn rag(rng: &mut dyn RngCore) -> Vec<LineDraft> {
    vec![
        LineDraft::new("[RAG] Query received", Category::Info),
        LineDraft::new(
            format!(
                "[RAG] Retrieved {} relevant chunks (similarity > 0.{})",
                rng.gen_range(3..13),
                rng.gen_range(7..10)
            ),
            Category::Default,
        ),
        LineDraft::new(
            format!("[RAG] Context tokens: {}", rng.gen_range(500..2500)),
            Category::Dim,
        ),
        LineDraft::new(
            format!("[RAG] Response generated in {}ms", rng.gen_range(100..600)),
            Category::Success,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped() {
        assert_eq!(grouped(7), "7");
        assert_eq!(grouped(1000), "1,000");
        assert_eq!(grouped(1_234_567), "1,234,567");
        assert_eq!(grouped(999_999), "999,999");
    }
}
