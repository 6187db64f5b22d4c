//! Quick start example for the DashVector client.
//!
//! Creates a collection, writes a few documents and searches them.
//! Requires `DASHVECTOR_ENDPOINT` and `DASHVECTOR_API_KEY`.
//!
//! ```sh
//! RUST_LOG=dashvector_core=debug cargo run --example quickstart
//! ```

use dashvector::prelude::*;
use dashvector::FieldType;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = Client::from_env()?;

    println!("🌟 DashVector Quick Start Example\n");

    let config = CollectionConfig::new()
        .with_dimension(8)
        .with_metric(Metric::Cosine)
        .with_field_schema("title", FieldType::String);
    let ready = client.create_serving("quickstart", &config)?;
    if !ready.is_serving() {
        println!("⚠️  create returned {}: {}", ready.code(), ready.message());
    }

    let collection = client.collection("quickstart");

    // Sample documents with their "embeddings"
    // (small dimension for demonstration; real embeddings are 384-1536 dim)
    let documents: [(&str, &str, [f32; 8]); 5] = [
        ("1", "Introduction to Rust programming", [0.9, 0.8, 0.1, 0.0, 0.1, 0.0, 0.2, 0.1]),
        ("2", "Advanced Rust patterns and idioms", [0.85, 0.9, 0.15, 0.05, 0.1, 0.0, 0.25, 0.15]),
        ("3", "Python for data science", [0.1, 0.2, 0.9, 0.85, 0.0, 0.1, 0.0, 0.2]),
        ("4", "Machine learning fundamentals", [0.2, 0.1, 0.7, 0.8, 0.6, 0.7, 0.1, 0.3]),
        ("5", "Systems programming with Rust", [0.8, 0.7, 0.2, 0.1, 0.15, 0.05, 0.3, 0.2]),
    ];

    println!("📥 Upserting {} documents...", documents.len());
    let written = collection.upsert(documents.iter().map(|(id, title, embedding)| {
        Doc::new()
            .with_id(*id)
            .with_vector(embedding.to_vec())
            .with_field("title", *title)
    }))?;
    println!("✅ {} documents written (code {})\n", written.output.len(), written.code);

    let query = Query::new()
        .with_vector(vec![0.88, 0.85, 0.12, 0.03, 0.12, 0.02, 0.22, 0.12])
        .with_topk(3)
        .with_output_fields(["title"]);
    let results = collection.query(&query)?;

    println!("📊 Top 3 Results:");
    println!("{:-<60}", "");
    for (rank, doc) in results.output.iter().enumerate() {
        let title = doc.fields.get_str("title").unwrap_or("Unknown");
        println!("  {}. [ID: {}] {} (score: {:.4})", rank + 1, doc.id, title, doc.score);
    }
    println!("{:-<60}\n", "");

    let filtered = collection.query(&query.clone().with_filter("title = 'Python for data science'"))?;
    println!("🔍 Filtered query returned {} result(s)", filtered.output.len());

    let fetched = collection.get(["1", "3"])?;
    println!("📄 Fetched ids: {:?}", fetched.output.keys().collect::<Vec<_>>());

    client.delete("quickstart")?;
    println!("\n✨ Done!");
    Ok(())
}
