//! Multi-vector collections, partitions and grouped queries.
//!
//! Requires `DASHVECTOR_ENDPOINT` and `DASHVECTOR_API_KEY`.

use dashvector::prelude::*;
use dashvector::{FieldType, VectorQuery, VectorSchema};
use rand::Rng;
use tracing_subscriber::EnvFilter;

const DIM: usize = 16;

fn random_vector(rng: &mut impl Rng) -> Vec<f32> {
    (0..DIM).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = Client::from_env()?;
    let mut rng = rand::thread_rng();

    // Two named vectors; no collection-level dimension
    let config = CollectionConfig::new()
        .with_vector_schema("title", VectorSchema::new(DIM).with_metric(Metric::Cosine))
        .with_vector_schema("body", VectorSchema::new(DIM).with_metric(Metric::DotProduct))
        .with_field_schema("author", FieldType::String);
    client.create_serving("multi_vector", &config)?;
    let collection = client.collection("multi_vector");

    collection.create_partition_serving("archive")?;
    let archive = collection.partition("archive");

    let authors = ["ana", "bo", "cy"];
    let docs: Vec<Doc> = (0..30)
        .map(|i| {
            Doc::new()
                .with_id(format!("doc-{i}"))
                .with_named_vector("title", random_vector(&mut rng))
                .with_named_vector("body", random_vector(&mut rng))
                .with_sparse(i, 0.5)
                .with_field("author", authors[i as usize % authors.len()])
        })
        .collect();
    let written = archive.insert(docs)?;
    println!("📥 inserted {} docs into 'archive'", written.output.len());

    // Search both vectors and fuse with reciprocal rank fusion
    let query = Query::new()
        .with_named_vector("title", VectorQuery::new(random_vector(&mut rng)).with_num_candidates(20))
        .with_named_vector("body", VectorQuery::new(random_vector(&mut rng)))
        .with_rrf_ranker(60)
        .with_topk(5);
    for doc in &archive.query(&query)?.output {
        println!("  {} {:.4}", doc.id, doc.score);
    }

    let grouped = archive.group_query(
        "author",
        &GroupQuery::new()
            .with_vector(random_vector(&mut rng))
            .with_vector_field("title")
            .with_group_count(3)
            .with_group_topk(2),
    )?;
    for group in &grouped.output {
        let ids: Vec<&str> = group.docs.iter().map(|d| d.id.as_str()).collect();
        println!("👥 {} -> {:?}", group.group_id, ids);
    }

    let stats = collection.partition_stats("archive")?;
    println!("📊 archive holds {} docs", stats.output.total_doc_count);

    archive.drop_all()?;
    collection.delete_partition("archive")?;
    client.delete("multi_vector")?;
    Ok(())
}
