use std::rc::Rc;

use memokit::builder::CacheBuilder;
use memokit::weak::WeakAssociationCache;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Something expensive to derive from a key.
fn slugify(title: &str) -> String {
    title
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

struct Document {
    title: String,
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("memokit=trace")))
        .init();

    // value-keyed: bounded, evicts least recently used titles
    let mut slugs = match CacheBuilder::new(2).build::<String, String>() {
        Ok(cache) => cache,
        Err(err) => {
            eprintln!("{}", err);
            return;
        },
    };
    for title in ["Hello World", "Rust Caches", "Hello World", "Weak Keys"] {
        let slug = slugs.get_or_insert_with(title.to_string(), || slugify(title));
        println!("{:<12} -> {}", title, slug);
    }
    println!("cached titles: {:?}", slugs.keys().collect::<Vec<_>>());

    // identity-keyed: entries go away with their documents
    let mut word_counts = WeakAssociationCache::new();
    let docs: Vec<Rc<Document>> = ["a b c", "d e"]
        .iter()
        .map(|t| Rc::new(Document { title: t.to_string() }))
        .collect();
    for doc in &docs {
        let count = *word_counts.get_or_insert_with(doc, || doc.title.split_whitespace().count());
        println!("words in {:?}: {}", doc.title, count);
    }

    drop(docs);
    println!("reclaimed {} entries", word_counts.purge());
}

// Expected output (stdout):
// Hello World  -> hello-world
// Rust Caches  -> rust-caches
// Hello World  -> hello-world
// Weak Keys    -> weak-keys
// cached titles: ["Weak Keys", "Hello World"]
// words in "a b c": 3
// words in "d e": 2
// reclaimed 2 entries
