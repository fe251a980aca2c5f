//! # Seed Data Generator
//!
//! Populates the database with a development catalog.
//!
//! ## Usage
//! ```bash
//! # Generate 200 book titles (default)
//! cargo run -p bookstore-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p bookstore-db --bin seed -- --count 1000
//!
//! # Specify database path
//! cargo run -p bookstore-db --bin seed -- --db ./data/bookstore.db
//! ```
//!
//! ## Generated Data
//! - Every author, category and publisher listed below
//! - `count` book titles, each linked to one or two authors and one or two
//!   categories, created through the same workflow the HTTP API uses

use std::env;

use bookstore_core::biz::{CreateBookTitleBiz, CreateCatalogEntryBiz};
use bookstore_core::{Context, CreateBookTitleRequest, CreateCatalogEntryRequest, ShortIdGenerator};
use bookstore_db::{Database, DbConfig};

const AUTHORS: &[&str] = &[
    "Ursula K. Le Guin",
    "Terry Pratchett",
    "Octavia E. Butler",
    "Donald Knuth",
    "Barbara Liskov",
    "Italo Calvino",
    "Chimamanda Ngozi Adichie",
    "Haruki Murakami",
    "Mary Shelley",
    "Jorge Luis Borges",
    "Brian Kernighan",
    "Toni Morrison",
];

const CATEGORIES: &[&str] = &[
    "Science Fiction",
    "Fantasy",
    "Computer Science",
    "Literary Fiction",
    "Short Stories",
    "Horror",
    "Programming",
    "Classics",
];

const PUBLISHERS: &[&str] = &[
    "Penguin Random House",
    "HarperCollins",
    "Addison-Wesley",
    "O'Reilly Media",
    "Vintage",
];

const TITLE_WORDS: &[&str] = &[
    "Left", "Hand", "Darkness", "Small", "Gods", "Art", "Invisible", "Cities",
    "Garden", "Forking", "Paths", "Structure", "Interpretation", "Kindred",
    "Wind-Up", "Bird", "Chronicle", "Programs",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut db_path = String::from("./bookstore.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bookstore Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of book titles to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./bookstore.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Bookstore Seed Data Generator");
    println!("================================");
    println!("Database:    {}", db_path);
    println!("Book titles: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
        .fetch_one(db.pool())
        .await?;
    if existing > 0 {
        println!("⚠ Database already has {} authors", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let ctx = Context::new();
    let start = std::time::Instant::now();

    // Reference entities in one transaction
    let session = db.begin(&ctx).await?;
    let authors = CreateCatalogEntryBiz::new(ShortIdGenerator, session.authors());
    let categories = CreateCatalogEntryBiz::new(ShortIdGenerator, session.categories());
    let publishers = CreateCatalogEntryBiz::new(ShortIdGenerator, session.publishers());
    let author_ids = create_entries(&ctx, &authors, AUTHORS).await?;
    let category_ids = create_entries(&ctx, &categories, CATEGORIES).await?;
    let publisher_ids = create_entries(&ctx, &publishers, PUBLISHERS).await?;
    session.commit().await?;

    println!(
        "✓ Created {} authors, {} categories, {} publishers",
        author_ids.len(),
        category_ids.len(),
        publisher_ids.len()
    );

    // One transaction per book title, as the API does
    println!();
    println!("Generating book titles...");
    let mut generated = 0;
    for seed in 0..count {
        let session = db.begin(&ctx).await?;
        let biz = CreateBookTitleBiz::new(
            ShortIdGenerator,
            session.book_title_repo(),
            session.author_checker(),
            session.category_checker(),
        );

        match biz.create(&ctx, &generate_request(seed, &author_ids, &category_ids)).await {
            Ok(_) => {
                session.commit().await?;
                generated += 1;
            }
            Err(e) => {
                eprintln!("Failed to create book title #{}: {}", seed, e);
                session.rollback().await?;
                continue;
            }
        }

        if generated % 50 == 0 {
            println!("  Generated {} book titles...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} book titles in {:?}", generated, elapsed);
    println!("✓ Seed complete!");

    Ok(())
}

async fn create_entries<S>(
    ctx: &Context,
    biz: &CreateCatalogEntryBiz<ShortIdGenerator, S>,
    names: &[&str],
) -> Result<Vec<String>, Box<dyn std::error::Error>>
where
    S: bookstore_core::store::EntityStore,
    S::Entity: bookstore_core::CatalogEntry,
{
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        let created = biz
            .create(ctx, &CreateCatalogEntryRequest { name: name.to_string() })
            .await?;
        ids.push(created.id);
    }
    Ok(ids)
}

/// Deterministic book title: three words, one or two authors, one or two
/// categories.
fn generate_request(seed: usize, authors: &[String], categories: &[String]) -> CreateBookTitleRequest {
    let word = |n: usize| TITLE_WORDS[(seed * 7 + n * 13) % TITLE_WORDS.len()];
    let name = format!("The {} of {} {} #{}", word(0), word(1), word(2), seed);

    let mut author_ids = vec![authors[seed % authors.len()].clone()];
    if seed % 3 == 0 {
        author_ids.push(authors[(seed + 5) % authors.len()].clone());
    }

    let mut category_ids = vec![categories[seed % categories.len()].clone()];
    if seed % 4 == 0 {
        category_ids.push(categories[(seed + 3) % categories.len()].clone());
    }

    CreateBookTitleRequest {
        name,
        description: format!("Development catalog entry {}", seed),
        author_ids,
        category_ids,
    }
}
