use filmorate::infra::{self, config::Config, telemetry};
use filmorate::Services;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Reads env vars (or .env):\n\
           STORAGE_BACKEND (memory|postgres), DATABASE_URL, DB_MAX_CONNECTIONS,\n\
           BIND_ADDR, POPULAR_DEFAULT_COUNT\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    // Force-read config (nice error messages if missing)
    let config = Config::from_env()?;
    telemetry::init();

    println!("> Preflight:");
    println!("  STORAGE_BACKEND={:?}", config.storage_backend);
    println!("  DB_MAX_CONNECTIONS={}", config.db_max_connections);
    println!("  BIND_ADDR={}", config.bind_addr);
    println!("  POPULAR_DEFAULT_COUNT={}", config.popular_default_count);

    // Connect (creates the schema and seeds catalogs on Postgres).
    let storage = infra::open_storage(&config).await?;
    storage
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("{} storage is not reachable: {}", storage.backend_name(), e))?;
    println!("  Storage ({}) reachable.", storage.backend_name());

    let services = Services::new(storage);
    let genres = services.catalog.get_all_genres().await?;
    let ratings = services.catalog.get_all_ratings().await?;
    println!("  Genres: {}", genres.len());
    println!("  Ratings: {}", ratings.len());
    if genres.is_empty() || ratings.is_empty() {
        return Err(anyhow::anyhow!(
            "catalogs are empty; films cannot be created until genres and ratings exist"
        ));
    }

    let films = services.films.get_all_films().await?;
    let users = services.users.get_all_users().await?;
    println!("  Films: {}  Users: {}", films.len(), users.len());

    println!("> Preflight OK.");
    Ok(())
}
