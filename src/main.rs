//! minibank entry point: load config, connect the store, serve the gateway.

use std::sync::Arc;
use std::time::Duration;

use minibank::config::AppConfig;
use minibank::db::Database;
use minibank::gateway::{self, state::AppState};
use minibank::ledger::{LedgerStore, PgStore};
use minibank::logging;
use minibank::user_auth::UserAuthService;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut config = AppConfig::load(&env);
    if let Some(port) = get_port_override() {
        config.gateway.port = port;
    }

    let _guard = logging::init_logging(&config);
    tracing::info!(
        "minibank starting (env: {}, build: {})",
        env,
        env!("GIT_HASH")
    );

    let db = Arc::new(Database::connect(&config.postgres_url).await?);
    minibank::db::schema::init_schema(db.pool()).await?;

    let deadline = Duration::from_millis(config.transfer.deadline_ms);
    let store: Arc<dyn LedgerStore> =
        Arc::new(PgStore::with_lock_timeout(db.pool().clone(), deadline));
    let user_auth = Arc::new(UserAuthService::new(
        db.pool().clone(),
        config.auth.jwt_secret.clone(),
        config.auth.token_ttl_hours,
    ));

    let state = Arc::new(AppState::new(store, db, user_auth, deadline));
    gateway::run_server(&config, state).await
}
