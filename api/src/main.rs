use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::{info, warn};

use sm_api::app::create_app;
use sm_api::routes::session::AppState;
use sm_core::repositories::TokenBlacklist;
use sm_core::services::session::{BlacklistPruner, PrunerConfig, SessionService};
use sm_core::services::token::{TokenCodec, TokenConfig};
use sm_infra::database::connection::health_check;
use sm_infra::{create_pool, MySqlTokenBlacklist, MySqlUserDirectory, RedisTokenBlacklist};
use sm_shared::config::{AuthConfig, CacheConfig, DatabaseConfig, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Shelfmark API server");

    // Load configuration
    let auth_config = AuthConfig::from_env();
    if auth_config.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set; using the development secret");
    }
    let database_config = DatabaseConfig::from_env();
    let server_config = ServerConfig::from_env();

    let pool = create_pool(&database_config)
        .await
        .expect("failed to connect to database");
    health_check(&pool)
        .await
        .expect("database health check failed");

    let codec = Arc::new(TokenCodec::new(TokenConfig::from_jwt_config(
        &auth_config.jwt,
    )));
    let users = Arc::new(MySqlUserDirectory::new(pool.clone()));

    // The blacklist backend is selected at startup: MySQL shares the
    // primary database, Redis keeps revocations in the cache tier with
    // native TTL eviction.
    let backend = std::env::var("BLACKLIST_BACKEND").unwrap_or_else(|_| "mysql".to_string());
    match backend.as_str() {
        "redis" => {
            let cache_config = CacheConfig::from_env();
            let blacklist = Arc::new(
                RedisTokenBlacklist::new(&cache_config)
                    .await
                    .expect("failed to connect to redis"),
            );
            run_server(codec, blacklist, users, server_config).await
        }
        _ => {
            let blacklist = Arc::new(MySqlTokenBlacklist::new(pool.clone()));
            run_server(codec, blacklist, users, server_config).await
        }
    }
}

async fn run_server<B>(
    codec: Arc<TokenCodec>,
    blacklist: Arc<B>,
    users: Arc<MySqlUserDirectory>,
    server_config: ServerConfig,
) -> std::io::Result<()>
where
    B: TokenBlacklist + 'static,
{
    let pruner = Arc::new(BlacklistPruner::new(
        blacklist.clone(),
        PrunerConfig::default(),
    ));
    pruner.start_background_task();

    let session_service = Arc::new(SessionService::new(codec, blacklist, users));

    let bind_address = server_config.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        let app_state = web::Data::new(AppState {
            session_service: session_service.clone(),
        });
        create_app(app_state)
    });

    if server_config.workers > 0 {
        server = server.workers(server_config.workers);
    }

    server.bind(bind_address)?.run().await
}
