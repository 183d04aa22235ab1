use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use service::appointment::repo::seaorm::SeaOrmAppointmentRepository;
use service::appointment::AppointmentService;
use service::auth::repo::seaorm::SeaOrmAccountRepository;
use service::auth::AuthService;
use service::seed;

use crate::routes::{self, auth::ServerState};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8081);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: connect, migrate, seed, build the app and serve it.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // DB connection: pool options from config when available
    let db = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => models::db::connect_with_config(&cfg.database).await?,
        Err(_) => models::db::connect().await?,
    };
    migration::Migrator::up(&db, None).await?;

    let accounts = Arc::new(SeaOrmAccountRepository { db: db.clone() });
    // Seeding failures are logged, never fatal to startup
    match seed::seed_default_accounts(accounts.as_ref()).await {
        Ok(created) if created > 0 => info!(created, "seeded default accounts"),
        Ok(_) => {}
        Err(e) => error!(error = %e, "seeding default accounts failed; continuing"),
    }

    let appointments = Arc::new(SeaOrmAppointmentRepository { db: db.clone() });
    let state = ServerState {
        db,
        auth: Arc::new(AuthService::new(Arc::clone(&accounts))),
        appointments: Arc::new(AppointmentService::new(accounts, appointments)),
    };

    let cors = build_cors();
    let app: Router = routes::build_router(cors, state);

    let addr = load_bind_addr()?;
    info!(%addr, "starting appointments server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
