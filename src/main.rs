use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use dealership_catalog::config::database::DatabaseConfig;
use dealership_catalog::config::environment::EnvironmentConfig;
use dealership_catalog::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter())),
        )
        .init();

    info!("🚘 Dealership Catalog - API de vehículos");
    info!("========================================");
    info!("🌍 Entorno: {}", config.environment);

    // Pool de base de datos (opcional, conexión perezosa)
    let pool = match DatabaseConfig::from_environment(&config) {
        Some(db_config) => {
            info!("🗄️ Base de datos configurada: {}", db_config.masked_url());
            Some(db_config.create_pool()?)
        }
        None => {
            warn!("⚠️ DATABASE_URL no configurada - source=database no disponible");
            None
        }
    };

    if config.auto_dev_api_key.is_none() {
        warn!("⚠️ AUTO_DEV_API_KEY no configurada - source=external devolverá error");
    }

    let addr: SocketAddr = config.server_addr().parse()?;
    let app = create_app(AppState::new(pool, config)?);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   GET  /api/vehicles - Listar vehículos (page, pageSize, search, minPrice, maxPrice, source)");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   POST /api/contact - Enviar formulario de contacto");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
