use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

use fleet_console::config::EnvironmentConfig;
use fleet_console::routes::build_router;
use fleet_console::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenvy::dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚗 Fleet Console - consola de gestión de flota");
    info!("==============================================");

    let config = EnvironmentConfig::default();
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let state = AppState::new(config);
    let app = build_router(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Rutas disponibles:");
    info!("   GET/POST /accounts/login/ (alias /login/) - Formulario de acceso");
    info!("   POST /accounts/logout/ - Cerrar sesión");
    info!("   GET  /vehicles/ - Listado paginado");
    info!("   GET/POST /vehicles/create/ - Alta de vehículo");
    info!("   GET  /vehicles/:car_number/ - Detalle");
    info!("   GET/POST /vehicles/:car_number/edit/ - Edición");
    info!("   GET/POST /vehicles/:car_number/delete/ - Borrado con confirmación");
    info!("   GET  /vehicles/export/ - Export CSV/JSON");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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
