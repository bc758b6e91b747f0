use std::sync::Arc;

use crate::config::{Config, LogFormat};
use fintrack_core::{
    aggregation::{AnalysisService, AnalysisServiceTrait, DashboardService, DashboardServiceTrait},
    categories::{CategoryService, CategoryServiceTrait},
    forecast::{ForecastProviderTrait, RollingAverageForecaster},
    goals::{GoalService, GoalServiceTrait},
    imports::{ImportService, ImportServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
};
use fintrack_storage_sqlite::{
    categories::CategoryRepository, db, goals::GoalRepository, transactions::TransactionRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub transaction_service: Arc<dyn TransactionServiceTrait + Send + Sync>,
    pub category_service: Arc<dyn CategoryServiceTrait + Send + Sync>,
    pub goal_service: Arc<dyn GoalServiceTrait + Send + Sync>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait + Send + Sync>,
    pub analysis_service: Arc<dyn AnalysisServiceTrait + Send + Sync>,
    pub forecast_provider: Arc<dyn ForecastProviderTrait + Send + Sync>,
    pub import_service: Arc<dyn ImportServiceTrait + Send + Sync>,
    pub default_page_size: i64,
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // `init` also routes `log` records from the library crates into tracing.
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);

    let pool = db::create_pool(&config.db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let category_repository = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let transaction_repository =
        Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));

    let category_service = Arc::new(CategoryService::new(category_repository));
    let transaction_service = Arc::new(TransactionService::new(
        transaction_repository.clone(),
        category_service.clone(),
    ));
    let goal_service = Arc::new(GoalService::new(goal_repository, category_service.clone()));
    let dashboard_service = Arc::new(DashboardService::new(
        transaction_repository.clone(),
        config.weekly_goal,
    ));
    let analysis_service = Arc::new(AnalysisService::new(
        transaction_repository.clone(),
        category_service.clone(),
    ));
    let forecast_provider = Arc::new(RollingAverageForecaster::new(
        transaction_repository.clone(),
    ));
    let import_service = Arc::new(ImportService::new(
        transaction_repository,
        category_service.clone(),
    ));

    Ok(Arc::new(AppState {
        transaction_service,
        category_service,
        goal_service,
        dashboard_service,
        analysis_service,
        forecast_provider,
        import_service,
        default_page_size: config.default_page_size,
    }))
}
