use std::sync::Arc;

use movies_types::Lang;

use crate::service::DefaultMovieService;

pub struct AppState<S = DefaultMovieService> {
    state: Arc<AppStateInner<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        AppState {
            state: self.state.clone(),
        }
    }
}

impl<S> AppState<S> {
    pub fn new(service: S, app_config: AppConfig) -> Self {
        AppState {
            state: Arc::new(AppStateInner {
                service,
                app_config,
            }),
        }
    }

    pub fn service(&self) -> &S {
        &self.state.service
    }

    pub fn app_config(&self) -> &AppConfig {
        &self.state.app_config
    }
}

struct AppStateInner<S> {
    service: S,
    app_config: AppConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_page_size: i64,
    pub default_language: Lang,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            default_page_size: movies_dal::DEFAULT_LIMIT,
            default_language: Lang::default(),
        }
    }
}
