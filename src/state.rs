use crate::backend::HttpBackend;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub backend: HttpBackend,
}

impl AppState {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }

    pub fn from_config(config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        let backend = HttpBackend::new(&config.backend_url, config.backend_timeout)?;
        Ok(Self::new(backend))
    }
}
