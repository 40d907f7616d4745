use std::sync::Arc;

use censo_core::config::LayeredConfig;
use censo_core::error::Result;
use censo_core::view::ViewConfig;
use censo_store::ports::CensusStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CensusStore>,
    pub settings: LayeredConfig,
    /// Resolved once at startup from `settings`
    pub view: ViewConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn CensusStore>, settings: LayeredConfig) -> Result<Self> {
        let view = settings.to_view_config()?;
        Ok(Self {
            store,
            settings,
            view,
        })
    }
}
