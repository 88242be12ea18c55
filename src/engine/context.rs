//! Read-only inputs shared by every phase of a tick.

use crate::cards::CardCatalog;
use crate::core::EngineConfig;

/// Tunables and card data, borrowed for the duration of one command.
#[derive(Clone, Copy, Debug)]
pub struct SimContext<'a> {
    pub config: &'a EngineConfig,
    pub catalog: &'a CardCatalog,
}

impl<'a> SimContext<'a> {
    #[must_use]
    pub fn new(config: &'a EngineConfig, catalog: &'a CardCatalog) -> Self {
        Self { config, catalog }
    }
}
