//! Driver source implementations.

use atelier_error::AtelierResult;
use atelier_interface::{DriverSource, GenerationDriver};
use std::sync::Arc;

/// Driver source wrapping an already-constructed driver.
///
/// Acquisition never fails; use this when the provider client was built
/// (and its credentials checked) at startup.
pub struct StaticDriverSource {
    driver: Arc<dyn GenerationDriver>,
}

impl StaticDriverSource {
    /// Wrap a driver.
    pub fn new(driver: Arc<dyn GenerationDriver>) -> Self {
        Self { driver }
    }
}

impl DriverSource for StaticDriverSource {
    fn acquire(&self) -> AtelierResult<Arc<dyn GenerationDriver>> {
        Ok(Arc::clone(&self.driver))
    }
}
