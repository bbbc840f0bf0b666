pub mod http;
#[cfg(test)]
pub mod mock;

use std::sync::Arc;

use crate::domain::models::Backend;

pub type BackendBox = Arc<dyn Backend + Send + Sync>;
