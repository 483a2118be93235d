use std::sync::Arc;

use axum::extract::FromRef;
use spotiskill_catalog::Catalog;

#[derive(Clone, FromRef)]
pub struct ServerContext {
    pub catalog: Arc<Catalog>,
}
