use crate::api::CatalogContext;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) catalog: CatalogContext,
}
