use std::sync::Arc;

use crate::executor::TableInfoResolver;

use super::render::FormRenderer;
use super::translator::AddColumnsTranslator;

#[derive(Clone)]
pub struct AppState {
    pub translator: AddColumnsTranslator,
    pub table_info: Arc<dyn TableInfoResolver>,
    pub renderer: Arc<dyn FormRenderer>,
}

impl AppState {
    pub fn new(
        translator: AddColumnsTranslator,
        table_info: Arc<dyn TableInfoResolver>,
        renderer: Arc<dyn FormRenderer>,
    ) -> Self {
        Self {
            translator,
            table_info,
            renderer,
        }
    }
}
