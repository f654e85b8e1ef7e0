use crate::config::TableTypeRule;
use crate::translate::translator::TranslationConfig;

#[derive(Debug, Clone, Default)]
pub struct ScriptOptions {
    pub translation: TranslationConfig,
    pub table_types: Vec<TableTypeRule>,
}
