//! Shallow, ordered merge of configuration documents

use crate::remote::model::ConfigJson;

/// Fold `documents` into one mapping, later documents winning per key
///
/// Only top-level keys are merged; nested values are replaced whole.
pub fn merge_documents<I>(documents: I) -> ConfigJson
where
    I: IntoIterator<Item = ConfigJson>,
{
    documents
        .into_iter()
        .fold(ConfigJson::new(), |mut merged, document| {
            for (key, value) in document {
                merged.insert(key, value);
            }
            merged
        })
}
