use super::UserView;
use serde::{Deserialize, Serialize};
use tinyapp_core::{AliasRecord, UserRecord};

/// Form body for creating and updating an alias.
#[derive(Debug, Deserialize)]
pub struct UrlForm {
    #[serde(rename = "longURL", default)]
    pub long_url: String,
}

#[derive(Debug, Serialize)]
pub struct UrlView {
    pub short_code: String,
    pub short_url: String,
    pub long_url: String,
    pub created_at: String,
    pub total_visits: u64,
    pub unique_visitors: u64,
}

impl UrlView {
    pub fn from_record(record: &AliasRecord, base_url: &str) -> Self {
        Self {
            short_code: record.alias.to_string(),
            short_url: record.alias.to_url(base_url),
            long_url: record.target_url.clone(),
            created_at: record.created_at.to_string(),
            total_visits: record.visits.total_visits,
            unique_visitors: record.visits.unique_visitors,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UrlIndexView {
    pub user: UserView,
    pub urls: Vec<UrlView>,
}

impl UrlIndexView {
    /// Lists records newest first, ties broken by alias for a stable order.
    pub fn new(user: &UserRecord, mut records: Vec<AliasRecord>, base_url: &str) -> Self {
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.alias.as_str().cmp(b.alias.as_str()))
        });
        Self {
            user: UserView::from(user),
            urls: records
                .iter()
                .map(|record| UrlView::from_record(record, base_url))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UrlShowView {
    pub user: Option<UserView>,
    pub url: UrlView,
}
