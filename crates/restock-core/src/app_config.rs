/// Runtime settings for a restock sync run.
///
/// Built once at startup by [`crate::load_sync_config`] and passed by
/// reference into the Shopify client and the feed loader.
#[derive(Clone)]
pub struct SyncConfig {
    pub shopify_store: String,
    pub shopify_admin_token: String,
    pub shopify_api_version: String,
    pub sheet_csv_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl SyncConfig {
    /// Admin GraphQL endpoint for the configured store and API version.
    #[must_use]
    pub fn graphql_endpoint(&self) -> String {
        format!(
            "https://{}/admin/api/{}/graphql",
            self.shopify_store, self.shopify_api_version
        )
    }

    /// Names of the connection variables that are blank. These are not
    /// rejected at load time; callers decide whether to warn.
    #[must_use]
    pub fn unset_vars(&self) -> Vec<&'static str> {
        [
            ("SHOPIFY_STORE", &self.shopify_store),
            ("SHOPIFY_ADMIN_TOKEN", &self.shopify_admin_token),
            ("SHEET_CSV_URL", &self.sheet_csv_url),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(var, _)| var)
        .collect()
    }
}

impl std::fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncConfig")
            .field("shopify_store", &self.shopify_store)
            .field("shopify_admin_token", &"[redacted]")
            .field("shopify_api_version", &self.shopify_api_version)
            .field("sheet_csv_url", &self.sheet_csv_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
