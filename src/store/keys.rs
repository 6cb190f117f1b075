pub const DEFAULT_NAMESPACE: &str = "focusboard";

/// Store keys for the three list domains, all under one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreKeys {
    pub tasks: String,
    pub projects: String,
    pub habits: String,
}

impl StoreKeys {
    pub fn namespaced(namespace: &str) -> Self {
        let namespace = namespace.trim();
        let namespace = if namespace.is_empty() {
            DEFAULT_NAMESPACE
        } else {
            namespace
        };

        Self {
            tasks: format!("{namespace}.tasks"),
            projects: format!("{namespace}.projects"),
            habits: format!("{namespace}.habits"),
        }
    }
}

impl Default for StoreKeys {
    fn default() -> Self {
        Self::namespaced(DEFAULT_NAMESPACE)
    }
}
