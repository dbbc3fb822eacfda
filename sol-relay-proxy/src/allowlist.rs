use std::collections::HashSet;

/// Read-only RPC methods permitted through the proxy by default
///
/// Matches the method set the wallet front-end actually issues. Anything a
/// deployment wants beyond these goes through `ALLOWED_RPC_METHODS`.
pub const DEFAULT_ALLOWED_METHODS: &[&str] = &[
    "getBalance",
    "getTokenAccountsByOwner",
    "getRecentBlockhash",
    "getTokenSupply",
    "getParsedTokenAccountsByOwner",
    "getAccountInfo",
    "getProgramAccounts",
];

/// Fixed set of RPC method names the proxy will forward
///
/// Matching is exact and case-sensitive. A disabled allow-list (`None`)
/// forwards every method unconditionally; that is an explicit deployment
/// choice, not an open default.
#[derive(Debug, Clone)]
pub struct MethodAllowList {
    methods: Option<HashSet<String>>,
}

impl MethodAllowList {
    /// Build an allow-list from the configured method names
    ///
    /// `None` disables enforcement.
    pub fn new(methods: Option<Vec<String>>) -> Self {
        Self {
            methods: methods.map(|m| m.into_iter().collect()),
        }
    }

    /// Whether enforcement is active for this deployment
    pub fn is_enforced(&self) -> bool {
        self.methods.is_some()
    }

    /// Check an inbound method name against the list
    ///
    /// A missing method field only passes when enforcement is disabled.
    pub fn allows(&self, method: Option<&str>) -> bool {
        match &self.methods {
            None => true,
            Some(set) => method.map_or(false, |m| set.contains(m)),
        }
    }
}
