//! Page request parameters

use serde::{Deserialize, Serialize};

/// Records requested per page
pub const PAGE_SIZE: u32 = 25;

/// Pages available in one session
pub const TOTAL_PAGES: u32 = 10;

/// Seed sent with every request so pages are stable across the session
pub const DEFAULT_SEED: &str = "test";

/// Parameters of one page fetch. Built per fetch and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page index
    pub page: u32,
    /// Page size
    pub results: u32,
    /// Seed for deterministic results
    pub seed: String,
}

impl PageRequest {
    /// Create a request with the default page size and seed
    pub fn new(page: u32) -> Self {
        Self {
            page,
            results: PAGE_SIZE,
            seed: DEFAULT_SEED.to_string(),
        }
    }

    /// Override the page size
    pub fn with_results(mut self, results: u32) -> Self {
        self.results = results;
        self
    }

    /// Override the seed
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self
    }

    /// Query pairs in the order the API documents them
    pub fn query(&self) -> [(&'static str, String); 3] {
        [
            ("page", self.page.to_string()),
            ("results", self.results.to_string()),
            ("seed", self.seed.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let req = PageRequest::new(3);
        assert_eq!(req.page, 3);
        assert_eq!(req.results, 25);
        assert_eq!(req.seed, "test");
    }

    #[test]
    fn test_builder_overrides() {
        let req = PageRequest::new(1).with_results(5).with_seed("abc");
        assert_eq!(req.results, 5);
        assert_eq!(req.seed, "abc");
    }

    #[test]
    fn test_query_pairs() {
        let query = PageRequest::new(2).query();
        assert_eq!(query[0], ("page", "2".to_string()));
        assert_eq!(query[1], ("results", "25".to_string()));
        assert_eq!(query[2], ("seed", "test".to_string()));
    }
}
