//! Resolver configuration.

/// Configuration parameters for trip resolution.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Results returned when the request does not ask for a number
    /// (or asks for zero).
    pub default_max_results: usize,

    /// Upper bound on results per request.
    pub max_results_cap: usize,
}

impl ResolverConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(default_max_results: usize, max_results_cap: usize) -> Self {
        Self {
            default_max_results,
            max_results_cap,
        }
    }

    /// Number of results to return for a requested count.
    pub fn result_limit(&self, requested: Option<usize>) -> usize {
        match requested {
            Some(n) if n > 0 => n.min(self.max_results_cap),
            _ => self.default_max_results.min(self.max_results_cap),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_max_results: 3,
            max_results_cap: 50,
        }
    }
}
