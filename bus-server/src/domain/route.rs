//! Routes and stops: descriptive records looked up by id for display.

/// A route from the static schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub id: String,
    pub short_name: String,
    pub long_name: String,
}

impl Route {
    /// Name shown to riders: short name, then long name, then the id.
    pub fn display_name(&self) -> &str {
        [&self.short_name, &self.long_name]
            .into_iter()
            .find(|name| !name.is_empty())
            .map(String::as_str)
            .unwrap_or(&self.id)
    }
}

/// A stop with a known position.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}
