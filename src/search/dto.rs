use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub profession: Option<String>,
    pub location: Option<String>,
    pub education: Option<String>,
    /// Minimum years of experience; arrives as a raw query string and
    /// non-numeric values are treated as absent.
    pub experience: Option<String>,
}
