use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub name: String,
    pub email: String,
    pub feedback_type: String,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub rating: i32,
}
