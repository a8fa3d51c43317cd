use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub full_name: String,
    pub profile_email: Option<String>,
    pub profession: String,
    pub education: String,
    pub experience: f64,
    pub skills: String,
    pub current_location: String,
    pub phone: String,
    pub company: Option<String>,
    pub salary_range: Option<String>,
    pub availability: Option<String>,
}
