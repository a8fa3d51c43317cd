use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Serialize, FromRow)]
pub struct ProfessionCount {
    pub profession: String,
    pub count: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct LocationCount {
    pub current_location: String,
    pub count: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct EducationCount {
    pub education: String,
    pub count: i64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ExperienceCount {
    pub experience_level: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub profession_stats: Vec<ProfessionCount>,
    pub location_stats: Vec<LocationCount>,
    pub education_stats: Vec<EducationCount>,
    pub experience_stats: Vec<ExperienceCount>,
}
