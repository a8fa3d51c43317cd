use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::account::repo::User;
use crate::analytics::dto::ProfessionCount;
use crate::feedback::repo::Feedback;
use crate::profile::repo::Profile;

/// Fixed page size for every admin listing.
pub const PAGE_SIZE: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminInfo {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub token: String,
    pub admin: AdminInfo,
}

#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub total_users: i64,
    pub total_profiles: i64,
    pub today_registrations: i64,
    pub total_feedback: i64,
}

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub search: Option<String>,
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileListQuery {
    pub page: Option<i64>,
    pub search: Option<String>,
    pub profession: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub user_id: Uuid,
    pub status: String,
}

/// Listing envelope: where the caller is inside the full result set.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Paging {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub start_item: i64,
    pub end_item: i64,
}

impl Paging {
    pub fn compute(page: i64, total_items: i64) -> Self {
        let offset = (page - 1) * PAGE_SIZE;
        Self {
            current_page: page,
            total_pages: (total_items + PAGE_SIZE - 1) / PAGE_SIZE,
            total_items,
            start_item: offset + 1,
            end_item: (offset + PAGE_SIZE).min(total_items),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UsersPage {
    pub users: Vec<User>,
    pub pagination: Paging,
}

#[derive(Debug, Serialize)]
pub struct ProfilesPage {
    pub profiles: Vec<Profile>,
    pub professions: Vec<ProfessionCount>,
    pub pagination: Paging,
}

#[derive(Debug, Serialize)]
pub struct FeedbackPage {
    pub feedback: Vec<Feedback>,
    pub pagination: Paging,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_page_of_45_items() {
        let paging = Paging::compute(3, 45);
        assert_eq!(
            paging,
            Paging {
                current_page: 3,
                total_pages: 3,
                total_items: 45,
                start_item: 41,
                end_item: 45,
            }
        );
    }

    #[test]
    fn exact_multiple_has_no_phantom_page() {
        let paging = Paging::compute(2, 40);
        assert_eq!(paging.total_pages, 2);
        assert_eq!(paging.start_item, 21);
        assert_eq!(paging.end_item, 40);
    }

    #[test]
    fn empty_set_reports_zero_pages() {
        let paging = Paging::compute(1, 0);
        assert_eq!(paging.total_pages, 0);
        assert_eq!(paging.total_items, 0);
        assert_eq!(paging.end_item, 0);
    }

    #[test]
    fn first_page_of_partial_set() {
        let paging = Paging::compute(1, 7);
        assert_eq!(paging.total_pages, 1);
        assert_eq!(paging.start_item, 1);
        assert_eq!(paging.end_item, 7);
    }
}
