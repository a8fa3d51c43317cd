use axum::{
    extract::{FromRef, Path, Query, State},
    http::{header, HeaderMap, HeaderValue},
    Json,
};
use time::{macros::format_description, OffsetDateTime};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        jwt::{AdminSession, JwtKeys},
        password::verify_password,
    },
    error::{ApiError, ApiResult},
    respond::{ApiData, ApiMessage},
    state::AppState,
};

use super::{
    dto::{
        AdminInfo, AdminLoginRequest, AdminLoginResponse, AdminStats, FeedbackPage, PageQuery,
        Paging, ProfileListQuery, ProfilesPage, UpdateStatusRequest, UserListQuery, UsersPage,
        PAGE_SIZE,
    },
    export::to_csv,
    repo::{self, AdminUser, ProfileFilter, UserFilter},
};

fn page_number(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[instrument(skip(state, payload))]
pub async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<AdminLoginRequest>,
) -> ApiResult<Json<ApiData<AdminLoginResponse>>> {
    let admin = AdminUser::find_active_by_username(&state.db, &payload.username)
        .await?
        .ok_or_else(|| {
            warn!(username = %payload.username, "admin login unknown username");
            ApiError::unauthorized("Invalid credentials!")
        })?;

    if !verify_password(&payload.password, &admin.password_hash) {
        warn!(admin_id = %admin.id, "admin login invalid password");
        return Err(ApiError::unauthorized("Invalid credentials!"));
    }

    AdminUser::touch_last_login(&state.db, admin.id).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign_admin(admin.id, &admin.role)?;

    info!(admin_id = %admin.id, username = %admin.username, "admin logged in");
    Ok(ApiData::ok(AdminLoginResponse {
        token,
        admin: AdminInfo {
            id: admin.id,
            username: admin.username,
            full_name: admin.full_name,
            role: admin.role,
        },
    }))
}

#[instrument(skip(state))]
pub async fn admin_session(
    State(state): State<AppState>,
    session: AdminSession,
) -> ApiResult<Json<ApiData<AdminInfo>>> {
    let admin = AdminUser::find_by_id(&state.db, session.admin_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

    Ok(ApiData::ok(AdminInfo {
        id: admin.id,
        username: admin.username,
        full_name: admin.full_name,
        role: admin.role,
    }))
}

#[instrument(skip(state, _session))]
pub async fn admin_stats(
    State(state): State<AppState>,
    _session: AdminSession,
) -> ApiResult<Json<ApiData<AdminStats>>> {
    let total_users = repo::count_all_users(&state.db).await?;
    let total_profiles = repo::count_all_profiles(&state.db).await?;
    let today_registrations = repo::count_registrations_today(&state.db).await?;
    let total_feedback = repo::count_feedback(&state.db).await?;

    Ok(ApiData::ok(AdminStats {
        total_users,
        total_profiles,
        today_registrations,
        total_feedback,
    }))
}

#[instrument(skip(state, _session))]
pub async fn list_users(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(query): Query<UserListQuery>,
) -> ApiResult<Json<ApiData<UsersPage>>> {
    let page = page_number(query.page);
    let offset = (page - 1) * PAGE_SIZE;
    let filter = UserFilter {
        search: non_empty(&query.search),
        status: non_empty(&query.filter),
    };

    let total_items = repo::count_users(&state.db, &filter).await?;
    let users = repo::list_users(&state.db, &filter, PAGE_SIZE, offset).await?;

    Ok(ApiData::ok(UsersPage {
        users,
        pagination: Paging::compute(page, total_items),
    }))
}

#[instrument(skip(state, _session))]
pub async fn list_profiles(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(query): Query<ProfileListQuery>,
) -> ApiResult<Json<ApiData<ProfilesPage>>> {
    let page = page_number(query.page);
    let offset = (page - 1) * PAGE_SIZE;
    let filter = ProfileFilter {
        search: non_empty(&query.search),
        profession: non_empty(&query.profession),
    };

    let total_items = repo::count_profiles(&state.db, &filter).await?;
    let profiles = repo::list_profiles(&state.db, &filter, PAGE_SIZE, offset).await?;
    // Facet counts feed the profession filter dropdown.
    let professions = crate::analytics::repo::count_by_profession(&state.db).await?;

    Ok(ApiData::ok(ProfilesPage {
        profiles,
        professions,
        pagination: Paging::compute(page, total_items),
    }))
}

#[instrument(skip(state, _session))]
pub async fn list_feedback(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<ApiData<FeedbackPage>>> {
    let page = page_number(query.page);
    let offset = (page - 1) * PAGE_SIZE;

    let total_items = repo::count_feedback(&state.db).await?;
    let feedback = repo::list_feedback(&state.db, PAGE_SIZE, offset).await?;

    Ok(ApiData::ok(FeedbackPage {
        feedback,
        pagination: Paging::compute(page, total_items),
    }))
}

#[instrument(skip(state, session, payload))]
pub async fn update_user_status(
    State(state): State<AppState>,
    session: AdminSession,
    Json(payload): Json<UpdateStatusRequest>,
) -> ApiResult<Json<ApiMessage>> {
    if payload.status.is_empty() {
        return Err(ApiError::validation("Status is required"));
    }

    crate::account::repo::User::update_status(&state.db, payload.user_id, &payload.status).await?;

    // Audit row follows the mutation; the pair is not transactional.
    repo::log_activity(
        &state.db,
        session.admin_id,
        &format!("update_user_status_{}", payload.status),
        "user",
        Some(payload.user_id),
        &format!("Changed user status to {}", payload.status),
    )
    .await?;

    info!(admin_id = %session.admin_id, user_id = %payload.user_id, status = %payload.status,
        "user status updated");
    Ok(ApiMessage::ok("User status updated successfully!"))
}

#[instrument(skip(state, session))]
pub async fn export(
    State(state): State<AppState>,
    session: AdminSession,
    Path(kind): Path<String>,
) -> ApiResult<(HeaderMap, String)> {
    let csv = match kind.as_str() {
        "users" => to_csv(&repo::export_users(&state.db).await?)?,
        "profiles" => to_csv(&repo::export_profiles(&state.db).await?)?,
        "feedback" => to_csv(&repo::export_feedback(&state.db).await?)?,
        _ => return Err(ApiError::validation("Invalid data type")),
    };

    repo::log_activity(
        &state.db,
        session.admin_id,
        &format!("export_{kind}"),
        "system",
        None,
        &format!("Exported {kind} data"),
    )
    .await?;

    let date_format = format_description!("[year][month][day]");
    let today = OffsetDateTime::now_utc()
        .format(&date_format)
        .map_err(anyhow::Error::from)?;
    let disposition = format!("attachment; filename=civichub_{kind}_{today}.csv");

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition).map_err(anyhow::Error::from)?,
    );

    info!(admin_id = %session.admin_id, kind = %kind, bytes = csv.len(), "export served");
    Ok((headers, csv))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_number_clamps_to_one() {
        assert_eq!(page_number(None), 1);
        assert_eq!(page_number(Some(0)), 1);
        assert_eq!(page_number(Some(-3)), 1);
        assert_eq!(page_number(Some(7)), 7);
    }
}
