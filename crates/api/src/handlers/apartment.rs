//! Handlers for the `/apartments` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use nawy_core::apartment::{DUPLICATE_UNIT_MESSAGE, ENTITY_APARTMENT};
use nawy_core::apartment_input::{validate_new_apartment, CreateApartmentInput};
use nawy_core::error::CoreError;
use nawy_core::listing::{validate_listing_params, PageMeta, RawListingParams};
use nawy_db::models::apartment::Apartment;
use nawy_db::repositories::apartment_repo::UQ_PROJECT_UNIT_NUMBER;
use nawy_db::repositories::ApartmentRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ApartmentId, ApiJson, ApiQuery};
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

/// GET /api/apartments
///
/// Filtered, sorted, paginated listing. A page past the end returns an empty
/// `data` array with the real `meta`.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RawListingParams>,
) -> AppResult<Json<PagedResponse<Apartment>>> {
    let spec = validate_listing_params(&params)?;
    let (data, total) = ApartmentRepo::list_page(&state.pool, &spec).await?;
    let meta = PageMeta::for_spec(&spec, total);

    if meta.is_past_end() && total > 0 {
        tracing::debug!(
            page = meta.page,
            total_pages = meta.total_pages,
            "Requested page is past the last page"
        );
    }

    Ok(Json(PagedResponse { data, meta }))
}

/// GET /api/apartments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApartmentId(id): ApartmentId,
) -> AppResult<Json<DataResponse<Apartment>>> {
    let apartment = ApartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: ENTITY_APARTMENT,
            id,
        }))?;
    Ok(Json(DataResponse { data: apartment }))
}

/// POST /api/apartments
///
/// All field violations are returned together. A duplicate
/// (project, unit_number) is reported as a conflict.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateApartmentInput>,
) -> AppResult<(StatusCode, Json<DataResponse<Apartment>>)> {
    let new_apartment = validate_new_apartment(&input)?;

    let apartment = ApartmentRepo::create(&state.pool, &new_apartment)
        .await
        .map_err(|err| {
            if nawy_db::is_unique_violation(&err, UQ_PROJECT_UNIT_NUMBER) {
                AppError::Core(CoreError::Conflict(DUPLICATE_UNIT_MESSAGE.to_string()))
            } else {
                AppError::Database(err)
            }
        })?;

    tracing::info!(
        apartment_id = apartment.id,
        project = %apartment.project,
        unit_number = %apartment.unit_number,
        "Apartment created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: apartment })))
}
