//! User directory search handler.
//!
//! ```text
//! GET /user/search?search=ada&offset=0&rowCount=20
//! Authorization: Bearer <token>
//! ```

use actix_web::{HttpRequest, get, web};
use pagination::PageRequest;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Error;
use crate::domain::search::{RankedResultSet, SearchRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{AuthorizationCredential, resolve_requester};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_query_error, parse_optional_i64};

const OFFSET: FieldName = FieldName::new("offset");
const ROW_COUNT: FieldName = FieldName::new("rowCount");

/// Raw query parameters for `GET /user/search`.
///
/// Integers arrive as strings so malformed values surface as structured
/// validation errors rather than framework rejections.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive substring; empty or absent matches every account.
    #[param(example = "ada")]
    pub search: Option<String>,
    /// Zero-based position of the first result. Negative values act as zero.
    #[param(value_type = Option<i64>, example = 0)]
    pub offset: Option<String>,
    /// Page size. Capped at the configured maximum; zero or less yields an
    /// empty page.
    #[param(value_type = Option<i64>, example = 20)]
    pub row_count: Option<String>,
}

impl TryFrom<SearchParams> for SearchRequest {
    type Error = Error;

    fn try_from(value: SearchParams) -> Result<Self, Self::Error> {
        let offset = parse_optional_i64(value.offset, OFFSET)?.unwrap_or(0);
        let row_count = parse_optional_i64(value.row_count, ROW_COUNT)?;
        Ok(SearchRequest::new(
            value.search.unwrap_or_default(),
            PageRequest::new(offset, row_count),
        ))
    }
}

/// Successful search response.
///
/// `result` maps positions `"0"`, `"1"`, ... to usernames in rank order.
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    #[schema(example = true)]
    success: bool,
    #[schema(value_type = Object, example = json!({"0": "ada", "1": "grace"}))]
    result: RankedResultSet,
}

impl SearchResponse {
    fn new(result: RankedResultSet) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

fn parse_search_request(query: &str) -> ApiResult<SearchRequest> {
    let params = web::Query::<SearchParams>::from_query(query)
        .map_err(invalid_query_error)?
        .into_inner();
    SearchRequest::try_from(params)
}

/// Search the user directory on behalf of the authenticated requester.
///
/// Accounts followed by the requester come first, then accounts with more
/// followers, then lower identifiers.
#[utoipa::path(
    get,
    path = "/user/search",
    params(
        SearchParams,
        ("Authorization" = String, Header, description = "Access token, bare or with the Bearer scheme")
    ),
    responses(
        (status = 200, description = "Ranked page of usernames", body = SearchResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "User directory unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "searchUsers"
)]
#[get("/user/search")]
pub async fn search_users(
    state: web::Data<HttpState>,
    credential: AuthorizationCredential,
    request: HttpRequest,
) -> ApiResult<web::Json<SearchResponse>> {
    let search = parse_search_request(request.query_string())?;
    let requester = resolve_requester(state.identity.as_ref(), credential.token()).await?;
    let result = state.search.search(requester, &search).await?;
    Ok(web::Json(SearchResponse::new(result)))
}
