//! License lookup and license file download.

use actix_web::http::header::{ContentDisposition, ContentType, DispositionParam, DispositionType};
use actix_web::{HttpResponse, get, web};

use crate::domain::LicenseDetails;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_license_key};

async fn lookup(state: &HttpState, raw: &str) -> ApiResult<LicenseDetails> {
    let key = parse_license_key(raw, FieldName::new("key"))?;
    state.licenses.license_by_key(&key).await
}

#[utoipa::path(
    get,
    path = "/api/v1/licenses/{key}",
    params(("key" = String, Path, description = "License key",
        example = "DEVE-XXXX-0A1B2C3D-4E5F6A7B-8C9D0E1F")),
    responses(
        (
            status = 200,
            description = "License with product and license type",
            body = LicenseDetails
        ),
        (status = 400, description = "Malformed key", body = ErrorSchema),
        (status = 404, description = "Unknown key", body = ErrorSchema)
    ),
    tags = ["licenses"],
    operation_id = "getLicense",
    security([])
)]
#[get("/licenses/{key}")]
pub async fn get_license(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<LicenseDetails>> {
    lookup(&state, path.as_str()).await.map(web::Json)
}

/// Plain-text license file with activation instructions.
#[utoipa::path(
    get,
    path = "/api/v1/licenses/{key}/file",
    params(("key" = String, Path, description = "License key")),
    responses(
        (status = 200, description = "License file", content_type = "text/plain", body = String),
        (status = 400, description = "Malformed key", body = ErrorSchema),
        (status = 404, description = "Unknown key", body = ErrorSchema)
    ),
    tags = ["licenses"],
    operation_id = "downloadLicense",
    security([])
)]
#[get("/licenses/{key}/file")]
pub async fn download_license(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let details = lookup(&state, path.as_str()).await?;
    let disposition = ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(details.license_file_name())],
    };
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .insert_header(disposition)
        .body(details.license_file()))
}
