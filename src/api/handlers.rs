//! API request handlers
//!
//! User-facing messages are in Spanish, matching the web page that calls
//! the form endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::server::AppState;
use crate::core::{convert_batch as run_batch, Amount, BatchReport, RawValue};
use crate::error::LexNumError;
use crate::excel::{self, ExcelExporter, ExcelImporter};

pub const SERVICE_NAME: &str = "LexNum";
pub const UPLOAD_FIELD: &str = "archivo";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const ERROR_CONVERSION: &str = "No se pudo convertir el número";
pub const ERROR_NO_FILE: &str = "No se proporcionó ningún archivo.";
pub const ERROR_FILE_TYPE: &str = "Solo se permiten archivos Excel (.xlsx, .xls).";
pub const ERROR_INVALID_EXCEL: &str = "No se pudo leer el archivo Excel.";
pub const ERROR_NO_COLUMN: &str = "No se encontró una columna 'Número' o 'Num' en el archivo.";
pub const ERROR_INTERNAL: &str = "Error interno del servidor.";
pub const ERROR_NOT_FOUND: &str = "Ruta no encontrada.";

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error body of the form endpoints: `{"error": "..."}`
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

/// Form endpoint failure with its HTTP status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ERROR_INTERNAL)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(method: &str, path: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "LexNum API Server".to_string(),
        version: state.version.clone(),
        description: "Conversión de montos a texto monetario (PESOS M.N.)".to_string(),
        endpoints: vec![
            EndpointInfo::new("GET", "/health", "Health check endpoint"),
            EndpointInfo::new("GET", "/version", "Get server version"),
            EndpointInfo::new("POST", "/convertir_texto", "Convert one amount: {\"numero\": ...}"),
            EndpointInfo::new(
                "POST",
                "/convertir_excel",
                "Upload an Excel file (field 'archivo'), download it with a 'Texto' column",
            ),
            EndpointInfo::new("POST", "/api/v1/convert", "Convert one amount: {\"amount\": ...}"),
            EndpointInfo::new(
                "POST",
                "/api/v1/convert/batch",
                "Convert many amounts: {\"amounts\": [...]}",
            ),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize, Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub max_pesos: u64,
    pub max_file_size_mb: usize,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        max_pesos: state.converter.max_pesos(),
        max_file_size_mb: state.config.max_file_size_mb,
    }))
}

/// Body of `/convertir_texto`. The number may arrive as a JSON string or number.
#[derive(Deserialize, Default)]
pub struct TextoRequest {
    #[serde(default)]
    pub numero: serde_json::Value,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct TextoResponse {
    pub texto: String,
}

/// POST /convertir_texto - Convert a single amount
///
/// A missing, blank, or unparseable JSON body yields `{"texto": ""}`.
pub async fn convertir_texto(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TextoResponse>, ApiError> {
    let request: TextoRequest = serde_json::from_slice(&body).unwrap_or_default();
    let raw = RawValue::from(&request.numero);

    let amount = raw.to_amount().map_err(|e| conversion_error(&raw, e))?;
    let Some(amount) = amount else {
        return Ok(Json(TextoResponse::default()));
    };

    let texto = state
        .converter
        .convert_amount(&amount)
        .map_err(|e| conversion_error(&raw, e))?;
    debug!("Conversión: {} -> {}", raw.display(), texto);

    Ok(Json(TextoResponse { texto }))
}

fn conversion_error(raw: &RawValue, e: LexNumError) -> ApiError {
    warn!("Error en convertir_texto ({}): {}", raw.display(), e);
    ApiError::bad_request(format!("{}: {}", ERROR_CONVERSION, e))
}

/// POST /convertir_excel - Convert the amount column of an uploaded workbook
pub async fn convertir_excel(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        warn!("Solicitud sin multipart: {}", e);
        ApiError::bad_request(ERROR_NO_FILE)
    })?;

    let (file_name, bytes) = read_upload(&state, &mut multipart).await?;
    ExcelImporter::check_file_name(&file_name).map_err(|_| ApiError::bad_request(ERROR_FILE_TYPE))?;

    let worker_state = Arc::clone(&state);
    let outcome = tokio::task::spawn_blocking(move || convert_upload(&worker_state, bytes))
        .await
        .map_err(|e| {
            error!("Conversion task failed: {}", e);
            ApiError::internal()
        })??;
    let (xlsx, report) = outcome;

    info!(
        file = %file_name,
        converted = report.converted,
        blank = report.blank,
        failed = report.failed,
        "Excel convertido"
    );

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        state.config.output_filename
    ))
    .map_err(|_| ApiError::internal())?;

    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static(XLSX_MIME)),
        (header::CONTENT_DISPOSITION, disposition),
        (
            HeaderName::from_static("x-lexnum-converted"),
            HeaderValue::from(report.converted),
        ),
        (
            HeaderName::from_static("x-lexnum-failed"),
            HeaderValue::from(report.failed),
        ),
    ];
    Ok((StatusCode::OK, headers, xlsx).into_response())
}

/// Pull the `archivo` field out of the form. Other fields are ignored.
async fn read_upload(
    state: &AppState,
    multipart: &mut Multipart,
) -> Result<(String, Bytes), ApiError> {
    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| upload_error(state, e))?;
        let Some(field) = field else {
            return Err(ApiError::bad_request(ERROR_NO_FILE));
        };
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if file_name.is_empty() {
            return Err(ApiError::bad_request(ERROR_NO_FILE));
        }
        let bytes = field.bytes().await.map_err(|e| upload_error(state, e))?;
        return Ok((file_name, bytes));
    }
}

fn upload_error(state: &AppState, e: axum::extract::multipart::MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!(
                "El archivo excede el tamaño máximo permitido de {} MB.",
                state.config.max_file_size_mb
            ),
        );
    }
    warn!("Error leyendo la carga: {}", e);
    ApiError::bad_request(ERROR_NO_FILE)
}

fn convert_upload(state: &AppState, bytes: Bytes) -> Result<(Vec<u8>, BatchReport), ApiError> {
    let sheet = ExcelImporter::from_bytes(bytes.to_vec()).map_err(|e| {
        warn!("Error leyendo Excel: {}", e);
        ApiError::bad_request(ERROR_INVALID_EXCEL)
    })?;
    info!("Excel leído: {} filas", sheet.row_count());

    let (_, report) = excel::convert_sheet(&state.converter, &sheet, None).map_err(|e| match e {
        LexNumError::MissingColumn(_) => ApiError::bad_request(ERROR_NO_COLUMN),
        other => {
            error!("Error convirtiendo Excel: {}", other);
            ApiError::internal()
        }
    })?;

    let xlsx = ExcelExporter::new(&sheet, &report).to_bytes().map_err(|e| {
        error!("Error generando Excel: {}", e);
        ApiError::internal()
    })?;
    Ok((xlsx, report))
}

/// Convert request
#[derive(Deserialize)]
pub struct ConvertRequest {
    #[serde(default)]
    pub amount: serde_json::Value,
}

/// Convert response
#[derive(Serialize, Default, Debug)]
pub struct ConvertResponse {
    pub input: String,
    pub amount: Option<Amount>,
    pub text: String,
}

/// POST /api/v1/convert - Convert a single amount
pub async fn convert(
    State(state): State<Arc<AppState>>,
    req: Result<Json<ConvertRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match req {
        Ok(req) => req,
        Err(rejection) => return rejected::<ConvertResponse>(rejection),
    };
    let raw = RawValue::from(&req.amount);
    let result = raw.to_amount().and_then(|amount| match amount {
        Some(a) => state.converter.convert_amount(&a).map(|text| (Some(a), text)),
        None => Ok((None, String::new())),
    });

    match result {
        Ok((amount, text)) => (
            StatusCode::OK,
            Json(ApiResponse::ok(ConvertResponse {
                input: raw.display(),
                amount,
                text,
            })),
        ),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ConvertResponse>::err(e.to_string())),
        ),
    }
}

/// Batch convert request
#[derive(Deserialize)]
pub struct BatchRequest {
    pub amounts: Vec<serde_json::Value>,
}

/// POST /api/v1/convert/batch - Convert many amounts, one outcome per input
pub async fn convert_batch(
    State(state): State<Arc<AppState>>,
    req: Result<Json<BatchRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match req {
        Ok(req) => req,
        Err(rejection) => return rejected::<BatchReport>(rejection),
    };
    let values: Vec<RawValue> = req.amounts.iter().map(RawValue::from).collect();
    let report = run_batch(&state.converter, &values);
    (StatusCode::OK, Json(ApiResponse::ok(report)))
}

/// Body that did not deserialize, answered in the standard envelope.
fn rejected<T: Serialize>(rejection: JsonRejection) -> (StatusCode, Json<ApiResponse<T>>) {
    warn!("Rejected JSON body: {}", rejection.body_text());
    (
        rejection.status(),
        Json(ApiResponse::err(rejection.body_text())),
    )
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, ERROR_NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== ApiResponse Tests ====================

    #[test]
    fn test_api_response_ok_creates_success_response() {
        let response: ApiResponse<String> = ApiResponse::ok("test data".to_string());

        assert!(response.success);
        assert_eq!(response.data, Some("test data".to_string()));
        assert!(response.error.is_none());
        // Verify UUID format (8-4-4-4-12)
        assert_eq!(response.request_id.len(), 36);
    }

    #[test]
    fn test_api_response_err_creates_error_response() {
        let response: ApiResponse<String> = ApiResponse::err("Something went wrong");

        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error, Some("Something went wrong".to_string()));
    }

    #[test]
    fn test_api_response_request_id_is_unique() {
        let response1: ApiResponse<String> = ApiResponse::ok("test1".to_string());
        let response2: ApiResponse<String> = ApiResponse::ok("test2".to_string());

        assert_ne!(response1.request_id, response2.request_id);
    }

    #[test]
    fn test_api_response_serializes_without_none_fields() {
        let response: ApiResponse<String> = ApiResponse::ok("data".to_string());
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("\"error\""));
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"data\":\"data\""));
    }

    // ==================== Request Deserialization Tests ====================

    #[test]
    fn test_texto_request_accepts_string_and_number() {
        let req: TextoRequest = serde_json::from_str(r#"{"numero": "1523.45"}"#).unwrap();
        assert_eq!(req.numero, serde_json::json!("1523.45"));

        let req: TextoRequest = serde_json::from_str(r#"{"numero": 1320.00}"#).unwrap();
        assert!(req.numero.is_number());
    }

    #[test]
    fn test_texto_request_missing_field_is_null() {
        let req: TextoRequest = serde_json::from_str("{}").unwrap();
        assert!(req.numero.is_null());
    }

    #[test]
    fn test_batch_request_deserialize() {
        let req: BatchRequest = serde_json::from_str(r#"{"amounts": [1, "2.50", null]}"#).unwrap();
        assert_eq!(req.amounts.len(), 3);
    }

    // ==================== Response Serialization Tests ====================

    #[test]
    fn test_health_response_serialize() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"status":"healthy","service":"LexNum"}"#);
    }

    #[test]
    fn test_convert_response_serialize() {
        let response = ConvertResponse {
            input: "1.5".to_string(),
            amount: Some(Amount::new(1, 50).unwrap()),
            text: "UN PESO 50/100 M.N.".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"pesos\":1"));
        assert!(json.contains("\"cents\":50"));
        assert!(json.contains("\"text\":\"UN PESO 50/100 M.N.\""));
    }

    #[test]
    fn test_api_error_status() {
        let response = ApiError::bad_request(ERROR_NO_FILE).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::internal().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
