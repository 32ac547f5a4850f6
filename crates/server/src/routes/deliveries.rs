//! Deliveries screen: geocoded delivery log, Leaflet map, and the route
//! manifest PDF.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::instrument;

use mercadito_core::OrderId;

use crate::{
    db::{DelivererRepository, DeliveryRepository, OrderRepository},
    error::AppError,
    filters,
    models::delivery::{CreateDeliveryInput, Delivery},
    services::{geocoder::GeocoderError, manifest},
    state::AppState,
};

use super::customers::FlashQuery;

/// Build the deliveries sub-router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/deliveries", get(index).post(create))
        .route("/deliveries/manifest.pdf", get(manifest_pdf))
}

/// Delivery form fields.
///
/// `order_id` arrives as a string because the "no order" option submits
/// an empty value.
#[derive(Debug, Deserialize)]
pub struct DeliveryForm {
    pub deliverer: String,
    pub address: String,
    pub delivery_date: NaiveDate,
    pub order_id: Option<String>,
}

/// Delivery view for templates.
#[derive(Debug, Clone)]
pub struct DeliveryView {
    pub id: i32,
    pub deliverer: String,
    pub address: String,
    pub delivery_date: String,
    pub order: String,
}

impl From<&Delivery> for DeliveryView {
    fn from(delivery: &Delivery) -> Self {
        Self {
            id: delivery.id.as_i32(),
            deliverer: delivery.deliverer.clone(),
            address: delivery.address.clone(),
            delivery_date: delivery.delivery_date.format("%d/%m/%Y").to_string(),
            order: delivery
                .order_id
                .map_or_else(|| "-".to_string(), |id| format!("#{id}")),
        }
    }
}

/// Marker data serialized into the Leaflet initialization script.
#[derive(Debug, serde::Serialize)]
struct MarkerData {
    lat: f64,
    lon: f64,
    label: String,
}

/// Deliveries screen template.
#[derive(Template)]
#[template(path = "deliveries/index.html")]
pub struct DeliveriesIndexTemplate {
    pub current_path: String,
    pub deliveries: Vec<DeliveryView>,
    pub deliverers: Vec<String>,
    pub order_ids: Vec<i32>,
    pub markers_json: String,
    pub message: Option<String>,
    pub error_message: Option<String>,
}

fn flash_messages(query: &FlashQuery) -> (Option<String>, Option<String>) {
    let message = query.success.as_deref().map(|token| match token {
        "created" => "Reparto registrado.".to_string(),
        other => other.to_string(),
    });
    let error_message = query.error.as_deref().map(|token| match token {
        "address_not_found" => "No se encontró la dirección.".to_string(),
        "geocoder_failed" => "El servicio de mapas no respondió.".to_string(),
        "save_failed" => "No se pudo guardar el reparto.".to_string(),
        other => other.to_string(),
    });
    (message, error_message)
}

/// Deliveries screen handler.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(query): Query<FlashQuery>) -> Html<String> {
    let deliveries = DeliveryRepository::new(state.pool())
        .list()
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to list deliveries: {e}");
            vec![]
        });
    let deliverers = DelivererRepository::new(state.pool())
        .list()
        .await
        .map(|deliverers| deliverers.into_iter().map(|d| d.name).collect())
        .unwrap_or_else(|e| {
            tracing::error!("Failed to list deliverers: {e}");
            vec![]
        });
    let order_ids = OrderRepository::new(state.pool())
        .list()
        .await
        .map(|orders| orders.iter().map(|o| o.id.as_i32()).collect())
        .unwrap_or_else(|e| {
            tracing::error!("Failed to list orders: {e}");
            vec![]
        });

    let markers: Vec<MarkerData> = deliveries
        .iter()
        .map(|d| MarkerData {
            lat: d.lat,
            lon: d.lon,
            label: format!("{} - {}", d.address, d.deliverer),
        })
        .collect();
    let markers_json = inline_json(&markers);

    let (message, error_message) = flash_messages(&query);
    let template = DeliveriesIndexTemplate {
        current_path: "/deliveries".to_string(),
        deliveries: deliveries.iter().map(DeliveryView::from).collect(),
        deliverers,
        order_ids,
        markers_json,
        message,
        error_message,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Record a delivery: geocode the address, then insert.
///
/// A geocoder miss is a user-facing message; nothing is written. An
/// order ID that is present but not a number is a 400 (the form's
/// selector only offers real IDs).
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<DeliveryForm>,
) -> Result<Redirect, AppError> {
    let order_id = parse_order_id(form.order_id.as_deref())?;

    let coords = match state.geocoder().geocode(&form.address).await {
        Ok(coords) => coords,
        Err(GeocoderError::NoResults(_)) => {
            return Ok(Redirect::to("/deliveries?error=address_not_found"));
        }
        Err(e) => {
            tracing::error!("Geocoding failed for '{}': {e}", form.address);
            return Ok(Redirect::to("/deliveries?error=geocoder_failed"));
        }
    };

    let input = CreateDeliveryInput {
        deliverer: form.deliverer,
        address: form.address,
        delivery_date: form.delivery_date,
        lat: coords.lat,
        lon: coords.lon,
        order_id,
    };

    let repo = DeliveryRepository::new(state.pool());
    match repo.create(&input).await {
        Ok(delivery) => {
            tracing::info!(delivery_id = delivery.id.as_i32(), "Delivery recorded");
            Ok(Redirect::to("/deliveries?success=created"))
        }
        Err(e) => {
            tracing::error!("Failed to record delivery: {e}");
            Ok(Redirect::to("/deliveries?error=save_failed"))
        }
    }
}

/// Parse the optional order selector value. The "no order" option
/// submits an empty string; anything else must be an order ID.
fn parse_order_id(raw: Option<&str>) -> Result<Option<OrderId>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s
            .parse::<i32>()
            .map(|id| Some(OrderId::new(id)))
            .map_err(|_| AppError::BadRequest(format!("invalid order id: {s}"))),
    }
}

/// Serialize markers for the inline map script. `<` is emitted as a
/// JSON escape so an address can never terminate the script block.
fn inline_json(markers: &[MarkerData]) -> String {
    match serde_json::to_string(markers) {
        // serde_json only produces '<' inside string literals, so the
        // blanket replace cannot corrupt the structure.
        Ok(json) => json.replace('<', "\\u003c"),
        Err(e) => {
            tracing::error!("Failed to serialize map markers: {e}");
            "[]".to_string()
        }
    }
}

/// Query parameters for the manifest PDF.
#[derive(Debug, Deserialize)]
pub struct ManifestQuery {
    /// Optional filter; without it the manifest lists every delivery.
    pub date: Option<NaiveDate>,
}

/// Serve the route manifest ("Hoja de Ruta") as a PDF.
///
/// Deliveries are usually recorded ahead of their delivery date, so the
/// default manifest lists all of them with their dates; `?date=` narrows
/// it to a single day.
#[instrument(skip(state))]
pub async fn manifest_pdf(
    State(state): State<AppState>,
    Query(query): Query<ManifestQuery>,
) -> Result<Response, AppError> {
    let repo = DeliveryRepository::new(state.pool());
    let deliveries = match query.date {
        Some(date) => repo.list_for_date(date).await?,
        None => repo.list().await?,
    };

    let bytes = manifest::render_manifest(query.date, &deliveries)?;
    let filename = query.date.map_or_else(
        || "hoja-de-ruta.pdf".to_string(),
        |date| format!("hoja-de-ruta-{date}.pdf"),
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_delivery_view_order_label() {
        let delivery = Delivery {
            id: mercadito_core::DeliveryId::new(3),
            deliverer: "Carlos".to_string(),
            address: "Laprida 120".to_string(),
            delivery_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            lat: -26.8,
            lon: -65.2,
            order_id: Some(OrderId::new(9)),
            created_at: Utc::now(),
        };
        let view = DeliveryView::from(&delivery);
        assert_eq!(view.order, "#9");
        assert_eq!(view.delivery_date, "01/06/2024");
    }

    #[test]
    fn test_marker_json_shape() {
        let markers = vec![MarkerData {
            lat: -26.8,
            lon: -65.2,
            label: "Laprida 120 - Carlos".to_string(),
        }];
        let json = inline_json(&markers);
        assert!(json.contains("\"lat\":-26.8"));
        assert!(json.contains("Laprida 120"));
    }

    #[test]
    fn test_marker_json_cannot_close_the_script_block() {
        let markers = vec![MarkerData {
            lat: -26.8,
            lon: -65.2,
            label: "Laprida 120 </script><script>alert(1)</script> - Carlos".to_string(),
        }];
        let json = inline_json(&markers);
        assert!(!json.contains('<'), "raw '<' would end the inline script");
        assert!(json.contains("\\u003c/script>"));

        // The escape is plain JSON, so the label survives a round trip.
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value[0]["label"],
            "Laprida 120 </script><script>alert(1)</script> - Carlos"
        );
    }

    #[test]
    fn test_parse_order_id() {
        assert_eq!(parse_order_id(None).unwrap(), None);
        assert_eq!(parse_order_id(Some("")).unwrap(), None);
        assert_eq!(parse_order_id(Some("9")).unwrap(), Some(OrderId::new(9)));
        assert!(matches!(
            parse_order_id(Some("abc")),
            Err(AppError::BadRequest(_))
        ));
    }
}
