//! Route manifest ("Hoja de Ruta") PDF generation.
//!
//! Produces a printable A4 sheet listing deliveries in the order they
//! were recorded, one line per stop with its delivery date, flowing onto
//! additional pages when there are more stops than fit on one.

use std::io::BufWriter;

use chrono::NaiveDate;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};
use thiserror::Error;

use crate::models::delivery::Delivery;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 8.0;
const TITLE_SIZE_PT: f32 = 18.0;
const BODY_SIZE_PT: f32 = 11.0;

/// Errors that can occur while generating a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// PDF construction failed.
    #[error("PDF error: {0}")]
    Pdf(#[from] printpdf::Error),

    /// Writing the finished document failed.
    #[error("write error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the route manifest as PDF bytes.
///
/// Lists every delivery in recording order, or only those for `date`
/// when one is given. An empty manifest still produces a valid one-page
/// document stating there are no deliveries.
///
/// # Errors
///
/// Returns `ManifestError` if the document cannot be built or serialized.
pub fn render_manifest(
    date: Option<NaiveDate>,
    deliveries: &[Delivery],
) -> Result<Vec<u8>, ManifestError> {
    let (doc, page, layer) = PdfDocument::new(
        "Hoja de Ruta",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "contenido",
    );
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut writer = PageWriter {
        doc: &doc,
        layer: doc.get_page(page).get_layer(layer),
        y: PAGE_HEIGHT_MM - MARGIN_MM,
    };

    let title = date.map_or_else(
        || "Hoja de Ruta".to_string(),
        |date| format!("Hoja de Ruta - {}", date.format("%d/%m/%Y")),
    );
    writer.line(&bold, TITLE_SIZE_PT, &title);
    writer.skip();

    if deliveries.is_empty() {
        let empty = if date.is_some() {
            "Sin repartos para esta fecha."
        } else {
            "Sin repartos registrados."
        };
        writer.line(&font, BODY_SIZE_PT, empty);
    }

    for (index, delivery) in deliveries.iter().enumerate() {
        writer.line(&font, BODY_SIZE_PT, &stop_line(index + 1, delivery));
    }

    let mut buffer = BufWriter::new(Vec::new());
    doc.save(&mut buffer)?;
    buffer
        .into_inner()
        .map_err(|e| ManifestError::Io(e.into_error()))
}

/// One manifest line: number, address, deliverer, delivery date, and
/// the originating order when there is one.
fn stop_line(number: usize, delivery: &Delivery) -> String {
    let order = delivery
        .order_id
        .map_or_else(String::new, |id| format!(" (pedido #{id})"));
    format!(
        "{number}. {} - {} - {}{order}",
        delivery.address,
        delivery.deliverer,
        delivery.delivery_date.format("%d/%m/%Y"),
    )
}

/// Cursor over the current page, adding a fresh page on overflow.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: printpdf::PdfLayerReference,
    y: f32,
}

impl PageWriter<'_> {
    fn line(&mut self, font: &IndirectFontRef, size: f32, text: &str) {
        if self.y < MARGIN_MM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "contenido");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        self.layer
            .use_text(text, size, Mm(MARGIN_MM), Mm(self.y), font);
        self.y -= LINE_HEIGHT_MM;
    }

    fn skip(&mut self) {
        self.y -= LINE_HEIGHT_MM;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use mercadito_core::{DeliveryId, OrderId};

    use super::*;

    fn delivery(id: i32, address: &str) -> Delivery {
        Delivery {
            id: DeliveryId::new(id),
            deliverer: "Carlos".to_string(),
            address: address.to_string(),
            delivery_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            lat: -26.8083,
            lon: -65.2176,
            order_id: Some(OrderId::new(7)),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_manifest_empty() {
        let bytes = render_manifest(None, &[]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let bytes = render_manifest(Some(date), &[]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_manifest_with_stops() {
        let deliveries = vec![
            delivery(1, "Av. Aconquija 1500"),
            delivery(2, "Laprida 120"),
        ];
        let bytes = render_manifest(None, &deliveries).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_render_manifest_overflows_to_second_page() {
        let deliveries: Vec<Delivery> = (0..60)
            .map(|i| delivery(i, &format!("Calle {i}")))
            .collect();
        let bytes = render_manifest(None, &deliveries).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_stop_line_carries_the_delivery_date() {
        // The unfiltered manifest mixes dates, so each stop names its own.
        let line = stop_line(4, &delivery(1, "Laprida 120"));
        assert_eq!(line, "4. Laprida 120 - Carlos - 01/06/2024 (pedido #7)");
    }
}
