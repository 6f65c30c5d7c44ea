use crate::config::MapConfig;
use crate::error::CoordinateError;
use crate::palette::Color;
use crate::types::{Icon, LatLng, Marker, Popup, Tooltip};
use beerlog_catalog::{CoordinateValue, StoreView};
use html_escape::encode_text;

/// Build the map marker for one store.
///
/// Fails with a [`CoordinateError`] when either coordinate is
/// missing, does not convert to a finite number, or falls outside the
/// valid latitude/longitude range.
pub fn compose_marker(
    store: &StoreView,
    color: &Color,
    config: &MapConfig,
) -> Result<Marker, CoordinateError> {
    let position = placement(store)?;

    Ok(Marker {
        store_id: store.store_id(),
        position,
        color: color.clone(),
        icon: Icon::beer_mug(color, config.icon_size),
        tooltip: tooltip(store, config),
        popup: popup(store, config),
    })
}

fn placement(store: &StoreView) -> Result<LatLng, CoordinateError> {
    let lat = coordinate(store, "latitude", store.lat())?;
    let lng = coordinate(store, "longitude", store.lng())?;
    let position = LatLng::new(lat, lng);
    if !position.is_valid() {
        return Err(CoordinateError::new(
            store.store_id(),
            format!("({lat}, {lng}) is outside the valid latitude/longitude range"),
        ));
    }
    Ok(position)
}

fn coordinate(
    store: &StoreView,
    axis: &str,
    raw: Option<&CoordinateValue>,
) -> Result<f64, CoordinateError> {
    let raw =
        raw.ok_or_else(|| CoordinateError::new(store.store_id(), format!("{axis} is missing")))?;
    raw.to_finite().ok_or_else(|| {
        CoordinateError::new(
            store.store_id(),
            format!("{axis} {raw} is not a finite number"),
        )
    })
}

fn tooltip(store: &StoreView, config: &MapConfig) -> Tooltip {
    let mut html = format!(
        "<div style=\"width:{}px;text-align:center;\"><h4>{}</h4>",
        config.tooltip_width,
        encode_text(store.store_name())
    );
    // No image tag at all when there is no image, never an empty src
    if let Some(src) = store.brand_image().data_uri() {
        html.push_str(&format!(
            "<img src=\"{src}\" style=\"max-width:100px;max-height:100px;\">"
        ));
    }
    html.push_str(&format!(
        "<p><strong>{}</strong></p></div>",
        encode_text(store.brand_name())
    ));
    Tooltip { html }
}

fn popup(store: &StoreView, config: &MapConfig) -> Popup {
    let mut html = format!(
        "<div style=\"width:{}px\"><h3>{}</h3>",
        config.popup_width,
        encode_text(store.store_name())
    );
    html.push_str(&format!(
        "<p><strong>Brand:</strong> {}</p>",
        encode_text(store.brand_name())
    ));
    html.push_str(&format!(
        "<p><strong>Address:</strong> {}</p>",
        encode_text(store.address())
    ));
    if let Some(contact) = store.contact() {
        html.push_str(&format!(
            "<p><strong>Contact:</strong> {}</p>",
            encode_text(contact)
        ));
    }
    html.push_str("</div>");

    Popup {
        html,
        max_width: config.popup_max_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beerlog_catalog::{Brand, BrandId, Store, StoreId, UNKNOWN_BRAND};

    fn red() -> Color {
        Color::parse("#FF6B6B").unwrap()
    }

    fn ale_co() -> Brand {
        Brand::new(BrandId(1), "Ale Co").with_image_blob(b"GIF89a\x01\x00")
    }

    #[test]
    fn test_marker_carries_position_and_color() {
        let store = Store::new(StoreId(10), "Taproom", "Shibuya")
            .at(35.0, 139.0)
            .brand(BrandId(1));
        let view = StoreView::new(store, Some(&ale_co()));

        let marker = compose_marker(&view, &red(), &MapConfig::default()).unwrap();
        assert_eq!(marker.store_id, StoreId(10));
        assert_eq!(marker.position, LatLng::new(35.0, 139.0));
        assert_eq!(marker.color, red());
        assert_eq!(marker.icon, Icon::beer_mug(&red(), 40));
        assert_eq!(marker.popup.max_width, 300);
    }

    #[test]
    fn test_tooltip_includes_brand_image_when_present() {
        let store = Store::new(StoreId(10), "Taproom", "Shibuya").at(35.0, 139.0);
        let view = StoreView::new(store, Some(&ale_co()));

        let marker = compose_marker(&view, &red(), &MapConfig::default()).unwrap();
        assert!(marker
            .tooltip
            .html
            .contains("<img src=\"data:image/gif;base64,R0lGODlhAQA=\""));
        assert!(marker.tooltip.html.contains("<h4>Taproom</h4>"));
        assert!(marker.tooltip.html.contains("<strong>Ale Co</strong>"));
    }

    #[test]
    fn test_missing_brand_renders_sentinel_without_image() {
        let store = Store::new(StoreId(11), "Corner Bar", "Shibuya").at(35.1, 139.1);
        let view = StoreView::new(store, None);

        let marker = compose_marker(&view, &red(), &MapConfig::default()).unwrap();
        assert!(!marker.tooltip.html.contains("<img"));
        assert!(marker
            .tooltip
            .html
            .contains(&format!("<strong>{UNKNOWN_BRAND}</strong>")));
        assert!(marker
            .popup
            .html
            .contains(&format!("<strong>Brand:</strong> {UNKNOWN_BRAND}")));
    }

    #[test]
    fn test_popup_lists_store_details() {
        let store = Store::new(StoreId(10), "Taproom", "1-2-3 Dogenzaka")
            .at(35.0, 139.0)
            .contact("03-1111-2222");
        let view = StoreView::new(store, Some(&ale_co()));

        let html = compose_marker(&view, &red(), &MapConfig::default())
            .unwrap()
            .popup
            .html;
        assert!(html.starts_with("<div style=\"width:200px\"><h3>Taproom</h3>"));
        assert!(html.contains("<strong>Address:</strong> 1-2-3 Dogenzaka"));
        assert!(html.contains("<strong>Contact:</strong> 03-1111-2222"));
    }

    #[test]
    fn test_popup_omits_absent_contact() {
        let store = Store::new(StoreId(10), "Taproom", "Shibuya").at(35.0, 139.0);
        let view = StoreView::new(store, None);

        let html = compose_marker(&view, &red(), &MapConfig::default())
            .unwrap()
            .popup
            .html;
        assert!(!html.contains("Contact:"));
        assert!(!html.contains("None"));
    }

    #[test]
    fn test_text_is_escaped() {
        let store = Store::new(StoreId(10), "<script>alert(1)</script>", "A & B").at(35.0, 139.0);
        let view = StoreView::new(store, None);

        let marker = compose_marker(&view, &red(), &MapConfig::default()).unwrap();
        assert!(!marker.tooltip.html.contains("<script>"));
        assert!(marker.popup.html.contains("A &amp; B"));
    }

    #[test]
    fn test_invalid_coordinates_are_errors() {
        let missing = StoreView::new(Store::new(StoreId(1), "No lat", "x"), None);
        let err = compose_marker(&missing, &red(), &MapConfig::default()).unwrap_err();
        assert_eq!(err.store_id, StoreId(1));
        assert!(err.reason.contains("latitude"));

        let mut store = Store::new(StoreId(2), "Bad lng", "x").at(35.0, 0.0);
        store.lng = Some(CoordinateValue::Text("east-ish".into()));
        let err = compose_marker(&StoreView::new(store, None), &red(), &MapConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("longitude \"east-ish\""), "{err}");

        let swapped = Store::new(StoreId(4), "Swapped", "x").at(139.0, 35.0);
        let err = compose_marker(&StoreView::new(swapped, None), &red(), &MapConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("outside the valid"), "{err}");
    }

    #[test]
    fn test_numeric_text_coordinates_are_accepted() {
        let mut store = Store::new(StoreId(3), "Text coords", "x");
        store.lat = Some(CoordinateValue::Text("35.6812".into()));
        store.lng = Some(CoordinateValue::Text("139.7671".into()));

        let marker =
            compose_marker(&StoreView::new(store, None), &red(), &MapConfig::default()).unwrap();
        assert_eq!(marker.position, LatLng::new(35.6812, 139.7671));
    }
}
