use crate::error::Result;
use crate::types::{LatLng, MapDocument, Marker};
use serde::Serialize;
use sha2::{Digest, Sha256};

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const CLUSTER_CSS: &str = "https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.css";
const CLUSTER_DEFAULT_CSS: &str =
    "https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.Default.css";
const CLUSTER_JS: &str =
    "https://unpkg.com/leaflet.markercluster@1.5.3/dist/leaflet.markercluster.js";
const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const MAP_ELEMENT_ID: &str = "beerlog-map";

#[derive(Serialize)]
struct MapScript<'a> {
    center: LatLng,
    zoom: u8,
    control_scale: bool,
    markers: &'a [Marker],
}

// Leaflet bootstrap: base layer, optional scale, every marker into one
// cluster group.
const MAP_BOOTSTRAP_JS: &str = r#"
  var map = L.map(element).setView([model.center.lat, model.center.lng], model.zoom);
  L.tileLayer(tiles, { attribution: "&copy; OpenStreetMap contributors", maxZoom: 19 }).addTo(map);
  if (model.control_scale) { L.control.scale().addTo(map); }
  var cluster = L.markerClusterGroup();
  model.markers.forEach(function (m) {
    var icon = L.icon({ iconUrl: m.icon.data_uri, iconSize: m.icon.size });
    L.marker([m.position.lat, m.position.lng], { icon: icon })
      .bindTooltip(m.tooltip.html)
      .bindPopup(m.popup.html, { maxWidth: m.popup.max_width })
      .addTo(cluster);
  });
  cluster.addTo(map);
"#;

impl MapDocument {
    /// Self-contained HTML fragment: Leaflet assets, map container, legend
    /// overlay and the script placing the clustered markers.
    pub fn to_html(&self) -> Result<String> {
        let script = MapScript {
            center: self.center,
            zoom: self.zoom,
            control_scale: self.control_scale,
            markers: self.cluster.markers(),
        };
        // Keep "</script>" inside marker HTML from closing the tag early
        let model_json = serde_json::to_string(&script)?.replace("</", "<\\/");

        let mut html = String::new();
        html.push_str(&format!(
            "<div class=\"beerlog-map-root\" style=\"position:relative;width:{}px;height:{}px;\">\n",
            self.size.width, self.size.height
        ));
        for href in [LEAFLET_CSS, CLUSTER_CSS, CLUSTER_DEFAULT_CSS] {
            html.push_str(&format!("<link rel=\"stylesheet\" href=\"{href}\"/>\n"));
        }
        for src in [LEAFLET_JS, CLUSTER_JS] {
            html.push_str(&format!("<script src=\"{src}\"></script>\n"));
        }
        html.push_str(&format!(
            "<div id=\"{MAP_ELEMENT_ID}\" style=\"width:100%;height:100%;\"></div>\n"
        ));
        html.push_str(&self.legend.to_html());
        html.push_str("\n<script>\n(function () {\n");
        html.push_str(&format!("  var element = \"{MAP_ELEMENT_ID}\";\n"));
        html.push_str(&format!("  var tiles = \"{TILE_URL}\";\n"));
        html.push_str(&format!("  var model = {model_json};"));
        html.push_str(MAP_BOOTSTRAP_JS);
        html.push_str("})();\n</script>\n</div>\n");
        Ok(html)
    }

    /// SHA-256 of the rendered fragment; equal inputs give equal digests
    pub fn fingerprint(&self) -> Result<String> {
        let html = self.to_html()?;
        let mut hasher = Sha256::new();
        hasher.update(html.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }
}
