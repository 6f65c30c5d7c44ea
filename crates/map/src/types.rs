use crate::legend::Legend;
use crate::palette::Color;
use beerlog_catalog::StoreId;
use serde::{Deserialize, Serialize};

/// Geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and within the WGS84 ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Pixel size for embedding the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeHint {
    pub width: u32,
    pub height: u32,
}

impl SizeHint {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Marker icon as an embeddable SVG data URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    #[serde(skip)]
    pub svg: String,
    pub data_uri: String,
    pub size: [u32; 2],
}

/// Hover content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    pub html: String,
}

/// Click content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Popup {
    pub html: String,
    pub max_width: u32,
}

/// One store placed on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub store_id: StoreId,
    pub position: LatLng,
    pub color: Color,
    pub icon: Icon,
    pub tooltip: Tooltip,
    pub popup: Popup,
}

/// Cluster layer holding every store marker
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkerCluster {
    markers: Vec<Marker>,
}

impl MarkerCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// Store left off the map because its coordinates are unusable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedStore {
    pub store_id: StoreId,
    pub store_name: String,
    pub reason: String,
}

/// Finished map: base settings, clustered markers and legend overlay
#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    pub(crate) center: LatLng,
    pub(crate) zoom: u8,
    pub(crate) control_scale: bool,
    pub(crate) size: SizeHint,
    pub(crate) cluster: MarkerCluster,
    pub(crate) legend: Legend,
    pub(crate) excluded: Vec<ExcludedStore>,
}

impl MapDocument {
    pub const fn center(&self) -> LatLng {
        self.center
    }

    pub const fn zoom(&self) -> u8 {
        self.zoom
    }

    pub const fn control_scale(&self) -> bool {
        self.control_scale
    }

    /// Pixel size hint for embedding
    pub const fn size(&self) -> SizeHint {
        self.size
    }

    pub const fn cluster(&self) -> &MarkerCluster {
        &self.cluster
    }

    pub fn markers(&self) -> &[Marker] {
        self.cluster.markers()
    }

    pub fn marker_count(&self) -> usize {
        self.cluster.len()
    }

    pub fn marker_for(&self, store_id: StoreId) -> Option<&Marker> {
        self.markers().iter().find(|m| m.store_id == store_id)
    }

    pub const fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Legend overlay markup
    pub fn legend_html(&self) -> String {
        self.legend.to_html()
    }

    pub fn excluded(&self) -> &[ExcludedStore] {
        &self.excluded
    }

    /// Compact description for logs and JSON output
    pub fn summary(&self) -> MapSummary {
        MapSummary {
            markers: self.marker_count(),
            legend: self
                .legend
                .entries()
                .iter()
                .map(|entry| (entry.name.clone(), entry.color.clone()))
                .collect(),
            excluded: self.excluded.clone(),
            size: self.size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSummary {
    pub markers: usize,
    pub legend: Vec<(String, Color)>,
    pub excluded: Vec<ExcludedStore>,
    pub size: SizeHint,
}
