use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Brand name shown for stores whose brand cannot be resolved
pub const UNKNOWN_BRAND: &str = "unknown";

/// Brand identity (primary key of the `brands` table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrandId(pub i64);

impl BrandId {
    /// Parse a brand reference stored as text (e.g. `"12"`)
    #[must_use]
    pub fn parse_reference(raw: &str) -> Option<Self> {
        raw.trim().parse::<i64>().ok().map(Self)
    }
}

impl fmt::Display for BrandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store identity (primary key of the `stores` table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(pub i64);

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Image format detected from the leading bytes of a blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
    Webp,
    Svg,
}

impl ImageKind {
    /// Detect the format from magic bytes. Unrecognised data is treated as PNG.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Self::Png
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Self::Jpeg
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Self::Gif
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Self::Webp
        } else if looks_like_svg(bytes) {
            Self::Svg
        } else {
            Self::Png
        }
    }

    /// Media type used in `data:` URIs
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Svg => "image/svg+xml",
        }
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(256)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

/// Base64 text of an image blob.
///
/// Empty when the blob is absent, so templates can skip the image tag instead
/// of emitting a broken reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    base64: String,
    kind: Option<ImageKind>,
}

impl EncodedImage {
    /// Image with no data
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Encode a raw blob. `None` and zero-length blobs yield an empty image.
    #[must_use]
    pub fn from_blob(blob: Option<&[u8]>) -> Self {
        match blob {
            Some(bytes) if !bytes.is_empty() => Self {
                base64: STANDARD.encode(bytes),
                kind: Some(ImageKind::sniff(bytes)),
            },
            _ => Self::empty(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base64.is_empty()
    }

    /// Base64 text (empty string when there is no image)
    #[must_use]
    pub fn as_base64(&self) -> &str {
        &self.base64
    }

    #[must_use]
    pub const fn kind(&self) -> Option<ImageKind> {
        self.kind
    }

    /// `data:` URI for embedding, `None` when there is no image
    #[must_use]
    pub fn data_uri(&self) -> Option<String> {
        let kind = self.kind?;
        if self.is_empty() {
            return None;
        }
        Some(format!("data:{};base64,{}", kind.mime(), self.base64))
    }
}

/// Raw latitude/longitude column value.
///
/// The column is numeric in the schema but SQLite stores whatever was
/// written, so text is kept as-is and parsed at placement time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordinateValue {
    Number(f64),
    Text(String),
}

impl CoordinateValue {
    /// Finite floating-point value, if the raw value converts to one
    #[must_use]
    pub fn to_finite(&self) -> Option<f64> {
        let value = match self {
            Self::Number(v) => *v,
            Self::Text(raw) => raw.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for CoordinateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(raw) => write!(f, "{raw:?}"),
        }
    }
}

/// Product brand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub image: EncodedImage,
}

impl Brand {
    pub fn new(id: BrandId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: EncodedImage::empty(),
        }
    }

    /// Builder: attach an image blob
    #[must_use]
    pub fn with_image_blob(mut self, blob: &[u8]) -> Self {
        self.image = EncodedImage::from_blob(Some(blob));
        self
    }
}

/// Store row as read from the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub address: String,
    pub contact: Option<String>,
    pub lat: Option<CoordinateValue>,
    pub lng: Option<CoordinateValue>,
    /// Brand reference; may point at a brand that does not exist
    pub brand_id: Option<BrandId>,
}

impl Store {
    pub fn new(id: StoreId, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            contact: None,
            lat: None,
            lng: None,
            brand_id: None,
        }
    }

    /// Builder: set numeric coordinates
    #[must_use]
    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(CoordinateValue::Number(lat));
        self.lng = Some(CoordinateValue::Number(lng));
        self
    }

    /// Builder: set brand reference
    #[must_use]
    pub const fn brand(mut self, brand_id: BrandId) -> Self {
        self.brand_id = Some(brand_id);
        self
    }

    /// Builder: set contact
    #[must_use]
    pub fn contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }
}

/// Store flattened together with its resolved brand.
///
/// Only built through [`StoreView::new`], which applies the unknown-brand
/// defaults when no brand is supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreView {
    store_id: StoreId,
    store_name: String,
    address: String,
    contact: Option<String>,
    lat: Option<CoordinateValue>,
    lng: Option<CoordinateValue>,
    brand_id: Option<BrandId>,
    brand_resolved: bool,
    brand_name: String,
    brand_image: EncodedImage,
}

impl StoreView {
    pub fn new(store: Store, brand: Option<&Brand>) -> Self {
        let (brand_name, brand_image) = match brand {
            Some(brand) => (brand.name.clone(), brand.image.clone()),
            None => (UNKNOWN_BRAND.to_string(), EncodedImage::empty()),
        };

        Self {
            store_id: store.id,
            store_name: store.name,
            address: store.address,
            contact: store.contact,
            lat: store.lat,
            lng: store.lng,
            // The resolved brand's key wins over the raw reference
            brand_id: brand.map(|b| b.id).or(store.brand_id),
            brand_resolved: brand.is_some(),
            brand_name,
            brand_image,
        }
    }

    pub const fn store_id(&self) -> StoreId {
        self.store_id
    }

    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn contact(&self) -> Option<&str> {
        self.contact.as_deref()
    }

    pub const fn lat(&self) -> Option<&CoordinateValue> {
        self.lat.as_ref()
    }

    pub const fn lng(&self) -> Option<&CoordinateValue> {
        self.lng.as_ref()
    }

    /// Brand reference as stored on the row, resolved or not
    pub const fn brand_id(&self) -> Option<BrandId> {
        self.brand_id
    }

    pub const fn is_brand_resolved(&self) -> bool {
        self.brand_resolved
    }

    pub fn brand_name(&self) -> &str {
        &self.brand_name
    }

    pub const fn brand_image(&self) -> &EncodedImage {
        &self.brand_image
    }
}
