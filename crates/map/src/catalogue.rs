use beerlog_catalog::{Brand, BrandId, EncodedImage};
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;

/// Thumbnail card for one brand
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandCard {
    pub brand_id: BrandId,
    pub name: String,
    pub image: EncodedImage,
}

/// Brand thumbnails laid out in a fixed number of columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandCatalogue {
    columns: usize,
    cards: Vec<BrandCard>,
}

impl BrandCatalogue {
    pub fn from_brands(brands: &[Brand], columns: usize) -> Self {
        Self {
            columns: columns.max(1),
            cards: brands
                .iter()
                .map(|brand| BrandCard {
                    brand_id: brand.id,
                    name: brand.name.clone(),
                    image: brand.image.clone(),
                })
                .collect(),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cards(&self) -> &[BrandCard] {
        &self.cards
    }

    /// Cards grouped row by row
    pub fn rows(&self) -> impl Iterator<Item = &[BrandCard]> {
        self.cards.chunks(self.columns)
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<div class=\"brand-grid\" style=\"display:grid;grid-template-columns:repeat({}, 1fr);gap:10px;\">",
            self.columns
        );
        for card in &self.cards {
            html.push_str("<div class=\"brand-card\">");
            if let Some(src) = card.image.data_uri() {
                html.push_str(&format!(
                    "<img src=\"{src}\" alt=\"{}\" style=\"max-width:100px;max-height:100px;\">",
                    encode_double_quoted_attribute(&card.name)
                ));
            }
            html.push_str(&format!(
                "<p><strong>{}</strong></p></div>",
                encode_text(&card.name)
            ));
        }
        html.push_str("</div>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brands(count: i64) -> Vec<Brand> {
        (1..=count)
            .map(|i| Brand::new(BrandId(i), format!("Brand {i}")))
            .collect()
    }

    #[test]
    fn test_rows_wrap_at_column_count() {
        let catalogue = BrandCatalogue::from_brands(&brands(7), 3);
        let sizes: Vec<_> = catalogue.rows().map(<[BrandCard]>::len).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
    }

    #[test]
    fn test_zero_columns_falls_back_to_one() {
        let catalogue = BrandCatalogue::from_brands(&brands(2), 0);
        assert_eq!(catalogue.columns(), 1);
        assert_eq!(catalogue.rows().count(), 2);
    }

    #[test]
    fn test_cards_render_thumbnail_only_when_present() {
        let list = vec![
            Brand::new(BrandId(1), "Ale Co").with_image_blob(b"GIF89a\x01\x00"),
            Brand::new(BrandId(2), "Lager Ltd"),
        ];
        let html = BrandCatalogue::from_brands(&list, 3).to_html();

        assert_eq!(html.matches("<img").count(), 1);
        assert!(html.contains("data:image/gif;base64,R0lGODlhAQA="));
        assert!(html.contains("<strong>Lager Ltd</strong>"));
    }

    #[test]
    fn test_brand_names_escaped_in_text_and_alt() {
        let list =
            vec![Brand::new(BrandId(1), "\"Hop\" <Ale> & Co").with_image_blob(b"GIF89a\x01\x00")];
        let html = BrandCatalogue::from_brands(&list, 3).to_html();

        assert!(html.contains("alt=\"&quot;Hop&quot; &lt;Ale&gt; &amp; Co\""));
        assert!(html.contains("<strong>\"Hop\" &lt;Ale&gt; &amp; Co</strong>"));
        assert!(!html.contains("<Ale>"));
    }
}
