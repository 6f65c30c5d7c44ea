use crate::palette::{BrandColorMap, Color};
use beerlog_catalog::{Brand, BrandId};
use html_escape::encode_text;
use serde::Serialize;

/// One brand row of the legend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub brand_id: BrandId,
    pub name: String,
    pub color: Color,
}

/// Fixed-position overlay mapping colors to brand names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legend {
    title: String,
    entries: Vec<LegendEntry>,
}

impl Legend {
    /// One row per brand, in brand order, colored from `colors`
    pub fn build(brands: &[Brand], colors: &BrandColorMap, title: impl Into<String>) -> Self {
        let entries = brands
            .iter()
            .map(|brand| LegendEntry {
                brand_id: brand.id,
                name: brand.name.clone(),
                color: colors.color_for(Some(brand.id)).clone(),
            })
            .collect();

        Self {
            title: title.into(),
            entries,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlay markup, pinned to the bottom-right corner above the map
    pub fn to_html(&self) -> String {
        let mut html = String::from(
            "<div class=\"beerlog-legend\" style=\"position: fixed; bottom: 50px; right: 50px; \
             width: 220px; border: 2px solid grey; z-index: 9999; font-size: 14px; \
             background-color: rgba(255, 255, 255, 0.8); border-radius: 5px; padding: 10px;\">",
        );
        html.push_str(&format!(
            "<p><strong>{}</strong></p>",
            encode_text(&self.title)
        ));
        for entry in &self.entries {
            html.push_str(&format!(
                "<p><svg width=\"20\" height=\"20\" viewBox=\"0 0 100 100\">\
                 <circle cx=\"50\" cy=\"50\" r=\"40\" fill=\"{}\"/></svg> {}</p>",
                entry.color,
                encode_text(&entry.name)
            ));
        }
        html.push_str("</div>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_legend_rows_follow_brand_order() {
        let brands = vec![
            Brand::new(BrandId(1), "Ale Co"),
            Brand::new(BrandId(2), "Lager Ltd"),
        ];
        let colors = BrandColorMap::assign(&brands, &Palette::default());
        let legend = Legend::build(&brands, &colors, "Brand legend");

        let rows: Vec<_> = legend
            .entries()
            .iter()
            .map(|e| (e.name.as_str(), e.color.as_str()))
            .collect();
        assert_eq!(rows, vec![("Ale Co", "#FF6B6B"), ("Lager Ltd", "#4ECDC4")]);

        let html = legend.to_html();
        assert!(html.contains("position: fixed"));
        assert!(html.contains("<strong>Brand legend</strong>"));
        assert!(html.contains("fill=\"#4ECDC4\"/></svg> Lager Ltd</p>"));
        assert_eq!(html.matches("<circle").count(), 2);
    }

    #[test]
    fn test_empty_legend_has_no_rows() {
        let colors = BrandColorMap::assign(&[], &Palette::default());
        let legend = Legend::build(&[], &colors, "Brand legend");

        assert!(legend.is_empty());
        assert!(!legend.to_html().contains("<circle"));
    }
}
