use anyhow::Result;
use beerlog_map::{BrandCatalogue, MapDocument};
use html_escape::encode_text;

const PAGE_STYLE: &str = r#"
    body { background-color: #FFF8E1; margin: 0; padding: 2rem; }
    h1, h2, h3 { color: #3E2723; font-family: 'Meiryo', sans-serif; }
    .brand-card {
        border: 2px solid #FFCC80;
        border-radius: 10px;
        padding: 10px;
        margin: 5px;
        text-align: center;
        background-color: white;
        transition: transform 0.2s;
    }
    .brand-card:hover {
        transform: scale(1.05);
        box-shadow: 0 4px 8px rgba(0,0,0,0.1);
    }
"#;

/// Standalone page: heading, brand catalogue, then the map fragment
pub fn render_page(title: &str, catalogue: &BrandCatalogue, map: &MapDocument) -> Result<String> {
    let title = encode_text(title);
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title} - Store map</title>\n"));
    html.push_str(&format!("<style>{PAGE_STYLE}</style>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>🍺 {title}</h1>\n"));
    html.push_str("<h3>Find your favourite beer brands and the stores that pour them</h3>\n");

    html.push_str("<h2>Brands</h2>\n");
    html.push_str(&catalogue.to_html());
    html.push('\n');

    html.push_str("<h2>Store map</h2>\n");
    html.push_str(&map.to_html()?);
    html.push_str("</body>\n</html>\n");
    Ok(html)
}
