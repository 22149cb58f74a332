//! HTML rendering of a readings page.
//!
//! Rows arrive already converted and formatted; this module only decides the
//! row styling and the paging controls and hands everything to a Tera
//! template embedded in the binary. Auto-escaping is on for the template.

use crate::config::{NavLink, PageSettings};
use crate::errors::Result;
use crate::model::{DisplayRow, Pagination, ReadingsPage};
use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "readings.html";

/// Table header labels, in column order.
pub const COLUMNS: [&str; 14] = [
    "id",
    "Timestamp (local)",
    "Temperature (C)",
    "Pressure (hPa)",
    "Humidity (%)",
    "Rain (mm)",
    "Rain rate (mm/h)",
    "Luminance (lux)",
    "Wind Speed (mph)",
    "Wind Direction",
    "Day",
    "Week",
    "Month",
    "Year",
];

const ODD_CLASS: &str = "table_cells_odd";
const EVEN_CLASS: &str = "table_cells_even";

/// Styling class for the row at `index` within the current page.
pub fn row_class(index: usize) -> &'static str {
    if index % 2 == 0 {
        ODD_CLASS
    } else {
        EVEN_CLASS
    }
}

#[derive(Debug, Serialize)]
struct TableRow<'a> {
    class: &'static str,
    cells: &'a DisplayRow,
}

#[derive(Debug, Serialize)]
struct PagingView {
    page: i64,
    pages: i64,
    total: i64,
    first_index: i64,
    last_index: i64,
    has_previous: bool,
    has_next: bool,
    previous_page: i64,
    next_page: i64,
}

impl From<&Pagination> for PagingView {
    fn from(p: &Pagination) -> Self {
        PagingView {
            page: p.page,
            pages: p.pages,
            total: p.total,
            first_index: p.first_index,
            last_index: p.last_index,
            has_previous: p.has_previous(),
            has_next: p.has_next(),
            // Both targets are only emitted when the matching link is enabled
            previous_page: (p.page - 1).max(1),
            next_page: (p.page + 1).min(p.pages.max(1)),
        }
    }
}

pub struct Renderer {
    tera: Tera,
    title: String,
    show_navbar: bool,
    nav_links: Vec<NavLink>,
}

impl Renderer {
    pub fn new(settings: &PageSettings) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, READINGS_TEMPLATE)?;

        Ok(Self {
            tera,
            title: settings.title.clone(),
            show_navbar: settings.show_navbar,
            nav_links: settings.nav_links.clone(),
        })
    }

    pub fn render(&self, page: &ReadingsPage) -> Result<String> {
        let rows: Vec<TableRow<'_>> = page
            .rows
            .iter()
            .enumerate()
            .map(|(i, cells)| TableRow {
                class: row_class(i),
                cells,
            })
            .collect();

        let mut ctx = Context::new();
        ctx.insert("title", &self.title);
        ctx.insert("show_navbar", &self.show_navbar);
        ctx.insert("nav_links", &self.nav_links);
        ctx.insert("columns", &COLUMNS);
        ctx.insert("paging", &PagingView::from(&page.pagination));
        ctx.insert("rows", &rows);

        Ok(self.tera.render(TEMPLATE_NAME, &ctx)?)
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("title", &self.title)
            .field("show_navbar", &self.show_navbar)
            .finish()
    }
}

const READINGS_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>{{ title }}</title>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style type="text/css">
        .table_titles, .table_cells_odd, .table_cells_even { padding-right: 20px; padding-left: 20px; color: #000; }
        .table_titles { color: #FFF; background-color: #666; }
        .table_cells_odd { background-color: #CCC; }
        .table_cells_even { background-color: #FAFAFA; }
        .pagination-link { font-size: 30px; color: #007bff; padding: 2px; text-decoration: none; }
        .pagination-link:hover { color: #0056b3; }
        .disabled { font-size: 30px; color: #ccc; padding: 2px; }
        table { border: 2px solid #333; }
        body { font-family: "Trebuchet MS", Arial; }
        .navbar-custom { display: flex; justify-content: space-between; background-color: black; padding: 8px 16px; position: fixed; width: 100%; top: 0; z-index: 4; }
        .navbar-custom a { text-decoration: none; color: white; font-size: 18px; }
        .with-navbar { padding-top: 60px; }
        @media screen and (max-width: 600px) {
            table { width: 100%; display: block; overflow-x: auto; }
            .table_titles, .table_cells_odd, .table_cells_even { padding: 10px; }
            .pagination-link { padding: 5px; }
        }
    </style>
</head>
<body>
{%- if show_navbar %}
    <div class="navbar-custom">
    {%- for link in nav_links %}
        <a href="{{ link.url }}">{{ link.title }}</a>
    {%- endfor %}
    </div>
{%- endif %}
    <h1{% if show_navbar %} class="with-navbar"{% endif %}>{{ title }}</h1>

    <div id="paging"><p>
    {%- if paging.has_previous %}
        <a href="?page=1" title="First page" class="pagination-link">&laquo;</a>
        <a href="?page={{ paging.previous_page }}" title="Previous page" class="pagination-link">&lsaquo;</a>
    {%- else %}
        <span class="disabled">&laquo;</span>
        <span class="disabled">&lsaquo;</span>
    {%- endif %}
        Page {{ paging.page }} of {{ paging.pages }} pages, displaying {{ paging.first_index }}-{{ paging.last_index }} of {{ paging.total }} results
    {%- if paging.has_next %}
        <a href="?page={{ paging.next_page }}" title="Next page" class="pagination-link">&rsaquo;</a>
        <a href="?page={{ paging.pages }}" title="Last page" class="pagination-link">&raquo;</a>
    {%- else %}
        <span class="disabled">&rsaquo;</span>
        <span class="disabled">&raquo;</span>
    {%- endif %}
    </p></div>

    <table border="0" cellspacing="0" cellpadding="4">
        <tr>
        {%- for column in columns %}
            <td class="table_titles">{{ column | safe }}</td>
        {%- endfor %}
        </tr>
    {%- for row in rows %}
        <tr>
            <td class="{{ row.class }}">{{ row.cells.id }}</td>
            <td class="{{ row.class }}">{{ row.cells.timestamp }}</td>
            <td class="{{ row.class }}">{{ row.cells.temperature }}</td>
            <td class="{{ row.class }}">{{ row.cells.pressure }}</td>
            <td class="{{ row.class }}">{{ row.cells.humidity }}</td>
            <td class="{{ row.class }}">{{ row.cells.rain }}</td>
            <td class="{{ row.class }}">{{ row.cells.rain_rate }}</td>
            <td class="{{ row.class }}">{{ row.cells.luminance }}</td>
            <td class="{{ row.class }}">{{ row.cells.wind_speed }}</td>
            <td class="{{ row.class }}">{{ row.cells.wind_direction }}</td>
            <td class="{{ row.class }}">{{ row.cells.day }}</td>
            <td class="{{ row.class }}">{{ row.cells.week }}</td>
            <td class="{{ row.class }}">{{ row.cells.month }}</td>
            <td class="{{ row.class }}">{{ row.cells.year }}</td>
        </tr>
    {%- endfor %}
    </table>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn display_row(id: i32) -> DisplayRow {
        DisplayRow {
            id,
            timestamp: "2024-03-01 09:15:00".to_string(),
            temperature: "11.2".to_string(),
            pressure: "1013.3".to_string(),
            humidity: "81.0".to_string(),
            rain: "0.3".to_string(),
            rain_rate: "3.6".to_string(),
            luminance: "512.0".to_string(),
            wind_speed: "22.4".to_string(),
            wind_direction: "N".to_string(),
            day: 61,
            week: 9,
            month: 3,
            year: 2024,
        }
    }

    fn page(total: i64, requested: i64, rows: usize) -> ReadingsPage {
        ReadingsPage {
            pagination: Pagination::resolve(total, 96, Some(requested)),
            rows: (0..rows as i32).map(display_row).collect(),
        }
    }

    fn renderer(show_navbar: bool) -> Renderer {
        let settings = PageSettings {
            show_navbar,
            ..PageSettings::default()
        };
        Renderer::new(&settings).unwrap()
    }

    #[test]
    fn test_row_class_starts_odd() {
        assert_eq!(row_class(0), "table_cells_odd");
        assert_eq!(row_class(1), "table_cells_even");
        assert_eq!(row_class(2), "table_cells_odd");
    }

    #[test]
    fn test_renders_header_and_rows() {
        let html = renderer(true).render(&page(200, 3, 8)).unwrap();

        for column in COLUMNS {
            assert!(html.contains(&format!("<td class=\"table_titles\">{}</td>", column)));
        }
        let odd = "<td class=\"table_cells_odd\">2024-03-01 09:15:00</td>";
        let even = "<td class=\"table_cells_even\">2024-03-01 09:15:00</td>";
        assert_eq!(html.matches(odd).count(), 4);
        assert_eq!(html.matches(even).count(), 4);
        assert!(html.contains("Page 3 of 3 pages, displaying 193-200 of 200 results"));
    }

    #[test]
    fn test_header_units_are_not_escaped() {
        let html = renderer(false).render(&page(0, 1, 0)).unwrap();

        assert!(html.contains("<td class=\"table_titles\">Rain rate (mm/h)</td>"));
        assert!(!html.contains("&#x2F;"));
    }

    #[test]
    fn test_first_page_disables_back_links() {
        let html = renderer(true).render(&page(200, 1, 96)).unwrap();

        assert!(html.contains("<span class=\"disabled\">&laquo;</span>"));
        assert!(html.contains("<span class=\"disabled\">&lsaquo;</span>"));
        assert!(html.contains("href=\"?page=2\" title=\"Next page\""));
        assert!(html.contains("href=\"?page=3\" title=\"Last page\""));
    }

    #[test]
    fn test_last_page_disables_forward_links() {
        let html = renderer(true).render(&page(200, 3, 8)).unwrap();

        assert!(html.contains("href=\"?page=1\" title=\"First page\""));
        assert!(html.contains("href=\"?page=2\" title=\"Previous page\""));
        assert!(html.contains("<span class=\"disabled\">&rsaquo;</span>"));
        assert!(html.contains("<span class=\"disabled\">&raquo;</span>"));
    }

    #[test]
    fn test_empty_page() {
        let html = renderer(false).render(&page(0, 1, 0)).unwrap();

        assert!(html.contains("Page 0 of 0 pages, displaying 0-0 of 0 results"));
        assert!(!html.contains("table_cells_odd\">"));
        assert!(!html.contains("pagination-link\">"));
    }

    #[test]
    fn test_navbar_is_optional() {
        assert!(renderer(true).render(&page(1, 1, 1)).unwrap().contains("navbar-custom\">"));
        assert!(!renderer(false).render(&page(1, 1, 1)).unwrap().contains("navbar-custom\">"));
    }

    #[test]
    fn test_title_is_escaped() {
        let settings = PageSettings {
            title: "<script>".to_string(),
            ..PageSettings::default()
        };
        let html = Renderer::new(&settings).unwrap().render(&page(0, 1, 0)).unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
