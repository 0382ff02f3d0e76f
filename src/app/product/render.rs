//! 搜索结果渲染
//!
//! HTML 表格由 tera 模板生成并开启自动转义，记录里的任何文本都不会被当作标记插入。

use tera::{Context, Tera};

use super::model::ProductRecord;
use crate::core::error::Result;

const TEMPLATE_NAME: &str = "search_results.html";

const RESULTS_TEMPLATE: &str = r#"<table class="table table-striped" cellpadding="10">
<thead><tr><th>ID</th><th>Name</th><th>Description</th><th>Price</th><th>Likes</th></tr></thead>
<tbody>
{%- for product in products %}
<tr id="row_{{ loop.index0 }}"><td>{{ product.id }}</td><td>{{ product.name }}</td><td>{{ product.description }}</td><td>{{ product.price }}</td><td>{{ product.likes }}</td></tr>
{%- endfor %}
</tbody>
</table>"#;

const HEADERS: [&str; 5] = ["ID", "Name", "Description", "Price", "Likes"];

/// 一次搜索的渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub html: String,
    pub records: Vec<ProductRecord>,
}

impl SearchResults {
    pub fn first(&self) -> Option<&ProductRecord> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 终端用的对齐文本表格
    pub fn to_text(&self) -> String {
        let rows: Vec<[String; 5]> = self
            .records
            .iter()
            .map(|r| {
                [
                    r.id.clone(),
                    r.name.clone(),
                    r.description.clone(),
                    r.price.clone(),
                    r.likes.to_string(),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: &[&str]| -> String {
            cells
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut out = vec![line(&HEADERS[..])];
        out.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        for row in &rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            out.push(line(&cells[..]));
        }
        out.join("\n")
    }
}

/// 结果表格渲染器
pub struct ResultsRenderer {
    tera: Tera,
}

impl ResultsRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, RESULTS_TEMPLATE)?;
        tera.autoescape_on(vec![".html"]);
        Ok(Self { tera })
    }

    /// 每条记录一行，列顺序为 id, name, description, price, likes
    pub fn render(&self, records: Vec<ProductRecord>) -> Result<SearchResults> {
        let mut context = Context::new();
        context.insert("products", &records);
        let html = self.tera.render(TEMPLATE_NAME, &context)?;
        Ok(SearchResults { html, records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            name: name.to_string(),
            description: "d".to_string(),
            price: "9".to_string(),
            likes: 2,
        }
    }

    #[test]
    fn test_one_row_per_record_in_column_order() {
        let renderer = ResultsRenderer::new().unwrap();
        let results = renderer
            .render(vec![product("1", "foo"), product("2", "bar")])
            .unwrap();

        assert_eq!(results.html.matches("<tr id=\"row_").count(), 2);
        assert!(results
            .html
            .contains(r#"<tr id="row_0"><td>1</td><td>foo</td><td>d</td><td>9</td><td>2</td></tr>"#));
        assert!(results.html.contains(r#"<tr id="row_1"><td>2</td><td>bar</td>"#));
        assert_eq!(results.first().unwrap().name, "foo");
    }

    #[test]
    fn test_empty_results_render_header_only() {
        let renderer = ResultsRenderer::new().unwrap();
        let results = renderer.render(Vec::new()).unwrap();

        assert!(results.is_empty());
        assert!(results.html.contains("<th>Likes</th>"));
        assert!(!results.html.contains("<tr id="));
    }

    #[test]
    fn test_markup_in_records_is_escaped() {
        let renderer = ResultsRenderer::new().unwrap();
        let results = renderer
            .render(vec![product("1", "<script>alert(1)</script>")])
            .unwrap();

        assert!(!results.html.contains("<script>"));
        assert!(results.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_text_table_alignment() {
        let renderer = ResultsRenderer::new().unwrap();
        let results = renderer.render(vec![product("10", "foo")]).unwrap();
        let text = results.to_text();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ID | Name | Description | Price | Likes");
        assert_eq!(lines[2], "10 | foo  | d           | 9     | 2");
    }
}
