use std::fmt::Write;

use crate::models::{track_by_product_id, Stock};

use super::{MessageKind, ViewState};

/// Minimal escaping for text interpolated into HTML bodies and attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the whole stock management page.
pub fn render(state: &ViewState) -> String {
    let mut body = String::new();

    body.push_str("<h1>Stock Management</h1>\n");

    if let Some(message) = &state.message {
        let class = match message.kind {
            MessageKind::Success => "message success",
            MessageKind::Error => "message error",
        };
        let _ = writeln!(body, r#"<div class="{}">{}</div>"#, class, escape(&message.text));
    }

    if state.loading {
        body.push_str("<div class=\"loading\">Loading...</div>\n");
    }

    let _ = writeln!(
        body,
        r#"<form method="post" action="/stockmanagement/search">
  <label>Product ID <input type="number" name="product_id" value="{}"></label>
  <button type="submit">Search</button>
</form>"#,
        state.product_id
    );

    match &state.current_stock {
        Some(stock) => body.push_str(&stock_card(stock, state.amount)),
        None => body.push_str("<p class=\"empty\">No product selected.</p>\n"),
    }

    body.push_str(&low_stock_table(&state.low_stock_items));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Stock Management</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
.message.success {{ color: #146c2e; }}
.message.error {{ color: #b3261e; }}
.badge.low {{ background: #b3261e; color: #fff; padding: 0 .4rem; }}
table {{ border-collapse: collapse; }}
td, th {{ border: 1px solid #ccc; padding: .2rem .6rem; }}
</style>
</head>
<body>
{}</body>
</html>
"#,
        body
    )
}

fn stock_card(stock: &Stock, amount: i64) -> String {
    let badge = if stock.is_low() {
        r#" <span class="badge low">Low stock</span>"#
    } else {
        ""
    };

    format!(
        r#"<section class="stock">
  <h2>{name}{badge}</h2>
  <dl>
    <dt>Product ID</dt><dd>{id}</dd>
    <dt>Quantity</dt><dd>{quantity}</dd>
    <dt>Reorder level</dt><dd>{reorder}</dd>
  </dl>
  <form method="post">
    <label>Amount <input type="number" name="amount" min="1" value="{amount}"></label>
    <button type="submit" formaction="/stockmanagement/increase">Increase</button>
    <button type="submit" formaction="/stockmanagement/decrease">Decrease</button>
  </form>
</section>
"#,
        name = escape(&stock.name),
        badge = badge,
        id = stock.product_id,
        quantity = stock.quantity,
        reorder = stock.reorder_level,
        amount = amount,
    )
}

fn low_stock_table(items: &[Stock]) -> String {
    let mut out = String::from("<section class=\"low-stock\">\n  <h2>Low Stock Items</h2>\n");

    if items.is_empty() {
        out.push_str("  <p>All products are above their reorder level.</p>\n</section>\n");
        return out;
    }

    out.push_str(
        "  <table>\n    <tr><th>Product ID</th><th>Name</th><th>Quantity</th><th>Reorder level</th><th></th></tr>\n",
    );
    for (index, item) in items.iter().enumerate() {
        let key = track_by_product_id(index, item);
        let _ = writeln!(
            out,
            r#"    <tr data-key="{key}"><td>{key}</td><td>{name}</td><td>{quantity}</td><td>{reorder}</td><td><form method="post" action="/stockmanagement/select/{key}"><button type="submit">Select</button></form></td></tr>"#,
            key = key,
            name = escape(&item.name),
            quantity = item.quantity,
            reorder = item.reorder_level,
        );
    }
    out.push_str("  </table>\n</section>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Stock {
        Stock {
            product_id: 42,
            name: "Widget".to_string(),
            quantity: 5,
            reorder_level: 10,
        }
    }

    #[test]
    fn escape_handles_markup() {
        assert_eq!(escape(r#"<b a="1">&'</b>"#), "&lt;b a=&quot;1&quot;&gt;&amp;&#39;&lt;/b&gt;");
    }

    #[test]
    fn empty_state_renders_search_form_only() {
        let html = render(&ViewState::default());
        assert!(html.contains("action=\"/stockmanagement/search\""));
        assert!(html.contains("No product selected."));
        assert!(html.contains("All products are above their reorder level."));
        assert!(!html.contains("Loading..."));
    }

    #[test]
    fn current_stock_shows_low_badge_and_adjust_form() {
        let state = ViewState {
            product_id: 42,
            current_stock: Some(widget()),
            ..Default::default()
        };
        let html = render(&state);
        assert!(html.contains("<h2>Widget <span class=\"badge low\">Low stock</span></h2>"));
        assert!(html.contains("formaction=\"/stockmanagement/increase\""));
        assert!(html.contains("formaction=\"/stockmanagement/decrease\""));
    }

    #[test]
    fn low_stock_rows_link_to_select() {
        let state = ViewState {
            low_stock_items: vec![widget()],
            ..Default::default()
        };
        let html = render(&state);
        assert!(html.contains("data-key=\"42\""));
        assert!(html.contains("action=\"/stockmanagement/select/42\""));
    }

    #[test]
    fn product_names_are_escaped() {
        let state = ViewState {
            current_stock: Some(Stock {
                name: "<script>".to_string(),
                ..widget()
            }),
            ..Default::default()
        };
        let html = render(&state);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
