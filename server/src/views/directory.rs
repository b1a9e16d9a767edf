use products_directory::{DirectoryView, DisplayRecord};

use super::escape;

const COLUMNS: [(&str, &str); 4] = [
    ("Employee", "30%"),
    ("Position", "25%"),
    ("Department", "20%"),
    ("Email", "25%"),
];

/// Directory body: header with count, then the error banner and/or the table,
/// or the empty notice.
pub fn render(view: &DirectoryView) -> String {
    let mut html = String::from("<section class=\"directory\">");
    html.push_str(&format!(
        "<header><h1>Employee Directory</h1><p class=\"count\">{}</p></header>",
        view.count_label()
    ));

    if let Some(error) = &view.error {
        html.push_str(&format!(
            "<div class=\"banner-error\" role=\"alert\"><p class=\"banner-title\">Error loading employees</p>\
<p class=\"banner-message\">{}</p></div>",
            escape(error.message())
        ));
    }

    if view.shows_table() {
        html.push_str(&render_table(&view.employees));
    } else if view.shows_empty_notice() {
        html.push_str(
            "<div class=\"empty\"><p>No employees found in the database.</p>\
<p class=\"muted\">Add some employees to your &#39;employees&#39; table to see them here.</p></div>",
        );
    }

    html.push_str("</section>");
    html
}

fn render_table(rows: &[DisplayRecord]) -> String {
    let head = COLUMNS
        .iter()
        .map(|(label, width)| format!("<th style=\"width:{width}\">{label}</th>"))
        .collect::<String>();
    let body = rows.iter().map(render_row).collect::<String>();
    format!("<div class=\"table-wrap\"><table><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table></div>")
}

fn render_row(row: &DisplayRecord) -> String {
    let key = row
        .key
        .as_ref()
        .map(|key| format!(" data-key=\"{}\"", escape(&key.to_string())))
        .unwrap_or_default();
    let email = match &row.mailto {
        Some(target) => format!(
            "<a href=\"{}\">{}</a>",
            escape(target),
            escape(row.email.as_str())
        ),
        None => format!("<span class=\"muted\">{}</span>", escape(row.email.as_str())),
    };
    format!(
        "<tr{key}><td><div class=\"employee\"><span class=\"avatar\">{initial}</span>\
<span class=\"name\">{name}</span></div></td><td>{position}</td><td>{department}</td><td>{email}</td></tr>",
        initial = escape(&row.initial.to_string()),
        name = escape(&row.display_name),
        position = escape(row.position.as_str()),
        department = escape(row.department.as_str()),
    )
}
