use recommender_core::{AppViewModel, Phase, RecommendationView};

const HEADERS: [&str; 6] = ["Name", "Duration", "Keys", "Remote", "Adaptive", "Link"];
const LOADING_LABEL: &str = "Generating...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Renders the parts of the view the operator should see now.
pub fn render(view: &AppViewModel, format: OutputFormat) -> String {
    let mut out = String::new();
    if view.phase == Phase::Submitting {
        out.push_str(LOADING_LABEL);
        out.push('\n');
    }
    if let Some(results) = &view.results {
        out.push_str(&match format {
            OutputFormat::Table => render_table(results),
            OutputFormat::Json => render_json(results),
        });
    }
    if let Some(error) = &view.error {
        out.push_str("Error: ");
        out.push_str(error);
        out.push('\n');
    }
    out
}

fn render_json(results: &[RecommendationView]) -> String {
    match serde_json::to_string_pretty(results) {
        Ok(mut text) => {
            text.push('\n');
            text
        }
        Err(err) => format!("Error: could not encode results: {err}\n"),
    }
}

fn render_table(results: &[RecommendationView]) -> String {
    if results.is_empty() {
        return "No recommendations.\n".to_string();
    }

    let rows: Vec<[String; 6]> = results.iter().map(row).collect();
    let mut widths = HEADERS.map(|header| header.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_line(&mut out, &rule, &widths);
    for cells in &rows {
        push_line(&mut out, cells, &widths);
    }
    out
}

fn row(view: &RecommendationView) -> [String; 6] {
    [
        view.name.clone(),
        view.duration.to_string(),
        keys_cell(&view.skill_codes),
        yes_or_blank(view.remote_supported),
        yes_or_blank(view.adaptive_supported),
        view.link.clone(),
    ]
}

fn keys_cell(codes: &[char]) -> String {
    if codes.is_empty() {
        return "-".to_string();
    }
    codes
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn yes_or_blank(flag: bool) -> String {
    let label = if flag { "Yes" } else { "" };
    label.to_string()
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}
