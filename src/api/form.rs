//! Declarative widget tree for the prediction page and its HTML rendering.

use std::fmt::Write;
use std::ops::RangeInclusive;

use crate::data::domain::{
    BATHROOM_CHOICES, BEDROOM_CHOICES, CONDITION_CHOICES, FLOOR_CHOICES, GRADE_CHOICES, VIEW_CHOICES,
};
use crate::data::input::FormInput;

pub const PAGE_TITLE: &str = "King County House price prediction";
pub const SUBMIT_ID: &str = "submit-val";
pub const OUTPUT_ID: &str = "output-prediction";

/// One selectable dropdown entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum WidgetKind {
    Dropdown(Vec<Choice>),
    Number,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Widget {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: WidgetKind,
    pub default: Option<&'static str>,
}

impl Widget {
    fn dropdown(id: &'static str, label: &'static str, choices: Vec<Choice>, default: Option<&'static str>) -> Self {
        Self {
            id,
            label,
            kind: WidgetKind::Dropdown(choices),
            default,
        }
    }

    fn number(id: &'static str, label: &'static str, default: Option<&'static str>) -> Self {
        Self {
            id,
            label,
            kind: WidgetKind::Number,
            default,
        }
    }
}

fn numbered(range: RangeInclusive<u32>) -> Vec<Choice> {
    range
        .map(|n| Choice {
            label: n.to_string(),
            value: n.to_string(),
        })
        .collect()
}

/// The page's widgets, top to bottom.
pub fn layout() -> Vec<Widget> {
    let waterfront = vec![
        Choice {
            label: "Yes".into(),
            value: "1".into(),
        },
        Choice {
            label: "No".into(),
            value: "0".into(),
        },
    ];

    vec![
        Widget::dropdown("bedrooms-dropdown", "Number of Bedrooms:", numbered(BEDROOM_CHOICES), Some("3")),
        Widget::dropdown("bathrooms-dropdown", "Number of Bathrooms:", numbered(BATHROOM_CHOICES), Some("2")),
        Widget::number("sqft-interior-input", "Square Foot of Interior:", Some("1500")),
        Widget::number("sqft-land-input", "Square Foot of Land:", Some("5000")),
        Widget::dropdown("floors-dropdown", "Number of Floors:", numbered(FLOOR_CHOICES), Some("1")),
        Widget::dropdown("waterfront-dropdown", "Overlooking Waterfront:", waterfront, None),
        Widget::dropdown("view-dropdown", "View:", numbered(VIEW_CHOICES), Some("0")),
        Widget::dropdown("condition-dropdown", "Condition (1-5):", numbered(CONDITION_CHOICES), Some("3")),
        Widget::dropdown("grade-dropdown", "Grade (1-13):", numbered(GRADE_CHOICES), Some("7")),
        Widget::number("latitude", "Latitude", None),
        Widget::number("longitude", "Longitude", None),
    ]
}

/// Widget values of a freshly loaded page.
pub fn default_input() -> FormInput {
    let mut input = FormInput::default();
    for widget in layout() {
        if let Some(value) = widget.default {
            input.set_widget(widget.id, value);
        }
    }
    input
}

/// What the output region shows.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Output<'a> {
    Text(&'a str),
    Error(&'a str),
}

/// Render the full page with `values` preselected and the submit button primed
/// to post `n_clicks + 1`.
pub fn render_page(values: &FormInput, n_clicks: u32, output: Output<'_>) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape(PAGE_TITLE));
    html.push_str("</head>\n<body style=\"text-align: center\">\n");
    html.push_str(
        "<div style=\"box-shadow: 0px 0px 5px 5px rgba(0, 0, 0, 0.1); padding: 20px; margin: auto; width: 50%\">\n",
    );
    let _ = writeln!(html, "<h1>{}</h1>", escape(PAGE_TITLE));
    html.push_str("<form method=\"post\" action=\"/\">\n");

    for widget in layout() {
        render_widget(&mut html, &widget, values.widget(widget.id));
        html.push_str("<br>\n");
    }

    let _ = writeln!(
        html,
        "<button type=\"submit\" id=\"{SUBMIT_ID}\" name=\"n_clicks\" value=\"{}\">Submit</button>",
        n_clicks.saturating_add(1)
    );
    html.push_str("</form>\n<br>\n");

    let (class, text) = match output {
        Output::Text(text) => ("", text),
        Output::Error(text) => (" class=\"error\"", text),
    };
    let _ = writeln!(html, "<div id=\"{OUTPUT_ID}\"{class}>{}</div>", escape(text));
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_widget(html: &mut String, widget: &Widget, current: Option<&str>) {
    let _ = writeln!(html, "<label for=\"{}\">{}</label>", widget.id, escape(widget.label));
    match &widget.kind {
        WidgetKind::Dropdown(choices) => {
            let _ = writeln!(html, "<select id=\"{0}\" name=\"{0}\">", widget.id);
            let placeholder = if current.is_none() { " selected" } else { "" };
            let _ = writeln!(html, "<option value=\"\"{placeholder}>Select...</option>");
            for choice in choices {
                let selected = if current == Some(choice.value.as_str()) {
                    " selected"
                } else {
                    ""
                };
                let _ = writeln!(
                    html,
                    "<option value=\"{}\"{selected}>{}</option>",
                    escape(&choice.value),
                    escape(&choice.label)
                );
            }
            html.push_str("</select>\n");
        }
        WidgetKind::Number => {
            let _ = writeln!(
                html,
                "<input type=\"number\" step=\"any\" id=\"{0}\" name=\"{0}\" value=\"{1}\">",
                widget.id,
                escape(current.unwrap_or_default())
            );
        }
    }
}

/// Escape text for element content and double-quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
