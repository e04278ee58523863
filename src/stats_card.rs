//! The static statistics panel: totals and streaks in a three-column card.

use crate::{
    calendar::Calendar,
    config::SceneConfig,
    error::EmberfarmResult,
    stats::compute_stats,
    svg::{Element, document, num},
};

const HEIGHT: f64 = 128.0;
const CARD_X: f64 = 14.0;
const CARD_Y: f64 = 38.0;
const CARD_HEIGHT: f64 = 76.0;
const ICON_Y: f64 = 12.0;

const STYLE: &str = r#"svg {
  font-family: "IBM Plex Sans", "Segoe UI", Arial, sans-serif;
}
.bg {
  fill: #0d1117;
}
.card {
  fill: #0f141b;
  stroke: #2b3a52;
  stroke-width: 1.2;
}
.title {
  fill: #c9d1d9;
  font-size: 16px;
  font-weight: 600;
}
.icon-blue {
  fill: #58a6ff;
}
.icon-soft {
  fill: #1f6feb;
}
.icon-light {
  fill: #79c0ff;
}
.stat-number {
  fill: #58a6ff;
  font-size: 26px;
  font-weight: 700;
}
.stat-label {
  fill: #79c0ff;
  font-size: 12px;
  font-weight: 600;
}
.stat-sub {
  fill: #8b949e;
  font-size: 11px;
}
.divider {
  stroke: #273040;
  stroke-width: 1;
}"#;

/// Render the stats panel, width-matched to the farm grid.
pub fn render_stats_card(calendar: &Calendar, cfg: &SceneConfig) -> EmberfarmResult<String> {
    cfg.validate()?;

    let grid = cfg.grid(calendar.week_count());
    let width = grid.width + cfg.pad_x * 2.0;

    let stats = compute_stats(calendar);
    let current_range = stats.current.range_label();
    let longest_range = stats.longest.range_label();
    let total_range = stats.total_range_label();

    let card_width = width - CARD_X * 2.0;
    let column_width = card_width / 3.0;
    let number_y = CARD_Y + 30.0;
    let label_y = CARD_Y + 50.0;
    let sub_y = CARD_Y + 68.0;

    let icon_x = CARD_X;
    let divider_x1 = CARD_X + column_width;
    let divider_x2 = CARD_X + column_width * 2.0;

    let title = Element::new("g")
        .child(
            Element::new("rect")
                .attr("class", "icon-soft")
                .attr("x", num(icon_x))
                .attr("y", num(ICON_Y))
                .attr("width", 6)
                .attr("height", 18)
                .attr("rx", 2),
        )
        .child(
            Element::new("rect")
                .attr("class", "icon-blue")
                .attr("x", num(icon_x + 8.0))
                .attr("y", num(ICON_Y + 4.0))
                .attr("width", 6)
                .attr("height", 14)
                .attr("rx", 2),
        )
        .child(
            Element::new("rect")
                .attr("class", "icon-light")
                .attr("x", num(icon_x + 16.0))
                .attr("y", num(ICON_Y + 1.0))
                .attr("width", 6)
                .attr("height", 17)
                .attr("rx", 2),
        )
        .child(
            Element::new("text")
                .attr("class", "title")
                .attr("x", num(icon_x + 26.0))
                .attr("y", num(ICON_Y + 14.0))
                .text("GitHub Stats"),
        );

    let columns = Element::new("g")
        .attr("text-anchor", "middle")
        .children(stat_column(
            CARD_X + column_width / 2.0,
            number_y,
            label_y,
            sub_y,
            &stats.total.to_string(),
            "Total Contributions",
            &total_range,
        ))
        .children(stat_column(
            CARD_X + column_width * 1.5,
            number_y,
            label_y,
            sub_y,
            &stats.current.length.to_string(),
            "Current Streak",
            &current_range,
        ))
        .children(stat_column(
            CARD_X + column_width * 2.5,
            number_y,
            label_y,
            sub_y,
            &stats.longest.length.to_string(),
            "Longest Streak",
            &longest_range,
        ));

    let root = Element::new("svg")
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("width", num(width))
        .attr("height", num(HEIGHT))
        .attr("viewBox", format!("0 0 {} {}", num(width), num(HEIGHT)))
        .attr("role", "img")
        .attr("aria-label", "GitHub stats")
        .child(Element::new("defs").child(Element::new("style").raw(format!("<![CDATA[\n{STYLE}\n]]>"))))
        .child(
            Element::new("rect")
                .attr("class", "bg")
                .attr("x", 0)
                .attr("y", 0)
                .attr("width", num(width))
                .attr("height", num(HEIGHT)),
        )
        .child(title)
        .child(
            Element::new("rect")
                .attr("class", "card")
                .attr("x", num(CARD_X))
                .attr("y", num(CARD_Y))
                .attr("width", num(card_width))
                .attr("height", num(CARD_HEIGHT))
                .attr("rx", 10),
        )
        .child(divider(divider_x1))
        .child(divider(divider_x2))
        .child(columns);

    Ok(document(root))
}

fn divider(x: f64) -> Element {
    Element::new("line")
        .attr("class", "divider")
        .attr("x1", num(x))
        .attr("y1", num(CARD_Y + 10.0))
        .attr("x2", num(x))
        .attr("y2", num(CARD_Y + CARD_HEIGHT - 10.0))
}

fn stat_column(
    x: f64,
    number_y: f64,
    label_y: f64,
    sub_y: f64,
    number: &str,
    label: &str,
    sub: &str,
) -> Vec<Element> {
    vec![
        Element::new("text")
            .attr("class", "stat-number")
            .attr("x", num(x))
            .attr("y", num(number_y))
            .text(number),
        Element::new("text")
            .attr("class", "stat-label")
            .attr("x", num(x))
            .attr("y", num(label_y))
            .text(label),
        Element::new("text")
            .attr("class", "stat-sub")
            .attr("x", num(x))
            .attr("y", num(sub_y))
            .text(sub),
    ]
}
