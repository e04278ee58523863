//! The animated farm scene: a 7-row day grid revealed, burned, and reset in one
//! continuous loop shared by every layer.

use std::fmt::Write as _;

use crate::{
    assets::DragonAsset,
    calendar::Calendar,
    config::SceneConfig,
    error::EmberfarmResult,
    intensity::{compute_thresholds, level_for_count},
    svg::{Element, document, num},
};

const BG_FILL: &str = "#0d1117";
const BASE_FILL: &str = "#161b22";
const CHARRED_FILL: &str = "#0c1016";
const CELL_RADIUS: f64 = 3.0;
const GRID_RADIUS: f64 = 6.0;

// Dragon placement relative to the grid; the figure travels with the burn
// sweep and exits past the right edge before fading.
const DRAGON_EXIT_MARGIN: f64 = 160.0;
const DRAGON_OFFSET_X: f64 = -58.0;
const DRAGON_Y_FACTOR: f64 = 0.58;
const DRAGON_MAX_WIDTH: f64 = 210.0;
const DRAGON_WIDTH_FACTOR: f64 = 1.8;

const DRAGON_BODY: &str = "M-36,10 C-28,-10 -2,-20 26,-16 C52,-12 58,14 36,30 C10,44 -22,32 -36,16 Z";
const DRAGON_BELLY: &str = "M-12,10 C-6,-2 8,-8 22,-6 C34,-4 36,12 24,20 C10,30 -4,22 -12,12 Z";
const DRAGON_HEAD: &str = "M26,-18 C44,-32 72,-22 74,-2 C76,16 50,18 30,6 Z";
const DRAGON_JAW: &str = "M32,4 L70,10 L34,14 Z";
const DRAGON_WING: &str = "M-10,-6 C-24,-26 -54,-30 -76,-14 C-50,-8 -30,2 -14,14 Z";
const DRAGON_WING_MEMBRANE: &str = "M-14,-4 C-28,-18 -46,-20 -58,-10 C-40,-6 -26,2 -18,8 Z";
const DRAGON_TAIL: &str = "M-34,18 C-54,30 -66,42 -76,52";
const DRAGON_HORN: &str = "M44,-30 L50,-46 L56,-28 Z";
const DRAGON_SPIKES: &str = "M-2,-18 L2,-30 L6,-18 Z M8,-14 L12,-24 L16,-14 Z M18,-10 L22,-20 L26,-10 Z";
const DRAGON_CLAW: &str = "M-2,20 L6,26 L2,30 L-6,22 Z";

/// Render the complete animated scene as a standalone SVG document.
pub fn render_farm(
    calendar: &Calendar,
    cfg: &SceneConfig,
    dragon: Option<&DragonAsset>,
) -> EmberfarmResult<String> {
    cfg.validate()?;

    let grid = cfg.grid(calendar.week_count());
    let grid_x = cfg.pad_x;
    let grid_y = cfg.pad_y;
    let svg_width = grid.width + cfg.pad_x * 2.0;
    let svg_height = grid.height + cfg.pad_y * 2.0;

    let thresholds = compute_thresholds(&calendar.counts());
    let rows = calendar.normalized(grid.weeks);

    let mut base_cells = Vec::new();
    let mut cells = Vec::new();
    for (week_index, row) in rows.iter().enumerate() {
        for (day_index, day) in row.iter().enumerate() {
            let x = grid_x + week_index as f64 * cfg.step();
            let y = grid_y + day_index as f64 * cfg.step();
            base_cells.push(cell_rect(x, y, cfg.cell, "cell base"));
            let level = level_for_count(day.count, &thresholds);
            cells.push(cell_rect(x, y, cfg.cell, &format!("cell l{level}")));
        }
    }

    let glow_travel = grid.width + cfg.glow_width;
    let dragon_exit = grid.width + DRAGON_EXIT_MARGIN;
    let dragon_y = grid_y + grid.height * DRAGON_Y_FACTOR;

    let style = scene_style(cfg, grid.width, glow_travel, dragon_exit);

    let defs = Element::new("defs")
        .child(
            Element::new("linearGradient")
                .attr("id", "revealGrad")
                .attr("x1", 0)
                .attr("y1", 0)
                .attr("x2", 1)
                .attr("y2", 0)
                .child(gradient_stop("0%", &cfg.greens[4], 0.0))
                .child(gradient_stop("50%", &cfg.greens[4], 0.55))
                .child(gradient_stop("100%", &cfg.greens[4], 0.0)),
        )
        .child(
            Element::new("clipPath").attr("id", "gridClip").child(
                Element::new("rect")
                    .attr("x", num(grid_x))
                    .attr("y", num(grid_y))
                    .attr("width", num(grid.width))
                    .attr("height", num(grid.height))
                    .attr("rx", num(GRID_RADIUS))
                    .attr("ry", num(GRID_RADIUS)),
            ),
        )
        .child(
            full_canvas_mask("revealMask", svg_width, svg_height).child(
                Element::new("rect")
                    .attr("class", "reveal-rect")
                    .attr("x", num(grid_x))
                    .attr("y", num(grid_y))
                    .attr("width", 0)
                    .attr("height", num(grid.height))
                    .attr("fill", "white"),
            ),
        )
        .child(
            full_canvas_mask("burnMask", svg_width, svg_height).child(
                Element::new("rect")
                    .attr("class", "burn-sweep")
                    .attr("x", num(grid_x - grid.width))
                    .attr("y", num(grid_y))
                    .attr("width", num(grid.width))
                    .attr("height", num(grid.height))
                    .attr("fill", "white"),
            ),
        )
        .child(Element::new("style").raw(format!("<![CDATA[\n{style}\n]]>")));

    let glow_band = Element::new("g")
        .attr("mask", "url(#revealMask)")
        .attr("clip-path", "url(#gridClip)")
        .child(
            Element::new("rect")
                .attr("class", "reveal-glow")
                .attr("x", num(grid_x - cfg.glow_width))
                .attr("y", num(grid_y))
                .attr("width", num(cfg.glow_width))
                .attr("height", num(grid.height)),
        );

    let burned_layer = Element::new("g")
        .attr("id", "burnedLayer")
        .attr("mask", "url(#burnMask)")
        .child(
            Element::new("rect")
                .attr("class", "burned-fill")
                .attr("x", num(grid_x))
                .attr("y", num(grid_y))
                .attr("width", num(grid.width))
                .attr("height", num(grid.height))
                .attr("rx", num(GRID_RADIUS))
                .attr("ry", num(GRID_RADIUS)),
        )
        .children(cells.clone());

    let dragon_group = Element::new("g")
        .attr("transform", format!("translate({}, {})", num(grid_x), num(dragon_y)))
        .child(
            Element::new("g")
                .attr("class", "dragon")
                .child(dragon_markup(dragon, grid.height)),
        );

    let root = Element::new("svg")
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("width", num(svg_width))
        .attr("height", num(svg_height))
        .attr("viewBox", format!("0 0 {} {}", num(svg_width), num(svg_height)))
        .attr("role", "img")
        .attr("aria-label", "Contribution farm animation")
        .child(Element::new("title").text("Contribution Farm"))
        .child(defs)
        .child(
            Element::new("rect")
                .attr("class", "bg")
                .attr("x", 0)
                .attr("y", 0)
                .attr("width", num(svg_width))
                .attr("height", num(svg_height)),
        )
        .child(Element::new("g").attr("id", "baseLayer").children(base_cells))
        .child(
            Element::new("g")
                .attr("id", "greenLayer")
                .attr("mask", "url(#revealMask)")
                .children(cells),
        )
        .child(glow_band)
        .child(burned_layer)
        .child(dragon_group);

    Ok(document(root))
}

fn cell_rect(x: f64, y: f64, size: f64, class: &str) -> Element {
    Element::new("rect")
        .attr("class", class)
        .attr("x", num(x))
        .attr("y", num(y))
        .attr("width", num(size))
        .attr("height", num(size))
        .attr("rx", num(CELL_RADIUS))
        .attr("ry", num(CELL_RADIUS))
}

fn gradient_stop(offset: &str, color: &str, opacity: f64) -> Element {
    Element::new("stop")
        .attr("offset", offset)
        .attr("stop-color", color)
        .attr("stop-opacity", num(opacity))
}

fn full_canvas_mask(id: &str, width: f64, height: f64) -> Element {
    Element::new("mask")
        .attr("id", id)
        .attr("x", 0)
        .attr("y", 0)
        .attr("width", num(width))
        .attr("height", num(height))
        .attr("maskUnits", "userSpaceOnUse")
        .child(
            Element::new("rect")
                .attr("width", num(width))
                .attr("height", num(height))
                .attr("fill", "black"),
        )
}

fn dragon_markup(dragon: Option<&DragonAsset>, grid_height: f64) -> Element {
    match dragon {
        Some(asset) => {
            let width = (grid_height * DRAGON_WIDTH_FACTOR).min(DRAGON_MAX_WIDTH).round();
            let height = (width / asset.ratio).round();
            let x = (-width * 0.6).round();
            let y = (-height * 0.58).round();
            // Rotated about its center to face the direction of travel.
            Element::new("image")
                .attr("class", "dragon-image")
                .attr("href", &asset.data_uri)
                .attr("x", num(x))
                .attr("y", num(y))
                .attr("width", num(width))
                .attr("height", num(height))
                .attr("preserveAspectRatio", "xMidYMid meet")
                .attr(
                    "transform",
                    format!(
                        "rotate(-90 {} {})",
                        num(x + width / 2.0),
                        num(y + height / 2.0)
                    ),
                )
        }
        None => Element::new("g")
            .attr("transform", format!("translate({}, 0)", num(DRAGON_OFFSET_X)))
            .child(dragon_path("dragon-wing", DRAGON_WING))
            .child(dragon_path("dragon-wing-membrane", DRAGON_WING_MEMBRANE))
            .child(dragon_path("dragon-tail", DRAGON_TAIL))
            .child(dragon_path("dragon-spike", DRAGON_SPIKES))
            .child(dragon_path("dragon-body", DRAGON_BODY))
            .child(dragon_path("dragon-belly", DRAGON_BELLY))
            .child(dragon_path("dragon-head", DRAGON_HEAD))
            .child(dragon_path("dragon-jaw", DRAGON_JAW))
            .child(
                Element::new("circle")
                    .attr("class", "dragon-eye")
                    .attr("cx", 52)
                    .attr("cy", -6)
                    .attr("r", 1.8),
            )
            .child(dragon_path("dragon-claw", DRAGON_CLAW))
            .child(dragon_path("dragon-horn", DRAGON_HORN)),
    }
}

fn dragon_path(class: &str, d: &str) -> Element {
    Element::new("path").attr("class", class).attr("d", d)
}

fn scene_style(cfg: &SceneConfig, grid_width: f64, glow_travel: f64, dragon_exit: f64) -> String {
    let timeline = &cfg.timeline;
    let duration = num(timeline.cycle_secs);

    let mut css = String::new();
    let _ = write!(
        css,
        "svg {{\n  font-family: \"IBM Plex Sans\", \"Segoe UI\", Arial, sans-serif;\n}}\n.bg {{\n  fill: {BG_FILL};\n}}\n.cell {{\n  shape-rendering: geometricPrecision;\n}}\n.base {{\n  fill: {BASE_FILL};\n}}\n#greenLayer {{\n  transform-box: fill-box;\n  transform-origin: center;\n}}\n"
    );
    for (level, color) in cfg.greens.iter().enumerate() {
        let _ = writeln!(css, "#greenLayer .l{level} {{ fill: {color}; }}");
    }
    for (level, color) in cfg.burns.iter().enumerate() {
        let _ = writeln!(css, "#burnedLayer .l{level} {{ fill: {color}; }}");
    }
    let _ = write!(
        css,
        ".reveal-rect {{\n  animation: reveal {duration}s linear infinite;\n}}\n.reveal-glow {{\n  fill: url(#revealGrad);\n  opacity: 0;\n  animation: glow {duration}s linear infinite;\n  mix-blend-mode: screen;\n}}\n.burned-fill {{\n  fill: {CHARRED_FILL};\n}}\n.burn-sweep {{\n  animation: burn {duration}s linear infinite;\n  transform-origin: left center;\n  transform-box: fill-box;\n}}\n.dragon {{\n  animation: dragonSweep {duration}s linear infinite;\n  transform-origin: left center;\n  transform-box: fill-box;\n}}\n.dragon-image {{\n  filter: drop-shadow(0px 2px 2px rgba(0, 0, 0, 0.35));\n}}\n.dragon-body {{\n  fill: #3a3f46;\n}}\n.dragon-belly {{\n  fill: #4a515a;\n  opacity: 0.9;\n}}\n.dragon-wing {{\n  fill: #2c3238;\n}}\n.dragon-wing-membrane {{\n  fill: #353b43;\n  opacity: 0.95;\n}}\n.dragon-head {{\n  fill: #3a3f46;\n}}\n.dragon-jaw {{\n  fill: #4a515a;\n}}\n.dragon-eye {{\n  fill: #f5f7fb;\n}}\n.dragon-tail {{\n  stroke: #3a3f46;\n  stroke-width: 3;\n  fill: none;\n  stroke-linecap: round;\n}}\n.dragon-horn {{\n  fill: #606770;\n}}\n.dragon-spike {{\n  fill: #5b626b;\n}}\n.dragon-claw {{\n  fill: #2c3238;\n}}\n\n"
    );

    let _ = write!(
        css,
        "{}\n{}\n{}\n{}",
        timeline.reveal_keyframes(grid_width),
        timeline.glow_keyframes(glow_travel),
        timeline.burn_keyframes(grid_width),
        timeline.dragon_keyframes(grid_width, dragon_exit),
    );
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Day;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample_calendar() -> Calendar {
        Calendar::new(vec![
            vec![
                Day::new(date("2024-01-07"), 5),
                Day::new(date("2024-01-09"), 3),
                Day::new(date("2024-01-11"), 8),
            ],
            vec![Day::new(date("2024-01-14"), 1)],
        ])
    }

    #[test]
    fn scene_contains_all_layers_and_masks() {
        let svg = render_farm(&sample_calendar(), &SceneConfig::default(), None).unwrap();
        for needle in [
            "id=\"baseLayer\"",
            "id=\"greenLayer\"",
            "id=\"burnedLayer\"",
            "id=\"revealMask\"",
            "id=\"burnMask\"",
            "id=\"gridClip\"",
            "@keyframes reveal",
            "@keyframes glow",
            "@keyframes burn",
            "@keyframes dragonSweep",
            "class=\"dragon\"",
        ] {
            assert!(svg.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn vector_dragon_renders_without_an_image_asset() {
        let svg = render_farm(&sample_calendar(), &SceneConfig::default(), None).unwrap();
        assert!(svg.contains("<path class=\"dragon-wing\""));
        assert!(svg.contains("<path class=\"dragon-horn\""));
        assert!(!svg.contains("<image"));
    }

    #[test]
    fn image_dragon_embeds_the_data_uri_rotated() {
        let asset = DragonAsset {
            data_uri: "data:image/png;base64,AAAA".to_string(),
            ratio: 2.0,
        };
        let svg = render_farm(&sample_calendar(), &SceneConfig::default(), Some(&asset)).unwrap();
        assert!(svg.contains("data:image/png;base64,AAAA"));
        assert!(svg.contains("rotate(-90"));
        assert!(!svg.contains("<path class=\"dragon-wing\""));
    }

    #[test]
    fn grid_width_flows_into_the_keyframes() {
        let cfg = SceneConfig::default();
        let svg = render_farm(&sample_calendar(), &cfg, None).unwrap();
        let grid = cfg.grid(2);
        assert!(svg.contains(&format!("width: {}px", num(grid.width))));
        assert!(svg.contains(&format!("translateX({}px)", num(grid.width))));
        assert!(svg.contains(&format!(
            "translateX({}px)",
            num(grid.width + DRAGON_EXIT_MARGIN)
        )));
    }

    #[test]
    fn min_weeks_pads_the_canvas() {
        let cfg = SceneConfig {
            min_weeks: 10,
            ..SceneConfig::default()
        };
        let svg = render_farm(&sample_calendar(), &cfg, None).unwrap();
        let grid = cfg.grid(2);
        assert_eq!(grid.weeks, 10);
        assert!(svg.contains(&format!("viewBox=\"0 0 {} ", num(grid.width + 72.0))));
        // 10 weeks x 7 days of base cells.
        assert_eq!(svg.matches("class=\"cell base\"").count(), 70);
    }

    #[test]
    fn empty_calendar_still_renders() {
        let svg = render_farm(&Calendar::default(), &SceneConfig::default(), None).unwrap();
        assert!(svg.contains("id=\"baseLayer\""));
        assert!(!svg.contains("class=\"cell base\""));
    }
}
