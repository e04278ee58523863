//! The tech-stack panel: titled sections of rounded tiles, each carrying icon
//! artwork rescaled into a fixed icon box, or a text glyph when none exists.

use std::collections::BTreeMap;

use crate::{
    config::PanelConfig,
    error::EmberfarmResult,
    icons::{IconArtwork, fit_into_box, namespace_ids},
    svg::{Element, document, num},
};

const TITLE_Y: f64 = 32.0;
const HEADER_HEIGHT: f64 = 20.0;
const FIRST_SECTION_Y: f64 = 56.0;
const BOTTOM_PAD: f64 = 8.0;
const ICON_TOP: f64 = 7.0;
const LABEL_BASELINE: f64 = 48.0;

const STYLE: &str = r#"svg {
  font-family: "IBM Plex Sans", "Segoe UI", Arial, sans-serif;
}
.bg {
  fill: url(#panel);
}
.title {
  fill: #e6edf3;
  font-size: 20px;
  font-weight: 700;
}
.section-title {
  fill: #c9d1d9;
  font-size: 13px;
  font-weight: 600;
}
.tile {
  stroke: rgba(255, 255, 255, 0.08);
  stroke-width: 1;
}
.tile-text {
  font-weight: 700;
  text-anchor: middle;
}
.tile-label {
  font-size: 10px;
  font-weight: 600;
  text-anchor: middle;
}"#;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Tile {
    pub label: String,
    pub icon_key: Option<String>,
    pub bg: String,
    pub fg: String,
}

impl Tile {
    pub fn new(label: &str, icon_key: &str, bg: &str, fg: &str) -> Self {
        Self {
            label: label.to_string(),
            icon_key: Some(icon_key.to_string()),
            bg: bg.to_string(),
            fg: fg.to_string(),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Section {
    pub title: String,
    pub tiles: Vec<Tile>,
}

/// Render the stack panel. `grid_width` is the farm grid width the panel is
/// width-matched to. Icon artwork is taken as pre-validated input; any key
/// without artwork renders the glyph fallback.
pub fn render_stack_panel(
    sections: &[Section],
    icons: &BTreeMap<String, IconArtwork>,
    grid_width: f64,
    cfg: &PanelConfig,
) -> EmberfarmResult<String> {
    cfg.validate()?;

    let width = grid_width + cfg.pad_x * 2.0;
    let available = width - cfg.pad_x * 2.0;
    let step = cfg.tile_size + cfg.tile_gap;

    let mut cursor_y = FIRST_SECTION_Y;
    let mut icon_instance = 0usize;
    let mut blocks: Vec<Element> = Vec::new();

    for section in sections {
        blocks.push(
            Element::new("text")
                .attr("class", "section-title")
                .attr("x", num(cfg.pad_x))
                .attr("y", num(cursor_y))
                .text(&section.title),
        );
        cursor_y += HEADER_HEIGHT;

        let columns = cfg.columns_for(available).min(section.tiles.len().max(1));
        let rows = section.tiles.len().div_ceil(columns);
        let block_width = columns as f64 * cfg.tile_size + (columns - 1) as f64 * cfg.tile_gap;
        let offset_x = (cfg.pad_x + (available - block_width).max(0.0) / 2.0).round();

        for (index, tile) in section.tiles.iter().enumerate() {
            let col = index % columns;
            let row = index / columns;
            let x = offset_x + col as f64 * step;
            let y = cursor_y + row as f64 * step;
            blocks.push(tile_group(tile, icons, x, y, cfg, &mut icon_instance));
        }

        let block_height = rows as f64 * cfg.tile_size + (rows.saturating_sub(1)) as f64 * cfg.tile_gap;
        cursor_y += block_height + cfg.section_gap;
    }

    let height = cursor_y + BOTTOM_PAD;

    let defs = Element::new("defs")
        .child(
            Element::new("linearGradient")
                .attr("id", "panel")
                .attr("x1", 0)
                .attr("y1", 0)
                .attr("x2", 1)
                .attr("y2", 1)
                .child(
                    Element::new("stop")
                        .attr("offset", "0%")
                        .attr("stop-color", "#0b1016"),
                )
                .child(
                    Element::new("stop")
                        .attr("offset", "100%")
                        .attr("stop-color", "#0f141b"),
                ),
        )
        .child(Element::new("style").raw(format!("<![CDATA[\n{STYLE}\n]]>")));

    let root = Element::new("svg")
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("width", num(width))
        .attr("height", num(height))
        .attr("viewBox", format!("0 0 {} {}", num(width), num(height)))
        .attr("role", "img")
        .attr("aria-label", "Frequently used tech stacks")
        .child(defs)
        .child(
            Element::new("rect")
                .attr("class", "bg")
                .attr("x", 0)
                .attr("y", 0)
                .attr("width", num(width))
                .attr("height", num(height))
                .attr("rx", 18),
        )
        .child(
            Element::new("text")
                .attr("class", "title")
                .attr("x", num(cfg.pad_x))
                .attr("y", num(TITLE_Y))
                .text("Frequently Used Tech Stacks"),
        )
        .children(blocks);

    Ok(document(root))
}

fn tile_group(
    tile: &Tile,
    icons: &BTreeMap<String, IconArtwork>,
    x: f64,
    y: f64,
    cfg: &PanelConfig,
    icon_instance: &mut usize,
) -> Element {
    let mut group = Element::new("g")
        .attr("transform", format!("translate({}, {})", num(x), num(y)))
        .child(
            Element::new("rect")
                .attr("class", "tile")
                .attr("width", num(cfg.tile_size))
                .attr("height", num(cfg.tile_size))
                .attr("rx", num(cfg.tile_radius))
                .attr("fill", &tile.bg),
        );

    let artwork = tile.icon_key.as_deref().and_then(|key| icons.get(key));
    match artwork {
        Some(artwork) => {
            let prefix = format!("icon{icon_instance}");
            *icon_instance += 1;
            let placement = fit_into_box(&artwork.view_box, cfg.icon_box);
            let icon_x = (cfg.tile_size - cfg.icon_box) / 2.0;
            group = group
                .child(
                    Element::new("g")
                        .attr(
                            "transform",
                            format!("translate({}, {})", num(icon_x), num(ICON_TOP)),
                        )
                        .attr("fill", &tile.fg)
                        .child(
                            Element::new("g")
                                .attr("transform", placement.transform())
                                .raw(namespace_ids(&artwork.body, &prefix)),
                        ),
                )
                .child(
                    Element::new("text")
                        .attr("class", "tile-label")
                        .attr("x", num(cfg.tile_size / 2.0))
                        .attr("y", num(LABEL_BASELINE))
                        .attr("fill", &tile.fg)
                        .text(&tile.label),
                );
        }
        None => {
            let font_size = glyph_size(&tile.label);
            group = group.child(
                Element::new("text")
                    .attr("class", "tile-text")
                    .attr("x", num(cfg.tile_size / 2.0))
                    .attr("y", num(cfg.tile_size / 2.0 + f64::from(font_size) / 3.0))
                    .attr("font-size", font_size)
                    .attr("fill", &tile.fg)
                    .text(&tile.label),
            );
        }
    }
    group
}

/// Glyph font size shrinks with label length so long labels stay inside the
/// tile.
fn glyph_size(label: &str) -> u32 {
    match label.chars().count() {
        0..=2 => 16,
        3 => 15,
        4 => 14,
        5 => 13,
        _ => 12,
    }
}

/// The stock section list.
pub fn default_sections() -> Vec<Section> {
    let tiles = |list: &[(&str, &str, &str, &str)]| {
        list.iter()
            .map(|&(label, key, bg, fg)| Tile::new(label, key, bg, fg))
            .collect()
    };
    vec![
        Section {
            title: "Data Structures & Algorithms".to_string(),
            tiles: tiles(&[
                ("C", "c", "#4f6bd8", "#ffffff"),
                ("C++", "cplusplus", "#00599c", "#ffffff"),
                ("Rust", "rust", "#b7410e", "#ffffff"),
            ]),
        },
        Section {
            title: "Web Development".to_string(),
            tiles: tiles(&[
                ("HTML", "html5", "#e34f26", "#ffffff"),
                ("CSS", "css3", "#1572b6", "#ffffff"),
                ("JS", "javascript", "#f7df1e", "#1f2328"),
                ("TS", "typescript", "#3178c6", "#ffffff"),
                ("Go", "go", "#00add8", "#ffffff"),
                ("Py", "python", "#3776ab", "#ffffff"),
                ("PG", "postgresql", "#336791", "#ffffff"),
                ("Mongo", "mongodb", "#13aa52", "#ffffff"),
                ("React", "react", "#61dafb", "#0b111a"),
                ("Vite", "vite", "#646cff", "#ffffff"),
                ("Next", "nextdotjs", "#111111", "#ffffff"),
                ("TW", "tailwindcss", "#06b6d4", "#ffffff"),
                ("Ex", "express", "#333333", "#ffffff"),
                ("Node", "nodedotjs", "#539e43", "#ffffff"),
                ("Fire", "firebase", "#ffca28", "#1f2328"),
                ("Redis", "redis", "#d82c20", "#ffffff"),
                ("Docker", "docker", "#2496ed", "#ffffff"),
                ("Nginx", "nginx", "#009639", "#ffffff"),
                ("NPM", "npm", "#cb3837", "#ffffff"),
                ("Git", "git", "#f05032", "#ffffff"),
                ("Linux", "linux", "#fdd835", "#1f2328"),
                ("Graph", "graphql", "#e10098", "#ffffff"),
                ("Prisma", "prisma", "#0c344b", "#ffffff"),
                ("Supa", "supabase", "#3ecf8e", "#0b111a"),
            ]),
        },
        Section {
            title: "Data Science".to_string(),
            tiles: tiles(&[
                ("Py", "python", "#3776ab", "#ffffff"),
                ("NP", "numpy", "#4dabcf", "#ffffff"),
                ("PD", "pandas", "#6f62ff", "#ffffff"),
                ("SK", "scikitlearn", "#f7931e", "#1f2328"),
            ]),
        },
    ]
}
