use std::collections::BTreeMap;

use emberfarm::{
    IconArtwork, PanelConfig, SceneConfig, Section, Tile, ViewBox, default_sections,
    parse_icon_source, render_stack_panel,
};

fn icon_24(body: &str) -> IconArtwork {
    IconArtwork {
        view_box: ViewBox {
            min_x: 0.0,
            min_y: 0.0,
            width: 24.0,
            height: 24.0,
        },
        body: body.to_string(),
    }
}

#[test]
fn default_sections_render_with_glyph_fallbacks() {
    let grid_width = SceneConfig::default().grid(52).width;
    let svg = render_stack_panel(
        &default_sections(),
        &BTreeMap::new(),
        grid_width,
        &PanelConfig::default(),
    )
    .unwrap();

    assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg"));
    assert!(svg.contains("Frequently Used Tech Stacks"));
    assert!(svg.contains("Data Structures &amp; Algorithms"));
    assert!(svg.contains("Web Development"));
    assert!(svg.contains("Data Science"));
    // 3 + 24 + 4 tiles, all glyph fallbacks.
    assert_eq!(svg.matches("class=\"tile\"").count(), 31);
    assert_eq!(svg.matches("class=\"tile-text\"").count(), 31);
}

#[test]
fn supplied_icons_replace_glyphs_per_tile() {
    let mut icons = BTreeMap::new();
    icons.insert(
        "rust".to_string(),
        icon_24(r#"<path d="M12 2 L22 22 L2 22 Z" />"#),
    );
    let sections = vec![Section {
        title: "Langs".to_string(),
        tiles: vec![
            Tile::new("Rust", "rust", "#b7410e", "#ffffff"),
            Tile::new("Go", "go", "#00add8", "#ffffff"),
        ],
    }];
    let svg = render_stack_panel(&sections, &icons, 400.0, &PanelConfig::default()).unwrap();

    // The rust tile embeds the artwork with a uniform 30/24 rescale; the go
    // tile falls back to its glyph.
    assert!(svg.contains("scale(1.25)"));
    assert!(svg.contains("M12 2 L22 22 L2 22 Z"));
    assert_eq!(svg.matches("class=\"tile-text\"").count(), 1);
    assert_eq!(svg.matches("class=\"tile-label\"").count(), 1);
    assert!(svg.contains(">Go</text>"));
}

#[test]
fn embedded_icon_ids_never_collide_across_instances() {
    let body = r##"<defs><linearGradient id="g"><stop offset="0" /></linearGradient></defs><rect fill="url(#g)" width="24" height="24" />"##;
    let mut icons = BTreeMap::new();
    icons.insert("a".to_string(), icon_24(body));
    icons.insert("b".to_string(), icon_24(body));
    let sections = vec![Section {
        title: "Twins".to_string(),
        tiles: vec![
            Tile::new("A", "a", "#111111", "#ffffff"),
            Tile::new("B", "b", "#222222", "#ffffff"),
        ],
    }];
    let svg = render_stack_panel(&sections, &icons, 400.0, &PanelConfig::default()).unwrap();

    assert!(svg.contains("id=\"icon0-g\""));
    assert!(svg.contains("id=\"icon1-g\""));
    assert!(svg.contains("url(#icon0-g)"));
    assert!(svg.contains("url(#icon1-g)"));
    assert!(!svg.contains("id=\"g\""));
}

#[test]
fn icon_pipeline_accepts_real_icon_files() {
    let source = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M23.693 18.704 13.416.972a1.6 1.6 0 0 0-2.832 0L.307 18.704" /></svg>"#;
    let artwork = parse_icon_source(source).unwrap();
    let mut icons = BTreeMap::new();
    icons.insert("vite".to_string(), artwork);
    let sections = vec![Section {
        title: "Tools".to_string(),
        tiles: vec![Tile::new("Vite", "vite", "#646cff", "#ffffff")],
    }];
    let svg = render_stack_panel(&sections, &icons, 400.0, &PanelConfig::default()).unwrap();
    assert!(svg.contains("M23.693 18.704"));
    assert_eq!(svg.matches("class=\"tile-text\"").count(), 0);
}

#[test]
fn sections_wrap_to_the_width_budget() {
    // 7 tiles into a budget that fits exactly three columns.
    let sections = vec![Section {
        title: "Wrap".to_string(),
        tiles: (0..7)
            .map(|i| Tile {
                label: format!("T{i}"),
                icon_key: None,
                bg: "#123456".to_string(),
                fg: "#ffffff".to_string(),
            })
            .collect(),
    }];
    let svg =
        render_stack_panel(&sections, &BTreeMap::new(), 192.0, &PanelConfig::default()).unwrap();
    // Tile origins: three distinct x positions, three distinct y rows.
    let cfg = PanelConfig::default();
    let step = cfg.tile_size + cfg.tile_gap;
    for col in 0..3 {
        assert!(svg.contains(&format!("translate({}, 76)", 36.0 + col as f64 * step)));
    }
    assert!(svg.contains(&format!("translate(36, {})", 76.0 + 2.0 * step)));
    assert!(!svg.contains(&format!("translate({}, {})", 36.0 + step, 76.0 + 2.0 * step)));
}
