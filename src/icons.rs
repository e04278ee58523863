//! Externally supplied icon artwork: view-box parsing, uniform rescale into a
//! tile's icon box, and per-instance identifier namespacing so multiple icons
//! can share one document without id collisions.

use std::{collections::BTreeMap, fs, path::Path, sync::LazyLock};

use anyhow::Context as _;
use regex::Regex;

use crate::{error::EmberfarmResult, svg::num};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Sanitized, self-contained icon markup plus its bounding box. Supplied per
/// render by the icon collaborator; the composers never mutate it.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct IconArtwork {
    pub view_box: ViewBox,
    pub body: String,
}

/// Uniform placement of an icon into a square icon box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IconPlacement {
    pub scale: f64,
    pub tx: f64,
    pub ty: f64,
}

impl IconPlacement {
    pub fn transform(&self) -> String {
        format!(
            "translate({}, {}) scale({})",
            num(self.tx),
            num(self.ty),
            num(self.scale)
        )
    }
}

/// Parse an SVG `viewBox` attribute value (4 numbers, whitespace or commas).
pub fn parse_view_box(value: &str) -> Option<ViewBox> {
    let parts: Vec<f64> = value
        .split([' ', ',', '\t', '\n'])
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    let [min_x, min_y, width, height] = parts.as_slice() else {
        return None;
    };
    if *width <= 0.0 || *height <= 0.0 {
        return None;
    }
    Some(ViewBox {
        min_x: *min_x,
        min_y: *min_y,
        width: *width,
        height: *height,
    })
}

/// Aspect-preserving fit: equal x/y scale, re-based to the artwork's own
/// view-box origin, centered along the shorter axis.
pub fn fit_into_box(view_box: &ViewBox, box_size: f64) -> IconPlacement {
    let scale = box_size / view_box.width.max(view_box.height);
    IconPlacement {
        scale,
        tx: (box_size - view_box.width * scale) / 2.0 - view_box.min_x * scale,
        ty: (box_size - view_box.height * scale) / 2.0 - view_box.min_y * scale,
    }
}

static ID_DEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bid="([^"]+)""#).expect("id pattern"));

/// Rewrite every identifier the body defines, and every internal reference to
/// it (`url(#…)` paints/clips, `href="#…"` links), to a per-instance prefix.
/// References to ids the body does not define are left untouched.
pub fn namespace_ids(body: &str, prefix: &str) -> String {
    let mut out = body.to_string();
    for capture in ID_DEF.captures_iter(body) {
        let id = &capture[1];
        out = out
            .replace(
                &format!("id=\"{id}\""),
                &format!("id=\"{prefix}-{id}\""),
            )
            .replace(
                &format!("url(#{id})"),
                &format!("url(#{prefix}-{id})"),
            )
            .replace(
                &format!("href=\"#{id}\""),
                &format!("href=\"#{prefix}-{id}\""),
            );
    }
    out
}

/// Structural validity gate before embedding: malformed artwork falls back to
/// the glyph rather than risking partial rewriting.
pub fn is_well_formed(artwork: &IconArtwork) -> bool {
    let wrapped = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">{}</svg>",
        num(artwork.view_box.min_x),
        num(artwork.view_box.min_y),
        num(artwork.view_box.width),
        num(artwork.view_box.height),
        artwork.body,
    );
    usvg::Tree::from_data(wrapped.as_bytes(), &usvg::Options::default()).is_ok()
}

static VIEW_BOX_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"viewBox="([^"]*)""#).expect("viewBox pattern"));

/// Extract `{view_box, body}` from standalone SVG source. Returns `None` for
/// anything that should degrade to the glyph fallback.
pub fn parse_icon_source(source: &str) -> Option<IconArtwork> {
    let view_box = parse_view_box(&VIEW_BOX_ATTR.captures(source)?[1])?;
    let open_start = source.find("<svg")?;
    let open_end = open_start + source[open_start..].find('>')?;
    let close = source.rfind("</svg>")?;
    if close <= open_end {
        return None;
    }
    let artwork = IconArtwork {
        view_box,
        body: source[open_end + 1..close].trim().to_string(),
    };
    is_well_formed(&artwork).then_some(artwork)
}

/// Load every `*.svg` in a directory, keyed by file stem. Files that fail to
/// parse are skipped with a warning; the panel then renders their glyph.
pub fn load_icon_dir(dir: &Path) -> EmberfarmResult<BTreeMap<String, IconArtwork>> {
    let mut icons = BTreeMap::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("read icon dir '{}'", dir.display()))?;
    for entry in entries {
        let path = entry.context("read icon dir entry")?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("svg") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let source =
            fs::read_to_string(&path).with_context(|| format!("read icon '{}'", path.display()))?;
        match parse_icon_source(&source) {
            Some(artwork) => {
                icons.insert(stem.to_string(), artwork);
            }
            None => {
                tracing::warn!(icon = %path.display(), "skipping unusable icon artwork");
            }
        }
    }
    Ok(icons)
}
