#![forbid(unsafe_code)]

pub mod assets;
pub mod calendar;
pub mod config;
pub mod error;
pub mod farm;
pub mod fetch;
pub mod icons;
pub mod intensity;
pub mod stack_panel;
pub mod stats;
pub mod stats_card;
pub mod svg;
pub mod timeline;

pub use assets::{DEFAULT_DRAGON_RATIO, DragonAsset, dragon_from_png, load_dragon};
pub use calendar::{Calendar, DAYS_PER_WEEK, Day, normalize_week, weekday_slot};
pub use config::{GridGeometry, PanelConfig, SceneConfig};
pub use error::{EmberfarmError, EmberfarmResult};
pub use farm::render_farm;
pub use fetch::{fetch_contributions, fetch_contributions_blocking};
pub use icons::{IconArtwork, ViewBox, load_icon_dir, parse_icon_source};
pub use intensity::{Thresholds, compute_thresholds, level_for_count};
pub use stack_panel::{Section, Tile, default_sections, render_stack_panel};
pub use stats::{CalendarStats, Streak, compute_stats, format_range};
pub use stats_card::render_stats_card;
pub use timeline::Timeline;
