//! Interactive skill graph.
//!
//! Skills become circles sized by proficiency, linked to the other skills in
//! their group. The pipeline per rebuild and per frame:
//!
//! - **Model**: descriptors become [`SkillNode`]s; links come from the active
//!   [`GroupingMode`] (category, proficiency level, or none)
//! - **Layout**: a short deterministic force solve places nodes without overlap
//! - **Physics**: bodies launch outward from their solved spots, then bounce
//!   inside the viewport under slack-rope links, short-range repulsion, and an
//!   elastic pointer drag
//! - **Interaction**: a press on a node either becomes a drag or, if it never
//!   strays past a small threshold, a click that toggles selection
//! - **Rendering**: a vector layer for links, nodes, and labels over a raster
//!   layer with a node-warped grid and a glow for selected skills
//!
//! # Example
//!
//! ```ignore
//! use skill_graph::{SkillData, SkillGraph};
//!
//! let data = SkillData::from_json(r#"[{"id": "Rust", "category": "Languages", "proficiency": 9}]"#)?;
//! view! { <SkillGraph data=Signal::derive(move || data.clone()) /> }
//! ```

mod component;
mod config;
mod geometry;
pub mod interaction;
pub mod layout;
mod model;
mod panel;
pub mod physics;
mod render;
pub mod scale;
mod selection;
mod state;
pub mod theme;
mod types;
mod util;
mod warp;

pub use component::{GraphHandle, SkillGraph};
pub use config::GraphConfig;
pub use model::{GroupingMode, SkillNode};
pub use render::{GlowConfig, RenderQuality};
pub use selection::SelectionState;
pub use state::{GraphEvent, SkillDetail, SkillGraphState};
pub use theme::Theme;
pub use types::{SkillData, SkillDescriptor};
pub use warp::WarpConfig;
