// Note chart data model: notes, charts, hand-tracking snapshots, chart decoders

mod beatmap_decode;
mod chart;
mod chart_decode;
mod hand;
mod note;

pub use beatmap_decode::BeatmapDecoder;
pub use chart::Chart;
pub use chart_decode::ChartDecoder;
pub use hand::{HandFrame, HandSample};
pub use note::{CutDirection, Hand, LANE_COUNT, LAYER_COUNT, Note};

pub use glam::Vec3;
