use saber_model::LANE_COUNT;
use serde::{Deserialize, Serialize};

/// Fixed track geometry: where notes spawn, where the player stands, how fast
/// notes travel and where each lane/layer slot sits.
///
/// The track runs along +z toward the player. x is horizontal (lanes), y is
/// vertical (layers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct TrackGeometry {
    /// z coordinate where notes appear
    pub spawn_distance: f32,
    /// z coordinate of the player (cut plane)
    pub player_distance: f32,
    /// Constant note travel speed in units per second
    pub note_speed: f32,
    /// Horizontal distance between adjacent lanes
    pub lane_spacing: f32,
    /// Height of layer 0
    pub layer_base_height: f32,
    /// Vertical distance between adjacent layers
    pub layer_spacing: f32,
}

impl Default for TrackGeometry {
    fn default() -> Self {
        Self {
            spawn_distance: -30.0,
            player_distance: 0.0,
            note_speed: 12.0,
            lane_spacing: 0.6,
            layer_base_height: 0.8,
            layer_spacing: 0.5,
        }
    }
}

impl TrackGeometry {
    /// Seconds before its arrival time that a note must be spawned.
    pub fn lead_time(&self) -> f32 {
        (self.spawn_distance - self.player_distance).abs() / self.note_speed
    }

    /// x coordinate of a lane, centred on the track.
    pub fn lane_x(&self, lane: u8) -> f32 {
        let center = (LANE_COUNT as f32 - 1.0) / 2.0;
        (lane as f32 - center) * self.lane_spacing
    }

    /// y coordinate of a layer.
    pub fn layer_y(&self, layer: u8) -> f32 {
        self.layer_base_height + layer as f32 * self.layer_spacing
    }
}
