// Note motion along the track. Pure functions of (note, song time).

use glam::Vec3;
use saber_model::Note;

use crate::track::TrackGeometry;

/// z coordinate of `note` at song time `t`.
///
/// Equals `player_distance` exactly at the note's arrival time and grows
/// linearly with `t` afterwards.
pub fn track_position(track: &TrackGeometry, note: &Note, t: f32) -> f32 {
    track.player_distance - (note.time - t) * track.note_speed
}

/// World position of `note` at song time `t`: its lane/layer slot projected
/// onto the current track position.
pub fn position(track: &TrackGeometry, note: &Note, t: f32) -> Vec3 {
    Vec3::new(
        track.lane_x(note.lane),
        track.layer_y(note.layer),
        track_position(track, note, t),
    )
}
