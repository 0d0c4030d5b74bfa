// Hand tracking logs and run records

pub mod json_file;
pub mod run_record;
pub mod tracking_log;

pub use run_record::{Judgement, RecordedEvent, RunRecord};
pub use tracking_log::{HandFrameLog, TrackedHand, TrackingLog};
