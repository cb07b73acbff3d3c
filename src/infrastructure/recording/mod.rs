pub mod cpal_recorder;

pub use cpal_recorder::CpalRecorder;
