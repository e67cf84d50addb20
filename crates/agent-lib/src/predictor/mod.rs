//! Lift schedule prediction engine

mod features;
mod schedule;

pub use features::{
    tide_height, FeatureVector, CANDIDATE_HOURS, CANDIDATE_MINUTES, PEAK_EVENING, PEAK_MORNING,
};
pub use schedule::{
    GeneratorConfig, ScheduleGenerator, MAX_LIFTS_PER_DAY, MIN_SPACING_MINUTES, OPERATIONAL_HOURS,
};
