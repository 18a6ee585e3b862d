pub mod briefing;
pub mod changes;
pub mod daylight;
pub mod departure;
pub mod minimums;
pub mod rules;
pub mod solar;
pub mod timeline;
pub mod trend;

pub use briefing::{Briefing, BriefingInput, BriefingOptions};
pub use changes::detect_changes;
pub use daylight::{is_night, sun_info};
pub use departure::{analyze_departure, first_qualifying_period};
pub use minimums::night_minimums;
pub use rules::AlertEngine;
pub use timeline::generate_timeline;
pub use trend::analyze_trends;
