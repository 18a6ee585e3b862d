pub mod alert;
pub mod change;
pub mod forecast;
pub mod observation;
pub mod sun;
pub mod thresholds;
pub mod trend;
pub mod window;

pub use alert::*;
pub use change::*;
pub use forecast::*;
pub use observation::*;
pub use sun::*;
pub use thresholds::*;
pub use trend::*;
pub use window::*;
