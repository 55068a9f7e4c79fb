pub mod dispatch;
pub mod math;
pub mod metrics;
pub mod providers;

pub use dispatch::execute;
