pub mod components;
pub mod scheduler;
pub mod storage;
pub mod theme;

pub use components::prize_wheel::{AdapterRef, PrizeWheel, PrizeWheelProps};
pub use scheduler::TimeoutScheduler;
pub use storage::LocalStorageAdapter;
pub use theme::{segment_color, WheelTheme, DEFAULT_SEGMENT_COLORS};

// Re-export the engine crate so hosts only need one dependency.
pub use wheel_core;
