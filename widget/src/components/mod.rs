pub mod countdown;
pub mod prize_wheel;
pub mod result_modal;
pub mod wheel_controls;
pub mod wheel_svg;

pub use countdown::WheelCountdown;
pub use prize_wheel::PrizeWheel;
pub use result_modal::ResultModal;
pub use wheel_controls::WheelControls;
pub use wheel_svg::WheelSvg;
