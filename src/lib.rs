// Calendar Layout Library
// Event layout engine for calendar day and week views

pub mod models;
pub mod services;
pub mod utils;

pub use models::event::{CalendarEvent, EventTime};
pub use models::layout::{
    DayLayout, GridPosition, LayoutDiagnostic, Placement, PositionedEvent, WeekLayout,
};
pub use models::settings::LayoutSettings;
pub use models::window::Window;
pub use services::layout::{grid_position, layout_day, layout_week};
