//! UI components
//!
//! Components are pure functions of their props. They never mutate shared
//! state; key handling returns actions for the reducer instead.

pub mod city_map;
pub mod dashboard;
pub mod help_bar;
pub mod info_modal;
pub mod sidebar;
pub mod value_boxes;

pub use city_map::{CityMap, CityMapProps};
pub use dashboard::{Dashboard, DashboardProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use info_modal::{InfoModal, InfoModalProps, INFO_TEXT, INFO_TITLE};
pub use sidebar::{Sidebar, SidebarProps};
pub use value_boxes::{ValueBoxes, ValueBoxesProps, ERROR_ICON, SPINNERS};
