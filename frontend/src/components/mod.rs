pub mod copy_code;
pub mod giscus;
pub mod mobile_menu;
pub mod theme_toggle;
