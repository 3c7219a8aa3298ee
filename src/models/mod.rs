pub mod content_model;
pub mod media_model;
pub mod menu_model;
pub mod site_model;
