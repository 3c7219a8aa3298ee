pub mod collection_service;
pub mod content_service;
pub mod media_service;
pub mod menu_service;
pub mod site_var_service;
pub mod tag_service;
