pub mod article;
pub mod article_audio;
pub mod article_image;
pub mod article_series;
pub mod article_video;
pub mod audio_file;
pub mod content_tag;
pub mod home_page;
pub mod image_file;
pub mod link;
pub mod menu;
pub mod page;
pub mod section;
pub mod site;
pub mod site_var;
pub mod status;
pub mod tag;
pub mod video_file;
