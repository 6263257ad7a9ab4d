pub mod news;
pub mod news_image;
pub mod topic;
pub mod widget_config;
