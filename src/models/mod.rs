pub mod news_model;
pub mod topic_model;
pub mod widget_model;
