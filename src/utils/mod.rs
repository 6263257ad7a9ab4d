pub mod api_response;
pub mod date_window;
pub mod validated_wrapper;
