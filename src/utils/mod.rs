pub mod api_response;
pub mod current_site;
pub mod html_utils;
pub mod validated_wrapper;
pub mod validator_utils;
