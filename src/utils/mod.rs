pub mod constants;
mod logging;
mod test_data;
mod timeout;
mod wait_for_element;

pub use logging::init_logging;
pub use test_data::{
    current_date, format_date, generate_random_string, generate_random_string_with, wait,
};
pub use timeout::{MAX_INTERACTION_TIMEOUT_MS, validate_interaction_timeout, validate_timeout};
pub use wait_for_element::wait_for_element;
