pub mod banner;
pub mod logger;
pub mod ports;
pub mod utils;
