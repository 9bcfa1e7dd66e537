mod ping;
mod utils;
