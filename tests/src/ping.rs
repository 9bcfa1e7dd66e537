mod integration;
#[cfg(unix)]
mod process;
