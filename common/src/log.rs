/// Tracing target used for completion messages; the CLI formatter renders
/// these with the success marker.
pub const SUCCESS_TARGET: &str = "fastping::success";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        ::tracing::info!(target: $crate::log::SUCCESS_TARGET, $($arg)*)
    };
}
