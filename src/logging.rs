/// Conditional logging for development builds
///
/// In the browser the `log!` macro writes to the console in debug builds or
/// when the `console_logging` feature is enabled, and compiles to nothing in
/// release builds. On native targets it forwards to `log::info!` so the
/// updater's `env_logger` picks it up. Errors and warnings in browser code keep
/// using `web_sys::console::error_*` and `web_sys::console::warn_*` directly.
///
/// # Examples
///
/// ```rust
/// use inflation_map::log;
///
/// let regions = 51;
/// log!("Attached tooltip to {} regions", regions);
/// ```
#[macro_export]
macro_rules! log {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(all(target_arch = "wasm32", any(debug_assertions, feature = "console_logging")))]
        {
            web_sys::console::log_1(&format!($($arg),+).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            $crate::__log::info!($($arg),+);
        }
    };
}

pub use crate::log;
