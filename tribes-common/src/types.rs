pub mod throttled;
