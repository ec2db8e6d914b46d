#![deny(warnings)]
pub mod model;
pub mod query;
pub mod ratio;
pub mod simulate;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "drawodds"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "drawodds");
        assert!(!AppInfo::version().is_empty());
    }
}
