//! Where the contact relay is reached from the browser.

#[cfg(debug_assertions)]
const DEFAULT_API_ORIGIN: &str = "http://localhost:3000";

// Release builds are served by the backend, so requests stay same-origin.
#[cfg(not(debug_assertions))]
const DEFAULT_API_ORIGIN: &str = "";

/// API origin, overridable at build time with `STUDIO_API_ORIGIN`.
pub fn api_origin() -> &'static str {
    option_env!("STUDIO_API_ORIGIN").unwrap_or(DEFAULT_API_ORIGIN)
}

pub fn api_url(path: &str) -> String {
    join_url(api_origin(), path)
}

fn join_url(origin: &str, path: &str) -> String {
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_a_single_slash() {
        assert_eq!(join_url("http://localhost:3000", "/api/send-email"), "http://localhost:3000/api/send-email");
        assert_eq!(join_url("https://studio.example/", "api/health"), "https://studio.example/api/health");
    }

    #[test]
    fn empty_origin_gives_a_same_origin_path() {
        assert_eq!(join_url("", "/api/send-email"), "/api/send-email");
    }
}
