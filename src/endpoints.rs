//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/statistics/{month}',
//! use `format_endpoint`.

/// The root route which greets the caller.
pub const ROOT: &str = "/";
/// The route for listing transactions with search and pagination.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for replacing the database contents with the upstream seed feed.
pub const SEED: &str = "/api/transactions/seed";
/// The route for the sale statistics of one month.
pub const STATISTICS: &str = "/api/transactions/statistics/{month}";
/// The route for the price histogram of one month.
pub const BAR_CHART: &str = "/api/transactions/bar-chart/{month}";
/// The route for the category distribution of one month.
pub const PIE_CHART: &str = "/api/transactions/pie-chart/{month}";
/// The route for the statistics and both chart data sets of one month.
pub const COMBINED_DATA: &str = "/api/transactions/combined-data/{month}";

/// Replace the parameter in `endpoint_path` with `value`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/statistics/{month}', '{month}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, value: &str) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };
    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}

// Catches malformed endpoint paths before the router panics at registration time.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::SEED);
        assert_endpoint_is_valid_uri(endpoints::STATISTICS);
        assert_endpoint_is_valid_uri(endpoints::BAR_CHART);
        assert_endpoint_is_valid_uri(endpoints::PIE_CHART);
        assert_endpoint_is_valid_uri(endpoints::COMBINED_DATA);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{month}", "March");

        assert_eq!(formatted_path, "/hello/March");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", "March");

        assert_eq!(formatted_path, "/hello/world");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{month}/bye", "March");

        assert_eq!(formatted_path, "/hello/March/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
