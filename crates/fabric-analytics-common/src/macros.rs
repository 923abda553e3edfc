/// Convenience macros to dispatch enum methods
/// Example
/// ```rust
/// use fabric_analytics_common::enum_dispatch;
///
/// pub enum Fetcher {
///     Http(HttpFetcher),
///     Mock(MockFetcher)
/// }
///
/// impl Fetcher {
///    pub async fn fetch(&self, endpoint: &str) -> Result<String, Error> {
///       match self {
///          Self::Http(x) => x.fetch(endpoint).await,
///          Self::Mock(x) => x.fetch(endpoint).await
///       }
///       // Equivalent to
///       enum_dispatch!(self {
///          Self::Http(x) |
///          Self::Mock(x) => x.fetch(endpoint).await
///       })
///    }
/// }
///
/// ```
#[macro_export]
macro_rules! enum_dispatch {
    ($self: ident { $($($variant: pat_param)|* => $do: expr),+ }) => {
        match $self {
            $(
                $($variant => $do),+
            ),+
        }
    };
}

/// Log the error carried by a [`Result`] at error level and hand the result back untouched
#[macro_export]
macro_rules! log_if_error {
    ($e: expr) => {
        match $e {
            Ok(v) => Ok(v),
            Err(e) => {
                $crate::tracing::error!("{}", e);
                Err(e)
            },
        }
    };
}
