//! SRV records.

use http::uri::{PathAndQuery, Scheme, Uri};
use std::{convert::TryInto, fmt::Display};

/// Representation of types that contain the fields of a SRV record.
pub trait SrvRecord {
    /// Type representing the SRV record's target. Must implement `Display` so
    /// it can be used to create a `Uri`.
    type Target: Display + ?Sized;

    /// Gets a SRV record's target.
    fn target(&self) -> &Self::Target;

    /// Gets a SRV record's port.
    fn port(&self) -> u16;

    /// Gets a SRV record's priority.
    fn priority(&self) -> u16;

    /// Gets a SRV record's weight.
    fn weight(&self) -> u16;

    /// Gets a SRV record's target as a host name, with a single trailing dot
    /// (as found on fully-qualified names) removed.
    ///
    /// The root target `"."`, which RFC 2782 uses to mark a service as
    /// unavailable, becomes an empty host; records are not filtered for it.
    fn host(&self) -> String {
        let mut host = self.target().to_string();
        if host.ends_with('.') {
            host.pop();
        }
        host
    }

    /// Converts a SRV record into a URI with a given scheme (e.g. http) and
    /// `path_and_query` (used as a suffix in the URI).
    ///
    /// ```
    /// # fn srv_record_to_uri() -> Result<(), http::Error> {
    /// use srv_bootstrap::{resolver::fixed::FixedSrvRecord, SrvRecord};
    /// let record = FixedSrvRecord::new(10, 0, 8091, "a.local.");
    /// assert_eq!(
    ///     &record.to_uri("http", "/pools")?.to_string(),
    ///     "http://a.local:8091/pools"
    /// );
    /// assert_eq!(
    ///     &record.to_uri("https", "/")?.to_string(),
    ///     "https://a.local:8091/"
    /// );
    /// # Ok(())
    /// # }
    /// ```
    fn to_uri(
        &self,
        scheme: impl TryInto<Scheme, Error = impl Into<http::Error>>,
        path_and_query: impl TryInto<PathAndQuery, Error = impl Into<http::Error>>,
    ) -> Result<Uri, http::Error> {
        let scheme: Scheme = scheme.try_into().map_err(Into::into)?;
        let path_and_query: PathAndQuery = path_and_query.try_into().map_err(Into::into)?;
        Uri::builder()
            .scheme(scheme)
            .path_and_query(path_and_query)
            .authority(format!("{}:{}", self.host(), self.port()).as_str())
            .build()
    }
}

/// Yields the records sharing the lowest priority value, in their original
/// order. Lower priority values are preferred per RFC 2782.
pub fn preferred_tier<R: SrvRecord>(records: &[R]) -> impl Iterator<Item = &R> {
    let min_priority = records.iter().map(R::priority).min();
    records
        .iter()
        .filter(move |record| Some(record.priority()) == min_priority)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::fixed::FixedSrvRecord;

    fn targets<'a>(records: impl Iterator<Item = &'a FixedSrvRecord>) -> Vec<&'a str> {
        records.map(|record| record.target.as_str()).collect()
    }

    #[test]
    fn host_strips_one_trailing_dot() {
        assert_eq!(FixedSrvRecord::new(1, 0, 1, "a.local.").host(), "a.local");
        assert_eq!(FixedSrvRecord::new(1, 0, 1, "a.local").host(), "a.local");
        assert_eq!(FixedSrvRecord::new(1, 0, 1, "a.local..").host(), "a.local.");
        assert_eq!(FixedSrvRecord::new(1, 0, 1, ".").host(), "");
    }

    #[test]
    fn uri_from_record() -> Result<(), http::Error> {
        let record = FixedSrvRecord::new(10, 5, 18091, "node-1.cluster.local.");
        let uri = record.to_uri(Scheme::HTTP, "/pools")?;
        assert_eq!(uri.host(), Some("node-1.cluster.local"));
        assert_eq!(uri.port_u16(), Some(18091));
        assert_eq!(uri.path(), "/pools");
        Ok(())
    }

    #[test]
    fn uri_from_invalid_target() {
        let record = FixedSrvRecord::new(10, 0, 8091, "not a host");
        assert!(record.to_uri("http", "/pools").is_err());
    }

    #[test]
    fn preferred_tier_keeps_lowest_priority_in_order() {
        let records = vec![
            FixedSrvRecord::new(20, 0, 8091, "w.local."),
            FixedSrvRecord::new(10, 0, 8091, "x.local."),
            FixedSrvRecord::new(20, 0, 8091, "y.local."),
            FixedSrvRecord::new(10, 0, 8091, "z.local."),
        ];
        assert_eq!(
            targets(preferred_tier(&records)),
            vec!["x.local.", "z.local."]
        );
    }

    #[test]
    fn preferred_tier_single_tier_passthrough() {
        let records = vec![
            FixedSrvRecord::new(3, 10, 8091, "c.local."),
            FixedSrvRecord::new(3, 20, 8091, "a.local."),
            FixedSrvRecord::new(3, 30, 8091, "b.local."),
        ];
        assert_eq!(
            targets(preferred_tier(&records)),
            vec!["c.local.", "a.local.", "b.local."]
        );
    }

    #[test]
    fn preferred_tier_of_nothing() {
        assert_eq!(preferred_tier::<FixedSrvRecord>(&[]).count(), 0);
    }

    #[test]
    fn weight_does_not_affect_tier() {
        let records = vec![
            FixedSrvRecord::new(0, 0, 1, "light."),
            FixedSrvRecord::new(0, u16::MAX, 1, "heavy."),
            FixedSrvRecord::new(1, u16::MAX, 1, "backup."),
        ];
        assert_eq!(targets(preferred_tier(&records)), vec!["light.", "heavy."]);
    }
}
