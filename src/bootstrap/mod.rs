//! Bootstrapping client server lists from SRV lookups.

use crate::{
    diagnostics::DiagnosticSink,
    record::{preferred_tier, SrvRecord},
    resolver::SrvResolver,
};
use futures_util::{
    future::{self, Either},
    pin_mut,
};
use http::uri::{PathAndQuery, Scheme, Uri};
use std::{convert::TryFrom, fmt::Debug, future::Future};

mod definition;
pub use definition::{ClientDefinition, ServerList};

/// Path appended to every resolved server address by default.
pub const DEFAULT_PATH: &str = "/pools";

/// Error produced when a required argument is absent or unusable. These are
/// bugs in the caller and are never absorbed.
#[derive(Clone, Copy, Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid argument `{parameter}`: {reason}")]
pub struct InvalidArgument {
    parameter: &'static str,
    reason: &'static str,
}

impl InvalidArgument {
    fn missing(parameter: &'static str) -> Self {
        Self {
            parameter,
            reason: "must be provided",
        }
    }

    fn blank(parameter: &'static str) -> Self {
        Self {
            parameter,
            reason: "must not be blank",
        }
    }

    /// Name of the offending parameter.
    pub fn parameter(&self) -> &'static str {
        self.parameter
    }
}

/// Failures absorbed while resolving servers. These are handed to the
/// [`DiagnosticSink`] rather than returned.
#[derive(Debug, thiserror::Error)]
pub enum LookupError<Lookup: Debug> {
    /// Srv lookup errors
    #[error("srv lookup error: {0}")]
    Lookup(#[source] Lookup),
    /// Srv record parsing errors
    #[error("building uri from srv record: {0}")]
    RecordParsing(#[from] http::Error),
    /// The lookup was abandoned before it completed
    #[error("srv lookup cancelled")]
    Cancelled,
}

/// What a call to [`ServerResolver::apply`] did to the server list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The list now holds this many servers from the preferred priority tier.
    Resolved {
        /// Number of servers written.
        servers: usize,
    },
    /// The lookup succeeded without any records; the list is empty.
    NoRecords,
    /// The lookup or record conversion failed and was reported to the
    /// diagnostic sink; the list is empty.
    Faulted,
}

/// Fills client server lists with the addresses of the preferred SRV targets
/// for a record name.
#[derive(Debug)]
pub struct ServerResolver<Resolver, Sink> {
    resolver: Resolver,
    sink: Sink,
    http_scheme: Scheme,
    path: PathAndQuery,
}

impl<Resolver: SrvResolver, Sink: DiagnosticSink> ServerResolver<Resolver, Sink> {
    /// Creates a resolver looking up records with `resolver` and reporting
    /// failures to `sink`.
    pub fn new(resolver: Resolver, sink: Sink) -> Self {
        Self {
            resolver,
            sink,
            http_scheme: Scheme::HTTP,
            path: PathAndQuery::from_static(DEFAULT_PATH),
        }
    }

    /// Creates a builder for a resolver whose collaborators are supplied
    /// piecemeal.
    pub fn builder() -> Builder<Resolver, Sink> {
        Builder::new()
    }

    /// Replaces the server list of `target` with the servers located by the
    /// SRV records at `record_name`.
    ///
    /// Only the records sharing the lowest priority are used, in the order the
    /// resolver produced them. Lookup and conversion failures are not
    /// returned: they are reported to the diagnostic sink once and leave the
    /// server list empty. The only error is a blank `record_name`, which is
    /// rejected before the server list or the resolver are touched.
    pub async fn apply<T: ServerList + ?Sized>(
        &self,
        target: &mut T,
        record_name: &str,
    ) -> Result<Outcome, InvalidArgument> {
        validate_record_name(record_name)?;
        target.replace_servers(Vec::new());
        let result = self.resolve(record_name).await;
        Ok(self.commit(target, record_name, result))
    }

    /// Like [`apply`](Self::apply), for callers holding optional arguments.
    /// `None` for either argument is rejected before any lookup.
    pub async fn apply_to<T: ServerList + ?Sized>(
        &self,
        target: Option<&mut T>,
        record_name: Option<&str>,
    ) -> Result<Outcome, InvalidArgument> {
        let target = target.ok_or_else(|| InvalidArgument::missing("client_definition"))?;
        let record_name = record_name.ok_or_else(|| InvalidArgument::missing("record_name"))?;
        self.apply(target, record_name).await
    }

    /// Like [`apply`](Self::apply), abandoning the lookup if `cancel`
    /// completes first. A cancelled lookup is handled like any other failure.
    pub async fn apply_until<T, Cancel>(
        &self,
        target: &mut T,
        record_name: &str,
        cancel: Cancel,
    ) -> Result<Outcome, InvalidArgument>
    where
        T: ServerList + ?Sized,
        Cancel: Future<Output = ()>,
    {
        validate_record_name(record_name)?;
        target.replace_servers(Vec::new());
        let lookup = self.resolve(record_name);
        pin_mut!(lookup);
        pin_mut!(cancel);
        let result = match future::select(lookup, cancel).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(LookupError::Cancelled),
        };
        Ok(self.commit(target, record_name, result))
    }

    async fn resolve(&self, record_name: &str) -> Result<Vec<Uri>, LookupError<Resolver::Error>> {
        #[cfg(feature = "log")]
        tracing::debug!(srv = %record_name, "looking up srv records");
        let records = self
            .resolver
            .get_srv_records_unordered(record_name)
            .await
            .map_err(LookupError::Lookup)?;
        let uris = preferred_tier(&records)
            .map(|record| self.parse_record(record))
            .collect::<Result<Vec<Uri>, _>>()?;
        Ok(uris)
    }

    fn commit<T: ServerList + ?Sized>(
        &self,
        target: &mut T,
        record_name: &str,
        result: Result<Vec<Uri>, LookupError<Resolver::Error>>,
    ) -> Outcome {
        match result {
            Ok(servers) if servers.is_empty() => {
                #[cfg(feature = "log")]
                tracing::info!(srv = %record_name, "no srv records found");
                Outcome::NoRecords
            }
            Ok(servers) => {
                let count = servers.len();
                #[cfg(feature = "log")]
                tracing::info!(srv = %record_name, servers = count, "resolved servers");
                target.replace_servers(servers);
                Outcome::Resolved { servers: count }
            }
            Err(err) => {
                let message = format!("failed to resolve servers from {}", record_name);
                self.sink.log_error(&message, &err);
                Outcome::Faulted
            }
        }
    }

    fn parse_record(&self, record: &Resolver::Record) -> Result<Uri, http::Error> {
        record.to_uri(self.http_scheme.clone(), self.path.clone())
    }
}

impl<Resolver, Sink> ServerResolver<Resolver, Sink> {
    /// Sets the resolver used for lookups.
    pub fn resolver<R>(self, resolver: R) -> ServerResolver<R, Sink> {
        ServerResolver {
            resolver,
            sink: self.sink,
            http_scheme: self.http_scheme,
            path: self.path,
        }
    }

    /// Sets the sink failures are reported to.
    pub fn sink<S>(self, sink: S) -> ServerResolver<Resolver, S> {
        ServerResolver {
            sink,
            resolver: self.resolver,
            http_scheme: self.http_scheme,
            path: self.path,
        }
    }

    /// Sets the http scheme of resolved server addresses.
    pub fn http_scheme(self, http_scheme: Scheme) -> Self {
        Self {
            http_scheme,
            ..self
        }
    }

    /// Sets the path of resolved server addresses.
    pub fn path(self, path: PathAndQuery) -> Self {
        Self { path, ..self }
    }
}

fn validate_record_name(record_name: &str) -> Result<(), InvalidArgument> {
    if record_name.trim().is_empty() {
        Err(InvalidArgument::blank("record_name"))
    } else {
        Ok(())
    }
}

/// Builder for a [`ServerResolver`], checking that every collaborator was
/// supplied.
#[derive(Debug)]
pub struct Builder<Resolver, Sink> {
    resolver: Option<Resolver>,
    sink: Option<Sink>,
    http_scheme: Scheme,
    path: String,
}

impl<Resolver, Sink> Default for Builder<Resolver, Sink> {
    fn default() -> Self {
        Self {
            resolver: None,
            sink: None,
            http_scheme: Scheme::HTTP,
            path: String::from(DEFAULT_PATH),
        }
    }
}

impl<Resolver, Sink> Builder<Resolver, Sink> {
    /// Creates a builder without any collaborators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resolver used for lookups.
    pub fn resolver(self, resolver: Resolver) -> Self {
        Self {
            resolver: Some(resolver),
            ..self
        }
    }

    /// Sets the sink failures are reported to.
    pub fn sink(self, sink: Sink) -> Self {
        Self {
            sink: Some(sink),
            ..self
        }
    }

    /// Sets the http scheme of resolved server addresses.
    pub fn http_scheme(self, http_scheme: Scheme) -> Self {
        Self {
            http_scheme,
            ..self
        }
    }

    /// Sets the path of resolved server addresses.
    pub fn path(self, path: impl ToString) -> Self {
        Self {
            path: path.to_string(),
            ..self
        }
    }

    /// Builds the resolver, failing if a collaborator is missing or the path
    /// is not a valid URI path.
    pub fn build(self) -> Result<ServerResolver<Resolver, Sink>, InvalidArgument> {
        let resolver = self
            .resolver
            .ok_or_else(|| InvalidArgument::missing("resolver"))?;
        let sink = self.sink.ok_or_else(|| InvalidArgument::missing("sink"))?;
        let path = PathAndQuery::try_from(self.path.as_str()).map_err(|_| InvalidArgument {
            parameter: "path",
            reason: "must be a valid uri path",
        })?;
        Ok(ServerResolver {
            resolver,
            sink,
            http_scheme: self.http_scheme,
            path,
        })
    }
}
