#![deny(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

/*!
Bootstrap client server lists from DNS SRV records.

# Introduction

SRV Records, as defined in [RFC 2782](https://tools.ietf.org/html/rfc2782),
are DNS records of the form

`_Service._Proto.Name TTL Class SRV Priority Weight Port Target`

For instance, a DNS server might respond with the following SRV records for
`_couchbase._tcp.services.local`:

```text
_couchbase._tcp.services.local. 60 IN SRV 10 0 8091 a.local.
_couchbase._tcp.services.local. 60 IN SRV 10 0 8091 b.local.
_couchbase._tcp.services.local. 60 IN SRV 20 0 8091 c.local.
```

Records with the lowest priority value are the ones a client should use;
`c.local` is only a backup. Instead of listing cluster nodes statically, a
client configuration can be filled from these records at startup:

```
# #[tokio::main]
# async fn main() -> Result<(), srv_bootstrap::bootstrap::InvalidArgument> {
use srv_bootstrap::{
    bootstrap::{ClientDefinition, ServerResolver},
    diagnostics::Discard,
    resolver::fixed::{FixedResolver, FixedSrvRecord},
};
let records = FixedResolver::new().with_records(
    "_couchbase._tcp.services.local",
    vec![
        FixedSrvRecord::new(10, 0, 8091, "a.local."),
        FixedSrvRecord::new(10, 0, 8091, "b.local."),
        FixedSrvRecord::new(20, 0, 8091, "c.local."),
    ],
);
let resolver = ServerResolver::new(records, Discard);
let mut definition = ClientDefinition::default();
resolver
    .apply(&mut definition, "_couchbase._tcp.services.local")
    .await?;
assert_eq!(
    definition.servers,
    vec![
        "http://a.local:8091/pools".parse::<http::Uri>().unwrap(),
        "http://b.local:8091/pools".parse().unwrap(),
    ]
);
# Ok(())
# }
```

[`ServerResolver::apply`] never fails because of DNS: lookup failures are
reported to a [`DiagnosticSink`] and leave the server list empty, so a caller
can fall back to static configuration.

# Resolvers and Sinks

Lookups go through the [`SrvResolver`] trait and failures through the
[`DiagnosticSink`] trait; both can be implemented to substitute other
backends. The provided implementations are:

- [`FixedResolver`], answering from records registered ahead of time
- `hickory_resolver::Resolver` (with the `hickory` feature)
- `TracingSink` (with the default `log` feature)
- [`Discard`]

[`ServerResolver::apply`]: bootstrap::ServerResolver::apply
[`SrvResolver`]: resolver::SrvResolver
[`DiagnosticSink`]: diagnostics::DiagnosticSink
[`FixedResolver`]: resolver::fixed::FixedResolver
[`Discard`]: diagnostics::Discard
*/

pub mod bootstrap;
pub use bootstrap::{ClientDefinition, Outcome, ServerResolver};

pub mod diagnostics;

mod record;
pub use record::{preferred_tier, SrvRecord};

pub mod resolver;

#[doc(hidden)]
pub const EXAMPLE_SRV: &str = "_couchbase._tcp.services.local";
