//! Client configuration targeted by bootstrapping.

use http::Uri;

/// Configuration objects whose server list can be replaced by a
/// [`ServerResolver`].
///
/// [`ServerResolver`]: super::ServerResolver
pub trait ServerList {
    /// Replaces every server in the list with `servers`, in order.
    fn replace_servers(&mut self, servers: Vec<Uri>);
}

/// Configuration for a client connecting to a cluster.
///
/// Only `servers` is written by bootstrapping; the remaining fields are
/// carried through untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientDefinition {
    /// Addresses of the cluster nodes to bootstrap from, in preference order.
    pub servers: Vec<Uri>,
    /// Bucket to open once connected.
    pub bucket: Option<String>,
    /// User to authenticate as.
    pub username: Option<String>,
}

impl ServerList for ClientDefinition {
    fn replace_servers(&mut self, servers: Vec<Uri>) {
        self.servers = servers;
    }
}

impl ServerList for Vec<Uri> {
    fn replace_servers(&mut self, servers: Vec<Uri>) {
        *self = servers;
    }
}
