//! SRV resolvers.

use crate::SrvRecord;
use async_trait::async_trait;
use std::sync::Arc;

pub mod fixed;

#[cfg(feature = "hickory")]
mod hickory;

/// Represents the ability to act as a SRV resolver.
#[async_trait]
pub trait SrvResolver: Send + Sync {
    /// SRV record representation produced by the resolver.
    type Record: SrvRecord + Send;

    /// Errors encountered during SRV resolution.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Gets the records corresponding to a srv name in the order the resolver
    /// produced them, without sorting by priority or shuffling by weight.
    async fn get_srv_records_unordered(&self, srv: &str)
        -> Result<Vec<Self::Record>, Self::Error>;
}

#[async_trait]
impl<R: SrvResolver + ?Sized> SrvResolver for &R {
    type Record = R::Record;
    type Error = R::Error;

    async fn get_srv_records_unordered(
        &self,
        srv: &str,
    ) -> Result<Vec<Self::Record>, Self::Error> {
        (**self).get_srv_records_unordered(srv).await
    }
}

#[async_trait]
impl<R: SrvResolver + ?Sized> SrvResolver for Arc<R> {
    type Record = R::Record;
    type Error = R::Error;

    async fn get_srv_records_unordered(
        &self,
        srv: &str,
    ) -> Result<Vec<Self::Record>, Self::Error> {
        (**self).get_srv_records_unordered(srv).await
    }
}

#[async_trait]
impl<R: SrvResolver + ?Sized> SrvResolver for Box<R> {
    type Record = R::Record;
    type Error = R::Error;

    async fn get_srv_records_unordered(
        &self,
        srv: &str,
    ) -> Result<Vec<Self::Record>, Self::Error> {
        (**self).get_srv_records_unordered(srv).await
    }
}
