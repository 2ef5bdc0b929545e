use tether_core::{
    async_trait,
    driver::{Connection, Driver},
    err, Result,
};

use url::Url;

/// Picks a built-in driver from a connection URL.
#[derive(Debug)]
pub struct Connect {
    url: Url,
}

impl Connect {
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| err!("invalid connection URL; url={url}; {e}"))?;
        Ok(Self { url })
    }
}

#[async_trait]
impl Driver for Connect {
    async fn connect(&self) -> Result<Box<dyn Connection>> {
        match self.url.scheme() {
            "sqlite" => connect_sqlite(&self.url).await,
            scheme => Err(err!(
                "unsupported database; scheme={scheme}; url={}",
                self.url
            )),
        }
    }
}

#[cfg(feature = "sqlite")]
async fn connect_sqlite(url: &Url) -> Result<Box<dyn Connection>> {
    tether_driver_sqlite::Sqlite::new(url.as_str())?.connect().await
}

#[cfg(not(feature = "sqlite"))]
async fn connect_sqlite(_url: &Url) -> Result<Box<dyn Connection>> {
    Err(err!("`sqlite` feature not enabled"))
}
