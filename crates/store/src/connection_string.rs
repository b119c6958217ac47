//! Parsing of blob-service connection strings.
//!
//! Accepts the usual `Key=Value;Key=Value` form:
//!
//! ```text
//! DefaultEndpointsProtocol=https;AccountName=acct;AccountKey=...;EndpointSuffix=core.windows.net
//! AccountName=acct;AccountKey=...;BlobEndpoint=http://127.0.0.1:10000/acct
//! UseDevelopmentStorage=true
//! ```

use std::str::FromStr;

use url::Url;

use catalog_core::error::StoreError;

/// Account name of the local storage emulator.
pub const DEV_ACCOUNT_NAME: &str = "devstoreaccount1";

/// Well-known, publicly documented key of the local storage emulator.
pub const DEV_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";

const DEV_BLOB_ENDPOINT: &str = "http://127.0.0.1:10000/devstoreaccount1";
const DEFAULT_PROTOCOL: &str = "https";
const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

/// Account credentials and blob endpoint resolved from a connection string.
#[derive(Clone, PartialEq, Eq)]
pub struct BlobConnection {
    pub account_name: String,
    /// Base64 account key.
    pub account_key: String,
    pub blob_endpoint: Url,
}

impl std::fmt::Debug for BlobConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobConnection")
            .field("account_name", &self.account_name)
            .field("account_key", &"<redacted>")
            .field("blob_endpoint", &self.blob_endpoint.as_str())
            .finish()
    }
}

impl BlobConnection {
    /// URL of `container/name` under this account's blob endpoint.
    pub fn blob_url(&self, container: &str, name: &str) -> Result<Url, StoreError> {
        let mut url = self.blob_endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Config("blob endpoint cannot be a base URL".into()))?
            .pop_if_empty()
            .push(container)
            .push(name);
        Ok(url)
    }

    fn development() -> Result<Self, StoreError> {
        Ok(Self {
            account_name: DEV_ACCOUNT_NAME.to_string(),
            account_key: DEV_ACCOUNT_KEY.to_string(),
            blob_endpoint: parse_endpoint(DEV_BLOB_ENDPOINT)?,
        })
    }
}

impl FromStr for BlobConnection {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut protocol = None;
        let mut account_name = None;
        let mut account_key = None;
        let mut suffix = None;
        let mut blob_endpoint = None;
        let mut development = false;

        for part in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = part.split_once('=').ok_or_else(|| {
                StoreError::Config(format!("malformed connection string segment '{part}'"))
            })?;
            let value = value.trim().to_string();
            match key.trim().to_ascii_lowercase().as_str() {
                "defaultendpointsprotocol" => protocol = Some(value),
                "accountname" => account_name = Some(value),
                "accountkey" => account_key = Some(value),
                "endpointsuffix" => suffix = Some(value),
                "blobendpoint" => blob_endpoint = Some(value),
                "usedevelopmentstorage" => development = value.eq_ignore_ascii_case("true"),
                _ => {}
            }
        }

        if development {
            return Self::development();
        }

        let (account_name, account_key) = match (account_name, account_key) {
            (Some(name), Some(key)) => (name, key),
            (name, key) => {
                let missing: Vec<&str> = [
                    ("AccountName", name.is_none()),
                    ("AccountKey", key.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();
                return Err(StoreError::Config(format!(
                    "connection string is missing {}",
                    missing.join(", ")
                )));
            }
        };

        let blob_endpoint = match blob_endpoint {
            Some(endpoint) => parse_endpoint(&endpoint)?,
            None => parse_endpoint(&format!(
                "{}://{}.blob.{}",
                protocol.as_deref().unwrap_or(DEFAULT_PROTOCOL),
                account_name,
                suffix.as_deref().unwrap_or(DEFAULT_ENDPOINT_SUFFIX)
            ))?,
        };

        Ok(Self {
            account_name,
            account_key,
            blob_endpoint,
        })
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, StoreError> {
    Url::parse(raw).map_err(|e| StoreError::Config(format!("invalid blob endpoint '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_account_connection_string() {
        let conn: BlobConnection = "DefaultEndpointsProtocol=https;AccountName=media;\
                                    AccountKey=c2VjcmV0LWtleQ==;EndpointSuffix=core.windows.net"
            .parse()
            .unwrap();

        assert_eq!(conn.account_name, "media");
        assert_eq!(conn.account_key, "c2VjcmV0LWtleQ==");
        assert_eq!(
            conn.blob_endpoint.as_str(),
            "https://media.blob.core.windows.net/"
        );
    }

    #[test]
    fn explicit_blob_endpoint_wins() {
        let conn: BlobConnection =
            "AccountName=acct;AccountKey=a2V5;BlobEndpoint=http://127.0.0.1:10000/acct"
                .parse()
                .unwrap();
        assert_eq!(conn.blob_endpoint.as_str(), "http://127.0.0.1:10000/acct");
    }

    #[test]
    fn development_storage_uses_emulator_account() {
        let conn: BlobConnection = "UseDevelopmentStorage=true".parse().unwrap();
        assert_eq!(conn.account_name, DEV_ACCOUNT_NAME);
        assert_eq!(conn.account_key, DEV_ACCOUNT_KEY);
        assert_eq!(
            conn.blob_url("videos", "video_1.mp4").unwrap().as_str(),
            "http://127.0.0.1:10000/devstoreaccount1/videos/video_1.mp4"
        );
    }

    #[test]
    fn missing_credentials_are_named() {
        let err = "AccountName=acct".parse::<BlobConnection>().unwrap_err();
        assert_matches!(err, StoreError::Config(msg) if msg.contains("AccountKey"));

        let err = "EndpointSuffix=core.windows.net"
            .parse::<BlobConnection>()
            .unwrap_err();
        assert_matches!(
            err,
            StoreError::Config(msg) if msg.contains("AccountName, AccountKey")
        );
    }

    #[test]
    fn blob_url_encodes_names() {
        let conn: BlobConnection = "AccountName=acct;AccountKey=a2V5".parse().unwrap();
        assert_eq!(
            conn.blob_url("netflix-catalogs", "my file.txt").unwrap().as_str(),
            "https://acct.blob.core.windows.net/netflix-catalogs/my%20file.txt"
        );
    }

    #[test]
    fn debug_redacts_key() {
        let conn: BlobConnection = "AccountName=acct;AccountKey=a2V5".parse().unwrap();
        assert!(!format!("{conn:?}").contains("a2V5"));
    }
}
