//! HTTP component registry client.
//!
//! Component versions live at
//! `<registry>/components/<name>/versions/<version>`; a push uploads the
//! archive as a gzipped tarball, a get fetches the stored descriptor from
//! `<...>/descriptor`.

use flate2::Compression;
use flate2::write::GzEncoder;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use thiserror::Error;
use tracing::{debug, info};

use modkit_core::application::ports::Registry;
use modkit_core::domain::{
    ComponentArchive, ComponentDescriptor, Credentials, RemoteComponentVersion,
};
use modkit_core::error::PortError;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("component version {name} {version} already exists in the registry")]
    AlreadyExists { name: String, version: String },

    #[error("component version {name} {version} not found in the registry")]
    NotFound { name: String, version: String },

    #[error("failed to package archive for upload")]
    Package(#[source] std::io::Error),

    #[error("registry request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("registry returned {status} for {url}")]
    Status { url: String, status: StatusCode },

    #[error("failed to parse descriptor returned by the registry")]
    ParseDescriptor(#[source] serde_yaml::Error),
}

/// Production [`Registry`] implementation over plain HTTP(S).
pub struct HttpRegistry {
    client: Client,
}

impl HttpRegistry {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    fn component_url(registry_url: &str, name: &str, version: &str) -> String {
        let base = registry_url.trim_end_matches('/');
        format!("{base}/components/{name}/versions/{version}")
    }

    fn authenticate(request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        match credentials {
            Credentials::Anonymous => request,
            Credentials::Basic { username, password } => {
                request.basic_auth(username, Some(password))
            }
        }
    }

    fn exists(&self, url: &str, credentials: &Credentials) -> Result<bool, RegistryError> {
        let response = Self::authenticate(self.client.head(url), credentials)
            .send()
            .map_err(|source| RegistryError::Request {
                url: url.to_owned(),
                source,
            })?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(RegistryError::Status {
                url: url.to_owned(),
                status,
            }),
        }
    }

    fn package(archive: &ComponentArchive) -> Result<Vec<u8>, RegistryError> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        builder
            .append_dir_all(".", archive.root())
            .and_then(|()| builder.into_inner())
            .and_then(GzEncoder::finish)
            .map_err(RegistryError::Package)
    }
}

impl Default for HttpRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry for HttpRegistry {
    fn push_component_version(
        &self,
        archive: &ComponentArchive,
        overwrite: bool,
        registry_url: &str,
        credentials: &Credentials,
    ) -> Result<(), PortError> {
        let descriptor = archive.descriptor();
        let url = Self::component_url(registry_url, &descriptor.name, &descriptor.version);

        if !overwrite && self.exists(&url, credentials).map_err(PortError::new)? {
            return Err(PortError::new(RegistryError::AlreadyExists {
                name: descriptor.name.clone(),
                version: descriptor.version.clone(),
            }));
        }

        let payload = Self::package(archive).map_err(PortError::new)?;
        debug!(url, bytes = payload.len(), "uploading component version");

        let response = Self::authenticate(self.client.put(&url), credentials)
            .header("content-type", "application/gzip")
            .body(payload)
            .send()
            .map_err(|source| {
                PortError::new(RegistryError::Request {
                    url: url.clone(),
                    source,
                })
            })?;
        if !response.status().is_success() {
            return Err(PortError::new(RegistryError::Status {
                url,
                status: response.status(),
            }));
        }

        info!(
            name = %descriptor.name,
            version = %descriptor.version,
            "pushed component version"
        );
        Ok(())
    }

    fn get_component_version(
        &self,
        name: &str,
        version: &str,
        registry_url: &str,
        credentials: &Credentials,
    ) -> Result<RemoteComponentVersion, PortError> {
        let url = format!(
            "{}/descriptor",
            Self::component_url(registry_url, name, version)
        );
        let response = Self::authenticate(self.client.get(&url), credentials)
            .send()
            .map_err(|source| {
                PortError::new(RegistryError::Request {
                    url: url.clone(),
                    source,
                })
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(PortError::new(RegistryError::NotFound {
                name: name.to_owned(),
                version: version.to_owned(),
            }));
        }
        if !response.status().is_success() {
            return Err(PortError::new(RegistryError::Status {
                url,
                status: response.status(),
            }));
        }

        let body = response.text().map_err(|source| {
            PortError::new(RegistryError::Request {
                url: url.clone(),
                source,
            })
        })?;
        let descriptor: ComponentDescriptor =
            serde_yaml::from_str(&body).map_err(|source| {
                PortError::new(RegistryError::ParseDescriptor(source))
            })?;

        Ok(RemoteComponentVersion {
            name: name.to_owned(),
            version: version.to_owned(),
            descriptor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_url_normalizes_trailing_slash() {
        let url = HttpRegistry::component_url(
            "https://registry.example.com/",
            "example.io/module/sample",
            "1.0.0",
        );
        assert_eq!(
            url,
            "https://registry.example.com/components/example.io/module/sample/versions/1.0.0"
        );
    }

    #[test]
    fn packages_archive_as_gzipped_tar() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("component-descriptor.yaml"), "name: x\n").unwrap();

        let archive = ComponentArchive::new(
            ComponentDescriptor::new("example.io/module/sample", "1.0.0"),
            dir.path(),
        );
        let payload = HttpRegistry::package(&archive).unwrap();
        // Gzip magic bytes.
        assert_eq!(&payload[..2], &[0x1f, 0x8b]);
    }
}
