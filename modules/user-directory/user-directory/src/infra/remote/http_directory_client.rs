use async_trait::async_trait;
use tracing::{debug, instrument};
use url::Url;
use user_directory_sdk::{DirectoryClient, DirectoryError, UserRecord};
use userdir_http::{HttpClient, HttpError};

use super::dto::{NewUserDto, RemoteUserDto};

/// HTTP adapter implementing [`DirectoryClient`] against `{base}/users`.
///
/// `HttpClient` is `Clone + Send + Sync`, so no external locking is needed.
pub struct HttpDirectoryClient {
    client: HttpClient,
    base: Url,
}

impl HttpDirectoryClient {
    #[must_use]
    pub fn new(client: HttpClient, base: Url) -> Self {
        Self { client, base }
    }

    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    fn users_url(&self, id: Option<u64>) -> Result<Url, DirectoryError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| DirectoryError::network("invalid directory base URL"))?;
            segments.pop_if_empty().push("users");
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        Ok(url)
    }
}

fn network(context: &str, err: &HttpError) -> DirectoryError {
    DirectoryError::network(format!("{context}: {err}"))
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    #[instrument(skip_all, fields(base = %self.base))]
    async fn fetch_all(&self) -> Result<Vec<UserRecord>, DirectoryError> {
        let url = self.users_url(None)?;
        let users: Vec<RemoteUserDto> = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| network("GET /users", &e))?
            .json()
            .await
            .map_err(|e| network("GET /users", &e))?;

        debug!(count = users.len(), "fetched users");
        Ok(users.into_iter().map(RemoteUserDto::into_record).collect())
    }

    #[instrument(skip_all, fields(base = %self.base, user_id = record.id))]
    async fn create(&self, record: &UserRecord) -> Result<UserRecord, DirectoryError> {
        let url = self.users_url(None)?;
        let body = self
            .client
            .post(url.as_str())
            .json(&NewUserDto::from(record))
            .map_err(|e| network("POST /users", &e))?
            .send()
            .await
            .map_err(|e| network("POST /users", &e))?
            .checked_bytes()
            .await
            .map_err(|e| network("POST /users", &e))?;

        // The echo is informational; local id and any field it lacks win.
        match serde_json::from_slice::<RemoteUserDto>(&body) {
            Ok(dto) => {
                debug!(echo_id = dto.id, "create echoed");
                let echo = dto.into_record();
                Ok(UserRecord {
                    id: record.id,
                    first_name: non_empty_or(echo.first_name, &record.first_name),
                    last_name: non_empty_or(echo.last_name, &record.last_name),
                    email: non_empty_or(echo.email, &record.email),
                    department: echo.department.or(record.department),
                })
            }
            Err(err) => {
                debug!(error = %err, "create echo not parseable, keeping local record");
                Ok(record.clone())
            }
        }
    }

    #[instrument(skip_all, fields(base = %self.base, user_id = id))]
    async fn remove(&self, id: u64) -> Result<(), DirectoryError> {
        let url = self.users_url(Some(id))?;
        self.client
            .delete(url.as_str())
            .send()
            .await
            .map_err(|e| network("DELETE /users", &e))?
            .error_for_status()
            .map_err(|e| network("DELETE /users", &e))?;
        Ok(())
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_owned()
    } else {
        value
    }
}
