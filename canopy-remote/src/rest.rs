//! HTTPS implementation of [`WorkspaceApi`].
//!
//! One logical operation per method; directory listings page internally
//! (`pageToken`) so callers always see a complete listing. File contents
//! travel base64-encoded inside JSON bodies.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::json;

use crate::api::{CommitAuthor, DirectoryListing, WorkspaceApi};
use crate::auth::AccessToken;
use crate::error::RemoteError;
use crate::workspace::WorkspaceRef;

const DEFAULT_BASE_URL: &str = "https://dataform.googleapis.com/v1";
const LIST_PAGE_SIZE: &str = "1000";

/// REST client for a remote workspace service.
pub struct RestWorkspaceApi {
    agent: ureq::Agent,
    base_url: String,
    token: AccessToken,
}

impl RestWorkspaceApi {
    pub fn new(token: AccessToken) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Override the service endpoint (regional endpoints, test servers).
    pub fn with_base_url(token: AccessToken, base_url: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token,
        }
    }

    /// `{base}/{workspace-name}:{verb}`
    fn op_url(&self, ws: &WorkspaceRef, verb: &str) -> String {
        format!("{}/{}:{}", self.base_url, ws.name(), verb)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token.as_str())
    }

    fn get(
        &self,
        url: &str,
        operation: &'static str,
        query: &[(&str, &str)],
        not_found_path: &str,
    ) -> Result<ureq::Response, RemoteError> {
        let mut request = self
            .agent
            .get(url)
            .set("Authorization", &self.bearer());
        for (key, value) in query {
            request = request.query(key, value);
        }
        request
            .call()
            .map_err(|e| map_call_error(e, operation, not_found_path))
    }

    fn post_json(
        &self,
        url: &str,
        operation: &'static str,
        body: serde_json::Value,
        not_found_path: &str,
    ) -> Result<ureq::Response, RemoteError> {
        self.agent
            .post(url)
            .set("Authorization", &self.bearer())
            .send_json(body)
            .map_err(|e| map_call_error(e, operation, not_found_path))
    }
}

impl WorkspaceApi for RestWorkspaceApi {
    fn list_directory(
        &self,
        ws: &WorkspaceRef,
        path: Option<&str>,
    ) -> Result<DirectoryListing, RemoteError> {
        let operation = "queryDirectoryContents";
        let url = self.op_url(ws, operation);
        let mut listing = DirectoryListing::default();
        let mut page_token: Option<String> = None;

        loop {
            let mut query: Vec<(&str, &str)> = vec![("pageSize", LIST_PAGE_SIZE)];
            if let Some(p) = path {
                query.push(("path", p));
            }
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }

            let response = self.get(&url, operation, &query, path.unwrap_or(""))?;
            let page: QueryDirectoryContentsResponse =
                response.into_json().map_err(|e| RemoteError::Decode {
                    operation,
                    message: e.to_string(),
                })?;

            for entry in page.directory_entries {
                match entry {
                    DirectoryEntry { file: Some(f), .. } => listing.files.push(f),
                    DirectoryEntry {
                        directory: Some(d), ..
                    } => listing.directories.push(d),
                    _ => {}
                }
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(
            "listed {:?}: {} files, {} directories",
            path.unwrap_or("<root>"),
            listing.files.len(),
            listing.directories.len()
        );
        Ok(listing)
    }

    fn read_file(&self, ws: &WorkspaceRef, path: &str) -> Result<Vec<u8>, RemoteError> {
        let operation = "readFile";
        let url = self.op_url(ws, operation);
        let response = self.get(&url, operation, &[("path", path)], path)?;
        let body: ReadFileResponse = response.into_json().map_err(|e| RemoteError::Decode {
            operation,
            message: e.to_string(),
        })?;
        BASE64
            .decode(body.file_contents.as_bytes())
            .map_err(|e| RemoteError::Decode {
                operation,
                message: format!("invalid base64 contents for {path}: {e}"),
            })
    }

    fn write_file(
        &self,
        ws: &WorkspaceRef,
        path: &str,
        contents: &[u8],
    ) -> Result<(), RemoteError> {
        let operation = "writeFile";
        let url = self.op_url(ws, operation);
        let body = json!({
            "path": path,
            "contents": BASE64.encode(contents),
        });
        self.post_json(&url, operation, body, path)?;
        Ok(())
    }

    fn remove_file(&self, ws: &WorkspaceRef, path: &str) -> Result<(), RemoteError> {
        let operation = "removeFile";
        let url = self.op_url(ws, operation);
        self.post_json(&url, operation, json!({ "path": path }), path)?;
        Ok(())
    }

    fn remove_directory(&self, ws: &WorkspaceRef, path: &str) -> Result<(), RemoteError> {
        let operation = "removeDirectory";
        let url = self.op_url(ws, operation);
        self.post_json(&url, operation, json!({ "path": path }), path)?;
        Ok(())
    }

    fn commit(
        &self,
        ws: &WorkspaceRef,
        author: &CommitAuthor,
        message: &str,
    ) -> Result<(), RemoteError> {
        let operation = "commit";
        let url = self.op_url(ws, operation);
        let body = json!({
            "author": {
                "name": author.name,
                "emailAddress": author.email,
            },
            "commitMessage": message,
        });
        self.post_json(&url, operation, body, "")?;
        Ok(())
    }

    fn push_commits(&self, ws: &WorkspaceRef) -> Result<(), RemoteError> {
        let operation = "pushGitCommits";
        let url = self.op_url(ws, operation);
        self.post_json(&url, operation, json!({}), "")?;
        Ok(())
    }
}

fn map_call_error(err: ureq::Error, operation: &'static str, path: &str) -> RemoteError {
    match err {
        // A 404 on a path-addressed call is the expected-absence case; a 404
        // on commit/push (no path operand) means the workspace itself is
        // wrong and reads better as a status failure.
        ureq::Error::Status(404, _) if !path.is_empty() => RemoteError::NotFound {
            path: path.to_owned(),
        },
        ureq::Error::Status(status, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "<unreadable body>".to_owned());
            RemoteError::Status {
                operation,
                status,
                message: truncate_body(&message),
            }
        }
        ureq::Error::Transport(transport) => RemoteError::Transport {
            operation,
            message: transport.to_string(),
        },
    }
}

/// Error bodies can be multi-kilobyte JSON blobs; keep logs readable.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 512;
    let trimmed = body.trim();
    if trimmed.len() <= MAX {
        return trimmed.to_owned();
    }
    let mut end = MAX;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &trimmed[..end])
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryDirectoryContentsResponse {
    #[serde(default)]
    directory_entries: Vec<DirectoryEntry>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// One listing entry — exactly one of `file`/`directory` is set, each a
/// workspace-root-relative path.
#[derive(Debug, Default, Deserialize)]
struct DirectoryEntry {
    #[serde(default)]
    file: Option<String>,
    #[serde(default)]
    directory: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadFileResponse {
    #[serde(default)]
    file_contents: String,
}
