//! Employee roster sourced from a remote XML directory.
//!
//! The fetch path downloads the document and persists it locally; the read
//! path parses the persisted copy per request. Both degrade gracefully:
//! network, file, and parse failures are logged and yield an empty result
//! instead of surfacing to the caller.

use std::collections::HashMap;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Deserialize;

use crate::constants::DEFAULT_AVATAR_URL;
use crate::error::{CoreError, CoreResult};
use crate::presence::UserId;

/// HTTP method used for the roster download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchMethod {
    Get,
    Post,
}

/// One user's directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterMember {
    pub name: String,
    pub avatar: String,
}

/// Parsed roster document: server fields for photo URL assembly plus the
/// per-user directory entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    protocol: Option<String>,
    host: Option<String>,
    members: HashMap<UserId, RosterMember>,
}

impl Roster {
    /// ## Summary
    /// Maps each id to its roster display name. Ids absent from the
    /// directory get the deterministic placeholder `"User {id}"` with a
    /// warning; an empty id set yields an empty map.
    #[must_use]
    pub fn display_names<I>(&self, ids: I) -> HashMap<UserId, String>
    where
        I: IntoIterator<Item = UserId>,
    {
        ids.into_iter()
            .map(|id| {
                let name = self.members.get(&id).map_or_else(
                    || {
                        tracing::warn!(user_id = id, "no roster entry, using placeholder name");
                        format!("User {id}")
                    },
                    |member| member.name.clone(),
                );
                (id, name)
            })
            .collect()
    }

    /// ## Summary
    /// Assembles `"{protocol}://{host}{avatar}"` for one user. When any of
    /// the three parts is missing the fixed default avatar URL is served
    /// instead of failing the request.
    #[must_use]
    pub fn photo_url(&self, id: UserId) -> String {
        match (
            self.protocol.as_deref(),
            self.host.as_deref(),
            self.members.get(&id),
        ) {
            (Some(protocol), Some(host), Some(member)) if !member.avatar.is_empty() => {
                format!("{protocol}://{host}{}", member.avatar)
            }
            _ => {
                tracing::warn!(user_id = id, "incomplete roster data, serving default avatar");
                DEFAULT_AVATAR_URL.to_owned()
            }
        }
    }
}

/// ## Summary
/// Reads and parses the locally persisted roster document.
///
/// Returns `None` on any read or parse failure, logged at error level; the
/// caller degrades to placeholder data instead of failing the request. A
/// partial mapping is never returned.
#[must_use]
pub fn read_roster(path: &Path) -> Option<Roster> {
    let xml = match std::fs::read_to_string(path) {
        Ok(xml) => xml,
        Err(err) => {
            tracing::error!(path = %path.display(), %err, "failed to read roster file");
            return None;
        }
    };
    match parse_roster(&xml) {
        Ok(roster) => Some(roster),
        Err(err) => {
            tracing::error!(path = %path.display(), %err, "failed to parse roster file");
            None
        }
    }
}

enum Field {
    Host,
    Protocol,
    Name,
    Avatar,
}

/// ## Summary
/// Parses the roster XML: top-level `server/host` and `server/protocol`
/// text nodes plus `user` elements carrying an `id` attribute and
/// `name`/`avatar` children. `user` elements without a numeric id are
/// skipped.
///
/// ## Errors
/// Returns an error if the XML is malformed or contains no root element.
pub fn parse_roster(xml: &str) -> CoreResult<Roster> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut roster = Roster::default();
    let mut saw_root = false;
    let mut in_server = false;
    let mut current_user: Option<(UserId, RosterMember)> = None;
    let mut current_field: Option<Field> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                saw_root = true;
                let local_name_bytes = e.local_name();
                let local_name = std::str::from_utf8(local_name_bytes.as_ref()).unwrap_or_default();

                match local_name {
                    "server" => in_server = true,
                    "user" => {
                        let id = e.try_get_attribute("id").ok().flatten().and_then(|attr| {
                            std::str::from_utf8(&attr.value)
                                .ok()
                                .and_then(|raw| raw.parse::<UserId>().ok())
                        });
                        if id.is_none() {
                            tracing::debug!("user element without numeric id, skipping");
                        }
                        current_user = id.map(|id| {
                            (
                                id,
                                RosterMember {
                                    name: String::new(),
                                    avatar: String::new(),
                                },
                            )
                        });
                    }
                    "host" if in_server => current_field = Some(Field::Host),
                    "protocol" if in_server => current_field = Some(Field::Protocol),
                    "name" if current_user.is_some() => current_field = Some(Field::Name),
                    "avatar" if current_user.is_some() => current_field = Some(Field::Avatar),
                    _ => {}
                }
            }
            Event::Text(ref t) => {
                let text = match reader.decoder().decode(t.as_ref()) {
                    Ok(text) => text.into_owned(),
                    Err(err) => {
                        return Err(CoreError::ParseError(format!("bad text encoding: {err}")));
                    }
                };
                match current_field {
                    Some(Field::Host) => roster.host = Some(text),
                    Some(Field::Protocol) => roster.protocol = Some(text),
                    Some(Field::Name) => {
                        if let Some((_, member)) = current_user.as_mut() {
                            member.name = text;
                        }
                    }
                    Some(Field::Avatar) => {
                        if let Some((_, member)) = current_user.as_mut() {
                            member.avatar = text;
                        }
                    }
                    None => {}
                }
            }
            Event::End(ref e) => {
                let local_name_bytes = e.local_name();
                let local_name = std::str::from_utf8(local_name_bytes.as_ref()).unwrap_or_default();

                match local_name {
                    "server" => in_server = false,
                    "user" => {
                        if let Some((id, member)) = current_user.take() {
                            roster.members.insert(id, member);
                        }
                    }
                    "host" | "protocol" | "name" | "avatar" => current_field = None,
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if saw_root {
        Ok(roster)
    } else {
        Err(CoreError::ParseError(
            "roster document has no root element".to_owned(),
        ))
    }
}

/// ## Summary
/// Downloads the roster document and persists it to `dest`, overwriting any
/// prior contents.
///
/// Network, HTTP, and file failures are logged at error level and reported
/// as `false`; the background refresher simply retries next cycle.
pub async fn fetch_roster(
    client: &reqwest::Client,
    url: &str,
    method: FetchMethod,
    dest: &Path,
) -> bool {
    let request = match method {
        FetchMethod::Get => client.get(url),
        FetchMethod::Post => client.post(url),
    };

    let response = match request.send().await.and_then(reqwest::Response::error_for_status) {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(url, %err, "network error, roster not downloaded");
            return false;
        }
    };
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(err) => {
            tracing::error!(url, %err, "failed to read roster response body");
            return false;
        }
    };
    if let Err(err) = tokio::fs::write(dest, &body).await {
        tracing::error!(path = %dest.display(), %err, "failed to persist roster file");
        return false;
    }

    tracing::info!(url, path = %dest.display(), bytes = body.len(), "roster refreshed");
    true
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::{parse_roster, read_roster};
    use crate::constants::DEFAULT_AVATAR_URL;

    const ROSTER_XML: &str = r#"<intranet>
  <server>
    <host>intranet.example.com</host>
    <protocol>https</protocol>
  </server>
  <users>
    <user id="10"><avatar>/api/images/users/10</avatar><name>Adam P.</name></user>
    <user id="11"><avatar>/api/images/users/11</avatar><name>Ewa K.</name></user>
    <user id="13"><name>Andrzej S.</name><avatar>/api/images/users/13</avatar></user>
  </users>
</intranet>"#;

    #[test]
    fn parses_names_and_server_fields() {
        let roster = parse_roster(ROSTER_XML).unwrap();
        let names = roster.display_names([10, 13]);

        assert_eq!(names.len(), 2);
        assert_eq!(names[&10], "Adam P.");
        assert_eq!(names[&13], "Andrzej S.");
    }

    #[test]
    fn missing_id_gets_placeholder_name() {
        let roster = parse_roster(ROSTER_XML).unwrap();
        let names = roster.display_names([121]);

        assert_eq!(names.len(), 1);
        assert_eq!(names[&121], "User 121");
    }

    #[test]
    fn empty_id_set_yields_empty_map() {
        let roster = parse_roster(ROSTER_XML).unwrap();
        assert!(roster.display_names([]).is_empty());
    }

    #[test]
    fn photo_url_composes_server_fields() {
        let roster = parse_roster(ROSTER_XML).unwrap();
        assert_eq!(
            roster.photo_url(13),
            "https://intranet.example.com/api/images/users/13"
        );
    }

    #[test]
    fn photo_url_falls_back_without_server_fields() {
        let xml = r#"<intranet><users><user id="10"><name>Adam P.</name></user></users></intranet>"#;
        let roster = parse_roster(xml).unwrap();
        assert_eq!(roster.photo_url(10), DEFAULT_AVATAR_URL);
    }

    #[test]
    fn photo_url_falls_back_for_unknown_user() {
        let roster = parse_roster(ROSTER_XML).unwrap();
        assert_eq!(roster.photo_url(999), DEFAULT_AVATAR_URL);
    }

    #[test]
    fn user_without_numeric_id_is_skipped() {
        let xml = r#"<intranet><users><user id="nan"><name>Ghost</name></user></users></intranet>"#;
        let roster = parse_roster(xml).unwrap();
        assert_eq!(roster.display_names([10])[&10], "User 10");
    }

    #[test]
    fn text_only_document_is_rejected() {
        assert!(parse_roster("wrong_string").is_err());
    }

    #[test]
    fn read_roster_on_corrupt_file_is_none() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"<intranet><unclosed></intranet>").unwrap();
        file.flush().unwrap();

        assert!(read_roster(file.path()).is_none());
    }

    #[test]
    fn read_roster_on_missing_file_is_none() {
        assert!(read_roster(std::path::Path::new("/nonexistent/roster.xml")).is_none());
    }
}
