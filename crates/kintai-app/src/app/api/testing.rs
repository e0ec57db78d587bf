//! Shared fixtures for handler tests: a router wired with config and
//! presence state hoops over temp-dir CSV/XML files.

use std::sync::Arc;

use kintai_core::config::{
    CacheConfig, DataConfig, LoggingConfig, RefreshConfig, RosterConfig, ServerConfig, Settings,
};
use kintai_core::roster::FetchMethod;
use salvo::{Router, Service};
use tempfile::TempDir;

use crate::config::ConfigHandler;
use crate::state::{PresenceState, StateHandler};

pub const FIXTURE_CSV: &str = "attendance export\n\
10,2013-09-10,09:39:05,17:59:52\n\
10,2013-09-12,10:48:46,17:23:51\n\
11,2013-09-09,09:12:14,15:54:17\n\
11,2013-09-10,09:19:50,13:55:54\n\
13,2013-09-12,11:47:46,15:52:43\n\
13,2014-09-11,09:01:00,17:16:00\n";

pub const FIXTURE_XML: &str = r#"<intranet>
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

pub struct TestApp {
    pub service: Service,
    csv_path: std::path::PathBuf,
    _dir: TempDir,
}

impl TestApp {
    pub fn csv_path(&self) -> &std::path::Path {
        &self.csv_path
    }
}

pub fn test_app() -> TestApp {
    test_app_with(FIXTURE_CSV, FIXTURE_XML)
}

pub fn test_app_with(csv: &str, xml: &str) -> TestApp {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("presence.csv");
    std::fs::write(&csv_path, csv).unwrap();
    let xml_path = dir.path().join("roster.xml");
    std::fs::write(&xml_path, xml).unwrap();

    let settings = Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 0,
        },
        data: DataConfig {
            csv_path: csv_path.clone(),
        },
        roster: RosterConfig {
            url: "http://localhost/users.xml".to_owned(),
            method: FetchMethod::Get,
            xml_path,
        },
        // Disabled so every request re-reads the fixture files.
        cache: CacheConfig {
            ttl_seconds: 0,
            enabled: false,
        },
        refresh: RefreshConfig {
            day_of_week: "*".to_owned(),
            hour: "*/4".to_owned(),
            minute: "0".to_owned(),
        },
        logging: LoggingConfig {
            level: "debug".to_owned(),
        },
    };

    let state = Arc::new(PresenceState::from_settings(&settings));
    let router = Router::new()
        .hoop(ConfigHandler { settings })
        .hoop(StateHandler { state })
        .push(crate::app::routes());

    TestApp {
        service: Service::new(router),
        csv_path,
        _dir: dir,
    }
}
