#![allow(dead_code)]

use std::path::Path;

use axum::serve::serve;
use once_cell::sync::Lazy;
use reqwest::multipart::{Form, Part};
use sphynx::config::{ApplicationSettings, DirectorySettings, Environment, Settings};
use tempfile::TempDir;
use tokio::net::TcpListener;

static INIT: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::DEBUG)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter_level))
            )
            .finish();
        tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
    } else {
        let subscriber = tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::ERROR)
            .finish();
        tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
    }
});

/// A server on a random local port serving its own temporary root directory.
pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    root: TempDir,
}

impl TestApp {
    pub async fn spawn() -> TestApp {
        Lazy::force(&INIT);

        let root = tempfile::tempdir().expect("Failed to create temp root");
        let settings = Settings {
            application: ApplicationSettings {
                host: "127.0.0.1".into(),
                port: 0,
                environment: Environment::Testing,
                max_filesize: None,
                cors_origins: vec!["http://localhost:3000".into()],
            },
            directories: DirectorySettings {
                root_dir: root.path().to_path_buf(),
            },
        };

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{port}");

        let routes = sphynx::server::create_server(&settings);
        tokio::spawn(async move {
            serve(listener, routes.into_make_service()).await.expect("Server stopped");
        });

        TestApp {
            address,
            client: reqwest::Client::new(),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.address)
    }

    /// Writes a file straight into the root, bypassing the server.
    pub fn put_file(&self, name: &str, contents: &[u8]) {
        std::fs::write(self.root().join(name), contents).expect("Failed to write test file");
    }

    pub fn mkdir(&self, name: &str) {
        std::fs::create_dir_all(self.root().join(name)).expect("Failed to create test dir");
    }

    pub async fn upload(&self, form: Form) -> reqwest::Response {
        self.client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// A multipart form with a single `file` field.
    pub fn file_form(file_name: &str, contents: &'static [u8]) -> Form {
        Form::new().part("file", Part::bytes(contents).file_name(file_name.to_string()))
    }
}
