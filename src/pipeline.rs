// src/pipeline.rs

use anyhow::Result;
use reqwest::Client;
use scraper::Html;
use std::{collections::HashSet, path::PathBuf};
use tracing::{info, instrument, warn};

use crate::{cli::Config, fetch, process, write};

/// What a run produced.
#[derive(Debug, Default)]
pub struct Summary {
    /// Tables found in the page.
    pub tables: usize,
    /// Files written, one per table, in document order (duplicates included).
    pub files: Vec<PathBuf>,
}

/// Fetch `config.url` and write every table in it under `config.out_dir`.
#[instrument(level = "info", skip(client, config), fields(url = %config.url))]
pub async fn run(client: &Client, config: &Config) -> Result<Summary> {
    // ─── 1) output directory ─────────────────────────────────────────
    write::prepare_out_dir(&config.out_dir)?;

    // ─── 2) fetch & parse ────────────────────────────────────────────
    let body = fetch::fetch_page(client, &config.url).await?;
    let tables = {
        let doc = Html::parse_document(&body);
        process::extract_tables(&doc)
    };

    if tables.is_empty() {
        warn!("no tables found");
        return Ok(Summary::default());
    }
    info!(count = tables.len(), "found tables");

    // ─── 3) one CSV per table, strictly in order ─────────────────────
    let mut seen = HashSet::new();
    let mut files = Vec::with_capacity(tables.len());
    for table in &tables {
        let path = write::table_path(&config.out_dir, table);
        if !seen.insert(path.clone()) {
            warn!(path = %path.display(), "filename collision, overwriting earlier table");
        }
        files.push(write::write_table(&config.out_dir, table)?);
    }

    info!(
        files = seen.len(),
        dir = %config.out_dir.display(),
        "wrote tables"
    );
    Ok(Summary {
        tables: tables.len(),
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };
    use tracing_subscriber::{fmt, EnvFilter};

    fn init_logging() {
        let _ = fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_test_writer()
            .try_init();
    }

    async fn serve_once(body: &'static str) -> Result<String> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            if let Ok((mut sock, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = sock.read(&mut buf).await;
                let resp = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = sock.write_all(resp.as_bytes()).await;
                let _ = sock.shutdown().await;
            }
        });
        Ok(format!("http://{}/", addr))
    }

    fn csv_files(dir: &std::path::Path) -> Result<Vec<String>> {
        let mut names: Vec<String> = fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        Ok(names)
    }

    #[tokio::test]
    async fn test_single_table_end_to_end() -> Result<()> {
        init_logging();
        let url = serve_once(
            "<table><tr><th>Name</th><th>Age</th></tr><tr><td>Ann</td><td>30</td></tr></table>",
        )
        .await?;
        let tmp = tempdir()?;
        let config = Config {
            url,
            out_dir: tmp.path().join("result"),
        };

        let summary = run(&Client::new(), &config).await?;

        assert_eq!(summary.tables, 1);
        assert_eq!(csv_files(&config.out_dir)?, vec!["data_NameAgeAnn30.csv"]);
        let content = fs::read_to_string(config.out_dir.join("data_NameAgeAnn30.csv"))?;
        assert_eq!(content, "Name,Age\nAnn,30\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_two_tables_two_files() -> Result<()> {
        init_logging();
        let url = serve_once(
            "<html><body>\
             <table><tr><td>alpha</td><td>1</td></tr></table>\
             <p>between</p>\
             <table><tr><td>beta</td></tr><tr><td>2</td></tr></table>\
             </body></html>",
        )
        .await?;
        let tmp = tempdir()?;
        let config = Config {
            url,
            out_dir: tmp.path().to_path_buf(),
        };

        let summary = run(&Client::new(), &config).await?;

        assert_eq!(summary.tables, 2);
        assert_eq!(
            csv_files(tmp.path())?,
            vec!["data_alpha1.csv", "data_beta2.csv"]
        );
        assert_eq!(fs::read_to_string(tmp.path().join("data_alpha1.csv"))?, "alpha,1\n");
        assert_eq!(fs::read_to_string(tmp.path().join("data_beta2.csv"))?, "beta\n2\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_table_and_no_tables() -> Result<()> {
        init_logging();
        let tmp = tempdir()?;

        let url = serve_once("<table></table>").await?;
        let config = Config {
            url,
            out_dir: tmp.path().join("empty"),
        };
        let summary = run(&Client::new(), &config).await?;
        assert_eq!(summary.files, vec![config.out_dir.join("data_.csv")]);
        assert_eq!(fs::read_to_string(&summary.files[0])?, "");

        let url = serve_once("<p>no tables</p>").await?;
        let config = Config {
            url,
            out_dir: tmp.path().join("none"),
        };
        let summary = run(&Client::new(), &config).await?;
        assert_eq!(summary.tables, 0);
        assert!(config.out_dir.is_dir());
        assert!(csv_files(&config.out_dir)?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_colliding_heads_overwrite() -> Result<()> {
        init_logging();
        let url = serve_once(
            "<table><tr><td>Same heading text</td><td>first</td></tr></table>\
             <table><tr><td>Same heading text</td><td>second</td></tr></table>",
        )
        .await?;
        let tmp = tempdir()?;
        let config = Config {
            url,
            out_dir: tmp.path().to_path_buf(),
        };

        let summary = run(&Client::new(), &config).await?;

        assert_eq!(summary.tables, 2);
        assert_eq!(summary.files[0], summary.files[1]);
        assert_eq!(csv_files(tmp.path())?, vec!["data_Same_heading_te.csv"]);
        assert_eq!(
            fs::read_to_string(&summary.files[0])?,
            "Same heading text,second\n"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_host_fails() -> Result<()> {
        init_logging();
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        drop(listener);

        let tmp = tempdir()?;
        let config = Config {
            url: format!("http://{}/", addr),
            out_dir: tmp.path().join("out"),
        };
        assert!(run(&Client::new(), &config).await.is_err());
        Ok(())
    }
}
