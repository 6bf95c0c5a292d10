use anyhow::{anyhow, Context, Result};
use kuchiki::traits::*;
use regex::Regex;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::settings::Settings;

pub(crate) async fn download_weekly_document(
    settings: &Settings,
    destination: &Path,
) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.http_timeout_secs))
        .build()
        .with_context(|| "failed to build http client")?;

    let html = fetch_text(&client, &settings.index_url).await?;
    let links = extract_document_links(&html, &settings.document_pattern)?;
    debug!("{} document link(s) matched on the index page", links.len());
    let url = select_document(&links, settings.document_index)?;
    info!("downloading {}", url);

    let bytes = fetch_bytes(&client, url).await?;
    std::fs::write(destination, &bytes)
        .with_context(|| format!("failed to write document: {}", destination.display()))?;
    Ok(url.to_string())
}

async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("failed to fetch {}", url))?;
    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("index page error ({}): {}", status, url));
    }
    response
        .text()
        .await
        .with_context(|| format!("failed to read body of {}", url))
}

async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("failed to fetch {}", url))?;
    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("document error ({}): {}", status, url));
    }
    let bytes = response
        .bytes()
        .await
        .with_context(|| format!("failed to read body of {}", url))?;
    Ok(bytes.to_vec())
}

pub(crate) fn extract_document_links(html: &str, pattern: &str) -> Result<Vec<String>> {
    let matcher = Regex::new(pattern)
        .with_context(|| format!("invalid document pattern: {}", pattern))?;
    let document = kuchiki::parse_html().one(html);

    let mut links: Vec<String> = Vec::new();
    for node in document.descendants() {
        let Some(element) = node.as_element() else {
            continue;
        };
        if element.name.local.as_ref() != "a" {
            continue;
        }
        let attributes = element.attributes.borrow();
        let Some(href) = attributes.get("href") else {
            continue;
        };
        if !matcher.is_match(href) {
            continue;
        }
        if !links.iter().any(|existing| existing == href) {
            links.push(href.to_string());
        }
    }
    Ok(links)
}

pub(crate) fn select_document(links: &[String], index: usize) -> Result<&str> {
    if links.is_empty() {
        return Err(anyhow!("no document links matched the configured pattern"));
    }
    links.get(index).map(String::as_str).ok_or_else(|| {
        anyhow!(
            "only {} document link(s) found, wanted entry {}",
            links.len(),
            index + 1
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATTERN: &str = r"https://school\.example/uploads/Orario-CLASSI-.+?\.pdf";

    #[test]
    fn links_are_collected_in_order_without_duplicates() {
        let html = r#"
            <html><body>
            <a href="https://school.example/uploads/Orario-CLASSI-prima.pdf">week 1</a>
            <a href="https://school.example/uploads/avvisi.pdf">notice</a>
            <a href="https://school.example/uploads/Orario-CLASSI-seconda.pdf">week 2</a>
            <a href="https://school.example/uploads/Orario-CLASSI-prima.pdf">week 1 again</a>
            </body></html>
        "#;
        let links = extract_document_links(html, PATTERN).unwrap();
        assert_eq!(
            links,
            vec![
                "https://school.example/uploads/Orario-CLASSI-prima.pdf",
                "https://school.example/uploads/Orario-CLASSI-seconda.pdf",
            ]
        );
    }

    #[test]
    fn no_matching_links_is_a_distinct_error() {
        let links = extract_document_links("<html><body>nothing</body></html>", PATTERN).unwrap();
        let err = select_document(&links, 1).unwrap_err();
        assert!(err.to_string().contains("no document links matched"));
    }

    #[test]
    fn too_few_links_is_a_distinct_error() {
        let links = vec!["https://school.example/uploads/Orario-CLASSI-prima.pdf".to_string()];
        let err = select_document(&links, 1).unwrap_err();
        assert!(err.to_string().contains("only 1 document link(s) found"));
    }

    #[test]
    fn configured_entry_is_selected() {
        let links = vec![
            "https://school.example/uploads/Orario-CLASSI-prima.pdf".to_string(),
            "https://school.example/uploads/Orario-CLASSI-seconda.pdf".to_string(),
        ];
        assert_eq!(
            select_document(&links, 1).unwrap(),
            "https://school.example/uploads/Orario-CLASSI-seconda.pdf"
        );
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(extract_document_links("<html></html>", "(").is_err());
    }
}
