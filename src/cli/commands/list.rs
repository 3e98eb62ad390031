use crate::cli::args::ListArgs;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::store::CaseStore;

/// Execute list command
pub async fn execute(args: ListArgs, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let store = CaseStore::open(config.db_path()?).await?;

    println!("{}", render(&args, format, &store).await?);
    Ok(())
}

/// Render the archive page for the requested format.
async fn render(args: &ListArgs, format: OutputFormat, store: &CaseStore) -> Result<String> {
    let total = store.count().await?;
    let human_format = matches!(format, OutputFormat::Table | OutputFormat::Markdown);

    // A page emptied by --limit is not an empty archive; the
    // getting-started notice is only for a truly empty one.
    if total == 0 && human_format {
        return Ok("No cases archived yet. Run 'docket search <term>' first.".to_string());
    }

    let mut records = store.list_all().await?;
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }

    let mut rendered = output::format_cases(&records, format)?;
    if human_format && (records.len() as u64) < total {
        rendered.push_str(&format!(
            "\n\nShowing {} of {} archived case(s)",
            records.len(),
            total
        ));
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::CaseRecord;
    use tempfile::TempDir;

    async fn seeded_store(cases: usize) -> (CaseStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = CaseStore::open(dir.path().join("cases.db")).await.unwrap();
        for i in 0..cases {
            let record = CaseRecord::new(format!("22-CV-{:03}", i), None, None, None).unwrap();
            store.put_if_absent(record).await.unwrap();
        }
        (store, dir)
    }

    #[tokio::test]
    async fn empty_archive_shows_the_getting_started_notice() {
        let (store, _dir) = seeded_store(0).await;

        let out = render(&ListArgs { limit: None }, OutputFormat::Table, &store)
            .await
            .unwrap();
        assert!(out.contains("No cases archived yet"));
    }

    #[tokio::test]
    async fn truncated_page_is_not_mistaken_for_an_empty_archive() {
        let (store, _dir) = seeded_store(2).await;

        let out = render(&ListArgs { limit: Some(0) }, OutputFormat::Table, &store)
            .await
            .unwrap();
        assert!(!out.contains("No cases archived yet"));
        assert!(out.contains("Showing 0 of 2 archived case(s)"));
    }

    #[tokio::test]
    async fn limit_caps_the_page_and_reports_the_total() {
        let (store, _dir) = seeded_store(3).await;

        let out = render(&ListArgs { limit: Some(2) }, OutputFormat::Table, &store)
            .await
            .unwrap();
        assert!(out.contains("Showing 2 of 3 archived case(s)"));
        assert!(!out.contains("Showing 3"));
    }
}
