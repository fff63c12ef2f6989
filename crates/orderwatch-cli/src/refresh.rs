use anyhow::Context;
use orderwatch_api::demo::DEMO_REFERENCE;
use orderwatch_api::{ApiClient, ApiError, DemoSource, OrderSource, Tokens};
use orderwatch_core::OrderSnapshot;
use orderwatch_store::{ingest_snapshots, IngestResult, OrderStore, TokenVault};

use crate::config::AppContext;

enum Source {
    Demo(DemoSource),
    Live { client: ApiClient, vault: TokenVault },
}

/// An order source paired with the store its results are recorded in.
pub struct Session {
    source: Source,
    store: OrderStore,
}

fn not_logged_in() -> anyhow::Error {
    anyhow::anyhow!("not logged in; run `orderwatch login` (or pass --demo)")
}

fn api_error(err: ApiError) -> anyhow::Error {
    match err {
        ApiError::Unauthorized => {
            anyhow::anyhow!("the API rejected the stored credentials; run `orderwatch login`")
        }
        other => anyhow::Error::new(other),
    }
}

impl Session {
    pub async fn open(ctx: &AppContext) -> anyhow::Result<Self> {
        let store = ctx.data_store()?;
        let source = if ctx.is_demo() {
            let demo = DemoSource::new();
            seed_demo_history(&store, &demo)?;
            Source::Demo(demo)
        } else {
            let vault = ctx.home_store()?.tokens();
            let tokens: Tokens = vault
                .load()
                .context("reading stored credentials")?
                .ok_or_else(not_logged_in)?;
            let config = ctx.app_config()?;
            let client = ApiClient::new(tokens)
                .with_device(config.device_language, config.device_country);
            Source::Live { client, vault }
        };
        Ok(Self { source, store })
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    fn source(&self) -> &dyn OrderSource {
        match &self.source {
            Source::Demo(demo) => demo,
            Source::Live { client, .. } => client,
        }
    }

    async fn ensure_fresh_tokens(&mut self) -> anyhow::Result<()> {
        if let Source::Live { client, vault } = &mut self.source {
            let refreshed = client
                .refresh_if_expired()
                .await
                .map_err(api_error)
                .context("refreshing access token")?;
            if refreshed {
                vault.save(client.tokens()).context("saving refreshed credentials")?;
            }
        }
        Ok(())
    }

    /// One refresh cycle: fetch every order and record it in history.
    pub async fn refresh(&mut self) -> anyhow::Result<Vec<IngestResult>> {
        self.ensure_fresh_tokens().await?;
        let snapshots = self.source().fetch_all().await.map_err(api_error)?;
        Ok(ingest_snapshots(&self.store.history(), snapshots))
    }

    /// Fetch and record a single order.
    pub async fn refresh_one(&mut self, reference: &str) -> anyhow::Result<IngestResult> {
        self.ensure_fresh_tokens().await?;
        let source = self.source();
        let order = source
            .list_orders()
            .await
            .map_err(api_error)?
            .into_iter()
            .find(|order| order.reference_number == reference)
            .ok_or_else(|| anyhow::anyhow!("no order with reference {reference}"))?;
        let details = source
            .fetch_order_details(reference)
            .await
            .map_err(api_error)?;
        let snapshot = OrderSnapshot::new(order, details);
        let mut results = ingest_snapshots(&self.store.history(), vec![snapshot]);
        results
            .pop()
            .ok_or_else(|| anyhow::anyhow!("no result recorded for {reference}"))
    }
}

fn seed_demo_history(store: &OrderStore, demo: &DemoSource) -> anyhow::Result<()> {
    let history = store.history();
    if !history.load_history(DEMO_REFERENCE)?.is_empty() {
        return Ok(());
    }
    let mut seeded = demo.seed_history(chrono::Utc::now());
    history.save_history(&mut seeded)?;
    tracing::debug!(reference = DEMO_REFERENCE, "seeded demo history");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_refresh_records_changes_once() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = AppContext::resolve(Some(tmp.path().to_path_buf()), true).unwrap();
        let mut session = Session::open(&ctx).await.unwrap();

        let first = session.refresh().await.unwrap();
        assert_eq!(first.len(), 1);
        assert!(!first[0].diffs().is_empty());

        let second = session.refresh().await.unwrap();
        assert!(second[0].diffs().is_empty());
        assert_eq!(
            session.store().history().load_history(DEMO_REFERENCE).unwrap().len(),
            3
        );
    }

    #[tokio::test]
    async fn live_session_requires_login() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = AppContext::resolve(Some(tmp.path().to_path_buf()), false).unwrap();
        let err = Session::open(&ctx).await.err().unwrap();
        assert!(err.to_string().contains("not logged in"));
    }

    #[tokio::test]
    async fn refresh_one_rejects_unknown_reference() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = AppContext::resolve(Some(tmp.path().to_path_buf()), true).unwrap();
        let mut session = Session::open(&ctx).await.unwrap();
        assert!(session.refresh_one("RN0").await.is_err());
        let result = session.refresh_one(DEMO_REFERENCE).await.unwrap();
        assert!(result.outcome.is_ok());
    }
}
