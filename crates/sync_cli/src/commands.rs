use anyhow::Context;
use serde::Serialize;
use sync_core::{Crawler, EntityState, Filters, Operation, QueryParams, Resource};
use sync_engine::SyncClient;
use sync_logging::{sync_debug, sync_warn};

use crate::{CrawlerAction, FiltersAction, PageArgs};

impl From<PageArgs> for QueryParams {
    fn from(args: PageArgs) -> Self {
        QueryParams {
            page: args.page,
            size: args.size,
            sort: args.sort,
        }
    }
}

pub(crate) async fn crawlers(client: &SyncClient, action: CrawlerAction) -> anyhow::Result<()> {
    match action {
        CrawlerAction::List(page) => list::<Crawler>(client, page.into()).await,
        CrawlerAction::Get { id } => show_one::<Crawler>(client, Operation::FetchOne(id)).await,
        CrawlerAction::Create {
            name,
            fetch,
            source,
        } => mutate(client, Operation::Create(Crawler::new(name, fetch, source))).await,
        CrawlerAction::Update {
            id,
            name,
            fetch,
            source,
        } => {
            let crawler = Crawler::new(name, fetch, source).with_id(id);
            mutate(client, Operation::Update(crawler)).await
        }
        CrawlerAction::Patch {
            id,
            name,
            fetch,
            source,
        } => {
            let patch = Crawler {
                id: Some(id),
                name,
                fetch,
                source,
            };
            mutate(client, Operation::PartialUpdate(patch)).await
        }
        CrawlerAction::Delete { id } => mutate(client, Operation::<Crawler>::Delete(id)).await,
    }
}

pub(crate) async fn filters(client: &SyncClient, action: FiltersAction) -> anyhow::Result<()> {
    match action {
        FiltersAction::List(page) => list::<Filters>(client, page.into()).await,
        FiltersAction::Get { id } => show_one::<Filters>(client, Operation::FetchOne(id)).await,
        FiltersAction::Save { id, crawler } => save_filters(client, id, &crawler).await,
        FiltersAction::Patch { id, crawler } => {
            let crawlers = load_crawlers(client).await?;
            let patch = Filters {
                id: Some(id),
                crawler: None,
            }
            .bind_crawler(&crawler, &crawlers);
            warn_unbound(&crawler, &patch);
            mutate(client, Operation::PartialUpdate(patch)).await
        }
        FiltersAction::Delete { id } => mutate(client, Operation::<Filters>::Delete(id)).await,
    }
}

/// Create-or-edit flow: focus the record (or reset for a new one), load the
/// crawler choices, bind the selection, save.
async fn save_filters(client: &SyncClient, id: Option<i64>, selected: &str) -> anyhow::Result<()> {
    let base = match id {
        Some(id) => {
            client
                .dispatch(Operation::<Filters>::fetch_one(id))
                .await
                .with_context(|| format!("Failed to load filters {id}"))?;
            client.current_state::<Filters>().entity().clone()
        }
        None => {
            client.reset::<Filters>().await?;
            Filters::default()
        }
    };
    let crawlers = load_crawlers(client).await?;

    let entity = base.bind_crawler(selected, &crawlers);
    warn_unbound(selected, &entity);
    mutate(client, Operation::save(entity)).await
}

async fn load_crawlers(client: &SyncClient) -> anyhow::Result<Vec<Crawler>> {
    client
        .fetch_list::<Crawler>(QueryParams::default())
        .await
        .context("Failed to load crawlers")?;
    Ok(client.current_state::<Crawler>().entities().to_vec())
}

fn warn_unbound(selected: &str, filters: &Filters) {
    if !selected.is_empty() && filters.crawler.is_none() {
        sync_warn!("Crawler {} not found; saving without a crawler link", selected);
    }
}

async fn list<T: Resource>(client: &SyncClient, query: QueryParams) -> anyhow::Result<()> {
    client
        .fetch_list::<T>(query)
        .await
        .with_context(|| format!("Failed to list {}", T::KIND))?;
    let state = client.current_state::<T>();
    if let Some(total) = state.total_items() {
        sync_debug!("{} of {} {} records", state.entities().len(), total, T::KIND);
    }
    print_json(&state.entities())
}

async fn show_one<T: Resource>(client: &SyncClient, operation: Operation<T>) -> anyhow::Result<()> {
    client
        .dispatch(T::command(operation))
        .await
        .with_context(|| format!("Failed to load {}", T::KIND))?;
    print_json(client.current_state::<T>().entity())
}

/// Runs a mutation and its refresh, then prints the focused entity.
async fn mutate<T: Resource>(client: &SyncClient, operation: Operation<T>) -> anyhow::Result<()> {
    let kind = operation.kind();
    client
        .dispatch(T::command(operation))
        .await
        .with_context(|| format!("{} {} failed", T::KIND, kind))?;
    client.wait_idle().await;

    let state: EntityState<T> = client.current_state();
    if let Some(message) = state.error_message() {
        sync_warn!("{} saved but refresh failed: {}", T::KIND, message);
    }
    print_json(state.entity())
}

fn print_json<V: Serialize + ?Sized>(value: &V) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
