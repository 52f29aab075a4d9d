use anyhow::{bail, Result};

use avastore_core::{
    catalog::ordering,
    storage::{Database, ProductRepository},
    AppConfig, Error,
};

/// Where `move` puts a product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    /// Zero-based index
    Index(usize),
    /// Start of a 1-based page
    Page(usize),
    /// Position currently held by another product
    Onto(i64),
}

impl MoveTarget {
    pub fn from_args(to: Option<usize>, page: Option<usize>, onto: Option<i64>) -> Result<Self> {
        match (to, page, onto) {
            (Some(to), None, None) => Ok(MoveTarget::Index(to)),
            (None, Some(page), None) => Ok(MoveTarget::Page(page)),
            (None, None, Some(onto)) => Ok(MoveTarget::Onto(onto)),
            _ => bail!("Exactly one of --to, --page or --onto is required"),
        }
    }
}

/// Apply `target` to the ordered `ids`. Returns whether anything moved.
fn apply(ids: &mut Vec<i64>, id: i64, target: MoveTarget, page_size: usize) -> Result<bool> {
    let from = ids
        .iter()
        .position(|&p| p == id)
        .ok_or(Error::ProductNotFound(id))?;

    let moved = match target {
        MoveTarget::Index(to) => ordering::move_to_index(ids, from, to),
        MoveTarget::Page(0) => bail!("Pages start at 1"),
        MoveTarget::Page(page) => ordering::move_to_page_start(ids, &id, page, page_size, |p| *p),
        MoveTarget::Onto(onto) => {
            if !ids.contains(&onto) {
                return Err(Error::ProductNotFound(onto).into());
            }
            ordering::move_by_key(ids, &id, &onto, |p| *p)
        }
    };
    Ok(moved)
}

pub async fn run(db: &Database, config: &AppConfig, id: i64, target: MoveTarget) -> Result<()> {
    let repo = ProductRepository::new(db);
    let mut ids: Vec<i64> = repo.list_all().await?.iter().map(|p| p.id).collect();
    let page_size = config.catalog.page_size.max(1);

    if !apply(&mut ids, id, target, page_size)? {
        println!("Product #{} is already in place.", id);
        return Ok(());
    }

    repo.reorder(&ids).await?;
    let index = ids.iter().position(|&p| p == id).unwrap_or_default();
    println!(
        "Moved product #{} to position {} (page {})",
        id,
        index,
        ordering::page_of(index, page_size)
    );
    Ok(())
}
