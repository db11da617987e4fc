//! Collection membership resolution.
//!
//! Collections store entity ids, not entities. Resolving one walks its
//! ordered ids against the store and yields the entities still present;
//! ids whose entity was deleted are skipped.

use tracing::trace;

use crate::error::Result;
use crate::facet::FacetSet;
use crate::models::{CollectionId, Restaurant};
use crate::store::CatalogStore;

/// Live members of a collection, in the collection's order.
///
/// Fails only when the collection itself is unknown.
pub fn members_of<'a, S>(store: &'a S, collection: &CollectionId) -> Result<Vec<&'a Restaurant>>
where
    S: CatalogStore + ?Sized,
{
    let c = store.collection(collection)?;
    Ok(c.members
        .iter()
        .filter_map(|id| match store.get(id) {
            Ok(r) => Some(r),
            Err(_) => {
                trace!(collection = %c.id, entity = %id, "skipping dangling member");
                None
            }
        })
        .collect())
}

/// Collection members that also pass `facets`, in the collection's order.
pub fn intersect_with_facets<'a, S>(
    store: &'a S,
    collection: &CollectionId,
    facets: &FacetSet,
) -> Result<Vec<&'a Restaurant>>
where
    S: CatalogStore + ?Sized,
{
    let members = members_of(store, collection)?;
    Ok(facets.evaluate(members))
}
