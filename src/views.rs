//! Read-only views pairing a resource with its response's `included` pool.
//!
//! ```rust
//! use kidsout::{ListResponse, Sitter, SitterView};
//! use serde_json::json;
//!
//! let response: ListResponse<Sitter> = serde_json::from_value(json!({
//!     "data": [{
//!         "id": "1",
//!         "type": "users",
//!         "attributes": {"name": "Alice"},
//!         "relationships": {"avatars": {"data": [{"id": "9", "type": "avatars"}]}}
//!     }],
//!     "included": [{"id": "9", "type": "avatars", "attributes": {"url": "https://x/a.png"}}],
//!     "meta": {"current_page": 1, "total": 1, "total_pages": 1}
//! })).unwrap();
//!
//! let sitters = SitterView::from_list_response(response);
//! let avatar = sitters[0].avatar().unwrap();
//! assert_eq!(avatar.attributes.url.as_deref(), Some("https://x/a.png"));
//! ```

use std::sync::Arc;

use crate::relationships::{resolve_as, Related};
use crate::types::{
    Avatar, CurrencyAttributes, CurrencyRateAttributes, IncludedResource, InaccurateLocation,
    ListResponse, MetaTag, PerkAttributes, Place, RegionAttributes, Resource, ReviewAttributes,
    SearchLocation, UserAttributes,
};

/// A resource plus a shared handle to the pool its relationships resolve
/// against.
///
/// Views are immutable. Every view built from one response holds the same
/// pool; cloning a view clones the resource but not the pool.
#[derive(Debug, Clone)]
pub struct ResourceView<A> {
    resource: Resource<A>,
    included: Arc<[IncludedResource]>,
}

impl<A> ResourceView<A> {
    /// Create a view over `resource` resolving against `included`.
    pub fn new(resource: Resource<A>, included: Arc<[IncludedResource]>) -> Self {
        Self { resource, included }
    }

    /// Create a view with an empty pool. Every relationship resolves to `None`.
    pub fn standalone(resource: Resource<A>) -> Self {
        Self::new(resource, Arc::from(Vec::new()))
    }

    /// Split a list response into one view per element of `data`, in order,
    /// all sharing the response's `included` pool.
    pub fn from_list_response(response: ListResponse<Resource<A>>) -> Vec<Self> {
        let included: Arc<[IncludedResource]> =
            Arc::from(response.included.unwrap_or_default());
        response
            .data
            .into_iter()
            .map(|resource| Self::new(resource, Arc::clone(&included)))
            .collect()
    }

    /// Resource ID.
    pub fn id(&self) -> &str {
        &self.resource.id
    }

    /// Wire type.
    pub fn kind(&self) -> &str {
        &self.resource.kind
    }

    /// Resource attributes.
    pub fn attributes(&self) -> &A {
        &self.resource.attributes
    }

    /// The wrapped resource.
    pub fn resource(&self) -> &Resource<A> {
        &self.resource
    }

    /// The pool relationships resolve against.
    pub fn included(&self) -> &[IncludedResource] {
        &self.included
    }

    /// Resolve the relationship `name` to a resource of type `R`.
    pub fn related<R: Related>(&self, name: &str) -> Option<&R> {
        resolve_as(&self.resource, name, &self.included)
    }

    /// Unwrap the resource, dropping this view's pool handle.
    pub fn into_resource(self) -> Resource<A> {
        self.resource
    }
}

/// View over a sitter.
pub type SitterView = ResourceView<UserAttributes>;

impl ResourceView<UserAttributes> {
    /// The sitter's avatar, if included.
    pub fn avatar(&self) -> Option<&Avatar> {
        self.related("avatars")
    }

    /// The sitter's approximate location, if included.
    pub fn inaccurate_location(&self) -> Option<&InaccurateLocation> {
        self.related("inaccurate_location")
    }

    /// The sitter's meta tags, if included.
    pub fn meta_tags(&self) -> Option<&MetaTag> {
        self.related("meta_tags")
    }
}

/// View over a region.
pub type RegionView = ResourceView<RegionAttributes>;

impl ResourceView<RegionAttributes> {
    /// The region's default place, if included.
    pub fn default_place(&self) -> Option<&Place> {
        self.related("default_place")
    }

    /// Search location, read from the attributes.
    pub fn search_location(&self) -> Option<&SearchLocation> {
        self.attributes().search_location.as_ref()
    }
}

/// View over a review.
pub type ReviewView = ResourceView<ReviewAttributes>;

/// View over a currency.
pub type CurrencyView = ResourceView<CurrencyAttributes>;

/// View over a perk.
pub type PerkView = ResourceView<PerkAttributes>;

/// View over a currency rate.
pub type CurrencyRateView = ResourceView<CurrencyRateAttributes>;

impl ResourceView<CurrencyRateAttributes> {
    /// Source currency code.
    pub fn from(&self) -> &str {
        &self.attributes().from
    }

    /// Target currency code.
    pub fn to(&self) -> &str {
        &self.attributes().to
    }

    /// Exchange rate.
    pub fn rate(&self) -> f64 {
        self.attributes().rate
    }
}
