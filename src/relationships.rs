//! Relationship resolution against an `included` pool.
//!
//! A relationship on a primary resource is only an `(id, type)` reference.
//! The referenced resource itself, when the server sent it, sits in the
//! response's flat `included` pool. Resolution never fails: a relationship
//! that is missing, empty, of an unexpected type, or not present in the pool
//! all come back as `None`.

use crate::types::{
    kind, Avatar, Currency, IncludedResource, InaccurateLocation, MetaTag, Perk, Place, Region,
    Resource, Review, User,
};

/// A resource type that can be pulled out of the `included` pool.
pub trait Related: Sized {
    /// Wire `type` of this resource.
    const TYPE: &'static str;

    /// Borrow `resource` as `Self` if it is of this type.
    fn from_included(resource: &IncludedResource) -> Option<&Self>;
}

macro_rules! impl_related {
    ($($ty:ty => $kind:path, $variant:ident;)*) => {
        $(
            impl Related for $ty {
                const TYPE: &'static str = $kind;

                fn from_included(resource: &IncludedResource) -> Option<&Self> {
                    match resource {
                        IncludedResource::$variant(r) => Some(r),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_related! {
    User => kind::USERS, User;
    Avatar => kind::AVATARS, Avatar;
    Place => kind::PLACES, Place;
    Perk => kind::PERKS, Perk;
    Region => kind::REGIONS, Region;
    Currency => kind::CURRENCIES, Currency;
    Review => kind::REVIEWS, Review;
    InaccurateLocation => kind::INACCURATE_LOCATIONS, InaccurateLocation;
    MetaTag => kind::META_TAGS, MetaTag;
}

/// Resolve the relationship `name` of `primary` against `included`.
///
/// To-many relationships surface only their first reference; an empty list
/// resolves to `None`. The reference must carry `expected_type`, otherwise
/// `None` is returned even if the pool holds a matching resource. The pool is
/// scanned in order and the first `(id, type)` match wins.
pub fn resolve<'a, A>(
    primary: &Resource<A>,
    name: &str,
    expected_type: &str,
    included: &'a [IncludedResource],
) -> Option<&'a IncludedResource> {
    let identifier = primary.relationship(name)?.data.as_ref()?.primary()?;
    if identifier.id.is_empty() || identifier.kind != expected_type {
        return None;
    }
    included.iter().find(|resource| resource.is(identifier))
}

/// Typed form of [`resolve`], using `R::TYPE` as the expected type.
pub fn resolve_as<'a, R: Related, A>(
    primary: &Resource<A>,
    name: &str,
    included: &'a [IncludedResource],
) -> Option<&'a R> {
    resolve(primary, name, R::TYPE, included).and_then(R::from_included)
}
