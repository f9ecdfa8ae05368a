//! API types for the Kidsout SDK.
//!
//! Responses follow a JSON:API-like envelope: a `data` list of resources, a
//! flat `included` pool of related resources of mixed types, and pagination
//! `meta`. Attribute structs keep every known field optional and collect
//! unknown keys in an `extra` map so nothing is dropped on a round trip.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Untyped attribute bag.
pub type Attributes = Map<String, Value>;

/// Wire `type` strings of the resource kinds this SDK models.
pub mod kind {
    /// Users (sitters and parents).
    pub const USERS: &str = "users";
    /// Avatars.
    pub const AVATARS: &str = "avatars";
    /// Places.
    pub const PLACES: &str = "places";
    /// Perks.
    pub const PERKS: &str = "perks";
    /// Regions.
    pub const REGIONS: &str = "regions";
    /// Currencies.
    pub const CURRENCIES: &str = "currencies";
    /// Reviews.
    pub const REVIEWS: &str = "reviews";
    /// Approximate sitter locations.
    pub const INACCURATE_LOCATIONS: &str = "inaccurate_locations";
    /// Meta tags.
    pub const META_TAGS: &str = "meta_tags";
    /// Currency exchange rates.
    pub const CURRENCY_RATES: &str = "currency_rates";
}

/// A typed, identified resource.
///
/// A missing or `null` `attributes` member decodes to `A::default()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "A: Serialize", deserialize = "A: Deserialize<'de> + Default"))]
pub struct Resource<A = Attributes> {
    /// Resource ID.
    pub id: String,
    /// Wire type, e.g. `users`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Resource attributes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: A,
    /// Named references to other resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<HashMap<String, Relationship>>,
}

fn null_as_default<'de, D, A>(deserializer: D) -> Result<A, D::Error>
where
    D: Deserializer<'de>,
    A: Deserialize<'de> + Default,
{
    Ok(Option::<A>::deserialize(deserializer)?.unwrap_or_default())
}

impl<A> Resource<A> {
    /// Look up a relationship by name.
    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.as_ref()?.get(name)
    }
}

/// A relationship entry: `{ "data": ..., "links": ..., "meta": ... }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Linkage; absent or `null` when the relationship was not populated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RelationshipData>,
    /// Any other members (`links`, `meta`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Linkage of a relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    /// To-one reference.
    ToOne(ResourceIdentifier),
    /// To-many references, in wire order.
    ToMany(Vec<ResourceIdentifier>),
}

impl RelationshipData {
    /// The reference surfaced by this client: the single one for to-one,
    /// the first for to-many.
    pub fn primary(&self) -> Option<&ResourceIdentifier> {
        match self {
            RelationshipData::ToOne(identifier) => Some(identifier),
            RelationshipData::ToMany(identifiers) => identifiers.first(),
        }
    }

    /// All references, in wire order.
    pub fn identifiers(&self) -> &[ResourceIdentifier] {
        match self {
            RelationshipData::ToOne(identifier) => std::slice::from_ref(identifier),
            RelationshipData::ToMany(identifiers) => identifiers,
        }
    }
}

/// A lightweight `(id, type)` pointer to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// Target ID.
    pub id: String,
    /// Target wire type.
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResourceIdentifier {
    /// Create an identifier.
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationMeta {
    /// Current page (1-based).
    pub current_page: u32,
    /// Total number of records.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u32,
}

/// Paginated list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Primary resources, in server order.
    pub data: Vec<T>,
    /// Related resources shared by every element of `data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<IncludedResource>>,
    /// Pagination metadata. Zeroed when the server omits it.
    #[serde(default)]
    pub meta: PaginationMeta,
}

impl<T> ListResponse<T> {
    /// The included pool, empty when the server sent none.
    pub fn included(&self) -> &[IncludedResource] {
        self.included.as_deref().unwrap_or(&[])
    }

    /// `(id, type)` pairs that occur more than once in the included pool.
    ///
    /// Resolution always picks the first occurrence.
    pub fn duplicate_included(&self) -> Vec<(&str, &str)> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for resource in self.included() {
            let key = (resource.id(), resource.kind());
            if !seen.insert(key) && reported.insert(key) {
                duplicates.push(key);
            }
        }
        duplicates
    }
}

// --- Attributes ---

/// User attributes (sitters and parents).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserAttributes {
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// `sitter`, `parent` or `visitor`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    /// `male` or `female`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Birthday as a date string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    /// Hourly rate, as sent by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,
    /// Currency of `rate`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_currency: Option<String>,
    /// Years of experience.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<f64>,
    /// Works online.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_online: Option<bool>,
    /// Works with babies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub babies: Option<bool>,
    /// Works with special needs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_needs: Option<bool>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    /// Education and experience.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_and_experience: Option<String>,
    /// Motivation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivation: Option<String>,
    /// Additional info.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
    /// City ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<i64>,
    /// Region ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<i64>,
    /// Place ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<i64>,
    /// IANA timezone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Age in years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Internal quality score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kidsout_score: Option<f64>,
    /// Graduated from the Kidsout school.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kidsout_school: Option<bool>,
    /// Share of returning clients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_rate: Option<f64>,
    /// Profile views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views_count: Option<u64>,
    /// Invitations received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitations_count: Option<u64>,
    /// Reviews received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews_count: Option<u64>,
    /// Positive reviews.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positive_reviews_count: Option<u64>,
    /// Negative reviews.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_reviews_count: Option<u64>,
    /// Neutral reviews.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neutral_reviews_count: Option<u64>,
    /// Typical response time in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
    /// Unrecognized attributes.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Perk attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerkAttributes {
    /// Perk name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Group name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unrecognized attributes.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Currency attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrencyAttributes {
    /// Currency name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// ISO code, e.g. `RUB`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Display symbol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Unrecognized attributes.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Region attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionAttributes {
    /// Region name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    /// IANA timezone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Location used to center searches in this region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_location: Option<SearchLocation>,
    /// ID of the default place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_place_id: Option<i64>,
    /// Unrecognized attributes.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Search location of a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchLocation {
    /// Human-readable address.
    pub address: String,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Map viewport.
    pub viewport: Viewport,
}

/// Map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// South-west corner.
    pub lower_left: Coordinates,
    /// North-east corner.
    pub upper_right: Coordinates,
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

/// Avatar attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvatarAttributes {
    /// Original image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Image URLs by size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<AvatarImage>,
    /// Named variants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<HashMap<String, AvatarVariant>>,
    /// Unrecognized attributes.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AvatarAttributes {
    /// The best available image URL.
    pub fn best_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .or_else(|| self.image.as_ref()?.url.as_deref())
    }
}

/// Avatar image URLs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvatarImage {
    /// Full size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Thumbnail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    /// Medium size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    /// Unrecognized keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A sized avatar variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarVariant {
    /// Variant URL.
    pub url: String,
    /// Width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Height in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Place attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceAttributes {
    /// Street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Latitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// City ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<i64>,
    /// Region ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<i64>,
    /// Country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Unrecognized attributes.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Review attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewAttributes {
    /// `-1`, `0` or `1`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<i8>,
    /// Review text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Creation timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Booking request ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<i64>,
    /// Author user ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<i64>,
    /// Reviewed user ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<i64>,
    /// Whether the current user may edit the review.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_be_edited: Option<bool>,
    /// Questionnaire answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qa: Option<Value>,
    /// Author name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    /// Author avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_avatar_url: Option<String>,
    /// Unrecognized attributes.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Approximate location attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InaccurateLocationAttributes {
    /// Latitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Unrecognized attributes.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Meta tag attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaTagAttributes {
    /// Page title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Page description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Keywords.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Unrecognized attributes.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Currency rate attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRateAttributes {
    /// Source currency code.
    pub from: String,
    /// Target currency code.
    pub to: String,
    /// Exchange rate.
    pub rate: f64,
}

/// A news item. Not a JSON:API resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    /// News ID.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Body.
    pub body: String,
    /// Publication timestamp.
    pub published_at: String,
    /// Whether the current user has read it.
    #[serde(default)]
    pub is_read: bool,
    /// Unrecognized fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// --- Resources ---

/// User resource.
pub type User = Resource<UserAttributes>;
/// Sitters are users.
pub type Sitter = User;
/// Perk resource.
pub type Perk = Resource<PerkAttributes>;
/// Currency resource.
pub type Currency = Resource<CurrencyAttributes>;
/// Region resource.
pub type Region = Resource<RegionAttributes>;
/// Avatar resource.
pub type Avatar = Resource<AvatarAttributes>;
/// Place resource.
pub type Place = Resource<PlaceAttributes>;
/// Review resource.
pub type Review = Resource<ReviewAttributes>;
/// Approximate location resource.
pub type InaccurateLocation = Resource<InaccurateLocationAttributes>;
/// Meta tag resource.
pub type MetaTag = Resource<MetaTagAttributes>;
/// Currency rate resource.
pub type CurrencyRate = Resource<CurrencyRateAttributes>;

/// An element of the `included` pool, typed by its wire `type`.
///
/// Unknown types land in [`IncludedResource::Other`] with untyped attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IncludedResource {
    /// `users`
    User(User),
    /// `avatars`
    Avatar(Avatar),
    /// `places`
    Place(Place),
    /// `perks`
    Perk(Perk),
    /// `regions`
    Region(Region),
    /// `currencies`
    Currency(Currency),
    /// `reviews`
    Review(Review),
    /// `inaccurate_locations`
    InaccurateLocation(InaccurateLocation),
    /// `meta_tags`
    MetaTag(MetaTag),
    /// Any other type.
    Other(Resource),
}

impl IncludedResource {
    /// Resource ID.
    pub fn id(&self) -> &str {
        self.identity().0
    }

    /// Wire type.
    pub fn kind(&self) -> &str {
        self.identity().1
    }

    /// Whether this resource is the one `identifier` points at.
    pub fn is(&self, identifier: &ResourceIdentifier) -> bool {
        self.identity() == (identifier.id.as_str(), identifier.kind.as_str())
    }

    fn identity(&self) -> (&str, &str) {
        match self {
            IncludedResource::User(r) => (&r.id, &r.kind),
            IncludedResource::Avatar(r) => (&r.id, &r.kind),
            IncludedResource::Place(r) => (&r.id, &r.kind),
            IncludedResource::Perk(r) => (&r.id, &r.kind),
            IncludedResource::Region(r) => (&r.id, &r.kind),
            IncludedResource::Currency(r) => (&r.id, &r.kind),
            IncludedResource::Review(r) => (&r.id, &r.kind),
            IncludedResource::InaccurateLocation(r) => (&r.id, &r.kind),
            IncludedResource::MetaTag(r) => (&r.id, &r.kind),
            IncludedResource::Other(r) => (&r.id, &r.kind),
        }
    }

    /// Type the attributes by wire `type`. Attributes that do not fit the
    /// typed shape are kept untyped in `Other`.
    fn from_raw(raw: RawResource) -> serde_json::Result<Self> {
        let wire_kind = raw.kind.clone();
        match wire_kind.as_str() {
            kind::USERS => raw.typed_or_other(IncludedResource::User),
            kind::AVATARS => raw.typed_or_other(IncludedResource::Avatar),
            kind::PLACES => raw.typed_or_other(IncludedResource::Place),
            kind::PERKS => raw.typed_or_other(IncludedResource::Perk),
            kind::REGIONS => raw.typed_or_other(IncludedResource::Region),
            kind::CURRENCIES => raw.typed_or_other(IncludedResource::Currency),
            kind::REVIEWS => raw.typed_or_other(IncludedResource::Review),
            kind::INACCURATE_LOCATIONS => raw.typed_or_other(IncludedResource::InaccurateLocation),
            kind::META_TAGS => raw.typed_or_other(IncludedResource::MetaTag),
            _ => raw.untyped(),
        }
    }
}

impl<'de> Deserialize<'de> for IncludedResource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawResource::deserialize(deserializer)?;
        IncludedResource::from_raw(raw).map_err(de::Error::custom)
    }
}

/// Wire shape shared by every included resource, before attribute typing.
#[derive(Deserialize)]
struct RawResource {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    attributes: Value,
    #[serde(default)]
    relationships: Option<HashMap<String, Relationship>>,
}

impl RawResource {
    fn typed_or_other<A: DeserializeOwned>(
        self,
        wrap: fn(Resource<A>) -> IncludedResource,
    ) -> serde_json::Result<IncludedResource> {
        let typed = match &self.attributes {
            Value::Null => A::deserialize(&Value::Object(Map::new())),
            attributes => A::deserialize(attributes),
        };
        match typed {
            Ok(attributes) => Ok(wrap(Resource {
                id: self.id,
                kind: self.kind,
                attributes,
                relationships: self.relationships,
            })),
            Err(err) => {
                warn!(
                    id = %self.id,
                    kind = %self.kind,
                    error = %err,
                    "Included resource does not match its typed shape. Keeping it untyped."
                );
                self.untyped()
            }
        }
    }

    fn untyped(self) -> serde_json::Result<IncludedResource> {
        let attributes = match self.attributes {
            Value::Null => Map::new(),
            other => serde_json::from_value(other)?,
        };
        Ok(IncludedResource::Other(Resource {
            id: self.id,
            kind: self.kind,
            attributes,
            relationships: self.relationships,
        }))
    }
}
