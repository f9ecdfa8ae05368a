//! Query parameters for list endpoints.
//!
//! Parameters are validated before any request is issued and then flattened
//! into ordered `(key, value)` pairs: lists become comma-joined strings,
//! sparse fieldsets become `fields[<type>]`, and the bounding box becomes
//! `bbox[bl][lat]`-style keys.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};

use crate::error::{Error, Result};

/// Upper bound for `per_page`.
pub const MAX_PER_PAGE: u32 = 1000;

/// Upper bound for `min_rate` and `max_rate`.
pub const MAX_RATE: f64 = 10_000_000.0;

/// Sort order for sitter search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sort {
    /// `experience`
    Experience,
    /// `-experience`
    ExperienceDesc,
    /// `rate`
    Rate,
    /// `-rate`
    RateDesc,
    /// `age`
    Age,
    /// `-age`
    AgeDesc,
    /// `distance`
    Distance,
    /// `-return_rate`
    ReturnRateDesc,
    /// `-kidsout_score`
    KidsoutScoreDesc,
}

impl Sort {
    /// Every supported sort order.
    pub const ALL: [Sort; 9] = [
        Sort::Experience,
        Sort::ExperienceDesc,
        Sort::Rate,
        Sort::RateDesc,
        Sort::Age,
        Sort::AgeDesc,
        Sort::Distance,
        Sort::ReturnRateDesc,
        Sort::KidsoutScoreDesc,
    ];

    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Sort::Experience => "experience",
            Sort::ExperienceDesc => "-experience",
            Sort::Rate => "rate",
            Sort::RateDesc => "-rate",
            Sort::Age => "age",
            Sort::AgeDesc => "-age",
            Sort::Distance => "distance",
            Sort::ReturnRateDesc => "-return_rate",
            Sort::KidsoutScoreDesc => "-kidsout_score",
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sort {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Sort::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Sort::ALL.iter().map(|sort| sort.as_str()).collect();
                let message = format!("sort must be one of {}", allowed.join(", "));
                Error::Validation {
                    issues: vec![message.clone()],
                    message,
                }
            })
    }
}

/// A corner of a bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Corner {
    /// Latitude.
    pub lat: Option<f64>,
    /// Longitude.
    pub lon: Option<f64>,
}

impl Corner {
    /// A corner with both coordinates set.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat: Some(lat),
            lon: Some(lon),
        }
    }
}

/// Bounding box for map searches.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    /// Bottom-left corner.
    pub bl: Option<Corner>,
    /// Top-right corner.
    pub tr: Option<Corner>,
}

impl BoundingBox {
    /// A box with both corners set.
    pub fn new(bl: Corner, tr: Corner) -> Self {
        Self {
            bl: Some(bl),
            tr: Some(tr),
        }
    }
}

/// Parameters for sitter search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSittersParams {
    /// Date, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Start time, `HH:MM`.
    pub start: Option<String>,
    /// End time, `HH:MM`.
    pub end: Option<String>,
    /// Number of kids.
    pub kids: Option<u32>,
    /// Must work with babies.
    pub babies: Option<bool>,
    /// Must have graduated from the Kidsout school.
    pub kidsout_school: Option<bool>,
    /// Must work with special needs.
    pub special_needs: Option<bool>,
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
    /// Required perk IDs.
    pub perks: Vec<u32>,
    /// Minimum hourly rate.
    pub min_rate: Option<f64>,
    /// Maximum hourly rate.
    pub max_rate: Option<f64>,
    /// Currency for the rate bounds.
    pub rate_currency: Option<String>,
    /// Sort order.
    pub sort: Option<Sort>,
    /// Related resources to include, e.g. `avatars`.
    pub include: Vec<String>,
    /// Sparse fieldsets by resource type.
    pub fields: BTreeMap<String, Vec<String>>,
    /// Only sitters working online.
    pub online: Option<bool>,
    /// Region ID.
    pub region_id: Option<u64>,
    /// Search center latitude.
    pub latitude: Option<f64>,
    /// Search center longitude.
    pub longitude: Option<f64>,
    /// Search radius. Cannot be combined with `bbox`.
    pub distance: Option<f64>,
    /// Bounding box. Cannot be combined with `distance`.
    pub bbox: Option<BoundingBox>,
}

impl SearchSittersParams {
    /// Check every rule and report all failures at once.
    pub fn validate(&self) -> Result<()> {
        let mut issues = Vec::new();

        if let Some(date) = &self.date {
            if !is_date(date) {
                issues.push("Invalid date format; expected YYYY-MM-DD".to_string());
            }
        }
        if let Some(start) = &self.start {
            if !is_time(start) {
                issues.push("Invalid start time; expected HH:MM".to_string());
            }
        }
        if let Some(end) = &self.end {
            if !is_time(end) {
                issues.push("Invalid end time; expected HH:MM".to_string());
            }
        }

        check_paging(self.page, self.per_page, &mut issues);

        if let Some(min_rate) = self.min_rate {
            if !(0.0..=MAX_RATE).contains(&min_rate) {
                issues.push("min_rate must be between 0 and 10000000".to_string());
            }
        }
        if let Some(max_rate) = self.max_rate {
            if !(0.0..=MAX_RATE).contains(&max_rate) {
                issues.push("max_rate must be between 0 and 10000000".to_string());
            }
        }
        if let (Some(min_rate), Some(max_rate)) = (self.min_rate, self.max_rate) {
            if min_rate > max_rate {
                issues.push("min_rate cannot be greater than max_rate".to_string());
            }
        }

        if self.distance.is_some() && self.bbox.is_some() {
            issues.push("distance and bbox are mutually exclusive".to_string());
        }
        if let Some(bbox) = &self.bbox {
            match (bbox.bl, bbox.tr) {
                (Some(bl), Some(tr)) => {
                    if bl.lat.is_none() || bl.lon.is_none() {
                        issues.push("bbox.bl must include lat and lon".to_string());
                    }
                    if tr.lat.is_none() || tr.lon.is_none() {
                        issues.push("bbox.tr must include lat and lon".to_string());
                    }
                }
                _ => issues.push("bbox must include both bl and tr objects".to_string()),
            }
        }

        match Error::from_issues(issues) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Flatten into query pairs without validating.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut query = QueryPairs::default();

        query.push("date", self.date.as_ref());
        query.push("start", self.start.as_ref());
        query.push("end", self.end.as_ref());
        query.push("kids", self.kids);
        query.push("babies", self.babies);
        query.push("kidsout_school", self.kidsout_school);
        query.push("special_needs", self.special_needs);
        query.push("page", self.page);
        query.push("per_page", self.per_page);
        query.push_list("perks", &self.perks);
        query.push("min_rate", self.min_rate);
        query.push("max_rate", self.max_rate);
        query.push("rate_currency", self.rate_currency.as_ref());
        query.push("sort", self.sort);
        query.push_list("include", &self.include);
        for (resource, fields) in &self.fields {
            query.push(&format!("fields[{resource}]"), Some(fields.join(",")));
        }
        query.push("online", self.online);
        query.push("region_id", self.region_id);
        query.push("latitude", self.latitude);
        query.push("longitude", self.longitude);
        query.push("distance", self.distance);
        if let Some(bbox) = &self.bbox {
            for (name, corner) in [("bl", bbox.bl), ("tr", bbox.tr)] {
                if let Some(corner) = corner {
                    query.push(&format!("bbox[{name}][lat]"), corner.lat);
                    query.push(&format!("bbox[{name}][lon]"), corner.lon);
                }
            }
        }

        query.0
    }

    /// Validate, then flatten into query pairs.
    pub fn to_query(&self) -> Result<Vec<(String, String)>> {
        self.validate()?;
        Ok(self.query_pairs())
    }
}

/// Parameters for listing reviews. Give at least one of `user_id` or `token`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewsParams {
    /// Access token.
    pub token: Option<String>,
    /// Reviewed user ID.
    pub user_id: Option<u64>,
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
    /// Only reviews before this review ID.
    pub before: Option<u64>,
}

impl ReviewsParams {
    /// Validate, then flatten into query pairs.
    pub fn to_query(&self) -> Result<Vec<(String, String)>> {
        let mut issues = Vec::new();
        check_paging(self.page, self.per_page, &mut issues);
        if let Some(err) = Error::from_issues(issues) {
            return Err(err);
        }

        let mut query = QueryPairs::default();
        query.push("token", self.token.as_ref());
        query.push("user_id", self.user_id);
        query.push("page", self.page);
        query.push("per_page", self.per_page);
        query.push("before", self.before);
        Ok(query.0)
    }
}

/// Parameters for listing news.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewsParams {
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
    /// Only news published before this Unix timestamp.
    pub before: Option<i64>,
}

impl NewsParams {
    /// Validate, then flatten into query pairs.
    pub fn to_query(&self) -> Result<Vec<(String, String)>> {
        let mut issues = Vec::new();
        check_paging(self.page, self.per_page, &mut issues);
        if let Some(err) = Error::from_issues(issues) {
            return Err(err);
        }

        let mut query = QueryPairs::default();
        query.push("page", self.page);
        query.push("per_page", self.per_page);
        query.push("before", self.before);
        Ok(query.0)
    }
}

#[derive(Default)]
struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    fn push<V: ToString>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.0.push((key.to_string(), value.to_string()));
        }
    }

    fn push_list<V: ToString>(&mut self, key: &str, values: &[V]) {
        if !values.is_empty() {
            let joined: Vec<String> = values.iter().map(ToString::to_string).collect();
            self.0.push((key.to_string(), joined.join(",")));
        }
    }
}

fn check_paging(page: Option<u32>, per_page: Option<u32>, issues: &mut Vec<String>) {
    if page == Some(0) {
        issues.push("page must be an integer >= 1".to_string());
    }
    if let Some(per_page) = per_page {
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            issues.push("per_page must be an integer between 1 and 1000".to_string());
        }
    }
}

/// `9` in `shape` stands for any ASCII digit; other bytes must match exactly.
fn has_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value.bytes().zip(shape.bytes()).all(|(v, s)| match s {
            b'9' => v.is_ascii_digit(),
            _ => v == s,
        })
}

fn is_date(value: &str) -> bool {
    has_shape(value, "9999-99-99") && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

fn is_time(value: &str) -> bool {
    has_shape(value, "99:99") && NaiveTime::parse_from_str(value, "%H:%M").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issues(params: &SearchSittersParams) -> Vec<String> {
        match params.validate() {
            Err(Error::Validation { issues, .. }) => issues,
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(()) => Vec::new(),
        }
    }

    #[test]
    fn test_default_params_are_valid() {
        let params = SearchSittersParams::default();
        assert!(params.validate().is_ok());
        assert!(params.query_pairs().is_empty());
    }

    #[test]
    fn test_invalid_date() {
        for date in ["20210501", "2021-5-01", "2021-02-30", "2021-05-01T00"] {
            let params = SearchSittersParams {
                date: Some(date.into()),
                ..Default::default()
            };
            assert_eq!(
                issues(&params),
                vec!["Invalid date format; expected YYYY-MM-DD"],
                "{date}"
            );
        }
    }

    #[test]
    fn test_times() {
        let params = SearchSittersParams {
            start: Some("24:00".into()),
            end: Some("9:60".into()),
            ..Default::default()
        };
        assert_eq!(
            issues(&params),
            vec![
                "Invalid start time; expected HH:MM",
                "Invalid end time; expected HH:MM"
            ]
        );

        let params = SearchSittersParams {
            date: Some("2024-02-29".into()),
            start: Some("00:00".into()),
            end: Some("23:59".into()),
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_paging() {
        let params = SearchSittersParams {
            per_page: Some(0),
            ..Default::default()
        };
        assert_eq!(
            issues(&params),
            vec!["per_page must be an integer between 1 and 1000"]
        );

        let params = SearchSittersParams {
            page: Some(0),
            per_page: Some(1001),
            ..Default::default()
        };
        assert_eq!(issues(&params).len(), 2);

        let params = SearchSittersParams {
            page: Some(1),
            per_page: Some(1000),
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rates() {
        let params = SearchSittersParams {
            min_rate: Some(-1.0),
            max_rate: Some(20_000_000.0),
            ..Default::default()
        };
        assert_eq!(
            issues(&params),
            vec![
                "min_rate must be between 0 and 10000000",
                "max_rate must be between 0 and 10000000"
            ]
        );

        let params = SearchSittersParams {
            min_rate: Some(500.0),
            max_rate: Some(100.0),
            ..Default::default()
        };
        assert_eq!(issues(&params), vec!["min_rate cannot be greater than max_rate"]);

        let params = SearchSittersParams {
            min_rate: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(issues(&params).len(), 1);
    }

    #[test]
    fn test_distance_and_bbox_exclusive() {
        let params = SearchSittersParams {
            distance: Some(5.0),
            bbox: Some(BoundingBox::new(Corner::new(1.0, 2.0), Corner::new(3.0, 4.0))),
            ..Default::default()
        };
        assert_eq!(issues(&params), vec!["distance and bbox are mutually exclusive"]);
    }

    #[test]
    fn test_incomplete_bbox() {
        let params = SearchSittersParams {
            bbox: Some(BoundingBox {
                bl: Some(Corner::new(1.0, 2.0)),
                tr: None,
            }),
            ..Default::default()
        };
        assert_eq!(issues(&params), vec!["bbox must include both bl and tr objects"]);

        let params = SearchSittersParams {
            bbox: Some(BoundingBox::new(
                Corner {
                    lat: Some(1.0),
                    lon: None,
                },
                Corner {
                    lat: None,
                    lon: Some(4.0),
                },
            )),
            ..Default::default()
        };
        assert_eq!(
            issues(&params),
            vec!["bbox.bl must include lat and lon", "bbox.tr must include lat and lon"]
        );
    }

    #[test]
    fn test_validation_message_is_first_issue() {
        let params = SearchSittersParams {
            date: Some("bad".into()),
            per_page: Some(0),
            ..Default::default()
        };
        match params.validate() {
            Err(Error::Validation { message, issues }) => {
                assert_eq!(message, "Invalid date format; expected YYYY-MM-DD");
                assert_eq!(issues.len(), 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_query_pairs_flattening() {
        let mut fields = BTreeMap::new();
        fields.insert("users".to_string(), vec!["name".to_string(), "age".to_string()]);
        fields.insert("perks".to_string(), vec!["name".to_string()]);

        let params = SearchSittersParams {
            date: Some("2024-05-01".into()),
            babies: Some(true),
            per_page: Some(10),
            perks: vec![1, 2, 3],
            sort: Some(Sort::KidsoutScoreDesc),
            include: vec!["avatars".into(), "inaccurate_location".into()],
            fields,
            bbox: Some(BoundingBox::new(
                Corner::new(55.5, 37.25),
                Corner::new(56.0, 38.0),
            )),
            ..Default::default()
        };

        let pairs = params.to_query().unwrap();
        let pairs: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("date", "2024-05-01"),
                ("babies", "true"),
                ("per_page", "10"),
                ("perks", "1,2,3"),
                ("sort", "-kidsout_score"),
                ("include", "avatars,inaccurate_location"),
                ("fields[perks]", "name"),
                ("fields[users]", "name,age"),
                ("bbox[bl][lat]", "55.5"),
                ("bbox[bl][lon]", "37.25"),
                ("bbox[tr][lat]", "56"),
                ("bbox[tr][lon]", "38"),
            ]
        );
    }

    #[test]
    fn test_to_query_rejects_invalid() {
        let params = SearchSittersParams {
            end: Some("25:00".into()),
            ..Default::default()
        };
        assert!(matches!(params.to_query(), Err(Error::Validation { .. })));
    }

    #[test]
    fn test_sort_from_str() {
        assert_eq!("-rate".parse::<Sort>().unwrap(), Sort::RateDesc);
        for sort in Sort::ALL {
            assert_eq!(sort.as_str().parse::<Sort>().unwrap(), sort);
        }
        let err = "popularity".parse::<Sort>().unwrap_err();
        assert!(err.to_string().contains("sort must be one of experience"));
    }

    #[test]
    fn test_reviews_and_news_params() {
        let reviews = ReviewsParams {
            user_id: Some(240466),
            per_page: Some(1),
            ..Default::default()
        };
        assert_eq!(
            reviews.to_query().unwrap(),
            vec![
                ("user_id".to_string(), "240466".to_string()),
                ("per_page".to_string(), "1".to_string())
            ]
        );

        let news = NewsParams {
            page: Some(0),
            ..Default::default()
        };
        assert!(news.to_query().is_err());
    }
}
