//! The field table for setting up a places sensor

use super::{Constraint, FieldKind, FieldSpec, Schema};
use crate::error::SchemaDefinitionError;

pub const DOMAIN: &str = "places";
pub const STEP_ID: &str = "user";
pub const ENTRY_VERSION: u32 = 1;

pub const CONF_NAME: &str = "name";
pub const CONF_DEVICETRACKER_ID: &str = "devicetracker_id";
pub const CONF_API_KEY: &str = "api_key";
pub const CONF_OPTIONS: &str = "options";
pub const CONF_HOME_ZONE: &str = "home_zone";
pub const CONF_MAP_PROVIDER: &str = "map_provider";
pub const CONF_MAP_ZOOM: &str = "map_zoom";
pub const CONF_LANGUAGE: &str = "language";
pub const CONF_EXTENDED_ATTR: &str = "extended_attr";

pub const DEFAULT_OPTION: &str = "zone, place";
pub const DEFAULT_HOME_ZONE: &str = "zone.home";
pub const DEFAULT_MAP_PROVIDER: &str = "osm";
pub const DEFAULT_MAP_ZOOM: i64 = 18;
pub const DEFAULT_EXTENDED_ATTR: bool = false;

pub const MAP_PROVIDER_OPTIONS: [&str; 3] = ["apple", "google", "osm"];
pub const MAP_ZOOM_MIN: i64 = 1;
pub const MAP_ZOOM_MAX: i64 = 20;

/// Build the places schema
pub fn places_schema() -> Result<Schema, SchemaDefinitionError> {
    Schema::new(vec![
        FieldSpec::required(CONF_NAME, FieldKind::Text),
        FieldSpec::required(CONF_DEVICETRACKER_ID, FieldKind::Text),
        FieldSpec::optional(CONF_API_KEY, FieldKind::Text),
        FieldSpec::optional(CONF_OPTIONS, FieldKind::Text).with_default(DEFAULT_OPTION),
        FieldSpec::optional(CONF_HOME_ZONE, FieldKind::Text).with_default(DEFAULT_HOME_ZONE),
        FieldSpec::optional(CONF_MAP_PROVIDER, FieldKind::Text)
            .with_default(DEFAULT_MAP_PROVIDER)
            .with_constraint(Constraint::one_of(&MAP_PROVIDER_OPTIONS)),
        FieldSpec::optional(CONF_MAP_ZOOM, FieldKind::Integer)
            .with_default(DEFAULT_MAP_ZOOM)
            .with_constraint(Constraint::Range {
                min: MAP_ZOOM_MIN,
                max: MAP_ZOOM_MAX,
            }),
        FieldSpec::optional(CONF_LANGUAGE, FieldKind::Text),
        FieldSpec::optional(CONF_EXTENDED_ATTR, FieldKind::Boolean)
            .with_default(DEFAULT_EXTENDED_ATTR),
    ])
}
